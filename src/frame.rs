use crate::constants::*;
use crate::input::PointerState;
use crate::modal::ModalView;
use crate::render::{GpuState, SceneDraw};
use folio_core::geometry::{self, Mesh};
use folio_core::{
    build_frame, select_content, CameraAim, CameraChoreographer, CameraInputs, MoodEngine,
    SceneState, ScrollTracker,
};
use glam::Vec3;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// State the per-frame tick reads and advances.
pub struct FrameContext {
    pub state: SceneState,
    pub tracker: Rc<RefCell<ScrollTracker>>,
    pub camera: CameraChoreographer,
    pub mood: MoodEngine,
    pub modal: Rc<RefCell<ModalView>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<GpuState>,
    pub hero_indices: Vec<u32>,
    pub hero_normals: Vec<Vec3>,
    pub last_instant: Instant,
    pub time: f32,
}

impl FrameContext {
    pub fn new(
        state: SceneState,
        tracker: Rc<RefCell<ScrollTracker>>,
        modal: Rc<RefCell<ModalView>>,
        pointer: Rc<RefCell<PointerState>>,
        canvas: web::HtmlCanvasElement,
        hero: Mesh,
        gpu: Option<GpuState>,
    ) -> Self {
        let section = tracker.borrow().current();
        Self {
            state,
            tracker,
            camera: CameraChoreographer::new(section),
            mood: MoodEngine::new(hero.positions, section),
            modal,
            pointer,
            canvas,
            gpu,
            hero_indices: hero.indices,
            hero_normals: hero.normals,
            last_instant: Instant::now(),
            time: 0.0,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        self.time += dt_sec;

        let section = self.tracker.borrow().current();
        let snapshot = self.state.snapshot();
        let pointer = self.pointer.borrow().normalized;

        let camera = self.camera.update(
            dt_sec,
            CameraInputs {
                section,
                project_active: snapshot.active_project.is_some(),
                pointer,
            },
        );
        let mood = self.mood.update_section(
            dt_sec,
            section,
            snapshot.active_project,
            snapshot.hover_project,
        );
        let positions = self.mood.deform(self.time);
        geometry::recompute_normals(positions, &self.hero_indices, &mut self.hero_normals);
        let scene = build_frame(select_content(snapshot.active_project, section), self.time);

        // Modal after the store read so this frame's geometry matches the
        // project that was active when it started.
        match self.modal.try_borrow_mut() {
            Ok(mut modal) => modal.frame(dt_sec),
            Err(_) => log::warn!("[frame] modal busy, skipping tick"),
        }

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        let draw = SceneDraw {
            camera,
            mood,
            hero_positions: positions,
            hero_normals: &self.hero_normals,
            frame: &scene,
            inspecting: self.camera.aim() == CameraAim::Inspect,
            time: self.time,
        };
        match gpu.render(&draw) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

/// Create the renderer, or `None` when WebGPU is unavailable. The DOM half
/// of the page keeps working either way.
pub async fn init_gpu(canvas: &web::HtmlCanvasElement, hero: &Mesh) -> Option<GpuState> {
    match GpuState::new(canvas, hero).await {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            log::warn!("[render] WebGPU unavailable, scene disabled: {:?}", e);
            None
        }
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owns the requestAnimationFrame chain. Dropping it cancels the pending
/// frame and releases the tick closure.
pub struct LoopHandle {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickSlot,
}

impl LoopHandle {
    pub fn stop(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(tick: &TickSlot, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => raf_id.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let raf_id = Rc::new(Cell::new(None));
    let tick: TickSlot = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_clone.set(None);
        ctx.borrow_mut().frame();
        request_frame(&tick_clone, &raf_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);
    LoopHandle { raf_id, tick }
}
