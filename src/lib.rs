#![cfg(target_arch = "wasm32")]
//! Browser entry point: wires the DOM, the shared scene store and the WebGPU
//! backdrop together and keeps them alive until the page is hidden.

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod modal;
mod overflow;
mod render;
mod scroll;

use constants::*;
use dom::Listeners;
use folio_core::{ProviderGuard, SceneState, ScrollTracker, Subscription};
use frame::{FrameContext, LoopHandle};
use input::{PageHide, PointerState};
use modal::ModalView;
use scroll::ScrollWiring;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Everything with a page lifetime. Field order is drop order: the loop
/// stops first, then every DOM listener, and the store provider goes last.
struct App {
    _loop: LoopHandle,
    _listeners: Listeners,
    _scroll: ScrollWiring,
    _subscription: Subscription,
    _provider: ProviderGuard,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::sync_canvas_backing_size(&canvas);

    let (state, provider) = SceneState::provide().map_err(|e| anyhow::anyhow!(e))?;

    let tracker = Rc::new(RefCell::new(ScrollTracker::new()));
    let scroll = ScrollWiring::attach(&document, tracker.clone());

    let modal = Rc::new(RefCell::new(ModalView::new(&document, state.clone())?));
    let mut listeners = Listeners::default();
    events::wire_cards(&mut listeners, &document, modal.clone())?;
    events::wire_modal_dismiss(&mut listeners, &document, modal.clone());
    events::wire_global_keydown(&mut listeners, modal.clone());
    let pointer = Rc::new(RefCell::new(PointerState::default()));
    events::wire_pointer_parallax(&mut listeners, &document, pointer.clone());
    wire_canvas_resize(&mut listeners, &window, &canvas, modal.clone());
    log::debug!("[init] {} listeners attached", listeners.count());

    let body_doc = document.clone();
    let subscription = state.subscribe(move |snap| {
        let Some(body) = body_doc.body() else {
            return;
        };
        _ = match snap.active_project {
            Some(p) => body.set_attribute(BODY_PROJECT_ATTR, p.key()),
            None => body.remove_attribute(BODY_PROJECT_ATTR),
        };
    });

    let hero = render::hero_mesh();
    let gpu = frame::init_gpu(&canvas, &hero).await;
    let ctx = Rc::new(RefCell::new(FrameContext::new(
        state, tracker, modal, pointer, canvas, hero, gpu,
    )));
    let handle = frame::start_loop(ctx);

    APP.with(|slot| {
        *slot.borrow_mut() = Some(App {
            _loop: handle,
            _listeners: listeners,
            _scroll: scroll,
            _subscription: subscription,
            _provider: provider,
        });
    });

    // A cached page resumes with everything still attached.
    let teardown = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        if PageHide::from_persisted(ev.persisted()) == PageHide::Frozen {
            log::debug!("[init] page cached, keeping app alive");
            return;
        }
        let app = APP.with(|slot| slot.borrow_mut().take());
        if app.is_some() {
            log::info!("folio-web teardown");
        }
        drop(app);
    }) as Box<dyn FnMut(_)>);
    window
        .add_event_listener_with_callback("pagehide", teardown.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    teardown.forget();

    Ok(())
}

/// Keep the canvas backing store matched to its CSS size. A resize during a
/// modal transition settles the transition since its geometry is stale.
fn wire_canvas_resize(
    listeners: &mut Listeners,
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    modal: Rc<RefCell<ModalView>>,
) {
    let canvas = canvas.clone();
    listeners.on(window, "resize", move |_: web::Event| {
        dom::sync_canvas_backing_size(&canvas);
        if let Ok(mut m) = modal.try_borrow_mut() {
            if m.is_visible() {
                m.interrupt();
            }
        }
    });
}
