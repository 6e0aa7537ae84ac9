//! Open/close choreography of the project panel.
//!
//! `Closed → Opening → Open → Closing → Closed`. The controller owns the
//! panel's 2D tween and keeps the shared [`SceneState`] in step: opening
//! records the active project and the origin rect, mounting consumes the
//! origin, closing clears both.

use crate::constants::*;
use crate::project::ProjectId;
use crate::rect::{PanelTransform, Rect};
use crate::store::SceneState;
use crate::tween::{AnimationSlot, Ease, Lerp, Tween};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEvent {
    Opened,
    Closed,
}

/// Inline style of the panel element for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelStyle {
    pub transform: PanelTransform,
    pub opacity: f32,
}

impl PanelStyle {
    pub const RESTING: PanelStyle = PanelStyle {
        transform: PanelTransform::IDENTITY,
        opacity: 1.0,
    };
    pub const HIDDEN: PanelStyle = PanelStyle {
        transform: PanelTransform::IDENTITY,
        opacity: 0.0,
    };
}

impl Lerp for PanelStyle {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        PanelStyle {
            transform: self.transform.lerp_to(to.transform, t),
            opacity: self.opacity.lerp_to(to.opacity, t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModalTimings {
    pub open_sec: f32,
    pub close_sec: f32,
}

impl Default for ModalTimings {
    fn default() -> Self {
        Self {
            open_sec: MODAL_OPEN_SEC,
            close_sec: MODAL_CLOSE_SEC,
        }
    }
}

impl ModalTimings {
    /// For `prefers-reduced-motion`: same states, no visible motion.
    pub fn reduced() -> Self {
        Self {
            open_sec: 0.0,
            close_sec: 0.0,
        }
    }
}

pub struct ModalController {
    state: SceneState,
    phase: ModalPhase,
    anim: AnimationSlot<PanelStyle>,
    style: PanelStyle,
    timings: ModalTimings,
    awaiting_mount: bool,
    pending: Option<ModalEvent>,
}

impl ModalController {
    pub fn new(state: SceneState, timings: ModalTimings) -> Self {
        Self {
            state,
            phase: ModalPhase::Closed,
            anim: AnimationSlot::default(),
            style: PanelStyle::HIDDEN,
            timings,
            awaiting_mount: false,
            pending: None,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn style(&self) -> PanelStyle {
        self.style
    }

    pub fn is_visible(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    /// The close control is disabled while the reverse tween runs.
    pub fn close_disabled(&self) -> bool {
        self.phase == ModalPhase::Closing
    }

    fn set_phase(&mut self, phase: ModalPhase) {
        if self.phase != phase {
            log::debug!("[modal] {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Card click. `origin` is the card rect captured at click time.
    ///
    /// Opening over a running close finishes that close first; opening while
    /// already open is ignored.
    pub fn open(&mut self, project: ProjectId, origin: Option<Rect>) {
        match self.phase {
            ModalPhase::Opening | ModalPhase::Open => {
                log::warn!("[modal] open({:?}) ignored, panel already open", project);
                return;
            }
            ModalPhase::Closing => self.finish_close(),
            ModalPhase::Closed => {}
        }
        self.pending = None;
        self.anim.kill_any();
        self.state.set_transition_origin(origin);
        self.state.set_active_project(Some(project));
        self.style = PanelStyle::HIDDEN;
        self.awaiting_mount = true;
        self.set_phase(ModalPhase::Opening);
    }

    /// The panel exists in the DOM and has been laid out at `panel`.
    /// Starts the entry tween from the stored origin and consumes it.
    pub fn panel_mounted(&mut self, panel: Rect) -> PanelStyle {
        if self.phase != ModalPhase::Opening || !self.awaiting_mount {
            return self.style;
        }
        self.awaiting_mount = false;
        match self.state.transition_origin() {
            Some(origin) => {
                let from = PanelStyle {
                    transform: PanelTransform::mapping(panel, origin),
                    opacity: MODAL_OPEN_START_OPACITY,
                };
                let [x1, y1, x2, y2] = MODAL_OPEN_BEZIER;
                self.anim.start(Tween::new(
                    from,
                    PanelStyle::RESTING,
                    self.timings.open_sec,
                    Ease::CubicBezier(x1, y1, x2, y2),
                ));
                self.style = from;
            }
            None => {
                self.style = PanelStyle::RESTING;
                self.set_phase(ModalPhase::Open);
                self.pending = Some(ModalEvent::Opened);
            }
        }
        // A later resize must never replay this rect.
        self.state.set_transition_origin(None);
        self.style
    }

    /// Escape, backdrop click or the close control.
    ///
    /// `card` is the originating card's rect if it could be found again,
    /// `panel_on_screen` the panel's current (possibly transformed) rect.
    /// Returns `Some(Closed)` when the panel closed without a tween.
    pub fn request_close(&mut self, card: Option<Rect>, panel_on_screen: Rect) -> Option<ModalEvent> {
        match self.phase {
            ModalPhase::Closed | ModalPhase::Closing => return None,
            ModalPhase::Opening | ModalPhase::Open => {}
        }
        self.anim.kill_any();
        let card = match card {
            Some(c) if !self.awaiting_mount => c,
            _ => {
                self.finish_close();
                return Some(ModalEvent::Closed);
            }
        };
        let layout = untransformed(panel_on_screen, self.style.transform);
        let to = PanelStyle {
            transform: PanelTransform::mapping(layout, card),
            opacity: 0.0,
        };
        self.anim.start(Tween::new(
            self.style,
            to,
            self.timings.close_sec,
            Ease::PowerIn(MODAL_CLOSE_EASE_POWER),
        ));
        self.set_phase(ModalPhase::Closing);
        None
    }

    /// The running animation was cancelled by the host. A cancelled close
    /// still counts as closed; a cancelled open snaps to rest.
    pub fn interrupt(&mut self) -> Option<ModalEvent> {
        self.anim.kill_any();
        match self.phase {
            ModalPhase::Closing => {
                self.finish_close();
                Some(ModalEvent::Closed)
            }
            ModalPhase::Opening => {
                self.awaiting_mount = false;
                self.state.set_transition_origin(None);
                self.style = PanelStyle::RESTING;
                self.set_phase(ModalPhase::Open);
                Some(ModalEvent::Opened)
            }
            ModalPhase::Open | ModalPhase::Closed => None,
        }
    }

    /// Advance the panel tween by one frame.
    pub fn tick(&mut self, dt_sec: f32) -> Option<ModalEvent> {
        if let Some(ev) = self.pending.take() {
            return Some(ev);
        }
        let (style, done) = self.anim.step(dt_sec)?;
        self.style = style;
        if !done {
            return None;
        }
        match self.phase {
            ModalPhase::Opening => {
                self.set_phase(ModalPhase::Open);
                Some(ModalEvent::Opened)
            }
            ModalPhase::Closing => {
                self.finish_close();
                Some(ModalEvent::Closed)
            }
            ModalPhase::Open | ModalPhase::Closed => None,
        }
    }

    fn finish_close(&mut self) {
        self.anim.kill_any();
        self.awaiting_mount = false;
        self.pending = None;
        self.style = PanelStyle::HIDDEN;
        self.set_phase(ModalPhase::Closed);
        self.state.set_active_project(None);
        self.state.set_transition_origin(None);
    }
}

/// Layout rect of an element currently drawn at `on_screen` with `t` applied.
fn untransformed(on_screen: Rect, t: PanelTransform) -> Rect {
    if t.scale_x <= 0.0 || t.scale_y <= 0.0 {
        return on_screen;
    }
    Rect {
        left: on_screen.left - t.translate_x,
        top: on_screen.top - t.translate_y,
        width: on_screen.width / t.scale_x,
        height: on_screen.height / t.scale_y,
    }
}
