use crate::constants::*;
use crate::dom::{self, ScrollLock};
use anyhow::anyhow;
use folio_core::{
    project_info, ModalController, ModalEvent, ModalPhase, ModalTimings, PanelStyle, ProjectId,
    ProjectInfo, Rect, SceneState,
};
use wasm_bindgen::JsCast;
use web_sys as web;

/// DOM half of the project modal: mirrors [`ModalController`] onto
/// `#project-modal` and handles focus and the page scroll lock.
pub struct ModalView {
    document: web::Document,
    root: web::HtmlElement,
    panel: web::HtmlElement,
    close: web::HtmlButtonElement,
    state: SceneState,
    ctrl: ModalController,
    scroll_lock: ScrollLock,
    mount_pending: bool,
    return_focus: Option<ProjectId>,
}

impl ModalView {
    pub fn new(document: &web::Document, state: SceneState) -> anyhow::Result<Self> {
        let root = dom::html_element(document, MODAL_ID)
            .ok_or_else(|| anyhow!("missing #{}", MODAL_ID))?;
        let panel = dom::html_element(document, MODAL_PANEL_ID)
            .ok_or_else(|| anyhow!("missing #{}", MODAL_PANEL_ID))?;
        let close = document
            .get_element_by_id(MODAL_CLOSE_ID)
            .and_then(|el| el.dyn_into::<web::HtmlButtonElement>().ok())
            .ok_or_else(|| anyhow!("missing button #{}", MODAL_CLOSE_ID))?;

        let timings = if dom::prefers_reduced_motion() {
            log::info!("[modal] reduced motion, transitions disabled");
            ModalTimings::reduced()
        } else {
            ModalTimings::default()
        };
        root.set_hidden(true);

        Ok(Self {
            document: document.clone(),
            root,
            panel,
            close,
            ctrl: ModalController::new(state.clone(), timings),
            state,
            scroll_lock: ScrollLock::default(),
            mount_pending: false,
            return_focus: None,
        })
    }

    pub fn is_visible(&self) -> bool {
        self.ctrl.is_visible()
    }

    /// A card was activated. `origin` is the card's rect at click time.
    pub fn open(&mut self, project: ProjectId, origin: Option<Rect>) {
        match self.ctrl.phase() {
            ModalPhase::Opening | ModalPhase::Open => {
                log::debug!("[modal] {:?} ignored, panel busy", project);
                return;
            }
            ModalPhase::Closing => log::debug!("[modal] reopening over a running close"),
            ModalPhase::Closed => {}
        }
        self.ctrl.open(project, origin);
        fill_content(&self.document, project_info(project));

        self.return_focus = Some(project);
        self.scroll_lock.lock(&self.document);
        self.close.set_disabled(false);

        let style = self.panel.style();
        _ = style.set_property("transform-origin", "top left");
        _ = style.set_property("transform", "none");
        _ = style.set_property("opacity", "0");
        self.root.set_hidden(false);
        // Measured on the next frame, once the panel has layout.
        self.mount_pending = true;
    }

    /// Escape, backdrop or close control.
    pub fn request_close(&mut self) {
        if !matches!(self.ctrl.phase(), ModalPhase::Opening | ModalPhase::Open) {
            return;
        }
        let card = self
            .state
            .active_project()
            .and_then(|p| dom::find_card(&self.document, p))
            .map(|el| dom::element_rect(&el));
        if card.is_none() {
            log::debug!("[modal] originating card gone, closing without transition");
        }
        let on_screen = dom::element_rect(&self.panel);
        match self.ctrl.request_close(card, on_screen) {
            Some(ModalEvent::Closed) => {
                self.mount_pending = false;
                self.on_closed();
            }
            _ => self.close.set_disabled(self.ctrl.close_disabled()),
        }
    }

    /// Layout changed under a running transition; its rects are stale.
    pub fn interrupt(&mut self) {
        match self.ctrl.interrupt() {
            Some(ModalEvent::Closed) => self.on_closed(),
            Some(ModalEvent::Opened) => {
                self.mount_pending = false;
                self.apply(self.ctrl.style());
                _ = self.close.focus();
            }
            None => {}
        }
    }

    pub fn frame(&mut self, dt_sec: f32) {
        if !self.ctrl.is_visible() {
            return;
        }
        if self.mount_pending {
            self.mount_pending = false;
            let style = self.ctrl.panel_mounted(dom::element_rect(&self.panel));
            self.apply(style);
            _ = self.close.focus();
        }
        match self.ctrl.tick(dt_sec) {
            Some(ModalEvent::Closed) => {
                self.on_closed();
                return;
            }
            Some(ModalEvent::Opened) => log::debug!("[modal] open"),
            None => {}
        }
        self.apply(self.ctrl.style());
        self.close.set_disabled(self.ctrl.close_disabled());
    }

    fn apply(&self, style: PanelStyle) {
        let css = self.panel.style();
        _ = css.set_property("transform", &style.transform.to_css());
        _ = css.set_property("opacity", &format!("{:.3}", style.opacity));
    }

    fn on_closed(&mut self) {
        self.root.set_hidden(true);
        let css = self.panel.style();
        _ = css.remove_property("transform");
        _ = css.remove_property("opacity");
        self.close.set_disabled(false);
        self.scroll_lock.restore(&self.document);
        if let Some(p) = self.return_focus.take() {
            if let Some(card) = dom::find_card(&self.document, p) {
                _ = card.focus();
            }
        }
        log::debug!("[modal] closed");
    }
}

fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn fill_content(document: &web::Document, info: &ProjectInfo) {
    set_text(document, MODAL_TITLE_ID, info.title);
    set_text(document, MODAL_SUBTITLE_ID, info.subtitle);
    set_text(document, MODAL_STACK_ID, &info.stack.join(" · "));

    if let Some(list) = document.get_element_by_id(MODAL_BULLETS_ID) {
        list.set_text_content(None);
        for &bullet in info.bullets {
            if let Ok(li) = document.create_element("li") {
                li.set_text_content(Some(bullet));
                _ = list.append_child(&li);
            }
        }
    }
    if let Some(link) = document
        .get_element_by_id(MODAL_GITHUB_ID)
        .and_then(|el| el.dyn_into::<web::HtmlAnchorElement>().ok())
    {
        link.set_href(info.github);
    }
}
