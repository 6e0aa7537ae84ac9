use crate::constants::{CARD_ATTR, REDUCED_MOTION_QUERY};
use crate::input;
use crate::overflow::{OverflowLock, OverflowRestore};
use folio_core::{ProjectId, Rect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Entry = (web::EventTarget, &'static str, Closure<dyn FnMut(web::Event)>);

/// Event listeners that stay attached until this is dropped.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Entry>,
}

impl Listeners {
    pub fn on<E>(
        &mut self,
        target: &impl AsRef<web::EventTarget>,
        event: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) where
        E: JsCast + 'static,
    {
        let target: &web::EventTarget = target.as_ref();
        let closure = Closure::wrap(
            Box::new(move |ev: web::Event| handler(ev.unchecked_into::<E>()))
                as Box<dyn FnMut(web::Event)>,
        );
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => self.entries.push((target.clone(), event, closure)),
            Err(e) => log::warn!("[dom] {} listener not added: {:?}", event, e),
        }
    }

    pub fn on_click(
        &mut self,
        document: &web::Document,
        element_id: &str,
        handler: impl FnMut(web::MouseEvent) + 'static,
    ) {
        match document.get_element_by_id(element_id) {
            Some(el) => self.on(&el, "click", handler),
            None => log::warn!("[dom] missing #{}", element_id),
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (target, event, closure) in self.entries.drain(..) {
            _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (w_px, h_px) = input::backing_size(rect.width(), rect.height(), w.device_pixel_ratio());
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
}

#[inline]
pub fn element_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

pub fn html_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// The card that opens `project`, if it is currently in the DOM.
pub fn find_card(document: &web::Document, project: ProjectId) -> Option<web::HtmlElement> {
    let selector = format!("[{}=\"{}\"]", CARD_ATTR, project.key());
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn viewport_size() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (px(w.inner_width()), px(w.inner_height()))
}

pub fn prefers_reduced_motion() -> bool {
    web::window()
        .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

/// Page scroll lock held while the modal is visible.
#[derive(Debug, Default)]
pub struct ScrollLock {
    inner: OverflowLock,
}

impl ScrollLock {
    pub fn lock(&mut self, document: &web::Document) {
        let Some(body) = document.body() else {
            return;
        };
        let style = body.style();
        if self
            .inner
            .lock(|| style.get_property_value("overflow").unwrap_or_default())
        {
            _ = style.set_property("overflow", "hidden");
        }
    }

    /// Put back exactly what was there before `lock`.
    pub fn restore(&mut self, document: &web::Document) {
        let Some(restore) = self.inner.release() else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        let style = body.style();
        match restore {
            OverflowRestore::Remove => {
                _ = style.remove_property("overflow");
            }
            OverflowRestore::Set(prev) => {
                _ = style.set_property("overflow", &prev);
            }
        }
    }
}
