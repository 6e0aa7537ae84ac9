//! Feeds live section geometry to the [`ScrollTracker`] and mirrors the
//! current section onto the navbar.

use crate::constants::{NAV_ACTIVE_ATTR, NAV_ATTR, NAV_SELECTOR, VIEWPORT_CENTER_FRACTION};
use crate::dom::{self, Listeners};
use crate::input;
use folio_core::{ScrollTracker, SectionId, SectionSample};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

type Anchors = Rc<Vec<(SectionId, web::Element)>>;

/// Owns every listener it adds; dropping it removes them and deregisters
/// all sections from the tracker.
pub struct ScrollWiring {
    tracker: Rc<RefCell<ScrollTracker>>,
    _listeners: Listeners,
}

impl ScrollWiring {
    pub fn attach(document: &web::Document, tracker: Rc<RefCell<ScrollTracker>>) -> Self {
        let mut anchors = Vec::with_capacity(SectionId::ALL.len());
        {
            let mut t = tracker.borrow_mut();
            for id in SectionId::ALL {
                match document.get_element_by_id(id.dom_id()) {
                    Some(el) => {
                        t.register(id);
                        anchors.push((id, el));
                    }
                    None => log::debug!("[scroll] no #{} on page, skipped", id.dom_id()),
                }
            }
        }
        let anchors: Anchors = Rc::new(anchors);
        log::info!("[scroll] tracking {} sections", anchors.len());

        let mut listeners = Listeners::default();
        if let Some(w) = web::window() {
            for ev in ["scroll", "resize"] {
                let tracker_cb = tracker.clone();
                let anchors_cb = anchors.clone();
                let doc_cb = document.clone();
                listeners.on(&w, ev, move |_: web::Event| {
                    sample(&doc_cb, &tracker_cb, &anchors_cb);
                });
            }
        }
        wire_nav(&mut listeners, document);

        // The page may load scrolled past the first section.
        sample(document, &tracker, &anchors);
        highlight_nav(document, tracker.borrow().current());

        Self {
            tracker,
            _listeners: listeners,
        }
    }
}

impl Drop for ScrollWiring {
    fn drop(&mut self) {
        self.tracker.borrow_mut().deregister_all();
        log::debug!("[scroll] detached");
    }
}

fn sample(document: &web::Document, tracker: &RefCell<ScrollTracker>, anchors: &Anchors) {
    let (_, vh) = dom::viewport_size();
    let center = input::viewport_center_y(vh, VIEWPORT_CENTER_FRACTION);
    let samples = anchors.iter().map(|(id, el)| {
        let r = el.get_bounding_client_rect();
        SectionSample {
            id: *id,
            top: r.top(),
            bottom: r.bottom(),
        }
    });
    let changed = tracker.borrow_mut().update(samples, center);
    if let Some(id) = changed {
        highlight_nav(document, id);
    }
}

fn highlight_nav(document: &web::Document, current: SectionId) {
    let Ok(list) = document.query_selector_all(NAV_SELECTOR) else {
        return;
    };
    for i in 0..list.length() {
        let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let is_current = el.get_attribute(NAV_ATTR).as_deref() == Some(current.dom_id());
        if is_current {
            _ = el.set_attribute(NAV_ACTIVE_ATTR, "1");
        } else {
            _ = el.remove_attribute(NAV_ACTIVE_ATTR);
        }
    }
}

fn wire_nav(listeners: &mut Listeners, document: &web::Document) {
    let Ok(list) = document.query_selector_all(NAV_SELECTOR) else {
        return;
    };
    let smooth = !dom::prefers_reduced_motion();
    for i in 0..list.length() {
        let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let target = el.get_attribute(NAV_ATTR).unwrap_or_default();
        let Some(section) = SectionId::from_dom_id(&target) else {
            log::warn!("[scroll] nav entry points at unknown section {:?}", target);
            continue;
        };
        let doc = document.clone();
        listeners.on(&el, "click", move |ev: web::MouseEvent| {
            let Some(anchor) = doc.get_element_by_id(section.dom_id()) else {
                return;
            };
            ev.prevent_default();
            let opts = web::ScrollIntoViewOptions::new();
            opts.set_behavior(if smooth {
                web::ScrollBehavior::Smooth
            } else {
                web::ScrollBehavior::Auto
            });
            opts.set_block(web::ScrollLogicalPosition::Start);
            anchor.scroll_into_view_with_scroll_into_view_options(&opts);
        });
    }
}
