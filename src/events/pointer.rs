use crate::constants::{CARD_ATTR, CARD_SELECTOR, MODAL_CLOSE_ID, MODAL_ID};
use crate::dom::{self, Listeners};
use crate::input::PointerState;
use crate::modal::ModalView;
use folio_core::{use_scene_state, ProjectId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_parallax(
    listeners: &mut Listeners,
    document: &web::Document,
    pointer: Rc<RefCell<PointerState>>,
) {
    let p_move = pointer.clone();
    if let Some(w) = web::window() {
        listeners.on(&w, "pointermove", move |ev: web::PointerEvent| {
            let (vw, vh) = dom::viewport_size();
            p_move
                .borrow_mut()
                .moved(ev.client_x() as f64, ev.client_y() as f64, vw, vh);
        });
    }
    if let Some(root) = document.document_element() {
        listeners.on(&root, "pointerleave", move |_: web::PointerEvent| {
            pointer.borrow_mut().left();
        });
    }
}

/// Hover, focus and click on every project card. Fails when no store has
/// been provided.
pub fn wire_cards(
    listeners: &mut Listeners,
    document: &web::Document,
    modal: Rc<RefCell<ModalView>>,
) -> anyhow::Result<()> {
    let state = use_scene_state()?;
    let cards = document
        .query_selector_all(CARD_SELECTOR)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let mut wired = 0;
    for i in 0..cards.length() {
        let Some(card) = cards.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let key = card.get_attribute(CARD_ATTR).unwrap_or_default();
        let Some(id) = ProjectId::from_key(&key) else {
            log::warn!("[cards] unknown project key {:?}", key);
            continue;
        };

        let s = state.clone();
        listeners.on(&card, "pointerenter", move |_: web::PointerEvent| {
            s.set_hover_project(Some(id))
        });
        let s = state.clone();
        listeners.on(&card, "pointerleave", move |_: web::PointerEvent| {
            clear_hover_if(&s, id)
        });
        let s = state.clone();
        listeners.on(&card, "focus", move |_: web::Event| s.set_hover_project(Some(id)));
        let s = state.clone();
        listeners.on(&card, "blur", move |_: web::Event| clear_hover_if(&s, id));

        let modal_click = modal.clone();
        let card_el = card.clone();
        listeners.on(&card, "click", move |ev: web::MouseEvent| {
            ev.prevent_default();
            let origin = dom::element_rect(&card_el);
            log::info!("[cards] open {:?}", id);
            modal_click.borrow_mut().open(id, Some(origin));
        });
        wired += 1;
    }
    log::info!("[cards] wired {} project cards", wired);
    Ok(())
}

fn clear_hover_if(state: &folio_core::SceneState, id: ProjectId) {
    if state.hover_project() == Some(id) {
        state.set_hover_project(None);
    }
}

/// Backdrop click and the close control.
pub fn wire_modal_dismiss(
    listeners: &mut Listeners,
    document: &web::Document,
    modal: Rc<RefCell<ModalView>>,
) {
    let modal_close = modal.clone();
    listeners.on_click(document, MODAL_CLOSE_ID, move |_ev| {
        modal_close.borrow_mut().request_close();
    });

    // Only clicks on the backdrop itself, not bubbled from the panel.
    listeners.on_click(document, MODAL_ID, move |ev| {
        let on_backdrop = match (ev.target(), ev.current_target()) {
            (Some(t), Some(c)) => t == c,
            _ => false,
        };
        if on_backdrop {
            modal.borrow_mut().request_close();
        }
    });
}
