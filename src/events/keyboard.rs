use crate::dom::Listeners;
use crate::modal::ModalView;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Escape closes the project modal.
pub fn wire_global_keydown(listeners: &mut Listeners, modal: Rc<RefCell<ModalView>>) {
    let Some(w) = web::window() else {
        return;
    };
    listeners.on(&w, "keydown", move |ev: web::KeyboardEvent| {
        if ev.key() != "Escape" || ev.repeat() {
            return;
        }
        // try_borrow: a click handler may still hold the view.
        let Ok(mut view) = modal.try_borrow_mut() else {
            return;
        };
        if view.is_visible() {
            ev.prevent_default();
            view.request_close();
        }
    });
}
