pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::{wire_cards, wire_modal_dismiss, wire_pointer_parallax};
