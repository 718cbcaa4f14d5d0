pub mod keyboard;
pub mod pointer;

pub use keyboard::{wire_global_keydown, wire_key_set};
pub use pointer::wire_pointer_handlers;
