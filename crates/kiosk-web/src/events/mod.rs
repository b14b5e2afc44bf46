pub mod grab;
pub mod keyboard;
pub mod pointer;

pub use grab::CardGrab;
pub use keyboard::wire_global_keydown;
pub use pointer::{wire_input_handlers, InputWiring};
