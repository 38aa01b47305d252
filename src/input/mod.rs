//! Input pipeline
//!
//! Key events are translated to viewer commands here.

pub mod keybindings;
