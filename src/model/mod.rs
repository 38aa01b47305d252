//! Data model: decoded records and the scrollback buffer.

pub mod record;
pub mod scroll;
