//! View and UI layer
//!
//! Formatting of records into display blocks and painting of the viewport.

pub mod format;
pub mod theme;
pub mod viewport;
