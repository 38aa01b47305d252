//! Services that talk to the outside world: the input stream, the terminal and
//! the diagnostics log.

pub mod ingest;
pub mod log_dirs;
pub mod stdin_source;
pub mod terminal_modes;
pub mod tracing_setup;
