// Viewer library - exposes all core modules for testing

pub mod app;
pub mod input;
pub mod model;
pub mod services;
pub mod view;
