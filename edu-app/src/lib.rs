pub mod app;
pub mod components;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod state;
pub mod views;
