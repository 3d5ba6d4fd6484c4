pub mod app;
pub mod bootstrap;
pub mod config;
pub mod deck;
pub mod export;
pub mod input;
pub mod logging;
pub mod navigation;
pub mod runtime;
pub mod theme;
pub mod ui;
