//! Terminal UI: app loop, theme, and widgets

pub mod app;
pub mod theme;
pub mod widgets;
