//! TUI widgets

pub mod header;
pub mod heatmap;
pub mod legend;
pub mod spinner;
pub mod tooltip;
