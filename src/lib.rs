//! stockheat: calendar heatmap of daily stock returns.
//!
//! The pure core (month grids, return classification, responsive cell
//! sizing) lives in [`calendar`] and [`types`] and is usable without a
//! terminal; [`tui`] renders it with ratatui.

pub mod calendar;
pub mod cli;
pub mod services;
pub mod tui;
pub mod types;
