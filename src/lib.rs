//! Employee performance dashboard: loads the employee table once, derives
//! filtered and aggregated views and draws them with egui.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
