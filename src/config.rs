use std::path::PathBuf;

use eframe::egui::Color32;
use palette::{named, Srgb};

use crate::color::to_color32;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Fixed settings of the dashboard. The program takes no flags, so this is
/// always [`DashboardConfig::default`]; tests build their own.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Employee table read once at startup.
    pub data_path: PathBuf,
    /// Company logo shown at the top of the sidebar.
    pub logo_path: PathBuf,
    pub logo_width: f32,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub charts: ChartConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("employee_data.csv"),
            logo_path: PathBuf::from("itesm_logo.png"),
            logo_width: 150.0,
            window_size: [1200.0, 900.0],
            min_window_size: [800.0, 600.0],
            charts: ChartConfig::default(),
        }
    }
}

/// Binning, axis and colour settings shared by the chart views.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Width of a performance-score histogram bin.
    pub histogram_bin_width: f64,
    /// Age axis domain of the salary box plot.
    pub age_domain: (f64, f64),
    /// Scatter marker radius for the lowest and highest salary.
    pub scatter_radius: (f32, f32),
    pub histogram_color: Color32,
    pub bar_color: Color32,
    pub box_color: Color32,
    pub male_color: Color32,
    pub female_color: Color32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let green = to_color32(named::GREEN);
        Self {
            histogram_bin_width: 1.0,
            age_domain: (28.0, 70.0),
            scatter_radius: (2.0, 9.0),
            histogram_color: Color32::from_rgb(0x63, 0x6e, 0xfa),
            bar_color: to_color32(named::PURPLE),
            // 50% opacity
            box_color: Color32::from_rgba_unmultiplied(green.r(), green.g(), green.b(), 128),
            // rebeccapurple
            male_color: to_color32(Srgb::new(0x66, 0x33, 0x99)),
            female_color: to_color32(named::MEDIUMPURPLE),
        }
    }
}
