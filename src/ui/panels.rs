use eframe::egui::{self, RichText, ScrollArea, Slider, Ui};

use crate::data::model::MaritalStatus;
use crate::state::AppState;
use crate::ui::charts;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Logo (centered) ----
    let logo_path = &state.config.logo_path;
    if logo_path.exists() {
        let uri = format!("file://{}", logo_path.display());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(egui::Image::new(uri).max_width(state.config.logo_width));
            ui.small("Company logo");
        });
        ui.add_space(4.0);
    }

    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("The dataset has no records.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            gender_selector(ui, state);
            ui.separator();
            performance_selector(ui, state);
            ui.separator();
            marital_status_selector(ui, state);
        });
}

fn gender_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("1) Select the employee's gender");
    ui.small("M - Male | F - Female");

    let mut selected = state.filters.gender.clone();
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for gender in &state.dataset.genders {
            ui.radio_value(&mut selected, Some(gender.clone()), gender.code());
        }
    });
    if let Some(gender) = selected {
        state.set_gender(gender);
    }

    if let Some(gender) = &state.filters.gender {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label("You selected the");
            ui.label(RichText::new(gender.describe()).strong());
            ui.label("gender");
        });
    }
}

fn performance_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("2) Select the performance range");

    let (lo, hi) = state.performance_domain();
    let mut lower = state.filters.performance.lower;
    let mut upper = state.filters.performance.upper;

    let lower_changed = ui
        .add(Slider::new(&mut lower, lo..=hi).text("from"))
        .changed();
    let upper_changed = ui
        .add(Slider::new(&mut upper, lo..=hi).text("to"))
        .changed();

    // Dragging one end past the other pushes the other end along.
    if lower_changed {
        upper = upper.max(lower);
    } else if upper_changed {
        lower = lower.min(upper);
    }
    state.set_performance_range(lower, upper);

    let range = state.filters.performance;
    ui.label(format!(
        "You selected the range between {} and {}",
        range.lower, range.upper
    ));
}

fn marital_status_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("3) Select the marital status");

    let mut selected = state.filters.marital_status.clone();
    let current = selected
        .as_ref()
        .map(|m| m.label().to_string())
        .unwrap_or_default();

    egui::ComboBox::from_id_salt("marital_status")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for status in &state.dataset.marital_statuses {
                ui.selectable_value(&mut selected, Some(status.clone()), status.label());
            }
        });
    if let Some(status) = selected {
        state.set_marital_status(status);
    }

    if let Some(status) = &state.filters.marital_status {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label("You selected");
            ui.label(RichText::new(marital_word(status)).strong());
        });
    }
}

fn marital_word(status: &MaritalStatus) -> String {
    status.label().to_lowercase()
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} employees loaded from {}",
            state.dataset.len(),
            state.source.display()
        ));

        ui.separator();

        ui.label(format!(
            "{} in the gender view, {} in the marital status view",
            state.views.gender_histogram.series.rows,
            state.views.marital_histogram.series.rows
        ));
    });
}

// ---------------------------------------------------------------------------
// Central panel – charts and conclusions
// ---------------------------------------------------------------------------

/// Render the header, the five charts and the conclusions.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let views = &state.views;
    let charts_cfg = &state.config.charts;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Employee Performance – Socialize Your Knowledge");
            ui.horizontal_wrapped(|ui: &mut Ui| {
                ui.label(RichText::new("Welcome").strong());
                ui.label("to the");
                ui.label(RichText::new("Socialize Your Knowledge").strong().italics());
                ui.label("dashboard");
            });
            ui.add_space(8.0);

            subheader(ui, "Number of employees by performance score");
            ui.columns(2, |cols: &mut [Ui]| {
                charts::histogram(
                    &mut cols[0],
                    "gender_histogram",
                    &views.gender_histogram,
                    charts_cfg.histogram_color,
                );
                charts::histogram(
                    &mut cols[1],
                    "marital_histogram",
                    &views.marital_histogram,
                    charts_cfg.histogram_color,
                );
            });

            subheader(ui, &views.hours_by_status.labels.title);
            charts::grouped_bar(
                ui,
                "hours_by_status",
                &views.hours_by_status,
                charts_cfg.bar_color,
            );

            subheader(ui, &views.salary_by_age.labels.title);
            charts::box_plot(ui, "salary_by_age", &views.salary_by_age, charts_cfg.box_color);

            subheader(ui, &views.hours_vs_performance.labels.title);
            charts::scatter(
                ui,
                "hours_vs_performance",
                &views.hours_vs_performance,
                &state.color_map,
                charts_cfg.scatter_radius,
            );

            conclusions(ui);
        });
}

fn subheader(ui: &mut Ui, text: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(text).size(18.0).strong());
}

/// Observations drawn from the reference dataset; they do not react to
/// the filters.
const CONCLUSIONS: [(&str, &str, &str); 4] = [
    (
        "Regardless of gender or marital status, most employees have a performance score of",
        "3",
        "",
    ),
    (
        "There is no significant difference in hours worked between",
        "marital status",
        "groups",
    ),
    (
        "Salaries span a wide range in every age group; employees aged 67",
        "have the highest salaries of all age groups",
        "",
    ),
    (
        "There is",
        "no relationship",
        "between hours worked and the performance evaluation",
    ),
];

fn conclusions(ui: &mut Ui) {
    subheader(ui, "Conclusions");
    ui.label("Based on the information shown, we can conclude the following:");

    for (i, (before, emphasis, after)) in CONCLUSIONS.iter().enumerate() {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label(format!("{}) {before}", i + 1));
            ui.label(RichText::new(*emphasis).strong());
            if !after.is_empty() {
                ui.label(*after);
            }
        });
    }
}
