use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, MarkerShape, Plot, Points,
};

use crate::chart::{BarSeries, BoxSeries, Chart, ChartKind, HistogramSeries, ScatterSeries};
use crate::color::ColorMap;

const CHART_HEIGHT: f32 = 280.0;

/// Marker per scatter group, cycled when there are more groups.
const MARKERS: [MarkerShape; 5] = [
    MarkerShape::Circle,
    MarkerShape::Diamond,
    MarkerShape::Square,
    MarkerShape::Up,
    MarkerShape::Cross,
];

fn base_plot<S>(id: &str, chart: &Chart<S>) -> Plot<'static> {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(chart.labels.x_label.as_str())
        .y_axis_label(chart.labels.y_label.as_str())
        .allow_scroll(false)
        .allow_drag(false)
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

pub fn histogram(ui: &mut Ui, id: &str, chart: &Chart<HistogramSeries>, color: Color32) {
    debug_assert_eq!(chart.kind, ChartKind::Histogram);
    ui.label(RichText::new(&chart.labels.title).strong());

    let bars: Vec<Bar> = chart
        .series
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width * 0.95)
                .name(format!("{:.1} – {:.1}", bin.start, bin.start + bin.width))
        })
        .collect();
    let bar_chart = BarChart::new(bars).color(color);

    base_plot(id, chart)
        .include_y(0.0)
        .show(ui, |plot_ui| plot_ui.bar_chart(bar_chart));
}

// ---------------------------------------------------------------------------
// Grouped bar (one bar per category)
// ---------------------------------------------------------------------------

pub fn grouped_bar(ui: &mut Ui, id: &str, chart: &Chart<BarSeries>, color: Color32) {
    debug_assert_eq!(chart.kind, ChartKind::GroupedBar);
    let labels: Vec<String> = chart.series.bars.iter().map(|(l, _)| l.clone()).collect();

    let bars: Vec<Bar> = chart
        .series
        .bars
        .iter()
        .enumerate()
        .map(|(i, (label, mean))| Bar::new(i as f64, *mean).width(0.6).name(label))
        .collect();
    let bar_chart = BarChart::new(bars).color(color).name(&chart.labels.y_label);

    base_plot(id, chart)
        .include_y(0.0)
        .x_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| plot_ui.bar_chart(bar_chart));
}

// ---------------------------------------------------------------------------
// Box plot (whiskers at min / max)
// ---------------------------------------------------------------------------

pub fn box_plot(ui: &mut Ui, id: &str, chart: &Chart<BoxSeries>, fill: Color32) {
    debug_assert_eq!(chart.kind, ChartKind::BoxPlot);
    let outline = Color32::from_rgb(fill.r(), fill.g(), fill.b());

    let boxes: Vec<BoxElem> = chart
        .series
        .boxes
        .iter()
        .map(|(age, d)| {
            BoxElem::new(*age, BoxSpread::new(d.min, d.q1, d.median, d.q3, d.max))
                .box_width(0.7)
                .whisker_width(0.4)
                .fill(fill)
                .stroke(Stroke::new(1.0, outline))
                .name(format!("Age {age} ({} employees)", d.count))
        })
        .collect();

    let (lo, hi) = chart.series.domain;
    base_plot(id, chart)
        .include_x(lo)
        .include_x(hi)
        .show(ui, |plot_ui| plot_ui.box_plot(BoxPlot::new(boxes).name("Salary")));
}

// ---------------------------------------------------------------------------
// Scatter (colour + marker by gender, size by salary)
// ---------------------------------------------------------------------------

pub fn scatter(
    ui: &mut Ui,
    id: &str,
    chart: &Chart<ScatterSeries>,
    colors: &ColorMap,
    radius: (f32, f32),
) {
    debug_assert_eq!(chart.kind, ChartKind::Scatter);
    let (r_min, r_max) = radius;

    base_plot(id, chart)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for (i, group) in chart.series.groups.iter().enumerate() {
                let color = colors.color_for(&group.gender);
                let shape = MARKERS[i % MARKERS.len()];
                let name = group.gender.code();

                // One item per point so marker size can follow salary;
                // items sharing a name collapse into one legend entry.
                for p in &group.points {
                    let r = r_min + (r_max - r_min) * p.size as f32;
                    plot_ui.points(
                        Points::new(vec![[p.x, p.y]])
                            .radius(r)
                            .shape(shape)
                            .color(color)
                            .filled(true)
                            .name(name),
                    );
                }
            }
        });
}
