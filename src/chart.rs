use crate::config::ChartConfig;
use crate::data::aggregate::{
    distribution_by_group, histogram, mean_by_group, Distribution, GroupField, GroupKey,
    HistogramBin, ValueField,
};
use crate::data::filter::{
    by_gender, by_marital_status, by_performance_range, identity, FilterState,
};
use crate::data::model::{EmployeeDataset, EmployeeRecord, Gender};

// ---------------------------------------------------------------------------
// Chart metadata handed to the renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Histogram,
    GroupedBar,
    BoxPlot,
    Scatter,
}

/// Title and axis titles of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl ChartLabels {
    fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
        }
    }
}

/// A derived series together with how it should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart<S> {
    pub kind: ChartKind,
    pub labels: ChartLabels,
    pub series: S,
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    pub bins: Vec<HistogramBin>,
    /// Rows in the filtered view the histogram was built from.
    pub rows: usize,
}

/// One bar per group, in group order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub bars: Vec<(String, f64)>,
}

/// One box per age.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSeries {
    pub boxes: Vec<(f64, Distribution)>,
    /// Axis domain requested for the arguments.
    pub domain: (f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Salary scaled into `0.0..=1.0`; `0.0` when salary is missing.
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub gender: Gender,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub groups: Vec<ScatterGroup>,
}

// ---------------------------------------------------------------------------
// DashboardViews – everything the central panel draws
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViews {
    pub gender_histogram: Chart<HistogramSeries>,
    pub marital_histogram: Chart<HistogramSeries>,
    pub hours_by_status: Chart<BarSeries>,
    pub salary_by_age: Chart<BoxSeries>,
    pub hours_vs_performance: Chart<ScatterSeries>,
}

/// Derive every chart from scratch for the given selections.
///
/// The two histograms use the gender / marital-status subsets restricted to
/// the performance range; the other charts use the whole dataset.
pub fn recompute(
    dataset: &EmployeeDataset,
    filters: &FilterState,
    charts: &ChartConfig,
) -> DashboardViews {
    let in_range = by_performance_range(&dataset.records, &filters.performance);

    let gender_view = match &filters.gender {
        Some(g) => by_gender(in_range.iter().copied(), g),
        None => Vec::new(),
    };
    let marital_view = match &filters.marital_status {
        Some(m) => by_marital_status(in_range.iter().copied(), m),
        None => Vec::new(),
    };
    let everything = identity(&dataset.records);

    DashboardViews {
        gender_histogram: Chart {
            kind: ChartKind::Histogram,
            labels: ChartLabels::new("By gender", "Performance", "Number of employees"),
            series: performance_histogram(&gender_view, charts.histogram_bin_width),
        },
        marital_histogram: Chart {
            kind: ChartKind::Histogram,
            labels: ChartLabels::new(
                "By marital status",
                "Performance",
                "Number of employees",
            ),
            series: performance_histogram(&marital_view, charts.histogram_bin_width),
        },
        hours_by_status: Chart {
            kind: ChartKind::GroupedBar,
            labels: ChartLabels::new(
                "Average hours worked by marital status",
                "Marital status",
                "Average hours worked",
            ),
            series: hours_by_status(&everything),
        },
        salary_by_age: Chart {
            kind: ChartKind::BoxPlot,
            labels: ChartLabels::new("Salary range for each age group", "Age", "Salary"),
            series: salary_by_age(&everything, charts.age_domain),
        },
        hours_vs_performance: Chart {
            kind: ChartKind::Scatter,
            labels: ChartLabels::new(
                "Average hours worked vs performance score",
                "Performance",
                "Average hours worked",
            ),
            series: hours_vs_performance(&everything, &dataset.genders),
        },
    }
}

fn performance_histogram(view: &[&EmployeeRecord], bin_width: f64) -> HistogramSeries {
    let scores = view
        .iter()
        .filter_map(|rec| ValueField::PerformanceScore.value(rec));
    HistogramSeries {
        bins: histogram(scores, bin_width),
        rows: view.len(),
    }
}

fn hours_by_status(view: &[&EmployeeRecord]) -> BarSeries {
    let means = mean_by_group(
        view.iter().copied(),
        GroupField::MaritalStatus,
        ValueField::AverageWorkHours,
    );
    BarSeries {
        bars: means
            .into_iter()
            .map(|(key, mean)| (key.to_string(), mean))
            .collect(),
    }
}

fn salary_by_age(view: &[&EmployeeRecord], domain: (f64, f64)) -> BoxSeries {
    let boxes = distribution_by_group(view.iter().copied(), GroupField::Age, ValueField::Salary)
        .into_iter()
        .filter_map(|(key, dist)| match key {
            GroupKey::Number(age) => Some((f64::from(age), dist)),
            GroupKey::Label(_) => None,
        })
        .collect();
    BoxSeries { boxes, domain }
}

fn hours_vs_performance(view: &[&EmployeeRecord], genders: &[Gender]) -> ScatterSeries {
    let salaries = view.iter().filter_map(|rec| ValueField::Salary.value(rec));
    let (lo, hi) = salaries.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
        (lo.min(s), hi.max(s))
    });
    let span = hi - lo;

    let scale = |salary: Option<f64>| match salary {
        Some(s) if span > f64::EPSILON => (s - lo) / span,
        Some(_) => 1.0,
        None => 0.0,
    };

    let groups = genders
        .iter()
        .map(|gender| {
            let points = view
                .iter()
                .filter(|rec| rec.gender == *gender)
                .filter_map(|rec| {
                    let x = ValueField::PerformanceScore.value(rec)?;
                    let y = ValueField::AverageWorkHours.value(rec)?;
                    Some(ScatterPoint {
                        x,
                        y,
                        size: scale(ValueField::Salary.value(rec)),
                    })
                })
                .collect();
            ScatterGroup {
                gender: gender.clone(),
                points,
            }
        })
        .collect();

    ScatterSeries { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{init_filter_state, PerformanceRange};
    use crate::data::model::MaritalStatus;
    use crate::data::test_support::sample_dataset;

    fn views_for(filters: &FilterState) -> DashboardViews {
        recompute(&sample_dataset(), filters, &ChartConfig::default())
    }

    #[test]
    fn initial_views_cover_first_selections() {
        let ds = sample_dataset();
        let views = recompute(&ds, &init_filter_state(&ds), &ChartConfig::default());

        assert_eq!(views.gender_histogram.kind, ChartKind::Histogram);
        assert_eq!(views.gender_histogram.series.rows, 3);
        assert_eq!(views.marital_histogram.series.rows, 3);
        assert_eq!(views.hours_by_status.kind, ChartKind::GroupedBar);
        assert_eq!(views.salary_by_age.kind, ChartKind::BoxPlot);
        assert_eq!(views.hours_vs_performance.kind, ChartKind::Scatter);
    }

    #[test]
    fn histogram_follows_gender_and_range() {
        let ds = sample_dataset();
        let mut filters = init_filter_state(&ds);
        filters.gender = Some(Gender::Male);
        filters.performance = PerformanceRange::new(3.0, 5.0);

        let views = views_for(&filters);
        let series = &views.gender_histogram.series;
        assert_eq!(series.rows, 1);
        assert_eq!(series.bins.iter().map(|b| b.count).sum::<usize>(), 1);
        assert_eq!(series.bins[0].center(), 3.0);
    }

    #[test]
    fn unfiltered_charts_ignore_selections() {
        let ds = sample_dataset();
        let mut filters = init_filter_state(&ds);
        let before = views_for(&filters);

        filters.marital_status = Some(MaritalStatus::Divorced);
        filters.performance = PerformanceRange::new(5.0, 5.0);
        let after = views_for(&filters);

        assert_ne!(before.marital_histogram, after.marital_histogram);
        assert_eq!(after.marital_histogram.series.rows, 0);
        assert!(after.marital_histogram.series.bins.is_empty());
        assert_eq!(before.hours_by_status, after.hours_by_status);
        assert_eq!(before.salary_by_age, after.salary_by_age);
        assert_eq!(before.hours_vs_performance, after.hours_vs_performance);
    }

    #[test]
    fn bar_means_per_marital_status() {
        let views = views_for(&init_filter_state(&sample_dataset()));
        let bars = &views.hours_by_status.series.bars;
        assert_eq!(
            bars,
            &vec![
                ("Divorced".to_string(), 36.0),
                ("Married".to_string(), (40.0 + 44.0 + 42.0) / 3.0),
                ("Single".to_string(), 40.0),
            ]
        );
    }

    #[test]
    fn box_plot_uses_configured_domain() {
        let views = views_for(&init_filter_state(&sample_dataset()));
        let series = &views.salary_by_age.series;
        assert_eq!(series.domain, (28.0, 70.0));
        let ages: Vec<f64> = series.boxes.iter().map(|(age, _)| *age).collect();
        assert_eq!(ages, vec![29.0, 31.0, 45.0, 58.0]);
    }

    #[test]
    fn scatter_groups_by_gender_and_scales_salary() {
        let views = views_for(&init_filter_state(&sample_dataset()));
        let groups = &views.hours_vs_performance.series.groups;
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].gender, Gender::Female);
        assert_eq!(groups.iter().map(|g| g.points.len()).sum::<usize>(), 6);

        let sizes: Vec<f64> = groups
            .iter()
            .flat_map(|g| g.points.iter().map(|p| p.size))
            .collect();
        assert!(sizes.iter().all(|s| (0.0..=1.0).contains(s)));
        assert!(sizes.contains(&0.0));
        assert!(sizes.contains(&1.0));
    }

    #[test]
    fn recompute_leaves_dataset_untouched() {
        let ds = sample_dataset();
        let before = ds.records.clone();
        let _ = recompute(&ds, &init_filter_state(&ds), &ChartConfig::default());
        assert_eq!(ds.records, before);
    }
}
