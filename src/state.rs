use std::path::PathBuf;

use crate::chart::{recompute, DashboardViews};
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{init_filter_state, performance_domain, FilterState, PerformanceRange};
use crate::data::model::{EmployeeDataset, Gender, MaritalStatus};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset loaded at startup; never mutated.
    pub dataset: EmployeeDataset,

    /// File the dataset was read from.
    pub source: PathBuf,

    /// Current sidebar selections.
    pub filters: FilterState,

    /// Charts derived from `dataset` and `filters` (cached).
    pub views: DashboardViews,

    /// Gender colours for the scatter chart.
    pub color_map: ColorMap,

    pub config: DashboardConfig,
}

impl AppState {
    /// Build the session state around a freshly loaded dataset.
    pub fn new(dataset: EmployeeDataset, source: PathBuf, config: DashboardConfig) -> Self {
        let filters = init_filter_state(&dataset);
        let views = recompute(&dataset, &filters, &config.charts);
        let color_map = ColorMap::new(&dataset.genders, &config.charts);

        Self {
            dataset,
            source,
            filters,
            views,
            color_map,
            config,
        }
    }

    /// Slider domain of the performance range widget.
    pub fn performance_domain(&self) -> (f64, f64) {
        performance_domain(&self.dataset)
    }

    /// Recompute `views` after a filter change.
    pub fn refresh(&mut self) {
        self.views = recompute(&self.dataset, &self.filters, &self.config.charts);
        log::debug!(
            "recomputed views: {:?}, {} gender rows, {} marital rows",
            self.filters,
            self.views.gender_histogram.series.rows,
            self.views.marital_histogram.series.rows
        );
    }

    pub fn set_gender(&mut self, gender: Gender) {
        if self.filters.gender.as_ref() != Some(&gender) {
            self.filters.gender = Some(gender);
            self.refresh();
        }
    }

    pub fn set_marital_status(&mut self, status: MaritalStatus) {
        if self.filters.marital_status.as_ref() != Some(&status) {
            self.filters.marital_status = Some(status);
            self.refresh();
        }
    }

    /// Set the performance range, clamped into the slider domain.
    pub fn set_performance_range(&mut self, lower: f64, upper: f64) {
        let range = PerformanceRange::new(lower, upper).clamp_to(self.performance_domain());
        if range != self.filters.performance {
            self.filters.performance = range;
            self.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::sample_dataset;

    fn state() -> AppState {
        AppState::new(
            sample_dataset(),
            PathBuf::from("employee_data.csv"),
            DashboardConfig::default(),
        )
    }

    #[test]
    fn new_state_starts_with_first_selections() {
        let state = state();
        assert_eq!(state.filters.gender, Some(Gender::Female));
        assert_eq!(state.filters.performance, PerformanceRange::new(0.0, 5.0));
        assert_eq!(state.views.gender_histogram.series.rows, 3);
    }

    #[test]
    fn changing_gender_recomputes_views() {
        let mut state = state();
        state.set_performance_range(2.0, 5.0);
        state.set_gender(Gender::Male);
        // Juan (3) and Raul (2); Luis (1) is out of range.
        assert_eq!(state.views.gender_histogram.series.rows, 2);
    }

    #[test]
    fn changing_marital_status_recomputes_views() {
        let mut state = state();
        state.set_marital_status(MaritalStatus::Single);
        assert_eq!(state.filters.marital_status, Some(MaritalStatus::Single));
        assert_eq!(state.views.marital_histogram.series.rows, 2);
    }

    #[test]
    fn performance_range_is_clamped_and_ordered() {
        let mut state = state();
        state.set_performance_range(9.0, -1.0);
        assert_eq!(state.filters.performance, PerformanceRange::new(0.0, 5.0));

        state.set_performance_range(4.0, 4.0);
        assert_eq!(state.views.gender_histogram.series.rows, 1);
    }

    #[test]
    fn refresh_never_touches_the_dataset() {
        let mut state = state();
        let before = state.dataset.records.clone();
        state.set_gender(Gender::Male);
        state.set_marital_status(MaritalStatus::Divorced);
        state.set_performance_range(1.0, 1.0);
        assert_eq!(state.dataset.records, before);
    }
}
