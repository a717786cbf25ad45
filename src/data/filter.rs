use super::model::{EmployeeDataset, EmployeeRecord, Gender, MaritalStatus};

// ---------------------------------------------------------------------------
// Performance range: inclusive bounds on the performance score
// ---------------------------------------------------------------------------

/// Inclusive `[lower, upper]` bounds on `performance_score`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceRange {
    pub lower: f64,
    pub upper: f64,
}

impl PerformanceRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(lower: f64, upper: f64) -> Self {
        if lower <= upper {
            Self { lower, upper }
        } else {
            Self {
                lower: upper,
                upper: lower,
            }
        }
    }

    pub fn contains(&self, score: f64) -> bool {
        score >= self.lower && score <= self.upper
    }

    /// Clamp both bounds into `domain` and keep `lower <= upper`.
    pub fn clamp_to(self, domain: (f64, f64)) -> Self {
        let (lo, hi) = domain;
        Self::new(self.lower.clamp(lo, hi), self.upper.clamp(lo, hi))
    }
}

/// Slider domain for the performance range: the observed bounds, widened
/// down to `0.0` so the initial `[0.0, max]` selection is representable.
pub fn performance_domain(dataset: &EmployeeDataset) -> (f64, f64) {
    match dataset.performance_bounds {
        Some((lo, hi)) => (lo.min(0.0), hi.max(0.0)),
        None => (0.0, 0.0),
    }
}

// ---------------------------------------------------------------------------
// Filter selections coming from the sidebar widgets
// ---------------------------------------------------------------------------

/// Current values of the three sidebar widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Selected gender; `None` only for an empty dataset.
    pub gender: Option<Gender>,
    /// Selected marital status; `None` only for an empty dataset.
    pub marital_status: Option<MaritalStatus>,
    pub performance: PerformanceRange,
}

/// Initial selections: first observed gender and marital status, and the
/// range `[0.0, observed max]`.
pub fn init_filter_state(dataset: &EmployeeDataset) -> FilterState {
    let upper = dataset.performance_bounds.map_or(0.0, |(_, hi)| hi);
    FilterState {
        gender: dataset.genders.first().cloned(),
        marital_status: dataset.marital_statuses.first().cloned(),
        performance: PerformanceRange::new(0.0, upper).clamp_to(performance_domain(dataset)),
    }
}

// ---------------------------------------------------------------------------
// Row filters – each returns a borrowed subsequence in input order
// ---------------------------------------------------------------------------

/// Records whose gender equals `gender`.
pub fn by_gender<'a, I>(records: I, gender: &Gender) -> Vec<&'a EmployeeRecord>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    records
        .into_iter()
        .filter(|rec| rec.gender == *gender)
        .collect()
}

/// Records whose marital status equals `status`.
pub fn by_marital_status<'a, I>(records: I, status: &MaritalStatus) -> Vec<&'a EmployeeRecord>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    records
        .into_iter()
        .filter(|rec| rec.marital_status == *status)
        .collect()
}

/// Records with a performance score inside `range` (inclusive).
/// A record without a score never matches.
pub fn by_performance_range<'a, I>(records: I, range: &PerformanceRange) -> Vec<&'a EmployeeRecord>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    records
        .into_iter()
        .filter(|rec| rec.performance_score.is_some_and(|s| range.contains(s)))
        .collect()
}

/// Every record, unfiltered, in input order.
pub fn identity<'a, I>(records: I) -> Vec<&'a EmployeeRecord>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    records.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{record, sample_dataset};

    #[test]
    fn by_gender_counts_and_leaves_input_untouched() {
        let records = vec![
            record(Gender::Male, MaritalStatus::Single, Some(3.0)),
            record(Gender::Female, MaritalStatus::Single, Some(3.0)),
            record(Gender::Male, MaritalStatus::Married, Some(4.0)),
        ];
        let before = records.clone();

        let male = by_gender(&records, &Gender::Male);
        let female = by_gender(&records, &Gender::Female);

        assert_eq!(male.len(), 2);
        assert_eq!(female.len(), 1);
        assert!(male.iter().all(|r| r.gender == Gender::Male));
        assert_eq!(records, before);
    }

    #[test]
    fn by_gender_without_match_is_empty() {
        let ds = sample_dataset();
        let other = Gender::Other("X".to_string());
        assert!(by_gender(&ds.records, &other).is_empty());
    }

    #[test]
    fn by_marital_status_preserves_relative_order() {
        let ds = sample_dataset();
        let married = by_marital_status(&ds.records, &MaritalStatus::Married);

        let names: Vec<&str> = married.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Juan", "Raul"]);
        assert!(married.len() <= ds.len());
    }

    #[test]
    fn full_range_returns_everything() {
        let ds = sample_dataset();
        let (_, max) = ds.performance_bounds.unwrap();
        let all = by_performance_range(&ds.records, &PerformanceRange::new(0.0, max));
        assert_eq!(all.len(), ds.len());
    }

    #[test]
    fn degenerate_range_returns_exact_matches() {
        let ds = sample_dataset();
        let (min, _) = ds.performance_bounds.unwrap();
        let lowest = by_performance_range(&ds.records, &PerformanceRange::new(min, min));
        assert_eq!(lowest.len(), 1);
        assert_eq!(lowest[0].performance_score, Some(min));
    }

    #[test]
    fn range_skips_records_without_score() {
        let records = vec![
            record(Gender::Male, MaritalStatus::Single, None),
            record(Gender::Male, MaritalStatus::Single, Some(2.0)),
        ];
        let hits = by_performance_range(&records, &PerformanceRange::new(0.0, 10.0));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn identity_keeps_content_and_order() {
        let ds = sample_dataset();
        let view = identity(&ds.records);
        assert_eq!(view.len(), ds.len());
        for (a, b) in view.iter().zip(&ds.records) {
            assert_eq!(*a, b);
        }
    }

    #[test]
    fn filters_compose() {
        let ds = sample_dataset();
        let in_range = by_performance_range(&ds.records, &PerformanceRange::new(3.0, 5.0));
        let female = by_gender(in_range, &Gender::Female);
        let names: Vec<&str> = female.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Rosa", "Eva"]);
    }

    #[test]
    fn range_is_ordered_and_clamped() {
        let r = PerformanceRange::new(4.0, 1.0);
        assert_eq!((r.lower, r.upper), (1.0, 4.0));

        let clamped = PerformanceRange::new(-2.0, 9.0).clamp_to((0.0, 5.0));
        assert_eq!((clamped.lower, clamped.upper), (0.0, 5.0));
    }

    #[test]
    fn initial_state_selects_first_values_and_full_range() {
        let ds = sample_dataset();
        let state = init_filter_state(&ds);
        assert_eq!(state.gender, Some(Gender::Female));
        assert_eq!(state.marital_status, Some(MaritalStatus::Married));
        assert_eq!(state.performance, PerformanceRange::new(0.0, 5.0));
        assert_eq!(performance_domain(&ds), (0.0, 5.0));
    }
}
