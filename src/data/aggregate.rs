use std::collections::BTreeMap;
use std::fmt;

use super::model::EmployeeRecord;

// ---------------------------------------------------------------------------
// Field selectors
// ---------------------------------------------------------------------------

/// Categorical field records can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Gender,
    MaritalStatus,
    Position,
    Age,
}

/// Group key. Ages sort numerically, labels alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Number(u32),
    Label(String),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Number(n) => write!(f, "{n}"),
            GroupKey::Label(s) => f.write_str(s),
        }
    }
}

impl GroupField {
    /// Group key of `rec`, `None` when the field is missing.
    pub fn key(self, rec: &EmployeeRecord) -> Option<GroupKey> {
        match self {
            GroupField::Gender => Some(GroupKey::Label(rec.gender.code().to_string())),
            GroupField::MaritalStatus => {
                Some(GroupKey::Label(rec.marital_status.label().to_string()))
            }
            GroupField::Position => Some(GroupKey::Label(rec.position.clone())),
            GroupField::Age => rec.age.map(GroupKey::Number),
        }
    }
}

/// Numeric field an aggregate is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueField {
    Age,
    Salary,
    PerformanceScore,
    AverageWorkHours,
    SatisfactionLevel,
    Absences,
}

impl ValueField {
    /// Value of the field in `rec`; missing and non-finite values are `None`.
    pub fn value(self, rec: &EmployeeRecord) -> Option<f64> {
        let v = match self {
            ValueField::Age => rec.age.map(f64::from),
            ValueField::Salary => rec.salary,
            ValueField::PerformanceScore => rec.performance_score,
            ValueField::AverageWorkHours => rec.average_work_hours,
            ValueField::SatisfactionLevel => rec.satisfaction_level,
            ValueField::Absences => rec.absences.map(f64::from),
        };
        v.filter(|x| x.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Grouped aggregates
// ---------------------------------------------------------------------------

fn collect_groups<'a, I>(
    records: I,
    group: GroupField,
    value: ValueField,
) -> BTreeMap<GroupKey, Vec<f64>>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
    for rec in records {
        let (Some(key), Some(v)) = (group.key(rec), value.value(rec)) else {
            continue;
        };
        groups.entry(key).or_default().push(v);
    }
    groups
}

/// Arithmetic mean of `value` per `group`.
///
/// Only records with a present value contribute, so a group whose records
/// all lack the value does not appear in the result.
pub fn mean_by_group<'a, I>(records: I, group: GroupField, value: ValueField) -> BTreeMap<GroupKey, f64>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    collect_groups(records, group, value)
        .into_iter()
        .map(|(key, values)| {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            (key, mean)
        })
        .collect()
}

/// Five-number summary of a group, whiskers at the extremes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

impl Distribution {
    /// Summarise `values`; `None` when empty.
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        Some(Distribution {
            min: values[0],
            q1: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q3: quantile(&values, 0.75),
            max: values[values.len() - 1],
            count: values.len(),
        })
    }
}

/// Linear-interpolated quantile of sorted, non-empty `sorted`.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Per-group [`Distribution`] of `value`; empty groups are omitted.
pub fn distribution_by_group<'a, I>(
    records: I,
    group: GroupField,
    value: ValueField,
) -> BTreeMap<GroupKey, Distribution>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    collect_groups(records, group, value)
        .into_iter()
        .filter_map(|(key, values)| Distribution::from_values(values).map(|d| (key, d)))
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One histogram bin covering `[start, start + width)`; the last bin also
/// includes its upper edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub width: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        self.start + self.width / 2.0
    }
}

/// Upper bound on the number of bins [`histogram`] returns.
pub const MAX_BINS: usize = 1_000;

/// Contiguous bins of `bin_width` covering the observed values.
/// Bins are aligned to multiples of `bin_width` shifted by half a bin, so
/// integral scores sit in the middle of their bin. When the values span
/// more than [`MAX_BINS`] bins the width is widened to fit.
pub fn histogram<I>(values: I, bin_width: f64) -> Vec<HistogramBin>
where
    I: IntoIterator<Item = f64>,
{
    let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if values.is_empty() || !bin_width.is_finite() || bin_width <= 0.0 {
        return Vec::new();
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let width = effective_bin_width(min, max, bin_width);

    // Grid position of a value, in bins.
    let slot = |v: f64| (v / width + 0.5).floor();
    let first = slot(min);
    let bins = ((slot(max) - first) as usize)
        .saturating_add(1)
        .min(MAX_BINS);

    let mut counts = vec![0usize; bins];
    for v in values {
        let i = (slot(v) - first) as usize;
        counts[i.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: (first + i as f64 - 0.5) * width,
            width,
            count,
        })
        .collect()
}

/// `requested`, widened so `[min, max]` fits in [`MAX_BINS`] bins and the
/// grid position of either extreme stays finite.
fn effective_bin_width(min: f64, max: f64, requested: f64) -> f64 {
    let limit = (MAX_BINS - 1) as f64;
    // Divide before subtracting so the span cannot overflow.
    let span = max / limit - min / limit;
    let reach = min.abs().max(max.abs());
    requested.max(span).max(reach / f64::MAX.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Gender, MaritalStatus};
    use crate::data::test_support::{record, sample_dataset};

    fn hours(status: MaritalStatus, h: Option<f64>) -> EmployeeRecord {
        EmployeeRecord {
            average_work_hours: h,
            ..record(Gender::Male, status, Some(3.0))
        }
    }

    #[test]
    fn mean_of_ten_twenty_thirty_is_twenty() {
        let records = vec![
            hours(MaritalStatus::Single, Some(10.0)),
            hours(MaritalStatus::Single, Some(20.0)),
            hours(MaritalStatus::Single, Some(30.0)),
        ];
        let means = mean_by_group(&records, GroupField::MaritalStatus, ValueField::AverageWorkHours);
        assert_eq!(means.get(&GroupKey::Label("Single".into())), Some(&20.0));
    }

    #[test]
    fn group_without_values_is_absent() {
        let records = vec![
            hours(MaritalStatus::Single, Some(40.0)),
            hours(MaritalStatus::Widowed, None),
            hours(MaritalStatus::Widowed, Some(f64::NAN)),
        ];
        let means = mean_by_group(&records, GroupField::MaritalStatus, ValueField::AverageWorkHours);
        assert_eq!(means.len(), 1);
        assert!(!means.contains_key(&GroupKey::Label("Widowed".into())));
        assert!(means.values().all(|m| m.is_finite()));
    }

    #[test]
    fn mean_is_order_independent() {
        let ds = sample_dataset();
        let forward = mean_by_group(&ds.records, GroupField::Gender, ValueField::Salary);
        let reversed = mean_by_group(ds.records.iter().rev(), GroupField::Gender, ValueField::Salary);
        assert_eq!(forward, reversed);
        let female = forward[&GroupKey::Label("F".into())];
        assert!((female - (45_000.0 + 60_000.0 + 71_000.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn distribution_of_four_values() {
        let d = Distribution::from_values(vec![4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(d.min, 1.0);
        assert_eq!(d.q1, 1.75);
        assert_eq!(d.median, 2.5);
        assert_eq!(d.q3, 3.25);
        assert_eq!(d.max, 4.0);
        assert_eq!(d.count, 4);
        assert!(Distribution::from_values(Vec::new()).is_none());
    }

    #[test]
    fn salary_distribution_by_age_sorts_numerically() {
        let ds = sample_dataset();
        let dist = distribution_by_group(&ds.records, GroupField::Age, ValueField::Salary);
        let ages: Vec<GroupKey> = dist.keys().cloned().collect();
        assert_eq!(
            ages,
            vec![
                GroupKey::Number(29),
                GroupKey::Number(31),
                GroupKey::Number(45),
                GroupKey::Number(58)
            ]
        );
        let at_45 = dist[&GroupKey::Number(45)];
        assert_eq!((at_45.min, at_45.max), (52_000.0, 60_000.0));
    }

    #[test]
    fn histogram_centres_integer_scores() {
        let bins = histogram([1.0, 3.0, 3.0, 5.0], 1.0);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 2, 0, 1]);
        assert_eq!(bins[0].center(), 1.0);
        assert_eq!(bins[4].center(), 5.0);
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(histogram(Vec::<f64>::new(), 1.0).is_empty());
        assert!(histogram([1.0], 0.0).is_empty());
        assert!(histogram([1.0], f64::INFINITY).is_empty());
    }

    #[test]
    fn extreme_scores_widen_the_bins() {
        let bins = histogram([-1e300, 3.0, 1e300], 1.0);
        assert!(!bins.is_empty() && bins.len() <= MAX_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[bins.len() - 1].count, 1);
        assert!(bins.iter().all(|b| b.start.is_finite() && b.width.is_finite()));

        let bins = histogram([0.0, 1e9], 1.0);
        assert!(bins.len() <= MAX_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn tiny_bin_width_on_large_value_yields_one_bin() {
        let bins = histogram([1e300], 1e-300);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 1);
    }

    #[test]
    fn infinite_values_do_not_poison_the_mean() {
        let records = vec![
            hours(MaritalStatus::Single, Some(f64::INFINITY)),
            hours(MaritalStatus::Single, Some(f64::NEG_INFINITY)),
            hours(MaritalStatus::Single, Some(40.0)),
            hours(MaritalStatus::Married, Some(f64::INFINITY)),
        ];
        let means = mean_by_group(&records, GroupField::MaritalStatus, ValueField::AverageWorkHours);
        assert_eq!(means.get(&GroupKey::Label("Single".into())), Some(&40.0));
        assert!(!means.contains_key(&GroupKey::Label("Married".into())));
    }
}
