use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Column – the projected source columns
// ---------------------------------------------------------------------------

/// Source columns the dashboard projects every row onto.
/// Any other column present in the source is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Name,
    BirthDate,
    Age,
    Gender,
    MaritalStatus,
    HiringDate,
    Position,
    Salary,
    PerformanceScore,
    LastPerformanceDate,
    AverageWorkHours,
    SatisfactionLevel,
    Absences,
}

impl Column {
    /// All required columns, in the order the source file lists them.
    pub const ALL: [Column; 13] = [
        Column::Name,
        Column::BirthDate,
        Column::Age,
        Column::Gender,
        Column::MaritalStatus,
        Column::HiringDate,
        Column::Position,
        Column::Salary,
        Column::PerformanceScore,
        Column::LastPerformanceDate,
        Column::AverageWorkHours,
        Column::SatisfactionLevel,
        Column::Absences,
    ];

    /// Position of the column in [`Column::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Header name in the source file.
    pub fn name(self) -> &'static str {
        match self {
            Column::Name => "name_employee",
            Column::BirthDate => "birth_date",
            Column::Age => "age",
            Column::Gender => "gender",
            Column::MaritalStatus => "marital_status",
            Column::HiringDate => "hiring_date",
            Column::Position => "position",
            Column::Salary => "salary",
            Column::PerformanceScore => "performance_score",
            Column::LastPerformanceDate => "last_performance_date",
            Column::AverageWorkHours => "average_work_hours",
            Column::SatisfactionLevel => "satisfaction_level",
            Column::Absences => "absences",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Categorical values, normalised at load time
// ---------------------------------------------------------------------------

/// Employee gender. Source labels are trimmed and matched case-insensitively,
/// so `"M "` and `"m"` both become [`Gender::Male`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl Gender {
    /// Normalise a raw cell. Returns `None` for a blank cell.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.to_ascii_uppercase().as_str() {
            "M" | "MALE" => Gender::Male,
            "F" | "FEMALE" => Gender::Female,
            _ => Gender::Other(trimmed.to_string()),
        })
    }

    /// Short code used in legends and the selector.
    pub fn code(&self) -> &str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other(label) => label,
        }
    }

    /// Human readable description.
    pub fn describe(&self) -> &str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other(label) => label,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Separated,
    Widowed,
    Other(String),
}

impl MaritalStatus {
    /// Normalise a raw cell. Returns `None` for a blank cell.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.to_ascii_lowercase().as_str() {
            "single" => MaritalStatus::Single,
            "married" => MaritalStatus::Married,
            "divorced" => MaritalStatus::Divorced,
            "separated" => MaritalStatus::Separated,
            "widowed" => MaritalStatus::Widowed,
            _ => MaritalStatus::Other(trimmed.to_string()),
        })
    }

    pub fn label(&self) -> &str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
            MaritalStatus::Divorced => "Divorced",
            MaritalStatus::Separated => "Separated",
            MaritalStatus::Widowed => "Widowed",
            MaritalStatus::Other(label) => label,
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// EmployeeRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single employee, projected onto the dashboard columns.
/// Empty numeric and date cells are kept as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub age: Option<u32>,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub hiring_date: Option<NaiveDate>,
    pub position: String,
    pub salary: Option<f64>,
    pub performance_score: Option<f64>,
    pub last_performance_date: Option<NaiveDate>,
    pub average_work_hours: Option<f64>,
    pub satisfaction_level: Option<f64>,
    pub absences: Option<u32>,
}

// ---------------------------------------------------------------------------
// EmployeeDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded records plus the column indices the selector widgets need.
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct EmployeeDataset {
    /// All records, in source row order.
    pub records: Vec<EmployeeRecord>,
    /// Distinct genders in order of first appearance.
    pub genders: Vec<Gender>,
    /// Distinct marital statuses in order of first appearance.
    pub marital_statuses: Vec<MaritalStatus>,
    /// Observed `(min, max)` performance score, `None` when no row has one.
    pub performance_bounds: Option<(f64, f64)>,
}

impl EmployeeDataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<EmployeeRecord>) -> Self {
        let mut genders: Vec<Gender> = Vec::new();
        let mut marital_statuses: Vec<MaritalStatus> = Vec::new();
        let mut performance_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !genders.contains(&rec.gender) {
                genders.push(rec.gender.clone());
            }
            if !marital_statuses.contains(&rec.marital_status) {
                marital_statuses.push(rec.marital_status.clone());
            }
            if let Some(score) = rec.performance_score.filter(|s| !s.is_nan()) {
                performance_bounds = Some(match performance_bounds {
                    Some((lo, hi)) => (lo.min(score), hi.max(score)),
                    None => (score, score),
                });
            }
        }

        EmployeeDataset {
            records,
            genders,
            marital_statuses,
            performance_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::record;

    #[test]
    fn gender_labels_are_normalised() {
        assert_eq!(Gender::parse("M "), Some(Gender::Male));
        assert_eq!(Gender::parse(" m"), Some(Gender::Male));
        assert_eq!(Gender::parse("F"), Some(Gender::Female));
        assert_eq!(
            Gender::parse(" NB "),
            Some(Gender::Other("NB".to_string()))
        );
        assert_eq!(Gender::parse("   "), None);
    }

    #[test]
    fn marital_status_labels_are_normalised() {
        assert_eq!(MaritalStatus::parse("married"), Some(MaritalStatus::Married));
        assert_eq!(MaritalStatus::parse(" Widowed "), Some(MaritalStatus::Widowed));
        assert_eq!(MaritalStatus::Separated.to_string(), "Separated");
        assert_eq!(MaritalStatus::parse(""), None);
    }

    #[test]
    fn dataset_indexes_in_first_appearance_order() {
        let ds = EmployeeDataset::from_records(vec![
            record(Gender::Female, MaritalStatus::Married, Some(4.0)),
            record(Gender::Male, MaritalStatus::Single, Some(2.0)),
            record(Gender::Female, MaritalStatus::Single, None),
        ]);

        assert_eq!(ds.genders, vec![Gender::Female, Gender::Male]);
        assert_eq!(
            ds.marital_statuses,
            vec![MaritalStatus::Married, MaritalStatus::Single]
        );
        assert_eq!(ds.performance_bounds, Some((2.0, 4.0)));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = EmployeeDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.performance_bounds, None);
    }
}
