//! Record fixtures shared by the unit tests.

use super::model::{EmployeeDataset, EmployeeRecord, Gender, MaritalStatus};

/// A record with the given categorical values and score; every other
/// optional field is empty. Override fields with struct update syntax.
pub(crate) fn record(
    gender: Gender,
    marital_status: MaritalStatus,
    performance_score: Option<f64>,
) -> EmployeeRecord {
    EmployeeRecord {
        name: String::from("Employee"),
        birth_date: None,
        age: None,
        gender,
        marital_status,
        hiring_date: None,
        position: String::from("Analyst"),
        salary: None,
        performance_score,
        last_performance_date: None,
        average_work_hours: None,
        satisfaction_level: None,
        absences: None,
    }
}

/// Six employees covering both genders, three marital statuses and scores 1–5.
pub(crate) fn sample_dataset() -> EmployeeDataset {
    let rows = [
        ("Ana", Gender::Female, MaritalStatus::Married, 3.0, 40.0, 31, 45_000.0),
        ("Luis", Gender::Male, MaritalStatus::Single, 1.0, 38.0, 29, 30_000.0),
        ("Rosa", Gender::Female, MaritalStatus::Single, 5.0, 42.0, 45, 60_000.0),
        ("Juan", Gender::Male, MaritalStatus::Married, 3.0, 44.0, 45, 52_000.0),
        ("Eva", Gender::Female, MaritalStatus::Divorced, 4.0, 36.0, 58, 71_000.0),
        ("Raul", Gender::Male, MaritalStatus::Married, 2.0, 42.0, 31, 39_000.0),
    ];

    let records = rows
        .into_iter()
        .map(|(name, gender, status, score, hours, age, salary)| EmployeeRecord {
            name: name.to_string(),
            age: Some(age),
            salary: Some(salary),
            average_work_hours: Some(hours),
            ..record(gender, status, Some(score))
        })
        .collect();

    EmployeeDataset::from_records(records)
}
