use aroya_catalog::search::parse_date_flexible;
use aroya_core::pii::MaskedEmail;
use aroya_core::reservation::Passenger;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One passenger as supplied by the caller, possibly incomplete
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassengerInput {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub email: Option<String>,
}

impl PassengerInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.dob.is_none()
            && self.email.is_none()
    }
}

/// The parsed passenger list plus the inferred count. Fatal parse problems
/// (bad JSON) land in `parse_errors`; per-field problems are found later
/// during validation
#[derive(Debug, Clone)]
pub struct PassengerIntake {
    pub entries: Vec<PassengerInput>,
    pub count: u32,
    pub parse_errors: Vec<String>,
}

/// Accept passengers as a structured list, a JSON-encoded list, or a single
/// flattened passenger, in that order of preference
pub fn parse_passengers(
    passenger_count: Option<u32>,
    passengers: Option<Vec<PassengerInput>>,
    passengers_json: Option<&str>,
    single: PassengerInput,
) -> PassengerIntake {
    let mut parse_errors = Vec::new();
    let mut entries: Vec<PassengerInput> = Vec::new();

    if let Some(list) = passengers.filter(|l| !l.is_empty()) {
        entries = list;
    } else if let Some(raw) = passengers_json {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Array(_)) => match serde_json::from_str(raw) {
                Ok(list) => entries = list,
                Err(e) => parse_errors.push(format!("Invalid passengers_json: {}", e)),
            },
            Ok(_) => parse_errors.push("passengers_json must be a JSON array.".to_string()),
            Err(e) => parse_errors.push(format!("Invalid passengers_json: {}", e)),
        }
    } else if !single.is_empty() {
        entries = vec![single];
    }

    let count = match passenger_count {
        Some(count) if count > 0 => count,
        _ => {
            if entries.is_empty() {
                1
            } else {
                entries.len() as u32
            }
        }
    };

    PassengerIntake {
        entries,
        count,
        parse_errors,
    }
}

/// A per-passenger, per-field validation problem
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub index: usize,
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn missing(index: usize, field: &str) -> Self {
        Self {
            index,
            field: field.to_string(),
            message: "Required field is missing.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub ok: bool,
    pub issues: Vec<ValidationIssue>,
    pub parse_errors: Vec<String>,
}

/// Validate the intake entries against the expected count. Returns the
/// passengers that validated cleanly alongside every issue found
pub fn validate_passengers(intake: &PassengerIntake) -> (Vec<Passenger>, Vec<ValidationIssue>) {
    let mut issues = Vec::new();
    let mut validated = Vec::new();

    let mut entries = intake.entries.clone();
    if entries.is_empty() && intake.count > 0 {
        entries = vec![PassengerInput::default(); intake.count as usize];
    }

    let span = (intake.count as usize).max(entries.len());
    for index in 0..span {
        let entry = entries.get(index).cloned().unwrap_or_default();

        let mut missing = Vec::new();
        if entry.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            missing.push(ValidationIssue::missing(index, "name"));
        }
        if entry.age.is_none() {
            missing.push(ValidationIssue::missing(index, "age"));
        }
        if entry.gender.as_deref().map_or(true, |g| g.trim().is_empty()) {
            missing.push(ValidationIssue::missing(index, "gender"));
        }
        if entry.dob.as_deref().map_or(true, |d| d.trim().is_empty()) {
            missing.push(ValidationIssue::missing(index, "dob"));
        }
        if entry.email.as_deref().map_or(true, |e| e.trim().is_empty()) {
            missing.push(ValidationIssue::missing(index, "email"));
        }
        if !missing.is_empty() {
            issues.extend(missing);
            continue;
        }

        // All required fields present past this point
        let (Some(name), Some(age), Some(gender), Some(dob_raw), Some(email)) =
            (entry.name, entry.age, entry.gender, entry.dob, entry.email)
        else {
            continue;
        };

        let Some(dob) = parse_date_flexible(&dob_raw) else {
            issues.push(ValidationIssue {
                index,
                field: "dob".to_string(),
                message: format!("Unrecognized date of birth: {}", dob_raw),
            });
            continue;
        };

        if let Some(computed) = Utc::now().date_naive().years_since(dob) {
            if age.abs_diff(computed) > 1 {
                issues.push(ValidationIssue {
                    index,
                    field: "age".to_string(),
                    message: format!(
                        "Age does not match DOB; expected approximately {}.",
                        computed
                    ),
                });
            }
        } else {
            issues.push(ValidationIssue {
                index,
                field: "dob".to_string(),
                message: "Date of birth is in the future.".to_string(),
            });
        }

        validated.push(Passenger {
            name,
            age,
            gender,
            dob,
            email: MaskedEmail::from(email),
        });
    }

    (validated, issues)
}
