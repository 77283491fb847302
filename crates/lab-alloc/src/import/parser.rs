use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::ImportError;
use crate::allocation::{ApplicantKey, Application, Choice, Rank, RawCapacities, ResourceKey};

/// Group one-row-per-choice preference records into applications.
///
/// Applicants keep the order of their first row; choices keep file order.
pub(crate) fn parse_preferences<R: Read>(reader: R) -> Result<Vec<Application>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut applications: Vec<Application> = Vec::new();
    let mut positions: HashMap<ApplicantKey, usize> = HashMap::new();

    for record in csv_reader.deserialize::<PreferenceRow>() {
        let row = record?;
        let applicant = ApplicantKey::new(strip_marks(&row.applicant));
        let choice = Choice {
            rank: row.rank,
            resource: ResourceKey::new(strip_marks(&row.resource)),
            reason: row.reason.unwrap_or_default(),
        };

        match positions.get(&applicant) {
            Some(&index) => applications[index].choices.push(choice),
            None => {
                positions.insert(applicant.clone(), applications.len());
                applications.push(Application {
                    applicant,
                    choices: vec![choice],
                });
            }
        }
    }

    Ok(applications)
}

/// A resource may be listed once; a repeated row is an error rather than an override.
pub(crate) fn parse_capacities<R: Read>(reader: R) -> Result<RawCapacities, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut capacities = RawCapacities::new();

    for record in csv_reader.deserialize::<CapacityRow>() {
        let row = record?;
        let resource = ResourceKey::new(strip_marks(&row.resource));
        if capacities.insert(resource.clone(), row.capacity).is_some() {
            return Err(ImportError::DuplicateResource { resource });
        }
    }

    Ok(capacities)
}

#[derive(Debug, Deserialize)]
struct PreferenceRow {
    #[serde(alias = "student")]
    applicant: String,
    rank: Rank,
    #[serde(alias = "lab")]
    resource: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CapacityRow {
    #[serde(alias = "lab")]
    resource: String,
    capacity: i64,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Spreadsheet exports sometimes carry byte-order or zero-width marks inside cells.
fn strip_marks(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}
