use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Position in an applicant's preference order; also the number of an allocation round.
pub type Rank = u8;

/// Number of ranked rounds processed when nothing else is configured.
pub const DEFAULT_MAX_RANK: Rank = 3;

/// Identifier wrapper for applicants (e.g., a student number).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantKey(pub String);

impl ApplicantKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicantKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApplicantKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier wrapper for capacity-limited resources (e.g., a laboratory code).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKey(pub String);

impl ResourceKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single ranked preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub rank: Rank,
    pub resource: ResourceKey,
    #[serde(default)]
    pub reason: String,
}

impl Choice {
    pub fn new(rank: Rank, resource: impl Into<ResourceKey>, reason: impl Into<String>) -> Self {
        Self {
            rank,
            resource: resource.into(),
            reason: reason.into(),
        }
    }
}

/// An applicant together with their ranked choices, in the order they were submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub applicant: ApplicantKey,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Application {
    pub fn new(applicant: impl Into<ApplicantKey>) -> Self {
        Self {
            applicant: applicant.into(),
            choices: Vec::new(),
        }
    }

    pub fn with_choice(
        mut self,
        rank: Rank,
        resource: impl Into<ResourceKey>,
        reason: impl Into<String>,
    ) -> Self {
        self.choices.push(Choice::new(rank, resource, reason));
        self
    }

    /// The choice listed at `rank`. When a rank is listed more than once the first
    /// occurrence in list order wins.
    pub fn choice_at(&self, rank: Rank) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.rank == rank)
    }
}

/// Validated capacities keyed by resource. Resources missing from the map have no seats.
pub type CapacityMap = BTreeMap<ResourceKey, u32>;

/// Capacities as supplied by callers, before the sign and range checks at intake.
pub type RawCapacities = BTreeMap<ResourceKey, i64>;

/// Where an applicant currently holds a seat and which ranked choice it satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub resource: ResourceKey,
    pub matched_rank: Rank,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_at_prefers_first_duplicate() {
        let application = Application::new("S1")
            .with_choice(1, "Lab1", "first listing")
            .with_choice(1, "Lab2", "second listing");

        let choice = application.choice_at(1).expect("rank 1 listed");
        assert_eq!(choice.resource, ResourceKey::from("Lab1"));
        assert!(application.choice_at(2).is_none());
    }

    #[test]
    fn keys_serialize_transparently() {
        let application = Application::new("S7").with_choice(2, "Optics", "laser work");
        let json = serde_json::to_value(&application).expect("serializes");
        assert_eq!(json["applicant"], "S7");
        assert_eq!(json["choices"][0]["resource"], "Optics");
        assert_eq!(json["choices"][0]["rank"], 2);
    }

    #[test]
    fn reason_defaults_when_missing() {
        let choice: Choice =
            serde_json::from_str(r#"{"rank":1,"resource":"Lab1"}"#).expect("deserializes");
        assert_eq!(choice.reason, "");
    }
}
