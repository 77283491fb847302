//! CSV loaders for preference lists and capacities.
//!
//! Loading is the caller's concern, not the engine's: these helpers only turn files into
//! the plain inputs [`crate::allocation::AllocationEngine::run`] expects. Capacities are
//! read as signed integers so negative values reach intake and are rejected there.

mod parser;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::allocation::{Application, RawCapacities, ResourceKey};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    DuplicateResource { resource: ResourceKey },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read allocation input: {}", err),
            ImportError::Csv(err) => write!(f, "invalid allocation CSV data: {}", err),
            ImportError::DuplicateResource { resource } => {
                write!(f, "capacity for '{}' is listed more than once", resource)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::DuplicateResource { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads `applicant,rank,resource,reason` preference rows.
pub struct PreferenceImporter;

impl PreferenceImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Application>, ImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Application>, ImportError> {
        Ok(parser::parse_preferences(reader)?)
    }
}

/// Reads `resource,capacity` rows.
pub struct CapacityImporter;

impl CapacityImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RawCapacities, ImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RawCapacities, ImportError> {
        parser::parse_capacities(reader)
    }
}
