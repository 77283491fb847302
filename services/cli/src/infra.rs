use chrono::NaiveDate;
use lab_alloc::allocation::AllocationConfig;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Apply command-line overrides on top of the environment-derived settings.
pub(crate) fn allocation_config(
    base: AllocationConfig,
    max_rank: Option<u8>,
    no_improve: bool,
) -> AllocationConfig {
    AllocationConfig {
        max_rank: max_rank.unwrap_or(base.max_rank),
        improve: base.improve && !no_improve,
    }
}
