use crate::infra::allocation_config;
use chrono::{Local, NaiveDate};
use clap::Args;
use lab_alloc::allocation::{Allocation, AllocationEngine};
use lab_alloc::config::AppConfig;
use lab_alloc::error::AppError;
use lab_alloc::import::{CapacityImporter, PreferenceImporter};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct AllocateArgs {
    /// Preference CSV with applicant,rank,resource[,reason] rows
    #[arg(long)]
    pub(crate) preferences: PathBuf,
    /// Capacity CSV with resource,capacity rows
    #[arg(long)]
    pub(crate) capacities: PathBuf,
    /// Number of ranked rounds to run (overrides ALLOC_MAX_RANK)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..))]
    pub(crate) max_rank: Option<u8>,
    /// Skip the improvement pass
    #[arg(long)]
    pub(crate) no_improve: bool,
    /// Emit the allocation result as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
    /// Date printed on the report (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) run_date: Option<NaiveDate>,
}

pub(crate) fn run_allocate(args: AllocateArgs, config: &AppConfig) -> Result<(), AppError> {
    let AllocateArgs {
        preferences,
        capacities,
        max_rank,
        no_improve,
        json,
        run_date,
    } = args;

    let applications = PreferenceImporter::from_path(&preferences)?;
    let capacities = CapacityImporter::from_path(&capacities)?;
    info!(
        applications = applications.len(),
        resources = capacities.len(),
        source = %preferences.display(),
        "inputs loaded"
    );

    let engine = AllocationEngine::new(allocation_config(config.allocation, max_rank, no_improve));
    let allocation = engine.run(applications, capacities)?;

    if json {
        let payload = serde_json::to_string_pretty(&allocation.result())?;
        println!("{payload}");
        return Ok(());
    }

    let run_date = run_date.unwrap_or_else(|| Local::now().date_naive());
    println!("Lab allocation report ({run_date})");
    println!(
        "Rounds: {} | improvement pass: {}",
        engine.config().max_rank,
        if engine.config().improve { "on" } else { "off" }
    );
    render_allocation(&allocation);
    Ok(())
}

pub(crate) fn render_allocation(allocation: &Allocation) {
    let result = allocation.result();
    let stats = &result.stats;

    println!("\nSummary");
    println!(
        "- {} applicants | {} assigned | {} unassigned",
        stats.total_applications, stats.assigned, stats.unassigned
    );
    for entry in &stats.per_rank {
        println!("- rank {}: {}", entry.rank, entry.count);
    }
    if allocation.improving_moves() > 0 {
        println!(
            "- {} improving move(s) | rank total {}",
            allocation.improving_moves(),
            allocation.phi()
        );
    } else {
        println!("- rank total {}", allocation.phi());
    }

    if result.assignments.is_empty() {
        println!("\nAssignments: none");
    } else {
        println!("\nAssignments");
        for entry in &result.assignments {
            println!(
                "- {} -> {} (rank {})",
                entry.applicant, entry.resource, entry.matched_rank
            );
        }
    }

    println!("\nRemaining capacity");
    for (resource, remaining) in allocation.remaining_capacity() {
        println!("- {resource}: {remaining}");
    }

    let unassigned = allocation.unassigned();
    if unassigned.is_empty() {
        println!("\nUnassigned: none");
    } else {
        println!("\nUnassigned");
        for applicant in &unassigned {
            println!("- {applicant}");
        }
    }

    println!("\nRosters");
    for entry in allocation.resource_occupancy() {
        let holders = if entry.holders.is_empty() {
            "-".to_string()
        } else {
            entry
                .holders
                .iter()
                .map(|holder| holder.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "- {} ({}/{} seats): {}",
            entry.resource, entry.taken, entry.capacity, holders
        );
    }
}
