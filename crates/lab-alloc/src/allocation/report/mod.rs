mod summary;
pub mod views;

pub use summary::{assignments, remaining_capacity, resource_occupancy, summarize, unassigned};
pub use views::{
    AllocationResult, AllocationStats, AssignmentEntry, RankCountEntry, ResourceOccupancyEntry,
};
