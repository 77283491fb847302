use crate::report::render_allocation;
use clap::Args;
use lab_alloc::allocation::{Application, AllocationEngine, RawCapacities, ResourceKey};
use lab_alloc::config::AppConfig;
use lab_alloc::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print allocation results as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let engine = demo_engine(config);

    println!("Scenario A: two applicants competing for one Lab1 seat");
    let (applications, capacities) = competing_first_choices();
    let allocation = engine.run(applications, capacities)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&allocation.result())?);
    } else {
        render_allocation(&allocation);
    }

    println!("\nScenario C: Lab1 gains a seat after the rounds");
    let (applications, capacities) = late_capacity();
    let mut allocation = engine.run(applications, capacities)?;
    println!("Rank total before the extra seat: {}", allocation.phi());
    allocation.set_capacity(&ResourceKey::from("Lab1"), 2)?;
    let moves = allocation.improve();
    println!(
        "Improvement pass made {moves} move(s); rank total now {}",
        allocation.phi()
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&allocation.result())?);
    } else {
        render_allocation(&allocation);
    }

    Ok(())
}

/// Scenario C still calls the improvement pass explicitly after raising Lab1.
fn demo_engine(config: &AppConfig) -> AllocationEngine {
    AllocationEngine::new(config.allocation)
}

fn competing_first_choices() -> (Vec<Application>, RawCapacities) {
    let applications = vec![
        Application::new("S1")
            .with_choice(1, "Lab1", "signal processing")
            .with_choice(2, "Lab2", "control systems"),
        Application::new("S2")
            .with_choice(1, "Lab1", "signal processing")
            .with_choice(2, "Lab2", "control systems"),
    ];
    let capacities: RawCapacities = [("Lab1", 1), ("Lab2", 1)]
        .into_iter()
        .map(|(resource, capacity)| (ResourceKey::from(resource), capacity))
        .collect();
    (applications, capacities)
}

fn late_capacity() -> (Vec<Application>, RawCapacities) {
    let applications = vec![
        Application::new("S1").with_choice(1, "Lab1", "robotics"),
        Application::new("S2").with_choice(1, "Lab2", "materials"),
        Application::new("S3")
            .with_choice(1, "Lab1", "robotics")
            .with_choice(2, "Lab2", "materials"),
    ];
    let capacities: RawCapacities = [("Lab1", 1), ("Lab2", 2)]
        .into_iter()
        .map(|(resource, capacity)| (ResourceKey::from(resource), capacity))
        .collect();
    (applications, capacities)
}
