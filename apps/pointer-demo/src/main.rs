use pointer_demo::{demo_scene, demo_session, replay};
use tactus_input::PoolSettings;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let settings = PoolSettings::from_env();
    log::info!(
        "pool: {} reserved, at most {} pointers",
        settings.initial_capacity,
        settings.max_pointers
    );

    let report = replay(&demo_session(), settings, &demo_scene())?;

    println!("=== Tactus pointer session ===");
    for line in &report.lines {
        println!("{line}");
    }
    println!();
    let mut fingers: Vec<_> = report.pressed_on.keys().copied().collect();
    fingers.sort_unstable();
    for finger in fingers {
        println!(
            "finger {finger}: pressed on {:?}, lifted over {:?}",
            report.pressed_on.get(&finger).copied().flatten(),
            report.lifted_over.get(&finger).copied().flatten(),
        );
    }
    println!("pointers still bound: {}", report.still_bound);
    Ok(())
}
