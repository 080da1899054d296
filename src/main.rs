use snowglobe::{RunError, Simulation, SnowConfig};

fn main() -> Result<(), RunError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let count = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(SnowConfig::default().count);

    Simulation::new()
        .with_config(SnowConfig::default().with_count(count))
        .run()
}
