use fieldsim::{build_scenario, run_viewer, ScenarioConfig};
use fieldsim::{bench_collision_pairs, bench_tick};

use anyhow::Result;
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "playground.yaml")]
    file_name: String,

    /// Run the headless throughput benches instead of the viewer.
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_tick();
        bench_collision_pairs();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let spawn = scenario_cfg.spawn.clone();
    let sim = build_scenario(scenario_cfg)?;
    run_viewer(sim, spawn);

    Ok(())
}
