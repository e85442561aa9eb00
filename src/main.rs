//! Opele Cast CLI
//!
//! Command-line interface for testing and demonstrating the cast pipeline
//! with a scripted mock sensor.

use clap::Parser;
use opele_cast::{
    cast::{DemoConfig, FileConfig},
    sign, EntropyCollector, LegMark, MockMotionSource,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "opele-cast", version, about = "Cast a divination sign from simulated motion")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulated shake readings before the drop.
    #[arg(long)]
    shake_readings: Option<u32>,

    /// Stop manually instead of simulating the drop gesture.
    #[arg(long)]
    manual_stop: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    let demo = DemoConfig {
        shake_readings: args.shake_readings.unwrap_or(config.demo.shake_readings),
        manual_stop: args.manual_stop || config.demo.manual_stop,
    };

    info!("Opele Cast v{}", opele_cast::VERSION);
    info!("This is a demonstration using mock sensor input");

    // Script the gesture: a burst of shakes, then (unless stopping
    // manually) freefall and impact
    let mut source = MockMotionSource::new();
    for i in 0..demo.shake_readings {
        source.push_shake(16.0 + f64::from(i % 5));
    }
    if !demo.manual_stop {
        source.push_freefall();
        source.push_impact(26.0);
    }

    let mut collector = EntropyCollector::with_config(source, config.cast);
    let impact = collector.subscribe_impact();

    if let Err(e) = collector.start_session() {
        eprintln!("Failed to start session: {}", e);
        std::process::exit(1);
    }

    let drained = collector.pump();
    info!(
        readings = drained,
        state = ?collector.state(),
        "drained simulated sensor"
    );

    let method = if impact.try_recv().is_ok() {
        "drop impact detected"
    } else {
        "manual stop"
    };

    let seed = collector.stop_and_cast();
    let descriptor = sign::profile(seed);

    info!(%seed, method, "cast complete");

    println!("Odu: {} (index {})", descriptor.name, descriptor.index);
    println!("Signature: {}", descriptor.binary_signature);
    println!("Right leg: {}", render_leg(&descriptor.right_leg));
    println!("Left leg:  {}", render_leg(&descriptor.left_leg));
}

/// Renders a leg as traditional marks: I for open, II for closed.
fn render_leg(leg: &[LegMark; 4]) -> String {
    leg.iter()
        .map(|mark| match mark {
            LegMark::Open => "I",
            LegMark::Closed => "II",
        })
        .collect::<Vec<_>>()
        .join(" ")
}
