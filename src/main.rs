//! Eventmood CLI
//!
//! Host driver for the group mood aggregation core: runs synthetic sessions
//! and prints the privacy declaration. Real deployments feed the core from
//! an external face-detection model instead.

use clap::{Parser, Subcommand};
use eventmood::{
    config::TrackerConfig, detector::types::ExpressionVector, session::MoodSession, Emotion,
    EngagementBand, PRIVACY_DECLARATION, VERSION,
};
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "eventmood")]
#[command(version = VERSION)]
#[command(about = "Privacy-first group mood aggregation core", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a synthetic tracking session and print the privatized summary
    Simulate {
        /// Number of detection frames to simulate (paced at ~2 Hz)
        #[arg(long, default_value = "240")]
        frames: u64,

        /// EMA smoothing factor in (0, 1)
        #[arg(long, default_value = "0.3")]
        alpha: f64,

        /// Timeline snapshot interval in seconds
        #[arg(long, default_value = "30")]
        interval: u64,

        /// Privacy budget for the outbound summary
        #[arg(long, default_value = "1.0")]
        epsilon: f64,

        /// Seed for the synthetic crowd (summary noise stays unseeded)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Display privacy declaration
    Privacy,

    /// Show the default configuration
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            frames,
            alpha,
            interval,
            epsilon,
            seed,
        } => cmd_simulate(frames, alpha, interval, epsilon, seed),
        Commands::Privacy => println!("{PRIVACY_DECLARATION}"),
        Commands::Config => cmd_config(),
    }
}

fn cmd_config() {
    let config = TrackerConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to render config: {e}"),
    }
}

fn cmd_simulate(frames: u64, alpha: f64, interval: u64, epsilon: f64, seed: Option<u64>) {
    let config = TrackerConfig {
        smoothing_alpha: alpha,
        snapshot_interval: Duration::from_secs(interval),
        epsilon,
        ..TrackerConfig::default()
    };

    let mut session = match MoodSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let mut crowd_rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    session.start().expect("fresh session must start");
    session.model_ready().expect("loading session must begin tracking");

    // ~2 Hz detection cadence
    let frame_period = Duration::from_millis(500);
    let mut next_tick = session.config().snapshot_interval;

    for frame_idx in 0..frames {
        let elapsed = frame_period * frame_idx as u32;
        let faces = synthesize_frame(&mut crowd_rng, frame_idx, frames);
        session.process_frame(&faces);

        while elapsed >= next_tick {
            session.tick(next_tick);
            next_tick += session.config().snapshot_interval;
        }
    }

    let total_elapsed = frame_period * frames as u32;
    session.stop(total_elapsed).expect("tracking session must stop");

    println!("Session complete ({} frames, {:?})", frames, total_elapsed);
    println!(
        "  current mood:     {}",
        session.current_mood().map_or("none", Emotion::as_str)
    );
    println!(
        "  dominant emotion: {}",
        session.dominant_emotion().map_or("none", Emotion::as_str)
    );
    println!("  total detections: {}", session.total_detections());
    println!(
        "  engagement:       {} ({})",
        session.engagement(),
        EngagementBand::from_score(session.engagement())
    );
    println!("  timeline entries: {}", session.timeline().len());

    match session.summary(&mut thread_rng()) {
        Ok(summary) => {
            println!("\nPrivatized outbound summary (epsilon = {epsilon}):");
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Failed to render summary: {e}"),
            }
        }
        Err(e) => eprintln!("Failed to build summary: {e}"),
    }
}

/// Generate a plausible crowd for one frame: the mood drifts from happy
/// towards bored over the run, with per-face jitter. Occasionally a frame
/// has no faces at all.
fn synthesize_frame(rng: &mut StdRng, frame_idx: u64, total_frames: u64) -> Vec<ExpressionVector> {
    if rng.gen_bool(0.05) {
        return Vec::new();
    }

    let progress = frame_idx as f64 / total_frames.max(1) as f64;
    let face_count = rng.gen_range(1..=4);

    (0..face_count)
        .map(|_| {
            let jitter: f64 = rng.gen_range(-0.1..0.1);
            let happy = (0.9 - 0.7 * progress + jitter).clamp(0.0, 1.0);
            let bored = (0.1 + 0.6 * progress + jitter).clamp(0.0, 1.0);
            let neutral = rng.gen_range(0.1..0.3);
            ExpressionVector::from_scores([
                (Emotion::Happy, happy),
                (Emotion::Bored, bored),
                (Emotion::Neutral, neutral),
                (Emotion::Surprised, rng.gen_range(0.0..0.1)),
            ])
        })
        .collect()
}
