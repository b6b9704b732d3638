#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Lane Defence headlessly with a scripted hero.

mod autopilot;

use std::{collections::BTreeMap, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use lane_defence_core::{Event, WavePhase};
use lane_defence_session::{AudioPlayer, Balance, InputFrame, Session, Silent};
use lane_defence_world::query;
use tracing::{debug, info, warn};

use autopilot::Autopilot;

/// Plays Lane Defence without a window, logging progress as it goes.
#[derive(Debug, Parser)]
#[command(name = "lane-defence", version, about)]
struct Args {
    /// Balance file in TOML format; built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of waves to clear before stopping.
    #[arg(long, default_value_t = 3)]
    waves: u32,

    /// Overrides the seed from the balance file.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated frame length in milliseconds.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    dt_ms: u64,

    /// Upper bound on simulated time in seconds.
    #[arg(long, default_value_t = 600)]
    max_seconds: u64,
}

/// Counts every cue the session plays.
#[derive(Debug, Default)]
struct CueTally {
    counts: BTreeMap<String, u32>,
}

impl AudioPlayer for CueTally {
    fn play(&mut self, effect: &str) {
        debug!(effect, "sound");
        *self.counts.entry(effect.to_owned()).or_default() += 1;
    }
}

/// Entry point for the Lane Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut balance = match &args.config {
        Some(path) => Balance::from_path(path)
            .with_context(|| format!("failed to load balance file {}", path.display()))?,
        None => Balance::default(),
    };
    if let Some(seed) = args.seed {
        balance.seed = seed;
    }

    let mut session = Session::new(balance, CueTally::default(), Silent)
        .context("balance rejected")?;
    println!("{}", query::welcome_banner(session.world()));

    let dt = Duration::from_millis(args.dt_ms);
    let limit = Duration::from_secs(args.max_seconds);
    let autopilot = Autopilot;
    let mut waves_cleared = 0;
    let mut kills = 0u32;
    let mut breaches = 0u32;

    while query::elapsed(session.world()) < limit {
        let hud = session.hud();
        if hud.phase == WavePhase::WaveComplete && waves_cleared >= args.waves {
            break;
        }
        if hud.phase == WavePhase::GameOver {
            warn!(wave = %hud.wave_label, "castle fell");
            break;
        }

        let choices: Vec<_> = autopilot.choose(&hud).into_iter().collect();
        let input = if hud.phase == WavePhase::WaveActive {
            autopilot.input(
                &query::hero(session.world()),
                &query::enemy_view(session.world()),
            )
        } else {
            InputFrame::default()
        };

        for event in session.step(dt, &input, &choices) {
            match event {
                Event::EnemyDied { .. } => kills += 1,
                Event::EnemyBreachedCastle { .. } => breaches += 1,
                Event::WaveCompleted { wave, .. } => {
                    waves_cleared += 1;
                    info!(wave = wave.get(), "wave cleared");
                }
                Event::ChoiceAccepted { choice } => info!(?choice, "choice taken"),
                _ => {}
            }
        }
    }

    let hud = session.hud();
    println!(
        "{} | {} | castle {}/{}",
        hud.wave_label, hud.kills_label, hud.castle.current, hud.castle.maximum
    );
    println!(
        "waves cleared: {waves_cleared}, kills: {kills}, breaches: {breaches}, hero damage: {}",
        hud.hero_damage
    );
    println!("simulated {:.1}s", query::elapsed(session.world()).as_secs_f32());
    for (effect, count) in &session.audio().counts {
        println!("  {effect}: {count}");
    }

    Ok(())
}
