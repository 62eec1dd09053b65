//! Ghost Hunt entry point
//!
//! Native builds run a headless session under the demo autopilot. The browser
//! build is driven from JS through `ghost_hunt::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use ghost_hunt::sim::{GameEvent, autopilot};
    use ghost_hunt::{Session, Tuning};

    /// Run a Ghost Hunt session headlessly with the demo autopilot
    #[derive(Parser, Debug)]
    #[command(name = "ghost-hunt", version)]
    struct Args {
        /// Player name shown in score and end-of-session text
        #[arg(short, long)]
        name: String,

        /// RNG seed (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Simulated seconds before giving up
        #[arg(long, default_value_t = 120.0)]
        seconds: f32,

        /// Tuning overrides as JSON
        #[arg(short, long)]
        tuning: Option<PathBuf>,

        /// Print the final snapshot as JSON
        #[arg(long)]
        snapshot: bool,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tuning file {}", path.display()))?;
        Tuning::from_json(&json)
            .with_context(|| format!("Failed to parse tuning file {}", path.display()))
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        let tuning = load_tuning(args.tuning.as_ref())?;
        let seed = args.seed.unwrap_or_else(rand::random);
        let dt = tuning.frame_dt;

        let mut session = Session::start(&args.name, tuning, seed)?;
        let total_frames = (args.seconds / dt).ceil() as u64;

        for _ in 0..total_frames {
            let input = autopilot(session.context());
            session.advance(dt, &input);

            for event in session.drain_events() {
                match event {
                    GameEvent::ScoreChanged { .. } => {
                        log::info!("{}", session.context().score_line());
                    }
                    GameEvent::Pickup { kind } => log::debug!("pickup cue: {:?}", kind),
                    GameEvent::HazardDestroyed => log::info!("The ghost is gone"),
                    GameEvent::SessionEnded {
                        outcome,
                        final_score,
                        player_name,
                    } => println!("{}", outcome.banner(&player_name, final_score)),
                }
            }
            if session.is_over() {
                break;
            }
        }

        if !session.is_over() {
            println!(
                "{} (time up after {}s, seed {})",
                session.context().score_line(),
                args.seconds,
                seed
            );
        }

        if args.snapshot {
            let json = serde_json::to_string_pretty(&session.snapshot())
                .context("Failed to serialize snapshot")?;
            println!("{}", json);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Ghost Hunt (native) starting...");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is ghost_hunt::web, this is just to satisfy the compiler
}
