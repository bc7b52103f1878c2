//! Side Blaster demo entry point
//!
//! Runs a headless session against the standalone harness: optional settings
//! file as the first argument, autopilot input, status line printed as it goes.

use std::path::Path;

use side_blaster::autopilot::choose_key;
use side_blaster::sim::tick;
use side_blaster::{Harness, Settings, TickStatus, World};

fn main() {
    env_logger::init();
    log::info!("Side Blaster (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let mut host = Harness::from_settings(&settings);
    log::info!("Session seed: {}", host.rng_state.seed);

    let mut world = World::new();
    world.init(&mut host);

    let mut ticks = 0u64;
    let mut levels_cleared = 0u32;
    while ticks < settings.max_ticks {
        if settings.autopilot {
            host.clear_keys();
            if let Some(key) = choose_key(&world) {
                host.push_key(key);
            }
        }

        let status = tick(&mut world, &mut host);
        ticks += 1;
        for cue in host.drain_cues() {
            log::trace!("tick {}: {}", ticks, cue.as_str());
        }

        if settings.status_every > 0 && ticks % settings.status_every == 0 {
            println!("[{:>6}] {}", ticks, host.status_text());
        }

        match status {
            TickStatus::Continue => {}
            TickStatus::LevelFinished => {
                levels_cleared += 1;
                log::info!("Cleared level {} at tick {}", host.level, ticks);
                host.advance_level();
                world.init(&mut host);
            }
            TickStatus::PlayerDied => {
                if host.lives == 0 {
                    log::info!("Game over at tick {}", ticks);
                    break;
                }
                log::info!("Life lost, {} remaining", host.lives);
                world.init(&mut host);
            }
        }
    }
    let snapshot = world.snapshot();
    world.clean_up();

    println!(
        "Finished after {} ticks: score {}, level {}, lives {}, levels cleared {}",
        ticks, host.score, host.level, host.lives, levels_cleared
    );
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final snapshot: {}", e),
    }
}
