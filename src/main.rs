//! Neon Breaker entry point
//!
//! Runs the simulation headless with the autopilot holding the paddle,
//! then reports each finished game to the highscore file.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use neon_breaker::highscores::format_date;
    use neon_breaker::persistence::JsonFileStore;
    use neon_breaker::platform;
    use neon_breaker::{Leaderboard, Settings};

    env_logger::init();
    log::info!("Neon Breaker (native) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "neon_breaker_settings.json".to_string());
    let mut settings = Settings::load(Path::new(&settings_path));
    settings.apply_env();
    log::info!(
        "Difficulty {}, quality {}",
        settings.difficulty.label(),
        settings.quality.as_str()
    );

    let mut leaderboard = Leaderboard::new(JsonFileStore::new(settings.highscores_path.clone()));
    let base_seed = settings.seed.unwrap_or_else(platform::entropy_seed);

    for game in 0..settings.games {
        let seed = base_seed.wrapping_add(game as u64);
        let outcome = play_one(&settings, seed);
        println!(
            "Game {}: seed {} -> {} points, level {}",
            game + 1,
            seed,
            outcome.score,
            outcome.level
        );
        if leaderboard.report_final_score(&outcome, platform::now_millis()) {
            println!("  New highscore!");
        }
    }

    let now = platform::now_millis();
    println!("\n{} highscores:", settings.difficulty.label());
    for (rank, entry) in leaderboard.top(settings.difficulty).iter().enumerate() {
        println!(
            "{:>2}. {:>8}  level {:>2}  {}",
            rank + 1,
            entry.score,
            entry.level,
            format_date(entry.timestamp, now)
        );
    }
}

/// Play a single autopilot game until it ends or runs out of frames
#[cfg(not(target_arch = "wasm32"))]
fn play_one(settings: &neon_breaker::Settings, seed: u64) -> neon_breaker::sim::FinalScore {
    use neon_breaker::sim::{GameEvent, GamePhase, GameState, autopilot_target};

    let mut state = GameState::new(seed);
    state.effects = settings.effects();
    state.start_game(settings.difficulty);

    let mut bricks = 0u32;
    let mut power_ups = 0u32;
    for _ in 0..settings.max_frames {
        if let Some(x) = autopilot_target(&state) {
            state.set_pointer_x(x);
        }
        state.frame(settings.frame_ms);

        for event in state.drain_events() {
            match event {
                GameEvent::BrickDestroyed { .. } => bricks += 1,
                GameEvent::PowerUpCollected { .. } => power_ups += 1,
                _ => {}
            }
        }

        match state.phase {
            GamePhase::LevelComplete => {
                state.next_level();
            }
            GamePhase::GameOver => {
                log::info!("{} bricks broken, {} power-ups caught", bricks, power_ups);
                return state.final_score();
            }
            _ => {}
        }
    }

    log::info!(
        "Frame budget spent at level {} ({} bricks broken, {} power-ups caught)",
        state.level,
        bricks,
        power_ups
    );
    let result = state.final_score();
    state.end_game();
    result
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm
}
