//! Tilt Kick entry point
//!
//! On the web this starts the browser game. Natively it runs a short
//! scripted match headlessly and reports what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = tilt_kick::platform::web::run().await {
        // The logger may not be up yet
        web_sys::console::error_1(&format!("Tilt Kick failed to start: {:#}", e).into());
        log::error!("Tilt Kick failed to start: {:#}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tilt Kick (native) starting...");
    log::info!("Rendering needs a browser - run with `trunk serve` for the web version");

    println!("\nRunning scripted match...");
    let summary = scripted_match(42);
    println!(
        "Score {} | Streak {} | Best {} after {:.1}s",
        summary.score, summary.streak, summary.best_score, summary.seconds
    );
}

#[cfg(not(target_arch = "wasm32"))]
struct MatchSummary {
    score: u32,
    streak: u32,
    best_score: u32,
    seconds: f32,
}

/// Play a fixed input script at 60 fps
#[cfg(not(target_arch = "wasm32"))]
fn scripted_match(seed: u64) -> MatchSummary {
    use tilt_kick::Settings;
    use tilt_kick::game::Game;

    const DT: f32 = 1.0 / 60.0;
    // (keys held, seconds)
    let script: [(&[&str], f32); 6] = [
        (&["ArrowLeft"], 0.5),
        (&["ArrowDown", "KeyW"], 1.5),
        (&["ArrowRight", "ArrowDown"], 2.0),
        (&[], 4.0),
        (&["ArrowDown"], 3.0),
        (&["ArrowUp", "KeyS"], 2.0),
    ];

    let mut game = Game::new(seed, Settings::default());
    let mut elapsed = 0.0;
    for (keys, seconds) in script {
        for key in keys {
            game.key(key, true);
        }
        let frames = (seconds / DT).round() as u32;
        for _ in 0..frames {
            game.frame(DT);
            if let Some(hud) = game.hud_update() {
                let text: Vec<_> = hud.lines.iter().map(|l| l.text.as_str()).collect();
                log::debug!("HUD: {}", text.join(" / "));
            }
        }
        for key in keys {
            game.key(key, false);
        }
        elapsed += seconds;
    }

    let board = game.state.scoreboard;
    MatchSummary {
        score: board.score,
        streak: board.streak,
        best_score: board.best_score,
        seconds: elapsed,
    }
}
