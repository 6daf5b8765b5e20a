//! Phase Chase entry point
//!
//! On wasm32 this starts the browser game. Natively it plays one headless
//! session in virtual time with a simple evading bot and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = phase_chase::platform::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use phase_chase::sim::{Arena, GamePhase, Session};
    use phase_chase::Tuning;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Phase Chase (native) starting...");
    log::info!("Browser build: run with `trunk serve` for the playable version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);
    let tuning = Tuning::default();
    let arena = Arena::from(&tuning);
    let mut session = Session::new(tuning, arena, seed);
    session.start_game();

    // 4 ms pumps, at most two minutes of game time
    let mut t = 0.0;
    while t < 120_000.0 && !session.state().is_over() {
        t += 4.0;
        if session.state() == GamePhase::Active {
            steer_away(&mut session);
        }
        session.pump(t);
        session.drain_events();
    }

    log::info!(
        "Headless run finished: {:?} at phase {} after {} frames ({:.1}s)",
        session.state(),
        session.phase(),
        session.frames(),
        t / 1000.0
    );
}

/// Hold the arrows pointing away from the enemy, turning along walls
#[cfg(not(target_arch = "wasm32"))]
fn steer_away(session: &mut phase_chase::sim::Session) {
    use phase_chase::sim::input::{ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT, ARROW_UP};

    let player = session.player().clone();
    let enemy = session.enemy().pos;
    let max = session.arena().max_origin(player.size);
    let away = player.pos - enemy;

    let mut go_right = away.x >= 0.0;
    let mut go_down = away.y >= 0.0;
    // Cornered on an axis: slide the other way along the wall
    if (go_right && player.pos.x >= max.x) || (!go_right && player.pos.x <= 0.0) {
        go_right = player.pos.x < max.x / 2.0;
    }
    if (go_down && player.pos.y >= max.y) || (!go_down && player.pos.y <= 0.0) {
        go_down = player.pos.y < max.y / 2.0;
    }

    let keys = [
        (ARROW_RIGHT, go_right),
        (ARROW_LEFT, !go_right),
        (ARROW_DOWN, go_down),
        (ARROW_UP, !go_down),
    ];
    for (key, held) in keys {
        if held {
            session.key_down(key);
        } else {
            session.key_up(key);
        }
    }
}
