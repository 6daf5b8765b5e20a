// Full-session runs through the public API, in virtual time.
// These avoid wasm/browser APIs so they run under `cargo test` on the host.

use phase_chase::sim::input::ARROW_RIGHT;
use phase_chase::sim::{Arena, GameEvent, GamePhase, Outcome, Screen, Session, Task};
use phase_chase::Tuning;

/// A still enemy can never catch a still player (spawns never overlap)
fn harmless() -> Tuning {
    Tuning {
        enemy_base_speed: 0.0,
        enemy_speed_step: 0.0,
        ..Tuning::default()
    }
}

fn run_until(s: &mut Session, end: f64, events: &mut Vec<GameEvent>) {
    let mut t = s.now();
    while t < end {
        t = (t + 5.0).min(end);
        s.pump(t);
        events.extend(s.drain_events());
    }
}

#[test]
fn full_run_wins_after_three_phases() {
    let mut s = Session::new(harmless(), Arena::new(600.0, 600.0), 1);
    let mut events = Vec::new();
    s.start_game();
    events.extend(s.drain_events());

    // 3 x (4 s intro + 10 s play)
    run_until(&mut s, 42_000.0, &mut events);
    assert_eq!(s.state(), GamePhase::Won);
    assert_eq!(s.screen(), Screen::Result);

    let dialogues: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ShowDialogue(line) => Some(line.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        dialogues,
        [
            "Run... while you still can.",
            "It's getting closer...",
            "You can't escape this time..."
        ]
    );

    let countdowns: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ShowCountdown(n) => Some(*n),
            _ => None,
        })
        .collect();
    assert_eq!(countdowns, [3, 2, 1, 3, 2, 1, 3, 2, 1]);

    assert_eq!(
        events.iter().filter(|e| **e == GameEvent::ShowGo).count(),
        3
    );
    assert_eq!(events.last(), Some(&GameEvent::Outcome(Outcome::Won)));
}

#[test]
fn timer_counts_down_one_per_second() {
    let mut s = Session::new(harmless(), Arena::new(600.0, 600.0), 2);
    let mut events = Vec::new();
    s.start_game();
    events.extend(s.drain_events());
    run_until(&mut s, 14_000.0, &mut events);

    let times: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::TimeLeft(n) => Some(*n),
            _ => None,
        })
        .collect();
    // Reset to 10, ticks down to 0, then phase 2 resets to 10
    assert_eq!(times, [10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 10]);
    assert_eq!(s.phase(), 2);
}

#[test]
fn player_walks_into_parked_enemy_and_loses() {
    let mut tuning = harmless();
    // Tiny arena: the enemy is always near
    tuning.player_start = glam::Vec2::new(0.0, 0.0);
    let mut s = Session::new(tuning, Arena::new(200.0, 100.0), 3);
    let mut events = Vec::new();
    s.start_game();
    run_until(&mut s, 4_000.0, &mut events);
    assert_eq!(s.state(), GamePhase::Active);

    // Enemy spawns within [0, 120] x [0, 20], clear of the player box at x < 80,
    // so walking right for a second must run into it
    s.key_down(ARROW_RIGHT);
    run_until(&mut s, 5_000.0, &mut events);
    assert_eq!(s.state(), GamePhase::Lost);
    assert!(s.restart_pending());
    assert_eq!(s.scheduler().active_count(Task::Frame), 0);
    assert_eq!(s.scheduler().active_count(Task::PhaseTimer), 0);
    assert!(events.contains(&GameEvent::Outcome(Outcome::Lost)));

    run_until(&mut s, 7_100.0, &mut events);
    assert_eq!(s.phase(), 1);
    assert!(s.state().is_intro());
    assert!(!s.restart_pending());
}

#[test]
fn never_more_than_one_loop_or_timer() {
    let mut s = Session::new(harmless(), Arena::new(600.0, 600.0), 4);
    s.start_game();
    let mut t = 0.0;
    while t < 45_000.0 {
        t += 7.0;
        s.pump(t);
        s.drain_events();
        // Mash navigation at awkward moments
        if (t as u64) % 3_001 < 7 {
            s.restart_game();
        }
        if (t as u64) % 11_003 < 7 {
            s.go_home();
            s.start_game();
        }
        assert!(s.scheduler().active_count(Task::Frame) <= 1);
        assert!(s.scheduler().active_count(Task::PhaseTimer) <= 1);
        assert!(s.scheduler().active_count(Task::Sequence) <= 1);
        assert!(s.scheduler().active_count(Task::Restart) <= 1);
    }
}
