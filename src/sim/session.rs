//! Game session: phase controller, timer, game loop and navigation
//!
//! A `Session` owns every piece of mutable game state. The platform feeds it
//! wall time through `pump` and key/button events through the navigation and
//! input methods, then drains `GameEvent`s to update the page.
//!
//! At most one game loop and one phase timer are ever scheduled. Every path
//! that leaves `Active` cancels both before anything new is scheduled.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::{Actor, Arena};
use super::collision::Aabb;
use super::input::InputState;
use super::schedule::{Scheduler, Task, TaskHandle};
use super::sequencer::{Sequencer, Step};
use super::state::{GameEvent, GamePhase, Outcome, Screen};
use super::tick::step_frame;
use crate::consts::PHASE_TIMER_MS;
use crate::tuning::Tuning;

pub struct Session {
    tuning: Tuning,
    arena: Arena,
    rng: Pcg32,
    seed: u64,

    player: Actor,
    enemy: Actor,
    input: InputState,

    /// 1-based phase number
    phase: u32,
    /// Seconds left in the current phase
    time_left: u32,
    state: GamePhase,
    screen: Screen,
    sequencer: Sequencer,

    scheduler: Scheduler,
    frame_task: Option<TaskHandle>,
    timer_task: Option<TaskHandle>,
    sequence_task: Option<TaskHandle>,
    marker_task: Option<TaskHandle>,
    restart_task: Option<TaskHandle>,

    /// Game loop iterations run so far
    frames: u64,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(tuning: Tuning, arena: Arena, seed: u64) -> Self {
        let player = Actor::player(&tuning);
        let enemy = Actor::enemy(&tuning, 1, Vec2::ZERO);
        let time_left = tuning.phase_seconds;
        let sequencer = Sequencer::new(tuning.countdown_steps);
        Self {
            tuning,
            arena,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            player,
            enemy,
            input: InputState::new(),
            phase: 1,
            time_left,
            state: GamePhase::Idle,
            screen: Screen::Home,
            sequencer,
            scheduler: Scheduler::new(),
            frame_task: None,
            timer_task: None,
            sequence_task: None,
            marker_task: None,
            restart_task: None,
            frames: 0,
            events: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn enemy(&self) -> &Actor {
        &self.enemy
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn state(&self) -> GamePhase {
        self.state
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Whether the auto-restart after a loss is pending
    pub fn restart_pending(&self) -> bool {
        self.restart_task.is_some_and(|h| self.scheduler.is_active(h))
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Input ===

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    // === Clock ===

    /// Advance virtual time to `now` (ms), running every task that falls due
    pub fn pump(&mut self, now: f64) {
        while let Some(task) = self.scheduler.pop_due(now) {
            self.run_task(task);
        }
        self.scheduler.settle(now);
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Frame => self.on_frame(),
            Task::PhaseTimer => self.on_timer_tick(),
            Task::Sequence => {
                self.sequence_task = None;
                self.advance_sequence();
            }
            Task::ClearMarker => {
                self.marker_task = None;
                self.events.push(GameEvent::HideOverlay);
            }
            Task::Restart => {
                self.restart_task = None;
                log::info!("Restarting after loss");
                self.restart_game();
            }
        }
    }

    // === Navigation ===

    /// Play button: always begins at phase 1
    pub fn start_game(&mut self) {
        self.cancel_all();
        self.phase = 1;
        self.show_screen(Screen::Game);
        log::info!("Game started (seed {})", self.seed);
        self.start_phase();
    }

    /// Back button: stop everything and show the home view
    pub fn go_home(&mut self) {
        self.cancel_all();
        self.input.clear();
        self.state = GamePhase::Idle;
        self.events.push(GameEvent::HideOverlay);
        self.show_screen(Screen::Home);
        log::info!("Returned home");
    }

    /// Restart button (and the automatic restart after a loss)
    pub fn restart_game(&mut self) {
        self.start_game();
    }

    fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.events.push(GameEvent::ShowScreen(screen));
    }

    // === Phase controller ===

    /// Reset actors for the current phase and begin its dialogue
    pub fn start_phase(&mut self) {
        self.cancel_all();
        self.reset_actors();
        self.time_left = self.tuning.phase_seconds;
        self.events.push(GameEvent::TimeLeft(self.time_left));
        self.events.push(GameEvent::Redraw);

        self.sequencer = Sequencer::new(self.tuning.countdown_steps);
        log::info!(
            "Phase {} starting (enemy speed {})",
            self.phase,
            self.enemy.speed
        );
        self.enter_step(self.sequencer.current());
    }

    /// Timer ran out: next phase, or the win when this was the last one
    pub fn next_phase(&mut self) {
        if self.phase < self.tuning.phase_count() {
            self.phase += 1;
            self.start_phase();
        } else {
            self.end_game(Outcome::Won);
        }
    }

    fn reset_actors(&mut self) {
        self.player = Actor::player(&self.tuning);
        self.player.pos = self.arena.clamp(self.player.pos, self.player.size);
        let pos = self.spawn_enemy_position();
        self.enemy = Actor::enemy(&self.tuning, self.phase, pos);
    }

    /// Random spot inside the arena, re-rolled while it would overlap the player
    fn spawn_enemy_position(&mut self) -> Vec2 {
        let size = self.tuning.enemy_size;
        let max = self.arena.max_origin(size);
        let player_box = self.player.bounds();

        for _ in 0..self.tuning.spawn_attempts.max(1) {
            let pos = Vec2::new(
                self.rng.random_range(0.0..=max.x),
                self.rng.random_range(0.0..=max.y),
            );
            if !Aabb::square(pos, size).overlaps(&player_box) {
                return pos;
            }
        }

        // Farthest corner from the player
        let center = self.player.pos + Vec2::splat(self.player.size / 2.0);
        [
            Vec2::ZERO,
            Vec2::new(max.x, 0.0),
            Vec2::new(0.0, max.y),
            max,
        ]
        .into_iter()
        .max_by(|a, b| {
            let da = (*a + Vec2::splat(size / 2.0)).distance_squared(center);
            let db = (*b + Vec2::splat(size / 2.0)).distance_squared(center);
            da.total_cmp(&db)
        })
        .unwrap_or(Vec2::ZERO)
    }

    // === Sequencer ===

    fn advance_sequence(&mut self) {
        let step = self.sequencer.advance();
        self.enter_step(step);
    }

    fn enter_step(&mut self, step: Option<Step>) {
        match step {
            Some(Step::Dialogue) => {
                self.state = GamePhase::DialogueShowing;
                let line = self.tuning.dialogue(self.phase).to_string();
                self.events.push(GameEvent::ShowDialogue(line));
                self.sequence_task =
                    Some(self.scheduler.schedule_once(self.tuning.dialogue_ms, Task::Sequence));
            }
            Some(Step::Count(n)) => {
                self.state = GamePhase::CountingDown { remaining: n };
                self.events.push(GameEvent::ShowCountdown(n));
                self.sequence_task = Some(
                    self.scheduler
                        .schedule_once(self.tuning.countdown_step_ms, Task::Sequence),
                );
            }
            None => self.begin_play(),
        }
    }

    /// Countdown done: release the enemy and start both periodic tasks
    fn begin_play(&mut self) {
        self.stop_play();
        self.enemy.moving = true;
        self.state = GamePhase::Active;
        self.events.push(GameEvent::ShowGo);
        self.marker_task = Some(
            self.scheduler
                .schedule_once(self.tuning.go_marker_ms, Task::ClearMarker),
        );
        self.timer_task = Some(self.scheduler.schedule_every(PHASE_TIMER_MS, Task::PhaseTimer));
        self.frame_task = Some(
            self.scheduler
                .schedule_every(self.tuning.frame_period_ms(), Task::Frame),
        );
    }

    // === Periodic tasks ===

    fn on_frame(&mut self) {
        self.frames += 1;
        let out = step_frame(&mut self.player, &mut self.enemy, &self.input, &self.arena);
        self.events.push(GameEvent::Redraw);
        if out.caught {
            self.end_game(Outcome::Lost);
        }
    }

    fn on_timer_tick(&mut self) {
        self.time_left = self.time_left.saturating_sub(1);
        self.events.push(GameEvent::TimeLeft(self.time_left));
        if self.time_left == 0 {
            self.stop_play();
            log::info!("Phase {} survived", self.phase);
            self.next_phase();
        }
    }

    // === End of game ===

    fn end_game(&mut self, outcome: Outcome) {
        self.stop_play();
        self.cancel_intro();
        self.state = match outcome {
            Outcome::Won => GamePhase::Won,
            Outcome::Lost => GamePhase::Lost,
        };
        self.show_screen(Screen::Result);
        self.events.push(GameEvent::Outcome(outcome));
        log::info!("Game over at phase {}: {:?}", self.phase, outcome);

        if outcome == Outcome::Lost {
            self.cancel(Task::Restart);
            self.restart_task = Some(
                self.scheduler
                    .schedule_once(self.tuning.restart_delay_ms, Task::Restart),
            );
        }
    }

    // === Cancellation ===

    /// Cancel the game loop and phase timer together
    fn stop_play(&mut self) {
        self.cancel(Task::Frame);
        self.cancel(Task::PhaseTimer);
    }

    fn cancel_intro(&mut self) {
        self.cancel(Task::Sequence);
        self.cancel(Task::ClearMarker);
    }

    fn cancel_all(&mut self) {
        self.stop_play();
        self.cancel_intro();
        self.cancel(Task::Restart);
    }

    fn cancel(&mut self, task: Task) {
        let slot = match task {
            Task::Frame => &mut self.frame_task,
            Task::PhaseTimer => &mut self.timer_task,
            Task::Sequence => &mut self.sequence_task,
            Task::ClearMarker => &mut self.marker_task,
            Task::Restart => &mut self.restart_task,
        };
        if let Some(handle) = slot.take() {
            self.scheduler.cancel(handle);
        }
    }
}
