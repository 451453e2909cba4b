//! The six gremlin timers and their fire handlers.
//!
//! Timers are plain countdowns advanced by the frame clock. They never call
//! into the state machine themselves: [`TimerManager::advance`] returns the
//! kinds that fired, [`tick_gremlin_timers`](crate::systems::timers::tick_gremlin_timers)
//! turns them into [`TimerFired`](crate::events::timer::TimerFired) messages,
//! and [`handle_timer_fired`](crate::systems::timers::handle_timer_fired)
//! dispatches each one back here.
//!
//! | timer           | period                     | repeats |
//! |-----------------|----------------------------|---------|
//! | `Master`        | `1000 / frame_rate` ms     | yes     |
//! | `Idle`          | `idle_minutes`             | yes     |
//! | `Sleep`         | `sleep_minutes`            | yes     |
//! | `WalkIdle`      | 2000 ms                    | no      |
//! | `Emote`         | random in the emote bounds | no      |
//! | `EmoteDuration` | `emote_duration` ms        | no      |

use std::time::Duration;

use bevy_ecs::prelude::Resource;
use log::{debug, trace};

use crate::resources::gremlinstate::GremlinState;
use crate::resources::registry::ResourceRegistry;
use crate::resources::statemanager::{StateChange, StateManager};

/// How long the gremlin stands still after walking before settling.
pub const WALK_IDLE_TIMEOUT: Duration = Duration::from_millis(2000);
/// Shortest allowed wait before a random emote.
pub const MIN_EMOTE_WAIT_MS: i64 = 10_000;
/// Repeated fires of one timer reported per advance; the rest are dropped.
const MAX_CATCH_UP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Master,
    Idle,
    Sleep,
    WalkIdle,
    Emote,
    EmoteDuration,
}

/// A countdown that is either repeating or single-shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    period: Duration,
    elapsed: Duration,
    repeating: bool,
    active: bool,
}

impl Countdown {
    pub fn repeating() -> Self {
        Self {
            period: Duration::ZERO,
            elapsed: Duration::ZERO,
            repeating: true,
            active: false,
        }
    }

    pub fn single_shot() -> Self {
        Self {
            repeating: false,
            ..Self::repeating()
        }
    }

    /// (Re)start with a fresh period, discarding any elapsed time.
    pub fn start(&mut self, period: Duration) {
        self.period = period;
        self.elapsed = Duration::ZERO;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left before the next fire, `None` when stopped.
    pub fn remaining(&self) -> Option<Duration> {
        self.active.then(|| self.period.saturating_sub(self.elapsed))
    }

    /// Advance by `dt` and return how many times the countdown fired.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        if !self.active {
            return 0;
        }
        self.elapsed += dt;

        let mut fired = 0;
        while self.elapsed >= self.period {
            fired += 1;
            if !self.repeating {
                self.stop();
                break;
            }
            if self.period.is_zero() || fired == MAX_CATCH_UP {
                self.elapsed = Duration::ZERO;
                break;
            }
            self.elapsed -= self.period;
        }
        fired
    }
}

/// Timer periods taken from the preferences and the character's emote config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSettings {
    pub frame_rate: u32,
    pub idle: Duration,
    pub sleep: Duration,
    pub emote_min_minutes: i64,
    pub emote_max_minutes: i64,
    pub emote_duration: Duration,
    /// Random emotes enabled at all.
    pub annoy_emote: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            idle: Duration::from_secs(5 * 60),
            sleep: Duration::from_secs(5 * 60),
            emote_min_minutes: 5,
            emote_max_minutes: 15,
            emote_duration: Duration::from_millis(3600),
            annoy_emote: true,
        }
    }
}

impl TimerSettings {
    pub fn master_period(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.frame_rate.max(1)))
    }

    /// Emote wait bounds in milliseconds, `(min, max)` with
    /// `MIN_EMOTE_WAIT_MS <= min <= max`.
    pub fn emote_bounds_ms(&self) -> (u64, u64) {
        let min_ms = self
            .emote_min_minutes
            .saturating_mul(60_000)
            .max(MIN_EMOTE_WAIT_MS);
        let max_ms = self.emote_max_minutes.saturating_mul(60_000).max(min_ms);
        (min_ms as u64, max_ms as u64)
    }
}

#[derive(Resource, Debug)]
pub struct TimerManager {
    settings: TimerSettings,
    master: Countdown,
    idle: Countdown,
    sleep: Countdown,
    walk_idle: Countdown,
    emote: Countdown,
    emote_duration: Countdown,
    rng: fastrand::Rng,
}

impl TimerManager {
    pub fn new(settings: TimerSettings, rng: fastrand::Rng) -> Self {
        Self {
            settings,
            master: Countdown::repeating(),
            idle: Countdown::repeating(),
            sleep: Countdown::repeating(),
            walk_idle: Countdown::single_shot(),
            emote: Countdown::single_shot(),
            emote_duration: Countdown::single_shot(),
            rng,
        }
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn countdown(&self, kind: TimerKind) -> &Countdown {
        match kind {
            TimerKind::Master => &self.master,
            TimerKind::Idle => &self.idle,
            TimerKind::Sleep => &self.sleep,
            TimerKind::WalkIdle => &self.walk_idle,
            TimerKind::Emote => &self.emote,
            TimerKind::EmoteDuration => &self.emote_duration,
        }
    }

    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.countdown(kind).is_active()
    }

    /// Start the animation clock and the passive timers.
    pub fn start_passive_timers(&mut self) {
        self.master.start(self.settings.master_period());
        self.reset_passive_timers();
    }

    /// Restart the idle and emote timers after user interaction.
    pub fn reset_passive_timers(&mut self) {
        self.reset_idle_timer();
        self.reset_emote_timer();
    }

    pub fn reset_idle_timer(&mut self) {
        self.idle.start(self.settings.idle);
    }

    pub fn reset_sleep_timer(&mut self) {
        self.sleep.start(self.settings.sleep);
    }

    pub fn reset_walk_idle_timer(&mut self) {
        self.walk_idle.start(WALK_IDLE_TIMEOUT);
    }

    /// Schedule the next random emote, or keep it off when random emotes are
    /// disabled.
    pub fn reset_emote_timer(&mut self) {
        if !self.settings.annoy_emote {
            self.emote.stop();
            return;
        }
        let (min_ms, max_ms) = self.settings.emote_bounds_ms();
        let wait = self.rng.u64(min_ms..=max_ms);
        trace!("next emote in {} ms", wait);
        self.emote.start(Duration::from_millis(wait));
    }

    pub fn reset_emote_duration_timer(&mut self) {
        self.emote_duration.start(self.settings.emote_duration);
    }

    /// Stop every timer. Used when the gremlin starts its outro.
    pub fn stop_all(&mut self) {
        self.idle.stop();
        self.sleep.stop();
        self.walk_idle.stop();
        self.emote.stop();
        self.emote_duration.stop();
    }

    /// Advance every timer by `dt` and list what fired, master first.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        for (kind, countdown) in [
            (TimerKind::Master, &mut self.master),
            (TimerKind::Idle, &mut self.idle),
            (TimerKind::Sleep, &mut self.sleep),
            (TimerKind::WalkIdle, &mut self.walk_idle),
            (TimerKind::Emote, &mut self.emote),
            (TimerKind::EmoteDuration, &mut self.emote_duration),
        ] {
            for _ in 0..countdown.tick(dt) {
                fired.push(kind);
            }
        }
        fired
    }

    /// Run the handler of a fired timer.
    ///
    /// `Master` is handled by the animation tick, not here.
    pub fn on_fired(
        &mut self,
        kind: TimerKind,
        states: &mut StateManager,
        registry: &mut ResourceRegistry,
    ) {
        let current = states.current_state();
        trace!("{:?} timer fired in {:?}", kind, current);

        match kind {
            TimerKind::Master => {}
            TimerKind::Idle => {
                if current == GremlinState::Idle {
                    states.enter(registry, GremlinState::Sleep);
                    self.reset_sleep_timer();
                }
            }
            TimerKind::Sleep => {
                if current == GremlinState::Sleep {
                    states.enter(registry, GremlinState::Idle);
                    self.reset_idle_timer();
                }
            }
            TimerKind::WalkIdle => {
                if current == GremlinState::WalkIdle {
                    states.to_idle_or_hover(registry);
                }
            }
            TimerKind::Emote => {
                if current.is_idle_family() {
                    states.enter(registry, GremlinState::Emote);
                    self.reset_emote_duration_timer();
                } else {
                    debug!("emote postponed, gremlin busy in {:?}", current);
                    self.reset_emote_timer();
                }
            }
            TimerKind::EmoteDuration => {
                if current == GremlinState::Emote {
                    states.to_idle_or_hover(registry);
                    self.reset_passive_timers();
                }
            }
        }

        self.follow_state_changes(states);
    }

    /// Start and stop the timers owned by states that were just entered or
    /// left.
    pub fn follow_state_changes(&mut self, states: &mut StateManager) {
        for StateChange { from, to } in states.drain_changes() {
            match from {
                GremlinState::WalkIdle => self.walk_idle.stop(),
                GremlinState::Emote => self.emote_duration.stop(),
                _ => {}
            }
            match to {
                GremlinState::WalkIdle => self.reset_walk_idle_timer(),
                GremlinState::Emote if !self.emote_duration.is_active() => {
                    self.reset_emote_duration_timer()
                }
                _ => {}
            }
        }
    }
}
