//! Timer engine for the eye-rest countdown.
//!
//! This module provides the core timer functionality:
//! - State transitions (Idle → Running ⇄ Paused, Running → Expired → Running)
//! - Tick-driven countdown through an injected [`Scheduler`]
//! - Exactly-once expiry handling guarded per cycle
//! - Notification dispatch on expiry, plus the delayed follow-up

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use super::scheduler::{DeferredTask, Scheduler, TickId, TICK_PERIOD};
use crate::i18n::Locale;
use crate::notification::{NotificationDispatcher, NotificationRequest};
use crate::types::{DurationInput, TimerConfig, TimerPhase, TimerSnapshot, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TimerEvent {
    /// Countdown started
    Started {
        /// True when resuming from Paused
        resumed: bool,
    },
    /// Countdown paused
    Paused,
    /// Countdown reset to Idle
    Reset,
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// Countdown reached zero and the completion notification was dispatched
    Expired {
        /// Number of completed cycles, including this one
        cycle: u64,
        /// Rendered notification text
        message: String,
    },
    /// The "good to go" follow-up was dispatched
    FollowUpSent {
        /// Rendered notification text
        message: String,
    },
    /// A new cycle began after expiry
    Restarted {
        /// Remaining seconds at the start of the cycle
        remaining_seconds: u32,
    },
    /// Configured duration changed
    DurationChanged {
        /// New duration in seconds
        duration_seconds: u32,
    },
    /// Notification volume policy changed
    LoudChanged {
        /// New policy
        enabled: bool,
    },
    /// Language changed and the dispatcher was re-initialized
    LocaleChanged {
        /// New language
        locale: Locale,
        /// Permission state after re-initialization
        has_permission: bool,
    },
    /// The first permission request completed
    PermissionResolved {
        /// Whether notifications were granted
        granted: bool,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Countdown state machine.
///
/// The engine owns its dispatcher and scheduler. It never sleeps: ticks and
/// deferred tasks are delivered back through [`tick`](Self::tick) and
/// [`run_deferred`](Self::run_deferred).
pub struct TimerEngine<D, S> {
    state: TimerState,
    config: TimerConfig,
    dispatcher: D,
    scheduler: S,
    /// The only tick generation that may decrement the countdown
    active_tick: Option<TickId>,
    /// Set from expiry until the restart of the next cycle
    expiry_guard: bool,
    /// Incremented by every reset; stale restarts carry an older value
    epoch: u64,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl<D: NotificationDispatcher, S: Scheduler> TimerEngine<D, S> {
    /// Creates an idle engine.
    pub fn new(
        config: TimerConfig,
        dispatcher: D,
        scheduler: S,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            state: TimerState::new(&config),
            config,
            dispatcher,
            scheduler,
            active_tick: None,
            expiry_guard: false,
            epoch: 0,
            event_tx,
        }
    }

    /// Requests notification permission in the configured locale.
    pub async fn initialize(&mut self) -> bool {
        let granted = self.dispatcher.initialize(self.state.locale).await;
        self.state.has_permission = granted;
        info!(
            platform = %self.dispatcher.platform(),
            granted,
            "Notification permission resolved"
        );
        self.emit(TimerEvent::PermissionResolved { granted });
        granted
    }

    /// Starts or resumes the countdown.
    ///
    /// Returns false (and does nothing) while a cycle is already running.
    pub fn start(&mut self) -> bool {
        let resumed = match self.state.phase {
            TimerPhase::Idle => false,
            TimerPhase::Paused => true,
            TimerPhase::Running | TimerPhase::Expired => {
                trace!("start ignored: already running");
                return false;
            }
        };

        self.state.phase = TimerPhase::Running;
        self.arm_tick();
        debug!(remaining = self.state.remaining_seconds, resumed, "Timer started");
        self.emit(TimerEvent::Started { resumed });
        true
    }

    /// Pauses a running countdown, keeping the remaining time.
    pub fn pause(&mut self) -> bool {
        if self.state.phase != TimerPhase::Running {
            trace!(phase = %self.state.phase, "pause ignored");
            return false;
        }

        self.disarm_tick();
        self.state.phase = TimerPhase::Paused;
        debug!(remaining = self.state.remaining_seconds, "Timer paused");
        self.emit(TimerEvent::Paused);
        true
    }

    /// Pauses when running, starts otherwise.
    pub fn toggle(&mut self) -> bool {
        match self.state.phase {
            TimerPhase::Running => self.pause(),
            TimerPhase::Idle | TimerPhase::Paused => self.start(),
            TimerPhase::Expired => false,
        }
    }

    /// Returns to Idle with a full countdown, from any phase.
    ///
    /// Pending restarts scheduled by an earlier expiry become no-ops.
    pub fn reset(&mut self) {
        self.disarm_tick();
        self.expiry_guard = false;
        self.epoch += 1;
        self.state.refill();
        self.state.phase = TimerPhase::Idle;
        debug!(epoch = self.epoch, "Timer reset");
        self.emit(TimerEvent::Reset);
    }

    /// Changes the countdown length.
    ///
    /// Invalid input is ignored and returns false. Outside a running cycle
    /// the remaining time follows the new duration; while running it is
    /// only clamped so it never exceeds it.
    pub fn set_duration(&mut self, input: impl Into<DurationInput>) -> bool {
        let input = input.into();
        let Some(seconds) = input.to_seconds() else {
            debug!(?input, "Ignoring invalid duration");
            return false;
        };

        self.state.duration_seconds = seconds;
        self.config.duration_seconds = seconds;
        if self.state.is_running() {
            self.state.remaining_seconds = self.state.remaining_seconds.min(seconds);
        } else {
            self.state.remaining_seconds = seconds;
        }

        debug!(seconds, "Duration changed");
        self.emit(TimerEvent::DurationChanged {
            duration_seconds: seconds,
        });
        true
    }

    /// Sets the volume policy used by the next expiry.
    pub fn toggle_loud(&mut self, enabled: bool) {
        self.state.loud_notifications_enabled = enabled;
        self.config.loud_notifications = enabled;
        debug!(enabled, "Loud notifications toggled");
        self.emit(TimerEvent::LoudChanged { enabled });
    }

    /// Switches language and re-initializes the dispatcher.
    pub async fn set_locale(&mut self, locale: Locale) -> bool {
        self.state.locale = locale;
        self.config.locale = locale;
        let granted = self.dispatcher.initialize(locale).await;
        self.state.has_permission = granted;
        debug!(%locale, granted, "Locale changed");
        self.emit(TimerEvent::LocaleChanged {
            locale,
            has_permission: granted,
        });
        granted
    }

    /// Handles one tick from the scheduler.
    pub async fn tick(&mut self, id: TickId) {
        if self.active_tick != Some(id) {
            trace!(generation = id.generation(), "Stale tick ignored");
            return;
        }
        if self.state.phase != TimerPhase::Running || self.expiry_guard {
            trace!(phase = %self.state.phase, "Tick ignored");
            return;
        }

        let reached_zero = self.state.tick();
        self.emit(TimerEvent::Tick {
            remaining_seconds: self.state.remaining_seconds,
        });

        if reached_zero {
            self.expire().await;
        }
    }

    /// Handles a deferred task scheduled by an earlier expiry.
    pub async fn run_deferred(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::FollowUp { noisy, locale } => {
                let message = NotificationRequest::follow_up(noisy, locale).render();
                if noisy {
                    self.dispatcher.send_noisy_notification(&message, locale).await;
                } else {
                    self.dispatcher.send_after_notification(&message, locale).await;
                }
                debug!(noisy, "Follow-up dispatched");
                self.emit(TimerEvent::FollowUpSent { message });
            }
            DeferredTask::RestartCycle { epoch } => self.restart_cycle(epoch),
        }
    }

    fn restart_cycle(&mut self, epoch: u64) {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, "Stale restart ignored");
            return;
        }
        if !self.expiry_guard || self.state.phase != TimerPhase::Expired {
            trace!(phase = %self.state.phase, "Restart ignored");
            return;
        }

        self.expiry_guard = false;
        self.state.refill();
        self.state.phase = TimerPhase::Running;
        self.arm_tick();
        debug!(remaining = self.state.remaining_seconds, "Cycle restarted");
        self.emit(TimerEvent::Restarted {
            remaining_seconds: self.state.remaining_seconds,
        });
    }

    async fn expire(&mut self) {
        if self.expiry_guard {
            return;
        }
        self.expiry_guard = true;
        self.state.phase = TimerPhase::Expired;
        self.state.completed_cycles += 1;
        self.disarm_tick();

        let noisy = self.state.loud_notifications_enabled;
        let locale = self.state.locale;
        let request =
            NotificationRequest::cycle_completed(self.state.duration_seconds, noisy, locale);

        // Both one-shots are queued before dispatch so a slow backend
        // cannot delay the next cycle.
        self.scheduler
            .schedule(self.config.follow_up_delay, DeferredTask::FollowUp { noisy, locale });
        self.scheduler.schedule(
            self.config.restart_delay,
            DeferredTask::RestartCycle { epoch: self.epoch },
        );

        let message = request.render();
        if request.noisy {
            self.dispatcher.send_noisy_notification(&message, locale).await;
        } else {
            self.dispatcher.send_notification(&message, locale).await;
        }

        info!(cycle = self.state.completed_cycles, noisy, "Cycle completed");
        self.emit(TimerEvent::Expired {
            cycle: self.state.completed_cycles,
            message,
        });
    }

    fn arm_tick(&mut self) {
        self.active_tick = Some(self.scheduler.start_ticking(TICK_PERIOD));
    }

    fn disarm_tick(&mut self) {
        self.scheduler.stop_ticking();
        self.active_tick = None;
    }

    fn emit(&self, event: TimerEvent) {
        if let Err(e) = self.event_tx.send(event) {
            trace!("No event listener: {:?}", e.0);
        }
    }

    /// Returns a snapshot for presentation.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns the dispatcher.
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Returns the scheduler mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Returns the tick generation currently allowed to count down.
    pub fn active_tick(&self) -> Option<TickId> {
        self.active_tick
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::time::Duration;

    use super::*;
    use crate::engine::scheduler::ManualScheduler;
    use crate::notification::{
        MockNotificationBackend, MockPermission, NotificationKind, WebDispatcher,
    };

    type TestEngine = TimerEngine<WebDispatcher<Arc<MockNotificationBackend>>, ManualScheduler>;

    async fn create_engine(
        config: TimerConfig,
    ) -> (
        TestEngine,
        Arc<MockNotificationBackend>,
        mpsc::UnboundedReceiver<TimerEvent>,
    ) {
        let backend = Arc::new(MockNotificationBackend::new());
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = WebDispatcher::new(Arc::clone(&backend));
        let mut engine = TimerEngine::new(config, dispatcher, ManualScheduler::new(), tx);
        engine.initialize().await;
        (engine, backend, rx)
    }

    async fn advance(engine: &mut TestEngine, ticks: u32) {
        for _ in 0..ticks {
            let id = engine.active_tick().expect("tick armed");
            engine.tick(id).await;
        }
    }

    /// Runs the pending one-shots matching `pick`, in scheduling order.
    async fn fire(engine: &mut TestEngine, pick: impl Fn(&DeferredTask) -> bool) {
        let tasks = engine.scheduler_mut().take_scheduled();
        let mut keep = Vec::new();
        for (delay, task) in tasks {
            if pick(&task) {
                engine.run_deferred(task).await;
            } else {
                keep.push((delay, task));
            }
        }
        for (delay, task) in keep {
            engine.scheduler_mut().schedule(delay, task);
        }
    }

    fn is_restart(task: &DeferredTask) -> bool {
        matches!(task, DeferredTask::RestartCycle { .. })
    }

    fn is_follow_up(task: &DeferredTask) -> bool {
        matches!(task, DeferredTask::FollowUp { .. })
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    // ------------------------------------------------------------------------
    // Basic transitions
    // ------------------------------------------------------------------------

    mod transition_tests {
        use super::*;

        #[tokio::test]
        async fn test_new_engine_is_idle() {
            let (engine, _backend, _rx) = create_engine(TimerConfig::default()).await;
            let snapshot = engine.snapshot();

            assert_eq!(snapshot.phase, TimerPhase::Idle);
            assert_eq!(snapshot.remaining_seconds, 1200);
            assert!(!snapshot.is_running);
            assert!(snapshot.has_permission);
            assert!(engine.active_tick().is_none());
        }

        #[tokio::test]
        async fn test_initialize_reports_denied_permission() {
            let backend = Arc::new(MockNotificationBackend::new());
            backend.set_permission(MockPermission::Denied);
            let (tx, mut rx) = mpsc::unbounded_channel();
            let mut engine = TimerEngine::new(
                TimerConfig::default(),
                WebDispatcher::new(Arc::clone(&backend)),
                ManualScheduler::new(),
                tx,
            );

            assert!(!engine.initialize().await);
            assert!(!engine.snapshot().has_permission);
            assert_eq!(
                drain(&mut rx),
                vec![TimerEvent::PermissionResolved { granted: false }]
            );
        }

        #[tokio::test]
        async fn test_start_arms_single_tick() {
            let (mut engine, _backend, mut rx) = create_engine(TimerConfig::default()).await;
            drain(&mut rx);

            assert!(engine.start());
            assert!(!engine.start());

            assert_eq!(engine.state().phase, TimerPhase::Running);
            assert_eq!(engine.scheduler().arm_count(), 1);
            assert_eq!(engine.active_tick(), engine.scheduler().active());
            assert_eq!(drain(&mut rx), vec![TimerEvent::Started { resumed: false }]);
        }

        #[tokio::test]
        async fn test_pause_preserves_remaining_and_resume_continues() {
            let (mut engine, _backend, mut rx) =
                create_engine(TimerConfig::default().with_duration_seconds(60)).await;
            engine.start();
            advance(&mut engine, 7).await;

            assert!(engine.pause());
            assert_eq!(engine.state().phase, TimerPhase::Paused);
            assert_eq!(engine.state().remaining_seconds, 53);
            assert!(engine.scheduler().active().is_none());
            assert!(!engine.pause());

            drain(&mut rx);
            assert!(engine.start());
            assert_eq!(engine.state().remaining_seconds, 53);
            assert_eq!(drain(&mut rx), vec![TimerEvent::Started { resumed: true }]);

            advance(&mut engine, 3).await;
            assert_eq!(engine.state().remaining_seconds, 50);
        }

        #[tokio::test]
        async fn test_pause_is_noop_when_idle() {
            let (mut engine, _backend, _rx) = create_engine(TimerConfig::default()).await;
            assert!(!engine.pause());
            assert_eq!(engine.state().phase, TimerPhase::Idle);
        }

        #[tokio::test]
        async fn test_toggle() {
            let (mut engine, _backend, _rx) = create_engine(TimerConfig::default()).await;

            assert!(engine.toggle());
            assert_eq!(engine.state().phase, TimerPhase::Running);
            assert!(engine.toggle());
            assert_eq!(engine.state().phase, TimerPhase::Paused);
            assert!(engine.toggle());
            assert_eq!(engine.state().phase, TimerPhase::Running);
        }

        #[tokio::test]
        async fn test_reset_from_running_and_paused() {
            let (mut engine, _backend, _rx) =
                create_engine(TimerConfig::default().with_duration_seconds(30)).await;

            engine.start();
            advance(&mut engine, 4).await;
            engine.reset();
            assert_eq!(engine.state().phase, TimerPhase::Idle);
            assert_eq!(engine.state().remaining_seconds, 30);
            assert!(engine.active_tick().is_none());
            assert!(engine.scheduler().active().is_none());

            engine.start();
            advance(&mut engine, 2).await;
            engine.pause();
            engine.reset();
            assert_eq!(engine.state().phase, TimerPhase::Idle);
            assert_eq!(engine.state().remaining_seconds, 30);
        }

        #[tokio::test]
        async fn test_tick_from_cancelled_generation_is_ignored() {
            let (mut engine, _backend, _rx) =
                create_engine(TimerConfig::default().with_duration_seconds(10)).await;

            engine.start();
            let first = engine.active_tick().unwrap();
            engine.pause();
            engine.start();
            let second = engine.active_tick().unwrap();
            assert_ne!(first, second);

            engine.tick(first).await;
            assert_eq!(engine.state().remaining_seconds, 10);

            engine.tick(second).await;
            assert_eq!(engine.state().remaining_seconds, 9);
        }

        #[tokio::test]
        async fn test_tick_after_reset_does_not_decrement() {
            let (mut engine, _backend, _rx) =
                create_engine(TimerConfig::default().with_duration_seconds(10)).await;

            engine.start();
            let id = engine.active_tick().unwrap();
            engine.reset();

            for _ in 0..5 {
                engine.tick(id).await;
            }
            assert_eq!(engine.state().remaining_seconds, 10);
            assert_eq!(engine.state().phase, TimerPhase::Idle);
        }
    }

    // ------------------------------------------------------------------------
    // Duration and settings
    // ------------------------------------------------------------------------

    mod settings_tests {
        use super::*;

        #[tokio::test]
        async fn test_set_duration_then_reset() {
            let (mut engine, _backend, _rx) = create_engine(TimerConfig::default()).await;

            for d in [1u32, 5, 59, 60, 61, 1200, 86_400] {
                assert!(engine.set_duration(d));
                engine.reset();
                assert_eq!(engine.state().remaining_seconds, d);
                assert_eq!(engine.state().duration_seconds, d);
            }
        }

        #[tokio::test]
        async fn test_invalid_durations_are_noops() {
            let (mut engine, _backend, mut rx) = create_engine(TimerConfig::default()).await;
            engine.start();
            advance(&mut engine, 3).await;
            drain(&mut rx);
            let before = engine.snapshot();

            assert!(!engine.set_duration(0u32));
            assert!(!engine.set_duration(-5i64));
            assert!(!engine.set_duration("abc"));
            assert!(!engine.set_duration(""));

            assert_eq!(engine.snapshot(), before);
            assert!(drain(&mut rx).is_empty());
        }

        #[tokio::test]
        async fn test_set_duration_when_idle_updates_remaining() {
            let (mut engine, _backend, _rx) = create_engine(TimerConfig::default()).await;
            assert!(engine.set_duration("90s"));
            assert_eq!(engine.state().remaining_seconds, 90);
            assert_eq!(engine.config().duration_seconds, 90);
        }

        #[tokio::test]
        async fn test_set_duration_when_paused_updates_remaining() {
            let (mut engine, _backend, _rx) = create_engine(TimerConfig::default()).await;
            engine.start();
            advance(&mut engine, 10).await;
            engine.pause();

            assert!(engine.set_duration(300u32));
            assert_eq!(engine.state().remaining_seconds, 300);
        }

        #[tokio::test]
        async fn test_set_duration_while_running_keeps_remaining() {
            let (mut engine, _backend, _rx) = create_engine(TimerConfig::default()).await;
            engine.start();
            advance(&mut engine, 10).await;

            assert!(engine.set_duration(3000u32));
            assert_eq!(engine.state().remaining_seconds, 1190);
            assert_eq!(engine.state().duration_seconds, 3000);

            // Never above the new duration.
            assert!(engine.set_duration(100u32));
            assert_eq!(engine.state().remaining_seconds, 100);
        }

        #[tokio::test]
        async fn test_set_locale_reinitializes_dispatcher() {
            let (mut engine, backend, mut rx) = create_engine(TimerConfig::default()).await;
            drain(&mut rx);

            backend.set_permission(MockPermission::Error);
            assert!(!engine.set_locale(Locale::Zh).await);

            assert_eq!(engine.state().locale, Locale::Zh);
            assert_eq!(engine.dispatcher().locale(), Locale::Zh);
            assert!(!engine.snapshot().has_permission);
            assert_eq!(backend.permission_requests(), 2);
            assert_eq!(
                drain(&mut rx),
                vec![TimerEvent::LocaleChanged {
                    locale: Locale::Zh,
                    has_permission: false
                }]
            );
        }
    }

    // ------------------------------------------------------------------------
    // Expiry
    // ------------------------------------------------------------------------

    mod expiry_tests {
        use super::*;

        #[tokio::test]
        async fn test_expiry_dispatches_once_and_restarts() {
            let (mut engine, backend, mut rx) =
                create_engine(TimerConfig::default().with_duration_seconds(5)).await;
            engine.start();
            advance(&mut engine, 5).await;

            assert_eq!(backend.delivered_count(), 1);
            assert_eq!(engine.state().phase, TimerPhase::Expired);
            assert_eq!(engine.state().remaining_seconds, 0);
            assert!(engine.snapshot().is_running);
            assert!(engine.active_tick().is_none());

            let scheduled = engine.scheduler().scheduled().to_vec();
            assert_eq!(
                scheduled,
                vec![
                    (
                        Duration::from_secs(20),
                        DeferredTask::FollowUp {
                            noisy: false,
                            locale: Locale::En
                        }
                    ),
                    (Duration::from_secs(1), DeferredTask::RestartCycle { epoch: 0 }),
                ]
            );

            fire(&mut engine, is_restart).await;
            assert_eq!(engine.state().phase, TimerPhase::Running);
            assert_eq!(engine.state().remaining_seconds, 5);
            assert_eq!(backend.delivered_count(), 1);

            let events = drain(&mut rx);
            assert!(events.contains(&TimerEvent::Expired {
                cycle: 1,
                message: "0 minutes 5 seconds completed".to_string()
            }));
            assert_eq!(
                events.last(),
                Some(&TimerEvent::Restarted {
                    remaining_seconds: 5
                })
            );
        }

        #[tokio::test]
        async fn test_start_and_pause_are_noops_while_expired() {
            let (mut engine, _backend, _rx) =
                create_engine(TimerConfig::default().with_duration_seconds(2)).await;
            engine.start();
            advance(&mut engine, 2).await;

            assert!(!engine.start());
            assert!(!engine.pause());
            assert!(!engine.toggle());
            assert_eq!(engine.state().phase, TimerPhase::Expired);
            assert_eq!(engine.scheduler().arm_count(), 1);
        }

        #[tokio::test]
        async fn test_twenty_minute_scenario() {
            let (mut engine, backend, _rx) = create_engine(TimerConfig::default()).await;
            engine.start();
            advance(&mut engine, 1200).await;

            let delivered = backend.delivered();
            assert_eq!(delivered.len(), 1);
            assert_eq!(delivered[0].body, "20 minutes 0 seconds completed");
            assert_eq!(delivered[0].kind, NotificationKind::Standard);

            fire(&mut engine, is_restart).await;
            assert_eq!(engine.state().remaining_seconds, 1200);

            fire(&mut engine, is_follow_up).await;
            let delivered = backend.delivered();
            assert_eq!(delivered.len(), 2);
            assert_eq!(delivered[1].body, "You're good to go!");
            assert_eq!(delivered[1].kind, NotificationKind::FollowUp);
        }

        #[tokio::test]
        async fn test_loud_selects_noisy_dispatch() {
            let (mut engine, backend, _rx) =
                create_engine(TimerConfig::default().with_duration_seconds(3)).await;
            engine.toggle_loud(true);
            engine.start();
            advance(&mut engine, 3).await;

            fire(&mut engine, |_| true).await;
            let kinds: Vec<_> = backend.delivered().iter().map(|n| n.kind).collect();
            assert_eq!(kinds, vec![NotificationKind::Noisy, NotificationKind::Noisy]);
        }

        #[tokio::test]
        async fn test_toggle_after_dispatch_does_not_change_cycle() {
            let (mut engine, backend, _rx) =
                create_engine(TimerConfig::default().with_duration_seconds(3)).await;
            engine.start();
            advance(&mut engine, 3).await;

            // The follow-up was captured quiet at expiry.
            engine.toggle_loud(true);
            fire(&mut engine, |_| true).await;

            let kinds: Vec<_> = backend.delivered().iter().map(|n| n.kind).collect();
            assert_eq!(
                kinds,
                vec![NotificationKind::Standard, NotificationKind::FollowUp]
            );

            // The next cycle picks the new policy up.
            advance(&mut engine, 3).await;
            assert_eq!(backend.delivered()[2].kind, NotificationKind::Noisy);
        }

        #[tokio::test]
        async fn test_reset_while_expired_blocks_stale_restart() {
            let (mut engine, backend, _rx) =
                create_engine(TimerConfig::default().with_duration_seconds(4)).await;
            engine.start();
            advance(&mut engine, 4).await;
            assert_eq!(engine.state().phase, TimerPhase::Expired);

            engine.reset();
            fire(&mut engine, is_restart).await;

            assert_eq!(engine.state().phase, TimerPhase::Idle);
            assert_eq!(engine.state().remaining_seconds, 4);
            assert!(engine.active_tick().is_none());
            assert_eq!(engine.scheduler().arm_count(), 1);

            // The follow-up still goes out; it does not touch state.
            fire(&mut engine, is_follow_up).await;
            assert_eq!(backend.delivered_count(), 2);
            assert_eq!(engine.state().phase, TimerPhase::Idle);
        }

        #[tokio::test]
        async fn test_stale_restart_after_reset_and_restart() {
            let (mut engine, _backend, _rx) =
                create_engine(TimerConfig::default().with_duration_seconds(4)).await;
            engine.start();
            advance(&mut engine, 4).await;
            let stale = engine.scheduler_mut().take_scheduled();

            engine.reset();
            engine.start();
            advance(&mut engine, 1).await;

            for (_, task) in stale.into_iter().filter(|(_, t)| is_restart(t)) {
                engine.run_deferred(task).await;
            }
            assert_eq!(engine.state().phase, TimerPhase::Running);
            assert_eq!(engine.state().remaining_seconds, 3);
        }

        #[tokio::test]
        async fn test_dispatch_failure_still_restarts() {
            let (mut engine, backend, _rx) =
                create_engine(TimerConfig::default().with_duration_seconds(2)).await;
            backend.set_should_fail(true);
            engine.start();
            advance(&mut engine, 2).await;

            assert_eq!(backend.delivered_count(), 0);
            fire(&mut engine, is_restart).await;
            assert_eq!(engine.state().phase, TimerPhase::Running);
            assert_eq!(engine.state().remaining_seconds, 2);
            assert_eq!(engine.state().completed_cycles, 1);
        }

        #[tokio::test]
        async fn test_denied_permission_still_counts_down() {
            let backend = Arc::new(MockNotificationBackend::new());
            backend.set_permission(MockPermission::Denied);
            let (tx, _rx) = mpsc::unbounded_channel();
            let mut engine = TimerEngine::new(
                TimerConfig::default().with_duration_seconds(2),
                WebDispatcher::new(Arc::clone(&backend)),
                ManualScheduler::new(),
                tx,
            );
            engine.initialize().await;

            engine.start();
            advance(&mut engine, 2).await;
            fire(&mut engine, is_restart).await;

            assert_eq!(backend.delivered_count(), 0);
            assert_eq!(engine.state().completed_cycles, 1);
            assert_eq!(engine.state().remaining_seconds, 2);
        }

        #[tokio::test]
        async fn test_expiry_message_uses_locale() {
            let (mut engine, backend, _rx) = create_engine(
                TimerConfig::default()
                    .with_duration_seconds(90)
                    .with_locale(Locale::Es),
            )
            .await;
            engine.start();
            advance(&mut engine, 90).await;

            let delivered = backend.delivered();
            assert_eq!(delivered[0].body, "1 minutos 30 segundos completado");
        }

        #[tokio::test]
        async fn test_events_work_without_listener() {
            let (mut engine, _backend, rx) =
                create_engine(TimerConfig::default().with_duration_seconds(1)).await;
            drop(rx);

            engine.start();
            advance(&mut engine, 1).await;
            fire(&mut engine, is_restart).await;
            assert_eq!(engine.state().phase, TimerPhase::Running);
        }
    }
}
