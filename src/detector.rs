//! Track-change detection.
//!
//! The detector polls a [`PlaybackSource`] on a fixed interval and
//! reports when a *genuinely new* track starts: one that differs from
//! whatever the previous poll saw, is not in the session's recent
//! history, and is actively playing. Pauses, missed polls, and the
//! same track spinning for minutes all keep the detector waiting.
//!
//! Detection is bounded by a timeout and can be cancelled from another
//! thread through a [`CancelToken`], so a quiz round never blocks the
//! rest of the program forever.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::source::PlaybackSource;
use crate::track::{RecentHistory, TrackSnapshot};

/// How often the live source is polled by default.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Granularity of the cancellable sleep between polls.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Outcome of one detection wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionResult {
    /// A new track started playing within the timeout.
    Detected(TrackSnapshot),
    /// The timeout elapsed, or the wait was cancelled, before any new
    /// track appeared.
    TimedOut,
}

/// Cooperative cancellation flag shared between the detector and
/// whoever wants to interrupt it.
///
/// Cloning the token clones the handle, not the flag; all clones
/// observe the same `cancel` call.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Sleep for `duration`, waking early if cancelled. Returns `false`
    /// when the sleep was cut short by cancellation.
    fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_cancelled() {
                return false;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return true;
            }
            thread::sleep(remaining.min(SLEEP_SLICE));
        }
    }
}

/// Polls a playback source until a new track starts.
pub struct ChangeDetector<S: PlaybackSource> {
    source: S,
    poll_interval: Duration,
    cancel: CancelToken,
}

impl<S: PlaybackSource> ChangeDetector<S> {
    /// Detector over `source` with the default two-second poll interval.
    pub fn new(source: S) -> Self {
        Self::with_poll_interval(source, POLL_INTERVAL)
    }

    /// Detector with a caller-chosen poll interval. Tests use this to
    /// poll at millisecond speed.
    pub fn with_poll_interval(source: S, poll_interval: Duration) -> Self {
        Self {
            source,
            poll_interval,
            cancel: CancelToken::new(),
        }
    }

    /// Token that interrupts any in-progress [`await_next_round`] call.
    ///
    /// [`await_next_round`]: Self::await_next_round
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Block until a genuinely new track starts playing, the timeout
    /// elapses, or the wait is cancelled.
    ///
    /// A poll counts as a new track only when all three hold: the id
    /// differs from the previous poll's id, the id is not in `history`,
    /// and the source reports the track as actively playing. A paused
    /// track never updates the "previous" id, so pause-then-resume of
    /// an unheard track still fires. `None` polls are skipped without
    /// resetting any state.
    pub fn await_next_round(
        &mut self,
        timeout: Duration,
        history: &RecentHistory,
    ) -> DetectionResult {
        let deadline = Instant::now() + timeout;
        let mut previous_id: Option<String> = None;

        loop {
            if self.cancel.is_cancelled() {
                debug!("detection cancelled");
                return DetectionResult::TimedOut;
            }

            if let Some(snapshot) = self.source.poll() {
                trace!("poll: {} (playing: {})", snapshot.id, snapshot.playing);
                if snapshot.playing {
                    let already_current =
                        previous_id.as_deref() == Some(snapshot.id.as_str());
                    if !already_current && !history.contains(&snapshot.id) {
                        debug!("new track detected: {}", snapshot.id);
                        return DetectionResult::Detected(snapshot);
                    }
                    previous_id = Some(snapshot.id);
                }
            }

            let now = Instant::now();
            if now >= deadline {
                debug!("detection timed out after {timeout:?}");
                return DetectionResult::TimedOut;
            }

            let pause = self
                .poll_interval
                .min(deadline.saturating_duration_since(now));
            if !self.cancel.sleep(pause) {
                debug!("detection cancelled while sleeping");
                return DetectionResult::TimedOut;
            }
        }
    }
}

/// Run one detection wait on a background thread.
///
/// Returns a token that cancels the wait and the receiving end of a
/// channel that carries the single [`DetectionResult`]. The history is
/// moved into the thread; the caller keeps its own copy current.
pub fn spawn_detection<S>(
    source: S,
    timeout: Duration,
    poll_interval: Duration,
    history: RecentHistory,
) -> (CancelToken, mpsc::Receiver<DetectionResult>)
where
    S: PlaybackSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let mut detector = ChangeDetector::with_poll_interval(source, poll_interval);
    let token = detector.cancel_token();

    thread::spawn(move || {
        let result = detector.await_next_round(timeout, &history);
        // The receiver may be gone if the caller stopped caring.
        let _ = tx.send(result);
    });

    (token, rx)
}
