//! Track snapshot and recent-history types shared by the detector and
//! the session orchestrator.
//!
//! A [`TrackSnapshot`] is one point-in-time read of what the playback
//! source reports as currently playing. Snapshots are plain values:
//! every poll produces a fresh one, and nothing mutates a snapshot
//! after it is built.

use std::collections::VecDeque;

/// A single point-in-time read of the currently playing track.
///
/// The `id` is an opaque identifier that is unique per track but
/// otherwise carries no meaning - for the MPD source it is the file
/// path, exactly as MPD reports it. Two snapshots describe the same
/// track iff their ids are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSnapshot {
    /// Opaque per-track identifier (MPD file path for the live source)
    pub id: String,
    /// Track title
    pub title: String,
    /// Artist credit, exactly as the source reports it
    pub artist: String,
    /// Album name
    pub album: String,
    /// Release year as reported by the source, "Unknown" when missing
    pub year: String,
    /// Total track duration in milliseconds
    pub duration_ms: u64,
    /// Whether the source reports the track as actively playing
    pub playing: bool,
    /// Elapsed playback position in milliseconds
    pub elapsed_ms: u64,
}

impl TrackSnapshot {
    /// Duration formatted as M:SS, the way players display it.
    #[must_use]
    pub fn duration_display(&self) -> String {
        format_ms(self.duration_ms)
    }

    /// Elapsed position formatted as M:SS.
    #[must_use]
    pub fn elapsed_display(&self) -> String {
        format_ms(self.elapsed_ms)
    }
}

fn format_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Bounded, insertion-ordered window of recently used track ids.
///
/// The session pushes the id of every track it builds a round from, so
/// the detector can refuse to re-ask about a track the player just
/// heard. The window holds the last `window` ids; the oldest is evicted
/// first, and no id appears twice while it is still inside the window.
/// The history is only ever used for membership tests.
#[derive(Debug, Clone)]
pub struct RecentHistory {
    window: usize,
    ids: VecDeque<String>,
}

impl RecentHistory {
    /// Default window size: the last five tracks of the session.
    pub const DEFAULT_WINDOW: usize = 5;

    /// Create a history that remembers the last `window` track ids.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            ids: VecDeque::with_capacity(window.max(1)),
        }
    }

    /// Whether `id` is still inside the window.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|seen| seen == id)
    }

    /// Record `id` as used, evicting the oldest entry when the window
    /// is full. Re-pushing an id that is still in the window refreshes
    /// its position instead of duplicating it.
    pub fn push(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|seen| seen == id) {
            self.ids.remove(pos);
        }
        self.ids.push_back(id.to_string());
        while self.ids.len() > self.window {
            self.ids.pop_front();
        }
    }

    /// Number of ids currently inside the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the window is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: &str) -> TrackSnapshot {
        TrackSnapshot {
            id: id.to_string(),
            title: "Test Song".to_string(),
            artist: "Test Artist".to_string(),
            album: "Test Album".to_string(),
            year: "1999".to_string(),
            duration_ms: 225_000,
            playing: true,
            elapsed_ms: 83_000,
        }
    }

    #[test]
    fn test_duration_display() {
        let track = snapshot("a");
        assert_eq!(track.duration_display(), "3:45");
        assert_eq!(track.elapsed_display(), "1:23");
    }

    #[test]
    fn test_duration_display_pads_seconds() {
        let mut track = snapshot("a");
        track.duration_ms = 61_000;
        assert_eq!(track.duration_display(), "1:01");
    }

    #[test]
    fn test_history_membership() {
        let mut history = RecentHistory::default();
        assert!(!history.contains("a"));

        history.push("a");
        assert!(history.contains("a"));
        assert!(!history.contains("b"));
    }

    #[test]
    fn test_history_evicts_oldest_first() {
        let mut history = RecentHistory::new(3);
        history.push("a");
        history.push("b");
        history.push("c");
        history.push("d");

        assert!(!history.contains("a"), "oldest entry should be evicted");
        assert!(history.contains("b"));
        assert!(history.contains("c"));
        assert!(history.contains("d"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_history_never_duplicates() {
        let mut history = RecentHistory::new(3);
        history.push("a");
        history.push("b");
        history.push("a");

        assert_eq!(history.len(), 2);

        // "a" was refreshed, so "b" is now the oldest
        history.push("c");
        history.push("d");
        assert!(!history.contains("b"));
        assert!(history.contains("a"));
    }

    #[test]
    fn test_history_window_of_one() {
        let mut history = RecentHistory::new(0); // clamped to 1
        history.push("a");
        history.push("b");
        assert!(!history.contains("a"));
        assert!(history.contains("b"));
        assert_eq!(history.len(), 1);
    }
}
