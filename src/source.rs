//! The playback-source boundary.
//!
//! Everything that can tell Encore what is currently playing sits
//! behind this trait: the live MPD client, the offline demo source,
//! and the scripted sources the tests use.

use crate::track::TrackSnapshot;

/// A source of "currently playing" snapshots.
///
/// `poll` is a single bounded round trip. `None` means "nothing useful
/// right now" - nothing playing, a transient read failure, or a source
/// that has run out of material. Failures are never propagated through
/// this boundary; the detector treats every `None` as a missed tick and
/// keeps polling.
pub trait PlaybackSource {
    /// Read one snapshot of what is currently playing, if anything.
    fn poll(&mut self) -> Option<TrackSnapshot>;
}

impl<S: PlaybackSource + ?Sized> PlaybackSource for Box<S> {
    fn poll(&mut self) -> Option<TrackSnapshot> {
        (**self).poll()
    }
}
