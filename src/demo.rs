//! Offline demo source.
//!
//! Plays the quiz without MPD: a fixed set of well-known tracks is
//! shuffled and "played" back to back, each one advancing after a set
//! number of polls. Useful for trying Encore out and for demoing the
//! detection loop end to end.

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::source::PlaybackSource;
use crate::track::TrackSnapshot;

/// How many polls a simulated track stays current before the next one
/// starts.
const DEFAULT_TICKS_PER_TRACK: u32 = 3;

/// The built-in demo catalogue. Five classics everyone has a shot at.
#[must_use]
pub fn demo_tracks() -> Vec<TrackSnapshot> {
    let catalogue = [
        ("queen/a_night_at_the_opera/bohemian_rhapsody.flac", "Bohemian Rhapsody", "Queen", "A Night at the Opera", "1975", 355),
        ("eagles/hotel_california/hotel_california.flac", "Hotel California", "Eagles", "Hotel California", "1976", 391),
        ("michael_jackson/thriller/billie_jean.flac", "Billie Jean", "Michael Jackson", "Thriller", "1982", 294),
        ("guns_n_roses/appetite_for_destruction/sweet_child_o_mine.flac", "Sweet Child O' Mine", "Guns N' Roses", "Appetite for Destruction", "1987", 356),
        ("nirvana/nevermind/smells_like_teen_spirit.flac", "Smells Like Teen Spirit", "Nirvana", "Nevermind", "1991", 301),
    ];

    catalogue
        .iter()
        .map(|&(id, title, artist, album, year, duration_secs)| TrackSnapshot {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            year: year.to_string(),
            duration_ms: duration_secs * 1000,
            playing: true,
            elapsed_ms: 15_000,
        })
        .collect()
}

/// Simulated playback over the demo catalogue.
///
/// Tracks come out in shuffled order; each stays "current" for
/// `ticks_per_track` polls, then the next begins. Once the catalogue is
/// exhausted the source reports nothing playing.
pub struct DemoSource {
    tracks: Vec<TrackSnapshot>,
    ticks_per_track: u32,
    tick: u32,
}

impl DemoSource {
    /// A demo source over the shuffled built-in catalogue.
    #[must_use]
    pub fn new() -> Self {
        let mut tracks = demo_tracks();
        tracks.shuffle(&mut thread_rng());
        Self::with_tracks(tracks)
    }

    /// A demo source over an explicit track list, in order. Tests use
    /// this for deterministic playback.
    #[must_use]
    pub fn with_tracks(tracks: Vec<TrackSnapshot>) -> Self {
        Self {
            tracks,
            ticks_per_track: DEFAULT_TICKS_PER_TRACK,
            tick: 0,
        }
    }

    /// Number of tracks this source can still play, counting the
    /// current one.
    #[must_use]
    pub fn remaining(&self) -> usize {
        let consumed = (self.tick / self.ticks_per_track) as usize;
        self.tracks.len().saturating_sub(consumed)
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSource for DemoSource {
    fn poll(&mut self) -> Option<TrackSnapshot> {
        let index = (self.tick / self.ticks_per_track) as usize;
        let snapshot = self.tracks.get(index).cloned();
        if snapshot.is_some() {
            self.tick += 1;
        }
        snapshot
    }
}
