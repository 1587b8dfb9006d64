//! # MPD Client Module
//!
//! Integration with Music Player Daemon (MPD) through the `mpc`
//! command-line client. This is the live [`PlaybackSource`]: each poll
//! runs `mpc status` with a custom format string and parses the output
//! into a [`TrackSnapshot`].
//!
//! ## Design Decision: mpc vs Direct Protocol
//!
//! This implementation uses the `mpc` command-line tool instead of
//! direct MPD protocol communication for several reasons:
//! - Simplicity: No need to implement MPD protocol parsing
//! - Reliability: mpc is well-tested and handles edge cases
//! - Compatibility: Works with any MPD version that mpc supports
//! - Error Handling: mpc provides clear error messages
//!
//! ## Example Output Parsing
//!
//! With `-f '%file%\t%title%\t%artist%\t%album%\t%date%'`:
//!
//! ```text
//! queen/night_at_the_opera/01.flac	Bohemian Rhapsody	Queen	A Night at the Opera	1975
//! [playing] #5/20   1:23/5:55 (23%)
//! volume: 80%   repeat: off   random: off   single: off   consume: off
//! ```
//!
//! The first line only appears when a song is loaded; stopped players
//! emit just the volume line.

use std::process::Command;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::source::PlaybackSource;
use crate::track::TrackSnapshot;

/// Format string handed to `mpc status -f`. Tab-separated so titles
/// containing commas or slashes survive parsing.
const STATUS_FORMAT: &str = "%file%\t%title%\t%artist%\t%album%\t%date%";

/// Pause after `mpc next` so MPD has settled before the next poll.
const SKIP_SETTLE: Duration = Duration::from_millis(1500);

/// Verifies MPD and mpc availability.
///
/// Tests connection to MPD by running `mpc version`. This ensures both
/// that mpc is installed and that MPD is running and accessible.
///
/// # Errors
///
/// Returns an error if:
/// - mpc command is not found
/// - MPD is not running
/// - Connection to MPD fails
pub fn check_connection() -> Result<()> {
    let output = Command::new("mpc")
        .env("MPD_TIMEOUT", "5")
        .arg("version")
        .output()
        .context("Failed to execute mpc command. Please install mpc (MPD client)")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "Failed to connect to MPD. Make sure MPD is running on localhost:6600.\nError: {}",
            stderr.trim()
        );
    }

    Ok(())
}

/// Skip MPD to the next track in its queue, then give it a moment to
/// settle so the following status poll sees the new song.
///
/// # Errors
///
/// Returns an error if mpc cannot be executed or MPD rejects the
/// command.
pub fn skip_to_next() -> Result<()> {
    debug!("Skipping to next track");
    let output = Command::new("mpc")
        .env("MPD_TIMEOUT", "5")
        .arg("next")
        .output()
        .context("Failed to skip to next track")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("Failed to skip to next track: {}", stderr.trim());
    }

    thread::sleep(SKIP_SETTLE);
    info!("Skipped to next track");
    Ok(())
}

/// Live playback source backed by a running MPD instance.
pub struct MpdSource;

impl MpdSource {
    /// Connect to MPD, verifying mpc is installed and MPD responds.
    ///
    /// # Errors
    ///
    /// Returns an error when mpc is missing or MPD is unreachable, so
    /// the quiz can refuse to start rather than time out round after
    /// round.
    pub fn connect() -> Result<Self> {
        check_connection()?;
        info!("Connected to MPD");
        Ok(Self)
    }

    fn fetch_status() -> Result<String> {
        let output = Command::new("mpc")
            .env("MPD_TIMEOUT", "5")
            .arg("status")
            .arg("-f")
            .arg(STATUS_FORMAT)
            .output()
            .context("Failed to get MPD status")?;

        if !output.status.success() {
            anyhow::bail!(
                "MPD status command failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl PlaybackSource for MpdSource {
    fn poll(&mut self) -> Option<TrackSnapshot> {
        match Self::fetch_status() {
            Ok(status_text) => parse_status(&status_text),
            Err(e) => {
                warn!("MPD poll failed: {e:#}");
                None
            }
        }
    }
}

/// Parse `mpc status` output into a snapshot.
///
/// Returns `None` when the player is stopped (no song line) or the
/// output cannot be understood.
fn parse_status(status_text: &str) -> Option<TrackSnapshot> {
    let mut lines = status_text.lines();

    // Song line is only present when a song is loaded. The status line
    // starts with the bracketed state, which a tab-separated song line
    // never does.
    let song_line = lines.next()?.trim_end();
    if song_line.is_empty() || song_line.starts_with('[') {
        return None;
    }

    let mut fields = song_line.split('\t');
    let id = fields.next()?.to_string();
    if id.is_empty() {
        return None;
    }
    let title = non_empty_or_unknown(fields.next());
    let artist = non_empty_or_unknown(fields.next());
    let album = non_empty_or_unknown(fields.next());
    // MPD dates may be full timestamps like "1975-11-21"; the year is
    // all the quiz shows as a hint.
    let year = fields
        .next()
        .map(str::trim)
        .and_then(|date| {
            let head = date.get(..4)?;
            head.chars()
                .all(|c| c.is_ascii_digit())
                .then(|| head.to_string())
        })
        .unwrap_or_else(|| "Unknown".to_string());

    let mut playing = false;
    let mut elapsed_ms = 0;
    let mut duration_ms = 0;

    // Status line format: [playing] #1/50   0:32/3:45 (13%)
    for line in lines {
        if line.contains("[playing]") {
            playing = true;
        }
        if let Some(time_part) = line.split_whitespace().find(|s| s.contains('/') && s.contains(':')) {
            let times: Vec<&str> = time_part.split('/').collect();
            if times.len() == 2 {
                if let Ok(elapsed_secs) = parse_time(times[0]) {
                    elapsed_ms = elapsed_secs * 1000;
                }
                if let Ok(duration_secs) = parse_time(times[1]) {
                    duration_ms = duration_secs * 1000;
                }
            }
        }
    }

    Some(TrackSnapshot {
        id,
        title,
        artist,
        album,
        year,
        duration_ms,
        playing,
        elapsed_ms,
    })
}

fn non_empty_or_unknown(field: Option<&str>) -> String {
    match field.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "Unknown".to_string(),
    }
}

/// Parse an MPD time string to whole seconds. Accepts `MM:SS` and
/// `HH:MM:SS` (mpc switches to the latter past an hour).
fn parse_time(time_str: &str) -> Result<u64> {
    let parts: Vec<&str> = time_str.split(':').collect();
    match parts.len() {
        2 => {
            let minutes: u64 = parts[0].parse()?;
            let seconds: u64 = parts[1].parse()?;
            Ok(minutes * 60 + seconds)
        }
        3 => {
            let hours: u64 = parts[0].parse()?;
            let minutes: u64 = parts[1].parse()?;
            let seconds: u64 = parts[2].parse()?;
            Ok(hours * 3600 + minutes * 60 + seconds)
        }
        _ => anyhow::bail!("Invalid time format: {}", time_str),
    }
}
