//! Name-that-tune quiz driven by real playback.
//!
//! Encore watches a playback source (MPD by default), opens a quiz
//! round each time a genuinely new track starts, and grades free-text
//! title/artist guesses with a fuzzy similarity ratio.
//!
//! Core modules:
//! - [`detector`] - Track-change detection over a polled source
//! - [`similarity`] - Matching-block similarity ratio
//! - [`scoring`] - Pure guess grading with pluggable point profiles
//! - [`session`] - Quiz state machine and final standings
//! - [`mpd_client`] - MPD integration via the mpc command-line tool
//!
//! ### Supporting Modules
//!
//! - [`track`] - Track snapshots and the recent-track history window
//! - [`source`] - The playback-source trait the detector polls
//! - [`demo`] - Offline simulated playback for MPD-less sessions
//! - [`config`] - Configuration file loading
//! - [`console`] - Terminal prompts and result rendering
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`error`] - Recoverable error taxonomy
//!
//! ## Quick Start Example
//!
//! ```
//! use encore::scoring::{score, ScoringProfile};
//! use encore::session::{QuizSession, SessionState};
//! use encore::track::TrackSnapshot;
//!
//! let mut session = QuizSession::new(1, ScoringProfile::standard());
//! session.begin()?;
//!
//! // Normally the detector hands this over; here we fake it.
//! let track = TrackSnapshot {
//!     id: "queen/opera/01.flac".to_string(),
//!     title: "Bohemian Rhapsody".to_string(),
//!     artist: "Queen".to_string(),
//!     album: "A Night at the Opera".to_string(),
//!     year: "1975".to_string(),
//!     duration_ms: 355_000,
//!     playing: true,
//!     elapsed_ms: 15_000,
//! };
//! session.open_round(track)?;
//!
//! let breakdown = session.submit_guess(1, "bohemian rhapsody", "queen")?;
//! assert_eq!(breakdown.total_points, 100);
//! assert_eq!(session.state(), SessionState::SessionComplete);
//! # Ok::<(), encore::error::QuizError>(())
//! ```
//!
//! ## Detection Rule
//!
//! A poll counts as a new track only when the snapshot is actively
//! playing, its id differs from the previous poll's id, and the id is
//! not in the session's recent history (last five rounds). Pausing and
//! resuming the same song never re-triggers a round; replaying a song
//! from two rounds ago doesn't either.
//!
//! ## Scoring
//!
//! Guesses are trimmed and lowercased, then compared with a
//! matching-block similarity ratio in `[0, 100]`. The ratio maps
//! through fixed bands (>= 90 perfect, >= 70 close, >= 50 partial) to
//! points; the title and artist fields carry different weights
//! depending on the chosen [`scoring::ScoringProfile`]. A perfect
//! round is always worth 100 points.
//!
//! ## Error Handling
//!
//! Player-facing conditions (blank guesses) and caller bugs (calling
//! session methods in the wrong state) surface as
//! [`error::QuizError`]; everything at the application edge uses
//! `anyhow::Result` with context.

pub mod cli;
pub mod config;
pub mod console;
pub mod demo;
pub mod detector;
pub mod error;
pub mod mpd_client;
pub mod scoring;
pub mod session;
pub mod similarity;
pub mod source;
pub mod track;
