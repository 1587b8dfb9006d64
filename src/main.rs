//! # Encore - Name That Tune
//!
//! Encore turns whatever you're playing into a quiz: each time a new
//! track starts, a round opens and you guess its title and artist.
//! Guesses are graded fuzzily, so close spelling still earns points.
//!
//! ## Usage
//!
//! ```bash
//! # Quiz against your live MPD playback
//! encore live --rounds 5
//!
//! # Try it offline, no MPD needed
//! encore demo
//!
//! # See how the grading treats near-miss guesses
//! encore examples
//! ```

use std::time::Duration;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::info;

use encore::cli;
use encore::config::QuizConfig;
use encore::console;
use encore::demo::DemoSource;
use encore::detector::{ChangeDetector, DetectionResult};
use encore::error::QuizError;
use encore::mpd_client::{self, MpdSource};
use encore::scoring::{score, ProfileName};
use encore::session::{QuizSession, SessionState, TimeoutPolicy};
use encore::source::PlaybackSource;

/// Main entry point for the Encore application.
///
/// Initializes logging, parses command-line arguments, and routes
/// commands to the appropriate functionality. All operations return
/// Results for consistent error handling throughout the application.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug encore live` - Enable debug logging
/// - `RUST_LOG=encore::detector=trace encore live` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Live {
            rounds,
            timeout,
            profile,
            abort_on_timeout,
        } => {
            let mut config = QuizConfig::load()?;
            if let Some(rounds) = rounds {
                config.rounds = rounds;
            }
            if let Some(timeout) = timeout {
                config.round_timeout_secs = timeout;
            }
            if let Some(profile) = profile {
                config.profile = profile;
            }
            if abort_on_timeout {
                config.on_timeout = TimeoutPolicy::Abort;
            }

            info!("Starting live quiz: {} rounds", config.rounds);
            let source = MpdSource::connect()?;
            run_quiz(source, &config)?;
        }
        cli::Command::Demo { rounds } => {
            let mut config = QuizConfig::load()?;
            // The demo catalogue is finite, so cap the session to it and
            // poll fast; there is no real player to wait for.
            config.rounds = rounds.clamp(1, 5);
            config.round_timeout_secs = 10;
            config.poll_interval_secs = 0;

            info!("Starting demo quiz: {} rounds", config.rounds);
            run_quiz(DemoSource::new(), &config)?;
        }
        cli::Command::Examples => {
            show_scoring_examples();
        }
        cli::Command::Status => {
            let mut source = MpdSource::connect()?;
            match source.poll() {
                Some(track) if track.playing => {
                    println!("▶ {} - {}", track.title, track.artist);
                    println!(
                        "  {} ({}) | {}/{}",
                        track.album,
                        track.year,
                        track.elapsed_display(),
                        track.duration_display()
                    );
                }
                Some(track) => {
                    println!("⏸ {} - {} (paused)", track.title, track.artist);
                }
                None => println!("Nothing playing"),
            }
        }
        cli::Command::Skip => {
            mpd_client::skip_to_next()?;
            println!("Skipped to next track");
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            clap_complete::generate(shell, &mut cmd, "encore", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Run a full interactive quiz session over any playback source.
///
/// This is the outer loop the library deliberately leaves to the
/// binary: wait for a track, prompt, grade, repeat; then summarize.
fn run_quiz<S: PlaybackSource>(source: S, config: &QuizConfig) -> Result<()> {
    let poll_interval = Duration::from_secs(config.poll_interval_secs).max(Duration::from_millis(200));
    let timeout = Duration::from_secs(config.round_timeout_secs);

    let mut detector = ChangeDetector::with_poll_interval(source, poll_interval);
    let mut session = QuizSession::new(config.rounds, config.profile.profile());
    session.begin()?;

    console::show_welcome(session.target_rounds());

    while session.state() == SessionState::AwaitingTrack {
        let round_number = session.rounds().len() as u32 + 1;
        console::show_waiting(round_number, session.target_rounds());

        let track = match detector.await_next_round(timeout, session.history()) {
            DetectionResult::Detected(track) => track,
            DetectionResult::TimedOut => match config.on_timeout {
                TimeoutPolicy::Retry => {
                    console::show_timeout(true);
                    continue;
                }
                TimeoutPolicy::Abort => {
                    console::show_timeout(false);
                    session.abandon();
                    break;
                }
            },
        };

        console::show_hints(&track);
        session.open_round(track.clone())?;

        // A blank title or artist keeps the round open; a complete
        // guess is graded.
        let breakdown = loop {
            let guess = console::prompt_guess()?;
            match session.submit_guess(round_number, &guess.title, &guess.artist) {
                Ok(breakdown) => break breakdown,
                Err(QuizError::InvalidGuess { reason }) => {
                    println!("   {reason}");
                }
                Err(e) => return Err(e.into()),
            }
        };

        console::show_round_results(&track, &breakdown);
        console::show_running_total(session.total_score(), session.rounds().len() as u32);
    }

    console::show_summary(&session.summary());
    Ok(())
}

/// Print a worked table of sample guesses and the points they earn,
/// under the configured (or default) profile.
fn show_scoring_examples() {
    let profile_name = QuizConfig::load()
        .map(|c| c.profile)
        .unwrap_or(ProfileName::Standard);
    let profile = profile_name.profile();

    let answer_title = "Bohemian Rhapsody";
    let answer_artist = "Queen";
    let samples: [(&str, &str, &str); 6] = [
        ("Bohemian Rhapsody", "Queen", "exact"),
        ("bohemian rhapsody", "queen", "different case"),
        ("Bohemian Rap", "Queen", "small typo"),
        ("Rhapsody", "The Queen", "partial title, extra word"),
        ("Bohemian", "Quen", "fragment and misspelling"),
        ("Stairway to Heaven", "Led Zeppelin", "wrong song entirely"),
    ];

    println!("How guesses are graded ({profile_name:?} profile)");
    println!("Answer: {answer_title} - {answer_artist}");
    println!();
    println!("{:<22} {:<16} {:>5} {:>6}  note", "guess title", "guess artist", "sim", "points");
    for (title, artist, note) in samples {
        let breakdown = score(title, artist, answer_title, answer_artist, &profile);
        println!(
            "{:<22} {:<16} {:>2}/{:<2} {:>6}  {}",
            title,
            artist,
            breakdown.title_similarity,
            breakdown.artist_similarity,
            breakdown.total_points,
            note
        );
    }
}
