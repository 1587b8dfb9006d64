//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Encore using Clap
//! derive macros. It provides a type-safe way to parse command-line
//! arguments and route them to appropriate functionality.
//!
//! ## Commands
//!
//! - `live`: Run the quiz against whatever MPD is playing
//! - `demo`: Run the quiz offline against the built-in catalogue
//! - `examples`: Show how the scoring grades sample guesses
//! - `status`: Show what MPD reports as currently playing
//! - `skip`: Skip MPD to the next track
//!
//! ## Examples
//!
//! ```bash
//! encore live --rounds 5
//! encore demo
//! encore examples
//! ```

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::scoring::ProfileName;
use crate::session::TimeoutPolicy;

/// Main application arguments structure.
///
/// Uses Clap derive macros to automatically generate argument parsing,
/// help text, and validation. The main structure contains only a
/// subcommand since all functionality is accessed through specific
/// commands.
#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Encore: Name That Tune - live music quiz driven by what you're playing")]
#[command(version)]
pub struct Args {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the quiz against your live MPD playback
    ///
    /// Encore watches what MPD is playing; each time a new track starts,
    /// a round opens and you guess its title and artist. Put your player
    /// on shuffle for best results.
    Live {
        /// Number of rounds to play
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Seconds to wait for a new track before the round times out
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Point-weight profile used to grade guesses
        #[arg(long, value_enum)]
        profile: Option<ProfileName>,

        /// End the session on the first round timeout instead of
        /// waiting again
        #[arg(long)]
        abort_on_timeout: bool,
    },

    /// Run the quiz offline against the built-in demo catalogue
    ///
    /// No MPD required: five well-known tracks are shuffled and "played"
    /// for you. Good for trying Encore out.
    Demo {
        /// Number of rounds to play (at most the catalogue size)
        #[arg(short, long, default_value = "3")]
        rounds: u32,
    },

    /// Show how the scoring engine grades a set of sample guesses
    ///
    /// Prints a table of guesses against a known answer with the
    /// similarity and points each one earns, so you can see what
    /// "close enough" means before playing.
    Examples,

    /// Show what MPD reports as currently playing
    Status,

    /// Skip MPD to the next track in its queue
    ///
    /// Handy mid-session when a round lands on a track nobody wants to
    /// guess.
    Skip,

    /// Generate shell completions
    ///
    /// Usage: encore completion bash > ~/.local/share/bash-completion/completions/encore
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

impl Command {
    /// The timeout policy a `live` invocation asked for, if it set one.
    #[must_use]
    pub fn timeout_policy(&self) -> Option<TimeoutPolicy> {
        match self {
            Self::Live {
                abort_on_timeout: true,
                ..
            } => Some(TimeoutPolicy::Abort),
            _ => None,
        }
    }
}
