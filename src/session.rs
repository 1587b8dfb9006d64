//! Quiz session orchestration.
//!
//! A [`QuizSession`] is a small state machine over a fixed number of
//! rounds. It owns the round records, the recent-track history, and the
//! running totals; detection and I/O stay outside, driven by the
//! caller. All transitions are explicit methods, and calling one in the
//! wrong state is reported as [`QuizError::SessionMisuse`] rather than
//! silently tolerated.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::scoring::{score, ScoreBreakdown, ScoringProfile};
use crate::track::{RecentHistory, TrackSnapshot};

/// What the player typed for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    /// Guessed track title, as entered
    pub title: String,
    /// Guessed artist, as entered
    pub artist: String,
}

/// One round of the quiz: the track that was playing, and (once
/// submitted) the guess and its grading.
#[derive(Debug, Clone)]
pub struct QuizRound {
    /// 1-based round number
    pub number: u32,
    /// The track the round asks about
    pub track: TrackSnapshot,
    /// The player's guess, absent until submitted
    pub guess: Option<Guess>,
    /// The grading of the guess, absent until submitted
    pub score: Option<ScoreBreakdown>,
}

impl QuizRound {
    fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created but not started
    Idle,
    /// Waiting for the detector to hand over a new track
    AwaitingTrack,
    /// A round is open and waiting for the player's guess
    AwaitingGuess,
    /// All rounds played (or the session was abandoned)
    SessionComplete,
}

/// What to do when a round's detection wait times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutPolicy {
    /// Keep the session open and wait again for the same round
    Retry,
    /// End the session early and summarize the rounds played so far
    Abort,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self::Retry
    }
}

/// Final-standing tier derived from the score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// >= 90%
    Virtuoso,
    /// >= 75%
    Expert,
    /// >= 60%
    Enthusiast,
    /// >= 40%
    Casual,
    /// below 40%
    Beginner,
}

impl Tier {
    fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::Virtuoso
        } else if percentage >= 75.0 {
            Self::Expert
        } else if percentage >= 60.0 {
            Self::Enthusiast
        } else if percentage >= 40.0 {
            Self::Casual
        } else {
            Self::Beginner
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Virtuoso => "Music Virtuoso",
            Self::Expert => "Music Expert",
            Self::Enthusiast => "Music Enthusiast",
            Self::Casual => "Casual Listener",
            Self::Beginner => "Keep Listening",
        };
        write!(f, "{label}")
    }
}

/// End-of-session standings.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Sum of all round scores
    pub total_score: u32,
    /// Maximum the completed rounds could have scored
    pub possible: u32,
    /// Rounds actually played to completion
    pub rounds_completed: u32,
    /// `total_score / possible` as a percentage, 0.0 for zero rounds
    pub percentage: f64,
    /// Tier derived from the percentage
    pub tier: Tier,
}

/// The quiz state machine.
///
/// Lifecycle: [`new`] puts the session in `Idle`; [`begin`] moves it to
/// `AwaitingTrack`; each [`open_round`] moves to `AwaitingGuess`; a
/// successful [`submit_guess`] either returns to `AwaitingTrack` or, on
/// the last round, lands in `SessionComplete`. [`abandon`] jumps to
/// `SessionComplete` from anywhere.
///
/// [`new`]: Self::new
/// [`begin`]: Self::begin
/// [`open_round`]: Self::open_round
/// [`submit_guess`]: Self::submit_guess
/// [`abandon`]: Self::abandon
pub struct QuizSession {
    target_rounds: u32,
    profile: ScoringProfile,
    state: SessionState,
    rounds: Vec<QuizRound>,
    history: RecentHistory,
}

impl QuizSession {
    /// New idle session of `target_rounds` rounds, graded by `profile`.
    /// At least one round is always played.
    #[must_use]
    pub fn new(target_rounds: u32, profile: ScoringProfile) -> Self {
        Self {
            target_rounds: target_rounds.max(1),
            profile,
            state: SessionState::Idle,
            rounds: Vec::new(),
            history: RecentHistory::default(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of rounds this session will play.
    #[must_use]
    pub fn target_rounds(&self) -> u32 {
        self.target_rounds
    }

    /// Rounds recorded so far, scored or open.
    #[must_use]
    pub fn rounds(&self) -> &[QuizRound] {
        &self.rounds
    }

    /// Recent-track history the detector should honor.
    #[must_use]
    pub fn history(&self) -> &RecentHistory {
        &self.history
    }

    /// Running total across all scored rounds.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.rounds
            .iter()
            .filter_map(|round| round.score.map(|s| s.total_points))
            .sum()
    }

    /// Start the session.
    ///
    /// # Errors
    ///
    /// `SessionMisuse` unless the session is `Idle`.
    pub fn begin(&mut self) -> Result<(), QuizError> {
        if self.state != SessionState::Idle {
            return Err(QuizError::SessionMisuse {
                reason: format!("begin called in state {:?}", self.state),
            });
        }
        info!("session started: {} rounds", self.target_rounds);
        self.state = SessionState::AwaitingTrack;
        Ok(())
    }

    /// Open the next round around a freshly detected track.
    ///
    /// The track's id is pushed into the history immediately, so the
    /// detector will not offer it again within the window.
    ///
    /// # Errors
    ///
    /// `SessionMisuse` unless the session is `AwaitingTrack`.
    pub fn open_round(&mut self, track: TrackSnapshot) -> Result<&QuizRound, QuizError> {
        if self.state != SessionState::AwaitingTrack {
            return Err(QuizError::SessionMisuse {
                reason: format!("open_round called in state {:?}", self.state),
            });
        }

        self.history.push(&track.id);
        let index = self.rounds.len();
        let number = index as u32 + 1;
        debug!("round {number} opened: {}", track.id);
        self.rounds.push(QuizRound {
            number,
            track,
            guess: None,
            score: None,
        });
        self.state = SessionState::AwaitingGuess;

        Ok(&self.rounds[index])
    }

    /// Submit the player's guess for the open round and grade it.
    ///
    /// On success the session advances: back to `AwaitingTrack` if
    /// rounds remain, to `SessionComplete` after the last round.
    ///
    /// # Errors
    ///
    /// [`QuizError::InvalidGuess`] when either field is blank; the
    /// round stays open and the caller can prompt again.
    /// [`QuizError::SessionMisuse`] when no round is open or
    /// `round_number` does not name the open round.
    pub fn submit_guess(
        &mut self,
        round_number: u32,
        title: &str,
        artist: &str,
    ) -> Result<ScoreBreakdown, QuizError> {
        if self.state != SessionState::AwaitingGuess {
            return Err(QuizError::SessionMisuse {
                reason: format!("submit_guess called in state {:?}", self.state),
            });
        }

        let open = self
            .rounds
            .last_mut()
            .filter(|round| !round.is_scored())
            .ok_or_else(|| QuizError::SessionMisuse {
                reason: "no open round to score".to_string(),
            })?;

        if open.number != round_number {
            return Err(QuizError::SessionMisuse {
                reason: format!(
                    "guess targets round {round_number} but round {} is open",
                    open.number
                ),
            });
        }

        if title.trim().is_empty() || artist.trim().is_empty() {
            return Err(QuizError::InvalidGuess {
                reason: "both a title and an artist are required".to_string(),
            });
        }

        let breakdown = score(title, artist, &open.track.title, &open.track.artist, &self.profile);
        open.guess = Some(Guess {
            title: title.to_string(),
            artist: artist.to_string(),
        });
        open.score = Some(breakdown);
        info!(
            "round {round_number} scored: {} points ({} + {})",
            breakdown.total_points, breakdown.title_points, breakdown.artist_points
        );

        let completed = self.rounds.iter().filter(|r| r.is_scored()).count() as u32;
        self.state = if completed >= self.target_rounds {
            info!("session complete: {} points", self.total_score());
            SessionState::SessionComplete
        } else {
            SessionState::AwaitingTrack
        };

        Ok(breakdown)
    }

    /// End the session now, whatever state it is in. Scored rounds keep
    /// counting toward the summary.
    pub fn abandon(&mut self) {
        if self.state != SessionState::SessionComplete {
            info!("session abandoned after {} scored rounds", self.completed_rounds());
        }
        self.state = SessionState::SessionComplete;
    }

    fn completed_rounds(&self) -> u32 {
        self.rounds.iter().filter(|r| r.is_scored()).count() as u32
    }

    /// Final standings over the rounds scored so far.
    ///
    /// With zero completed rounds the percentage is defined as 0.0,
    /// which lands in the lowest tier.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let rounds_completed = self.completed_rounds();
        let total_score = self.total_score();
        let possible = rounds_completed * self.profile.max_points();
        let percentage = if possible == 0 {
            0.0
        } else {
            f64::from(total_score) / f64::from(possible) * 100.0
        };

        Summary {
            total_score,
            possible,
            rounds_completed,
            percentage,
            tier: Tier::from_percentage(percentage),
        }
    }
}
