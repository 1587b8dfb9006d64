//! Round-scoring engine.
//!
//! Maps a free-text guess against the known-correct title and artist to
//! a deterministic point award. Both sides of each comparison are
//! trimmed and lowercased, graded with the matching-block similarity
//! ratio, and then pushed through a monotone step function whose point
//! values come from an injected [`ScoringProfile`].
//!
//! Everything here is a pure function over its arguments: no I/O, no
//! shared state, safe to call from any number of concurrent sessions.

use serde::{Deserialize, Serialize};

use crate::similarity;

/// Similarity band a graded field landed in.
///
/// Derived purely from which threshold the similarity cleared, so the
/// presentation layer can render or localize it however it likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFeedback {
    /// Similarity >= 90: effectively the right answer
    Perfect,
    /// Similarity >= 70: minor spelling distance
    Close,
    /// Similarity >= 50: recognizably related
    Partial,
    /// Anything below 50
    Incorrect,
}

impl FieldFeedback {
    /// Band thresholds shared by every profile.
    const PERFECT: u8 = 90;
    const CLOSE: u8 = 70;
    const PARTIAL: u8 = 50;

    fn from_similarity(similarity: u8) -> Self {
        if similarity >= Self::PERFECT {
            Self::Perfect
        } else if similarity >= Self::CLOSE {
            Self::Close
        } else if similarity >= Self::PARTIAL {
            Self::Partial
        } else {
            Self::Incorrect
        }
    }
}

/// Named weight profile selectable from configuration or the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProfileName {
    /// 60/40 title/artist split (terminal and live quiz weighting)
    Standard,
    /// 70/30 title/artist split (broadcast/web quiz weighting)
    Broadcast,
}

impl ProfileName {
    /// Resolve the name to its concrete profile.
    #[must_use]
    pub fn profile(self) -> ScoringProfile {
        match self {
            Self::Standard => ScoringProfile::standard(),
            Self::Broadcast => ScoringProfile::broadcast(),
        }
    }
}

impl Default for ProfileName {
    fn default() -> Self {
        Self::Standard
    }
}

/// Immutable point-award configuration for one quiz flavor.
///
/// Points per band are ordered `[perfect, close, partial]`; anything
/// below the partial threshold scores zero. Title and artist maxima
/// always sum to 100, so a perfect round is worth 100 points under any
/// profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringProfile {
    /// Points for the title field per band
    pub title_points: [u32; 3],
    /// Points for the artist field per band
    pub artist_points: [u32; 3],
}

impl ScoringProfile {
    /// The default weighting: title worth up to 60, artist up to 40.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            title_points: [60, 40, 20],
            artist_points: [40, 25, 10],
        }
    }

    /// Title-heavy weighting: title worth up to 70, artist up to 30.
    #[must_use]
    pub const fn broadcast() -> Self {
        Self {
            title_points: [70, 50, 30],
            artist_points: [30, 20, 10],
        }
    }

    /// Maximum points a single round can award under this profile.
    #[must_use]
    pub const fn max_points(&self) -> u32 {
        self.title_points[0] + self.artist_points[0]
    }

    fn points_for(bands: &[u32; 3], feedback: FieldFeedback) -> u32 {
        match feedback {
            FieldFeedback::Perfect => bands[0],
            FieldFeedback::Close => bands[1],
            FieldFeedback::Partial => bands[2],
            FieldFeedback::Incorrect => 0,
        }
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::standard()
    }
}

/// The full grading of one guess. Created fresh per guess, never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// Title similarity ratio, 0-100
    pub title_similarity: u8,
    /// Artist similarity ratio, 0-100
    pub artist_similarity: u8,
    /// Points awarded for the title field
    pub title_points: u32,
    /// Points awarded for the artist field
    pub artist_points: u32,
    /// `title_points + artist_points`, at most 100
    pub total_points: u32,
    /// Band the title landed in
    pub title_feedback: FieldFeedback,
    /// Band the artist landed in
    pub artist_feedback: FieldFeedback,
}

/// Trim surrounding whitespace and case-fold for comparison.
fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Grade a guess against the correct answer under `profile`.
///
/// Normalization (trim + lowercase) is applied identically to the guess
/// and the ground truth, so case and surrounding whitespace never move
/// the score.
///
/// # Examples
///
/// ```
/// use encore::scoring::{score, ScoringProfile};
///
/// let result = score(
///     "Bohemian Rhapsody",
///     "Queen",
///     "Bohemian Rhapsody",
///     "Queen",
///     &ScoringProfile::standard(),
/// );
/// assert_eq!(result.total_points, 100);
/// ```
#[must_use]
pub fn score(
    guess_title: &str,
    guess_artist: &str,
    answer_title: &str,
    answer_artist: &str,
    profile: &ScoringProfile,
) -> ScoreBreakdown {
    let title_similarity =
        similarity::ratio(&normalize(guess_title), &normalize(answer_title));
    let artist_similarity =
        similarity::ratio(&normalize(guess_artist), &normalize(answer_artist));

    let title_feedback = FieldFeedback::from_similarity(title_similarity);
    let artist_feedback = FieldFeedback::from_similarity(artist_similarity);

    let title_points = ScoringProfile::points_for(&profile.title_points, title_feedback);
    let artist_points = ScoringProfile::points_for(&profile.artist_points, artist_feedback);

    ScoreBreakdown {
        title_similarity,
        artist_similarity,
        title_points,
        artist_points,
        total_points: title_points + artist_points,
        title_feedback,
        artist_feedback,
    }
}
