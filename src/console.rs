//! Terminal presentation for the interactive quiz.
//!
//! All the println! lives here, so the session and detector stay
//! testable. The one hard rule: hints never leak the title or the
//! artist, those are exactly what the player is guessing.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::scoring::{FieldFeedback, ScoreBreakdown};
use crate::session::{Guess, Summary};
use crate::track::TrackSnapshot;

/// Banner shown when a session starts.
pub fn show_welcome(rounds: u32) {
    println!("🎵 Encore: Name That Tune");
    println!("═════════════════════════");
    println!("{rounds} rounds. Play a song, then guess its title and artist.");
    println!("Each field is worth points; spelling close enough counts.");
    println!();
}

/// Announce that we are listening for the next track.
pub fn show_waiting(round: u32, total: u32) {
    println!("── Round {round}/{total} ──");
    println!("🎧 Waiting for a new track to start playing...");
}

/// Show what we can reveal about the detected track without giving
/// away the answer.
pub fn show_hints(track: &TrackSnapshot) {
    println!("🎶 Got one! Here's what I can tell you:");
    println!("   Year:     {}", track.year);
    println!("   Album:    {}", track.album);
    println!("   Length:   {}", track.duration_display());
    println!("   Position: {} in when detected", track.elapsed_display());
}

/// Read a guess from stdin: title on one line, artist on the next.
///
/// # Errors
///
/// Returns an error if stdin is closed or unreadable.
pub fn prompt_guess() -> Result<Guess> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    print!("   Title?  ");
    io::stdout().flush().context("Failed to flush stdout")?;
    let title = lines
        .next()
        .transpose()
        .context("Failed to read title guess")?
        .context("Input closed while reading title guess")?;

    print!("   Artist? ");
    io::stdout().flush().context("Failed to flush stdout")?;
    let artist = lines
        .next()
        .transpose()
        .context("Failed to read artist guess")?
        .context("Input closed while reading artist guess")?;

    Ok(Guess { title, artist })
}

fn feedback_label(feedback: FieldFeedback) -> &'static str {
    match feedback {
        FieldFeedback::Perfect => "✅ Perfect",
        FieldFeedback::Close => "🟡 Close",
        FieldFeedback::Partial => "🟠 Partial",
        FieldFeedback::Incorrect => "❌ Incorrect",
    }
}

/// Reveal the answer and the grading for one round.
pub fn show_round_results(track: &TrackSnapshot, breakdown: &ScoreBreakdown) {
    println!();
    println!("   The answer: {} - {}", track.title, track.artist);
    println!(
        "   Title:  {} ({} points)",
        feedback_label(breakdown.title_feedback),
        breakdown.title_points
    );
    println!(
        "   Artist: {} ({} points)",
        feedback_label(breakdown.artist_feedback),
        breakdown.artist_points
    );
    println!("   Round score: {} points", breakdown.total_points);
}

/// Running total after a round.
pub fn show_running_total(total: u32, rounds_played: u32) {
    println!("   Total so far: {total} points after {rounds_played} round(s)");
    println!();
}

/// Tell the player nothing new started playing this round.
pub fn show_timeout(retrying: bool) {
    if retrying {
        println!("⏱️  No new track started in time. Put something on; still listening...");
    } else {
        println!("⏱️  No new track started in time. Ending the session here.");
    }
    println!();
}

/// End-of-session standings.
pub fn show_summary(summary: &Summary) {
    println!("🏁 Final Results");
    println!("═══════════════");
    println!(
        "   Score: {}/{} ({:.0}%) over {} round(s)",
        summary.total_score, summary.possible, summary.percentage, summary.rounds_completed
    );
    println!("   Rating: {}", summary.tier);
}
