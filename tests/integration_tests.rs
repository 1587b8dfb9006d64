//! # Integration Tests for Encore
//!
//! Whole quiz flows exercised through the public library API: detection
//! feeding the session, grading, timeouts, and final standings.

use std::collections::VecDeque;
use std::time::Duration;

use encore::detector::{ChangeDetector, DetectionResult};
use encore::scoring::ScoringProfile;
use encore::session::{QuizSession, SessionState, Tier, TimeoutPolicy};
use encore::source::PlaybackSource;
use encore::track::TrackSnapshot;

/// Scripted playback source: replays a fixed poll sequence, then
/// reports nothing playing.
struct ScriptedSource {
    polls: VecDeque<Option<TrackSnapshot>>,
}

impl ScriptedSource {
    fn new(polls: Vec<Option<TrackSnapshot>>) -> Self {
        Self {
            polls: polls.into(),
        }
    }
}

impl PlaybackSource for ScriptedSource {
    fn poll(&mut self) -> Option<TrackSnapshot> {
        self.polls.pop_front().flatten()
    }
}

fn track(id: &str, title: &str, artist: &str) -> TrackSnapshot {
    TrackSnapshot {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: "Album".to_string(),
        year: "1985".to_string(),
        duration_ms: 240_000,
        playing: true,
        elapsed_ms: 12_000,
    }
}

fn fast_detector(polls: Vec<Option<TrackSnapshot>>) -> ChangeDetector<ScriptedSource> {
    ChangeDetector::with_poll_interval(ScriptedSource::new(polls), Duration::from_millis(1))
}

mod full_sessions {
    use super::*;

    #[test]
    fn test_three_perfect_rounds_reach_the_top_tier() {
        let tracks = [
            track("a", "Bohemian Rhapsody", "Queen"),
            track("b", "Hotel California", "Eagles"),
            track("c", "Billie Jean", "Michael Jackson"),
        ];
        // Each track lingers for a couple of polls before the next.
        let mut polls = Vec::new();
        for t in &tracks {
            polls.push(Some(t.clone()));
            polls.push(Some(t.clone()));
        }

        let mut detector = fast_detector(polls);
        let mut session = QuizSession::new(3, ScoringProfile::standard());
        session.begin().unwrap();

        let mut round = 0;
        while session.state() == SessionState::AwaitingTrack {
            let detected = match detector
                .await_next_round(Duration::from_secs(1), session.history())
            {
                DetectionResult::Detected(t) => t,
                DetectionResult::TimedOut => panic!("scripted source should never time out"),
            };
            round += 1;
            let title = detected.title.clone();
            let artist = detected.artist.clone();
            session.open_round(detected).unwrap();
            session.submit_guess(round, &title, &artist).unwrap();
        }

        assert_eq!(session.state(), SessionState::SessionComplete);
        let summary = session.summary();
        assert_eq!(summary.total_score, 300);
        assert_eq!(summary.possible, 300);
        assert!((summary.percentage - 100.0).abs() < f64::EPSILON);
        assert_eq!(summary.tier, Tier::Virtuoso);
    }

    #[test]
    fn test_mixed_accuracy_session() {
        let mut detector = fast_detector(vec![
            Some(track("a", "Bohemian Rhapsody", "Queen")),
            Some(track("b", "Hotel California", "Eagles")),
        ]);
        let mut session = QuizSession::new(2, ScoringProfile::standard());
        session.begin().unwrap();

        // Round 1: perfect.
        let t1 = match detector.await_next_round(Duration::from_secs(1), session.history()) {
            DetectionResult::Detected(t) => t,
            DetectionResult::TimedOut => panic!("expected detection"),
        };
        session.open_round(t1).unwrap();
        session
            .submit_guess(1, "Bohemian Rhapsody", "Queen")
            .unwrap();

        // Round 2: near-perfect title, wrong artist. "hotel californa"
        // shares 15 of 31 chars with "hotel california" -> 97.
        let t2 = match detector.await_next_round(Duration::from_secs(1), session.history()) {
            DetectionResult::Detected(t) => t,
            DetectionResult::TimedOut => panic!("expected detection"),
        };
        session.open_round(t2).unwrap();
        let breakdown = session
            .submit_guess(2, "Hotel Californa", "Doobie Brothers")
            .unwrap();
        assert_eq!(breakdown.title_points, 60);
        assert_eq!(breakdown.artist_points, 0);

        let summary = session.summary();
        assert_eq!(summary.total_score, 160);
        assert_eq!(summary.possible, 200);
        assert_eq!(summary.tier, Tier::Expert);
    }

    #[test]
    fn test_blank_guess_keeps_the_round_open_mid_session() {
        let mut detector = fast_detector(vec![Some(track("a", "Billie Jean", "Michael Jackson"))]);
        let mut session = QuizSession::new(1, ScoringProfile::standard());
        session.begin().unwrap();

        let detected = match detector.await_next_round(Duration::from_secs(1), session.history())
        {
            DetectionResult::Detected(t) => t,
            DetectionResult::TimedOut => panic!("expected detection"),
        };
        session.open_round(detected).unwrap();

        assert!(session.submit_guess(1, "", "  ").is_err());
        assert_eq!(session.state(), SessionState::AwaitingGuess);

        // A missing artist alone is just as invalid; nothing is scored.
        assert!(session.submit_guess(1, "Billie Jean", "   ").is_err());
        assert_eq!(session.state(), SessionState::AwaitingGuess);
        assert_eq!(session.total_score(), 0);

        let breakdown = session
            .submit_guess(1, "Billie Jean", "Michael Jackson")
            .unwrap();
        assert_eq!(breakdown.total_points, 100);
        assert_eq!(session.state(), SessionState::SessionComplete);
    }
}

mod detection_flow {
    use super::*;

    #[test]
    fn test_history_prevents_repeat_rounds() {
        // The same track keeps playing after round 1; detection for
        // round 2 must skip it and wait for the genuinely new one.
        let mut polls = vec![Some(track("a", "Song A", "Artist A")); 5];
        polls.push(Some(track("b", "Song B", "Artist B")));

        let mut detector = fast_detector(polls);
        let mut session = QuizSession::new(2, ScoringProfile::standard());
        session.begin().unwrap();

        let first = match detector.await_next_round(Duration::from_secs(1), session.history()) {
            DetectionResult::Detected(t) => t,
            DetectionResult::TimedOut => panic!("expected first detection"),
        };
        assert_eq!(first.id, "a");
        session.open_round(first).unwrap();
        session.submit_guess(1, "Song A", "Artist A").unwrap();

        let second = match detector.await_next_round(Duration::from_secs(1), session.history()) {
            DetectionResult::Detected(t) => t,
            DetectionResult::TimedOut => panic!("expected second detection"),
        };
        assert_eq!(second.id, "b", "round 2 must not repeat the round-1 track");
    }

    #[test]
    fn test_timeout_abort_ends_the_session_early() {
        // Nothing ever plays; the Abort policy ends the session, which
        // then summarizes zero rounds.
        let mut detector = fast_detector(vec![]);
        let mut session = QuizSession::new(3, ScoringProfile::standard());
        session.begin().unwrap();

        let result = detector.await_next_round(Duration::from_millis(20), session.history());
        assert_eq!(result, DetectionResult::TimedOut);

        match TimeoutPolicy::Abort {
            TimeoutPolicy::Abort => session.abandon(),
            TimeoutPolicy::Retry => {}
        }
        assert_eq!(session.state(), SessionState::SessionComplete);

        let summary = session.summary();
        assert_eq!(summary.rounds_completed, 0);
        assert_eq!(summary.total_score, 0);
        assert_eq!(summary.tier, Tier::Beginner);
    }

    #[test]
    fn test_paused_playback_does_not_open_rounds() {
        let mut paused = track("a", "Song A", "Artist A");
        paused.playing = false;

        let mut detector = fast_detector(vec![Some(paused); 10]);
        let history = encore::track::RecentHistory::default();
        let result = detector.await_next_round(Duration::from_millis(30), &history);
        assert_eq!(result, DetectionResult::TimedOut);
    }

    #[test]
    fn test_demo_source_drives_a_full_session() {
        use encore::demo::DemoSource;

        let mut detector =
            ChangeDetector::with_poll_interval(DemoSource::new(), Duration::from_millis(1));
        let mut session = QuizSession::new(3, ScoringProfile::standard());
        session.begin().unwrap();

        let mut round = 0;
        while session.state() == SessionState::AwaitingTrack {
            let detected = match detector
                .await_next_round(Duration::from_secs(5), session.history())
            {
                DetectionResult::Detected(t) => t,
                DetectionResult::TimedOut => panic!("demo source should supply 3 tracks"),
            };
            round += 1;
            let title = detected.title.clone();
            let artist = detected.artist.clone();
            session.open_round(detected).unwrap();
            session.submit_guess(round, &title, &artist).unwrap();
        }

        let summary = session.summary();
        assert_eq!(summary.rounds_completed, 3);
        assert_eq!(summary.total_score, 300, "perfect guesses score 100 per round");
    }
}

mod profile_behavior {
    use super::*;
    use encore::scoring::score;

    #[test]
    fn test_profiles_diverge_on_one_sided_guesses() {
        // Title right, artist wrong: 60 points standard, 70 broadcast.
        let standard = score(
            "Smells Like Teen Spirit",
            "Pearl Jam",
            "Smells Like Teen Spirit",
            "Nirvana",
            &ScoringProfile::standard(),
        );
        let broadcast = score(
            "Smells Like Teen Spirit",
            "Pearl Jam",
            "Smells Like Teen Spirit",
            "Nirvana",
            &ScoringProfile::broadcast(),
        );
        assert_eq!(standard.total_points, 60);
        assert_eq!(broadcast.total_points, 70);

        // Artist right, title wrong: the ordering flips.
        let standard = score(
            "Heart-Shaped Box",
            "Nirvana",
            "Smells Like Teen Spirit",
            "Nirvana",
            &ScoringProfile::standard(),
        );
        let broadcast = score(
            "Heart-Shaped Box",
            "Nirvana",
            "Smells Like Teen Spirit",
            "Nirvana",
            &ScoringProfile::broadcast(),
        );
        assert_eq!(standard.total_points, 40);
        assert_eq!(broadcast.total_points, 30);
    }
}
