//! End-to-end sessions: rules, rounds, leaderboard display and save.

use casino_guess::console::Console;
use casino_guess::engine::round::RoundEngine;
use casino_guess::engine::session::{Session, SessionReport};
use casino_guess::storage::Leaderboard;
use casino_guess::types::Snapshot;

use crate::scripted_source::ScriptedSource;

fn temp_path() -> String {
    let mut p = std::env::temp_dir();
    p.push(format!("casino_it_leaderboard_{}.txt", uuid::Uuid::new_v4()));
    p.to_string_lossy().to_string()
}

/// Run a session over `input`, returning the report, the transcript and
/// the leaderboard entries left in memory.
fn play(input: &str, source: ScriptedSource, path: &str) -> (SessionReport, String, Vec<Snapshot>) {
    let leaderboard = Leaderboard::load(Some(path)).unwrap();
    let mut session = Session::new(
        Console::new(input.as_bytes(), Vec::new()),
        RoundEngine::new(source),
        leaderboard,
        1000,
    );
    let report = session.run();
    let entries = session.leaderboard().entries().to_vec();
    let out = String::from_utf8(session.into_console().into_writer()).unwrap();
    (report, out, entries)
}

#[test]
fn test_alice_wins_easy() {
    let path = temp_path();
    let source = ScriptedSource::new(&[3]);

    let (report, out, _) = play("Alice\nEasy\n3\nn\nn\n", source.clone(), &path);

    assert_eq!(source.draws(), vec![5]);
    assert_eq!(report.rounds_won, 1);
    assert!(out.contains("Guess a number between 1 and 5: "));
    assert!(out.contains("Player: Alice | Balance: $1100"));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_bob_loses_hard() {
    let path = temp_path();
    let source = ScriptedSource::new(&[12]);

    let (_, out, entries) = play("Bob\nHard\n7\nn\nn\n", source, &path);

    assert!(out.contains("Wrong guess. The correct number was 12."));
    assert!(out.contains("Player: Bob | Balance: $500"));
    assert_eq!(entries, vec![Snapshot::new("Bob", 500)]);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_two_players_ranked_and_saved() {
    let path = temp_path();
    let source = ScriptedSource::new(&[3, 12]);

    let input = "Bob\nHard\n7\nn\ny\nAlice\nEasy\n3\nn\nn\n";
    let (report, out, _) = play(input, source.clone(), &path);

    assert_eq!(report.players, 2);
    assert!(report.saved);
    assert_eq!(source.remaining(), 0);

    // Rules are shown once per player.
    assert_eq!(out.matches("CASINO NUMBER GUESSING GAME").count(), 2);
    assert_eq!(out.matches("Would another player like to try? (y/n): ").count(), 2);

    let alice = out.find("1. Alice - $1100").unwrap();
    let bob = out.find("2. Bob - $500").unwrap();
    assert!(alice < bob);

    let saved = std::fs::read_to_string(&path).unwrap();
    assert_eq!(saved, "Alice 1100\nBob 500\n");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_existing_leaderboard_is_merged_not_matched() {
    let path = temp_path();
    std::fs::write(&path, "Alice 3000\nZed 700\n").unwrap();
    let source = ScriptedSource::new(&[1]);

    let (_, out, entries) = play("Alice Medium 2 n n", source, &path);

    // The returning player starts fresh and gets a second entry.
    assert!(out.contains("Player: Alice | Balance: $850"));
    assert_eq!(
        entries,
        vec![
            Snapshot::new("Alice", 3000),
            Snapshot::new("Alice", 850),
            Snapshot::new("Zed", 700),
        ]
    );
    let saved = std::fs::read_to_string(&path).unwrap();
    assert_eq!(saved, "Alice 3000\nAlice 850\nZed 700\n");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_invalid_difficulty_does_not_draw() {
    let path = temp_path();
    let source = ScriptedSource::new(&[]);

    let (report, out, entries) = play("Cara hard y EASY n n", source.clone(), &path);

    assert!(source.draws().is_empty());
    assert_eq!(report.rounds_rejected, 2);
    assert_eq!(out.matches("Invalid difficulty level!").count(), 2);
    assert_eq!(entries, vec![Snapshot::new("Cara", 1000)]);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_losing_streak_clamps_at_zero() {
    let path = temp_path();
    let source = ScriptedSource::new(&[1, 1, 1]);

    let (_, out, entries) = play("Dan Hard 2 y Hard 2 y Hard 2 n n", source, &path);

    assert!(out.contains("Player: Dan | Balance: $0"));
    assert_eq!(entries, vec![Snapshot::new("Dan", 0)]);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_saved_file_reloads_for_next_session() {
    let path = temp_path();

    play("Ann Easy 2 n n", ScriptedSource::new(&[2]), &path);
    let (_, out, entries) = play("Ben Easy 1 n n", ScriptedSource::new(&[2]), &path);

    assert_eq!(
        entries,
        vec![Snapshot::new("Ann", 1100), Snapshot::new("Ben", 950)]
    );
    assert!(out.contains("1. Ann - $1100"));
    assert!(out.contains("2. Ben - $950"));

    std::fs::remove_file(&path).unwrap();
}
