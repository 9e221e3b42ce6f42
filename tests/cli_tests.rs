use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde::Deserialize;
use assert_cmd::Command;

use wallrace::notation::{parse_action, parse_move};
use wallrace::{apply_action_checked, GameState, Layout, Player, Tables};

const OPEN_LAYOUT: &str = concat!(
    "00000000000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000000000000000000000000000"
);

#[derive(Deserialize)]
struct ReportOut {
    strategy: String,
    depth: u8,
    nodes: u64,
    aborted: bool,
}

fn player() -> Command {
    let mut cmd = Command::cargo_bin("player").expect("binary exists");
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn stdout_of(out: &std::process::Output) -> String {
    String::from_utf8(out.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn run_reaches_the_goal() {
    let out = player().arg("run").write_stdin(format!("{OPEN_LAYOUT}\n")).output().expect("run player");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let tables = Tables::build(Layout::open());
    let mut state = GameState::new();
    state.enable_solo_mode(Player::Yellow);
    for line in stdout_of(&out).lines() {
        let mv = parse_move(line).expect("move line");
        assert!(state.is_legal(&tables, mv), "{line}");
        state.do_move(&tables, mv);
    }
    assert!(state.is_done(Player::Yellow));
}

#[test]
fn random_game_reports_its_length() {
    player()
        .args(["--seed", "7", "random-game"])
        .write_stdin(format!("{OPEN_LAYOUT}\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("moves-count="))
        .stdout(predicate::str::contains("turns="))
        .stdout(predicate::str::contains("score="));
}

#[test]
fn play_answers_when_it_is_our_turn() {
    let out = player()
        .args(["--strategy", "random", "play"])
        .write_stdin(format!("{OPEN_LAYOUT}\nYellow\nQuit\n"))
        .output()
        .expect("run player");
    assert!(out.status.success());

    let stdout = stdout_of(&out);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "{stdout}");
    let tables = Tables::build(Layout::open());
    let action = parse_action(lines[0]).expect("action line");
    assert!(!action.is_empty());
    assert!(apply_action_checked(&GameState::new(), &tables, &action).is_ok());
}

#[test]
fn play_switches_to_running_on_move() {
    player()
        .args(["--strategy", "random"])
        .write_stdin(format!("{OPEN_LAYOUT}\nBlack\nMove\n"))
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^([a-h][1-8][a-h][1-8]\n)+$").expect("regex"));
}

#[test]
fn bad_layout_fails() {
    player()
        .arg("run")
        .write_stdin("0101\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("wall layout"));
}

#[test]
fn analyze_prints_action_and_report() {
    let out = player()
        .args(["--strategy", "expectiminimax", "--max-depth", "1", "--min-depth", "1", "analyze"])
        .write_stdin(format!("{OPEN_LAYOUT}\ng1f1:f1e1\nEnd\n"))
        .output()
        .expect("run player");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = stdout_of(&out);
    let mut lines = stdout.lines();
    let action = parse_action(lines.next().expect("action line")).expect("parses");
    let report: ReportOut = serde_json::from_str(lines.next().expect("report line")).expect("report json");
    assert_eq!(report.strategy, "expectiminimax");
    assert_eq!(report.depth, 1);
    assert!(report.nodes > 0);
    assert!(!report.aborted);

    let tables = Tables::build(Layout::open());
    let before = parse_action("g1f1:f1e1").unwrap();
    let state = apply_action_checked(&GameState::new(), &tables, &before).unwrap();
    assert_eq!(state.player(), Player::Black);
    assert!(apply_action_checked(&state, &tables, &action).is_ok());
}
