use holdem_cli::exit_code;
use holdem_cli::run;

fn run_args(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn help_lists_expected_commands() {
    let (code, stdout, _) = run_args(&["holdem", "--help"]);
    assert_eq!(code, exit_code::SUCCESS);
    for cmd in ["deal", "eval", "sim", "cfg"] {
        assert!(stdout.contains(cmd), "help should list subcommand `{}`", cmd);
    }
}

#[test]
fn version_goes_to_stdout() {
    let (code, stdout, stderr) = run_args(&["holdem", "--version"]);
    assert_eq!(code, exit_code::SUCCESS);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    assert!(stderr.is_empty());
}

#[test]
fn missing_required_argument_is_a_usage_error() {
    let (code, stdout, stderr) = run_args(&["holdem", "eval"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(stdout.is_empty());
    assert!(stderr.contains("--hand"), "{stderr}");
    assert!(stderr.contains("For full help, run: holdem --help"));
}

#[test]
fn deal_is_reproducible_from_the_seed() {
    let first = run_args(&["holdem", "deal", "--seed", "2024", "--players", "3"]);
    let second = run_args(&["holdem", "deal", "--seed", "2024", "--players", "3"]);
    assert_eq!(first.0, exit_code::SUCCESS);
    assert_eq!(first, second);
    assert_eq!(first.1.lines().filter(|l| l.starts_with("Seat ")).count(), 3);
}

#[test]
fn deal_rejects_too_many_players() {
    let (code, _, stderr) = run_args(&["holdem", "deal", "--players", "30"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(stderr.starts_with("Error: Engine error:"), "{stderr}");
}

#[test]
fn eval_ranks_made_hands() {
    let (code, stdout, _) = run_args(&[
        "holdem", "eval", "--hand", "Ah Ad", "--board", "Ac As 7d 2c 9h",
    ]);
    assert_eq!(code, exit_code::SUCCESS);
    assert!(stdout.contains("Class: Four of a Kind"), "{stdout}");
}

#[test]
fn eval_reports_duplicate_cards() {
    let (code, _, stderr) = run_args(&["holdem", "eval", "--hand", "Ah Ad", "--board", "Ah 2c 3d"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(stderr.contains("Ah appears twice"), "{stderr}");
}

#[test]
fn sim_prints_a_summary_per_seat() {
    let (code, stdout, _) = run_args(&["holdem", "sim", "--hands", "10", "--seed", "3"]);
    assert_eq!(code, exit_code::SUCCESS, "{stdout}");
    assert!(stdout.contains("Hands: 10"));
    assert!(stdout.contains("Seat 0 (ScoreAgent)"));
    assert!(stdout.contains("Seat 1 (RandomAgent)"));
}

#[test]
fn sim_json_lines_parse() {
    let (code, stdout, _) = run_args(&["holdem", "sim", "--hands", "3", "--seed", "3", "--json"]);
    assert_eq!(code, exit_code::SUCCESS);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    for line in &lines {
        let deltas: i64 = line["chip_deltas"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d.as_i64().unwrap())
            .sum();
        assert_eq!(deltas, 0);
    }
}

#[test]
fn cfg_prints_sources() {
    let (code, stdout, _) = run_args(&["holdem", "cfg"]);
    assert_eq!(code, exit_code::SUCCESS);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    for key in [
        "buy_in",
        "small_blind",
        "big_blind",
        "players",
        "buyin_limit",
        "seed",
        "agents",
    ] {
        assert!(json[key].get("source").is_some(), "{key} has no source");
    }
}
