use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// 2024-01-02 is a Tuesday, 2024-01-06 a Saturday.
const TUESDAY: &str = "2024/01/02";
const SATURDAY: &str = "2024/01/06";

fn satmon_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_saturdaymorning"))
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(satmon_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("SATMON_LOG_DIR")
        .output()
        .expect("failed to execute saturdaymorning")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn write_config(dir: &Path, text: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(".satmonrc"), text).unwrap();
}

/// A library with one show holding two seasons of three episodes each.
fn library(config: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("staging");
    let dst = temp.path().join("watching");
    let show = src.join("TV").join("Show X");
    write_config(&show, config);
    for season in ["Season 1", "Season 2"] {
        for ep in ["Episode 1.mkv", "Episode 2.mkv", "Episode 10.mkv"] {
            touch(&show.join(season).join(ep));
        }
    }
    (temp, src, dst)
}

fn args<'a>(src: &'a Path, dst: &'a Path, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec![src.to_str().unwrap(), dst.to_str().unwrap()];
    args.extend_from_slice(extra);
    args
}

#[test]
fn daily_schedule_moves_first_episode() {
    let (_temp, src, dst) = library("[all]\nmove = nephews\nschedule = daily\n");

    let output = run_cli(&args(&src, &dst, &["--date", TUESDAY]));
    assert_success(&output);

    let moved = dst.join("TV/Show X/Season 1/Episode 1.mkv");
    assert!(moved.exists(), "expected {} to exist", moved.display());
    assert!(!src.join("TV/Show X/Season 1/Episode 1.mkv").exists());
    assert!(src.join("TV/Show X/Season 1/Episode 2.mkv").exists());
    assert!(!dst.join("TV/Show X/Season 2").exists());

    let out = stdout(&output);
    assert!(out.contains("Moving '"), "stdout:\n{}", out);
    assert!(out.contains(" - Reason: the schedule is daily."), "stdout:\n{}", out);
}

#[test]
fn consecutive_runs_drain_one_season_first() {
    let (_temp, src, dst) = library("[all]\nschedule = daily\n");

    for _ in 0..3 {
        assert_success(&run_cli(&args(&src, &dst, &["--date", TUESDAY])));
    }

    let season = dst.join("TV/Show X/Season 1");
    assert!(season.join("Episode 1.mkv").exists());
    assert!(season.join("Episode 2.mkv").exists());
    assert!(season.join("Episode 10.mkv").exists());
    assert!(!dst.join("TV/Show X/Season 2").exists());
    // the drained season is gone from staging, the marker stays
    assert!(!src.join("TV/Show X/Season 1").exists());
    assert!(src.join("TV/Show X/.satmonrc").exists());
}

#[test]
fn wrong_day_moves_nothing() {
    let (_temp, src, dst) = library("[all]\nschedule = saturday\n");

    let output = run_cli(&args(&src, &dst, &["--date", TUESDAY]));
    assert_success(&output);

    assert!(!dst.exists());
    assert!(stdout(&output).contains("Nothing to do."));
}

#[test]
fn right_day_moves() {
    let (_temp, src, dst) = library("[all]\nschedule = saturday\n");

    assert_success(&run_cli(&args(&src, &dst, &["--date", SATURDAY])));

    assert!(dst.join("TV/Show X/Season 1/Episode 1.mkv").exists());
}

#[test]
fn subject_section_overrides_schedule() {
    let (_temp, src, dst) =
        library("[all]\nschedule = saturday\n\n[Season 1]\nschedule = weekday\n");

    assert_success(&run_cli(&args(&src, &dst, &["--date", TUESDAY])));

    assert!(dst.join("TV/Show X/Season 1/Episode 1.mkv").exists());
}

#[test]
fn siblings_move_whole_directories() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("staging");
    let dst = temp.path().join("watching");
    let movies = src.join("Movies");
    write_config(&movies, "[all]\nmove = siblings\nschedule = weekday\n");
    touch(&movies.join("Part 2/movie.mkv"));
    touch(&movies.join("Part 1/movie.mkv"));

    assert_success(&run_cli(&args(&src, &dst, &["--date", TUESDAY])));

    assert!(dst.join("Movies/Part 1/movie.mkv").exists());
    assert!(!movies.join("Part 1").exists());
    assert!(movies.join("Part 2/movie.mkv").exists());
}

#[test]
fn dry_run_leaves_tree_untouched() {
    let (_temp, src, dst) = library("[all]\nschedule = daily\n");

    let output = run_cli(&args(&src, &dst, &["--date", TUESDAY, "--dry-run"]));
    assert_success(&output);

    assert!(!dst.exists());
    assert!(src.join("TV/Show X/Season 1/Episode 1.mkv").exists());
    assert!(stdout(&output).contains("(not really... this is a dry run)"));
}

#[test]
fn occupied_destination_fails() {
    let (_temp, src, dst) = library("[all]\nschedule = daily\n");
    fs::create_dir_all(dst.join("TV/Show X/Season 1")).unwrap();
    fs::write(dst.join("TV/Show X/Season 1/Episode 1.mkv"), "old copy").unwrap();

    let output = run_cli(&args(&src, &dst, &["--date", TUESDAY]));

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Destination already exists"));
    assert!(src.join("TV/Show X/Season 1/Episode 1.mkv").exists());
    assert_eq!(
        fs::read_to_string(dst.join("TV/Show X/Season 1/Episode 1.mkv")).unwrap(),
        "old copy"
    );
}

#[test]
fn missing_schedule_fails() {
    let (_temp, src, dst) = library("[all]\nmove = nephews\n");

    let output = run_cli(&args(&src, &dst, &["--date", TUESDAY]));

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No schedule specified for:"));
    assert!(!dst.exists());
}

#[test]
fn invalid_date_fails_before_walking() {
    let (_temp, src, dst) = library("[all]\nschedule = daily\n");

    let output = run_cli(&args(&src, &dst, &["--date", "2024/13/45"]));

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid date"));
    assert!(!dst.exists());
}

#[test]
fn missing_source_fails() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("nope");
    let dst = temp.path().join("watching");

    let output = run_cli(&args(&src, &dst, &["--date", TUESDAY]));

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Source directory doesn't exist"));
}

#[test]
fn relative_date_offset() {
    let (_temp, src, dst) = library("[all]\nschedule = daily\n");

    assert_success(&run_cli(&args(&src, &dst, &["--date", "-1"])));

    assert!(dst.join("TV/Show X/Season 1/Episode 1.mkv").exists());
}

#[derive(Debug, Deserialize)]
struct Report {
    reference_date: String,
    dry_run: bool,
    moved: bool,
    scopes: Vec<ScopeEntry>,
}

#[derive(Debug, Deserialize)]
struct ScopeEntry {
    subject: String,
    action: String,
    reason: Option<String>,
}

#[test]
fn json_report() {
    let (_temp, src, dst) = library("[all]\nschedule = tuesday\n");

    let output = run_cli(&args(&src, &dst, &["--date", TUESDAY, "--json"]));
    assert_success(&output);

    let report: Report = serde_json::from_slice(&output.stdout).unwrap_or_else(|err| {
        panic!("bad JSON ({}):\n{}", err, stdout(&output));
    });
    assert_eq!(report.reference_date, "2024-01-02");
    assert!(!report.dry_run);
    assert!(report.moved);
    assert_eq!(report.scopes.len(), 1);
    assert_eq!(report.scopes[0].subject, "nephews");
    assert_eq!(report.scopes[0].action, "moved");
    assert_eq!(report.scopes[0].reason.as_deref(), Some("today is a tuesday"));
    // logs go to stderr in JSON mode
    assert!(stderr(&output).contains("Moving '"));
}

#[test]
fn log_dir_receives_log_file() {
    let (temp, src, dst) = library("[all]\nschedule = daily\n");
    let logs = temp.path().join("logs");

    let mut cmd = Command::new(satmon_bin());
    cmd.args(args(&src, &dst, &["--date", TUESDAY]))
        .env_remove("RUST_LOG")
        .env("SATMON_LOG_DIR", &logs);
    let output = cmd.output().expect("failed to execute saturdaymorning");
    assert_success(&output);

    let log_file = fs::read_dir(&logs)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("saturdaymorning") && name.ends_with(".log"))
        })
        .unwrap_or_else(|| panic!("no log file in {}", logs.display()));
    let log = fs::read_to_string(log_file).unwrap();
    assert!(log.contains("Moving '"));
}
