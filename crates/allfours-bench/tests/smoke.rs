use std::fs;

use allfours_bench::config::BenchConfig;
use allfours_bench::tournament::TournamentRunner;
use tempfile::tempdir;

fn load_config(output_dir: &std::path::Path, seed: u64) -> BenchConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
matches:
  count: 3
  seed: {seed}
agents:
  - name: "north"
    kind: "heuristic"
    params:
      difficulty: "normal"
  - name: "east"
    kind: "random"
    params:
      seed: 5
  - name: "south"
    kind: "heuristic"
    params:
      difficulty: "easy"
  - name: "west"
    kind: "heuristic"
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("matches.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn run_once(seed: u64) -> (String, String) {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), seed);
    let outputs = config.resolved_outputs();

    let runner = TournamentRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("matches complete");
    assert_eq!(summary.matches_played, 3);
    assert_eq!(summary.rows_written, 3);
    assert_eq!(summary.wins[0] + summary.wins[1], 3);

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    (jsonl, markdown)
}

#[test]
fn smoke_run_writes_one_row_per_match() {
    let (jsonl, markdown) = run_once(4242);

    let rows: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), 3);
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(row["run_id"], "test_smoke");
        assert_eq!(row["match_index"], index);
        assert_eq!(row["seating"][1], "east");
        let chalk = row["chalk"].as_array().expect("chalk array");
        let best = chalk.iter().filter_map(|c| c.as_u64()).max().unwrap();
        assert!(best >= 14);
        assert!(row["winner"].is_string());
    }

    assert!(markdown.contains("# All Fours bench: test_smoke"));
    assert!(markdown.contains("| North/South | north + south |"));
    assert!(markdown.contains("## Chalk by category"));
}

#[test]
fn same_seed_reproduces_the_same_rows() {
    let (first, _) = run_once(77);
    let (second, _) = run_once(77);
    assert_eq!(first, second);
}
