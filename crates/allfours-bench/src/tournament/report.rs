use std::fs;
use std::path::Path;

use allfours_core::model::team::TeamId;

use super::{AwardTally, MatchLogRow, RunnerError};
use crate::config::BenchConfig;

/// Running totals across matches, rendered as the Markdown summary.
pub(super) struct Standings {
    seating: Vec<String>,
    matches: usize,
    wins: [usize; 2],
    chalk: [u64; 2],
    hands: u64,
    redeals: u64,
    awards: AwardTally,
}

impl Standings {
    pub(super) fn new(seating: Vec<String>) -> Self {
        Self {
            seating,
            matches: 0,
            wins: [0; 2],
            chalk: [0; 2],
            hands: 0,
            redeals: 0,
            awards: AwardTally::default(),
        }
    }

    pub(super) fn record(&mut self, row: &MatchLogRow) {
        self.matches += 1;
        if let Some(team) = row.winner {
            self.wins[team.index()] += 1;
        }
        for team in TeamId::BOTH {
            self.chalk[team.index()] += u64::from(row.chalk[team.index()]);
        }
        self.hands += u64::from(row.hands);
        self.redeals += u64::from(row.redeals);
        self.awards.merge(&row.awards);
    }

    pub(super) fn wins(&self) -> [usize; 2] {
        self.wins
    }

    pub(super) fn render(&self, config: &BenchConfig) -> String {
        let matches = self.matches.max(1) as f64;
        let mut out = String::new();
        out.push_str(&format!("# All Fours bench: {}\n\n", config.run_id));
        out.push_str(&format!(
            "{} matches to {} chalk, seed {}\n\n",
            self.matches,
            config.matches.target_chalk,
            config
                .matches
                .seed
                .map(|seed| seed.to_string())
                .unwrap_or_else(|| "0".to_string()),
        ));

        out.push_str("| Team | Seats | Wins | Win rate | Avg chalk |\n");
        out.push_str("|---|---|---:|---:|---:|\n");
        for team in TeamId::BOTH {
            let seats = team
                .members()
                .iter()
                .map(|seat| {
                    self.seating
                        .get(seat.index())
                        .cloned()
                        .unwrap_or_else(|| seat.to_string())
                })
                .collect::<Vec<_>>()
                .join(" + ");
            let wins = self.wins[team.index()];
            out.push_str(&format!(
                "| {team} | {seats} | {wins} | {:.1}% | {:.2} |\n",
                100.0 * wins as f64 / matches,
                self.chalk[team.index()] as f64 / matches,
            ));
        }

        out.push_str(&format!(
            "\nAverage hands per match: {:.2}; redeals: {}\n\n",
            self.hands as f64 / matches,
            self.redeals
        ));

        out.push_str("## Chalk by category\n\n");
        out.push_str(&format!(
            "| Category | {} | {} |\n",
            TeamId::NorthSouth,
            TeamId::EastWest
        ));
        out.push_str("|---|---:|---:|\n");
        for (label, chalk) in AwardTally::LABELS.iter().zip(self.awards.rows()) {
            out.push_str(&format!("| {label} | {} | {} |\n", chalk[0], chalk[1]));
        }
        out
    }

    pub(super) fn write_markdown(&self, path: &Path, config: &BenchConfig) -> Result<(), RunnerError> {
        fs::write(path, self.render(config))?;
        Ok(())
    }
}
