mod report;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use allfours_bot::bot::BotDifficulty;
use allfours_bot::policy::{HeuristicAgent, RandomAgent};
use allfours_core::game::agent::Agent;
use allfours_core::game::events::NullObserver;
use allfours_core::game::match_state::{MatchState, MatchSummary};
use allfours_core::game::round::HandError;
use allfours_core::game::scoring::{AwardReason, ChalkAward};
use allfours_core::model::player::Seat;
use allfours_core::model::team::TeamId;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{AgentConfig, AgentKind, BenchConfig, ResolvedOutputs};
use report::Standings;

/// Plays the configured number of seeded matches and records each one.
pub struct TournamentRunner {
    config: BenchConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
}

/// What a finished run produced and where it went.
#[derive(Debug)]
pub struct RunSummary {
    pub matches_played: usize,
    pub rows_written: usize,
    pub wins: [usize; 2],
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

impl TournamentRunner {
    /// Turns each configured seat into a blueprint; the config must already be validated.
    pub fn new(config: BenchConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = AgentBlueprint::from_configs(&config.agents)?;
        if agents.len() != Seat::LOOP.len() {
            return Err(RunnerError::SeatCount {
                found: agents.len(),
            });
        }

        Ok(Self {
            config,
            outputs,
            agents,
        })
    }

    /// Execute every match, streaming one JSONL row per match to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.matches.seed.unwrap_or(0));
        let mut standings = Standings::new(self.seating());
        let mut rows_written = 0usize;

        for match_index in 0..self.config.matches.count {
            let match_seed = rng.next_u64();
            let summary = self.play_match(match_index, match_seed)?;
            let row = MatchLogRow::new(&self.config.run_id, match_index, &self.seating(), &summary);
            standings.record(&row);

            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;
        }

        writer.flush()?;
        standings.write_markdown(&self.outputs.summary_md, &self.config)?;

        Ok(RunSummary {
            matches_played: self.config.matches.count,
            rows_written,
            wins: standings.wins(),
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    fn play_match(&self, match_index: usize, match_seed: u64) -> Result<MatchSummary, RunnerError> {
        let mut agents = self.spawn_table(match_seed);
        let mut state = MatchState::with_seed_and_target(match_seed, self.config.matches.target_chalk);
        let summary = state
            .play_match(&mut agents, &mut NullObserver)
            .map_err(|source| RunnerError::Match {
                index: match_index,
                source,
            })?;

        event!(
            target: "allfours_bench",
            Level::INFO,
            run_id = %self.config.run_id,
            match_index,
            match_seed,
            winner = ?summary.winner,
            chalk = ?summary.chalk,
            hands = summary.hands_played,
            redeals = summary.redeals,
            "match finished"
        );
        Ok(summary)
    }

    fn spawn_table(&self, match_seed: u64) -> [Box<dyn Agent>; 4] {
        Seat::LOOP.map(|seat| self.agents[seat.index()].spawn(match_seed, seat))
    }

    /// Agent names in seat order North, East, South, West.
    fn seating(&self) -> Vec<String> {
        self.agents.iter().map(|agent| agent.name.clone()).collect()
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Chalk won per category, indexed by team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AwardTally {
    pub kick: [u32; 2],
    pub begged: [u32; 2],
    pub high: [u32; 2],
    pub low: [u32; 2],
    pub jack_ran: [u32; 2],
    pub jack_hung: [u32; 2],
    pub game: [u32; 2],
}

impl AwardTally {
    pub fn add(&mut self, award: &ChalkAward) {
        let slot = match award.reason {
            AwardReason::Kick { .. } => &mut self.kick,
            AwardReason::Begged => &mut self.begged,
            AwardReason::High { .. } => &mut self.high,
            AwardReason::Low { .. } => &mut self.low,
            AwardReason::RanJack => &mut self.jack_ran,
            AwardReason::HungJack => &mut self.jack_hung,
            AwardReason::Game { .. } => &mut self.game,
        };
        slot[award.team.index()] += award.chalk;
    }

    pub fn merge(&mut self, other: &AwardTally) {
        for (mine, theirs) in self.rows_mut().into_iter().zip(other.rows()) {
            mine[0] += theirs[0];
            mine[1] += theirs[1];
        }
    }

    /// Per-team chalk for each category, in the order of `LABELS`.
    pub fn rows(&self) -> [[u32; 2]; 7] {
        [
            self.kick,
            self.begged,
            self.high,
            self.low,
            self.jack_ran,
            self.jack_hung,
            self.game,
        ]
    }

    fn rows_mut(&mut self) -> [&mut [u32; 2]; 7] {
        [
            &mut self.kick,
            &mut self.begged,
            &mut self.high,
            &mut self.low,
            &mut self.jack_ran,
            &mut self.jack_hung,
            &mut self.game,
        ]
    }

    pub const LABELS: [&'static str; 7] = [
        "Kick", "Begged", "High", "Low", "Ran Jack", "Hung Jack", "Game",
    ];
}

/// One JSONL row per match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchLogRow {
    pub run_id: String,
    pub match_id: String,
    pub match_index: usize,
    pub match_seed: u64,
    pub seating: Vec<String>,
    pub first_dealer: Seat,
    pub winner: Option<TeamId>,
    pub chalk: [u32; 2],
    pub hands: u32,
    pub redeals: u32,
    pub awards: AwardTally,
}

impl MatchLogRow {
    fn new(run_id: &str, match_index: usize, seating: &[String], summary: &MatchSummary) -> Self {
        let mut awards = AwardTally::default();
        for award in summary.hands.iter().flat_map(|hand| hand.awards.iter()) {
            awards.add(award);
        }
        Self {
            run_id: run_id.to_string(),
            match_id: format!("M{match_index:05}"),
            match_index,
            match_seed: summary.seed,
            seating: seating.to_vec(),
            first_dealer: summary.first_dealer,
            winner: summary.winner,
            chalk: summary.chalk,
            hands: summary.hands_played,
            redeals: summary.redeals,
            awards,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("writing bench output: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("encoding match row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("match {index} failed: {source}")]
    Match {
        index: usize,
        #[source]
        source: HandError,
    },
    #[error("a table needs 4 agents, configuration has {found}")]
    SeatCount { found: usize },
    #[error(transparent)]
    Agent(#[from] AgentError),
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent '{name}' (heuristic): {message}")]
    InvalidHeuristicParam { name: String, message: String },
    #[error("agent '{name}' (random): {message}")]
    InvalidRandomParam { name: String, message: String },
}

struct AgentBlueprint {
    name: String,
    implementation: AgentImplementation,
}

enum AgentImplementation {
    Heuristic(HeuristicOptions),
    Random(RandomOptions),
}

impl AgentBlueprint {
    fn from_configs(configs: &[AgentConfig]) -> Result<Vec<Self>, AgentError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let implementation = match config.kind {
            AgentKind::Heuristic => AgentImplementation::Heuristic(HeuristicOptions::from_params(
                &config.name,
                &config.params,
            )?),
            AgentKind::Random => {
                AgentImplementation::Random(RandomOptions::from_params(&config.name, &config.params)?)
            }
        };

        Ok(Self {
            name: config.name.clone(),
            implementation,
        })
    }

    fn spawn(&self, match_seed: u64, seat: Seat) -> Box<dyn Agent> {
        match &self.implementation {
            AgentImplementation::Heuristic(opts) => Box::new(HeuristicAgent::new(opts.difficulty)),
            AgentImplementation::Random(opts) => Box::new(RandomAgent::with_seed(
                match_seed ^ opts.salt ^ (seat.index() as u64 + 1),
            )),
        }
    }
}

fn param<'a>(params: &'a serde_yaml::Value, key: &str) -> Option<&'a serde_yaml::Value> {
    params
        .as_mapping()?
        .iter()
        .find_map(|(k, value)| (k.as_str() == Some(key)).then_some(value))
}

struct HeuristicOptions {
    difficulty: BotDifficulty,
}

impl HeuristicOptions {
    fn from_params(name: &str, params: &serde_yaml::Value) -> Result<Self, AgentError> {
        let invalid = |message: String| AgentError::InvalidHeuristicParam {
            name: name.to_string(),
            message,
        };
        if !params.is_null() && !params.is_mapping() {
            return Err(invalid("expected mapping for heuristic params".to_string()));
        }

        let difficulty = match param(params, "difficulty") {
            Some(value) => {
                let text = value
                    .as_str()
                    .ok_or_else(|| invalid("difficulty must be a string".to_string()))?;
                BotDifficulty::parse(text)
                    .ok_or_else(|| invalid(format!("unknown difficulty '{text}'")))?
            }
            None => BotDifficulty::from_env(),
        };

        Ok(Self { difficulty })
    }
}

struct RandomOptions {
    salt: u64,
}

impl RandomOptions {
    fn from_params(name: &str, params: &serde_yaml::Value) -> Result<Self, AgentError> {
        let salt = match param(params, "seed") {
            Some(value) => value.as_u64().ok_or_else(|| AgentError::InvalidRandomParam {
                name: name.to_string(),
                message: "seed must be a non-negative integer".to_string(),
            })?,
            None => 0,
        };
        Ok(Self { salt })
    }
}
