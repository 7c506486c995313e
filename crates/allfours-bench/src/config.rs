use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

use allfours_core::model::score::WINNING_CHALK;

const SEATS: usize = 4;

/// Root bench configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchConfig {
    pub run_id: String,
    pub matches: MatchesConfig,
    pub agents: Vec<AgentConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchConfig {
    /// Read, parse and validate a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) => return Err(ConfigError::Read { source, path }),
        };
        let mut cfg: BenchConfig = match serde_yaml::from_str(&text) {
            Ok(cfg) => cfg,
            Err(source) => return Err(ConfigError::Parse { source, path }),
        };
        if let Err(source) = cfg.validate() {
            return Err(ConfigError::Invalid { source, path });
        }
        Ok(cfg)
    }

    /// Checks every section and fills in defaults. No I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        check_identifier("run_id", &self.run_id)?;
        self.matches.validate()?;
        self.outputs.validate(&self.run_id)?;
        if self.logging.tracing_level.trim().is_empty() {
            self.logging.tracing_level = default_tracing_level();
        }
        validate_agents(&mut self.agents)
    }

    /// Output paths with `{run_id}` substituted.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MatchesConfig {
    pub count: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_target_chalk")]
    pub target_chalk: u32,
}

impl MatchesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::field(
                "matches.count",
                "at least one match is required",
            ));
        }
        if self.target_chalk == 0 {
            return Err(ValidationError::field(
                "matches.target_chalk",
                "a match needs a positive chalk target",
            ));
        }
        Ok(())
    }
}

fn default_target_chalk() -> u32 {
    WINNING_CHALK
}

/// One seat at the table. Agents are seated North, East, South, West in list order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    pub kind: AgentKind,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Heuristic,
    Random,
}

/// Output templates; `{run_id}` is replaced when resolved.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let templates = [("outputs.jsonl", &self.jsonl), ("outputs.summary_md", &self.summary_md)];
        for (field, template) in templates {
            let resolved = resolve_template(run_id, template.trim());
            if resolved.file_name().is_none() {
                return Err(ValidationError::field(field, "must name a file"));
            }
        }
        if self.jsonl == self.summary_md {
            return Err(ValidationError::field(
                "outputs",
                "match rows and summary cannot share a file",
            ));
        }
        Ok(())
    }
}

/// Structured logs are off unless asked for.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Option<Level> {
        self.tracing_level.trim().parse().ok()
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

/// Run ids and agent names end up in file paths and log fields.
fn check_identifier(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::field(field, "must not be empty"));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if let Some(bad) = value.chars().find(|&c| !allowed(c)) {
        return Err(ValidationError::field(
            field,
            format!("'{value}' contains '{bad}'; use letters, digits, '.', '_' or '-'"),
        ));
    }
    Ok(())
}

fn validate_agents(agents: &mut [AgentConfig]) -> Result<(), ValidationError> {
    if agents.len() != SEATS {
        return Err(ValidationError::field(
            "agents",
            format!("a table seats exactly {SEATS} agents, found {}", agents.len()),
        ));
    }

    let mut seen = HashSet::new();
    for (seat, agent) in agents.iter_mut().enumerate() {
        check_identifier(&format!("agents[{seat}].name"), &agent.name)?;
        if !seen.insert(agent.name.clone()) {
            return Err(ValidationError::field(
                "agents",
                format!("agent name '{}' defined more than once", agent.name),
            ));
        }
        if agent.params.is_null() {
            agent.params = serde_yaml::Value::Mapping(Default::default());
        }
    }
    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("{} is invalid: {source}", path.display())]
    Invalid {
        #[source]
        source: ValidationError,
        path: PathBuf,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

impl ValidationError {
    fn field(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "pitch_smoke"
matches:
  count: 8
  seed: 123
agents:
  - name: "north"
    kind: "heuristic"
    params:
      difficulty: "normal"
  - name: "east"
    kind: "random"
  - name: "south"
    kind: "heuristic"
  - name: "west"
    kind: "heuristic"
    params:
      difficulty: "easy"
outputs:
  jsonl: "bench/out/{run_id}/matches.jsonl"
  summary_md: "bench/out/{run_id}/summary.md"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: BenchConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.matches.target_chalk, WINNING_CHALK);
        assert_eq!(cfg.agents[1].kind, AgentKind::Random);
        assert!(cfg.agents[1].params.is_mapping());
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("bench/out/pitch_smoke/matches.jsonl")
        );
    }

    #[test]
    fn rejects_wrong_seat_count() {
        let yaml = BASIC_YAML.replace("  - name: \"east\"\n    kind: \"random\"\n", "");
        let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "agents"
        ));
    }

    #[test]
    fn rejects_duplicate_agents() {
        let yaml = BASIC_YAML.replace("name: \"east\"", "name: \"north\"");
        let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(err.to_string().contains("defined more than once"));
    }

    #[test]
    fn rejects_zero_matches_and_bad_run_id() {
        let yaml = BASIC_YAML.replace("count: 8", "count: 0");
        let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(cfg.validate().is_err());

        let yaml = BASIC_YAML.replace("pitch_smoke", "pitch smoke");
        let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "run_id"
        ));
    }

    #[test]
    fn rejects_shared_output_file() {
        let yaml = BASIC_YAML.replace("summary.md", "matches.jsonl");
        let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(err.to_string().starts_with("outputs:"));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = BenchConfig::from_path("does/not/exist.yaml").expect_err("missing");
        assert_eq!(err.path(), Path::new("does/not/exist.yaml"));
    }
}
