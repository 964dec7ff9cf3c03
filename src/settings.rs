use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_OUTPUT: &str = "htgf_portfolio_output.csv";

/// Run settings: defaults, then `HTGF_*` environment, then CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub report: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix("HTGF"))
    }

    fn from_env(env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("input_dir", ".")?
            .set_default("output", DEFAULT_OUTPUT)?
            .add_source(env)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn with_overrides(
        mut self,
        input_dir: Option<PathBuf>,
        output: Option<PathBuf>,
        report: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = input_dir {
            self.input_dir = dir;
        }
        if let Some(out) = output {
            self.output = out;
        }
        if report.is_some() {
            self.report = report;
        }
        self
    }
}
