use crate::cmd::ParserArgs;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use tokio::fs;
use tracing::trace;
use ubb_parser::ParseOptions;

/// How to print a parsed document.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented tree, one node per line.
    #[default]
    Tree,

    /// Nested json.
    Json,

    /// Normalized ubb markup.
    Ubb,
}

/// Defaults for command line options, loaded from a toml file.
///
/// ```toml
/// format = "json"
/// fallback = "literal"
/// max_depth = 128
/// strict = false
/// ```
///
/// Options given on the command line override the ones here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub format: Option<OutputFormat>,

    pub fallback: Option<ubb_parser::FallbackPolicy>,

    pub max_depth: Option<usize>,

    pub strict: Option<bool>,
}

impl Config {
    pub async fn load(path: impl AsRef<str>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .await
            .with_context(|| format!("when reading config file {path}"))?;
        let config = Self::from_toml(data.as_str())?;
        trace!("loaded config: {config:?}");
        Ok(config)
    }

    fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).context("invalid config")
    }

    /// Parser options from command line args, falling back to config values.
    pub fn parse_options(&self, args: &ParserArgs) -> ParseOptions {
        let defaults = ParseOptions::default();
        ParseOptions {
            fallback: args
                .fallback
                .or(self.fallback)
                .unwrap_or(defaults.fallback),
            max_depth: args
                .max_depth
                .or(self.max_depth)
                .unwrap_or(defaults.max_depth),
        }
    }
}
