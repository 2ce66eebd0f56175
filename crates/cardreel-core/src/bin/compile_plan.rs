//! Print the compilation plan for a clip list
//!
//! Usage: compile-plan <input.json> [--config <config.yaml>] [--strategy <name>] [--lenient]
//!
//! The input document looks like:
//!
//! ```json
//! {
//!   "clips": [{ "id": "c1", "categoryTags": ["Kpop"], "sourceStart": 12.0, "sourceEnd": 18.5 }],
//!   "loudness": [{ "clipId": "c1", "loudnessDb": -19.2 }]
//! }
//! ```
//!
//! Without `--config` the default config location is used, falling back to
//! defaults when that file is absent. `--strategy` overrides the configured
//! loudness strategy; unknown names are an error unless `--lenient` is given,
//! in which case they fall back to `average` like the desktop app does.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use cardreel_core::config::{
    default_config_path, load_config, try_load_config, CompilationConfig, CONFIG_FILENAME,
};
use cardreel_core::plan::CompilationPlan;
use cardreel_core::{Clip, LoudnessSample, LoudnessStrategy};

const USAGE: &str =
    "Usage: compile-plan <input.json> [--config <config.yaml>] [--strategy <name>] [--lenient]";

#[derive(Debug, Deserialize)]
struct PlanInput {
    clips: Vec<Clip>,
    #[serde(default)]
    loudness: Vec<LoudnessSample>,
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    input: PathBuf,
    config: Option<PathBuf>,
    strategy: Option<String>,
    lenient: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut input = None;
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--strategy" => {
                let name = args.next().context("--strategy needs a name")?;
                parsed.strategy = Some(name);
            }
            "--lenient" => parsed.lenient = true,
            flag if flag.starts_with("--") => bail!("Unknown flag: {}", flag),
            _ if input.is_none() => input = Some(PathBuf::from(&arg)),
            _ => bail!("Unexpected argument: {}", arg),
        }
    }
    parsed.input = input.context(USAGE)?;
    Ok(parsed)
}

/// Resolve a `--strategy` name, strictly unless `lenient` is set
fn parse_strategy(name: &str, lenient: bool) -> Result<LoudnessStrategy> {
    if lenient {
        return Ok(LoudnessStrategy::from_str_lenient(name));
    }
    let strategy = name.parse::<LoudnessStrategy>();
    strategy.context("Invalid --strategy")
}

fn main() -> Result<()> {
    // Set RUST_LOG=debug for per-step output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let mut config: CompilationConfig = match &args.config {
        Some(path) => try_load_config(path)?,
        None => load_config(&default_config_path(CONFIG_FILENAME)),
    };
    if let Some(name) = &args.strategy {
        config.loudness.strategy = parse_strategy(name, args.lenient)?;
    }

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input: {:?}", args.input))?;
    let input: PlanInput = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse input: {:?}", args.input))?;

    log::info!(
        "Planning {} clips ({} loudness samples), mode={}, strategy={}",
        input.clips.len(),
        input.loudness.len(),
        config.sequence.mode,
        config.loudness.strategy
    );

    let plan = CompilationPlan::build(&input.clips, &input.loudness, &config)
        .context("Failed to build compilation plan")?;

    let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args_flags() {
        let parsed = args(&["in.json", "--strategy", "median", "--lenient"]).unwrap();
        assert_eq!(parsed.input, PathBuf::from("in.json"));
        assert_eq!(parsed.strategy.as_deref(), Some("median"));
        assert!(parsed.lenient);
        assert_eq!(parsed.config, None);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&[]).is_err());
        assert!(args(&["in.json", "--strategy"]).is_err());
        assert!(args(&["in.json", "--verbose"]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_strict_strategy_rejects_unknown() {
        let fixed = parse_strategy("fixed", false).unwrap();
        assert_eq!(fixed, LoudnessStrategy::Fixed);
        assert!(parse_strategy("loudest", false).is_err());
    }

    #[test]
    fn test_lenient_strategy_falls_back_to_average() {
        let median = parse_strategy("median", true).unwrap();
        assert_eq!(median, LoudnessStrategy::Median);
        let unknown = parse_strategy("loudest", true).unwrap();
        assert_eq!(unknown, LoudnessStrategy::Average);
    }
}
