//! Smoke scenario runner
//!
//! This module provides the `smoke` subcommand, which drives a
//! `SparseSegmentTree<i64>` through a scripted sequence of inserts and
//! queries and checks every query that carries an expectation.

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use serde::{Deserialize, Serialize};
use sparse_segtree::SparseSegmentTree;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Arguments for the smoke subcommand
#[derive(Args, Debug, Default)]
pub struct SmokeArgs {
    /// Scenario YAML file path (defaults to the built-in reference scenario)
    #[arg(long, short = 's')]
    pub scenario: Option<PathBuf>,

    /// Override the lower bound of the key range
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<i64>,

    /// Override the upper bound of the key range
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<i64>,

    /// Print the Newick dump of the tree after every insert
    #[arg(long)]
    pub dump: bool,

    /// Print a JSON report to stdout
    #[arg(long)]
    pub json: bool,

    /// Log filter (overrides RUST_LOG), e.g. `debug` or `sparse_segtree=trace`
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Scenario configuration from YAML
#[derive(Debug, Deserialize)]
struct ScenarioConfig {
    name: Option<String>,
    min_value: Option<i64>,
    max_value: Option<i64>,
    #[serde(default)]
    steps: Vec<Step>,
}

/// A single scripted operation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    Insert {
        key: i64,
        delta: i64,
    },
    Query {
        begin: i64,
        end: i64,
        #[serde(default)]
        expect: Option<i64>,
    },
}

impl ScenarioConfig {
    /// The reference scenario over `[0, 100]`
    fn reference() -> Self {
        let query = |begin, end, expect| Step::Query {
            begin,
            end,
            expect: Some(expect),
        };
        Self {
            name: Some("reference".to_string()),
            min_value: Some(0),
            max_value: Some(100),
            steps: vec![
                Step::Insert { key: 20, delta: 2 },
                query(0, 10, 0),
                query(15, 20, 2),
                query(20, 25, 2),
                Step::Insert { key: 21, delta: 3 },
                query(15, 20, 2),
                query(21, 25, 3),
                query(15, 25, 5),
            ],
        }
    }
}

/// Resolved key range and scenario name
#[derive(Debug, PartialEq, Eq)]
struct SmokeEnv {
    name: String,
    min_value: i64,
    max_value: i64,
}

impl SmokeEnv {
    /// Resolve settings from CLI overrides, environment and scenario
    fn from_args_and_scenario(
        args: &SmokeArgs,
        scenario: &ScenarioConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        // Priority: CLI > Environment > Scenario YAML > Default

        let min_value = args
            .min
            .or_else(|| lookup("SMOKE_MIN_VALUE").and_then(|v| v.parse().ok()))
            .or(scenario.min_value)
            .unwrap_or(0);

        let max_value = args
            .max
            .or_else(|| lookup("SMOKE_MAX_VALUE").and_then(|v| v.parse().ok()))
            .or(scenario.max_value)
            .unwrap_or(100);

        let name = scenario
            .name
            .clone()
            .unwrap_or_else(|| "unnamed".to_string());

        Self {
            name,
            min_value,
            max_value,
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Serialize, PartialEq, Eq)]
struct SmokeReport {
    scenario: String,
    min_value: i64,
    max_value: i64,
    inserts: usize,
    queries: usize,
    checked: usize,
    node_count: usize,
    total: i64,
}

/// Run every step against a fresh tree
fn execute(smoke_env: &SmokeEnv, steps: &[Step], dump: bool) -> Result<SmokeReport> {
    let mut tree = SparseSegmentTree::<i64>::try_new(smoke_env.min_value, smoke_env.max_value)
        .context("Invalid key range")?;

    let mut report = SmokeReport {
        scenario: smoke_env.name.clone(),
        min_value: smoke_env.min_value,
        max_value: smoke_env.max_value,
        inserts: 0,
        queries: 0,
        checked: 0,
        node_count: 0,
        total: 0,
    };

    for (index, step) in steps.iter().enumerate() {
        match *step {
            Step::Insert { key, delta } => {
                tree.try_insert(key, delta)
                    .with_context(|| format!("Step {index}: insert({key}, {delta}) rejected"))?;
                report.inserts += 1;
                eprintln!("  [{index}] insert({key}, {delta:+})");
                if dump {
                    eprintln!("      {}", tree.newick());
                }
            }
            Step::Query { begin, end, expect } => {
                let actual = tree
                    .try_query(begin, end)
                    .with_context(|| format!("Step {index}: query({begin}, {end}) rejected"))?;
                report.queries += 1;
                eprintln!("  [{index}] query({begin}, {end}) = {actual}");

                if let Some(expected) = expect {
                    if actual != expected {
                        bail!(
                            "Step {index}: query({begin}, {end}) returned {actual}, expected {expected}"
                        );
                    }
                    report.checked += 1;
                }
            }
        }
    }

    tree.log_tree();
    report.node_count = tree.node_count();
    report.total = tree.total();
    Ok(report)
}

/// Install a stderr subscriber honoring `--log-level` or `RUST_LOG`
fn init_tracing(log_level: Option<&str>) -> Result<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level).context("Invalid log filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("Failed to install tracing subscriber: {error}"))
}

/// Get the project root directory
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    // xtask is in project_root/xtask, so go up one level
    manifest_dir.parent().unwrap_or(manifest_dir).to_path_buf()
}

/// Resolve a scenario path against the working directory, the project root
/// and the bundled scenarios directory, in that order
fn resolve_scenario_path(scenario: &Path, root: &Path) -> Result<PathBuf> {
    if scenario.is_absolute() || scenario.exists() {
        return Ok(scenario.to_path_buf());
    }

    let from_root = root.join(scenario);
    if from_root.exists() {
        return Ok(from_root);
    }

    let bundled = root.join("xtask/scenarios").join(scenario);
    if bundled.exists() {
        return Ok(bundled);
    }

    bail!(
        "Scenario file not found: {} or {}",
        from_root.display(),
        bundled.display()
    );
}

fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let content = fs::read_to_string(path).context("Failed to read scenario file")?;
    serde_yaml::from_str(&content).context("Failed to parse scenario YAML")
}

/// Main entry point for smoke command
pub fn run(args: &SmokeArgs) -> Result<()> {
    init_tracing(args.log_level.as_deref())?;

    let (scenario, source) = match &args.scenario {
        Some(path) => {
            let path = resolve_scenario_path(path, &project_root())?;
            (load_scenario(&path)?, path.display().to_string())
        }
        None => (ScenarioConfig::reference(), "built-in".to_string()),
    };

    let smoke_env = SmokeEnv::from_args_and_scenario(args, &scenario, |name| env::var(name).ok());

    eprintln!("==============================================");
    eprintln!("  Sparse Segment Tree Smoke Runner (xtask)");
    eprintln!("==============================================");
    eprintln!();
    eprintln!("Configuration:");
    eprintln!("  Scenario:  {} ({source})", smoke_env.name);
    eprintln!("  Key Range: [{}, {}]", smoke_env.min_value, smoke_env.max_value);
    eprintln!("  Steps:     {}", scenario.steps.len());
    eprintln!();

    let report = execute(&smoke_env, &scenario.steps, args.dump)?;
    tracing::info!(
        scenario = %report.scenario,
        node_count = report.node_count,
        total = report.total,
        "smoke scenario passed"
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    }

    eprintln!();
    eprintln!("  {} inserts, {} queries ({} checked)", report.inserts, report.queries, report.checked);
    eprintln!("  {} nodes materialized, total {}", report.node_count, report.total);
    eprintln!();

    Ok(())
}
