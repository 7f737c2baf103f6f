use std::fs;

use anyhow::Context;

use invguard_diff::{diff_inventories, InventoryDiff, KeyPatterns};
use invguard_gate::{GateResult, Limits, ThresholdGate, Verdict};
use invguard_types::Value;

use crate::cli::Cli;
use crate::config::{load_config, Defaults, Settings};
use crate::inventory::load_inventory;
use crate::report::Summary;

/// How a completed run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// The candidate breached a limit; carries the human-readable reason.
    Violation(String),
}

/// Everything produced by comparing two inventory trees.
#[derive(Debug)]
pub struct Comparison {
    pub diff: InventoryDiff,
    pub result: GateResult,
    pub summary: Summary,
}

/// Resolve, diff, and gate two parsed inventory trees.
pub fn compare_trees(
    current: &Value,
    candidate: &Value,
    limits: &Limits,
    set_like: &[String],
) -> anyhow::Result<Comparison> {
    limits.validate()?;
    let ignore = KeyPatterns::compile(&limits.ignored_key_regex)
        .context("invalid --ignore-key-regex")?;
    let set_like = KeyPatterns::compile(set_like).context("invalid --set-like-key-regex")?;
    tracing::debug!(
        ignore = ?ignore.sources().collect::<Vec<_>>(),
        set_like = ?set_like.sources().collect::<Vec<_>>(),
        "key patterns compiled"
    );

    let current_vars = invguard_resolve::resolve(current).context("current inventory")?;
    let candidate_vars = invguard_resolve::resolve(candidate).context("new inventory")?;

    let diff = diff_inventories(&current_vars, &candidate_vars, &ignore, &set_like);
    let result = ThresholdGate::with_default_rules(limits.clone()).evaluate(&diff.metrics());
    let summary = Summary::new(&diff, limits);

    Ok(Comparison {
        diff,
        result,
        summary,
    })
}

pub fn run_command(cli: Cli) -> anyhow::Result<Outcome> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let file = load_config(cli.config.as_deref(), &cwd)?;
    let settings = Settings::resolve(&cli, file, &Defaults::builtin())?;

    let current = load_inventory(&settings.current)?;
    let candidate = load_inventory(&settings.new)?;
    let cmp = compare_trees(
        &current,
        &candidate,
        &settings.limits,
        &settings.set_like_key_regex,
    )?;

    tracing::info!(
        current_hosts = cmp.summary.current_hosts,
        new_hosts = cmp.summary.new_hosts,
        common_hosts = cmp.diff.common_hosts,
        host_delta = cmp.summary.host_delta,
        var_changes_total = cmp.summary.var_changes_total,
        var_baseline_keys = cmp.summary.var_baseline_keys,
        "comparison complete"
    );

    if cli.json {
        println!("{}", cmp.summary.to_json()?);
    }
    if let Some(path) = &settings.json_out {
        fs::write(path, cmp.summary.to_json()? + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if let Some(path) = &settings.report {
        fs::write(path, cmp.summary.to_markdown())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    match cmp.result.verdict {
        Verdict::Pass => {
            // Under --json, stdout carries only the summary document.
            if !cli.json {
                println!("SEMANTIC GUARD: change volume OK.");
            }
            Ok(Outcome::Pass)
        }
        Verdict::Fail { rule, reason } => {
            tracing::debug!(%rule, "threshold exceeded");
            Ok(Outcome::Violation(reason))
        }
    }
}
