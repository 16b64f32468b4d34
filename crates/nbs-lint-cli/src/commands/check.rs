//! Check command implementation.

use anyhow::{Context, Result};
use nbs_lint_core::{Analyzer, Config, RuleBox};
use nbs_lint_go::GoParser;
use nbs_lint_rules::{configured_rules, Preset};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Flags of the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run instead of the preset.
    pub rules: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Record files with syntax errors as failures.
    pub strict_parse: bool,
}

/// Runs the check command.
///
/// Without `path` the analyzer root comes from the config.
///
/// Returns `false` when an error-severity violation was found or a file
/// could not be analyzed.
pub fn run(
    path: Option<&Path>,
    options: &CheckOptions,
    source: &ConfigSource,
) -> Result<bool> {
    let config = load_config(source)?;
    let preset = resolve_preset(&config)?;

    let rules = match &options.rules {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(configured_rules(Preset::Recommended, &config), &names)
        }
        None => configured_rules(preset, &config),
    };

    // Build analyzer
    let mut builder = Analyzer::builder()
        .parser(GoParser::new())
        .config(config)
        .excludes(options.exclude.iter().cloned())
        .fail_on_parse_error(options.strict_parse);
    if let Some(path) = path {
        builder = builder.root(path);
    }

    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules (preset: {})",
        analyzer.root().display(),
        analyzer.rule_count(),
        preset.name()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.root())?;

    Ok(!result.has_errors() && !result.has_failures())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    if source.is_global() {
        tracing::info!("Using global config: {source}");
    } else {
        tracing::debug!("Using config: {source}");
    }
    source
        .load()
        .with_context(|| format!("Failed to load config: {source}"))
}

fn resolve_preset(config: &Config) -> Result<Preset> {
    match config.preset.as_deref() {
        None => Ok(Preset::Recommended),
        Some(name) => Preset::from_name(name).with_context(|| {
            format!("Unknown preset '{name}' (expected recommended, line-breaks or separators)")
        }),
    }
}

fn filter_rules(available: Vec<RuleBox>, names: &[&str]) -> Vec<RuleBox> {
    for name in names {
        if !available
            .iter()
            .any(|rule| rule.name() == *name || rule.code() == *name)
        {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    available
        .into_iter()
        .filter(|rule| names.contains(&rule.name()) || names.contains(&rule.code()))
        .collect()
}
