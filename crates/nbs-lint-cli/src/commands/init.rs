//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// File name written by `init`.
pub const CONFIG_FILE: &str = "nbs-lint.toml";

const DEFAULT_CONFIG: &str = r#"# nbs-lint configuration

# Rule set: recommended | line-breaks | separators
preset = "recommended"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./internal"

# Glob patterns to exclude from analysis
exclude = [
    "**/vendor/**",
    "**/testdata/**",
]

# Respect .gitignore files
respect_gitignore = true

# Number of worker threads (default: one per CPU)
# parallelism = 4

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.brace-line-breaks]
enabled = true

[rules.defer-placement]
enabled = true

[rules.signature-gap]
enabled = true
# severity = "warning"  # Override default severity

[rules.separator-groups]
enabled = true
width = 80
test_prefixes = ["Test"]
"#;

/// Runs the init command, writing the config into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: nbs-lint check");

    Ok(())
}
