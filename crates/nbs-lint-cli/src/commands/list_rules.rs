//! List rules command implementation.

use nbs_lint_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<8} {:<20} {:<12} Description",
        "Code", "Name", "Category"
    );
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<20} {:<12} {}",
            rule.code(),
            rule.name(),
            rule.category(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for preset in [Preset::Recommended, Preset::LineBreaks, Preset::Separators] {
        let codes: Vec<&str> = preset.rules().iter().map(|r| r.code()).collect();
        println!("  {:<12} - {}", preset.name(), codes.join(", "));
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  nbs-lint check --rules brace-line-breaks,defer-placement");
    println!("  nbs-lint check --rules NBS001,NBS004");
}
