//! Rule presets for common configurations.

use crate::separator_groups::{self, SeparatorConfig};
use crate::{BraceLineBreaks, DeferPlacement, SeparatorGroups, SignatureGap};
use nbs_lint_core::{Config, RuleBox};

/// Preset configurations for nbs-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every rule.
    Recommended,
    /// Only the line-break rules.
    LineBreaks,
    /// Only the separator rule.
    Separators,
}

impl Preset {
    /// Looks up a preset by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "line-breaks" => Some(Self::LineBreaks),
            "separators" => Some(Self::Separators),
            _ => None,
        }
    }

    /// Configuration name of this preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::LineBreaks => "line-breaks",
            Self::Separators => "separators",
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        self.rules_with(SeparatorConfig::default())
    }

    fn rules_with(self, separators: SeparatorConfig) -> Vec<RuleBox> {
        match self {
            Self::Recommended => {
                let mut rules = line_break_rules();
                rules.push(Box::new(SeparatorGroups::with_config(separators)));
                rules
            }
            Self::LineBreaks => line_break_rules(),
            Self::Separators => vec![Box::new(SeparatorGroups::with_config(separators))],
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `brace-line-breaks` (NBS001)
/// - `defer-placement` (NBS002)
/// - `signature-gap` (NBS003)
/// - `separator-groups` (NBS004)
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    Preset::Recommended.rules()
}

/// Returns the line-break rules.
#[must_use]
pub fn line_break_rules() -> Vec<RuleBox> {
    vec![
        Box::new(BraceLineBreaks::new()),
        Box::new(DeferPlacement::new()),
        Box::new(SignatureGap::new()),
    ]
}

/// Returns the separator rule with default settings.
#[must_use]
pub fn separator_rules() -> Vec<RuleBox> {
    Preset::Separators.rules()
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    Preset::Recommended.rules()
}

/// Builds the rules of `preset` with rule options taken from `config`.
///
/// Enabling, disabling and severity overrides are applied by the analyzer,
/// not here.
#[must_use]
pub fn configured_rules(preset: Preset, config: &Config) -> Vec<RuleBox> {
    let separators = config
        .rules
        .get(separator_groups::NAME)
        .map(SeparatorConfig::from_rule_config)
        .unwrap_or_default();
    preset.rules_with(separators)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert_eq!(
            names(&Preset::Recommended.rules()),
            vec![
                "brace-line-breaks",
                "defer-placement",
                "signature-gap",
                "separator-groups"
            ]
        );
        assert_eq!(names(&Preset::LineBreaks.rules()).len(), 3);
        assert_eq!(names(&Preset::Separators.rules()), vec!["separator-groups"]);
        assert_eq!(all_rules().len(), recommended_rules().len());
        assert_eq!(separator_rules().len(), 1);
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in [Preset::Recommended, Preset::LineBreaks, Preset::Separators] {
            assert_eq!(Preset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(Preset::from_name("strict"), None);
    }

    #[test]
    fn configured_rules_read_separator_options() {
        let config = Config::parse("[rules.separator-groups]\nwidth = 4\n").unwrap();
        let rules = configured_rules(Preset::Separators, &config);

        let src = "package demo\n\n////\n\nvar x = 1\n";
        let violations = crate::test_support::run(rules[0].as_ref(), src);
        assert!(violations.is_empty());

        let defaults = crate::test_support::run(separator_rules()[0].as_ref(), src);
        assert_eq!(defaults.len(), 1);
    }
}
