//! End-to-end checks of the built-in rules over Go fixtures.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use nbs_lint_core::{Analyzer, FileContext, SourceParser, Violation};
use nbs_lint_go::GoParser;
use nbs_lint_rules::{recommended_rules, SeparatorGroups};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures().join(name)).unwrap()
}

fn check(src: &str) -> Vec<Violation> {
    let file = GoParser::new().parse(src).unwrap();
    let ctx = FileContext::new(Path::new("fixture.go"), src, Path::new(""));
    let mut violations: Vec<Violation> = recommended_rules()
        .iter()
        .flat_map(|rule| rule.check(&ctx, &file))
        .collect();
    violations.sort_by_key(|v| (v.location.line, v.location.column));
    violations
}

fn render(violations: &[Violation]) -> String {
    let mut out = String::new();
    for v in violations {
        let _ = writeln!(
            out,
            "{}:{} {} {}",
            v.location.line, v.location.column, v.code, v.message
        );
    }
    out.trim_end().to_string()
}

#[test]
fn compliant_fixture_has_no_violations() {
    assert_eq!(render(&check(&fixture("compliant.go"))), "");
}

#[test]
fn violations_fixture() {
    let violations = check(&fixture("violations.go"));
    insta::assert_snapshot!(render(&violations), @r"
    19:2 NBS001 Line break after closing } is required.
    25:9 NBS003 Line break after multiline function signature is required
    28:2 NBS002 Line break before 'defer' statement is not allowed.
    33:1 NBS001 Line break before closing } is not allowed.
    35:1 NBS004 Function 'helper' which is not a constructor for struct 'Store' is not allowed in the same group as struct 'Store'
    37:81 NBS004 Empty section detected: no declarations found between consecutive separators
    ");
}

#[test]
fn running_twice_gives_the_same_diagnostics() {
    let src = fixture("violations.go");
    assert_eq!(check(&src), check(&src));
}

#[test]
fn unexported_function_breaks_an_exported_group() {
    let base = "package demo\n\nimport \"fmt\"\n\n////\n\nfunc Run() {\n\tfmt.Println()\n}\n";
    let rule = SeparatorGroups::new().width(4);
    let run = |src: &str| {
        let file = GoParser::new().parse(src).unwrap();
        let ctx = FileContext::new(Path::new("demo.go"), src, Path::new(""));
        nbs_lint_core::Rule::check(&rule, &ctx, &file)
    };
    assert!(run(base).is_empty());

    let extended = format!("{base}\nfunc helper() {{\n\tfmt.Println()\n}}\n");
    let messages: Vec<String> = run(&extended).into_iter().map(|v| v.message).collect();
    assert_eq!(
        messages,
        vec!["Mixing public and private methods in the same group is not allowed"]
    );
}

#[test]
fn analyzer_over_fixture_directory() {
    let mut builder = Analyzer::builder().root(fixtures()).parser(GoParser::new());
    for rule in recommended_rules() {
        builder = builder.rule_box(rule);
    }
    let result = builder.build().unwrap().analyze().unwrap();

    assert_eq!(result.files_checked, 2);
    assert!(result.failures.is_empty());
    assert!(result.has_errors());
    assert_eq!(result.violations.len(), 6);
    assert!(result
        .violations
        .iter()
        .all(|v| v.location.file == Path::new("violations.go")));
}
