//! Rule validating separator comments and the declaration groups they delimit.
//!
//! # Rationale
//!
//! A separator is a comment made of a fixed run of slashes (80 by default).
//! Separators split a file into groups of top-level declarations, and each
//! group is meant to hold one logical entity: a struct with its constructors
//! and methods, one interface, a block of constants, a set of tests.
//!
//! # Detected Patterns
//!
//! - Separators at the end of the file, before the imports, or before the
//!   `package` clause
//! - Separators that are part of a longer comment or sit on a code line
//! - Separators not surrounded by exactly one empty line
//! - Two separators with nothing between them
//! - A file without imports whose first separator does not follow the
//!   `package` clause after one empty line
//! - Groups mixing declaration kinds, holding several structs or interfaces,
//!   mixing exported with unexported or test with non-test functions, mixing
//!   receivers, or holding functions unrelated to the group's struct
//!
//! # Configuration
//!
//! - `width`: number of slashes forming a separator (default: 80)
//! - `test_prefixes`: name prefixes marking test functions (default: `["Test"]`)

use nbs_lint_core::{
    Category, Comment, Decl, FileContext, FuncDecl, GoFile, Rule, RuleConfig, Severity, Span,
    Violation,
};

use crate::constructor::is_constructor_of;
use crate::declaration::{classify, Classification, DeclKind, FunctionTraits};

/// Rule code for separator-groups.
pub const CODE: &str = "NBS004";

/// Rule name for separator-groups.
pub const NAME: &str = "separator-groups";

/// Default number of slashes in a separator.
pub const DEFAULT_WIDTH: usize = 80;

/// Message for a separator after the last declaration.
pub const TRAILING_SEPARATOR: &str = "Separators at the end of the file are not allowed";
/// Message for a separator above the `package` clause.
pub const BEFORE_PACKAGE: &str = "Separator is not allowed before package declaration";
/// Message for a separator above the last import.
pub const BEFORE_IMPORTS: &str = "Separator is not allowed before imports";
/// Message for a separator inside a longer comment.
pub const MULTILINE_SEPARATOR: &str = "Separator is not allowed a part of multiline comment";
/// Message for a separator sharing lines with a declaration.
pub const OVER_CODE: &str = "Separator is not allowed over code";
/// Message for wrong spacing around a separator.
pub const SPACING: &str = "Each Separator should be surrounded by exactly one empty line";
/// Message for two separators without declarations in between.
pub const EMPTY_SECTION: &str =
    "Empty section detected: no declarations found between consecutive separators";
/// Message for a file without imports lacking the separator after `package`.
pub const MISSING_AFTER_PACKAGE: &str =
    "Missing Separator after package declaration when no imports present";
/// Message for several structs or interfaces in one group.
pub const SINGLE_STRUCT_OR_INTERFACE: &str =
    "Only one interface or struct declaration is allowed between separators";
/// Message for a `type` declaration with several specs.
pub const MULTI_SPEC_TYPE: &str = "Type declaration should have exactly one spec";
/// Message for a declaration the parser could not interpret.
pub const UNKNOWN_DECLARATION: &str = "Unknown declaration type found in bucket, might be a bug";
/// Message for test and non-test functions in one group.
pub const MIXED_TESTING: &str = "Mixing testing and code methods in the same group is not allowed";
/// Message for exported and unexported functions in one group.
pub const MIXED_VISIBILITY: &str =
    "Mixing public and private methods in the same group is not allowed";
/// Prefix of the message for functions with different receivers in one group.
pub const MIXED_RECEIVERS: &str =
    "Mixing methods with different receivers in the same group is not allowed";

/// Settings of the separator engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorConfig {
    /// Number of consecutive slashes forming a separator.
    pub width: usize,
    /// Function name prefixes that mark test functions.
    pub test_prefixes: Vec<String>,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            test_prefixes: vec!["Test".to_string()],
        }
    }
}

impl SeparatorConfig {
    /// Reads `width` and `test_prefixes` from a rule's configuration,
    /// falling back to the defaults for missing or invalid values.
    #[must_use]
    pub fn from_rule_config(config: &RuleConfig) -> Self {
        let defaults = Self::default();
        let width = usize::try_from(config.get_int("width", 0))
            .ok()
            .filter(|&w| w > 0)
            .unwrap_or(defaults.width);
        let test_prefixes = config.get_str_array("test_prefixes");
        Self {
            width,
            test_prefixes: if test_prefixes.is_empty() {
                defaults.test_prefixes
            } else {
                test_prefixes
            },
        }
    }

    /// The separator text.
    #[must_use]
    pub fn token(&self) -> String {
        "/".repeat(self.width)
    }
}

/// Consecutive comments separated by whitespace holding at most one line
/// break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    /// From the first comment's start to the last comment's end.
    pub span: Span,
    /// Raw texts of the member comments, concatenated.
    pub text: String,
}

/// Groups `comments` (sorted by position).
///
/// A comment that follows code on its line starts a group that only
/// continues on that same line.
#[must_use]
pub fn comment_groups(ctx: &FileContext, comments: &[Comment]) -> Vec<CommentGroup> {
    let mut groups: Vec<CommentGroup> = Vec::new();
    let mut after_code = false;

    for comment in comments {
        if let Some(group) = groups.last_mut() {
            let between = ctx
                .content
                .get(group.span.end..comment.span.start)
                .unwrap_or("");
            let line_breaks = between.matches('\n').count();
            let allowed = if after_code { 0 } else { 1 };
            if between.trim().is_empty() && line_breaks <= allowed {
                group.span.end = comment.span.end;
                group.text.push_str(&comment.text);
                continue;
            }
        }

        let line_start = ctx
            .positions
            .line_start(ctx.line_of(comment.span.start))
            .unwrap_or(comment.span.start);
        after_code = !ctx
            .content
            .get(line_start..comment.span.start)
            .unwrap_or("")
            .trim()
            .is_empty();
        groups.push(CommentGroup {
            span: comment.span,
            text: comment.text.clone(),
        });
    }

    groups
}

/// Spans of the comment groups containing the separator, sorted by
/// position.
#[must_use]
pub fn find_separators(ctx: &FileContext, file: &GoFile, config: &SeparatorConfig) -> Vec<Span> {
    let token = config.token();
    let mut separators: Vec<Span> = comment_groups(ctx, &file.comments)
        .into_iter()
        .filter(|group| group.text.contains(&token))
        .map(|group| group.span)
        .collect();
    separators.sort();
    separators
}

/// Splits `decls` into `separators.len() + 1` buckets.
///
/// A declaration goes to bucket `i`, where `i` is the number of separators
/// ending at or before the declaration's start.
#[must_use]
pub fn partition<'d>(separators: &[Span], decls: &[&'d Decl]) -> Vec<Vec<&'d Decl>> {
    let mut buckets = vec![Vec::new(); separators.len() + 1];
    for decl in decls {
        let start = decl.span().start;
        let index = separators.iter().filter(|sep| sep.end <= start).count();
        buckets[index].push(*decl);
    }
    buckets
}

/// Validates separators and the declaration groups between them.
#[derive(Debug, Clone)]
pub struct SeparatorGroups {
    config: SeparatorConfig,
    severity: Severity,
}

impl Default for SeparatorGroups {
    fn default() -> Self {
        Self::new()
    }
}

impl SeparatorGroups {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SeparatorConfig::default())
    }

    /// Creates a rule with the given settings.
    #[must_use]
    pub fn with_config(config: SeparatorConfig) -> Self {
        Self {
            config,
            severity: Severity::Error,
        }
    }

    /// Sets the separator width.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.config.width = width;
        self
    }

    /// Sets the test-function name prefixes.
    #[must_use]
    pub fn test_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.test_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the engine settings.
    #[must_use]
    pub fn config(&self) -> &SeparatorConfig {
        &self.config
    }
}

impl Rule for SeparatorGroups {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn category(&self) -> Category {
        Category::Separator
    }

    fn description(&self) -> &'static str {
        "Checks separator comments and the declaration groups they delimit"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, file: &GoFile) -> Vec<Violation> {
        SeparatorPass::new(self, ctx, file).run()
    }
}

/// State of one file's separator analysis.
struct SeparatorPass<'a, 'src> {
    rule: &'a SeparatorGroups,
    ctx: &'a FileContext<'src>,
    file: &'a GoFile,
    separators: Vec<Span>,
    decls: Vec<&'a Decl>,
    imports: Vec<Span>,
    violations: Vec<Violation>,
}

impl<'a, 'src> SeparatorPass<'a, 'src> {
    fn new(rule: &'a SeparatorGroups, ctx: &'a FileContext<'src>, file: &'a GoFile) -> Self {
        let mut decls: Vec<&Decl> = file.decls.iter().collect();
        decls.sort_by_key(|decl| decl.span());
        let mut imports = file.imports.clone();
        imports.sort();

        Self {
            rule,
            ctx,
            file,
            separators: find_separators(ctx, file, &rule.config),
            decls,
            imports,
            violations: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Violation> {
        self.trailing_separator();
        self.leading_separator();
        self.multiline_separators();
        self.separators_over_code();
        self.spacing();
        self.empty_sections();
        self.separator_after_package();
        self.groups();
        self.violations
    }

    fn report(&mut self, span: Span, message: impl Into<String>) {
        let violation = self.rule.report(self.ctx.location(span), message);
        self.violations.push(violation);
    }

    /// First and last line touched by `span`.
    fn lines(&self, span: Span) -> (usize, usize) {
        let last = span.end.max(span.start + 1) - 1;
        (self.ctx.line_of(span.start), self.ctx.line_of(last))
    }

    fn trailing_separator(&mut self) {
        let (Some(&last_separator), Some(last_decl)) = (self.separators.last(), self.decls.last())
        else {
            return;
        };
        if last_separator.start > last_decl.span().end {
            self.report(last_separator, TRAILING_SEPARATOR);
        }
    }

    fn leading_separator(&mut self) {
        let Some(&first) = self.separators.first() else {
            return;
        };
        match self.imports.last().copied() {
            None if first.end <= self.file.package.start => {
                self.report(first, BEFORE_PACKAGE);
            }
            Some(last_import) if first.start < last_import.end => {
                self.report(first, BEFORE_IMPORTS);
            }
            _ => {}
        }
    }

    fn multiline_separators(&mut self) {
        for separator in self.separators.clone() {
            let (first, last) = self.lines(separator);
            if first != last {
                self.report(separator, MULTILINE_SEPARATOR);
            }
        }
    }

    fn separators_over_code(&mut self) {
        for separator in self.separators.clone() {
            let (sep_first, sep_last) = self.lines(separator);
            let overlaps = self.decls.iter().any(|decl| {
                let (decl_first, decl_last) = self.lines(decl.span());
                sep_first <= decl_last && sep_last >= decl_first
            });
            if overlaps {
                self.report(separator, OVER_CODE);
            }
        }
    }

    fn spacing(&mut self) {
        let ctx = self.ctx;
        let source = &ctx.source;
        let mut misplaced = Vec::new();
        for &separator in &self.separators {
            let (first, last) = self.lines(separator);
            let before = source.blank_lines_before(first);
            let after = source.blank_lines_after(last);

            let surrounded = before == 1 && after == 1;
            let at_end = last == source.last_line() && before == 1 && after == 0;
            let at_start = first == 0 && before == 0 && after == 1;
            if !(surrounded || at_end || at_start) {
                misplaced.push(separator);
            }
        }
        for separator in misplaced {
            self.report(separator, SPACING);
        }
    }

    fn empty_sections(&mut self) {
        let pairs: Vec<(Span, Span)> = self
            .separators
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        for (current, next) in pairs {
            let has_decl = self.decls.iter().any(|decl| {
                let span = decl.span();
                span.start > current.end && span.end < next.start
            });
            if !has_decl {
                self.report(Span::new(current.end, next.start), EMPTY_SECTION);
            }
        }
    }

    fn separator_after_package(&mut self) {
        if !self.imports.is_empty() {
            return;
        }

        let package = self.file.package;
        let expected_line = self.ctx.line_of(package.start) + 2;
        let placed = self
            .separators
            .first()
            .is_some_and(|first| self.ctx.line_of(first.start) == expected_line);
        if !placed {
            self.report(Span::new(package.start, package.start), MISSING_AFTER_PACKAGE);
        }
    }

    fn groups(&mut self) {
        for bucket in partition(&self.separators, &self.decls) {
            if !bucket.is_empty() {
                self.check_bucket(&bucket);
            }
        }
    }

    fn check_bucket(&mut self, bucket: &[&'a Decl]) {
        // kinds in first-appearance order, with their declarations
        let mut kinds: Vec<(DeclKind, Vec<&'a Decl>)> = Vec::new();
        let mut classified: Vec<&'a Decl> = Vec::new();
        for &decl in bucket {
            let classification = classify(decl);
            match classification {
                Classification::Unknown => self.report(decl.span(), UNKNOWN_DECLARATION),
                Classification::MultiSpecType => self.report(decl.span(), MULTI_SPEC_TYPE),
                Classification::Kind(_) => {}
            }
            let Some(kind) = classification.kind() else {
                continue;
            };
            classified.push(decl);
            match kinds.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, decls)) => decls.push(decl),
                None => kinds.push((kind, vec![decl])),
            }
        }

        for single in [DeclKind::Interface, DeclKind::Struct] {
            let Some((_, decls)) = kinds.iter().find(|(k, _)| *k == single) else {
                continue;
            };
            if decls.len() > 1 {
                if let (Some(first), Some(last)) = (decls.first(), decls.last()) {
                    let span = Span::new(first.span().start, last.span().end);
                    self.report(span, SINGLE_STRUCT_OR_INTERFACE);
                }
                return;
            }
        }

        let funcs: Vec<&'a FuncDecl> = classified
            .iter()
            .copied()
            .filter_map(|decl| match decl {
                Decl::Func(func) => Some(func),
                _ => None,
            })
            .collect();

        if let [(kind, _)] = kinds.as_slice() {
            if kind.stands_alone() {
                return;
            }
            if *kind == DeclKind::Func {
                self.function_groups(&funcs);
                return;
            }
        }

        let mixable = kinds
            .iter()
            .all(|(kind, _)| matches!(kind, DeclKind::Func | DeclKind::Struct));
        if kinds.len() > 2 || !mixable {
            let names: Vec<&str> = kinds.iter().map(|(kind, _)| kind.as_str()).collect();
            let message = format!(
                "Forbidden declarations within the same group: {}",
                names.join(", ")
            );
            for decl in classified {
                self.report(decl.span(), message.clone());
            }
            return;
        }

        // Only test/code mixing: a constructor and its methods always differ
        // in receiver, and may differ in visibility.
        self.mixed_testing(&funcs);

        let struct_name = kinds
            .iter()
            .find(|(kind, _)| *kind == DeclKind::Struct)
            .and_then(|(_, decls)| decls.first())
            .and_then(|decl| match decl {
                Decl::Gen(general) => general.type_specs.first(),
                _ => None,
            })
            .map(|spec| spec.name.as_str());
        if let Some(struct_name) = struct_name {
            self.struct_adjacency(&funcs, struct_name);
        }
    }

    fn traits(&self, funcs: &[&'a FuncDecl]) -> Vec<FunctionTraits<'a>> {
        funcs
            .iter()
            .map(|func| FunctionTraits::of(func, &self.rule.config.test_prefixes))
            .collect()
    }

    fn function_groups(&mut self, funcs: &[&'a FuncDecl]) {
        self.mixed_visibility(funcs);
        self.mixed_testing(funcs);
        self.mixed_receivers(funcs);
    }

    fn mixed_visibility(&mut self, funcs: &[&'a FuncDecl]) {
        let traits = self.traits(funcs);
        let Some(first) = traits.first() else {
            return;
        };
        if let Some(from) = traits.iter().position(|t| t.exported != first.exported) {
            for func in &funcs[from..] {
                self.report(func.span, MIXED_VISIBILITY);
            }
        }
    }

    fn mixed_testing(&mut self, funcs: &[&'a FuncDecl]) {
        // (receiver, exported, testing) in first-appearance order, with the
        // first function of each
        let mut groups: Vec<((Option<&str>, bool, bool), &FuncDecl)> = Vec::new();
        for (traits, func) in self.traits(funcs).into_iter().zip(funcs) {
            let key = (traits.receiver, traits.exported, traits.testing);
            if !groups.iter().any(|(k, _)| *k == key) {
                groups.push((key, *func));
            }
        }

        let Some(&((_, _, first_testing), first_func)) = groups.first() else {
            return;
        };
        if let Some(&(_, offender)) = groups
            .iter()
            .find(|((_, _, testing), _)| *testing != first_testing)
        {
            self.report(first_func.span, MIXED_TESTING);
            self.report(offender.span, MIXED_TESTING);
        }
    }

    fn mixed_receivers(&mut self, funcs: &[&'a FuncDecl]) {
        let mut receivers: Vec<&str> = Vec::new();
        for traits in self.traits(funcs) {
            let label = traits.receiver_label();
            if !receivers.contains(&label) {
                receivers.push(label);
            }
        }
        if receivers.len() < 2 {
            return;
        }

        let listed: Vec<String> = receivers.iter().map(|r| format!("'{r}'")).collect();
        let message = format!("{MIXED_RECEIVERS}: {}", listed.join(", "));
        for func in funcs {
            self.report(func.span, message.clone());
        }
    }

    fn struct_adjacency(&mut self, funcs: &[&'a FuncDecl], struct_name: &str) {
        for func in funcs {
            match func.receiver.as_deref() {
                None if !is_constructor_of(func, struct_name) => {
                    let message = format!(
                        "Function '{}' which is not a constructor for struct '{struct_name}' \
                         is not allowed in the same group as struct '{struct_name}'",
                        func.name
                    );
                    self.report(func.span, message);
                }
                Some(receiver) if receiver != struct_name => {
                    let message = format!(
                        "Method with receiver '{receiver}' is not allowed in the same group \
                         as struct '{struct_name}'"
                    );
                    self.report(func.span, message);
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, lines_and_messages, parse, run};
    use nbs_lint_core::Config;

    fn rule() -> SeparatorGroups {
        SeparatorGroups::new().width(4)
    }

    fn check(src: &str) -> Vec<(usize, String)> {
        lines_and_messages(&run(&rule(), src))
    }

    fn at(line: usize, message: &str) -> (usize, String) {
        (line, message.to_string())
    }

    #[test]
    fn compliant_file_passes() {
        let src = r#"package demo

import "fmt"

////

type Server struct {
	addr string
}

func NewServer() *Server {
	return &Server{}
}

func (s *Server) Run() {
	fmt.Println(s.addr)
}

////

const Port = 80
"#;
        assert_eq!(check(src), vec![]);
    }

    #[test]
    fn trailing_separator() {
        let src = r#"package demo

import "fmt"

////

var x = fmt.Sprint(1)

////
"#;
        assert_eq!(check(src), vec![at(9, TRAILING_SEPARATOR)]);
    }

    #[test]
    fn separator_on_last_line_needs_no_blank_after() {
        let src = "package demo\n\nimport \"fmt\"\n\n////\n\nvar x = fmt.Sprint(1)\n\n////";
        assert_eq!(check(src), vec![at(9, TRAILING_SEPARATOR)]);
    }

    #[test]
    fn separator_before_imports() {
        let src = r#"package demo

////

import "fmt"

var x = fmt.Sprint(1)
"#;
        let forbidden = "Forbidden declarations within the same group: import, var";
        assert_eq!(
            check(src),
            vec![at(3, BEFORE_IMPORTS), at(5, forbidden), at(7, forbidden)]
        );
    }

    #[test]
    fn separator_before_package() {
        let src = r#"////

package demo

////

var x = 1
"#;
        assert_eq!(
            check(src),
            vec![
                at(1, BEFORE_PACKAGE),
                at(1, EMPTY_SECTION),
                at(3, MISSING_AFTER_PACKAGE),
            ]
        );
    }

    #[test]
    fn separator_inside_multiline_comment() {
        let src = r#"package demo

import "fmt"

// Handlers
////

func Run() {
	fmt.Println()
}
"#;
        assert_eq!(check(src), vec![at(5, MULTILINE_SEPARATOR)]);
    }

    #[test]
    fn separator_over_code_reported_once() {
        let src = r#"package demo

import "fmt"

////

const a = 1; const b = 2 ////

func Run() {
	fmt.Println(a, b)
}
"#;
        assert_eq!(check(src), vec![at(7, OVER_CODE)]);
    }

    #[test]
    fn separator_spacing() {
        let tight = r#"package demo

import "fmt"
////

func Run() {
	fmt.Println()
}
"#;
        assert_eq!(check(tight), vec![at(4, SPACING)]);

        let loose = "package demo\n\nimport \"fmt\"\n\n////\n\n\nfunc Run() {\n\tfmt.Println()\n}\n";
        assert_eq!(check(loose), vec![at(5, SPACING)]);
    }

    #[test]
    fn empty_section() {
        let src = r#"package demo

import "fmt"

////

////

func Run() {
	fmt.Println()
}
"#;
        assert_eq!(check(src), vec![at(5, EMPTY_SECTION)]);
    }

    #[test]
    fn separator_after_package_without_imports() {
        assert_eq!(
            check("package demo\n\nvar x = 1\n"),
            vec![at(1, MISSING_AFTER_PACKAGE)]
        );
        assert_eq!(check("package demo\n\n////\n\nvar x = 1\n"), vec![]);
        assert_eq!(
            check("package demo\n\nvar x = 1\n\n////\n\nvar y = 2\n"),
            vec![at(1, MISSING_AFTER_PACKAGE)]
        );
    }

    #[test]
    fn default_width_is_eighty_slashes() {
        let with = |width: usize| {
            format!("package demo\n\n{}\n\nvar x = 1\n", "/".repeat(width))
        };
        let rule = SeparatorGroups::new();
        assert!(run(&rule, &with(80)).is_empty());
        assert_eq!(
            lines_and_messages(&run(&rule, &with(79))),
            vec![at(1, MISSING_AFTER_PACKAGE)]
        );
    }

    #[test]
    fn one_struct_per_group() {
        let src = r#"package demo

import "fmt"

////

type A struct{}

type B struct{}

func (a A) String() string {
	return fmt.Sprint(a)
}
"#;
        let violations = run(&rule(), src);
        assert_eq!(
            lines_and_messages(&violations),
            vec![at(7, SINGLE_STRUCT_OR_INTERFACE)]
        );
        let end = src.find("type B struct{}").unwrap() + "type B struct{}".len();
        assert_eq!(
            violations[0].location.offset + violations[0].location.length,
            end
        );
    }

    #[test]
    fn forbidden_kind_mixes() {
        let src = r#"package demo

import "fmt"

////

const Max = 3

var limit = fmt.Sprint(Max)
"#;
        let forbidden = "Forbidden declarations within the same group: const, var";
        assert_eq!(check(src), vec![at(7, forbidden), at(9, forbidden)]);

        let src = r#"package demo

import "fmt"

////

type Server struct{}

func NewServer() *Server {
	return &Server{}
}

const Max = 3
"#;
        let forbidden = "Forbidden declarations within the same group: struct, func, const";
        assert_eq!(
            check(src),
            vec![at(7, forbidden), at(9, forbidden), at(13, forbidden)]
        );
    }

    #[test]
    fn exported_and_unexported_functions() {
        let src = r#"package demo

import "fmt"

////

func Run() {
	helper()
}

func helper() {
	fmt.Println()
}

func Stop() {
	fmt.Println()
}
"#;
        assert_eq!(
            check(src),
            vec![at(11, MIXED_VISIBILITY), at(15, MIXED_VISIBILITY)]
        );
    }

    #[test]
    fn test_and_code_functions() {
        let src = r#"package demo

import "testing"

////

func TestRun(t *testing.T) {
	t.Log()
}

func Run() {
	_ = 1
}
"#;
        assert_eq!(
            check(src),
            vec![at(7, MIXED_TESTING), at(11, MIXED_TESTING)]
        );
    }

    #[test]
    fn custom_test_prefixes_share_a_group() {
        let src = r#"package demo

import "testing"

////

func TestRun(t *testing.T) {
	t.Log()
}

func ExampleRun() {
	_ = 1
}
"#;
        let rule = rule().test_prefixes(["Test", "Example"]);
        assert!(run(&rule, src).is_empty());
    }

    #[test]
    fn different_receivers() {
        let src = r#"package demo

import "fmt"

////

func (s *Server) Close() {
	fmt.Println(s)
}

func (c *Client) Close() {
	fmt.Println(c)
}
"#;
        let message = format!("{MIXED_RECEIVERS}: 'Server', 'Client'");
        assert_eq!(check(src), vec![at(7, &message), at(11, &message)]);
    }

    #[test]
    fn free_function_counts_as_its_own_receiver() {
        let src = r#"package demo

import "fmt"

////

func NewServer() *Server {
	return &Server{}
}

func (s *Server) Close() {
	fmt.Println(s)
}
"#;
        let message = format!("{MIXED_RECEIVERS}: '<none>', 'Server'");
        assert_eq!(check(src), vec![at(7, &message), at(11, &message)]);
    }

    #[test]
    fn struct_group_members() {
        let src = r#"package demo

import "fmt"

////

type Server struct{}

func NewServer() *Server {
	return &Server{}
}

func helper() {
	fmt.Println()
}

func (c *Client) Close() {
	fmt.Println(c)
}

func (s *Server) Close() {
	fmt.Println(s)
}
"#;
        assert_eq!(
            check(src),
            vec![
                at(
                    13,
                    "Function 'helper' which is not a constructor for struct 'Server' \
                     is not allowed in the same group as struct 'Server'"
                ),
                at(
                    17,
                    "Method with receiver 'Client' is not allowed in the same group \
                     as struct 'Server'"
                ),
            ]
        );
    }

    #[test]
    fn multi_spec_type_and_unknown_declarations() {
        let src = r#"package demo

import "fmt"

////

type (
	A int
	B string
)

// placeholder
"#;
        let mut file = parse(src);
        let start = src.find("// placeholder").unwrap();
        file.decls.push(Decl::Unrecognized {
            span: Span::new(start, start + "// placeholder".len()),
            node_kind: "ERROR".into(),
        });
        let ctx = context(src);

        let mut violations = rule().check(&ctx, &file);
        violations.sort_by_key(|v| v.location.line);
        assert_eq!(
            lines_and_messages(&violations),
            vec![at(7, MULTI_SPEC_TYPE), at(12, UNKNOWN_DECLARATION)]
        );
    }

    #[test]
    fn comment_grouping() {
        let src = "package demo\n\n// a\n// b\n\n// c\nvar x = 1 // d\n// e\n/* f */ // g\n";
        let file = parse(src);
        let ctx = context(src);
        let texts: Vec<String> = comment_groups(&ctx, &file.comments)
            .into_iter()
            .map(|g| g.text)
            .collect();
        assert_eq!(texts, vec!["// a// b", "// c", "// d", "// e/* f */// g"]);
    }

    #[test]
    fn partition_is_total_and_disjoint() {
        let decl = |start: usize| Decl::Unrecognized {
            span: Span::new(start, start + 2),
            node_kind: "x".into(),
        };
        let decls = [decl(0), decl(14), decl(20), decl(40)];
        let refs: Vec<&Decl> = decls.iter().collect();
        let separators = [Span::new(10, 14), Span::new(30, 34)];

        let buckets = partition(&separators, &refs);
        let starts: Vec<Vec<usize>> = buckets
            .iter()
            .map(|b| b.iter().map(|d| d.span().start).collect())
            .collect();
        assert_eq!(starts, vec![vec![0], vec![14, 20], vec![40]]);
        assert_eq!(buckets.iter().map(Vec::len).sum::<usize>(), decls.len());
    }

    #[test]
    fn config_from_rule_options() {
        let config = Config::parse(
            "[rules.separator-groups]\nwidth = 40\ntest_prefixes = [\"Test\", \"Example\"]\n",
        )
        .unwrap();
        let parsed = SeparatorConfig::from_rule_config(&config.rules[NAME]);
        assert_eq!(parsed.width, 40);
        assert_eq!(parsed.test_prefixes, vec!["Test", "Example"]);
        assert_eq!(parsed.token().len(), 40);

        let config = Config::parse("[rules.separator-groups]\nwidth = -3\n").unwrap();
        assert_eq!(
            SeparatorConfig::from_rule_config(&config.rules[NAME]),
            SeparatorConfig::default()
        );
    }
}
