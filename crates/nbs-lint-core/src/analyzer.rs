//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::{relative_to, FileContext};
use crate::rule::{ParseError, Rule, RuleBox, SourceParser};
use crate::types::{FileFailure, LintResult, Violation};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error resolving or opening the root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// No parser was registered.
    #[error("No source parser configured")]
    MissingParser,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    parser: Option<Box<dyn SourceParser>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the parser used to build the syntax model of each file.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds a per-file rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-file rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether a file with syntax errors aborts the run (default: false).
    ///
    /// When false, such files are analyzed on the recovered tree.
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set or the current directory cannot
    /// be resolved for a relative root.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;

        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let config = self.config.unwrap_or_default();

        // Merge exclude patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.clone());

        for pattern in &exclude_patterns {
            glob::Pattern::new(pattern)?;
        }

        Ok(Analyzer {
            root,
            rules: self.rules,
            parser,
            exclude_patterns,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// What happened to one file.
enum FileOutcome {
    Checked(Vec<Violation>),
    Failed(FileFailure),
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    parser: Box<dyn SourceParser>,
    exclude_patterns: Vec<String>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// Files and directories that cannot be read or parsed are recorded in
    /// [`LintResult::failures`] and do not stop the run. With
    /// `fail_on_parse_error`, that includes files with syntax errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist or the worker pool cannot
    /// be built.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        std::fs::metadata(&self.root)?;
        let (files, walk_failures) = self.discover_files();

        info!("Found {} files to analyze", files.len());

        let outcomes = match self.config.analyzer.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| self.analyze_all(&files)),
            None => self.analyze_all(&files),
        };

        let mut result = LintResult::new();
        result.failures.extend(walk_failures);
        for outcome in outcomes {
            match outcome? {
                FileOutcome::Checked(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                FileOutcome::Failed(failure) => result.failures.push(failure),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files ({} failed)",
            result.violations.len(),
            result.files_checked,
            result.failures.len()
        );

        Ok(result)
    }

    fn analyze_all(&self, files: &[PathBuf]) -> Vec<Result<FileOutcome, AnalyzerError>> {
        files
            .par_iter()
            .map(|path| self.analyze_path(path))
            .collect()
    }

    fn analyze_path(&self, path: &Path) -> Result<FileOutcome, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return Ok(FileOutcome::Failed(FileFailure {
                    path: self.relative(path),
                    message: format!("failed to read file: {e}"),
                }));
            }
        };

        match self.analyze_source(path, &content) {
            Ok(violations) => Ok(FileOutcome::Checked(violations)),
            Err(AnalyzerError::Parse { path, message }) => {
                Ok(FileOutcome::Failed(FileFailure {
                    path: self.relative(&path),
                    message,
                }))
            }
            Err(e) => Err(e),
        }
    }

    /// Analyzes one file's text and returns its violations.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if the parser produced no tree, or if
    /// the tree has syntax errors while `fail_on_parse_error` is set.
    pub fn analyze_source(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let file = self
            .parser
            .parse(content)
            .map_err(|ParseError { message }| AnalyzerError::Parse {
                path: path.to_path_buf(),
                message,
            })?;

        if file.has_syntax_errors {
            warn!("Syntax errors in {}, analyzing recovered tree", path.display());
            if self.fail_on_parse_error {
                return Err(AnalyzerError::Parse {
                    path: path.to_path_buf(),
                    message: "source contains syntax errors".to_string(),
                });
            }
        }

        let ctx = FileContext::new(path, content, &self.root);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &file);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        Ok(violations)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all source files the parser handles.
    ///
    /// Entries the walk cannot read come back as failures.
    fn discover_files(&self) -> (Vec<PathBuf>, Vec<FileFailure>) {
        let extensions = self.parser.extensions();

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore);

        let mut files = Vec::new();
        let mut failures = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to walk {}: {}", self.root.display(), e);
                    failures.push(self.walk_failure(&e));
                    continue;
                }
            };
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{e}"))
                .unwrap_or_default();

            if !extensions.contains(&ext.as_str()) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        (files, failures)
    }

    fn walk_failure(&self, err: &ignore::Error) -> FileFailure {
        let path = error_path(err).unwrap_or(self.root.as_path());
        FileFailure {
            path: self.relative(path),
            message: format!("failed to read directory entry: {err}"),
        }
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/vendor/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty()
                && normalized_pattern != "/"
                && path_str.contains(&normalized_pattern)
            {
                return true;
            }
        }

        false
    }

    fn relative(&self, path: &Path) -> PathBuf {
        relative_to(path, &self.root)
    }
}

/// The path a walk error refers to, if it names one.
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}
