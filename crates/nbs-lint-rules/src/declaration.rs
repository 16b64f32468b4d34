//! Classification of top-level declarations for separator grouping.

use nbs_lint_core::{Decl, FuncDecl, GenKeyword, TypeShape};

/// Kind of a top-level declaration, as far as grouping is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// `import`
    Import,
    /// `const`
    Const,
    /// `var`
    Var,
    /// `type A = B` or a defined type that is neither struct nor interface.
    TypeAlias,
    /// `type A struct { ... }`
    Struct,
    /// `type A interface { ... }`
    Interface,
    /// Function or method.
    Func,
}

impl DeclKind {
    /// Name used in diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Const => "const",
            Self::Var => "var",
            Self::TypeAlias => "type",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Func => "func",
        }
    }

    /// Returns true if a group holding only this kind needs no further checks.
    #[must_use]
    pub fn stands_alone(self) -> bool {
        !matches!(self, Self::Struct | Self::Func)
    }
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A declaration of a known kind.
    Kind(DeclKind),
    /// A `type` declaration without exactly one spec; grouped as
    /// [`DeclKind::TypeAlias`].
    MultiSpecType,
    /// A node the parser could not interpret.
    Unknown,
}

impl Classification {
    /// Kind used for grouping, if any.
    #[must_use]
    pub fn kind(self) -> Option<DeclKind> {
        match self {
            Self::Kind(kind) => Some(kind),
            Self::MultiSpecType => Some(DeclKind::TypeAlias),
            Self::Unknown => None,
        }
    }
}

/// Classifies a top-level declaration.
#[must_use]
pub fn classify(decl: &Decl) -> Classification {
    let general = match decl {
        Decl::Func(_) => return Classification::Kind(DeclKind::Func),
        Decl::Unrecognized { .. } => return Classification::Unknown,
        Decl::Gen(general) => general,
    };

    let kind = match general.keyword {
        GenKeyword::Import => DeclKind::Import,
        GenKeyword::Const => DeclKind::Const,
        GenKeyword::Var => DeclKind::Var,
        GenKeyword::Type => match general.type_specs.as_slice() {
            [spec] => match spec.shape {
                TypeShape::Struct => DeclKind::Struct,
                TypeShape::Interface => DeclKind::Interface,
                TypeShape::Alias => DeclKind::TypeAlias,
            },
            _ => return Classification::MultiSpecType,
        },
    };
    Classification::Kind(kind)
}

/// Grouping-relevant facts about a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionTraits<'a> {
    /// Function name.
    pub name: &'a str,
    /// Receiver base type name; `None` for free functions.
    pub receiver: Option<&'a str>,
    /// Name starts with an uppercase letter.
    pub exported: bool,
    /// Name starts with one of the test prefixes.
    pub testing: bool,
}

impl<'a> FunctionTraits<'a> {
    /// Derives the traits of `func`.
    #[must_use]
    pub fn of(func: &'a FuncDecl, test_prefixes: &[String]) -> Self {
        let name = func.name.as_str();
        Self {
            name,
            receiver: func.receiver.as_deref(),
            exported: name.chars().next().is_some_and(char::is_uppercase),
            testing: test_prefixes
                .iter()
                .any(|prefix| name.starts_with(prefix.as_str())),
        }
    }

    /// Receiver name for messages.
    #[must_use]
    pub fn receiver_label(&self) -> &'a str {
        self.receiver.unwrap_or("<none>")
    }
}
