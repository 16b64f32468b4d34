//! Syntax model consumed by rules.
//!
//! A [`SourceParser`](crate::SourceParser) lowers a concrete syntax tree into
//! this model. Only the shapes the rules look at are kept; every node carries
//! byte offsets into the original text.

/// Half-open byte range `[start, end)` into the file text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true for a zero-length span.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A parsed Go source file.
#[derive(Debug, Clone, Default)]
pub struct GoFile {
    /// The `package` clause.
    pub package: Span,
    /// Every import spec, in source order.
    pub imports: Vec<Span>,
    /// Top-level declarations, in source order.
    pub decls: Vec<Decl>,
    /// Every comment in the file, in source order.
    pub comments: Vec<Comment>,
    /// Every brace-delimited statement block, in source order of `{`.
    pub blocks: Vec<Block>,
    /// Every `defer` statement.
    pub defers: Vec<Span>,
    /// True if the parser had to recover from syntax errors.
    pub has_syntax_errors: bool,
}

impl GoFile {
    /// Iterates over the function declarations (including methods).
    pub fn functions(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Func(func) => Some(func),
            _ => None,
        })
    }
}

/// A single `//` or `/* */` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Location of the whole comment, delimiters included.
    pub span: Span,
    /// Literal comment text.
    pub text: String,
}

/// What a [`Block`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Body of a function declaration, method, or function literal.
    FunctionBody,
    /// Any other statement block (`if`, `for`, `switch`, `select`, bare `{}`).
    Statement,
}

/// A statement block delimited by braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Offset of the opening `{`.
    pub lbrace: usize,
    /// Offset of the closing `}`.
    pub rbrace: usize,
    /// Owner of the block.
    pub kind: BlockKind,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `import`, `const`, `var`, or `type` declaration.
    Gen(GenDecl),
    /// Function or method declaration.
    Func(FuncDecl),
    /// A top-level node the parser could not interpret.
    Unrecognized {
        /// Location of the node.
        span: Span,
        /// Parser-specific node kind, for messages.
        node_kind: String,
    },
}

impl Decl {
    /// Location of the declaration, doc comments excluded.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Gen(decl) => decl.span,
            Self::Func(decl) => decl.span,
            Self::Unrecognized { span, .. } => *span,
        }
    }
}

/// Keyword that opens a general declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenKeyword {
    /// `import`
    Import,
    /// `const`
    Const,
    /// `var`
    Var,
    /// `type`
    Type,
}

/// A general (non-function) declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenDecl {
    /// Location of the declaration.
    pub span: Span,
    /// Declaration keyword.
    pub keyword: GenKeyword,
    /// Type specs; empty unless `keyword` is [`GenKeyword::Type`].
    pub type_specs: Vec<TypeSpec>,
}

/// Shape of the type named by a type spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    /// `type A = B` or a defined type that is neither struct nor interface.
    Alias,
    /// `type A struct { ... }`
    Struct,
    /// `type A interface { ... }`
    Interface,
}

/// One spec of a `type` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    /// Declared type name.
    pub name: String,
    /// What the name refers to.
    pub shape: TypeShape,
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    /// Location from `func` to the end of the body.
    pub span: Span,
    /// Function name.
    pub name: String,
    /// Base type name of the receiver; `None` for free functions and for
    /// receivers whose type cannot be reduced to a name.
    pub receiver: Option<String>,
    /// Parameter list, parentheses included.
    pub params: Span,
    /// Declared result types.
    pub results: Vec<TypeRef>,
    /// Body, absent for declarations without one.
    pub body: Option<FuncBody>,
}

/// A declared result type, reduced to what constructor inference needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// `T` or `T[K]`.
    Named(String),
    /// `*T` or `*T[K]`.
    Pointer(String),
    /// Anything else.
    Other,
}

/// Body of a function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncBody {
    /// Offset of the opening `{`.
    pub lbrace: usize,
    /// Offset of the closing `}`.
    pub rbrace: usize,
    /// Start offset of the first statement, if any.
    pub first_stmt: Option<usize>,
    /// Top-level statements, lowered.
    pub statements: Vec<Stmt>,
}

/// A top-level body statement, reduced to what constructor inference needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `return a, b`
    Return(Vec<Expr>),
    /// `a, b = x, y` or `a, b := x, y`; a target is `None` when it is not a
    /// plain identifier.
    Assign {
        /// Left-hand side.
        targets: Vec<Option<String>>,
        /// Right-hand side.
        values: Vec<Expr>,
    },
    /// Any other statement.
    Other,
}

/// An expression, reduced to what constructor inference needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `&T{...}` or `&T[K]{...}`, holding `T`.
    AddressOfLiteral(String),
    /// A bare identifier.
    Ident(String),
    /// Anything else.
    Other,
}
