//! Lowering of tree-sitter-go trees into the nbs-lint syntax model.

use nbs_lint_core::{
    Block, BlockKind, Comment, Decl, Expr, FuncBody, FuncDecl, GenDecl, GenKeyword, GoFile, Span,
    Stmt, TypeRef, TypeShape, TypeSpec,
};
use tree_sitter::Node;

fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

fn span(node: &Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

/// Builds a [`GoFile`] from the root `source_file` node.
pub(crate) fn lower_file(root: &Node<'_>, src: &[u8]) -> GoFile {
    let mut file = GoFile {
        has_syntax_errors: root.has_error(),
        ..GoFile::default()
    };

    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "package_clause" => file.package = span(&node),
            "import_declaration" => {
                collect_import_specs(&node, &mut file.imports);
                file.decls
                    .push(Decl::Gen(gen_decl(&node, GenKeyword::Import, Vec::new())));
            }
            "const_declaration" => {
                file.decls
                    .push(Decl::Gen(gen_decl(&node, GenKeyword::Const, Vec::new())));
            }
            "var_declaration" => {
                file.decls
                    .push(Decl::Gen(gen_decl(&node, GenKeyword::Var, Vec::new())));
            }
            "type_declaration" => {
                let specs = type_specs(&node, src);
                file.decls
                    .push(Decl::Gen(gen_decl(&node, GenKeyword::Type, specs)));
            }
            "function_declaration" | "method_declaration" => {
                file.decls.push(Decl::Func(func_decl(&node, src)));
            }
            "comment" | "empty_statement" => {}
            kind => file.decls.push(Decl::Unrecognized {
                span: span(&node),
                node_kind: kind.to_string(),
            }),
        }
    }

    collect_nested(root, src, &mut file);

    file.comments.sort_by_key(|c| c.span);
    file.blocks.sort_by_key(|b| (b.lbrace, b.rbrace));
    file.defers.sort();
    file
}

fn gen_decl(node: &Node<'_>, keyword: GenKeyword, type_specs: Vec<TypeSpec>) -> GenDecl {
    GenDecl {
        span: span(node),
        keyword,
        type_specs,
    }
}

fn collect_import_specs(node: &Node<'_>, imports: &mut Vec<Span>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => imports.push(span(&child)),
            "import_spec_list" => collect_import_specs(&child, imports),
            _ => {}
        }
    }
}

fn type_specs(node: &Node<'_>, src: &[u8]) -> Vec<TypeSpec> {
    let mut specs = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let shape = match child.kind() {
            "type_alias" => TypeShape::Alias,
            "type_spec" => match child.child_by_field_name("type").map(|t| t.kind()) {
                Some("struct_type") => TypeShape::Struct,
                Some("interface_type") => TypeShape::Interface,
                _ => TypeShape::Alias,
            },
            _ => continue,
        };
        let name = child
            .child_by_field_name("name")
            .map(|n| text(&n, src).to_owned())
            .unwrap_or_default();
        specs.push(TypeSpec { name, shape });
    }
    specs
}

fn func_decl(node: &Node<'_>, src: &[u8]) -> FuncDecl {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(&n, src).to_owned())
        .unwrap_or_default();

    let receiver = node
        .child_by_field_name("receiver")
        .and_then(|list| first_parameter_type(&list))
        .and_then(|ty| base_type_name(&ty, src));

    let params = node
        .child_by_field_name("parameters")
        .map(|p| span(&p))
        .unwrap_or_default();

    let results = node
        .child_by_field_name("result")
        .map(|r| result_types(&r, src))
        .unwrap_or_default();

    let body = node
        .child_by_field_name("body")
        .and_then(|b| func_body(&b, src));

    FuncDecl {
        span: span(node),
        name,
        receiver,
        params,
        results,
        body,
    }
}

fn first_parameter_type<'t>(list: &Node<'t>) -> Option<Node<'t>> {
    let mut cursor = list.walk();
    let param = list
        .named_children(&mut cursor)
        .find(|c| c.kind() == "parameter_declaration")?;
    param.child_by_field_name("type")
}

/// Base name of `T`, `*T`, `T[K]` or `*T[K]`.
fn base_type_name(node: &Node<'_>, src: &[u8]) -> Option<String> {
    match node.kind() {
        "type_identifier" => Some(text(node, src).to_owned()),
        "generic_type" => node
            .child_by_field_name("type")
            .filter(|t| t.kind() == "type_identifier")
            .map(|t| text(&t, src).to_owned()),
        "pointer_type" => node
            .named_child(0)
            .filter(|inner| inner.kind() != "pointer_type")
            .and_then(|inner| base_type_name(&inner, src)),
        "parenthesized_type" => node.named_child(0).and_then(|inner| base_type_name(&inner, src)),
        _ => None,
    }
}

fn type_ref(node: &Node<'_>, src: &[u8]) -> TypeRef {
    match node.kind() {
        "type_identifier" | "generic_type" => {
            base_type_name(node, src).map_or(TypeRef::Other, TypeRef::Named)
        }
        "pointer_type" => base_type_name(node, src).map_or(TypeRef::Other, TypeRef::Pointer),
        _ => TypeRef::Other,
    }
}

fn result_types(node: &Node<'_>, src: &[u8]) -> Vec<TypeRef> {
    if node.kind() != "parameter_list" {
        return vec![type_ref(node, src)];
    }

    let mut results = Vec::new();
    let mut cursor = node.walk();
    for param in node.named_children(&mut cursor) {
        if !matches!(
            param.kind(),
            "parameter_declaration" | "variadic_parameter_declaration"
        ) {
            continue;
        }
        let Some(ty) = param.child_by_field_name("type") else {
            continue;
        };
        let mut name_cursor = param.walk();
        let names = param
            .children_by_field_name("name", &mut name_cursor)
            .count()
            .max(1);
        let lowered = type_ref(&ty, src);
        results.extend(std::iter::repeat(lowered).take(names));
    }
    results
}

/// Offsets of the `{` and `}` delimiting `node`, if both are present.
fn brace_pair(node: &Node<'_>) -> Option<(usize, usize)> {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    let lbrace = children.iter().find(|c| c.kind() == "{")?;
    let rbrace = children
        .iter()
        .rev()
        .find(|c| c.kind() == "}" && !c.is_missing())?;
    Some((lbrace.start_byte(), rbrace.start_byte()))
}

/// Statement nodes of a block, looking through `statement_list` and
/// skipping comments.
fn block_statements<'t>(block: &Node<'t>) -> Vec<Node<'t>> {
    let mut statements = Vec::new();
    let mut cursor = block.walk();
    for child in block.named_children(&mut cursor) {
        match child.kind() {
            "comment" => {}
            "statement_list" => {
                let mut inner = child.walk();
                statements.extend(
                    child
                        .named_children(&mut inner)
                        .filter(|s| s.kind() != "comment"),
                );
            }
            _ => statements.push(child),
        }
    }
    statements
}

fn func_body(block: &Node<'_>, src: &[u8]) -> Option<FuncBody> {
    let (lbrace, rbrace) = brace_pair(block)?;
    let nodes = block_statements(block);
    Some(FuncBody {
        lbrace,
        rbrace,
        first_stmt: nodes.first().map(Node::start_byte),
        statements: nodes.iter().map(|n| statement(n, src)).collect(),
    })
}

fn statement(node: &Node<'_>, src: &[u8]) -> Stmt {
    match node.kind() {
        "return_statement" => {
            let mut cursor = node.walk();
            let values = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "expression_list")
                .map(|list| expressions(&list, src))
                .unwrap_or_default();
            Stmt::Return(values)
        }
        "assignment_statement"
            if node
                .child_by_field_name("operator")
                .is_some_and(|op| text(&op, src) == "=") =>
        {
            assignment(node, src)
        }
        "short_var_declaration" => assignment(node, src),
        _ => Stmt::Other,
    }
}

fn assignment(node: &Node<'_>, src: &[u8]) -> Stmt {
    let targets = node
        .child_by_field_name("left")
        .map(|left| {
            let mut cursor = left.walk();
            left.named_children(&mut cursor)
                .filter(|c| c.kind() != "comment")
                .map(|c| (c.kind() == "identifier").then(|| text(&c, src).to_owned()))
                .collect()
        })
        .unwrap_or_default();
    let values = node
        .child_by_field_name("right")
        .map(|right| expressions(&right, src))
        .unwrap_or_default();
    Stmt::Assign { targets, values }
}

fn expressions(list: &Node<'_>, src: &[u8]) -> Vec<Expr> {
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .map(|c| expression(&c, src))
        .collect()
}

fn expression(node: &Node<'_>, src: &[u8]) -> Expr {
    match node.kind() {
        "identifier" => Expr::Ident(text(node, src).to_owned()),
        "unary_expression" => {
            let is_address_of = node
                .child_by_field_name("operator")
                .is_some_and(|op| text(&op, src) == "&");
            node.child_by_field_name("operand")
                .filter(|operand| is_address_of && operand.kind() == "composite_literal")
                .and_then(|literal| literal.child_by_field_name("type"))
                .and_then(|ty| match ty.kind() {
                    "type_identifier" | "generic_type" => base_type_name(&ty, src),
                    _ => None,
                })
                .map_or(Expr::Other, Expr::AddressOfLiteral)
        }
        _ => Expr::Other,
    }
}

fn is_function_like(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration" | "method_declaration" | "func_literal"
    )
}

/// Collects comments, statement blocks and `defer` statements at any depth.
fn collect_nested(root: &Node<'_>, src: &[u8], file: &mut GoFile) {
    let mut stack = vec![(*root, false)];
    while let Some((node, is_function_body)) = stack.pop() {
        match node.kind() {
            "comment" => file.comments.push(Comment {
                span: span(&node),
                text: text(&node, src).to_owned(),
            }),
            "defer_statement" => file.defers.push(span(&node)),
            "block" | "expression_switch_statement" | "type_switch_statement"
            | "select_statement" => {
                if let Some((lbrace, rbrace)) = brace_pair(&node) {
                    let kind = if is_function_body {
                        BlockKind::FunctionBody
                    } else {
                        BlockKind::Statement
                    };
                    file.blocks.push(Block {
                        lbrace,
                        rbrace,
                        kind,
                    });
                }
            }
            _ => {}
        }

        let body_id = if is_function_like(node.kind()) {
            node.child_by_field_name("body").map(|b| b.id())
        } else {
            None
        };
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            stack.push((child, Some(child.id()) == body_id));
        }
    }
}
