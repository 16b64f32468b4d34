//! Inference of struct constructors.
//!
//! A free function is taken as a constructor of struct `S` when it visibly
//! builds and returns one: a declared result of `S` or `*S`, a top-level
//! `return &S{...}`, or a top-level `return x` where an earlier top-level
//! assignment bound `x` to `&S{...}`. Nothing is inferred through calls,
//! nested blocks, or chains of assignments.

use std::collections::HashMap;

use nbs_lint_core::{Expr, FuncDecl, Stmt, TypeRef};

/// Returns true if `func` constructs `struct_name`.
#[must_use]
pub fn is_constructor_of(func: &FuncDecl, struct_name: &str) -> bool {
    if func.results.iter().any(|result| match result {
        TypeRef::Named(name) | TypeRef::Pointer(name) => name == struct_name,
        TypeRef::Other => false,
    }) {
        return true;
    }

    let Some(body) = &func.body else {
        return false;
    };

    // identifier -> struct whose address it currently holds
    let mut bound: HashMap<&str, &str> = HashMap::new();
    for stmt in &body.statements {
        match stmt {
            Stmt::Assign { targets, values } => {
                for (index, target) in targets.iter().enumerate() {
                    let Some(name) = target else { continue };
                    match values.get(index) {
                        Some(Expr::AddressOfLiteral(ty)) => {
                            bound.insert(name.as_str(), ty.as_str());
                        }
                        _ => {
                            bound.remove(name.as_str());
                        }
                    }
                }
            }
            Stmt::Return(values) => {
                let returns_struct = values.iter().any(|value| match value {
                    Expr::AddressOfLiteral(ty) => ty == struct_name,
                    Expr::Ident(name) => bound.get(name.as_str()) == Some(&struct_name),
                    Expr::Other => false,
                });
                if returns_struct {
                    return true;
                }
            }
            Stmt::Other => {}
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::parse;

    fn constructs(src: &str, struct_name: &str) -> bool {
        let file = parse(src);
        let func = file.functions().next().expect("one function");
        is_constructor_of(func, struct_name)
    }

    #[test]
    fn declared_result_types() {
        assert!(constructs(
            "package demo\n\nfunc NewServer() *Server { return nil }\n",
            "Server"
        ));
        assert!(constructs(
            "package demo\n\nfunc MakeServer() (Server, error) { return Server{}, nil }\n",
            "Server"
        ));
        assert!(!constructs(
            "package demo\n\nfunc NewClient() *Client { return nil }\n",
            "Server"
        ));
    }

    #[test]
    fn returned_address_of_literal() {
        let src = r#"package demo

func newServer() any {
	return &Server{addr: ":80"}
}
"#;
        assert!(constructs(src, "Server"));
        assert!(!constructs(src, "Client"));
    }

    #[test]
    fn returned_bound_identifier() {
        let src = r#"package demo

func newServer() Handler {
	s := &Server{}
	s.init()
	return s
}
"#;
        assert!(constructs(src, "Server"));
    }

    #[test]
    fn generic_instantiation_resolves_to_base_name() {
        let src = r#"package demo

func newList() any {
	l := &List[int]{}
	return l
}
"#;
        assert!(constructs(src, "List"));
        assert!(constructs(
            "package demo\n\nfunc NewList() *List[int] { return nil }\n",
            "List"
        ));
    }

    #[test]
    fn later_binding_does_not_count() {
        let src = r#"package demo

func newServer() Handler {
	var s Handler
	return s
	s = &Server{}
}
"#;
        assert!(!constructs(src, "Server"));
    }

    #[test]
    fn rebinding_clears_inference() {
        let src = r#"package demo

func newServer() Handler {
	s := &Server{}
	s = wrap(s)
	return s
}
"#;
        assert!(!constructs(src, "Server"));
    }

    #[test]
    fn nested_returns_are_not_followed() {
        let src = r#"package demo

func newServer(ok bool) Handler {
	if ok {
		return &Server{}
	}
	return nil
}
"#;
        assert!(!constructs(src, "Server"));
    }
}
