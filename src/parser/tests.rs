//! Unit tests for the parser module.
//!
//! Each test compiles a small page and looks at the instructions or the
//! error the grammar actions produced.

use std::rc::Rc;

use crate::{
    compiler::compiler::{Compiler, Program},
    errors::errors::Error,
    lexer::lexer::tokenize,
    type_checker::types::Type,
};

use super::parser::parse;

fn compile(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.ez".to_string()))?;
    parse(tokens, Rc::new("test.ez".to_string()), Compiler::default())
}

/// Instructions rendered as text, without the leading jump to `render` and
/// the final `end`.
fn body(source: &str) -> Vec<String> {
    let program = compile(source).unwrap();
    let count = program.quadruples.len();
    program.quadruples[1..count - 1]
        .iter()
        .map(|quadruple| quadruple.to_string())
        .collect()
}

fn error_name(source: &str) -> String {
    compile(source).unwrap_err().get_error_name().to_string()
}

#[test]
fn test_parse_minimal_page() {
    let program = compile("page Home; void render() { }").unwrap();
    let listing: Vec<String> = program.quadruples.iter().map(|q| q.to_string()).collect();

    assert_eq!(listing, vec!["goto - - @1", "end - - -"]);
    assert!(program.function("render").is_some());
}

#[test]
fn test_parse_precedence() {
    let source = "page P; int a, b, c, x; void render() { x = a + b * c; }";

    assert_eq!(
        body(source),
        vec!["* 1001 1002 5000", "+ 1000 5000 5001", "= 5001 - 1003"]
    );
}

#[test]
fn test_parse_left_associativity() {
    let source = "page P; int a, b, c, x; void render() { x = a - b - c; }";

    assert_eq!(
        body(source),
        vec!["- 1000 1001 5000", "- 5000 1002 5001", "= 5001 - 1003"]
    );
}

#[test]
fn test_parse_parentheses() {
    let source = "page P; int a, b, c, x; void render() { x = (a + b) * c; }";

    assert_eq!(
        body(source),
        vec!["+ 1000 1001 5000", "* 5000 1002 5001", "= 5001 - 1003"]
    );
}

#[test]
fn test_parse_comparison_binds_looser_than_arithmetic() {
    let source = "page P; int a, b; bool ok; void render() { ok = a + 1 < b; }";

    assert_eq!(
        body(source),
        vec!["+ 1000 8000 5000", "< 5000 1001 5001", "= 5001 - 1002"]
    );
}

#[test]
fn test_parse_global_initialisers() {
    let source = "page P; int a = 4, v[3] = [1, 2, 3]; float f = -2.5; void render() { }";
    let program = compile(source).unwrap();

    let listing: Vec<String> = program.quadruples.iter().map(|q| q.to_string()).collect();
    assert_eq!(
        listing,
        vec![
            "= 8000 - 1000",
            "= 8001 - 1001",
            "= 8002 - 1002",
            "= 8003 - 1003",
            "= 8004 - 1004",
            "goto - - @6",
            "end - - -",
        ]
    );
    let negative = program.literals.entries().iter().find(|literal| literal.text == "-2.5");
    assert_eq!(negative.map(|literal| (literal.ty, literal.address)), Some((Type::Float, 8004)));
}

#[test]
fn test_parse_global_initialiser_must_be_literal() {
    assert_eq!(
        error_name("page P; int a = 1 + 2; void render() { }"),
        "UnexpectedToken"
    );
}

#[test]
fn test_parse_function_and_global_are_told_apart() {
    let source = "page P; int total; int twice(int p) { return p * 2; } void render() { total = twice(4); }";
    let program = compile(source).unwrap();

    let twice = program.function("twice").unwrap();
    assert_eq!(twice.params, vec![Type::Int]);
    assert_eq!(twice.start, 1);
}

#[test]
fn test_parse_statement_as_call() {
    let source = "page P; void hello() { print(\"hi\"); } void render() { hello(); }";
    let listing = body(source);

    assert_eq!(
        listing,
        vec!["print 8000 - -", "endfunc - - -", "era hello - -", "gosub hello - @1"]
    );
}

#[test]
fn test_parse_print_many_values() {
    let source = "page P; int a; void render() { print(a, \"x\", 1); }";

    assert_eq!(
        body(source),
        vec!["print 1000 - -", "print 8000 - -", "print 8001 - -"]
    );
}

#[test]
fn test_parse_if_else() {
    let source = "page P; int a; void render() { if (a > 0) { a = 1; } else { a = 2; } }";

    assert_eq!(
        body(source),
        vec![
            "> 1000 8000 5000",
            "gotoF 5000 - @5",
            "= 8001 - 1000",
            "goto - - @6",
            "= 8002 - 1000",
        ]
    );
}

#[test]
fn test_parse_while() {
    let source = "page P; int a; void render() { while (a < 3) { a = a + 1; } }";

    assert_eq!(
        body(source),
        vec![
            "< 1000 8000 5000",
            "gotoF 5000 - @6",
            "+ 1000 8001 5001",
            "= 5001 - 1000",
            "goto - - @1",
        ]
    );
}

#[test]
fn test_parse_for_with_negative_step() {
    let source = "page P; int i; void render() { for (i = 10 to 0 step -2) { print(i); } }";
    let listing = body(source);

    assert_eq!(listing[0], "= 8000 - 1000");
    assert_eq!(listing[1], "= 8001 - 5000");
    assert_eq!(listing[2], ">= 1000 5000 5001");
    assert!(listing.contains(&String::from("+ 1000 8002 5002")));
}

#[test]
fn test_parse_matrix_element() {
    let source = "page P; int m[2][3]; void render() { m[1][2] = 7; }";
    let listing = body(source);

    assert_eq!(listing.iter().filter(|q| q.starts_with("ver")).count(), 2);
    assert_eq!(listing.last().unwrap(), "= 8002 - (5002)");
}

#[test]
fn test_parse_local_array_literal() {
    let source = "page P; void render() { int v[2] = [1, 1 + 1]; }";
    let listing = body(source);

    assert_eq!(listing, vec!["+ 8000 8000 5000", "= 8000 - 3000", "= 5000 - 3001"]);
}

#[test]
fn test_parse_render_elements() {
    let source = r#"page P; void render() {
        container(justify: "center") {
            heading(size: 1, text: "Welcome");
        }
    }"#;

    assert_eq!(
        body(source),
        vec![
            "open container - -",
            "attr 8000 - justify",
            "open heading - -",
            "attr 8001 - size",
            "attr 8002 - text",
            "close heading - -",
            "close container - -",
        ]
    );
}

#[test]
fn test_parse_table_takes_whole_array() {
    let source = "page P; int rows[3]; void render() { table(data: rows); }";

    assert_eq!(
        body(source),
        vec!["open table - -", "attr 1000 - data", "close table - -"]
    );
}

#[test]
fn test_parse_element_outside_render() {
    let source = "page P; void f() { heading(text: \"x\"); } void render() { }";

    assert_eq!(error_name(source), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_attribute_not_accepted() {
    let source = "page P; void render() { heading(source: \"x\"); }";

    assert_eq!(error_name(source), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_attribute_type() {
    let source = "page P; void render() { heading(size: \"big\"); }";

    assert_eq!(error_name(source), "ExpectedType");
}

#[test]
fn test_parse_syntax_errors() {
    assert_eq!(error_name("page P; int a void render() { }"), "UnexpectedToken");
    assert_eq!(error_name("page P; int a; void render() { a = ; }"), "UnexpectedTokenDetailed");
    assert_eq!(error_name("page P; void render() { "), "UnexpectedTokenDetailed");
    assert_eq!(error_name("page P; int x;"), "UnexpectedTokenDetailed");
    assert_eq!(error_name("page P; int m[2][2][2]; void render() { }"), "UnexpectedTokenDetailed");
    assert_eq!(error_name("page P; int v[0]; void render() { }"), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_semantic_error_position() {
    let source = "page P; int a; void render() { a = \"text\"; }";
    let error = compile(source).unwrap_err();

    assert_eq!(error.get_error_name(), "TypeMismatch");
    // Reported at the string literal, the last token consumed
    assert_eq!(error.get_position().0, 35);
}

#[test]
fn test_parse_requires_trailing_eof() {
    let file = Rc::new("test.ez".to_string());

    let empty = parse(vec![], Rc::clone(&file), Compiler::default()).unwrap_err();
    assert_eq!(empty.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(empty.get_position().0, 0);

    let mut tokens = tokenize("page P; void render() { }".to_string(), Some("test.ez".to_string()))
        .unwrap();
    tokens.pop();
    let truncated = parse(tokens, file, Compiler::default()).unwrap_err();
    assert_eq!(truncated.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_function_name_is_not_a_variable() {
    let source = "page P; int add(int a) { return a; } void render() { print(add + 1); }";

    assert_eq!(error_name(source), "UnknownSymbol");
}

#[test]
fn test_parse_function_may_reuse_a_global_name() {
    let source = "page P; int total; int total() { return 1; } void render() { total = total(); }";
    let program = compile(source).unwrap();

    assert_eq!(program.function("total").unwrap().return_slot, Some(1001));
    assert!(body(source).contains(&String::from("= 5000 - 1000")));
}
