//! Integration tests for end-to-end compilation.
//!
//! These tests compile whole pages through `compile_source` and check the
//! produced quadruples, function table and literal pool.

use ezc::{
    compile_source,
    compiler::{
        compiler::Program,
        quadruple::{Opcode, Operand},
    },
    errors::errors::{Error, ErrorClass},
    symbols::memory::MemoryLayout,
    type_checker::types::{Operator, ReturnType, Type},
    CompileOptions,
};

fn compile(source: &str) -> Result<Program, Error> {
    compile_source(source, CompileOptions::default())
}

fn listing(program: &Program) -> Vec<String> {
    program.quadruples.iter().map(|quadruple| quadruple.to_string()).collect()
}

fn error_name(source: &str) -> String {
    compile(source).unwrap_err().get_error_name().to_string()
}

const DASHBOARD: &str = r#"
page Dashboard;

int sales[4] = [12, 7, 30, 4];
int grid[2][2];
string title = "Sales";

int total(int count) {
    int i, sum = 0;
    for (i = 0 to count - 1) {
        sum = sum + sales[i];
    }
    return sum;
}

float average() {
    return total(4) / 4.0;
}

void fill() {
    int r, c;
    for (r = 0 to 1) {
        for (c = 0 to 1) {
            grid[r][c] = r * 2 + c;
        }
    }
}

void render() {
    int best;
    fill();
    best = total(4);
    if (best > 50 && average() > 10.0) {
        print("good", best);
    } else {
        print("bad");
    }
    container(justify: "center", width: 80) {
        heading(size: 1, text: title);
        table(header: "Sales", data: sales);
        card(header: "Best", footer: "Totals") {
            paragraph(text: "ok");
        }
    }
}
"#;

#[test]
fn test_compile_full_page() {
    let program = compile(DASHBOARD).unwrap();

    let names: Vec<&str> = program.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["global", "total", "average", "fill", "render"]);

    let average = program.function("average").unwrap();
    assert_eq!(average.return_type, ReturnType::Value(Type::Float));
    assert!(average.return_slot.is_some());
    assert!(program.function("fill").unwrap().return_slot.is_none());

    assert_eq!(program.quadruples.last().map(|q| q.op), Some(Opcode::End));
}

#[test]
fn test_no_pending_jumps_remain() {
    let program = compile(DASHBOARD).unwrap();

    for quadruple in &program.quadruples {
        assert_ne!(quadruple.result, Some(Operand::Pending), "{}", quadruple);
    }
}

#[test]
fn test_jumps_land_inside_the_program() {
    let program = compile(DASHBOARD).unwrap();

    for quadruple in &program.quadruples {
        if let Some(Operand::Jump(target)) = quadruple.result {
            assert!(target < program.quadruples.len());
        }
    }
}

#[test]
fn test_calls_are_bracketed() {
    let program = compile(DASHBOARD).unwrap();

    let mut open: Option<String> = None;
    let mut next_param = 0;
    for quadruple in &program.quadruples {
        match (quadruple.op, &quadruple.left) {
            (Opcode::Era, Some(Operand::Function(name))) => {
                assert!(open.is_none());
                open = Some(name.clone());
                next_param = 0;
            }
            (Opcode::Param, _) => {
                assert_eq!(quadruple.result, Some(Operand::Param(next_param)));
                next_param += 1;
            }
            (Opcode::Gosub, Some(Operand::Function(name))) => {
                assert_eq!(open.take().as_ref(), Some(name));
            }
            _ => {}
        }
    }
    assert!(open.is_none());
}

#[test]
fn test_one_verify_per_index() {
    let source = "page P; int v[3], m[2][2], x; void render() { x = v[1] + m[0][1]; }";
    let program = compile(source).unwrap();

    let verifies = program
        .quadruples
        .iter()
        .filter(|quadruple| quadruple.op == Opcode::Verify)
        .count();
    assert_eq!(verifies, 3);
}

#[test]
fn test_arithmetic_scenario() {
    let source = "page P; int x = 5; int y = 2; void render() { x = x + y * 2; }";
    let program = compile(source).unwrap();

    assert_eq!(
        listing(&program),
        vec![
            "= 8000 - 1000",
            "= 8001 - 1001",
            "goto - - @3",
            "* 1001 8001 5000",
            "+ 1000 5000 5001",
            "= 5001 - 1000",
            "end - - -",
        ]
    );
}

#[test]
fn test_if_else_scenario() {
    let source = "page P; int x; void render() { if (x > 0) { print(x); } else { print(0); } }";
    let program = compile(source).unwrap();
    let quadruples = &program.quadruples;

    let false_jumps: Vec<usize> = (0..quadruples.len())
        .filter(|&index| quadruples[index].op == Opcode::GotoF)
        .collect();
    assert_eq!(false_jumps.len(), 1);

    // The first goto skips the function bodies, the second one the else branch
    let gotos: Vec<usize> = (0..quadruples.len())
        .filter(|&index| quadruples[index].op == Opcode::Goto)
        .collect();
    assert_eq!(gotos.len(), 2);
    let skip_else = gotos[1];

    assert_eq!(quadruples[false_jumps[0]].result, Some(Operand::Jump(skip_else + 1)));
    assert_eq!(quadruples[skip_else].result, Some(Operand::Jump(skip_else + 2)));
    assert_eq!(quadruples[skip_else + 1].op, Opcode::Print);
}

#[test]
fn test_call_scenarios() {
    let declared = "page P; int add(int a, int b) { return a + b; }";

    assert_eq!(
        error_name("page P; void render() { missing(); }"),
        "UnknownSymbol"
    );
    assert_eq!(
        error_name(&format!("{} void render() {{ add(1); }}", declared)),
        "ArityMismatch"
    );
    assert_eq!(
        error_name(&format!("{} void render() {{ add(\"one\", 2); }}", declared)),
        "TypeMismatch"
    );
    assert!(compile(&format!("{} void render() {{ print(add(1, 2)); }}", declared)).is_ok());
}

#[test]
fn test_recursive_call() {
    let source = r#"page P;
        int fact(int n) {
            if (n <= 1) { return 1; }
            return n * fact(n - 1);
        }
        void render() { print(fact(5)); }"#;
    let program = compile(source).unwrap();

    let start = program.function("fact").unwrap().start;
    assert!(program
        .quadruples
        .iter()
        .any(|q| q.op == Opcode::Gosub && q.result == Some(Operand::Jump(start))));
}

#[test]
fn test_scope_scenarios() {
    assert_eq!(
        error_name("page P; void render() { int x; float x; }"),
        "DuplicateSymbol"
    );
    assert_eq!(
        error_name("page P; int x, x; void render() { }"),
        "DuplicateSymbol"
    );
    assert_eq!(
        error_name("page P; void f(int p) { int p; } void render() { }"),
        "DuplicateSymbol"
    );

    let program = compile("page P; int x; void f() { float x; x = 1.5; } void render() { x = 2; }")
        .unwrap();
    let listing = listing(&program);
    assert!(listing.contains(&String::from("= 8000 - 3000")));
    assert!(listing.contains(&String::from("= 8001 - 1000")));
}

#[test]
fn test_semantic_errors() {
    assert_eq!(error_name("page P; void render() { x = 1; }"), "UnknownSymbol");
    assert_eq!(
        error_name("page P; bool b; void render() { b = 1 + true; }"),
        "TypeMismatch"
    );
    assert_eq!(
        error_name("page P; int a; void render() { if (a) { } }"),
        "TypeMismatch"
    );
    assert_eq!(
        error_name("page P; int v[3]; void render() { v = 1; }"),
        "DimensionMismatch"
    );
    assert_eq!(
        error_name("page P; int v[3]; void render() { v = [1, 2]; }"),
        "ElementCountMismatch"
    );
    assert_eq!(
        error_name("page P; int m[2][2]; void render() { print(m[1]); }"),
        "DimensionMismatch"
    );
    assert_eq!(
        error_name("page P; int i; void render() { for (i = 0 to 3 step 0) { } }"),
        "InvalidStep"
    );
    assert_eq!(
        error_name("page P; void f() { return 1; } void render() { }"),
        "InvalidReturn"
    );
    assert_eq!(
        error_name("page P; void f() { } void render() { print(f()); }"),
        "VoidValue"
    );
}

#[test]
fn test_error_classes() {
    let syntax = compile("page P; void render() { print(1) }").unwrap_err();
    assert_eq!(syntax.get_class(), ErrorClass::Syntax);

    let semantic = compile("page P; void render() { print(nope); }").unwrap_err();
    assert_eq!(semantic.get_class(), ErrorClass::Semantic);

    let lexical = compile("page P; void render() { print(1 % 2); }").unwrap_err();
    assert_eq!(lexical.get_error_name(), "UnrecognisedToken");
    assert_eq!(lexical.get_class(), ErrorClass::Syntax);
}

#[test]
fn test_custom_layout() {
    let options = CompileOptions {
        layout: MemoryLayout {
            global: 100..200,
            local: 200..300,
            temporary: 300..400,
            constant: 400..402,
        },
        file_name: String::from("custom.ez"),
    };

    let program = compile_source("page P; int a; void render() { a = 1 + 2; }", options.clone())
        .unwrap();
    assert!(listing(&program).contains(&String::from("+ 400 401 300")));

    let error = compile_source("page P; int a; void render() { a = 1 + 2 + 3; }", options)
        .unwrap_err();
    assert_eq!(error.get_error_name(), "SegmentOverflow");
    assert_eq!(*error.get_position().1, "custom.ez");
}

#[test]
fn test_string_concatenation() {
    let source = r#"page P; string s; void render() { s = "a" + "b"; heading(text: s + "!"); }"#;
    let program = compile(source).unwrap();

    let concatenations = program
        .quadruples
        .iter()
        .filter(|q| q.op == Opcode::Operator(Operator::Plus))
        .count();
    assert_eq!(concatenations, 2);
}

#[test]
fn test_params_map_to_callee_addresses() {
    let source = "page P; int add(int a, int b) { return a - b; } void render() { print(add(1, 2)); }";
    let program = compile(source).unwrap();
    let add = program.function("add").unwrap();

    assert_eq!(add.param_addresses, vec![3000, 3001]);

    let listing = listing(&program);
    assert!(listing.contains(&String::from("- 3000 3001 5000")));

    // Each `param N` fills the address the body reads parameter N from
    let bound: Vec<(usize, u32)> = program
        .quadruples
        .iter()
        .filter_map(|quadruple| match (quadruple.op, &quadruple.result) {
            (Opcode::Param, Some(Operand::Param(position))) => {
                Some((*position, add.param_addresses[*position]))
            }
            _ => None,
        })
        .collect();
    assert_eq!(bound, vec![(0, 3000), (1, 3001)]);
}

#[test]
fn test_function_names_are_not_variables() {
    assert_eq!(
        error_name("page P; int add(int a) { return a; } void render() { print(add + 1); }"),
        "UnknownSymbol"
    );
    assert!(compile("page P; int total; int total() { return 0; } void render() { }").is_ok());
}
