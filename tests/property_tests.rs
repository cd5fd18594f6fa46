//! Property-based tests.
//!
//! These tests use proptest to generate operator/type combinations, literal
//! sequences and arithmetic expressions and verify that:
//! - the semantic cube and `combine` always agree
//! - literal pooling hands out one address per distinct literal
//! - well-typed expressions compile with balanced stacks, one instruction
//!   per operator

use std::collections::HashMap;

use ezc::{
    compile_source,
    compiler::quadruple::{Opcode, Operand},
    symbols::{
        literals::LiteralTable,
        memory::{MemoryLayout, MemoryMapper},
    },
    type_checker::{
        semantic_cube::{combine, lookup},
        types::{Operator, Type},
    },
    CompileOptions,
};
use proptest::prelude::*;

fn any_type() -> impl Strategy<Value = Type> {
    prop::sample::select(Type::ALL.to_vec())
}

fn any_operator() -> impl Strategy<Value = Operator> {
    prop::sample::select(Operator::ALL.to_vec())
}

/// An integer expression over `a`, `b`, `c` and small literals, with the
/// number of binary operators it contains.
fn int_expression() -> impl Strategy<Value = (String, usize)> {
    let leaf = prop_oneof![
        prop::sample::select(vec!["a", "b", "c"]).prop_map(|name| (name.to_string(), 0)),
        (0u32..100).prop_map(|value| (value.to_string(), 0)),
    ];

    leaf.prop_recursive(4, 32, 2, |inner| {
        (
            inner.clone(),
            prop::sample::select(vec!["+", "-", "*", "/"]),
            inner,
            any::<bool>(),
        )
            .prop_map(|((left, l), operator, (right, r), grouped)| {
                let text = format!("{} {} {}", left, operator, right);
                let text = if grouped { format!("({})", text) } else { text };
                (text, l + r + 1)
            })
    })
}

proptest! {
    /// `combine` fails exactly where the cube has no entry
    #[test]
    fn combine_agrees_with_cube(operator in any_operator(), left in any_type(), right in any_type()) {
        match lookup(operator, left, right) {
            Some(ty) => prop_assert_eq!(combine(operator, left, right).ok(), Some(ty)),
            None => prop_assert!(combine(operator, left, right).is_err()),
        }
    }

    /// Every binary operator other than `=` is symmetric in its operand types
    #[test]
    fn binary_operators_are_symmetric(operator in any_operator(), left in any_type(), right in any_type()) {
        prop_assume!(operator != Operator::Assign);
        prop_assert_eq!(lookup(operator, left, right), lookup(operator, right, left));
    }

    /// Pooling the same literal always yields the same address
    #[test]
    fn literal_pooling_is_idempotent(literals in prop::collection::vec((0u8..20, any_type()), 1..60)) {
        let mut table = LiteralTable::new();
        let mut mapper = MemoryMapper::new(MemoryLayout::default());
        let mut seen: HashMap<(String, Type), u32> = HashMap::new();

        for (value, ty) in literals {
            let text = value.to_string();
            let address = table.address_of(&text, ty, &mut mapper).unwrap();

            let first = *seen.entry((text, ty)).or_insert(address);
            prop_assert_eq!(first, address);
        }

        prop_assert_eq!(table.len(), seen.len());
    }

    /// Well-typed expressions compile, one quadruple per operator plus the
    /// final assignment
    #[test]
    fn int_expressions_compile((expression, operators) in int_expression()) {
        let source = format!("page P; int a, b, c, x; void render() {{ x = {}; }}", expression);
        let program = compile_source(&source, CompileOptions::default()).unwrap();

        let arithmetic = program
            .quadruples
            .iter()
            .filter(|q| matches!(
                q.op,
                Opcode::Operator(Operator::Plus | Operator::Minus | Operator::Star | Operator::Slash)
            ))
            .count();
        prop_assert_eq!(arithmetic, operators);

        let assignment = &program.quadruples[program.quadruples.len() - 2];
        prop_assert_eq!(assignment.op, Opcode::Operator(Operator::Assign));
        prop_assert_eq!(assignment.result.clone(), Some(Operand::Address(1003)));
    }
}
