// tests/parser_tests.rs

use quill::ast::{BinaryOp, Expr, UnaryOp};
use quill::syntax::parse_expression;

fn pretty(source: &str) -> String {
    parse_expression(source).unwrap().pretty()
}

// ---
// Literals and variables
// ---

#[test]
fn test_integer_literals_parse_exactly() {
    for n in [0i64, 7, 42, 1000, 65_535, i64::MAX] {
        let expr = parse_expression(&n.to_string()).unwrap();
        assert!(matches!(expr, Expr::Number(value, _) if value == n));
    }
}

#[test]
fn test_variable_reference() {
    let expr = parse_expression("gold_coins").unwrap();
    assert!(matches!(expr, Expr::Variable(ref name, _) if name == "gold_coins"));
}

// ---
// Precedence and associativity
// ---

#[test]
fn test_subtraction_is_left_associative() {
    assert_eq!(pretty("1 - 2 - 3"), "((1 - 2) - 3)");
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(pretty("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(pretty("2 * 3 + 1"), "((2 * 3) + 1)");
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(pretty("(1 + 2) * 3"), "((1 + 2) * 3)");
}

#[test]
fn test_logical_operators_bind_loosest() {
    assert_eq!(pretty("a == 1 && b > 2"), "((a == 1) && (b > 2))");
    assert_eq!(pretty("a || b && c"), "((a || b) && c)");
}

#[test]
fn test_word_operators_normalise_to_symbols() {
    assert_eq!(pretty("a and b or c"), "((a && b) || c)");
}

#[test]
fn test_word_operator_needs_trailing_whitespace() {
    // `android` is an identifier, not `and` + `roid`.
    assert!(parse_expression("x android").is_err());
    assert_eq!(pretty("android"), "android");
}

// ---
// Operator disambiguation
// ---

#[test]
fn test_less_equal_is_one_operator() {
    let expr = parse_expression("a <= b").unwrap();
    match expr {
        Expr::Binary { op, right, .. } => {
            assert_eq!(op, BinaryOp::LessEqual);
            assert!(matches!(*right, Expr::Variable(ref name, _) if name == "b"));
        }
        other => panic!("expected a comparison, got {:?}", other),
    }
}

#[test]
fn test_every_comparison_operator() {
    for (source, op) in [
        ("a == b", BinaryOp::Equal),
        ("a >= b", BinaryOp::GreaterEqual),
        ("a <= b", BinaryOp::LessEqual),
        ("a < b", BinaryOp::Less),
        ("a > b", BinaryOp::Greater),
        ("a != b", BinaryOp::NotEqual),
    ] {
        assert!(
            matches!(parse_expression(source).unwrap(), Expr::Binary { op: found, .. } if found == op),
            "{}",
            source
        );
    }
}

// ---
// Unary operators
// ---

#[test]
fn test_chained_unary_minus() {
    let expr = parse_expression("--5").unwrap();
    match expr {
        Expr::Unary {
            op: UnaryOp::Negate,
            operand,
            ..
        } => match *operand {
            Expr::Unary {
                op: UnaryOp::Negate,
                operand,
                ..
            } => assert!(matches!(*operand, Expr::Number(5, _))),
            other => panic!("expected inner negation, got {:?}", other),
        },
        other => panic!("expected negation, got {:?}", other),
    }
}

#[test]
fn test_double_not_and_negated_call() {
    assert_eq!(pretty("!!visited"), "!(!(visited))");
    assert_eq!(pretty("-f(x)"), "-(f(x))");
}

// ---
// Function calls
// ---

#[test]
fn test_function_call_arguments() {
    let expr = parse_expression("f(1, 2, 3)").unwrap();
    match expr {
        Expr::Call { name, args, .. } => {
            assert_eq!(name, "f");
            let values: Vec<i64> = args
                .iter()
                .map(|a| match a {
                    Expr::Number(n, _) => *n,
                    other => panic!("unexpected argument {:?}", other),
                })
                .collect();
            assert_eq!(values, vec![1, 2, 3]);
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_function_call_without_arguments() {
    let expr = parse_expression("f()").unwrap();
    assert!(matches!(expr, Expr::Call { ref name, ref args, .. } if name == "f" && args.is_empty()));
    assert_eq!(pretty("f( )"), "f()");
}

#[test]
fn test_nested_calls_with_expressions() {
    assert_eq!(
        pretty("max(a + 1, min(b, 2) * 3)"),
        "max((a + 1), (min(b, 2) * 3))"
    );
}

// ---
// Failures
// ---

#[test]
fn test_unclosed_call_is_reported() {
    let err = parse_expression("f(1, 2").unwrap_err();
    assert!(err.to_string().contains("closing ')' for function call"));
}

#[test]
fn test_unclosed_parenthesis_is_reported() {
    let err = parse_expression("(1 + 2").unwrap_err();
    assert!(err.to_string().contains("closing ')'"));
}

#[test]
fn test_trailing_input_is_rejected() {
    let err = parse_expression("1 + 2 )").unwrap_err();
    assert_eq!(err.error_code(), "quill::parse");
}

#[test]
fn test_input_after_a_newline_is_rejected() {
    let err = parse_expression("1 + 2\n3 garbage").unwrap_err();
    assert_eq!(err.error_code(), "quill::parse");
    assert!(err.to_string().contains("unexpected trailing input"));
    assert_eq!(pretty("1 + 2\r\n\n"), "(1 + 2)");
}

#[test]
fn test_parenthesised_span_includes_the_parentheses() {
    let expr = parse_expression("(1 + 2) * 3").unwrap();
    assert_eq!(expr.span().start, 0);
    assert_eq!(expr.span().end, 11);
}

#[test]
fn test_empty_input_is_rejected() {
    assert!(parse_expression("   ").is_err());
}

// ---
// Round trip through the pretty printer
// ---

#[test]
fn test_pretty_output_reparses_to_same_tree() {
    for source in [
        "1 - 2 - 3",
        "1 + 2 * 3 / 4",
        "-(a + b) * !c",
        "f(1, g(x, y), -z) >= 10 || done and not_yet",
        "--5 != --(6)",
        "((((1))))",
    ] {
        let first = parse_expression(source).unwrap();
        let second = parse_expression(&first.pretty()).unwrap();
        assert!(
            first.same_shape(&second),
            "{} -> {} did not round-trip",
            source,
            first.pretty()
        );
    }
}

// ---
// Independent parses share nothing
// ---

#[test]
fn test_parallel_parses_are_independent() {
    let handles: Vec<_> = (0..8)
        .map(|i| std::thread::spawn(move || parse_expression(&format!("{} * (x + {})", i, i)).map(|e| e.pretty())))
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let rendered = handle.join().unwrap().unwrap();
        assert_eq!(rendered, format!("({} * (x + {}))", i, i));
    }
}
