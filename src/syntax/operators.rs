//! The infix operator table.
//!
//! The table is scanned top to bottom and the first textual match wins,
//! whatever its precedence. A token that is a prefix of another token must
//! therefore come *after* it (`<=` before `<`).

use crate::ast::BinaryOp;
use crate::syntax::cursor::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfixOperator {
    pub token: &'static str,
    pub op: BinaryOp,
    /// Lower binds looser. Always at least 1.
    pub precedence: u8,
    /// Word operators must be followed by whitespace so that `android` is
    /// not read as `and` followed by `roid`.
    pub requires_trailing_whitespace: bool,
}

impl InfixOperator {
    const fn symbol(token: &'static str, op: BinaryOp, precedence: u8) -> Self {
        Self {
            token,
            op,
            precedence,
            requires_trailing_whitespace: false,
        }
    }

    const fn word(token: &'static str, op: BinaryOp, precedence: u8) -> Self {
        Self {
            token,
            op,
            precedence,
            requires_trailing_whitespace: true,
        }
    }
}

pub static INFIX_OPERATORS: [InfixOperator; 14] = [
    InfixOperator::symbol("&&", BinaryOp::And, 1),
    InfixOperator::symbol("||", BinaryOp::Or, 1),
    InfixOperator::word("and", BinaryOp::And, 1),
    InfixOperator::word("or", BinaryOp::Or, 1),
    InfixOperator::symbol("==", BinaryOp::Equal, 2),
    InfixOperator::symbol(">=", BinaryOp::GreaterEqual, 2),
    InfixOperator::symbol("<=", BinaryOp::LessEqual, 2),
    InfixOperator::symbol("<", BinaryOp::Less, 2),
    InfixOperator::symbol(">", BinaryOp::Greater, 2),
    InfixOperator::symbol("!=", BinaryOp::NotEqual, 2),
    InfixOperator::symbol("+", BinaryOp::Add, 3),
    InfixOperator::symbol("-", BinaryOp::Subtract, 4),
    InfixOperator::symbol("*", BinaryOp::Multiply, 5),
    InfixOperator::symbol("/", BinaryOp::Divide, 6),
];

/// Matches the first operator in the table whose token is at the cursor,
/// including the whitespace it requires. On failure nothing is consumed.
pub fn match_infix(cursor: &mut Cursor<'_>) -> Option<&'static InfixOperator> {
    let start = cursor.offset();
    let operator = INFIX_OPERATORS
        .iter()
        .find(|operator| cursor.rest().starts_with(operator.token))?;
    cursor.match_literal(operator.token)?;
    if operator.requires_trailing_whitespace && cursor.whitespace().is_none() {
        cursor.rewind(start);
        return None;
    }
    Some(operator)
}
