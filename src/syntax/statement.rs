//! The two statement forms that embed expressions: variable declaration or
//! assignment, and return.
//!
//! Both only report "no match" before their first defining token. Once that
//! token has been seen, anything missing is a fatal diagnostic.

use log::{debug, trace};

use crate::ast::{Expr, Span, Stmt};
use crate::syntax::rules::{Parser, RuleResult};

impl<'src, 'sink> Parser<'src, 'sink> {
    /// `var name`, `var name = value` or `name = value`.
    pub fn variable_declaration_or_assignment(&mut self) -> RuleResult<Stmt> {
        trace!("variable_declaration_or_assignment at offset {}", self.offset());
        self.try_rule(|p| {
            p.skip_whitespace();
            let start = p.offset();

            let is_new_declaration = p
                .try_rule(|p| Ok(p.keyword("var").and_then(|_| p.cursor.whitespace())))?
                .is_some();

            let name = if is_new_declaration {
                p.expect(|p| Ok(p.cursor.identifier()), "variable name")?
            } else {
                match p.cursor.identifier() {
                    Some(name) => name,
                    None => return Ok(None),
                }
            };
            let name_end = p.offset();
            p.skip_whitespace();

            let value = if p.assignment_operator().is_some() {
                p.skip_whitespace();
                p.expect(Self::expression, "value expression to be assigned")?
            } else if is_new_declaration {
                Expr::Number(0, Span::new(name_end, name_end))
            } else {
                return Ok(None);
            };

            let end = value.span().end.max(name_end);
            debug!(
                "parsed {} of '{}'",
                if is_new_declaration { "declaration" } else { "assignment" },
                name
            );
            Ok(Some(Stmt::VarAssign {
                name: name.to_string(),
                value,
                is_new_declaration,
                span: Span::new(start, end),
            }))
        })
    }

    /// `return` with an optional value.
    pub fn return_statement(&mut self) -> RuleResult<Stmt> {
        trace!("return_statement at offset {}", self.offset());
        self.try_rule(|p| {
            p.skip_whitespace();
            let Some(keyword) = p.keyword("return") else {
                return Ok(None);
            };
            p.skip_whitespace();
            let value = p.expression()?;
            let end = value.as_ref().map_or(keyword.end, |v| v.span().end);
            debug!("parsed return (has value: {})", value.is_some());
            Ok(Some(Stmt::Return {
                value,
                span: Span::new(keyword.start, end),
            }))
        })
    }

    /// A single `=`, but not the first half of `==`.
    fn assignment_operator(&mut self) -> Option<Span> {
        if self.rest().starts_with("==") {
            return None;
        }
        self.literal("=")
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, Span, Stmt};
    use crate::diagnostics::Diagnostics;
    use crate::syntax::rules::Parser;

    #[test]
    fn declaration_span_excludes_trailing_whitespace() {
        let mut sink = Diagnostics::new();
        let stmt = Parser::new("  var x = 10   ", &mut sink)
            .variable_declaration_or_assignment()
            .unwrap()
            .unwrap();
        assert_eq!(stmt.span(), Span::new(2, 12));
    }

    #[test]
    fn default_value_sits_after_the_name() {
        let mut sink = Diagnostics::new();
        let stmt = Parser::new("var score", &mut sink)
            .variable_declaration_or_assignment()
            .unwrap()
            .unwrap();
        match stmt {
            Stmt::VarAssign { value: Expr::Number(0, span), span: whole, .. } => {
                assert_eq!(span, Span::new(9, 9));
                assert_eq!(whole, Span::new(0, 9));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn var_prefix_of_identifier_is_not_a_keyword() {
        let mut sink = Diagnostics::new();
        let stmt = Parser::new("variable = 2", &mut sink)
            .variable_declaration_or_assignment()
            .unwrap()
            .unwrap();
        assert!(matches!(
            stmt,
            Stmt::VarAssign { ref name, is_new_declaration: false, .. } if name == "variable"
        ));
    }

    #[test]
    fn equality_is_not_an_assignment() {
        let mut sink = Diagnostics::new();
        let mut parser = Parser::new("x == 2", &mut sink);
        assert!(parser.variable_declaration_or_assignment().unwrap().is_none());
        assert_eq!(parser.offset(), 0);
    }

    #[test]
    fn bare_return_ends_at_keyword() {
        let mut sink = Diagnostics::new();
        let stmt = Parser::new(" return  ", &mut sink)
            .return_statement()
            .unwrap()
            .unwrap();
        assert_eq!(stmt, Stmt::Return { value: None, span: Span::new(1, 7) });
    }

    #[test]
    fn start_offset_inside_a_character_snaps_back() {
        let mut sink = Diagnostics::new();
        let stmt = Parser::new("é = 1", &mut sink)
            .starting_at(1)
            .variable_declaration_or_assignment()
            .unwrap()
            .unwrap();
        assert!(matches!(stmt, Stmt::VarAssign { ref name, .. } if name == "é"));
        assert_eq!(stmt.span(), Span::new(0, 6));
    }
}
