use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::environment::Environment;
use crate::evaluator;
use crate::lexer::Lexer;
use crate::object::Value;
use crate::parser::{Parser, Program};

/// Ties the lexer, parser and evaluator together behind the crate's two
/// documented entry points: parsing source into a `Program` plus its
/// accumulated diagnostics, and evaluating a `Program` against an
/// environment. Neither collaborator owns any state across calls — all
/// session state (bindings made so far) lives in the `Environment` the
/// caller threads through.
pub struct Interpreter;

impl Interpreter {
    /// Parses `source` into a `Program`. Parsing never aborts: a malformed
    /// statement contributes a diagnostic and parsing continues, so callers
    /// must check whether `errors` is empty before evaluating.
    pub fn parse(source: &str) -> (Program, Vec<String>) {
        let lexer = Lexer::new(source);
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        let errors = parser.errors().to_vec();
        if !errors.is_empty() {
            debug!("parse produced {} error(s)", errors.len());
        }
        (program, errors)
    }

    /// Evaluates an already-parsed program against `env`.
    pub fn eval(program: &Program, env: &Rc<RefCell<Environment>>) -> Value {
        evaluator::eval(program, env)
    }

    /// A fresh root environment with no enclosing scope.
    pub fn new_environment() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment::new_global()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_then_eval_runs_a_small_program() {
        let (program, errors) = Interpreter::parse("let x = 2 * (3 + 4); x;");
        assert!(errors.is_empty());
        let env = Interpreter::new_environment();
        match Interpreter::eval(&program, &env) {
            Value::Integer(14) => {}
            other => panic!("expected Integer(14), got {other:?}"),
        }
    }

    #[test]
    fn parse_surfaces_errors_without_aborting() {
        let (_program, errors) = Interpreter::parse("let x 5;");
        assert!(!errors.is_empty());
    }

    #[test]
    fn bindings_persist_across_eval_calls_against_the_same_environment() {
        let env = Interpreter::new_environment();
        let (program, _) = Interpreter::parse("let x = 5;");
        Interpreter::eval(&program, &env);

        let (program, _) = Interpreter::parse("x + 1;");
        match Interpreter::eval(&program, &env) {
            Value::Integer(6) => {}
            other => panic!("expected Integer(6), got {other:?}"),
        }
    }
}
