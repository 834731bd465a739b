use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::environment::Environment;
use crate::evaluator::builtins;
use crate::object::{Value, FALSE, NULL, TRUE};
use crate::parser::{BlockStatement, Expression, Program, Statement};

/// Mirrors the reference interpreter's `nativeBoolToBooleanObject`: every
/// boolean the evaluator produces is a clone of the shared `TRUE`/`FALSE`
/// static rather than a freshly built `Value::Boolean`.
fn native_bool_to_value(value: bool) -> Value {
    if value {
        TRUE.clone()
    } else {
        FALSE.clone()
    }
}

/// Evaluates a complete program. A `ReturnValue` reaching this boundary is
/// unwrapped; an `Error` is returned as-is; otherwise the last statement's
/// value is the program's value (Null if the program is empty).
pub fn eval(program: &Program, env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = NULL.clone();
    for statement in &program.statements {
        result = eval_statement(statement, env);
        match result {
            Value::ReturnValue(inner) => return *inner,
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

/// Evaluates a block without unwrapping `ReturnValue` — only the function-call
/// boundary and the top-level program do that, so a `return` inside a nested
/// block can keep propagating outward unwrapped.
fn eval_block_statement(block: &BlockStatement, env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = Value::Null;
    for statement in &block.statements {
        result = eval_statement(statement, env);
        if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Rc<RefCell<Environment>>) -> Value {
    log::trace!("eval_statement: {statement}");
    match statement {
        Statement::Let { name, value } => {
            let evaluated = eval_expression(value, env);
            if is_error(&evaluated) {
                return evaluated;
            }
            env.borrow_mut().define(name.value.clone(), evaluated);
            Value::Null
        }
        Statement::Return { value } => {
            let evaluated = eval_expression(value, env);
            if is_error(&evaluated) {
                return evaluated;
            }
            Value::ReturnValue(Box::new(evaluated))
        }
        Statement::Expression { expression } => eval_expression(expression, env),
    }
}

fn eval_expression(expression: &Expression, env: &Rc<RefCell<Environment>>) -> Value {
    match expression {
        Expression::Identifier(ident) => eval_identifier(&ident.value, env),
        Expression::IntegerLiteral(value) => Value::Integer(*value),
        Expression::BooleanLiteral(value) => Value::Boolean(*value),
        Expression::StringLiteral(value) => Value::Str(value.clone()),
        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env);
            if is_error(&right) {
                return right;
            }
            eval_prefix_expression(operator, right)
        }
        Expression::Infix { operator, left, right } if operator == "=" => {
            eval_assign_expression(left, right, env)
        }
        Expression::Infix { operator, left, right } => {
            let left = eval_expression(left, env);
            if is_error(&left) {
                return left;
            }
            let right = eval_expression(right, env);
            if is_error(&right) {
                return right;
            }
            eval_infix_expression(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => eval_if_expression(condition, consequence, alternative.as_ref(), env),
        Expression::FunctionLiteral { parameters, body } => Value::Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: Rc::clone(env),
        },
        Expression::Call { function, arguments } => eval_call_expression(function, arguments, env),
        Expression::ArrayLiteral { elements } => {
            match eval_expressions(elements, env) {
                Ok(values) => Value::Array(values),
                Err(error) => error,
            }
        }
        Expression::Index { left, index } => {
            let left = eval_expression(left, env);
            if is_error(&left) {
                return left;
            }
            let index = eval_expression(index, env);
            if is_error(&index) {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expression::HashMapLiteral { pairs } => eval_hashmap_literal(pairs, env),
    }
}

fn eval_identifier(name: &str, env: &Rc<RefCell<Environment>>) -> Value {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return builtin;
    }
    Value::Error(format!("identifier not found: {name}"))
}

/// The left side of `=` must be a bare identifier; the assignment itself
/// evaluates to the assigned value, and the binding is updated with
/// walk-to-outer-bind semantics rather than always shadowing locally.
fn eval_assign_expression(
    left: &Expression,
    right: &Expression,
    env: &Rc<RefCell<Environment>>,
) -> Value {
    let name = match left {
        Expression::Identifier(ident) => ident.value.clone(),
        _ => return Value::Error("left side of assignment must be an identifier".to_string()),
    };
    let value = eval_expression(right, env);
    if is_error(&value) {
        return value;
    }
    env.borrow_mut().set(&name, value.clone());
    value
}

fn eval_prefix_expression(operator: &str, right: Value) -> Value {
    match operator {
        "!" => eval_bang_operator(right),
        "-" => eval_minus_prefix_operator(right),
        _ => Value::Error(format!("unknown operator: {operator}{}", right.kind_name())),
    }
}

fn eval_bang_operator(right: Value) -> Value {
    match right {
        Value::Boolean(true) => Value::Boolean(false),
        Value::Boolean(false) => Value::Boolean(true),
        Value::Null => Value::Boolean(true),
        _ => Value::Boolean(false),
    }
}

fn eval_minus_prefix_operator(right: Value) -> Value {
    match right {
        Value::Integer(value) => Value::Integer(-value),
        other => Value::Error(format!("unknown operator: -{}", other.kind_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Value, right: Value) -> Value {
    if let (Value::Integer(left), Value::Integer(right)) = (&left, &right) {
        return eval_integer_infix_expression(operator, *left, *right);
    }
    if let (Value::Str(left), Value::Str(right)) = (&left, &right) {
        return eval_string_infix_expression(operator, left, right);
    }
    if operator == "==" {
        return Value::Boolean(reference_equal(&left, &right));
    }
    if operator == "!=" {
        return Value::Boolean(!reference_equal(&left, &right));
    }
    if left.kind_name() != right.kind_name() {
        return Value::Error(format!(
            "type mismatch: {} {operator} {}",
            left.kind_name(),
            right.kind_name()
        ));
    }
    Value::Error(format!(
        "unknown operator: {} {operator} {}",
        left.kind_name(),
        right.kind_name()
    ))
}

/// TRUE/FALSE/NULL are the only variants the language compares by identity;
/// since none of them own heap data, structural comparison of those three
/// shapes *is* identity comparison here (see the note on `object::TRUE`).
/// Every other pairing (including two structurally identical non-singleton
/// values) is reported as not equal, matching a host pointer comparison on
/// two independently allocated objects.
fn reference_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left + right),
        "-" => Value::Integer(left - right),
        "*" => Value::Integer(left * right),
        "/" => Value::Integer(left / right),
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        _ => Value::Error(format!("unknown operator: INTEGER {operator} INTEGER")),
    }
}

fn eval_string_infix_expression(operator: &str, left: &str, right: &str) -> Value {
    if operator == "+" {
        return Value::Str(format!("{left}{right}"));
    }
    Value::Error(format!("unknown operator: STRING {operator} STRING"))
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &BlockStatement,
    alternative: Option<&BlockStatement>,
    env: &Rc<RefCell<Environment>>,
) -> Value {
    let condition = eval_expression(condition, env);
    if is_error(&condition) {
        return condition;
    }
    if condition.is_truthy() {
        eval_block_statement(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block_statement(alternative, env)
    } else {
        Value::Null
    }
}

fn eval_call_expression(
    function: &Expression,
    arguments: &[Expression],
    env: &Rc<RefCell<Environment>>,
) -> Value {
    let function = eval_expression(function, env);
    if is_error(&function) {
        return function;
    }
    let arguments = match eval_expressions(arguments, env) {
        Ok(values) => values,
        Err(error) => return error,
    };
    apply_function(function, arguments)
}

/// Evaluates expressions left-to-right, stopping at the first `Error`.
fn eval_expressions(
    expressions: &[Expression],
    env: &Rc<RefCell<Environment>>,
) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(expressions.len());
    for expression in expressions {
        let value = eval_expression(expression, env);
        if is_error(&value) {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn apply_function(function: Value, arguments: Vec<Value>) -> Value {
    match function {
        Value::Function { parameters, body, env } => {
            let call_env = Rc::new(RefCell::new(Environment::new_enclosed(env)));
            for (parameter, argument) in parameters.iter().zip(arguments) {
                call_env.borrow_mut().define(parameter.value.clone(), argument);
            }
            let evaluated = eval_block_statement(&body, &call_env);
            unwrap_return_value(evaluated)
        }
        Value::Builtin(builtin) => {
            log::debug!("dispatching built-in with {} argument(s)", arguments.len());
            builtin(&arguments)
        }
        other => Value::Error(format!("not a function: {}", other.kind_name())),
    }
}

fn unwrap_return_value(value: Value) -> Value {
    match value {
        Value::ReturnValue(inner) => *inner,
        other => other,
    }
}

fn eval_index_expression(left: Value, index: Value) -> Value {
    let left_kind = left.kind_name();
    match left {
        Value::Array(elements) => match index {
            Value::Integer(i) => {
                if i < 0 || i as usize >= elements.len() {
                    Value::Null
                } else {
                    elements[i as usize].clone()
                }
            }
            _ => Value::Error(format!("index operator not supported: {left_kind}")),
        },
        Value::HashMap(pairs) => match index.hash_key() {
            Ok(key) => pairs.get(&key).map(|(_, v)| v.clone()).unwrap_or(Value::Null),
            Err(message) => Value::Error(message),
        },
        _ => Value::Error(format!("index operator not supported: {left_kind}")),
    }
}

fn eval_hashmap_literal(
    pairs: &[(Expression, Expression)],
    env: &Rc<RefCell<Environment>>,
) -> Value {
    let mut map = HashMap::with_capacity(pairs.len());
    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env);
        if is_error(&key) {
            return key;
        }
        let value = eval_expression(value_expr, env);
        if is_error(&value) {
            return value;
        }
        match key.hash_key() {
            Ok(hash_key) => {
                map.insert(hash_key, (key, value));
            }
            Err(message) => return Value::Error(message),
        }
    }
    Value::HashMap(map)
}

fn is_error(value: &Value) -> bool {
    matches!(value, Value::Error(_))
}
