use crate::object::Value;

/// Looked up after an ordinary environment lookup has already failed, so a
/// user binding of the same name shadows a builtin rather than conflicting
/// with it.
pub fn lookup(name: &str) -> Option<Value> {
    match name {
        "len" => Some(Value::Builtin(len)),
        "first" => Some(Value::Builtin(first)),
        "last" => Some(Value::Builtin(last)),
        "rest" => Some(Value::Builtin(rest)),
        "push" => Some(Value::Builtin(push)),
        "print" => Some(Value::Builtin(print)),
        _ => None,
    }
}

fn wrong_number_of_arguments(got: usize, want: usize) -> Value {
    Value::Error(format!("wrong number of arguments. got={got}, want={want}"))
}

fn len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_number_of_arguments(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        Value::Str(s) => Value::Integer(s.chars().count() as i64),
        other => Value::Error(format!("argument to `len` not supported {}", other.kind_name())),
    }
}

fn first(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_number_of_arguments(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => elements.first().cloned().unwrap_or(Value::Null),
        other => Value::Error(format!(
            "argument to `first` must be ARRAY, got {}",
            other.kind_name()
        )),
    }
}

fn last(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_number_of_arguments(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => elements.last().cloned().unwrap_or(Value::Null),
        other => Value::Error(format!(
            "argument to `last` must be ARRAY, got {}",
            other.kind_name()
        )),
    }
}

fn rest(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_number_of_arguments(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) if elements.is_empty() => Value::Null,
        Value::Array(elements) => Value::Array(elements[1..].to_vec()),
        other => Value::Error(format!(
            "argument to `rest` must be ARRAY, got {}",
            other.kind_name()
        )),
    }
}

fn push(args: &[Value]) -> Value {
    if args.len() != 2 {
        return wrong_number_of_arguments(args.len(), 2);
    }
    match &args[0] {
        Value::Array(elements) => {
            let mut extended = elements.clone();
            extended.push(args[1].clone());
            Value::Array(extended)
        }
        other => Value::Error(format!(
            "argument to `push` must be ARRAY, got {}",
            other.kind_name()
        )),
    }
}

fn print(args: &[Value]) -> Value {
    let lines: Vec<String> = args.iter().map(Value::inspect).collect();
    println!("{}", lines.join("\n"));
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_counts_array_elements_and_string_scalars() {
        match len(&[Value::Array(vec![Value::Integer(1), Value::Integer(2)])]) {
            Value::Integer(2) => {}
            other => panic!("expected Integer(2), got {other:?}"),
        }
        match len(&[Value::Str("hello 世界".to_string())]) {
            Value::Integer(8) => {}
            other => panic!("expected Integer(8), got {other:?}"),
        }
    }

    #[test]
    fn len_rejects_unsupported_kinds_and_wrong_arity() {
        match len(&[Value::Integer(1)]) {
            Value::Error(message) => assert_eq!(message, "argument to `len` not supported INTEGER"),
            other => panic!("expected Error, got {other:?}"),
        }
        match len(&[]) {
            Value::Error(message) => {
                assert_eq!(message, "wrong number of arguments. got=0, want=1")
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn first_last_rest_handle_empty_arrays_as_null() {
        assert!(matches!(first(&[Value::Array(vec![])]), Value::Null));
        assert!(matches!(last(&[Value::Array(vec![])]), Value::Null));
        assert!(matches!(rest(&[Value::Array(vec![])]), Value::Null));
    }

    #[test]
    fn rest_never_mutates_the_original_array() {
        let original = Value::Array(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        match rest(&[original.clone()]) {
            Value::Array(elements) => {
                assert_eq!(elements.len(), 2);
            }
            other => panic!("expected Array, got {other:?}"),
        }
        match original {
            Value::Array(elements) => assert_eq!(elements.len(), 3),
            _ => unreachable!(),
        }
    }

    #[test]
    fn push_returns_a_fresh_array_with_the_value_appended() {
        let original = Value::Array(vec![Value::Integer(1)]);
        match push(&[original.clone(), Value::Integer(2)]) {
            Value::Array(elements) => {
                assert_eq!(elements.len(), 2);
            }
            other => panic!("expected Array, got {other:?}"),
        }
        match original {
            Value::Array(elements) => assert_eq!(elements.len(), 1),
            _ => unreachable!(),
        }
    }

    #[test]
    fn first_last_push_reject_non_array_arguments() {
        match first(&[Value::Integer(1)]) {
            Value::Error(message) => {
                assert_eq!(message, "argument to `first` must be ARRAY, got INTEGER")
            }
            other => panic!("expected Error, got {other:?}"),
        }
        match last(&[Value::Integer(1)]) {
            Value::Error(message) => {
                assert_eq!(message, "argument to `last` must be ARRAY, got INTEGER")
            }
            other => panic!("expected Error, got {other:?}"),
        }
        match push(&[Value::Integer(1), Value::Integer(2)]) {
            Value::Error(message) => {
                assert_eq!(message, "argument to `push` must be ARRAY, got INTEGER")
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }
}
