use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use once_cell::sync::Lazy;

use crate::environment::Environment;
use crate::parser::{BlockStatement, Identifier};

/// A host-provided function surfaced to Monkey code by name. Builtins never
/// fail loudly: misuse is reported the same way as any other runtime error,
/// by returning `Value::Error`.
pub type BuiltinFn = fn(&[Value]) -> Value;

/// The runtime value sum type. `Clone` is cheap for every variant except
/// `Array`/`HashMap`, whose contents are cloned along with the spine — Monkey
/// has no mutation-through-aliasing of these, so this matches the language's
/// own value semantics rather than introducing sharing bugs.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Str(String),
    Null,
    /// Wraps the value produced by a `return` statement so it can escape
    /// nested blocks without being confused for an ordinary result. Unwrapped
    /// exactly once, at the Program boundary or a function-call boundary.
    ReturnValue(Box<Value>),
    Error(String),
    Function {
        parameters: Vec<Identifier>,
        body: BlockStatement,
        env: Rc<RefCell<Environment>>,
    },
    Builtin(BuiltinFn),
    Array(Vec<Value>),
    HashMap(HashMap<HashKey, (Value, Value)>),
}

/// TRUE, FALSE and NULL are allocated once and handed out by cloning. Since
/// none of these three variants own heap data, a clone is indistinguishable
/// from the original for every purpose the language cares about (there is no
/// pointer to alias or diverge) — so reference-equivalence and
/// structural-equivalence coincide here and a plain `match` suffices wherever
/// the evaluator treats them as singletons.
pub static TRUE: Lazy<Value> = Lazy::new(|| Value::Boolean(true));
pub static FALSE: Lazy<Value> = Lazy::new(|| Value::Boolean(false));
pub static NULL: Lazy<Value> = Lazy::new(|| Value::Null);

/// A structural identifier used to index a hashmap: a kind tag plus a 64-bit
/// digest. Two values that are "the same key" collapse to the same `HashKey`
/// regardless of which runtime representation produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: &'static str,
    pub digest: u64,
}

impl Value {
    /// The kind tag used verbatim in canonical error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Str(_) => "STRING",
            Value::Null => "NULL",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
            Value::Function { .. } => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::Array(_) => "ARRAY",
            Value::HashMap(_) => "HASHMAP",
        }
    }

    /// NULL and FALSE are falsy, everything else (including zero) is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    /// Computes the `HashKey` for a hashable value, or an `unusable as hash
    /// key` message for anything else.
    pub fn hash_key(&self) -> Result<HashKey, String> {
        match self {
            Value::Integer(i) => Ok(HashKey {
                kind: "INTEGER",
                digest: *i as u64,
            }),
            Value::Boolean(b) => Ok(HashKey {
                kind: "BOOLEAN",
                digest: if *b { 1 } else { 0 },
            }),
            Value::Str(s) => {
                let mut hasher = DefaultHasher::new();
                s.hash(&mut hasher);
                Ok(HashKey {
                    kind: "STRING",
                    digest: hasher.finish(),
                })
            }
            other => Err(format!("unusable as hash key: {}", other.kind_name())),
        }
    }

    /// The stable, test-facing rendering of a value. Identical to `Display`;
    /// kept as a named method since callers read more naturally as
    /// `value.inspect()` than `value.to_string()` at call sites that care
    /// about the interpreter's output contract specifically.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Null => write!(f, "null"),
            Value::ReturnValue(inner) => write!(f, "{inner}"),
            Value::Error(message) => write!(f, "ERROR: {message}"),
            Value::Function { parameters, body, .. } => {
                let params: Vec<String> = parameters.iter().map(|p| p.value.clone()).collect();
                write!(f, "fn({}) {body}", params.join(", "))
            }
            Value::Builtin(_) => write!(f, "builtin function"),
            Value::Array(elements) => {
                let items: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::HashMap(pairs) => {
                let items: Vec<String> =
                    pairs.values().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", items.join(", "))
            }
        }
    }
}
