use quill_core::{check_arity, Env, QuillError, Value};

use super::{numeric_arg, register_fn};
use crate::eval::fetch;

pub fn register(env: &mut Env) {
    register_fn(env, "EQ", eq);
    register_fn(env, "POS", pos);
    register_fn(env, "NEG", neg);
    register_fn(env, "ATOM", atom);
}

fn truth_of(test: bool) -> Value {
    if test {
        Value::truth()
    } else {
        Value::nil()
    }
}

fn eq(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "EQ", 2);
    let left = numeric_arg("EQ", &args[0], env)?;
    let right = numeric_arg("EQ", &args[1], env)?;
    Ok(truth_of(left == right))
}

fn pos(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "POS", 1);
    Ok(truth_of(numeric_arg("POS", &args[0], env)? >= 0.0))
}

fn neg(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "NEG", 1);
    Ok(truth_of(numeric_arg("NEG", &args[0], env)? < 0.0))
}

/// True for atoms, the canonical true and nil; non-empty lists and
/// callables are not atomic.
fn atom(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "ATOM", 1);
    let fetched = fetch(&args[0], env)?;
    let atomic = match &fetched {
        Value::Atom(_) => true,
        Value::List(list) => list.is_empty(),
        Value::Method(_) | Value::Native(_) => false,
    };
    Ok(truth_of(atomic))
}
