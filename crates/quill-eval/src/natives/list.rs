use quill_core::value::List;
use quill_core::{check_arity, Env, QuillError, Value};

use super::register_fn;
use crate::eval::{execute, fetch};

pub fn register(env: &mut Env) {
    register_fn(env, "CAR", car);
    register_fn(env, "CDR", cdr);
    register_fn(env, "CONS", cons);
    register_fn(env, "REVERSE", reverse);
    register_fn(env, "EVAL", eval);
}

fn fetch_list(name: &str, arg: &Value, env: &mut Env) -> Result<List, QuillError> {
    match fetch(arg, env)? {
        Value::List(list) => Ok(list),
        other => Err(QuillError::type_error(name, "a list", other.type_name())),
    }
}

fn car(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "CAR", 1);
    let list = fetch_list("CAR", &args[0], env)?;
    list.items
        .first()
        .cloned()
        .ok_or_else(|| QuillError::op("CAR", "cannot take the head of NIL"))
}

// CDR, CONS and REVERSE hand back quoted lists: their results are
// data and must not be re-evaluated by a later fetch.
fn cdr(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "CDR", 1);
    let list = fetch_list("CDR", &args[0], env)?;
    if list.is_empty() {
        return Err(QuillError::op("CDR", "cannot take the tail of NIL"));
    }
    Ok(Value::quoted_list(list.items[1..].to_vec()))
}

fn cons(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "CONS", 2);
    let head = fetch(&args[0], env)?;
    let rest = fetch_list("CONS", &args[1], env)?;
    let mut items = Vec::with_capacity(rest.items.len() + 1);
    items.push(head);
    items.extend(rest.items.iter().cloned());
    Ok(Value::quoted_list(items))
}

fn reverse(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "REVERSE", 1);
    let list = fetch_list("REVERSE", &args[0], env)?;
    let items = list.items.iter().rev().cloned().collect();
    Ok(Value::quoted_list(items))
}

/// Rewrap a fetched list as code and run it; anything else passes
/// through.
fn eval(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "EVAL", 1);
    match fetch(&args[0], env)? {
        Value::List(list) => {
            let code = Value::list(list.items.iter().cloned().collect());
            execute(&code, env)
        }
        other => Ok(other),
    }
}
