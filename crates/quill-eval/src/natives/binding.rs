use std::rc::Rc;

use quill_core::value::{Atom, List, Method};
use quill_core::{check_arity, Env, QuillError, Value};

use super::register_fn;
use crate::eval::fetch;

pub fn register(env: &mut Env) {
    register_fn(env, "DEF", def);
    register_fn(env, "SET", set);
    register_fn(env, "SETQ", setq);
}

fn plain_atom(value: &Value) -> Option<Atom> {
    match value {
        Value::Atom(atom) if !atom.quoted => Some(*atom),
        _ => None,
    }
}

fn plain_list(value: &Value) -> Option<&List> {
    match value {
        Value::List(list) if !list.quoted => Some(list),
        _ => None,
    }
}

/// (DEF name (param) body): construct a method and bind it.
fn def(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "DEF", 3);
    let name = plain_atom(&args[0])
        .ok_or_else(|| QuillError::op("DEF", "the name must be an unquoted atom"))?;
    let params = plain_list(&args[1])
        .ok_or_else(|| QuillError::op("DEF", "the parameters must be an unquoted list"))?;
    if params.items.len() != 1 {
        return Err(QuillError::op("DEF", "exactly one formal parameter is required"));
    }
    let param = plain_atom(&params.items[0])
        .filter(|atom| !atom.is_reserved() && !atom.is_number())
        .ok_or_else(|| QuillError::op("DEF", "the formal parameter must be a plain atom"))?;
    let body = plain_list(&args[2])
        .ok_or_else(|| QuillError::op("DEF", "the body must be an unquoted list"))?
        .clone();

    let method = Rc::new(Method { name, param, body });
    env.set(name.key(), Value::Method(method.clone()));
    Ok(Value::Method(method))
}

/// (SET target value): both sides fetched; the target must come out
/// as a quoted atom, so callers write (SET 'NAME …) or go through a
/// variable holding one.
fn set(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "SET", 2);
    let target = fetch(&args[0], env)?;
    let atom = match &target {
        Value::Atom(atom) if atom.quoted => *atom,
        _ => {
            return Err(QuillError::op(
                "SET",
                "the target must fetch to a quoted atom",
            ))
        }
    };
    if atom.is_reserved() {
        return Err(QuillError::op("SET", "TRUE and NIL cannot be rebound"));
    }
    let value = fetch(&args[1], env)?;
    env.set(atom.key(), value.clone());
    Ok(value)
}

/// (SETQ name value): the name is taken syntactically, unfetched.
fn setq(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "SETQ", 2);
    let atom = plain_atom(&args[0])
        .ok_or_else(|| QuillError::op("SETQ", "the target must be an unquoted atom"))?;
    if atom.is_reserved() {
        return Err(QuillError::op("SETQ", "TRUE and NIL cannot be rebound"));
    }
    let value = fetch(&args[1], env)?;
    env.set(atom.key(), value.clone());
    Ok(value)
}
