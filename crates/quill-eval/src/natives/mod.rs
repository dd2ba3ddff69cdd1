mod arithmetic;
mod binding;
mod io;
mod list;
mod predicates;

use std::rc::Rc;

use quill_core::value::NativeFn;
use quill_core::{intern_upper, Env, QuillError, Value};

use crate::printer::Output;

pub fn register_natives(env: &mut Env, out: &Output) {
    arithmetic::register(env);
    list::register(env);
    predicates::register(env);
    binding::register(env);
    io::register(env, out);
}

pub(crate) fn register_fn(
    env: &mut Env,
    name: &'static str,
    f: impl Fn(&mut Env, &[Value]) -> Result<Value, QuillError> + 'static,
) {
    env.set(
        intern_upper(name),
        Value::Native(Rc::new(NativeFn {
            name,
            func: Box::new(f),
        })),
    );
}

/// Fetch an operand and read its token text as a double.
pub(crate) fn numeric_arg(name: &str, arg: &Value, env: &mut Env) -> Result<f64, QuillError> {
    let fetched = crate::eval::fetch(arg, env)?;
    match &fetched {
        Value::Atom(atom) => atom
            .number()
            .ok_or_else(|| QuillError::type_error(name, "a number", format!("`{}`", atom.text()))),
        other => Err(QuillError::type_error(name, "a number", other.type_name())),
    }
}
