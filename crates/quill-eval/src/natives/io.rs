use quill_core::{Env, QuillError, Value};

use super::register_fn;
use crate::printer::{render, Output};

pub fn register(env: &mut Env, out: &Output) {
    let out = out.clone();
    register_fn(env, "PRINT", move |env, args| {
        let mut line = String::new();
        for arg in args {
            line.push_str(&render(arg, env, out.color)?);
            line.push(' ');
        }
        out.write_line(&line)
            .map_err(|e| QuillError::Io(format!("PRINT: {e}")))?;
        Ok(Value::nil())
    });
}
