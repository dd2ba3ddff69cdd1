use quill_core::{check_arity, Env, QuillError, Value};

use super::{numeric_arg, register_fn};

pub fn register(env: &mut Env) {
    register_fn(env, "ADD", add);
    register_fn(env, "+", add);
    register_fn(env, "SUB", sub);
    register_fn(env, "-", sub);
    register_fn(env, "MULT", mult);
    register_fn(env, "*", mult);
    register_fn(env, "DIV", div);
    register_fn(env, "/", div);
    register_fn(env, "EXP", exp);
    register_fn(env, "SQUARE", square);
}

fn add(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "ADD", 2..);
    let mut sum = 0.0;
    for arg in args {
        sum += numeric_arg("ADD", arg, env)?;
    }
    Ok(Value::number(sum))
}

fn sub(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "SUB", 2);
    let minuend = numeric_arg("SUB", &args[0], env)?;
    let subtrahend = numeric_arg("SUB", &args[1], env)?;
    Ok(Value::number(minuend - subtrahend))
}

fn mult(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "MULT", 2..);
    let mut product = 1.0;
    for arg in args {
        product *= numeric_arg("MULT", arg, env)?;
    }
    Ok(Value::number(product))
}

// Division by zero follows host floating point: inf, -inf or NaN.
fn div(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "DIV", 2);
    let dividend = numeric_arg("DIV", &args[0], env)?;
    let divisor = numeric_arg("DIV", &args[1], env)?;
    Ok(Value::number(dividend / divisor))
}

fn exp(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "EXP", 2);
    let base = numeric_arg("EXP", &args[0], env)?;
    let exponent = numeric_arg("EXP", &args[1], env)?;
    Ok(Value::number(base.powf(exponent)))
}

fn square(env: &mut Env, args: &[Value]) -> Result<Value, QuillError> {
    check_arity!(args, "SQUARE", 1);
    let x = numeric_arg("SQUARE", &args[0], env)?;
    Ok(Value::number(x * x))
}
