use quill_core::value::{Atom, Method};
use quill_core::{intern_upper, Env, QuillError, Value};

use crate::natives;
use crate::printer::Output;

pub type EvalResult = Result<Value, QuillError>;

/// Resolve a value to its effective runtime form.
///
/// Variable atoms are dereferenced one level; unquoted non-empty lists
/// are evaluated to completion. Quoted values, numbers, the reserved
/// tokens and callables pass through unchanged.
pub fn fetch(value: &Value, env: &mut Env) -> EvalResult {
    match value {
        Value::Atom(atom) if atom.is_nil_name() => Ok(Value::nil()),
        Value::Atom(atom) if !atom.quoted && !atom.is_true_name() && !atom.is_number() => env
            .get(atom.key())
            .ok_or_else(|| QuillError::UnknownVariable(atom.text())),
        Value::List(list) if !list.quoted && !list.is_empty() => {
            let result = execute(value, env)?;
            fetch(&result, env)
        }
        other => Ok(other.clone()),
    }
}

/// Apply a list as a function call. Quoted and empty lists are data
/// and return unchanged.
pub fn execute(value: &Value, env: &mut Env) -> EvalResult {
    let Value::List(list) = value else {
        return Ok(value.clone());
    };
    if list.quoted || list.is_empty() {
        return Ok(value.clone());
    }

    let head = &list.items[0];
    let args = &list.items[1..];
    let Value::Atom(name) = head else {
        return Err(QuillError::eval(format!(
            "head of a statement must be an atom, got {}",
            head.type_name()
        )));
    };

    let Some(binding) = env.get(name.key()) else {
        if let Some(letters) = accessor_letters(&name.text()) {
            return apply_accessor(name, &letters, args, env);
        }
        return Err(QuillError::UnknownFunction(name.text()));
    };

    match binding {
        Value::Native(native) => (native.func)(env, args),
        Value::Method(method) => apply_method(&method, args, env),
        other => Err(QuillError::eval(format!(
            "{} is not callable, it is {}",
            name.text(),
            other.type_name()
        ))),
    }
}

/// Single-parameter calling convention: the first raw argument is
/// fetched in the caller's environment and bound to the formal in a
/// snapshot frame; extra arguments are ignored.
fn apply_method(method: &Method, args: &[Value], env: &mut Env) -> EvalResult {
    if args.is_empty() {
        return Err(QuillError::arity(method.name.text(), "1", 0));
    }
    let bound = fetch(&args[0], env)?;
    let mut frame = env.call_frame(method.param.key(), bound);
    execute(&Value::List(method.body.clone()), &mut frame)
}

/// The middle letters of a `C[AD]+R` name, or None when the name is
/// not of that shape.
fn accessor_letters(name: &str) -> Option<Vec<char>> {
    let upper = name.to_uppercase();
    let middle = upper.strip_prefix('C')?.strip_suffix('R')?;
    if middle.is_empty() || !middle.chars().all(|c| c == 'A' || c == 'D') {
        return None;
    }
    Some(middle.chars().collect())
}

/// Synthesise a `c[ad]+r` chain from the CAR/CDR natives, consuming
/// the middle letters innermost (right-most) first.
fn apply_accessor(name: &Atom, letters: &[char], args: &[Value], env: &mut Env) -> EvalResult {
    let mut params: Vec<Value> = args.to_vec();
    for letter in letters.iter().rev() {
        let step = if *letter == 'A' { "CAR" } else { "CDR" };
        let Some(Value::Native(native)) = env.get(intern_upper(step)) else {
            return Err(QuillError::op(name.text(), format!("{step} is not defined")));
        };
        let result = (native.func)(env, &params)?;
        params = vec![result];
    }
    Ok(params.remove(0))
}

/// Owns the global environment and drives whole programs through it.
pub struct Interpreter {
    pub env: Env,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_output(Output::stdout(false))
    }

    pub fn with_output(out: Output) -> Self {
        let mut env = Env::new();
        natives::register_natives(&mut env, &out);
        Interpreter { env }
    }

    /// Parse the source and execute every statement in order. Each
    /// statement sees the cumulative effect of all prior statements.
    pub fn run(&mut self, source: &str) -> Result<(), QuillError> {
        for statement in quill_reader::parse(source)? {
            execute(&statement, &mut self.env)?;
        }
        Ok(())
    }

    /// Like [`Interpreter::run`], returning the value of the last
    /// statement. The embedding and test entry point.
    pub fn eval_str(&mut self, source: &str) -> EvalResult {
        let mut result = Value::nil();
        for statement in quill_reader::parse(source)? {
            result = execute(&statement, &mut self.env)?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> Value {
        Interpreter::new()
            .eval_str(input)
            .unwrap_or_else(|e| panic!("failed to eval `{input}`: {e}"))
    }

    fn eval_err(input: &str) -> QuillError {
        Interpreter::new()
            .eval_str(input)
            .expect_err(&format!("expected error for `{input}`"))
    }

    #[test]
    fn fetch_leaves_quoted_values_alone() {
        let mut env = Env::new();
        let quoted = Value::atom("X", true);
        assert_eq!(fetch(&quoted, &mut env).unwrap(), quoted);

        let list = Value::quoted_list(vec![Value::atom("A", true)]);
        assert_eq!(fetch(&list, &mut env).unwrap(), list);
    }

    #[test]
    fn fetch_resolves_nil_to_the_empty_list() {
        let mut env = Env::new();
        assert!(fetch(&Value::atom("nil", false), &mut env).unwrap().is_nil());
        assert!(fetch(&Value::atom("NIL", true), &mut env).unwrap().is_nil());
    }

    #[test]
    fn fetch_rejects_unbound_variables() {
        let mut env = Env::new();
        let err = fetch(&Value::atom("X", false), &mut env).unwrap_err();
        assert!(err.to_string().contains("unknown variable"));
    }

    #[test]
    fn numbers_and_true_self_evaluate() {
        let mut env = Env::new();
        assert_eq!(
            fetch(&Value::atom("42", false), &mut env).unwrap(),
            Value::atom("42", false)
        );
        assert!(fetch(&Value::atom("TRUE", false), &mut env)
            .unwrap()
            .is_truth());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(eval("(setq counter 3) (add COUNTER Counter)").to_string(), "6");
    }

    #[test]
    fn executing_a_quoted_list_is_a_no_op() {
        let value = eval("'(F 1)");
        assert_eq!(value.to_string(), "( F 1 )");
    }

    #[test]
    fn head_must_be_an_atom() {
        let err = eval_err("((CAR '(ADD)) 1 2)");
        assert!(err.to_string().contains("head of a statement"));
    }

    #[test]
    fn unknown_function_reports_the_name() {
        let err = eval_err("(FROB 1)");
        assert!(err.to_string().contains("unknown function: FROB"));
    }

    #[test]
    fn bound_data_is_not_callable() {
        let err = eval_err("(SETQ X 1) (X 2)");
        assert!(err.to_string().contains("not callable"));
    }

    #[test]
    fn methods_fetch_their_argument_once() {
        // The unquoted list argument is evaluated at call time and the
        // formal refers to the result.
        assert_eq!(eval("(DEF F (N) (ADD N N)) (F (MULT 2 3))").to_string(), "12");
    }

    #[test]
    fn methods_ignore_extra_arguments() {
        assert_eq!(eval("(DEF F (N) (MULT N N)) (F 7 99)").to_string(), "49");
    }

    #[test]
    fn methods_require_an_argument() {
        let err = eval_err("(DEF F (N) (MULT N N)) (F)");
        assert!(err.to_string().starts_with("F:"));
    }

    #[test]
    fn call_frames_do_not_leak_writes() {
        let err = eval_err("(DEF F (N) (SETQ LEAK N)) (F 5) (ADD LEAK 1)");
        assert!(err.to_string().contains("unknown variable: LEAK"));
    }

    #[test]
    fn dynamic_reads_see_the_caller_environment() {
        assert_eq!(
            eval("(SETQ BASE 10) (DEF F (N) (ADD BASE N)) (F 5)").to_string(),
            "15"
        );
    }

    #[test]
    fn cadr_family_composes_right_to_left() {
        assert_eq!(eval("(CADR '(1 2 3))").to_string(), "2");
        assert_eq!(eval("(CADDR '(1 2 3))").to_string(), "3");
        assert_eq!(eval("(CDAR '('(1 2) 3))").to_string(), "( 2 )");
        assert_eq!(
            eval("(CADDR '(1 2 3))"),
            eval("(CAR (CDR (CDR '(1 2 3))))")
        );
    }

    #[test]
    fn cadr_family_is_case_insensitive() {
        assert_eq!(eval("(cadr '(1 2 3))").to_string(), "2");
    }

    #[test]
    fn cadr_pattern_requires_middle_letters() {
        let err = eval_err("(CR '(1 2))");
        assert!(err.to_string().contains("unknown function"));
        let err = eval_err("(CABR '(1 2))");
        assert!(err.to_string().contains("unknown function"));
    }
}
