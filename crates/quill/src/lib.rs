//! Quill, a batch interpreter for a small Lisp-like expression language.
//!
//! A program is a sequence of parenthesised statements; the interpreter
//! parses the whole source, then executes each statement in order against a
//! shared environment.
//!
//! ```no_run
//! use quill::Interpreter;
//!
//! let mut interp = Interpreter::new();
//! let result = interp.eval_str("(ADD 1 2)").unwrap();
//! assert_eq!(result.to_string(), "3");
//! ```

pub use quill_core::{Env, QuillError, Value};
pub use quill_eval::{execute, fetch, render, EvalResult, Interpreter, Output};
pub use quill_reader::parse;

pub type Result<T> = std::result::Result<T, QuillError>;
