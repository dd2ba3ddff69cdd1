use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use quill_core::value::Atom;
use quill_core::{Env, QuillError, Value};

use crate::eval::{execute, fetch};

const YELLOW: &str = "33";
const GREEN: &str = "32";
const CYAN: &str = "36";
const GRAY: &str = "90";

fn wrap_sgr(text: &str, code: &str) -> String {
    format!("\x1b[{code}m{text}\x1b[0m")
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        wrap_sgr(text, code)
    } else {
        text.to_string()
    }
}

/// Where PRINT sends its text, and whether ANSI colour is applied.
#[derive(Clone)]
pub struct Output {
    pub color: bool,
    sink: Rc<RefCell<dyn Write>>,
}

impl Output {
    pub fn stdout(color: bool) -> Self {
        let sink: Rc<RefCell<dyn Write>> = Rc::new(RefCell::new(io::stdout()));
        Output { color, sink }
    }

    /// An in-memory sink for tests: everything written is readable
    /// back through the returned buffer handle.
    pub fn capture() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let buffer: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
        let sink: Rc<RefCell<dyn Write>> = buffer.clone();
        (Output { color: false, sink }, buffer)
    }

    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut sink = self.sink.borrow_mut();
        writeln!(sink, "{line}")?;
        sink.flush()
    }
}

/// Render a value for PRINT: fetch it, then lay it out as text.
///
/// Quoted lists render as `( e1 e2 … en )` with each element rendered
/// recursively; an unquoted non-empty list is executed and its result
/// rendered without another fetch. Colour touches only leaf tokens,
/// never the parentheses.
pub fn render(value: &Value, env: &mut Env, color: bool) -> Result<String, QuillError> {
    let fetched = fetch(value, env)?;
    render_value(&fetched, env, color)
}

fn render_value(value: &Value, env: &mut Env, color: bool) -> Result<String, QuillError> {
    match value {
        Value::Atom(atom) => Ok(paint_atom(atom, color)),
        Value::List(list) if list.is_empty() => Ok(paint("NIL", GRAY, color)),
        Value::List(list) if list.quoted => {
            let mut parts = Vec::with_capacity(list.items.len());
            for item in list.items.iter() {
                parts.push(render(item, env, color)?);
            }
            Ok(format!("( {} )", parts.join(" ")))
        }
        Value::List(_) => {
            let result = execute(value, env)?;
            render_value(&result, env, color)
        }
        Value::Method(method) => Ok(paint(
            &format!("<Function: {}>", method.name.text()),
            CYAN,
            color,
        )),
        Value::Native(native) => Ok(paint(&format!("<Native: {}>", native.name), CYAN, color)),
    }
}

fn paint_atom(atom: &Atom, color: bool) -> String {
    let text = atom.text();
    if atom.is_number() || atom.is_true_name() {
        paint(&text, YELLOW, color)
    } else {
        paint(&text, GREEN, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Interpreter;
    use quill_reader::parse;

    fn render_expr(source: &str, color: bool) -> String {
        let mut interp = Interpreter::new();
        let statements = parse(source).expect("parse should succeed");
        let statement = statements.last().expect("expected a statement");
        render(statement, &mut interp.env, color)
            .unwrap_or_else(|e| panic!("failed to render `{source}`: {e}"))
    }

    #[test]
    fn renders_fetched_results() {
        assert_eq!(render_expr("(ADD 1 2 3)", false), "6");
        assert_eq!(render_expr("(CDR '(A B C))", false), "( B C )");
    }

    #[test]
    fn renders_nil_and_true() {
        assert_eq!(render_expr("(EQ 1 2)", false), "NIL");
        assert_eq!(render_expr("(EQ 2 2)", false), "TRUE");
        assert_eq!(render_expr("(CAR '(NIL))", false), "NIL");
    }

    #[test]
    fn renders_callables_as_descriptors() {
        assert_eq!(
            render_expr("(DEF Square (N) (MULT N N))", false),
            "<Function: Square>"
        );
    }

    #[test]
    fn quoted_structure_round_trips_modulo_quotes_and_spacing() {
        let source = "'(A B '(C))";
        assert_eq!(render_expr(source, false), "( A B ( C ) )");
    }

    #[test]
    fn colour_wraps_leaf_tokens_only() {
        assert_eq!(render_expr("(ADD 1 2)", true), "\x1b[33m3\x1b[0m");
        assert_eq!(
            render_expr("(CDR '(A 2))", true),
            "( \x1b[33m2\x1b[0m )"
        );
        assert_eq!(render_expr("(EQ 1 2)", true), "\x1b[90mNIL\x1b[0m");
        assert_eq!(render_expr("(EQ 2 2)", true), "\x1b[33mTRUE\x1b[0m");
        assert_eq!(render_expr("(CAR '(X))", true), "\x1b[32mX\x1b[0m");
    }
}
