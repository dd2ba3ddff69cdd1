use quill_core::value::{Atom, List};
use quill_core::{QuillError, Value};

struct OpenList {
    items: Vec<Value>,
    quoted: bool,
}

struct PendingAtom {
    text: String,
    quoted: bool,
}

impl PendingAtom {
    fn finish(self) -> Value {
        Value::Atom(Atom::new(&self.text, self.quoted))
    }
}

/// Parse a whole source text into its top-level statements.
///
/// A single forward pass over the characters. Newlines and all other
/// whitespace are atom separators; `'` arms the escape bit for the
/// next atom or list opening and survives intervening whitespace.
/// Quoting a list marks the list itself and every directly nested
/// atom, but not nested lists.
pub fn parse(source: &str) -> Result<Vec<Value>, QuillError> {
    let mut statements = Vec::new();
    let mut stack: Vec<OpenList> = Vec::new();
    let mut pending_quote = false;
    let mut atom: Option<PendingAtom> = None;
    let mut pos = 0;

    for (at, ch) in source.chars().enumerate() {
        pos = at;
        match ch {
            '\'' => {
                if atom.is_some() {
                    return Err(QuillError::syntax("cannot quote mid-atom", at));
                }
                pending_quote = true;
            }
            '(' => {
                flush_atom(&mut atom, &mut stack);
                stack.push(OpenList {
                    items: Vec::new(),
                    quoted: pending_quote,
                });
                pending_quote = false;
            }
            ')' => {
                flush_atom(&mut atom, &mut stack);
                let Some(open) = stack.pop() else {
                    return Err(QuillError::syntax(
                        "closing parenthesis outside any statement",
                        at,
                    ));
                };
                let list = Value::List(List::new(open.items, open.quoted));
                match stack.last_mut() {
                    Some(parent) => parent.items.push(list),
                    None => statements.push(list),
                }
            }
            c if c.is_whitespace() => flush_atom(&mut atom, &mut stack),
            c => match atom.as_mut() {
                Some(pending) => pending.text.push(c),
                None => {
                    let Some(open) = stack.last() else {
                        return Err(QuillError::syntax("atom outside any statement", at));
                    };
                    atom = Some(PendingAtom {
                        text: String::from(c),
                        quoted: pending_quote || open.quoted,
                    });
                    pending_quote = false;
                }
            },
        }
    }

    if !stack.is_empty() {
        return Err(QuillError::syntax("unclosed statement", pos + 1));
    }
    Ok(statements)
}

// An atom can only be in progress inside an open list, so the missing
// parent arm is unreachable.
fn flush_atom(atom: &mut Option<PendingAtom>, stack: &mut [OpenList]) {
    if let (Some(pending), Some(open)) = (atom.take(), stack.last_mut()) {
        open.items.push(pending.finish());
    }
}
