use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lasso::{Rodeo, Spur};

use crate::env::Env;
use crate::error::QuillError;

// ── String interning ──────────────────────────────────────────────

thread_local! {
    static INTERNER: RefCell<Rodeo> = RefCell::new(Rodeo::default());
}

/// Intern a string, returning a Spur key.
pub fn intern(s: &str) -> Spur {
    INTERNER.with(|r| r.borrow_mut().get_or_intern(s))
}

/// Resolve a Spur key back to a String.
pub fn resolve(spur: Spur) -> String {
    INTERNER.with(|r| r.borrow().resolve(&spur).to_string())
}

/// Resolve a Spur and call f with the &str, avoiding allocation.
///
/// f must not intern: the interner is borrowed for the duration of
/// the call.
pub fn with_resolved<F, R>(spur: Spur, f: F) -> R
where
    F: FnOnce(&str) -> R,
{
    INTERNER.with(|r| {
        let interner = r.borrow();
        f(interner.resolve(&spur))
    })
}

/// Intern the upper-cased form of a token: the key used for every
/// environment lookup.
pub fn intern_upper(s: &str) -> Spur {
    intern(&s.to_uppercase())
}

// ── Atoms ─────────────────────────────────────────────────────────

/// A bare token together with its escape bit. The text keeps its
/// original spelling; lookups go through [`Atom::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom {
    pub text: Spur,
    pub quoted: bool,
}

impl Atom {
    pub fn new(text: &str, quoted: bool) -> Self {
        Atom {
            text: intern(text),
            quoted,
        }
    }

    /// The original spelling.
    pub fn text(&self) -> String {
        resolve(self.text)
    }

    /// Upper-cased, interned environment key.
    pub fn key(&self) -> Spur {
        let text = resolve(self.text);
        intern(&text.to_uppercase())
    }

    pub fn is_true_name(&self) -> bool {
        with_resolved(self.text, |s| s.eq_ignore_ascii_case("TRUE"))
    }

    pub fn is_nil_name(&self) -> bool {
        with_resolved(self.text, |s| s.eq_ignore_ascii_case("NIL"))
    }

    /// `TRUE` and `NIL` are not variables and cannot be rebound.
    pub fn is_reserved(&self) -> bool {
        self.is_true_name() || self.is_nil_name()
    }

    /// The numeric reading of the token, if it has one.
    pub fn number(&self) -> Option<f64> {
        with_resolved(self.text, |s| s.parse::<f64>().ok())
    }

    pub fn is_number(&self) -> bool {
        self.number().is_some()
    }
}

// ── Lists ─────────────────────────────────────────────────────────

/// An ordered sequence of values with its escape bit. Elements are
/// shared; "shallow copy" in the operator set means cloning them.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub items: Rc<Vec<Value>>,
    pub quoted: bool,
}

impl List {
    pub fn new(items: Vec<Value>, quoted: bool) -> Self {
        List {
            items: Rc::new(items),
            quoted,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ── Methods and natives ───────────────────────────────────────────

/// A user-defined function: one formal parameter, one body list.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: Atom,
    pub param: Atom,
    pub body: List,
}

/// A builtin operator. Natives receive the raw, un-fetched argument
/// forms and decide themselves which to resolve.
pub type NativeFnInner = dyn Fn(&mut Env, &[Value]) -> Result<Value, QuillError>;

pub struct NativeFn {
    pub name: &'static str,
    pub func: Box<NativeFnInner>,
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Native: {}>", self.name)
    }
}

// ── The Value type ────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Value {
    Atom(Atom),
    List(List),
    Method(Rc<Method>),
    Native(Rc<NativeFn>),
}

impl Value {
    pub fn atom(text: &str, quoted: bool) -> Value {
        Value::Atom(Atom::new(text, quoted))
    }

    /// A numeric atom carrying the host's formatting of n.
    pub fn number(n: f64) -> Value {
        Value::atom(&format!("{n}"), false)
    }

    /// The canonical true atom.
    pub fn truth() -> Value {
        Value::atom("TRUE", false)
    }

    /// The canonical empty list.
    pub fn nil() -> Value {
        Value::List(List::new(Vec::new(), false))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(List::new(items, false))
    }

    pub fn quoted_list(items: Vec<Value>) -> Value {
        Value::List(List::new(items, true))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::List(list) if list.is_empty())
    }

    pub fn is_truth(&self) -> bool {
        matches!(self, Value::Atom(atom) if atom.is_true_name())
    }

    pub fn quoted(&self) -> bool {
        match self {
            Value::Atom(atom) => atom.quoted,
            Value::List(list) => list.quoted,
            Value::Method(_) | Value::Native(_) => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Atom(_) => "an atom",
            Value::List(_) => "a list",
            Value::Method(_) => "a function",
            Value::Native(_) => "a native",
        }
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Value::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Atom(a), Value::Atom(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Method(a), Value::Method(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a.name == b.name,
            _ => false,
        }
    }
}

/// Structural rendering: no resolution, no evaluation. Used by error
/// messages and the AST dump; the semantic pretty-printer lives in the
/// evaluator crate because it needs fetch and execute.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Atom(atom) => with_resolved(atom.text, |s| write!(f, "{s}")),
            Value::List(list) if list.is_empty() => write!(f, "NIL"),
            Value::List(list) => {
                write!(f, "(")?;
                for item in list.items.iter() {
                    write!(f, " {item}")?;
                }
                write!(f, " )")
            }
            Value::Method(method) => {
                with_resolved(method.name.text, |s| write!(f, "<Function: {s}>"))
            }
            Value::Native(native) => write!(f, "<Native: {}>", native.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names_are_case_insensitive() {
        assert!(Atom::new("true", false).is_true_name());
        assert!(Atom::new("Nil", true).is_nil_name());
        assert!(!Atom::new("TRUTHY", false).is_reserved());
    }

    #[test]
    fn numeric_atoms() {
        assert_eq!(Atom::new("10", false).number(), Some(10.0));
        assert_eq!(Atom::new("-0.5", false).number(), Some(-0.5));
        assert!(Atom::new("X1", false).number().is_none());
        assert!(!Atom::new("TRUE", false).is_number());
    }

    #[test]
    fn number_formatting_drops_trailing_zero() {
        assert_eq!(Value::number(6.0).to_string(), "6");
        assert_eq!(Value::number(0.5).to_string(), "0.5");
        assert_eq!(Value::number(f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn display_is_structural() {
        let list = Value::quoted_list(vec![Value::atom("A", true), Value::atom("B", true)]);
        assert_eq!(list.to_string(), "( A B )");
        assert_eq!(Value::nil().to_string(), "NIL");
    }

    #[test]
    fn keys_fold_case() {
        assert_eq!(Atom::new("foo", false).key(), Atom::new("FOO", true).key());
    }
}
