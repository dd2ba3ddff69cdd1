pub mod env;
pub mod error;
pub mod value;

pub use env::Env;
pub use error::QuillError;
pub use value::{intern, intern_upper, resolve, with_resolved, Atom, List, Method, NativeFn, Value};
