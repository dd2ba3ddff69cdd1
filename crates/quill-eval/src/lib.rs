pub mod eval;
pub mod natives;
pub mod printer;

pub use eval::{execute, fetch, EvalResult, Interpreter};
pub use printer::{render, Output};
