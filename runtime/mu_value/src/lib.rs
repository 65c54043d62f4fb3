//! Mu Value - value coercion and operator semantics for the mu runtime.
//!
//! Every MUMPS value has two views: the string it spells and the number it
//! denotes. This crate derives both views and implements the language
//! operators on top of them.
//!
//! # Architecture
//!
//! - `Number`: integer-or-float numeric view with exact cross-type comparison
//! - `parse_number`: the prefix-scanning string to number coercion
//! - `Value`: the raw scalar stored in variable nodes
//! - `Coerced`: an immutable (string view, numeric view) pair
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch

mod errors;
mod number;
mod operators;
mod parse;
mod value;

pub use errors::{ValueError, ValueResult};
pub use number::Number;
pub use operators::{evaluate_binary, evaluate_unary, BinaryOp, UnaryOp};
pub use parse::parse_number;
pub use value::{Coerced, Value};
