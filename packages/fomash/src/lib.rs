//! Main library for fomash, used by its CLI.
//!
//! fomash runs a list of `gofmt -r` rewrite rules over a codebase one at a
//! time, after a baseline `gofmt -s` pass, and fails if any of them would
//! change anything. Rules may be written in an ellipsised shorthand that
//! expands to one rule per arity; see [`rules::Template`].

pub mod driver;
pub mod rewriter;
pub mod rules;
pub mod status;
pub mod targets;
