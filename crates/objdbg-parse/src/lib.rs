//! Parsers for the objdbg debug shell.
//!
//! Three independent, stateless parsers share this crate: the command-line
//! tokenizer ([`argv::tokenize`]), the program-argument parser
//! ([`opts::ProgramArgs`]), and the hierarchy path parser
//! ([`path::parse_tree_path`]). Each is a pure function from input bytes to
//! an owned output structure or an `InvalidArgument` failure; none of them
//! perform I/O or keep state between calls.

pub mod argv;
pub mod opts;
pub mod path;

pub use argv::tokenize;
pub use opts::ProgramArgs;
pub use path::parse_tree_path;
