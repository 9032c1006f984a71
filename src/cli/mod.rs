//! Command-line surface: argument parsing, operation dispatch, and the
//! guided REPL, over the `bitpack` library's codec/envelope/bench/
//! transmission APIs.

pub mod args;
pub mod constants;
pub mod dispatch;
pub mod interactive;
