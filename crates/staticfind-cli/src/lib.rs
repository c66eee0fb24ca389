//! CLI crate for staticfind.
//!
//! `main.rs` is the composition root; everything else is reusable from
//! tests: the clap definitions ([`parser`], [`commands`]), the context
//! construction ([`bootstrap`]), and one handler module per command.

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod parser;

pub use bootstrap::CliContext;
pub use commands::Commands;
pub use parser::Cli;
