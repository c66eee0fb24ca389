//! Request handlers.

pub mod serve;
