pub mod config;
pub mod repl;
pub mod replay;
