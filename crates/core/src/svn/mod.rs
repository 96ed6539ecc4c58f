//! SVN CLI wrapper for eazysvn.

pub mod client;
pub mod command;
pub mod parser;
pub mod runner;

pub use client::SvnClient;
pub use command::SvnCommand;
pub use parser::*;
pub use runner::SvnRunner;
