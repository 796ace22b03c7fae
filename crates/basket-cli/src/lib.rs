//! Library side of the `basket` command-line tool.

pub mod logging;
pub mod session;
pub mod settings;
