//! Library half of the `mdview` binary: the interactive session host and logging setup.

pub mod host;
pub mod logging;
