//! Concrete debugger engines.

mod process;

pub use process::ProcessEngine;
