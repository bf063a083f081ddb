//! Debugger launch bootstrap.
//!
//! Reconciles the launcher's command-line dialects into one
//! [`args::LaunchDescriptor`] and hands off to a debugger [`launch::Engine`].

pub mod args;
pub mod config;
pub mod engine;
pub mod launch;
pub mod logging;
