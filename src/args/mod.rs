//! Argument reconciliation for the launcher.
//!
//! This module turns every accepted command-line dialect into one descriptor:
//!
//! ```text
//! argv → Classify → Reconcile (legacy rewrite) → Validate (clap) → LaunchDescriptor + ForwardedArgs
//! ```
//!
//! Each stage is a pure function that can be unit-tested independently.

mod classifier;
mod descriptor;
mod reconcile;
mod registry;

pub use classifier::{classify, ClassifiedArg, ClassifyResult};
pub use descriptor::{
    split_at_separator, Address, ForwardedArgs, LaunchDescriptor, LaunchKind, SEPARATOR,
};
pub use reconcile::{parse_args, UsageError};
pub use registry::{flag_registry, lookup, FlagArity, FlagBehavior, FlagDef};
