//! The debugger engine seam.

use thiserror::Error;

use crate::launch::hooks::HookSlots;
use crate::launch::host::Host;

/// Why the engine's entry point did not return normally.
#[derive(Debug, Error)]
pub enum EngineSignal {
    /// The engine asked for the process to exit with this status.
    #[error("engine requested exit with status {0}")]
    Exit(i32),
    /// Anything else that went wrong inside the engine.
    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}

/// The engine's two hook sites.
pub struct EngineHookSites<'a> {
    /// Where the engine's connection code looks the hooks up.
    pub connection: &'a mut HookSlots,
    /// The engine's own top-level namespace.
    pub namespace: &'a mut HookSlots,
}

/// A debugger engine the launcher can hand off to.
pub trait Engine {
    /// Identifies the engine in logs.
    fn name(&self) -> &str;

    fn hook_sites(&mut self) -> EngineHookSites<'_>;

    /// Entry point. Takes no arguments of its own: it reads `host.argv`.
    fn main(&mut self, host: &Host) -> Result<(), EngineSignal>;
}
