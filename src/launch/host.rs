//! The hosting process as the engine sees it.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use crate::launch::hooks::HookSlots;

/// Last exit status the engine asked for. Starts at 0.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct ExitCodeSlot(Arc<AtomicI32>);

impl ExitCodeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> i32 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, code: i32) {
        self.0.store(code, Ordering::SeqCst);
    }
}

/// Process argv, top-level namespace and exit-code slot of the host.
#[derive(Debug, Default)]
pub struct Host {
    /// Argument vector the engine reads. Replaced before the engine runs.
    pub argv: Vec<String>,
    /// Top-level namespace hook site.
    pub namespace: HookSlots,
    pub exit_code: ExitCodeSlot,
}

impl Host {
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            namespace: HookSlots::default(),
            exit_code: ExitCodeSlot::new(),
        }
    }

    /// Host for the current process.
    pub fn from_env() -> Self {
        Self::new(std::env::args().collect())
    }

    /// Current `argv[0]`, if any.
    pub fn program_name(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_slot_is_shared_by_clones() {
        let slot = ExitCodeSlot::new();
        let other = slot.clone();
        assert_eq!(slot.get(), 0);
        other.set(3);
        assert_eq!(slot.get(), 3);
    }

    #[test]
    fn program_name_is_first_arg() {
        let host = Host::new(vec!["dbgboot".into(), "--port".into()]);
        assert_eq!(host.program_name(), Some("dbgboot"));
        assert_eq!(Host::default().program_name(), None);
    }
}
