//! Flag registry: single source of truth for all flags before the target.

/// How the launcher handles a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagBehavior {
    /// Launcher's own flag. Consumed, never forwarded to the engine.
    LauncherOwned,
    /// Legacy target selector (`--file`). Rewritten into the current syntax.
    Legacy,
    /// Engine flag. Not interpreted, forwarded as-is.
    EngineForwarded,
    /// Help/version. Short-circuits the whole pipeline.
    Informational,
}

/// Whether a flag takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagArity {
    /// Boolean flag, no value (e.g., --DEBUG, --module).
    NoValue,
    /// Requires exactly one value (e.g., --port <PORT>).
    RequiresValue,
}

/// A single flag definition.
#[derive(Debug, Clone)]
pub struct FlagDef {
    /// Primary form (e.g., "--port"; `-m` has no long spelling).
    pub long: &'static str,
    /// Optional short form (e.g., "-m").
    pub short: Option<&'static str>,
    /// Does it take a value?
    pub arity: FlagArity,
    /// How the launcher handles it.
    pub behavior: FlagBehavior,
    /// Human-readable description.
    pub description: &'static str,
}

/// Build the complete flag registry.
pub fn flag_registry() -> Vec<FlagDef> {
    let mut registry = vec![
        // === Launcher-owned flags (validated by clap in reconcile.rs) ===
        FlagDef {
            long: "--port",
            short: None,
            arity: FlagArity::RequiresValue,
            behavior: FlagBehavior::LauncherOwned,
            description: "Debugger port",
        },
        FlagDef {
            long: "--host",
            short: None,
            arity: FlagArity::RequiresValue,
            behavior: FlagBehavior::LauncherOwned,
            description: "Remote host to connect to",
        },
        FlagDef {
            long: "--client",
            short: None,
            arity: FlagArity::RequiresValue,
            behavior: FlagBehavior::LauncherOwned,
            description: "Legacy spelling of --host; wins over --host",
        },
        FlagDef {
            long: "-m",
            short: None,
            arity: FlagArity::RequiresValue,
            behavior: FlagBehavior::LauncherOwned,
            description: "Module to run",
        },
        // === Legacy target selector ===
        FlagDef {
            long: "--file",
            short: None,
            arity: FlagArity::RequiresValue,
            behavior: FlagBehavior::Legacy,
            description: "Legacy target: `name:` for a module, a path for a script",
        },
        // === Engine options (forwarded with their value) ===
        FlagDef {
            long: "--vm_type",
            short: None,
            arity: FlagArity::RequiresValue,
            behavior: FlagBehavior::EngineForwarded,
            description: "Engine VM type",
        },
        // === Help ===
        FlagDef {
            long: "--help",
            short: Some("-h"),
            arity: FlagArity::NoValue,
            behavior: FlagBehavior::Informational,
            description: "Show help",
        },
        FlagDef {
            long: "--version",
            short: Some("-V"),
            arity: FlagArity::NoValue,
            behavior: FlagBehavior::Informational,
            description: "Show version",
        },
    ];

    // === Engine switches (forwarded as-is) ===
    registry.extend(ENGINE_SWITCHES.iter().map(|&(long, description)| FlagDef {
        long,
        short: None,
        arity: FlagArity::NoValue,
        behavior: FlagBehavior::EngineForwarded,
        description,
    }));

    registry
}

/// Boolean engine flags the launcher forwards without interpreting.
const ENGINE_SWITCHES: &[(&str, &str)] = &[
    ("--DEBUG", "Engine debug output"),
    ("--DEBUG_RECORD_SOCKET_READS", "Record engine socket reads"),
    ("--cmd-line", "Engine command-line mode"),
    ("--module", "Legacy module marker (paired with --file name:)"),
    ("--multiproc", "Debug child processes"),
    ("--multiprocess", "Debug child processes"),
    ("--print-in-debugger-startup", "Print debugger startup messages"),
    ("--save-signatures", "Record call signatures"),
    ("--save-threading", "Record threading events"),
    ("--save-asyncio", "Record asyncio events"),
    ("--server", "Engine server mode"),
    ("--qt-support=auto", "Automatic Qt support"),
];

impl FlagDef {
    /// Check if this definition matches the given argument string.
    pub fn matches(&self, arg: &str) -> bool {
        arg == self.long || (self.short == Some(arg))
    }

    /// `--port`, `--host` and `--client`: still honored after the target.
    pub fn is_address(&self) -> bool {
        matches!(self.behavior, FlagBehavior::LauncherOwned) && self.long != "-m"
    }
}

/// Look up the definition for `arg`.
pub fn lookup<'a>(registry: &'a [FlagDef], arg: &str) -> Option<&'a FlagDef> {
    registry.iter().find(|d| d.matches(arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_module_flag_resolves() {
        let registry = flag_registry();
        let def = lookup(&registry, "-m").unwrap();
        assert_eq!(def.behavior, FlagBehavior::LauncherOwned);
        assert_eq!(def.arity, FlagArity::RequiresValue);
    }

    #[test]
    fn module_switch_is_forwarded_not_owned() {
        let registry = flag_registry();
        let def = lookup(&registry, "--module").unwrap();
        assert_eq!(def.behavior, FlagBehavior::EngineForwarded);
        assert_eq!(def.arity, FlagArity::NoValue);
    }

    #[test]
    fn address_flags() {
        let registry = flag_registry();
        let address: Vec<_> = registry
            .iter()
            .filter(|d| d.is_address())
            .map(|d| d.long)
            .collect();
        assert_eq!(address.len(), 3);
        for flag in ["--port", "--host", "--client"] {
            assert!(address.contains(&flag), "{} is an address flag", flag);
        }
    }

    #[test]
    fn unknown_flag_is_absent() {
        assert!(lookup(&flag_registry(), "--xyz").is_none());
    }

    #[test]
    fn longs_are_unique() {
        let registry = flag_registry();
        for (i, def) in registry.iter().enumerate() {
            assert!(
                registry[i + 1..].iter().all(|d| d.long != def.long),
                "duplicate flag {}",
                def.long
            );
        }
    }
}
