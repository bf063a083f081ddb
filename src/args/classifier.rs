//! Argument classifier: raw args → classified args + opaque target args.

use crate::args::descriptor::split_at_separator;
use crate::args::registry::{lookup, FlagArity, FlagBehavior, FlagDef};

/// A classified argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedArg {
    /// Launcher flag with its value (`--port`, `--host`, `--client`, `-m`).
    LauncherOwned {
        flag: String,
        value: Option<String>,
    },
    /// Engine flag, forwarded untouched.
    EngineForwarded {
        flag: String,
        value: Option<String>,
    },
    /// Legacy `--file <value>`; `None` when the value is missing.
    LegacyFile(Option<String>),
    /// Bare positional: the script to run.
    Target(String),
    /// `-h`/`--help`/`-V`/`--version`.
    Informational(String),
    /// Flag-shaped token not in the registry. Classification stops here.
    Unknown(String),
}

/// Result of classifying raw arguments.
#[derive(Debug, Clone, Default)]
pub struct ClassifyResult {
    /// Classified arguments in order: everything up to the target, plus any
    /// address flags that follow it.
    pub args: Vec<ClassifiedArg>,
    /// Other tokens after the target, then everything after `--`, verbatim.
    pub target_args: Vec<String>,
    /// Notes about legacy spellings seen along the way.
    pub warnings: Vec<String>,
}

impl ClassifyResult {
    /// Whether a target (`-m`, positional or legacy `--file`) was found.
    pub fn has_target(&self) -> bool {
        self.args.iter().any(|a| match a {
            ClassifiedArg::Target(_) | ClassifiedArg::LegacyFile(Some(_)) => true,
            ClassifiedArg::LauncherOwned { flag, value } => flag == "-m" && value.is_some(),
            _ => false,
        })
    }
}

/// Classify raw args (without the program name) against the registry.
pub fn classify(raw_args: &[String], registry: &[FlagDef]) -> ClassifyResult {
    let (head, tail) = split_at_separator(raw_args);

    let mut result = ClassifyResult::default();
    let mut got_target = false;
    let mut iter = head.iter();

    while let Some(arg) = iter.next() {
        if got_target {
            // Address flags keep their meaning after the target; anything
            // else belongs to the target.
            match lookup(registry, arg).filter(|def| def.is_address()) {
                Some(def) => result.args.push(ClassifiedArg::LauncherOwned {
                    flag: def.long.to_string(),
                    value: iter.next().cloned(),
                }),
                None => result.target_args.push(arg.clone()),
            }
            continue;
        }

        if !arg.starts_with('-') {
            result.args.push(ClassifiedArg::Target(arg.clone()));
            got_target = true;
            continue;
        }

        let Some(def) = lookup(registry, arg) else {
            result.args.push(ClassifiedArg::Unknown(arg.clone()));
            break;
        };

        // A value is taken verbatim, even when it looks like a flag.
        let value = match def.arity {
            FlagArity::NoValue => None,
            FlagArity::RequiresValue => iter.next().cloned(),
        };

        let classified = match def.behavior {
            FlagBehavior::LauncherOwned => {
                if def.long == "-m" && value.is_some() {
                    got_target = true;
                }
                if def.long == "--client" {
                    result
                        .warnings
                        .push("--client: legacy spelling of --host".to_string());
                }
                ClassifiedArg::LauncherOwned {
                    flag: def.long.to_string(),
                    value,
                }
            }
            FlagBehavior::Legacy => {
                result
                    .warnings
                    .push("--file: legacy target syntax".to_string());
                got_target = value.is_some();
                ClassifiedArg::LegacyFile(value)
            }
            FlagBehavior::EngineForwarded => ClassifiedArg::EngineForwarded {
                flag: def.long.to_string(),
                value,
            },
            FlagBehavior::Informational => ClassifiedArg::Informational(arg.clone()),
        };
        result.args.push(classified);
    }

    result.target_args.extend(tail.iter().cloned());
    result
}
