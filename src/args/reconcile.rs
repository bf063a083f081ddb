//! Reconciler: classified args → launch descriptor + forwarded args.
//!
//! Legacy spellings are rewritten into the current syntax first, then the
//! launcher-owned tokens go through clap, which owns validation and the usage
//! message.

use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, FromArgMatches, Parser};
use thiserror::Error;

use crate::args::classifier::{classify, ClassifiedArg};
use crate::args::descriptor::{Address, ForwardedArgs, LaunchDescriptor};
use crate::args::registry::flag_registry;

/// Malformed command line (or an explicit help/version request).
#[derive(Debug, Error)]
#[error(transparent)]
pub struct UsageError(#[from] clap::Error);

impl UsageError {
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }

    /// Status the process should exit with: 2 for usage errors, 0 for help.
    pub fn exit_code(&self) -> i32 {
        self.0.exit_code()
    }

    /// Rendered message, as it would be printed.
    pub fn message(&self) -> String {
        self.0.render().to_string()
    }

    /// Print the message to the right stream and exit the process.
    pub fn exit(&self) -> ! {
        self.0.exit()
    }
}

/// Launcher-owned flags, validated after legacy rewriting.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Start a debugger engine for a module or a script",
    group(ArgGroup::new("target").required(true).args(["module", "filename"]))
)]
struct LauncherCli {
    /// Remote host to connect to (listen locally when omitted)
    #[arg(long, allow_hyphen_values = true)]
    host: Option<String>,

    /// Legacy spelling of --host; takes precedence over it
    #[arg(long, hide = true, allow_hyphen_values = true)]
    client: Option<String>,

    /// Debugger port
    #[arg(long)]
    port: u16,

    /// Module to run
    #[arg(
        short = 'm',
        value_name = "MODULE",
        allow_hyphen_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    module: Option<String>,

    /// Script to run
    #[arg(value_name = "FILENAME", value_parser = NonEmptyStringValueParser::new())]
    filename: Option<String>,
}

impl LauncherCli {
    fn into_descriptor(self) -> LaunchDescriptor {
        let address = Address {
            host: self.client.or(self.host),
            port: self.port,
        };
        match (self.module, self.filename) {
            (Some(module), _) => LaunchDescriptor::module(module, address),
            // The required "target" group guarantees one of the two.
            (None, filename) => LaunchDescriptor::script(filename.unwrap_or_default(), address),
        }
    }
}

/// Tokens split by destination after legacy rewriting.
#[derive(Debug, Default, PartialEq, Eq)]
struct Reconciled {
    /// Tokens clap validates.
    launcher: Vec<String>,
    /// Engine flags, forwarded in input order.
    engine: Vec<String>,
}

fn reconcile(args: &[ClassifiedArg]) -> Reconciled {
    let mut out = Reconciled::default();
    // A script name that looks like a flag has to follow clap's `--`, so it
    // goes last, after any address flags.
    let mut dashed_script = None;

    for arg in args {
        match arg {
            ClassifiedArg::LauncherOwned { flag, value } => {
                out.launcher.push(flag.clone());
                out.launcher.extend(value.iter().cloned());
            }
            ClassifiedArg::EngineForwarded { flag, value } => {
                out.engine.push(flag.clone());
                out.engine.extend(value.iter().cloned());
            }
            ClassifiedArg::LegacyFile(Some(value)) => match value.strip_suffix(':') {
                Some(module) => {
                    // `--module --file name:` is the legacy module form; the
                    // marker is consumed along with the file.
                    if let Some(pos) = out.engine.iter().position(|t| t == "--module") {
                        out.engine.remove(pos);
                    }
                    out.launcher.push("-m".to_string());
                    out.launcher.push(module.to_string());
                }
                None => {
                    // Without the colon this is a script, even after `--module`.
                    // The marker stays in the engine flags.
                    if value.starts_with('-') {
                        dashed_script = Some(value.clone());
                    } else {
                        out.launcher.push(value.clone());
                    }
                }
            },
            ClassifiedArg::LegacyFile(None) => out.engine.push("--file".to_string()),
            ClassifiedArg::Target(name) => out.launcher.push(name.clone()),
            ClassifiedArg::Informational(flag) | ClassifiedArg::Unknown(flag) => {
                out.launcher.push(flag.clone())
            }
        }
    }

    if let Some(script) = dashed_script {
        out.launcher.push("--".to_string());
        out.launcher.push(script);
    }
    out
}

fn usage(prog: &str) -> String {
    format!(
        "{prog} [-h] [--host HOST] --port PORT -m MODULE [arg ...]\n       \
         {prog} [-h] [--host HOST] --port PORT FILENAME [arg ...]"
    )
}

fn parse_launcher(prog: &str, tokens: &[String]) -> Result<LauncherCli, UsageError> {
    // Repeated address flags are not an error: the last one wins.
    let matches = LauncherCli::command()
        .args_override_self(true)
        .bin_name(prog.to_string())
        .override_usage(usage(prog))
        .try_get_matches_from(std::iter::once(prog).chain(tokens.iter().map(String::as_str)))?;
    Ok(LauncherCli::from_arg_matches(&matches)?)
}

/// Parse a full argument vector (`argv[0]` is the program name).
///
/// Nothing outside the return value is touched, so a failed parse has no
/// side effects.
pub fn parse_args(argv: &[String]) -> Result<(LaunchDescriptor, ForwardedArgs), UsageError> {
    let (prog, rest) = match argv.split_first() {
        Some((prog, rest)) => (prog.as_str(), rest),
        None => (env!("CARGO_PKG_NAME"), &[][..]),
    };

    let registry = flag_registry();

    // Stage 1: Classify arguments
    let classified = classify(rest, &registry);
    for warning in &classified.warnings {
        tracing::debug!("{}", warning);
    }

    // Stage 2: Rewrite legacy syntax and split by destination
    let reconciled = reconcile(&classified.args);

    // Stage 3: Validate launcher flags
    let descriptor = parse_launcher(prog, &reconciled.launcher)?.into_descriptor();

    let forwarded = ForwardedArgs::from_parts(reconciled.engine, classified.target_args);

    tracing::debug!(
        kind = %descriptor.kind,
        name = %descriptor.name,
        address = %descriptor.address,
        forwarded = ?forwarded.as_slice(),
        "Launch arguments reconciled"
    );

    Ok((descriptor, forwarded))
}
