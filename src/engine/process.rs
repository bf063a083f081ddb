//! Engine backed by an external process.
//!
//! Runs `command args... <host argv[1..]>` with inherited stdio and reports
//! the child's exit status back as an engine signal.

use std::process::{Command, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use signal_hook::consts::signal::SIGINT;

use crate::config::EngineConfig;
use crate::launch::{Engine, EngineHookSites, EngineSignal, HookSlots, Host};

/// Runs the configured engine command as a child process.
#[derive(Debug)]
pub struct ProcessEngine {
    command: String,
    base_args: Vec<String>,
    connection: HookSlots,
    namespace: HookSlots,
}

impl ProcessEngine {
    pub fn new(command: impl Into<String>, base_args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            base_args,
            connection: HookSlots::default(),
            namespace: HookSlots::default(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    /// Connection hook site, as installed by the launcher.
    pub fn connection_hooks(&self) -> &HookSlots {
        &self.connection
    }

    /// Namespace hook site, as installed by the launcher.
    pub fn namespace_hooks(&self) -> &HookSlots {
        &self.namespace
    }

    /// Full child command line for `host`: `argv[0]` is replaced by the
    /// engine command.
    pub fn command_line(&self, host: &Host) -> Vec<String> {
        std::iter::once(self.command.clone())
            .chain(self.base_args.iter().cloned())
            .chain(host.argv.iter().skip(1).cloned())
            .collect()
    }

    fn run(&self, host: &Host) -> anyhow::Result<ExitStatus> {
        // Ctrl-C reaches the child through the terminal; the launcher stays
        // alive to report the child's status.
        let interrupted = Arc::new(AtomicBool::new(false));
        let sigint = signal_hook::flag::register(SIGINT, Arc::clone(&interrupted))
            .context("failed to register SIGINT handler")?;

        let status = Command::new(&self.command)
            .args(&self.base_args)
            .args(host.argv.iter().skip(1))
            .status();

        signal_hook::low_level::unregister(sigint);
        if interrupted.load(Ordering::SeqCst) {
            tracing::debug!("SIGINT received while the engine was running");
        }

        status.with_context(|| format!("failed to start debugger engine '{}'", self.command))
    }
}

impl Engine for ProcessEngine {
    fn name(&self) -> &str {
        &self.command
    }

    fn hook_sites(&mut self) -> EngineHookSites<'_> {
        EngineHookSites {
            connection: &mut self.connection,
            namespace: &mut self.namespace,
        }
    }

    fn main(&mut self, host: &Host) -> Result<(), EngineSignal> {
        tracing::debug!("Engine command line: {:?}", self.command_line(host));
        let status = self.run(host)?;
        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(EngineSignal::Exit(code)),
            None => Err(anyhow!("debugger engine '{}' was terminated: {}", self.command, status).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(argv: &[&str]) -> Host {
        Host::new(argv.iter().map(|s| s.to_string()).collect())
    }

    fn sh(script: &str) -> ProcessEngine {
        ProcessEngine::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn command_line_replaces_program_name() {
        let engine = ProcessEngine::new("python3", vec!["-m".into(), "pydevd".into()]);
        let line = engine.command_line(&host(&["dbgboot", "--port", "1", "--file", "s.py"]));
        assert_eq!(
            line,
            vec!["python3", "-m", "pydevd", "--port", "1", "--file", "s.py"]
        );
    }

    #[test]
    fn from_config_uses_engine_section() {
        let engine = ProcessEngine::from_config(&EngineConfig::default());
        assert_eq!(engine.name(), "python3");
        assert!(engine.connection_hooks().is_empty());
        assert!(engine.namespace_hooks().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn zero_status_returns_normally() {
        let mut engine = sh("exit 0");
        assert!(engine.main(&host(&["prog"])).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_status_is_exit_request() {
        let mut engine = sh("exit 3");
        let signal = engine.main(&host(&["prog", "--port", "1"])).unwrap_err();
        assert!(matches!(signal, EngineSignal::Exit(3)));
    }

    #[cfg(unix)]
    #[test]
    fn child_sees_synthesized_argv() {
        // `sh -c script a b c` binds $0=a, $1=b, $2=c.
        let mut engine = sh(r#"[ "$0" = --port ] && [ "$1" = 8888 ] && [ "$2" = --file ]"#);
        let result = engine.main(&host(&["prog", "--port", "8888", "--file", "spam.py"]));
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn killed_child_is_a_fault() {
        let mut engine = sh("kill -9 $$");
        let signal = engine.main(&host(&["prog"])).unwrap_err();
        assert!(matches!(signal, EngineSignal::Fault(_)));
    }

    #[test]
    fn missing_command_is_a_fault() {
        let mut engine = ProcessEngine::new("dbgboot-no-such-engine", vec![]);
        let signal = engine.main(&host(&["prog"])).unwrap_err();
        match signal {
            EngineSignal::Fault(err) => {
                assert!(err.to_string().contains("dbgboot-no-such-engine"))
            }
            other => panic!("expected fault, got {other:?}"),
        }
    }
}
