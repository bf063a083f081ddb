//! Launch driver: descriptor → engine argv → hooks → engine → outcome.
//!
//! Single shot. A `Launcher` walks the phases once and never retries.

use anyhow::anyhow;

use crate::args::{Address, LaunchDescriptor};
use crate::launch::argv::synthesize_args;
use crate::launch::engine::{Engine, EngineSignal};
use crate::launch::hooks::{install_hooks, HookRegistry};
use crate::launch::host::Host;

/// Status reported for an engine fault.
pub const FAULT_EXIT_CODE: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchPhase {
    Init,
    ArgsParsed,
    Synthesized,
    HooksInstalled,
    EngineRunning,
    Terminated,
    ErrorPropagated,
}

/// How the engine finished.
#[derive(Debug)]
pub enum LaunchOutcome {
    /// The entry point returned normally.
    Returned,
    /// The engine requested an exit with this status.
    Exited(i32),
    /// The engine failed; the error is passed through untouched.
    Faulted(anyhow::Error),
}

impl LaunchOutcome {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchOutcome::Returned => 0,
            LaunchOutcome::Exited(code) => *code,
            LaunchOutcome::Faulted(_) => FAULT_EXIT_CODE,
        }
    }
}

/// Everything the engine needs, computed before any mutation.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Synthesized process argv.
    pub argv: Vec<String>,
    /// Resolved `argv[0]`.
    pub program_name: String,
    pub hooks: HookRegistry,
}

/// Drives one launch against a host and an engine.
pub struct Launcher<'a, E: Engine + ?Sized> {
    host: &'a mut Host,
    engine: &'a mut E,
    hooks: HookRegistry,
    program_name: Option<String>,
    phase: LaunchPhase,
}

impl<'a, E: Engine + ?Sized> Launcher<'a, E> {
    pub fn new(host: &'a mut Host, engine: &'a mut E) -> Self {
        Self {
            host,
            engine,
            hooks: HookRegistry::default(),
            program_name: None,
            phase: LaunchPhase::Init,
        }
    }

    /// Use these hooks instead of the plain TCP ones.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    /// Override `argv[0]` of the synthesized argv.
    pub fn with_program_name(mut self, program_name: impl Into<String>) -> Self {
        self.program_name = Some(program_name.into());
        self
    }

    pub fn phase(&self) -> LaunchPhase {
        self.phase
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    fn advance(&mut self, phase: LaunchPhase) {
        self.phase = phase;
        tracing::debug!("Launch phase: {:?}", phase);
    }

    /// Compute the run context without touching the host or the engine.
    pub fn prepare(&self, descriptor: &LaunchDescriptor, extra: &[String]) -> RunContext {
        let program_name = self
            .program_name
            .clone()
            .or_else(|| self.host.program_name().map(String::from))
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

        RunContext {
            argv: synthesize_args(descriptor, extra, &program_name),
            program_name,
            hooks: self.hooks.clone(),
        }
    }

    pub fn launch_module(&mut self, address: &Address, name: &str, extra: &[String]) -> LaunchOutcome {
        self.launch(&LaunchDescriptor::module(name, address.clone()), extra)
    }

    pub fn launch_script(&mut self, address: &Address, name: &str, extra: &[String]) -> LaunchOutcome {
        self.launch(&LaunchDescriptor::script(name, address.clone()), extra)
    }

    /// Hand off to the engine and report how it finished.
    ///
    /// Only an explicit exit request updates the host's exit-code slot.
    pub fn launch(&mut self, descriptor: &LaunchDescriptor, extra: &[String]) -> LaunchOutcome {
        if self.phase != LaunchPhase::Init {
            return LaunchOutcome::Faulted(anyhow!(
                "launcher already used (phase {:?})",
                self.phase
            ));
        }
        self.advance(LaunchPhase::ArgsParsed);

        let ctx = self.prepare(descriptor, extra);
        self.advance(LaunchPhase::Synthesized);

        let sites = self.engine.hook_sites();
        install_hooks(
            &ctx.hooks,
            [sites.connection, sites.namespace, &mut self.host.namespace],
        );
        self.advance(LaunchPhase::HooksInstalled);

        tracing::debug!("Engine argv: {:?}", ctx.argv);
        self.host.argv = ctx.argv;
        self.advance(LaunchPhase::EngineRunning);
        tracing::info!(
            "Starting debugger engine '{}' for {} {} ({})",
            self.engine.name(),
            descriptor.kind,
            descriptor.name,
            descriptor.address
        );

        match self.engine.main(&*self.host) {
            Ok(()) => {
                self.advance(LaunchPhase::Terminated);
                LaunchOutcome::Returned
            }
            Err(EngineSignal::Exit(code)) => {
                self.host.exit_code.set(code);
                self.advance(LaunchPhase::Terminated);
                tracing::info!("Debugger engine exited with status {}", code);
                LaunchOutcome::Exited(code)
            }
            Err(EngineSignal::Fault(err)) => {
                self.advance(LaunchPhase::ErrorPropagated);
                tracing::warn!("Debugger engine failed: {:#}", err);
                LaunchOutcome::Faulted(err)
            }
        }
    }
}

fn launcher<'a, E: Engine + ?Sized>(
    host: &'a mut Host,
    engine: &'a mut E,
    program_name: Option<&str>,
) -> Launcher<'a, E> {
    let launcher = Launcher::new(host, engine);
    match program_name {
        Some(name) => launcher.with_program_name(name),
        None => launcher,
    }
}

/// Launch a module with the default hooks.
pub fn launch_module<E: Engine + ?Sized>(
    host: &mut Host,
    engine: &mut E,
    address: &Address,
    name: &str,
    extra: &[String],
    program_name: Option<&str>,
) -> LaunchOutcome {
    launcher(host, engine, program_name).launch_module(address, name, extra)
}

/// Launch a script with the default hooks.
pub fn launch_script<E: Engine + ?Sized>(
    host: &mut Host,
    engine: &mut E,
    address: &Address,
    name: &str,
    extra: &[String],
    program_name: Option<&str>,
) -> LaunchOutcome {
    launcher(host, engine, program_name).launch_script(address, name, extra)
}
