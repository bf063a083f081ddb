//! Hand-off to the debugger engine.
//!
//! ```text
//! LaunchDescriptor → synthesize argv → install hooks → Engine::main → LaunchOutcome
//! ```

mod argv;
mod driver;
mod engine;
mod hooks;
mod host;

pub use argv::{synthesize_args, EngineArgs};
pub use driver::{
    launch_module, launch_script, LaunchOutcome, LaunchPhase, Launcher, RunContext,
    FAULT_EXIT_CODE,
};
pub use engine::{Engine, EngineHookSites, EngineSignal};
pub use hooks::{install_hooks, start_client, start_server, HookFn, HookRegistry, HookSlots};
pub use host::{ExitCodeSlot, Host};
