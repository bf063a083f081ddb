use std::process::ExitCode;

use anyhow::Context;

use dbgboot::args::parse_args;
use dbgboot::config::Config;
use dbgboot::engine::ProcessEngine;
use dbgboot::launch::{Host, LaunchOutcome, Launcher};
use dbgboot::logging::init_tracing;

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let mut host = Host::from_env();
    tracing::debug!("Command line args: {:?}", host.argv);

    // Nothing is touched until the command line is known to be valid.
    let (descriptor, extra) = match parse_args(&host.argv) {
        Ok(parsed) => parsed,
        Err(err) => err.exit(),
    };

    let config = Config::load().inspect_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
    }).context("failed to load configuration")?;

    let mut engine = ProcessEngine::from_config(&config.engine);
    let outcome = Launcher::new(&mut host, &mut engine).launch(&descriptor, extra.as_slice());

    if let LaunchOutcome::Faulted(err) = &outcome {
        eprintln!("Error: {:?}", err);
    }
    Ok(ExitCode::from(exit_status(&outcome)))
}

/// Statuses outside 0..=255 are truncated the way the OS would.
fn exit_status(outcome: &LaunchOutcome) -> u8 {
    outcome.exit_code() as u8
}

#[cfg(test)]
mod tests {
    use super::exit_status;
    use dbgboot::launch::LaunchOutcome;

    #[test]
    fn exit_status_passes_engine_status() {
        assert_eq!(exit_status(&LaunchOutcome::Exited(3)), 3);
        assert_eq!(exit_status(&LaunchOutcome::Returned), 0);
        assert_eq!(exit_status(&LaunchOutcome::Exited(256 + 4)), 4);
    }
}
