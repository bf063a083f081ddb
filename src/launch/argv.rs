//! Engine argv assembler: every engine argument in one place.
//!
//! The engine only understands the legacy `--file` encoding, so both syntaxes
//! the reconciler accepts are written back in that form.

use crate::args::{split_at_separator, Address, LaunchDescriptor, LaunchKind};

/// Builder for the argument vector handed to the engine.
#[derive(Debug, Clone)]
pub struct EngineArgs {
    args: Vec<String>,
}

impl EngineArgs {
    /// Start with the program name (`argv[0]`).
    pub fn new(program_name: &str) -> Self {
        Self {
            args: vec![program_name.to_string()],
        }
    }

    /// `--port <port>`, plus `--client <host>` in remote mode.
    pub fn with_address(mut self, address: &Address) -> Self {
        self.args.push("--port".into());
        self.args.push(address.port.to_string());
        if let Some(host) = &address.host {
            self.args.push("--client".into());
            self.args.push(host.clone());
        }
        self
    }

    /// Engine flags, in the order they were given.
    pub fn with_engine_flags(mut self, flags: &[String]) -> Self {
        self.args.extend(flags.iter().cloned());
        self
    }

    /// `--module --file name:` or `--file path`.
    pub fn with_target(mut self, kind: LaunchKind, name: &str) -> Self {
        match kind {
            LaunchKind::Module => {
                self.args.push("--module".into());
                self.args.push("--file".into());
                self.args.push(format!("{}:", name));
            }
            LaunchKind::Script => {
                self.args.push("--file".into());
                self.args.push(name.to_string());
            }
        }
        self
    }

    /// Arguments for the debuggee. Must come last: the engine stops parsing at
    /// the target.
    pub fn with_target_args(mut self, args: &[String]) -> Self {
        self.args.extend(args.iter().cloned());
        self
    }

    /// Build the final argument list.
    pub fn build(self) -> Vec<String> {
        self.args
    }
}

/// Synthesize the engine argv for `descriptor`.
///
/// `extra` uses the forwarded layout: engine flags, then optionally `--` and
/// the debuggee's arguments. The separator is consumed; the engine flags land
/// before the target and the debuggee's arguments after it.
pub fn synthesize_args(
    descriptor: &LaunchDescriptor,
    extra: &[String],
    program_name: &str,
) -> Vec<String> {
    let (engine_flags, target_args) = split_at_separator(extra);

    EngineArgs::new(program_name)
        .with_address(&descriptor.address)
        .with_engine_flags(engine_flags)
        .with_target(descriptor.kind, &descriptor.name)
        .with_target_args(target_args)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn local_module() {
        let d = LaunchDescriptor::module("spam", Address::local(8888));
        assert_eq!(
            synthesize_args(&d, &[], "eggs"),
            strings(&["eggs", "--port", "8888", "--module", "--file", "spam:"])
        );
    }

    #[test]
    fn remote_script() {
        let d = LaunchDescriptor::script("spam.py", Address::remote("1.2.3.4", 8888));
        assert_eq!(
            synthesize_args(&d, &[], "eggs"),
            strings(&["eggs", "--port", "8888", "--client", "1.2.3.4", "--file", "spam.py"])
        );
    }

    #[test]
    fn engine_flags_without_separator_precede_target() {
        let d = LaunchDescriptor::script("spam.py", Address::local(1));
        let argv = synthesize_args(&d, &strings(&["--DEBUG"]), "eggs");
        assert_eq!(
            argv,
            strings(&["eggs", "--port", "1", "--DEBUG", "--file", "spam.py"])
        );
    }

    #[test]
    fn only_first_separator_is_consumed() {
        let d = LaunchDescriptor::script("spam.py", Address::local(1));
        let argv = synthesize_args(&d, &strings(&["--", "a", "--", "b"]), "eggs");
        assert_eq!(
            argv,
            strings(&["eggs", "--port", "1", "--file", "spam.py", "a", "--", "b"])
        );
    }
}
