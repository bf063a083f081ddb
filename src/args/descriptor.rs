//! Launch descriptor: the canonical form every invocation reconciles into.

use std::fmt;

/// Separator between engine flags and opaque target arguments.
pub const SEPARATOR: &str = "--";

/// What the debugger is asked to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchKind {
    /// A module addressed by its dotted name (`-m pkg.mod`).
    Module,
    /// A script addressed by its path.
    Script,
}

impl fmt::Display for LaunchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchKind::Module => f.write_str("module"),
            LaunchKind::Script => f.write_str("script"),
        }
    }
}

/// Debugger network address.
///
/// No host means the engine listens locally; a host means it connects out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub host: Option<String>,
    pub port: u16,
}

impl Address {
    /// Address for local listen mode.
    pub fn local(port: u16) -> Self {
        Self { host: None, port }
    }

    /// Address for connecting out to `host`.
    pub fn remote(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: Some(host.into()),
            port,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{}:{}", host, self.port),
            None => write!(f, "*:{}", self.port),
        }
    }
}

/// Normalized launch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchDescriptor {
    pub kind: LaunchKind,
    /// Module dotted name or script path. Never empty.
    pub name: String,
    pub address: Address,
}

impl LaunchDescriptor {
    pub fn module(name: impl Into<String>, address: Address) -> Self {
        Self {
            kind: LaunchKind::Module,
            name: name.into(),
            address,
        }
    }

    pub fn script(name: impl Into<String>, address: Address) -> Self {
        Self {
            kind: LaunchKind::Script,
            name: name.into(),
            address,
        }
    }
}

/// Tokens the reconciler did not interpret, in input order.
///
/// Layout: engine flags first, then the [`SEPARATOR`] followed by the opaque
/// target arguments. The separator is only present when there are target
/// arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedArgs(Vec<String>);

impl ForwardedArgs {
    /// Build from the two halves, inserting the separator when needed.
    pub fn from_parts(engine: Vec<String>, target: Vec<String>) -> Self {
        let mut tokens = engine;
        if !target.is_empty() {
            tokens.push(SEPARATOR.to_string());
            tokens.extend(target);
        }
        Self(tokens)
    }

    /// Split at the first separator into (engine flags, target arguments).
    ///
    /// The separator itself belongs to neither half.
    pub fn split(&self) -> (&[String], &[String]) {
        split_at_separator(&self.0)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq<Vec<&str>> for ForwardedArgs {
    fn eq(&self, other: &Vec<&str>) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

/// Split a token list at its first [`SEPARATOR`].
pub fn split_at_separator(tokens: &[String]) -> (&[String], &[String]) {
    match tokens.iter().position(|t| t == SEPARATOR) {
        Some(pos) => (&tokens[..pos], &tokens[pos + 1..]),
        None => (tokens, &[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn from_parts_omits_separator_without_target_args() {
        let fwd = ForwardedArgs::from_parts(strings(&["--DEBUG"]), vec![]);
        assert_eq!(fwd, vec!["--DEBUG"]);
    }

    #[test]
    fn from_parts_inserts_single_separator() {
        let fwd = ForwardedArgs::from_parts(strings(&["--DEBUG"]), strings(&["a", "--", "b"]));
        assert_eq!(fwd, vec!["--DEBUG", "--", "a", "--", "b"]);

        let (engine, target) = fwd.split();
        assert_eq!(engine, strings(&["--DEBUG"]).as_slice());
        assert_eq!(target, strings(&["a", "--", "b"]).as_slice());
    }

    #[test]
    fn split_without_separator_is_all_engine() {
        let tokens = strings(&["--vm_type", "xyz"]);
        let (engine, target) = split_at_separator(&tokens);
        assert_eq!(engine.len(), 2);
        assert!(target.is_empty());
    }

    #[test]
    fn address_display() {
        assert_eq!(Address::local(8888).to_string(), "*:8888");
        assert_eq!(Address::remote("1.2.3.4", 8888).to_string(), "1.2.3.4:8888");
    }
}
