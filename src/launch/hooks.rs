//! Connection hooks shared between the engine and the host.
//!
//! The engine looks up `start_server` / `start_client` in its connection site
//! and in its own namespace; the host namespace carries them too. All sites
//! must hold the very same `Arc`, so identity checks agree everywhere.

use std::fmt;
use std::io;
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;

use crate::args::Address;

/// A connection entry point: establishes the debugger connection for `address`.
pub type HookFn = Arc<dyn Fn(&Address) -> io::Result<TcpStream> + Send + Sync>;

/// The pair of hooks to install. Cloning shares the same hook identities.
#[derive(Clone)]
pub struct HookRegistry {
    start_server: HookFn,
    start_client: HookFn,
}

impl HookRegistry {
    pub fn new(start_server: HookFn, start_client: HookFn) -> Self {
        Self {
            start_server,
            start_client,
        }
    }

    pub fn start_server(&self) -> &HookFn {
        &self.start_server
    }

    pub fn start_client(&self) -> &HookFn {
        &self.start_client
    }
}

impl Default for HookRegistry {
    /// Plain TCP hooks.
    fn default() -> Self {
        Self::new(Arc::new(start_server), Arc::new(start_client))
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("start_server", &Arc::as_ptr(&self.start_server))
            .field("start_client", &Arc::as_ptr(&self.start_client))
            .finish()
    }
}

/// One installation site.
#[derive(Clone, Default)]
pub struct HookSlots {
    pub start_server: Option<HookFn>,
    pub start_client: Option<HookFn>,
}

impl HookSlots {
    pub fn install(&mut self, registry: &HookRegistry) {
        self.start_server = Some(Arc::clone(&registry.start_server));
        self.start_client = Some(Arc::clone(&registry.start_client));
    }

    /// True when both slots hold exactly the registry's hooks.
    pub fn holds(&self, registry: &HookRegistry) -> bool {
        same_hook(self.start_server.as_ref(), &registry.start_server)
            && same_hook(self.start_client.as_ref(), &registry.start_client)
    }

    /// True when both slots hold the same hooks as `other`.
    pub fn shares_with(&self, other: &HookSlots) -> bool {
        fn same(a: Option<&HookFn>, b: Option<&HookFn>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
        }
        same(self.start_server.as_ref(), other.start_server.as_ref())
            && same(self.start_client.as_ref(), other.start_client.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.start_server.is_none() && self.start_client.is_none()
    }
}

fn same_hook(slot: Option<&HookFn>, hook: &HookFn) -> bool {
    slot.is_some_and(|installed| Arc::ptr_eq(installed, hook))
}

impl fmt::Debug for HookSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSlots")
            .field("start_server", &self.start_server.as_ref().map(Arc::as_ptr))
            .field("start_client", &self.start_client.as_ref().map(Arc::as_ptr))
            .finish()
    }
}

/// Install the registry's hooks into every site.
pub fn install_hooks<'a>(
    registry: &HookRegistry,
    sites: impl IntoIterator<Item = &'a mut HookSlots>,
) {
    let mut count = 0;
    for site in sites {
        site.install(registry);
        count += 1;
    }
    tracing::debug!(sites = count, "Connection hooks installed");
}

/// Listen on the address (all interfaces without a host) and accept one
/// debugger client.
pub fn start_server(address: &Address) -> io::Result<TcpStream> {
    let host = address.host.as_deref().unwrap_or("0.0.0.0");
    let listener = TcpListener::bind((host, address.port))?;
    tracing::debug!("Waiting for debugger client on {}", listener.local_addr()?);
    let (stream, peer) = listener.accept()?;
    tracing::info!("Debugger client connected from {}", peer);
    Ok(stream)
}

/// Connect to a listening debugger client at the address.
pub fn start_client(address: &Address) -> io::Result<TcpStream> {
    let host = address.host.as_deref().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "start_client requires a host to connect to",
        )
    })?;
    tracing::debug!("Connecting to debugger client at {}:{}", host, address.port);
    TcpStream::connect((host, address.port))
}
