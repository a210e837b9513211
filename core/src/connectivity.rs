//! Pre-flight connectivity check consulted before any request is dispatched.

/// Reports whether the device can currently reach the network.
pub trait ConnectivityGate: Send + Sync {
    fn is_connected(&self) -> bool;
}

impl<F> ConnectivityGate for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_connected(&self) -> bool {
        self()
    }
}

/// A gate that never blocks dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConnected;

impl ConnectivityGate for AlwaysConnected {
    fn is_connected(&self) -> bool {
        true
    }
}
