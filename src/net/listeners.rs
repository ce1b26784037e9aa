use crate::net::addr::SocketAddr;
use crate::net::service::Interface;
use crate::{
    Error,
    Result,
};

/// Number of UDP ports a node can listen on.
pub const MAX_LISTENERS: usize = 6;

/// Callback invoked with (interface, source, destination, payload) for each
/// datagram received on a port.
pub type Handler = Box<dyn FnMut(&mut Interface, SocketAddr, SocketAddr, &[u8])>;

struct Listener {
    port: u16,
    handler: Handler,
}

/// A fixed capacity table mapping UDP ports to handlers.
///
/// Listeners are registered while bringing the node up and live as long as the
/// table does.
pub struct Listeners {
    listeners: [Option<Listener>; MAX_LISTENERS],
}

impl Default for Listeners {
    fn default() -> Listeners {
        Listeners::new()
    }
}

impl Listeners {
    pub fn new() -> Listeners {
        Listeners {
            listeners: Default::default(),
        }
    }

    /// Registers a handler for a port, replacing any existing handler for the
    /// port.
    ///
    /// Returns Error::Exhausted if the port is new and every slot is taken.
    /// Service ports are fixed at build time, so callers usually treat this as
    /// fatal.
    pub fn register<F>(&mut self, port: u16, handler: F) -> Result<()>
    where
        F: FnMut(&mut Interface, SocketAddr, SocketAddr, &[u8]) + 'static,
    {
        if let Some(listener) = self.find(port) {
            debug!("Replacing UDP listener on port {}.", port);
            listener.handler = Box::new(handler);
            return Ok(());
        }

        match self.listeners.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                debug!("Adding UDP listener on port {}.", port);
                *slot = Some(Listener {
                    port,
                    handler: Box::new(handler),
                });
                Ok(())
            }
            None => {
                warn!("No room for a UDP listener on port {}.", port);
                Err(Error::Exhausted)
            }
        }
    }

    /// Checks if a handler is registered for a port.
    pub fn is_registered(&self, port: u16) -> bool {
        self.listeners
            .iter()
            .flatten()
            .any(|listener| listener.port == port)
    }

    /// Returns the number of registered ports.
    pub fn len(&self) -> usize {
        self.listeners.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes the handler registered for the destination port.
    ///
    /// Returns Error::Ignored if nothing listens on the port.
    pub fn dispatch(
        &mut self,
        interface: &mut Interface,
        src_addr: SocketAddr,
        dst_addr: SocketAddr,
        payload: &[u8],
    ) -> Result<()> {
        match self.find(dst_addr.port) {
            Some(listener) => {
                (listener.handler)(interface, src_addr, dst_addr, payload);
                Ok(())
            }
            None => {
                debug!("Ignoring UDP datagram from {} to {}.", src_addr, dst_addr);
                Err(Error::Ignored)
            }
        }
    }

    fn find(&mut self, port: u16) -> Option<&mut Listener> {
        self.listeners
            .iter_mut()
            .flatten()
            .find(|listener| listener.port == port)
    }
}
