use std::fmt::{
    Display,
    Formatter,
    Result as FmtResult,
};

use crate::net::layers::{
    EthernetAddress,
    Ipv4Address,
};

/// An IPv4 + port socket address.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SocketAddr {
    pub addr: Ipv4Address,
    pub port: u16,
}

impl SocketAddr {
    pub fn new(addr: Ipv4Address, port: u16) -> SocketAddr {
        SocketAddr { addr, port }
    }
}

impl Display for SocketAddr {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}:{}", self.addr, self.port)
    }
}

/// Supplies the addresses this node is configured with.
///
/// Addresses are queried on every send and receive, so implementations may
/// change them at runtime.
pub trait AddressProvider {
    /// Returns the Ethernet address associated with the node.
    fn ethernet_addr(&self) -> EthernetAddress;

    /// Returns the IPv4 address associated with the node.
    fn ipv4_addr(&self) -> Ipv4Address;
}

/// An AddressProvider with fixed addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticAddresses {
    pub ethernet_addr: EthernetAddress,
    pub ipv4_addr: Ipv4Address,
}

impl AddressProvider for StaticAddresses {
    fn ethernet_addr(&self) -> EthernetAddress {
        self.ethernet_addr
    }

    fn ipv4_addr(&self) -> Ipv4Address {
        self.ipv4_addr
    }
}
