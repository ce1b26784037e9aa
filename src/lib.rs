//! A minimal Ethernet, ARP, IPv4, UDP and ICMP stack which transmits control
//! frames through a single hardware buffer pool slot shared with a streaming
//! datapath.

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod config;
pub mod net;
pub mod sim;

use crate::net::layers::Ipv4Address;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Indicates an error where an IPv4 address has no known Ethernet mapping.
    MacResolution(Ipv4Address),
    /// Indicates an error where a buffer, table, etc. is full or too small.
    Exhausted,
    /// Indicates an error where a packet or frame is malformed.
    Malformed,
    /// Indicates a well formed packet or frame this node does not handle.
    Ignored,
}

pub type Result<T> = std::result::Result<T, Error>;
