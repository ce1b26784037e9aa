//! Packet processing services for different network layers.
//!
//! The `service` module deals with packet transmission and reception logic at
//! different layers of the network stack.

pub mod arp;
pub mod ethernet;
pub mod icmpv4;
pub mod ipv4;
pub mod udp;

use crate::config::Config;
use crate::net::addr::AddressProvider;
use crate::net::arp_cache::ArpCache;
use crate::net::time::SystemClock;
use crate::net::tx::{
    StreamGate,
    TxSlot,
};

/// An interface for sending and receiving network packets.
pub struct Interface {
    /// Buffer pool slot control frames are transmitted from.
    pub tx_slot: Box<dyn TxSlot>,
    /// Streaming datapath which may be writing to Ethernet, if any.
    pub stream_gate: Option<Box<dyn StreamGate>>,
    /// Buffer pool output port wired to Ethernet.
    pub tx_port: u8,
    /// Ethernet and IPv4 addresses of the node.
    pub addrs: Box<dyn AddressProvider>,
    /// Cache for IPv4/Ethernet address translations.
    pub arp_cache: ArpCache,
}

impl Interface {
    /// Creates an interface answering to the configured addresses.
    pub fn new(
        config: &Config,
        tx_slot: Box<dyn TxSlot>,
        stream_gate: Option<Box<dyn StreamGate>>,
    ) -> Interface {
        Interface {
            tx_slot,
            stream_gate,
            tx_port: config.tx_port,
            addrs: Box::new(config.addresses()),
            arp_cache: ArpCache::new(
                config.arp_expiration_secs,
                config.arp_capacity,
                SystemClock,
            ),
        }
    }
}
