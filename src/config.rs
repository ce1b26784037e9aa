//! Node configuration.

use crate::net::addr::StaticAddresses;
use crate::net::layers::{
    EthernetAddress,
    Ipv4Address,
};

lazy_static! {
    /// Default Ethernet address of a freshly flashed node.
    pub static ref DEFAULT_ETH_ADDR: EthernetAddress = {
        EthernetAddress::new([0x00, 0x50, 0xC2, 0x85, 0x3F, 0xFF])
    };

    /// Default IPv4 address of a freshly flashed node.
    pub static ref DEFAULT_IPV4_ADDR: Ipv4Address = {
        Ipv4Address::new([192, 168, 10, 2])
    };
}

/// Buffer pool output port wired to the Ethernet MAC.
pub const DEFAULT_TX_PORT: u8 = 0;

/// Seconds before an ARP cache entry is considered stale.
pub const DEFAULT_ARP_EXPIRATION_SECS: u64 = 60;

/// Maximum number of ARP cache entries.
pub const DEFAULT_ARP_CAPACITY: usize = 8;

/// Settings used to build an `Interface`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Ethernet address this node transmits from and answers ARP for.
    pub ethernet_addr: EthernetAddress,
    /// IPv4 address this node answers to.
    pub ipv4_addr: Ipv4Address,
    /// Buffer pool output port control frames are committed to.
    pub tx_port: u8,
    pub arp_expiration_secs: u64,
    pub arp_capacity: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            ethernet_addr: *DEFAULT_ETH_ADDR,
            ipv4_addr: *DEFAULT_IPV4_ADDR,
            tx_port: DEFAULT_TX_PORT,
            arp_expiration_secs: DEFAULT_ARP_EXPIRATION_SECS,
            arp_capacity: DEFAULT_ARP_CAPACITY,
        }
    }
}

impl Config {
    /// Returns an address provider answering with the configured addresses.
    pub fn addresses(&self) -> StaticAddresses {
        StaticAddresses {
            ethernet_addr: self.ethernet_addr,
            ipv4_addr: self.ipv4_addr,
        }
    }
}
