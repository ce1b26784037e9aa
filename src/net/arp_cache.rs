use std::collections::HashMap;
use std::time::{
    Duration,
    Instant,
};

use crate::net::layers::{
    EthernetAddress,
    Ipv4Address,
};
use crate::net::time::{
    Clock,
    SystemClock,
};

struct Entry {
    eth_addr: EthernetAddress,
    in_cache_since: Instant,
}

/// Maintains a bounded, expiring set of IPv4 -> ethernet address mappings.
pub struct ArpCache<C = SystemClock>
where
    C: Clock,
{
    entries: HashMap<Ipv4Address, Entry>,
    expiration: Duration,
    capacity: usize,
    clock: C,
}

impl<C: Clock> ArpCache<C> {
    /// Creates an ARP cache holding at most capacity mappings, each of which
    /// expires expiration_in_secs seconds after it was last refreshed.
    pub fn new(expiration_in_secs: u64, capacity: usize, clock: C) -> ArpCache<C> {
        ArpCache {
            entries: HashMap::with_capacity(capacity),
            expiration: Duration::from_secs(expiration_in_secs),
            capacity,
            clock,
        }
    }

    /// Lookup the ethernet address for an IPv4 address.
    pub fn eth_addr_for_ip(&mut self, ipv4_addr: Ipv4Address) -> Option<EthernetAddress> {
        self.expire_eth_addr();
        self.entries.get(&ipv4_addr).map(|entry| entry.eth_addr)
    }

    /// Create or refresh the ethernet address mapping for an IPv4 address.
    ///
    /// When the cache is full the oldest mapping is evicted to make room.
    pub fn set_eth_addr_for_ip(&mut self, ipv4_addr: Ipv4Address, eth_addr: EthernetAddress) {
        if self.capacity == 0 {
            return;
        }

        self.expire_eth_addr();

        if !self.entries.contains_key(&ipv4_addr) && self.entries.len() >= self.capacity {
            let oldest = self.entries
                .iter()
                .min_by_key(|&(_, entry)| entry.in_cache_since)
                .map(|(ipv4_addr, _)| *ipv4_addr);

            if let Some(oldest) = oldest {
                debug!("Evicting ARP mapping for {}.", oldest);
                self.entries.remove(&oldest);
            }
        }

        let in_cache_since = self.clock.now();
        self.entries.insert(
            ipv4_addr,
            Entry {
                eth_addr,
                in_cache_since,
            },
        );
    }

    /// Returns the number of live mappings.
    pub fn len(&mut self) -> usize {
        self.expire_eth_addr();
        self.entries.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Purge ethernet address mappings that have expired.
    fn expire_eth_addr(&mut self) {
        let now = self.clock.now();
        let expiration = self.expiration;
        self.entries
            .retain(|_, entry| now.duration_since(entry.in_cache_since) <= expiration);
    }

    #[cfg(test)]
    fn clock(&mut self) -> &mut C {
        &mut self.clock
    }
}
