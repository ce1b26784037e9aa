use crate::net::layers::{
    ethernet_types,
    ipv4_protocols,
    EthernetFrame,
    Ipv4Address,
    Ipv4Packet,
    Ipv4Repr,
};
use crate::net::listeners::Listeners;
use crate::net::service::{
    ethernet,
    icmpv4,
    udp,
    Interface,
};
use crate::net::tx::Aligned;
use crate::{
    Error,
    Result,
};

/// Maximum number of payload fragments following the IPv4 header.
pub const MAX_FRAGMENTS: usize = ethernet::MAX_FRAGMENTS - 1;

/// Sends an IPv4 packet whose payload is the concatenation of up to two
/// fragments.
///
/// The destination must already be in the ARP cache. On a miss the packet is
/// dropped and Error::MacResolution returned; no ARP request is sent.
pub fn send_packet(
    interface: &mut Interface,
    dst_addr: Ipv4Address,
    protocol: u8,
    fragments: &[&[u8]],
) -> Result<()> {
    if fragments.len() > MAX_FRAGMENTS {
        return Err(Error::Exhausted);
    }

    let payload_len: usize = fragments.iter().map(|fragment| fragment.len()).sum();
    if Ipv4Repr::HEADER_LEN + payload_len > u16::max_value() as usize {
        return Err(Error::Exhausted);
    }

    let ipv4_repr = Ipv4Repr {
        src_addr: interface.addrs.ipv4_addr(),
        dst_addr,
        protocol,
        payload_len: payload_len as u16,
    };

    let mut ipv4_header = Aligned([0; Ipv4Repr::HEADER_LEN]);
    ipv4_repr.serialize(&mut Ipv4Packet::try_new(&mut ipv4_header.0[..])?);

    let eth_dst_addr = match interface.arp_cache.eth_addr_for_ip(dst_addr) {
        Some(eth_dst_addr) => eth_dst_addr,
        None => {
            warn!("Failed to hit ARP cache looking for {}.", dst_addr);
            return Err(Error::MacResolution(dst_addr));
        }
    };

    let mut eth_fragments: [&[u8]; ethernet::MAX_FRAGMENTS] = [&ipv4_header.0, &[], &[]];
    eth_fragments[1 ..= fragments.len()].copy_from_slice(fragments);

    ethernet::send_frame(
        interface,
        eth_dst_addr,
        ethernet_types::IPV4,
        &eth_fragments[..= fragments.len()],
    )
}

/// Receives an IPv4 packet from an interface.
///
/// Fragmented packets and packets with options are dropped. Every accepted
/// packet refreshes the ARP cache with its source addresses before being
/// propagated up the network stack.
pub fn recv_packet(
    interface: &mut Interface,
    listeners: &mut Listeners,
    eth_frame: &EthernetFrame<&[u8]>,
) -> Result<()> {
    let ipv4_packet = Ipv4Packet::try_new(eth_frame.payload())?;
    ipv4_packet.check_encoding()?;

    interface
        .arp_cache
        .set_eth_addr_for_ip(ipv4_packet.src_addr(), eth_frame.src_addr());

    let ipv4_repr = Ipv4Repr::deserialize(&ipv4_packet);

    match ipv4_repr.protocol {
        ipv4_protocols::UDP => {
            udp::recv_packet(interface, listeners, &ipv4_repr, ipv4_packet.payload())
        }
        ipv4_protocols::ICMP => icmpv4::recv_packet(&ipv4_repr, ipv4_packet.payload()),
        i => {
            debug!("Ignoring IPv4 packet with protocol {}.", i);
            Err(Error::Ignored)
        }
    }
}
