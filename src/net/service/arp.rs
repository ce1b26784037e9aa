use crate::net::layers::{
    ethernet_types,
    Arp,
    ArpOp,
    EthernetAddress,
};
use crate::net::service::{
    ethernet,
    Interface,
};
use crate::net::tx::Aligned;
use crate::{
    Error,
    Result,
};

/// Sends an ARP packet via an interface.
pub fn send_packet(
    interface: &mut Interface,
    arp_repr: &Arp,
    dst_addr: EthernetAddress,
) -> Result<()> {
    let mut arp_buffer = Aligned([0; Arp::BUFFER_LEN]);
    arp_repr.serialize(&mut arp_buffer.0)?;
    ethernet::send_frame(interface, dst_addr, ethernet_types::ARP, &[&arp_buffer.0])
}

/// Answers an ARP request on behalf of eth_addr.
///
/// The reply swaps the sender and target of the request and is unicast back to
/// the requester.
pub fn send_reply(
    interface: &mut Interface,
    request: &Arp,
    eth_addr: EthernetAddress,
) -> Result<()> {
    let reply = Arp {
        op: ArpOp::Reply,
        source_hw_addr: eth_addr,
        source_proto_addr: request.target_proto_addr,
        target_hw_addr: request.source_hw_addr,
        target_proto_addr: request.source_proto_addr,
    };

    debug!(
        "Sending ARP reply to {}/{}.",
        reply.target_proto_addr, reply.target_hw_addr
    );

    send_packet(interface, &reply, reply.target_hw_addr)
}

/// Receives an ARP packet from an interface.
///
/// Only requests for the interface IPv4 address are answered.
pub fn recv_packet(interface: &mut Interface, arp_buffer: &[u8]) -> Result<()> {
    let arp_repr = Arp::deserialize(arp_buffer)?;

    if arp_repr.op != ArpOp::Request {
        return Err(Error::Ignored);
    }

    if arp_repr.target_proto_addr != interface.addrs.ipv4_addr() {
        debug!(
            "Ignoring ARP with target IPv4 address {}.",
            arp_repr.target_proto_addr
        );
        return Err(Error::Ignored);
    }

    let eth_addr = interface.addrs.ethernet_addr();
    send_reply(interface, &arp_repr, eth_addr)
}
