use crate::net::addr::SocketAddr;
use crate::net::layers::{
    ipv4_protocols,
    Ipv4Repr,
    UdpPacket,
    UdpRepr,
};
use crate::net::listeners::Listeners;
use crate::net::service::{
    ipv4,
    Interface,
};
use crate::net::tx::Aligned;
use crate::{
    Error,
    Result,
};

/// Sends a UDP datagram via the interface.
///
/// The UDP checksum is left disabled.
pub fn send_packet(
    interface: &mut Interface,
    src_port: u16,
    dst_addr: SocketAddr,
    payload: &[u8],
) -> Result<()> {
    let udp_packet_len = UdpPacket::<&[u8]>::buffer_len(payload.len());
    if Ipv4Repr::HEADER_LEN + udp_packet_len > u16::max_value() as usize {
        return Err(Error::Exhausted);
    }

    let udp_repr = UdpRepr {
        src_port,
        dst_port: dst_addr.port,
        length: udp_packet_len as u16,
    };

    let mut udp_header = Aligned([0; UdpRepr::HEADER_LEN]);
    udp_repr.serialize(&mut UdpPacket::try_new(&mut udp_header.0[..])?);

    ipv4::send_packet(
        interface,
        dst_addr.addr,
        ipv4_protocols::UDP,
        &[&udp_header.0, payload],
    )
}

/// Receives a UDP packet from an interface.
///
/// The datagram is handed to the listener registered for its destination
/// port. Datagrams for other ports are dropped without notifying the sender.
pub fn recv_packet(
    interface: &mut Interface,
    listeners: &mut Listeners,
    ipv4_repr: &Ipv4Repr,
    udp_buffer: &[u8],
) -> Result<()> {
    let udp_packet = UdpPacket::try_new(udp_buffer)
        .and_then(|udp_packet| udp_packet.check_encoding().map(|_| udp_packet))
        .map_err(|err| {
            warn!(
                "UDP inconsistent lengths: {} byte packet from {}.",
                udp_buffer.len(),
                ipv4_repr.src_addr
            );
            err
        })?;

    let udp_repr = UdpRepr::deserialize(&udp_packet);
    let src_addr = SocketAddr::new(ipv4_repr.src_addr, udp_repr.src_port);
    let dst_addr = SocketAddr::new(ipv4_repr.dst_addr, udp_repr.dst_port);

    listeners.dispatch(interface, src_addr, dst_addr, udp_packet.payload())
}
