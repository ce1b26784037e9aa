use crate::net::layers::{
    icmpv4_unreachable_codes,
    Icmpv4Message,
    Icmpv4Packet,
    Ipv4Repr,
};
use crate::{
    Error,
    Result,
};

/// Receives an ICMP packet from an interface.
///
/// Destination unreachable messages are noted in the log. Everything else,
/// echo requests included, is ignored and never answered.
pub fn recv_packet(ipv4_repr: &Ipv4Repr, icmp_buffer: &[u8]) -> Result<()> {
    let icmp_packet = Icmpv4Packet::try_new(icmp_buffer)?;

    match icmp_packet.message() {
        Icmpv4Message::DestinationUnreachable {
            code: icmpv4_unreachable_codes::PORT,
        } => {
            info!("ICMP port unreachable from {}.", ipv4_repr.src_addr);
            Ok(())
        }
        Icmpv4Message::DestinationUnreachable { code } => {
            info!(
                "ICMP destination unreachable (code {}) from {}.",
                code, ipv4_repr.src_addr
            );
            Ok(())
        }
        message => {
            debug!("Ignoring ICMP {:?} from {}.", message, ipv4_repr.src_addr);
            Err(Error::Ignored)
        }
    }
}
