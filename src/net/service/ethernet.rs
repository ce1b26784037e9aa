use byteorder::{
    ByteOrder,
    NetworkEndian,
};

use crate::net::layers::ethernet::HEADER_LEN as ETH_HEADER_LEN;
use crate::net::layers::{
    ethernet_types,
    EthernetAddress,
    EthernetFrame,
};
use crate::net::listeners::Listeners;
use crate::net::service::{
    arp,
    ipv4,
    Interface,
};
use crate::net::tx::{
    Aligned,
    Completion,
    FrameWriter,
};
use crate::{
    Error,
    Result,
};

/// Maximum number of fragments a frame is assembled from.
pub const MAX_FRAGMENTS: usize = 3;

/// Shortest frame committed to the slot, control word included.
pub const MIN_FRAME_LEN: usize = 60;

/// Length of the control word preceding the frame in the slot.
pub const CONTROL_LEN: usize = 4;

/// Control word routing a frame through the slow path.
pub const SLOW_PATH: u32 = 0;

/// Assembles an Ethernet frame from up to three fragments in the transmit slot
/// and sends it.
///
/// Blocks until the slot is idle, the streaming datapath leaves an opening and
/// the hardware finishes with the frame. A hardware error is logged but
/// otherwise treated like a successful transmission.
pub fn send_frame(
    interface: &mut Interface,
    dst_addr: EthernetAddress,
    payload_type: u16,
    fragments: &[&[u8]],
) -> Result<()> {
    if fragments.len() > MAX_FRAGMENTS {
        return Err(Error::Exhausted);
    }

    let mut header = Aligned([0; CONTROL_LEN + ETH_HEADER_LEN]);
    NetworkEndian::write_u32(&mut header.0[.. CONTROL_LEN], SLOW_PATH);
    {
        let mut eth_frame = EthernetFrame::try_new(&mut header.0[CONTROL_LEN ..])?;
        eth_frame.clear_pad();
        eth_frame.set_dst_addr(dst_addr);
        eth_frame.set_src_addr(interface.addrs.ethernet_addr());
        eth_frame.set_payload_type(payload_type);
    }

    interface.tx_slot.await_idle();

    let frame_len = {
        let mut writer = FrameWriter::new(interface.tx_slot.buffer_mut());
        writer.write(&header.0)?;
        for fragment in fragments {
            writer.write(fragment)?;
        }
        writer.finish(MIN_FRAME_LEN)?
    };

    if let Some(ref mut stream_gate) = interface.stream_gate {
        stream_gate.await_opening();
    }

    trace!(
        "Sending {} byte frame of type {:#06x} to {} via port {}.",
        frame_len,
        payload_type,
        dst_addr,
        interface.tx_port
    );
    interface.tx_slot.commit(interface.tx_port, frame_len);

    if let Completion::Error = interface.tx_slot.await_completion() {
        warn!("Transmit slot reported an error sending to {}.", dst_addr);
    }

    interface.tx_slot.clear();
    Ok(())
}

/// Receives a padded Ethernet frame.
///
/// The frame is parsed and propagated up the network stack; anything this node
/// does not handle is dropped.
pub fn recv_frame(interface: &mut Interface, listeners: &mut Listeners, eth_buffer: &[u8]) {
    if let Err(err) = dispatch_frame(interface, listeners, eth_buffer) {
        debug!("Dropped Ethernet frame with {:?}.", err);
    }
}

/// Receives a padded Ethernet frame stored as 32 bit lines in big endian
/// memory order.
pub fn recv_frame_lines(interface: &mut Interface, listeners: &mut Listeners, lines: &[u32]) {
    let mut eth_buffer = vec![0; lines.len() * 4];
    NetworkEndian::write_u32_into(lines, &mut eth_buffer);
    recv_frame(interface, listeners, &eth_buffer);
}

/// Same as recv_frame(...), but reports why a frame was dropped.
pub fn dispatch_frame(
    interface: &mut Interface,
    listeners: &mut Listeners,
    eth_buffer: &[u8],
) -> Result<()> {
    let eth_frame = EthernetFrame::try_new(eth_buffer)?;

    match eth_frame.payload_type() {
        ethernet_types::ARP => arp::recv_packet(interface, eth_frame.payload()),
        ethernet_types::IPV4 => ipv4::recv_packet(interface, listeners, &eth_frame),
        i => {
            debug!("Ignoring Ethernet frame with type {:#06x}.", i);
            Err(Error::Ignored)
        }
    }
}
