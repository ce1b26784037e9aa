#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use sdrnet::config::Config;
use sdrnet::net::addr::SocketAddr;
use sdrnet::net::layers::{
    ethernet_types,
    ipv4_protocols,
    EthernetAddress,
    EthernetFrame,
    Ipv4Address,
    Ipv4Packet,
    Ipv4Repr,
    UdpPacket,
    UdpRepr,
};
use sdrnet::net::listeners::Listeners;
use sdrnet::net::service::Interface;
use sdrnet::sim::{
    SimSlot,
    SimStream,
    Trace,
};

/// Size of the simulated transmit slot.
pub const SLOT_LEN: usize = 2048;

/// Offset of the padded Ethernet header within a committed frame.
pub const ETH_OFFSET: usize = 4;

lazy_static! {
    pub static ref OWN_ETH_ADDR: EthernetAddress = {
        EthernetAddress::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x01])
    };

    pub static ref OWN_IPV4_ADDR: Ipv4Address = Ipv4Address::new([10, 0, 0, 1]);

    pub static ref PEER_ETH_ADDR: EthernetAddress = EthernetAddress::new([0xAA; 6]);

    pub static ref PEER_IPV4_ADDR: Ipv4Address = Ipv4Address::new([10, 0, 0, 5]);
}

pub struct Context {
    pub interface: Interface,
    pub listeners: Listeners,
    pub trace: Trace,
}

pub fn config() -> Config {
    Config {
        ethernet_addr: *OWN_ETH_ADDR,
        ipv4_addr: *OWN_IPV4_ADDR,
        ..Config::default()
    }
}

/// Creates an interface backed by a simulated slot and streaming datapath.
pub fn context() -> Context {
    let _ = env_logger::try_init();

    let trace = Trace::new();
    let interface = Interface::new(
        &config(),
        Box::new(SimSlot::new(SLOT_LEN, trace.clone())),
        Some(Box::new(SimStream::new(trace.clone()))),
    );

    Context {
        interface,
        listeners: Listeners::new(),
        trace,
    }
}

/// A UDP datagram as seen by a listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Received {
    pub src_addr: SocketAddr,
    pub dst_addr: SocketAddr,
    pub payload: Vec<u8>,
}

/// Registers a listener which records every datagram it receives.
pub fn record(listeners: &mut Listeners, port: u16) -> Rc<RefCell<Vec<Received>>> {
    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = received.clone();

    listeners
        .register(port, move |_, src_addr, dst_addr, payload| {
            sink.borrow_mut().push(Received {
                src_addr,
                dst_addr,
                payload: payload.to_vec(),
            })
        })
        .unwrap();

    received
}

/// Builds a padded Ethernet frame as handed over by the receive path.
pub fn eth_frame(
    dst_addr: EthernetAddress,
    src_addr: EthernetAddress,
    payload_type: u16,
    payload: &[u8],
) -> Vec<u8> {
    let mut buffer = vec![0; EthernetFrame::<&[u8]>::buffer_len(payload.len())];

    {
        let mut eth_frame = EthernetFrame::try_new(&mut buffer[..]).unwrap();
        eth_frame.set_dst_addr(dst_addr);
        eth_frame.set_src_addr(src_addr);
        eth_frame.set_payload_type(payload_type);
        eth_frame.payload_mut().copy_from_slice(payload);
    }

    buffer
}

/// Builds an IPv4 packet from the peer to this node.
pub fn ipv4_packet(protocol: u8, payload: &[u8]) -> Vec<u8> {
    let ipv4_repr = Ipv4Repr {
        src_addr: *PEER_IPV4_ADDR,
        dst_addr: *OWN_IPV4_ADDR,
        protocol,
        payload_len: payload.len() as u16,
    };

    let mut buffer = vec![0; ipv4_repr.buffer_len()];
    ipv4_repr.serialize(&mut Ipv4Packet::try_new(&mut buffer[..]).unwrap());
    buffer[Ipv4Repr::HEADER_LEN ..].copy_from_slice(payload);
    buffer
}

/// Builds a UDP packet whose header declares the given length.
pub fn udp_packet(src_port: u16, dst_port: u16, length: u16, payload: &[u8]) -> Vec<u8> {
    let mut buffer = vec![0; UdpPacket::<&[u8]>::buffer_len(payload.len())];

    {
        let mut udp_packet = UdpPacket::try_new(&mut buffer[..]).unwrap();
        UdpRepr {
            src_port,
            dst_port,
            length,
        }.serialize(&mut udp_packet);
        udp_packet.payload_mut().copy_from_slice(payload);
    }

    buffer
}

/// Builds a complete frame carrying a well formed UDP datagram from the peer.
pub fn udp_frame(src_port: u16, dst_port: u16, payload: &[u8]) -> Vec<u8> {
    let length = UdpPacket::<&[u8]>::buffer_len(payload.len()) as u16;
    let udp = udp_packet(src_port, dst_port, length, payload);
    let ipv4 = ipv4_packet(ipv4_protocols::UDP, &udp);
    eth_frame(*OWN_ETH_ADDR, *PEER_ETH_ADDR, ethernet_types::IPV4, &ipv4)
}

/// Returns the padded Ethernet frame of a committed slot frame.
pub fn committed_eth_frame(frame: &[u8]) -> EthernetFrame<&[u8]> {
    EthernetFrame::try_new(&frame[ETH_OFFSET ..]).unwrap()
}
