#[macro_use]
extern crate assert_matches;
#[macro_use]
extern crate lazy_static;

mod context;

use sdrnet::net::layers::{
    ethernet_types,
    Arp,
    ArpOp,
    EthernetAddress,
    Ipv4Address,
};
use sdrnet::net::service::ethernet::{
    dispatch_frame,
    recv_frame,
    MIN_FRAME_LEN,
};
use sdrnet::sim::Event;
use sdrnet::Error;

use context::*;

fn arp_frame(op: ArpOp, target_proto_addr: Ipv4Address) -> Vec<u8> {
    let arp = Arp {
        op,
        source_hw_addr: *PEER_ETH_ADDR,
        source_proto_addr: *PEER_IPV4_ADDR,
        target_hw_addr: EthernetAddress::new([0; 6]),
        target_proto_addr,
    };

    let mut buffer = [0; Arp::BUFFER_LEN];
    arp.serialize(&mut buffer).unwrap();
    eth_frame(
        EthernetAddress::BROADCAST,
        *PEER_ETH_ADDR,
        ethernet_types::ARP,
        &buffer,
    )
}

#[test]
fn arp_request_for_own_ip_is_answered() {
    let mut context = context();
    let frame = arp_frame(ArpOp::Request, *OWN_IPV4_ADDR);

    recv_frame(&mut context.interface, &mut context.listeners, &frame);

    let frames = context.trace.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].len(), MIN_FRAME_LEN);
    assert_eq!(&frames[0][.. ETH_OFFSET], &[0, 0, 0, 0]);

    let eth_frame = committed_eth_frame(&frames[0]);
    assert_eq!(eth_frame.dst_addr(), *PEER_ETH_ADDR);
    assert_eq!(eth_frame.src_addr(), *OWN_ETH_ADDR);
    assert_eq!(eth_frame.payload_type(), ethernet_types::ARP);

    let reply = Arp::deserialize(eth_frame.payload()).unwrap();
    assert_eq!(
        reply,
        Arp {
            op: ArpOp::Reply,
            source_hw_addr: *OWN_ETH_ADDR,
            source_proto_addr: *OWN_IPV4_ADDR,
            target_hw_addr: *PEER_ETH_ADDR,
            target_proto_addr: *PEER_IPV4_ADDR,
        }
    );
}

#[test]
fn arp_reply_waits_for_streaming_opening() {
    let mut context = context();
    let frame = arp_frame(ArpOp::Request, *OWN_IPV4_ADDR);

    recv_frame(&mut context.interface, &mut context.listeners, &frame);

    let events = context.trace.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], Event::Opening);
    assert_matches!(events[1], Event::Commit { port: 0, .. });
    assert_eq!(events[2], Event::Clear);
}

#[test]
fn arp_request_for_other_ip_is_dropped() {
    let mut context = context();
    let frame = arp_frame(ArpOp::Request, Ipv4Address::new([10, 0, 0, 9]));

    assert_matches!(
        dispatch_frame(&mut context.interface, &mut context.listeners, &frame),
        Err(Error::Ignored)
    );
    assert!(context.trace.events().is_empty());
}

#[test]
fn arp_reply_is_not_answered() {
    let mut context = context();
    let frame = arp_frame(ArpOp::Reply, *OWN_IPV4_ADDR);

    assert_matches!(
        dispatch_frame(&mut context.interface, &mut context.listeners, &frame),
        Err(Error::Ignored)
    );
    assert!(context.trace.events().is_empty());
}

#[test]
fn arp_with_bad_address_sizes_is_dropped() {
    let mut context = context();
    let mut frame = arp_frame(ArpOp::Request, *OWN_IPV4_ADDR);
    // Hardware address length of the ARP payload.
    frame[16 + 4] = 8;

    assert_matches!(
        dispatch_frame(&mut context.interface, &mut context.listeners, &frame),
        Err(Error::Malformed)
    );
    assert!(context.trace.events().is_empty());
}

#[test]
fn truncated_arp_is_dropped() {
    let mut context = context();
    let frame = arp_frame(ArpOp::Request, *OWN_IPV4_ADDR);

    assert_matches!(
        dispatch_frame(
            &mut context.interface,
            &mut context.listeners,
            &frame[.. frame.len() - 1]
        ),
        Err(Error::Exhausted)
    );
    assert!(context.trace.events().is_empty());
}

#[test]
fn arp_request_does_not_populate_arp_cache() {
    let mut context = context();
    let frame = arp_frame(ArpOp::Request, *OWN_IPV4_ADDR);

    recv_frame(&mut context.interface, &mut context.listeners, &frame);
    assert_matches!(
        context.interface.arp_cache.eth_addr_for_ip(*PEER_IPV4_ADDR),
        None
    );
}

#[test]
fn unknown_ethertype_is_dropped() {
    let mut context = context();
    let frame = eth_frame(*OWN_ETH_ADDR, *PEER_ETH_ADDR, 0x86DD, &[0; 40]);

    assert_matches!(
        dispatch_frame(&mut context.interface, &mut context.listeners, &frame),
        Err(Error::Ignored)
    );
    assert!(context.trace.events().is_empty());
}
