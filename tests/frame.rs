#[macro_use]
extern crate assert_matches;
#[macro_use]
extern crate lazy_static;

mod context;

use byteorder::{
    ByteOrder,
    NetworkEndian,
};

use sdrnet::net::layers::{
    ethernet_types,
    EthernetAddress,
};
use sdrnet::net::service::ethernet::{
    send_frame,
    MIN_FRAME_LEN,
    SLOW_PATH,
};
use sdrnet::net::service::Interface;
use sdrnet::net::tx::Aligned;
use sdrnet::sim::{
    Event,
    SimSlot,
    Trace,
};
use sdrnet::Error;

use context::*;

const DST_ADDR: EthernetAddress = EthernetAddress::BROADCAST;

/// Creates an interface without a streaming datapath.
fn ungated_interface(slot_len: usize, trace: &Trace) -> Interface {
    Interface::new(
        &config(),
        Box::new(SimSlot::new(slot_len, trace.clone())),
        None,
    )
}

#[test]
fn short_frame_is_padded_to_min_len() {
    let mut context = context();
    let payload = Aligned([0x5A; 8]);

    send_frame(
        &mut context.interface,
        DST_ADDR,
        ethernet_types::ARP,
        &[&payload.0],
    ).unwrap();

    let frames = context.trace.frames();
    assert_eq!(frames.len(), 1);

    let frame = &frames[0];
    assert_eq!(frame.len(), MIN_FRAME_LEN);
    assert_eq!(NetworkEndian::read_u32(&frame[.. 4]), SLOW_PATH);
    assert_eq!(&frame[4 .. 6], &[0, 0]);

    let eth_frame = committed_eth_frame(frame);
    assert_eq!(eth_frame.dst_addr(), DST_ADDR);
    assert_eq!(eth_frame.src_addr(), *OWN_ETH_ADDR);
    assert_eq!(eth_frame.payload_type(), ethernet_types::ARP);
    assert_eq!(&eth_frame.payload()[.. 8], &[0x5A; 8]);
    assert!(eth_frame.payload()[8 ..].iter().all(|byte| *byte == 0));
}

#[test]
fn fragments_are_concatenated_in_order() {
    let mut context = context();
    let first = Aligned([1; 20]);
    let second = Aligned([2; 8]);
    let third = Aligned([3; 40]);

    send_frame(
        &mut context.interface,
        DST_ADDR,
        ethernet_types::IPV4,
        &[&first.0, &second.0, &third.0],
    ).unwrap();

    let frames = context.trace.frames();
    assert_eq!(frames[0].len(), 4 + 16 + 20 + 8 + 40);

    let eth_frame = committed_eth_frame(&frames[0]);
    let payload = eth_frame.payload();
    assert_eq!(&payload[.. 20], &[1; 20][..]);
    assert_eq!(&payload[20 .. 28], &[2; 8][..]);
    assert_eq!(&payload[28 ..], &[3; 40][..]);
}

#[test]
fn misaligned_fragment_is_copied_exactly() {
    let mut context = context();
    let payload = [7; 45];

    send_frame(
        &mut context.interface,
        DST_ADDR,
        ethernet_types::IPV4,
        &[&payload],
    ).unwrap();

    let frames = context.trace.frames();
    assert_eq!(frames[0].len(), 4 + 16 + 48);
    assert_eq!(&frames[0][20 .. 65], &[7; 45][..]);
    assert_eq!(&frames[0][65 ..], &[0; 3]);
}

#[test]
fn too_many_fragments_are_refused() {
    let mut context = context();
    let fragment = Aligned([0; 4]);

    assert_matches!(
        send_frame(
            &mut context.interface,
            DST_ADDR,
            ethernet_types::IPV4,
            &[&fragment.0, &fragment.0, &fragment.0, &fragment.0],
        ),
        Err(Error::Exhausted)
    );
    assert!(context.trace.events().is_empty());
}

#[test]
fn frame_overflowing_slot_is_refused() {
    let trace = Trace::new();
    let mut interface = ungated_interface(128, &trace);
    let payload = vec![0; 128];

    assert_matches!(
        send_frame(&mut interface, DST_ADDR, ethernet_types::IPV4, &[&payload]),
        Err(Error::Exhausted)
    );
    assert!(trace.events().is_empty());
}

#[test]
fn slot_smaller_than_min_frame_is_refused() {
    let trace = Trace::new();
    let mut interface = ungated_interface(32, &trace);

    assert_matches!(
        send_frame(&mut interface, DST_ADDR, ethernet_types::ARP, &[]),
        Err(Error::Exhausted)
    );
    assert!(trace.events().is_empty());
}

#[test]
fn gate_opens_before_commit() {
    let mut context = context();

    send_frame(&mut context.interface, DST_ADDR, ethernet_types::ARP, &[]).unwrap();

    let events = context.trace.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], Event::Opening);
    assert_matches!(events[1], Event::Commit { port: 0, .. });
    assert_eq!(events[2], Event::Clear);
}

#[test]
fn ungated_frame_is_sent_without_opening() {
    let trace = Trace::new();
    let mut interface = ungated_interface(SLOT_LEN, &trace);

    send_frame(&mut interface, DST_ADDR, ethernet_types::ARP, &[]).unwrap();

    let events = trace.events();
    assert_eq!(events.len(), 2);
    assert_matches!(events[0], Event::Commit { .. });
    assert_eq!(events[1], Event::Clear);
}

#[test]
fn busy_slot_is_awaited() {
    let trace = Trace::new();
    let mut interface = Interface::new(
        &config(),
        Box::new(SimSlot::new(SLOT_LEN, trace.clone()).with_busy_polls(5)),
        None,
    );

    send_frame(&mut interface, DST_ADDR, ethernet_types::ARP, &[]).unwrap();
    assert_eq!(trace.frames().len(), 1);
}

#[test]
fn hardware_error_still_releases_slot() {
    let mut context = context();
    context.trace.fail_next(1);

    assert_matches!(
        send_frame(&mut context.interface, DST_ADDR, ethernet_types::ARP, &[]),
        Ok(())
    );
    assert_eq!(context.trace.events().last(), Some(&Event::Clear));

    context.trace.reset();
    send_frame(&mut context.interface, DST_ADDR, ethernet_types::ARP, &[]).unwrap();
    assert_eq!(context.trace.frames().len(), 1);
}

#[test]
fn configured_port_is_used() {
    let trace = Trace::new();
    let mut interface = ungated_interface(SLOT_LEN, &trace);
    interface.tx_port = 3;

    send_frame(&mut interface, DST_ADDR, ethernet_types::ARP, &[]).unwrap();

    assert_matches!(trace.events()[0], Event::Commit { port: 3, .. });
}
