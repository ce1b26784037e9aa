//! Platform independent packet processing.

pub mod addr;
pub mod arp_cache;
pub mod check;
pub mod layers;
pub mod listeners;
pub mod service;
pub mod time;
pub mod tx;
