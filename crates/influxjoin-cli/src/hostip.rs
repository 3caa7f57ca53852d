//! Local address resolution
//!
//! Finds the IPv4 address other pods can reach this node on by scanning
//! the pod's network interfaces.

use pnet::datalink::{self, NetworkInterface};
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// No interface carried a usable address.
#[derive(Debug, Error)]
#[error("no usable IPv4 address found; are you connected to the network?")]
pub struct NoRoutableIpv4;

/// First IPv4 address of the first interface that is up and not loopback.
///
/// Inside a pod this is the pod IP, which is also the address the registry
/// snapshot reports for this node; self-exclusion during peer selection
/// relies on the two matching.
pub fn external_ipv4() -> Result<Ipv4Addr, NoRoutableIpv4> {
    first_external_ipv4(&datalink::interfaces())
}

fn first_external_ipv4(interfaces: &[NetworkInterface]) -> Result<Ipv4Addr, NoRoutableIpv4> {
    for interface in interfaces {
        if !interface.is_up() || interface.is_loopback() {
            continue;
        }
        for network in &interface.ips {
            match network.ip() {
                IpAddr::V4(ip) if !ip.is_loopback() => return Ok(ip),
                _ => {}
            }
        }
    }
    Err(NoRoutableIpv4)
}
