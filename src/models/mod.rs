//! Domain models for subnet planning.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 network with CIDR notation support
//! - [`SubnetPlan`] and [`Sizing`] - Derived subnetting parameters
//! - [`ChildSubnet`] - One enumerated child network

mod child_subnet;
mod ipv4;
mod plan;

// Re-export public types
pub use child_subnet::ChildSubnet;
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, ip_after_subnet, mask_to_len, netmask,
    num_addresses, num_usable_hosts, Ipv4, MAX_LENGTH,
};
pub use plan::{Octet, PlanReport, Sizing, SubnetPlan};
