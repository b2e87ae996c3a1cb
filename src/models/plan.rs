//! Subnetting plan data model.

use super::Ipv4;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// How the caller sizes the child subnets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sizing {
    /// At least this many child subnets; the prefix grows by `ceil(log2(n))` bits.
    Count(u64),
    /// Explicit child prefix length.
    Prefix(u8),
}

/// Octet of the address that the subnet increment applies to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Octet {
    First,
    Second,
    Third,
    Fourth,
}

impl Octet {
    /// Octet that a prefix length ends in: /0../8 first, /9../16 second, and so on.
    pub fn for_prefix(prefix: u8) -> Octet {
        match prefix {
            0..=8 => Octet::First,
            9..=16 => Octet::Second,
            17..=24 => Octet::Third,
            _ => Octet::Fourth,
        }
    }

    /// Zero-based position within [`Ipv4Addr::octets`].
    pub fn position(self) -> usize {
        match self {
            Octet::First => 0,
            Octet::Second => 1,
            Octet::Third => 2,
            Octet::Fourth => 3,
        }
    }
}

impl fmt::Display for Octet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Octet::First => "1st",
            Octet::Second => "2nd",
            Octet::Third => "3rd",
            Octet::Fourth => "4th",
        };
        write!(f, "{s}")
    }
}

/// Derived subnetting parameters for a base network and sizing request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetPlan {
    /// Base network with host bits cleared.
    pub network: Ipv4,
    /// Sizing that produced this plan.
    pub sizing: Sizing,
    pub original_prefix: u8,
    pub target_prefix: u8,
    /// `target_prefix - original_prefix`.
    pub bits_borrowed: u8,
    /// Dotted-quad mask of the target prefix.
    pub subnet_mask: Ipv4Addr,
    /// Distance between consecutive child networks in `increment_octet`.
    pub increment: u16,
    pub increment_octet: Octet,
    /// Addresses per child subnet, network and broadcast included.
    pub addresses_per_subnet: u64,
    /// Usable hosts per child subnet, 0 for /31 and /32.
    pub usable_hosts: u64,
    /// `2^bits_borrowed`.
    pub total_subnets: u64,
}

/// A plan together with the window of child subnets listed for it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlanReport {
    pub plan: SubnetPlan,
    /// 1-based index of the first listed subnet.
    pub start_index: u64,
    pub subnets: Vec<super::ChildSubnet>,
}
