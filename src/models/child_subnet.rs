//! Child subnet data model.

use super::Ipv4;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// One enumerated child subnet of a plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChildSubnet {
    /// 1-based position among all children of the base network.
    pub index: u64,
    /// Network address and child prefix.
    pub network: Ipv4,
    /// First usable host, `None` for /31 and /32.
    pub first_usable: Option<Ipv4Addr>,
    /// Last usable host, `None` for /31 and /32.
    pub last_usable: Option<Ipv4Addr>,
    pub broadcast: Ipv4Addr,
    pub usable_hosts: u64,
}

impl ChildSubnet {
    /// Build the child subnet record for a network, `index` is 1-based.
    pub fn new(index: u64, network: Ipv4) -> ChildSubnet {
        let network = network.network();
        let lo = u32::from(network.lo());
        let hi = u32::from(network.hi());
        // /31 and /32 have no room between network and broadcast
        let (first_usable, last_usable, usable_hosts) = if hi - lo >= 2 {
            (
                Some(Ipv4Addr::from(lo + 1)),
                Some(Ipv4Addr::from(hi - 1)),
                u64::from(hi - lo) - 1,
            )
        } else {
            (None, None, 0)
        };
        ChildSubnet {
            index,
            network,
            first_usable,
            last_usable,
            broadcast: network.hi(),
            usable_hosts,
        }
    }
}

impl fmt::Display for ChildSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let usable = match (self.first_usable, self.last_usable) {
            (Some(first), Some(last)) => format!("{first} - {last}"),
            _ => "none".to_string(),
        };
        write!(
            f,
            "#{} {} usable [{}] broadcast {} ({} hosts)",
            self.index, self.network, usable, self.broadcast, self.usable_hosts
        )
    }
}
