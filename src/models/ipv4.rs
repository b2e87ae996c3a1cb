//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing IPv4 networks in CIDR form,
//! along with the bit arithmetic used by the planner.

use crate::error::{PlannerError, PlannerResult};
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Matches `a.b.c.d`, `a.b.c.d/len` and `a.b.c.d/m.m.m.m`.
static CIDR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_cidr_regex() -> &'static Regex {
    CIDR_REGEX.get_or_init(|| {
        Regex::new(r"^(\d{1,3}(?:\.\d{1,3}){3})(?:\s*/\s*(\d{1,2}|\d{1,3}(?:\.\d{1,3}){3}))?$")
            .expect("Invalid Regex")
    })
}

/// Mask bits for a prefix length, saturating at /32.
fn prefix_bits(len: u8) -> u32 {
    let right_len = u32::from(MAX_LENGTH.saturating_sub(len));
    u32::MAX.checked_shl(right_len).unwrap_or(0)
}

fn check_len(len: u8) -> PlannerResult<()> {
    if len > MAX_LENGTH {
        Err(PlannerError::PrefixOutOfRange {
            prefix: u32::from(len),
            min: 0,
            max: MAX_LENGTH,
            reason: "Network length is too long",
        })
    } else {
        Ok(())
    }
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_planner::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> PlannerResult<u32> {
    check_len(len)?;
    Ok(prefix_bits(len))
}

/// Dotted-quad netmask for a prefix length, e.g. `/11` -> `255.224.0.0`.
pub fn netmask(len: u8) -> PlannerResult<Ipv4Addr> {
    Ok(Ipv4Addr::from(get_cidr_mask(len)?))
}

/// Convert a dotted-quad netmask back to a prefix length.
///
/// Fails unless the mask is a contiguous run of ones followed by zeros.
pub fn mask_to_len(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    let len = bits.leading_ones();
    if bits.checked_shl(len).unwrap_or(0) == 0 {
        Some(len as u8)
    } else {
        None
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> PlannerResult<Ipv4Addr> {
    Ok(Ipv4Addr::from(u32::from(addr) & get_cidr_mask(len)?))
}

/// Returns the IP address following the given subnet, `None` past 255.255.255.255.
pub fn ip_after_subnet(addr: Ipv4Addr, cidr: u8) -> Option<Ipv4Addr> {
    let network_bits = u32::from(addr) & get_cidr_mask(cidr).ok()?;
    let next_subnet_bits = u64::from(network_bits) + num_addresses(cidr).ok()?;
    u32::try_from(next_subnet_bits).ok().map(Ipv4Addr::from)
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> PlannerResult<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from((u32::from(addr) & mask) | !mask))
}

/// Number of addresses in a subnet of the given prefix length.
pub fn num_addresses(len: u8) -> PlannerResult<u64> {
    check_len(len)?;
    Ok(1u64 << (MAX_LENGTH - len))
}

/// Calculate the number of usable host addresses in a subnet.
///
/// The network and broadcast addresses are excluded, so /31 and /32 have none.
pub fn num_usable_hosts(len: u8) -> PlannerResult<u64> {
    Ok(num_addresses(len)?.saturating_sub(2))
}

/// IPv4 network with CIDR notation support.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.mask);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24") keeping the address as given.
    pub fn new(addr_cidr: &str) -> PlannerResult<Ipv4> {
        let input = addr_cidr.trim();
        let invalid = |reason: String| PlannerError::InvalidNetwork {
            input: input.to_string(),
            reason,
        };

        let caps = get_cidr_regex()
            .captures(input)
            .ok_or_else(|| invalid("expected a.b.c.d/len or a.b.c.d/m.m.m.m".to_string()))?;

        let addr: Ipv4Addr = caps[1]
            .parse()
            .map_err(|_| invalid(format!("invalid address {}", &caps[1])))?;

        let mask = match caps.get(2).map(|m| m.as_str()) {
            None => MAX_LENGTH,
            Some(m) if m.contains('.') => {
                let netmask: Ipv4Addr = m
                    .parse()
                    .map_err(|_| invalid(format!("invalid netmask {m}")))?;
                mask_to_len(netmask)
                    .ok_or_else(|| invalid(format!("netmask {m} is not contiguous")))?
            }
            Some(m) => {
                let len: u8 = m
                    .parse()
                    .map_err(|_| invalid(format!("invalid prefix length {m}")))?;
                if len > MAX_LENGTH {
                    return Err(invalid(format!("prefix length /{len} is longer than /32")));
                }
                len
            }
        };

        Ok(Ipv4 { addr, mask })
    }

    /// Parse a network non-strictly: host bits set in the input are masked off.
    pub fn parse_network(addr_cidr: &str) -> PlannerResult<Ipv4> {
        let ipv4 = Ipv4::new(addr_cidr)?;
        let network = ipv4.network();
        if network.addr != ipv4.addr {
            log::debug!("Host bits set in {ipv4}, using network {network}");
        }
        Ok(network)
    }

    /// The same network with host bits cleared.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// Get the broadcast address for this subnet.
    pub fn broadcast(&self) -> Ipv4 {
        Ipv4 {
            addr: self.hi(),
            mask: self.mask,
        }
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        let mask = prefix_bits(self.mask);
        Ipv4Addr::from((u32::from(self.addr) & mask) | !mask)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & prefix_bits(self.mask))
    }

    /// Whether `ip` falls inside this network.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.lo() <= ip && ip <= self.hi()
    }
}

impl FromStr for Ipv4 {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::parse_network(s)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(11).unwrap(), 0xFFE00000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_netmask() {
        assert_eq!(netmask(11).unwrap(), Ipv4Addr::new(255, 224, 0, 0));
        assert_eq!(netmask(19).unwrap(), Ipv4Addr::new(255, 255, 224, 0));
        assert_eq!(netmask(0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
    }

    #[test]
    fn test_mask_to_len() {
        assert_eq!(mask_to_len(Ipv4Addr::new(255, 255, 255, 0)), Some(24));
        assert_eq!(mask_to_len(Ipv4Addr::new(0, 0, 0, 0)), Some(0));
        assert_eq!(mask_to_len(Ipv4Addr::new(255, 255, 255, 255)), Some(32));
        assert_eq!(mask_to_len(Ipv4Addr::new(255, 0, 255, 0)), None);
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 8).unwrap(), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(cut_addr(ip, 32).unwrap(), Ipv4Addr::new(192, 168, 1, 42));
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_next_subnet() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            ip_after_subnet(ip, 24),
            Some(Ipv4Addr::new(192, 168, 2, 0))
        );
        assert_eq!(ip_after_subnet(ip, 8), Some(Ipv4Addr::new(193, 0, 0, 0)));
        assert_eq!(
            ip_after_subnet(ip, 32),
            Some(Ipv4Addr::new(192, 168, 1, 1))
        );
        assert!(ip_after_subnet(Ipv4Addr::new(255, 255, 255, 255), 24).is_none());
        assert!(ip_after_subnet(ip, 33).is_none());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 8).unwrap(),
            Ipv4Addr::new(192, 255, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 0)
        );
        assert_eq!(
            broadcast_addr(ip, 0).unwrap(),
            Ipv4Addr::new(255, 255, 255, 255)
        );
    }

    #[test]
    fn test_num_usable_hosts() {
        assert_eq!(num_usable_hosts(0).unwrap(), 4294967294);
        assert_eq!(num_usable_hosts(8).unwrap(), 16777214);
        assert_eq!(num_usable_hosts(11).unwrap(), 2097150);
        assert_eq!(num_usable_hosts(24).unwrap(), 254);
        assert_eq!(num_usable_hosts(30).unwrap(), 2);
        assert_eq!(num_usable_hosts(31).unwrap(), 0);
        assert_eq!(num_usable_hosts(32).unwrap(), 0);
        assert!(num_usable_hosts(33).is_err());
    }

    #[test]
    fn test_parse_network_non_strict() {
        let net = Ipv4::parse_network("192.168.1.42/24").unwrap();
        assert_eq!(net, Ipv4::new("192.168.1.0/24").unwrap());

        let net: Ipv4 = " 101.7.8.9 / 8 ".parse().unwrap();
        assert_eq!(net.to_string(), "101.0.0.0/8");
    }

    #[test]
    fn test_parse_network_forms() {
        assert_eq!(
            Ipv4::parse_network("10.1.2.0/255.255.255.0").unwrap(),
            Ipv4::new("10.1.2.0/24").unwrap()
        );
        assert_eq!(Ipv4::parse_network("10.1.2.3").unwrap().mask, 32);
        assert_eq!(Ipv4::parse_network("0.0.0.0/0").unwrap().mask, 0);
    }

    #[test]
    fn test_parse_network_invalid() {
        for bad in [
            "",
            "10.0.0/8",
            "10.0.0.256/8",
            "10.0.0.0/33",
            "10.0.0.0/",
            "10.0.0.0/255.0.255.0",
            "abc",
            "10.0.0.0/8/9",
        ] {
            let err = Ipv4::parse_network(bad).unwrap_err();
            assert!(
                matches!(err, PlannerError::InvalidNetwork { .. }),
                "{bad} should be InvalidNetwork, got {err:?}"
            );
        }
    }

    #[test]
    fn test_ip4_cmp_contains() {
        let ip1 = Ipv4::new("10.0.10.0/24").unwrap();
        let ip2 = Ipv4::new("10.0.0.0/8").unwrap();

        assert!(ip1 > ip2);
        assert!(ip2.contains(ip1.lo()));
        assert!(ip2.contains(ip1.hi()));
        assert!(!ip1.contains(Ipv4Addr::new(10, 0, 11, 0)));
        assert_eq!(ip2.hi(), Ipv4Addr::new(10, 255, 255, 255));
    }

    #[test]
    fn test_serde_roundtrip_string() {
        let ip = Ipv4::new("10.1.0.0/16").unwrap();
        let json = serde_json::to_string(&ip).unwrap();
        assert_eq!(json, "\"10.1.0.0/16\"");
        let back: Ipv4 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ip);
        assert!(serde_json::from_str::<Ipv4>("\"10.1.0.0\\/40\"").is_err());
    }
}
