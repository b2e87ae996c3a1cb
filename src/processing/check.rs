//! Sanity checks over enumerated subnets.

use crate::models::{ip_after_subnet, ChildSubnet};
use itertools::Itertools;
use std::error::Error;

/// Return error unless the subnets are ascending, gap-free and non-overlapping.
pub fn check_contiguous(subnets: &[ChildSubnet]) -> Result<(), Box<dyn Error>> {
    for (prev, next) in subnets.iter().tuple_windows() {
        if next.index != prev.index + 1 {
            return Err(format!("Index gap: #{} followed by #{}", prev.index, next.index).into());
        }
        let expected = ip_after_subnet(prev.network.addr, prev.network.mask)
            .ok_or_else(|| format!("Nothing can follow {}", prev.network))?;
        if next.network.lo() != expected {
            return Err(format!(
                "Subnet {} does not follow {} (expected {expected})",
                next.network, prev.network
            )
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;
    use crate::processing::enumerate_subnets;

    #[test]
    fn test_check_contiguous_ok() {
        let subnets = enumerate_subnets("10.0.0.0/16", 20, 3, 8).unwrap();
        check_contiguous(&subnets).expect("enumerated subnets are contiguous");
        check_contiguous(&subnets[..1]).expect("single subnet");
        check_contiguous(&[]).expect("empty list");
    }

    #[test]
    fn test_check_contiguous_gap() {
        let subnets = vec![
            ChildSubnet::new(1, Ipv4::new("10.0.0.0/24").unwrap()),
            ChildSubnet::new(2, Ipv4::new("10.0.2.0/24").unwrap()),
        ];
        let err = check_contiguous(&subnets).unwrap_err();
        assert!(err.to_string().contains("does not follow"));
    }

    #[test]
    fn test_check_contiguous_overlap_and_index() {
        let subnets = vec![
            ChildSubnet::new(1, Ipv4::new("10.0.0.0/23").unwrap()),
            ChildSubnet::new(2, Ipv4::new("10.0.1.0/24").unwrap()),
        ];
        assert!(check_contiguous(&subnets).is_err());

        let subnets = vec![
            ChildSubnet::new(1, Ipv4::new("10.0.0.0/24").unwrap()),
            ChildSubnet::new(3, Ipv4::new("10.0.1.0/24").unwrap()),
        ];
        assert!(check_contiguous(&subnets)
            .unwrap_err()
            .to_string()
            .contains("Index gap"));
    }
}
