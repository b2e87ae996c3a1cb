//! Child subnet enumeration.
//!
//! Walks the child networks of a base network in ascending address order.

use super::plan::check_target_prefix;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{num_addresses, ChildSubnet, Ipv4, SubnetPlan};
use std::net::Ipv4Addr;

/// Lazy iterator over a window of child subnets.
#[derive(Debug, Clone)]
pub struct ChildSubnets {
    base: u64,
    step: u64,
    prefix: u8,
    next_index: u64,
    end_index: u64,
}

impl ChildSubnets {
    /// Children of `network` with `target_prefix`, positions `start_index..start_index+count`.
    ///
    /// `start_index` is 1-based. The window must fit in `2^(target_prefix - network.mask)`.
    pub fn new(
        network: Ipv4,
        target_prefix: u8,
        start_index: u64,
        count: u64,
    ) -> PlannerResult<ChildSubnets> {
        let network = network.network();
        check_target_prefix(network.mask, target_prefix)?;
        if start_index == 0 {
            return Err(PlannerError::InvalidArgument {
                name: "start index",
                value: start_index,
                reason: "subnet positions start at 1",
            });
        }
        if count == 0 {
            return Err(PlannerError::InvalidArgument {
                name: "count",
                value: count,
                reason: "at least one subnet must be listed",
            });
        }

        let available = total_available_subnets(network.mask, target_prefix);
        let last = start_index.checked_add(count - 1);
        if last.map_or(true, |last| last > available) {
            log::warn!(
                "{network} /{target_prefix}: window #{start_index}+{count} \
                 exceeds {available} subnets"
            );
            return Err(PlannerError::RangeExceeded {
                start_index,
                count,
                available,
            });
        }

        Ok(ChildSubnets {
            base: u64::from(u32::from(network.addr)),
            step: num_addresses(target_prefix)?,
            prefix: target_prefix,
            next_index: start_index,
            end_index: start_index + count,
        })
    }
}

impl Iterator for ChildSubnets {
    type Item = ChildSubnet;

    fn next(&mut self) -> Option<ChildSubnet> {
        if self.next_index >= self.end_index {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        // index <= total subnets, so the address stays inside the base network
        let addr = self.base + (index - 1) * self.step;
        let network = Ipv4 {
            addr: Ipv4Addr::from(addr as u32),
            mask: self.prefix,
        };
        Some(ChildSubnet::new(index, network))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end_index - self.next_index).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

/// `2^(target_prefix - original_prefix)`, expects `original_prefix <= target_prefix <= 32`.
pub fn total_available_subnets(original_prefix: u8, target_prefix: u8) -> u64 {
    1u64 << target_prefix.saturating_sub(original_prefix)
}

/// Enumerate child subnets of a base network given in CIDR form.
///
/// # Arguments
/// * `base_network` - Network such as `101.0.0.0/8`, host bits are masked off
/// * `target_prefix` - Prefix length of the child subnets
/// * `start_index` - 1-based position of the first child to list
/// * `count` - Number of children to list
///
/// # Returns
/// * `Ok(Vec<ChildSubnet>)` - Exactly `count` subnets in ascending order
/// * `Err` - InvalidNetwork, PrefixOutOfRange, InvalidArgument or RangeExceeded
///
/// The whole window is collected into memory, so `count` is only bounded by what
/// the base network holds (up to 2^32 rows for a /0 split into /32s). Callers
/// taking unbounded input should cap `count` first, as the command line does with
/// `SUBNET_PLANNER_MAX_LIST`, or walk [`ChildSubnets`] / [`enumerate_plan`] lazily.
pub fn enumerate_subnets(
    base_network: &str,
    target_prefix: u8,
    start_index: u64,
    count: u64,
) -> PlannerResult<Vec<ChildSubnet>> {
    let network = Ipv4::parse_network(base_network)?;
    let subnets: Vec<ChildSubnet> =
        ChildSubnets::new(network, target_prefix, start_index, count)?.collect();
    log::info!(
        "Enumerated {} /{target_prefix} subnets of {network} from #{start_index}",
        subnets.len()
    );
    Ok(subnets)
}

/// Enumerate a window of child subnets for an existing plan.
pub fn enumerate_plan(
    plan: &SubnetPlan,
    start_index: u64,
    count: u64,
) -> PlannerResult<ChildSubnets> {
    ChildSubnets::new(plan.network, plan.target_prefix, start_index, count)
}
