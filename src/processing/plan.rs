//! Subnetting plan derivation.
//!
//! Turns a base network and a [`Sizing`] request into a [`SubnetPlan`].

use crate::error::{PlannerError, PlannerResult};
use crate::models::{
    netmask, num_addresses, num_usable_hosts, Ipv4, Octet, Sizing, SubnetPlan, MAX_LENGTH,
};

/// Bits to borrow so that at least `count` subnets exist, i.e. `ceil(log2(count))`.
///
/// A count of 1 borrows nothing and the single subnet is the base network.
pub fn bits_for_count(count: u64) -> PlannerResult<u32> {
    match count {
        0 => Err(PlannerError::InvalidArgument {
            name: "subnet count",
            value: 0,
            reason: "at least one subnet is required",
        }),
        1 => Ok(0),
        n => Ok(u64::BITS - (n - 1).leading_zeros()),
    }
}

/// Target prefix for a sizing request against a network with prefix `original`.
pub fn target_prefix(original: u8, sizing: Sizing) -> PlannerResult<u8> {
    match sizing {
        Sizing::Count(count) => {
            let prefix = u32::from(original) + bits_for_count(count)?;
            if prefix > u32::from(MAX_LENGTH) {
                return Err(PlannerError::PrefixOutOfRange {
                    prefix,
                    min: original,
                    max: MAX_LENGTH,
                    reason: "network too small for requested subnet count",
                });
            }
            Ok(prefix as u8)
        }
        Sizing::Prefix(prefix) => {
            check_target_prefix(original, prefix)?;
            Ok(prefix)
        }
    }
}

/// Check `original <= prefix <= 32`.
pub(crate) fn check_target_prefix(original: u8, prefix: u8) -> PlannerResult<()> {
    let reason = if prefix < original {
        "target prefix is shorter than the base network prefix"
    } else if prefix > MAX_LENGTH {
        "target prefix is longer than /32"
    } else {
        return Ok(());
    };
    Err(PlannerError::PrefixOutOfRange {
        prefix: u32::from(prefix),
        min: original,
        max: MAX_LENGTH,
        reason,
    })
}

/// Derive the subnetting plan for an already parsed network.
pub fn plan_for_network(network: Ipv4, sizing: Sizing) -> PlannerResult<SubnetPlan> {
    let network = network.network();
    let original_prefix = network.mask;
    let target = target_prefix(original_prefix, sizing)?;
    let bits_borrowed = target - original_prefix;

    let subnet_mask = netmask(target)?;
    let increment_octet = Octet::for_prefix(target);
    let increment = 256 - u16::from(subnet_mask.octets()[increment_octet.position()]);

    let plan = SubnetPlan {
        network,
        sizing,
        original_prefix,
        target_prefix: target,
        bits_borrowed,
        subnet_mask,
        increment,
        increment_octet,
        addresses_per_subnet: num_addresses(target)?,
        usable_hosts: num_usable_hosts(target)?,
        total_subnets: 1u64 << bits_borrowed,
    };
    log::debug!(
        "plan {network} {sizing:?} => /{target} mask={subnet_mask} \
         increment={increment} ({increment_octet} octet) hosts={hosts}",
        hosts = plan.usable_hosts
    );
    Ok(plan)
}

/// Derive the subnetting plan for a base network given in CIDR form.
///
/// # Arguments
/// * `base_network` - Network such as `101.0.0.0/8`, host bits are masked off
/// * `sizing` - Either a minimum subnet count or an explicit child prefix
///
/// # Returns
/// * `Ok(SubnetPlan)` - The derived parameters
/// * `Err` - InvalidNetwork, PrefixOutOfRange or InvalidArgument
pub fn derive_plan(base_network: &str, sizing: Sizing) -> PlannerResult<SubnetPlan> {
    let network = Ipv4::parse_network(base_network)?;
    plan_for_network(network, sizing)
}
