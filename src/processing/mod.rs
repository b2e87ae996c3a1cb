//! Subnet planning logic.
//!
//! This module contains the planner itself:
//! - [`plan`] - Deriving borrowed bits, mask, increment and host counts
//! - [`enumerate`] - Listing child subnets in ascending order
//! - [`check`] - Contiguity checks over listed subnets

mod check;
mod enumerate;
mod plan;

// Re-export public functions
pub use check::check_contiguous;
pub use enumerate::{enumerate_plan, enumerate_subnets, total_available_subnets, ChildSubnets};
pub use plan::{bits_for_count, derive_plan, plan_for_network, target_prefix};
