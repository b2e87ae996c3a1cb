//! Terminal output utilities.
//!
//! Renders the plan explanation and the subnet table for the terminal.

use super::csv::CsvRow;
use crate::models::{ChildSubnet, SubnetPlan, Sizing};
use colored::Colorize;

/// Format a value as a right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    if value_str.len() >= width {
        value_str
    } else {
        format!("{value_str:>width$}")
    }
}

/// Group digits in thousands, `2097150` -> `2,097,150`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Numbered explanation of how the plan was derived.
pub fn render_plan(plan: &SubnetPlan) -> String {
    let host_bits = 32 - u32::from(plan.target_prefix);
    let why = match plan.sizing {
        Sizing::Count(n) => format!(
            "At least {n} subnets are needed, the smallest power of 2 >= {n} is 2^{b} = {t}, \
             so {b} bits are borrowed from the host portion.",
            b = plan.bits_borrowed,
            t = plan.total_subnets
        ),
        Sizing::Prefix(p) => format!(
            "Prefix /{p} was requested, {b} bits more than /{o}.",
            b = plan.bits_borrowed,
            o = plan.original_prefix
        ),
    };
    let lines = [
        format!("Subnetting {}", plan.network).bold().to_string(),
        format!(
            "1. Original CIDR Prefix: /{}\n   The starting network mask provided in the input.",
            plan.original_prefix
        ),
        format!(
            "2. New Subnet Prefix (CIDR): /{}\n   {why}",
            plan.target_prefix.to_string().green()
        ),
        format!(
            "3. Bits Borrowed: {}\n   These bits increase the subnet count from 1 to {}.",
            plan.bits_borrowed,
            thousands(plan.total_subnets)
        ),
        format!(
            "4. Subnet Mask: {}\n   Equivalent to /{}, giving each subnet its boundary and size.",
            plan.subnet_mask.to_string().green(),
            plan.target_prefix
        ),
        format!(
            "5. Subnet Increment: {} (in the {} octet)\n   \
             Distance between the network addresses of consecutive subnets.",
            plan.increment.to_string().green(),
            plan.increment_octet
        ),
        format!(
            "6. Usable Hosts per Subnet: {}\n   \
             Each subnet has 2^{host_bits} = {} addresses, minus network and broadcast.",
            thousands(plan.usable_hosts).green(),
            thousands(plan.addresses_per_subnet)
        ),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

const WIDTHS: [usize; 6] = [8, 15, 15, 15, 15, 13];

fn table_row(cells: [String; 6]) -> String {
    cells
        .iter()
        .zip(WIDTHS)
        .map(|(cell, width)| format_field(cell, width))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

fn opt(addr: Option<std::net::Ipv4Addr>) -> String {
    addr.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Aligned table of parsed rows, header first.
pub fn render_rows(rows: &[CsvRow]) -> String {
    let mut out = table_row(super::csv::CSV_HEADER.map(String::from));
    out.push('\n');
    for r in rows {
        out.push_str(&table_row([
            r.index.to_string(),
            r.network.to_string(),
            opt(r.first_usable),
            opt(r.last_usable),
            r.broadcast.to_string(),
            thousands(r.usable_hosts),
        ]));
        out.push('\n');
    }
    out
}

/// Aligned table of child subnets, header first.
pub fn render_table(subnets: &[ChildSubnet]) -> String {
    let rows: Vec<CsvRow> = subnets.iter().map(CsvRow::from).collect();
    render_rows(&rows)
}

/// Print the plan explanation and the subnet table to stdout.
pub fn print_report(plan: &SubnetPlan, subnets: &[ChildSubnet]) {
    println!("{}", render_plan(plan));
    println!(
        "{}",
        format!(
            "Subnets {} of {}",
            subnets.len(),
            thousands(plan.total_subnets)
        )
        .bold()
    );
    print!("{}", render_table(subnets));
}
