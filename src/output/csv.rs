//! CSV export and import of subnet tables.

use crate::error::{PlannerError, PlannerResult};
use crate::models::{ChildSubnet, Ipv4};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::Path;

/// Column headers, in export order.
pub const CSV_HEADER: [&str; 6] = [
    "Subnet #",
    "Network",
    "Usable Start",
    "Usable End",
    "Broadcast",
    "Usable Hosts",
];

/// One row of an exported subnet table.
///
/// Empty usable fields (/31 and /32) map to `None`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    #[serde(rename = "Subnet #")]
    pub index: u64,
    #[serde(rename = "Network")]
    pub network: Ipv4Addr,
    #[serde(rename = "Usable Start")]
    pub first_usable: Option<Ipv4Addr>,
    #[serde(rename = "Usable End")]
    pub last_usable: Option<Ipv4Addr>,
    #[serde(rename = "Broadcast")]
    pub broadcast: Ipv4Addr,
    #[serde(rename = "Usable Hosts")]
    pub usable_hosts: u64,
}

impl From<&ChildSubnet> for CsvRow {
    fn from(s: &ChildSubnet) -> Self {
        CsvRow {
            index: s.index,
            network: s.network.addr,
            first_usable: s.first_usable,
            last_usable: s.last_usable,
            broadcast: s.broadcast,
            usable_hosts: s.usable_hosts,
        }
    }
}

impl TryFrom<&CsvRow> for ChildSubnet {
    type Error = PlannerError;

    /// Rebuild the subnet a row describes, rejecting rows that are not a CIDR block
    /// or whose usable range and host count disagree with it.
    fn try_from(row: &CsvRow) -> PlannerResult<ChildSubnet> {
        let invalid =
            |reason: &str| PlannerError::Export(format!("Row #{}: {reason}", row.index));
        let lo = u64::from(u32::from(row.network));
        let hi = u64::from(u32::from(row.broadcast));
        if hi < lo {
            return Err(invalid("broadcast is below the network address"));
        }
        let span = hi - lo + 1;
        if !span.is_power_of_two() || lo % span != 0 {
            return Err(invalid("network and broadcast do not bound a CIDR block"));
        }
        let mask = (32 - span.trailing_zeros()) as u8;
        let subnet = ChildSubnet::new(
            row.index,
            Ipv4 {
                addr: row.network,
                mask,
            },
        );
        if CsvRow::from(&subnet) != *row {
            return Err(invalid("usable range or host count does not match the block"));
        }
        Ok(subnet)
    }
}

/// Render subnets as CSV text, header row first.
pub fn to_csv(subnets: &[ChildSubnet]) -> PlannerResult<String> {
    // header is written by hand so an empty table still has one
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    for s in subnets {
        wtr.serialize(CsvRow::from(s))?;
    }
    let bytes = wtr.into_inner()?;
    String::from_utf8(bytes).map_err(|e| PlannerError::Export(format!("CSV is not UTF-8: {e}")))
}

/// Write subnets as CSV to `path`.
pub fn write_csv(path: &Path, subnets: &[ChildSubnet]) -> PlannerResult<()> {
    std::fs::write(path, to_csv(subnets)?)
        .map_err(|e| PlannerError::Export(format!("Error writing {}: {e}", path.display())))?;
    log::info!("Wrote {} subnets to {}", subnets.len(), path.display());
    Ok(())
}

/// Parse a table produced by [`to_csv`] back into rows.
///
/// A leading UTF-8 byte order mark, CRLF line endings and quoted fields are accepted.
pub fn parse_csv(input: &str) -> PlannerResult<Vec<CsvRow>> {
    let input = input.trim_start_matches('\u{feff}');
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(input.as_bytes());

    let header = rdr.headers()?;
    if header.is_empty() {
        return Err(PlannerError::Export("Empty CSV input".to_string()));
    }
    if !header.iter().eq(CSV_HEADER) {
        let found = header.iter().collect::<Vec<_>>().join(",");
        return Err(PlannerError::Export(format!("Unexpected CSV header: {found}")));
    }

    rdr.deserialize::<CsvRow>()
        .map(|row| {
            row.map_err(|e| match e.position() {
                Some(pos) => PlannerError::Export(format!("line {}: {e}", pos.line())),
                None => PlannerError::from(e),
            })
        })
        .collect()
}

/// Read and parse a CSV export from `path`.
pub fn read_csv(path: &Path) -> PlannerResult<Vec<CsvRow>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| PlannerError::Export(format!("Error reading {}: {e}", path.display())))?;
    parse_csv(&text)
}
