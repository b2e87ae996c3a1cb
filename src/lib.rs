// cargo watch -x 'fmt' -x 'run'  // 'run -- 101.0.0.0/8 --count 8'

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use cli::{Cli, Format};
use colored::Colorize;
use config::{Config, DEFAULT_LIST};
use models::PlanReport;
use processing::{check_contiguous, enumerate_plan};
use std::error::Error;
use std::path::{Path, PathBuf};

pub use error::{PlannerError, PlannerResult};
pub use models::{ChildSubnet, Sizing, SubnetPlan};
pub use processing::{derive_plan, enumerate_subnets};

/// Resolve the sizing from the command line, falling back to the configured count.
pub fn sizing_from(cli: &Cli, config: &Config) -> Sizing {
    match (cli.count, cli.prefix) {
        (_, Some(prefix)) => Sizing::Prefix(prefix),
        (Some(count), None) => Sizing::Count(count),
        (None, None) => Sizing::Count(config.count),
    }
}

/// Plan `network` and list a window of its subnets.
///
/// Without an explicit `list`, count sizing lists the requested count and prefix
/// sizing lists up to [`DEFAULT_LIST`] subnets from `start_index`.
pub fn build_report(
    network: &str,
    sizing: Sizing,
    start_index: u64,
    list: Option<u64>,
    max_list: u64,
) -> PlannerResult<PlanReport> {
    log::info!("#Start build_report() {network} {sizing:?} start=#{start_index}");
    let plan = derive_plan(network, sizing)?;

    let list = match list {
        Some(list) if list > max_list => {
            return Err(PlannerError::InvalidArgument {
                name: "list",
                value: list,
                reason: "above SUBNET_PLANNER_MAX_LIST",
            })
        }
        Some(list) => list,
        None => match sizing {
            Sizing::Count(count) if count > max_list => {
                log::warn!("Listing {max_list} of {count} requested subnets");
                max_list
            }
            Sizing::Count(count) => count,
            Sizing::Prefix(_) => {
                let remaining = plan.total_subnets.saturating_sub(start_index.saturating_sub(1));
                remaining.clamp(1, DEFAULT_LIST.min(max_list).max(1))
            }
        },
    };

    let subnets = enumerate_plan(&plan, start_index, list)?.collect();
    Ok(PlanReport {
        plan,
        start_index,
        subnets,
    })
}

fn print_import(path: &Path) -> Result<(), Box<dyn Error>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let report = output::read_json(path)?;
        check_contiguous(&report.subnets)?;
        output::print_report(&report.plan, &report.subnets);
    } else {
        let rows = output::read_csv(path)?;
        log::info!("Read {} rows from {}", rows.len(), path.display());
        let subnets = rows
            .iter()
            .map(ChildSubnet::try_from)
            .collect::<PlannerResult<Vec<_>>>()?;
        check_contiguous(&subnets)?;
        print!("{}", output::render_rows(&rows));
    }
    Ok(())
}

/// Where the report is exported, if anywhere: `--output`, or the dated default with `--export`.
pub fn export_path(cli: &Cli, config: &Config) -> Option<PathBuf> {
    match (&cli.output, cli.export) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(output::default_export_path(
            config.timezone,
            cli.format.extension(),
        )),
        (None, false) => None,
    }
}

/// Run one command line request.
pub fn run(cli: Cli, config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &cli.import {
        return print_import(path);
    }

    let network = cli.network.as_deref().unwrap_or(&config.network);
    let sizing = sizing_from(&cli, config);
    let report = build_report(network, sizing, cli.start, cli.list, config.max_list)?;
    check_contiguous(&report.subnets)?;

    match cli.format {
        Format::Table => output::print_report(&report.plan, &report.subnets),
        Format::Csv => print!("{}", output::to_csv(&report.subnets)?),
        Format::Json => println!("{}", output::to_json(&report)?),
    }

    if let Some(path) = export_path(&cli, config) {
        match cli.format {
            Format::Json => output::write_json(&path, &report)?,
            Format::Table | Format::Csv => output::write_csv(&path, &report.subnets)?,
        }
        eprintln!("{} {}", "Exported".green(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::net::Ipv4Addr;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("subnet-planner").chain(args.iter().copied()))
            .expect("Failed to parse arguments")
    }

    #[test]
    fn test_sizing_from() {
        let config = Config::default();
        let cli = Cli::try_parse_from(["subnet-planner"]).unwrap();
        assert_eq!(sizing_from(&cli, &config), Sizing::Count(8));
        let cli = Cli::try_parse_from(["subnet-planner", "-p", "20"]).unwrap();
        assert_eq!(sizing_from(&cli, &config), Sizing::Prefix(20));
    }

    #[test]
    fn test_build_report_count_lists_count() {
        let report = build_report("101.0.0.0/8", Sizing::Count(5), 1, None, 2048).unwrap();
        assert_eq!(report.plan.target_prefix, 11);
        assert_eq!(report.subnets.len(), 5);
    }

    #[test]
    fn test_build_report_prefix_default_list() {
        let report = build_report("101.0.0.0/8", Sizing::Prefix(19), 2045, None, 2048).unwrap();
        assert_eq!(report.subnets.len(), 4);
        assert_eq!(report.subnets[0].index, 2045);

        let report = build_report("10.0.0.0/24", Sizing::Prefix(24), 1, None, 2048).unwrap();
        assert_eq!(report.subnets.len(), 1);
    }

    #[test]
    fn test_build_report_limits() {
        assert!(matches!(
            build_report("101.0.0.0/8", Sizing::Prefix(19), 1, Some(5000), 2048),
            Err(PlannerError::InvalidArgument { name: "list", .. })
        ));
        assert!(matches!(
            build_report("101.0.0.0/8", Sizing::Prefix(19), 8000, Some(10), 2048),
            Err(PlannerError::RangeExceeded { available: 2048, .. })
        ));
        assert!(matches!(
            build_report("101.0.0.0/8", Sizing::Prefix(19), 8000, None, 2048),
            Err(PlannerError::RangeExceeded { available: 2048, .. })
        ));
        let report = build_report("10.0.0.0/8", Sizing::Count(5000), 1, None, 2048).unwrap();
        assert_eq!(report.subnets.len(), 2048);
    }

    #[test]
    fn test_export_path() {
        let config = Config::default();
        assert_eq!(export_path(&cli(&["10.0.0.0/8"]), &config), None);

        let path = export_path(&cli(&["-o", "plan.json", "-f", "csv"]), &config);
        assert_eq!(path, Some(PathBuf::from("plan.json")));

        let path = export_path(&cli(&["-e", "-f", "json"]), &config).unwrap();
        let name = path.to_string_lossy();
        assert!(name.starts_with("subnet_table_"), "{name}");
        assert!(name.ends_with(".json"), "{name}");
        let path = export_path(&cli(&["-e"]), &config).unwrap();
        assert!(path.to_string_lossy().ends_with(".csv"));
    }

    #[test]
    fn test_run_output_csv_and_import() {
        let config = Config::default();
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("plan.csv");
        let path_arg = path.to_str().unwrap();

        run(cli(&["10.0.0.0/16", "-c", "4", "-f", "csv", "-o", path_arg]), &config)
            .expect("Failed to run with --output");
        let rows = output::read_csv(&path).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].network, Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(rows[3].broadcast, Ipv4Addr::new(10, 0, 255, 255));

        run(cli(&["--import", path_arg]), &config).expect("Failed to import CSV");

        // table format exports CSV too
        let table_path = dir.path().join("table.csv");
        run(cli(&["10.0.0.0/24", "-p", "26", "-o", table_path.to_str().unwrap()]), &config)
            .expect("Failed to run table format with --output");
        assert_eq!(output::read_csv(&table_path).unwrap().len(), 4);
    }

    #[test]
    fn test_run_output_json_and_import() {
        let config = Config::default();
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("plan.JSON");
        let path_arg = path.to_str().unwrap();

        run(cli(&["101.0.0.0/8", "-p", "19", "-s", "2040", "-f", "json", "-o", path_arg]), &config)
            .expect("Failed to run with --output");
        let report = output::read_json(&path).unwrap();
        let expected = build_report("101.0.0.0/8", Sizing::Prefix(19), 2040, None, 2048).unwrap();
        assert_eq!(report, expected);
        assert_eq!(report.subnets.len(), 8);

        run(cli(&["--import", path_arg]), &config).expect("Failed to import JSON");
    }

    #[test]
    fn test_import_rejects_non_contiguous_json() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("gap.json");
        let mut report = build_report("10.0.0.0/16", Sizing::Count(4), 1, None, 2048).unwrap();
        report.subnets.remove(1);
        output::write_json(&path, &report).unwrap();

        let err = run(cli(&["--import", path.to_str().unwrap()]), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("Index gap"), "{err}");
    }

    #[test]
    fn test_import_rejects_non_contiguous_csv() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let header = output::CSV_HEADER.join(",");

        let gap = dir.path().join("gap.csv");
        std::fs::write(
            &gap,
            format!(
                "{header}\n\
                 1,10.0.0.0,10.0.0.1,10.0.0.254,10.0.0.255,254\n\
                 2,10.0.2.0,10.0.2.1,10.0.2.254,10.0.2.255,254\n"
            ),
        )
        .unwrap();
        let err = run(cli(&["--import", gap.to_str().unwrap()]), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("does not follow"), "{err}");

        let bad_row = dir.path().join("bad_row.csv");
        std::fs::write(
            &bad_row,
            format!("{header}\n1,10.0.0.0,10.0.0.1,10.0.0.254,10.0.0.255,9999\n"),
        )
        .unwrap();
        let err =
            run(cli(&["--import", bad_row.to_str().unwrap()]), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("Row #1"), "{err}");
    }
}
