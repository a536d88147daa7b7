//! Command-line interface for the P&L tracker.
//!
//! This module provides the CLI structure for the `pnl` binary.

mod commands;
pub mod handlers;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BackupCommand, ConfigCommand, DashboardCommand, ExpenseAssignment, ExportCsvCommand,
    PhotoCommand, RecordEdits, RecordsCommand, StructureCommand,
};

/// pnl - Daily profit and loss tracker
///
/// Record daily sales and categorized expenses, follow profit trends and keep
/// JSON backups of everything.
#[derive(Debug, Parser)]
#[command(name = "pnl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Averages, trend chart and recent activity
    Dashboard(DashboardCommand),

    /// Manage daily records
    #[command(subcommand)]
    Records(RecordsCommand),

    /// Manage bill photos on expense items
    #[command(subcommand)]
    Photo(PhotoCommand),

    /// Export or restore a JSON backup
    #[command(subcommand)]
    Backup(BackupCommand),

    /// Export a CSV summary of all records
    ExportCsv(ExportCsvCommand),

    /// View or extend the custom expense structure
    #[command(subcommand)]
    Structure(StructureCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;
    use shared::ItemPath;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "pnl");
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["pnl", "dashboard"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["pnl", "-v", "dashboard"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["pnl", "-vv", "dashboard"]).verbosity(), Verbosity::Trace);
        assert_eq!(parse(&["pnl", "dashboard", "-q"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["pnl", "-c", "/custom/config.yaml", "config", "show"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.yaml")));
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Show)));
    }

    #[test]
    fn test_parse_dashboard_today() {
        let cli = parse(&["pnl", "dashboard", "--today", "2024-07-24", "--json"]);
        match cli.command {
            Command::Dashboard(cmd) => {
                assert_eq!(cmd.today.unwrap().to_string(), "2024-07-24");
                assert!(cmd.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_records_new_with_edits() {
        let cli = parse(&[
            "pnl",
            "records",
            "new",
            "--date",
            "2024-07-24",
            "--sales",
            "20000",
            "--expense",
            "Meat/Beef=4490",
            "--expense",
            "Gas/Super Gas=1552.5",
            "--add-item",
            "Meat/Mutton",
            "--save-items",
        ]);
        match cli.command {
            Command::Records(RecordsCommand::New { date, edits, overwrite }) => {
                assert_eq!(date.unwrap().to_string(), "2024-07-24");
                assert_eq!(edits.sales, Some(20000.0));
                assert_eq!(edits.expenses.len(), 2);
                assert_eq!(edits.expenses[1].path, ItemPath::new("Gas", "Super Gas"));
                assert_eq!(edits.add_items, vec![ItemPath::new("Meat", "Mutton")]);
                assert!(edits.save_items);
                assert!(!overwrite);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_records_edit_remove_item() {
        let cli = parse(&["pnl", "records", "edit", "2024-07-24", "--remove-item", "Meat/Fish"]);
        assert!(matches!(
            cli.command,
            Command::Records(RecordsCommand::Edit { ref remove_items, .. })
                if remove_items == &vec![ItemPath::new("Meat", "Fish")]
        ));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Cli::try_parse_from(["pnl", "records", "show", "24/07/2024"]).is_err());
        assert!(Cli::try_parse_from(["pnl", "records", "new", "--expense", "Beef"]).is_err());
        assert!(Cli::try_parse_from(["pnl", "photo", "remove", "2024-07-24", "Beef"]).is_err());
    }

    #[test]
    fn test_parse_backup_import() {
        let cli = parse(&["pnl", "backup", "import", "backup.json", "--yes"]);
        assert!(matches!(
            cli.command,
            Command::Backup(BackupCommand::Import { yes: true, .. })
        ));
    }

    #[test]
    fn test_parse_structure_add_item() {
        let cli = parse(&["pnl", "structure", "add-item", "Meat", "Mutton"]);
        match cli.command {
            Command::Structure(StructureCommand::AddItem { category, item }) => {
                assert_eq!(category, "Meat");
                assert_eq!(item, "Mutton");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_export_csv() {
        let cli = parse(&["pnl", "export-csv", "--output", "/tmp/out"]);
        assert!(matches!(
            cli.command,
            Command::ExportCsv(ExportCsvCommand { output: Some(_) })
        ));
    }
}
