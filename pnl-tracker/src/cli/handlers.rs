//! Command handlers for the `pnl` binary.
//!
//! Each handler runs one subcommand against an initialized [`AppState`] and
//! prints its result to stdout.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use shared::ItemPath;

use super::{
    render, BackupCommand, Command, ConfigCommand, PhotoCommand, RecordEdits, RecordsCommand,
    StructureCommand,
};
use crate::backend::{
    domain::{
        bill_photo,
        commands::records::{AddItemCommand, DeleteRecordCommand, RecordListQuery, SaveRecordCommand},
        record_service, summary_service, BackupService, DailyRecord,
    },
    io::mappers::RecordMapper,
    storage::JsonConnection,
    AppState,
};
use crate::config::AppConfig;

/// Run any command except `config`, which needs no backend
pub async fn dispatch(state: &AppState, command: Command) -> Result<()> {
    match command {
        Command::Dashboard(cmd) => handle_dashboard(state, cmd.today, cmd.json).await,
        Command::Records(cmd) => handle_records(state, cmd).await,
        Command::Photo(cmd) => handle_photo(state, cmd).await,
        Command::Backup(cmd) => handle_backup(state, cmd).await,
        Command::ExportCsv(cmd) => handle_export_csv(state, cmd.output).await,
        Command::Structure(cmd) => handle_structure(state, cmd).await,
        Command::Config(_) => Ok(()),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn handle_dashboard(state: &AppState, today_override: Option<NaiveDate>, json: bool) -> Result<()> {
    let today = today_override.unwrap_or_else(today);
    let records = state.record_service.list_records(RecordListQuery::default()).await?;
    let summary = state.summary_service.dashboard(&records, today);

    if json {
        print_json(&summary)
    } else {
        print!("{}", render::render_dashboard(&summary, &state.formatter, today));
        Ok(())
    }
}

pub async fn handle_records(state: &AppState, cmd: RecordsCommand) -> Result<()> {
    match cmd {
        RecordsCommand::List { search, json } => {
            let records = state.record_service.list_records(RecordListQuery { search }).await?;
            let summaries: Vec<_> = records.iter().map(summary_service::record_summary).collect();
            if json {
                print_json(&summaries)
            } else {
                println!("{} records", summaries.len());
                print!("{}", render::render_record_rows(&summaries, &state.formatter));
                Ok(())
            }
        }
        RecordsCommand::Show { date, json } => {
            let record = state.record_service.get_record(&DailyRecord::id_for_date(date)).await?;
            if json {
                print_json(&RecordMapper::to_dto(record))
            } else {
                let breakdown = summary_service::record_breakdown(&record);
                print!("{}", render::render_breakdown(&breakdown, &state.formatter));
                Ok(())
            }
        }
        RecordsCommand::New { date, edits, overwrite } => {
            let date = date.unwrap_or_else(today);
            let mut record = state.record_service.new_record_draft(date).await?;
            apply_edits(state, &mut record, &edits, &[]).await?;

            let result = state
                .record_service
                .save_record(SaveRecordCommand {
                    record,
                    is_new: true,
                    overwrite,
                })
                .await?;
            println!("{}", result.success_message);
            print_totals(state, &result.record);
            Ok(())
        }
        RecordsCommand::Edit { date, edits, remove_items } => {
            let mut record = state.record_service.get_record(&DailyRecord::id_for_date(date)).await?;
            apply_edits(state, &mut record, &edits, &remove_items).await?;

            let result = state
                .record_service
                .save_record(SaveRecordCommand {
                    record,
                    is_new: false,
                    overwrite: false,
                })
                .await?;
            println!("{}", result.success_message);
            print_totals(state, &result.record);
            Ok(())
        }
        RecordsCommand::Delete { date, yes } => {
            let record_id = DailyRecord::id_for_date(date);
            if !yes {
                bail!("Refusing to delete the record for {} without --yes", record_id);
            }
            let result = state
                .record_service
                .delete_record(DeleteRecordCommand { record_id })
                .await?;
            println!("{}", result.success_message);
            Ok(())
        }
    }
}

/// Apply CLI edits in form order: add items, remove items, then amounts
pub async fn apply_edits(
    state: &AppState,
    record: &mut DailyRecord,
    edits: &RecordEdits,
    remove_items: &[ItemPath],
) -> Result<()> {
    for path in &edits.add_items {
        state
            .record_service
            .add_item(
                record,
                AddItemCommand {
                    path: path.clone(),
                    save_for_future: edits.save_items,
                },
            )
            .await?;
    }
    for path in remove_items {
        record_service::remove_item(record, path)?;
    }
    if let Some(sales) = edits.sales {
        record.total_sales = sales;
    }
    for assignment in &edits.expenses {
        record_service::set_item_amount(record, &assignment.path, assignment.amount)?;
    }
    Ok(())
}

fn print_totals(state: &AppState, record: &DailyRecord) {
    println!(
        "  sales {}  expenses {}  profit {}",
        state.formatter.format(record.total_sales),
        state.formatter.format(record.total_expenses()),
        state.formatter.format_signed(record.profit())
    );
}

pub async fn handle_photo(state: &AppState, cmd: PhotoCommand) -> Result<()> {
    match cmd {
        PhotoCommand::Attach { date, item, file } => {
            let mut record = state.record_service.get_record(&DailyRecord::id_for_date(date)).await?;
            let bytes = fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;
            let data_url = bill_photo::compress_bill_photo(&bytes)?;
            record_service::set_bill_photo(&mut record, &item, Some(data_url))?;
            save_edit(state, record).await?;
            println!("Attached bill photo to {} on {}", item, date);
        }
        PhotoCommand::Export { date, item, output } => {
            let mut record = state.record_service.get_record(&DailyRecord::id_for_date(date)).await?;
            let photo = record
                .item_mut(&item)?
                .bill_photo
                .clone()
                .with_context(|| format!("{} on {} has no bill photo", item, date))?;
            let bytes = bill_photo::decode_data_url(&photo)?;
            fs::write(&output, bytes).with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote {}", output.display());
        }
        PhotoCommand::Remove { date, item } => {
            let mut record = state.record_service.get_record(&DailyRecord::id_for_date(date)).await?;
            record_service::clear_bill_photo(&mut record, &item)?;
            save_edit(state, record).await?;
            println!("Removed bill photo from {} on {}", item, date);
        }
    }
    Ok(())
}

async fn save_edit(state: &AppState, record: DailyRecord) -> Result<()> {
    state
        .record_service
        .save_record(SaveRecordCommand {
            record,
            is_new: false,
            overwrite: false,
        })
        .await?;
    Ok(())
}

pub async fn handle_backup(state: &AppState, cmd: BackupCommand) -> Result<()> {
    match cmd {
        BackupCommand::Export { output } => {
            let backup = state.backup_service.create_backup(today()).await?;
            let path = state
                .export_service
                .write_export(&backup.filename, &backup.json, output.as_deref())?;
            println!("Exported {} records to {}", backup.record_count, path.display());
        }
        BackupCommand::Import { file, yes } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let parsed = BackupService::<JsonConnection>::parse_backup(&text)?;
            print!("{}", render::render_preview(&BackupService::<JsonConnection>::preview(&parsed)));

            if !yes {
                println!("Nothing was changed. Re-run with --yes to import.");
                return Ok(());
            }
            let result = state.backup_service.restore(parsed).await?;
            println!("{}", result.success_message);
        }
    }
    Ok(())
}

pub async fn handle_export_csv(state: &AppState, output: Option<String>) -> Result<()> {
    let records = state.record_service.list_records(RecordListQuery::default()).await?;
    let export = state.export_service.export_csv(&records, today())?;
    let path = state
        .export_service
        .write_export(&export.filename, &export.csv_content, output.as_deref())?;
    println!("Exported {} records to {}", export.record_count, path.display());
    Ok(())
}

pub async fn handle_structure(state: &AppState, cmd: StructureCommand) -> Result<()> {
    match cmd {
        StructureCommand::Show => {
            let structure = state.structure_service.get_structure().await?;
            print!("{}", render::render_structure(&structure));
        }
        StructureCommand::AddItem { category, item } => {
            let item = item.trim();
            if item.is_empty() {
                bail!("Item name cannot be empty");
            }
            if state.structure_service.save_custom_item(&category, item).await? {
                println!("'{}' will be added to {} on new records", item, category);
            } else {
                println!("Nothing saved: '{}' is unknown or already lists '{}'", category, item);
            }
        }
    }
    Ok(())
}

pub fn handle_config(config: &AppConfig, config_path: Option<PathBuf>, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            print!("{}", config.to_yaml()?);
            println!("# data directory in use: {}", config.data_directory().display());
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(AppConfig::default_config_path);
            println!("{}", path.display());
        }
    }
    Ok(())
}
