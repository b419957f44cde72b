use aisle_core::{backup_file_name, ExportBundle};
use anyhow::{Context as AnyhowContext, Result};
use chrono::Utc;

use super::{confirmed, report_save};
use crate::{print_stdout, ExportArgs, ImportArgs, Session};

pub(crate) async fn export(session: &Session, args: ExportArgs) -> Result<()> {
    let now = Utc::now();
    let bundle = ExportBundle::from_lexicon(session.catalog.lexicon(), now);
    let path = args
        .output
        .unwrap_or_else(|| backup_file_name(now.date_naive()).into());

    tokio::fs::write(&path, bundle.to_json_pretty()?)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "Exported {} items and {} sections",
        bundle.item_count(),
        bundle.section_count()
    );
    print_stdout(&format!("Data exported to {}", path.display()))
}

pub(crate) async fn import(session: &mut Session, args: ImportArgs) -> Result<()> {
    let text = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("reading {}", args.file.display()))?;
    let bundle = ExportBundle::parse(&text)
        .with_context(|| format!("{} is not a valid backup file", args.file.display()))?;

    let question = format!(
        "This will replace your current data with {} items and {} sections. Continue?",
        bundle.item_count(),
        bundle.section_count()
    );
    if !confirmed(args.yes, question).await? {
        eprintln!("Import cancelled.");
        return Ok(());
    }

    let change = session.catalog.replace(bundle.to_lexicon()).await;
    report_save(&change);
    log::info!("Imported backup from {}", args.file.display());
    print_stdout(&format!(
        "Data imported: {} items and {} sections loaded.",
        bundle.item_count(),
        bundle.section_count()
    ))
}
