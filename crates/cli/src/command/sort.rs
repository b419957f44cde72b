use aisle_core::{sort_text, InteractionPort, SortOutcome, SortReport};
use anyhow::{Context as AnyhowContext, Result};
use std::io::Read;

use crate::port::{DecliningPort, TerminalPort};
use crate::{print_stdout, Session, SortArgs};

pub(crate) async fn run(session: &mut Session, args: SortArgs) -> Result<()> {
    let text = match &args.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?,
        None => tokio::task::spawn_blocking(|| {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map(|_| buf)
        })
        .await?
        .context("reading shopping list from stdin")?,
    };

    let mut port: Box<dyn InteractionPort> = if args.no_prompt {
        Box::new(DecliningPort::default())
    } else {
        Box::new(TerminalPort)
    };

    let outcome = sort_text(&session.resolver, &mut session.catalog, &text, &mut port).await?;
    let report = match outcome {
        SortOutcome::NothingToSort => {
            eprintln!("Nothing to sort: the list is empty.");
            return Ok(());
        }
        SortOutcome::Sorted(report) => report,
    };

    print_stdout(&render(&report, &args)?)?;
    for (item, reason) in report.save_failures() {
        eprintln!("warning: section for '{item}' not saved: {reason}");
    }
    if report.unranked_count() > 0 {
        log::info!("{} item(s) left unsorted", report.unranked_count());
    }
    Ok(())
}

fn render(report: &SortReport, args: &SortArgs) -> Result<String> {
    if args.json {
        return Ok(serde_json::to_string_pretty(&report.entries)?);
    }
    let lines: Vec<String> = report
        .entries
        .iter()
        .map(|entry| {
            if args.show_sections {
                let section = entry.section.as_deref().unwrap_or("?");
                format!("[{section}] {}", entry.text)
            } else {
                entry.text.clone()
            }
        })
        .collect();
    Ok(aisle_core::join_list(lines))
}
