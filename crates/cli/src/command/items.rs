use aisle_core::{normalize_key, ItemFilter};
use anyhow::Result;

use super::{confirmed, report_save, require_section};
use crate::{print_stdout, ItemsCommand, Session};

pub(crate) async fn run(session: &mut Session, cmd: ItemsCommand) -> Result<()> {
    let catalog = &mut session.catalog;
    match cmd {
        ItemsCommand::List { search, section } => {
            let items = catalog.lexicon().list_items(&ItemFilter { search, section });
            if items.is_empty() {
                eprintln!("No items found.");
                return Ok(());
            }
            let width = items.iter().map(|(item, _)| item.chars().count()).max().unwrap_or(0);
            let lines: Vec<String> = items
                .iter()
                .map(|(item, section)| format!("{item:<width$}  {section}"))
                .collect();
            print_stdout(&lines.join("\n"))?;
        }
        ItemsCommand::Grouped => {
            let mut out = Vec::new();
            for (section, items) in catalog.lexicon().items_by_section() {
                out.push(format!("{section}:"));
                out.extend(items.iter().map(|item| format!("  {item}")));
            }
            if !out.is_empty() {
                print_stdout(&out.join("\n"))?;
            }
        }
        ItemsCommand::Add { name, section } => {
            let section = require_section(catalog.lexicon().sections(), &section)?;
            let change = catalog.add_item(&name, &section).await?;
            report_save(&change);
            print_stdout(&format!("Item '{}' added to '{section}'.", name.trim()))?;
        }
        ItemsCommand::Edit { old, new, section } => {
            let section = match section {
                Some(section) => Some(require_section(catalog.lexicon().sections(), &section)?),
                None => None,
            };
            let change = catalog.edit_item(&old, &new, section.as_deref()).await?;
            report_save(&change);
            if change.value {
                print_stdout("Item updated.")?;
            } else {
                eprintln!("No item named '{}'.", normalize_key(&old));
            }
        }
        ItemsCommand::Delete { name, yes } => {
            let key = normalize_key(&name);
            if !catalog.lexicon().contains_item(&key) {
                eprintln!("No item named '{key}'.");
                return Ok(());
            }
            if !confirmed(yes, format!("Delete '{key}'?")).await? {
                return Ok(());
            }
            let change = catalog.remove_mapping(&key).await;
            report_save(&change);
            print_stdout(&format!("Item '{key}' deleted."))?;
        }
        ItemsCommand::Clear { yes } => {
            if !confirmed(yes, "Remove every item?".to_string()).await? {
                return Ok(());
            }
            let change = catalog.clear_items().await;
            report_save(&change);
            print_stdout(&format!("{} item(s) removed.", change.value))?;
        }
    }
    Ok(())
}
