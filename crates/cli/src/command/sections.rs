use aisle_core::{normalize_key, SectionInsert, SectionPosition};
use anyhow::{bail, Result};
use std::collections::HashSet;

use super::{confirmed, report_save};
use crate::{print_stdout, SectionsCommand, Session};

pub(crate) async fn run(session: &mut Session, cmd: SectionsCommand) -> Result<()> {
    let catalog = &mut session.catalog;
    match cmd {
        SectionsCommand::List => {
            let lines: Vec<String> = catalog
                .lexicon()
                .sections()
                .iter()
                .enumerate()
                .map(|(index, name)| format!("{:>3}  {name}", index + 1))
                .collect();
            if !lines.is_empty() {
                print_stdout(&lines.join("\n"))?;
            }
        }
        SectionsCommand::Add { name, at, back } => {
            let position = match (at, back) {
                (Some(index), _) => SectionPosition::At(index),
                (None, true) => SectionPosition::Back,
                (None, false) => SectionPosition::Front,
            };
            let change = catalog.insert_section(&name, position).await?;
            report_save(&change);
            match change.value {
                SectionInsert::Inserted { .. } => {
                    print_stdout(&format!("Section '{}' added.", normalize_key(&name)))?
                }
                SectionInsert::AlreadyExists { .. } => {
                    bail!("section '{}' already exists", normalize_key(&name))
                }
            }
        }
        SectionsCommand::Rename { old, new } => {
            let change = catalog.rename_section(&old, &new).await?;
            report_save(&change);
            if change.value {
                print_stdout(&format!(
                    "Section renamed from '{}' to '{}'.",
                    normalize_key(&old),
                    normalize_key(&new)
                ))?;
            } else {
                eprintln!("No section named '{}'.", normalize_key(&old));
            }
        }
        SectionsCommand::Delete { name, yes } => {
            let key = normalize_key(&name);
            if !catalog.lexicon().has_section(&key) {
                eprintln!("No section named '{key}'.");
                return Ok(());
            }
            if !confirmed(yes, format!("Delete section '{key}' and its items?")).await? {
                return Ok(());
            }
            let change = catalog.delete_section(&key).await;
            report_save(&change);
            let removed = change.value.unwrap_or(0);
            print_stdout(&format!("Section '{key}' deleted ({removed} item(s) removed)."))?;
        }
        SectionsCommand::Reorder { names } => {
            let order: Vec<String> = names.iter().map(|n| normalize_key(n)).collect();
            check_permutation(catalog.lexicon().sections(), &order)?;
            let change = catalog.reorder_sections(&order).await;
            report_save(&change);
            print_stdout("Section order saved.")?;
        }
        SectionsCommand::Clear { yes } => {
            if !confirmed(yes, "Remove every section?".to_string()).await? {
                return Ok(());
            }
            let change = catalog.clear_sections().await;
            report_save(&change);
            print_stdout(&format!("{} section(s) removed.", change.value))?;
        }
    }
    Ok(())
}

/// `new_order` must contain every current section exactly once
fn check_permutation(current: &[String], new_order: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in new_order {
        if !seen.insert(name.as_str()) {
            bail!("section '{name}' listed twice");
        }
        if !current.contains(name) {
            bail!("unknown section '{name}'");
        }
    }
    let missing: Vec<&str> = current
        .iter()
        .filter(|name| !seen.contains(name.as_str()))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        bail!("missing sections: {}", missing.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn permutation_is_accepted() {
        let current = names(&["produce", "dairy", "bakery"]);
        assert!(check_permutation(&current, &names(&["dairy", "bakery", "produce"])).is_ok());
    }

    #[test]
    fn duplicates_unknowns_and_gaps_are_rejected() {
        let current = names(&["produce", "dairy"]);
        let err = check_permutation(&current, &names(&["dairy", "dairy"])).unwrap_err();
        assert!(err.to_string().contains("twice"));
        let err = check_permutation(&current, &names(&["dairy", "deli"])).unwrap_err();
        assert!(err.to_string().contains("unknown section 'deli'"));
        let err = check_permutation(&current, &names(&["dairy"])).unwrap_err();
        assert!(err.to_string().contains("missing sections: produce"));
    }
}
