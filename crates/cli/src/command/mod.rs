use aisle_core::{Change, SaveOutcome};
use anyhow::{bail, Result};

use crate::port::confirm;

pub(crate) mod backup;
pub(crate) mod items;
pub(crate) mod sections;
pub(crate) mod sort;

/// Tell the user when a change stayed in memory only
pub(crate) fn report_save<T>(change: &Change<T>) {
    if let SaveOutcome::Failed(reason) = &change.save {
        eprintln!("warning: change not saved: {reason}");
    }
}

/// `--yes` short-circuits; otherwise ask on the terminal
pub(crate) async fn confirmed(yes: bool, question: String) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(confirm(question, false).await?)
}

/// Sections named on the command line must already exist
pub(crate) fn require_section(sections: &[String], name: &str) -> Result<String> {
    let key = aisle_core::normalize_key(name);
    if !sections.contains(&key) {
        bail!("unknown section '{key}' (add it with `aisle sections add`)");
    }
    Ok(key)
}
