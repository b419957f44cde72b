use aisle_core::{AisleError, InteractionPort, Result, SectionChoice};
use async_trait::async_trait;
use dialoguer::{Confirm, Input, Select};

const CREATE_NEW_LABEL: &str = "+ create new section";
const SKIP_LABEL: &str = "- skip (leave unsorted)";

/// Runs a blocking prompt off the async runtime
async fn prompt<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| AisleError::interaction(format!("prompt task failed: {err}")))?
        .map_err(|err| AisleError::interaction(err.to_string()))
}

/// Yes/no question on the terminal
pub async fn confirm(question: String, default: bool) -> Result<bool> {
    prompt(move || {
        Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()
    })
    .await
}

/// Asks the user on the terminal
#[derive(Debug, Default)]
pub struct TerminalPort;

#[async_trait]
impl InteractionPort for TerminalPort {
    async fn confirm_substitution(&mut self, original: &str, suggested: &str) -> Result<bool> {
        confirm(
            format!("Item '{original}' not found. Did you mean '{suggested}'?"),
            true,
        )
        .await
    }

    async fn choose_section(
        &mut self,
        item: &str,
        known_sections: &[String],
    ) -> Result<SectionChoice> {
        let mut options: Vec<String> = known_sections.to_vec();
        options.push(CREATE_NEW_LABEL.to_string());
        options.push(SKIP_LABEL.to_string());

        let question = format!("Select a section for: {item}");
        let picked = prompt(move || {
            Select::new()
                .with_prompt(question)
                .items(&options)
                .default(0)
                .interact_opt()
        })
        .await?;

        let Some(index) = picked else {
            return Ok(SectionChoice::Cancelled);
        };
        if index < known_sections.len() {
            return Ok(SectionChoice::Existing(known_sections[index].clone()));
        }
        if index > known_sections.len() {
            return Ok(SectionChoice::Cancelled);
        }

        let name: String = prompt(|| {
            Input::<String>::new()
                .with_prompt("New section name (empty to skip)")
                .allow_empty(true)
                .interact_text()
        })
        .await?;
        if name.trim().is_empty() {
            Ok(SectionChoice::Cancelled)
        } else {
            Ok(SectionChoice::CreateNew(name))
        }
    }
}

/// Non-interactive port: rejects every suggestion and skips every unknown
/// item, so nothing new is learned.
#[derive(Debug, Default)]
pub struct DecliningPort {
    pub skipped: Vec<String>,
}

#[async_trait]
impl InteractionPort for DecliningPort {
    async fn confirm_substitution(&mut self, original: &str, suggested: &str) -> Result<bool> {
        log::info!("'{original}' looks like '{suggested}'; not substituting");
        Ok(false)
    }

    async fn choose_section(
        &mut self,
        item: &str,
        _known_sections: &[String],
    ) -> Result<SectionChoice> {
        self.skipped.push(item.to_string());
        Ok(SectionChoice::Cancelled)
    }
}
