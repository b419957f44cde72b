//! Per-item section resolution.
//!
//! ```text
//! raw item
//!     │
//!     ├──> ExactLookup ─────────────── hit ──> resolved (no port call)
//!     │
//!     ├──> FuzzySuggest ── accepted ─────────> resolved via matched key
//!     │        │                                (display text substituted)
//!     │        └─ rejected / no match
//!     │
//!     └──> AssignSection ── section ─────────> mapping written, resolved
//!              └─────────── cancelled ───────> unranked, lexicon untouched
//! ```
//!
//! Items are resolved strictly one after another: a decision for one item
//! can add mappings or sections that later items in the same list see.

use async_trait::async_trait;

use crate::catalog::{Catalog, SaveOutcome};
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::lexicon::{SectionInsert, SectionPosition};
use crate::normalize::normalize_key;
use crate::similarity::best_match_above;
use crate::store::KeyValueStore;

/// Answer to [`InteractionPort::choose_section`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionChoice {
    /// One of the known sections
    Existing(String),
    /// A section the user typed in; inserted at the front if missing
    CreateNew(String),
    /// Leave the item unranked for this run
    Cancelled,
}

/// Where the engine asks a human for decisions.
///
/// Calls may wait indefinitely. An `Err` aborts the remaining items; mappings
/// already confirmed for earlier items stay in the lexicon.
#[async_trait]
pub trait InteractionPort: Send {
    /// Should `original` be replaced by the known item `suggested`?
    async fn confirm_substitution(&mut self, original: &str, suggested: &str) -> Result<bool>;

    /// Pick a section for an unknown item
    async fn choose_section(
        &mut self,
        item: &str,
        known_sections: &[String],
    ) -> Result<SectionChoice>;
}

#[async_trait]
impl<P: InteractionPort + ?Sized> InteractionPort for Box<P> {
    async fn confirm_substitution(&mut self, original: &str, suggested: &str) -> Result<bool> {
        (**self).confirm_substitution(original, suggested).await
    }

    async fn choose_section(
        &mut self,
        item: &str,
        known_sections: &[String],
    ) -> Result<SectionChoice> {
        (**self).choose_section(item, known_sections).await
    }
}

/// How an item got (or did not get) its section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Already in the lexicon
    Exact,
    /// Replaced by a similar known item; `original` is the input text
    Substituted { original: String },
    /// Section picked through the port and written to the lexicon
    Assigned { created_section: bool },
    /// No section this run
    Unranked,
}

/// One input item after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    /// Index in the input list
    pub position: usize,
    /// Text to show: the original input, or the matched key after a
    /// substitution
    pub display: String,
    pub section: Option<String>,
    pub resolution: Resolution,
    /// Set when a mapping or section learned for this item could not be
    /// written to the store
    pub save_failure: Option<String>,
}

/// Drives each raw item through lookup, suggestion and assignment
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolve `items` in order, writing confirmed mappings through
    /// `catalog`.
    pub async fn resolve<S, P>(
        &self,
        catalog: &mut Catalog<S>,
        items: &[String],
        port: &mut P,
    ) -> Result<Vec<ResolvedItem>>
    where
        S: KeyValueStore,
        P: InteractionPort + ?Sized,
    {
        let mut resolved = Vec::with_capacity(items.len());
        for (position, raw) in items.iter().enumerate() {
            resolved.push(self.resolve_one(catalog, position, raw, port).await?);
        }
        Ok(resolved)
    }

    async fn resolve_one<S, P>(
        &self,
        catalog: &mut Catalog<S>,
        position: usize,
        raw: &str,
        port: &mut P,
    ) -> Result<ResolvedItem>
    where
        S: KeyValueStore,
        P: InteractionPort + ?Sized,
    {
        let display = raw.trim().to_string();
        let key = normalize_key(raw);

        if let Some(section) = catalog.lexicon().lookup_section(&key) {
            log::debug!("{display:?}: exact match -> {section}");
            return Ok(ResolvedItem {
                position,
                display,
                section: Some(section.to_string()),
                resolution: Resolution::Exact,
                save_failure: None,
            });
        }

        if let Some(item) = self.suggest(catalog, position, &display, &key, port).await? {
            return Ok(item);
        }

        self.assign(catalog, position, display, &key, port).await
    }

    async fn suggest<S, P>(
        &self,
        catalog: &Catalog<S>,
        position: usize,
        display: &str,
        key: &str,
        port: &mut P,
    ) -> Result<Option<ResolvedItem>>
    where
        S: KeyValueStore,
        P: InteractionPort + ?Sized,
    {
        if !self.config.fuzzy_enabled {
            return Ok(None);
        }
        let lexicon = catalog.lexicon();
        let Some(found) = best_match_above(key, lexicon.item_keys(), self.config.similarity_threshold)
        else {
            log::debug!("{display:?}: no similar item");
            return Ok(None);
        };
        let suggested = found.candidate.to_string();
        let section = lexicon.lookup_section(&suggested).map(str::to_string);

        log::debug!(
            "{display:?}: suggesting {suggested:?} (similarity {:.3})",
            found.score
        );
        if !port.confirm_substitution(display, &suggested).await? {
            log::debug!("{display:?}: suggestion {suggested:?} rejected");
            return Ok(None);
        }

        Ok(Some(ResolvedItem {
            position,
            display: suggested,
            section,
            resolution: Resolution::Substituted {
                original: display.to_string(),
            },
            save_failure: None,
        }))
    }

    async fn assign<S, P>(
        &self,
        catalog: &mut Catalog<S>,
        position: usize,
        display: String,
        key: &str,
        port: &mut P,
    ) -> Result<ResolvedItem>
    where
        S: KeyValueStore,
        P: InteractionPort + ?Sized,
    {
        let unranked = |display: String| ResolvedItem {
            position,
            display,
            section: None,
            resolution: Resolution::Unranked,
            save_failure: None,
        };

        let known = catalog.lexicon().list_sections();
        let (section, create) = match port.choose_section(&display, &known).await? {
            SectionChoice::Existing(section) => (section, false),
            SectionChoice::CreateNew(section) => (section, true),
            SectionChoice::Cancelled => {
                log::debug!("{display:?}: section choice cancelled");
                return Ok(unranked(display));
            }
        };

        let mut created_section = false;
        let mut save_failure = None;
        if create {
            match catalog.insert_section(&section, SectionPosition::Front).await {
                Ok(change) => {
                    created_section = matches!(change.value, SectionInsert::Inserted { .. });
                    if let SaveOutcome::Failed(reason) = change.save {
                        save_failure = Some(reason);
                    }
                }
                Err(err) => {
                    log::warn!("{display:?}: cannot create section {section:?}: {err}");
                    return Ok(unranked(display));
                }
            }
        } else if !catalog.lexicon().has_section(&section) {
            log::warn!("{display:?}: section {section:?} is not in the section order");
        }

        match catalog.set_mapping(key, &section).await {
            Ok(change) => {
                if let SaveOutcome::Failed(reason) = change.save {
                    save_failure.get_or_insert(reason);
                }
            }
            Err(err) => {
                log::warn!("{display:?}: cannot map to {section:?}: {err}");
                return Ok(unranked(display));
            }
        }
        let section = normalize_key(&section);
        log::debug!("{display:?}: assigned -> {section}");

        Ok(ResolvedItem {
            position,
            display,
            section: Some(section),
            resolution: Resolution::Assigned { created_section },
            save_failure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::store::MemoryStore;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        confirms: VecDeque<bool>,
        choices: VecDeque<SectionChoice>,
        calls: Vec<String>,
    }

    #[async_trait]
    impl InteractionPort for Scripted {
        async fn confirm_substitution(&mut self, original: &str, suggested: &str) -> Result<bool> {
            self.calls.push(format!("confirm {original} -> {suggested}"));
            Ok(self.confirms.pop_front().unwrap_or(false))
        }

        async fn choose_section(
            &mut self,
            item: &str,
            _known_sections: &[String],
        ) -> Result<SectionChoice> {
            self.calls.push(format!("choose {item}"));
            Ok(self.choices.pop_front().unwrap_or(SectionChoice::Cancelled))
        }
    }

    fn catalog() -> Catalog<MemoryStore> {
        Catalog::with_lexicon(
            MemoryStore::new(),
            Lexicon::from_parts(
                vec![("broccoli".to_string(), "fruit and veg".to_string())],
                vec!["fruit and veg".to_string(), "dairy".to_string()],
            ),
        )
    }

    fn items(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn known_items_never_reach_the_port() {
        let mut catalog = catalog();
        let before = catalog.lexicon().clone();
        let mut port = Scripted::default();

        let resolved = Resolver::default()
            .resolve(&mut catalog, &items(&["BROCCOLI", " broccoli "]), &mut port)
            .await
            .unwrap();

        assert!(port.calls.is_empty());
        assert_eq!(catalog.lexicon(), &before);
        assert!(resolved.iter().all(|r| r.resolution == Resolution::Exact));
        assert_eq!(resolved[1].display, "broccoli");
    }

    #[tokio::test]
    async fn rejected_suggestion_falls_through_to_assignment() {
        let mut catalog = catalog();
        let mut port = Scripted {
            confirms: VecDeque::from([false]),
            choices: VecDeque::from([SectionChoice::Existing("fruit and veg".to_string())]),
            ..Default::default()
        };

        let resolved = Resolver::default()
            .resolve(&mut catalog, &items(&["Brocoli"]), &mut port)
            .await
            .unwrap();

        assert_eq!(
            port.calls,
            vec!["confirm Brocoli -> broccoli", "choose Brocoli"]
        );
        assert_eq!(resolved[0].display, "Brocoli");
        assert_eq!(
            resolved[0].resolution,
            Resolution::Assigned {
                created_section: false
            }
        );
        assert_eq!(
            catalog.lexicon().lookup_section("brocoli"),
            Some("fruit and veg")
        );
    }

    #[tokio::test]
    async fn create_new_inserts_section_at_front() {
        let mut catalog = catalog();
        let mut port = Scripted {
            choices: VecDeque::from([SectionChoice::CreateNew("Bakery".to_string())]),
            ..Default::default()
        };

        let resolved = Resolver::default()
            .resolve(&mut catalog, &items(&["Croissant"]), &mut port)
            .await
            .unwrap();

        assert_eq!(resolved[0].section.as_deref(), Some("bakery"));
        assert_eq!(
            resolved[0].resolution,
            Resolution::Assigned {
                created_section: true
            }
        );
        assert_eq!(catalog.lexicon().sections()[0], "bakery");
        assert_eq!(catalog.lexicon().lookup_section("croissant"), Some("bakery"));
    }

    #[tokio::test]
    async fn blank_section_answer_leaves_item_unranked() {
        let mut catalog = catalog();
        let before = catalog.lexicon().clone();
        let mut port = Scripted {
            choices: VecDeque::from([SectionChoice::CreateNew("   ".to_string())]),
            ..Default::default()
        };

        let resolved = Resolver::default()
            .resolve(&mut catalog, &items(&["Yeast"]), &mut port)
            .await
            .unwrap();

        assert_eq!(resolved[0].resolution, Resolution::Unranked);
        assert_eq!(catalog.lexicon(), &before);
    }

    #[tokio::test]
    async fn earlier_decisions_feed_later_items() {
        let mut catalog = catalog();
        let mut port = Scripted {
            choices: VecDeque::from([SectionChoice::Existing("dairy".to_string())]),
            ..Default::default()
        };

        let resolved = Resolver::default()
            .resolve(&mut catalog, &items(&["Butter", "butter"]), &mut port)
            .await
            .unwrap();

        assert_eq!(port.calls, vec!["choose Butter"]);
        assert_eq!(resolved[1].resolution, Resolution::Exact);
        assert_eq!(resolved[1].section.as_deref(), Some("dairy"));
    }

    #[tokio::test]
    async fn disabled_fuzzy_skips_confirmation() {
        let mut catalog = catalog();
        let mut port = Scripted::default();
        let resolver = Resolver::new(ResolverConfig {
            fuzzy_enabled: false,
            ..ResolverConfig::default()
        });

        resolver
            .resolve(&mut catalog, &items(&["Brocoli"]), &mut port)
            .await
            .unwrap();

        assert_eq!(port.calls, vec!["choose Brocoli"]);
    }
}
