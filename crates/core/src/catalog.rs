use crate::defaults::{default_items, default_sections};
use crate::error::Result;
use crate::lexicon::{Lexicon, SectionInsert, SectionPosition};
use crate::store::KeyValueStore;

/// Record holding `[item, section]` pairs
pub const ITEMS_KEY: &str = "items";
/// Record holding the ordered section names
pub const SECTIONS_KEY: &str = "sections";

/// How persisting a change went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Nothing changed, nothing written
    Unchanged,
    /// The in-memory lexicon is updated but could not be written
    Failed(String),
}

impl SaveOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Outcome of a catalog mutation together with its persistence status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change<T> {
    pub value: T,
    pub save: SaveOutcome,
}

/// A [`Lexicon`] bound to the store it is loaded from and saved to.
///
/// Every mutation goes through here and is persisted right away. Store
/// failures are logged and reported in the returned [`Change`]; the
/// in-memory lexicon stays usable either way.
pub struct Catalog<S> {
    lexicon: Lexicon,
    store: S,
}

impl<S: KeyValueStore> Catalog<S> {
    /// Load both records from `store`, falling back to the built-in defaults
    /// (or empty lists when `seed_defaults` is off) for anything missing or
    /// unreadable.
    pub async fn load(store: S, seed_defaults: bool) -> Self {
        let items = match read_record::<Vec<(String, String)>>(&store, ITEMS_KEY).await {
            Some(items) => items,
            None if seed_defaults => default_items(),
            None => Vec::new(),
        };
        let sections = match read_record::<Vec<String>>(&store, SECTIONS_KEY).await {
            Some(sections) => sections,
            None if seed_defaults => default_sections(),
            None => Vec::new(),
        };
        let lexicon = Lexicon::from_parts(items, sections);
        log::debug!(
            "Loaded lexicon: {} items, {} sections",
            lexicon.item_count(),
            lexicon.section_count()
        );
        Self { lexicon, store }
    }

    /// Wrap an existing lexicon without reading the store
    pub fn with_lexicon(store: S, lexicon: Lexicon) -> Self {
        Self { lexicon, store }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write both records
    pub async fn persist(&self) -> SaveOutcome {
        match self.write_records().await {
            Ok(()) => SaveOutcome::Saved,
            Err(err) => {
                log::warn!("Failed to save lexicon: {err}");
                SaveOutcome::Failed(err.to_string())
            }
        }
    }

    async fn write_records(&self) -> Result<()> {
        let items: Vec<(&str, &str)> = self.lexicon.mappings().collect();
        let items = serde_json::to_string(&items)?;
        let sections = serde_json::to_string(self.lexicon.sections())?;
        self.store.set(ITEMS_KEY, &items).await?;
        self.store.set(SECTIONS_KEY, &sections).await?;
        Ok(())
    }

    async fn commit<T>(&self, value: T, changed: bool) -> Change<T> {
        let save = if changed {
            self.persist().await
        } else {
            SaveOutcome::Unchanged
        };
        Change { value, save }
    }

    // ── Item mappings ──

    pub async fn set_mapping(&mut self, item: &str, section: &str) -> Result<Change<()>> {
        let changed = self.lexicon.set_mapping(item, section)?;
        Ok(self.commit((), changed).await)
    }

    /// `value` is `false` when the item was unknown
    pub async fn remove_mapping(&mut self, item: &str) -> Change<bool> {
        let removed = self.lexicon.remove_mapping(item);
        if !removed {
            log::debug!("remove_mapping: no item {item:?}");
        }
        self.commit(removed, removed).await
    }

    pub async fn add_item(&mut self, item: &str, section: &str) -> Result<Change<()>> {
        self.lexicon.add_item(item, section)?;
        Ok(self.commit((), true).await)
    }

    /// `value` is `false` when `old` was unknown
    pub async fn edit_item(
        &mut self,
        old: &str,
        new_name: &str,
        new_section: Option<&str>,
    ) -> Result<Change<bool>> {
        let edited = self.lexicon.edit_item(old, new_name, new_section)?;
        Ok(self.commit(edited, edited).await)
    }

    pub async fn clear_items(&mut self) -> Change<usize> {
        let count = self.lexicon.item_count();
        self.lexicon.clear_items();
        self.commit(count, count > 0).await
    }

    // ── Sections ──

    pub async fn insert_section(
        &mut self,
        name: &str,
        position: SectionPosition,
    ) -> Result<Change<SectionInsert>> {
        let insert = self.lexicon.insert_section(name, position)?;
        let changed = matches!(insert, SectionInsert::Inserted { .. });
        Ok(self.commit(insert, changed).await)
    }

    /// `value` is `false` when `old` was not a known section
    pub async fn rename_section(&mut self, old: &str, new: &str) -> Result<Change<bool>> {
        let before = self.lexicon.list_sections();
        let renamed = self.lexicon.rename_section(old, new)?;
        let changed = renamed && before != self.lexicon.sections();
        Ok(self.commit(renamed, changed).await)
    }

    /// `value` is the number of cascaded item removals, `None` if the
    /// section was unknown
    pub async fn delete_section(&mut self, name: &str) -> Change<Option<usize>> {
        let removed = self.lexicon.delete_section(name);
        if removed.is_none() {
            log::debug!("delete_section: no section {name:?}");
        }
        self.commit(removed, removed.is_some()).await
    }

    pub async fn reorder_sections<I>(&mut self, new_order: I) -> Change<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.lexicon.reorder_sections(new_order);
        self.commit((), true).await
    }

    pub async fn clear_sections(&mut self) -> Change<usize> {
        let count = self.lexicon.section_count();
        self.lexicon.clear_sections();
        self.commit(count, count > 0).await
    }

    /// Swap in a whole new lexicon (used by import)
    pub async fn replace(&mut self, lexicon: Lexicon) -> Change<()> {
        self.lexicon = lexicon;
        self.commit((), true).await
    }
}

async fn read_record<T: serde::de::DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Option<T> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            log::error!("Error loading {key}: {err}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::error!("Error parsing {key}: {err}. Using defaults.");
            None
        }
    }
}
