use std::collections::HashMap;

use crate::error::{AisleError, Result};
use crate::normalize::normalize_key;

/// Where a new section lands in the section order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionPosition {
    /// Most recently added sections are usually the ones in use
    #[default]
    Front,
    Back,
    /// Clamped to the end of the order
    At(usize),
}

/// Result of [`Lexicon::insert_section`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionInsert {
    Inserted { index: usize },
    AlreadyExists { index: usize },
}

/// Filter for [`Lexicon::list_items`]
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Case-insensitive substring match on the item key
    pub search: Option<String>,
    /// Exact (normalized) section match
    pub section: Option<String>,
}

/// Item to section dictionary plus the ordered section list.
///
/// Keys and section names are stored normalized. Item keys keep their
/// insertion order because fuzzy matching breaks ties by first-seen
/// candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    item_sections: HashMap<String, String>,
    item_order: Vec<String>,
    sections: Vec<String>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw parts, normalizing every name.
    ///
    /// Blank keys or sections are dropped, later duplicate items overwrite
    /// earlier ones in place, and duplicate sections keep their first slot.
    pub fn from_parts<I, S>(items: I, sections: S) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
        S: IntoIterator<Item = String>,
    {
        let mut lexicon = Self::new();
        for name in sections {
            let key = normalize_key(&name);
            if !key.is_empty() && !lexicon.sections.contains(&key) {
                lexicon.sections.push(key);
            }
        }
        for (item, section) in items {
            if let Err(err) = lexicon.set_mapping(&item, &section) {
                log::debug!("Skipping mapping {item:?} -> {section:?}: {err}");
            }
        }
        lexicon
    }

    // ── Lookup ──

    /// Exact, case-normalized lookup
    pub fn lookup_section(&self, item: &str) -> Option<&str> {
        self.item_sections
            .get(&normalize_key(item))
            .map(String::as_str)
    }

    pub fn contains_item(&self, item: &str) -> bool {
        self.item_sections.contains_key(&normalize_key(item))
    }

    /// Item keys in insertion order
    pub fn item_keys(&self) -> impl Iterator<Item = &str> {
        self.item_order.iter().map(String::as_str)
    }

    /// `(item, section)` pairs in insertion order
    pub fn mappings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.item_order.iter().filter_map(|key| {
            self.item_sections
                .get(key)
                .map(|section| (key.as_str(), section.as_str()))
        })
    }

    pub fn item_count(&self) -> usize {
        self.item_order.len()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Owned copy of the section order
    pub fn list_sections(&self) -> Vec<String> {
        self.sections.clone()
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section_index(name).is_some()
    }

    /// Position of `name` in the section order
    pub fn section_index(&self, name: &str) -> Option<usize> {
        let key = normalize_key(name);
        self.sections.iter().position(|s| *s == key)
    }

    // ── Item mappings ──

    /// Upsert `item -> section`. An existing key keeps its position.
    ///
    /// Returns `true` when the stored value changed.
    pub fn set_mapping(&mut self, item: &str, section: &str) -> Result<bool> {
        let key = normalize_key(item);
        let section = normalize_key(section);
        if key.is_empty() {
            return Err(AisleError::validation("item name must not be empty"));
        }
        if section.is_empty() {
            return Err(AisleError::validation("section name must not be empty"));
        }

        match self.item_sections.get_mut(&key) {
            Some(current) if *current == section => Ok(false),
            Some(current) => {
                *current = section;
                Ok(true)
            }
            None => {
                self.item_order.push(key.clone());
                self.item_sections.insert(key, section);
                Ok(true)
            }
        }
    }

    /// Remove an item mapping. Returns `false` if the item was unknown.
    pub fn remove_mapping(&mut self, item: &str) -> bool {
        let key = normalize_key(item);
        if self.item_sections.remove(&key).is_none() {
            return false;
        }
        self.item_order.retain(|k| *k != key);
        true
    }

    /// Add a new item; rejects blanks and keys that already exist
    pub fn add_item(&mut self, item: &str, section: &str) -> Result<()> {
        let key = normalize_key(item);
        if key.is_empty() {
            return Err(AisleError::validation("item name must not be empty"));
        }
        if self.item_sections.contains_key(&key) {
            return Err(AisleError::validation(format!(
                "item '{key}' already exists"
            )));
        }
        self.set_mapping(&key, section).map(|_| ())
    }

    /// Rename and/or re-section an existing item.
    ///
    /// Returns `Ok(false)` when `old` is unknown. The edited item moves to
    /// the end of the insertion order unless only its section changed.
    pub fn edit_item(&mut self, old: &str, new_name: &str, new_section: Option<&str>) -> Result<bool> {
        let old_key = normalize_key(old);
        let new_key = normalize_key(new_name);
        if new_key.is_empty() {
            return Err(AisleError::validation("item name must not be empty"));
        }
        let Some(current) = self.item_sections.get(&old_key).cloned() else {
            return Ok(false);
        };
        if new_key != old_key && self.item_sections.contains_key(&new_key) {
            return Err(AisleError::validation(format!(
                "item '{new_key}' already exists"
            )));
        }
        let section = match new_section {
            Some(section) if normalize_key(section).is_empty() => {
                return Err(AisleError::validation("section name must not be empty"));
            }
            Some(section) => normalize_key(section),
            None => current,
        };

        if new_key != old_key {
            self.remove_mapping(&old_key);
        }
        self.set_mapping(&new_key, &section)?;
        Ok(true)
    }

    /// Mappings sorted alphabetically by key, narrowed by `filter`
    pub fn list_items(&self, filter: &ItemFilter) -> Vec<(String, String)> {
        let search = filter
            .search
            .as_deref()
            .map(normalize_key)
            .filter(|s| !s.is_empty());
        let section = filter
            .section
            .as_deref()
            .map(normalize_key)
            .filter(|s| !s.is_empty());

        let mut items: Vec<(String, String)> = self
            .mappings()
            .filter(|(item, _)| search.as_deref().map_or(true, |s| item.contains(s)))
            .filter(|(_, sec)| section.as_deref().map_or(true, |s| *sec == s))
            .map(|(item, sec)| (item.to_string(), sec.to_string()))
            .collect();
        items.sort_by(|a, b| a.0.cmp(&b.0));
        items
    }

    /// Items grouped per section, in section order. Empty sections and
    /// mappings to unlisted sections are left out.
    pub fn items_by_section(&self) -> Vec<(String, Vec<String>)> {
        let mut groups: HashMap<&str, Vec<String>> = HashMap::new();
        for (item, section) in self.mappings() {
            groups.entry(section).or_default().push(item.to_string());
        }
        self.sections
            .iter()
            .filter_map(|section| {
                groups
                    .remove(section.as_str())
                    .map(|items| (section.clone(), items))
            })
            .collect()
    }

    pub fn clear_items(&mut self) {
        self.item_sections.clear();
        self.item_order.clear();
    }

    // ── Sections ──

    /// Insert a section. Existing names (case-normalized) are reported,
    /// not duplicated.
    pub fn insert_section(&mut self, name: &str, position: SectionPosition) -> Result<SectionInsert> {
        let key = normalize_key(name);
        if key.is_empty() {
            return Err(AisleError::validation("section name must not be empty"));
        }
        if let Some(index) = self.sections.iter().position(|s| *s == key) {
            return Ok(SectionInsert::AlreadyExists { index });
        }
        let index = match position {
            SectionPosition::Front => 0,
            SectionPosition::Back => self.sections.len(),
            SectionPosition::At(index) => index.min(self.sections.len()),
        };
        self.sections.insert(index, key);
        Ok(SectionInsert::Inserted { index })
    }

    /// Re-label a section in place and re-point every item mapped to it.
    ///
    /// Returns `Ok(false)` when `old` is not in the section order.
    pub fn rename_section(&mut self, old: &str, new: &str) -> Result<bool> {
        let old_key = normalize_key(old);
        let new_key = normalize_key(new);
        if new_key.is_empty() {
            return Err(AisleError::validation("section name must not be empty"));
        }
        let Some(index) = self.sections.iter().position(|s| *s == old_key) else {
            return Ok(false);
        };
        if new_key == old_key {
            return Ok(true);
        }
        if self.sections.contains(&new_key) {
            return Err(AisleError::validation(format!(
                "section '{new_key}' already exists"
            )));
        }

        self.sections[index] = new_key.clone();
        for section in self.item_sections.values_mut() {
            if *section == old_key {
                *section = new_key.clone();
            }
        }
        Ok(true)
    }

    /// Remove a section and every item mapped to it.
    ///
    /// Returns the number of removed items, or `None` if the section was
    /// not in the order.
    pub fn delete_section(&mut self, name: &str) -> Option<usize> {
        let key = normalize_key(name);
        let index = self.sections.iter().position(|s| *s == key)?;
        self.sections.remove(index);

        let before = self.item_order.len();
        self.item_sections.retain(|_, section| *section != key);
        let remaining = &self.item_sections;
        self.item_order.retain(|item| remaining.contains_key(item));
        Some(before - self.item_order.len())
    }

    /// Replace the section order wholesale.
    ///
    /// The caller is responsible for passing a permutation of the current
    /// sections; names are only normalized.
    pub fn reorder_sections<I>(&mut self, new_order: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.sections = new_order
            .into_iter()
            .map(|name| normalize_key(name.as_ref()))
            .collect();
    }

    /// Drop the whole section order; items stay but become unranked
    pub fn clear_sections(&mut self) {
        self.sections.clear();
    }
}
