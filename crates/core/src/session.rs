use crate::catalog::Catalog;
use crate::error::Result;
use crate::list_text::split_list;
use crate::resolve::{InteractionPort, ResolvedItem, Resolver};
use crate::sort::{sort_entries, ShoppingEntry};
use crate::store::KeyValueStore;

/// Result of sorting one shopping list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutcome {
    /// The list had no items
    NothingToSort,
    Sorted(SortReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortReport {
    /// Items in store order
    pub entries: Vec<ShoppingEntry>,
    /// Items in input order, with accepted substitutions applied
    pub processed: Vec<String>,
    pub resolved: Vec<ResolvedItem>,
}

impl SortReport {
    pub fn sorted_texts(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }

    pub fn unranked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.rank.index().is_none()).count()
    }

    /// Items whose learned mapping stayed in memory only, with the reason
    pub fn save_failures(&self) -> Vec<(&str, &str)> {
        self.resolved
            .iter()
            .filter_map(|item| {
                item.save_failure
                    .as_deref()
                    .map(|reason| (item.display.as_str(), reason))
            })
            .collect()
    }
}

/// Split `text`, resolve each item, then order by section
pub async fn sort_text<S, P>(
    resolver: &Resolver,
    catalog: &mut Catalog<S>,
    text: &str,
    port: &mut P,
) -> Result<SortOutcome>
where
    S: KeyValueStore,
    P: InteractionPort + ?Sized,
{
    sort_items(resolver, catalog, &split_list(text), port).await
}

pub async fn sort_items<S, P>(
    resolver: &Resolver,
    catalog: &mut Catalog<S>,
    items: &[String],
    port: &mut P,
) -> Result<SortOutcome>
where
    S: KeyValueStore,
    P: InteractionPort + ?Sized,
{
    if items.is_empty() {
        log::info!("Nothing to sort");
        return Ok(SortOutcome::NothingToSort);
    }

    let resolved = resolver.resolve(catalog, items, port).await?;
    let entries = sort_entries(&resolved, catalog.lexicon().sections());
    let processed = resolved.iter().map(|item| item.display.clone()).collect();
    log::debug!("Sorted {} items", entries.len());

    Ok(SortOutcome::Sorted(SortReport {
        entries,
        processed,
        resolved,
    }))
}
