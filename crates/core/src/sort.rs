use serde::Serialize;

use crate::normalize::normalize_key;
use crate::resolve::ResolvedItem;

/// Sort key of an entry. `Unranked` orders after every `Ranked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Ranked(usize),
    Unranked,
}

impl Rank {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Ranked(index) => Some(index),
            Self::Unranked => None,
        }
    }
}

/// Output line of a sorted shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingEntry {
    pub text: String,
    pub section: Option<String>,
    pub rank: Rank,
    /// Index in the input list
    pub position: usize,
}

/// Rank of `section` within `sections`; missing or unknown sections are
/// unranked.
pub fn rank_of(section: Option<&str>, sections: &[String]) -> Rank {
    section
        .map(normalize_key)
        .and_then(|key| sections.iter().position(|s| *s == key))
        .map_or(Rank::Unranked, Rank::Ranked)
}

/// Order resolved items by section rank.
///
/// The sort is stable: items sharing a rank keep their input order. Neither
/// the input nor the section list is modified.
pub fn sort_entries(resolved: &[ResolvedItem], sections: &[String]) -> Vec<ShoppingEntry> {
    let mut entries: Vec<ShoppingEntry> = resolved
        .iter()
        .map(|item| ShoppingEntry {
            text: item.display.clone(),
            section: item.section.clone(),
            rank: rank_of(item.section.as_deref(), sections),
            position: item.position,
        })
        .collect();
    entries.sort_by_key(|entry| entry.rank);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Resolution;
    use pretty_assertions::assert_eq;

    fn item(position: usize, display: &str, section: Option<&str>) -> ResolvedItem {
        ResolvedItem {
            position,
            display: display.to_string(),
            section: section.map(str::to_string),
            resolution: if section.is_some() {
                Resolution::Exact
            } else {
                Resolution::Unranked
            },
            save_failure: None,
        }
    }

    fn sections() -> Vec<String> {
        vec!["fruit and veg".to_string(), "dairy".to_string()]
    }

    fn texts(entries: &[ShoppingEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn unranked_sorts_last() {
        assert!(Rank::Ranked(usize::MAX) < Rank::Unranked);
        assert_eq!(rank_of(None, &sections()), Rank::Unranked);
        assert_eq!(rank_of(Some("Dairy"), &sections()), Rank::Ranked(1));
        assert_eq!(rank_of(Some("bakery"), &sections()), Rank::Unranked);
    }

    #[test]
    fn orders_by_section_rank() {
        let resolved = vec![
            item(0, "Milk", Some("dairy")),
            item(1, "Broccoli", Some("fruit and veg")),
        ];
        let sorted = sort_entries(&resolved, &sections());
        assert_eq!(texts(&sorted), vec!["Broccoli", "Milk"]);
        assert_eq!(sorted[0].rank, Rank::Ranked(0));
        assert_eq!(sorted[1].position, 0);
    }

    #[test]
    fn equal_ranks_keep_input_order() {
        let resolved = vec![
            item(0, "yeast", None),
            item(1, "Milk", Some("dairy")),
            item(2, "croissant", Some("bakery")),
            item(3, "Cream", Some("dairy")),
            item(4, "Apples", Some("fruit and veg")),
            item(5, "Butter", Some("dairy")),
        ];
        let sorted = sort_entries(&resolved, &sections());
        assert_eq!(
            texts(&sorted),
            vec!["Apples", "Milk", "Cream", "Butter", "yeast", "croissant"]
        );
    }

    #[test]
    fn input_is_not_modified() {
        let resolved = vec![item(0, "Milk", Some("dairy")), item(1, "Kale", None)];
        let copy = resolved.clone();
        let _ = sort_entries(&resolved, &sections());
        assert_eq!(resolved, copy);
    }
}
