use crate::lexicon::Lexicon;

/// Section order used on first run, roughly following a store walk
pub const DEFAULT_SECTIONS: &[&str] = &[
    "fruit and veg",
    "cheese",
    "deli",
    "bread",
    "bakery",
    "seafood",
    "health",
    "household",
    "cereal",
    "spreads",
    "meat",
    "cookies",
    "snacks",
    "drinks",
    "frozen meat",
    "milk",
    "baking",
    "sauces",
    "dairy",
    "ice cream",
];

/// Starter item mappings
pub const DEFAULT_ITEMS: &[(&str, &str)] = &[
    ("broccoli", "fruit and veg"),
    ("cauliflower", "fruit and veg"),
    ("smoked meat", "deli"),
    ("bagels", "bread"),
    ("eclair", "bakery"),
    ("salmon", "seafood"),
    ("vitamin d", "health"),
    ("ziplock bags", "household"),
    ("froot loops", "cereal"),
    ("oats", "cereal"),
    ("ground beef", "meat"),
    ("oreos", "cookies"),
    ("chips", "snacks"),
    ("coke", "drinks"),
    ("fish sticks", "frozen meat"),
    ("milk", "milk"),
    ("flour", "baking"),
    ("pickles", "sauces"),
    ("greek yogurt", "dairy"),
    ("drumsticks", "ice cream"),
];

pub fn default_sections() -> Vec<String> {
    DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect()
}

pub fn default_items() -> Vec<(String, String)> {
    DEFAULT_ITEMS
        .iter()
        .map(|(item, section)| (item.to_string(), section.to_string()))
        .collect()
}

pub fn default_lexicon() -> Lexicon {
    Lexicon::from_parts(default_items(), default_sections())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_item_points_at_a_default_section() {
        let lexicon = default_lexicon();
        assert_eq!(lexicon.item_count(), DEFAULT_ITEMS.len());
        assert_eq!(lexicon.section_count(), DEFAULT_SECTIONS.len());
        for (item, section) in lexicon.mappings() {
            assert!(lexicon.has_section(section), "{item} -> {section}");
        }
    }
}
