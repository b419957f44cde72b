/// Normalize an item or section name for use as a dictionary key.
///
/// Trims surrounding whitespace and lower-cases the rest. Display text keeps
/// its original casing; only keys go through here.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_folds_case() {
        assert_eq!(normalize_key("  Greek Yogurt \t"), "greek yogurt");
        assert_eq!(normalize_key("MILK"), "milk");
    }

    #[test]
    fn keeps_inner_whitespace() {
        assert_eq!(normalize_key("fruit  and veg"), "fruit  and veg");
    }

    #[test]
    fn blank_becomes_empty() {
        assert_eq!(normalize_key("   "), "");
    }
}
