/// Split free text into list items: one per line, trimmed, blanks dropped
pub fn split_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_trims_and_skips_blank_lines() {
        let text = "  Milk \n\n\tBroccoli\r\n   \noats";
        assert_eq!(split_list(text), vec!["Milk", "Broccoli", "oats"]);
    }

    #[test]
    fn blank_text_is_empty_list() {
        assert!(split_list("").is_empty());
        assert!(split_list(" \n \n").is_empty());
    }

    #[test]
    fn join_uses_newlines() {
        assert_eq!(join_list(["a", "b"]), "a\nb");
        assert_eq!(join_list(Vec::<String>::new()), "");
    }
}
