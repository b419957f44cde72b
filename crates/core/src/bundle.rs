use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AisleError, Result};
use crate::lexicon::Lexicon;

/// Version tag written into every export
pub const BUNDLE_VERSION: &str = "1.0";

/// Portable backup of a lexicon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub items: Vec<(String, String)>,
    pub sections: Vec<String>,
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub version: String,
}

impl ExportBundle {
    pub fn from_lexicon(lexicon: &Lexicon, now: DateTime<Utc>) -> Self {
        Self {
            items: lexicon
                .mappings()
                .map(|(item, section)| (item.to_string(), section.to_string()))
                .collect(),
            sections: lexicon.list_sections(),
            export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            version: BUNDLE_VERSION.to_string(),
        }
    }

    /// Parse a backup file.
    ///
    /// Anything that is not a JSON object carrying `items` and `sections`
    /// arrays is an [`AisleError::ImportFormat`].
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| AisleError::import_format(format!("not valid JSON: {err}")))?;
        let Some(object) = value.as_object() else {
            return Err(AisleError::import_format("expected a JSON object"));
        };
        for key in ["items", "sections"] {
            if !object.contains_key(key) {
                return Err(AisleError::import_format(format!("missing `{key}`")));
            }
        }

        let bundle: Self = serde_json::from_value(value)
            .map_err(|err| AisleError::import_format(err.to_string()))?;
        if bundle.version != BUNDLE_VERSION {
            log::warn!(
                "Backup version {:?} differs from {BUNDLE_VERSION}; importing anyway",
                bundle.version
            );
        }
        Ok(bundle)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn to_lexicon(&self) -> Lexicon {
        Lexicon::from_parts(self.items.iter().cloned(), self.sections.iter().cloned())
    }
}

/// `shopping-list-backup-YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("shopping-list-backup-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn lexicon() -> Lexicon {
        Lexicon::from_parts(
            vec![
                ("milk".to_string(), "dairy".to_string()),
                ("broccoli".to_string(), "fruit and veg".to_string()),
            ],
            vec!["fruit and veg".to_string(), "dairy".to_string()],
        )
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn export_uses_camel_case_fields() {
        let bundle = ExportBundle::from_lexicon(&lexicon(), noon());
        let json: Value = serde_json::from_str(&bundle.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["exportDate"], "2026-03-14T12:00:00.000Z");
        assert_eq!(json["items"][0], serde_json::json!(["milk", "dairy"]));
        assert_eq!(json["sections"][1], "dairy");
    }

    #[test]
    fn export_then_import_reproduces_lexicon() {
        let original = lexicon();
        let text = ExportBundle::from_lexicon(&original, noon())
            .to_json_pretty()
            .unwrap();
        let bundle = ExportBundle::parse(&text).unwrap();
        assert_eq!(bundle.item_count(), 2);
        assert_eq!(bundle.section_count(), 2);
        assert_eq!(bundle.to_lexicon(), original);
    }

    #[test]
    fn missing_keys_are_format_errors() {
        for text in [
            r#"{"sections": []}"#,
            r#"{"items": []}"#,
            r#"[1, 2, 3]"#,
            "not json",
        ] {
            let err = ExportBundle::parse(text).unwrap_err();
            assert!(matches!(err, AisleError::ImportFormat(_)), "{text}: {err}");
        }
    }

    #[test]
    fn wrong_shapes_are_format_errors() {
        let err = ExportBundle::parse(r#"{"items": [["milk"]], "sections": []}"#).unwrap_err();
        assert!(matches!(err, AisleError::ImportFormat(_)));
    }

    #[test]
    fn date_and_version_are_optional_on_import() {
        let bundle = ExportBundle::parse(r#"{"items": [], "sections": ["dairy"]}"#).unwrap();
        assert_eq!(bundle.sections, vec!["dairy"]);
        assert!(bundle.export_date.is_empty());
    }

    #[test]
    fn backup_name_carries_the_date() {
        assert_eq!(
            backup_file_name(noon().date_naive()),
            "shopping-list-backup-2026-03-14.json"
        );
    }
}
