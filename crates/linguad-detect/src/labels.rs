//! Built-in language catalog
//!
//! The reference model (jb2k/bert-base-multilingual-cased-language-detection)
//! ships placeholder labels (`LABEL_0` .. `LABEL_44`); this table fixes the
//! label-index-to-language mapping for it. The index into [`LANGUAGES`] is the
//! numeric suffix of the label.

/// Languages predicted by the reference model, ordered by label index.
///
/// "Ukranian" is spelled the way the model's label vocabulary spells it;
/// renaming it would change the wire contract.
pub const LANGUAGES: [&str; 45] = [
    "Arabic",
    "Basque",
    "Breton",
    "Catalan",
    "Chinese_China",
    "Chinese_Hongkong",
    "Chinese_Taiwan",
    "Chuvash",
    "Czech",
    "Dhivehi",
    "Dutch",
    "English",
    "Esperanto",
    "Estonian",
    "French",
    "Frisian",
    "Georgian",
    "German",
    "Greek",
    "Hakha_Chin",
    "Indonesian",
    "Interlingua",
    "Italian",
    "Japanese",
    "Kabyle",
    "Kinyarwanda",
    "Kyrgyz",
    "Latvian",
    "Maltese",
    "Mongolian",
    "Persian",
    "Polish",
    "Portuguese",
    "Romanian",
    "Romansh_Sursilvan",
    "Russian",
    "Sakha",
    "Slovenian",
    "Spanish",
    "Swedish",
    "Tamil",
    "Tatar",
    "Turkish",
    "Ukranian",
    "Welsh",
];

/// Resolve a placeholder label (`LABEL_{n}`) to its language name.
///
/// Returns `None` for labels outside the catalog or with a different shape.
pub fn language_for_label(label: &str) -> Option<&'static str> {
    let index: usize = label.strip_prefix("LABEL_")?.parse().ok()?;
    LANGUAGES.get(index).copied()
}

/// Whether a label set consists solely of `LABEL_{n}` placeholders
pub fn is_placeholder(label: &str) -> bool {
    label
        .strip_prefix("LABEL_")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_sorted_and_unique() {
        let mut sorted = LANGUAGES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.as_slice(), LANGUAGES.as_slice());
    }

    #[test]
    fn test_known_labels_resolve() {
        assert_eq!(language_for_label("LABEL_0"), Some("Arabic"));
        assert_eq!(language_for_label("LABEL_11"), Some("English"));
        assert_eq!(language_for_label("LABEL_44"), Some("Welsh"));
    }

    #[test]
    fn test_every_label_index_resolves() {
        for (index, language) in LANGUAGES.iter().enumerate() {
            assert_eq!(language_for_label(&format!("LABEL_{index}")), Some(*language));
        }
    }

    #[test]
    fn test_unknown_labels_do_not_resolve() {
        assert_eq!(language_for_label("LABEL_45"), None);
        assert_eq!(language_for_label("LABEL_"), None);
        assert_eq!(language_for_label("toxic"), None);
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder("LABEL_0"));
        assert!(is_placeholder("LABEL_44"));
        assert!(!is_placeholder("LABEL_"));
        assert!(!is_placeholder("LABEL_x"));
        assert!(!is_placeholder("English"));
    }
}
