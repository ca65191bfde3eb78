use std::collections::HashMap;
use lazy_static::lazy_static;

/// Language used when none is set or the requested one has no entry
pub const DEFAULT_LANG: &str = "de";

lazy_static! {
    static ref DICTIONARY: HashMap<&'static str, HashMap<&'static str, &'static str>> = {
        let mut dictionary = HashMap::new();

        let mut toc = HashMap::new();
        toc.insert("de", "Inhaltsverzeichnis");
        toc.insert("en", "Table Of Contents");
        dictionary.insert("toc", toc);

        dictionary
    };
}

/// Look up a UI label. Unknown keys yield `"undefined"`.
pub fn translate(key: &str, lang: &str) -> String {
    let entry = match DICTIONARY.get(key) {
        Some(entry) => entry,
        None => return "undefined".to_string(),
    };

    let lang = if lang.trim().is_empty() { DEFAULT_LANG } else { lang };
    entry
        .get(lang)
        .or_else(|| entry.get(DEFAULT_LANG))
        .map(|label| label.to_string())
        .unwrap_or_else(|| "undefined".to_string())
}

/// Whether the dictionary has labels for a language
pub fn is_supported_lang(lang: &str) -> bool {
    DICTIONARY.values().any(|entry| entry.contains_key(lang))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate() {
        assert_eq!(translate("toc", "de"), "Inhaltsverzeichnis");
        assert_eq!(translate("toc", "en"), "Table Of Contents");
        assert_eq!(translate("toc", ""), "Inhaltsverzeichnis");
        assert_eq!(translate("toc", "fr"), "Inhaltsverzeichnis");
        assert_eq!(translate("missing", "en"), "undefined");
    }

    #[test]
    fn test_supported_langs() {
        assert!(is_supported_lang("en"));
        assert!(!is_supported_lang("fr"));
    }
}
