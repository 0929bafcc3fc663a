//! Display strings for the search surface.

use std::collections::HashMap;

/// Language used when a key has no translation in the requested language.
pub const FALLBACK_LANG: &str = "en";

pub const LOADING: &str = "search.loading";
pub const EMPTY_QUERY: &str = "search.emptyQuery";
pub const NO_RESULTS: &str = "search.noResults";
pub const RESULTS_FOR: &str = "search.resultsFor";

/// Maps a language and key to a display string.
pub trait Messages: Send + Sync {
    fn lookup(&self, lang: &str, key: &str) -> String;
}

/// Built-in English and Chinese strings.
///
/// Unknown languages fall back to English; unknown keys come back verbatim.
#[derive(Debug)]
pub struct BuiltinMessages {
    table: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for BuiltinMessages {
    fn default() -> Self {
        let entries: [((&'static str, &'static str), &'static str); 8] = [
            (("en", LOADING), "Loading search index…"),
            (("en", EMPTY_QUERY), "Type something to search the docs."),
            (("en", NO_RESULTS), "No results found."),
            (("en", RESULTS_FOR), "Results for"),
            (("zh", LOADING), "正在加载搜索索引…"),
            (("zh", EMPTY_QUERY), "输入关键词搜索文档。"),
            (("zh", NO_RESULTS), "未找到结果。"),
            (("zh", RESULTS_FOR), "搜索结果"),
        ];
        let mut table: HashMap<&'static str, HashMap<&'static str, &'static str>> = HashMap::new();
        for ((lang, key), text) in entries {
            table.entry(lang).or_default().insert(key, text);
        }
        Self { table }
    }
}

impl Messages for BuiltinMessages {
    fn lookup(&self, lang: &str, key: &str) -> String {
        let find = |lang: &str| self.table.get(lang).and_then(|keys| keys.get(key));
        find(lang)
            .or_else(|| find(FALLBACK_LANG))
            .map_or_else(|| key.to_string(), |s| (*s).to_string())
    }
}
