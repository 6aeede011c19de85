//! Company directory and symbol search.
//!
//! A read-only symbol-to-name table constructed at startup and shared
//! through application state. Lookup is a simple case-insensitive prefix
//! search over both the symbol and the company name.

use serde::{Deserialize, Serialize};

/// Maximum matches returned by a search.
const MAX_MATCHES: usize = 10;

/// Built-in coverage: large caps plus a handful of NSE listings.
const COMPANIES: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("TSLA", "Tesla Inc."),
    ("META", "Meta Platforms Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("JPM", "JPMorgan Chase & Co."),
    ("JNJ", "Johnson & Johnson"),
    ("V", "Visa Inc."),
    ("BRK-B", "Berkshire Hathaway Inc."),
    ("UNH", "UnitedHealth Group Incorporated"),
    ("XOM", "Exxon Mobil Corporation"),
    ("WMT", "Walmart Inc."),
    ("PG", "The Procter & Gamble Company"),
    ("RELIANCE.NS", "Reliance Industries Limited"),
    ("TCS.NS", "Tata Consultancy Services Limited"),
    ("HDFCBANK.NS", "HDFC Bank Limited"),
    ("INFY.NS", "Infosys Limited"),
    ("ICICIBANK.NS", "ICICI Bank Limited"),
    ("INTC", "Intel Corporation"),
];

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub symbol: String,
    pub company: String,
}

/// Read-only company directory.
pub struct Directory {
    entries: Vec<(String, String)>,
}

impl Directory {
    /// Directory over the built-in company table.
    pub fn new() -> Self {
        Self::with_entries(
            COMPANIES
                .iter()
                .map(|&(symbol, name)| (symbol.to_string(), name.to_string()))
                .collect(),
        )
    }

    /// Directory over a caller-supplied table.
    pub fn with_entries(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// All known symbols, in table order.
    pub fn symbols(&self) -> Vec<String> {
        self.entries.iter().map(|(symbol, _)| symbol.clone()).collect()
    }

    /// Company name for a symbol, case-insensitive.
    pub fn name_of(&self, symbol: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
            .map(|(_, name)| name.as_str())
    }

    /// Case-insensitive prefix search over symbols and company names.
    /// Returns at most ten matches in table order; an empty query matches
    /// nothing.
    pub fn search(&self, query: &str) -> Vec<SearchMatch> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|(symbol, name)| {
                symbol.to_lowercase().starts_with(&query)
                    || name.to_lowercase().starts_with(&query)
            })
            .take(MAX_MATCHES)
            .map(|(symbol, name)| SearchMatch {
                symbol: symbol.clone(),
                company: name.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let directory = Directory::new();
        assert_eq!(directory.name_of("aapl"), Some("Apple Inc."));
        assert_eq!(directory.name_of("AAPL"), Some("Apple Inc."));
        assert_eq!(directory.name_of("ZZZZ"), None);
    }

    #[test]
    fn test_search_by_symbol_prefix() {
        let directory = Directory::new();
        let matches = directory.search("AA");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].symbol, "AAPL");
    }

    #[test]
    fn test_search_by_name_prefix() {
        let directory = Directory::new();
        let matches = directory.search("micro");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].company, "Microsoft Corporation");
    }

    #[test]
    fn test_search_is_prefix_not_substring() {
        let directory = Directory::new();
        // "soft" appears inside "Microsoft" but is not a prefix.
        assert!(directory.search("soft").is_empty());
    }

    #[test]
    fn test_search_empty_query_matches_nothing() {
        let directory = Directory::new();
        assert!(directory.search("").is_empty());
        assert!(directory.search("   ").is_empty());
    }

    #[test]
    fn test_search_capped_at_ten() {
        let entries = (0..25)
            .map(|i| (format!("SYM{i}"), format!("Symmetry Corp {i}")))
            .collect();
        let directory = Directory::with_entries(entries);
        assert_eq!(directory.search("sym").len(), 10);
    }

    #[test]
    fn test_custom_table() {
        let directory =
            Directory::with_entries(vec![("ABC".to_string(), "Alphabet Soup Co.".to_string())]);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.name_of("abc"), Some("Alphabet Soup Co."));
    }
}
