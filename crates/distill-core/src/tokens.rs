//! Token registry.
//!
//! Interns repeated style values (colors, font families, composed shadows)
//! and hands back short sequential identifiers (`c0`, `f0`, `s0`, …). One
//! registry lives for exactly one export; identifiers are issued in the order
//! values are first seen, so a fixed traversal order gives byte-identical
//! dictionaries across runs.

use indexmap::IndexMap;
use serde::Serialize;

/// Prefix written in front of a token identifier when it is referenced.
pub const TOKEN_REF_PREFIX: char = '$';

/// Kind of interned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Color,
    Font,
    Shadow,
}

impl TokenKind {
    /// Identifier prefix for this kind.
    pub fn prefix(&self) -> char {
        match self {
            TokenKind::Color => 'c',
            TokenKind::Font => 'f',
            TokenKind::Shadow => 's',
        }
    }

    /// Kind-specific normalization applied before interning.
    pub fn normalize(&self, value: &str) -> String {
        let trimmed = value.trim();
        match self {
            TokenKind::Color if trimmed.starts_with('#') => trimmed.to_ascii_uppercase(),
            TokenKind::Color => trimmed.chars().filter(|c| !c.is_whitespace()).collect(),
            TokenKind::Font | TokenKind::Shadow => trimmed.to_string(),
        }
    }
}

/// Token dictionary emitted in the export envelope, identifier → value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenDictionary {
    pub colors: IndexMap<String, String>,
    pub fonts: IndexMap<String, String>,
    pub shadows: IndexMap<String, String>,
}

impl TokenDictionary {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.fonts.is_empty() && self.shadows.is_empty()
    }

    /// Number of tokens across all kinds.
    pub fn len(&self) -> usize {
        self.colors.len() + self.fonts.len() + self.shadows.len()
    }

    /// Look up a value by `$`-prefixed or bare identifier.
    pub fn resolve(&self, reference: &str) -> Option<&str> {
        let id = reference.trim_start_matches(TOKEN_REF_PREFIX);
        let map = match id.chars().next()? {
            'c' => &self.colors,
            'f' => &self.fonts,
            's' => &self.shadows,
            _ => return None,
        };
        map.get(id).map(String::as_str)
    }
}

/// Memoizing value → identifier cache scoped to one export.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    /// When false, `emit` returns literal values and nothing is recorded.
    enabled: bool,
    colors: IndexMap<String, String>,
    fonts: IndexMap<String, String>,
    shadows: IndexMap<String, String>,
}

impl TokenRegistry {
    /// Create a registry that issues token references.
    pub fn new() -> Self {
        Self::with_extraction(true)
    }

    /// Create a registry; with `enabled = false` every value is emitted literally.
    pub fn with_extraction(enabled: bool) -> Self {
        Self {
            enabled,
            colors: IndexMap::new(),
            fonts: IndexMap::new(),
            shadows: IndexMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn table(&mut self, kind: TokenKind) -> &mut IndexMap<String, String> {
        match kind {
            TokenKind::Color => &mut self.colors,
            TokenKind::Font => &mut self.fonts,
            TokenKind::Shadow => &mut self.shadows,
        }
    }

    /// Intern a value and return its identifier (without the `$` prefix).
    pub fn intern(&mut self, kind: TokenKind, value: &str) -> String {
        let normalized = kind.normalize(value);
        let table = self.table(kind);
        if let Some(id) = table.get(&normalized) {
            return id.clone();
        }
        let id = format!("{}{}", kind.prefix(), table.len());
        table.insert(normalized, id.clone());
        id
    }

    /// The string a node field should carry for this value: a `$id` reference
    /// when extraction is on, otherwise the normalized literal.
    pub fn emit(&mut self, kind: TokenKind, value: &str) -> String {
        if self.enabled {
            format!("{}{}", TOKEN_REF_PREFIX, self.intern(kind, value))
        } else {
            kind.normalize(value)
        }
    }

    /// Number of distinct values interned so far.
    pub fn len(&self) -> usize {
        self.colors.len() + self.fonts.len() + self.shadows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the registry into the identifier → value dictionary.
    pub fn drain(self) -> TokenDictionary {
        fn invert(table: IndexMap<String, String>) -> IndexMap<String, String> {
            table.into_iter().map(|(value, id)| (id, value)).collect()
        }
        TokenDictionary {
            colors: invert(self.colors),
            fonts: invert(self.fonts),
            shadows: invert(self.shadows),
        }
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sequential_identifiers_per_kind() {
        let mut reg = TokenRegistry::new();
        assert_eq!(reg.intern(TokenKind::Color, "#FF0000"), "c0");
        assert_eq!(reg.intern(TokenKind::Color, "#00FF00"), "c1");
        assert_eq!(reg.intern(TokenKind::Font, "Inter"), "f0");
        assert_eq!(reg.intern(TokenKind::Shadow, "0px 1px 2px 0px #000000"), "s0");
    }

    #[test]
    fn test_dedup_after_normalization() {
        let mut reg = TokenRegistry::new();
        let a = reg.intern(TokenKind::Color, "#ff0000");
        let b = reg.intern(TokenKind::Color, " #FF0000 ");
        assert_eq!(a, b);
        let f1 = reg.intern(TokenKind::Font, "  Inter ");
        let f2 = reg.intern(TokenKind::Font, "Inter");
        assert_eq!(f1, f2);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_rgba_normalization_strips_spaces() {
        let mut reg = TokenRegistry::new();
        let a = reg.intern(TokenKind::Color, "rgba(0, 0, 0, 0.50)");
        let b = reg.intern(TokenKind::Color, "rgba(0,0,0,0.50)");
        assert_eq!(a, b);
    }

    #[test]
    fn test_emit_reference_or_literal() {
        let mut reg = TokenRegistry::new();
        assert_eq!(reg.emit(TokenKind::Color, "#abcdef"), "$c0");

        let mut literal = TokenRegistry::with_extraction(false);
        assert_eq!(literal.emit(TokenKind::Color, "#abcdef"), "#ABCDEF");
        assert!(literal.drain().is_empty());
    }

    #[test]
    fn test_drain_preserves_issue_order() {
        let mut reg = TokenRegistry::new();
        reg.intern(TokenKind::Color, "#222222");
        reg.intern(TokenKind::Color, "#111111");
        let dict = reg.drain();
        let keys: Vec<_> = dict.colors.keys().cloned().collect();
        assert_eq!(keys, vec!["c0", "c1"]);
        assert_eq!(dict.resolve("$c1"), Some("#111111"));
        assert_eq!(dict.resolve("x9"), None);
    }

    proptest! {
        #[test]
        fn prop_same_value_same_id(values in proptest::collection::vec("[a-f0-9]{6}", 1..40)) {
            let mut reg = TokenRegistry::new();
            let ids: Vec<String> = values
                .iter()
                .map(|v| reg.intern(TokenKind::Color, &format!("#{}", v)))
                .collect();
            for (i, a) in values.iter().enumerate() {
                for (j, b) in values.iter().enumerate() {
                    let same_value = a.to_ascii_uppercase() == b.to_ascii_uppercase();
                    prop_assert_eq!(same_value, ids[i] == ids[j]);
                }
            }
        }
    }
}
