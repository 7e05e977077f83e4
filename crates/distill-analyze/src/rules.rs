//! Ordered name-keyword tables.
//!
//! Each table is a list of (pattern, label) pairs evaluated top to bottom;
//! the first match wins, so table order is the tie-break.

use regex::Regex;

/// One row of a keyword table.
pub struct NameRule<L> {
    label: L,
    pattern: Regex,
    except: Option<Regex>,
}

impl<L: Copy> NameRule<L> {
    /// Build a rule from a pattern matched against [`words`] output.
    pub fn new(label: L, pattern: &str) -> Self {
        Self {
            label,
            pattern: Regex::new(pattern).expect("keyword table pattern"),
            except: None,
        }
    }

    /// Names matching `pattern` never match this rule.
    pub fn except(mut self, pattern: &str) -> Self {
        self.except = Some(Regex::new(pattern).expect("keyword table exclusion"));
        self
    }

    pub fn label(&self) -> L {
        self.label
    }

    pub fn matches(&self, words: &str) -> bool {
        self.pattern.is_match(words) && !self.except.as_ref().is_some_and(|e| e.is_match(words))
    }
}

/// First label whose rule matches the normalized name.
pub fn first_match<L: Copy>(rules: &[NameRule<L>], name: &str) -> Option<L> {
    let normalized = words(name);
    rules.iter().find(|r| r.matches(&normalized)).map(NameRule::label)
}

/// Normalize a layer name into lower-case, space-separated words.
///
/// camelCase humps, digits, and any punctuation become word breaks, so
/// `PrimaryButton`, `primary-button` and `primary_button` all read
/// `primary button`.
pub fn words(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    let mut prev: Option<char> = None;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if let Some(p) = prev {
                let hump = p.is_lowercase() && ch.is_uppercase();
                let digit_edge = p.is_alphabetic() != ch.is_alphabetic();
                if (hump || digit_edge) && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            out.extend(ch.to_lowercase());
            prev = Some(ch);
        } else {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            prev = None;
        }
    }
    out.trim_end().to_string()
}
