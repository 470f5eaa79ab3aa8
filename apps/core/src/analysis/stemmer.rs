//! Stemming - reduces inflected Indonesian words to a root form.
//!
//! `IndonesianStemmer` is a rule-based affix stripper in the Nazief-Adriani
//! family: particles, then possessive pronouns, then derivational suffixes,
//! then up to three derivational prefixes with morphophonemic recoding
//! (menulis -> tulis, memukul -> pukul). With a root dictionary it stops at the
//! first dictionary hit and leaves unknown words untouched; without one it
//! strips greedily down to a minimum stem length.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Stems shorter than this are never produced
pub const DEFAULT_MIN_STEM_LEN: usize = 4;

const PARTICLES: &[&str] = &["lah", "kah", "tah", "pun"];
const POSSESSIVES: &[&str] = &["nya", "ku", "mu"];
const DERIVATIONAL_SUFFIXES: &[&str] = &["kan", "an", "i"];
const MAX_PREFIXES: usize = 3;

/// Reduces a single lowercase token to its root form
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;
}

/// Stemmer that leaves every word unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }
}

/// Rule-based Indonesian affix stripper
#[derive(Debug, Clone)]
pub struct IndonesianStemmer {
    dictionary: Option<HashSet<String>>,
    min_stem_len: usize,
}

impl Default for IndonesianStemmer {
    fn default() -> Self {
        Self::new()
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

impl IndonesianStemmer {
    /// Create a stemmer without a root dictionary
    pub fn new() -> Self {
        Self {
            dictionary: None,
            min_stem_len: DEFAULT_MIN_STEM_LEN,
        }
    }

    /// Create a stemmer that validates candidates against known root words
    pub fn with_dictionary<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dictionary = roots
            .into_iter()
            .map(|r| r.as_ref().trim().to_lowercase())
            .filter(|r| !r.is_empty())
            .collect();

        Self {
            dictionary: Some(dictionary),
            min_stem_len: DEFAULT_MIN_STEM_LEN,
        }
    }

    /// Load a newline-delimited root dictionary
    pub fn from_dictionary_file(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::ResourceLoad(format!("cannot read root words {}: {}", path.display(), e))
        })?;
        Ok(Self::with_dictionary(raw.lines()))
    }

    pub fn with_min_stem_len(mut self, min_stem_len: usize) -> Self {
        self.min_stem_len = min_stem_len.max(1);
        self
    }

    fn is_root(&self, word: &str) -> bool {
        self.dictionary
            .as_ref()
            .is_some_and(|dictionary| dictionary.contains(word))
    }

    /// Remove the first matching suffix if the remainder stays long enough
    fn strip_suffix(&self, word: &str, suffixes: &[&str]) -> Option<String> {
        suffixes.iter().find_map(|suffix| {
            word.strip_suffix(suffix)
                .filter(|rest| char_len(rest) >= self.min_stem_len)
                .map(str::to_string)
        })
    }

    /// Remove one derivational prefix, applying recoding rules for meN-/peN-.
    /// di-, ke- and se- only occur as the outermost prefix.
    fn strip_prefix(&self, word: &str, outermost: bool) -> Option<String> {
        let candidate = Self::nasal_prefix(word, "me")
            .or_else(|| Self::nasal_prefix(word, "pe"))
            .or_else(|| Self::plain_prefix(word, outermost))?;

        (char_len(&candidate) >= self.min_stem_len).then_some(candidate)
    }

    fn plain_prefix(word: &str, outermost: bool) -> Option<String> {
        let prefixes: &[&str] = if outermost {
            &["ber", "ter", "per", "di", "ke", "se"]
        } else {
            &["ber", "ter", "per"]
        };

        for prefix in prefixes {
            if let Some(rest) = word.strip_prefix(prefix) {
                return Some(rest.to_string());
            }
        }

        // be-kerja, be-ternak: "ber" drops its r before a -er- syllable
        if let Some(rest) = word.strip_prefix("be") {
            if rest.get(1..3) == Some("er") {
                return Some(rest.to_string());
            }
        }

        None
    }

    /// meN- / peN- with nasal assimilation
    fn nasal_prefix(word: &str, base: &str) -> Option<String> {
        let rest = word.strip_prefix(base)?;
        let next = |s: &str| s.chars().next();

        if let Some(after) = rest.strip_prefix("ny") {
            if next(after).is_some_and(is_vowel) {
                return Some(format!("s{}", after));
            }
        }
        if let Some(after) = rest.strip_prefix("ng") {
            return match next(after) {
                Some(c) if is_vowel(c) || matches!(c, 'g' | 'h' | 'k') => Some(after.to_string()),
                _ => None,
            };
        }
        if let Some(after) = rest.strip_prefix('m') {
            return match next(after) {
                Some('b') | Some('p') | Some('f') => Some(after.to_string()),
                Some(c) if is_vowel(c) => Some(format!("p{}", after)),
                _ => None,
            };
        }
        if let Some(after) = rest.strip_prefix('n') {
            return match next(after) {
                Some('c') | Some('d') | Some('j') | Some('z') | Some('t') => Some(after.to_string()),
                Some(c) if is_vowel(c) => Some(format!("t{}", after)),
                _ => None,
            };
        }
        if base == "pe" && rest.starts_with('r') {
            // per- is handled as a plain prefix
            return None;
        }
        match next(rest) {
            Some('l') | Some('r') | Some('w') | Some('y') => Some(rest.to_string()),
            _ => None,
        }
    }

    fn stem_word(&self, word: &str) -> String {
        if self.is_root(word) || char_len(word) <= self.min_stem_len {
            return word.to_string();
        }

        let mut current = word.to_string();

        for suffixes in [PARTICLES, POSSESSIVES, DERIVATIONAL_SUFFIXES] {
            if let Some(stripped) = self.strip_suffix(&current, suffixes) {
                current = stripped;
                if self.is_root(&current) {
                    return current;
                }
            }
        }

        for round in 0..MAX_PREFIXES {
            match self.strip_prefix(&current, round == 0) {
                Some(stripped) => {
                    current = stripped;
                    if self.is_root(&current) {
                        return current;
                    }
                }
                None => break,
            }
        }

        if self.dictionary.is_some() {
            // No root found: keep the surface form
            word.to_string()
        } else {
            current
        }
    }
}

impl Stemmer for IndonesianStemmer {
    fn stem(&self, word: &str) -> String {
        self.stem_word(&word.to_lowercase())
    }
}
