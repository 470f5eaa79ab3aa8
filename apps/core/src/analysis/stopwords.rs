//! Indonesian stopword set used by the text normalizer.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Common Indonesian function words
const STOPWORDS_ID: &[&str] = &[
    "yang", "untuk", "pada", "ke", "para", "namun", "menurut", "antara", "dia", "dua", "ia",
    "seperti", "jika", "sehingga", "kembali", "dan", "tidak", "ini", "karena", "kepada", "oleh",
    "saat", "harus", "sementara", "setelah", "belum", "kami", "sekitar", "bagi", "serta", "di",
    "dari", "telah", "sebagai", "masih", "hal", "ketika", "adalah", "itu", "dalam", "bisa",
    "bahwa", "atau", "hanya", "kita", "dengan", "akan", "juga", "ada", "mereka", "sudah", "saya",
    "terhadap", "secara", "agar", "lain", "anda", "begitu", "mengapa", "kenapa", "yaitu", "yakni",
    "daripada", "itulah", "lagi", "maka", "tentang", "demi", "dimana", "kemana", "pula", "sambil",
    "sebelum", "sesudah", "supaya", "guna", "kah", "pun", "sampai", "sedangkan", "selagi",
    "tetapi", "apakah", "kecuali", "sebab", "selain", "seolah", "seraya", "seterusnya", "tanpa",
    "agak", "boleh", "dapat", "dsb", "dst", "dll", "dahulu", "dulunya", "anu", "demikian",
    "tapi", "ingin", "nggak", "mari", "nanti", "melainkan", "oh", "ok", "seharusnya",
    "sebetulnya", "setiap", "setidaknya", "sesuatu", "pasti", "saja", "toh", "ya", "walau",
    "tolong", "tentu", "amat", "apalagi", "bagaimanapun",
];

/// Set of lowercase words removed before classification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Build a set from any word list; entries are trimmed and lowercased
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self { words }
    }

    /// Default Indonesian stopwords
    pub fn indonesian() -> Self {
        Self::new(STOPWORDS_ID.iter().copied())
    }

    /// A set that removes nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a newline-delimited stopword file; `#` starts a comment line
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::ResourceLoad(format!("cannot read stopwords {}: {}", path.display(), e))
        })?;

        Ok(Self::new(
            raw.lines().filter(|line| !line.trim_start().starts_with('#')),
        ))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
