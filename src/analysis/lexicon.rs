//! Sentiment Lexicon
//!
//! Fixed word lists consumed by the analyzer. Matching is done by substring on the
//! lower-cased comment text, so entries are stored lower-cased too.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const POSITIVE_WORDS: &[&str] = &[
    "bon",
    "excellent",
    "génial",
    "super",
    "aimer",
    "adore",
    "parfait",
    "fantastique",
    "heureux",
    "content",
    "satisfait",
    "recommande",
    "exceptionnel",
    "professionnel",
    "rapide",
    "conforme",
    "intuitif",
    "innovant",
    "bravo",
    "competent",
    "ravis",
];

const NEGATIVE_WORDS: &[&str] = &[
    "mauvais",
    "horrible",
    "nul",
    "détester",
    "pas",
    "probleme",
    "colère",
    "triste",
    "deçu",
    "énervé",
    "déçu",
    "endommagé",
    "médiocre",
    "tard",
    "inacceptable",
    "incompréhensible",
    "difficile",
    "manquant",
    "injoignable",
    "frustrant",
    "scandaleux",
];

const KEYWORDS: &[&str] = &[
    "produit",
    "service",
    "client",
    "livraison",
    "qualité",
    "prix",
    "commande",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    /// Tracked keywords, in the order they are counted.
    pub keywords: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(
            POSITIVE_WORDS.iter().copied(),
            NEGATIVE_WORDS.iter().copied(),
            KEYWORDS.iter().copied(),
        )
    }
}

impl Lexicon {
    pub fn new<'a>(
        positive: impl IntoIterator<Item = &'a str>,
        negative: impl IntoIterator<Item = &'a str>,
        keywords: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            positive: normalize(positive.into_iter().map(str::to_string)),
            negative: normalize(negative.into_iter().map(str::to_string)),
            keywords: normalize(keywords.into_iter().map(str::to_string)),
        }
    }

    /// Loads a lexicon from a JSON file shaped like `{"positive": [...], "negative": [...], "keywords": [...]}`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
        let parsed: Lexicon = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse lexicon file {}", path.display()))?;

        let lexicon = Self {
            positive: normalize(parsed.positive),
            negative: normalize(parsed.negative),
            keywords: normalize(parsed.keywords),
        };

        tracing::info!(
            "Loaded lexicon from {} ({} positive, {} negative, {} keywords)",
            path.display(),
            lexicon.positive.len(),
            lexicon.negative.len(),
            lexicon.keywords.len()
        );

        Ok(lexicon)
    }
}

/// Lower-cases entries and removes blanks and duplicates, keeping first occurrences.
fn normalize(words: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in words {
        let word = word.trim().to_lowercase();
        if !word.is_empty() && !out.contains(&word) {
            out.push(word);
        }
    }
    out
}
