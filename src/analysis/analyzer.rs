//! Local Analyzer (map step)
//!
//! Scores comments by counting lexicon words that occur as a **substring** of the
//! lower-cased text. This is not tokenization: `nul` also matches inside `nulle`,
//! and `pas` inside `passer`. Those false positives are accepted.

use super::lexicon::Lexicon;
use super::types::{PartitionResult, Sentiment};
use crate::corpus::types::Comment;

/// Classifies a single text. Ties (including no hits at all) are neutral.
pub fn classify(lexicon: &Lexicon, text: &str) -> Sentiment {
    classify_lowercased(lexicon, &text.to_lowercase())
}

fn classify_lowercased(lexicon: &Lexicon, text: &str) -> Sentiment {
    let positive_score = count_hits(&lexicon.positive, text);
    let negative_score = count_hits(&lexicon.negative, text);

    if positive_score > negative_score {
        Sentiment::Positive
    } else if negative_score > positive_score {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

fn count_hits(words: &[String], text: &str) -> usize {
    words.iter().filter(|word| text.contains(word.as_str())).count()
}

/// Maps one partition to its raw counts.
///
/// Each keyword is counted at most once per comment, however often it repeats.
pub fn analyze_partition(lexicon: &Lexicon, comments: &[Comment]) -> PartitionResult {
    let mut result = PartitionResult::default();

    for comment in comments {
        let text = comment.text.to_lowercase();

        let sentiment = classify_lowercased(lexicon, &text);
        *result.sentiment_counts.entry(sentiment).or_insert(0) += 1;
        *result.platform_counts.entry(comment.platform).or_insert(0) += 1;

        for keyword in lexicon.keywords.iter() {
            if text.contains(keyword.as_str()) {
                *result.keyword_counts.entry(keyword.clone()).or_insert(0) += 1;
            }
        }
    }

    result.processed = comments.len() as u64;
    result
}
