//! Lexical helpers shared by the extractor and the scorers

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::processing::taxonomy::{BULLET_MARKERS, MAX_PLAUSIBLE_YEARS};

static YEARS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)[\+\-\s]*years?").expect("Invalid years regex"));

static WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z]{3,}\b").expect("Invalid word regex"));

/// Resume or job text with the derived forms every scorer needs.
#[derive(Debug, Clone)]
pub struct ProcessedText {
    pub original: String,
    pub lower: String,
    pub word_count: usize,
}

impl ProcessedText {
    pub fn new(text: &str) -> Self {
        Self {
            original: text.to_string(),
            lower: text.to_lowercase(),
            word_count: word_count(text),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.original.trim().is_empty()
    }

    /// Count of "•", "- " and "* " markers in the original text.
    pub fn bullet_count(&self) -> usize {
        BULLET_MARKERS
            .iter()
            .map(|marker| count_occurrences(&self.original, marker))
            .sum()
    }

    /// Whitespace tokens carrying at least one ASCII digit.
    pub fn numeric_word_count(&self) -> usize {
        self.original
            .split_whitespace()
            .filter(|word| word.chars().any(|c| c.is_ascii_digit()))
            .count()
    }

    /// Count of "%" symbols plus the word "percent".
    pub fn percentage_count(&self) -> usize {
        count_occurrences(&self.lower, "%") + count_occurrences(&self.lower, "percent")
    }
}

/// Literal whitespace-token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Every "<N> year(s)" / "<N>+ years" numeral with N <= 20, in text order.
///
/// Numerals that do not fit a u32 are dropped rather than failing.
pub fn extract_years(text_lower: &str) -> Vec<u32> {
    YEARS_REGEX
        .captures_iter(text_lower)
        .filter_map(|cap| cap.get(1))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .filter(|years| *years <= MAX_PLAUSIBLE_YEARS)
        .collect()
}

/// Lower-case alphabetic words of three or more letters, in text order.
pub fn alphabetic_words(text_lower: &str) -> Vec<&str> {
    WORD_REGEX.find_iter(text_lower).map(|m| m.as_str()).collect()
}

/// Word frequencies ordered by descending count, ties in first-seen order.
pub fn word_frequencies<'a>(words: &[&'a str]) -> Vec<(&'a str, usize)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for &word in words {
        match index.get(word) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(word, counts.len());
                counts.push((word, 1));
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// A fixed list of terms compiled into one automaton for substring lookups.
pub struct TermSet {
    terms: Vec<&'static str>,
    matcher: AhoCorasick,
}

impl TermSet {
    pub fn new(terms: &[&'static str]) -> Self {
        let matcher = AhoCorasick::new(terms).expect("Failed to build term matcher");
        Self {
            terms: terms.to_vec(),
            matcher,
        }
    }

    /// Presence flag per term, aligned with the original list.
    pub fn presence(&self, text: &str) -> Vec<bool> {
        let mut present = vec![false; self.terms.len()];
        for mat in self.matcher.find_overlapping_iter(text) {
            present[mat.pattern().as_usize()] = true;
        }
        present
    }

    /// Terms present in `text`, in list order.
    pub fn found(&self, text: &str) -> Vec<&'static str> {
        self.terms
            .iter()
            .zip(self.presence(text))
            .filter(|(_, present)| *present)
            .map(|(term, _)| *term)
            .collect()
    }

    pub fn count(&self, text: &str) -> usize {
        self.presence(text).into_iter().filter(|present| *present).count()
    }

    pub fn any(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_is_whitespace_split() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("one  two\nthree\tfour"), 4);
        assert_eq!(word_count("e-mail: a@b.com, phone"), 3);
    }

    #[test]
    fn test_extract_years() {
        assert_eq!(extract_years("3+ years of rust, 5 years total"), vec![3, 5]);
        assert_eq!(extract_years("1 year"), vec![1]);
        assert_eq!(extract_years("2019 years ago and 25 years"), Vec::<u32>::new());
        assert_eq!(extract_years("3-5 years"), vec![5]);
        assert_eq!(extract_years("no numerals here"), Vec::<u32>::new());
    }

    #[test]
    fn test_extract_years_drops_oversized_numerals() {
        assert_eq!(extract_years("99999999999999999999 years and 4 years"), vec![4]);
    }

    #[test]
    fn test_alphabetic_words() {
        let words = alphabetic_words("we use go, rust and python3 daily");
        assert_eq!(words, vec!["use", "rust", "and", "daily"]);
    }

    #[test]
    fn test_word_frequencies_tie_order() {
        let words = vec!["rust", "java", "java", "rust", "kafka"];
        let freq = word_frequencies(&words);
        assert_eq!(freq, vec![("rust", 2), ("java", 2), ("kafka", 1)]);
    }

    #[test]
    fn test_term_set_substring_semantics() {
        let set = TermSet::new(&["java", "javascript", "js"]);
        assert_eq!(set.found("modern javascript"), vec!["java", "javascript"]);
        assert_eq!(set.count("node.js and java"), 2);
        assert!(!set.any("python"));
    }

    #[test]
    fn test_processed_text_counters() {
        let text = ProcessedText::new("• Cut costs 30%\n- Grew revenue 2x\n* Led team of 5 percent");
        assert_eq!(text.bullet_count(), 3);
        assert_eq!(text.numeric_word_count(), 3);
        assert_eq!(text.percentage_count(), 2);
        assert!(!text.is_blank());
    }

    #[test]
    fn test_numeric_words_need_ascii_digits() {
        let text = ProcessedText::new("½ cup Ⅻ chapters ٣ items and 12 releases");
        assert_eq!(text.numeric_word_count(), 1);
    }
}
