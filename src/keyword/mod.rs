//! Keyword scanning for page text
//!
//! Text is segmented into sentences and each sentence is tested for the
//! keyword as a case-sensitive whole word. A word boundary here is stricter
//! than the regex `\b`: a hyphen also joins words, so `UA-related` does not
//! contain the word `UA`.

mod sentences;

pub use sentences::{sentences, Sentences};

use regex::Regex;

/// Matches a keyword as a whole word inside sentences
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    pattern: Regex,
}

impl KeywordMatcher {
    /// Builds a matcher for `keyword`
    ///
    /// # Examples
    ///
    /// ```
    /// use site_sweep::keyword::KeywordMatcher;
    ///
    /// let matcher = KeywordMatcher::new("UA").unwrap();
    /// assert!(matcher.is_match("UA is great."));
    /// assert!(!matcher.is_match("This has nothing UA-related."));
    /// assert!(!matcher.is_match("Visit UArizona."));
    /// ```
    pub fn new(keyword: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"(?:^|[^\w-]){}(?:[^\w-]|$)",
            regex::escape(keyword)
        ))?;

        Ok(Self {
            keyword: keyword.to_string(),
            pattern,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Returns true if `sentence` contains the keyword as a whole word
    pub fn is_match(&self, sentence: &str) -> bool {
        self.pattern.is_match(sentence)
    }

    /// Counts the sentences of `text` that contain the keyword
    pub fn count_sentences(&self, text: &str) -> usize {
        sentences(text).filter(|s| self.is_match(s)).count()
    }
}
