use anyhow::{ensure, Context, Result};
use regex::Regex;

/// Built-in English filler words and phrases
pub const ENGLISH_FILLER_TERMS: &[&str] = &[
    "um", "uh", "like", "you know", "basically", "actually", "literally", "sort of", "kind of",
    "right", "so", "well", "i mean", "i guess", "i think", "i feel", "i believe", "maybe",
    "perhaps", "probably",
];

/// Built-in English hedging phrases that suggest the speaker is dodging the question
pub const ENGLISH_OFF_TOPIC_PHRASES: &[&str] = &[
    "i don't know",
    "i'm not sure",
    "that's a good question",
    "let me think",
    "that's interesting",
    "i haven't thought about that",
];

#[derive(Debug, Clone)]
struct FillerPattern {
    term: String,
    pattern: Regex,
}

/// Word lists the analyzer scans utterances with
///
/// Filler terms match whole words (or whole phrases) only, so "dislike" never
/// counts as "like". Off-topic phrases are plain substring matches. All terms
/// are lower-cased on construction; callers pass lower-cased text.
#[derive(Debug, Clone)]
pub struct Lexicon {
    fillers: Vec<FillerPattern>,
    off_topic_phrases: Vec<String>,
}

impl Lexicon {
    pub fn new<F, O>(filler_terms: F, off_topic_phrases: O) -> Result<Self>
    where
        F: IntoIterator,
        F::Item: AsRef<str>,
        O: IntoIterator,
        O::Item: AsRef<str>,
    {
        let fillers = filler_terms
            .into_iter()
            .map(|term| -> Result<FillerPattern> {
                let term = term.as_ref().trim().to_lowercase();
                ensure!(!term.is_empty(), "filler terms must not be empty");

                let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&term)))
                    .with_context(|| format!("Failed to compile filler pattern for '{}'", term))?;

                Ok(FillerPattern { term, pattern })
            })
            .collect::<Result<Vec<_>>>()?;

        let off_topic_phrases = off_topic_phrases
            .into_iter()
            .map(|phrase| -> Result<String> {
                let phrase = phrase.as_ref().to_lowercase();
                ensure!(!phrase.trim().is_empty(), "off-topic phrases must not be empty");
                Ok(phrase)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fillers,
            off_topic_phrases,
        })
    }

    pub fn english() -> Result<Self> {
        Self::new(ENGLISH_FILLER_TERMS, ENGLISH_OFF_TOPIC_PHRASES)
    }

    pub fn filler_terms(&self) -> impl Iterator<Item = &str> {
        self.fillers.iter().map(|f| f.term.as_str())
    }

    pub fn off_topic_phrases(&self) -> impl Iterator<Item = &str> {
        self.off_topic_phrases.iter().map(String::as_str)
    }

    /// Non-overlapping occurrences per term, summed over all terms
    pub fn count_fillers(&self, lowered: &str) -> usize {
        self.fillers
            .iter()
            .map(|f| f.pattern.find_iter(lowered).count())
            .sum()
    }

    pub fn is_off_topic(&self, lowered: &str) -> bool {
        self.off_topic_phrases
            .iter()
            .any(|phrase| lowered.contains(phrase.as_str()))
    }
}
