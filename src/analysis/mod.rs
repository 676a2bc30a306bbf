//! Real-time utterance analysis
//!
//! Scores a finished utterance for rambling, filler words and off-topic
//! hedging, then lets the active persona decide whether to interrupt.

mod analyzer;
mod lexicon;
mod result;

pub use analyzer::{AnalysisSettings, UtteranceAnalyzer};
pub use lexicon::{Lexicon, ENGLISH_FILLER_TERMS, ENGLISH_OFF_TOPIC_PHRASES};
pub use result::{AnalysisResult, InterruptionReason};
