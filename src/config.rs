use crate::analysis::{
    AnalysisSettings, Lexicon, UtteranceAnalyzer, ENGLISH_FILLER_TERMS, ENGLISH_OFF_TOPIC_PHRASES,
};
use crate::persona::FillerThresholdMode;
use anyhow::{ensure, Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub nats: NatsConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct NatsConfig {
    /// Listen for transcripts and publish interruptions over NATS
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_nats_url")]
    pub url: String,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_nats_url(),
        }
    }
}

fn default_nats_url() -> String {
    "nats://localhost:4222".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    #[serde(default)]
    pub filler_threshold: FillerThresholdMode,
    /// Replaces the built-in English filler list when set
    pub filler_terms: Option<Vec<String>>,
    /// Replaces the built-in English off-topic phrases when set
    pub off_topic_phrases: Option<Vec<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
            filler_threshold: FillerThresholdMode::default(),
            filler_terms: None,
            off_topic_phrases: None,
        }
    }
}

fn default_max_words() -> usize {
    AnalysisSettings::default().max_words
}

impl AnalysisConfig {
    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            max_words: self.max_words,
            filler_threshold: self.filler_threshold,
        }
    }

    pub fn lexicon(&self) -> Result<Lexicon> {
        let lexicon = match (&self.filler_terms, &self.off_topic_phrases) {
            (None, None) => Lexicon::english(),
            (fillers, phrases) => {
                let fillers: Vec<&str> = match fillers {
                    Some(terms) => terms.iter().map(String::as_str).collect(),
                    None => ENGLISH_FILLER_TERMS.to_vec(),
                };
                let phrases: Vec<&str> = match phrases {
                    Some(terms) => terms.iter().map(String::as_str).collect(),
                    None => ENGLISH_OFF_TOPIC_PHRASES.to_vec(),
                };
                Lexicon::new(fillers, phrases)
            }
        };

        lexicon.context("Invalid analysis word lists")
    }

    pub fn build_analyzer(&self) -> Result<UtteranceAnalyzer> {
        Ok(UtteranceAnalyzer::new(self.lexicon()?, self.settings()))
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("DEBATE_MODERATOR").separator("__"))
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.analysis.max_words > 0,
            "analysis.max_words must be greater than zero"
        );
        if let Some(terms) = &self.analysis.filler_terms {
            ensure!(!terms.is_empty(), "analysis.filler_terms must not be empty when set");
        }
        Ok(())
    }
}
