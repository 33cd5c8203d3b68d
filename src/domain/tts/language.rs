use super::error::ConversionError;
use serde::{Deserialize, Serialize};

/// ISO 639-1 language identifiers the voice table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
}

impl Language {
    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
        }
    }

    /// Parse an ISO 639-1 tag supplied by the caller.
    pub fn from_tag(tag: &str) -> Result<Self, ConversionError> {
        match tag.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::English),
            "es" => Ok(Language::Spanish),
            "fr" => Ok(Language::French),
            "de" => Ok(Language::German),
            "it" => Ok(Language::Italian),
            "pt" => Ok(Language::Portuguese),
            other => Err(ConversionError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synthesis engines the provider accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SynthesisEngine {
    Generative,
    LongForm,
    Neural,
    Standard,
}

impl SynthesisEngine {
    /// Provider-facing engine name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisEngine::Generative => "generative",
            SynthesisEngine::LongForm => "long-form",
            SynthesisEngine::Neural => "neural",
            SynthesisEngine::Standard => "standard",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConversionError> {
        match name {
            "generative" => Ok(SynthesisEngine::Generative),
            "long-form" => Ok(SynthesisEngine::LongForm),
            "neural" => Ok(SynthesisEngine::Neural),
            "standard" => Ok(SynthesisEngine::Standard),
            other => Err(ConversionError::Configuration(format!(
                "unknown synthesis engine `{other}`, expected one of generative, long-form, neural, standard"
            ))),
        }
    }
}

impl std::fmt::Display for SynthesisEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider-specific synthesis parameters for one language.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    pub voice_id: String,
    pub engine: SynthesisEngine,
    pub language_code: String,
}

/// Fixed per-language voice selection.
///
/// The table is data, not policy: the engine treats the returned bundle as
/// opaque and passes it through to the provider unchanged.
pub fn voice_for_language(language: Language) -> VoiceConfig {
    let (voice_id, engine, language_code) = match language {
        Language::English => ("Matthew", SynthesisEngine::Generative, "en-US"),
        Language::Spanish => ("Lupe", SynthesisEngine::Neural, "es-US"),
        Language::French => ("Lea", SynthesisEngine::Neural, "fr-FR"),
        Language::German => ("Vicki", SynthesisEngine::Neural, "de-DE"),
        Language::Italian => ("Bianca", SynthesisEngine::Neural, "it-IT"),
        Language::Portuguese => ("Ines", SynthesisEngine::Neural, "pt-PT"),
    };
    VoiceConfig {
        voice_id: voice_id.to_string(),
        engine,
        language_code: language_code.to_string(),
    }
}
