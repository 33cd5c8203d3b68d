pub mod audio;
pub mod billing;
pub mod error;
pub mod language;
pub mod service;
pub mod strategy;

pub use audio::AudioStream;
pub use error::ConversionError;
pub use language::{voice_for_language, Language, SynthesisEngine, VoiceConfig};
pub use service::{ConversionResult, ConversionService, ConversionServiceApi};
pub use strategy::PollPolicy;
