use crate::domain::tts::ConversionError;
use clap::Parser;
use std::path::PathBuf;

/// texttape - convert text into synthesized speech audio
#[derive(Parser, Debug)]
#[command(name = "texttape")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Text to convert to speech
    #[arg(long)]
    pub text: Option<String>,

    /// Input file to convert to speech
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Destination bucket for long-text synthesis output
    /// (overrides TTS_OUTPUT_BUCKET)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Output audio file
    #[arg(long, default_value = "output.mp3")]
    pub output: PathBuf,

    /// ISO 639-1 language tag selecting the voice
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Voice id override
    #[arg(long)]
    pub voice: Option<String>,

    /// Engine override: generative, long-form, neural or standard
    #[arg(long)]
    pub engine: Option<String>,

    /// Print the conversion summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Where the input text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Inline(String),
    File(PathBuf),
}

impl Cli {
    /// Exactly one of `--text` and `--file` must be given. Validated here
    /// rather than by the argument parser so the failure carries the same
    /// error taxonomy as every other missing-input case.
    pub fn input_source(&self) -> Result<InputSource, ConversionError> {
        match (&self.text, &self.file) {
            (Some(_), Some(_)) => Err(ConversionError::Configuration(
                "--text and --file are mutually exclusive".to_string(),
            )),
            (None, None) => Err(ConversionError::Configuration(
                "either --text or --file must be provided".to_string(),
            )),
            (Some(text), None) => Ok(InputSource::Inline(text.clone())),
            (None, Some(path)) => Ok(InputSource::File(path.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("texttape").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn inline_text_is_an_input_source() {
        let cli = parse(&["--text", "hello"]);
        assert_eq!(
            cli.input_source().unwrap(),
            InputSource::Inline("hello".to_string())
        );
    }

    #[test]
    fn file_is_an_input_source() {
        let cli = parse(&["--file", "chapter.txt"]);
        assert_eq!(
            cli.input_source().unwrap(),
            InputSource::File(PathBuf::from("chapter.txt"))
        );
    }

    #[test]
    fn both_text_and_file_is_a_configuration_error() {
        let cli = parse(&["--text", "hello", "--file", "chapter.txt"]);
        assert!(matches!(
            cli.input_source(),
            Err(ConversionError::Configuration(_))
        ));
    }

    #[test]
    fn neither_text_nor_file_is_a_configuration_error() {
        let cli = parse(&[]);
        assert!(matches!(
            cli.input_source(),
            Err(ConversionError::Configuration(_))
        ));
    }

    #[test]
    fn output_defaults_to_output_mp3() {
        let cli = parse(&["--text", "hello"]);
        assert_eq!(cli.output, PathBuf::from("output.mp3"));
        assert_eq!(cli.language, "en");
    }
}
