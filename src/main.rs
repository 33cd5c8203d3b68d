use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use texttape::cli::{Cli, InputSource};
use texttape::domain::tts::{
    billing, voice_for_language, ConversionService, ConversionServiceApi, Language, PollPolicy,
    SynthesisEngine,
};
use texttape::infrastructure::config::{Config, LogFormat};
use texttape::infrastructure::repositories::{PollySpeechRepository, S3AudioStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?;

    // Initialize logging
    init_logging(&config);

    // Resolve the input before touching AWS.
    let text = match cli.input_source()? {
        InputSource::Inline(text) => text,
        InputSource::File(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
    };

    let language = Language::from_tag(&cli.language)?;
    let mut voice = voice_for_language(language);
    if let Some(voice_id) = &cli.voice {
        voice.voice_id = voice_id.clone();
    }
    if let Some(engine) = &cli.engine {
        voice.engine = SynthesisEngine::from_name(engine)?;
    }
    let engine = voice.engine;

    tracing::info!(
        language = %language,
        voice = %voice.voice_id,
        engine = %engine,
        region = %config.aws_region,
        "starting conversion"
    );

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;
    let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
    let s3_client = Arc::new(aws_sdk_s3::Client::new(&aws_config));

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject AWS clients)
    let speech_repo = Arc::new(PollySpeechRepository::new(polly_client));
    let audio_store = Arc::new(S3AudioStore::new(s3_client));

    // 2. Instantiate the conversion service (inject repositories)
    let output_bucket = cli.bucket.clone().or_else(|| config.output_bucket.clone());
    let poll = PollPolicy {
        interval: Duration::from_secs(config.poll_interval_secs),
        max_attempts: config.max_poll_attempts,
    };
    let service = ConversionService::new(speech_repo, audio_store, voice, output_bucket, poll);

    // 3. Run one conversion and stream the audio to the output file
    let result = service.convert_to_speech(&text).await?;

    let mut output = tokio::fs::File::create(&cli.output)
        .await
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    let bytes_written = result
        .audio
        .write_to(&mut output)
        .await
        .context("failed to write audio output")?;

    let estimated_cost = billing::estimated_cost_usd(result.characters_billed, engine);

    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "output": cli.output,
                "bytes_written": bytes_written,
                "characters_billed": result.characters_billed,
                "estimated_cost_usd": estimated_cost,
            })
        );
    } else {
        println!("Wrote {} ({bytes_written} bytes)", cli.output.display());
        println!(
            "Characters billed: {} (estimated cost: ${estimated_cost})",
            result.characters_billed
        );
    }

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "texttape=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "texttape=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
