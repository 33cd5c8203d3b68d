use super::language::SynthesisEngine;
use rust_decimal::Decimal;

/// Number of characters the provider bills for the given text.
///
/// This documents what the actual calculation is more than the calculation
/// being complicated: the trimmed length in code points. It does not match the
/// provider's own accounting exactly, but it is close enough for strategy
/// selection and cost display. The `request_characters` figure returned with
/// each completed request is authoritative.
pub fn billable_characters(text: &str) -> usize {
    text.trim().chars().count()
}

/// Published price in USD per one million billed characters.
fn usd_per_million(engine: SynthesisEngine) -> Decimal {
    match engine {
        SynthesisEngine::Standard => Decimal::new(400, 2),
        SynthesisEngine::Neural => Decimal::new(1600, 2),
        SynthesisEngine::Generative => Decimal::new(3000, 2),
        SynthesisEngine::LongForm => Decimal::new(10_000, 2),
    }
}

/// Estimated cost of a conversion, from the billed character count.
///
/// Advisory figure for display only; nothing in the engine branches on it.
pub fn estimated_cost_usd(characters: i64, engine: SynthesisEngine) -> Decimal {
    Decimal::from(characters) * usd_per_million(engine) / Decimal::from(1_000_000)
}
