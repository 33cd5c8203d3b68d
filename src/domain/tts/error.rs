/// Errors produced by the conversion engine.
///
/// None of these are retried locally; every failure is surfaced to the caller
/// with enough context to diagnose it. The status poll in the job path is the
/// only loop that continues past a non-terminal condition, and that is normal
/// progress toward a terminal state, not error recovery.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("speech provider error: {0}")]
    Provider(String),

    #[error("synthesis task {task_id} failed: {detail}")]
    TaskFailed { task_id: String, detail: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("text is {length} characters, provider maximum is {limit}")]
    TextTooLong { length: usize, limit: usize },

    #[error("synthesis task {task_id} still not finished after {attempts} status checks")]
    PollBudgetExhausted { task_id: String, attempts: u32 },
}
