mod error;
pub mod output;
mod result;
mod validation;

// Re-export public types
pub use error::PipelineError;
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::LexicalPreferences;
use crate::logging;
use std::path::PathBuf;
use std::time::Instant;

/// Process a single file through the pipeline (file -> lexical)
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    process_file_with_preferences(file_path, &LexicalPreferences::default())
}

/// Process a single file with custom lexical preferences
pub fn process_file_with_preferences(
    file_path: &str,
    lexical_preferences: &LexicalPreferences,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    // Set up file context for global logging
    logging::with_file_context(PathBuf::from(file_path), 0, || {
        crate::log_info!("Starting RIL tokenization pipeline", "file" => file_path);

        // Stage 1: File processing
        let file_result = crate::file_processor::process_file(file_path)?;

        // Stage 2: Lexical analysis
        let mut analyzer =
            crate::lexical::create_analyzer_with_preferences(lexical_preferences.clone());
        let tokens = analyzer.tokenize_file_result(&file_result)?;
        let lexical_metrics = analyzer.metrics().clone();

        let total_duration = start_time.elapsed();
        let result = PipelineResult::new(
            tokens,
            file_result.metadata,
            lexical_metrics,
            total_duration,
        );

        result.log_success(file_path);

        Ok(result)
    })
}
