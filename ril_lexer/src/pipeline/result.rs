use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::tokens::TokenStream;
use std::time::Duration;

/// Complete pipeline result containing both processing stages
#[derive(Debug)]
pub struct PipelineResult {
    pub tokens: TokenStream,
    pub file_metadata: FileMetadata,
    pub lexical_metrics: LexicalMetrics,
    pub token_count: usize,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        tokens: TokenStream,
        file_metadata: FileMetadata,
        lexical_metrics: LexicalMetrics,
        processing_duration: Duration,
    ) -> Self {
        let token_count = tokens.len();
        Self {
            tokens,
            file_metadata,
            lexical_metrics,
            token_count,
            processing_duration,
        }
    }

    /// Check if tokenization surfaced any illegal characters
    pub fn has_illegal_tokens(&self) -> bool {
        self.lexical_metrics.illegal_tokens > 0
    }

    pub fn log_success(&self, file_path: &str) {
        crate::log_success!(
            crate::logging::codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "RIL tokenization pipeline succeeded",
            "file" => file_path,
            "tokens" => self.token_count,
            "illegal_tokens" => self.lexical_metrics.illegal_tokens,
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0),
            "processing_rate_bytes_per_sec" => format!("{:.0}",
                self.file_metadata.size as f64 / self.processing_duration.as_secs_f64().max(f64::EPSILON)),
            "processing_rate_tokens_per_sec" => format!("{:.0}",
                self.token_count as f64 / self.processing_duration.as_secs_f64().max(f64::EPSILON))
        );
    }
}
