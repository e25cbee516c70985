//! Lexical analysis module
//!
//! Provides pull-based tokenization for RIL source text with file-aware
//! processing and integration with the global logging system.

pub mod analyzer;
pub mod buffer;
pub mod reader;

use crate::config::constants::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::tokens::{TokenClass, TokenStream};

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};
pub use buffer::LexemeBuffer;
pub use reader::SourceReader;

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize file processing result with file context and security limits
pub fn tokenize_file_result(
    file_result: &FileProcessingResult,
) -> Result<TokenStream, LexerError> {
    let mut analyzer = LexicalAnalyzer::new();
    analyzer.tokenize_file_result(file_result)
}

/// Tokenize with custom runtime preferences (security boundaries remain compile-time)
pub fn tokenize_file_result_with_preferences(
    file_result: &FileProcessingResult,
    preferences: LexicalPreferences,
) -> Result<TokenStream, LexerError> {
    let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
    analyzer.tokenize_file_result(file_result)
}

/// Create a new lexical analyzer with default preferences
pub fn create_analyzer() -> LexicalAnalyzer {
    LexicalAnalyzer::new()
}

/// Create analyzer with custom runtime preferences
pub fn create_analyzer_with_preferences(preferences: LexicalPreferences) -> LexicalAnalyzer {
    LexicalAnalyzer::with_preferences(preferences)
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Initialize lexical analysis module validation (for system startup)
/// Validates that all error codes are properly configured and security limits are applied
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    // Validate that all lexical error codes are properly configured
    let test_codes = [
        crate::logging::codes::lexical::ILLEGAL_CHARACTER,
        crate::logging::codes::lexical::UNTERMINATED_COMMENT,
        crate::logging::codes::lexical::IDENTIFIER_TOO_LONG,
        crate::logging::codes::lexical::TOO_MANY_TOKENS,
    ];

    for code in &test_codes {
        let description = crate::logging::codes::get_description(code.as_str());
        if description == "Unknown error" {
            return Err(format!(
                "Lexical error code {} has no description",
                code.as_str()
            ));
        }

        // Verify the code exists in the error metadata registry
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    // Log security limits that are compile-time enforced
    crate::log_debug!("Lexical security limits initialized",
        "max_identifier_length" => MAX_IDENTIFIER_LENGTH,
        "max_comment_length" => MAX_COMMENT_LENGTH,
        "max_token_count" => MAX_TOKEN_COUNT
    );

    Ok(())
}

/// Validate basic tokenization configuration and security boundaries
pub fn validate_tokenization() -> Result<(), String> {
    // Validate compile-time security limits are reasonable
    if MAX_IDENTIFIER_LENGTH == 0 {
        return Err("MAX_IDENTIFIER_LENGTH cannot be zero".to_string());
    }
    if MAX_TOKEN_COUNT == 0 {
        return Err("MAX_TOKEN_COUNT cannot be zero".to_string());
    }
    if MAX_COMMENT_LENGTH == 0 {
        return Err("MAX_COMMENT_LENGTH cannot be zero".to_string());
    }

    // Validate that limits are within reasonable bounds
    if MAX_TOKEN_COUNT > 10_000_000 {
        return Err("MAX_TOKEN_COUNT exceeds reasonable limit".to_string());
    }
    if MAX_IDENTIFIER_LENGTH > 1000 {
        return Err("MAX_IDENTIFIER_LENGTH exceeds reasonable limit".to_string());
    }

    Ok(())
}

/// Get the current compile-time security limits (for reporting/debugging)
pub fn get_security_limits() -> SecurityLimits {
    SecurityLimits {
        max_identifier_length: MAX_IDENTIFIER_LENGTH,
        max_comment_length: MAX_COMMENT_LENGTH,
        max_token_count: MAX_TOKEN_COUNT,
    }
}

/// Information about compile-time security limits
#[derive(Debug, Clone)]
pub struct SecurityLimits {
    pub max_identifier_length: usize,
    pub max_comment_length: usize,
    pub max_token_count: usize,
}

// ============================================================================
// ANALYSIS HELPERS
// ============================================================================

/// Get token count information grouped by class
pub fn get_token_counts(token_stream: &TokenStream) -> TokenCounts {
    let mut counts = TokenCounts::default();

    for token in token_stream.all_tokens() {
        counts.total += 1;
        match token.kind.token_class() {
            TokenClass::Keyword => counts.keywords += 1,
            TokenClass::Literal => {
                if token.kind == crate::tokens::TokenKind::Identifier {
                    counts.identifiers += 1;
                } else {
                    counts.numbers += 1;
                }
            }
            TokenClass::Operator => counts.operators += 1,
            TokenClass::Punctuation => counts.punctuation += 1,
            TokenClass::Separator => counts.separators += 1,
            TokenClass::CommentMarker => counts.comment_markers += 1,
            TokenClass::Special => {
                if token.kind == crate::tokens::TokenKind::Illegal {
                    counts.illegal += 1;
                }
            }
        }
    }

    counts
}

/// Token distribution information for reporting
#[derive(Debug, Default, Clone)]
pub struct TokenCounts {
    pub total: usize,
    pub keywords: usize,
    pub identifiers: usize,
    pub numbers: usize,
    pub operators: usize,
    pub punctuation: usize,
    pub separators: usize,
    pub comment_markers: usize,
    pub illegal: usize,
}

impl TokenCounts {
    /// Check if tokenization found meaningful content
    pub fn has_content(&self) -> bool {
        self.keywords > 0 || self.identifiers > 0 || self.numbers > 0
    }

    /// Check if token counts are within security limits
    pub fn is_within_security_limits(&self) -> bool {
        self.total <= MAX_TOKEN_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_analyzer() {
        let analyzer = create_analyzer();
        drop(analyzer);
    }

    #[test]
    fn test_create_analyzer_with_preferences() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: false,
            track_operator_patterns: true,
            ..Default::default()
        };
        let analyzer = create_analyzer_with_preferences(preferences);
        assert!(!analyzer.preferences().collect_detailed_metrics);
        assert!(analyzer.preferences().track_operator_patterns);
    }

    #[test]
    fn test_init_logging() {
        let result = init_lexical_analysis_logging();
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_tokenization() {
        let result = validate_tokenization();
        assert!(result.is_ok());
    }

    #[test]
    fn test_security_limits() {
        let limits = get_security_limits();
        assert!(limits.max_identifier_length > 0);
        assert!(limits.max_comment_length > 0);
        assert!(limits.max_token_count > 0);
    }

    #[test]
    fn test_token_counts() {
        let mut analyzer = create_analyzer();
        let stream = analyzer
            .tokenize_source("var x is 1 + 2;\nprint x")
            .unwrap();

        let counts = get_token_counts(&stream);
        assert_eq!(counts.keywords, 3); // var, is, print
        assert_eq!(counts.identifiers, 2); // x, x
        assert_eq!(counts.numbers, 2); // 1, 2
        assert_eq!(counts.operators, 1); // +
        assert_eq!(counts.separators, 2); // ';' and the newline
        assert!(counts.has_content());
        assert!(counts.is_within_security_limits());
    }
}
