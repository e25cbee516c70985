//! Span-accurate token stream management for the downstream parser
//!
//! Maintains accurate source locations across filtered token streams so
//! the parser can report errors precisely even though internal comment
//! markers are hidden from it.

use crate::tokens::token::{Token, TokenKind};
use crate::utils::{Position, SourceMap, Span};

/// Span-accurate token stream that maintains precise source locations
/// even when filtering internal marker tokens out of the parsing view.
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens with original positions
    all_tokens: Vec<Token>,
    /// Indices into all_tokens for significant tokens
    significant_indices: Vec<usize>,
    /// Current position in significant_indices array
    position: usize,
    /// Source map for error reporting and span validation
    source_map: Option<SourceMap>,
}

impl TokenStream {
    /// Create a new token stream with automatic filtering
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut stream = Self {
            all_tokens: tokens,
            significant_indices: Vec::new(),
            position: 0,
            source_map: None,
        };
        stream.rebuild_significant_indices();
        stream
    }

    /// Create stream with source map for enhanced error reporting
    pub fn with_source_map(tokens: Vec<Token>, source_map: SourceMap) -> Self {
        let mut stream = Self {
            all_tokens: tokens,
            significant_indices: Vec::new(),
            position: 0,
            source_map: Some(source_map),
        };
        stream.rebuild_significant_indices();
        stream
    }

    fn rebuild_significant_indices(&mut self) {
        self.significant_indices.clear();

        for (i, token) in self.all_tokens.iter().enumerate() {
            if token.is_significant() {
                self.significant_indices.push(i);
            }
        }

        self.position = 0;
    }

    // === CORE NAVIGATION ===

    /// Get the current significant token
    pub fn current(&self) -> Option<&Token> {
        self.significant_indices
            .get(self.position)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Get the position of the current token
    pub fn current_position(&self) -> Option<Position> {
        self.current().map(|token| token.position)
    }

    /// Get the span of the current token
    pub fn current_span(&self) -> Option<Span> {
        self.current().map(|token| token.span())
    }

    /// Peek at the next significant token without advancing
    pub fn peek(&self) -> Option<&Token> {
        self.peek_ahead(1)
    }

    /// Peek ahead by n positions in significant tokens
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.significant_indices
            .get(self.position + n)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Advance to the next significant token
    pub fn advance(&mut self) -> Option<&Token> {
        if self.position < self.significant_indices.len() {
            self.position += 1;
        }
        self.current()
    }

    /// Check if we're at the end of significant tokens
    pub fn is_at_end(&self) -> bool {
        self.position >= self.significant_indices.len()
    }

    /// Get the number of significant tokens
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    /// Check if the stream has no significant tokens
    pub fn is_empty(&self) -> bool {
        self.significant_indices.is_empty()
    }

    // === PARSER INTEGRATION ===

    /// Check if the current token has the expected kind
    pub fn check_kind(&self, expected: TokenKind) -> bool {
        self.current()
            .map(|token| token.kind == expected)
            .unwrap_or(false)
    }

    /// Consume the next token if it matches predicate
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<Token>
    where
        F: FnOnce(&Token) -> bool,
    {
        if let Some(token) = self.current() {
            if predicate(token) {
                let result = self.current().cloned();
                self.advance();
                return result;
            }
        }
        None
    }

    /// Advance if current token has the expected kind
    pub fn advance_if_kind(&mut self, expected: TokenKind) -> bool {
        if self.check_kind(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect a specific token kind with accurate error reporting
    pub fn expect_kind(&mut self, expected: TokenKind) -> Result<Token, TokenStreamError> {
        if let Some(current) = self.current() {
            if current.kind == expected {
                let result = current.clone();
                self.advance();
                Ok(result)
            } else {
                Err(TokenStreamError::UnexpectedToken {
                    expected: expected.to_string(),
                    found: current.lexeme.clone(),
                    span: current.span(),
                })
            }
        } else {
            Err(TokenStreamError::UnexpectedEndOfStream {
                expected: expected.to_string(),
            })
        }
    }

    // === CHECKPOINTS ===

    /// Save current position as checkpoint for backtracking
    pub fn save_position(&self) -> usize {
        self.position
    }

    /// Restore position from checkpoint
    pub fn restore_position(&mut self, saved_position: usize) {
        self.position = saved_position.min(self.significant_indices.len());
    }

    // === ERROR REPORTING ===

    /// Format an error with accurate source context
    pub fn format_error(&self, span: Span, message: &str) -> String {
        if let Some(ref source_map) = self.source_map {
            source_map.format_error(&span, message)
        } else {
            format!("Error at {}: {}", span, message)
        }
    }

    /// Get source text for a span (if source map available)
    pub fn source_text(&self, span: &Span) -> Option<&str> {
        self.source_map.as_ref().map(|sm| sm.span_text(span))
    }

    // === ITERATION ===

    /// Get an iterator over significant tokens
    pub fn iter_significant(&self) -> impl Iterator<Item = &Token> {
        self.significant_indices
            .iter()
            .map(|&i| &self.all_tokens[i])
    }

    /// Get all tokens (including non-significant)
    pub fn all_tokens(&self) -> &[Token] {
        &self.all_tokens
    }

    /// Get remaining significant tokens
    pub fn remaining_tokens(&self) -> impl Iterator<Item = &Token> {
        self.significant_indices[self.position..]
            .iter()
            .map(|&i| &self.all_tokens[i])
    }

    // === DIAGNOSTICS ===

    /// Get current position index for debugging
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get remaining token count
    pub fn remaining_count(&self) -> usize {
        self.significant_indices.len().saturating_sub(self.position)
    }

    /// Diagnostic summary of the stream state
    pub fn diagnostic(&self) -> String {
        let current_info = if let Some(current) = self.current() {
            format!("'{}' at {}", current, current.position)
        } else {
            "<end>".to_string()
        };

        format!(
            "TokenStream(pos: {}/{}, current: {})",
            self.position,
            self.significant_indices.len(),
            current_info
        )
    }

    /// Check if the stream is terminated by an EOF token
    pub fn has_eof(&self) -> bool {
        if let Some(&last_idx) = self.significant_indices.last() {
            self.all_tokens
                .get(last_idx)
                .map(|token| token.is_eof())
                .unwrap_or(false)
        } else {
            false
        }
    }
}

/// Token stream errors with span accuracy
#[derive(Debug, Clone, PartialEq)]
pub enum TokenStreamError {
    /// Unexpected token found with accurate span
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
    /// Unexpected end of stream
    UnexpectedEndOfStream { expected: String },
}

impl std::fmt::Display for TokenStreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken {
                expected,
                found,
                span,
            } => {
                write!(f, "Expected {}, found '{}' at {}", expected, found, span)
            }
            Self::UnexpectedEndOfStream { expected } => {
                write!(f, "Expected {}, but reached end of input", expected)
            }
        }
    }
}

impl std::error::Error for TokenStreamError {}

/// Token stream builder with position tracking, for assembling streams
/// by hand in tests
#[derive(Debug)]
pub struct TokenStreamBuilder {
    tokens: Vec<Token>,
    current_position: Position,
}

impl TokenStreamBuilder {
    /// Create a new builder starting at beginning of file
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            current_position: Position::start(),
        }
    }

    /// Add a token, advancing the tracked position past its lexeme
    pub fn push_token(mut self, kind: TokenKind, text: &str) -> Self {
        let start = self.current_position;
        let end = start.advance_str(text);

        self.tokens.push(Token::new(text, kind, start));
        self.current_position = end;
        self
    }

    /// Skip over text without producing a token (whitespace)
    pub fn skip_text(mut self, text: &str) -> Self {
        self.current_position = self.current_position.advance_str(text);
        self
    }

    /// Build the token stream
    pub fn build(self) -> TokenStream {
        TokenStream::new(self.tokens)
    }

    /// Build with source map for enhanced error reporting
    pub fn build_with_source(self, source: String) -> TokenStream {
        let source_map = SourceMap::new(source);
        TokenStream::with_source_map(self.tokens, source_map)
    }
}

impl Default for TokenStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation functions for position accuracy
pub mod validation {
    use super::*;

    /// Validate that token positions are monotonically increasing
    pub fn validate_position_order(tokens: &[Token]) -> Result<(), String> {
        for window in tokens.windows(2) {
            let current = &window[0];
            let next = &window[1];

            // EOF tokens are pinned at end-of-input and may repeat
            if next.is_eof() {
                continue;
            }

            if current.span().end.offset > next.position.offset {
                return Err(format!(
                    "Position order violation: token ending at {} starts after next token at {}",
                    current.span().end.offset,
                    next.position.offset
                ));
            }
        }
        Ok(())
    }

    /// Validate token stream integrity
    pub fn validate_token_stream(stream: &TokenStream) -> Result<(), String> {
        validate_position_order(stream.all_tokens())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::keyword::Keyword;

    fn sample_stream() -> TokenStream {
        TokenStreamBuilder::new()
            .push_token(TokenKind::Keyword(Keyword::Var), "var")
            .skip_text(" ")
            .push_token(TokenKind::Identifier, "x")
            .skip_text(" ")
            .push_token(TokenKind::Keyword(Keyword::Is), "is")
            .skip_text(" ")
            .push_token(TokenKind::IntegerLiteral, "1")
            .push_token(TokenKind::Eof, "")
            .build()
    }

    #[test]
    fn test_navigation() {
        let mut stream = sample_stream();

        assert_eq!(stream.len(), 5);
        assert_eq!(stream.current().unwrap().lexeme, "var");
        assert_eq!(stream.peek().unwrap().lexeme, "x");
        assert_eq!(stream.peek_ahead(2).unwrap().lexeme, "is");

        stream.advance();
        assert_eq!(stream.current().unwrap().lexeme, "x");
        assert_eq!(stream.remaining_count(), 4);
    }

    #[test]
    fn test_positions_track_skipped_text() {
        let stream = sample_stream();
        let tokens: Vec<_> = stream.iter_significant().collect();

        assert_eq!(tokens[0].position.column, 1); // var
        assert_eq!(tokens[1].position.column, 5); // x
        assert_eq!(tokens[2].position.column, 7); // is
        assert_eq!(tokens[3].position.column, 10); // 1
    }

    #[test]
    fn test_comment_markers_filtered() {
        let stream = TokenStreamBuilder::new()
            .push_token(TokenKind::SlComment, "//")
            .push_token(TokenKind::Identifier, "x")
            .push_token(TokenKind::MlCommentStart, "/*")
            .push_token(TokenKind::MlCommentEnd, "*/")
            .push_token(TokenKind::Eof, "")
            .build();

        assert_eq!(stream.all_tokens().len(), 5);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.current().unwrap().lexeme, "x");
    }

    #[test]
    fn test_expect_kind() {
        let mut stream = sample_stream();

        let tok = stream.expect_kind(TokenKind::Keyword(Keyword::Var)).unwrap();
        assert_eq!(tok.lexeme, "var");

        let err = stream.expect_kind(TokenKind::Separator).unwrap_err();
        match err {
            TokenStreamError::UnexpectedToken {
                expected, found, ..
            } => {
                assert!(expected.contains("Separator"));
                assert_eq!(found, "x");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_expect_past_end() {
        let mut stream = TokenStreamBuilder::new().build();
        let err = stream.expect_kind(TokenKind::Eof).unwrap_err();
        assert!(matches!(
            err,
            TokenStreamError::UnexpectedEndOfStream { .. }
        ));
    }

    #[test]
    fn test_checkpoints() {
        let mut stream = sample_stream();

        let checkpoint = stream.save_position();
        stream.advance();
        stream.advance();
        assert_eq!(stream.current().unwrap().lexeme, "is");

        stream.restore_position(checkpoint);
        assert_eq!(stream.current().unwrap().lexeme, "var");
    }

    #[test]
    fn test_consume_if() {
        let mut stream = sample_stream();

        let consumed = stream.consume_if(|t| t.is_keyword(Keyword::Var));
        assert!(consumed.is_some());

        let not_consumed = stream.consume_if(|t| t.kind == TokenKind::Separator);
        assert!(not_consumed.is_none());
        assert_eq!(stream.current().unwrap().lexeme, "x");
    }

    #[test]
    fn test_has_eof() {
        assert!(sample_stream().has_eof());
        let no_eof = TokenStreamBuilder::new()
            .push_token(TokenKind::Identifier, "x")
            .build();
        assert!(!no_eof.has_eof());
    }

    #[test]
    fn test_validation_accepts_ordered_stream() {
        let stream = sample_stream();
        assert!(validation::validate_token_stream(&stream).is_ok());
    }

    #[test]
    fn test_format_error_with_source_map() {
        let stream = TokenStreamBuilder::new()
            .push_token(TokenKind::Identifier, "x")
            .build_with_source("x @ y".to_string());

        let span = Span::single(Position::new(2, 1, 3));
        let formatted = stream.format_error(span, "illegal character");
        assert!(formatted.contains("1:3"));
    }
}
