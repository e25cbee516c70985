//! Core lexical analyzer implementation
//!
//! Pull-based scanner for RIL source text. The parser repeatedly asks for
//! the next token; the scanner advances the character source, accumulates
//! the lexeme, classifies, and returns one token per call. A single-slot
//! deferred token covers the two constructs where one scan naturally
//! produces two tokens (an integer followed by `..`, and the statement
//! separator implied by the newline that ends a `//` comment).

use crate::config::constants::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{Keyword, Token, TokenClass, TokenKind, TokenStream};
use crate::utils::{SourceMap, Span};
use crate::{log_coded_warning, log_debug, log_error, log_success};
use std::collections::HashMap;

use super::buffer::LexemeBuffer;
use super::reader::SourceReader;

/// Lexical analysis errors
///
/// The pull interface itself never fails: bad input surfaces as `Illegal`
/// tokens in the stream. The only hard error is the compile-time token
/// budget enforced by the eager wrapper.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexerError {
    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }
}

/// Character classification driving recognizer dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    /// ASCII letter or underscore
    IdentifierStart,
    /// ASCII decimal digit
    Digit,
    /// `.` - range, real literal, or record-attribute dot
    Dot,
    /// `<`, `>`, `:` - may be followed by `=`
    ComparisonPrefix,
    /// `/` - division, `/=`, or a comment opener
    Slash,
    /// Unambiguous one-character token
    SingleSymbol,
    /// `\n` - statement separator
    Newline,
    /// Non-newline whitespace, silently skipped
    Whitespace,
    /// Anything else
    Illegal,
}

fn classify_char(c: char) -> CharClass {
    match c {
        'a'..='z' | 'A'..='Z' | '_' => CharClass::IdentifierStart,
        '0'..='9' => CharClass::Digit,
        '.' => CharClass::Dot,
        '<' | '>' | ':' => CharClass::ComparisonPrefix,
        '/' => CharClass::Slash,
        '(' | ')' | '[' | ']' | '+' | '-' | '*' | '%' | '=' | ',' | ';' => CharClass::SingleSymbol,
        '\n' => CharClass::Newline,
        c if c.is_whitespace() => CharClass::Whitespace,
        _ => CharClass::Illegal,
    }
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Essential lexical analysis metrics with runtime preferences
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub number_tokens: usize,
    pub operator_tokens: usize,
    pub separator_tokens: usize,
    pub illegal_tokens: usize,
    pub longest_identifier: usize,

    // Runtime preference-controlled metrics
    pub operator_usage_patterns: HashMap<String, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        match token.kind.token_class() {
            TokenClass::Keyword => self.keyword_tokens += 1,
            TokenClass::Literal => {
                if token.kind == TokenKind::Identifier {
                    self.identifier_tokens += 1;
                    self.record_identifier_length(token.lexeme.chars().count(), preferences);
                } else {
                    self.number_tokens += 1;
                }
            }
            TokenClass::Operator => {
                self.operator_tokens += 1;

                // Track operator patterns if enabled
                if preferences.track_operator_patterns {
                    *self
                        .operator_usage_patterns
                        .entry(token.lexeme.clone())
                        .or_insert(0) += 1;
                }
            }
            TokenClass::Separator => {
                if preferences.include_separators_in_counts {
                    self.separator_tokens += 1;
                }
            }
            TokenClass::Special => {
                if token.kind == TokenKind::Illegal {
                    self.illegal_tokens += 1;
                }
            }
            TokenClass::Punctuation | TokenClass::CommentMarker => {}
        }
    }

    pub(crate) fn record_identifier_length(
        &mut self,
        length: usize,
        preferences: &LexicalPreferences,
    ) {
        self.longest_identifier = self.longest_identifier.max(length);

        if preferences.log_identifier_statistics {
            log_debug!("Identifier processed",
                "length" => length,
                "max_so_far" => self.longest_identifier
            );
        }
    }
}

/// Pull-based lexical analyzer for RIL source text
///
/// One instance processes one source text sequentially. `next_token()` is
/// not safe for concurrent invocation on the same instance; independent
/// instances share nothing and may run on separate threads.
pub struct LexicalAnalyzer {
    reader: SourceReader,
    buffer: LexemeBuffer,
    /// Current lookahead character, `None` at end of input
    current: Option<char>,
    /// Single-slot deferred token; depth never exceeds one
    deferred: Option<Token>,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            reader: SourceReader::new(""),
            buffer: LexemeBuffer::new(),
            current: None,
            deferred: None,
            metrics: LexicalMetrics::default(),
            preferences: LexicalPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            reader: SourceReader::new(""),
            buffer: LexemeBuffer::new(),
            current: None,
            deferred: None,
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Reset all internal state and begin a run over the given full text.
    pub fn tokenize(&mut self, source_text: &str) {
        self.reader = SourceReader::new(source_text);
        self.buffer.flush();
        self.deferred = None;
        self.metrics = LexicalMetrics::default();
        self.current = self.reader.read();
    }

    /// The sole pull interface: returns tokens lazily, one per call,
    /// terminating in an infinite tail of `Eof` tokens.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        if !token.is_eof() {
            self.metrics.record_token(&token, &self.preferences);
        }
        token
    }

    fn scan_token(&mut self) -> Token {
        loop {
            // Deferred token first: guarantees at most one token is ever
            // queued between pulls
            if let Some(token) = self.deferred.take() {
                return token;
            }

            let Some(c) = self.current else {
                return Token::eof(self.reader.position());
            };

            match classify_char(c) {
                CharClass::IdentifierStart => return self.scan_keyword_or_identifier(),
                CharClass::Digit => return self.scan_integer_or_real(),
                CharClass::Dot => return self.scan_dot_prefixed(),
                CharClass::ComparisonPrefix => return self.scan_comparison_prefixed(c),
                CharClass::Slash => {
                    // Comment forms produce no token; loop continues
                    if let Some(token) = self.scan_slash_prefixed() {
                        return token;
                    }
                }
                CharClass::SingleSymbol => return self.scan_single_symbol(c),
                CharClass::Newline => return self.scan_newline(),
                CharClass::Whitespace => {
                    self.current = self.reader.read();
                }
                CharClass::Illegal => return self.scan_illegal(c),
            }
        }
    }

    /// Current accumulated lexeme; flushes the buffer for the next scan.
    fn take_lexeme(&mut self) -> String {
        let lexeme = self.buffer.as_str().to_string();
        self.buffer.flush();
        lexeme
    }

    /// Identifiers and keywords: maximal run of letters, digits, and
    /// underscores, classified by exact-match table lookup.
    fn scan_keyword_or_identifier(&mut self) -> Token {
        let position = self.reader.position();

        while let Some(c) = self.current {
            if !is_identifier_continue(c) {
                break;
            }
            self.buffer.push(c);
            self.current = self.reader.read();
        }

        let lexeme = self.take_lexeme();
        let kind = match Keyword::lookup(&lexeme) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier,
        };

        if kind == TokenKind::Identifier && lexeme.chars().count() > MAX_IDENTIFIER_LENGTH {
            log_coded_warning!(codes::lexical::IDENTIFIER_TOO_LONG,
                "Identifier exceeds maximum length",
                span = Span::single(position),
                "length" => lexeme.chars().count(),
                "max" => MAX_IDENTIFIER_LENGTH
            );
        }

        Token::new(lexeme, kind, position)
    }

    /// Numeric literals starting with a digit:
    /// integers, reals, and integers followed by the `..` operator.
    /// Range wins over real literal, so `1..10` is three tokens.
    fn scan_integer_or_real(&mut self) -> Token {
        let position = self.reader.position();

        while let Some(c) = self.current {
            if !c.is_ascii_digit() {
                break;
            }
            self.buffer.push(c);
            self.current = self.reader.read();
        }

        if self.current != Some('.') {
            return Token::new(self.take_lexeme(), TokenKind::IntegerLiteral, position);
        }

        let dot_position = self.reader.position();
        let after_dot = self.reader.read();

        match after_dot {
            // '..' operator: the digit run is an integer, the range token
            // is deferred until the next pull
            Some('.') => {
                let token = Token::new(self.take_lexeme(), TokenKind::IntegerLiteral, position);
                self.deferred = Some(Token::new("..", TokenKind::Range, dot_position));
                self.current = self.reader.read();
                token
            }
            // fractional part: one real literal combining both digit runs
            Some(c) if c.is_ascii_digit() => {
                self.buffer.push('.');
                let mut next = Some(c);
                while let Some(d) = next {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    self.buffer.push(d);
                    next = self.reader.read();
                }
                self.current = next;
                Token::new(self.take_lexeme(), TokenKind::RealLiteral, position)
            }
            // bare trailing dot: real literal with implicit empty
            // fraction, so `5.` means 5.0
            other => {
                self.buffer.push('.');
                self.current = other;
                Token::new(self.take_lexeme(), TokenKind::RealLiteral, position)
            }
        }
    }

    /// Dot-prefixed forms: `..`, reals like `.125`, and the lone `.`
    /// used for record-attribute access.
    fn scan_dot_prefixed(&mut self) -> Token {
        let position = self.reader.position();
        self.buffer.push('.');
        let next = self.reader.read();

        match next {
            Some('.') => {
                self.buffer.push('.');
                let token = Token::new(self.take_lexeme(), TokenKind::Range, position);
                self.current = self.reader.read();
                token
            }
            Some(c) if c.is_ascii_digit() => {
                let mut next = Some(c);
                while let Some(d) = next {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    self.buffer.push(d);
                    next = self.reader.read();
                }
                self.current = next;
                Token::new(self.take_lexeme(), TokenKind::RealLiteral, position)
            }
            other => {
                self.current = other;
                Token::new(self.take_lexeme(), TokenKind::Dot, position)
            }
        }
    }

    /// `<`, `>`, `:` and their `=`-suffixed forms.
    fn scan_comparison_prefixed(&mut self, first: char) -> Token {
        let position = self.reader.position();
        self.buffer.push(first);
        let next = self.reader.read();

        let kind = if next == Some('=') {
            self.buffer.push('=');
            self.current = self.reader.read();
            match first {
                '<' => TokenKind::LessEquals,
                '>' => TokenKind::GreaterEquals,
                _ => TokenKind::Assign,
            }
        } else {
            self.current = next;
            match first {
                '<' => TokenKind::Less,
                '>' => TokenKind::Greater,
                _ => TokenKind::Colon,
            }
        };

        Token::new(self.take_lexeme(), kind, position)
    }

    /// `/=`, both comment forms, and bare `/`.
    ///
    /// Comments surface no tokens of their own, so this recognizer may
    /// return `None` and let the dispatch loop continue. The newline that
    /// ends a `//` comment still yields a statement separator, via the
    /// deferred slot.
    fn scan_slash_prefixed(&mut self) -> Option<Token> {
        let position = self.reader.position();
        self.buffer.push('/');
        let next = self.reader.read();

        match next {
            Some('=') => {
                self.buffer.push('=');
                let token = Token::new(self.take_lexeme(), TokenKind::NotEquals, position);
                self.current = self.reader.read();
                Some(token)
            }
            // multi-line comment: discard until `*/` or end of input
            Some('*') => {
                self.buffer.flush();
                let mut previous = '\0';
                let mut closed = false;
                loop {
                    match self.reader.read() {
                        Some('/') if previous == '*' => {
                            closed = true;
                            break;
                        }
                        Some(c) => previous = c,
                        None => break,
                    }
                }
                if !closed {
                    // Token stream is unchanged; the diagnostic goes
                    // through the logging layer only
                    log_coded_warning!(codes::lexical::UNTERMINATED_COMMENT,
                        "Multi-line comment not closed before end of input",
                        span = Span::single(position)
                    );
                }
                self.current = self.reader.read();
                None
            }
            // single-line comment: discard through end of line; the
            // terminating newline is still a statement separator
            Some('/') => {
                self.buffer.flush();
                loop {
                    match self.reader.read() {
                        Some('\n') => {
                            self.deferred = Some(Token::new(
                                "\n",
                                TokenKind::Separator,
                                self.reader.position(),
                            ));
                            break;
                        }
                        Some(_) => {}
                        None => break,
                    }
                }
                self.current = self.reader.read();
                None
            }
            other => {
                let token = Token::new(self.take_lexeme(), TokenKind::Divide, position);
                self.current = other;
                Some(token)
            }
        }
    }

    /// Unambiguous one-character tokens.
    fn scan_single_symbol(&mut self, c: char) -> Token {
        let position = self.reader.position();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '+' => TokenKind::Add,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiply,
            '%' => TokenKind::Remainder,
            '=' => TokenKind::Equals,
            ',' => TokenKind::Comma,
            _ => TokenKind::Separator, // ';'
        };

        self.buffer.push(c);
        let token = Token::new(self.take_lexeme(), kind, position);
        self.current = self.reader.read();
        token
    }

    /// Newline as statement separator.
    fn scan_newline(&mut self) -> Token {
        let position = self.reader.position();
        self.current = self.reader.read();
        Token::new("\n", TokenKind::Separator, position)
    }

    /// Any unrecognized character becomes an `Illegal` token carrying the
    /// offending character; the run continues.
    fn scan_illegal(&mut self, c: char) -> Token {
        let position = self.reader.position();
        self.buffer.push(c);
        let token = Token::new(self.take_lexeme(), TokenKind::Illegal, position);
        self.current = self.reader.read();

        log_coded_warning!(codes::lexical::ILLEGAL_CHARACTER,
            "Illegal character in source text",
            span = Span::single(position),
            "character" => c
        );

        token
    }

    /// Get current metrics
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Get current preferences
    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Update preferences (runtime configurable)
    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }

    // ========================================================================
    // Eager wrappers
    // ========================================================================

    /// Drive `next_token()` to EOF over a plain source string, enforcing
    /// the compile-time token budget.
    pub fn tokenize_source(&mut self, source_text: &str) -> Result<TokenStream, LexerError> {
        self.tokenize(source_text);

        let mut tokens = Vec::new();
        loop {
            if tokens.len() >= MAX_TOKEN_COUNT {
                let error = LexerError::TooManyTokens {
                    count: tokens.len(),
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    "token_count" => tokens.len(),
                    "limit" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }

            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(TokenStream::with_source_map(
            tokens,
            SourceMap::new(source_text.to_string()),
        ))
    }

    /// Tokenize file processing result with file-aware logging.
    pub fn tokenize_file_result(
        &mut self,
        file_result: &FileProcessingResult,
    ) -> Result<TokenStream, LexerError> {
        let file_path = file_result.metadata.path.display().to_string();

        log_debug!("Starting lexical analysis",
            "file" => file_path.as_str(),
            "char_count" => file_result.char_count(),
            "line_count" => file_result.metadata.line_count,
            "file_size_bytes" => file_result.metadata.size,
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let token_stream = self.tokenize_source(&file_result.source)?;

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed successfully",
            "file" => file_path.as_str(),
            "token_count" => token_stream.len(),
            "keywords" => self.metrics.keyword_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "numbers" => self.metrics.number_tokens,
            "operators" => self.metrics.operator_tokens,
            "illegal_tokens" => self.metrics.illegal_tokens,
            "longest_identifier" => self.metrics.longest_identifier,
            "file_size_bytes" => file_result.metadata.size,
            "file_lines" => file_result.metadata.line_count
        );

        Ok(token_stream)
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn kinds_of(source: &str) -> Vec<TokenKind> {
        tokens_of(source).into_iter().map(|t| t.kind).collect()
    }

    fn tokens_of(source: &str) -> Vec<Token> {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.tokenize(source);
        let mut tokens = Vec::new();
        loop {
            let token = analyzer.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    #[test]
    fn test_whitespace_only_yields_single_eof() {
        for source in ["", "   ", " \t  \r ", "\t"] {
            let tokens = tokens_of(source);
            assert_eq!(tokens.len(), 1, "source: {:?}", source);
            assert!(tokens[0].is_eof());
        }
    }

    #[test]
    fn test_eof_is_idempotent_with_pinned_position() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.tokenize("x");
        assert_eq!(analyzer.next_token().kind, TokenKind::Identifier);

        let first_eof = analyzer.next_token();
        assert!(first_eof.is_eof());
        for _ in 0..5 {
            let again = analyzer.next_token();
            assert_eq!(again, first_eof);
        }
    }

    #[test]
    fn test_integer_range_integer() {
        let tokens = tokens_of("12..34");
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, ["12", "..", "34", ""]);
        assert_eq!(
            kinds_of("12..34"),
            [
                TokenKind::IntegerLiteral,
                TokenKind::Range,
                TokenKind::IntegerLiteral,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_real_literal() {
        let tokens = tokens_of("12.34");
        assert_eq!(tokens[0].lexeme, "12.34");
        assert_eq!(tokens[0].kind, TokenKind::RealLiteral);
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_real_with_trailing_dot() {
        let tokens = tokens_of("5.");
        assert_eq!(tokens[0].lexeme, "5.");
        assert_eq!(tokens[0].kind, TokenKind::RealLiteral);
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_real_with_leading_dot() {
        let tokens = tokens_of(".25");
        assert_eq!(tokens[0].lexeme, ".25");
        assert_eq!(tokens[0].kind, TokenKind::RealLiteral);
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_lone_dot_and_lone_range() {
        assert_eq!(kinds_of("."), [TokenKind::Dot, TokenKind::Eof]);
        assert_eq!(kinds_of(".."), [TokenKind::Range, TokenKind::Eof]);
    }

    #[test]
    fn test_range_deferred_at_end_of_input() {
        assert_eq!(
            kinds_of("7.."),
            [TokenKind::IntegerLiteral, TokenKind::Range, TokenKind::Eof]
        );
    }

    #[test]
    fn test_keyword_vs_identifier() {
        let tokens = tokens_of("var");
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Var));

        let tokens = tokens_of("vary");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "vary");
    }

    #[test]
    fn test_every_keyword_is_recognized() {
        for &keyword in crate::tokens::ALL_KEYWORDS {
            let tokens = tokens_of(keyword.as_str());
            assert_eq!(
                tokens[0].kind,
                TokenKind::Keyword(keyword),
                "keyword: {}",
                keyword
            );
            assert_eq!(tokens[0].lexeme, keyword.as_str());
        }
    }

    #[test]
    fn test_not_equals() {
        let tokens = tokens_of("a /= b");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::Identifier,
                TokenKind::NotEquals,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
        assert_eq!(tokens[1].lexeme, "/=");
    }

    #[test]
    fn test_comparison_and_assign_operators() {
        assert_eq!(
            kinds_of("< <= > >= = /= := :"),
            [
                TokenKind::Less,
                TokenKind::LessEquals,
                TokenKind::Greater,
                TokenKind::GreaterEquals,
                TokenKind::Equals,
                TokenKind::NotEquals,
                TokenKind::Assign,
                TokenKind::Colon,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_single_character_tokens() {
        assert_eq!(
            kinds_of("()[]+-*%,;"),
            [
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Add,
                TokenKind::Minus,
                TokenKind::Multiply,
                TokenKind::Remainder,
                TokenKind::Comma,
                TokenKind::Separator,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_division() {
        assert_eq!(
            kinds_of("a / b"),
            [
                TokenKind::Identifier,
                TokenKind::Divide,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_single_line_comment_defers_separator() {
        let tokens = tokens_of("x := 1 // note\ny := 2");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::IntegerLiteral,
                TokenKind::Separator,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::IntegerLiteral,
                TokenKind::Eof
            ]
        );

        // The separator is the comment's terminating newline
        assert_eq!(tokens[3].lexeme, "\n");
        assert_eq!(tokens[3].position.line, 1);
        assert_eq!(tokens[3].position.column, 15);
        // Next statement starts on line 2
        assert_eq!(tokens[4].position.line, 2);
        assert_eq!(tokens[4].position.column, 1);
    }

    #[test]
    fn test_single_line_comment_at_eof_has_no_separator() {
        assert_eq!(
            kinds_of("x // trailing"),
            [TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_multi_line_comment_is_invisible() {
        let tokens = tokens_of("/* abc */x");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "x");
        assert_eq!(tokens[0].position.column, 10);
    }

    #[test]
    fn test_multi_line_comment_spanning_lines() {
        let tokens = tokens_of("a /* one\ntwo */ b");
        assert_eq!(tokens[0].lexeme, "a");
        assert_eq!(tokens[1].lexeme, "b");
        assert_eq!(tokens[1].position.line, 2);
        assert_eq!(tokens[1].position.column, 8);
    }

    #[test]
    fn test_multi_line_comment_with_inner_stars() {
        assert_eq!(kinds_of("/* ** */x"), [TokenKind::Identifier, TokenKind::Eof]);
        assert_eq!(kinds_of("/***/x"), [TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn test_unterminated_multi_line_comment_silently_dropped() {
        assert_eq!(kinds_of("x /* abc"), [TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn test_newline_separator() {
        let tokens = tokens_of("a\nb");
        assert_eq!(tokens[1].kind, TokenKind::Separator);
        assert_eq!(tokens[1].lexeme, "\n");
        assert_eq!(tokens[1].position, Position::new(1, 1, 2));
    }

    #[test]
    fn test_carriage_return_is_skipped() {
        let kinds = kinds_of("a\r\nb");
        assert_eq!(
            kinds,
            [
                TokenKind::Identifier,
                TokenKind::Separator,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_illegal_character() {
        let tokens = tokens_of("a @ b");
        assert_eq!(tokens[1].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].lexeme, "@");
        // The run continues past the bad character
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_positions_are_first_character_positions() {
        let source = "var total is 1\nwhile total < 10 loop";
        let tokens = tokens_of(source);

        for token in tokens.iter().filter(|t| !t.is_eof()) {
            let line_text = source.lines().nth((token.position.line - 1) as usize).unwrap();
            let column_index = (token.position.column - 1) as usize;
            let at_position: String = line_text
                .chars()
                .skip(column_index)
                .take(token.lexeme.chars().count())
                .collect();
            let expected = if token.lexeme == "\n" { "" } else { &token.lexeme };
            assert_eq!(
                &at_position, expected,
                "token {:?} at {}",
                token.lexeme, token.position
            );
        }
    }

    #[test]
    fn test_range_token_position() {
        let tokens = tokens_of("12..34");
        assert_eq!(tokens[1].kind, TokenKind::Range);
        assert_eq!(tokens[1].position, Position::new(2, 1, 3));
        assert_eq!(tokens[2].position, Position::new(4, 1, 5));
    }

    #[test]
    fn test_round_trip_reconstruction() {
        let source = "var x : integer is 5 ;\ny := x + 1 /* note */ ;";
        let tokens = tokens_of(source);

        let reconstructed: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        let expected: String = source
            .chars()
            .filter(|c| !c.is_whitespace() || *c == '\n')
            .collect::<String>()
            .replace("/*note*/", "");
        assert_eq!(reconstructed, expected);
    }

    #[test]
    fn test_declaration_statement() {
        let tokens = tokens_of("var range_end : integer is 10");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::Keyword(Keyword::Var),
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Keyword(Keyword::Integer),
                TokenKind::Keyword(Keyword::Is),
                TokenKind::IntegerLiteral,
                TokenKind::Eof
            ]
        );
        assert_eq!(tokens[1].lexeme, "range_end");
    }

    #[test]
    fn test_for_loop_with_range() {
        let kinds = kinds_of("for i in 1..n loop");
        assert_eq!(
            kinds,
            [
                TokenKind::Keyword(Keyword::For),
                TokenKind::Identifier,
                TokenKind::Keyword(Keyword::In),
                TokenKind::IntegerLiteral,
                TokenKind::Range,
                TokenKind::Identifier,
                TokenKind::Keyword(Keyword::Loop),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_record_attribute_access() {
        let kinds = kinds_of("point.x := point.y");
        assert_eq!(
            kinds,
            [
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_array_indexing() {
        let kinds = kinds_of("values[i] := values[i] % 2");
        assert_eq!(
            kinds,
            [
                TokenKind::Identifier,
                TokenKind::LBracket,
                TokenKind::Identifier,
                TokenKind::RBracket,
                TokenKind::Assign,
                TokenKind::Identifier,
                TokenKind::LBracket,
                TokenKind::Identifier,
                TokenKind::RBracket,
                TokenKind::Remainder,
                TokenKind::IntegerLiteral,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_tokenize_resets_state() {
        let mut analyzer = LexicalAnalyzer::new();

        analyzer.tokenize("1..");
        assert_eq!(analyzer.next_token().kind, TokenKind::IntegerLiteral);
        // Deferred range still pending; a reset must clear it
        analyzer.tokenize("x");
        let token = analyzer.next_token();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.position, Position::new(0, 1, 1));
    }

    #[test]
    fn test_metrics_accumulate() {
        let mut analyzer = LexicalAnalyzer::with_preferences(LexicalPreferences {
            track_operator_patterns: true,
            ..LexicalPreferences::default()
        });

        let stream = analyzer.tokenize_source("var x is 1 + 2 + longer_name").unwrap();
        assert!(stream.has_eof());

        let metrics = analyzer.metrics();
        assert_eq!(metrics.keyword_tokens, 2); // var, is
        assert_eq!(metrics.identifier_tokens, 2); // x, longer_name
        assert_eq!(metrics.number_tokens, 2); // 1, 2
        assert_eq!(metrics.operator_tokens, 2); // +, +
        assert_eq!(metrics.longest_identifier, "longer_name".len());
        assert_eq!(metrics.operator_usage_patterns.get("+"), Some(&2));
    }

    #[test]
    fn test_illegal_tokens_counted() {
        let mut analyzer = LexicalAnalyzer::new();
        let _ = analyzer.tokenize_source("a @ # b").unwrap();
        assert_eq!(analyzer.metrics().illegal_tokens, 2);
    }

    #[test]
    fn test_tokenize_source_stream_has_eof() {
        let mut analyzer = LexicalAnalyzer::new();
        let stream = analyzer.tokenize_source("if x then y end").unwrap();
        assert!(stream.has_eof());
        assert_eq!(stream.len(), 6);
    }

    #[test]
    fn test_next_token_without_tokenize_is_eof() {
        let mut analyzer = LexicalAnalyzer::new();
        assert!(analyzer.next_token().is_eof());
    }

    #[test]
    fn test_identifier_with_leading_underscore_and_digits() {
        let tokens = tokens_of("_tmp2");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "_tmp2");
    }

    #[test]
    fn test_integer_with_leading_zeros() {
        let tokens = tokens_of("007");
        assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[0].lexeme, "007");
    }
}
