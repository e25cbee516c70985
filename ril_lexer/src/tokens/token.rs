//! Token system for RIL lexical analysis
//!
//! A token is the immutable triple of lexeme text, kind, and the source
//! position of its first character. The kind set is closed: keywords are
//! carried through a nested `Keyword` enum, everything else is a dedicated
//! variant.
use crate::tokens::keyword::Keyword;
use crate::utils::{Position, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of token kinds produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // === KEYWORDS ===
    Keyword(Keyword),

    // === LITERALS ===
    Identifier,
    IntegerLiteral,
    RealLiteral,

    // === OPERATORS ===
    Range,     // ..
    Add,       // +
    Minus,     // -
    Multiply,  // *
    Divide,    // /
    Remainder, // %

    // Comparison operators
    Less,          // <
    LessEquals,    // <=
    Greater,       // >
    GreaterEquals, // >=
    Equals,        // =
    NotEquals,     // /=

    // === PUNCTUATION ===
    LBracket, // [
    RBracket, // ]
    LParen,   // (
    RParen,   // )
    Dot,      // .
    Comma,    // ,
    Assign,   // :=
    Colon,    // :

    /// Statement separator, produced by both `;` and newline
    Separator,

    // === INTERNAL COMMENT MARKERS ===
    // Part of the closed kind set for compatibility with the token
    // taxonomy, but never emitted by the scanner.
    SlComment,
    MlCommentStart,
    MlCommentEnd,

    /// Unrecognized character, carried as a one-character lexeme
    Illegal,
    /// End of input; repeated pulls keep yielding this kind
    Eof,
}

impl TokenKind {
    /// Check if this kind is an arithmetic or comparison operator
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::Range
                | Self::Add
                | Self::Minus
                | Self::Multiply
                | Self::Divide
                | Self::Remainder
                | Self::Less
                | Self::LessEquals
                | Self::Greater
                | Self::GreaterEquals
                | Self::Equals
                | Self::NotEquals
                | Self::Assign
        )
    }

    /// Check if this kind is a literal value or identifier
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Identifier | Self::IntegerLiteral | Self::RealLiteral
        )
    }

    /// Check if this kind is an internal comment marker
    pub fn is_comment_marker(&self) -> bool {
        matches!(
            self,
            Self::SlComment | Self::MlCommentStart | Self::MlCommentEnd
        )
    }

    /// Check if this kind should reach the parser
    pub fn is_significant(&self) -> bool {
        !self.is_comment_marker()
    }
}

/// Token classification for reporting and downstream filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Reserved words
    Keyword,
    /// Identifiers and numeric literals
    Literal,
    /// Arithmetic, comparison, and assignment operators
    Operator,
    /// Brackets, parens, dot, comma, colon
    Punctuation,
    /// Statement separators
    Separator,
    /// Internal comment markers
    CommentMarker,
    /// Illegal and EOF
    Special,
}

impl TokenKind {
    /// Get the classification of this kind
    pub fn token_class(&self) -> TokenClass {
        match self {
            Self::Keyword(_) => TokenClass::Keyword,
            Self::Identifier | Self::IntegerLiteral | Self::RealLiteral => TokenClass::Literal,
            Self::Range
            | Self::Add
            | Self::Minus
            | Self::Multiply
            | Self::Divide
            | Self::Remainder
            | Self::Less
            | Self::LessEquals
            | Self::Greater
            | Self::GreaterEquals
            | Self::Equals
            | Self::NotEquals
            | Self::Assign => TokenClass::Operator,
            Self::LBracket
            | Self::RBracket
            | Self::LParen
            | Self::RParen
            | Self::Dot
            | Self::Comma
            | Self::Colon => TokenClass::Punctuation,
            Self::Separator => TokenClass::Separator,
            Self::SlComment | Self::MlCommentStart | Self::MlCommentEnd => {
                TokenClass::CommentMarker
            }
            Self::Illegal | Self::Eof => TokenClass::Special,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(kw) => write!(f, "keyword `{}`", kw),
            other => write!(f, "{:?}", other),
        }
    }
}

/// An immutable token: lexeme text, kind, and position of the first
/// character in the original source (1-based line and column).
///
/// Two tokens are equal iff all three fields match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub lexeme: String,
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    /// Create a new token
    pub fn new(lexeme: impl Into<String>, kind: TokenKind, position: Position) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
            position,
        }
    }

    /// Create an EOF token pinned at the given position
    pub fn eof(position: Position) -> Self {
        Self::new(String::new(), TokenKind::Eof, position)
    }

    /// Check if this is the terminal EOF token
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Check if this token should reach the parser
    pub fn is_significant(&self) -> bool {
        self.kind.is_significant()
    }

    /// Check if this token matches a specific keyword
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// Get keyword if this token is a keyword
    pub fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Span covering the token's lexeme in the source
    pub fn span(&self) -> Span {
        Span::new(self.position, self.position.advance_str(&self.lexeme))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "<EOF>"),
            TokenKind::Separator if self.lexeme == "\n" => write!(f, "<newline>"),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_equality_requires_all_fields() {
        let a = Token::new("x", TokenKind::Identifier, Position::new(0, 1, 1));
        let b = Token::new("x", TokenKind::Identifier, Position::new(0, 1, 1));
        assert_eq!(a, b);

        let different_lexeme = Token::new("y", TokenKind::Identifier, Position::new(0, 1, 1));
        assert_ne!(a, different_lexeme);

        let different_kind = Token::new("x", TokenKind::IntegerLiteral, Position::new(0, 1, 1));
        assert_ne!(a, different_kind);

        let different_pos = Token::new("x", TokenKind::Identifier, Position::new(5, 1, 6));
        assert_ne!(a, different_pos);
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            TokenKind::Keyword(Keyword::Var).token_class(),
            TokenClass::Keyword
        );
        assert_eq!(TokenKind::RealLiteral.token_class(), TokenClass::Literal);
        assert_eq!(TokenKind::Assign.token_class(), TokenClass::Operator);
        assert_eq!(TokenKind::Comma.token_class(), TokenClass::Punctuation);
        assert_eq!(TokenKind::Separator.token_class(), TokenClass::Separator);
        assert_eq!(
            TokenKind::MlCommentEnd.token_class(),
            TokenClass::CommentMarker
        );
        assert_eq!(TokenKind::Eof.token_class(), TokenClass::Special);
    }

    #[test]
    fn test_significance_filters_comment_markers() {
        assert!(TokenKind::Separator.is_significant());
        assert!(TokenKind::Illegal.is_significant());
        assert!(TokenKind::Eof.is_significant());
        assert!(!TokenKind::SlComment.is_significant());
        assert!(!TokenKind::MlCommentStart.is_significant());
        assert!(!TokenKind::MlCommentEnd.is_significant());
    }

    #[test]
    fn test_token_span() {
        let tok = Token::new(
            "routine",
            TokenKind::Keyword(Keyword::Routine),
            Position::new(4, 2, 3),
        );
        let span = tok.span();
        assert_eq!(span.start.column, 3);
        assert_eq!(span.end.column, 10);
        assert_eq!(span.len(), 7);
    }

    #[test]
    fn test_keyword_accessors() {
        let tok = Token::new("if", TokenKind::Keyword(Keyword::If), Position::start());
        assert!(tok.is_keyword(Keyword::If));
        assert!(!tok.is_keyword(Keyword::Else));
        assert_eq!(tok.as_keyword(), Some(Keyword::If));

        let ident = Token::new("iff", TokenKind::Identifier, Position::start());
        assert_eq!(ident.as_keyword(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Token::new("..", TokenKind::Range, Position::start()).to_string(),
            ".."
        );
        assert_eq!(Token::eof(Position::start()).to_string(), "<EOF>");
        assert_eq!(
            Token::new("\n", TokenKind::Separator, Position::start()).to_string(),
            "<newline>"
        );
    }

    #[test]
    fn test_serde_wire_shape() {
        let tok = Token::new("12", TokenKind::IntegerLiteral, Position::new(0, 1, 1));
        let json = serde_json::to_string(&tok).unwrap();
        assert!(json.contains("\"lexeme\":\"12\""));
        assert!(json.contains("\"line\":1"));

        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tok);
    }
}
