//! Token system for RIL lexical analysis
//!
//! This module provides the complete token system for the RIL lexer,
//! converting raw source text into a stream of tokens that can be consumed
//! by a parser.
//!
//! # Overview
//!
//! The tokens module defines the vocabulary of the lexer: the closed set
//! of token kinds, the keyword table, and the stream abstraction handed to
//! the downstream parser.
//!
//! ## Key Components
//!
//! - **[`Token`]** - Immutable (lexeme, kind, position) record
//! - **[`TokenKind`]** - Complete enumeration of all RIL token kinds
//! - **[`Keyword`]** - The 26 reserved words with their lookup table
//! - **[`TokenStream`]** - Stream management with lookahead and filtering
//!
//! ## Token Kinds
//!
//! ### Keywords
//! Declarations (`var`, `type`, `is`, `end`), type names (`integer`,
//! `real`, `boolean`), composite constructors (`record`, `array`), control
//! flow (`while`, `loop`, `for`, `in`, `reverse`, `if`, `then`, `else`),
//! routines (`routine`, `return`), logical words (`and`, `or`, `not`,
//! `xor`), boolean literals (`true`, `false`), and `print`.
//!
//! ### Literals
//! Identifiers, integer literals, and real literals. A real literal keeps
//! its exact source spelling: `5.` and `.25` are valid reals.
//!
//! ### Operators and punctuation
//! `..` `+` `-` `*` `/` `%` `[` `]` `<` `<=` `>` `>=` `=` `/=` `.` `,`
//! `:=` `:` `(` `)`, and `Separator` for both `;` and newline.
//!
//! ### Special kinds
//! `Illegal` carries a single unrecognized character; `Eof` terminates
//! every stream. The comment-marker kinds are internal and never emitted
//! by the scanner.
//!
//! ## Statement separators
//!
//! `;` and newline map to the same `Separator` kind: the grammar treats
//! them as interchangeable statement terminators. The lexeme preserves
//! which form appeared in the source.

pub mod keyword;
pub mod token;
pub mod token_stream;

// Re-export key types for convenience
pub use keyword::{is_reserved_keyword, Keyword, ALL_KEYWORDS};
pub use token::{Token, TokenClass, TokenKind};
pub use token_stream::{TokenStream, TokenStreamBuilder, TokenStreamError};

// Re-export span types from utils
pub use crate::utils::{Position, SourceMap, Span};
