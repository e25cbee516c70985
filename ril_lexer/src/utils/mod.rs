//! RIL Utils - Shared types and utilities for the RIL lexer
//!
//! Provides dependency-free, shared primitive types and helper utilities
//! used by the lexer and its downstream token consumers.

pub mod span;

pub use span::{Position, SourceMap, Span};
