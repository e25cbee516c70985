// Internal modules
pub mod batch;
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use lexical::{LexerError, LexicalAnalyzer, LexicalMetrics};
pub use pipeline::{PipelineError, PipelineOutput, PipelineResult};
pub use tokens::{Keyword, Token, TokenKind, TokenStream};
