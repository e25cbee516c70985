pub mod compile_time {
    pub mod file_processing {
        /// Maximum file size allowed for processing (10MB)
        /// SECURITY: Prevents DoS attacks via large file uploads
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Threshold for considering a file "large" (1MB)
        /// PERFORMANCE: Affects processing strategy and complexity analysis
        pub const LARGE_FILE_THRESHOLD: u64 = 1024 * 1024;

        /// Maximum line count for complexity analysis
        /// SECURITY: Prevents algorithmic complexity attacks
        pub const MAX_LINE_COUNT_FOR_ANALYSIS: usize = 100_000;

        /// Performance logging buffer size
        /// RESOURCE: Controls memory usage for metrics collection
        pub const PERFORMANCE_LOG_BUFFER_SIZE: usize = 1000;
    }

    pub mod lexical {
        /// Maximum identifier length (255 characters)
        /// SECURITY: Prevents parser complexity attacks
        pub const MAX_IDENTIFIER_LENGTH: usize = 255;

        /// Maximum comment length to prevent memory exhaustion
        /// SECURITY: Limits resource consumption per comment
        pub const MAX_COMMENT_LENGTH: usize = 10_000;

        /// Maximum number of tokens allowed in a single file
        /// SECURITY: Prevents DoS via token explosion attacks
        pub const MAX_TOKEN_COUNT: usize = 1_000_000;

        /// Buffer size for lexical metrics collection
        /// RESOURCE: Controls memory allocation for metrics
        pub const METRICS_BUFFER_SIZE: usize = 1000;
    }

    pub mod logging {
        /// Maximum errors to collect before stopping
        /// RESOURCE: Prevents unbounded error accumulation
        pub const MAX_ERROR_COLLECTION: usize = 1_000;

        /// Log buffer size for batch operations
        /// RESOURCE: Controls memory usage for logging
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Maximum log events per file before truncation
        /// SECURITY: Prevents DoS via log event explosion
        pub const MAX_LOG_EVENTS_PER_FILE: usize = 1_000;

        /// Minimum log level for security events (cannot be changed at runtime)
        /// SECURITY: Ensures security events are always logged
        pub const SECURITY_MIN_LOG_LEVEL: u8 = 1; // Warning level minimum

        /// Maximum audit log retention buffer size
        /// SECURITY: Ensures audit trail completeness
        pub const AUDIT_LOG_RETENTION_BUFFER: usize = 50_000;
    }
}
