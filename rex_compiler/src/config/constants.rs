pub mod compile_time {
    pub mod scanning {
        /// Maximum pattern size in bytes (1MB)
        /// SECURITY: bounds memory for a single compilation
        pub const MAX_PATTERN_BYTES: usize = 1_048_576;

        /// Maximum number of tokens produced from a single pattern
        /// SECURITY: prevents token explosion from adversarial patterns
        pub const MAX_TOKEN_COUNT: usize = 1_000_000;

        /// Buffer size for scan metrics collection
        /// RESOURCE: controls memory allocation for metrics
        pub const METRICS_BUFFER_SIZE: usize = 1000;
    }

    pub mod syntax {
        /// Maximum group nesting depth
        /// SECURITY: prevents stack overflow in recursive descent
        pub const MAX_GROUP_DEPTH: usize = 64;

        /// Maximum error history buffer size
        /// RESOURCE: controls memory usage for error tracking
        pub const MAX_ERROR_HISTORY: usize = 50;

        /// Token lookahead limit for parsing decisions
        /// PERFORMANCE: controls lookahead memory usage
        pub const MAX_LOOKAHEAD_TOKENS: usize = 10;
    }

    pub mod compiling {
        /// Maximum bounded-quantifier value
        /// SECURITY: bounds program growth from `{m,n}` repetition
        pub const MAX_QUANTIFIER_BOUND: u32 = 1000;

        /// Maximum scalar spans in a compiled program
        /// SECURITY: bounds memory of the canonical form
        pub const MAX_PROGRAM_SPANS: usize = 100_000;

        /// Maximum alternation branches per pattern
        /// SECURITY: prevents branch explosion
        pub const MAX_ALTERNATION_BRANCHES: usize = 10_000;
    }

    pub mod batch_processing {
        /// Maximum number of worker threads for pattern-set compilation
        /// RESOURCE: controls system resource consumption
        pub const MAX_WORKER_THREADS: usize = 8;

        /// Maximum patterns per batch
        /// SECURITY: prevents memory exhaustion in batch mode
        pub const MAX_PATTERNS_PER_BATCH: usize = 10_000;
    }

    pub mod security {
        /// Maximum processing time per pattern (seconds)
        /// SECURITY: bounds time spent on a single compilation
        pub const MAX_PROCESSING_TIME_SECONDS: u64 = 300;

        /// Maximum concurrent compilation operations
        /// RESOURCE: prevents resource exhaustion
        pub const MAX_CONCURRENT_OPERATIONS: usize = 100;
    }

    pub mod logging {
        /// Maximum errors to collect before stopping
        /// RESOURCE: prevents unbounded error accumulation
        pub const MAX_ERROR_COLLECTION: usize = 1_000;

        /// Log buffer size for batch operations
        /// RESOURCE: controls memory usage for logging
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: bounds memory per message
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Maximum log events per pattern before truncation
        /// SECURITY: prevents log event explosion per pattern
        pub const MAX_LOG_EVENTS_PER_PATTERN: usize = 1_000;

        /// Minimum log level for security events (cannot be changed at runtime)
        /// SECURITY: ensures security events are always logged
        pub const SECURITY_MIN_LOG_LEVEL: u8 = 1; // Warning level minimum
    }
}
