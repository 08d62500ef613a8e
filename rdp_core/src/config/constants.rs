pub mod compile_time {
    pub mod lexical {
        /// Maximum number of tokens produced by a single tokenize call
        /// SECURITY: Prevents runaway memory use on pathological inputs
        pub const MAX_TOKEN_COUNT: usize = 1_000_000;

        /// Maximum number of rules a single tokenizer may register
        /// PERFORMANCE: Every rule is tried at every offset
        pub const MAX_RULE_COUNT: usize = 1024;
    }

    pub mod syntax {
        /// Maximum tokens to examine while synchronizing after an error
        /// PERFORMANCE: Limits recovery scanning overhead
        pub const MAX_RECOVERY_SCAN_TOKENS: usize = 1000;
    }

    pub mod logging {
        /// Memory logger retention limit
        /// RESOURCE: Oldest events are dropped beyond this count
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length before truncation
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 4096;
    }
}
