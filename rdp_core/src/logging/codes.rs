//! Error and success codes with their classification metadata
//!
//! Every code used by the tokenizer, cursor and logging system is declared
//! here together with its registry entry.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
}

impl ErrorMetadata {
    const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
        }
    }
}

/// Codes for events logged without a specific code
pub mod generic {
    use super::Code;

    pub const WARNING: Code = Code::new("W000");
    pub const INFO: Code = Code::new("I000");
    pub const DEBUG: Code = Code::new("D000");
}

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// Tokenizer error codes
pub mod lexical {
    use super::Code;

    pub const UNEXPECTED_CHARACTER: Code = Code::new("E020");
    pub const INVALID_PATTERN: Code = Code::new("E021");
    pub const ZERO_WIDTH_MATCH: Code = Code::new("E022");
    pub const TOO_MANY_TOKENS: Code = Code::new("E023");
    pub const TOO_MANY_RULES: Code = Code::new("E024");
}

/// Cursor and parser error codes
pub mod syntax {
    use super::Code;

    pub const GRAMMAR_VIOLATION: Code = Code::new("E043");
    pub const REPORTED_ERRORS: Code = Code::new("E044");
    pub const RECOVERY_SCAN_EXHAUSTED: Code = Code::new("E045");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const RULE_REGISTERED: Code = Code::new("I019");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const PARSE_COMPLETE: Code = Code::new("I040");
    pub const RECOVERY_COMPLETE: Code = Code::new("I041");
}

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

const REGISTRY_ENTRIES: &[ErrorMetadata] = &[
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging or runtime initialization failed",
    ),
    ErrorMetadata::new(
        "ERR003",
        "System",
        Severity::High,
        false,
        true,
        "Runtime configuration could not be loaded",
    ),
    ErrorMetadata::new(
        "E020",
        "Lexical",
        Severity::High,
        false,
        false,
        "No rule matches the input at the current position",
    ),
    ErrorMetadata::new(
        "E021",
        "Lexical",
        Severity::High,
        false,
        true,
        "Rule pattern is not a valid regular expression",
    ),
    ErrorMetadata::new(
        "E022",
        "Lexical",
        Severity::High,
        false,
        true,
        "Selected rule matched an empty lexeme",
    ),
    ErrorMetadata::new(
        "E023",
        "Lexical",
        Severity::Critical,
        false,
        true,
        "Token count exceeds the configured limit",
    ),
    ErrorMetadata::new(
        "E024",
        "Lexical",
        Severity::High,
        false,
        true,
        "Rule count exceeds the configured limit",
    ),
    ErrorMetadata::new(
        "E043",
        "Syntax",
        Severity::High,
        true,
        false,
        "Grammar rule violated",
    ),
    ErrorMetadata::new(
        "E044",
        "Syntax",
        Severity::High,
        false,
        true,
        "Parse finished with accumulated errors",
    ),
    ErrorMetadata::new(
        "E045",
        "Syntax",
        Severity::Medium,
        true,
        false,
        "Error recovery reached its scan limit",
    ),
    ErrorMetadata::new(
        "E050",
        "Syntax",
        Severity::High,
        true,
        false,
        "Expected token category not found",
    ),
];

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ENTRIES
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Low)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Category of a code; unregistered codes are grouped by prefix
pub fn get_category(code: &str) -> &'static str {
    if let Some(metadata) = get_error_metadata(code) {
        return metadata.category;
    }
    match code.chars().next() {
        Some('I') => "Info",
        Some('W') => "Warning",
        Some('D') => "Debug",
        _ => "Unknown",
    }
}
