//! Consolidated diagnostic codes and classification system
//!
//! Single source of truth for all diagnostic codes, their metadata, and
//! classification functions. Code constants and their behavioral metadata
//! live together in this module.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

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

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

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

/// Complete metadata for a diagnostic code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Pattern source intake error codes
pub mod source {
    use super::Code;

    pub const EMPTY_PATTERN: Code = Code::new("E005");
    pub const PATTERN_TOO_LARGE: Code = Code::new("E006");
    pub const UNTERMINATED_LITERAL: Code = Code::new("E007");
    pub const UNKNOWN_FLAG: Code = Code::new("E008");
}

/// Scanning error codes
pub mod scanning {
    use super::Code;

    pub const TRUNCATED_ESCAPE: Code = Code::new("E020");
    pub const UNCLOSED_CLASS: Code = Code::new("E021");
    pub const TOO_MANY_TOKENS: Code = Code::new("E022");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const MISSING_EOP: Code = Code::new("E040");
    pub const EMPTY_TOKEN_STREAM: Code = Code::new("E041");
    pub const UNBALANCED_GROUP: Code = Code::new("E042");
    pub const DANGLING_QUANTIFIER: Code = Code::new("E043");
    pub const INVALID_CLASS_RANGE: Code = Code::new("E044");
    pub const EMPTY_CLASS: Code = Code::new("E045");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const INTERNAL_PARSER_ERROR: Code = Code::new("E086");
    pub const MAX_GROUP_DEPTH: Code = Code::new("E087");
}

/// Compilation (lowering) error codes
pub mod compiling {
    use super::Code;

    pub const QUANTIFIER_RANGE: Code = Code::new("E060");
    pub const QUANTIFIER_TOO_LARGE: Code = Code::new("E061");
    pub const UNMATCHABLE_CLASS: Code = Code::new("E062");
    pub const PROGRAM_TOO_LARGE: Code = Code::new("E063");
}

/// Batch processing error codes
pub mod batch {
    use super::Code;

    pub const BATCH_CONFIG_ERROR: Code = Code::new("B001");
    pub const PATTERN_FILE_ERROR: Code = Code::new("B002");
    pub const BATCH_LIMIT_EXCEEDED: Code = Code::new("B003");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    // General success codes
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // Source intake success codes
    pub const SOURCE_INTAKE_SUCCESS: Code = Code::new("I006");

    // Scanning success codes
    pub const SCAN_COMPLETE: Code = Code::new("I020");

    // Syntax success codes
    pub const PARSE_COMPLETE: Code = Code::new("I040");

    // Compilation success codes
    pub const COMPILE_COMPLETE: Code = Code::new("I060");
    pub const EQUIVALENCE_CHECK_COMPLETE: Code = Code::new("I061");

    // Batch success codes
    pub const BATCH_COMPLETE: Code = Code::new("I080");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the offending pattern",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check configuration and environment variables",
            ),
        );

        // Pattern source intake errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "Source",
                Severity::Low,
                true,
                false,
                "Pattern text is empty",
                "Provide a non-empty pattern",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "Source",
                Severity::Medium,
                false,
                true,
                "Pattern exceeds maximum size limit",
                "Reduce pattern size or raise the compile-time limit",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "Source",
                Severity::Medium,
                true,
                false,
                "Delimited pattern literal not properly terminated",
                "Add the closing delimiter to the pattern literal",
            ),
        );
        registry.insert(
            "E008",
            ErrorMetadata::new(
                "E008",
                "Source",
                Severity::Low,
                true,
                false,
                "Unknown flag letter on pattern literal",
                "Use only supported flags (x, i)",
            ),
        );

        // Scanning errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Scanning",
                Severity::Medium,
                true,
                false,
                "Backslash at end of pattern with no following character",
                "Complete the escape sequence or remove the trailing backslash",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Scanning",
                Severity::Medium,
                true,
                false,
                "Character class opened but never closed",
                "Add the closing ']' to the character class",
            ),
        );
        registry.insert(
            "E022",
            ErrorMetadata::new(
                "E022",
                "Scanning",
                Severity::High,
                false,
                true,
                "Pattern produced too many tokens",
                "Reduce pattern complexity or raise the token limit",
            ),
        );

        // Syntax analysis errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Missing end-of-pattern token in token stream",
                "Ensure the scanner terminated the stream",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Empty token stream - no significant tokens found",
                "Provide pattern content",
            ),
        );
        registry.insert(
            "E042",
            ErrorMetadata::new(
                "E042",
                "Syntax",
                Severity::High,
                true,
                false,
                "Unbalanced group delimiter",
                "Match every '(' with a ')'",
            ),
        );
        registry.insert(
            "E043",
            ErrorMetadata::new(
                "E043",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Quantifier with nothing to repeat",
                "Place the quantifier after an atom",
            ),
        );
        registry.insert(
            "E044",
            ErrorMetadata::new(
                "E044",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Character class range with start above end",
                "Order range endpoints low to high",
            ),
        );
        registry.insert(
            "E045",
            ErrorMetadata::new(
                "E045",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Empty character class",
                "Add at least one member to the class",
            ),
        );
        registry.insert(
            "E050",
            ErrorMetadata::new(
                "E050",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Unexpected token during parsing",
                "Check pattern syntax near the reported span",
            ),
        );
        registry.insert(
            "E086",
            ErrorMetadata::new(
                "E086",
                "Syntax",
                Severity::Critical,
                false,
                true,
                "Internal parser error",
                "Report parser system bug",
            ),
        );
        registry.insert(
            "E087",
            ErrorMetadata::new(
                "E087",
                "Syntax",
                Severity::High,
                false,
                true,
                "Maximum group nesting depth exceeded",
                "Reduce group nesting or simplify the pattern",
            ),
        );

        // Compilation errors
        registry.insert(
            "E060",
            ErrorMetadata::new(
                "E060",
                "Compiling",
                Severity::Medium,
                true,
                false,
                "Bounded quantifier with minimum above maximum",
                "Order quantifier bounds low to high",
            ),
        );
        registry.insert(
            "E061",
            ErrorMetadata::new(
                "E061",
                "Compiling",
                Severity::High,
                true,
                false,
                "Bounded quantifier exceeds compile-time maximum",
                "Reduce the repetition count",
            ),
        );
        registry.insert(
            "E062",
            ErrorMetadata::new(
                "E062",
                "Compiling",
                Severity::Medium,
                true,
                false,
                "Class matches no scalar value after negation",
                "Remove the unmatchable class or widen its members",
            ),
        );
        registry.insert(
            "E063",
            ErrorMetadata::new(
                "E063",
                "Compiling",
                Severity::High,
                false,
                true,
                "Compiled program exceeds span limit",
                "Reduce pattern complexity or raise the span limit",
            ),
        );

        // Batch errors
        registry.insert(
            "B001",
            ErrorMetadata::new(
                "B001",
                "Batch",
                Severity::Medium,
                true,
                false,
                "Batch configuration error",
                "Check batch options and thread counts",
            ),
        );
        registry.insert(
            "B002",
            ErrorMetadata::new(
                "B002",
                "Batch",
                Severity::Medium,
                false,
                true,
                "Pattern file could not be read",
                "Check the file path and permissions",
            ),
        );
        registry.insert(
            "B003",
            ErrorMetadata::new(
                "B003",
                "Batch",
                Severity::High,
                false,
                true,
                "Batch exceeds maximum pattern count",
                "Split the pattern set into smaller batches",
            ),
        );

        // Success codes that participate in classification
        registry.insert(
            "I004",
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "System initialization completed successfully",
                "Continue normal operation",
            ),
        );
        registry.insert(
            "I006",
            ErrorMetadata::new(
                "I006",
                "Source",
                Severity::Low,
                true,
                false,
                "Pattern source intake completed successfully",
                "Continue to scanning",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific diagnostic code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from diagnostic code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for diagnostic code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for diagnostic code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from diagnostic code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
