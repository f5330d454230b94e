//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.

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

/// Complete metadata for an error code
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

/// Automaton and lexer construction error codes
pub mod automaton {
    use super::Code;

    pub const DUPLICATE_STATE: Code = Code::new("E010");
    pub const MULTIPLE_START_STATES: Code = Code::new("E011");
    pub const UNKNOWN_STATE: Code = Code::new("E012");
    pub const NON_DETERMINISTIC_TRANSITION: Code = Code::new("E013");
    pub const MISSING_START_STATE: Code = Code::new("E014");
    pub const DUPLICATE_TOKEN_KIND: Code = Code::new("E015");
    pub const RESERVED_TOKEN_KIND: Code = Code::new("E016");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const NO_VIABLE_TOKEN: Code = Code::new("E020");
    pub const TOO_MANY_TOKENS: Code = Code::new("E021");
    pub const SOURCE_TOO_LARGE: Code = Code::new("E022");
}

/// Runtime configuration error codes
pub mod configuration {
    use super::Code;

    pub const CONFIG_IO_ERROR: Code = Code::new("E030");
    pub const CONFIG_PARSE_ERROR: Code = Code::new("E031");
    pub const CONFIG_LIMIT_EXCEEDED: Code = Code::new("E032");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const INVALID_LITERAL: Code = Code::new("E051");
    pub const TRAILING_INPUT: Code = Code::new("E052");
    pub const NESTING_TOO_DEEP: Code = Code::new("E053");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const LEXER_CONSTRUCTED: Code = Code::new("I010");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const CONFIGURATION_LOADED: Code = Code::new("I030");
    pub const AST_CONSTRUCTION_COMPLETE: Code = Code::new("I040");
    pub const FRONTEND_PARSE_COMPLETE: Code = Code::new("I060");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the input that triggered it",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check configuration files and environment variables",
            ),
            // Automaton construction
            ErrorMetadata::new(
                "E010",
                "Automaton",
                Severity::High,
                false,
                true,
                "State identifier registered twice in one automaton",
                "Give every state in the automaton a distinct identifier",
            ),
            ErrorMetadata::new(
                "E011",
                "Automaton",
                Severity::High,
                false,
                true,
                "Second start state added to an automaton",
                "Mark exactly one state as the start state",
            ),
            ErrorMetadata::new(
                "E012",
                "Automaton",
                Severity::High,
                false,
                true,
                "Transition references an unregistered state",
                "Register both endpoint states before adding the transition",
            ),
            ErrorMetadata::new(
                "E013",
                "Automaton",
                Severity::High,
                false,
                true,
                "Transition would make the automaton non-deterministic",
                "Keep at most one target per (state, symbol) pair",
            ),
            ErrorMetadata::new(
                "E014",
                "Automaton",
                Severity::High,
                false,
                true,
                "Automaton has no start state",
                "Add a state with is_start set before registering the automaton",
            ),
            ErrorMetadata::new(
                "E015",
                "Automaton",
                Severity::High,
                false,
                true,
                "Token kind already has an automaton",
                "Register each token kind once",
            ),
            ErrorMetadata::new(
                "E016",
                "Automaton",
                Severity::High,
                false,
                true,
                "Token kind is reserved for the end-of-input sentinel",
                "Do not register an automaton for EOF",
            ),
            // Lexical analysis
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::Medium,
                false,
                true,
                "No token can be matched at this position",
                "Check for stray characters or numbers missing digits after the dot",
            ),
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::High,
                false,
                true,
                "Input produced more tokens than the configured limit",
                "Split the expression or raise max_token_count",
            ),
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::High,
                false,
                true,
                "Input exceeds the maximum source size",
                "Reduce the input size or raise max_source_size",
            ),
            // Configuration loading
            ErrorMetadata::new(
                "E030",
                "Configuration",
                Severity::Medium,
                false,
                true,
                "Configuration file could not be read",
                "Check the configuration path and permissions",
            ),
            ErrorMetadata::new(
                "E031",
                "Configuration",
                Severity::Medium,
                false,
                true,
                "Configuration file is not valid TOML for this schema",
                "Fix the reported key or value in the configuration file",
            ),
            ErrorMetadata::new(
                "E032",
                "Configuration",
                Severity::Medium,
                true,
                false,
                "Runtime setting exceeds a compile-time limit",
                "Lower the setting; compile-time limits cannot be raised at runtime",
            ),
            // Syntax analysis
            ErrorMetadata::new(
                "E050",
                "Syntax",
                Severity::Medium,
                false,
                true,
                "Token does not fit the expression grammar here",
                "Check operator placement and parenthesis balance",
            ),
            ErrorMetadata::new(
                "E051",
                "Syntax",
                Severity::High,
                false,
                true,
                "Numeric literal could not be converted to a number",
                "Write the literal as digits with a fractional part, such as 5.0",
            ),
            ErrorMetadata::new(
                "E052",
                "Syntax",
                Severity::Medium,
                false,
                true,
                "Extra tokens after a complete expression",
                "Remove the trailing tokens or join them with an operator",
            ),
            ErrorMetadata::new(
                "E053",
                "Syntax",
                Severity::High,
                false,
                true,
                "Expression nesting exceeds the parser depth limit",
                "Reduce parenthesis nesting",
            ),
            // Success codes
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "System initialization completed",
                "Continue processing",
            ),
            ErrorMetadata::new(
                "I010",
                "Automaton",
                Severity::Low,
                true,
                false,
                "Lexer constructed from token automata",
                "Continue processing",
            ),
            ErrorMetadata::new(
                "I020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Tokenization completed successfully",
                "Continue to syntax analysis",
            ),
            ErrorMetadata::new(
                "I030",
                "Configuration",
                Severity::Low,
                true,
                false,
                "Runtime configuration loaded",
                "Continue processing",
            ),
            ErrorMetadata::new(
                "I040",
                "Syntax",
                Severity::Low,
                true,
                false,
                "AST construction completed successfully",
                "Hand the AST to its consumer",
            ),
            ErrorMetadata::new(
                "I060",
                "Frontend",
                Severity::Low,
                true,
                false,
                "Source parsed to an expression tree",
                "Hand the AST to its consumer",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
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

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
