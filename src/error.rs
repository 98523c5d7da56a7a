// ABOUTME: Error types for evaluation failures, convertible to in-language Error values

use thiserror::Error;

/// Every evaluation failure the interpreter can raise. `Display` (via
/// `#[error(...)]`) produces exactly the message text a `Value::Error`
/// carries once the failure crosses into the language as a first-class
/// value (spec §7's error taxonomy) — these strings are part of the
/// observable interface, not incidental debug output.
#[derive(Error, Debug, Clone)]
pub enum LispError {
    #[error("Unbound Symbol '{0}'")]
    UndefinedSymbol(String),

    #[error("Function '{function}' passed incorrect type for argument {position}. Got {actual}, Expected {expected}.")]
    TypeMismatch {
        function: String,
        expected: &'static str,
        actual: &'static str,
        position: usize,
    },

    #[error("Function '{function}' passed incorrect number of arguments. Got {actual}, Expected {expected}.")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Function '{function}' passed {{}} for argument {position}.")]
    EmptyArgument { function: String, position: usize },

    #[error("Function passed too many arguments. Got {actual}, Expected {expected}.")]
    TooManyArguments { actual: usize, expected: usize },

    #[error("Function '{function}' passed too many arguments for symbols. Got {actual}, Expected {expected}.")]
    TooManySymbolArguments {
        function: String,
        actual: usize,
        expected: usize,
    },

    #[error("Function '{function}' cannot define non-symbol. Got {actual}, Expected Symbol.")]
    NonSymbolFormal {
        function: String,
        actual: &'static str,
    },

    #[error("Cannot define non-symbol. Got {actual}, Expected Symbol.")]
    NonSymbolLambdaFormal { actual: &'static str },

    #[error("Function format invalid. Symbol '&' not followed by single symbol.")]
    AmpersandMisuse,

    #[error("S-Expression starts with incorrect type. Got {actual}, Expected Function.")]
    NotCallable { actual: &'static str },

    #[error("Cannot operate on non-number/non-decimal!")]
    NonNumberOperand,

    #[error("Division By Zero.")]
    DivisionByZeroInteger,

    #[error("Division by zero!")]
    DivisionByZeroDecimal,

    #[error("Invalid number")]
    InvalidNumber,

    #[error("Could not load Library {0}")]
    LoadFailed(String),

    #[error("{0}")]
    Custom(String),
}

impl LispError {
    pub fn type_mismatch(function: &str, expected: &'static str, actual: &'static str, position: usize) -> Self {
        LispError::TypeMismatch {
            function: function.to_string(),
            expected,
            actual,
            position,
        }
    }

    pub fn arity_mismatch(function: &str, expected: usize, actual: usize) -> Self {
        LispError::ArityMismatch {
            function: function.to_string(),
            expected,
            actual,
        }
    }

    pub fn empty_argument(function: &str, position: usize) -> Self {
        LispError::EmptyArgument {
            function: function.to_string(),
            position,
        }
    }

    pub fn non_symbol_formal(function: &str, actual: &'static str) -> Self {
        LispError::NonSymbolFormal {
            function: function.to_string(),
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_symbol_message() {
        let err = LispError::UndefinedSymbol("foo".to_string());
        assert_eq!(err.to_string(), "Unbound Symbol 'foo'");
    }

    #[test]
    fn type_mismatch_message_matches_original_phrasing() {
        let err = LispError::type_mismatch("head", "Q-Expression", "Number", 0);
        assert_eq!(
            err.to_string(),
            "Function 'head' passed incorrect type for argument 0. Got Number, Expected Q-Expression."
        );
    }

    #[test]
    fn empty_argument_message_has_literal_braces() {
        let err = LispError::empty_argument("head", 0);
        assert_eq!(err.to_string(), "Function 'head' passed {} for argument 0.");
    }

    #[test]
    fn division_by_zero_messages_differ_by_kind() {
        assert_eq!(LispError::DivisionByZeroInteger.to_string(), "Division By Zero.");
        assert_eq!(LispError::DivisionByZeroDecimal.to_string(), "Division by zero!");
    }
}
