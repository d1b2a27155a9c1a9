use thiserror::Error;

/// Errors that can occur while building stacks or item definitions
#[derive(Debug, Error)]
pub enum StackError {
    /// Stack construction was given a negative count or no item
    ///
    /// This is a precondition violation: callers should validate inputs
    /// before constructing a stack.
    #[error("invalid item stack: {reason}")]
    InvalidStack { reason: &'static str },

    /// An item definition could not be parsed
    #[error("invalid item definition: {0}")]
    Definition(#[from] serde_json::Error),
}

impl StackError {
    /// Returns true if this is an `InvalidStack` error
    pub fn is_invalid_stack(&self) -> bool {
        matches!(self, StackError::InvalidStack { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_stack_message() {
        let error = StackError::InvalidStack {
            reason: "negative count",
        };

        assert!(error.is_invalid_stack());
        assert_eq!(error.to_string(), "invalid item stack: negative count");
    }

    #[test]
    fn test_definition_error_converts() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: StackError = json_error.into();

        assert!(!error.is_invalid_stack());
        assert!(error.to_string().starts_with("invalid item definition"));
    }
}
