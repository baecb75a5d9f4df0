// ── Error translation ──
//
// Maps core errors to user-facing, translatable messages.

use crate::error::CoreError;

/// Shown when the hypervisor cannot be reached.
pub const NO_CONNECTION_KEY: &str = "common.no-connection-error";

/// Shown when a failure carries no usable message.
pub const OPERATION_ERROR_KEY: &str = "common.operation-error";

/// A failure ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedError {
    /// Translation key, or literal text reported by the visor.
    pub translatable_msg: String,
    /// Display form of the underlying error.
    pub original: String,
}

pub trait ErrorTranslator: Send + Sync {
    fn translate(&self, err: &CoreError) -> TranslatedError;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorTranslator;

impl ErrorTranslator for DefaultErrorTranslator {
    fn translate(&self, err: &CoreError) -> TranslatedError {
        let translatable_msg = match err {
            e if e.is_connectivity() => NO_CONNECTION_KEY.to_owned(),
            CoreError::Remote { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => OPERATION_ERROR_KEY.to_owned(),
        };
        TranslatedError {
            translatable_msg,
            original: err.to_string(),
        }
    }
}
