//! External numeric function invocation
//!
//! Part of each score can come from a function hosted outside this
//! process. The engine only sees the [`FunctionInvoker`] trait; callers
//! decide whether it talks to the real service ([`HttpInvoker`]) or does
//! nothing ([`NoopInvoker`]).
//!
//! # Environment Variables
//!
//! - `BLACKBOX_FUNCTION_URL`: Base URL of the function service
//! - `AWS_SDK_KEY`: Credential sent with every invocation
//!
//! # Example
//!
//! ```rust,ignore
//! use blackbox::invoker::{FunctionInvoker, HttpInvoker};
//!
//! let invoker = HttpInvoker::from_env()?;
//! let score = invoker.invoke("blackbox-production-spamScore", "{}")?;
//! ```

mod http;

pub use http::{HttpInvoker, FUNCTION_URL_ENV};

use thiserror::Error;

/// Errors that can occur while invoking an external function
#[derive(Error, Debug)]
pub enum InvokerError {
    #[error("Missing credential: {env_var} not set")]
    MissingCredential { env_var: String },

    #[error("Function request failed: {0}")]
    Request(String),

    #[error("Function error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse function response: {0}")]
    Parse(String),
}

pub type InvokerResult<T> = Result<T, InvokerError>;

/// A capability that evaluates a named function on a JSON payload and
/// returns a number, or nothing.
pub trait FunctionInvoker {
    fn invoke(&self, key: &str, payload: &str) -> InvokerResult<Option<f64>>;
}

impl<T: FunctionInvoker + ?Sized> FunctionInvoker for &T {
    fn invoke(&self, key: &str, payload: &str) -> InvokerResult<Option<f64>> {
        (**self).invoke(key, payload)
    }
}

impl<T: FunctionInvoker + ?Sized> FunctionInvoker for Box<T> {
    fn invoke(&self, key: &str, payload: &str) -> InvokerResult<Option<f64>> {
        (**self).invoke(key, payload)
    }
}

/// Invoker that never produces a value
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvoker;

impl FunctionInvoker for NoopInvoker {
    fn invoke(&self, _key: &str, _payload: &str) -> InvokerResult<Option<f64>> {
        Ok(None)
    }
}
