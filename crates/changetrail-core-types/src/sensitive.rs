//! Sensitive data marker for automatic redaction
//!
//! User tokens handed to the auditor are opaque to it, but they still
//! identify a person. `Sensitive<T>` keeps them out of `Debug` and
//! `Display` output so they never end up in log lines.

use std::fmt;

/// Wrapper that redacts its contents in Debug and Display
///
/// # Example
///
/// ```
/// use changetrail_core_types::Sensitive;
///
/// let token = Sensitive::new("user:alice");
/// assert_eq!(format!("{}", token), "***REDACTED***");
/// assert_eq!(format!("{:?}", token), "***REDACTED***");
/// assert_eq!(token.expose(), &"user:alice");
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Sensitive<T>(T);

const REDACTED: &str = "***REDACTED***";

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    ///
    /// The auditor only calls this when copying the token into the audit
    /// entry itself.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
