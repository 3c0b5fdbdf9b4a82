//! Secret masker port.

/// Replaces known secret substrings in a value with a placeholder.
///
/// Implementations must be total: every input produces an output, and the
/// empty string masks to the empty string.
///
/// Plain closures are maskers too, which keeps tests and small embeddings
/// free of adapter boilerplate:
///
/// ```
/// use steplog::domain::ports::SecretMasker;
///
/// let masker = |value: &str| value.replace("abc123", "***");
/// assert_eq!(masker.mask("token=abc123"), "token=***");
/// assert_eq!(masker.mask(""), "");
/// ```
pub trait SecretMasker: Send + Sync {
    /// Return `value` with every secret it contains masked.
    fn mask(&self, value: &str) -> String;
}

impl<F> SecretMasker for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn mask(&self, value: &str) -> String {
        if value.is_empty() {
            return String::new();
        }
        self(value)
    }
}
