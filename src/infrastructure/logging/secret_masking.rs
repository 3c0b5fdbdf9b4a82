//! Literal and regex based secret masking.

use regex::{Captures, Regex};
use std::fmt;

use crate::domain::ports::SecretMasker;

/// Placeholder written in place of every masked secret
pub const MASK: &str = "***";

/// Token shapes masked by [`PatternSecretMasker::with_default_patterns`].
///
/// When a pattern has a capture group only the group is masked, so the field
/// name in front of the secret stays readable.
const DEFAULT_PATTERNS: &[&str] = &[
    // GitHub tokens: ghp_, gho_, ghu_, ghs_, ghr_
    r"gh[pousr]_[A-Za-z0-9]{36,}",
    // API keys shaped like sk-...
    r"sk-[A-Za-z0-9_-]{20,}",
    // Bearer tokens in Authorization headers
    r"Bearer\s+([A-Za-z0-9._~+/=-]+)",
    // key=value / "key": "value" assignments of well-known secret names
    r#"(?i)["']?(?:password|passwd|secret|token|api_?key)["']?\s*[:=]\s*["']?([^"'\s,}]+)"#,
];

/// Masks registered secret values and regex-shaped tokens
#[derive(Clone, Default)]
pub struct PatternSecretMasker {
    /// Longest first, so a secret containing another is masked whole.
    values: Vec<String>,
    patterns: Vec<Regex>,
}

impl PatternSecretMasker {
    /// Create a masker with nothing registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a masker preloaded with the common token patterns
    pub fn with_default_patterns() -> Result<Self, regex::Error> {
        let mut masker = Self::new();
        for pattern in DEFAULT_PATTERNS {
            masker.add_pattern(pattern)?;
        }
        Ok(masker)
    }

    /// Register a literal secret. Empty values are ignored.
    pub fn add_value(&mut self, secret: impl Into<String>) {
        let secret = secret.into();
        if secret.is_empty() || self.values.contains(&secret) {
            return;
        }
        self.values.push(secret);
        self.values.sort_by(|a, b| b.len().cmp(&a.len()));
    }

    /// Register a regex whose matches (or first capture group) are masked
    pub fn add_pattern(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.patterns.push(Regex::new(pattern)?);
        Ok(())
    }

    /// Builder-style [`add_value`](Self::add_value)
    #[must_use]
    pub fn with_value(mut self, secret: impl Into<String>) -> Self {
        self.add_value(secret);
        self
    }
}

impl SecretMasker for PatternSecretMasker {
    fn mask(&self, value: &str) -> String {
        if value.is_empty() {
            return String::new();
        }

        let mut masked = value.to_string();
        for secret in &self.values {
            if masked.contains(secret.as_str()) {
                masked = masked.replace(secret.as_str(), MASK);
            }
        }
        for pattern in &self.patterns {
            masked = pattern.replace_all(&masked, mask_match).into_owned();
        }
        masked
    }
}

fn mask_match(caps: &Captures<'_>) -> String {
    let (Some(whole), Some(secret)) = (caps.get(0), caps.get(1)) else {
        return MASK.to_string();
    };
    let text = whole.as_str();
    let start = secret.start() - whole.start();
    let end = secret.end() - whole.start();
    format!("{}{MASK}{}", &text[..start], &text[end..])
}

impl fmt::Debug for PatternSecretMasker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternSecretMasker")
            .field("values", &self.values.len())
            .field("patterns", &self.patterns.len())
            .finish()
    }
}
