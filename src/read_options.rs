//! Options controlling how an XLIFF document is turned into a `TranslationMap`.

/// Read behavior options for [`crate::xliff::XliffDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOptions {
    /// Use the `source` text when a unit's `target` is missing or empty.
    pub source_fallback: bool,
    /// Fail unless the `file` element declares a `target-language`.
    pub require_target_language: bool,
}

impl ReadOptions {
    /// Creates default read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables falling back to source text.
    pub fn with_source_fallback(mut self, source_fallback: bool) -> Self {
        self.source_fallback = source_fallback;
        self
    }

    /// Enables/disables the `target-language` requirement.
    pub fn with_required_target_language(mut self, required: bool) -> Self {
        self.require_target_language = required;
        self
    }
}
