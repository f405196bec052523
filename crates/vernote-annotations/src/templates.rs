//! Rendering templates for rewritten annotations.

use crate::kind::AnnotationKind;

/// Placeholder in title templates that is replaced by the captured version.
pub const VERSION_PLACEHOLDER: &str = r"\1";

/// Admonition label and title template for a single annotation kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdmonitionTemplate {
    /// Admonition type string (e.g. `version-added`).
    pub admonition: String,
    /// Title text containing the [`VERSION_PLACEHOLDER`].
    pub title: String,
}

impl AdmonitionTemplate {
    /// Create a template from an admonition label and a title template.
    #[must_use]
    pub fn new(admonition: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            admonition: admonition.into(),
            title: title.into(),
        }
    }
}

/// Immutable rendering configuration for all three annotation kinds.
///
/// Constructed once per build and handed to
/// [`AnnotationRewriter`](crate::AnnotationRewriter); nothing mutates it
/// afterwards. The engine treats the title templates as opaque text and
/// substitutes the version blindly — whether a template actually contains
/// the placeholder is checked by whoever loads the configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationTemplates {
    /// Literal prefix token emitted for every rewritten line.
    pub tag: String,
    /// Template for `+++` annotations.
    pub added: AdmonitionTemplate,
    /// Template for `+/-` annotations.
    pub changed: AdmonitionTemplate,
    /// Template for `---` annotations.
    pub removed: AdmonitionTemplate,
}

impl Default for AnnotationTemplates {
    fn default() -> Self {
        Self {
            tag: "!!!".to_owned(),
            added: AdmonitionTemplate::new("version-added", r"Added in version \1"),
            changed: AdmonitionTemplate::new("version-changed", r"Changed in version \1"),
            removed: AdmonitionTemplate::new("version-removed", r"Removed in version \1"),
        }
    }
}

impl AnnotationTemplates {
    /// Template for the given annotation kind.
    #[must_use]
    pub fn template(&self, kind: AnnotationKind) -> &AdmonitionTemplate {
        match kind {
            AnnotationKind::Added => &self.added,
            AnnotationKind::Changed => &self.changed,
            AnnotationKind::Removed => &self.removed,
        }
    }
}
