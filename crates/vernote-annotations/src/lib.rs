//! Version annotation rewriting for markdown documentation.
//!
//! Documentation authors mark version-related notes with a terse
//! three-character marker at the start of a line:
//!
//! ```markdown
//! +++ 1.1.0
//! +/- 0.9 "Defaults changed"
//! --- 2.0 "Support for older releases"
//! ```
//!
//! At build time each annotation is rewritten into the standard admonition
//! syntax understood by the downstream renderer:
//!
//! ```markdown
//! !!! version-added "Added in version 1.1.0"
//! !!! version-changed "Changed in version 0.9 — Defaults changed"
//! !!! version-removed "Removed in version 2.0 — Support for older releases"
//! ```
//!
//! # Integration modes
//!
//! The engine supports two invocation contracts:
//!
//! - **Line-sequence mode** ([`AnnotationRewriter::rewrite_lines`]):
//!   per-line, order- and length-preserving. Leading whitespace is stripped
//!   before matching and re-prepended afterwards, so annotations nested in
//!   indented contexts keep their indentation.
//! - **Whole-text mode** ([`AnnotationRewriter::rewrite_text`]): a single
//!   multi-line string, matched with a multi-line start-of-line anchor.
//!   Indented annotations are *not* recognized in this mode.
//!
//! Anything that does not fully match the annotation grammar passes
//! through unchanged; the engine never fails.
//!
//! # Example
//!
//! ```
//! use vernote_annotations::{AnnotationRewriter, AnnotationTemplates};
//!
//! let rewriter = AnnotationRewriter::new(AnnotationTemplates::default());
//! assert_eq!(
//!     rewriter.rewrite_text("+++ 1.1.0"),
//!     "!!! version-added \"Added in version 1.1.0\"",
//! );
//! ```

mod kind;
mod rewriter;
mod templates;

pub use kind::AnnotationKind;
pub use rewriter::AnnotationRewriter;
pub use templates::{AdmonitionTemplate, AnnotationTemplates, VERSION_PLACEHOLDER};
