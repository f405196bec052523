//! Annotation kinds and their marker prefixes.

/// Kind of version annotation.
///
/// Each kind is introduced by a fixed three-character marker at the start
/// of a line. No other markers are recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// `+++` — something was added in a version.
    Added,
    /// `+/-` — something was changed in a version.
    Changed,
    /// `---` — something was removed in a version.
    Removed,
}

impl AnnotationKind {
    /// All kinds, in the order their rules are applied.
    ///
    /// The markers are mutually exclusive, so the order fixes determinism
    /// only, never which rule wins.
    pub const ALL: [Self; 3] = [Self::Added, Self::Changed, Self::Removed];

    /// Marker prefix introducing this kind of annotation.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Added => "+++",
            Self::Changed => "+/-",
            Self::Removed => "---",
        }
    }
}
