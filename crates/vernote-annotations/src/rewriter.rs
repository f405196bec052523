//! The annotation rewriting engine.
//!
//! A single rule table parameterized by `{marker, label, title template}`
//! drives both integration modes; the three kinds share one grammar and
//! one substitution routine.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::kind::AnnotationKind;
use crate::templates::{AnnotationTemplates, VERSION_PLACEHOLDER};

/// Matches the ` — "` tail left behind when an annotation carried no note.
///
/// The substitution routine always appends the separator and the note to
/// the title; a single substitution cannot conditionally omit the
/// separator, so a note-less annotation ends in a dangling ` — "`. This
/// second pass collapses exactly that tail to a bare closing quote. It
/// runs only on lines the rewriter itself produced, so an em-dash inside
/// a supplied note is never touched.
static NO_NOTE_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\s+—\s+"$"#).unwrap());

/// Compiled patterns for one annotation kind.
///
/// Both patterns share the grammar `<marker> <version> ["<note>"]` where
/// the version is a non-empty run of digits and dots. Whitespace inside
/// the grammar is spaces and tabs only, so a match never spans physical
/// lines in multi-line mode. The line pattern is anchored to an
/// already-isolated line; the text pattern anchors at every line start
/// within a multi-line document.
#[derive(Debug)]
struct Rule {
    kind: AnnotationKind,
    line: Regex,
    text: Regex,
}

impl Rule {
    fn new(kind: AnnotationKind) -> Self {
        let grammar = format!(
            "{}[ \t]+([0-9.]+)[ \t]*(?:\"(.*)\")?",
            regex::escape(kind.marker())
        );
        Self {
            kind,
            line: Regex::new(&format!("^{grammar}$")).unwrap(),
            text: Regex::new(&format!("(?m)^{grammar}$")).unwrap(),
        }
    }
}

/// Rule table in kind order.
static RULES: LazyLock<[Rule; 3]> = LazyLock::new(|| AnnotationKind::ALL.map(Rule::new));

/// Rewrites version annotations into admonition syntax.
///
/// Holds the immutable [`AnnotationTemplates`] for a build and exposes
/// the two integration modes. The rewriter keeps no other state, so one
/// instance may be shared freely across documents.
///
/// # Example
///
/// ```
/// use vernote_annotations::{AnnotationRewriter, AnnotationTemplates};
///
/// let rewriter = AnnotationRewriter::new(AnnotationTemplates::default());
/// assert_eq!(
///     rewriter.rewrite_line("  +/- 0.9 \"Defaults changed\""),
///     "  !!! version-changed \"Changed in version 0.9 — Defaults changed\"",
/// );
/// ```
#[derive(Clone, Debug)]
pub struct AnnotationRewriter {
    templates: AnnotationTemplates,
}

impl AnnotationRewriter {
    /// Create a rewriter with the given rendering templates.
    #[must_use]
    pub fn new(templates: AnnotationTemplates) -> Self {
        Self { templates }
    }

    /// The rendering templates this rewriter was built with.
    #[must_use]
    pub fn templates(&self) -> &AnnotationTemplates {
        &self.templates
    }

    /// Rewrite an ordered sequence of lines.
    ///
    /// One input line maps to exactly one output line; order is
    /// preserved. Leading whitespace is stripped before matching and
    /// re-prepended afterwards, so annotations nested inside indented
    /// contexts (e.g. list items) keep their indentation.
    #[must_use]
    pub fn rewrite_lines(&self, lines: &[String]) -> Vec<String> {
        lines.iter().map(|line| self.rewrite_line(line)).collect()
    }

    /// Rewrite a single physical line, preserving leading whitespace.
    ///
    /// Lines that do not fully match the annotation grammar are returned
    /// byte-identical.
    #[must_use]
    pub fn rewrite_line(&self, line: &str) -> String {
        let stripped = line.trim_start();
        let indent = &line[..line.len() - stripped.len()];

        for rule in &*RULES {
            if let Some(caps) = rule.line.captures(stripped) {
                return format!("{indent}{}", self.render(rule.kind, &caps));
            }
        }
        line.to_owned()
    }

    /// Rewrite a whole document given as one multi-line string.
    ///
    /// Matching anchors at every line start, so only annotations flush
    /// with the line start are recognized — indented annotations pass
    /// through in this mode. That asymmetry with
    /// [`rewrite_lines`](Self::rewrite_lines) mirrors the two host
    /// invocation contracts and is kept deliberately.
    #[must_use]
    pub fn rewrite_text(&self, text: &str) -> String {
        let mut output = text.to_owned();
        for rule in &*RULES {
            if rule.text.is_match(&output) {
                output = rule
                    .text
                    .replace_all(&output, |caps: &Captures| self.render(rule.kind, caps))
                    .into_owned();
            }
        }
        output
    }

    /// Render the admonition replacement for a matched annotation.
    ///
    /// Substitutes the captured version for every placeholder in the
    /// title template, appends the separator and note unconditionally,
    /// then collapses the dangling tail when the note was absent.
    fn render(&self, kind: AnnotationKind, caps: &Captures<'_>) -> String {
        let template = self.templates.template(kind);
        let version = &caps[1];
        let note = caps.get(2).map_or("", |m| m.as_str());

        let title = template.title.replace(VERSION_PLACEHOLDER, version);
        let rendered = format!(
            "{} {} \"{} — {}\"",
            self.templates.tag, template.admonition, title, note
        );
        NO_NOTE_TAIL.replace(&rendered, "\"").into_owned()
    }
}

impl Default for AnnotationRewriter {
    fn default() -> Self {
        Self::new(AnnotationTemplates::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::AdmonitionTemplate;
    use pretty_assertions::assert_eq;

    fn rewriter() -> AnnotationRewriter {
        AnnotationRewriter::default()
    }

    #[test]
    fn test_added_without_note() {
        assert_eq!(
            rewriter().rewrite_line("+++ 1.1.0"),
            "!!! version-added \"Added in version 1.1.0\""
        );
    }

    #[test]
    fn test_changed_with_note() {
        assert_eq!(
            rewriter().rewrite_line("+/- 0.1 \"Support widened\""),
            "!!! version-changed \"Changed in version 0.1 — Support widened\""
        );
    }

    #[test]
    fn test_removed_with_note_keeps_indentation() {
        assert_eq!(
            rewriter().rewrite_line("    --- 2.0 \"Support for older versions\""),
            "    !!! version-removed \"Removed in version 2.0 — Support for older versions\""
        );
    }

    #[test]
    fn test_non_matching_line_unchanged() {
        for line in [
            "Regular text.",
            "",
            "   ",
            "## Heading",
            "- list item",
            "++ 1.0",
            "++++ 1.0",
            "+-/ 1.0",
        ] {
            assert_eq!(rewriter().rewrite_line(line), line);
        }
    }

    #[test]
    fn test_bare_marker_not_an_annotation() {
        // A bare --- is a thematic break, not an annotation
        assert_eq!(rewriter().rewrite_line("---"), "---");
        assert_eq!(rewriter().rewrite_line("+++"), "+++");
    }

    #[test]
    fn test_version_requires_digits_or_dots_only() {
        assert_eq!(rewriter().rewrite_line("+++ v1.0"), "+++ v1.0");
        assert_eq!(rewriter().rewrite_line("+++ 1.0-rc1"), "+++ 1.0-rc1");
        assert_eq!(rewriter().rewrite_line("+++ one"), "+++ one");
    }

    #[test]
    fn test_unterminated_quote_passes_through() {
        assert_eq!(
            rewriter().rewrite_line("+++ 1.0 \"missing close"),
            "+++ 1.0 \"missing close"
        );
    }

    #[test]
    fn test_trailing_text_after_note_passes_through() {
        assert_eq!(
            rewriter().rewrite_line("+++ 1.0 \"note\" extra"),
            "+++ 1.0 \"note\" extra"
        );
    }

    #[test]
    fn test_no_dangling_separator_without_note() {
        let out = rewriter().rewrite_line("+/- 2.3");
        assert_eq!(out, "!!! version-changed \"Changed in version 2.3\"");
        assert!(!out.contains('—'));
    }

    #[test]
    fn test_explicitly_empty_note_collapses_like_no_note() {
        assert_eq!(
            rewriter().rewrite_line("+++ 1.0 \"\""),
            "!!! version-added \"Added in version 1.0\""
        );
    }

    #[test]
    fn test_note_with_internal_em_dash_kept() {
        assert_eq!(
            rewriter().rewrite_line("--- 3.0 \"gone — use the new API\""),
            "!!! version-removed \"Removed in version 3.0 — gone — use the new API\""
        );
    }

    #[test]
    fn test_note_punctuation_unmodified() {
        assert_eq!(
            rewriter().rewrite_line("+++ 1.2 \"adds `foo()`, see #42!\""),
            "!!! version-added \"Added in version 1.2 — adds `foo()`, see #42!\""
        );
    }

    #[test]
    fn test_trailing_whitespace_after_version_tolerated() {
        assert_eq!(
            rewriter().rewrite_line("+++ 1.0 "),
            "!!! version-added \"Added in version 1.0\""
        );
    }

    #[test]
    fn test_tabs_preserved_as_indentation() {
        assert_eq!(
            rewriter().rewrite_line("\t+++ 1.0"),
            "\t!!! version-added \"Added in version 1.0\""
        );
    }

    #[test]
    fn test_rewrite_lines_is_length_and_order_preserving() {
        let input: Vec<String> = [
            "# Title",
            "",
            "+++ 1.1.0",
            "Body text.",
            "  +/- 0.2 \"tweaked\"",
        ]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();

        let output = rewriter().rewrite_lines(&input);
        assert_eq!(output.len(), input.len());
        assert_eq!(output[0], "# Title");
        assert_eq!(output[1], "");
        assert_eq!(output[2], "!!! version-added \"Added in version 1.1.0\"");
        assert_eq!(output[3], "Body text.");
        assert_eq!(
            output[4],
            "  !!! version-changed \"Changed in version 0.2 — tweaked\""
        );
    }

    #[test]
    fn test_second_pass_is_noop() {
        let rewriter = rewriter();
        let input: Vec<String> = ["+++ 1.1.0", "+/- 0.1 \"note\"", "    --- 2.0"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect();

        let once = rewriter.rewrite_lines(&input);
        let twice = rewriter.rewrite_lines(&once);
        assert_eq!(once, twice);

        let text = "+++ 1.1.0\n+/- 0.1 \"note\"\n";
        let once = rewriter.rewrite_text(text);
        assert_eq!(rewriter.rewrite_text(&once), once);
    }

    #[test]
    fn test_rewrite_text_single_annotation_mid_document() {
        let input = "# Guide\n\nIntro paragraph.\n\n+++ 1.4 \"New flag\"\n\nMore text.\n";
        let expected = "# Guide\n\nIntro paragraph.\n\n!!! version-added \"Added in version 1.4 — New flag\"\n\nMore text.\n";
        assert_eq!(rewriter().rewrite_text(input), expected);
    }

    #[test]
    fn test_rewrite_text_all_kinds() {
        let input = "+++ 1.0\n+/- 1.1 \"changed\"\n--- 2.0\n";
        let expected = "!!! version-added \"Added in version 1.0\"\n\
                        !!! version-changed \"Changed in version 1.1 — changed\"\n\
                        !!! version-removed \"Removed in version 2.0\"\n";
        assert_eq!(rewriter().rewrite_text(input), expected);
    }

    #[test]
    fn test_rewrite_text_ignores_indented_annotations() {
        // Whole-text mode anchors at line start only; indentation-aware
        // matching belongs to line-sequence mode.
        let input = "    +++ 1.0\n+++ 2.0\n";
        let expected = "    +++ 1.0\n!!! version-added \"Added in version 2.0\"\n";
        assert_eq!(rewriter().rewrite_text(input), expected);
    }

    #[test]
    fn test_rewrite_text_match_never_spans_lines() {
        // A thematic break followed by a number on the next line is not an
        // annotation
        let input = "---\n1.0\n";
        assert_eq!(rewriter().rewrite_text(input), input);
    }

    #[test]
    fn test_rewrite_text_without_trailing_newline() {
        assert_eq!(
            rewriter().rewrite_text("--- 2.0"),
            "!!! version-removed \"Removed in version 2.0\""
        );
    }

    #[test]
    fn test_rewrite_text_preserves_newline_structure() {
        let input = "a\n\n\nb\n";
        assert_eq!(rewriter().rewrite_text(input), input);
    }

    #[test]
    fn test_rewrite_text_literal_em_dash_line_untouched() {
        // The cleanup pass only runs on rendered lines; ordinary text that
        // happens to end in `— "` must survive byte-identical.
        let input = "he said — \"\nmore text\n";
        assert_eq!(rewriter().rewrite_text(input), input);
        assert_eq!(rewriter().rewrite_line("he said — \""), "he said — \"");
    }

    #[test]
    fn test_custom_templates() {
        let rewriter = AnnotationRewriter::new(AnnotationTemplates {
            tag: "???".to_owned(),
            added: AdmonitionTemplate::new("new", r"New in \1"),
            ..Default::default()
        });
        assert_eq!(
            rewriter.rewrite_line("+++ 3.2.1 \"shiny\""),
            "??? new \"New in 3.2.1 — shiny\""
        );
        assert_eq!(rewriter.rewrite_line("+++ 3.2.1"), "??? new \"New in 3.2.1\"");
    }

    #[test]
    fn test_placeholder_substituted_at_every_occurrence() {
        let rewriter = AnnotationRewriter::new(AnnotationTemplates {
            added: AdmonitionTemplate::new("version-added", r"\1 (since \1)"),
            ..Default::default()
        });
        assert_eq!(
            rewriter.rewrite_line("+++ 1.0"),
            "!!! version-added \"1.0 (since 1.0)\""
        );
    }

    #[test]
    fn test_template_without_placeholder_is_used_verbatim() {
        // Placeholder validation happens at configuration load, not here;
        // the engine substitutes blindly into whatever it was given.
        let rewriter = AnnotationRewriter::new(AnnotationTemplates {
            added: AdmonitionTemplate::new("version-added", "Added"),
            ..Default::default()
        });
        assert_eq!(rewriter.rewrite_line("+++ 1.0"), "!!! version-added \"Added\"");
    }

    #[test]
    fn test_dots_only_version_accepted() {
        // The grammar is [0-9.]+ with no semantic validation
        assert_eq!(
            rewriter().rewrite_line("+++ ..."),
            "!!! version-added \"Added in version ...\""
        );
    }

    #[test]
    fn test_rewriter_is_stateless_across_calls() {
        let rewriter = rewriter();
        let first = rewriter.rewrite_line("+++ 1.0");
        let _ = rewriter.rewrite_text("--- 9.9\n+/- 0.5\n");
        assert_eq!(rewriter.rewrite_line("+++ 1.0"), first);
    }
}
