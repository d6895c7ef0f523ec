use ariadne::{Color, Label, Report, ReportKind, Source};
use std::fmt;

use crate::error::StoryError;
use crate::validate::ValidationIssue;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The story cannot be presented.
    Error,
    /// The story can be presented but something looks wrong.
    Warning,
}

/// A diagnostic message with an optional source location.
///
/// Spans are character offsets into the story file.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: Severity,
    /// Location in the source, if known.
    pub span: Option<std::ops::Range<usize>>,
    /// Headline message.
    pub message: String,
    /// Text attached to the highlighted span.
    pub label: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            span: None,
            message: message.into(),
            label: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            span: None,
            message: message.into(),
            label: None,
        }
    }

    /// Attach a source span.
    pub fn with_span(mut self, span: std::ops::Range<usize>) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a label for the span.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build a located diagnostic from a story load error.
    ///
    /// Parse errors carry a line and column which are mapped back onto
    /// `source`; other errors have no location.
    pub fn from_story_error(source: &str, err: &StoryError) -> Self {
        match err {
            StoryError::Parse(json) => {
                let start = char_offset(source, json.line(), json.column());
                let end = (start + 1).min(source.chars().count()).max(start);
                Diagnostic::error("invalid story file")
                    .with_span(start..end)
                    .with_label(json.to_string())
            }
            other => Diagnostic::error(other.to_string()),
        }
    }
}

impl From<&ValidationIssue> for Diagnostic {
    fn from(issue: &ValidationIssue) -> Self {
        let message = match issue.page {
            Some(id) => format!("page {id}: {}", issue.message),
            None => issue.message.clone(),
        };
        if issue.is_error {
            Diagnostic::error(message)
        } else {
            Diagnostic::warning(message)
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{prefix}: {}", self.message)?;
        if self.span.is_none()
            && let Some(label) = &self.label
        {
            write!(f, " ({label})")?;
        }
        Ok(())
    }
}

/// Convert a 1-based line and column into a character offset into `source`.
fn char_offset(source: &str, line: usize, column: usize) -> usize {
    let mut byte = 0;
    for (i, text) in source.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let col = column.saturating_sub(1).min(text.len());
            byte += col;
            break;
        }
        byte += text.len();
    }
    let mut byte = byte.min(source.len());
    while !source.is_char_boundary(byte) {
        byte -= 1;
    }
    source[..byte].chars().count()
}

/// Render diagnostics using ariadne for pretty terminal output.
///
/// Diagnostics without a span are rendered as plain lines.
pub fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) -> String {
    let mut output = Vec::new();

    for diag in diagnostics {
        let Some(span) = diag.span.clone() else {
            output.extend_from_slice(format!("{diag}\n").as_bytes());
            continue;
        };

        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
        };
        let color = match diag.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };

        let mut report = Report::build(kind, (filename, span.clone())).with_message(&diag.message);

        let label_text = diag.label.as_deref().unwrap_or(&diag.message);
        report = report.with_label(
            Label::new((filename, span))
                .with_message(label_text)
                .with_color(color),
        );

        report
            .finish()
            .write((filename, Source::from(source)), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageId;
    use crate::story::Story;

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::warning("page 2: page text is empty");
        assert_eq!(d.to_string(), "warning: page 2: page text is empty");
    }

    #[test]
    fn char_offset_maps_line_and_column() {
        let source = "{\n  \"pages\": x\n}";
        // Line 2, column 12 is the `x`.
        let offset = char_offset(source, 2, 12);
        assert_eq!(source.chars().nth(offset), Some('x'));
    }

    #[test]
    fn char_offset_handles_multibyte_text() {
        let source = "{\"title\": \"Café\", x}";
        let byte = source.find('x').unwrap();
        let offset = char_offset(source, 1, byte + 1);
        assert_eq!(source.chars().nth(offset), Some('x'));
    }

    #[test]
    fn parse_error_is_located() {
        let source = "{\n  \"pages\": [\n    { \"id\": \"one\" }\n  ]\n}";
        let err = Story::from_json(source).unwrap_err();
        let diag = Diagnostic::from_story_error(source, &err);
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.span.is_some());

        let output = render_diagnostics(source, "story.json", &[diag]);
        assert!(output.contains("invalid story file"));
    }

    #[test]
    fn issues_convert_to_unlocated_diagnostics() {
        let issue = ValidationIssue {
            page: Some(PageId(3)),
            message: "page is unreachable from the first page".to_string(),
            is_error: false,
        };
        let diag = Diagnostic::from(&issue);
        assert_eq!(diag.severity, Severity::Warning);
        assert!(diag.span.is_none());

        let output = render_diagnostics("", "story.json", &[diag]);
        assert_eq!(
            output,
            "warning: page 3: page is unreachable from the first page\n"
        );
    }
}
