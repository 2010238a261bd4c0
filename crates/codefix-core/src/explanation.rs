//! Parsing of the free-form fix explanation into labeled sections.
//!
//! The fix service returns a single short explanation string that may
//! contain the literal labels `Issue:`, `Cause:`, and `Fix:` in any order
//! and any count. The panel shows each labeled segment as its own block.

/// Which label a section was introduced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Issue,
    Cause,
    Fix,
}

impl SectionKind {
    /// The literal token as it appears in the explanation text.
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Issue => "Issue:",
            SectionKind::Cause => "Cause:",
            SectionKind::Fix => "Fix:",
        }
    }

    /// Display heading for the section block.
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Issue => "Issue",
            SectionKind::Cause => "Cause",
            SectionKind::Fix => "Fix",
        }
    }
}

/// One labeled segment of the explanation, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub content: String,
}

/// Split an explanation on the `Issue:` / `Cause:` / `Fix:` labels.
///
/// Sections come back in the order the labels appear in the text. A label
/// with nothing after it yields an empty-content section rather than being
/// dropped. Text before the first label is discarded, and input with no
/// labels at all yields no sections (the panel falls back to a placeholder).
pub fn parse_explanation(text: &str) -> Vec<Section> {
    const KINDS: [SectionKind; 3] = [SectionKind::Issue, SectionKind::Cause, SectionKind::Fix];

    // Every label occurrence, in text order.
    let mut labels: Vec<(usize, SectionKind)> = Vec::new();
    for kind in KINDS {
        let token = kind.label();
        let mut from = 0;
        while let Some(pos) = text[from..].find(token) {
            labels.push((from + pos, kind));
            from += pos + token.len();
        }
    }
    labels.sort_by_key(|(pos, _)| *pos);

    labels
        .iter()
        .enumerate()
        .map(|(i, (pos, kind))| {
            let start = pos + kind.label().len();
            let end = labels.get(i + 1).map(|(p, _)| *p).unwrap_or(text.len());
            Section {
                kind: *kind,
                content: text[start..end].trim().to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(sections: &[Section]) -> Vec<SectionKind> {
        sections.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn no_labels_yields_no_sections() {
        assert!(parse_explanation("").is_empty());
        assert!(parse_explanation("just some prose about the bug").is_empty());
    }

    #[test]
    fn three_labels_in_order() {
        let sections = parse_explanation("Issue: A Cause: B Fix: C");
        assert_eq!(
            kinds(&sections),
            vec![SectionKind::Issue, SectionKind::Cause, SectionKind::Fix]
        );
        assert_eq!(sections[0].content, "A");
        assert_eq!(sections[1].content, "B");
        assert_eq!(sections[2].content, "C");
    }

    #[test]
    fn source_order_is_preserved() {
        let sections = parse_explanation("Fix: patched Issue: off-by-one");
        assert_eq!(kinds(&sections), vec![SectionKind::Fix, SectionKind::Issue]);
        assert_eq!(sections[0].content, "patched");
        assert_eq!(sections[1].content, "off-by-one");
    }

    #[test]
    fn repeated_labels_each_get_a_section() {
        let sections = parse_explanation("Issue: first Issue: second");
        assert_eq!(
            kinds(&sections),
            vec![SectionKind::Issue, SectionKind::Issue]
        );
        assert_eq!(sections[0].content, "first");
        assert_eq!(sections[1].content, "second");
    }

    #[test]
    fn dangling_label_yields_empty_content() {
        let sections = parse_explanation("Issue: missing bounds check Fix:");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].kind, SectionKind::Fix);
        assert_eq!(sections[1].content, "");
    }

    #[test]
    fn adjacent_labels_yield_empty_middle_section() {
        let sections = parse_explanation("Issue:Cause: detail");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, "");
        assert_eq!(sections[1].content, "detail");
    }

    #[test]
    fn leading_prose_is_discarded() {
        let sections = parse_explanation("Here is what I found. Issue: bad import");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::Issue);
        assert_eq!(sections[0].content, "bad import");
    }

    #[test]
    fn multiline_content_is_trimmed() {
        let sections = parse_explanation("Issue:\n  unused variable\n\nFix:\n  removed it\n");
        assert_eq!(sections[0].content, "unused variable");
        assert_eq!(sections[1].content, "removed it");
    }
}
