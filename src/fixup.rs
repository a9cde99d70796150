//! Source-range reconstruction for declarations.
//!
//! The front-end records a node's overall extent and, when it has one, the
//! extent of its name. The host wants several more ranges; these are derived
//! here from what is available plus the doc comment sitting above the node.

use astbridge_host::{DeclarationRange, Javadoc};
use astbridge_source::{Comment, NodeSpan};

/// The doc comment ending one or two lines above `line`.
///
/// Comments are scanned in source order and the first qualifying one wins,
/// even when a closer one exists.
pub fn find_javadoc(comments: &[Comment], line: i32) -> Option<Javadoc> {
    comments
        .iter()
        .filter(|comment| comment.is_javadoc())
        .find(|comment| comment.last_line + 1 == line || comment.last_line + 2 == line)
        .map(|comment| Javadoc {
            source_start: comment.start,
            source_end: comment.end,
        })
}

fn name_range(span: &NodeSpan) -> (i32, i32) {
    (
        span.name_start.max(span.start),
        span.name_end.max(span.start),
    )
}

fn declaration_start(span: &NodeSpan, javadoc: Option<Javadoc>) -> i32 {
    javadoc.map_or(span.start, |doc| doc.source_start)
}

/// Types end one byte early so the host never asks for text past the
/// buffer the lexer recorded.
pub fn type_range(span: &NodeSpan, javadoc: Option<Javadoc>) -> DeclarationRange {
    let (source_start, source_end) = name_range(span);
    DeclarationRange {
        source_start,
        source_end,
        declaration_source_start: declaration_start(span, javadoc),
        declaration_source_end: span.end - 1,
        modifiers_source_start: span.start,
        body_start: source_end,
        body_end: span.end,
    }
}

/// Methods and constructors.
pub fn method_range(span: &NodeSpan, javadoc: Option<Javadoc>) -> DeclarationRange {
    let (source_start, source_end) = name_range(span);
    DeclarationRange {
        source_start,
        source_end,
        declaration_source_start: declaration_start(span, javadoc),
        declaration_source_end: span.end,
        modifiers_source_start: span.start,
        body_start: source_end,
        body_end: span.end,
    }
}

/// Field ranges: `(range, declaration_end, end_part1, end_part2)`.
pub fn field_range(span: &NodeSpan, javadoc: Option<Javadoc>) -> (DeclarationRange, i32, i32, i32) {
    let range = DeclarationRange {
        source_start: span.name_start,
        source_end: span.name_end,
        declaration_source_start: declaration_start(span, javadoc),
        declaration_source_end: span.end,
        modifiers_source_start: span.start,
        ..DeclarationRange::default()
    };
    (range, span.end, span.name_start, span.end)
}

#[cfg(test)]
mod tests {
    use astbridge_source::CommentKind;

    use super::*;

    fn doc(text: &str, start: i32, first_line: i32) -> Comment {
        Comment::new(CommentKind::Javadoc, text, start, first_line)
    }

    #[test]
    fn test_javadoc_one_or_two_lines_above() {
        let comments = vec![doc("/** A */", 0, 1)];
        assert!(find_javadoc(&comments, 2).is_some());
        assert!(find_javadoc(&comments, 3).is_some());
        assert!(find_javadoc(&comments, 4).is_none());
        assert!(find_javadoc(&comments, 1).is_none());
    }

    #[test]
    fn test_javadoc_first_match_wins() {
        // both end within reach of line 4; the earlier one is picked
        let comments = vec![
            Comment::new(CommentKind::Block, "/* plain */", 0, 2),
            doc("/** first */", 12, 2),
            doc("/** second */", 30, 3),
        ];
        let javadoc = find_javadoc(&comments, 4).unwrap();
        assert_eq!(javadoc.source_start, 12);
        assert_eq!(javadoc.source_end, 23);
    }

    #[test]
    fn test_method_range_without_name() {
        let span = NodeSpan::new(40, 90);
        let range = method_range(&span, None);
        assert_eq!((range.source_start, range.source_end), (40, 40));
        assert_eq!(range.declaration_source_start, 40);
        assert_eq!(range.declaration_source_end, 90);
        assert_eq!((range.body_start, range.body_end), (40, 90));
    }

    #[test]
    fn test_type_range_with_javadoc() {
        let span = NodeSpan::new(20, 60).with_name(26, 29).on_line(3);
        let javadoc = Some(Javadoc {
            source_start: 0,
            source_end: 18,
        });
        let range = type_range(&span, javadoc);
        assert_eq!((range.source_start, range.source_end), (26, 29));
        assert_eq!(range.declaration_source_start, 0);
        assert_eq!(range.declaration_source_end, 59);
        assert_eq!(range.modifiers_source_start, 20);
    }

    #[test]
    fn test_field_range() {
        let span = NodeSpan::new(10, 24).with_name(18, 21);
        let (range, declaration_end, part1, part2) = field_range(&span, None);
        assert_eq!((range.source_start, range.source_end), (18, 21));
        assert_eq!(range.declaration_source_end, 24);
        assert_eq!((declaration_end, part1, part2), (24, 18, 24));
    }
}
