use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_replace_tracks_delta() {
    let mut patcher = TextPatcher::new("S1.E1 AND S1.E2");
    assert_eq!(patcher.replace("NewS1", Span::new(0, 2)), Ok(true));
    assert_eq!(patcher.delta(), 3);
    assert_eq!(patcher.replace("NewS1", Span::new(10, 12)), Ok(true));
    assert_eq!(patcher.text(), "NewS1.E1 AND NewS1.E2");
    assert_eq!(patcher.delta(), 6);
}

#[test]
fn test_shrinking_replacement() {
    let mut patcher = TextPatcher::new("Outer.Inner.X + Outer.Inner.Y");
    assert_eq!(patcher.replace("I", Span::new(0, 11)), Ok(true));
    assert_eq!(patcher.replace("I", Span::new(16, 27)), Ok(true));
    assert_eq!(patcher.text(), "I.X + I.Y");
    assert_eq!(patcher.delta(), -20);
}

#[test]
fn test_identical_text_is_noop() {
    let mut patcher = TextPatcher::new("A + B");
    assert_eq!(patcher.replace("B", Span::new(4, 5)), Ok(false));
    assert_eq!(patcher.text(), "A + B");
    assert_eq!(patcher.delta(), 0);
}

#[test]
fn test_out_of_order_is_rejected() {
    let mut patcher = TextPatcher::new("A + B");
    assert_eq!(patcher.replace("BB", Span::new(4, 5)), Ok(true));
    assert_eq!(
        patcher.replace("AA", Span::new(0, 1)),
        Err(PatchError::OutOfOrder {
            span: Span::new(0, 1),
            previous_end: 5,
        })
    );
    assert_eq!(patcher.text(), "A + BB");
}

#[test]
fn test_overlap_is_rejected() {
    let mut patcher = TextPatcher::new("N1.S1.E1");
    assert_eq!(patcher.replace("X", Span::new(0, 5)), Ok(true));
    assert!(matches!(
        patcher.replace("Y", Span::new(3, 8)),
        Err(PatchError::OutOfOrder { .. })
    ));
}

#[test]
fn test_out_of_bounds_is_rejected() {
    let mut patcher = TextPatcher::new("A");
    assert_eq!(
        patcher.replace("B", Span::new(0, 4)),
        Err(PatchError::OutOfBounds {
            span: Span::new(0, 4),
            len: 1,
        })
    );

    let mut patcher = TextPatcher::new("\"é\"");
    assert!(matches!(
        patcher.replace("x", Span::new(1, 2)),
        Err(PatchError::OutOfBounds { .. })
    ));
}

#[test]
fn test_adjacent_spans_are_in_order() {
    let mut patcher = TextPatcher::new("AB");
    assert_eq!(patcher.replace("xx", Span::new(0, 1)), Ok(true));
    assert_eq!(patcher.replace("yy", Span::new(1, 2)), Ok(true));
    assert_eq!(patcher.into_text(), "xxyy");
}

mod proptest_patch {
    use proptest::prelude::*;

    use super::*;

    /// Cut `text` into ordered, non-overlapping spans with replacements.
    fn edits() -> impl Strategy<Value = (String, Vec<(Span, String)>)> {
        ("[a-z. ]{0,40}", proptest::collection::vec(("[A-Z]{0,6}", 0usize..6, 0usize..6), 0..6))
            .prop_map(|(text, raw)| {
                let mut pos = 0usize;
                let mut out = Vec::new();
                for (replacement, gap, len) in raw {
                    let start = (pos + gap).min(text.len());
                    let end = (start + len).min(text.len());
                    out.push((span(start, end), replacement));
                    pos = end;
                }
                (text, out)
            })
    }

    fn span(start: usize, end: usize) -> Span {
        Span::new(
            u32::try_from(start).unwrap_or(u32::MAX),
            u32::try_from(end).unwrap_or(u32::MAX),
        )
    }

    /// Splice every edit into `text` from the back so earlier offsets stay put.
    fn splice_all(text: &str, edits: &[(Span, String)]) -> String {
        let mut out = text.to_string();
        for (span, replacement) in edits.iter().rev() {
            out.replace_range(span.to_range(), replacement);
        }
        out
    }

    proptest! {
        #[test]
        fn noop_replace_leaves_state(text in "[a-zA-Z0-9 .]{0,40}", a in 0usize..40, b in 0usize..40) {
            let (start, end) = (a.min(b).min(text.len()), a.max(b).min(text.len()));
            let mut patcher = TextPatcher::new(text.clone());
            let existing = text[start..end].to_string();
            prop_assert_eq!(patcher.replace(&existing, span(start, end)), Ok(false));
            prop_assert_eq!(patcher.text(), text.as_str());
            prop_assert_eq!(patcher.delta(), 0);
        }

        #[test]
        fn ordered_edits_match_direct_splice((text, edits) in edits()) {
            let mut patcher = TextPatcher::new(text.clone());
            for (span, replacement) in &edits {
                prop_assert!(patcher.replace(replacement, *span).is_ok());
            }
            let expected = splice_all(&text, &edits);
            let expected_delta = i64::try_from(expected.len()).unwrap_or(0)
                - i64::try_from(text.len()).unwrap_or(0);
            prop_assert_eq!(patcher.delta(), expected_delta);
            prop_assert_eq!(patcher.into_text(), expected);
        }
    }
}
