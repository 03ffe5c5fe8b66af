//! Tests for timeline windows and offset cursors

use crate::error::TimelineError;
use crate::pagination::{Cursor, TimelineWindow};

const BOUND: u32 = 15_000;

#[test]
fn test_window_defaults() {
    let w = TimelineWindow::from_headers(None, None, None, 500, BOUND).unwrap();
    assert_eq!(w.since_id, 0);
    assert_eq!(w.max_id, None);
    assert_eq!(w.count, 500);
}

#[test]
fn test_window_count_capped() {
    let w = TimelineWindow::from_headers(None, None, Some("99999"), 500, BOUND).unwrap();
    assert_eq!(w.count, BOUND);

    let w = TimelineWindow::from_headers(Some("10"), Some("20"), Some("3"), 500, BOUND).unwrap();
    assert_eq!(w.count, 3);
    assert!(!w.contains(10));
    assert!(w.contains(11));
    assert!(w.contains(20));
    assert!(!w.contains(21));
}

#[test]
fn test_window_rejects_garbage() {
    let err = TimelineWindow::from_headers(Some("abc"), None, None, 500, BOUND).unwrap_err();
    assert_eq!(
        err,
        TimelineError::InvalidNumber {
            field: "X-Since-ID",
            value: "abc".to_string()
        }
    );
    assert!(TimelineWindow::from_headers(None, None, Some("-4"), 500, BOUND).is_err());
}

#[test]
fn test_cursor_default() {
    let c = Cursor::from_headers(None, None, 500, BOUND).unwrap();
    assert_eq!(c.offset, 0);
    assert_eq!(c.size, 500);
    let h = c.headers();
    assert_eq!(h.next, "500-500");
    assert_eq!(h.previous, None);
    assert_eq!(h.current, None);
}

#[test]
fn test_cursor_from_token() {
    let c = Cursor::from_headers(Some("1000-500"), Some("7"), 500, BOUND).unwrap();
    assert_eq!(c.offset, 1000);
    assert_eq!(c.size, 500);
    let h = c.headers();
    assert_eq!(h.next, "1500-500");
    assert_eq!(h.previous.as_deref(), Some("500-500"));
    assert_eq!(h.current.as_deref(), Some("1000-500"));
}

#[test]
fn test_cursor_size_header() {
    let c = Cursor::from_headers(None, Some("25"), 500, BOUND).unwrap();
    assert_eq!((c.offset, c.size), (0, 25));
}

#[test]
fn test_cursor_size_always_capped() {
    let c = Cursor::from_headers(Some("0-20000"), None, 500, BOUND).unwrap();
    assert_eq!(c.size, BOUND);
    let c = Cursor::from_headers(None, Some("20000"), 500, BOUND).unwrap();
    assert_eq!(c.size, BOUND);
}

#[test]
fn test_previous_does_not_underflow() {
    let c = Cursor::parse("3-10", BOUND).unwrap();
    assert_eq!(c.previous().as_deref(), Some("0-10"));
}

#[test]
fn test_next_strictly_advances() {
    for raw in ["0-1", "5-3", "100-15000", "0-20000"] {
        let c = Cursor::parse(raw, BOUND).unwrap();
        let next = Cursor::parse(&c.next(), BOUND).unwrap();
        assert!(next.offset > c.offset);
        assert_eq!(next.size, c.size);
    }
}

#[test]
fn test_malformed_cursor() {
    for raw in ["", "10", "a-b", "10-", "-5", "10-0", "1-2-3"] {
        assert!(
            matches!(
                Cursor::parse(raw, BOUND),
                Err(TimelineError::InvalidCursor(_))
            ),
            "{raw} should be rejected"
        );
    }
}
