/*!
 * Tests for the editing session
 */

use psalter::content::{ContentItem, DocumentEntry, FormatKind, FragmentGroup};
use psalter::session::{EditingSession, SessionHandle};
use std::thread;

fn text(value: &str) -> ContentItem {
    ContentItem::new(FormatKind::Text, value, "", "")
}

fn psalm_group() -> FragmentGroup {
    FragmentGroup::new(
        "ps2.txt",
        vec![
            ContentItem::new(FormatKind::PsalmTitle, "Psalmus 2", "圣咏2", ""),
            ContentItem::new(FormatKind::Verse, "Quare fremuerunt", "为何", ""),
        ],
    )
    .unwrap()
}

fn primaries(session: &EditingSession) -> Vec<String> {
    session
        .flatten()
        .iter()
        .map(|item| item.primary_text().to_string())
        .collect()
}

/// Test front and back insertion
#[test]
fn test_insert_withAtEndFalse_shouldInsertAtFront() {
    let mut session = EditingSession::new();
    session.insert(text("b"), true);
    session.insert(text("a"), false);
    session.insert(text("c"), true);

    assert_eq!(primaries(&session), vec!["a", "b", "c"]);
}

/// Test that a group stays one entry but flattens into its items
#[test]
fn test_flatten_withGroup_shouldExpandInPlace() {
    let mut session = EditingSession::new();
    session.insert(text("before"), true);
    session.insert(psalm_group(), true);
    session.insert(text("after"), true);

    assert_eq!(session.len(), 3);
    assert_eq!(primaries(&session), vec!["before", "Psalmus 2", "Quare fremuerunt", "after"]);
}

/// Test moving entries, including the boundary no-ops
#[test]
fn test_move_up_and_down_atBoundaries_shouldBeNoOps() {
    let mut session = EditingSession::from_items(vec![text("a"), text("b"), text("c")]);

    assert_eq!(session.move_up(0), 0);
    assert_eq!(session.move_down(2), 2);
    assert_eq!(session.move_down(7), 7);
    assert_eq!(primaries(&session), vec!["a", "b", "c"]);

    assert_eq!(session.move_up(2), 1);
    assert_eq!(primaries(&session), vec!["a", "c", "b"]);
    assert_eq!(session.move_down(0), 1);
    assert_eq!(primaries(&session), vec!["c", "a", "b"]);
}

/// Test that the largest possible index is ignored rather than overflowing
#[test]
fn test_move_down_withMaxIndex_shouldBeNoOp() {
    let mut session = EditingSession::from_items(vec![ContentItem::marker(FormatKind::Rule)]);

    assert_eq!(session.move_down(usize::MAX), usize::MAX);
    assert_eq!(session.move_up(usize::MAX), usize::MAX);
    assert_eq!(EditingSession::new().move_down(0), 0);
    assert_eq!(session.len(), 1);
}

/// Test that a group moves as one unit
#[test]
fn test_move_down_withGroup_shouldMoveWholeGroup() {
    let mut session = EditingSession::new();
    session.insert(psalm_group(), true);
    session.insert(text("z"), true);

    session.move_down(0);

    assert_eq!(primaries(&session), vec!["z", "Psalmus 2", "Quare fremuerunt"]);
}

/// Test deletion in and out of range
#[test]
fn test_delete_at_shouldReturnRemovedEntry() {
    let mut session = EditingSession::new();
    session.insert(psalm_group(), true);

    assert!(session.delete_at(3).is_none());
    let removed = session.delete_at(0).expect("entry should be removed");
    assert!(removed.is_group());
    assert!(session.is_empty());
}

/// Test that only single items can be replaced
#[test]
fn test_replace_at_withGroup_shouldRefuse() {
    let mut session = EditingSession::new();
    session.insert(text("old"), true);
    session.insert(psalm_group(), true);

    assert!(session.replace_at(0, text("new")));
    assert!(!session.replace_at(1, text("new")));
    assert!(!session.replace_at(5, text("new")));
    assert_eq!(session.flatten()[0].primary_text(), "new");
    assert!(matches!(session.entries()[1], DocumentEntry::Group(_)));
}

/// Test insert_at clamping past the end
#[test]
fn test_insert_at_pastEnd_shouldAppend() {
    let mut session = EditingSession::from_items(vec![text("a")]);
    session.insert_at(10, text("b"));
    session.insert_at(0, text("start"));

    assert_eq!(primaries(&session), vec!["start", "a", "b"]);
}

/// Test concurrent mutation through cloned handles
#[test]
fn test_session_handle_withConcurrentInserts_shouldKeepEveryEntry() {
    let handle = SessionHandle::default();

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let handle = handle.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    handle.update(|session| session.insert(text(&format!("{}-{}", worker, i)), true));
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(handle.len(), 100);
    assert_eq!(handle.snapshot().len(), 100);
}

/// Test that a snapshot is detached from later edits
#[test]
fn test_session_handle_snapshot_shouldNotSeeLaterEdits() {
    let handle = SessionHandle::new(EditingSession::from_items(vec![text("a")]));
    let snapshot = handle.snapshot();

    handle.update(|session| session.clear());

    assert_eq!(snapshot.len(), 1);
    assert!(handle.is_empty());
}
