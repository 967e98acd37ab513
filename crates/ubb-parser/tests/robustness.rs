use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use proptest::prelude::*;
use ubb_parser::{parse_str, Document, NodeRef};

const TIMEOUT: Duration = Duration::from_secs(2);

/// Parse input on a background thread, panic if it does not finish in time.
fn parse_with_timeout(label: &str, source: String) -> Document {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(parse_str(source));
    });
    match rx.recv_timeout(TIMEOUT) {
        Ok(document) => document,
        Err(_) => panic!("{label}: parser did not terminate within {TIMEOUT:?}"),
    }
}

/// Every child points back to its parent and self-closing tags stay empty.
fn assert_tree_consistent(node: NodeRef<'_>) {
    if node.kind().is_self_closing() {
        assert_eq!(0, node.child_count(), "{node:?} has children");
    }
    for child in node.children() {
        assert_eq!(Some(node), child.parent());
        assert_tree_consistent(child);
    }
}

#[test]
fn open_brackets_only() {
    let document = parse_with_timeout("brackets", "[".repeat(50_000));
    assert_eq!(1, document.root().child_count());
}

#[test]
fn closers_only() {
    let document = parse_with_timeout("closers", "[/b]".repeat(20_000));
    assert_eq!(20_000, document.root().child_count());
}

#[test]
fn dollars_only() {
    let document = parse_with_timeout("dollars", "$".repeat(30_001));
    assert_tree_consistent(document.root());
}

#[test]
fn unterminated_attribute_lists() {
    let document = parse_with_timeout("attributes", "[a=,".repeat(10_000));
    assert_eq!(1, document.root().child_count());
}

#[test]
fn alternating_overlaps() {
    let document = parse_with_timeout("overlaps", "[b][i][/b][/i]".repeat(5_000));
    assert_tree_consistent(document.root());
}

proptest! {
    #[test]
    fn never_panics_and_tree_is_consistent(data in r"(\[/?(b|i|quote|hr|ac01|foo)(=[a-z,]{0,4})?\]|[a-z $\[\]/=,]){0,48}") {
        let document = parse_str(&data);
        assert_tree_consistent(document.root());
        prop_assert_eq!(document.node_count() - 1, document.root().descendants().count());
    }

    #[test]
    fn text_is_never_lost(data in "[a-z ]{1,16}") {
        let document = parse_str(&data);
        prop_assert_eq!(data, document.root().text_content());
    }
}
