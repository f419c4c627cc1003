//! A concrete container built on the view graph: sub-lists keep seeing the
//! right elements while the shared vector changes underneath them.

mod common;

use common::IntList;
use viewgraph::ViewError;

#[test]
fn sub_list_reads_its_range() {
    let mut list = IntList::new(0..10);
    let root = list.root();
    let mid = list.sub_list(root, 3, 7);
    let inner = list.sub_list(mid, 1, 3);

    assert_eq!(list.to_vec(mid), vec![3, 4, 5, 6]);
    assert_eq!(list.to_vec(inner), vec![4, 5]);
}

#[test]
fn insert_through_sub_list_is_seen_everywhere() {
    let mut list = IntList::new(0..10);
    let root = list.root();
    let left = list.sub_list(root, 0, 5);
    let right = list.sub_list(root, 5, 10);

    list.insert(left, 2, 100);

    assert_eq!(list.to_vec(left), vec![0, 1, 100, 2, 3, 4]);
    assert_eq!(list.to_vec(right), vec![5, 6, 7, 8, 9]);
    assert_eq!(list.len(root), 11);
}

#[test]
fn remove_through_nested_sub_list() {
    let mut list = IntList::new(0..12);
    let root = list.root();
    let outer = list.sub_list(root, 2, 10);
    let inner = list.sub_list(outer, 2, 6);
    let tail = list.sub_list(root, 10, 12);

    assert_eq!(list.remove(inner, 0), 4);
    assert_eq!(list.remove(inner, 0), 5);

    assert_eq!(list.to_vec(inner), vec![6, 7]);
    assert_eq!(list.to_vec(outer), vec![2, 3, 6, 7, 8, 9]);
    assert_eq!(list.to_vec(tail), vec![10, 11]);
    list.graph.check_invariants().unwrap();
}

#[test]
fn bulk_insert_shifts_later_lists() {
    let mut list = IntList::new(0..6);
    let root = list.root();
    let head = list.sub_list(root, 0, 2);
    let tail = list.sub_list(root, 4, 6);

    list.insert_all(head, 1, &[-1, -2, -3]);

    assert_eq!(list.to_vec(head), vec![0, -1, -2, -3, 1]);
    assert_eq!(list.to_vec(tail), vec![4, 5]);
}

#[test]
fn clear_sub_list_closes_the_gap() {
    let mut list = IntList::new(0..10);
    let root = list.root();
    let mid = list.sub_list(root, 3, 6);
    let tail = list.sub_list(root, 6, 10);

    list.clear(mid);
    list.clear(mid);

    assert!(list.to_vec(mid).is_empty());
    assert_eq!(list.to_vec(tail), vec![6, 7, 8, 9]);
    assert_eq!(list.to_vec(root), vec![0, 1, 2, 6, 7, 8, 9]);
}

#[test]
fn cursor_walks_a_sub_list() {
    let mut list = IntList::new(0..8);
    let root = list.root();
    let mid = list.sub_list(root, 2, 5);

    let mut cursor = list.cursor(mid);
    let mut seen = Vec::new();
    while let Some(value) = cursor.next(&list).unwrap() {
        seen.push(value);
    }
    assert_eq!(seen, vec![2, 3, 4]);
}

#[test]
fn cursor_fails_after_edit_elsewhere() {
    let mut list = IntList::new(0..8);
    let root = list.root();
    let head = list.sub_list(root, 0, 4);
    let tail = list.sub_list(root, 4, 8);

    let mut cursor = list.cursor(tail);
    assert_eq!(cursor.next(&list), Ok(Some(4)));

    list.insert(head, 0, 99);

    assert!(matches!(
        cursor.next(&list),
        Err(ViewError::Stale { view, .. }) if view == tail
    ));
}

#[test]
fn cursor_fails_after_replacement() {
    let mut list = IntList::new(0..4);
    let root = list.root();

    let mut cursor = list.cursor(root);
    assert_eq!(cursor.next(&list), Ok(Some(0)));

    assert_eq!(list.set(root, 3, 30), 3);

    assert!(cursor.next(&list).is_err());
    assert_eq!(list.to_vec(root), vec![0, 1, 2, 30]);
}

#[test]
fn cursor_survives_its_own_removals() {
    let mut list = IntList::new(0..10);
    let root = list.root();
    let mid = list.sub_list(root, 2, 8);

    let mut cursor = list.cursor(mid);
    while let Some(value) = cursor.next(&list).unwrap() {
        if value % 2 == 0 {
            cursor.remove(&mut list).unwrap();
        }
    }

    assert_eq!(list.to_vec(mid), vec![3, 5, 7]);
    assert_eq!(list.to_vec(root), vec![0, 1, 3, 5, 7, 8, 9]);
}

#[test]
fn reallocation_reseats_every_view() {
    let mut list = IntList::new(Vec::new());
    let root = list.root();
    list.insert(root, 0, 1);
    let view = list.sub_list(root, 0, 1);
    let nested = list.sub_list(view, 0, 1);

    for i in 0..64 {
        list.insert(nested, 0, i);
    }

    assert!(list.generation() > 1);
    for v in [root, view, nested] {
        assert_eq!(list.graph.backing(v), Ok(&list.generation()));
    }
    assert_eq!(list.len(nested), 65);
    assert_eq!(list.len(root), 65);
}
