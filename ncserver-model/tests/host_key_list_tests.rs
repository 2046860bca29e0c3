use ncserver_model::{HostKeyList, ListError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn list(names: &[&str]) -> HostKeyList {
    let mut list = HostKeyList::new();
    for name in names {
        list.append(name).unwrap();
    }
    list
}

fn order(list: &HostKeyList) -> Vec<&str> {
    list.iter().collect()
}

// ── Append / remove ──────────────────────────────────────────────

#[test]
fn append_keeps_insertion_order() {
    let list = list(&["a", "b", "c"]);
    assert_eq!(order(&list), vec!["a", "b", "c"]);
}

#[test]
fn append_rejects_duplicate() {
    let mut list = list(&["a"]);
    assert_eq!(list.append("a"), Err(ListError::Duplicate("a".into())));
    assert_eq!(list.len(), 1);
}

#[test]
fn remove_preserves_rest() {
    let mut list = list(&["a", "b", "c"]);
    list.remove("b").unwrap();
    assert_eq!(order(&list), vec!["a", "c"]);
}

#[test]
fn remove_unknown_fails() {
    let mut list = list(&["a"]);
    assert_eq!(list.remove("z"), Err(ListError::NotFound("z".into())));
}

// ── Move ─────────────────────────────────────────────────────────

#[test]
fn move_after_successor_swaps() {
    let mut list = list(&["a", "b"]);
    list.move_after("a", Some("b")).unwrap();
    assert_eq!(order(&list), vec!["b", "a"]);
}

#[test]
fn move_after_predecessor_is_noop() {
    let mut list = list(&["a", "b", "c"]);
    list.move_after("b", Some("a")).unwrap();
    assert_eq!(order(&list), vec!["a", "b", "c"]);
}

#[test]
fn move_to_head() {
    let mut list = list(&["a", "b", "c"]);
    list.move_after("c", None).unwrap();
    assert_eq!(order(&list), vec!["c", "a", "b"]);
}

#[test]
fn move_to_tail() {
    let mut list = list(&["a", "b", "c"]);
    list.move_after("a", Some("c")).unwrap();
    assert_eq!(order(&list), vec!["b", "c", "a"]);
}

#[test]
fn move_errors_leave_list_untouched() {
    let mut list = list(&["a", "b"]);
    assert_eq!(list.move_after("z", None), Err(ListError::NotFound("z".into())));
    assert_eq!(
        list.move_after("a", Some("z")),
        Err(ListError::AnchorNotFound("z".into()))
    );
    assert_eq!(
        list.move_after("a", Some("a")),
        Err(ListError::SelfAnchor("a".into()))
    );
    assert_eq!(order(&list), vec!["a", "b"]);
}

#[test]
fn serializes_as_array() {
    let list = list(&["k1", "k2"]);
    assert_eq!(serde_json::to_string(&list).unwrap(), r#"["k1","k2"]"#);
}

// ── Properties ───────────────────────────────────────────────────

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,4}", 2..8).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #[test]
    fn move_places_entry_right_after_anchor(
        names in names(),
        from in any::<prop::sample::Index>(),
        to in any::<prop::sample::Index>(),
    ) {
        let mut list = HostKeyList::new();
        for n in &names {
            list.append(n).unwrap();
        }
        let name = from.get(&names).clone();
        let anchor = to.get(&names).clone();
        prop_assume!(name != anchor);

        list.move_after(&name, Some(&anchor)).unwrap();

        let order: Vec<&str> = list.iter().collect();
        let a = order.iter().position(|n| *n == anchor).unwrap();
        prop_assert_eq!(order[a + 1], name.as_str());
        prop_assert_eq!(order.len(), names.len());
    }

    #[test]
    fn move_to_head_keeps_relative_order_of_rest(
        names in names(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut list = HostKeyList::new();
        for n in &names {
            list.append(n).unwrap();
        }
        let name = pick.get(&names).clone();
        list.move_after(&name, None).unwrap();

        let order: Vec<&str> = list.iter().collect();
        prop_assert_eq!(order[0], name.as_str());
        let rest: Vec<&str> = names.iter().map(String::as_str).filter(|n| *n != name).collect();
        prop_assert_eq!(&order[1..], rest.as_slice());
    }
}
