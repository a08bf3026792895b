use arbor_core::{Cursor, MoveError, TreeError, ValueKind};
use serde_json::json;

fn sample() -> serde_json::Value {
    json!({
        "a": {"b": [10, {"c": "x"}], "k": true},
        "z": 1
    })
}

#[test]
fn follow_simple_path_matches_manual_deref() {
    let tree = sample();
    let mut c = Cursor::new(tree.clone()).unwrap();
    assert!(c.path_exists("a/b/1/c"));
    let got = c.follow_simple_path("a/b/1/c").unwrap().clone();
    assert_eq!(got, tree["a"]["b"][1]["c"]);
    assert_eq!(c.steps(), ["a", "b", "1", "c"]);

    // relative to the new position; `.` adds nothing
    c.follow_simple_path("../.").unwrap();
    assert_eq!(c.steps(), ["a", "b", "1"]);
    assert_eq!(*c.current(), json!({"c": "x"}));
}

#[test]
fn down_then_up_round_trips() {
    let mut c = Cursor::new(sample()).unwrap();
    c.down("a").unwrap();
    let before_steps = c.steps().to_vec();
    let before = c.current().clone();
    c.down("b").unwrap();
    c.up().unwrap();
    assert_eq!(c.steps(), before_steps.as_slice());
    assert_eq!(*c.current(), before);
}

#[test]
fn path_exists_never_moves() {
    let mut c = Cursor::new(sample()).unwrap();
    c.down("a").unwrap();
    assert!(c.path_exists("b/0"));
    assert_eq!(c.steps(), ["a"]);
    assert!(!c.path_exists("b/5"));
    assert_eq!(c.steps(), ["a"]);
    assert!(!c.path_exists("../../.."));
    assert_eq!(c.steps(), ["a"]);
}

#[test]
fn failed_path_rolls_back_and_wraps_cause() {
    let mut c = Cursor::new(sample()).unwrap();
    c.down("a").unwrap();
    let err = c.follow_simple_path("b/nope").unwrap_err();
    match &err {
        MoveError::InvalidPath { path, cause } => {
            assert_eq!(path, "b/nope");
            assert_eq!(**cause, MoveError::InvalidMoveDown("nope".into()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.root_cause(), &MoveError::InvalidMoveDown("nope".into()));
    assert_eq!(c.steps(), ["a"]);
}

#[test]
fn single_step_tokens() {
    let mut c = Cursor::new(sample()).unwrap();
    assert_eq!(c.up(), Err(MoveError::InvalidMoveUp));
    assert_eq!(c.step(".."), Err(MoveError::InvalidMoveUp));

    c.step("a").unwrap();
    c.step(".").unwrap();
    assert_eq!(c.steps(), ["a"]);
    c.step("b").unwrap();
    c.step("..").unwrap();
    assert_eq!(c.steps(), ["a"]);
    c.step("b").unwrap();
    c.step("").unwrap();
    assert!(!c.has_parent());

    c.down("z").unwrap();
    c.reset();
    assert!(c.steps().is_empty());
}

#[test]
fn empty_tokens_jump_to_root() {
    let mut c = Cursor::new(sample()).unwrap();
    c.down("a").unwrap();
    // `b`, then root, then `z`
    c.follow_simple_path("b//z").unwrap();
    assert_eq!(c.steps(), ["z"]);

    // a leading separator is an absolute path
    c.follow_simple_path("/a/k").unwrap();
    assert_eq!(c.steps(), ["a", "k"]);
    assert_eq!(*c.current(), json!(true));

    // a trailing separator ends at the root
    c.follow_simple_path("../b/").unwrap();
    assert!(c.steps().is_empty());
}

#[test]
fn wildcards_are_literal_for_single_steps() {
    let mut c = Cursor::new(json!({"*": 1, "k": 2})).unwrap();
    c.step("*").unwrap();
    assert_eq!(c.steps(), ["*"]);
    c.reset();
    assert_eq!(c.step("**"), Err(MoveError::InvalidMoveDown("**".into())));
}

#[test]
fn attach_validates_root_and_steps() {
    let err = Cursor::new(json!(5)).unwrap_err();
    assert!(matches!(err, TreeError::Structure(ValueKind::Number)));

    let err = Cursor::attach(json!({}), Some(vec!["a".into(), "..".into()])).unwrap_err();
    assert!(matches!(err, TreeError::Steps(_)));

    let err = Cursor::attach_json_steps(json!({}), &json!("a/b")).unwrap_err();
    assert!(matches!(err, TreeError::Steps(_)));
    let err = Cursor::attach_json_steps(json!({}), &json!(["a", {"x": 1}])).unwrap_err();
    assert!(matches!(err, TreeError::Steps(_)));

    let c = Cursor::attach_json_steps(sample(), &json!(["a", "b", 1])).unwrap();
    assert_eq!(c.steps(), ["a", "b", "1"]);
    assert_eq!(*c.current(), json!({"c": "x"}));
}

#[test]
fn dangling_steps_fail_lazily() {
    let mut c = Cursor::attach(json!({"a": 1}), Some(vec!["missing".into()])).unwrap();
    assert_eq!(*c.current(), json!(null));
    let err = c.set_current(json!(2)).unwrap_err();
    assert!(matches!(
        err,
        TreeError::Move(MoveError::InvalidMoveDown(ref name)) if name == "missing"
    ));
    assert!(!c.path_exists("x"));
    c.up().unwrap();
    assert_eq!(*c.current(), json!({"a": 1}));
}

#[test]
fn clones_share_root_but_not_steps() {
    let mut c = Cursor::new(sample()).unwrap();
    c.down("a").unwrap();
    c.down("k").unwrap();

    let mut other = c.clone();
    other.up().unwrap();
    assert_eq!(c.steps(), ["a", "k"]);
    assert_eq!(other.steps(), ["a"]);

    // replacing an ancestor through one clone is visible through the other
    other.set_current(json!({"k": 99})).unwrap();
    assert_eq!(*c.current(), json!(99));
    assert_eq!(c.root()["a"], json!({"k": 99}));
}

#[test]
fn child_names_follow_native_order() {
    let mut c = Cursor::new(json!({"z": 1, "a": [7, 8], "m": null})).unwrap();
    assert_eq!(c.child_names(), ["z", "a", "m"]);
    c.down("a").unwrap();
    assert_eq!(c.child_names(), ["0", "1"]);
    assert!(c.has_child("1"));
    assert!(!c.has_child("01"));
    assert!(!c.has_child("2"));
    c.down("0").unwrap();
    assert!(c.child_names().is_empty());

    c.reset();
    let kids = c.children();
    assert_eq!(kids[1].name, "a");
    assert_eq!(kids[1].kind, ValueKind::Array);
    assert_eq!(kids[1].len, Some(2));
    assert_eq!(kids[2].kind, ValueKind::Null);
}
