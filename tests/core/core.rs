use redis_edit::core::annotation;
use redis_edit::core::editor::Editor;
use redis_edit::core::error::EditError;
use redis_edit::core::kind::ValueKind;
use redis_edit::core::memory_store::{MemoryStore, MemoryValue, Mutation};
use redis_edit::core::session::{EditOutcome, EditSession};
use redis_edit::core::store::WriteOp;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Editor that replaces the whole file with `text`.
fn editor_writing(text: &'static str) -> impl Fn(&Path) -> Result<(), EditError> {
    move |path: &Path| -> Result<(), EditError> {
        std::fs::write(path, text).unwrap();
        Ok(())
    }
}

/// Editor that rewrites the file through `f`.
fn editor_mapping(f: impl Fn(String) -> String) -> impl Fn(&Path) -> Result<(), EditError> {
    move |path: &Path| -> Result<(), EditError> {
        let before = std::fs::read_to_string(path).unwrap();
        std::fs::write(path, f(before)).unwrap();
        Ok(())
    }
}

fn untouched_editor(_path: &Path) -> Result<(), EditError> {
    Ok(())
}

fn run(store: &mut MemoryStore, editor: &dyn Editor, key: &str) -> Result<EditOutcome, EditError> {
    EditSession::new(store, editor).run(key)
}

#[test]
fn untouched_file_is_a_no_op_for_every_kind() {
    let mut store = MemoryStore::new()
        .with_value("s", MemoryValue::Scalar(b"hello".to_vec()))
        .with_value("l", MemoryValue::list(["a", "b"]))
        .with_value("st", MemoryValue::set(["x", "y"]))
        .with_value("m", MemoryValue::map([("f", "v")]))
        .with_value("z", MemoryValue::scored_set([("m", 1.5)]));

    for key in ["s", "l", "st", "m", "z", "absent"] {
        let outcome = run(&mut store, &untouched_editor, key).unwrap();
        assert!(matches!(outcome, EditOutcome::Unchanged { .. }), "{key}: {outcome:?}");
    }
    assert!(store.mutations().is_empty());
    assert_eq!(store.value("absent"), None);
}

#[test]
fn list_reorder_is_written_in_edited_order() {
    let mut store = MemoryStore::new().with_value("nums", MemoryValue::list(["1", "2", "3"]));
    let editor = editor_mapping(|text| {
        let header_end = text.find('[').unwrap();
        format!("{}[\"3\", \"2\", \"1\"]\n", &text[..header_end])
    });

    let outcome = run(&mut store, &editor, "nums").unwrap();

    assert!(matches!(outcome, EditOutcome::Written { kind: ValueKind::List, .. }));
    assert_eq!(store.value("nums"), Some(&MemoryValue::list(["3", "2", "1"])));
    assert_eq!(
        store.mutations(),
        &[Mutation::Batch {
            key: "nums".into(),
            ops: vec![
                WriteOp::Delete,
                WriteOp::PushList(vec!["3".into(), "2".into(), "1".into()]),
            ],
        }]
    );
}

#[test]
fn missing_key_is_created_as_scalar() {
    let mut store = MemoryStore::new();
    let seen = RefCell::new(Vec::new());
    let editor = |path: &Path| -> Result<(), EditError> {
        seen.borrow_mut().push(std::fs::read(path).unwrap());
        std::fs::write(path, "abc").unwrap();
        Ok(())
    };

    let outcome = run(&mut store, &editor, "missing").unwrap();

    assert_eq!(seen.borrow().as_slice(), &[Vec::<u8>::new()]);
    assert_eq!(
        outcome,
        EditOutcome::Written {
            key: "missing".into(),
            kind: ValueKind::Scalar,
            bytes: 3
        }
    );
    assert_eq!(store.value("missing"), Some(&MemoryValue::Scalar(b"abc".to_vec())));
}

#[test]
fn structured_scalar_edit_is_validated() {
    let mut store =
        MemoryStore::new().with_value("doc", MemoryValue::Scalar(br#"{"a":1}"#.to_vec()));

    let err = run(&mut store, &editor_writing(r#"{"a":2"#), "doc").unwrap_err();
    assert!(matches!(err, EditError::MalformedEdit { kind: ValueKind::Scalar, .. }));
    assert!(store.mutations().is_empty());

    run(&mut store, &editor_writing(r#"{"a":2}"#), "doc").unwrap();
    assert_eq!(store.value("doc"), Some(&MemoryValue::Scalar(br#"{"a":2}"#.to_vec())));
}

#[test]
fn plain_scalar_edit_is_written_verbatim() {
    let mut store =
        MemoryStore::new().with_value("greeting", MemoryValue::Scalar(b"hello".to_vec()));
    run(&mut store, &editor_writing("not json at all"), "greeting").unwrap();
    assert_eq!(
        store.value("greeting"),
        Some(&MemoryValue::Scalar(b"not json at all".to_vec()))
    );
}

#[test]
fn raw_mode_skips_structured_scalar_validation() {
    let mut store =
        MemoryStore::new().with_value("doc", MemoryValue::Scalar(br#"[1,2]"#.to_vec()));
    let editor = editor_writing("[1,2");
    EditSession::new(&mut store, &editor)
        .raw(true)
        .run("doc")
        .unwrap();
    assert_eq!(store.value("doc"), Some(&MemoryValue::Scalar(b"[1,2".to_vec())));
}

#[test]
fn raw_mode_does_not_apply_to_composites() {
    let mut store = MemoryStore::new().with_value("l", MemoryValue::list(["a"]));
    let editor = editor_writing("not a list");
    let err = EditSession::new(&mut store, &editor)
        .raw(true)
        .run("l")
        .unwrap_err();
    assert!(matches!(err, EditError::MalformedEdit { kind: ValueKind::List, .. }));
    assert!(store.mutations().is_empty());
}

#[test]
fn editing_only_comment_lines_is_a_no_op() {
    let mut store = MemoryStore::new().with_value("l", MemoryValue::list(["a", "b"]));
    let editor = editor_mapping(|text| {
        text.replacen("# This is a JSON", "#   I changed this comment", 1)
            + "# and added another\n"
    });

    let outcome = run(&mut store, &editor, "l").unwrap();

    assert!(matches!(outcome, EditOutcome::Unchanged { kind: ValueKind::List, .. }));
    assert!(store.mutations().is_empty());
}

#[test]
fn deleting_the_header_is_a_no_op() {
    let mut store = MemoryStore::new().with_value("m", MemoryValue::map([("k", "v")]));
    let editor =
        editor_mapping(|text| String::from_utf8(annotation::strip(text.as_bytes())).unwrap());
    let outcome = run(&mut store, &editor, "m").unwrap();
    assert!(matches!(outcome, EditOutcome::Unchanged { .. }));
}

#[test]
fn scratch_file_has_header_then_payload() {
    let mut store =
        MemoryStore::new().with_value("z", MemoryValue::scored_set([("a", 2.0), ("b", 1.0)]));
    let seen = RefCell::new(String::new());
    let editor = |path: &Path| -> Result<(), EditError> {
        *seen.borrow_mut() = std::fs::read_to_string(path).unwrap();
        Ok(())
    };
    run(&mut store, &editor, "z").unwrap();
    assert_eq!(
        seen.borrow().as_str(),
        "# This is a JSON representation of the data type ZSET. Edit, but don't change its\n\
         # type!\n\
         {\n  \"b\": 1.0,\n  \"a\": 2.0\n}\n"
    );
}

#[test]
fn malformed_composite_edits_never_touch_the_store() {
    let cases: [(&str, MemoryValue, &str); 4] = [
        ("l", MemoryValue::list(["a"]), r#"["a", 1]"#),
        ("s", MemoryValue::set(["a"]), r#"{"a": "b"}"#),
        ("m", MemoryValue::map([("f", "v")]), r#"{"f": ["v"]}"#),
        ("z", MemoryValue::scored_set([("a", 1.0)]), r#"{"a": "one"}"#),
    ];
    for (key, value, edit) in cases {
        let mut store = MemoryStore::new().with_value(key, value.clone());
        let editor = move |path: &Path| -> Result<(), EditError> {
            std::fs::write(path, edit).unwrap();
            Ok(())
        };
        let err = run(&mut store, &editor, key).unwrap_err();
        assert!(matches!(err, EditError::MalformedEdit { .. }), "{key}: {err}");
        assert!(store.mutations().is_empty(), "{key}");
        assert_eq!(store.value(key), Some(&value));
    }
}

#[test]
fn composite_write_is_a_full_replace() {
    let mut store = MemoryStore::new()
        .with_value("s", MemoryValue::set(["keep", "drop1", "drop2"]))
        .with_value("m", MemoryValue::map([("keep", "1"), ("drop", "2")]))
        .with_value("z", MemoryValue::scored_set([("keep", 1.0), ("drop", 2.0)]));

    run(&mut store, &editor_writing(r#"["keep", "new", "new"]"#), "s").unwrap();
    run(&mut store, &editor_writing(r#"{"keep": "10"}"#), "m").unwrap();
    run(&mut store, &editor_writing(r#"{"keep": 5, "new": -1}"#), "z").unwrap();

    assert_eq!(store.value("s"), Some(&MemoryValue::set(["keep", "new"])));
    assert_eq!(store.value("m"), Some(&MemoryValue::map([("keep", "10")])));
    assert_eq!(
        store.value("z"),
        Some(&MemoryValue::scored_set([("new", -1.0), ("keep", 5.0)]))
    );
}

#[test]
fn emptying_a_composite_removes_the_key() {
    let mut store = MemoryStore::new().with_value("l", MemoryValue::list(["a", "b"]));
    run(&mut store, &editor_writing("[]"), "l").unwrap();
    assert_eq!(store.value("l"), None);
    assert_eq!(store.mutations().len(), 1);
}

#[test]
fn unsupported_kind_aborts_before_editing() {
    let mut store =
        MemoryStore::new().with_value("events", MemoryValue::Opaque("stream".into()));
    let opened = RefCell::new(false);
    let editor = |_: &Path| -> Result<(), EditError> {
        *opened.borrow_mut() = true;
        Ok(())
    };
    let err = run(&mut store, &editor, "events").unwrap_err();
    assert!(matches!(err, EditError::UnsupportedKind(ref t) if t == "stream"));
    assert!(!*opened.borrow());
}

#[test]
fn read_failure_aborts_before_editing() {
    let mut store = MemoryStore::new().with_value("k", MemoryValue::list(["a"]));
    store.fail_reads(true);
    let err = run(&mut store, &untouched_editor, "k").unwrap_err();
    assert!(matches!(err, EditError::StoreReadError(_)));
    assert!(err.to_string().starts_with("unable to get key"));
}

#[test]
fn write_failure_is_reported_and_nothing_committed() {
    let mut store = MemoryStore::new().with_value("l", MemoryValue::list(["a"]));
    store.fail_writes(true);
    let err = run(&mut store, &editor_writing(r#"["b"]"#), "l").unwrap_err();
    assert!(matches!(err, EditError::StoreWriteError(_)));
    assert!(!err.store_untouched());
    assert_eq!(store.value("l"), Some(&MemoryValue::list(["a"])));
}

#[test]
fn editor_abort_discards_the_edit_and_removes_scratch_file() {
    let mut store = MemoryStore::new().with_value("l", MemoryValue::list(["a"]));
    let scratch = RefCell::new(PathBuf::new());
    let editor = |path: &Path| -> Result<(), EditError> {
        *scratch.borrow_mut() = path.to_path_buf();
        std::fs::write(path, r#"["changed"]"#).unwrap();
        Err(EditError::EditorAborted("vim exited with exit status: 1".into()))
    };

    let err = run(&mut store, &editor, "l").unwrap_err();

    assert!(matches!(err, EditError::EditorAborted(_)));
    assert!(store.mutations().is_empty());
    assert!(!scratch.borrow().exists());
}

#[test]
fn scratch_file_is_removed_after_success_and_validation_failure() {
    for edit in [r#"["ok"]"#, "broken"] {
        let mut store = MemoryStore::new().with_value("l", MemoryValue::list(["a"]));
        let scratch = RefCell::new(PathBuf::new());
        let editor = |path: &Path| -> Result<(), EditError> {
            *scratch.borrow_mut() = path.to_path_buf();
            std::fs::write(path, edit).unwrap();
            Ok(())
        };
        let _ = run(&mut store, &editor, "l");
        assert!(!scratch.borrow().as_os_str().is_empty());
        assert!(!scratch.borrow().exists(), "{edit}");
    }
}

#[test]
fn comment_lines_inside_payload_are_stripped_before_parsing() {
    let mut store = MemoryStore::new().with_value("l", MemoryValue::list(["a"]));
    run(
        &mut store,
        &editor_writing("[\n  # first element\n  \"a\",\n  \"b\"\n]\n"),
        "l",
    )
    .unwrap();
    assert_eq!(store.value("l"), Some(&MemoryValue::list(["a", "b"])));
}

#[test]
fn draft_reports_changes() {
    let mut store = MemoryStore::new().with_value("k", MemoryValue::Scalar(b"v".to_vec()));
    let editor = editor_writing("w");
    let draft = EditSession::new(&mut store, &editor).edit("k").unwrap();
    assert!(draft.changed());
    assert_eq!(draft.original, b"v");
    assert_eq!(draft.edited, b"w");
    assert_eq!(draft.payload(), Some(b"w".to_vec()));
    assert!(store.mutations().is_empty());
}
