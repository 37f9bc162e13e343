//! Input lane vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;

use framelink_core::protocol::{InputEvent, PointerAction};

use vector_loader::load;

#[test]
fn input_vectors() {
    let files = [
        "input_pointer_move.json",
        "input_pointer_down.json",
        "input_pointer_wheel.json",
        "input_key.json",
        "input_too_short.json",
        "input_unknown_kind.json",
        "input_key_trailing.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.frame.decode();
        let res = InputEvent::decode(Bytes::from(raw.clone()));

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let ev = res.expect("expected ok event");
        let ex = v.expect.expect("missing expect block");

        match ev {
            InputEvent::Pointer { action, x, y, button, wheel } => {
                assert_eq!(ex["kind"], "pointer", "vector={}", v.description);
                assert_eq!(action as u64, ex["action"].as_u64().unwrap(), "vector={}", v.description);
                assert_eq!(x as i64, ex["x"].as_i64().unwrap(), "vector={}", v.description);
                assert_eq!(y as i64, ex["y"].as_i64().unwrap(), "vector={}", v.description);
                assert_eq!(button as u64, ex["button"].as_u64().unwrap(), "vector={}", v.description);
                assert_eq!(wheel as i64, ex["wheel"].as_i64().unwrap(), "vector={}", v.description);
            }
            InputEvent::Key { action, code } => {
                assert_eq!(ex["kind"], "key", "vector={}", v.description);
                assert_eq!(action as u64, ex["action"].as_u64().unwrap(), "vector={}", v.description);
                assert_eq!(code as u64, ex["code"].as_u64().unwrap(), "vector={}", v.description);
            }
        }

        // the encoder must produce the vector bytes exactly
        assert_eq!(ev.encode().as_ref(), raw.as_slice(), "vector={}", v.description);
    }
}

#[test]
fn constructors_pick_actions() {
    let ev = InputEvent::pointer_up(1, 2, 0);
    assert!(matches!(ev, InputEvent::Pointer { action: PointerAction::Up, .. }));
    assert_eq!(ev.kind(), 1);
    assert_eq!(InputEvent::key_pressed(13).kind(), 2);
}
