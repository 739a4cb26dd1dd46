//! Tests for frame building and its JSON form.

use herror_stack::{Frame, Stacktrace, UNKNOWN, parse_symbol};

#[test]
fn symbol_shapes() {
    let plain = parse_symbol("mod/pkg.Foo");
    assert_eq!(plain.package, "mod/pkg");
    assert_eq!(plain.receiver_type, "");
    assert_eq!(plain.function, "Foo");

    let method = parse_symbol("mod/pkg.(*Thing).Method");
    assert_eq!(method.package, "mod/pkg");
    assert_eq!(method.receiver_type, "Thing");
    assert_eq!(method.function, "Method");

    let entry = parse_symbol("main.Foo");
    assert_eq!(entry.package, "main");
    assert_eq!(entry.function, "Foo");
}

#[test]
fn frame_json_omits_default_values() {
    let frame = Frame {
        function: "Foo".to_string(),
        package: "main".to_string(),
        ..Default::default()
    };
    let json = serde_json::to_string(&frame).unwrap();
    assert_eq!(json, r#"{"function":"Foo","package":"main"}"#);
}

#[test]
fn frame_json_uses_short_keys() {
    let frame = Frame::new("mod/pkg.(*Thing).Method", "/src/mod/pkg/thing.go", 7);
    let value = serde_json::to_value(&frame).unwrap();
    assert_eq!(value["type"], "Thing");
    assert_eq!(value["abs_path"], "/src/mod/pkg/thing.go");
    assert_eq!(value["filename"], "thing.go");
    assert_eq!(value["line"], 7);
    assert_eq!(value["in_app"], true);
}

#[test]
fn unknown_frame_survives_json() {
    let stack = Stacktrace {
        frames: vec![Frame::new("", "", 0)],
    };
    let json = serde_json::to_string(&stack).unwrap();
    let decoded: Stacktrace = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, stack);
    assert_eq!(decoded.frames[0].function, UNKNOWN);
}

#[test]
fn empty_stacktrace_omits_frames() {
    let json = serde_json::to_string(&Stacktrace::default()).unwrap();
    assert_eq!(json, "{}");
    let decoded: Stacktrace = serde_json::from_str(&json).unwrap();
    assert!(decoded.is_empty());
}
