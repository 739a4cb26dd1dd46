//! Tests for JSON round-tripping of error chains.

use herror::{Frame, HError, Stacktrace};

#[test]
fn round_trip_with_wrapped_details_and_stack() {
    let err = HError::new("this is an error")
        .wrap(std::io::Error::other("this is another error"))
        .with_details(&[&"context", &7u32])
        .with_stack();

    let marshalled = serde_json::to_string(&err).unwrap();
    let unmarshalled: HError = serde_json::from_str(&marshalled).unwrap();

    assert_eq!(unmarshalled, err);
    assert!(unmarshalled.stack().is_some());
    assert!(unmarshalled.unwrap().unwrap().stack().is_none());
}

#[test]
fn round_trip_survives_deep_chains() {
    let mut err = HError::new("root cause");
    for depth in 1..=200 {
        err = HError::new(format!("layer {depth}")).wrap(err);
    }

    let decoded = HError::from_json(&err.to_json().unwrap()).unwrap();

    assert_eq!(decoded.chain().count(), 201);
    assert_eq!(decoded.chain().last().map(HError::message), Some("root cause"));
    assert_eq!(decoded, err);
}

#[test]
fn round_trip_preserves_absent_cause_and_stack() {
    let err = HError::new("leaf");

    let decoded = HError::from_json(&err.to_json().unwrap()).unwrap();

    assert!(decoded.unwrap().is_none());
    assert!(decoded.stack().is_none());
    assert_eq!(decoded, err);
}

#[test]
fn nested_nodes_carry_all_four_keys() {
    let err = HError::new("outer").wrap(HError::new("inner"));
    let value = serde_json::to_value(&err).unwrap();

    let outer = value.as_object().unwrap();
    let mut keys: Vec<_> = outer.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["details", "error", "stack", "wrapped"]);

    assert_eq!(value["error"], "outer");
    assert_eq!(value["wrapped"]["error"], "inner");
    assert!(value["wrapped"]["wrapped"].is_null());
    assert!(value["stack"].is_null());
}

#[test]
fn decode_handwritten_payload() {
    let payload = r#"{
        "error": "MAIN ERROR",
        "wrapped": {"error": "ERR A", "wrapped": null, "details": "", "stack": null},
        "details": "\n(u8) 1\n",
        "stack": {"frames": [{"function": "main", "package": "my_app", "line": 4, "in_app": true}]}
    }"#;

    let err: HError = serde_json::from_str(payload).unwrap();

    assert_eq!(err.to_string(), "MAIN ERROR\n-> ERR A");
    assert_eq!(err.details(), "\n(u8) 1\n");
    let expected = Stacktrace {
        frames: vec![Frame {
            function: "main".to_string(),
            package: "my_app".to_string(),
            line: 4,
            in_app: true,
            ..Default::default()
        }],
    };
    assert_eq!(err.stack(), Some(&expected));
}

#[test]
fn empty_stack_stays_present() {
    let payload = r#"{"error":"x","wrapped":null,"details":"","stack":{}}"#;
    let err = HError::from_json(payload).unwrap();
    assert_eq!(err.stack(), Some(&Stacktrace::default()));
    assert_eq!(err.to_json().unwrap(), payload);
}

#[test]
fn malformed_json_is_rejected() {
    assert!(serde_json::from_str::<HError>("{\"error\": 1").is_err());
    let err = HError::from_json("not json").unwrap_err();
    assert!(err.to_string().contains("JSON Error"));
}
