use pagelog_events::{
    decode_envelope, encode_envelope, Action, ActionKind, Envelope, SessionAttributes, SessionEnd,
    SessionKind, SessionMetrics, ViewStart,
};
use proptest::prelude::*;

fn arb_attributes() -> impl Strategy<Value = SessionAttributes> {
    (
        "[0-9a-z]{32}",
        any::<bool>(),
        prop_oneof![Just(SessionKind::User), Just(SessionKind::Synthetics)],
        proptest::option::of(".{0,40}"),
    )
        .prop_map(|(fingerprint, is_active, kind, referrer)| SessionAttributes {
            fingerprint,
            is_active,
            kind,
            referrer,
            ip: None,
        })
}

fn arb_envelope() -> impl Strategy<Value = Envelope> {
    prop_oneof![
        (
            "[a-z0-9-]{1,20}",
            "[a-z0-9-]{1,20}",
            prop_oneof![Just(ActionKind::Click), Just(ActionKind::FormSubmit)],
            any::<u64>(),
            proptest::option::of(".{0,30}"),
        )
            .prop_map(|(id, session_id, kind, timestamp, target)| {
                Envelope::Action(Action {
                    id,
                    session_id,
                    kind,
                    timestamp,
                    target,
                })
            }),
        (
            "[a-z0-9-]{1,20}",
            "/[a-z/]{0,20}",
            any::<u64>(),
            proptest::option::of(".{0,30}"),
        )
            .prop_map(|(id, path, start_timestamp, title)| {
                Envelope::ViewStart(ViewStart {
                    id,
                    session_id: "s".into(),
                    url: format!("https://example.com{path}"),
                    path,
                    start_timestamp,
                    title,
                    referrer: None,
                })
            }),
        (
            "[a-z0-9-]{1,20}",
            arb_attributes(),
            any::<(u32, u32, u32)>(),
        )
            .prop_map(|(id, attributes, (actions, views, spent))| {
                Envelope::SessionEnd(SessionEnd {
                    id,
                    start_timestamp: 1,
                    end_timestamp: 2,
                    attributes,
                    metrics: SessionMetrics {
                        action_count: actions as u64,
                        view_count: views as u64,
                        time_spent: spent as u64,
                    },
                })
            }),
    ]
}

proptest! {
    #[test]
    fn valid_envelopes_survive_encode_decode(envelope in arb_envelope()) {
        let json = encode_envelope(&envelope).unwrap();
        let decoded = decode_envelope(&json).unwrap();
        prop_assert_eq!(decoded, envelope);
    }

    #[test]
    fn dropping_any_required_data_field_is_named(envelope in arb_envelope(), pick in any::<prop::sample::Index>()) {
        let mut value: serde_json::Value =
            serde_json::from_str(&encode_envelope(&envelope).unwrap()).unwrap();
        let data = value["data"].as_object_mut().unwrap();
        let required: Vec<String> = data
            .keys()
            .filter(|k| !matches!(k.as_str(), "title" | "referrer" | "target"))
            .cloned()
            .collect();
        let victim = required[pick.index(required.len())].clone();
        data.remove(&victim);

        let err = decode_envelope(&value.to_string()).unwrap_err();
        let expected_field = format!("data.{victim}");
        prop_assert_eq!(err.field(), Some(expected_field.as_str()));
    }
}
