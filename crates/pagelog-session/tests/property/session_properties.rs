use pagelog_core::constants::FINGERPRINT_LEN;
use pagelog_core::models::DeviceProfile;
use pagelog_events::ViewStart;
use pagelog_session::{generate_fingerprint, ViewTracker};
use proptest::prelude::*;

fn arb_profile() -> impl Strategy<Value = DeviceProfile> {
    (
        proptest::option::of(".{0,80}"),
        proptest::option::of("[a-z]{2}-[A-Z]{2}"),
        proptest::option::of(any::<(u32, u32)>()),
        proptest::option::of(any::<u32>()),
        proptest::option::of("[A-Za-z]+/[A-Za-z_]+"),
        proptest::option::of(1u32..256),
        proptest::option::of("[0-9]{1,3}"),
    )
        .prop_map(|(ua, lang, screen, depth, tz, cores, mem)| DeviceProfile {
            user_agent: ua,
            language: lang,
            screen_width: screen.map(|s| s.0),
            screen_height: screen.map(|s| s.1),
            color_depth: depth,
            timezone: tz,
            hardware_concurrency: cores,
            device_memory: mem,
        })
}

#[derive(Debug, Clone)]
enum ViewOp {
    Start,
    End,
}

proptest! {
    #[test]
    fn fingerprint_is_deterministic_and_fixed_length(profile in arb_profile()) {
        let a = generate_fingerprint(&profile);
        let b = generate_fingerprint(&profile.clone());
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), FINGERPRINT_LEN);
        prop_assert!(a.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn at_most_one_view_is_ever_open(ops in proptest::collection::vec(
        prop_oneof![Just(ViewOp::Start), Just(ViewOp::End)], 0..64)
    ) {
        let mut tracker = ViewTracker::new();
        let mut open = 0i32;
        for (i, op) in ops.iter().enumerate() {
            match op {
                ViewOp::Start => {
                    let opened = tracker.open(ViewStart {
                        id: format!("v-{i}"),
                        session_id: "s".into(),
                        path: "/".into(),
                        url: "u".into(),
                        start_timestamp: i as u64,
                        title: None,
                        referrer: None,
                    });
                    if opened {
                        open += 1;
                    }
                }
                ViewOp::End => {
                    if tracker.close(i as u64).is_some() {
                        open -= 1;
                    }
                }
            }
            prop_assert!((0..=1).contains(&open));
            prop_assert_eq!(tracker.is_open(), open == 1);
        }
    }
}
