//! Property tests for dispatch ordering: whatever mix of submits and failed
//! or successful flushes happens, events reach the wire in submission order
//! and none are lost while the queue stays under its cap.

use pagelog_core::config::{DispatchConfig, TransportConfig};
use pagelog_core::traits::Delivery;
use pagelog_dispatch::{BatchContext, Dispatcher};
use pagelog_events::{Action, ActionKind, Envelope};
use proptest::prelude::*;
use test_fixtures::RecordingTransport;

#[derive(Debug, Clone)]
enum Op {
    Submit,
    Flush,
    GoOffline,
    GoOnline,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Submit),
        2 => Just(Op::Flush),
        1 => Just(Op::GoOffline),
        1 => Just(Op::GoOnline),
    ]
}

fn action(n: usize) -> Envelope {
    Envelope::Action(Action {
        id: n.to_string(),
        session_id: "s".to_string(),
        kind: ActionKind::FormSubmit,
        timestamp: n as u64,
        target: None,
    })
}

proptest! {
    #[test]
    fn delivered_events_keep_submission_order(
        ops in prop::collection::vec(op_strategy(), 1..120),
        batch_size in 1usize..8,
    ) {
        let transport = RecordingTransport::new();
        let config = DispatchConfig {
            max_batch_size: batch_size,
            max_queue_size: 10_000,
            ..DispatchConfig::default()
        };
        let mut d = Dispatcher::new(
            Box::new(transport.clone()),
            &TransportConfig::default(),
            &config,
        );
        let ctx = BatchContext {
            session_id: "s".to_string(),
            user_agent: "ua".to_string(),
            user_id: None,
        };

        let mut submitted = 0usize;
        for op in ops {
            match op {
                Op::Submit => {
                    d.submit(action(submitted), &ctx, 0);
                    submitted += 1;
                }
                Op::Flush => {
                    d.flush(&ctx, 0, Delivery::Deferred);
                }
                Op::GoOffline => transport.set_offline(true),
                Op::GoOnline => transport.set_offline(false),
            }
        }
        transport.set_offline(false);
        d.flush(&ctx, 0, Delivery::Beacon);

        let delivered: Vec<usize> = transport
            .sent_events()
            .iter()
            .filter_map(|e| e["data"]["id"].as_str().and_then(|id| id.parse().ok()))
            .collect();
        let expected: Vec<usize> = (0..submitted).collect();
        prop_assert_eq!(delivered, expected);
        prop_assert_eq!(d.pending_len(), 0);
    }

    #[test]
    fn queue_never_exceeds_its_cap(
        submits in 1usize..200,
        cap in 1usize..50,
    ) {
        let transport = RecordingTransport::new();
        transport.set_offline(true);
        let config = DispatchConfig {
            max_batch_size: 1,
            max_queue_size: cap,
            ..DispatchConfig::default()
        };
        let mut d = Dispatcher::new(Box::new(transport), &TransportConfig::default(), &config);
        let ctx = BatchContext {
            session_id: "s".to_string(),
            user_agent: "ua".to_string(),
            user_id: None,
        };

        for n in 0..submits {
            d.submit(action(n), &ctx, 0);
            prop_assert!(d.pending_len() <= cap);
        }
        prop_assert_eq!(d.stats().events_dropped as usize, submits.saturating_sub(cap));
    }
}
