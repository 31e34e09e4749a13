//! Property tests for the collector lifecycle: at most one open view,
//! monotone action counter, and emitted events matching the counters.

use std::time::Duration;

use pagelog_collector::{Collector, Host};
use pagelog_core::config::{DispatchMode, PageLogConfig};
use pagelog_core::models::{FormDescriptor, HostEvent, TargetDescriptor};
use proptest::prelude::*;
use test_fixtures::{
    FakePage, ManualClock, ManualScheduler, RecordingEventSource, RecordingTransport, SharedStore,
};

#[derive(Debug, Clone)]
enum Op {
    ViewStart,
    ViewEnd,
    Click,
    Submit,
    Navigate,
    Advance(u64),
    Destroy,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::ViewStart),
        3 => Just(Op::ViewEnd),
        4 => Just(Op::Click),
        2 => Just(Op::Submit),
        2 => Just(Op::Navigate),
        3 => (1u64..5_000).prop_map(Op::Advance),
        1 => Just(Op::Destroy),
    ]
}

fn count(types: &[String], wanted: &str) -> usize {
    types.iter().filter(|t| t.as_str() == wanted).count()
}

proptest! {
    #[test]
    fn lifecycle_invariants_hold_for_any_call_sequence(
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let clock = ManualClock::default();
        let transport = RecordingTransport::new();
        let host = Host {
            clock: Box::new(clock.clone()),
            store: Box::new(SharedStore::new()),
            page: Box::new(FakePage::default()),
            events: Box::new(RecordingEventSource::default()),
            scheduler: Box::new(ManualScheduler::default()),
            transport: Box::new(transport.clone()),
        };
        let mut config = PageLogConfig::default();
        config.dispatch.mode = DispatchMode::Immediate;
        let mut collector = Collector::new(config, host);
        collector.init();

        let mut last_actions = 0;
        for op in ops {
            match op {
                Op::ViewStart => collector.track_page_view_start(),
                Op::ViewEnd => collector.track_page_view_end(),
                Op::Click => collector.handle_click(&TargetDescriptor::with_tag("a")),
                Op::Submit => collector.handle_form_submit(&FormDescriptor::default()),
                Op::Navigate => collector.handle_event(HostEvent::Navigation),
                Op::Advance(ms) => clock.advance(Duration::from_millis(ms)),
                Op::Destroy => collector.destroy(),
            }

            let types = transport.sent_event_types();
            let open = count(&types, "VIEW_START") - count(&types, "VIEW_END");
            prop_assert!(open <= 1);
            prop_assert_eq!(open == 1, collector.current_view().is_some());

            let session = collector.session().expect("initialized");
            prop_assert!(session.action_count >= last_actions);
            last_actions = session.action_count;
            prop_assert_eq!(session.action_count as usize, count(&types, "ACTION"));
            prop_assert_eq!(session.view_count as usize, count(&types, "VIEW_START"));
            prop_assert!(count(&types, "SESSION_END") <= 1);
        }
    }
}
