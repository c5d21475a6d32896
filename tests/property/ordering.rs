//! Property-based tests for ordering guarantees

use proptest::prelude::*;
use stagechain::trace::{scenario, Enter, Nested, Phase, Root, TraceLog, Traced};
use stagechain::{BehaviorList, ChainError, Outcome, Part, Pipeline, MAX_DEPTH};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

/// Any number of in-stage behaviors runs in registration order and unwinds in reverse
#[test]
fn test_flat_chain_order_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(0usize..64), |count| {
            let log = TraceLog::new();
            let pipeline = scenario::depth(count, false, &log).unwrap();
            let outcome = block_on(pipeline.invoke()).unwrap();
            prop_assert_eq!(outcome, Outcome::Completed);

            let events = log.events();
            prop_assert_eq!(events.len(), count * 2);
            for i in 0..count {
                prop_assert_eq!(&events[i].label, &format!("level-{}", i));
                prop_assert_eq!(events[i].phase, Phase::Before);
                prop_assert_eq!(&events[2 * count - 1 - i].label, &format!("level-{}", i));
                prop_assert_eq!(events[2 * count - 1 - i].phase, Phase::After);
            }
            Ok(())
        })
        .unwrap();
}

/// Nesting up to the frame limit completes; one level more always overflows
#[test]
fn test_nesting_depth_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(0usize..=MAX_DEPTH + 2, 0usize..4), |(transitions, child_len)| {
            let log = TraceLog::new();
            let pipeline = scenario::nesting(transitions, child_len, &log).unwrap();
            let result = block_on(pipeline.invoke());

            if transitions <= MAX_DEPTH {
                prop_assert_eq!(result.unwrap(), Outcome::Completed);
                prop_assert_eq!(log.len(), 2 * (transitions + child_len));
            } else {
                let overflowed = matches!(result, Err(ChainError::StackOverflow { .. }));
                prop_assert!(overflowed);
                prop_assert_eq!(log.len(), MAX_DEPTH);
            }
            Ok(())
        })
        .unwrap();
}

/// Parts after a transition always run after the whole nested sub-chain
#[test]
fn test_sub_chain_precedes_following_parts_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(0usize..6, 0usize..6, 0usize..6), |(before, inside, after)| {
            let log = TraceLog::new();
            let mut behaviors = BehaviorList::new();
            let mut parts = Vec::new();
            for i in 0..before {
                parts.push(Part::simple(
                    behaviors.push::<Root, Root, _>(Traced::new(format!("pre-{}", i), &log)),
                ));
            }
            let children: Vec<Part> = (0..inside)
                .map(|i| {
                    Part::simple(
                        behaviors.push::<Nested, Nested, _>(Traced::new(format!("in-{}", i), &log)),
                    )
                })
                .collect();
            let enter = behaviors.push::<Root, Nested, _>(Enter::<Nested>::new("enter", &log));
            parts.push(Part::transition(enter, children));
            for i in 0..after {
                parts.push(Part::simple(
                    behaviors.push::<Root, Root, _>(Traced::new(format!("post-{}", i), &log)),
                ));
            }

            let pipeline = Pipeline::<Root>::new(behaviors, parts).unwrap();
            prop_assert_eq!(block_on(pipeline.invoke()).unwrap(), Outcome::Completed);

            let labels = log.labels();
            let enter_after = labels.iter().position(|l| l == "enter-after").unwrap();
            let last_inside = labels.iter().rposition(|l| l.starts_with("in-"));
            let first_post = labels.iter().position(|l| l.starts_with("post-"));
            if let Some(last_inside) = last_inside {
                prop_assert!(last_inside < enter_after);
            }
            if let Some(first_post) = first_post {
                prop_assert!(enter_after < first_post);
            }
            Ok(())
        })
        .unwrap();
}
