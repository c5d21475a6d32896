//! Chains whose parts and behaviors do not line up are rejected at assembly

use stagechain::trace::{Enter, Nested, Root, TraceLog, Traced};
use stagechain::{BehaviorList, ChainError, Part, Pipeline};

fn assert_misconfigured(result: Result<Pipeline<Root>, ChainError>, needle: &str) {
    match result {
        Err(ChainError::Misconfigured(msg)) => {
            assert!(msg.contains(needle), "unexpected message: {}", msg)
        }
        other => panic!("expected misconfiguration, got {:?}", other),
    }
}

#[test]
fn test_unknown_behavior_index_is_rejected() {
    let log = TraceLog::new();
    let mut behaviors = BehaviorList::new();
    let a = behaviors.push::<Root, Root, _>(Traced::new("A", &log));

    let result = Pipeline::<Root>::new(behaviors, vec![Part::simple(a), Part::simple(7)]);

    assert_misconfigured(result, "only 1 are registered");
}

#[test]
fn test_behavior_in_wrong_stage_is_rejected() {
    let log = TraceLog::new();
    let mut behaviors = BehaviorList::new();
    let c = behaviors.push::<Nested, Nested, _>(Traced::new("C", &log));

    let result = Pipeline::<Root>::new(behaviors, vec![Part::simple(c)]);

    assert_misconfigured(result, "stage 'nested'");
}

#[test]
fn test_transition_behavior_in_simple_part_is_rejected() {
    let log = TraceLog::new();
    let mut behaviors = BehaviorList::new();
    let b = behaviors.push::<Root, Nested, _>(Enter::<Nested>::new("B", &log));

    let result = Pipeline::<Root>::new(behaviors, vec![Part::simple(b)]);

    assert_misconfigured(result, "is simple");
}

#[test]
fn test_child_sequence_checked_against_output_stage() {
    let log = TraceLog::new();
    let mut behaviors = BehaviorList::new();
    let b = behaviors.push::<Root, Nested, _>(Enter::<Nested>::new("B", &log));
    let a = behaviors.push::<Root, Root, _>(Traced::new("A", &log));

    let result = Pipeline::<Root>::new(behaviors, vec![Part::transition(b, vec![Part::simple(a)])]);

    assert_misconfigured(result, "the chain is in stage 'nested'");
}

#[test]
fn test_descriptors_describe_registered_behaviors() {
    let log = TraceLog::new();
    let mut behaviors = BehaviorList::new();
    behaviors.push::<Root, Root, _>(Traced::new("A", &log));
    behaviors.push::<Root, Nested, _>(Enter::<Nested>::new("B", &log));

    let descriptors: Vec<_> = behaviors.descriptors().collect();
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0].name, "A");
    assert!(!descriptors[0].is_transition());
    assert_eq!(descriptors[1].output.name(), "nested");
    assert!(descriptors[1].is_transition());
}
