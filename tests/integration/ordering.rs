//! Dispatch order across simple and transition parts

use super::test_utils::{flat_chain, onion};
use stagechain::trace::{scenario, Enter, Nested, Root, TraceLog, Traced};
use stagechain::{BehaviorList, Outcome, Part, Pipeline};

#[tokio::test]
async fn test_simple_parts_run_in_order() {
    let log = TraceLog::new();
    let pipeline = flat_chain(5, &log);

    let outcome = pipeline.invoke().await.unwrap();

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(log.labels(), onion(&["b0", "b1", "b2", "b3", "b4"]));
}

#[tokio::test]
async fn test_staged_chain_trace() {
    let log = TraceLog::new();
    let pipeline = scenario::staged(&log).unwrap();

    let outcome = pipeline.invoke().await.unwrap();

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(
        log.labels(),
        vec![
            "A-before", "B-before", "C-before", "C-after", "B-after", "D-before", "D-after",
            "A-after"
        ]
    );

    let events = log.events();
    let c = events.iter().find(|e| e.label == "C").unwrap();
    assert_eq!(c.stage, "nested");
    assert_eq!(c.depth, 1);
    let d = events.iter().find(|e| e.label == "D").unwrap();
    assert_eq!(d.stage, "root");
    assert_eq!(d.depth, 0);
}

#[tokio::test]
async fn test_empty_root_completes_immediately() {
    let pipeline = Pipeline::<Root>::new(BehaviorList::new(), Vec::<Part>::new()).unwrap();
    assert_eq!(pipeline.invoke().await.unwrap(), Outcome::Completed);
}

#[tokio::test]
async fn test_empty_child_sequence_resumes_parent() {
    let log = TraceLog::new();
    let mut behaviors = BehaviorList::new();
    let x = behaviors.push::<Root, Nested, _>(Enter::<Nested>::new("X", &log));
    let d = behaviors.push::<Root, Root, _>(Traced::new("D", &log));
    let pipeline = Pipeline::<Root>::new(
        behaviors,
        vec![Part::transition(x, Vec::<Part>::new()), Part::simple(d)],
    )
    .unwrap();

    let outcome = pipeline.invoke().await.unwrap();

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(log.labels(), vec!["X-before", "X-after", "D-before", "D-after"]);
}

#[tokio::test]
async fn test_transition_as_last_part_completes() {
    let log = TraceLog::new();
    let mut behaviors = BehaviorList::new();
    let a = behaviors.push::<Root, Root, _>(Traced::new("A", &log));
    let b = behaviors.push::<Root, Nested, _>(Enter::<Nested>::new("B", &log));
    let c = behaviors.push::<Nested, Nested, _>(Traced::new("C", &log));
    let pipeline = Pipeline::<Root>::new(
        behaviors,
        vec![
            Part::simple(a),
            Part::transition(b, vec![Part::simple(c)]),
        ],
    )
    .unwrap();

    let outcome = pipeline.invoke().await.unwrap();

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(
        log.labels(),
        vec!["A-before", "B-before", "C-before", "C-after", "B-after", "A-after"]
    );
}

#[tokio::test]
async fn test_pipeline_is_reusable() {
    let log = TraceLog::new();
    let pipeline = flat_chain(3, &log);

    pipeline.invoke().await.unwrap();
    let first = log.labels();
    log.clear();
    pipeline.invoke().await.unwrap();

    assert_eq!(log.labels(), first);
}
