//! Behaviors that decline to call their continuation

use stagechain::trace::{scenario, Enter, Halt, Nested, Root, TraceLog, Traced};
use stagechain::{BehaviorList, Outcome, Part, Pipeline};

#[tokio::test]
async fn test_halt_ends_invocation_without_error() {
    let log = TraceLog::new();
    let pipeline = scenario::halting(&log).unwrap();

    let outcome = pipeline.invoke().await.unwrap();

    assert_eq!(outcome, Outcome::Halted);
    assert!(!outcome.is_completed());
    assert_eq!(log.labels(), vec!["A-before", "H-before", "A-after"]);
}

#[tokio::test]
async fn test_halt_inside_sub_chain_stops_parent() {
    let log = TraceLog::new();
    let mut behaviors = BehaviorList::new();
    let t = behaviors.push::<Root, Nested, _>(Enter::<Nested>::new("T", &log));
    let h = behaviors.push::<Nested, Nested, _>(Halt::new("H", &log));
    let c = behaviors.push::<Nested, Nested, _>(Traced::new("C", &log));
    let d = behaviors.push::<Root, Root, _>(Traced::new("D", &log));
    let pipeline = Pipeline::<Root>::new(
        behaviors,
        vec![
            Part::transition(t, vec![Part::simple(h), Part::simple(c)]),
            Part::simple(d),
        ],
    )
    .unwrap();

    let outcome = pipeline.invoke().await.unwrap();

    assert_eq!(outcome, Outcome::Halted);
    assert_eq!(log.labels(), vec!["T-before", "H-before", "T-after"]);
}

#[tokio::test]
async fn test_halting_transition_skips_its_sub_chain() {
    let log = TraceLog::new();
    let mut behaviors = BehaviorList::new();
    let h = behaviors.push::<Root, Root, _>(Halt::new("H", &log));
    let c = behaviors.push::<Root, Root, _>(Traced::new("C", &log));
    let d = behaviors.push::<Root, Root, _>(Traced::new("D", &log));
    let pipeline = Pipeline::<Root>::new(
        behaviors,
        vec![Part::transition(h, vec![Part::simple(c)]), Part::simple(d)],
    )
    .unwrap();

    let outcome = pipeline.invoke().await.unwrap();

    assert_eq!(outcome, Outcome::Halted);
    assert_eq!(log.labels(), vec!["H-before"]);
}
