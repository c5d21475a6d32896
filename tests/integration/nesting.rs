//! Nested stage transitions and the depth limit

use stagechain::trace::{scenario, Phase, TraceLog};
use stagechain::{ChainError, Outcome, MAX_DEPTH};

#[tokio::test]
async fn test_max_depth_nesting_completes() {
    let log = TraceLog::new();
    let pipeline = scenario::nesting(MAX_DEPTH, 2, &log).unwrap();

    let outcome = pipeline.invoke().await.unwrap();
    assert_eq!(outcome, Outcome::Completed);

    let events = log.events();
    let child = events.iter().find(|e| e.label == "child-0").unwrap();
    assert_eq!(child.depth, MAX_DEPTH);
    // Even nesting ends back in the root stage.
    assert_eq!(child.stage, "root");
}

#[tokio::test]
async fn test_one_past_max_depth_overflows() {
    let log = TraceLog::new();
    let pipeline = scenario::nesting(MAX_DEPTH + 1, 1, &log).unwrap();

    let err = pipeline.invoke().await.unwrap_err();

    assert!(matches!(err, ChainError::StackOverflow { max } if max == MAX_DEPTH));
    let labels = log.labels();
    assert!(labels.contains(&format!("enter-{}-before", MAX_DEPTH)));
    assert!(!labels.iter().any(|l| l.starts_with(&format!("enter-{}", MAX_DEPTH + 1))));
    assert!(!labels.iter().any(|l| l.starts_with("child-")));
    // The failure unwinds every enclosing transition without after-events.
    assert!(!labels.iter().any(|l| l.ends_with("-after")));
}

#[tokio::test]
async fn test_nested_sub_chains_unwind_in_lifo_order() {
    let log = TraceLog::new();
    let pipeline = scenario::nesting(3, 1, &log).unwrap();

    pipeline.invoke().await.unwrap();

    assert_eq!(
        log.labels(),
        vec![
            "enter-1-before",
            "enter-2-before",
            "enter-3-before",
            "child-0-before",
            "child-0-after",
            "enter-3-after",
            "enter-2-after",
            "enter-1-after",
        ]
    );
    let depths: Vec<usize> = log
        .events()
        .iter()
        .filter(|e| e.phase == Phase::Before)
        .map(|e| e.depth)
        .collect();
    assert_eq!(depths, vec![1, 2, 3, 3]);
}

#[tokio::test]
async fn test_stage_alternates_with_each_transition() {
    let log = TraceLog::new();
    let pipeline = scenario::nesting(3, 1, &log).unwrap();

    pipeline.invoke().await.unwrap();

    let stages: Vec<&str> = log
        .events()
        .iter()
        .filter(|e| e.label.starts_with("enter-") && e.phase == Phase::Before)
        .map(|e| e.stage)
        .collect();
    assert_eq!(stages, vec!["root", "nested", "root"]);
    let child = log.events().into_iter().find(|e| e.label == "child-0").unwrap();
    assert_eq!(child.stage, "nested");
}
