//! Shared helpers for integration tests

use stagechain::trace::{Root, TraceLog, Traced};
use stagechain::{BehaviorList, Part, Pipeline};

/// `count` traced in-stage behaviors labelled `b0`, `b1`, ...
pub fn flat_chain(count: usize, log: &TraceLog) -> Pipeline<Root> {
    let mut behaviors = BehaviorList::new();
    let parts: Vec<Part> = (0..count)
        .map(|i| Part::simple(behaviors.push::<Root, Root, _>(Traced::new(format!("b{}", i), log))))
        .collect();
    Pipeline::new(behaviors, parts).unwrap()
}

/// Expected onion trace for `labels` run in order as in-stage behaviors.
pub fn onion(labels: &[&str]) -> Vec<String> {
    let mut expected: Vec<String> = labels.iter().map(|l| format!("{}-before", l)).collect();
    expected.extend(labels.iter().rev().map(|l| format!("{}-after", l)));
    expected
}
