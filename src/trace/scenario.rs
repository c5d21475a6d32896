//! Demo chains assembled from the trace behaviors.

use super::{Enter, Fail, Halt, Level, Nested, Root, TraceLog, Traced};
use crate::behavior::BehaviorList;
use crate::error::ChainError;
use crate::part::Part;
use crate::pipeline::Pipeline;

/// `[A, B -> [C], D]`: one simple part, a transition into [`Nested`] with a single
/// child, and one more simple part after it.
pub fn staged(log: &TraceLog) -> Result<Pipeline<Root>, ChainError> {
    let mut behaviors = BehaviorList::new();
    let a = behaviors.push::<Root, Root, _>(Traced::new("A", log));
    let b = behaviors.push::<Root, Nested, _>(Enter::<Nested>::new("B", log));
    let c = behaviors.push::<Nested, Nested, _>(Traced::new("C", log));
    let d = behaviors.push::<Root, Root, _>(Traced::new("D", log));

    Pipeline::new(
        behaviors,
        vec![
            Part::simple(a),
            Part::transition(b, vec![Part::simple(c)]),
            Part::simple(d),
        ],
    )
}

/// `levels` numbered behaviors in one stage, optionally followed by a failing one.
pub fn depth(levels: usize, fail: bool, log: &TraceLog) -> Result<Pipeline<Root>, ChainError> {
    let mut behaviors = BehaviorList::new();
    let mut parts = Vec::with_capacity(levels + 1);
    for level in 0..levels {
        parts.push(Part::simple(
            behaviors.push::<Root, Root, _>(Level::new(level, log)),
        ));
    }
    if fail {
        parts.push(Part::simple(
            behaviors.push::<Root, Root, _>(Fail::new(format!("level-{}", levels), log)),
        ));
    }
    Pipeline::new(behaviors, parts)
}

/// `transitions` nested stage transitions, alternating between [`Root`] and
/// [`Nested`], with `child_len` traced behaviors in the innermost sub-chain.
pub fn nesting(
    transitions: usize,
    child_len: usize,
    log: &TraceLog,
) -> Result<Pipeline<Root>, ChainError> {
    let mut behaviors = BehaviorList::new();

    // The stage at level `k` is Root for even k and Nested for odd k.
    let innermost_is_root = transitions % 2 == 0;
    let mut parts: Vec<Part> = (0..child_len)
        .map(|i| {
            let traced = Traced::new(format!("child-{}", i), log);
            let index = if innermost_is_root {
                behaviors.push::<Root, Root, _>(traced)
            } else {
                behaviors.push::<Nested, Nested, _>(traced)
            };
            Part::simple(index)
        })
        .collect();

    for level in (0..transitions).rev() {
        let label = format!("enter-{}", level + 1);
        let index = if level % 2 == 0 {
            behaviors.push::<Root, Nested, _>(Enter::<Nested>::new(label, log))
        } else {
            behaviors.push::<Nested, Root, _>(Enter::<Root>::new(label, log))
        };
        parts = vec![Part::transition(index, parts)];
    }

    Pipeline::new(behaviors, parts)
}

/// `[A, H, B]` where `H` never calls `next`.
pub fn halting(log: &TraceLog) -> Result<Pipeline<Root>, ChainError> {
    let mut behaviors = BehaviorList::new();
    let a = behaviors.push::<Root, Root, _>(Traced::new("A", log));
    let h = behaviors.push::<Root, Root, _>(Halt::new("H", log));
    let b = behaviors.push::<Root, Root, _>(Traced::new("B", log));
    Pipeline::new(
        behaviors,
        vec![Part::simple(a), Part::simple(h), Part::simple(b)],
    )
}
