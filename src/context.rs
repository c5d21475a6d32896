//! Stage-typed views over one invocation.
//!
//! Every context of an invocation references the same [`BehaviorList`], the same
//! [`Frame`] and the same [`Extensions`]. Moving to another stage reborrows those
//! references under a new stage tag; nothing is copied or reset, so the frame's
//! snapshot bookkeeping stays consistent across any number of stage boundaries.

use crate::behavior::BehaviorList;
use crate::frame::Frame;
use crate::stage::Stage;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;

/// Per-invocation state handle tagged with stage `S`.
pub struct Context<'c, S> {
    behaviors: &'c BehaviorList,
    frame: &'c mut Frame,
    extensions: &'c mut Extensions,
    _stage: PhantomData<fn() -> S>,
}

impl<'c, S: Stage> Context<'c, S> {
    pub(crate) fn root(
        behaviors: &'c BehaviorList,
        frame: &'c mut Frame,
        extensions: &'c mut Extensions,
    ) -> Self {
        Self {
            behaviors,
            frame,
            extensions,
            _stage: PhantomData,
        }
    }

    /// Builds the view for stage `T`, carrying forward this invocation's behavior
    /// list, frame and extensions.
    ///
    /// Transition behaviors call this to produce the context handed to `next`.
    pub fn derive<T: Stage>(&mut self) -> Context<'_, T> {
        Context {
            behaviors: self.behaviors,
            frame: &mut *self.frame,
            extensions: &mut *self.extensions,
            _stage: PhantomData,
        }
    }

    pub fn stage_name(&self) -> &'static str {
        S::NAME
    }

    /// Number of enclosing stage sub-chains currently paused.
    pub fn depth(&self) -> usize {
        self.frame.depth()
    }

    pub fn extensions(&self) -> &Extensions {
        &*self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut *self.extensions
    }

    pub(crate) fn behaviors(&self) -> &'c BehaviorList {
        self.behaviors
    }

    pub(crate) fn frame(&self) -> &Frame {
        &*self.frame
    }

    pub(crate) fn frame_mut(&mut self) -> &mut Frame {
        &mut *self.frame
    }
}

impl<S: Stage> std::fmt::Debug for Context<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("stage", &S::NAME)
            .field("depth", &self.frame.depth())
            .field("index", &self.frame.index())
            .field("extensions", &self.extensions.len())
            .finish()
    }
}

/// Typed per-invocation values shared by every stage view of an invocation.
#[derive(Default)]
pub struct Extensions {
    map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, returning the previous value of the same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.map
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    pub fn get_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|value| value.downcast_mut::<T>())
    }

    pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.map
            .remove(&TypeId::of::<T>())
            .and_then(|value| value.downcast::<T>().ok())
            .map(|value| *value)
    }

    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl std::fmt::Debug for Extensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extensions")
            .field("len", &self.map.len())
            .finish()
    }
}
