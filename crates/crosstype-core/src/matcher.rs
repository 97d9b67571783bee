//! Priority-ordered predicate dispatch.
//!
//! Compilers map node kinds (or kind groups) to emit actions. A [`Matcher`]
//! holds `(predicate, action)` arms sorted by priority, highest first; arms of
//! equal priority keep insertion order. The first arm whose predicate accepts
//! the value runs. If none does, the default action runs, if any.
//!
//! ```text
//! Matcher::new()
//!     .on_kind(NodeKind::String, |_, _| "string".into())
//!     .on_priority(10, typeguards::is_literal, |node, _| literal_text(node))
//!     .on(typeguards::is_numeric, |_, _| "number".into())
//!     .otherwise(|_, _| "unknown".into())
//! ```

use crosstype_ast::{Node, NodeKind};

pub type MatchPredicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
pub type MatchAction<T, R, C> = Box<dyn Fn(&T, &C) -> R + Send + Sync>;

/// Priority of arms added without one.
pub const DEFAULT_PRIORITY: i32 = 0;

struct MatchArm<T: ?Sized, R, C: ?Sized> {
    predicate: MatchPredicate<T>,
    action: MatchAction<T, R, C>,
    priority: i32,
}

pub struct Matcher<T: ?Sized, R, C: ?Sized = ()> {
    arms: Vec<MatchArm<T, R, C>>,
    default_action: Option<MatchAction<T, R, C>>,
}

impl<T: ?Sized, R, C: ?Sized> Default for Matcher<T, R, C> {
    fn default() -> Self {
        Self {
            arms: Vec::new(),
            default_action: None,
        }
    }
}

impl<T: ?Sized, R, C: ?Sized> Matcher<T, R, C> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(
        self,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
        action: impl Fn(&T, &C) -> R + Send + Sync + 'static,
    ) -> Self {
        self.on_priority(DEFAULT_PRIORITY, predicate, action)
    }

    /// Add an arm. Higher priorities are tried first.
    #[must_use]
    pub fn on_priority(
        mut self,
        priority: i32,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
        action: impl Fn(&T, &C) -> R + Send + Sync + 'static,
    ) -> Self {
        let at = self.arms.partition_point(|arm| arm.priority >= priority);
        self.arms.insert(
            at,
            MatchArm {
                predicate: Box::new(predicate),
                action: Box::new(action),
                priority,
            },
        );
        self
    }

    /// Action run when no predicate matches. Replaces any previous default.
    #[must_use]
    pub fn otherwise(mut self, action: impl Fn(&T, &C) -> R + Send + Sync + 'static) -> Self {
        self.default_action = Some(Box::new(action));
        self
    }

    /// Run the highest-priority matching arm, falling back to the default.
    /// `None` when nothing matches and there is no default.
    pub fn run(&self, value: &T, context: &C) -> Option<R> {
        match self.arms.iter().find(|arm| (arm.predicate)(value)) {
            Some(arm) => Some((arm.action)(value, context)),
            None => self.default_action.as_ref().map(|action| action(value, context)),
        }
    }

    pub fn matches(&self, value: &T) -> bool {
        self.default_action.is_some() || self.arms.iter().any(|arm| (arm.predicate)(value))
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }
}

impl<R, C: ?Sized> Matcher<Node, R, C> {
    /// Arm matching one node kind exactly.
    #[must_use]
    pub fn on_kind(
        self,
        kind: NodeKind,
        action: impl Fn(&Node, &C) -> R + Send + Sync + 'static,
    ) -> Self {
        self.on(move |node: &Node| node.kind == kind, action)
    }
}

#[cfg(test)]
#[path = "../tests/matcher_tests.rs"]
mod matcher_tests;
