use crate::{BehaviorCallback, BehaviorNode, BehaviorResult, Blackboard, Context};

/// Bundles the root node of an assembled tree with the [`Context`] it runs
/// against. This is the surface a driver holds on to: update the time, tick
/// once per step, read results back off the blackboard.
pub struct BehaviorTree {
    root: Box<dyn BehaviorNode>,
    context: Context,
}

impl BehaviorTree {
    pub fn new(root: Box<dyn BehaviorNode>) -> Self {
        Self {
            root,
            context: Context::default(),
        }
    }

    /// Builds a tree over an existing blackboard, e.g. one pre-seeded with
    /// world state.
    pub fn with_blackboard(root: Box<dyn BehaviorNode>, blackboard: Blackboard) -> Self {
        Self {
            root,
            context: Context::new(blackboard),
        }
    }

    /// Injects the current time for this step. Call before [`tick`] whenever
    /// the tree contains time-gated nodes.
    ///
    /// [`tick`]: BehaviorTree::tick
    pub fn set_time(&mut self, time: f64) {
        self.context.set_time(time);
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Advances the whole tree by one step.
    pub fn tick(&mut self, arg: BehaviorCallback) -> BehaviorResult {
        self.root.tick(arg, &mut self.context)
    }

    /// Recursively clears episode state in every node, returning the tree to
    /// its freshly built shape. The blackboard is left untouched.
    pub fn reset(&mut self) {
        self.root.reset();
    }
}
