//! # ticktree
//!
//! A tick-driven behavior tree execution engine.
//!
//!
//! ## Overview
//!
//! A behavior tree composes small leaf behaviors (conditions, actions, timed
//! waits) under control nodes (sequences, selectors, loops, parallel
//! composition, cooldown gating) and decorators that remap a child's status.
//! An external driver calls `tick()` on the root once per logical step, e.g.
//! once per game frame. Each tick resolves to one of three statuses, and a
//! node that answers [`BehaviorResult::Running`] is resumed on the next tick
//! rather than restarted, which is what makes multi-step behaviors cheap to
//! express without threads or callbacks-of-callbacks.
//!
//! Everything runs on the calling thread. "Parallel" nodes express logical
//! concurrency of decision branches within a single tick, not actual
//! concurrent execution, so no leaf may block; anything that would block
//! should return `Running` and try again when ticked later.
//!
//!
//! ## How it looks like
//!
//! Trees are assembled bottom-up, once, from plain constructors. Composites
//! take their full child list up front and refuse to be built empty.
//!
//! ```rust
//! use ticktree::{boxed, ActionNode, BehaviorTree, ConditionNode, SequenceNode};
//!
//! let root = SequenceNode::new(vec![
//!     boxed(ConditionNode::new(|ctx| {
//!         ctx.get::<bool>("hungry").copied().unwrap_or(false)
//!     })),
//!     boxed(ActionNode::new(|arg, _ctx| {
//!         arg(&"chomp");
//!     })),
//! ])
//! .unwrap();
//!
//! let mut tree = BehaviorTree::new(boxed(root));
//! tree.context_mut().set("hungry", true);
//!
//! tree.tick(&mut |msg: &dyn std::any::Any| {
//!     println!("{}", msg.downcast_ref::<&str>().unwrap());
//!     None
//! });
//! ```
//!
//! The closure handed to `tick` is the [`BehaviorCallback`]: the channel
//! through which leaf behaviors talk to the environment. It takes a
//! `&dyn std::any::Any` and may return a boxed `Any`, so either side can pass
//! any type at the cost of a `downcast_ref` at the receiving end.
//!
//! Why a closure and not some context object? Because the environment's
//! lifetime usually is not `'static`. You cannot name the lifetime of, say,
//! an enemy in a game frame before you actually use the tree, and `Any` is
//! itself bounded by `'static`, so stuffing borrowed state into a payload
//! type does not work. A closure never needs its lifetime named and clearly
//! outlives the call, so references can flow through it freely.
//!
//!
//! ## Defining your own node
//!
//! The built-in leaves cover predicates and fire-and-forget actions, but any
//! type implementing [`BehaviorNode`] can sit in a tree:
//!
//! ```rust
//! use ticktree::{BehaviorCallback, BehaviorNode, BehaviorResult, Context};
//!
//! struct DoorIsOpen;
//!
//! impl BehaviorNode for DoorIsOpen {
//!     fn tick(&mut self, _arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
//!         if ctx.get::<bool>("door_open").copied().unwrap_or(false) {
//!             BehaviorResult::Success
//!         } else {
//!             BehaviorResult::Fail
//!         }
//!     }
//! }
//! ```
//!
//! Nodes holding per-episode state (a cursor, a start timestamp) should also
//! implement [`BehaviorNode::reset`] so a driver can clear a subtree it has
//! stopped selecting. Without a reset, an abandoned `Running` subtree keeps
//! its stale cursors and resumes from them if re-entered later.
//!
//!
//! ## The blackboard
//!
//! Values shared between nodes live in the [`Context`]'s blackboard, keyed by
//! interned [`Symbol`]s. Lookups by string build a `Symbol` each time; nodes
//! on hot paths can cache theirs in a `Lazy` (re-exported from `once_cell`):
//!
//! ```rust
//! use ticktree::{BehaviorCallback, BehaviorNode, BehaviorResult, Context, Lazy, Symbol};
//!
//! struct CountSheep;
//!
//! impl BehaviorNode for CountSheep {
//!     fn tick(&mut self, _arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
//!         static COUNT: Lazy<Symbol> = Lazy::new(|| "sheep".into());
//!         let count = ctx.get::<u32>(*COUNT).copied().unwrap_or(0);
//!         ctx.set(*COUNT, count + 1);
//!         BehaviorResult::Success
//!     }
//! }
//! ```
//!
//!
//! ## Time
//!
//! Time-gated nodes ([`WaitNode`], [`PriorityNode`]) never read a system
//! clock. The driver injects the current time before ticking, which keeps
//! every timing behavior deterministic and replayable in tests:
//!
//! ```rust
//! use ticktree::{boxed, BehaviorResult, BehaviorTree, WaitNode};
//!
//! let mut tree = BehaviorTree::new(boxed(WaitNode::new(1.5)));
//!
//! tree.set_time(10.0);
//! assert_eq!(tree.tick(&mut |_| None), BehaviorResult::Running);
//! tree.set_time(11.0);
//! assert_eq!(tree.tick(&mut |_| None), BehaviorResult::Running);
//! tree.set_time(11.5);
//! assert_eq!(tree.tick(&mut |_| None), BehaviorResult::Success);
//! ```

mod context;
pub mod error;
mod nodes;
mod symbol;
mod tree;

use std::any::Any;
use std::collections::HashMap;

pub use crate::context::Context;
pub use crate::nodes::{
    ActionNode, ConditionNode, ConditionWaitNode, DecoratorNode, FailIfRunningNode, IfNode,
    InverterNode, LoopNode, ParallelAllNode, ParallelAnyNode, PriorityNode, RandomNode,
    SelectorNode, SequenceNode, WaitNode, WhileNode,
};
pub use crate::symbol::Symbol;
pub use crate::tree::BehaviorTree;
pub use ::once_cell::sync::*;

/// The status a node resolves to on one tick.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BehaviorResult {
    Success,
    Fail,
    /// The node has not resolved yet; tick it again next step to resume it.
    Running,
}

/// Blackboard is a mapping of variable names and their values.
/// The value is wrapped in an `Any` trait object, so it can be any type;
/// readers downcast back to the concrete type via [`Context::get`].
pub type Blackboard = HashMap<Symbol, Box<dyn Any>>;

/// Callback for behavior nodes to communicate with the environment.
/// See the crate-level docs for why this is a closure rather than a payload
/// type with a named lifetime.
pub type BehaviorCallback<'a> = &'a mut dyn FnMut(&dyn Any) -> Option<Box<dyn Any>>;

/// The capability every node in a tree has: advance by one step.
pub trait BehaviorNode {
    /// Run this node for one step and report its status.
    ///
    /// Composite implementations tick whichever children this step needs and
    /// persist their own cursor, so a `Running` child is resumed, not
    /// restarted, on the following tick.
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult;

    /// Recursively clear state scoped to the current episode: cursors, start
    /// timestamps, completion masks, cached statuses.
    ///
    /// A parent that stops ticking a `Running` subtree should reset it before
    /// selecting it again, unless resuming from the stale position is
    /// actually wanted. Stateless nodes keep the default no-op.
    fn reset(&mut self) {}
}

/// Type-erases a concrete node for handing to a composite's child list.
pub fn boxed(node: impl BehaviorNode + 'static) -> Box<dyn BehaviorNode> {
    Box::new(node)
}
