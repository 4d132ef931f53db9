use crate::{
    error::{BuildResult, TreeBuildError},
    BehaviorCallback, BehaviorNode, BehaviorResult, Context,
};
use rand::{Rng, RngCore};

/// Evaluates a predicate: `Success` if true, `Fail` otherwise. Stateless.
pub struct ConditionNode {
    condition: Box<dyn FnMut(&Context) -> bool>,
}

impl ConditionNode {
    pub fn new(condition: impl FnMut(&Context) -> bool + 'static) -> Self {
        Self {
            condition: Box::new(condition),
        }
    }
}

impl BehaviorNode for ConditionNode {
    fn tick(&mut self, _arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        if (self.condition)(ctx) {
            BehaviorResult::Success
        } else {
            BehaviorResult::Fail
        }
    }
}

/// Like [`ConditionNode`], but a false predicate means `Running`, never
/// `Fail`. Blocks the surrounding tree from advancing until the condition
/// turns true.
pub struct ConditionWaitNode {
    condition: Box<dyn FnMut(&Context) -> bool>,
}

impl ConditionWaitNode {
    pub fn new(condition: impl FnMut(&Context) -> bool + 'static) -> Self {
        Self {
            condition: Box::new(condition),
        }
    }
}

impl BehaviorNode for ConditionWaitNode {
    fn tick(&mut self, _arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        if (self.condition)(ctx) {
            BehaviorResult::Success
        } else {
            BehaviorResult::Running
        }
    }
}

/// Runs its action once per tick and always succeeds. The action receives
/// the tick callback and the context, the same channels a hand-written
/// node's `tick` would get. Actions are assumed non-blocking.
pub struct ActionNode {
    action: Box<dyn FnMut(BehaviorCallback, &mut Context)>,
}

impl ActionNode {
    pub fn new(action: impl FnMut(BehaviorCallback, &mut Context) + 'static) -> Self {
        Self {
            action: Box::new(action),
        }
    }
}

impl BehaviorNode for ActionNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        (self.action)(arg, ctx);
        BehaviorResult::Success
    }
}

/// Waits a fixed amount of injected time, then succeeds.
///
/// The first tick of an episode records `ctx.time()` and answers `Running`;
/// later ticks compare elapsed time against the wait duration. Success ends
/// the episode, so ticking again afterwards starts a fresh wait timed from
/// that tick.
pub struct WaitNode {
    wait_time: f64,
    start: Option<f64>,
}

impl WaitNode {
    pub fn new(wait_time: f64) -> Self {
        Self {
            wait_time,
            start: None,
        }
    }
}

impl BehaviorNode for WaitNode {
    fn tick(&mut self, _arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        match self.start {
            None => {
                self.start = Some(ctx.time());
                BehaviorResult::Running
            }
            Some(start) => {
                if ctx.time() - start >= self.wait_time {
                    self.start = None;
                    BehaviorResult::Success
                } else {
                    BehaviorResult::Running
                }
            }
        }
    }

    fn reset(&mut self) {
        self.start = None;
    }
}

/// Ticks its child and passes the status through unchanged. The extension
/// point for cross-cutting wrappers (tracing a subtree, counting ticks)
/// that must not alter control flow.
pub struct DecoratorNode {
    child: Box<dyn BehaviorNode>,
}

impl DecoratorNode {
    pub fn new(child: Box<dyn BehaviorNode>) -> Self {
        Self { child }
    }
}

impl BehaviorNode for DecoratorNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        self.child.tick(arg, ctx)
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Swaps `Success` and `Fail`; `Running` passes through unchanged.
pub struct InverterNode {
    child: Box<dyn BehaviorNode>,
}

impl InverterNode {
    pub fn new(child: Box<dyn BehaviorNode>) -> Self {
        Self { child }
    }
}

impl BehaviorNode for InverterNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        match self.child.tick(arg, ctx) {
            BehaviorResult::Running => BehaviorResult::Running,
            BehaviorResult::Success => BehaviorResult::Fail,
            BehaviorResult::Fail => BehaviorResult::Success,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Turns `Running` into `Fail`; resolved statuses pass through. Useful under
/// a selector that should move on instead of waiting for a slow branch.
pub struct FailIfRunningNode {
    child: Box<dyn BehaviorNode>,
}

impl FailIfRunningNode {
    pub fn new(child: Box<dyn BehaviorNode>) -> Self {
        Self { child }
    }
}

impl BehaviorNode for FailIfRunningNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        match self.child.tick(arg, ctx) {
            BehaviorResult::Running => BehaviorResult::Fail,
            res => res,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Gates a child on a predicate re-evaluated every tick: true ticks the
/// child and returns its status, false answers `Fail` without touching the
/// child.
pub struct IfNode {
    condition: Box<dyn FnMut(&Context) -> bool>,
    child: Box<dyn BehaviorNode>,
}

impl IfNode {
    pub fn new(
        condition: impl FnMut(&Context) -> bool + 'static,
        child: Box<dyn BehaviorNode>,
    ) -> Self {
        Self {
            condition: Box::new(condition),
            child,
        }
    }
}

impl BehaviorNode for IfNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        if (self.condition)(ctx) {
            self.child.tick(arg, ctx)
        } else {
            BehaviorResult::Fail
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Keeps ticking its child while a predicate holds, typically with the child
/// answering `Running` each step. A false predicate answers `Fail` for this
/// period but leaves the child's state alone, so the child resumes where it
/// was if the condition turns true again. Reset explicitly if a restart is
/// wanted instead.
pub struct WhileNode {
    condition: Box<dyn FnMut(&Context) -> bool>,
    child: Box<dyn BehaviorNode>,
}

impl WhileNode {
    pub fn new(
        condition: impl FnMut(&Context) -> bool + 'static,
        child: Box<dyn BehaviorNode>,
    ) -> Self {
        Self {
            condition: Box::new(condition),
            child,
        }
    }
}

impl BehaviorNode for WhileNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        if (self.condition)(ctx) {
            self.child.tick(arg, ctx)
        } else {
            BehaviorResult::Fail
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Runs children strictly left to right, resuming from a persisted cursor.
///
/// A `Running` child holds the cursor in place. A failing child fails the
/// whole sequence fast and rewinds the cursor. A succeeding child advances
/// the cursor within the same tick, so a run of instantaneous successes
/// completes in one tick instead of stalling one child per step.
pub struct SequenceNode {
    children: Vec<Box<dyn BehaviorNode>>,
    current_child: Option<usize>,
}

impl SequenceNode {
    pub fn new(children: Vec<Box<dyn BehaviorNode>>) -> BuildResult<Self> {
        if children.is_empty() {
            return Err(TreeBuildError::NoChildren);
        }
        Ok(Self {
            children,
            current_child: None,
        })
    }
}

impl BehaviorNode for SequenceNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        let from = self.current_child.unwrap_or(0);
        for (i, child) in self.children[from..].iter_mut().enumerate() {
            match child.tick(arg, ctx) {
                BehaviorResult::Fail => {
                    self.current_child = None;
                    return BehaviorResult::Fail;
                }
                BehaviorResult::Running => {
                    self.current_child = Some(from + i);
                    return BehaviorResult::Running;
                }
                BehaviorResult::Success => (),
            }
        }
        self.current_child = None;
        BehaviorResult::Success
    }

    fn reset(&mut self) {
        self.current_child = None;
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Mirror image of [`SequenceNode`]: tries children in order until one does
/// not fail. Success rewinds the cursor and wins; `Running` holds position;
/// a failing child falls through to the next within the same tick.
pub struct SelectorNode {
    children: Vec<Box<dyn BehaviorNode>>,
    current_child: Option<usize>,
}

impl SelectorNode {
    pub fn new(children: Vec<Box<dyn BehaviorNode>>) -> BuildResult<Self> {
        if children.is_empty() {
            return Err(TreeBuildError::NoChildren);
        }
        Ok(Self {
            children,
            current_child: None,
        })
    }
}

impl BehaviorNode for SelectorNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        let from = self.current_child.unwrap_or(0);
        for (i, child) in self.children[from..].iter_mut().enumerate() {
            match child.tick(arg, ctx) {
                BehaviorResult::Success => {
                    self.current_child = None;
                    return BehaviorResult::Success;
                }
                BehaviorResult::Running => {
                    self.current_child = Some(from + i);
                    return BehaviorResult::Running;
                }
                BehaviorResult::Fail => (),
            }
        }
        self.current_child = None;
        BehaviorResult::Fail
    }

    fn reset(&mut self) {
        self.current_child = None;
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Repeats a sequence-like pass over its children `max_reps` times.
///
/// Completing a non-final pass answers `Running` and starts the next pass on
/// the following tick. The final pass resets both counters and succeeds. Any
/// child failure aborts the whole loop, resets both counters, and fails.
pub struct LoopNode {
    children: Vec<Box<dyn BehaviorNode>>,
    max_reps: usize,
    current_rep: usize,
    current_child: Option<usize>,
}

impl LoopNode {
    pub fn new(children: Vec<Box<dyn BehaviorNode>>, max_reps: usize) -> BuildResult<Self> {
        if children.is_empty() {
            return Err(TreeBuildError::NoChildren);
        }
        if max_reps == 0 {
            return Err(TreeBuildError::ZeroRepetitions);
        }
        Ok(Self {
            children,
            max_reps,
            current_rep: 0,
            current_child: None,
        })
    }
}

impl BehaviorNode for LoopNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        let from = self.current_child.unwrap_or(0);
        for (i, child) in self.children[from..].iter_mut().enumerate() {
            match child.tick(arg, ctx) {
                BehaviorResult::Fail => {
                    self.current_child = None;
                    self.current_rep = 0;
                    return BehaviorResult::Fail;
                }
                BehaviorResult::Running => {
                    self.current_child = Some(from + i);
                    return BehaviorResult::Running;
                }
                BehaviorResult::Success => (),
            }
        }
        self.current_child = None;
        self.current_rep += 1;
        if self.current_rep == self.max_reps {
            self.current_rep = 0;
            BehaviorResult::Success
        } else {
            BehaviorResult::Running
        }
    }

    fn reset(&mut self) {
        self.current_child = None;
        self.current_rep = 0;
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Tries children in random order instead of declared order.
///
/// Each attempt draws uniformly among children not yet tried, using the
/// caller-supplied generator; there is no hidden global RNG, so a seeded
/// generator makes the node fully deterministic. `Success` or `Running` ends
/// the draw (a `Running` child is resumed on the next tick, not re-drawn). A
/// failing child is marked tried and another is drawn within the same tick;
/// when every child has been tried and failed, the tried set is cleared for
/// the next attempt and the node fails.
pub struct RandomNode {
    children: Vec<Box<dyn BehaviorNode>>,
    rng: Box<dyn RngCore>,
    tried: Vec<bool>,
    current_child: Option<usize>,
}

impl RandomNode {
    pub fn new(
        children: Vec<Box<dyn BehaviorNode>>,
        rng: impl RngCore + 'static,
    ) -> BuildResult<Self> {
        if children.is_empty() {
            return Err(TreeBuildError::NoChildren);
        }
        let tried = vec![false; children.len()];
        Ok(Self {
            children,
            rng: Box::new(rng),
            tried,
            current_child: None,
        })
    }

    fn draw(&mut self) -> Option<usize> {
        let untried = self
            .tried
            .iter()
            .enumerate()
            .filter(|(_, tried)| !**tried)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        if untried.is_empty() {
            None
        } else {
            Some(untried[self.rng.gen_range(0..untried.len())])
        }
    }
}

impl BehaviorNode for RandomNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        loop {
            let picked = match self.current_child {
                Some(child) => child,
                None => match self.draw() {
                    Some(child) => child,
                    None => {
                        for tried in &mut self.tried {
                            *tried = false;
                        }
                        return BehaviorResult::Fail;
                    }
                },
            };
            match self.children[picked].tick(arg, ctx) {
                BehaviorResult::Success => {
                    self.current_child = None;
                    for tried in &mut self.tried {
                        *tried = false;
                    }
                    return BehaviorResult::Success;
                }
                BehaviorResult::Running => {
                    self.current_child = Some(picked);
                    return BehaviorResult::Running;
                }
                BehaviorResult::Fail => {
                    self.tried[picked] = true;
                    self.current_child = None;
                }
            }
        }
    }

    fn reset(&mut self) {
        self.current_child = None;
        for tried in &mut self.tried {
            *tried = false;
        }
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Advances every unfinished child each tick; succeeds once all have
/// succeeded, fails the moment any child fails.
///
/// A completion mask records which children already succeeded so they are
/// never re-ticked within the episode; re-running a finished child would
/// re-trigger its side effects. A child failure short-circuits immediately
/// without ticking the rest that call. Either resolution clears the mask for
/// the next episode.
pub struct ParallelAllNode {
    children: Vec<Box<dyn BehaviorNode>>,
    completed: Vec<bool>,
}

impl ParallelAllNode {
    pub fn new(children: Vec<Box<dyn BehaviorNode>>) -> BuildResult<Self> {
        if children.is_empty() {
            return Err(TreeBuildError::NoChildren);
        }
        let completed = vec![false; children.len()];
        Ok(Self {
            children,
            completed,
        })
    }
}

impl BehaviorNode for ParallelAllNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        let mut all_done = true;
        for (i, child) in self.children.iter_mut().enumerate() {
            if self.completed[i] {
                continue;
            }
            match child.tick(arg, ctx) {
                BehaviorResult::Fail => {
                    for completed in &mut self.completed {
                        *completed = false;
                    }
                    return BehaviorResult::Fail;
                }
                BehaviorResult::Running => all_done = false,
                BehaviorResult::Success => self.completed[i] = true,
            }
        }
        if all_done {
            for completed in &mut self.completed {
                *completed = false;
            }
            BehaviorResult::Success
        } else {
            BehaviorResult::Running
        }
    }

    fn reset(&mut self) {
        for completed in &mut self.completed {
            *completed = false;
        }
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Advances every unresolved child each tick; the first child to succeed
/// wins immediately and the rest are abandoned as they stand, not reset.
/// Fails only once every child has failed.
pub struct ParallelAnyNode {
    children: Vec<Box<dyn BehaviorNode>>,
    failed: Vec<bool>,
}

impl ParallelAnyNode {
    pub fn new(children: Vec<Box<dyn BehaviorNode>>) -> BuildResult<Self> {
        if children.is_empty() {
            return Err(TreeBuildError::NoChildren);
        }
        let failed = vec![false; children.len()];
        Ok(Self { children, failed })
    }
}

impl BehaviorNode for ParallelAnyNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        for (i, child) in self.children.iter_mut().enumerate() {
            if self.failed[i] {
                continue;
            }
            match child.tick(arg, ctx) {
                BehaviorResult::Success => {
                    for failed in &mut self.failed {
                        *failed = false;
                    }
                    return BehaviorResult::Success;
                }
                BehaviorResult::Fail => self.failed[i] = true,
                BehaviorResult::Running => (),
            }
        }
        if self.failed.iter().all(|&failed| failed) {
            for failed in &mut self.failed {
                *failed = false;
            }
            BehaviorResult::Fail
        } else {
            BehaviorResult::Running
        }
    }

    fn reset(&mut self) {
        for failed in &mut self.failed {
            *failed = false;
        }
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// A cooldown-gated selector.
///
/// While `period` has not elapsed since the last evaluation, the node
/// replays its cached status without ticking any child, a cheap no-op path.
/// Once the cooldown elapses it runs a fresh selector-style pass (first
/// non-failing child wins), stamps the evaluation time, and caches the
/// outcome. Time comes from the context; the driver must keep it updated.
pub struct PriorityNode {
    children: Vec<Box<dyn BehaviorNode>>,
    period: f64,
    last_execution: Option<f64>,
    last_status: BehaviorResult,
}

impl PriorityNode {
    pub fn new(children: Vec<Box<dyn BehaviorNode>>, period: f64) -> BuildResult<Self> {
        if children.is_empty() {
            return Err(TreeBuildError::NoChildren);
        }
        Ok(Self {
            children,
            period,
            last_execution: None,
            last_status: BehaviorResult::Fail,
        })
    }
}

impl BehaviorNode for PriorityNode {
    fn tick(&mut self, arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        let now = ctx.time();
        if let Some(last) = self.last_execution {
            if now - last < self.period {
                return self.last_status;
            }
        }
        let mut status = BehaviorResult::Fail;
        for child in &mut self.children {
            match child.tick(arg, ctx) {
                BehaviorResult::Fail => (),
                res => {
                    status = res;
                    break;
                }
            }
        }
        self.last_execution = Some(now);
        self.last_status = status;
        status
    }

    fn reset(&mut self) {
        self.last_execution = None;
        self.last_status = BehaviorResult::Fail;
        for child in &mut self.children {
            child.reset();
        }
    }
}
