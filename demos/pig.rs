//! A pig's brain as a behavior tree: panicking beats following a leader,
//! which beats idling around. World flags flip over the run and the selected
//! behavior follows them.

use anyhow::Result;
use ticktree::{
    boxed, BehaviorCallback, BehaviorNode, BehaviorResult, BehaviorTree, Context, Lazy,
    SelectorNode, Symbol,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PigState {
    Idle,
    Panic,
    FollowLeader,
}

#[derive(Debug)]
struct Pig {
    state: PigState,
    threat_near: bool,
    leader_near: bool,
}

static PIG: Lazy<Symbol> = Lazy::new(|| "pig".into());

struct PigPanicNode;

impl BehaviorNode for PigPanicNode {
    fn tick(&mut self, _arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        println!("Pig is thinking about panicking...");
        if let Some(pig) = ctx.get_mut::<Pig>(*PIG) {
            if pig.threat_near {
                println!("Pig is panicking!");
                pig.state = PigState::Panic;
                return BehaviorResult::Success;
            }
        }
        BehaviorResult::Fail
    }
}

struct PigFollowLeaderNode;

impl BehaviorNode for PigFollowLeaderNode {
    fn tick(&mut self, _arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        println!("Pig is considering following a leader...");
        if let Some(pig) = ctx.get_mut::<Pig>(*PIG) {
            if pig.leader_near {
                println!("Pig is following the leader!");
                pig.state = PigState::FollowLeader;
                return BehaviorResult::Success;
            }
        }
        BehaviorResult::Fail
    }
}

struct PigIdleNode;

impl BehaviorNode for PigIdleNode {
    fn tick(&mut self, _arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        if let Some(pig) = ctx.get_mut::<Pig>(*PIG) {
            println!("Pig is idling...");
            pig.state = PigState::Idle;
            BehaviorResult::Success
        } else {
            BehaviorResult::Fail
        }
    }
}

fn main() -> Result<()> {
    let root = SelectorNode::new(vec![
        boxed(PigPanicNode),
        boxed(PigFollowLeaderNode),
        boxed(PigIdleNode),
    ])?;

    let mut tree = BehaviorTree::new(boxed(root));
    tree.context_mut().set(
        *PIG,
        Pig {
            state: PigState::Idle,
            threat_near: false,
            leader_near: false,
        },
    );

    for i in 0..10 {
        println!("---- TICK {} ----", i);
        match tree.tick(&mut |_| None) {
            BehaviorResult::Success => println!("Behavior completed successfully!"),
            BehaviorResult::Running => println!("Behavior is running..."),
            BehaviorResult::Fail => println!("Behavior failed!"),
        }

        // Simulate changing world conditions.
        if let Some(pig) = tree.context_mut().get_mut::<Pig>(*PIG) {
            pig.threat_near = i == 3 || i == 4;
            pig.leader_near = i > 6;
        }
    }

    Ok(())
}
