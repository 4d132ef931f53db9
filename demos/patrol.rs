//! A patrol route driven with injected time: advance a waypoint, hold for
//! half a second, repeat four times, radioing in at most once every two
//! seconds along the way.

use anyhow::Result;
use ticktree::{
    boxed, ActionNode, BehaviorResult, BehaviorTree, LoopNode, PriorityNode, WaitNode,
};

fn main() -> Result<()> {
    let radio = PriorityNode::new(
        vec![boxed(ActionNode::new(|_arg, _ctx| {
            println!("[radio] checkpoint reached, all clear");
        }))],
        2.0,
    )?;

    let advance = ActionNode::new(|_arg, ctx| {
        let waypoint = ctx.get::<u32>("waypoint").copied().unwrap_or(0) + 1;
        println!("advancing to waypoint {}", waypoint);
        ctx.set("waypoint", waypoint);
    });

    let route = LoopNode::new(
        vec![boxed(radio), boxed(advance), boxed(WaitNode::new(0.5))],
        4,
    )?;

    let mut tree = BehaviorTree::new(boxed(route));

    // The driver owns the clock; a quarter second passes per tick.
    let mut t = 0.0;
    loop {
        tree.set_time(t);
        if let BehaviorResult::Success = tree.tick(&mut |_| None) {
            break;
        }
        t += 0.25;
    }
    println!("patrol complete at t={}s", t);

    Ok(())
}
