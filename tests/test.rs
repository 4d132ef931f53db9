use ticktree::{
    boxed, ActionNode, BehaviorCallback, BehaviorNode, BehaviorResult, BehaviorTree, Context,
    Lazy, PriorityNode, SelectorNode, SequenceNode, Symbol, WaitNode,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PigState {
    Idle,
    Panic,
    FollowLeader,
}

struct Pig {
    state: PigState,
    threat_near: bool,
    leader_near: bool,
}

static PIG: Lazy<Symbol> = Lazy::new(|| "pig".into());

struct PanicNode;

impl BehaviorNode for PanicNode {
    fn tick(&mut self, _arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        let pig = ctx.get_mut::<Pig>(*PIG).unwrap();
        if pig.threat_near {
            pig.state = PigState::Panic;
            BehaviorResult::Success
        } else {
            BehaviorResult::Fail
        }
    }
}

struct FollowLeaderNode;

impl BehaviorNode for FollowLeaderNode {
    fn tick(&mut self, _arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        let pig = ctx.get_mut::<Pig>(*PIG).unwrap();
        if pig.leader_near {
            pig.state = PigState::FollowLeader;
            BehaviorResult::Success
        } else {
            BehaviorResult::Fail
        }
    }
}

struct IdleNode;

impl BehaviorNode for IdleNode {
    fn tick(&mut self, _arg: BehaviorCallback, ctx: &mut Context) -> BehaviorResult {
        let pig = ctx.get_mut::<Pig>(*PIG).unwrap();
        pig.state = PigState::Idle;
        BehaviorResult::Success
    }
}

/// A pig brain: panic beats following the leader beats idling around.
/// World flags change over the run and the selected behavior follows them.
#[test]
fn test_pig_brain() {
    let root =
        SelectorNode::new(vec![boxed(PanicNode), boxed(FollowLeaderNode), boxed(IdleNode)])
            .unwrap();

    let mut tree = BehaviorTree::new(boxed(root));
    tree.context_mut().set(
        *PIG,
        Pig {
            state: PigState::Idle,
            threat_near: false,
            leader_near: false,
        },
    );

    let mut states = vec![];
    for i in 0..10 {
        {
            let pig = tree.context_mut().get_mut::<Pig>(*PIG).unwrap();
            pig.threat_near = i == 4 || i == 5;
            pig.leader_near = i >= 8;
        }
        assert_eq!(tree.tick(&mut |_| None), BehaviorResult::Success);
        states.push(tree.context().get::<Pig>(*PIG).unwrap().state);
    }

    use PigState::*;
    assert_eq!(
        states,
        vec![Idle, Idle, Idle, Idle, Panic, Panic, Idle, Idle, FollowLeader, FollowLeader]
    );
}

/// A leg of a patrol: announce departure, hold position for two seconds of
/// injected time, then announce arrival.
#[test]
fn test_patrol_leg_waits_out_the_clock() {
    let route = SequenceNode::new(vec![
        boxed(ActionNode::new(|arg, _ctx| {
            arg(&"depart");
        })),
        boxed(WaitNode::new(2.0)),
        boxed(ActionNode::new(|arg, _ctx| {
            arg(&"arrive");
        })),
    ])
    .unwrap();

    let mut tree = BehaviorTree::new(boxed(route));
    let mut log: Vec<&str> = vec![];

    tree.set_time(0.0);
    assert_eq!(
        tree.tick(&mut |v: &dyn std::any::Any| {
            log.push(*v.downcast_ref::<&str>().unwrap());
            None
        }),
        BehaviorResult::Running
    );
    assert_eq!(log, vec!["depart"]);

    tree.set_time(1.0);
    assert_eq!(
        tree.tick(&mut |v: &dyn std::any::Any| {
            log.push(*v.downcast_ref::<&str>().unwrap());
            None
        }),
        BehaviorResult::Running
    );
    assert_eq!(log, vec!["depart"]);

    tree.set_time(2.0);
    assert_eq!(
        tree.tick(&mut |v: &dyn std::any::Any| {
            log.push(*v.downcast_ref::<&str>().unwrap());
            None
        }),
        BehaviorResult::Success
    );
    assert_eq!(log, vec!["depart", "arrive"]);
}

/// A cooldown-gated scan fires on the first tick and then at most once per
/// period, no matter how often the tree is ticked.
#[test]
fn test_scan_respects_cooldown() {
    let root = PriorityNode::new(
        vec![boxed(ActionNode::new(|arg, _ctx| {
            arg(&"scan");
        }))],
        5.0,
    )
    .unwrap();

    let mut tree = BehaviorTree::new(boxed(root));
    let mut log: Vec<&str> = vec![];

    for t in 0..=12 {
        tree.set_time(t as f64);
        assert_eq!(
            tree.tick(&mut |v: &dyn std::any::Any| {
                log.push(*v.downcast_ref::<&str>().unwrap());
                None
            }),
            BehaviorResult::Success
        );
    }

    assert_eq!(log, vec!["scan", "scan", "scan"]);
}
