use crate::{Blackboard, Symbol};

/// Shared state every node in a tree can see during a tick: the blackboard
/// of named values, and the current time as injected by the driver.
///
/// The engine never reads a system clock. Time-gated nodes (waits, cooldown
/// gates) observe only [`Context::time`], which the driver is expected to
/// update through [`Context::set_time`] before each tick. Tests can therefore
/// replay any timing scenario exactly.
#[derive(Default)]
pub struct Context {
    blackboard: Blackboard,
    time: f64,
}

impl Context {
    pub fn new(blackboard: Blackboard) -> Self {
        Self {
            blackboard,
            time: 0.,
        }
    }

    pub fn take_blackboard(self) -> Blackboard {
        self.blackboard
    }

    pub fn get<T: 'static>(&self, key: impl Into<Symbol>) -> Option<&T> {
        self.blackboard
            .get(&key.into())
            .and_then(|val| val.downcast_ref())
    }

    pub fn get_mut<T: 'static>(&mut self, key: impl Into<Symbol>) -> Option<&mut T> {
        self.blackboard
            .get_mut(&key.into())
            .and_then(|val| val.downcast_mut())
    }

    pub fn set<T: 'static>(&mut self, key: impl Into<Symbol>, val: T) {
        self.blackboard.insert(key.into(), Box::new(val));
    }

    /// The current time in seconds, as last injected by the driver.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Injects the current time. The unit is seconds, but only differences
    /// matter; any monotonic scale the driver prefers will do.
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }
}
