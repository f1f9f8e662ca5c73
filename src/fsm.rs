//! Finite state machine
//!
//! Named states with `enter`/`execute`/`exit` hooks. The machine never owns
//! the thing being driven; every call borrows the owner, so states stay
//! plain data and the owner stays testable on its own.

use std::collections::HashMap;

/// What a state asks for after executing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Switch to the named state
    Change(&'static str),
    /// Go back to the previously active state
    Revert,
}

/// One state of a machine driving an `O`
pub trait State<O> {
    fn enter(&mut self, _owner: &mut O) {}

    fn execute(&mut self, owner: &mut O, dt: f32) -> Transition;

    fn exit(&mut self, _owner: &mut O) {}
}

/// State machine keyed by state name.
///
/// Once constructed the current state is always a registered one: failed
/// transitions are logged and leave everything as it was.
pub struct FiniteStateMachine<O> {
    states: HashMap<String, Box<dyn State<O>>>,
    current: String,
    previous: Option<String>,
}

impl<O> FiniteStateMachine<O> {
    /// Create a machine with its initial state and enter it
    pub fn new(name: &str, mut state: Box<dyn State<O>>, owner: &mut O) -> Self {
        state.enter(owner);
        let mut states = HashMap::new();
        states.insert(name.to_string(), state);
        log::info!("State machine started in '{}'", name);
        Self {
            states,
            current: name.to_string(),
            previous: None,
        }
    }

    /// Register a state. Replacing the active state is refused.
    pub fn add_state(&mut self, name: &str, state: Box<dyn State<O>>) -> bool {
        if name == self.current {
            log::warn!("Cannot replace active state '{}'", name);
            return false;
        }
        self.states.insert(name.to_string(), state);
        true
    }

    pub fn current_state_id(&self) -> &str {
        &self.current
    }

    pub fn previous_state_id(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn is_in(&self, name: &str) -> bool {
        self.current == name
    }

    /// Exit the current state and enter `name`.
    ///
    /// Unknown names are logged and ignored.
    pub fn change_state(&mut self, name: &str, owner: &mut O) -> bool {
        if !self.states.contains_key(name) {
            log::warn!("Unknown state '{}', staying in '{}'", name, self.current);
            return false;
        }

        if let Some(state) = self.states.get_mut(&self.current) {
            state.exit(owner);
        }
        let old = std::mem::replace(&mut self.current, name.to_string());
        log::info!("State '{}' -> '{}'", old, name);
        self.previous = Some(old);
        if let Some(state) = self.states.get_mut(&self.current) {
            state.enter(owner);
        }
        true
    }

    pub fn revert_to_previous_state(&mut self, owner: &mut O) -> bool {
        match self.previous.clone() {
            Some(previous) => self.change_state(&previous, owner),
            None => {
                log::warn!("No previous state to revert to from '{}'", self.current);
                false
            }
        }
    }

    /// Run one frame of the current state and apply the transition it asks for
    pub fn execute_current_state(&mut self, owner: &mut O, dt: f32) {
        let transition = match self.states.get_mut(&self.current) {
            Some(state) => state.execute(owner, dt),
            None => Transition::Stay,
        };
        match transition {
            Transition::Stay => {}
            Transition::Change(name) => {
                self.change_state(name, owner);
            }
            Transition::Revert => {
                self.revert_to_previous_state(owner);
            }
        }
    }
}

impl<O> std::fmt::Debug for FiniteStateMachine<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.states.keys().collect();
        names.sort();
        f.debug_struct("FiniteStateMachine")
            .field("states", &names)
            .field("current", &self.current)
            .field("previous", &self.previous)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Hook calls in order: (hook, state)
    type Log = Vec<(&'static str, &'static str)>;

    struct Recorder {
        name: &'static str,
        next: Transition,
    }

    impl Recorder {
        fn boxed(name: &'static str) -> Box<dyn State<Log>> {
            Box::new(Self {
                name,
                next: Transition::Stay,
            })
        }
    }

    impl State<Log> for Recorder {
        fn enter(&mut self, log: &mut Log) {
            log.push(("enter", self.name));
        }

        fn execute(&mut self, log: &mut Log, _dt: f32) -> Transition {
            log.push(("execute", self.name));
            self.next
        }

        fn exit(&mut self, log: &mut Log) {
            log.push(("exit", self.name));
        }
    }

    const NAMES: [&str; 4] = ["menu", "play", "pause", "win"];

    fn machine(log: &mut Log) -> FiniteStateMachine<Log> {
        let mut fsm = FiniteStateMachine::new("menu", Recorder::boxed("menu"), log);
        for &name in &NAMES[1..] {
            assert!(fsm.add_state(name, Recorder::boxed(name)));
        }
        fsm
    }

    #[test]
    fn test_change_exits_then_enters() {
        let mut log = Log::new();
        let mut fsm = machine(&mut log);
        assert!(fsm.change_state("play", &mut log));
        assert_eq!(log, vec![("enter", "menu"), ("exit", "menu"), ("enter", "play")]);
        assert_eq!(fsm.current_state_id(), "play");
        assert_eq!(fsm.previous_state_id(), Some("menu"));
    }

    #[test]
    fn test_unknown_state_is_ignored() {
        let mut log = Log::new();
        let mut fsm = machine(&mut log);
        log.clear();
        assert!(!fsm.change_state("credits", &mut log));
        assert!(log.is_empty());
        assert!(fsm.is_in("menu"));
        assert_eq!(fsm.previous_state_id(), None);
    }

    #[test]
    fn test_revert_returns_to_previous() {
        let mut log = Log::new();
        let mut fsm = machine(&mut log);
        assert!(!fsm.revert_to_previous_state(&mut log));
        fsm.change_state("play", &mut log);
        fsm.change_state("pause", &mut log);
        assert!(fsm.revert_to_previous_state(&mut log));
        assert!(fsm.is_in("play"));
        assert_eq!(fsm.previous_state_id(), Some("pause"));
    }

    #[test]
    fn test_active_state_cannot_be_replaced() {
        let mut log = Log::new();
        let mut fsm = machine(&mut log);
        assert!(!fsm.add_state("menu", Recorder::boxed("other")));
        assert!(fsm.contains("win"));
        assert!(!fsm.contains("credits"));
    }

    #[test]
    fn test_execute_applies_requested_transition() {
        let mut log = Log::new();
        let mut fsm = FiniteStateMachine::<Log>::new(
            "menu",
            Box::new(Recorder {
                name: "menu",
                next: Transition::Change("play"),
            }),
            &mut log,
        );
        fsm.add_state(
            "play",
            Box::new(Recorder {
                name: "play",
                next: Transition::Revert,
            }),
        );

        fsm.execute_current_state(&mut log, 0.016);
        assert!(fsm.is_in("play"));
        fsm.execute_current_state(&mut log, 0.016);
        assert!(fsm.is_in("menu"));
        assert_eq!(
            log,
            vec![
                ("enter", "menu"),
                ("execute", "menu"),
                ("exit", "menu"),
                ("enter", "play"),
                ("execute", "play"),
                ("exit", "play"),
                ("enter", "menu"),
            ]
        );
    }

    #[test]
    fn test_execute_with_unknown_target_stays() {
        let mut log = Log::new();
        let mut fsm = FiniteStateMachine::<Log>::new(
            "menu",
            Box::new(Recorder {
                name: "menu",
                next: Transition::Change("nowhere"),
            }),
            &mut log,
        );
        fsm.execute_current_state(&mut log, 0.016);
        assert!(fsm.is_in("menu"));
        assert_eq!(log, vec![("enter", "menu"), ("execute", "menu")]);
    }

    proptest! {
        #[test]
        fn prop_hooks_stay_balanced(ops in prop::collection::vec(0usize..7, 0..40)) {
            let mut log = Log::new();
            let mut fsm = machine(&mut log);
            let mut transitions = 0;
            for op in ops {
                let changed = match op {
                    0..=3 => fsm.change_state(NAMES[op], &mut log),
                    4 => fsm.revert_to_previous_state(&mut log),
                    5 => fsm.change_state("bogus", &mut log),
                    _ => fsm.change_state("", &mut log),
                };
                if changed {
                    transitions += 1;
                }
                let current = fsm.current_state_id();
                prop_assert!(NAMES.iter().any(|name| *name == current));
            }

            let enters = log.iter().filter(|(hook, _)| *hook == "enter").count();
            let exits = log.iter().filter(|(hook, _)| *hook == "exit").count();
            prop_assert_eq!(exits, transitions);
            prop_assert_eq!(enters, transitions + 1);
            // Every exit is immediately followed by an enter
            for pair in log.windows(2) {
                if pair[0].0 == "exit" {
                    prop_assert_eq!(pair[1].0, "enter");
                }
            }
        }
    }
}
