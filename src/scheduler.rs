//! Tick and input registration
//!
//! Games never hook the event loop directly. They register handlers here
//! and keep the returned handles so `stop()` can detach them.

use std::time::Duration;

use crate::input::Command;

pub type TickFn = Box<dyn FnMut(Duration)>;
pub type InputFn = Box<dyn FnMut(Command)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputHandle(u64);

#[derive(Default)]
pub struct Scheduler {
    next_id: u64,
    ticks: Vec<(TickHandle, TickFn)>,
    inputs: Vec<(InputHandle, InputFn)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn register_tick(&mut self, handler: TickFn) -> TickHandle {
        let handle = TickHandle(self.next_id());
        if !self.ticks.is_empty() {
            log::warn!("tick handler {:?} registered while {} already active", handle, self.ticks.len());
        }
        self.ticks.push((handle, handler));
        handle
    }

    /// Returns false if the handle was not registered.
    pub fn unregister_tick(&mut self, handle: TickHandle) -> bool {
        let before = self.ticks.len();
        self.ticks.retain(|(h, _)| *h != handle);
        self.ticks.len() != before
    }

    pub fn register_input(&mut self, handler: InputFn) -> InputHandle {
        let handle = InputHandle(self.next_id());
        self.inputs.push((handle, handler));
        handle
    }

    pub fn unregister_input(&mut self, handle: InputHandle) -> bool {
        let before = self.inputs.len();
        self.inputs.retain(|(h, _)| *h != handle);
        self.inputs.len() != before
    }

    pub fn dispatch_tick(&mut self, dt: Duration) {
        for (_, handler) in &mut self.ticks {
            handler(dt);
        }
    }

    pub fn dispatch_input(&mut self, command: Command) {
        for (_, handler) in &mut self.inputs {
            handler(command);
        }
    }

    pub fn tick_count(&self) -> usize {
        self.ticks.len()
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_tick_registered(&self, handle: TickHandle) -> bool {
        self.ticks.iter().any(|(h, _)| *h == handle)
    }
}
