pub mod breakout;
pub mod pacman;
pub mod tetris;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ratatui::prelude::*;

use crate::error::ArcadeError;
use crate::input::Command;
use crate::scheduler::{InputHandle, Scheduler, TickHandle};

/// Lifecycle contract the hub drives for every game.
pub trait Game {
    fn title(&self) -> &'static str;
    /// Acquire the surface, allocate entities and wire input.
    fn init(&mut self, surface: Surface, scheduler: &mut Scheduler) -> Result<(), ArcadeError>;
    /// Register the per-tick update.
    fn start(&mut self, scheduler: &mut Scheduler);
    /// Detach tick and input handlers and release the surface.
    fn stop(&mut self, scheduler: &mut Scheduler);
    /// Draw one frame: background, entities, overlay.
    fn render(&self, frame: &mut Frame, area: Rect);
    fn get_score(&self) -> u32;
    fn is_game_over(&self) -> bool;
}

/// Drawing area reserved for a game, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u16,
    pub height: u16,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    fn require(self, game: &'static str, min_width: u16, min_height: u16) -> Result<Self, ArcadeError> {
        if self.width < min_width || self.height < min_height {
            return Err(ArcadeError::SurfaceTooSmall {
                game,
                width: self.width,
                height: self.height,
                min_width,
                min_height,
            });
        }
        Ok(self)
    }
}

/// One game's simulation core plus its frame drawing.
pub trait Simulation: 'static {
    const TITLE: &'static str;
    const MIN_WIDTH: u16;
    const MIN_HEIGHT: u16;

    fn update(&mut self, dt: Duration);
    /// Buffer a command for the next tick.
    fn handle_command(&mut self, command: Command);
    fn render(&self, frame: &mut Frame, area: Rect);
    fn score(&self) -> u32;
    fn is_game_over(&self) -> bool;
}

type Factory<S> = Box<dyn FnOnce() -> S>;

/// Adapts a `Simulation` to the `Game` lifecycle.
///
/// The simulation is shared with the registered closures through
/// `Rc<RefCell<_>>`; dispatch, input and render never overlap.
pub struct Session<S: Simulation> {
    factory: Option<Factory<S>>,
    sim: Option<Rc<RefCell<S>>>,
    surface: Option<Surface>,
    tick: Option<TickHandle>,
    input: Option<InputHandle>,
}

impl<S: Simulation> Session<S> {
    pub fn new(factory: impl FnOnce() -> S + 'static) -> Self {
        Self {
            factory: Some(Box::new(factory)),
            sim: None,
            surface: None,
            tick: None,
            input: None,
        }
    }

    pub fn surface(&self) -> Option<Surface> {
        self.surface
    }

    /// Inspect the simulation (tests, HUD). `None` before `init`.
    pub fn with_sim<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.sim.as_ref().map(|sim| f(&sim.borrow()))
    }
}

impl<S: Simulation> Game for Session<S> {
    fn title(&self) -> &'static str {
        S::TITLE
    }

    fn init(&mut self, surface: Surface, scheduler: &mut Scheduler) -> Result<(), ArcadeError> {
        if self.sim.is_some() {
            log::debug!("{} already initialized", S::TITLE);
            return Ok(());
        }
        let surface = surface.require(S::TITLE, S::MIN_WIDTH, S::MIN_HEIGHT)?;
        let Some(factory) = self.factory.take() else {
            // Stopped instances are not reusable; the hub builds a new one.
            log::warn!("{} init after stop ignored", S::TITLE);
            return Ok(());
        };

        let sim = Rc::new(RefCell::new(factory()));
        let listener = Rc::clone(&sim);
        self.input = Some(scheduler.register_input(Box::new(move |cmd| {
            listener.borrow_mut().handle_command(cmd);
        })));
        self.sim = Some(sim);
        self.surface = Some(surface);
        log::info!("{} initialized on {}x{} surface", S::TITLE, surface.width, surface.height);
        Ok(())
    }

    fn start(&mut self, scheduler: &mut Scheduler) {
        if self.tick.is_some() {
            return;
        }
        let Some(sim) = &self.sim else {
            log::warn!("{} start without init", S::TITLE);
            return;
        };
        let sim = Rc::clone(sim);
        self.tick = Some(scheduler.register_tick(Box::new(move |dt| {
            sim.borrow_mut().update(dt);
        })));
        log::info!("{} started", S::TITLE);
    }

    fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.tick.take() {
            scheduler.unregister_tick(handle);
        }
        if let Some(handle) = self.input.take() {
            scheduler.unregister_input(handle);
        }
        if self.surface.take().is_some() {
            log::info!("{} stopped", S::TITLE);
        }
        self.sim = None;
        self.factory = None;
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(sim) = &self.sim {
            sim.borrow().render(frame, area);
        }
    }

    fn get_score(&self) -> u32 {
        self.with_sim(|s| s.score()).unwrap_or(0)
    }

    fn is_game_over(&self) -> bool {
        self.with_sim(|s| s.is_game_over()).unwrap_or(false)
    }
}
