use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;

use crate::config::Config;
use crate::games::{breakout, pacman, tetris, Game, Surface};
use crate::input::Command;
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Tetris,
    PacMan,
    Breakout,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Tetris, Tab::PacMan, Tab::Breakout]
    }

    /// Launchable games, in tile order.
    pub fn games() -> &'static [Tab] {
        &[Tab::Tetris, Tab::PacMan, Tab::Breakout]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::Tetris => " Tetris ",
            Tab::PacMan => " PacMan ",
            Tab::Breakout => " Breakout ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Tetris => 1,
            Tab::PacMan => 2,
            Tab::Breakout => 3,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize, // 0-2 for home screen game selection
    /// Last launch failure, shown on the home screen
    pub status: Option<String>,
    /// Score each game had when it was last left, this session only
    pub last_scores: [Option<u32>; 3],
    scheduler: Scheduler,
    active: Option<Box<dyn Game>>,
    game_area: Rect,
    seed: u64,
    launches: u64,
    drop_interval: Duration,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("hub seed {}", seed);
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            status: None,
            last_scores: [None; 3],
            scheduler: Scheduler::new(),
            active: None,
            game_area: Rect::default(),
            seed,
            launches: 0,
            drop_interval: Duration::from_millis(config.drop_interval_ms),
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn active_game(&self) -> Option<&dyn Game> {
        self.active.as_deref()
    }

    /// Area the active game draws into, as laid out by the ui.
    pub fn set_game_area(&mut self, area: Rect) {
        self.game_area = area;
    }

    fn surface(&self) -> Surface {
        Surface::new(self.game_area.width, self.game_area.height)
    }

    fn build(&self, tab: Tab) -> Option<Box<dyn Game>> {
        let seed = self.seed.wrapping_add(self.launches);
        match tab {
            Tab::Home => None,
            Tab::Tetris => Some(Box::new(tetris::new_game(seed, self.drop_interval))),
            Tab::PacMan => Some(Box::new(pacman::new_game(seed))),
            Tab::Breakout => Some(Box::new(breakout::new_game(seed))),
        }
    }

    /// Stop whatever runs now, then init and start `tab`'s game.
    pub fn launch(&mut self, tab: Tab) {
        if tab == self.current_tab && self.active.is_some() {
            return;
        }
        self.stop_active();
        let Some(mut game) = self.build(tab) else {
            self.current_tab = Tab::Home;
            return;
        };
        self.launches += 1;

        match game.init(self.surface(), &mut self.scheduler) {
            Ok(()) => {
                game.start(&mut self.scheduler);
                self.active = Some(game);
                self.current_tab = tab;
                self.status = None;
            }
            Err(e) => {
                log::warn!("could not launch {}: {}", game.title(), e);
                // Release anything init grabbed before failing
                game.stop(&mut self.scheduler);
                self.status = Some(e.to_string());
                self.current_tab = Tab::Home;
            }
        }
    }

    pub fn go_home(&mut self) {
        self.stop_active();
        self.current_tab = Tab::Home;
    }

    fn stop_active(&mut self) {
        if let Some(mut game) = self.active.take() {
            if let Some(slot) = Tab::games().iter().position(|&t| t == self.current_tab) {
                self.last_scores[slot] = Some(game.get_score());
            }
            game.stop(&mut self.scheduler);
        }
    }

    pub fn on_tick(&mut self, dt: Duration) {
        self.scheduler.dispatch_tick(dt);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            // Only games care about key-up
            if let Some(cmd) = Command::from_key(key) {
                self.scheduler.dispatch_input(cmd);
            }
            return;
        }

        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if matches!(self.current_tab, Tab::Home) {
                    self.should_quit = true;
                    return;
                }
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc => {
                if !matches!(self.current_tab, Tab::Home) {
                    self.go_home();
                    return;
                }
            }
            _ => {}
        }

        // Home screen shortcuts and navigation
        if matches!(self.current_tab, Tab::Home) {
            let count = Tab::games().len();
            match key.code {
                KeyCode::Char('1') => self.launch(Tab::Tetris),
                KeyCode::Char('2') => self.launch(Tab::PacMan),
                KeyCode::Char('3') => self.launch(Tab::Breakout),
                KeyCode::Right | KeyCode::Down => {
                    self.selected_game = (self.selected_game + 1) % count;
                }
                KeyCode::Left | KeyCode::Up => {
                    self.selected_game = (self.selected_game + count - 1) % count;
                }
                KeyCode::Enter => self.launch(Tab::games()[self.selected_game]),
                _ => {}
            }
            return;
        }

        // Forward to active game
        if let Some(cmd) = Command::from_key(key) {
            self.scheduler.dispatch_input(cmd);
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.active.is_none() {
            return;
        }
        // Inside the game's border
        let left = self.game_area.x.saturating_add(1);
        let width = self.game_area.width.saturating_sub(2);
        if let Some(cmd) = Command::from_mouse(mouse, left, width) {
            self.scheduler.dispatch_input(cmd);
        }
    }

    fn switch_to(&mut self, tab: Tab) {
        if tab == Tab::Home {
            self.go_home();
        } else {
            self.launch(tab);
        }
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let config = Config {
            seed: Some(1),
            ..Config::default()
        };
        let mut app = App::new(&config);
        app.set_game_area(Rect::new(0, 3, 80, 21));
        app
    }

    #[test]
    fn test_digit_launches_and_esc_stops() {
        let mut app = app();
        app.on_key(KeyEvent::from(KeyCode::Char('2')));
        assert_eq!(app.current_tab, Tab::PacMan);
        assert_eq!(app.scheduler().tick_count(), 1);
        assert_eq!(app.scheduler().input_count(), 1);

        app.on_key(KeyEvent::from(KeyCode::Esc));
        assert_eq!(app.current_tab, Tab::Home);
        assert_eq!(app.scheduler().tick_count(), 0);
        assert_eq!(app.scheduler().input_count(), 0);
        assert_eq!(app.last_scores[1], Some(0));
    }

    #[test]
    fn test_tab_cycles_through_games_one_at_a_time() {
        let mut app = app();
        for expected in [Tab::Tetris, Tab::PacMan, Tab::Breakout] {
            app.on_key(KeyEvent::from(KeyCode::Tab));
            assert_eq!(app.current_tab, expected);
            assert_eq!(app.scheduler().tick_count(), 1);
            assert_eq!(app.active_game().map(|g| g.title()), Some(expected.title().trim()));
        }
        app.on_key(KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Home);
        assert!(app.active_game().is_none());
        assert_eq!(app.scheduler().tick_count(), 0);
    }

    #[test]
    fn test_small_surface_stays_home_with_status() {
        let mut app = app();
        app.set_game_area(Rect::new(0, 3, 20, 8));
        app.on_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.current_tab, Tab::Home);
        assert!(app.active_game().is_none());
        assert_eq!(app.scheduler().tick_count(), 0);
        assert_eq!(app.scheduler().input_count(), 0);
        assert!(app.status.as_deref().is_some_and(|s| s.contains("Tetris")));
    }

    #[test]
    fn test_q_quits_only_from_home() {
        let mut app = app();
        app.on_key(KeyEvent::from(KeyCode::Char('3')));
        app.on_key(KeyEvent::from(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.on_key(KeyEvent::from(KeyCode::Esc));
        app.on_key(KeyEvent::from(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_arrow_selection_wraps() {
        let mut app = app();
        app.on_key(KeyEvent::from(KeyCode::Left));
        assert_eq!(app.selected_game, 2);
        app.on_key(KeyEvent::from(KeyCode::Right));
        assert_eq!(app.selected_game, 0);
    }
}
