//! Device-independent input
//!
//! Key and mouse events are reduced to `Command`s before they reach a game.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// How long a held key stays down without a repeat or release event.
/// Most terminals never report key release.
pub const HOLD_WINDOW: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Moving directions; chasers also break ties in this order
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Up | Direction::Down | Direction::None => 0,
        }
    }

    pub fn dy(self) -> i32 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
            Direction::Left | Direction::Right | Direction::None => 0,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    fn slot(self) -> Option<usize> {
        match self {
            Direction::Up => Some(0),
            Direction::Down => Some(1),
            Direction::Left => Some(2),
            Direction::Right => Some(3),
            Direction::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move(Direction),
    /// Key-up for a directional key, when the terminal reports it
    Release(Direction),
    RotateCw,
    RotateCcw,
    SoftDrop,
    HardDrop,
    PauseToggle,
    Restart,
    /// Enter: restarts a finished game
    Confirm,
    /// Horizontal pointer position as a fraction of the surface width
    PointerX(f32),
}

impl Command {
    /// Map a key to a command. Unrecognized keys give `None`.
    ///
    /// Up/Down stay directional here; the falling-block game reads them
    /// as rotate and soft drop.
    pub fn from_key(key: KeyEvent) -> Option<Command> {
        if key.kind == KeyEventKind::Release {
            return direction_for(key.code).map(Command::Release);
        }
        if let Some(dir) = direction_for(key.code) {
            return Some(Command::Move(dir));
        }
        match key.code {
            KeyCode::Char(' ') => Some(Command::HardDrop),
            KeyCode::Enter => Some(Command::Confirm),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'x' => Some(Command::RotateCw),
                'z' => Some(Command::RotateCcw),
                's' => Some(Command::SoftDrop),
                'p' => Some(Command::PauseToggle),
                'r' => Some(Command::Restart),
                _ => None,
            },
            _ => None,
        }
    }

    /// Map a mouse press/drag inside a surface of `width` columns starting
    /// at column `left`.
    pub fn from_mouse(mouse: MouseEvent, left: u16, width: u16) -> Option<Command> {
        match mouse.kind {
            MouseEventKind::Down(_) | MouseEventKind::Drag(_) => {
                if width == 0 {
                    return None;
                }
                let col = mouse.column.saturating_sub(left) as f32;
                Some(Command::PointerX((col / width as f32).clamp(0.0, 1.0)))
            }
            _ => None,
        }
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

/// Pressed-key set for continuous controls.
///
/// A press holds the key for `HOLD_WINDOW`; repeats refresh it and a
/// release (if reported) drops it at once.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    remaining: [Duration; 4],
}

impl HeldKeys {
    pub fn press(&mut self, dir: Direction) {
        if let Some(i) = dir.slot() {
            self.remaining[i] = HOLD_WINDOW;
        }
    }

    pub fn release(&mut self, dir: Direction) {
        if let Some(i) = dir.slot() {
            self.remaining[i] = Duration::ZERO;
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        dir.slot().is_some_and(|i| !self.remaining[i].is_zero())
    }

    pub fn decay(&mut self, dt: Duration) {
        for r in &mut self.remaining {
            *r = r.saturating_sub(dt);
        }
    }

    pub fn clear(&mut self) {
        self.remaining = [Duration::ZERO; 4];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers, MouseButton};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key(KeyEvent::from(KeyCode::Left)), Some(Command::Move(Direction::Left)));
        assert_eq!(Command::from_key(KeyEvent::from(KeyCode::Char('Z'))), Some(Command::RotateCcw));
        assert_eq!(Command::from_key(KeyEvent::from(KeyCode::Char(' '))), Some(Command::HardDrop));
        assert_eq!(Command::from_key(KeyEvent::from(KeyCode::Char('p'))), Some(Command::PauseToggle));
        assert_eq!(Command::from_key(KeyEvent::from(KeyCode::Char('k'))), None);
        assert_eq!(Command::from_key(KeyEvent::from(KeyCode::F(5))), None);
    }

    #[test]
    fn test_release_only_for_directions() {
        let up = key(KeyCode::Right, KeyEventKind::Release);
        assert_eq!(Command::from_key(up), Some(Command::Release(Direction::Right)));
        let p = key(KeyCode::Char('p'), KeyEventKind::Release);
        assert_eq!(Command::from_key(p), None);
    }

    #[test]
    fn test_mouse_maps_to_fraction() {
        let mouse = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 30,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        let Some(Command::PointerX(f)) = Command::from_mouse(mouse, 10, 40) else {
            panic!("expected pointer command");
        };
        assert!((f - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_held_keys_expire() {
        let mut held = HeldKeys::default();
        held.press(Direction::Left);
        assert!(held.is_held(Direction::Left));
        assert!(!held.is_held(Direction::Right));

        held.decay(Duration::from_millis(60));
        assert!(held.is_held(Direction::Left));
        held.decay(Duration::from_millis(60));
        assert!(!held.is_held(Direction::Left));

        held.press(Direction::Right);
        held.release(Direction::Right);
        assert!(!held.is_held(Direction::Right));
    }

    #[test]
    fn test_direction_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.dx() + dir.opposite().dx(), 0);
            assert_eq!(dir.dy() + dir.opposite().dy(), 0);
        }
        assert_eq!(Direction::None.opposite(), Direction::None);
    }
}
