use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::direction::Direction;

/// High-level input events consumed by the driver loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Steer(Direction),
    /// Boost key went down (or repeated) when `true`, released when `false`.
    Boost(bool),
    Quit,
}

/// Maps one terminal key event to a command.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    let pressed = key.kind != KeyEventKind::Release;
    match key.code {
        KeyCode::Char(' ') => Some(Command::Boost(pressed)),
        _ if !pressed => None,
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Command::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Command::Steer(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Command::Steer(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Command::Steer(Direction::Right)),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Command::Quit),
        _ => None,
    }
}

/// Waits up to `timeout` for a key and maps it to a command.
pub fn poll_command(timeout: Duration) -> io::Result<Option<Command>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

/// Tracks whether the boost key is held.
///
/// Terminals with key release reporting end the boost on release. Others
/// only send presses and auto-repeats, so boost also lapses once no press has
/// arrived within the hold window.
#[derive(Debug, Clone, Copy)]
pub struct BoostLatch {
    hold_window: Duration,
    last_press: Option<Instant>,
}

impl BoostLatch {
    #[must_use]
    pub fn new(hold_window: Duration) -> Self {
        Self {
            hold_window,
            last_press: None,
        }
    }

    pub fn press(&mut self, now: Instant) {
        self.last_press = Some(now);
    }

    pub fn release(&mut self) {
        self.last_press = None;
    }

    /// Returns whether boost should be applied at `now`.
    #[must_use]
    pub fn is_active(&self, now: Instant) -> bool {
        self.last_press
            .is_some_and(|pressed| now.saturating_duration_since(pressed) < self.hold_window)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use crate::direction::Direction;

    use super::{BoostLatch, Command, map_key};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn arrows_and_wasd_steer() {
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('d'), Direction::Right),
        ];

        for (code, direction) in cases {
            assert_eq!(
                map_key(key(code, KeyEventKind::Press)),
                Some(Command::Steer(direction))
            );
        }
    }

    #[test]
    fn steering_release_is_ignored() {
        assert_eq!(map_key(key(KeyCode::Up, KeyEventKind::Release)), None);
    }

    #[test]
    fn space_press_and_release_toggle_boost() {
        assert_eq!(
            map_key(key(KeyCode::Char(' '), KeyEventKind::Press)),
            Some(Command::Boost(true))
        );
        assert_eq!(
            map_key(key(KeyCode::Char(' '), KeyEventKind::Repeat)),
            Some(Command::Boost(true))
        );
        assert_eq!(
            map_key(key(KeyCode::Char(' '), KeyEventKind::Release)),
            Some(Command::Boost(false))
        );
    }

    #[test]
    fn ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), Some(Command::Quit));
    }

    #[test]
    fn boost_latch_lapses_without_repeats() {
        let window = Duration::from_millis(250);
        let mut latch = BoostLatch::new(window);
        let start = Instant::now();

        assert!(!latch.is_active(start));

        latch.press(start);
        assert!(latch.is_active(start + Duration::from_millis(100)));
        assert!(!latch.is_active(start + window));

        latch.press(start + Duration::from_millis(200));
        assert!(latch.is_active(start + Duration::from_millis(300)));

        latch.release();
        assert!(!latch.is_active(start + Duration::from_millis(300)));
    }
}
