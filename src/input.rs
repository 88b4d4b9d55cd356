//! Keyboard tracking for the fixed-tick loop
//!
//! Terminals deliver key presses as a stream of events, some of which are
//! OS auto-repeats, and many never report releases. `InputTracker` folds that
//! stream into one `TickInput` per tick.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

/// Ticks Up stays held after its last press when releases are not reported
pub const HOLD_GRACE_TICKS: u32 = 8;

/// Quiet ticks before a repeated press of a one-shot key counts as new.
/// Longer than common OS auto-repeat delays (500-660 ms).
pub const REPEAT_WINDOW_TICKS: u32 = 45;

/// Game-relevant keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    BalanceLeft,
    BalanceRight,
    Restart,
    Quit,
}

/// What happened to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

/// Map a terminal key event onto a game key
pub fn translate(event: &KeyEvent) -> Option<(Key, KeyAction)> {
    let key = match event.code {
        KeyCode::Up => Key::Up,
        KeyCode::Char('a' | 'A') => Key::BalanceLeft,
        KeyCode::Char('d' | 'D') => Key::BalanceRight,
        KeyCode::Char('r' | 'R') => Key::Restart,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Key::Quit,
        _ => return None,
    };
    let action = match event.kind {
        KeyEventKind::Press => KeyAction::Press,
        KeyEventKind::Repeat => KeyAction::Repeat,
        KeyEventKind::Release => KeyAction::Release,
    };
    Some((key, action))
}

/// A key that fires once per physical press
///
/// Release-less terminals report auto-repeat as plain presses, so a press
/// only fires when the key has been quiet for `REPEAT_WINDOW_TICKS`.
#[derive(Debug, Clone, Copy, Default)]
struct OneShot {
    fired: bool,
    /// Ticks until a press counts as new (release-less terminals only)
    repeat_window: u32,
}

impl OneShot {
    fn press(&mut self, releases_reported: bool) {
        if releases_reported || self.repeat_window == 0 {
            self.fired = true;
        }
        if !releases_reported {
            self.repeat_window = REPEAT_WINDOW_TICKS;
        }
    }

    fn release(&mut self) {
        self.repeat_window = 0;
    }

    /// Consume this tick's trigger
    fn take(&mut self) -> bool {
        self.repeat_window = self.repeat_window.saturating_sub(1);
        std::mem::take(&mut self.fired)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    /// Terminal reports key releases (keyboard enhancement active)
    releases_reported: bool,
    up_held: bool,
    /// Ticks left on the hold window (release-less terminals only)
    up_grace: u32,
    balance_left: OneShot,
    balance_right: OneShot,
    restart: OneShot,
    quit: bool,
}

impl InputTracker {
    pub fn new(releases_reported: bool) -> Self {
        Self {
            releases_reported,
            ..Default::default()
        }
    }

    /// Record one key event
    pub fn handle(&mut self, key: Key, action: KeyAction) {
        match (key, action) {
            (Key::Up, KeyAction::Press | KeyAction::Repeat) => {
                self.up_held = true;
                self.up_grace = HOLD_GRACE_TICKS;
            }
            (Key::Up, KeyAction::Release) => {
                self.up_held = false;
                self.up_grace = 0;
            }
            (Key::Quit, KeyAction::Press) => self.quit = true,
            (Key::Up | Key::Quit, _) => {}
            (key, action) => {
                let releases_reported = self.releases_reported;
                if let Some(shot) = self.one_shot(key) {
                    match action {
                        KeyAction::Press => shot.press(releases_reported),
                        // Reported auto-repeat never fires
                        KeyAction::Repeat => {}
                        KeyAction::Release => shot.release(),
                    }
                }
            }
        }
    }

    fn one_shot(&mut self, key: Key) -> Option<&mut OneShot> {
        match key {
            Key::BalanceLeft => Some(&mut self.balance_left),
            Key::BalanceRight => Some(&mut self.balance_right),
            Key::Restart => Some(&mut self.restart),
            Key::Up | Key::Quit => None,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Produce this tick's input and clear the one-shot flags
    pub fn sample(&mut self) -> TickInput {
        let up = if self.releases_reported {
            self.up_held
        } else {
            self.up_grace > 0
        };

        let input = TickInput {
            up,
            balance_left: self.balance_left.take(),
            balance_right: self.balance_right.take(),
            restart: self.restart.take(),
        };

        if !self.releases_reported {
            self.up_grace = self.up_grace.saturating_sub(1);
            if self.up_grace == 0 {
                self.up_held = false;
            }
        }

        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_is_edge_triggered() {
        let mut tracker = InputTracker::new(true);
        tracker.handle(Key::BalanceLeft, KeyAction::Press);
        assert!(tracker.sample().balance_left);
        // Still physically held: no second trigger
        tracker.handle(Key::BalanceLeft, KeyAction::Repeat);
        assert!(!tracker.sample().balance_left);
        assert!(!tracker.sample().balance_left);
    }

    #[test]
    fn test_auto_repeat_press_does_not_refire_balance() {
        let mut tracker = InputTracker::new(false);
        let held_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);

        let mut fired = 0;
        for _ in 0..10 {
            let (key, action) = translate(&held_a).unwrap();
            tracker.handle(key, action);
            if tracker.sample().balance_left {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);

        // Other key is independent
        tracker.handle(Key::BalanceRight, KeyAction::Press);
        assert!(tracker.sample().balance_right);
    }

    #[test]
    fn test_balance_fires_again_after_quiet_window() {
        let mut tracker = InputTracker::new(false);
        tracker.handle(Key::BalanceLeft, KeyAction::Press);
        assert!(tracker.sample().balance_left);

        // Still inside the window: treated as auto-repeat
        for _ in 1..REPEAT_WINDOW_TICKS - 1 {
            assert!(!tracker.sample().balance_left);
        }
        tracker.handle(Key::BalanceLeft, KeyAction::Press);
        assert!(!tracker.sample().balance_left);

        // That repeat restarted the window; wait it out
        for _ in 1..REPEAT_WINDOW_TICKS {
            assert!(!tracker.sample().balance_left);
        }
        tracker.handle(Key::BalanceLeft, KeyAction::Press);
        assert!(tracker.sample().balance_left);
    }

    #[test]
    fn test_release_ends_repeat_window() {
        let mut tracker = InputTracker::new(false);
        tracker.handle(Key::BalanceRight, KeyAction::Press);
        assert!(tracker.sample().balance_right);
        tracker.handle(Key::BalanceRight, KeyAction::Release);
        tracker.handle(Key::BalanceRight, KeyAction::Press);
        assert!(tracker.sample().balance_right);
    }

    #[test]
    fn test_quick_taps_fire_with_releases_reported() {
        let mut tracker = InputTracker::new(true);
        for _ in 0..3 {
            tracker.handle(Key::BalanceLeft, KeyAction::Press);
            assert!(tracker.sample().balance_left);
            tracker.handle(Key::BalanceLeft, KeyAction::Release);
        }
    }

    #[test]
    fn test_up_held_until_release() {
        let mut tracker = InputTracker::new(true);
        tracker.handle(Key::Up, KeyAction::Press);
        for _ in 0..50 {
            assert!(tracker.sample().up);
        }
        tracker.handle(Key::Up, KeyAction::Release);
        assert!(!tracker.sample().up);
    }

    #[test]
    fn test_up_grace_without_releases() {
        let mut tracker = InputTracker::new(false);
        tracker.handle(Key::Up, KeyAction::Press);
        for _ in 0..HOLD_GRACE_TICKS {
            assert!(tracker.sample().up);
        }
        assert!(!tracker.sample().up);

        // Auto-repeat keeps it alive
        tracker.handle(Key::Up, KeyAction::Press);
        tracker.sample();
        tracker.handle(Key::Up, KeyAction::Repeat);
        for _ in 0..HOLD_GRACE_TICKS {
            assert!(tracker.sample().up);
        }
        assert!(!tracker.sample().up);
    }

    #[test]
    fn test_restart_and_quit() {
        let mut tracker = InputTracker::new(true);
        tracker.handle(Key::Restart, KeyAction::Press);
        tracker.handle(Key::Quit, KeyAction::Press);
        let input = tracker.sample();
        assert!(input.restart);
        assert!(tracker.quit_requested());
        assert!(!tracker.sample().restart);
    }

    #[test]
    fn test_translate() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(translate(&press(KeyCode::Up)), Some((Key::Up, KeyAction::Press)));
        assert_eq!(
            translate(&press(KeyCode::Char('A'))),
            Some((Key::BalanceLeft, KeyAction::Press))
        );
        assert_eq!(
            translate(&press(KeyCode::Char('d'))),
            Some((Key::BalanceRight, KeyAction::Press))
        );
        assert_eq!(translate(&press(KeyCode::Esc)), Some((Key::Quit, KeyAction::Press)));
        assert_eq!(translate(&press(KeyCode::Char('x'))), None);
        // Plain 'c' is not a key; Ctrl+C quits
        assert_eq!(translate(&press(KeyCode::Char('c'))), None);
        assert_eq!(
            translate(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some((Key::Quit, KeyAction::Press))
        );

        let release =
            KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(translate(&release), Some((Key::Up, KeyAction::Release)));
    }

    #[test]
    fn test_both_balance_keys_same_tick() {
        let mut tracker = InputTracker::new(true);
        tracker.handle(Key::BalanceLeft, KeyAction::Press);
        tracker.handle(Key::BalanceRight, KeyAction::Press);
        let input = tracker.sample();
        assert!(input.balance_left && input.balance_right);
    }
}
