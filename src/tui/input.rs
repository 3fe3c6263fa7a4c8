// Input handling system with configurable key behaviors
//
// Terminals report held keys as a stream of presses, often without release
// events. This module decides which of those presses become actions:
// - State-change only keys (trigger once per press)
// - Repeatable keys (trigger on press, then repeat while held)

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Minimum gap between triggers of a state-change key with no release event
const STATE_CHANGE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Defines how a key should behave when pressed/held
#[derive(Debug, Clone, Copy)]
pub enum KeyBehavior {
    /// Trigger only on state change (press → release)
    StateChange,

    /// Trigger on press, then repeat after initial delay
    Repeatable {
        /// Delay before starting to repeat
        initial_delay: Duration,
        /// Time between repeats
        repeat_interval: Duration,
    },
}

impl KeyBehavior {
    /// Card stepping: quick enough for deliberate taps, slow enough that a
    /// held arrow does not outrun the smooth scroll
    pub fn card_step() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(250),
            repeat_interval: Duration::from_millis(120),
        }
    }
}

/// Tracks the state of a single key
#[derive(Debug)]
struct KeyState {
    is_pressed: bool,
    press_started: Option<Instant>,
    last_triggered: Option<Instant>,
}

impl KeyState {
    fn new() -> Self {
        Self {
            is_pressed: false,
            press_started: None,
            last_triggered: None,
        }
    }

    fn release(&mut self) {
        self.is_pressed = false;
        self.press_started = None;
        self.last_triggered = None;
    }
}

/// Input handler that manages key behaviors
pub struct InputHandler {
    key_states: HashMap<KeyCode, KeyState>,
    key_behaviors: HashMap<KeyCode, KeyBehavior>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            key_states: HashMap::new(),
            key_behaviors: HashMap::new(),
        }
    }

    pub fn configure_key(&mut self, key: KeyCode, behavior: KeyBehavior) {
        self.key_behaviors.insert(key, behavior);
    }

    pub fn configure_keys(&mut self, keys: &[KeyCode], behavior: KeyBehavior) {
        for key in keys {
            self.configure_key(*key, behavior);
        }
    }

    /// Handle a key press event at `now`. Returns true if the action should fire.
    pub fn handle_key_press_at(&mut self, key: KeyCode, now: Instant) -> bool {
        let behavior = self
            .key_behaviors
            .get(&key)
            .copied()
            .unwrap_or(KeyBehavior::StateChange);

        let state = self.key_states.entry(key).or_insert_with(KeyState::new);

        if !state.is_pressed {
            state.is_pressed = true;
            state.press_started = Some(now);
            state.last_triggered = Some(now);
            return true;
        }

        let (Some(press_start), Some(last)) = (state.press_started, state.last_triggered) else {
            return false;
        };

        let fire = match behavior {
            // Handles terminals that never send Release events
            KeyBehavior::StateChange => now.duration_since(last) >= STATE_CHANGE_DEBOUNCE,
            KeyBehavior::Repeatable {
                initial_delay,
                repeat_interval,
            } => {
                now.duration_since(press_start) >= initial_delay
                    && now.duration_since(last) >= repeat_interval
            }
        };
        if fire {
            state.last_triggered = Some(now);
        }
        fire
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        if let Some(state) = self.key_states.get_mut(&key) {
            state.release();
        }
    }

    /// Carousel keys: arrows and vim keys repeat, everything else fires once
    pub fn with_default_config() -> Self {
        let mut handler = Self::new();

        handler.configure_keys(
            &[
                KeyCode::Left,
                KeyCode::Right,
                KeyCode::Char('h'),
                KeyCode::Char('l'),
            ],
            KeyBehavior::card_step(),
        );

        handler.configure_keys(
            &[
                KeyCode::Home,
                KeyCode::End,
                KeyCode::Esc,
                KeyCode::Char('q'),
                KeyCode::Char('Q'),
                KeyCode::Char('t'),
                KeyCode::Char('T'),
            ],
            KeyBehavior::StateChange,
        );

        handler
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::with_default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_state_change_no_repeat() {
        let t0 = Instant::now();
        let mut handler = InputHandler::new();
        handler.configure_key(KeyCode::Home, KeyBehavior::StateChange);

        assert!(handler.handle_key_press_at(KeyCode::Home, t0));
        assert!(!handler.handle_key_press_at(KeyCode::Home, t0 + ms(10)));
        assert!(!handler.handle_key_press_at(KeyCode::Home, t0 + ms(100)));

        handler.handle_key_release(KeyCode::Home);
        assert!(handler.handle_key_press_at(KeyCode::Home, t0 + ms(110)));
    }

    #[test]
    fn test_state_change_debounce_without_release() {
        let t0 = Instant::now();
        let mut handler = InputHandler::new();

        assert!(handler.handle_key_press_at(KeyCode::End, t0));
        assert!(!handler.handle_key_press_at(KeyCode::End, t0 + ms(149)));
        assert!(handler.handle_key_press_at(KeyCode::End, t0 + ms(300)));
    }

    #[test]
    fn test_repeatable_with_delay() {
        let t0 = Instant::now();
        let mut handler = InputHandler::new();
        handler.configure_key(
            KeyCode::Right,
            KeyBehavior::Repeatable {
                initial_delay: ms(100),
                repeat_interval: ms(50),
            },
        );

        assert!(handler.handle_key_press_at(KeyCode::Right, t0));
        assert!(!handler.handle_key_press_at(KeyCode::Right, t0 + ms(5)));
        assert!(handler.handle_key_press_at(KeyCode::Right, t0 + ms(110)));
        assert!(!handler.handle_key_press_at(KeyCode::Right, t0 + ms(130)));
        assert!(handler.handle_key_press_at(KeyCode::Right, t0 + ms(170)));
    }

    #[test]
    fn test_keys_are_independent() {
        let t0 = Instant::now();
        let mut handler = InputHandler::with_default_config();
        assert!(handler.handle_key_press_at(KeyCode::Left, t0));
        assert!(handler.handle_key_press_at(KeyCode::Right, t0));
    }
}
