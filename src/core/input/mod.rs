//! Input coordination
//!
//! Merges discrete keyboard events and the polled gamepad state into
//! selection moves and high-level commands.

mod gamepad;

pub use gamepad::{Gamepad, GilrsGamepad};

use crate::core::selection::{Focus, Selection, SidebarAction};

/// Keys the launcher reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
}

/// One sample of the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PadState {
    /// D-pad as (x, y); y = 1 is up, -1 is down
    pub dpad: (i8, i8),
    /// South face button
    pub a: bool,
    /// East face button
    pub b: bool,
    /// North face button
    pub y: bool,
    pub left_shoulder: bool,
    pub right_shoulder: bool,
}

/// High-level action produced by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    LaunchSelected,
    Sidebar(SidebarAction),
    CycleTheme,
    Close,
}

#[derive(Debug, Default)]
pub struct InputCoordinator {
    previous: PadState,
}

impl InputCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyboard navigation stops at the ends of the list
    pub fn handle_key(&self, key: Key, selection: &mut Selection, len: usize) -> Option<Command> {
        match key {
            Key::Up => {
                selection.step_list(-1, len);
                None
            }
            Key::Down => {
                selection.step_list(1, len);
                None
            }
            Key::Enter => Some(Command::LaunchSelected),
            Key::Escape => Some(Command::Close),
        }
    }

    /// Apply one gamepad sample.
    ///
    /// Directions apply first and repeat every tick while held; face
    /// buttons fire once per press, A before B before Y.
    pub fn apply_pad(
        &mut self,
        pad: PadState,
        selection: &mut Selection,
        len: usize,
    ) -> Option<Command> {
        match pad.dpad.1 {
            1 => selection.move_list(-1, len),
            -1 => selection.move_list(1, len),
            _ => {}
        }

        match (pad.left_shoulder, pad.right_shoulder) {
            (true, false) => selection.move_sidebar(-1),
            (false, true) => selection.move_sidebar(1),
            _ => {}
        }

        let previous = std::mem::replace(&mut self.previous, pad);
        if pad.a && !previous.a {
            Some(match selection.focus() {
                Focus::Sidebar => Command::Sidebar(selection.focused_action()),
                Focus::List => Command::LaunchSelected,
            })
        } else if pad.b && !previous.b {
            Some(Command::Close)
        } else if pad.y && !previous.y {
            Some(Command::CycleTheme)
        } else {
            None
        }
    }

    /// Record a sample without acting on it
    pub fn observe(&mut self, pad: PadState) {
        self.previous = pad;
    }

    /// Forget held buttons, e.g. after the controller disconnects
    pub fn reset(&mut self) {
        self.previous = PadState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up() -> PadState {
        PadState {
            dpad: (0, 1),
            ..Default::default()
        }
    }

    fn down() -> PadState {
        PadState {
            dpad: (0, -1),
            ..Default::default()
        }
    }

    fn press_a() -> PadState {
        PadState {
            a: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_keyboard_clamps_at_ends() {
        let input = InputCoordinator::new();
        let mut sel = Selection::default();
        sel.select(0, 3);
        assert_eq!(input.handle_key(Key::Up, &mut sel, 3), None);
        assert_eq!(sel.current(), Some(0));

        sel.select(2, 3);
        input.handle_key(Key::Down, &mut sel, 3);
        assert_eq!(sel.current(), Some(2));
    }

    #[test]
    fn test_keyboard_commands() {
        let input = InputCoordinator::new();
        let mut sel = Selection::default();
        assert_eq!(
            input.handle_key(Key::Enter, &mut sel, 1),
            Some(Command::LaunchSelected)
        );
        assert_eq!(input.handle_key(Key::Escape, &mut sel, 1), Some(Command::Close));
    }

    #[test]
    fn test_gamepad_wraps() {
        let mut input = InputCoordinator::new();
        let mut sel = Selection::default();
        sel.select(0, 3);
        input.apply_pad(up(), &mut sel, 3);
        assert_eq!(sel.current(), Some(2));
        input.apply_pad(down(), &mut sel, 3);
        assert_eq!(sel.current(), Some(0));
    }

    #[test]
    fn test_held_direction_repeats() {
        let mut input = InputCoordinator::new();
        let mut sel = Selection::default();
        sel.select(0, 10);
        for _ in 0..4 {
            input.apply_pad(down(), &mut sel, 10);
        }
        assert_eq!(sel.current(), Some(4));
    }

    #[test]
    fn test_a_fires_once_per_press() {
        let mut input = InputCoordinator::new();
        let mut sel = Selection::default();
        sel.select(0, 1);
        assert_eq!(
            input.apply_pad(press_a(), &mut sel, 1),
            Some(Command::LaunchSelected)
        );
        assert_eq!(input.apply_pad(press_a(), &mut sel, 1), None);
        input.apply_pad(PadState::default(), &mut sel, 1);
        assert_eq!(
            input.apply_pad(press_a(), &mut sel, 1),
            Some(Command::LaunchSelected)
        );
    }

    #[test]
    fn test_a_follows_last_navigated_region() {
        let mut input = InputCoordinator::new();
        let mut sel = Selection::default();
        let rb = PadState {
            right_shoulder: true,
            ..Default::default()
        };
        input.apply_pad(rb, &mut sel, 2);
        input.apply_pad(PadState::default(), &mut sel, 2);
        assert_eq!(sel.sidebar_focus(), 1);
        assert_eq!(
            input.apply_pad(press_a(), &mut sel, 2),
            Some(Command::Sidebar(SidebarAction::SecondaryLauncher))
        );

        input.apply_pad(PadState::default(), &mut sel, 2);
        input.apply_pad(down(), &mut sel, 2);
        input.apply_pad(PadState::default(), &mut sel, 2);
        assert_eq!(
            input.apply_pad(press_a(), &mut sel, 2),
            Some(Command::LaunchSelected)
        );
    }

    #[test]
    fn test_direction_then_action_same_tick() {
        let mut input = InputCoordinator::new();
        let mut sel = Selection::default();
        sel.move_sidebar(1);
        let pad = PadState {
            dpad: (0, -1),
            a: true,
            ..Default::default()
        };
        // The list move lands first, so A activates the list
        assert_eq!(
            input.apply_pad(pad, &mut sel, 3),
            Some(Command::LaunchSelected)
        );
        assert_eq!(sel.current(), Some(0));
    }

    #[test]
    fn test_one_button_action_per_tick() {
        let mut input = InputCoordinator::new();
        let mut sel = Selection::default();
        let pad = PadState {
            a: true,
            b: true,
            y: true,
            ..Default::default()
        };
        assert_eq!(
            input.apply_pad(pad, &mut sel, 0),
            Some(Command::LaunchSelected)
        );
        assert_eq!(input.apply_pad(pad, &mut sel, 0), None);
    }

    #[test]
    fn test_b_closes_and_y_cycles_theme() {
        let mut input = InputCoordinator::new();
        let mut sel = Selection::default();
        let b = PadState {
            b: true,
            ..Default::default()
        };
        let y = PadState {
            y: true,
            ..Default::default()
        };
        assert_eq!(input.apply_pad(b, &mut sel, 0), Some(Command::Close));
        assert_eq!(input.apply_pad(y, &mut sel, 0), Some(Command::CycleTheme));
    }

    #[test]
    fn test_both_shoulders_cancel() {
        let mut input = InputCoordinator::new();
        let mut sel = Selection::default();
        let pad = PadState {
            left_shoulder: true,
            right_shoulder: true,
            ..Default::default()
        };
        input.apply_pad(pad, &mut sel, 0);
        assert_eq!(sel.sidebar_focus(), 0);
        assert_eq!(sel.focus(), Focus::List);
    }
}
