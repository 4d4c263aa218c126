//! Gamepad collaborator

use super::PadState;
use gilrs::{Button, GamepadId, Gilrs};

/// A controller that can be sampled once per tick
pub trait Gamepad {
    /// Current state, or `None` when no controller is connected
    fn poll(&mut self) -> Option<PadState>;
}

/// Gamepad backed by gilrs. Follows whichever controller sent the
/// most recent event, falling back to the first connected one.
pub struct GilrsGamepad {
    gilrs: Gilrs,
    active: Option<GamepadId>,
}

impl GilrsGamepad {
    pub fn new() -> anyhow::Result<Self> {
        let gilrs = Gilrs::new().map_err(|e| anyhow::anyhow!("gamepad init failed: {}", e))?;
        for (id, pad) in gilrs.gamepads() {
            tracing::info!("Gamepad {:?}: {}", id, pad.name());
        }
        Ok(Self {
            gilrs,
            active: None,
        })
    }
}

impl Gamepad for GilrsGamepad {
    fn poll(&mut self) -> Option<PadState> {
        // Drain the queue so gilrs updates its cached state
        while let Some(event) = self.gilrs.next_event() {
            self.active = Some(event.id);
        }

        let id = self
            .active
            .filter(|id| self.gilrs.connected_gamepad(*id).is_some())
            .or_else(|| self.gilrs.gamepads().map(|(id, _)| id).next())?;
        let gamepad = self.gilrs.connected_gamepad(id)?;
        let btn = |button: Button| gamepad.is_pressed(button);

        let axis = |negative: Button, positive: Button| -> i8 {
            match (btn(negative), btn(positive)) {
                (true, false) => -1,
                (false, true) => 1,
                _ => 0,
            }
        };

        Some(PadState {
            dpad: (
                axis(Button::DPadLeft, Button::DPadRight),
                axis(Button::DPadDown, Button::DPadUp),
            ),
            a: btn(Button::South),
            b: btn(Button::East),
            y: btn(Button::North),
            left_shoulder: btn(Button::LeftTrigger),
            right_shoulder: btn(Button::RightTrigger),
        })
    }
}
