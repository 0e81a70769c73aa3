//! Keypad to player commands
//!
//! SELECT pages through the display locally. The four arrows are transport
//! controls, passed on to the player bridge as JSON lines on stdout:
//!
//! ```text
//! {"command":"previous"}
//! ```

use std::io::Write;

use embassy_sync::blocking_mutex::raw::RawMutex;
use jukebox_display::{ButtonHandler, DisplayEngine};
use jukebox_hal::{Backlight, Button, CharacterLcd};
use log::{info, warn};
use serde::Serialize;

/// Transport command for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum PlayerCommand {
    Previous,
    Next,
    Pause,
    Stop,
}

impl PlayerCommand {
    /// Command bound to a button, if any
    pub fn for_button(button: Button) -> Option<Self> {
        match button {
            Button::Left => Some(PlayerCommand::Previous),
            Button::Right => Some(PlayerCommand::Next),
            Button::Up => Some(PlayerCommand::Pause),
            Button::Down => Some(PlayerCommand::Stop),
            Button::Select => None,
        }
    }
}

/// Button handler for the front panel
pub struct FrontPanel<W: Write> {
    out: W,
}

impl<W: Write> FrontPanel<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn send(&mut self, command: PlayerCommand) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, &command)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<M, L, W, const N: usize> ButtonHandler<DisplayEngine<M, L, N>> for FrontPanel<W>
where
    M: RawMutex,
    L: CharacterLcd + Backlight,
    W: Write,
{
    async fn on_button(&mut self, engine: &DisplayEngine<M, L, N>, button: Button) {
        info!("Button {}", button.name());

        match PlayerCommand::for_button(button) {
            Some(command) => {
                if let Err(e) = self.send(command) {
                    warn!("Failed to send {:?}: {}", command, e);
                }
            }
            None => {
                if let Err(e) = engine.next_page().await {
                    warn!("Failed to change page: {:?}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use jukebox_display::EngineConfig;
    use jukebox_hal_sim::SimulatedPanel;

    type Engine = DisplayEngine<NoopRawMutex, SimulatedPanel, 3>;

    fn engine() -> Engine {
        Engine::new(SimulatedPanel::new(), EngineConfig::default())
    }

    #[test]
    fn test_arrows_emit_commands() {
        let engine = engine();
        let mut panel = FrontPanel::new(Vec::new());
        for button in [Button::Left, Button::Right, Button::Up, Button::Down] {
            block_on(panel.on_button(&engine, button));
        }

        let out = String::from_utf8(panel.out).unwrap();
        assert_eq!(
            out,
            "{\"command\":\"previous\"}\n\
             {\"command\":\"next\"}\n\
             {\"command\":\"pause\"}\n\
             {\"command\":\"stop\"}\n"
        );
        assert_eq!(block_on(engine.current_page()), 0);
    }

    #[test]
    fn test_select_pages_locally() {
        let engine = engine();
        let mut panel = FrontPanel::new(Vec::new());
        block_on(panel.on_button(&engine, Button::Select));
        block_on(panel.on_button(&engine, Button::Select));

        assert!(panel.out.is_empty());
        assert_eq!(block_on(engine.current_page()), 2);
    }
}
