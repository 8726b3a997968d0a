//! What the page draws each frame
//!
//! The simulation state plus the presentation bits the page cannot derive
//! on its own: blink phase, HUD speed bar, asset names and player toggles.

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{GameEvent, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct RenderView<'a> {
    pub state: &'a GameState,
    /// Events from the advance that produced this view (empty while idle)
    pub events: &'a [GameEvent],
    /// Draw the character this frame (false during the off half of a blink)
    pub character_visible: bool,
    /// 0..=1 share of the speed range reached
    pub speed_fraction: f32,
    /// Asset name for the domain (`BG_{asset}.png`)
    pub asset: &'static str,
    pub sound_enabled: bool,
    pub show_banners: bool,
}

impl<'a> RenderView<'a> {
    pub fn new(state: &'a GameState, events: &'a [GameEvent], settings: &Settings) -> Self {
        let character_visible =
            !settings.effective_blink() || state.character.blink_visible(state.elapsed_ms);
        Self {
            state,
            events,
            character_visible,
            speed_fraction: state.speed_fraction(),
            asset: state.domain.asset_name(),
            sound_enabled: settings.sound_enabled,
            show_banners: settings.show_banners,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
