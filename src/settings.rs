//! Player settings and preferences
//!
//! Persisted separately from run stats in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Viewports at or below this width get the mobile layout
pub const MOBILE_MAX_WIDTH: f32 = 768.0;

/// Layout presets, each with its own balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutPreset {
    #[default]
    Desktop,
    Mobile,
}

impl LayoutPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPreset::Desktop => "Desktop",
            LayoutPreset::Mobile => "Mobile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" | "pc" => Some(LayoutPreset::Desktop),
            "mobile" | "phone" => Some(LayoutPreset::Mobile),
            _ => None,
        }
    }

    /// Pick a preset from the viewport width
    pub fn for_viewport(width: f32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            LayoutPreset::Mobile
        } else {
            LayoutPreset::Desktop
        }
    }

    /// Gameplay balance for this layout
    pub fn tuning(&self) -> Tuning {
        match self {
            LayoutPreset::Desktop => Tuning::desktop(),
            LayoutPreset::Mobile => Tuning::mobile(),
        }
    }
}

/// Player settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Layout override; None follows the viewport
    pub layout: Option<LayoutPreset>,

    // === Page toggles (passed through in the render view) ===
    /// Sound effects on/off (jump, bean, hit, health up)
    pub sound_enabled: bool,
    /// "Speed Up!" / "+1 Life!" banners
    pub show_banners: bool,

    // === Accessibility ===
    /// Reduced motion (no hit blinking)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: None,
            sound_enabled: true,
            show_banners: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Layout in effect for a viewport of the given width
    pub fn effective_layout(&self, viewport_width: f32) -> LayoutPreset {
        self.layout
            .unwrap_or_else(|| LayoutPreset::for_viewport(viewport_width))
    }

    /// Tuning in effect for a viewport of the given width
    pub fn tuning_for(&self, viewport_width: f32) -> Tuning {
        self.effective_layout(viewport_width).tuning()
    }

    /// Hit blinking (respects reduced_motion)
    pub fn effective_blink(&self) -> bool {
        !self.reduced_motion
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "alley_run_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
