use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub stack: StackConfig,
    #[serde(default)]
    pub spring: SpringConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (logs live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Wallet file (JSON); the built-in sample wallet is used when unset
    #[serde(default)]
    pub wallet_path: Option<PathBuf>,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            wallet_path: None,
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Show the "Scroll" hint over an un-scrolled wallet
    #[serde(default = "default_true")]
    pub show_scroll_hint: bool,
    /// Logical units per terminal row when drawing the stack
    #[serde(default = "default_units_per_row")]
    pub units_per_row: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_scroll_hint: default_true(),
            units_per_row: default_units_per_row(),
        }
    }
}

/// Constants of the scroll-driven stack layout
///
/// Entry window of item `i` out of `n`:
/// `start = i / n * stagger_span`, `end = start + entry_width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    #[serde(default = "default_stagger_span")]
    pub stagger_span: f64,
    #[serde(default = "default_entry_width")]
    pub entry_width: f64,
    /// Width of the fade-in slice at the start of each entry window
    #[serde(default = "default_fade_width")]
    pub fade_width: f64,
    /// Position of a card before its window opens
    #[serde(default = "default_offstage_position")]
    pub offstage_position: f64,
    /// Resting position of card `i` is `i * slot_spacing`
    #[serde(default = "default_slot_spacing")]
    pub slot_spacing: f64,
    /// Depth of card `i` is `i * depth_spacing`
    #[serde(default = "default_depth_spacing")]
    pub depth_spacing: f64,
    #[serde(default = "default_entry_scale")]
    pub entry_scale: f64,
    #[serde(default = "default_rest_scale")]
    pub rest_scale: f64,
    #[serde(default = "default_focus_scale")]
    pub focus_scale: f64,
    #[serde(default = "default_focus_depth")]
    pub focus_depth: f64,
    #[serde(default = "default_base_z_order")]
    pub base_z_order: i32,
    /// Lower bound for the active card's z-order
    #[serde(default = "default_focus_z_order")]
    pub focus_z_order: i32,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stagger_span: default_stagger_span(),
            entry_width: default_entry_width(),
            fade_width: default_fade_width(),
            offstage_position: default_offstage_position(),
            slot_spacing: default_slot_spacing(),
            depth_spacing: default_depth_spacing(),
            entry_scale: default_entry_scale(),
            rest_scale: default_rest_scale(),
            focus_scale: default_focus_scale(),
            focus_depth: default_focus_depth(),
            base_z_order: default_base_z_order(),
            focus_z_order: default_focus_z_order(),
        }
    }
}

/// Damped spring parameters for the smoothed pose channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Distance and speed below which a position channel snaps to its
    /// target; scale channels use a proportionally finer threshold
    #[serde(default = "default_rest_threshold")]
    pub rest_threshold: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            rest_threshold: default_rest_threshold(),
        }
    }
}

/// Timings of the flip/zoom reveal sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Duration of the flip transform, used in both directions
    #[serde(default = "default_flip_duration")]
    pub flip_duration_ms: u64,
    /// Delay from `advance()` until the card zooms in
    #[serde(default = "default_zoom_in_delay")]
    pub zoom_in_delay_ms: u64,
    /// Delay from `reset()` until the card starts flipping back
    #[serde(default = "default_zoom_out_lead")]
    pub zoom_out_lead_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            flip_duration_ms: default_flip_duration(),
            zoom_in_delay_ms: default_zoom_in_delay(),
            zoom_out_lead_ms: default_zoom_out_lead(),
        }
    }
}

/// Easing curve for progress animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end value
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
    /// Symmetric quadratic ease-in-out, used by the card flip
    InOutQuad,
}

/// Smooth scrolling of the wallet progress value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Progress moved by one scroll step
    #[serde(default = "default_scroll_step")]
    pub scroll_step: f64,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Progress the wallet scrolls to when it opens
    #[serde(default = "default_initial_progress")]
    pub initial_progress: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_step: default_scroll_step(),
            animation_fps: default_animation_fps(),
            initial_progress: default_initial_progress(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "<S-Tab>" (Shift+Tab), "<CR>" (Enter), "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Move the card cursor
    #[serde(default = "default_key_next_card")]
    pub next_card: String,
    #[serde(default = "default_key_prev_card")]
    pub prev_card: String,
    /// Tap the card under the cursor (tap again to open it)
    #[serde(default = "default_key_tap")]
    pub tap: String,
    /// Flip the closed card open
    #[serde(default = "default_key_reveal")]
    pub reveal: String,
    #[serde(default = "default_key_flip_back")]
    pub flip_back: String,
    /// Leave the card view
    #[serde(default = "default_key_back")]
    pub back: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            next_card: default_key_next_card(),
            prev_card: default_key_prev_card(),
            tap: default_key_tap(),
            reveal: default_key_reveal(),
            flip_back: default_key_flip_back(),
            back: default_key_back(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_scroll_page_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-u>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_next_card() -> String { "<Tab>".to_string() }
fn default_key_prev_card() -> String { "<S-Tab>".to_string() }
fn default_key_tap() -> String { "<CR>".to_string() }
fn default_key_reveal() -> String { "<Space>".to_string() }
fn default_key_flip_back() -> String { "b".to_string() }
fn default_key_back() -> String { "<Esc>".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardfolio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_units_per_row() -> f64 {
    20.0
}

fn default_stagger_span() -> f64 {
    0.5
}

fn default_entry_width() -> f64 {
    0.4
}

fn default_fade_width() -> f64 {
    0.1
}

fn default_offstage_position() -> f64 {
    1000.0
}

fn default_slot_spacing() -> f64 {
    60.0
}

fn default_depth_spacing() -> f64 {
    40.0
}

fn default_entry_scale() -> f64 {
    0.9
}

fn default_rest_scale() -> f64 {
    1.0
}

fn default_focus_scale() -> f64 {
    1.05
}

fn default_focus_depth() -> f64 {
    100.0
}

fn default_base_z_order() -> i32 {
    10
}

fn default_focus_z_order() -> i32 {
    100
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_damping() -> f64 {
    20.0
}

fn default_mass() -> f64 {
    1.0
}

fn default_rest_threshold() -> f64 {
    0.01
}

fn default_flip_duration() -> u64 {
    1200
}

fn default_zoom_in_delay() -> u64 {
    900
}

fn default_zoom_out_lead() -> u64 {
    300
}

fn default_scroll_duration() -> u64 {
    250
}

fn default_scroll_step() -> f64 {
    0.05
}

fn default_animation_fps() -> u32 {
    60
}

fn default_initial_progress() -> f64 {
    0.2 // brings the first card about halfway through its entry
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Reject values that would break the animation invariants
    pub fn validate(&self) -> Result<()> {
        self.stack.validate()?;
        self.spring.validate()?;
        self.reveal.validate()?;

        if !(0.0..=1.0).contains(&self.scroll.initial_progress) {
            return Err(Error::InvalidConfig {
                field: "scroll.initial_progress",
                reason: "must be within [0, 1]".to_string(),
            });
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/cardfolio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("cardfolio")
            .join("config.toml")
    }

    /// Get the log file path used while the terminal UI owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("cardfolio.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the wallet file path (with tilde expansion), if configured
    pub fn wallet_path(&self) -> Option<PathBuf> {
        self.general.wallet_path.as_deref().map(expand_tilde)
    }
}

impl StackConfig {
    /// End of the last item's entry window for `count` items
    pub fn last_window_end(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        let last = (count - 1) as f64;
        last / count as f64 * self.stagger_span + self.entry_width
    }

    /// Whether every entry window of `count` items ends within the progress domain
    pub fn fits(&self, count: usize) -> bool {
        self.last_window_end(count) <= 1.0
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.entry_width > 0.0 && self.entry_width <= 1.0) {
            return Err(Error::InvalidConfig {
                field: "stack.entry_width",
                reason: format!("must be within (0, 1], got {}", self.entry_width),
            });
        }
        if !(0.0..1.0).contains(&self.stagger_span) {
            return Err(Error::InvalidConfig {
                field: "stack.stagger_span",
                reason: format!("must be within [0, 1), got {}", self.stagger_span),
            });
        }
        if !(self.fade_width > 0.0) {
            return Err(Error::InvalidConfig {
                field: "stack.fade_width",
                reason: "must be positive".to_string(),
            });
        }
        if self.entry_scale < 0.0 || self.rest_scale < 0.0 || self.focus_scale < 0.0 {
            return Err(Error::InvalidConfig {
                field: "stack.*_scale",
                reason: "scales must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

impl SpringConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.mass > 0.0) {
            return Err(Error::InvalidConfig {
                field: "spring.mass",
                reason: "must be positive".to_string(),
            });
        }
        if !(self.stiffness > 0.0) {
            return Err(Error::InvalidConfig {
                field: "spring.stiffness",
                reason: "must be positive".to_string(),
            });
        }
        // An undamped spring oscillates forever
        if !(self.damping > 0.0) {
            return Err(Error::InvalidConfig {
                field: "spring.damping",
                reason: "must be positive".to_string(),
            });
        }
        if !(self.rest_threshold > 0.0) {
            return Err(Error::InvalidConfig {
                field: "spring.rest_threshold",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl RevealConfig {
    pub fn validate(&self) -> Result<()> {
        if self.flip_duration_ms == 0 {
            return Err(Error::InvalidConfig {
                field: "reveal.flip_duration_ms",
                reason: "must be positive".to_string(),
            });
        }
        if self.zoom_in_delay_ms >= self.flip_duration_ms {
            return Err(Error::InvalidConfig {
                field: "reveal.zoom_in_delay_ms",
                reason: format!(
                    "must be shorter than the flip duration ({}ms)",
                    self.flip_duration_ms
                ),
            });
        }
        Ok(())
    }
}
