//! Configuration loader plus strongly typed settings structures.
//!
//! `config.toml` and `page.toml` ship embedded in the binary and are extracted
//! to the data directory on first run. Every field has a serde default, so a
//! partial user config only overrides what it names.

use crate::core::actions::{normalize_key, parse_key_string, PageAction};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Embed default configuration files at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");
static DEFAULTS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "JOYS_LANDING_DIR";

/// Top-level configuration object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub effects: EffectsConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Key string -> action name
    #[serde(default = "default_keybinds")]
    pub keybinds: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    #[serde(default = "default_true")]
    pub mouse_capture: bool,
    /// Columns left blank on each side of the page
    #[serde(default = "default_page_padding")]
    pub page_padding: u16,
    /// Below this width the header collapses into a menu button
    #[serde(default = "default_mobile_width")]
    pub mobile_width: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    #[serde(default = "default_card_gap")]
    pub card_gap: u16,
    /// Minimum drag distance, in columns, that counts as a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "default_stagger_step_ms")]
    pub stagger_step_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default = "default_loader_min_display_ms")]
    pub min_display_ms: u64,
    #[serde(default = "default_loader_fallback_ms")]
    pub fallback_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_particle_count")]
    pub particle_count: usize,
    #[serde(default = "default_particle_spawn_interval_ms")]
    pub particle_spawn_interval_ms: u64,
    #[serde(default = "default_particle_min_life_ms")]
    pub particle_min_life_ms: u64,
    #[serde(default = "default_particle_life_jitter_ms")]
    pub particle_life_jitter_ms: u64,
    #[serde(default = "default_confetti_count")]
    pub confetti_count: usize,
    #[serde(default = "default_confetti_life_ms")]
    pub confetti_life_ms: u64,
    #[serde(default = "default_count_up_duration_ms")]
    pub count_up_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Rows scrolled before the header switches to its compact style
    #[serde(default = "default_header_threshold")]
    pub header_threshold: u16,
    #[serde(default = "default_scroll_step")]
    pub step: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: default_poll_timeout_ms(),
            mouse_capture: true,
            page_padding: default_page_padding(),
            mobile_width: default_mobile_width(),
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            card_width: default_card_width(),
            card_gap: default_card_gap(),
            swipe_threshold: default_swipe_threshold(),
        }
    }
}

impl CarouselConfig {
    /// Card width plus the gap that follows it
    pub fn footprint(&self) -> u16 {
        self.card_width.saturating_add(self.card_gap)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            stagger_step_ms: default_stagger_step_ms(),
        }
    }
}

impl RevealConfig {
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.stagger_step_ms)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            min_display_ms: default_loader_min_display_ms(),
            fallback_ms: default_loader_fallback_ms(),
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            particle_count: default_particle_count(),
            particle_spawn_interval_ms: default_particle_spawn_interval_ms(),
            particle_min_life_ms: default_particle_min_life_ms(),
            particle_life_jitter_ms: default_particle_life_jitter_ms(),
            confetti_count: default_confetti_count(),
            confetti_life_ms: default_confetti_life_ms(),
            count_up_duration_ms: default_count_up_duration_ms(),
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_threshold: default_header_threshold(),
            step: default_scroll_step(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        // Parse from embedded default config.toml
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            eprintln!("Failed to parse embedded config.toml: {}", e);
            Self {
                ui: UiConfig::default(),
                carousel: CarouselConfig::default(),
                reveal: RevealConfig::default(),
                loader: LoaderConfig::default(),
                effects: EffectsConfig::default(),
                scroll: ScrollConfig::default(),
                keybinds: default_keybinds(),
            }
        })
    }
}

impl Config {
    /// Load config from the data directory, extracting defaults first
    pub fn load() -> Result<Self> {
        Self::extract_defaults()?;
        let config_path = Self::config_path()?;
        Self::load_from_file(&config_path)
    }

    /// Load config from an explicit path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        Self::extract_defaults()?;
        Self::load_from_file(path)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let config = Self::parse(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        for (key, action) in &config.keybinds {
            if parse_key_string(key).is_none() {
                tracing::warn!("Ignoring unparseable keybind key '{}'", key);
            } else if PageAction::from_str(action).is_none() {
                tracing::warn!("Ignoring unknown action '{}' bound to '{}'", action, key);
            }
        }
        Ok(config)
    }

    /// Resolve the keybinds table into a lookup map, skipping bad entries
    pub fn keybind_map(&self) -> HashMap<(KeyCode, KeyModifiers), PageAction> {
        self.keybinds
            .iter()
            .filter_map(|(key, action)| {
                let (code, modifiers) = parse_key_string(key)?;
                let action = PageAction::from_str(action)?;
                Some((normalize_key(code, modifiers), action))
            })
            .collect()
    }

    /// Write embedded defaults into the data directory. Idempotent: existing
    /// files are never overwritten.
    pub fn extract_defaults() -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir).context(format!("Failed to create {:?}", dir))?;

        for file in DEFAULTS_DIR.files() {
            let filename = file
                .path()
                .file_name()
                .and_then(|n| n.to_str())
                .context("Invalid default filename")?;
            let target = dir.join(filename);

            if !target.exists() {
                let content = file
                    .contents_utf8()
                    .context(format!("Failed to read embedded {}", filename))?;
                fs::write(&target, content).context(format!("Failed to write {}", filename))?;
                tracing::info!("Extracted {} to {:?}", filename, target);
            }
        }
        Ok(())
    }

    /// Get the data directory (~/.joys-landing/), overridable with
    /// JOYS_LANDING_DIR
    fn config_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".joys-landing"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn page_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("page.toml"))
    }
}

fn default_poll_timeout_ms() -> u64 {
    16
}

fn default_page_padding() -> u16 {
    2
}

fn default_mobile_width() -> u16 {
    70
}

fn default_card_width() -> u16 {
    34
}

fn default_card_gap() -> u16 {
    2
}

fn default_swipe_threshold() -> i32 {
    5
}

fn default_stagger_step_ms() -> u64 {
    100
}

fn default_loader_min_display_ms() -> u64 {
    500
}

fn default_loader_fallback_ms() -> u64 {
    3000
}

fn default_particle_count() -> usize {
    15
}

fn default_particle_spawn_interval_ms() -> u64 {
    2000
}

fn default_particle_min_life_ms() -> u64 {
    15_000
}

fn default_particle_life_jitter_ms() -> u64 {
    10_000
}

fn default_confetti_count() -> usize {
    30
}

fn default_confetti_life_ms() -> u64 {
    1200
}

fn default_count_up_duration_ms() -> u64 {
    2000
}

fn default_header_threshold() -> u16 {
    3
}

fn default_scroll_step() -> u16 {
    1
}

fn default_true() -> bool {
    true
}

pub fn default_keybinds() -> HashMap<String, String> {
    [
        ("q", "quit"),
        ("ctrl+c", "quit"),
        ("up", "scroll_up"),
        ("k", "scroll_up"),
        ("down", "scroll_down"),
        ("j", "scroll_down"),
        ("pageup", "page_up"),
        ("pagedown", "page_down"),
        ("home", "top"),
        ("end", "bottom"),
        ("tab", "focus_next"),
        ("shift+tab", "focus_prev"),
        ("left", "left"),
        ("h", "left"),
        ("right", "right"),
        ("l", "right"),
        ("[", "up"),
        ("]", "down"),
        ("enter", "activate"),
        ("space", "activate"),
        ("/", "search"),
        ("r", "lab_report"),
        ("m", "toggle_menu"),
        ("esc", "close"),
        ("b", "buy"),
        ("1", "jump:hero"),
        ("2", "jump:benefits"),
        ("3", "jump:ingredients"),
        ("4", "jump:dosage"),
        ("5", "jump:reviews"),
        ("6", "jump:faq"),
        ("7", "jump:cta"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
