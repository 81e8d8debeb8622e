//! Chat room configuration.
//!
//! Values come from a key lookup: process environment during server
//! rendering and tests, `localStorage` in the browser. Every key is optional.
//!
//! - `CHAT_DISCONNECT_WARNING`: warning text on disconnect (default `Disconnected`)
//! - `CHAT_FOCUS_DETECTION`: `force`, `wait` (default), `delay` or `none`
//! - `CHAT_SCROLL_DETECTION`: same modes, default `wait`
//! - `CHAT_BOTTOM_TOLERANCE_PX`: pixels from the bottom still treated as bottom (default 0)
//! - `CHAT_HISTORY_LIMIT`: messages kept by the in-memory service (default 500)

use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::net::in_memory::DEFAULT_HISTORY_LIMIT;
use crate::util::deferred::ChangeDetection;

pub const DEFAULT_DISCONNECT_WARNING: &str = "Disconnected";
pub const DEFAULT_BOTTOM_TOLERANCE_PX: i32 = 0;

const KEY_DISCONNECT_WARNING: &str = "CHAT_DISCONNECT_WARNING";
const KEY_FOCUS_DETECTION: &str = "CHAT_FOCUS_DETECTION";
const KEY_SCROLL_DETECTION: &str = "CHAT_SCROLL_DETECTION";
const KEY_BOTTOM_TOLERANCE_PX: &str = "CHAT_BOTTOM_TOLERANCE_PX";
const KEY_HISTORY_LIMIT: &str = "CHAT_HISTORY_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    pub disconnect_warning: String,
    pub focus_detection: ChangeDetection,
    pub scroll_detection: ChangeDetection,
    pub bottom_tolerance_px: i32,
    pub history_limit: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            disconnect_warning: DEFAULT_DISCONNECT_WARNING.to_owned(),
            focus_detection: ChangeDetection::WaitForDetection,
            scroll_detection: ChangeDetection::WaitForDetection,
            bottom_tolerance_px: DEFAULT_BOTTOM_TOLERANCE_PX,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ChatConfig {
    /// Build config from an arbitrary key lookup.
    ///
    /// Unknown detection modes are errors; unparseable numbers fall back to
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ChatError> {
        let defaults = Self::default();

        let disconnect_warning = lookup(KEY_DISCONNECT_WARNING)
            .filter(|w| !w.trim().is_empty())
            .unwrap_or(defaults.disconnect_warning);
        let focus_detection = parse_detection(lookup(KEY_FOCUS_DETECTION).as_deref(), defaults.focus_detection)?;
        let scroll_detection = parse_detection(lookup(KEY_SCROLL_DETECTION).as_deref(), defaults.scroll_detection)?;
        let bottom_tolerance_px = lookup_parse(&lookup, KEY_BOTTOM_TOLERANCE_PX, defaults.bottom_tolerance_px)
            .saturating_abs();
        let history_limit = lookup_parse(&lookup, KEY_HISTORY_LIMIT, defaults.history_limit).max(1);

        Ok(Self { disconnect_warning, focus_detection, scroll_detection, bottom_tolerance_px, history_limit })
    }

    /// Build config from process environment variables.
    pub fn from_env() -> Result<Self, ChatError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from the browser's `localStorage`.
    ///
    /// Falls back to defaults when storage is unavailable.
    #[cfg(feature = "hydrate")]
    pub fn from_local_storage() -> Result<Self, ChatError> {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        let Some(storage) = storage else {
            return Ok(Self::default());
        };
        Self::from_lookup(|key| storage.get_item(key).ok().flatten())
    }

    /// Config for the current build, logging and falling back on errors.
    pub fn load() -> Self {
        #[cfg(feature = "hydrate")]
        let loaded = Self::from_local_storage();
        #[cfg(not(feature = "hydrate"))]
        let loaded = Self::from_env();

        loaded.unwrap_or_else(|e| {
            log::warn!("chat config invalid, using defaults: {e}");
            Self::default()
        })
    }
}

fn parse_detection(raw: Option<&str>, default: ChangeDetection) -> Result<ChangeDetection, ChatError> {
    match raw {
        Some(value) if !value.trim().is_empty() => value.parse(),
        _ => Ok(default),
    }
}

fn lookup_parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
