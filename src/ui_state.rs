//src/ui_state.rs

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::Result;

/// Position of the floating chat window, in CSS pixels from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidgetPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidgetSize {
    pub width: f64,
    pub height: f64,
}

/// Dashboard layout state that survives a page reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetState {
    pub chat_open: bool,
    pub chat_position: Option<WidgetPosition>,
    pub chat_size: WidgetSize,
    pub sidebar_open: bool,
    pub input_open: bool,
    /// `None` follows the system color scheme
    pub dark_mode: Option<bool>,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            chat_open: false,
            chat_position: None,
            chat_size: WidgetSize {
                width: 380.0,
                height: 520.0,
            },
            sidebar_open: true,
            input_open: true,
            dark_mode: None,
        }
    }
}

/// Load/save boundary for [`WidgetState`].
pub trait StatePort {
    /// `Ok(None)` when nothing was saved yet.
    fn load(&self) -> Result<Option<WidgetState>>;
    fn save(&self, state: &WidgetState) -> Result<()>;
}

/// Load saved state, falling back to defaults when it is missing or unreadable.
pub fn load_or_default(port: &dyn StatePort) -> WidgetState {
    match port.load() {
        Ok(Some(state)) => state,
        Ok(None) => WidgetState::default(),
        Err(e) => {
            log::warn!("Ignoring unreadable widget state: {e}");
            WidgetState::default()
        }
    }
}

/// Keeps state as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStatePort {
    path: PathBuf,
}

impl JsonFileStatePort {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatePort for JsonFileStatePort {
    fn load(&self) -> Result<Option<WidgetState>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&self, state: &WidgetState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(state)?)?;
        log::debug!("Saved widget state to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the serialized state in memory, like browser local storage would.
#[derive(Debug, Default)]
pub struct MemoryStatePort {
    slot: Mutex<Option<String>>,
}

impl MemoryStatePort {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatePort for MemoryStatePort {
    fn load(&self) -> Result<Option<WidgetState>> {
        match self.slot.lock().as_deref() {
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &WidgetState) -> Result<()> {
        *self.slot.lock() = Some(serde_json::to_string(state)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved_state() -> WidgetState {
        WidgetState {
            chat_open: true,
            chat_position: Some(WidgetPosition { x: 120.0, y: 64.5 }),
            dark_mode: Some(true),
            ..WidgetState::default()
        }
    }

    #[test]
    fn test_memory_port_round_trip() {
        let port = MemoryStatePort::new();
        assert_eq!(load_or_default(&port), WidgetState::default());

        port.save(&moved_state()).unwrap();
        assert_eq!(load_or_default(&port), moved_state());
    }

    #[test]
    fn test_file_port_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let port = JsonFileStatePort::new(dir.path().join("nested").join("widget.json"));
        assert!(port.load().unwrap().is_none());

        port.save(&moved_state()).unwrap();
        assert_eq!(port.load().unwrap(), Some(moved_state()));
    }

    #[test]
    fn test_corrupt_state_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(load_or_default(&JsonFileStatePort::new(path)), WidgetState::default());
    }

    #[test]
    fn test_partial_state_uses_defaults() {
        let state: WidgetState = serde_json::from_str(r#"{"chat_open": true}"#).unwrap();
        assert!(state.chat_open);
        assert!(state.sidebar_open);
        assert_eq!(state.chat_size.width, 380.0);
    }
}
