//! TOML configuration file layered under the command-line flags.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use maze_walker_core::Color;
use maze_walker_rendering::{
    DEFAULT_EGO_COLOR, DEFAULT_FLOOR_EVEN, DEFAULT_FLOOR_ODD, DEFAULT_RANGE_X,
};
use maze_walker_system_maze_generation::{DEFAULT_PANEL_COLOR, DEFAULT_WALL_COLOR};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_TILES_X: u32 = 20;
const DEFAULT_TILES_Y: u32 = 10;
const DEFAULT_WINDOW_WIDTH: u32 = 960;
const DEFAULT_WINDOW_HEIGHT: u32 = 480;

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}", .path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration file {}", .path.display())]
    Parse {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying parser failure.
        #[source]
        source: toml::de::Error,
    },
    /// A tile count was zero.
    #[error("maze.{axis} must be at least 1")]
    ZeroTiles {
        /// Name of the offending setting.
        axis: &'static str,
    },
    /// A window dimension was zero.
    #[error("window.{axis} must be at least 1")]
    ZeroWindow {
        /// Name of the offending setting.
        axis: &'static str,
    },
    /// The camera range was not a positive finite number.
    #[error("camera.range_x must be positive (received {0})")]
    InvalidRange(f64),
}

/// Complete runtime configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WalkerConfig {
    pub(crate) maze: MazeSection,
    pub(crate) camera: CameraSection,
    pub(crate) palette: PaletteSection,
    pub(crate) window: WindowSection,
}

/// `[maze]` section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MazeSection {
    pub(crate) tiles_x: u32,
    pub(crate) tiles_y: u32,
    pub(crate) seed: Option<u64>,
    pub(crate) panels: bool,
}

impl Default for MazeSection {
    fn default() -> Self {
        Self {
            tiles_x: DEFAULT_TILES_X,
            tiles_y: DEFAULT_TILES_Y,
            seed: None,
            panels: true,
        }
    }
}

/// `[camera]` section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CameraSection {
    pub(crate) range_x: f64,
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            range_x: DEFAULT_RANGE_X,
        }
    }
}

/// `[palette]` section; every entry is a `#RRGGBB` or `#RRGGBBAA` string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PaletteSection {
    pub(crate) wall: Color,
    pub(crate) panel: Color,
    pub(crate) ego: Color,
    pub(crate) floor_even: Color,
    pub(crate) floor_odd: Color,
}

impl Default for PaletteSection {
    fn default() -> Self {
        Self {
            wall: DEFAULT_WALL_COLOR,
            panel: DEFAULT_PANEL_COLOR,
            ego: DEFAULT_EGO_COLOR,
            floor_even: DEFAULT_FLOOR_EVEN,
            floor_odd: DEFAULT_FLOOR_ODD,
        }
    }
}

/// `[window]` section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WindowSection {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) vsync: bool,
    pub(crate) background_cache: bool,
    pub(crate) show_fps: bool,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            vsync: true,
            background_cache: true,
            show_fps: false,
        }
    }
}

impl WalkerConfig {
    /// Reads and parses the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Rejects settings that cannot produce a playable maze.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.maze.tiles_x == 0 {
            return Err(ConfigError::ZeroTiles { axis: "tiles_x" });
        }
        if self.maze.tiles_y == 0 {
            return Err(ConfigError::ZeroTiles { axis: "tiles_y" });
        }
        if self.window.width == 0 {
            return Err(ConfigError::ZeroWindow { axis: "width" });
        }
        if self.window.height == 0 {
            return Err(ConfigError::ZeroWindow { axis: "height" });
        }
        let range = self.camera.range_x;
        if !range.is_finite() || range <= 0.0 {
            return Err(ConfigError::InvalidRange(range));
        }
        Ok(())
    }
}
