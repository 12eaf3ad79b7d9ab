#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Walker engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. The geometric vocabulary used by every layer lives here as well:
//! the world/pixel [`Viewport`] transform and the [`Obstacle`] polygons the
//! maze is built from.

pub mod geometry;
pub mod transform;

use std::{fmt, str::FromStr};

pub use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use geometry::{BoundingBox, GeometryError, Obstacle, ObstacleKind};
pub use transform::Viewport;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Walker.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces every obstacle in the world and respawns the ego.
    LoadMaze {
        /// Walls and panels that compose the new maze.
        obstacles: Vec<Obstacle>,
        /// World-space position the ego is placed at.
        start: DVec2,
    },
    /// Assigns a new destination to the ego, transitioning it to moving.
    SetDestination {
        /// World-space point the ego should walk toward.
        destination: DVec2,
    },
    /// Clears the ego's destination, if any.
    CancelDestination,
    /// Advances the ego a single step toward its destination.
    StepEgo,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a new maze replaced the previous one.
    MazeLoaded {
        /// Number of static walls contained in the maze.
        walls: usize,
        /// Number of collectible panels contained in the maze.
        panels: usize,
        /// Position the ego was spawned at.
        start: DVec2,
    },
    /// Confirms that the ego received a destination.
    DestinationSet {
        /// World-space point the ego walks toward.
        destination: DVec2,
    },
    /// Confirms that the ego's destination was cleared on request.
    DestinationCleared,
    /// Confirms that the ego moved without hitting a wall.
    EgoMoved {
        /// Position before the step.
        from: DVec2,
        /// Position after the step.
        to: DVec2,
    },
    /// Reports that the step would have entered a wall and was reverted.
    EgoBlocked {
        /// Position the ego was reverted to.
        at: DVec2,
    },
    /// Reports that the ego reached its destination.
    EgoArrived {
        /// Final position of the ego.
        at: DVec2,
    },
    /// Reports that the ego collected an interactive panel.
    PanelCollected {
        /// Identifier of the panel that was triggered.
        obstacle: ObstacleId,
        /// Score after the collection.
        score: u32,
    },
}

/// Identifier of an obstacle, stable for the lifetime of a loaded maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(u32);

impl ObstacleId {
    /// Creates a new obstacle identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// RGBA color with byte channels.
///
/// Colors read from configuration files use CSS-style hex notation, either
/// `#RRGGBB` or `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
}

impl Color {
    /// Creates an opaque color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba(red, green, blue, 0xff)
    }

    /// Creates a color from byte RGBA components.
    #[must_use]
    pub const fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Alpha component of the color, where `0xff` is fully opaque.
    #[must_use]
    pub const fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Channels in RGBA byte order.
    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)?;
        if self.alpha != 0xff {
            write!(f, "{:02X}", self.alpha)?;
        }
        Ok(())
    }
}

/// Errors raised when parsing a hex color string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string did not start with `#`.
    #[error("color '{0}' must start with '#'")]
    MissingHash(String),
    /// The string had neither six nor eight hex digits.
    #[error("color '{0}' must have 6 or 8 hex digits")]
    InvalidLength(String),
    /// The string contained a non-hex character.
    #[error("color '{0}' contains a non-hex digit")]
    InvalidDigit(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(trimmed.to_owned()))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::InvalidLength(trimmed.to_owned()));
        }
        if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(trimmed.to_owned()));
        }

        let channel = |index: usize| {
            digits
                .get(index..index + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ColorParseError::InvalidDigit(trimmed.to_owned()))
        };

        let alpha = if digits.len() == 8 { channel(6)? } else { 0xff };
        Ok(Self::from_rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
