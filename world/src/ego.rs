//! Player-controlled token that walks toward a destination at fixed speed.

use maze_walker_core::DVec2;

/// Distance travelled by the ego in a single step, in world units.
pub const EGO_SPEED: f64 = 0.2;

/// Squared distance below which the ego counts as having arrived.
pub const ARRIVAL_TOLERANCE_SQUARED: f64 = 0.01;

/// Mobile entity owned by the world.
///
/// The ego is idle while it has no destination and moving otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Ego {
    position: DVec2,
    destination: Option<DVec2>,
}

impl Ego {
    /// Creates an idle ego at the provided position.
    #[must_use]
    pub const fn new(position: DVec2) -> Self {
        Self {
            position,
            destination: None,
        }
    }

    /// Current world-space position.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Destination the ego is walking toward, if any.
    #[must_use]
    pub const fn destination(&self) -> Option<DVec2> {
        self.destination
    }

    /// Assigns a destination, replacing any previous one.
    pub fn set_destination(&mut self, destination: DVec2) {
        self.destination = Some(destination);
    }

    /// Drops the destination. Calling it while idle has no effect.
    pub fn clear_destination(&mut self) {
        self.destination = None;
    }

    /// Teleports the ego without touching its destination.
    pub(crate) fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    /// Reports whether the ego has nowhere left to go.
    #[must_use]
    pub fn is_at_destination(&self) -> bool {
        match self.destination {
            None => true,
            Some(destination) => {
                destination.distance_squared(self.position) < ARRIVAL_TOLERANCE_SQUARED
            }
        }
    }

    /// Advances the ego by one step toward its destination.
    ///
    /// When the remaining distance is shorter than a step the ego lands
    /// exactly on the destination and becomes idle.
    pub fn step_toward_destination(&mut self) {
        if self.is_at_destination() {
            return;
        }
        let Some(destination) = self.destination else {
            return;
        };

        let remaining = destination - self.position;
        if remaining.length_squared() < EGO_SPEED * EGO_SPEED {
            self.position = destination;
            self.destination = None;
        } else {
            self.position += remaining.normalize() * EGO_SPEED;
        }
    }
}
