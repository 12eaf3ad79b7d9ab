#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-driven animation system that walks the ego toward its destination.
//!
//! The host resumes the system once per frame with the events produced since
//! the previous frame. While running it requests exactly one
//! [`Command::StepEgo`] per resumption; events that end a walk stop it.

use maze_walker_core::{Command, Event};

/// Pure system that reacts to world events and emits step commands.
#[derive(Debug, Default)]
pub struct Movement {
    running: bool,
}

impl Movement {
    /// Creates an idle movement system.
    #[must_use]
    pub const fn new() -> Self {
        Self { running: false }
    }

    /// Consumes world events and emits a step command while a walk is active.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::DestinationSet { .. } => self.running = true,
                Event::EgoArrived { .. }
                | Event::EgoBlocked { .. }
                | Event::DestinationCleared
                | Event::MazeLoaded { .. } => self.running = false,
                Event::EgoMoved { .. } | Event::PanelCollected { .. } => {}
            }
        }

        if self.running {
            out.push(Command::StepEgo);
        }
    }

    /// Reports whether a walk is in progress.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Stops the current walk without waiting for a world event.
    pub fn cancel(&mut self) {
        self.running = false;
    }
}
