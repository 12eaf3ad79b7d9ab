#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Walker.
//!
//! The world owns the ego and every obstacle of the loaded maze. It is only
//! mutated through [`apply`], which enforces the collision and collectible
//! rules and reports what happened as [`Event`] values.

mod ego;

use log::{debug, info};
use maze_walker_core::{Command, DVec2, Event, Obstacle, ObstacleId, WELCOME_BANNER};

pub use ego::{Ego, ARRIVAL_TOLERANCE_SQUARED, EGO_SPEED};

/// Represents the authoritative Maze Walker world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    ego: Ego,
    obstacles: Vec<Obstacle>,
    start: DVec2,
    score: u32,
}

impl World {
    /// Creates an empty world with the ego idle at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            ego: Ego::new(DVec2::ZERO),
            obstacles: Vec::new(),
            start: DVec2::ZERO,
            score: 0,
        }
    }

    fn blocking_obstacle_at(&self, position: DVec2) -> Option<usize> {
        self.obstacles
            .iter()
            .position(|obstacle| obstacle.blocks_movement() && obstacle.contains_point(position))
    }

    fn collect_panels_at(&mut self, position: DVec2, out_events: &mut Vec<Event>) {
        for (index, obstacle) in self.obstacles.iter_mut().enumerate() {
            if !obstacle.is_collectible() || !obstacle.contains_point(position) {
                continue;
            }
            if obstacle.trigger() {
                self.score = self.score.saturating_add(1);
                let id = obstacle_id(index);
                info!("collected panel {} (score {})", id.get(), self.score);
                out_events.push(Event::PanelCollected {
                    obstacle: id,
                    score: self.score,
                });
            }
        }
    }

    fn step_ego(&mut self, out_events: &mut Vec<Event>) {
        if self.ego.destination().is_none() {
            return;
        }
        if self.ego.is_at_destination() {
            self.ego.clear_destination();
            out_events.push(Event::EgoArrived {
                at: self.ego.position(),
            });
            return;
        }

        let from = self.ego.position();
        self.ego.step_toward_destination();
        let to = self.ego.position();

        if let Some(index) = self.blocking_obstacle_at(to) {
            debug!(
                "step to ({:.3}, {:.3}) blocked by wall {index}; reverting",
                to.x, to.y
            );
            self.ego.set_position(from);
            self.ego.clear_destination();
            out_events.push(Event::EgoBlocked { at: from });
            return;
        }

        out_events.push(Event::EgoMoved { from, to });
        self.collect_panels_at(to, out_events);

        if self.ego.is_at_destination() {
            self.ego.clear_destination();
            out_events.push(Event::EgoArrived { at: to });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadMaze { obstacles, start } => {
            let walls = obstacles
                .iter()
                .filter(|obstacle| obstacle.blocks_movement())
                .count();
            let panels = obstacles.len() - walls;
            debug!(
                "loading maze with {walls} walls and {panels} panels, start ({:.2}, {:.2})",
                start.x, start.y
            );

            world.obstacles = obstacles;
            world.start = start;
            world.ego = Ego::new(start);
            world.score = 0;
            out_events.push(Event::MazeLoaded {
                walls,
                panels,
                start,
            });
        }
        Command::SetDestination { destination } => {
            world.ego.set_destination(destination);
            out_events.push(Event::DestinationSet { destination });
        }
        Command::CancelDestination => {
            world.ego.clear_destination();
            out_events.push(Event::DestinationCleared);
        }
        Command::StepEgo => world.step_ego(out_events),
    }
}

fn obstacle_id(index: usize) -> ObstacleId {
    ObstacleId::new(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{obstacle_id, World};
    use maze_walker_core::{DVec2, Obstacle, ObstacleId};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Current world-space position of the ego.
    #[must_use]
    pub fn ego_position(world: &World) -> DVec2 {
        world.ego.position()
    }

    /// Destination the ego is walking toward, if any.
    #[must_use]
    pub fn ego_destination(world: &World) -> Option<DVec2> {
        world.ego.destination()
    }

    /// Every obstacle of the loaded maze, in load order.
    #[must_use]
    pub fn obstacles(world: &World) -> &[Obstacle] {
        &world.obstacles
    }

    /// Looks up an obstacle by the identifier reported in events.
    #[must_use]
    pub fn obstacle(world: &World, id: ObstacleId) -> Option<&Obstacle> {
        world.obstacles.get(usize::try_from(id.get()).ok()?)
    }

    /// Enumerates the panels that can still be collected.
    #[must_use]
    pub fn collectible_panels(world: &World) -> Vec<ObstacleId> {
        world
            .obstacles
            .iter()
            .enumerate()
            .filter(|(_, obstacle)| obstacle.is_collectible())
            .map(|(index, _)| obstacle_id(index))
            .collect()
    }

    /// Number of panels collected since the maze was loaded.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Spawn position of the loaded maze.
    #[must_use]
    pub fn start(world: &World) -> DVec2 {
        world.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_walker_core::{BoundingBox, Color, ObstacleKind};

    const WALL: Color = Color::from_rgb(0x10, 0x10, 0x10);
    const PANEL: Color = Color::from_rgba(0xeb, 0x23, 0xd0, 0x88);

    fn rect(min: (f64, f64), max: (f64, f64), kind: ObstacleKind) -> Obstacle {
        let color = match kind {
            ObstacleKind::StaticWall => WALL,
            ObstacleKind::InteractivePanel { .. } => PANEL,
        };
        Obstacle::rectangle(
            BoundingBox::new(DVec2::new(min.0, min.1), DVec2::new(max.0, max.1)),
            color,
            kind,
        )
    }

    fn loaded(obstacles: Vec<Obstacle>) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadMaze {
                obstacles,
                start: DVec2::ZERO,
            },
            &mut events,
        );
        world
    }

    #[test]
    fn load_maze_reports_counts_and_resets_ego() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetDestination {
                destination: DVec2::new(4.0, 4.0),
            },
            &mut events,
        );
        events.clear();

        let start = DVec2::new(0.5, -0.5);
        apply(
            &mut world,
            Command::LoadMaze {
                obstacles: vec![
                    rect((1.0, 0.0), (2.0, 1.0), ObstacleKind::StaticWall),
                    rect((3.0, 0.0), (4.0, 1.0), ObstacleKind::StaticWall),
                    rect(
                        (5.0, 0.0),
                        (6.0, 1.0),
                        ObstacleKind::InteractivePanel { active: true },
                    ),
                ],
                start,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::MazeLoaded {
                walls: 2,
                panels: 1,
                start,
            }]
        );
        assert_eq!(query::ego_position(&world), start);
        assert_eq!(query::ego_destination(&world), None);
        assert_eq!(query::start(&world), start);
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::obstacles(&world).len(), 3);
    }

    #[test]
    fn step_moves_toward_destination() {
        let mut world = loaded(Vec::new());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetDestination {
                destination: DVec2::new(10.0, 0.0),
            },
            &mut events,
        );
        apply(&mut world, Command::StepEgo, &mut events);

        assert_eq!(
            events,
            vec![
                Event::DestinationSet {
                    destination: DVec2::new(10.0, 0.0),
                },
                Event::EgoMoved {
                    from: DVec2::ZERO,
                    to: DVec2::new(0.2, 0.0),
                },
            ]
        );
    }

    #[test]
    fn step_into_wall_reverts_and_clears_destination() {
        let wall = rect((0.1, -1.0), (0.5, 1.0), ObstacleKind::StaticWall);
        let mut world = loaded(vec![wall]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetDestination {
                destination: DVec2::new(3.0, 0.0),
            },
            &mut events,
        );
        events.clear();

        apply(&mut world, Command::StepEgo, &mut events);

        assert_eq!(events, vec![Event::EgoBlocked { at: DVec2::ZERO }]);
        assert_eq!(query::ego_position(&world), DVec2::ZERO);
        assert_eq!(query::ego_destination(&world), None);

        events.clear();
        apply(&mut world, Command::StepEgo, &mut events);
        assert!(events.is_empty(), "idle ego must not move");
    }

    #[test]
    fn panels_are_collected_once_and_never_block() {
        let mut world = loaded(vec![rect(
            (0.1, -0.5),
            (0.9, 0.5),
            ObstacleKind::InteractivePanel { active: true },
        )]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetDestination {
                destination: DVec2::new(2.0, 0.0),
            },
            &mut events,
        );
        for _ in 0..10 {
            apply(&mut world, Command::StepEgo, &mut events);
        }

        let collected: Vec<_> = events
            .iter()
            .filter(|event| matches!(event, Event::PanelCollected { .. }))
            .collect();
        assert_eq!(
            collected,
            vec![&Event::PanelCollected {
                obstacle: ObstacleId::new(0),
                score: 1,
            }]
        );
        assert_eq!(query::score(&world), 1);
        assert!(query::collectible_panels(&world).is_empty());
        assert_eq!(
            query::obstacle(&world, ObstacleId::new(0)).map(Obstacle::kind),
            Some(ObstacleKind::InteractivePanel { active: false })
        );
        assert!(events
            .iter()
            .all(|event| !matches!(event, Event::EgoBlocked { .. })));
    }

    #[test]
    fn arrival_is_reported_and_clears_destination() {
        let mut world = loaded(Vec::new());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetDestination {
                destination: DVec2::new(0.0, 0.35),
            },
            &mut events,
        );
        events.clear();

        apply(&mut world, Command::StepEgo, &mut events);
        assert_eq!(
            events,
            vec![Event::EgoMoved {
                from: DVec2::ZERO,
                to: DVec2::new(0.0, 0.2),
            }]
        );

        events.clear();
        apply(&mut world, Command::StepEgo, &mut events);
        assert_eq!(
            events,
            vec![
                Event::EgoMoved {
                    from: DVec2::new(0.0, 0.2),
                    to: DVec2::new(0.0, 0.35),
                },
                Event::EgoArrived {
                    at: DVec2::new(0.0, 0.35),
                },
            ]
        );
        assert_eq!(query::ego_destination(&world), None);
    }

    #[test]
    fn destination_within_tolerance_arrives_without_moving() {
        let mut world = loaded(Vec::new());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetDestination {
                destination: DVec2::new(0.05, 0.0),
            },
            &mut events,
        );
        events.clear();

        apply(&mut world, Command::StepEgo, &mut events);
        assert_eq!(events, vec![Event::EgoArrived { at: DVec2::ZERO }]);
        assert_eq!(query::ego_destination(&world), None);
    }

    #[test]
    fn cancel_destination_stops_the_ego() {
        let mut world = loaded(Vec::new());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetDestination {
                destination: DVec2::new(5.0, 5.0),
            },
            &mut events,
        );
        apply(&mut world, Command::CancelDestination, &mut events);
        apply(&mut world, Command::StepEgo, &mut events);

        assert_eq!(events.last(), Some(&Event::DestinationCleared));
        assert_eq!(query::ego_position(&world), DVec2::ZERO);
    }

    #[test]
    fn banner_is_exposed() {
        let world = World::new();
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }
}
