//! Per-run driver that owns the world and the movement system.

use log::debug;
use maze_walker_core::{Color, Command, Event};
use maze_walker_rendering::{Camera, FrameInput, Scene};
use maze_walker_system_maze_generation::Maze;
use maze_walker_system_movement::Movement;
use maze_walker_world::{self as world, query, World};

/// Colors used for the generated obstacles.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MazeColors {
    pub(crate) wall: Color,
    pub(crate) panel: Color,
}

/// Live game session created at startup and dropped at exit.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    movement: Movement,
    pending_events: Vec<Event>,
}

impl Session {
    /// Loads the maze's walls, and optionally its panels, into a fresh world.
    pub(crate) fn new(maze: &Maze, colors: MazeColors, panels: bool) -> Self {
        let mut obstacles = maze.walls(colors.wall);
        if panels {
            obstacles.extend(maze.panels(colors.panel));
        }

        let mut session = Self {
            world: World::new(),
            movement: Movement::new(),
            pending_events: Vec::new(),
        };
        session.submit(Command::LoadMaze {
            obstacles,
            start: maze.start_position(),
        });
        session
    }

    /// Builds the initial scene, centering the camera on the ego.
    pub(crate) fn scene(&self, ego_color: Color, range_x: f64) -> Scene {
        let ego = query::ego_position(&self.world);
        Scene::new(
            query::obstacles(&self.world).to_vec(),
            ego,
            ego_color,
            Camera::new(range_x, ego),
        )
    }

    /// Read-only access to the world for summaries and tests.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Translates the frame's input, resumes the movement system, and
    /// mirrors the resulting world state into the scene.
    pub(crate) fn update(&mut self, input: FrameInput, scene: &mut Scene) {
        if input.cancel {
            self.movement.cancel();
            self.submit(Command::CancelDestination);
        }
        if let Some(click) = input.click {
            let destination = input.viewport.to_world(click);
            debug!(
                "click at ({:.0}, {:.0}) targets ({:.2}, {:.2})",
                click.x, click.y, destination.x, destination.y
            );
            self.submit(Command::SetDestination { destination });
        }

        let mut commands = Vec::new();
        self.movement.handle(&self.pending_events, &mut commands);
        self.pending_events.clear();
        for command in commands {
            self.submit(command);
        }

        for event in &self.pending_events {
            let Event::PanelCollected { obstacle, .. } = event else {
                continue;
            };
            let Some(collected) = query::obstacle(&self.world, *obstacle) else {
                continue;
            };
            let slot = usize::try_from(obstacle.get())
                .ok()
                .and_then(|index| scene.obstacles.get_mut(index));
            if let Some(slot) = slot {
                *slot = collected.clone();
            }
        }

        let ego = query::ego_position(&self.world);
        scene.ego = ego;
        scene.camera.focus = ego;
        scene.score = query::score(&self.world);
    }

    fn submit(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.pending_events);
    }
}
