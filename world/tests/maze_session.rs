use maze_walker_core::{Command, DVec2, Event};
use maze_walker_system_maze_generation::{Maze, DEFAULT_PANEL_COLOR, DEFAULT_WALL_COLOR};
use maze_walker_world::{self as world, query, World};

fn load(world: &mut World, maze: &Maze) -> Vec<Event> {
    let mut obstacles = maze.walls(DEFAULT_WALL_COLOR);
    obstacles.extend(maze.panels(DEFAULT_PANEL_COLOR));
    let mut events = Vec::new();
    world::apply(
        world,
        Command::LoadMaze {
            obstacles,
            start: maze.start_position(),
        },
        &mut events,
    );
    events
}

fn walk(world: &mut World, destination: DVec2, steps: usize) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::SetDestination { destination }, &mut events);
    for _ in 0..steps {
        world::apply(world, Command::StepEgo, &mut events);
    }
    events
}

#[test]
fn single_tile_maze_keeps_ego_inside() {
    let maze = Maze::from_seed(1, 1, 9);
    let mut world = World::new();
    let loaded = load(&mut world, &maze);
    assert_eq!(
        loaded,
        vec![Event::MazeLoaded {
            walls: 4,
            panels: 0,
            start: DVec2::ZERO,
        }]
    );

    let events = walk(&mut world, DVec2::new(5.0, 0.0), 50);
    let moved = events
        .iter()
        .filter(|event| matches!(event, Event::EgoMoved { .. }))
        .count();
    assert_eq!(moved, 2);
    assert!(events.contains(&Event::EgoBlocked {
        at: DVec2::new(0.4, 0.0),
    }));
    assert_eq!(query::ego_position(&world), DVec2::new(0.4, 0.0));
    assert_eq!(query::ego_destination(&world), None);
}

#[test]
fn ego_never_ends_a_step_inside_a_wall() {
    let maze = Maze::from_seed(6, 6, 1234);
    let mut world = World::new();
    let _ = load(&mut world, &maze);

    let targets = [
        DVec2::new(7.0, 3.0),
        DVec2::new(-4.0, -6.0),
        DVec2::new(0.3, 9.0),
        DVec2::new(-8.0, 1.0),
    ];
    for target in targets {
        let _ = walk(&mut world, target, 80);
        let position = query::ego_position(&world);
        assert!(query::obstacles(&world)
            .iter()
            .filter(|obstacle| obstacle.blocks_movement())
            .all(|wall| !wall.contains_point(position)));
        assert!(maze.outer_bounds().contains(position));
    }
}

#[test]
fn reloading_resets_score_and_position() {
    let maze = Maze::from_seed(20, 10, 5);
    let mut world = World::new();
    let _ = load(&mut world, &maze);
    let _ = walk(&mut world, DVec2::new(1.0, 1.0), 3);

    let events = load(&mut world, &maze);
    assert_eq!(
        events,
        vec![Event::MazeLoaded {
            walls: query::obstacles(&world).len() - 14,
            panels: 14,
            start: maze.start_position(),
        }]
    );
    assert_eq!(query::score(&world), 0);
    assert_eq!(query::ego_position(&world), maze.start_position());
    assert_eq!(query::collectible_panels(&world).len(), 14);
}
