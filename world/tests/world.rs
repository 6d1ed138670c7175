use maze_explorer_core::{
    CellCoord, Command, Direction, Event, MoveRejection, NpcId, WorldBuildError,
};
use maze_explorer_world::{advance_npc_dialogue, apply, query, Config, NpcSeed, StartRule, World};

fn fixed_world(width: u32, height: u32, seed: u64) -> World {
    World::new(
        Config::new(width, height, StartRule::Fixed(CellCoord::new(0, 0)), seed),
        Vec::new(),
    )
    .expect("world construction must succeed")
}

fn sample_roster() -> Vec<NpcSeed> {
    vec![
        NpcSeed::new(
            "Oberon",
            "A weathered legend studies you in silence.",
            vec![String::from("The walls listen."), String::from("Go east.")],
        ),
        NpcSeed::new(
            "Mira",
            "A miner waves from the shadows.",
            vec![String::from("Crystals sing down here.")],
        ),
    ]
}

fn open_pair_count(world: &World) -> u64 {
    let grid = query::grid(world);
    let size = grid.size();
    let mut openings = 0;
    for y in 0..size.height() {
        for x in 0..size.width() {
            let cell = CellCoord::new(x, y);
            for direction in [Direction::South, Direction::East] {
                if grid.neighbor(cell, direction).is_some() && !grid.has_wall(cell, direction) {
                    openings += 1;
                }
            }
        }
    }
    openings
}

fn reachable_cells(world: &World) -> usize {
    let grid = query::grid(world);
    let size = grid.size();
    let start = query::start_point(world);
    let mut seen = vec![false; size.cell_count() as usize];
    let mut frontier = vec![start];
    seen[(start.y() * size.width() + start.x()) as usize] = true;

    let mut reached = 0;
    while let Some(cell) = frontier.pop() {
        reached += 1;
        for direction in Direction::ALL {
            let Some(next) = grid.neighbor(cell, direction) else {
                continue;
            };
            if grid.has_wall(cell, direction) {
                continue;
            }
            let index = (next.y() * size.width() + next.x()) as usize;
            if !seen[index] {
                seen[index] = true;
                frontier.push(next);
            }
        }
    }
    reached
}

#[test]
fn generation_produces_a_spanning_tree() {
    for (width, height, seed) in [(5, 5, 1), (9, 4, 2), (2, 2, 3), (12, 7, 99)] {
        let world = fixed_world(width, height, seed);
        assert_eq!(
            open_pair_count(&world),
            u64::from(width) * u64::from(height) - 1,
            "{width}x{height} seed {seed}: opened wall pairs must equal cells - 1",
        );
        assert_eq!(
            reachable_cells(&world),
            (width * height) as usize,
            "{width}x{height} seed {seed}: every cell must be reachable from start",
        );
    }
}

#[test]
fn walls_stay_symmetric_after_generation_and_movement() {
    let mut world = fixed_world(6, 6, 17);
    let mut events = Vec::new();
    for direction in [Direction::South, Direction::East, Direction::North] {
        apply(&mut world, Command::Move { direction }, &mut events);
    }

    let grid = query::grid(&world);
    for y in 0..6 {
        for x in 0..6 {
            let cell = CellCoord::new(x, y);
            for direction in Direction::ALL {
                let Some(neighbor) = grid.neighbor(cell, direction) else {
                    continue;
                };
                assert_eq!(
                    grid.has_wall(cell, direction),
                    grid.has_wall(neighbor, direction.opposite()),
                    "one-sided wall between {cell:?} and {neighbor:?}",
                );
            }
        }
    }
}

#[test]
fn legal_moves_relocate_the_player_and_report_both_cells() {
    let mut world = fixed_world(5, 5, 7);
    let start = query::player_location(&world);
    let open = query::open_directions(&world);
    assert!(!open.is_empty(), "a 5x5 maze start cell must have a path");

    let direction = open[0];
    let mut events = Vec::new();
    apply(&mut world, Command::Move { direction }, &mut events);

    let destination = query::player_location(&world);
    assert_ne!(destination, start);
    assert_eq!(
        events,
        vec![Event::PlayerMoved {
            from: start,
            to: destination,
        }]
    );
}

#[test]
fn blocked_moves_leave_the_player_in_place_and_stay_idempotent() {
    let mut world = fixed_world(5, 5, 7);
    let start = query::player_location(&world);
    let open = query::open_directions(&world);
    let blocked = Direction::ALL
        .into_iter()
        .find(|direction| !open.contains(direction))
        .expect("a spanning tree start cell keeps at least one wall");

    for _ in 0..3 {
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Move { direction: blocked },
            &mut events,
        );
        assert_eq!(query::player_location(&world), start);
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::MoveRejected { from, direction, .. } => {
                assert_eq!(*from, start);
                assert_eq!(*direction, blocked);
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
    }
}

#[test]
fn moves_off_the_grid_are_rejected_as_out_of_bounds() {
    let mut world = fixed_world(1, 1, 0);
    for direction in Direction::ALL {
        let mut events = Vec::new();
        apply(&mut world, Command::Move { direction }, &mut events);
        assert_eq!(
            events,
            vec![Event::MoveRejected {
                from: CellCoord::new(0, 0),
                direction,
                reason: MoveRejection::OutOfBounds,
            }]
        );
        assert_eq!(query::player_location(&world), CellCoord::new(0, 0));
    }
}

#[test]
fn single_cell_worlds_keep_every_wall_and_no_paths() {
    let world = fixed_world(1, 1, 0);
    assert!(query::open_directions(&world).is_empty());
    let grid = query::grid(&world);
    for direction in Direction::ALL {
        assert!(grid.has_wall(CellCoord::new(0, 0), direction));
    }
}

#[test]
fn equal_configs_generate_identical_worlds() {
    let config = Config::new(8, 8, StartRule::Random, 4242);
    let first = World::new(config, sample_roster()).expect("world");
    let second = World::new(config, sample_roster()).expect("world");

    assert_eq!(query::start_point(&first), query::start_point(&second));
    assert_eq!(query::player_location(&first), query::player_location(&second));
    let first_grid = query::grid(&first);
    let second_grid = query::grid(&second);
    for y in 0..8 {
        for x in 0..8 {
            let cell = CellCoord::new(x, y);
            for direction in Direction::ALL {
                assert_eq!(
                    first_grid.has_wall(cell, direction),
                    second_grid.has_wall(cell, direction),
                    "wall mismatch at {cell:?}",
                );
            }
        }
    }
}

#[test]
fn starting_cell_carries_the_map_item_and_mining_activity() {
    let world = fixed_world(5, 5, 21);
    let view = query::location_view(&world);

    let item = view.item.expect("the start cell must hold the starting item");
    assert_eq!(item.name, "Map");
    assert_eq!(view.activities, vec![String::from("Mine for rare crystals")]);

    let inspection = query::inspect_item(&world).expect("inspectable item");
    assert!(inspection.starts_with("Map - An old map"));
    assert!(inspection.contains("Further Details:"));
}

#[test]
fn item_durability_floors_at_zero_across_apply_calls() {
    let mut world = fixed_world(4, 4, 3);

    for expected_remaining in (0..5).rev() {
        let mut events = Vec::new();
        apply(&mut world, Command::UseItem, &mut events);
        assert_eq!(
            events,
            vec![Event::ItemUsed {
                name: String::from("Map"),
                remaining: Some(expected_remaining),
                effect: Some(String::from("A hidden door opens somewhere in the maze.")),
            }]
        );
    }

    for _ in 0..2 {
        let mut events = Vec::new();
        apply(&mut world, Command::UseItem, &mut events);
        assert_eq!(
            events,
            vec![Event::ItemWornOut {
                name: String::from("Map"),
            }]
        );
    }
}

#[test]
fn interacting_runs_the_first_activity() {
    let mut world = fixed_world(4, 4, 3);
    let mut events = Vec::new();
    apply(&mut world, Command::Interact, &mut events);
    assert_eq!(
        events,
        vec![Event::ActivityPerformed {
            description: String::from("Mine for rare crystals"),
            outcome: String::from("You found some rare crystals!"),
        }]
    );
}

#[test]
fn acting_on_an_empty_cell_reports_missing_content() {
    let mut world = fixed_world(5, 5, 7);
    let open = query::open_directions(&world);
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::Move { direction: open[0] },
        &mut events,
    );

    events.clear();
    apply(&mut world, Command::UseItem, &mut events);
    assert_eq!(events, vec![Event::ItemMissing]);

    events.clear();
    apply(&mut world, Command::Interact, &mut events);
    assert_eq!(events, vec![Event::ActivityMissing]);

    assert_eq!(query::inspect_item(&world), None);
}

#[test]
fn first_npc_shares_the_start_cell() {
    let world = World::new(
        Config::new(6, 6, StartRule::Fixed(CellCoord::new(2, 3)), 5),
        sample_roster(),
    )
    .expect("world");

    let here = query::npcs_here(&world);
    assert!(here.contains(&NpcId::new(0)), "first NPC must start with the player");

    let view = query::location_view(&world);
    let oberon = view
        .npcs
        .iter()
        .find(|profile| profile.id == NpcId::new(0))
        .expect("profile for the first NPC");
    assert_eq!(oberon.name, "Oberon");
    assert_eq!(oberon.greeting, "A weathered legend studies you in silence.");
}

#[test]
fn npc_dialogue_advances_then_repeats_the_exhausted_line() {
    let mut world = World::new(
        Config::new(6, 6, StartRule::Fixed(CellCoord::new(0, 0)), 5),
        sample_roster(),
    )
    .expect("world");

    let id = NpcId::new(0);
    assert_eq!(
        advance_npc_dialogue(&mut world, id).as_deref(),
        Some("The walls listen.")
    );
    assert_eq!(advance_npc_dialogue(&mut world, id).as_deref(), Some("Go east."));
    assert_eq!(
        advance_npc_dialogue(&mut world, id).as_deref(),
        Some("I have told you all I know.")
    );
    assert_eq!(advance_npc_dialogue(&mut world, NpcId::new(9)), None);
}

#[test]
fn finish_point_follows_the_fixed_corner_convention() {
    let world = fixed_world(10, 8, 1);
    assert_eq!(query::finish_point(&world), CellCoord::new(8, 6));

    let tiny = fixed_world(1, 1, 1);
    assert_eq!(query::finish_point(&tiny), CellCoord::new(0, 0));
}

#[test]
fn zero_sized_configurations_are_rejected_before_generation() {
    let error = World::new(
        Config::new(0, 5, StartRule::Random, 1),
        Vec::new(),
    )
    .expect_err("zero width must fail");
    assert_eq!(error, WorldBuildError::EmptyGrid { width: 0, height: 5 });
}

#[test]
fn out_of_bounds_fixed_starts_are_rejected() {
    let error = World::new(
        Config::new(3, 3, StartRule::Fixed(CellCoord::new(3, 0)), 1),
        Vec::new(),
    )
    .expect_err("start outside the grid must fail");
    assert_eq!(
        error,
        WorldBuildError::StartOutOfBounds {
            x: 3,
            y: 0,
            width: 3,
            height: 3,
        }
    );
}
