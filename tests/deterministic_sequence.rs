use grid_snake::config::EngineConfig;
use grid_snake::direction::Direction;
use grid_snake::engine::{SimulationEngine, TickOutcome};
use grid_snake::grid::Cell;

fn row_snake(row: i32, cols: std::ops::Range<i32>) -> Vec<Cell> {
    cols.map(|col| Cell::new(row, col)).collect()
}

#[test]
fn stepwise_food_collection_turn_and_wall_collision() {
    let initial = row_snake(1, 0..2);
    let mut engine = SimulationEngine::with_seed(
        EngineConfig {
            rows: 4,
            cols: 6,
            initial_snake: initial.clone(),
            initial_food: vec![Cell::new(1, 2)],
            ..EngineConfig::default()
        },
        42,
    )
    .expect("valid config");

    let result = engine.tick().expect("tick succeeds");
    assert_eq!(result.outcome, TickOutcome::Advanced { ate: true });
    assert_eq!(result.snapshot.snake, row_snake(1, 0..3));
    assert_eq!(result.snapshot.speed, 10.5);

    engine.request_direction(Direction::Up);
    let result = engine.tick().expect("tick succeeds");
    let TickOutcome::Advanced { ate } = result.outcome else {
        panic!("turning up from row 1 stays on the board");
    };
    assert_eq!(result.snapshot.head(), Some(Cell::new(0, 2)));
    assert_eq!(result.snapshot.snake.len(), 3 + usize::from(ate));

    let result = engine.tick().expect("tick succeeds");
    assert_eq!(result.outcome, TickOutcome::OutOfBounds);
    assert_eq!(result.snapshot.snake, initial);
    assert_eq!(result.snapshot.direction, Direction::Right);
    assert_eq!(result.snapshot.speed, 10.0);
    assert!(result.snapshot.food.contains(&Cell::new(1, 2)));
}

#[test]
fn default_board_runs_off_the_right_edge() {
    let config = EngineConfig {
        rows: 10,
        cols: 10,
        ..EngineConfig::default()
    };
    let initial = config.initial_snake.clone();
    let mut engine = SimulationEngine::with_seed(config, 1).expect("valid config");

    assert_eq!(engine.snapshot().head(), Some(Cell::new(0, 9)));

    let result = engine.tick().expect("tick succeeds");

    assert_eq!(result.outcome, TickOutcome::OutOfBounds);
    assert_eq!(result.snapshot.snake, initial);
    assert_eq!(result.snapshot.direction, Direction::Right);
    assert_eq!(result.snapshot.speed, 10.0);
}

#[test]
fn same_seed_replays_identically() {
    let config = EngineConfig {
        rows: 15,
        cols: 15,
        food_count: 4,
        ..EngineConfig::default()
    };
    let turns = [
        Direction::Down,
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];

    let replay = |seed: u64| {
        let mut engine =
            SimulationEngine::with_seed(config.clone(), seed).expect("valid config");
        let mut snapshots = Vec::new();
        for step in 0..60 {
            if step % 4 == 0 {
                engine.request_direction(turns[(step / 4) % turns.len()]);
            }
            snapshots.push(engine.tick().expect("tick succeeds").snapshot);
        }
        snapshots
    };

    assert_eq!(replay(7), replay(7));
}

#[test]
fn snake_keeps_straight_when_reversal_requested_every_tick() {
    let mut engine = SimulationEngine::with_seed(
        EngineConfig {
            rows: 5,
            cols: 20,
            initial_snake: row_snake(2, 0..3),
            initial_food: vec![Cell::new(0, 0)],
            ..EngineConfig::default()
        },
        3,
    )
    .expect("valid config");

    for expected_col in 3..10 {
        engine.request_direction(Direction::Left);
        let result = engine.tick().expect("tick succeeds");
        assert_eq!(result.snapshot.direction, Direction::Right);
        assert_eq!(result.snapshot.head(), Some(Cell::new(2, expected_col)));
    }
}
