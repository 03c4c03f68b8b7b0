use grid_snake::game::{CollisionType, Direction, GameConfig, GameState, Position, Snake};

fn snake(points: &[(i32, i32)], heading: Direction) -> Snake {
    let cells = points.iter().map(|&(x, y)| Position::new(x, y)).collect();
    Snake::from_cells(cells, heading).expect("non-empty snake")
}

fn fresh(seed: u64) -> GameState {
    GameState::new(&GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    })
}

#[test]
fn plain_move_keeps_length() {
    let mut state = GameState::with_snake(
        snake(&[(10, 10), (9, 10), (8, 10)], Direction::Right),
        Some(Position::new(0, 0)),
        25,
        1,
    );

    for _ in 0..5 {
        state.advance();
        assert!(state.is_alive);
        assert_eq!(state.snake.len(), 3);
    }
    assert_eq!(state.snake.head(), Position::new(15, 10));
}

#[test]
fn wall_collision_ends_round() {
    let mut state = GameState::with_snake(
        snake(&[(24, 12)], Direction::Right),
        Some(Position::new(0, 0)),
        25,
        2,
    );

    let info = state.advance();

    assert!(!state.is_alive, "moving off the right edge must end the round");
    assert_eq!(info.collision, Some(CollisionType::Wall));
}

#[test]
fn self_collision_ends_round() {
    let mut state = GameState::with_snake(
        snake(&[(5, 5), (5, 6), (5, 7), (5, 8)], Direction::Down),
        Some(Position::new(0, 0)),
        25,
        3,
    );

    let info = state.advance();

    assert!(!state.is_alive, "moving into own body must end the round");
    assert_eq!(info.collision, Some(CollisionType::SelfCollision));
}

#[test]
fn eating_fruit_grows_by_one() {
    let mut state = GameState::with_snake(
        snake(&[(10, 10)], Direction::Right),
        Some(Position::new(11, 10)),
        25,
        4,
    );

    let info = state.advance();

    assert!(info.ate_fruit);
    assert!(state.is_alive);
    assert_eq!(state.snake.len(), 2);
    assert_eq!(state.snake.head(), Position::new(11, 10));

    let fruit = state.fruit.expect("a fresh fruit is placed");
    assert!(state.is_in_bounds(fruit));
    assert!(!state.is_occupied_by_snake(fruit));
}

#[test]
fn reverse_heading_is_ignored() {
    for heading in Direction::ALL {
        let mut state = GameState::with_snake(
            snake(&[(12, 12)], heading),
            Some(Position::new(0, 0)),
            25,
            5,
        );

        state.set_heading(heading.opposite());
        assert_eq!(state.heading(), heading);
    }
}

#[test]
fn repeating_heading_is_idempotent() {
    let mut once = fresh(6);
    let mut twice = fresh(6);

    once.set_heading(Direction::Down);
    twice.set_heading(Direction::Down);
    twice.set_heading(Direction::Down);

    assert_eq!(once.heading(), twice.heading());
    assert_eq!(twice.heading(), Direction::Down);
}

#[test]
fn restart_restores_initial_configuration() {
    let mut state = GameState::with_snake(
        snake(&[(24, 12), (23, 12)], Direction::Right),
        Some(Position::new(0, 0)),
        25,
        7,
    );
    state.advance();
    assert!(!state.is_alive);

    state.restart();

    assert!(state.is_alive);
    assert_eq!(state.snake.cells(), &[Position::new(12, 12)]);
    assert_eq!(state.heading(), Direction::Right);
    let fruit = state.fruit.expect("fruit placed on restart");
    assert!(state.is_in_bounds(fruit));
    assert!(!state.is_occupied_by_snake(fruit));
}

#[test]
fn long_run_keeps_invariants() {
    let mut state = fresh(8);
    let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

    for tick in 0..2_000 {
        if !state.is_alive {
            state.restart();
        }
        if tick % 7 == 0 {
            state.set_heading(turns[(tick / 7) % turns.len()]);
        }

        let before = state.snake.len();
        let info = state.advance();
        if !state.is_alive {
            continue;
        }

        let expected = if info.ate_fruit { before + 1 } else { before };
        assert_eq!(state.snake.len(), expected);

        let mut cells = state.snake.cells().to_vec();
        cells.sort_by_key(|p| (p.x, p.y));
        cells.dedup();
        assert_eq!(cells.len(), state.snake.len(), "snake cells must be unique");

        if let Some(fruit) = state.fruit {
            assert!(!state.is_occupied_by_snake(fruit));
        }
    }
}
