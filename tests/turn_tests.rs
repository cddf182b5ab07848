//! Turn resolution tests.
//!
//! These drive a `Match` through scripted registers and check the
//! movement, pushing, hazard and victory rules end to end.

use robot_rally::board::{Board, Tile};
use robot_rally::cards::{Card, CardAction, CardPiles, RobotProgram};
use robot_rally::core::{
    ControllerKind, Direction, GameRng, GridPos, MatchConfig, RobotId, RobotMap, RobotSpawn,
    NUM_REGISTERS,
};
use robot_rally::events::{MatchEvent, MoveCause};
use robot_rally::robots::Robot;
use robot_rally::rules::{BlockReason, GameResult, Match, MatchState, Phase};

const A: RobotId = RobotId::new(0);
const B: RobotId = RobotId::new(1);
const C: RobotId = RobotId::new(2);

fn committed(cards: &[Card]) -> RobotProgram {
    let mut program = RobotProgram::new();
    program.set_hand(cards.iter().copied());
    for i in 0..cards.len() {
        program.select(i).unwrap();
    }
    program.commit();
    program
}

fn robot(x: i32, y: i32, facing: Direction) -> Robot {
    Robot::new(
        &RobotSpawn::new(GridPos::new(x, y), ControllerKind::Player).facing(facing),
        10,
        3,
    )
}

/// A match already in the executing phase with the given programs.
fn scripted(board: Board, robots: Vec<Robot>, programs: Vec<Vec<Card>>) -> Match {
    let state = MatchState {
        board,
        robots: RobotMap::from_vec(robots),
        programs: RobotMap::from_vec(programs.iter().map(|cards| committed(cards)).collect()),
        piles: CardPiles::shuffled(&mut GameRng::new(1)),
        phase: Phase::Executing,
        round: 1,
        register: 0,
        result: None,
    };
    Match::from_state(state, 1)
}

fn move1() -> Card {
    Card::new(CardAction::Move1, 500)
}

/// Test that selections fill registers left to right whatever the hand index.
#[test]
fn test_register_fifo() {
    let config = MatchConfig {
        robots: vec![RobotSpawn::new(GridPos::new(0, 0), ControllerKind::Player)],
        ..MatchConfig::default()
    };
    let mut game = Match::with_board(Board::new(10, 10), &config).unwrap();

    assert_eq!(game.select_card(A, 4), Ok(0));
    assert_eq!(game.select_card(A, 0), Ok(1));
    assert_eq!(game.select_card(A, 7), Ok(2));

    let registers = *game.program(A).unwrap().registers();
    assert_eq!(registers, [Some(4), Some(0), Some(7), None, None]);
}

/// Test that undo clears only the highest filled register.
#[test]
fn test_undo_lifo() {
    let config = MatchConfig {
        robots: vec![RobotSpawn::new(GridPos::new(0, 0), ControllerKind::Player)],
        ..MatchConfig::default()
    };
    let mut game = Match::with_board(Board::new(10, 10), &config).unwrap();
    for i in [2, 5, 1] {
        game.select_card(A, i).unwrap();
    }

    assert_eq!(game.undo_selection(A), Ok(2));
    assert_eq!(*game.program(A).unwrap().registers(), [Some(2), Some(5), None, None, None]);

    // The freed card can be placed again.
    assert_eq!(game.select_card(A, 1), Ok(2));
}

/// Test that a move stops at the board edge after the valid steps.
#[test]
fn test_movement_truncation() {
    let mut game = scripted(
        Board::new(10, 10),
        vec![robot(8, 0, Direction::North)],
        vec![vec![Card::new(CardAction::Move3, 800)]],
    );

    let report = game.resolve_register().unwrap();

    assert_eq!(game.robot(A).unwrap().pos, GridPos::new(9, 0));
    let outcome = report.cards[0].outcome;
    assert_eq!(outcome.steps_taken, 1);
    assert_eq!(outcome.blocked_by, Some(BlockReason::BoardEdge));
}

/// Test that a single step pushes a whole line of robots.
#[test]
fn test_push_domino() {
    let mut game = scripted(
        Board::new(10, 10),
        vec![
            robot(5, 5, Direction::North),
            robot(6, 5, Direction::East),
            robot(7, 5, Direction::West),
        ],
        vec![vec![move1()], vec![], vec![]],
    );

    game.resolve_register().unwrap();

    assert_eq!(game.robot(A).unwrap().pos, GridPos::new(6, 5));
    assert_eq!(game.robot(B).unwrap().pos, GridPos::new(7, 5));
    assert_eq!(game.robot(C).unwrap().pos, GridPos::new(8, 5));
    // Pushed robots keep their facing.
    assert_eq!(game.robot(B).unwrap().facing, Direction::East);

    let pushes = game
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, MatchEvent::RobotMoved { cause: MoveCause::Pushed, .. }))
        .count();
    assert_eq!(pushes, 2);
}

/// Test that pushing a robot into a pit is legal and costs it a life.
#[test]
fn test_pit_push() {
    let mut board = Board::new(10, 10);
    board.set_tile(GridPos::new(7, 5), Tile::pit());
    let mut victim = robot(6, 5, Direction::North);
    victim.respawn_pos = GridPos::new(0, 0);
    let mut game = scripted(board, vec![robot(5, 5, Direction::North), victim], vec![vec![move1()], vec![]]);

    let report = game.resolve_register().unwrap();

    assert!(report.cards[0].outcome.is_complete());
    let b = game.robot(B).unwrap();
    assert_eq!(b.lives, 2);
    assert_eq!(b.health, 10);
    assert_eq!(b.pos, GridPos::new(0, 0));

    let events = game.drain_events();
    assert!(events.contains(&MatchEvent::RobotMoved {
        robot: B,
        from: GridPos::new(6, 5),
        to: GridPos::new(7, 5),
        cause: MoveCause::Pushed,
    }));
    assert!(events.contains(&MatchEvent::RobotDamaged { robot: B, amount: 10, health: 0 }));
    assert!(events.contains(&MatchEvent::RobotRespawned { robot: B, pos: GridPos::new(0, 0), lives: 2 }));
}

/// Test that checkpoints only count in order.
#[test]
fn test_checkpoint_ordering() {
    let mut board = Board::new(10, 10);
    board.set_tile(GridPos::new(9, 9), Tile::checkpoint(1));
    board.set_tile(GridPos::new(3, 0), Tile::checkpoint(2));
    board.set_tile(GridPos::new(2, 0), Tile::checkpoint(3));
    let mut runner = robot(1, 0, Direction::North);
    runner.current_checkpoint = 1;
    let mut game = scripted(board, vec![runner], vec![vec![move1(), Card::new(CardAction::Move1, 510)]]);

    game.resolve_register().unwrap();
    let r = game.robot(A).unwrap();
    assert_eq!(r.pos, GridPos::new(2, 0));
    assert_eq!(r.current_checkpoint, 1);
    assert_eq!(r.respawn_pos, GridPos::new(1, 0));
    assert!(game
        .drain_events()
        .iter()
        .any(|e| matches!(e, MatchEvent::Notice { robot: Some(r), .. } if *r == A)));

    game.resolve_register().unwrap();
    let r = game.robot(A).unwrap();
    assert_eq!(r.current_checkpoint, 2);
    assert_eq!(r.respawn_pos, GridPos::new(3, 0));
    assert!(game.drain_events().contains(&MatchEvent::CheckpointReached { robot: A, number: 2 }));
    assert_eq!(game.phase(), Phase::Executing);
}

/// Test that damaged robots are dealt smaller hands, never below five.
#[test]
fn test_hand_size_clamp() {
    let mut hurt = robot(0, 0, Direction::North);
    hurt.health = 2;
    let mut scratched = robot(0, 5, Direction::North);
    scratched.health = 7;
    let mut game = scripted(
        Board::new(10, 10),
        vec![robot(9, 9, Direction::South), hurt, scratched],
        vec![vec![], vec![], vec![]],
    );

    game.run_execution();

    assert_eq!(game.phase(), Phase::Programming);
    assert_eq!(game.program(A).unwrap().hand().len(), 9);
    assert_eq!(game.program(B).unwrap().hand().len(), 5);
    assert_eq!(game.program(C).unwrap().hand().len(), 6);
}

/// Test that reaching the final checkpoint ends the match immediately.
#[test]
fn test_victory_stops_registers() {
    let mut board = Board::new(10, 10);
    board.set_tile(GridPos::new(2, 0), Tile::checkpoint(1));
    board.set_tile(GridPos::new(3, 0), Tile::checkpoint(2));
    let mut leader = robot(2, 0, Direction::North);
    leader.current_checkpoint = 1;
    let moves = [move1(), Card::new(CardAction::Move1, 510), Card::new(CardAction::Move1, 520)];
    let mut game = scripted(board, vec![leader, robot(9, 9, Direction::South)], vec![moves.to_vec(), vec![]]);

    let reports = game.run_execution();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].result, Some(GameResult::Winner(A)));
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.result(), Some(GameResult::Winner(A)));
    assert_eq!(game.robot(A).unwrap().pos, GridPos::new(3, 0));
    assert_eq!(
        game.drain_events().last(),
        Some(&MatchEvent::GameOver { result: GameResult::Winner(A) })
    );

    // Nothing else resolves once the match is over.
    assert!(game.resolve_register().is_none());
    assert!(game.request_execute_phase().is_err());
    assert_eq!(game.robot(A).unwrap().pos, GridPos::new(3, 0));
}

/// Test that losing the only human robot ends the match in defeat.
#[test]
fn test_defeat_when_human_destroyed() {
    let mut board = Board::new(10, 10);
    board.set_tile(GridPos::new(1, 0), Tile::pit());
    let mut human = robot(0, 0, Direction::North);
    human.lives = 1;
    let mut ai = robot(9, 9, Direction::South);
    ai.controller = ControllerKind::AiEasy;
    let mut game = scripted(board, vec![human, ai], vec![vec![move1()], vec![]]);

    let reports = game.run_execution();

    assert_eq!(reports.len(), 1);
    assert!(!game.robot(A).unwrap().alive);
    assert_eq!(game.result(), Some(GameResult::Defeat));
}

/// Test that a conveyor moves a robot one tile per register, card or not.
#[test]
fn test_conveyor_single_step() {
    let mut board = Board::new(10, 10);
    for y in 2..6 {
        board.set_tile(GridPos::new(2, y), Tile::conveyor(Direction::East));
    }
    let mut game = scripted(board, vec![robot(2, 2, Direction::North)], vec![vec![]]);

    let report = game.resolve_register().unwrap();
    assert!(report.cards.is_empty());
    assert_eq!(game.robot(A).unwrap().pos, GridPos::new(2, 3));

    game.resolve_register().unwrap();
    assert_eq!(game.robot(A).unwrap().pos, GridPos::new(2, 4));
}

/// Test that equal priorities resolve in registration order.
#[test]
fn test_equal_priority_registration_order() {
    let same = Card::new(CardAction::Move1, 500);
    let mut game = scripted(
        Board::new(10, 10),
        vec![robot(2, 5, Direction::North), robot(4, 5, Direction::South)],
        vec![vec![same], vec![same]],
    );

    game.resolve_register().unwrap();

    // A moves first into (3,5); B then pushes A back.
    assert_eq!(game.robot(B).unwrap().pos, GridPos::new(3, 5));
    assert_eq!(game.robot(A).unwrap().pos, GridPos::new(2, 5));
}

/// Test that a full AI match replays identically from the same seed.
#[test]
fn test_same_seed_same_match() {
    let config = MatchConfig {
        seed: 99,
        robots: vec![
            RobotSpawn::new(GridPos::new(0, 0), ControllerKind::AiMedium),
            RobotSpawn::new(GridPos::new(0, 9), ControllerKind::AiEasy),
            RobotSpawn::new(GridPos::new(9, 0), ControllerKind::AiHard),
        ],
        ..MatchConfig::default()
    };

    let play = || {
        let mut game = Match::new(&config).unwrap();
        let mut events = Vec::new();
        for _ in 0..4 {
            if game.is_over() {
                break;
            }
            game.request_execute_phase().unwrap();
            events.extend(game.drain_events());
        }
        (events, game.state().clone())
    };

    assert_eq!(play(), play());
}

/// Test that every round runs all five registers when nothing ends the match.
#[test]
fn test_round_runs_five_registers() {
    let mut game = scripted(
        Board::new(10, 10),
        vec![robot(0, 0, Direction::East)],
        vec![vec![move1(); NUM_REGISTERS]],
    );

    let reports = game.run_execution();

    assert_eq!(reports.len(), NUM_REGISTERS);
    assert_eq!(game.robot(A).unwrap().pos, GridPos::new(0, 5));
    assert_eq!(game.round(), 2);
}
