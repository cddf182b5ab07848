//! Card selection policies for computer-controlled robots.
//!
//! Policies are trait-based so a deeper search can slot in later:
//! - `RandomPolicy`: uniform random cards, hazards ignored
//! - `GreedyPolicy`: one-card look-ahead toward the next checkpoint

use crate::board::Board;
use crate::cards::Card;
use crate::core::{ControllerKind, GameRng, NUM_REGISTERS};
use crate::robots::Robot;

use super::simulate::{score_card, target_for, Pose};

// =============================================================================
// Card Policy
// =============================================================================

/// Chooses which hand cards fill a robot's registers.
pub trait CardPolicy: Send + Sync {
    /// Hand indices in register order, at most `NUM_REGISTERS`, no repeats.
    fn choose(&self, board: &Board, robot: &Robot, hand: &[Card], rng: &mut GameRng) -> Vec<usize>;
}

/// Picks cards uniformly at random.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl CardPolicy for RandomPolicy {
    fn choose(&self, _board: &Board, _robot: &Robot, hand: &[Card], rng: &mut GameRng) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..hand.len()).collect();
        rng.shuffle(&mut indices);
        indices.truncate(NUM_REGISTERS);
        indices
    }
}

/// Fills each register with the best-scoring unused card, simulating the
/// robot forward after every pick.
#[derive(Clone, Debug, Default)]
pub struct GreedyPolicy;

impl CardPolicy for GreedyPolicy {
    fn choose(&self, board: &Board, robot: &Robot, hand: &[Card], _rng: &mut GameRng) -> Vec<usize> {
        let target = target_for(board, robot);
        let mut pose = Pose::of(robot);
        let mut chosen = Vec::with_capacity(NUM_REGISTERS);

        for _ in 0..NUM_REGISTERS.min(hand.len()) {
            let best = hand
                .iter()
                .enumerate()
                .filter(|(i, _)| !chosen.contains(i))
                .map(|(i, card)| (i, score_card(board, pose, card.action, target)))
                .fold(None, |best: Option<(usize, f64)>, (i, score)| match best {
                    Some((_, top)) if top >= score => best,
                    _ => Some((i, score)),
                });
            let Some((index, _)) = best else { break };

            chosen.push(index);
            pose = pose.after(hand[index].action);
        }

        tracing::debug!(target_x = target.x, target_y = target.y, picks = chosen.len(), "greedy selection");
        chosen
    }
}

/// Policy for a controller kind; `None` for human players.
///
/// `AiHard` currently plays the same as `AiMedium`.
#[must_use]
pub fn policy_for(kind: ControllerKind) -> Option<Box<dyn CardPolicy>> {
    match kind {
        ControllerKind::Player => None,
        ControllerKind::AiEasy => Some(Box::new(RandomPolicy)),
        ControllerKind::AiMedium | ControllerKind::AiHard => Some(Box::new(GreedyPolicy)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tile;
    use crate::cards::CardAction;
    use crate::core::{Direction, GridPos, RobotSpawn};

    fn robot_at(x: i32, y: i32, facing: Direction) -> Robot {
        let spawn = RobotSpawn::new(GridPos::new(x, y), ControllerKind::AiMedium).facing(facing);
        Robot::new(&spawn, 10, 3)
    }

    fn hand(actions: &[CardAction]) -> Vec<Card> {
        actions
            .iter()
            .enumerate()
            .map(|(i, &a)| Card::new(a, 100 + i as u32 * 10))
            .collect()
    }

    #[test]
    fn test_random_picks_distinct_cards() {
        let board = Board::new(10, 10);
        let robot = robot_at(0, 0, Direction::North);
        let cards = hand(&[CardAction::Move1; 9]);
        let mut rng = GameRng::new(7);

        let picks = RandomPolicy.choose(&board, &robot, &cards, &mut rng);
        assert_eq!(picks.len(), 5);
        let mut sorted = picks.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 5);
        assert!(picks.iter().all(|&i| i < 9));
    }

    #[test]
    fn test_random_short_hand() {
        let board = Board::new(10, 10);
        let robot = robot_at(0, 0, Direction::North);
        let cards = hand(&[CardAction::Move1, CardAction::UTurn]);

        let picks = RandomPolicy.choose(&board, &robot, &cards, &mut GameRng::new(1));
        assert_eq!(picks.len(), 2);
    }

    #[test]
    fn test_greedy_heads_for_checkpoint() {
        let mut board = Board::new(10, 10);
        board.set_tile(GridPos::new(9, 0), Tile::checkpoint(1));
        let robot = robot_at(0, 0, Direction::North);
        let cards = hand(&[
            CardAction::UTurn,
            CardAction::Move1,
            CardAction::RotateLeft,
            CardAction::Move3,
            CardAction::MoveBack,
            CardAction::Move2,
            CardAction::RotateRight,
            CardAction::Move1,
            CardAction::RotateRight,
        ]);

        let picks = GreedyPolicy.choose(&board, &robot, &cards, &mut GameRng::new(0));
        assert_eq!(picks.len(), 5);
        // Largest moves first; equal scores go to the lower hand index.
        assert_eq!(&picks[..4], &[3, 5, 1, 7]);
        assert_eq!(picks[4], 0);
    }

    #[test]
    fn test_greedy_avoids_pit() {
        let mut board = Board::new(10, 10);
        board.set_tile(GridPos::new(1, 0), Tile::pit());
        board.set_tile(GridPos::new(9, 0), Tile::checkpoint(1));
        let robot = robot_at(0, 0, Direction::North);
        let cards = hand(&[CardAction::Move1, CardAction::Move2, CardAction::RotateRight]);

        let picks = GreedyPolicy.choose(&board, &robot, &cards, &mut GameRng::new(0));
        // Move2 jumps over the pit in the simulation, Move1 would land in it.
        assert_eq!(picks[0], 1);
    }

    #[test]
    fn test_policy_for_controllers() {
        assert!(policy_for(ControllerKind::Player).is_none());
        assert!(policy_for(ControllerKind::AiEasy).is_some());
        assert!(policy_for(ControllerKind::AiHard).is_some());
    }
}
