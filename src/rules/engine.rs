//! The turn resolver.
//!
//! A `Match` owns all match state and advances it through explicit phase
//! transitions:
//!
//! ```text
//! Programming --request_execute_phase--> Executing --5 registers--> Programming
//!                                            |
//!                                            +--win/loss after tile effects--> GameOver
//! ```
//!
//! Everything resolves synchronously. Movement is instantaneous and each
//! call returns once the state has settled; the event log carries enough
//! detail for a presentation layer to animate what happened.
//!
//! ```
//! use robot_rally::core::{ControllerKind, GridPos, MatchConfig, RobotSpawn};
//! use robot_rally::rules::{Match, Phase};
//!
//! let config = MatchConfig {
//!     robots: vec![
//!         RobotSpawn::new(GridPos::new(0, 0), ControllerKind::AiEasy),
//!         RobotSpawn::new(GridPos::new(0, 9), ControllerKind::AiMedium),
//!     ],
//!     ..MatchConfig::default()
//! };
//! let mut game = Match::new(&config).unwrap();
//! assert_eq!(game.phase(), Phase::Programming);
//!
//! let reports = game.request_execute_phase().unwrap();
//! assert!(!reports.is_empty());
//! assert!(game.drain_events().len() > 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::ai::policy_for;
use crate::board::{Board, MapDescription, Tile};
use crate::cards::{hand_size, Card, CardPiles, RobotProgram};
use crate::core::{
    Direction, GameRng, GameRngState, GridPos, MatchConfig, RobotId, RobotMap, NUM_REGISTERS,
};
use crate::events::{EventLog, EventSink, MatchEvent};
use crate::robots::Robot;

use super::effects::{check_game_over, resolve_tile_effects, ConveyorOutcome};
use super::error::{ActionError, MatchError};
use super::movement::{apply_card, MoveOutcome};
use super::queue::{build_queue, priority_groups, ExecutionQueueEntry};
use super::result::{GameResult, Phase};

/// All rules-relevant state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub board: Board,
    pub robots: RobotMap<Robot>,
    pub programs: RobotMap<RobotProgram>,
    pub piles: CardPiles,
    pub phase: Phase,
    /// Round number, starting at 1.
    pub round: u32,
    /// Next register to resolve while executing.
    pub register: usize,
    pub result: Option<GameResult>,
}

/// One card resolved during a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardResolution {
    pub robot: RobotId,
    pub card: Card,
    pub outcome: MoveOutcome,
}

/// Everything that happened in one register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterReport {
    pub register: usize,
    pub cards: Vec<CardResolution>,
    pub conveyors: Vec<ConveyorOutcome>,
    pub result: Option<GameResult>,
}

#[derive(Serialize, Deserialize)]
struct MatchSnapshot {
    state: MatchState,
    deck_rng: GameRngState,
    ai_rng: GameRngState,
}

/// A running match.
pub struct Match {
    state: MatchState,
    deck_rng: GameRng,
    ai_rng: GameRng,
    events: EventLog,
    queue: Vec<ExecutionQueueEntry>,
}

impl Match {
    /// Set up a match from configuration, loading the map file if one is
    /// named and falling back to the demo board otherwise.
    pub fn new(config: &MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        let map = match &config.map {
            Some(path) => MapDescription::load(path)?,
            None => MapDescription::demo(),
        };
        Self::with_board(map.to_board(), config)
    }

    /// Set up a match on an existing board and deal the first hands.
    pub fn with_board(board: Board, config: &MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;

        let mut taken: Vec<GridPos> = Vec::with_capacity(config.robots.len());
        for (i, spawn) in config.robots.iter().enumerate() {
            let robot = RobotId::new(i as u8);
            if !board.is_in_bounds(spawn.start) {
                return Err(MatchError::SpawnOutOfBounds { robot, pos: spawn.start });
            }
            if taken.contains(&spawn.start) {
                return Err(MatchError::SpawnOverlap { robot, pos: spawn.start });
            }
            taken.push(spawn.start);
        }

        let robots = RobotMap::from_vec(
            config
                .robots
                .iter()
                .map(|spawn| Robot::new(spawn, config.max_health, config.max_lives))
                .collect(),
        );
        let programs = RobotMap::new(robots.len(), |_| RobotProgram::new());

        let root = GameRng::new(config.seed);
        let mut deck_rng = root.for_context("deck");
        let ai_rng = root.for_context("ai");
        let piles = CardPiles::shuffled(&mut deck_rng);

        tracing::info!(
            robots = robots.len(),
            width = board.width(),
            height = board.height(),
            checkpoints = board.total_checkpoints(),
            seed = config.seed,
            "match created"
        );

        let mut game = Self {
            state: MatchState {
                board,
                robots,
                programs,
                piles,
                phase: Phase::Programming,
                round: 0,
                register: 0,
                result: None,
            },
            deck_rng,
            ai_rng,
            events: EventLog::new(),
            queue: Vec::new(),
        };
        game.next_round();
        Ok(game)
    }

    /// Resume from prepared state, e.g. a scripted scenario.
    ///
    /// Nothing is dealt; the state is taken as-is and RNG streams start
    /// fresh from `seed`.
    #[must_use]
    pub fn from_state(state: MatchState, seed: u64) -> Self {
        let root = GameRng::new(seed);
        let queue = Self::queue_for(&state);
        Self {
            state,
            deck_rng: root.for_context("deck"),
            ai_rng: root.for_context("ai"),
            events: EventLog::new(),
            queue,
        }
    }

    fn queue_for(state: &MatchState) -> Vec<ExecutionQueueEntry> {
        if state.phase == Phase::Executing {
            build_queue(state.register, &state.robots, &state.programs)
        } else {
            Vec::new()
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    #[must_use]
    pub fn robots(&self) -> &RobotMap<Robot> {
        &self.state.robots
    }

    #[must_use]
    pub fn robot(&self, robot: RobotId) -> Option<&Robot> {
        self.state.robots.get(robot)
    }

    #[must_use]
    pub fn program(&self, robot: RobotId) -> Option<&RobotProgram> {
        self.state.programs.get(robot)
    }

    #[must_use]
    pub fn piles(&self) -> &CardPiles {
        &self.state.piles
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.state.round
    }

    /// Register about to resolve; only meaningful while executing.
    #[must_use]
    pub fn current_register(&self) -> usize {
        self.state.register
    }

    /// Queue for the register about to resolve.
    #[must_use]
    pub fn current_queue(&self) -> &[ExecutionQueueEntry] {
        &self.queue
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.state.result
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.phase == Phase::GameOver
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.events.drain()
    }

    // === Inbound actions ===

    /// Place hand card `hand_index` in the robot's first empty register.
    ///
    /// Returns the register it landed in.
    pub fn select_card(&mut self, robot: RobotId, hand_index: usize) -> Result<usize, ActionError> {
        let result = self
            .programmable(robot)
            .and_then(|()| Ok(self.state.programs[robot].select(hand_index)?));
        self.report(robot, result)
    }

    /// Clear the robot's highest filled register.
    pub fn undo_selection(&mut self, robot: RobotId) -> Result<usize, ActionError> {
        let result = self
            .programmable(robot)
            .and_then(|()| Ok(self.state.programs[robot].undo_last()?));
        self.report(robot, result)
    }

    /// Replace a tile. Returns false when `pos` is off the board.
    pub fn set_tile(&mut self, pos: GridPos, tile: Tile) -> bool {
        self.state.board.set_tile(pos, tile)
    }

    /// Toggle one wall side of a tile.
    pub fn set_wall(&mut self, pos: GridPos, dir: Direction, enabled: bool) -> bool {
        self.state.board.set_wall(pos, dir, enabled)
    }

    /// Commit every program and resolve all five registers.
    ///
    /// Stops early if the match ends. Refused unless every alive robot is
    /// ready.
    pub fn request_execute_phase(&mut self) -> Result<Vec<RegisterReport>, ActionError> {
        self.begin_execution()?;
        Ok(self.run_execution())
    }

    fn programmable(&self, robot: RobotId) -> Result<(), ActionError> {
        if self.state.phase != Phase::Programming {
            return Err(ActionError::WrongPhase(self.state.phase));
        }
        match self.state.robots.get(robot) {
            None => Err(ActionError::UnknownRobot(robot)),
            Some(r) if !r.alive => Err(ActionError::RobotDestroyed(robot)),
            Some(_) => Ok(()),
        }
    }

    fn report<T>(&mut self, robot: RobotId, result: Result<T, ActionError>) -> Result<T, ActionError> {
        if let Err(err) = &result {
            tracing::warn!(%robot, error = %err, "action rejected");
            self.events.emit(MatchEvent::notice(robot, err.to_string()));
        }
        result
    }

    // === Phases ===

    /// Enter the programming phase of the next round.
    ///
    /// Returns old hands to the discard pile, deals fresh hands sized by
    /// damage, and lets AI robots fill their registers. A finished match
    /// stays finished.
    pub fn start_programming_phase(&mut self) -> Result<(), ActionError> {
        if self.state.phase == Phase::GameOver {
            let err = ActionError::WrongPhase(Phase::GameOver);
            tracing::warn!(error = %err, "new round rejected");
            self.events.emit(MatchEvent::Notice {
                robot: None,
                message: err.to_string(),
            });
            return Err(err);
        }
        self.next_round();
        Ok(())
    }

    fn next_round(&mut self) {
        let state = &mut self.state;
        state.round += 1;
        state.phase = Phase::Programming;
        state.register = 0;
        self.queue.clear();

        let ids: Vec<RobotId> = self.state.robots.ids().collect();
        for &id in &ids {
            self.discard_hand(id);
            self.state.programs[id].clear_committed();
        }
        for &id in &ids {
            if self.state.robots[id].alive {
                self.deal_hand(id);
            }
        }

        let state = &mut self.state;
        for id in ids {
            let robot = &state.robots[id];
            if !robot.alive {
                continue;
            }
            let Some(policy) = policy_for(robot.controller) else {
                continue;
            };
            let program = &mut state.programs[id];
            let picks = policy.choose(&state.board, robot, program.hand(), &mut self.ai_rng);
            for index in picks {
                if let Err(err) = program.select(index) {
                    tracing::debug!(robot = %id, index, error = %err, "ai pick skipped");
                }
            }
        }

        tracing::info!(round = state.round, "programming phase");
        self.events.emit(MatchEvent::PhaseChanged {
            phase: Phase::Programming,
            round: state.round,
        });
    }

    /// Draw a fresh hand for `robot`, sized by its damage.
    ///
    /// Reshuffles the discard pile when the deck runs dry and deals short
    /// when both are empty. Any hand still held goes to the discard pile
    /// first. Returns the number of cards dealt.
    pub fn deal_hand(&mut self, robot: RobotId) -> usize {
        let Some(r) = self.state.robots.get(robot) else {
            return 0;
        };
        let wanted = hand_size(r.max_health, r.health);
        self.discard_hand(robot);
        let cards = self.state.piles.draw(wanted, &mut self.deck_rng);
        let dealt = cards.len();
        if dealt < wanted {
            tracing::warn!(robot = %robot, wanted, dealt, "short hand dealt");
        }
        self.state.programs[robot].set_hand(cards);
        self.events.emit(MatchEvent::HandDealt { robot, cards: dealt });
        dealt
    }

    /// Move `robot`'s hand to the discard pile and clear its register slots.
    /// Committed cards are left alone.
    pub fn discard_hand(&mut self, robot: RobotId) {
        let Some(program) = self.state.programs.get_mut(robot) else {
            return;
        };
        let spent = program.take_hand();
        self.state.piles.discard(spent);
    }

    /// Robots whose registers still need cards.
    #[must_use]
    pub fn pending_robots(&self) -> Vec<RobotId> {
        self.state
            .robots
            .iter()
            .filter(|(id, r)| r.alive && !self.state.programs[*id].is_ready())
            .map(|(id, _)| id)
            .collect()
    }

    /// Commit programs and enter the executing phase without resolving
    /// anything yet.
    pub fn begin_execution(&mut self) -> Result<(), ActionError> {
        if self.state.phase != Phase::Programming {
            let err = ActionError::WrongPhase(self.state.phase);
            tracing::warn!(error = %err, "execute request rejected");
            self.events.emit(MatchEvent::Notice {
                robot: None,
                message: err.to_string(),
            });
            return Err(err);
        }
        let pending = self.pending_robots();
        if !pending.is_empty() {
            let err = ActionError::NotReady(pending);
            tracing::warn!(error = %err, "execute request rejected");
            self.events.emit(MatchEvent::Notice {
                robot: None,
                message: err.to_string(),
            });
            return Err(err);
        }

        let ids: Vec<RobotId> = self.state.robots.ids().collect();
        for id in ids {
            if self.state.robots[id].alive {
                self.state.programs[id].commit();
            }
            self.discard_hand(id);
        }

        let state = &mut self.state;
        state.phase = Phase::Executing;
        state.register = 0;
        self.queue = build_queue(0, &state.robots, &state.programs);

        tracing::info!(round = state.round, "executing phase");
        self.events.emit(MatchEvent::PhaseChanged {
            phase: Phase::Executing,
            round: state.round,
        });
        Ok(())
    }

    /// Resolve the current register: cards by priority group, then tile
    /// effects, then the win/loss check.
    ///
    /// Returns `None` outside the executing phase.
    pub fn resolve_register(&mut self) -> Option<RegisterReport> {
        if self.state.phase != Phase::Executing {
            return None;
        }
        let register = self.state.register;
        let queue = build_queue(register, &self.state.robots, &self.state.programs);
        tracing::debug!(register, entries = queue.len(), "resolving register");

        let state = &mut self.state;
        let mut cards = Vec::with_capacity(queue.len());
        for group in priority_groups(&queue) {
            for entry in group {
                if !state.robots[entry.robot].alive {
                    continue;
                }
                self.events.emit(MatchEvent::RegisterExecuted {
                    robot: entry.robot,
                    register,
                    card: entry.card,
                });
                let outcome = apply_card(&state.board, &mut state.robots, entry.robot, entry.card, &mut self.events);
                cards.push(CardResolution {
                    robot: entry.robot,
                    card: entry.card,
                    outcome,
                });
            }
        }

        let conveyors = resolve_tile_effects(&state.board, &mut state.robots, &mut self.events);

        let result = check_game_over(&state.board, &state.robots);
        if let Some(result) = result {
            state.phase = Phase::GameOver;
            state.result = Some(result);
            self.queue.clear();
            tracing::info!(?result, round = state.round, register, "game over");
            self.events.emit(MatchEvent::GameOver { result });
        } else if register + 1 >= NUM_REGISTERS {
            self.next_round();
        } else {
            state.register = register + 1;
            self.queue = build_queue(state.register, &state.robots, &state.programs);
        }

        Some(RegisterReport {
            register,
            cards,
            conveyors,
            result,
        })
    }

    /// Resolve registers until the round ends or the match is over.
    pub fn run_execution(&mut self) -> Vec<RegisterReport> {
        let mut reports = Vec::with_capacity(NUM_REGISTERS);
        while let Some(report) = self.resolve_register() {
            let round_over = report.register + 1 >= NUM_REGISTERS;
            reports.push(report);
            if round_over {
                break;
            }
        }
        reports
    }

    // === Snapshots ===

    /// Encode the full match, RNG positions included.
    ///
    /// Pending events are not part of the snapshot.
    pub fn snapshot(&self) -> Result<Vec<u8>, MatchError> {
        let snapshot = MatchSnapshot {
            state: self.state.clone(),
            deck_rng: self.deck_rng.state(),
            ai_rng: self.ai_rng.state(),
        };
        Ok(bincode::serialize(&snapshot)?)
    }

    /// Rebuild a match from `snapshot`.
    pub fn restore(bytes: &[u8]) -> Result<Self, MatchError> {
        let snapshot: MatchSnapshot = bincode::deserialize(bytes)?;
        let queue = Self::queue_for(&snapshot.state);
        Ok(Self {
            state: snapshot.state,
            deck_rng: GameRng::from_state(&snapshot.deck_rng),
            ai_rng: GameRng::from_state(&snapshot.ai_rng),
            events: EventLog::new(),
            queue,
        })
    }
}
