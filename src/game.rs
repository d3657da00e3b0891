//! Game controller.
//!
//! Holds the token's cell and the move count and runs the
//! Idle -> Running -> Completed state machine. Each tick rolls the die, resolves
//! the move as a pure function of (cell, roll), then asks the renderer to redraw
//! the token and writes the die value and a status line to the display.

use log::{debug, info, warn};

use crate::board::TokenRenderer;
use crate::board::cell::{CellNumber, LAST_CELL};
use crate::board::layout::{LADDER_CLIMB, SNAKE_DROP, is_ladder_foot, is_snake_head};
use crate::dice::FACES;
use crate::error::GameError;

/// Source of die rolls in `1..=6`.
pub trait Die {
    fn roll(&mut self) -> Result<u8, GameError>;
}

/// The two text outputs the game writes each tick.
pub trait GameDisplay {
    /// `None` clears the die display.
    fn show_die(&mut self, value: Option<u8>);
    /// An empty string clears the status line.
    fn show_info(&mut self, text: &str);
}

/// Repeating trigger. `start` arranges for the game to be ticked every
/// `interval_ms` until the returned handle is passed to `cancel`.
pub trait Scheduler {
    type Handle;
    fn start(&mut self, interval_ms: u32) -> Result<Self::Handle, GameError>;
    fn cancel(&mut self, handle: Self::Handle);
}

/// Outcome of one roll, decided before anything is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// Roll would pass cell 100; the token stays put.
    Overshoot,
    Snake { to: CellNumber },
    Ladder { to: CellNumber },
    /// Landed exactly on cell 100.
    Finish,
    Step { to: CellNumber },
}

impl Move {
    /// Where the token ends up when starting from `from`.
    pub fn destination(self, from: CellNumber) -> CellNumber {
        match self {
            Move::Overshoot => from,
            Move::Finish => CellNumber::LAST,
            Move::Snake { to } | Move::Ladder { to } | Move::Step { to } => to,
        }
    }

    /// Status line for this move, if it has one. `moves` is the count after the
    /// roll, so the finishing roll is included in "Completed in N moves". The
    /// original page wrote the status before counting that roll and showed one less.
    pub fn status(self, moves: u32) -> Option<String> {
        match self {
            Move::Overshoot => Some("Overshoot!".to_string()),
            Move::Snake { .. } => Some("Snake!".to_string()),
            Move::Ladder { .. } => Some("Ladder!".to_string()),
            Move::Finish => Some(format!("Completed in {moves} moves")),
            Move::Step { .. } => None,
        }
    }
}

/// Apply the board rules to a roll from `cell`. Overshoot is checked first, then
/// snakes, then ladders, then the finish. Any positive step count is accepted;
/// the 1..=6 range is enforced where rolls come off the die.
pub fn resolve_move(cell: CellNumber, roll: u8) -> Result<Move, GameError> {
    if roll == 0 {
        return Err(GameError::InvalidRoll(roll));
    }
    let tentative = cell.get() as u16 + roll as u16;
    if tentative > LAST_CELL as u16 {
        return Ok(Move::Overshoot);
    }
    let tentative = tentative as u8;
    let movement = if is_snake_head(tentative) {
        Move::Snake {
            to: CellNumber::try_from(tentative - SNAKE_DROP)?,
        }
    } else if is_ladder_foot(tentative) {
        Move::Ladder {
            to: CellNumber::try_from(tentative + LADDER_CLIMB)?,
        }
    } else if tentative == LAST_CELL {
        Move::Finish
    } else {
        Move::Step {
            to: CellNumber::try_from(tentative)?,
        }
    };
    Ok(movement)
}

#[derive(Debug, PartialEq, Eq)]
pub enum Phase<H> {
    Idle,
    /// Timer active; the handle is the only way to stop it.
    Running(H),
    Completed,
    /// Stopped after a fatal tick error.
    Halted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    /// Play pressed while running or after completion.
    Ignored,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub roll: u8,
    pub movement: Move,
    pub cell: CellNumber,
    pub moves: u32,
}

pub struct Game<R, D, S: Scheduler> {
    renderer: R,
    display: D,
    scheduler: S,
    interval_ms: u32,
    cell: CellNumber,
    moves: u32,
    phase: Phase<S::Handle>,
}

impl<R: TokenRenderer, D: GameDisplay, S: Scheduler> Game<R, D, S> {
    /// Bind a game to a renderer whose token already sits on cell 1.
    pub fn new(renderer: R, display: D, scheduler: S, interval_ms: u32) -> Self {
        Self {
            renderer,
            display,
            scheduler,
            interval_ms,
            cell: CellNumber::FIRST,
            moves: 0,
            phase: Phase::Idle,
        }
    }

    pub fn cell(&self) -> CellNumber {
        self.cell
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn phase(&self) -> &Phase<S::Handle> {
        &self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.phase, Phase::Completed)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Put the token on `cell` before play starts.
    pub fn set_position(&mut self, cell: CellNumber) -> Result<(), GameError> {
        self.renderer.draw_chip(cell)?;
        self.cell = cell;
        Ok(())
    }

    /// Start the repeating roll. Only the first call does anything; later calls
    /// never create a second timer.
    pub fn play(&mut self) -> Result<PlayOutcome, GameError> {
        if !matches!(self.phase, Phase::Idle) {
            warn!("play ignored: game is already running or finished");
            return Ok(PlayOutcome::Ignored);
        }
        let handle = self.scheduler.start(self.interval_ms)?;
        self.phase = Phase::Running(handle);
        info!("game started, rolling every {}ms", self.interval_ms);
        Ok(PlayOutcome::Started)
    }

    /// One timer tick: clear the displays, roll, show the roll, move.
    /// Ticks that arrive outside the running phase are dropped.
    pub fn tick(&mut self, die: &mut impl Die) -> Result<Option<TickReport>, GameError> {
        if !self.is_running() {
            debug!("tick ignored outside running phase");
            return Ok(None);
        }
        self.display.show_die(None);
        self.display.show_info("");
        let roll = die.roll()?;
        if !(1..=FACES).contains(&roll) {
            return Err(GameError::InvalidRoll(roll));
        }
        self.display.show_die(Some(roll));
        self.apply_roll(roll).map(Some)
    }

    /// Resolve `roll` from the current cell and carry out the result.
    pub fn apply_roll(&mut self, roll: u8) -> Result<TickReport, GameError> {
        let from = self.cell;
        let movement = resolve_move(from, roll)?;

        let to = movement.destination(from);
        if movement != Move::Overshoot {
            self.renderer.draw_chip(to)?;
        }
        // Position and count only advance once the token is on screen.
        self.cell = to;
        self.moves += 1;

        match movement {
            Move::Snake { .. } => info!("rolled {roll} from {from}: snake down to {to}"),
            Move::Ladder { .. } => info!("rolled {roll} from {from}: ladder up to {to}"),
            Move::Overshoot => debug!("rolled {roll} from {from}: overshoot"),
            Move::Step { .. } => debug!("rolled {roll}, now on {to}"),
            Move::Finish => {}
        }
        if let Some(status) = movement.status(self.moves) {
            self.display.show_info(&status);
        }
        if movement == Move::Finish {
            self.complete();
        }

        Ok(TickReport {
            roll,
            movement,
            cell: self.cell,
            moves: self.moves,
        })
    }

    /// Stop the timer after a failed tick. The game does not resume.
    pub fn halt(&mut self) {
        if !self.is_running() {
            return;
        }
        if let Phase::Running(handle) = std::mem::replace(&mut self.phase, Phase::Halted) {
            self.scheduler.cancel(handle);
            warn!("game halted after {} moves on cell {}", self.moves, self.cell);
        }
    }

    fn complete(&mut self) {
        if let Phase::Running(handle) = std::mem::replace(&mut self.phase, Phase::Completed) {
            self.scheduler.cancel(handle);
        }
        info!("completed in {} moves", self.moves);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;

    #[derive(Default)]
    struct Cells(Vec<u8>);

    impl TokenRenderer for Cells {
        fn draw_chip(&mut self, cell: CellNumber) -> Result<(), BoardError> {
            self.0.push(cell.get());
            Ok(())
        }
    }

    #[derive(Default)]
    struct Screen {
        die: Option<u8>,
        info: String,
        clears: u32,
    }

    impl GameDisplay for Screen {
        fn show_die(&mut self, value: Option<u8>) {
            if value.is_none() {
                self.clears += 1;
            }
            self.die = value;
        }
        fn show_info(&mut self, text: &str) {
            self.info = text.to_string();
        }
    }

    #[derive(Default)]
    struct Timer {
        started: u32,
        cancelled: Vec<u32>,
    }

    impl Scheduler for Timer {
        type Handle = u32;
        fn start(&mut self, _interval_ms: u32) -> Result<u32, GameError> {
            self.started += 1;
            Ok(self.started)
        }
        fn cancel(&mut self, handle: u32) {
            self.cancelled.push(handle);
        }
    }

    struct Scripted(std::vec::IntoIter<u8>);

    impl Die for Scripted {
        fn roll(&mut self) -> Result<u8, GameError> {
            Ok(self.0.next().expect("script exhausted"))
        }
    }

    fn game_at(n: i64) -> Game<Cells, Screen, Timer> {
        let mut g = Game::new(Cells::default(), Screen::default(), Timer::default(), 1000);
        if n != 1 {
            g.set_position(CellNumber::new(n).unwrap()).unwrap();
        }
        g
    }

    fn cell(n: i64) -> CellNumber {
        CellNumber::new(n).unwrap()
    }

    #[test]
    fn rule_table() {
        assert_eq!(resolve_move(cell(1), 8).unwrap(), Move::Snake { to: cell(6) });
        assert_eq!(resolve_move(cell(1), 6).unwrap(), Move::Step { to: cell(7) });
        assert_eq!(resolve_move(cell(3), 6).unwrap(), Move::Snake { to: cell(6) });
        assert_eq!(resolve_move(cell(20), 5).unwrap(), Move::Ladder { to: cell(35) });
        assert_eq!(resolve_move(cell(50), 5).unwrap(), Move::Ladder { to: cell(65) });
        assert_eq!(resolve_move(cell(96), 6).unwrap(), Move::Overshoot);
        assert_eq!(resolve_move(cell(94), 6).unwrap(), Move::Finish);
        assert_eq!(resolve_move(cell(95), 4).unwrap(), Move::Snake { to: cell(96) });
        assert_eq!(resolve_move(cell(99), 200).unwrap(), Move::Overshoot);
        assert_eq!(resolve_move(cell(1), 0).unwrap_err(), GameError::InvalidRoll(0));
    }

    #[test]
    fn snake_from_one_with_eight() {
        let mut g = game_at(1);
        let r = g.apply_roll(8).unwrap();
        assert_eq!(r.movement, Move::Snake { to: cell(6) });
        assert_eq!(g.cell(), cell(6));
        assert_eq!(g.display().info, "Snake!");
        assert_eq!(g.renderer().0.last(), Some(&6));
        assert_eq!(g.moves(), 1);
    }

    #[test]
    fn ladder_from_twenty() {
        let mut g = game_at(20);
        g.apply_roll(5).unwrap();
        assert_eq!(g.cell(), cell(35));
        assert_eq!(g.display().info, "Ladder!");
        assert_eq!(g.moves(), 1);
    }

    #[test]
    fn overshoot_keeps_cell_and_counts_move() {
        let mut g = game_at(96);
        let drawn = g.renderer().0.len();
        g.apply_roll(6).unwrap();
        assert_eq!(g.cell(), cell(96));
        assert_eq!(g.display().info, "Overshoot!");
        assert_eq!(g.moves(), 1);
        assert_eq!(g.renderer().0.len(), drawn);
    }

    #[test]
    fn finishing_stops_the_timer_once() {
        let mut g = game_at(94);
        assert_eq!(g.play().unwrap(), PlayOutcome::Started);
        let report = g.tick(&mut Scripted(vec![6].into_iter())).unwrap().unwrap();
        assert_eq!(report.movement, Move::Finish);
        assert_eq!(g.cell(), cell(100));
        assert_eq!(g.display().info, "Completed in 1 moves");
        assert!(g.is_completed());
        assert_eq!(g.scheduler().cancelled, vec![1]);

        // Stray ticks and presses after completion change nothing.
        assert_eq!(g.tick(&mut Scripted(vec![3].into_iter())).unwrap(), None);
        assert_eq!(g.play().unwrap(), PlayOutcome::Ignored);
        assert_eq!(g.scheduler().started, 1);
        assert_eq!(g.scheduler().cancelled, vec![1]);
        assert_eq!(g.moves(), 1);
    }

    #[test]
    fn second_play_is_ignored() {
        let mut g = game_at(1);
        assert_eq!(g.play().unwrap(), PlayOutcome::Started);
        assert_eq!(g.play().unwrap(), PlayOutcome::Ignored);
        assert_eq!(g.scheduler().started, 1);
        assert_eq!(g.phase(), &Phase::Running(1));
    }

    #[test]
    fn tick_before_play_does_nothing() {
        let mut g = game_at(1);
        assert_eq!(g.tick(&mut Scripted(vec![4].into_iter())).unwrap(), None);
        assert_eq!(g.moves(), 0);
        assert_eq!(g.display().clears, 0);
    }

    #[test]
    fn tick_clears_then_shows_roll() {
        let mut g = game_at(20);
        g.play().unwrap();
        g.tick(&mut Scripted(vec![5].into_iter())).unwrap();
        assert_eq!(g.display().info, "Ladder!");
        g.tick(&mut Scripted(vec![2].into_iter())).unwrap();
        assert_eq!(g.display().clears, 2);
        assert_eq!(g.display().die, Some(2));
        // Plain step leaves the cleared status empty.
        assert_eq!(g.display().info, "");
        assert_eq!(g.cell(), cell(37));
    }

    #[test]
    fn die_output_outside_one_to_six_is_rejected() {
        let mut g = game_at(1);
        g.play().unwrap();
        let err = g.tick(&mut Scripted(vec![7].into_iter())).unwrap_err();
        assert_eq!(err, GameError::InvalidRoll(7));
        assert_eq!(g.moves(), 0);
    }

    #[test]
    fn halt_cancels_running_timer() {
        let mut g = game_at(1);
        g.play().unwrap();
        g.halt();
        assert_eq!(g.phase(), &Phase::Halted);
        assert_eq!(g.scheduler().cancelled, vec![1]);
        assert_eq!(g.play().unwrap(), PlayOutcome::Ignored);
        assert_eq!(g.tick(&mut Scripted(vec![3].into_iter())).unwrap(), None);
    }

    #[test]
    fn failed_redraw_leaves_cell_and_count_alone() {
        struct Lost;
        impl TokenRenderer for Lost {
            fn draw_chip(&mut self, _: CellNumber) -> Result<(), BoardError> {
                Err(BoardError::Surface("lost context".into()))
            }
        }
        let mut g = Game::new(Lost, Screen::default(), Timer::default(), 1000);
        g.play().unwrap();
        let err = g.tick(&mut Scripted(vec![4].into_iter())).unwrap_err();
        assert_eq!(err, GameError::Board(BoardError::Surface("lost context".into())));
        assert_eq!((g.moves(), g.cell()), (0, cell(1)));
    }

    #[test]
    fn moves_increment_once_per_tick_in_every_branch() {
        let mut g = game_at(10);
        g.play().unwrap();
        g.tick(&mut Scripted(vec![2].into_iter())).unwrap();
        assert_eq!((g.moves(), g.cell()), (1, cell(12)));
        g.tick(&mut Scripted(vec![6].into_iter())).unwrap();
        assert_eq!((g.moves(), g.cell()), (2, cell(15)));
        g.set_position(cell(20)).unwrap();
        g.tick(&mut Scripted(vec![5].into_iter())).unwrap();
        assert_eq!((g.moves(), g.cell()), (3, cell(35)));
        g.set_position(cell(97)).unwrap();
        g.tick(&mut Scripted(vec![5].into_iter())).unwrap();
        assert_eq!((g.moves(), g.cell()), (4, cell(97)));
        g.set_position(cell(94)).unwrap();
        g.tick(&mut Scripted(vec![6].into_iter())).unwrap();
        assert_eq!((g.moves(), g.cell()), (5, cell(100)));
        assert_eq!(g.display().info, "Completed in 5 moves");
    }
}
