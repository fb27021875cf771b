use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::{Piece, PieceId};
use crate::rules::GameRules;
use crate::score::ScoreEngine;

/// Game lifecycle. `Completed` is terminal until the next [`Session::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Idle,
    Playing,
    Completed,
}

/// Feedback events for the audio/haptics/highlight collaborators. The core
/// only emits them; it never reads them back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PuzzleEvent {
    CorrectDrop(PieceId),
    IncorrectDrop(PieceId),
    Completed { score: u32, seconds: u32 },
    Debug(String),
}

/// What a single placement did, for immediate UI updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub correct: bool,
    pub solved: u32,
    pub score: u32,
    pub completed: bool,
}

/// Orchestrates one puzzle session: board mutation, scoring, the 1 Hz timer
/// seconds and completion detection. All mutation is synchronous inside the
/// handler for a single input event; the UI layer guarantees only one drag
/// resolves at a time.
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    rules: GameRules,
    status: SessionStatus,
    seconds: u32,
    score: u32,
    events: VecDeque<PuzzleEvent>,
}

impl Session {
    pub fn new(rules: GameRules) -> Self {
        Session {
            board: Board::default(),
            rules,
            status: SessionStatus::Idle,
            seconds: 0,
            score: 0,
            events: VecDeque::new(),
        }
    }

    /// (Re)initialize with a freshly sliced piece list and enter `Playing`.
    /// Pieces, slots, timer and score are fully reset.
    pub fn start(&mut self, pieces: Vec<Piece>) {
        self.board = Board::new(pieces);
        self.status = SessionStatus::Playing;
        self.seconds = 0;
        self.score = 0;
        self.events.clear();
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut GameRules {
        &mut self.rules
    }

    /// One whole second of play. Inert unless `Playing`, so a stray tick
    /// after completion or reset cannot move the clock.
    pub fn tick(&mut self) {
        if self.status == SessionStatus::Playing {
            self.seconds += 1;
        }
    }

    /// The placement pipeline: place (with eviction), validate, recount,
    /// rescore, detect completion. After completion the board still accepts
    /// drops but score and status are frozen.
    pub fn drop_piece(&mut self, piece: PieceId, slot: usize) -> PlacementOutcome {
        self.board.place(piece, slot);
        let correct = self.board.placement_correct(piece);
        let solved = self.board.solved_count() as u32;
        if self.status == SessionStatus::Playing {
            self.score =
                self.rules
                    .score
                    .score(solved, self.board.difficulty() as u32, self.seconds);
            self.events.push_back(if correct {
                PuzzleEvent::CorrectDrop(piece)
            } else {
                PuzzleEvent::IncorrectDrop(piece)
            });
            if self.board.is_complete() {
                self.status = SessionStatus::Completed;
                self.events.push_back(PuzzleEvent::Completed {
                    score: self.score,
                    seconds: self.seconds,
                });
            }
        }
        PlacementOutcome {
            correct,
            solved,
            score: self.score,
            completed: self.status == SessionStatus::Completed,
        }
    }

    /// Surface a failed touch hit-test to the debug channel. Normal mode
    /// swallows it silently.
    pub fn note_touch_miss(&mut self, piece: PieceId) {
        if self.rules.debug_mode {
            self.events
                .push_back(PuzzleEvent::Debug(format!("touch drop missed (piece {piece})")));
        }
    }

    /// Drain pending feedback events for the collaborators.
    pub fn take_events(&mut self) -> Vec<PuzzleEvent> {
        self.events.drain(..).collect()
    }
}
