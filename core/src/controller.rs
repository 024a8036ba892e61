use alloc::format;
use alloc::string::String;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Everything the outside world can tell the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Pointer pressed, on a cell or on empty space.
    PointerDown(Option<Coord2>),
    PointerEnter(Coord2),
    /// Pointer released anywhere on the page.
    PointerUp,
    /// One second of the round clock passed.
    TimerTick,
    /// The quiet period scheduled by [`Effect::ScheduleValidation`] is over.
    DebounceElapsed(Ticket),
    /// Answer to an [`Effect::LookupWord`].
    ValidationResult {
        ticket: Ticket,
        word: String,
        valid: bool,
    },
    StopRound,
    /// New letters, only honored between rounds.
    Reshuffle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Success,
    Failure,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
}

impl Message {
    fn too_short(word: &str) -> Self {
        Self {
            text: format!("{} is too short.", word),
            severity: Severity::Failure,
        }
    }

    fn verdict(word: &str, valid: bool) -> Self {
        if valid {
            Self {
                text: format!("{} is a valid word!", word),
                severity: Severity::Success,
            }
        } else {
            Self {
                text: format!("{} is not a valid word.", word),
                severity: Severity::Failure,
            }
        }
    }
}

/// What the driver has to do after an [`Event`] was handled, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    GridChanged,
    /// Begin delivering [`Event::TimerTick`] every second, replacing any running ticker.
    StartTicker,
    StopTicker,
    TimeChanged(u32),
    ScoreChanged(u32),
    /// Deliver [`Event::DebounceElapsed`] after `delay_ms`, an earlier schedule may be dropped.
    ScheduleValidation { ticket: Ticket, delay_ms: u32 },
    /// Ask the dictionary about `word` and answer with [`Event::ValidationResult`].
    LookupWord { ticket: Ticket, word: String },
    ShowMessage(Message),
    RoundEnded { final_score: u32, rank: Option<usize> },
    /// The board changed and should be persisted.
    LeaderboardChanged(Leaderboard),
}

pub type Effects = SmallVec<[Effect; 4]>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub score: u32,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub grid: Grid,
    pub tracker: SelectionTracker,
    pub timer: RoundTimer,
    pub validator: WordValidator,
    pub round: Round,
    pub leaderboard: Leaderboard,
    pub last_message: Option<Message>,
}

/// Owns the whole game and turns [`Event`]s into state changes plus [`Effect`]s.
#[derive(Clone, Debug)]
pub struct GameController {
    state: GameState,
    rng: SmallRng,
}

impl GameController {
    /// New game with a freshly shuffled grid.
    pub fn new(config: GameConfig, seed: u64, leaderboard: Leaderboard) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = Grid::new(config.size);
        grid.reshuffle(RandomLetterGenerator::new(rng.next_u64()));
        Self::build(config, grid, leaderboard, rng)
    }

    /// New game on a fixed set of letters, `seed` only matters for later reshuffles.
    pub fn with_grid(config: GameConfig, grid: Grid, seed: u64, leaderboard: Leaderboard) -> Self {
        let config = GameConfig {
            size: grid.size(),
            ..config
        };
        Self::build(config, grid, leaderboard, SmallRng::seed_from_u64(seed))
    }

    fn build(config: GameConfig, grid: Grid, mut leaderboard: Leaderboard, rng: SmallRng) -> Self {
        leaderboard.set_capacity(config.leaderboard_size);
        log::debug!("new game: {:?}", config);
        Self {
            state: GameState {
                config,
                grid,
                tracker: SelectionTracker::new(),
                timer: RoundTimer::new(config.round_secs),
                validator: WordValidator::new(config.min_word_len, config.debounce_ms),
                round: Round::default(),
                leaderboard,
                last_message: None,
            },
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn score(&self) -> u32 {
        self.state.round.score
    }

    pub fn time_left(&self) -> u32 {
        self.state.timer.remaining()
    }

    pub fn is_round_active(&self) -> bool {
        self.state.round.active
    }

    pub fn candidate_word(&self) -> &str {
        self.state.tracker.word()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.state.leaderboard
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.state.last_message.as_ref()
    }

    pub fn handle(&mut self, event: Event) -> Effects {
        use Event::*;

        log::trace!("event: {:?}", event);
        let mut effects = Effects::new();
        match event {
            PointerDown(target) => self.pointer_down(target, &mut effects),
            PointerEnter(coords) => {
                self.state.tracker.pointer_enter(&mut self.state.grid, coords);
            }
            PointerUp => self.pointer_up(&mut effects),
            TimerTick => self.timer_tick(&mut effects),
            DebounceElapsed(ticket) => self.debounce_elapsed(ticket, &mut effects),
            ValidationResult {
                ticket,
                word,
                valid,
            } => self.validation_result(ticket, &word, valid, &mut effects),
            StopRound => {
                if self.state.round.active {
                    self.end_round(&mut effects);
                }
            }
            Reshuffle => {
                if self.state.round.active {
                    log::debug!("ignoring reshuffle during a round");
                } else {
                    self.reshuffle(&mut effects);
                }
            }
        }
        effects
    }

    fn pointer_down(&mut self, target: Option<Coord2>, effects: &mut Effects) {
        if self.state.tracker.begin_gesture().starts_round {
            self.start_round(effects);
        }
        if let Some(coords) = target {
            self.state.tracker.extend(&mut self.state.grid, coords);
        }
    }

    fn pointer_up(&mut self, effects: &mut Effects) {
        let Some(word) = self.state.tracker.pointer_up(&mut self.state.grid) else {
            return;
        };

        match self.state.validator.submit(&word, self.state.round.id) {
            Submission::TooShort => {
                log::debug!("too short: {:?}", word);
                self.show(Message::too_short(&word), effects);
            }
            Submission::Scheduled { ticket, delay_ms } => {
                log::debug!("scheduled {:?} as {:?}", word, ticket);
                effects.push(Effect::ScheduleValidation { ticket, delay_ms });
            }
        }
    }

    fn timer_tick(&mut self, effects: &mut Effects) {
        match self.state.timer.tick() {
            Tick::Idle => {}
            Tick::Remaining(secs) => effects.push(Effect::TimeChanged(secs)),
            Tick::Expired => {
                effects.push(Effect::TimeChanged(0));
                self.end_round(effects);
            }
        }
    }

    fn debounce_elapsed(&mut self, ticket: Ticket, effects: &mut Effects) {
        match self.state.validator.elapsed(ticket) {
            Resolution::Stale => log::trace!("stale debounce {:?}", ticket),
            Resolution::Cached { word, valid, round } => self.report(&word, valid, round, effects),
            Resolution::Lookup { ticket, word } => {
                effects.push(Effect::LookupWord { ticket, word });
            }
        }
    }

    fn validation_result(&mut self, ticket: Ticket, word: &str, valid: bool, effects: &mut Effects) {
        let Some(completed) = self.state.validator.complete(ticket, valid) else {
            log::warn!("no lookup in flight for {:?} ({:?})", ticket, word);
            return;
        };
        if completed.word != word {
            log::warn!(
                "lookup {:?} answered for {:?} but was issued for {:?}",
                ticket,
                word,
                completed.word
            );
        }
        self.report(&completed.word, completed.valid, completed.round, effects);
    }

    fn report(&mut self, word: &str, valid: bool, round: RoundId, effects: &mut Effects) {
        self.show(Message::verdict(word, valid), effects);
        if !valid {
            return;
        }

        let current = &mut self.state.round;
        if current.active && current.id == round {
            current.score = current
                .score
                .saturating_add(self.state.config.word_points(word.chars().count()));
            effects.push(Effect::ScoreChanged(current.score));
        } else {
            log::warn!(
                "{:?} was validated after round {} ended, score unchanged",
                word,
                round
            );
        }
    }

    fn show(&mut self, message: Message, effects: &mut Effects) {
        self.state.last_message = Some(message.clone());
        effects.push(Effect::ShowMessage(message));
    }

    fn start_round(&mut self, effects: &mut Effects) {
        let round = &mut self.state.round;
        round.id = round.id.wrapping_add(1);
        round.score = 0;
        round.active = true;
        log::info!("round {} started", round.id);

        if matches!(self.state.config.reshuffle, ReshufflePolicy::EveryRound) {
            self.reshuffle(effects);
        }
        self.state.tracker.clear(&mut self.state.grid);

        let secs = self.state.timer.start();
        effects.push(Effect::StartTicker);
        effects.push(Effect::TimeChanged(secs));
        effects.push(Effect::ScoreChanged(0));
    }

    fn end_round(&mut self, effects: &mut Effects) {
        self.state.timer.stop();
        effects.push(Effect::StopTicker);
        self.state
            .tracker
            .await_first_selection(&mut self.state.grid);

        let final_score = self.state.round.score;
        self.state.round.active = false;
        log::info!(
            "round {} ended with score {}",
            self.state.round.id,
            final_score
        );

        let rank = self.state.leaderboard.push(final_score);
        effects.push(Effect::LeaderboardChanged(self.state.leaderboard.clone()));
        effects.push(Effect::RoundEnded { final_score, rank });

        self.state.round.score = 0;
        effects.push(Effect::ScoreChanged(0));
    }

    fn reshuffle(&mut self, effects: &mut Effects) {
        let seed = self.rng.next_u64();
        self.state.grid.reshuffle(RandomLetterGenerator::new(seed));
        effects.push(Effect::GridChanged);
    }
}
