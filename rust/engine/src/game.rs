use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::Card;
use crate::deck::{Deck, COMMUNITY_SIZE};
use crate::errors::GameError;
use crate::hand::{evaluate, HandRank};
use crate::history::{HandHistory, HandPhase, PlayerAction, PrehandHistory, SettleHistory};
use crate::player::{ActionType, Player, PlayerState};
use crate::pot::{self, Ledger, Pot};
use crate::rules::{self, Situation, ValidatedAction};

/// Table settings fixed for the lifetime of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub buy_in: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub max_players: usize,
    /// Re-buys allowed per seat before the whole table is restarted
    pub buyin_limit: u32,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            buy_in: 1000,
            small_blind: 5,
            big_blind: 10,
            max_players: 6,
            buyin_limit: 3,
            seed: 0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        let max_seats = (52 - COMMUNITY_SIZE) / 2;
        if self.max_players < 2 || self.max_players > max_seats {
            return Err(GameError::InvalidConfig(format!(
                "players must be between 2 and {max_seats}, got {}",
                self.max_players
            )));
        }
        if self.buy_in == 0 {
            return Err(GameError::InvalidConfig("buy_in must be positive".into()));
        }
        if self.big_blind == 0 {
            return Err(GameError::InvalidConfig("big_blind must be positive".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(GameError::InvalidConfig(format!(
                "small_blind {} exceeds big_blind {}",
                self.small_blind, self.big_blind
            )));
        }
        Ok(())
    }
}

/// A No-Limit Hold'em table.
///
/// Hands move PREHAND → PREFLOP → FLOP → TURN → RIVER → SETTLE. Exactly one
/// player acts at a time; moves are checked with [`Game::validate_move`] and
/// applied with [`Game::take_action`].
///
/// # Examples
///
/// ```
/// use holdem_engine::game::{Game, GameConfig};
/// use holdem_engine::history::HandPhase;
/// use holdem_engine::player::ActionType;
///
/// let mut game = Game::new(GameConfig {
///     buy_in: 100,
///     max_players: 2,
///     ..GameConfig::default()
/// })
/// .unwrap();
/// game.start_hand().unwrap();
/// game.take_action(ActionType::Call, None).unwrap();
/// game.take_action(ActionType::Check, None).unwrap();
/// assert_eq!(game.hand_phase(), HandPhase::Flop);
/// assert_eq!(game.board().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    players: Vec<Player>,
    rng: ChaCha20Rng,
    deck: Deck,
    board: Vec<Card>,
    hands: BTreeMap<usize, [Card; 2]>,
    phase: HandPhase,
    history: HandHistory,
    ledger: Ledger,
    pots: Vec<Pot>,
    btn_loc: usize,
    sb_loc: usize,
    bb_loc: usize,
    current_player: usize,
    /// Size of the last full raise this round
    last_raise: u32,
    /// Per seat: whether raising is still open to it this round
    raise_open: Vec<bool>,
    hand_number: u64,
    buyin_history: Vec<u32>,
    game_restarts: u32,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
        let deck = Deck::new_with_seed(rng.random());
        let seats = config.max_players;
        Ok(Self {
            players: (0..seats).map(|id| Player::new(id, config.buy_in)).collect(),
            rng,
            deck,
            board: Vec::with_capacity(COMMUNITY_SIZE),
            hands: BTreeMap::new(),
            phase: HandPhase::Prehand,
            history: HandHistory::new(),
            ledger: Ledger::new(seats),
            pots: Vec::new(),
            btn_loc: 0,
            sb_loc: 0,
            bb_loc: 0,
            current_player: 0,
            last_raise: 0,
            raise_open: vec![true; seats],
            hand_number: 0,
            buyin_history: vec![0; seats],
            game_restarts: 0,
            config,
        })
    }

    /// Seats start with `stacks` instead of `buy_in`; re-buys still use `buy_in`.
    pub fn with_stacks(config: GameConfig, stacks: &[u32]) -> Result<Self, GameError> {
        if stacks.len() != config.max_players {
            return Err(GameError::InvalidConfig(format!(
                "{} stacks for {} seats",
                stacks.len(),
                config.max_players
            )));
        }
        let mut game = Self::new(config)?;
        for (p, &chips) in game.players.iter_mut().zip(stacks) {
            p.set_chips(chips);
        }
        Ok(game)
    }

    // ---- lifecycle ----

    /// Starts a hand with a deck seeded from the game's RNG.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        self.ensure_can_start()?;
        let deck = Deck::new_with_seed(self.rng.random());
        self.start_hand_with_deck(deck)
    }

    /// Starts a hand dealt from `deck`: hole cards come off the draw pile,
    /// the board from its community reserve.
    ///
    /// Blinds are posted as far as the stacks allow. When the big blind
    /// cannot cover its blind, the preflop level is the larger of the two
    /// posts actually made, and calls and the minimum raise follow from it.
    pub fn start_hand_with_deck(&mut self, deck: Deck) -> Result<(), GameError> {
        self.ensure_can_start()?;
        let dealt = self.players.iter().filter(|p| p.chips() > 0).count();
        if deck.community_remaining() < COMMUNITY_SIZE || deck.remaining() < 2 * dealt {
            return Err(GameError::InvalidDeck(format!(
                "need {COMMUNITY_SIZE} community and {} hole cards",
                2 * dealt
            )));
        }

        let first_hand = self.hand_number == 0;
        self.hand_number += 1;
        self.deck = deck;
        self.phase = HandPhase::Prehand;
        self.history = HandHistory::new();
        self.ledger = Ledger::new(self.players.len());
        self.board.clear();
        self.hands.clear();
        self.last_raise = 0;
        for p in &mut self.players {
            let state = if p.chips() > 0 {
                PlayerState::In
            } else {
                PlayerState::Skip
            };
            p.set_state(state);
            p.set_last_pot(0);
        }

        let from = if first_hand {
            self.players.len() - 1
        } else {
            self.btn_loc
        };
        let dealt_in = |p: &Player| p.state() != PlayerState::Skip;
        self.btn_loc = self.next_seat(from, dealt_in).ok_or(GameError::NotEnoughPlayers)?;
        if dealt == 2 {
            self.sb_loc = self.btn_loc;
        } else {
            self.sb_loc = self
                .next_seat(self.btn_loc, dealt_in)
                .ok_or(GameError::NotEnoughPlayers)?;
        }
        self.bb_loc = self
            .next_seat(self.sb_loc, dealt_in)
            .ok_or(GameError::NotEnoughPlayers)?;

        let player_chips = self
            .players
            .iter()
            .filter(|p| p.state() != PlayerState::Skip)
            .map(|p| (p.id(), p.chips()))
            .collect();
        let blinds = vec![
            (self.sb_loc, self.post(self.sb_loc, self.config.small_blind)),
            (self.bb_loc, self.post(self.bb_loc, self.config.big_blind)),
        ];
        self.history.record_prehand(PrehandHistory {
            btn_loc: self.btn_loc,
            sb_loc: self.sb_loc,
            bb_loc: self.bb_loc,
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
            blinds,
            player_chips,
        });

        for seat in self.seat_order() {
            if dealt_in(&self.players[seat]) {
                let cards = self.deck.draw(2, false)?;
                self.hands.insert(seat, [cards[0], cards[1]]);
            }
        }
        debug!(
            hand = self.hand_number,
            btn = self.btn_loc,
            sb = self.sb_loc,
            bb = self.bb_loc,
            players = dealt,
            "hand started"
        );

        self.phase = HandPhase::Preflop;
        self.open_round(Vec::new());
        self.advance(self.bb_loc)
    }

    /// At least two seats have chips.
    pub fn is_game_running(&self) -> bool {
        self.players.iter().filter(|p| p.chips() > 0).count() >= 2
    }

    pub fn is_hand_running(&self) -> bool {
        self.phase.is_betting_round()
    }

    /// Re-stakes busted seats between hands.
    ///
    /// A seat with no chips gets another `buy_in` while it has re-buys left.
    /// If that still leaves fewer than two funded seats, the whole table is
    /// restored to `buy_in`, re-buy counts are cleared and the restart is
    /// counted.
    pub fn reset_game(&mut self) -> Result<(), GameError> {
        if self.is_hand_running() {
            return Err(GameError::HandInProgress);
        }
        let buy_in = self.config.buy_in;
        for p in &mut self.players {
            let used = &mut self.buyin_history[p.id()];
            if p.chips() == 0 && *used < self.config.buyin_limit {
                p.set_chips(buy_in);
                *used += 1;
            }
        }
        if !self.is_game_running() {
            for p in &mut self.players {
                p.set_chips(buy_in);
            }
            self.buyin_history.iter_mut().for_each(|b| *b = 0);
            self.game_restarts += 1;
            info!(restarts = self.game_restarts, "table restarted");
        }
        Ok(())
    }

    // ---- actions ----

    /// Whether `player_id` may take `action` right now. Never changes state.
    pub fn validate_move(&self, player_id: usize, action: ActionType, value: Option<u32>) -> bool {
        self.check_move(player_id, action, value).is_ok()
    }

    /// Same decision as [`Game::validate_move`], naming the reason on rejection.
    pub fn check_move(
        &self,
        player_id: usize,
        action: ActionType,
        value: Option<u32>,
    ) -> Result<(), GameError> {
        self.resolve(player_id, action, value).map(|_| ())
    }

    /// Applies an action for the current player and advances the hand.
    ///
    /// # Errors
    ///
    /// [`GameError::NoHandInProgress`] between hands and
    /// [`GameError::IllegalAction`] for anything [`Game::validate_move`]
    /// rejects. The state is left untouched in both cases.
    pub fn take_action(&mut self, action: ActionType, value: Option<u32>) -> Result<(), GameError> {
        if !self.is_hand_running() {
            return Err(GameError::NoHandInProgress);
        }
        let player_id = self.current_player;
        let validated =
            self.resolve(player_id, action, value)
                .map_err(|e| GameError::IllegalAction {
                    player_id,
                    action,
                    value,
                    reason: e.to_string(),
                })?;

        let bet_level = self.ledger.bet_level();
        let paid = self.players[player_id].bet(validated.chips());
        self.ledger.commit(player_id, paid);

        match validated {
            ValidatedAction::Fold => self.players[player_id].set_state(PlayerState::Out),
            ValidatedAction::Check | ValidatedAction::Call(_) => {}
            ValidatedAction::Raise { .. } | ValidatedAction::AllIn(_) => {
                let level = self.ledger.round(player_id);
                if level > bet_level {
                    let raise = level - bet_level;
                    let full = raise >= self.config.big_blind.max(self.last_raise);
                    if full {
                        self.last_raise = raise;
                    }
                    // A short all-in only reopens raising for seats that
                    // have not yet acted on the current bet.
                    for p in &mut self.players {
                        if p.id() == player_id {
                            continue;
                        }
                        match p.state() {
                            PlayerState::In => {
                                p.set_state(PlayerState::ToCall);
                                self.raise_open[p.id()] = full;
                            }
                            PlayerState::ToCall if full => self.raise_open[p.id()] = true,
                            _ => {}
                        }
                    }
                }
            }
        }
        if self.players[player_id].state() == PlayerState::ToCall {
            self.players[player_id].set_state(PlayerState::In);
        }

        self.history.push_action(
            self.phase,
            PlayerAction {
                player_id,
                action_type: action,
                value,
                chips: paid,
            },
        );
        self.rebuild_pots();
        debug!(
            player = player_id,
            ?action,
            ?value,
            chips = paid,
            phase = ?self.phase,
            "action applied"
        );
        self.advance(player_id)
    }

    // ---- queries ----

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seat to act, while a hand is running.
    pub fn current_player(&self) -> Option<usize> {
        self.is_hand_running().then_some(self.current_player)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Hole cards of every seat dealt into the current hand.
    pub fn hands(&self) -> &BTreeMap<usize, [Card; 2]> {
        &self.hands
    }

    pub fn hand_phase(&self) -> HandPhase {
        self.phase
    }

    pub fn hand_history(&self) -> &HandHistory {
        &self.history
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// Chips the player must add to stay in; 0 for players who cannot act.
    pub fn chips_to_call(&self, player_id: usize) -> u32 {
        let Some(p) = self.players.get(player_id) else {
            return 0;
        };
        if !p.state().is_active() {
            return 0;
        }
        self.pots
            .iter()
            .take(p.last_pot() + 1)
            .map(|pot| pot.chips_to_call(player_id))
            .sum()
    }

    /// Chips committed in the current betting round.
    pub fn player_bet_amount(&self, player_id: usize) -> u32 {
        self.ledger.round(player_id)
    }

    /// Chips committed over the whole hand.
    pub fn player_total_commitment(&self, player_id: usize) -> u32 {
        self.ledger.committed(player_id)
    }

    /// Ranks of every player still holding a claim on a pot, against the
    /// current board.
    pub fn player_hand_scores(&self) -> BTreeMap<usize, HandRank> {
        self.hands
            .iter()
            .filter(|(id, _)| self.players[**id].state().in_pot())
            .filter_map(|(&id, hole)| evaluate(hole, &self.board).ok().map(|r| (id, r)))
            .collect()
    }

    /// Smallest legal raise-to total for the current player.
    pub fn min_raise(&self) -> u32 {
        rules::min_raise_to(
            self.ledger.bet_level(),
            self.config.big_blind,
            self.last_raise,
        )
    }

    /// Largest raise-to total the current player can afford.
    pub fn max_raise(&self) -> u32 {
        self.player_bet_amount(self.current_player) + self.players[self.current_player].chips()
    }

    pub fn btn_loc(&self) -> usize {
        self.btn_loc
    }

    pub fn sb_loc(&self) -> usize {
        self.sb_loc
    }

    pub fn bb_loc(&self) -> usize {
        self.bb_loc
    }

    /// Re-buys used per seat since the last restart.
    pub fn buyin_history(&self) -> &[u32] {
        &self.buyin_history
    }

    pub fn game_restarts(&self) -> u32 {
        self.game_restarts
    }

    /// Stacks plus everything in the pots.
    pub fn total_chips(&self) -> u32 {
        self.players.iter().map(Player::chips).sum::<u32>()
            + self.pots.iter().map(Pot::total).sum::<u32>()
    }

    // ---- internals ----

    fn ensure_can_start(&self) -> Result<(), GameError> {
        if self.is_hand_running() {
            return Err(GameError::HandInProgress);
        }
        if !self.is_game_running() {
            return Err(GameError::NotEnoughPlayers);
        }
        Ok(())
    }

    fn resolve(
        &self,
        player_id: usize,
        action: ActionType,
        value: Option<u32>,
    ) -> Result<ValidatedAction, GameError> {
        if !self.is_hand_running() {
            return Err(GameError::NoHandInProgress);
        }
        if player_id != self.current_player {
            return Err(GameError::NotPlayersTurn {
                expected: self.current_player,
                actual: player_id,
            });
        }
        let p = &self.players[player_id];
        let situation = Situation {
            player_id,
            state: p.state(),
            chips: p.chips(),
            to_call: self.chips_to_call(player_id),
            bet_amount: self.player_bet_amount(player_id),
            min_raise_to: self.min_raise(),
            can_raise: self.raise_open[player_id],
        };
        rules::validate_action(&situation, action, value)
    }

    /// First seat after `from`, wrapping, that matches `pred`.
    fn next_seat(&self, from: usize, pred: impl Fn(&Player) -> bool) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|k| (from + k) % n)
            .find(|&seat| pred(&self.players[seat]))
    }

    /// Every seat, starting left of the button.
    fn seat_order(&self) -> Vec<usize> {
        let n = self.players.len();
        (1..=n).map(|k| (self.btn_loc + k) % n).collect()
    }

    fn post(&mut self, seat: usize, blind: u32) -> u32 {
        let paid = self.players[seat].bet(blind);
        self.ledger.commit(seat, paid);
        paid
    }

    fn rebuild_pots(&mut self) {
        let states: Vec<PlayerState> = self.players.iter().map(Player::state).collect();
        self.pots = self.ledger.build_pots(&states);
        for p in &mut self.players {
            let last = self
                .pots
                .iter()
                .rposition(|pot| pot.eligible().contains(&p.id()))
                .unwrap_or(0);
            p.set_last_pot(last);
        }
    }

    /// Puts every player who can still bet back on the hook and logs the
    /// round's opening.
    fn open_round(&mut self, new_cards: Vec<Card>) {
        for p in &mut self.players {
            if p.state().is_active() {
                p.set_state(PlayerState::ToCall);
            }
        }
        self.raise_open.iter_mut().for_each(|open| *open = true);
        self.history.open_round(self.phase, new_cards);
        self.rebuild_pots();
        debug!(phase = ?self.phase, board = self.board.len(), "betting round opened");
    }

    /// Moves play on after `from` acted: settles, closes rounds, or hands the
    /// turn to the next seat that owes a decision.
    fn advance(&mut self, mut from: usize) -> Result<(), GameError> {
        loop {
            let in_pot = self.players.iter().filter(|p| p.state().in_pot()).count();
            if in_pot <= 1 {
                self.settle(Vec::new());
                return Ok(());
            }

            let active = self.players.iter().filter(|p| p.state().is_active()).count();
            let owed = self
                .players
                .iter()
                .any(|p| p.state().is_active() && self.chips_to_call(p.id()) > 0);
            if active < 2 && !owed {
                let rest = self.deck.community_remaining();
                let cards = self.deck.draw(rest, true)?;
                self.board.extend_from_slice(&cards);
                self.settle(cards);
                return Ok(());
            }

            if let Some(next) = self.next_seat(from, |p| p.state() == PlayerState::ToCall) {
                self.current_player = next;
                return Ok(());
            }

            if self.phase == HandPhase::River {
                self.settle(Vec::new());
                return Ok(());
            }
            self.ledger.close_round();
            self.last_raise = 0;
            self.phase = self.phase.next();
            let cards = self.deck.draw(self.phase.new_cards(), true)?;
            self.board.extend_from_slice(&cards);
            self.open_round(cards);
            from = self.btn_loc;
        }
    }

    fn settle(&mut self, new_cards: Vec<Card>) {
        self.ledger.close_round();
        self.rebuild_pots();
        self.phase = HandPhase::Settle;

        let showdown = self.players.iter().filter(|p| p.state().in_pot()).count() > 1;
        let scores = if showdown {
            self.player_hand_scores()
        } else {
            BTreeMap::new()
        };
        let order = self.seat_order();
        let mut pot_winners = BTreeMap::new();
        for (i, pot) in self.pots.iter().enumerate() {
            let award = pot::award(pot, &scores, &order);
            for (seat, share) in pot::split(award.amount, &award.winners) {
                self.players[seat].add_chips(share);
            }
            info!(
                hand = self.hand_number,
                pot = i,
                amount = award.amount,
                winners = ?award.winners,
                "pot awarded"
            );
            pot_winners.insert(i, award);
        }
        self.pots.clear();
        self.ledger = Ledger::new(self.players.len());
        self.history.record_settle(SettleHistory {
            new_cards,
            pot_winners,
        });
    }
}
