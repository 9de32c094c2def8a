//! The battle orchestrator: phases, move commitment, queue building and
//! round lifecycle.

use crate::config::BattleConfig;
use crate::data::spells::SpellKind;
use crate::log::{BattleLog, EventToken};
use crate::sim::ai::OpponentPolicy;
use crate::sim::hexes::Weather;
use crate::sim::stats::Stat;
use crate::sim::team::{Move, Team};
use crate::sim::turn::{execute_step, perform_swap, RoundCtx, TurnStep};
use anyhow::Result;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Victory { team: usize },
    Draw,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Waiting for both sides to commit a move.
    Choosing,
    /// The turn queue is draining; inputs are locked.
    Resolving,
    Finished(Outcome),
}

/// Why a `submit_move` call was rejected. Nothing is mutated on rejection.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SubmitError {
    #[error("the battle is already over")]
    BattleOver,
    #[error("a round is resolving; inputs are locked")]
    RoundInProgress,
    #[error("this side already committed a move this round")]
    AlreadyCommitted,
    #[error("no spell at that index")]
    NoSuchSpell,
    #[error("that spell has no uses left")]
    SpellExhausted,
    #[error("no such roster slot to swap to")]
    NoSuchSlot,
    #[error("that combatant has fainted")]
    FaintedTarget,
    #[error("swapping is blocked by a binding hex")]
    SwapBlocked,
    #[error("a replacement swap is required first")]
    SwapRequired,
    #[error("nothing committed to undo")]
    NothingCommitted,
}

/// A whole battle. Owns both teams, the weather and the turn queue; all
/// randomness flows through one seedable generator.
#[derive(Clone, Debug)]
pub struct Battle {
    teams: [Team; 2],
    weather: Option<Weather>,
    config: BattleConfig,
    log: BattleLog,
    rng: SmallRng,
    round: u32,
    phase: Phase,
    queue: VecDeque<TurnStep>,
    /// This round's resolution order, fastest side first.
    order: [usize; 2],
}

impl Battle {
    pub fn new(teams: [Team; 2], config: BattleConfig, seed: u64) -> Self {
        Self {
            teams,
            weather: None,
            config,
            log: BattleLog::new(),
            rng: SmallRng::seed_from_u64(seed),
            round: 0,
            phase: Phase::Choosing,
            queue: VecDeque::new(),
            order: [0, 1],
        }
    }

    pub fn from_templates(a: &[&str], b: &[&str], config: BattleConfig, seed: u64) -> Result<Self> {
        Ok(Self::new(
            [Team::from_templates(a)?, Team::from_templates(b)?],
            config,
            seed,
        ))
    }

    pub fn team(&self, side: usize) -> &Team {
        &self.teams[side]
    }

    /// Mutable roster access for external drivers (setup, save/load).
    pub fn team_mut(&mut self, side: usize) -> &mut Team {
        &mut self.teams[side]
    }

    pub fn weather(&self) -> Option<Weather> {
        self.weather
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Commit a move for `side`. When the side must replace a fainted
    /// combatant the swap is free: it resolves immediately and does not
    /// consume the round. Once both sides have committed, the round begins
    /// and inputs lock until the queue drains.
    pub fn submit_move(&mut self, side: usize, mv: Move) -> Result<(), SubmitError> {
        match self.phase {
            Phase::Finished(_) => return Err(SubmitError::BattleOver),
            Phase::Resolving => return Err(SubmitError::RoundInProgress),
            Phase::Choosing => {}
        }
        if self.teams[side].pending.is_some() {
            return Err(SubmitError::AlreadyCommitted);
        }

        if self.teams[side].must_swap {
            let Move::Swap { slot } = mv else {
                return Err(SubmitError::SwapRequired);
            };
            // The replacement is mandatory, so a binding hex on the
            // fainted combatant does not block it.
            self.validate_slot(side, slot)?;
            let mut ctx = RoundCtx {
                teams: &mut self.teams,
                weather: &mut self.weather,
                config: &self.config,
                log: &mut self.log,
            };
            perform_swap(&mut ctx, side, slot, &mut self.rng);
            return Ok(());
        }

        let committed = match mv {
            Move::Swap { slot } => {
                self.validate_slot(side, slot)?;
                if self.teams[side].active().has_hex("entangle") {
                    return Err(SubmitError::SwapBlocked);
                }
                mv
            }
            Move::Spell { index } => {
                let active = self.teams[side].active();
                let spell = active.spells.get(index).ok_or(SubmitError::NoSuchSpell)?;
                if spell.is_exhausted() {
                    return Err(SubmitError::SpellExhausted);
                }
                self.override_spell_choice(side, index)
            }
        };
        self.teams[side].pending = Some(committed);

        if self.teams[0].pending.is_some() && self.teams[1].pending.is_some() {
            self.begin_round();
        }
        Ok(())
    }

    /// Retract a committed move before the round begins.
    pub fn undo_move(&mut self, side: usize) -> Result<(), SubmitError> {
        match self.phase {
            Phase::Finished(_) => return Err(SubmitError::BattleOver),
            Phase::Resolving => return Err(SubmitError::RoundInProgress),
            Phase::Choosing => {}
        }
        if self.teams[side].pending.take().is_none() {
            return Err(SubmitError::NothingCommitted);
        }
        Ok(())
    }

    /// Commit the caller's move for side 0 and let `policy` answer for
    /// side 1, including any replacement swap it owes first.
    pub fn submit_against<P: OpponentPolicy>(
        &mut self,
        mv: Move,
        policy: &mut P,
    ) -> Result<(), SubmitError> {
        if self.teams[1].must_swap {
            let swap = policy.choose(self, 1);
            self.submit_move(1, swap)?;
        }
        self.submit_move(0, mv)?;
        if self.teams[0].pending.is_some() && self.teams[1].pending.is_none() {
            let reply = policy.choose(self, 1);
            self.submit_move(1, reply)?;
        }
        Ok(())
    }

    pub fn forfeit(&mut self, side: usize) {
        if self.is_over() {
            return;
        }
        self.teams[side].forfeited = true;
        self.log.push(EventToken::Forfeited { team: side });
        // Mid-resolution forfeits are evaluated when the queue drains.
        if self.phase != Phase::Resolving {
            self.evaluate_game_over();
        }
    }

    /// Execute one queued entry and return it, or `None` when no round is
    /// resolving. The caller drains at its own pace; pacing never changes
    /// outcomes.
    pub fn step(&mut self) -> Option<TurnStep> {
        if self.phase != Phase::Resolving {
            return None;
        }
        let entry = self.queue.pop_front()?;
        let mut ctx = RoundCtx {
            teams: &mut self.teams,
            weather: &mut self.weather,
            config: &self.config,
            log: &mut self.log,
        };
        execute_step(&mut ctx, entry, &mut self.rng);
        self.faint_sweep();
        if self.queue.is_empty() {
            self.finish_round();
        }
        Some(entry)
    }

    /// Drain the whole queue.
    pub fn resolve_round(&mut self) {
        while self.step().is_some() {}
    }

    fn validate_slot(&self, side: usize, slot: usize) -> Result<(), SubmitError> {
        let team = &self.teams[side];
        if slot >= team.roster.len() || slot == team.active {
            return Err(SubmitError::NoSuchSlot);
        }
        if team.roster[slot].is_fainted() {
            return Err(SubmitError::FaintedTarget);
        }
        Ok(())
    }

    /// Commit-time hex overrides. The restriction hex repeats the last
    /// non-swap move when it still has uses; only if no restriction applied
    /// does the confusion hex roll a random usable spell.
    fn override_spell_choice(&mut self, side: usize, chosen: usize) -> Move {
        let team = &self.teams[side];
        let active = team.active();
        if active.has_hex("shackle") {
            if let Some(Move::Spell { index }) = team.last_spell_move() {
                let usable = active.spells.get(index).map_or(false, |s| !s.is_exhausted());
                if usable {
                    return Move::Spell { index };
                }
            }
        } else if active.has_hex("befuddle") {
            let usable: Vec<usize> = active
                .spells
                .iter()
                .enumerate()
                .filter(|(_, spell)| !spell.is_exhausted())
                .map(|(index, _)| index)
                .collect();
            if let Some(&index) = usable.choose(&mut self.rng) {
                return Move::Spell { index };
            }
        }
        Move::Spell { index: chosen }
    }

    fn begin_round(&mut self) {
        self.round += 1;
        self.phase = Phase::Resolving;
        self.log.push(EventToken::RoundStart { round: self.round });
        let first = self.first_side();
        self.order = [first, 1 - first];
        for side in self.order {
            self.enqueue_move(side);
        }
        for side in self.order {
            self.queue.push_back(TurnStep::HexTick { team: side });
            self.queue.push_back(TurnStep::RegenProc { team: side });
        }
    }

    /// Priority rule: a swap beats everything, a shield beats spells,
    /// otherwise the higher modified agility moves first, ties uniform
    /// random.
    fn first_side(&mut self) -> usize {
        let rank = |team: &Team| -> (u8, u16) {
            match team.pending {
                Some(Move::Swap { .. }) => (2, team.active().modified_stat(Stat::Agility)),
                Some(Move::Spell { index }) => {
                    let shield = team
                        .active()
                        .spells
                        .get(index)
                        .map_or(false, |s| s.data.kind == SpellKind::Shield);
                    let tier = if shield { 1 } else { 0 };
                    (tier, team.active().modified_stat(Stat::Agility))
                }
                None => (0, 0),
            }
        };
        let a = rank(&self.teams[0]);
        let b = rank(&self.teams[1]);
        if a.0 != b.0 {
            return if a.0 > b.0 { 0 } else { 1 };
        }
        if a.1 != b.1 {
            return if a.1 > b.1 { 0 } else { 1 };
        }
        usize::from(!self.rng.gen_bool(0.5))
    }

    fn enqueue_move(&mut self, side: usize) {
        match self.teams[side].pending {
            Some(Move::Swap { slot }) => {
                self.queue.push_back(TurnStep::Swap { team: side, slot });
            }
            Some(Move::Spell { index }) => {
                self.queue.push_back(TurnStep::Announce { team: side });
                let count = self.teams[side].active().spells[index].data.sub_spells.len();
                for sub in 0..count {
                    self.queue.push_back(TurnStep::SubSpell { team: side, index: sub });
                }
            }
            None => {}
        }
    }

    /// Any newly fainted active gets an acknowledgement entry at the front
    /// of the queue, faster side first.
    fn faint_sweep(&mut self) {
        for side in [self.order[1], self.order[0]] {
            let team = &self.teams[side];
            let pending_ack = self.queue.contains(&TurnStep::Faint { team: side });
            if team.active().is_fainted() && !team.must_swap && !pending_ack {
                self.queue.push_front(TurnStep::Faint { team: side });
            }
        }
    }

    fn finish_round(&mut self) {
        for side in self.order {
            // Durations tick for benched combatants too.
            for combatant in self.teams[side].roster.iter_mut() {
                let expired = combatant.decay_hexes();
                for hex in expired {
                    self.log.push(EventToken::HexExpired {
                        team: side,
                        hex: hex.to_string(),
                    });
                }
            }
        }
        if let Some(weather) = self.weather.as_mut() {
            weather.turns_left -= 1;
            if weather.turns_left == 0 {
                self.weather = None;
                self.log.push(EventToken::WeatherEnded);
            }
        }
        let keep = self.config.history_len;
        for team in self.teams.iter_mut() {
            if let Some(mv) = team.pending.take() {
                team.push_history(mv, keep);
            }
            team.shield_up = false;
            team.spell_fizzled = false;
        }
        self.evaluate_game_over();
        if self.phase == Phase::Resolving {
            self.phase = Phase::Choosing;
        }
    }

    fn evaluate_game_over(&mut self) {
        let standing =
            |side: usize| self.teams[side].has_standing() && !self.teams[side].forfeited;
        match (standing(0), standing(1)) {
            (true, true) => {}
            (true, false) => self.conclude(Outcome::Victory { team: 0 }),
            (false, true) => self.conclude(Outcome::Victory { team: 1 }),
            (false, false) => self.conclude(Outcome::Draw),
        }
    }

    fn conclude(&mut self, outcome: Outcome) {
        self.log.push(match outcome {
            Outcome::Victory { team } => EventToken::BattleWon { team },
            Outcome::Draw => EventToken::BattleDrawn,
        });
        self.phase = Phase::Finished(outcome);
    }
}
