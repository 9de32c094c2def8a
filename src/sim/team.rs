use crate::sim::combatant::Combatant;
use anyhow::{bail, Result};
use std::collections::VecDeque;

pub const MAX_ROSTER: usize = 4;

/// One side's committed action for a round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Move {
    Spell { index: usize },
    Swap { slot: usize },
}

impl Move {
    pub fn is_swap(&self) -> bool {
        matches!(self, Move::Swap { .. })
    }
}

/// A side: roster plus battle-scoped bookkeeping. The active combatant is
/// an index into the owned roster, never an aliasable reference.
#[derive(Clone, Debug)]
pub struct Team {
    pub roster: Vec<Combatant>,
    pub active: usize,
    /// Recent committed moves, front = most recent.
    pub history: VecDeque<Move>,
    pub must_swap: bool,
    pub forfeited: bool,
    /// Committed move for the round in progress, if any.
    pub pending: Option<Move>,
    /// Set while this side's shield is up for the round.
    pub shield_up: bool,
    /// Set when the round's spell fizzled at its first sub-step; the
    /// remaining sub-steps are skipped.
    pub spell_fizzled: bool,
    /// Set by a sacrifice; the next swap-in arrives at full health.
    pub full_heal_next_swap: bool,
}

impl Team {
    /// Structural invariants are enforced here, not mid-battle.
    pub fn build(roster: Vec<Combatant>) -> Result<Self> {
        if roster.is_empty() {
            bail!("a team needs at least one combatant");
        }
        if roster.len() > MAX_ROSTER {
            bail!("a team holds at most {} combatants, got {}", MAX_ROSTER, roster.len());
        }
        Ok(Self {
            roster,
            active: 0,
            history: VecDeque::new(),
            must_swap: false,
            forfeited: false,
            pending: None,
            shield_up: false,
            spell_fizzled: false,
            full_heal_next_swap: false,
        })
    }

    pub fn from_templates(keys: &[&str]) -> Result<Self> {
        let roster = keys
            .iter()
            .map(|key| Combatant::from_template(key))
            .collect::<Result<Vec<_>>>()?;
        Self::build(roster)
    }

    pub fn active(&self) -> &Combatant {
        &self.roster[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Combatant {
        &mut self.roster[self.active]
    }

    pub fn has_standing(&self) -> bool {
        self.roster.iter().any(|c| !c.is_fainted())
    }

    /// Roster slots that are legal swap targets right now.
    pub fn swap_candidates(&self) -> impl Iterator<Item = usize> + '_ {
        self.roster
            .iter()
            .enumerate()
            .filter(move |(slot, c)| *slot != self.active && !c.is_fainted())
            .map(|(slot, _)| slot)
    }

    pub fn push_history(&mut self, mv: Move, keep: usize) {
        self.history.push_front(mv);
        self.history.truncate(keep);
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.front().copied()
    }

    /// Most recent non-swap move, for the restriction hex.
    pub fn last_spell_move(&self) -> Option<Move> {
        self.history.iter().find(|mv| !mv.is_swap()).copied()
    }
}
