use crate::data::spells::{SpellData, SpellKind};
use crate::sim::combatant::Combatant;

/// A spell slot with its battle-scoped usage counter.
#[derive(Clone, Copy, Debug)]
pub struct Spell {
    pub data: &'static SpellData,
    pub used: u8,
}

impl Spell {
    pub fn new(data: &'static SpellData) -> Self {
        Self { data, used: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.data.uses
    }

    pub fn uses_left(&self) -> u8 {
        self.data.uses.saturating_sub(self.used)
    }
}

/// Effective power of a damaging sub-spell after the spell-kind transform.
///
/// `prior_uses` counts completed uses before this one (RampingDamage).
pub fn effective_power(kind: SpellKind, power: u16, user: &Combatant, prior_uses: u8) -> u16 {
    let max = user.max_health().max(1) as f32;
    let current = user.current_hp as f32;
    match kind {
        SpellKind::RampingDamage => power.saturating_mul(1 + prior_uses as u16),
        SpellKind::DesperationDamage => {
            let missing = (max - current).max(0.0) / max;
            (power as f32 * (1.0 + 2.0 * missing)).round() as u16
        }
        SpellKind::SurgeDamage => ((power as f32 * current / max).round() as u16).max(1),
        SpellKind::HexFeedDamage => power.saturating_mul(1 + user.hexes.len() as u16),
        _ => power,
    }
}
