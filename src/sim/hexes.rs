//! Runtime hexes and the chance-based hex applier.

use crate::data::elements::WeatherKind;
use crate::data::hexes::{get_hex, HexData};
use crate::data::spells::{SubSpellData, TargetRange};
use crate::sim::combatant::Combatant;
use crate::sim::stats::{parse_stat, Stat};
use rand::Rng;

/// An active hex on a combatant.
#[derive(Clone, Copy, Debug)]
pub struct Hex {
    pub data: &'static HexData,
    /// Rounds remaining; -1 means "until removed".
    pub turns_left: i8,
}

impl Hex {
    pub fn from_key(key: &str) -> Option<Self> {
        let data = get_hex(key)?;
        Some(Self {
            data,
            turns_left: data.turns,
        })
    }

    pub fn name(&self) -> &'static str {
        self.data.name
    }

    pub fn is_harmful(&self) -> bool {
        self.data.harmful
    }

    pub fn stat_multiplier(&self, stat: Stat) -> f32 {
        match self.data.stat {
            Some((id, multiplier)) if parse_stat(id) == Some(stat) => multiplier,
            _ => 1.0,
        }
    }

    pub fn opposite(&self) -> Option<&'static HexData> {
        self.data.opposite.and_then(get_hex)
    }
}

/// Global weather: a single hex-shaped condition not attached to anyone.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Weather {
    pub kind: WeatherKind,
    pub turns_left: u8,
}

/// Outcome tag of a hex application attempt. The tag is the contract;
/// turning it into text is the presentation layer's job.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HexOutcome {
    StatIncreased(Stat),
    StatDecreased(Stat),
    Applied(&'static str),
    Failed,
}

/// Resolve the hex part of a sub-spell from `attacker` against `defender`.
///
/// The roll is gated by the sub-spell's base chance plus a precision-derived
/// bonus. Self-ranged hexes target the attacker and are never resistible.
/// A redirecting ability on an enemy target swaps a harmful hex for its
/// declared opposite when one exists.
pub fn apply_sub_spell_hex(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    sub: &SubSpellData,
    hex_cap: usize,
    rng: &mut impl Rng,
) -> HexOutcome {
    let Some(hex_key) = sub.hex else {
        return HexOutcome::Failed;
    };
    let Some(mut hex) = Hex::from_key(hex_key) else {
        return HexOutcome::Failed;
    };

    let bonus = attacker.modified_stat(Stat::Precision) / 10;
    let chance = (sub.hex_chance as u16 + bonus).min(100);
    if rng.gen_range(0..100u16) >= chance {
        return HexOutcome::Failed;
    }

    let self_targeted = sub.range == TargetRange::Slf;
    let target = if self_targeted { attacker } else { defender };
    if target.is_fainted() {
        return HexOutcome::Failed;
    }

    if !self_targeted && hex.is_harmful() && target.ability.redirects_hexes() {
        if let Some(opposite) = hex.opposite() {
            hex = Hex {
                data: opposite,
                turns_left: opposite.turns,
            };
        }
    }

    let resistible = !self_targeted;
    if !target.apply_hex(hex, resistible, hex_cap, rng) {
        return HexOutcome::Failed;
    }

    match hex.data.stat {
        Some((id, multiplier)) => {
            let stat = parse_stat(id).unwrap_or(Stat::Attack);
            if multiplier > 1.0 {
                HexOutcome::StatIncreased(stat)
            } else {
                HexOutcome::StatDecreased(stat)
            }
        }
        None => HexOutcome::Applied(hex.data.name),
    }
}
