//! Pure damage and modifier formulas.

use crate::data::artifacts::Artifact;
use crate::data::elements::{advantage, Element, WeatherKind};
use crate::data::spells::SpellKind;
use crate::sim::combatant::Combatant;
use crate::sim::spells::effective_power;
use crate::sim::stats::Stat;
use rand::Rng;

/// Elemental modifier: the product of the combatant-element contribution
/// and the independent spell-element contribution, each x2/x0.5/x1.
/// Values land in {4.0, 2.0, 1.0, 0.5, 0.25}.
pub fn elemental_modifier(attacker: Element, defender: Element, spell: Element) -> f32 {
    advantage(attacker, defender) * advantage(spell, defender)
}

/// x1.5 when the active weather's paired element set includes the spell
/// element, else x1.
pub fn weather_modifier(weather: Option<WeatherKind>, spell: Element) -> f32 {
    match weather {
        Some(kind) if kind.boosts(spell) => 1.5,
        _ => 1.0,
    }
}

/// Unscaled damage before the critical roll. The defense floor of 1
/// prevents divide-by-zero.
pub fn base_damage(attack: u16, defense: u16, power: u16, elemental: f32, weather: f32) -> f32 {
    let raw = (power as f32 / 100.0 * attack as f32 * 16.0) / defense.max(1) as f32;
    raw * elemental * weather
}

/// Two independent draws in [0, 100): the trigger draw must fall under
/// precision/8, the not-resisted draw must fall at or above resistance/10.
pub fn critical_roll(precision: u16, resistance: u16, rng: &mut impl Rng) -> bool {
    let triggers = rng.gen_range(0.0..100.0) < precision as f32 / 8.0;
    let not_resisted = rng.gen_range(0.0..100.0) >= resistance as f32 / 10.0;
    triggers && not_resisted
}

pub const CRIT_MULTIPLIER: f32 = 1.5;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DamageResult {
    pub dealt: u16,
    pub fainted: bool,
    /// The LastStand artifact held the combatant at 1 HP (and was consumed).
    pub last_stand: bool,
    /// An aegis hex held the combatant at 1 HP (and was consumed).
    pub guarded: bool,
}

/// Resolve rounded damage against `defender`, honoring the survive-at-1
/// defenses and clamping at 0.
pub fn apply_damage(defender: &mut Combatant, amount: f32) -> DamageResult {
    let mut damage = amount.round().max(0.0).min(u16::MAX as f32) as u16;
    let mut result = DamageResult::default();

    if damage >= defender.current_hp && defender.current_hp > 1 {
        if defender.has_hex("aegis") {
            defender.remove_hex("aegis");
            damage = defender.current_hp - 1;
            result.guarded = true;
        } else if defender.artifact == Some(Artifact::LastStand) {
            defender.override_artifact(None);
            damage = defender.current_hp - 1;
            result.last_stand = true;
        }
    }

    defender.take_damage(damage);
    result.dealt = damage;
    result.fainted = defender.is_fainted();
    result
}

/// Non-random kill check used by the opponent policy: same base-damage
/// formula, no critical roll, survive-at-1 defenses respected.
pub fn will_guarantee_faint(
    attacker: &Combatant,
    defender: &Combatant,
    kind: SpellKind,
    power: u16,
    spell_element: Element,
    prior_uses: u8,
    weather: Option<WeatherKind>,
) -> bool {
    // The survive-at-1 defenses only hold a combatant above 1 HP, so a
    // defender already at 1 gets no protection from them.
    if defender.current_hp > 1
        && (defender.has_hex("aegis") || defender.artifact == Some(Artifact::LastStand))
    {
        return false;
    }
    let power = effective_power(kind, power, attacker, prior_uses);
    let elemental = elemental_modifier(attacker.element, defender.element, spell_element);
    let weather = weather_modifier(weather, spell_element);
    let damage = base_damage(
        attacker.modified_stat(Stat::Attack),
        defender.modified_stat(Stat::Defense),
        power,
        elemental,
        weather,
    );
    damage.round() as u16 >= defender.current_hp
}
