//! The turn executor: resolves one queued step into tokens and state.

use crate::config::BattleConfig;
use crate::data::artifacts::Artifact;
use crate::data::elements::Element;
use crate::data::spells::{SpellKind, TargetRange};
use crate::log::{BattleLog, EventToken};
use crate::sim::calc::{
    apply_damage, base_damage, critical_roll, elemental_modifier, weather_modifier, CRIT_MULTIPLIER,
};
use crate::sim::hexes::{apply_sub_spell_hex, Hex, HexOutcome, Weather};
use crate::sim::spells::effective_power;
use crate::sim::stats::Stat;
use crate::sim::team::{Move, Team};
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;

/// One atomic entry of the round's turn queue.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TurnStep {
    /// Acknowledge the side's fainted active combatant.
    Faint { team: usize },
    /// End-of-round hex damage/heal ticks for the side's active combatant.
    HexTick { team: usize },
    /// Regenerator artifact proc.
    RegenProc { team: usize },
    /// Spell-use announcement; no numeric effect happens here.
    Announce { team: usize },
    /// Resolve sub-spell `index` of the side's committed spell.
    SubSpell { team: usize, index: usize },
    /// Resolve a swap onto roster `slot`.
    Swap { team: usize, slot: usize },
}

impl TurnStep {
    pub fn team(&self) -> usize {
        match *self {
            TurnStep::Faint { team }
            | TurnStep::HexTick { team }
            | TurnStep::RegenProc { team }
            | TurnStep::Announce { team }
            | TurnStep::SubSpell { team, .. }
            | TurnStep::Swap { team, .. } => team,
        }
    }
}

/// Mutable view of everything a step may touch.
pub(crate) struct RoundCtx<'a> {
    pub teams: &'a mut [Team; 2],
    pub weather: &'a mut Option<Weather>,
    pub config: &'a BattleConfig,
    pub log: &'a mut BattleLog,
}

pub(crate) fn split_teams(teams: &mut [Team; 2], side: usize) -> (&mut Team, &mut Team) {
    let (head, tail) = teams.split_at_mut(1);
    if side == 0 {
        (&mut head[0], &mut tail[0])
    } else {
        (&mut tail[0], &mut head[0])
    }
}

pub(crate) fn execute_step(ctx: &mut RoundCtx<'_>, step: TurnStep, rng: &mut SmallRng) {
    let side = step.team();
    // A fainted active combatant turns any remaining entry for its side
    // into a faint acknowledgement.
    let fainted = ctx.teams[side].active().is_fainted();
    match step {
        TurnStep::Faint { .. } => acknowledge_faint(ctx, side, rng),
        _ if fainted => acknowledge_faint(ctx, side, rng),
        TurnStep::HexTick { .. } => hex_tick(ctx, side),
        TurnStep::RegenProc { .. } => regen_proc(ctx, side),
        TurnStep::Announce { .. } => announce(ctx, side),
        TurnStep::SubSpell { index, .. } => sub_spell(ctx, side, index, rng),
        TurnStep::Swap { slot, .. } => swap(ctx, side, slot, rng),
    }
}

fn acknowledge_faint(ctx: &mut RoundCtx<'_>, side: usize, rng: &mut SmallRng) {
    if ctx.teams[side].must_swap {
        // Already acknowledged this faint.
        return;
    }
    ctx.teams[side].must_swap = true;
    ctx.log.push(EventToken::Fainted { team: side });
    let (acting, other) = split_teams(ctx.teams, side);
    if acting.active().artifact == Some(Artifact::PosthumousCurse) {
        if let Some(hex) = Hex::from_key("blight") {
            let landed = other
                .active_mut()
                .apply_hex(hex, true, ctx.config.hex_cap, rng);
            let foe = 1 - side;
            if landed {
                ctx.log.push(EventToken::HexApplied {
                    team: foe,
                    hex: "blight".to_string(),
                });
            } else {
                ctx.log.push(EventToken::HexFailed { team: foe });
            }
        }
    }
}

fn hex_tick(ctx: &mut RoundCtx<'_>, side: usize) {
    let active = ctx.teams[side].active_mut();
    let max = active.max_health();
    let ticks: Vec<(&'static str, i8)> = active
        .hexes
        .iter()
        .filter(|hex| hex.data.tick_percent != 0)
        .map(|hex| (hex.name(), hex.data.tick_percent))
        .collect();
    for (name, percent) in ticks {
        let amount = ((max as u32 * percent.unsigned_abs() as u32) / 100).max(1) as u16;
        let healing = percent > 0;
        let applied = if healing {
            ctx.teams[side].active_mut().heal(amount)
        } else {
            let active = ctx.teams[side].active_mut();
            let applied = amount.min(active.current_hp);
            active.take_damage(amount);
            applied
        };
        ctx.log.push(EventToken::HexTick {
            team: side,
            hex: name.to_string(),
            amount: applied,
            healing,
        });
        if ctx.teams[side].active().is_fainted() {
            // The faint sweep appends the acknowledgement entry.
            break;
        }
    }
}

fn regen_proc(ctx: &mut RoundCtx<'_>, side: usize) {
    let active = ctx.teams[side].active_mut();
    if active.artifact != Some(Artifact::Regenerator) {
        return;
    }
    let amount = (active.max_health() / 16).max(1);
    let healed = active.heal(amount);
    if healed > 0 {
        ctx.log.push(EventToken::RegenProc {
            team: side,
            amount: healed,
        });
    }
}

fn announce(ctx: &mut RoundCtx<'_>, side: usize) {
    let team = &ctx.teams[side];
    if let Some(Move::Spell { index }) = team.pending {
        let spell = team.active().spells[index];
        ctx.log.push(EventToken::SpellUsed {
            team: side,
            spell: spell.data.name.to_string(),
        });
    }
}

fn sub_spell(ctx: &mut RoundCtx<'_>, side: usize, index: usize, rng: &mut SmallRng) {
    let foe = 1 - side;
    let Some(Move::Spell { index: spell_idx }) = ctx.teams[side].pending else {
        return;
    };
    let spell = ctx.teams[side].active().spells[spell_idx];
    let data = spell.data;

    if index == 0 {
        if spell.is_exhausted() {
            ctx.teams[side].spell_fizzled = true;
            ctx.log.push(EventToken::SpellFailed { team: side });
        } else {
            ctx.teams[side].active_mut().spells[spell_idx].used += 1;
        }
    }
    if ctx.teams[side].spell_fizzled {
        return;
    }
    let Some(sub) = data.sub_spells.get(index).copied() else {
        return;
    };

    // A standing shield stops enemy-targeted effects; a piercing spell
    // instead hits through it for double damage.
    let mut shield_doubled = false;
    if sub.range == TargetRange::Enemy && ctx.teams[foe].shield_up {
        if data.kind == SpellKind::PiercingDamage {
            shield_doubled = true;
            ctx.log.push(EventToken::ShieldPierced { team: foe });
        } else {
            ctx.log.push(EventToken::ShieldBlocked { team: foe });
            return;
        }
    }

    match data.kind {
        kind if kind.is_damaging() => {
            // The counter was incremented at the first sub-step.
            let prior_uses = ctx.teams[side].active().spells[spell_idx].used.saturating_sub(1);
            let (acting, other) = split_teams(ctx.teams, side);
            let attacker = acting.active();
            let defender = other.active();
            let power = effective_power(kind, sub.power, attacker, prior_uses);
            let elemental = elemental_modifier(attacker.element, defender.element, data.element);
            let wmod = weather_modifier(ctx.weather.map(|w| w.kind), data.element);
            let mut raw = base_damage(
                attacker.modified_stat(Stat::Attack),
                defender.modified_stat(Stat::Defense),
                power,
                elemental,
                wmod,
            );
            let critical = critical_roll(
                attacker.modified_stat(Stat::Precision),
                defender.modified_stat(Stat::Resistance),
                rng,
            );
            if critical {
                raw *= CRIT_MULTIPLIER;
            }
            if shield_doubled {
                raw *= 2.0;
            }
            let result = apply_damage(other.active_mut(), raw);
            ctx.log.push(EventToken::DamageDealt {
                team: foe,
                amount: result.dealt,
                critical,
            });
            if result.last_stand {
                ctx.log.push(EventToken::LastStandHeld { team: foe });
            }
            if result.guarded {
                ctx.log.push(EventToken::GuardHeld { team: foe });
            }
            if !result.fainted
                && result.dealt > 0
                && other.active().artifact == Some(Artifact::Ejector)
                && !other.must_swap
                && other.swap_candidates().next().is_some()
            {
                other.must_swap = true;
                ctx.log.push(EventToken::ForcedSwap { team: foe });
            }
        }
        SpellKind::Heal => {
            let active = ctx.teams[side].active_mut();
            if active.has_hex("sear") {
                ctx.log.push(EventToken::HealBlocked { team: side });
                return;
            }
            let missing = active.max_health().saturating_sub(active.current_hp);
            let amount = (missing as u32 * sub.heal_percent as u32 / 100) as u16;
            let healed = active.heal(amount);
            ctx.log.push(EventToken::Healed {
                team: side,
                amount: healed,
            });
        }
        SpellKind::HexInflict => {
            let target_side = if sub.range == TargetRange::Slf { side } else { foe };
            let (acting, other) = split_teams(ctx.teams, side);
            let outcome = apply_sub_spell_hex(
                acting.active_mut(),
                other.active_mut(),
                &sub,
                ctx.config.hex_cap,
                rng,
            );
            ctx.log.push(match outcome {
                HexOutcome::StatIncreased(stat) => EventToken::StatIncreased {
                    team: target_side,
                    stat: stat.id().to_string(),
                },
                HexOutcome::StatDecreased(stat) => EventToken::StatDecreased {
                    team: target_side,
                    stat: stat.id().to_string(),
                },
                HexOutcome::Applied(hex) => EventToken::HexApplied {
                    team: target_side,
                    hex: hex.to_string(),
                },
                HexOutcome::Failed => EventToken::HexFailed { team: target_side },
            });
        }
        SpellKind::WeatherSet => {
            let Some(kind) = sub.weather else {
                return;
            };
            if ctx.weather.map(|w| w.kind) == Some(kind) {
                // Same weather already active: no effect, no duration reset.
                ctx.log.push(EventToken::WeatherFailed);
                return;
            }
            let turns = if ctx.teams[side].active().artifact == Some(Artifact::StormGlass) {
                ctx.config.extended_weather_turns
            } else {
                ctx.config.weather_turns
            };
            *ctx.weather = Some(Weather {
                kind,
                turns_left: turns,
            });
            ctx.log.push(EventToken::WeatherChanged { weather: kind });
        }
        SpellKind::Shield => {
            // A shield cannot be raised two rounds in a row.
            if ctx.teams[side].last_move() == Some(Move::Spell { index: spell_idx }) {
                ctx.log.push(EventToken::SpellFailed { team: side });
                return;
            }
            ctx.teams[side].shield_up = true;
            ctx.log.push(EventToken::ShieldRaised { team: side });
        }
        SpellKind::ForceSwap => {
            let Some(slot) = ctx.teams[foe].swap_candidates().choose(rng) else {
                ctx.log.push(EventToken::SpellFailed { team: side });
                return;
            };
            ctx.log.push(EventToken::ForcedSwap { team: foe });
            perform_swap(ctx, foe, slot, rng);
        }
        SpellKind::StripElement => {
            ctx.teams[foe].active_mut().override_element(Element::Arcane);
            ctx.log.push(EventToken::ElementStripped { team: foe });
        }
        SpellKind::SwapHexes => {
            let (acting, other) = split_teams(ctx.teams, side);
            std::mem::swap(
                &mut acting.active_mut().hexes,
                &mut other.active_mut().hexes,
            );
            ctx.log.push(EventToken::HexesSwapped);
        }
        SpellKind::StealArtifact => {
            let Some(artifact) = ctx.teams[foe].active_mut().artifact.take() else {
                ctx.log.push(EventToken::SpellFailed { team: side });
                return;
            };
            let acting = ctx.teams[side].active_mut();
            if acting.artifact.is_none() {
                acting.override_artifact(Some(artifact));
            }
            ctx.log.push(EventToken::ArtifactTaken {
                team: side,
                artifact,
            });
        }
        SpellKind::CopyElement => {
            let element = ctx.teams[foe].active().element;
            ctx.teams[side].active_mut().override_element(element);
            ctx.log.push(EventToken::ElementCopied { team: side });
        }
        SpellKind::GuardNextHit => {
            let Some(hex) = Hex::from_key("aegis") else {
                return;
            };
            let landed =
                ctx.teams[side]
                    .active_mut()
                    .apply_hex(hex, false, ctx.config.hex_cap, rng);
            ctx.log.push(if landed {
                EventToken::HexApplied {
                    team: side,
                    hex: "aegis".to_string(),
                }
            } else {
                EventToken::HexFailed { team: side }
            });
        }
        SpellKind::Cleanse => {
            ctx.teams[0].active_mut().clear_hexes();
            ctx.teams[1].active_mut().clear_hexes();
            *ctx.weather = None;
            ctx.log.push(EventToken::Cleansed);
        }
        SpellKind::Sacrifice => {
            let acting = ctx.teams[side].active_mut();
            acting.current_hp = 0;
            ctx.teams[side].full_heal_next_swap = true;
            ctx.log.push(EventToken::Sacrificed { team: side });
            // The faint sweep acknowledges the self-faint.
        }
        SpellKind::InvertHexes => {
            let target = ctx.teams[foe].active_mut();
            for hex in &mut target.hexes {
                if let Some(opposite) = hex.opposite() {
                    *hex = Hex {
                        data: opposite,
                        turns_left: hex.turns_left,
                    };
                }
            }
            ctx.log.push(EventToken::HexesInverted { team: foe });
        }
        _ => {}
    }
}

fn swap(ctx: &mut RoundCtx<'_>, side: usize, slot: usize, rng: &mut SmallRng) {
    let team = &ctx.teams[side];
    let invalid = slot >= team.roster.len() || slot == team.active || team.roster[slot].is_fainted();
    if invalid {
        ctx.log.push(EventToken::SwapFailed { team: side });
        return;
    }
    perform_swap(ctx, side, slot, rng);
}

/// Switch the active index and run swap-in triggers. Callers validate.
pub(crate) fn perform_swap(ctx: &mut RoundCtx<'_>, side: usize, slot: usize, rng: &mut SmallRng) {
    let team = &mut ctx.teams[side];
    team.active = slot;
    team.must_swap = false;
    if team.full_heal_next_swap {
        team.full_heal_next_swap = false;
        let active = team.active_mut();
        let missing = active.max_health().saturating_sub(active.current_hp);
        active.heal(missing);
    }
    ctx.log.push(EventToken::Swapped { team: side, slot });
    if ctx.teams[side].active().artifact == Some(Artifact::Vanguard) {
        if let Some(hex) = Hex::from_key("empower") {
            let landed =
                ctx.teams[side]
                    .active_mut()
                    .apply_hex(hex, false, ctx.config.hex_cap, rng);
            if landed {
                ctx.log.push(EventToken::StatIncreased {
                    team: side,
                    stat: Stat::Attack.id().to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::team::Team;
    use rand::SeedableRng;

    fn ctx_fixture(a: &[&str], b: &[&str]) -> ([Team; 2], Option<Weather>, BattleConfig, BattleLog) {
        (
            [
                Team::from_templates(a).expect("team builds"),
                Team::from_templates(b).expect("team builds"),
            ],
            None,
            BattleConfig::default(),
            BattleLog::new(),
        )
    }

    fn run(
        teams: &mut [Team; 2],
        weather: &mut Option<Weather>,
        config: &BattleConfig,
        log: &mut BattleLog,
        step: TurnStep,
        seed: u64,
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ctx = RoundCtx {
            teams,
            weather,
            config,
            log,
        };
        execute_step(&mut ctx, step, &mut rng);
    }

    #[test]
    fn announcement_has_no_numeric_effect() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["emberwitch"], &["tidewitch"]);
        teams[0].pending = Some(Move::Spell { index: 0 });
        let hp_before = teams[1].active().current_hp;
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::Announce { team: 0 }, 1);
        assert_eq!(teams[1].active().current_hp, hp_before);
        assert!(matches!(log.events()[0], EventToken::SpellUsed { team: 0, .. }));
    }

    #[test]
    fn damaging_sub_spell_consumes_a_use_and_deals_damage() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["emberwitch"], &["covenelder"]);
        teams[0].pending = Some(Move::Spell { index: 0 });
        let hp_before = teams[1].active().current_hp;
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert!(teams[1].active().current_hp < hp_before);
        assert_eq!(teams[0].active().spells[0].used, 1);
    }

    #[test]
    fn exhausted_spell_fizzles_and_skips_later_sub_steps() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["emberwitch"], &["covenelder"]);
        teams[0].pending = Some(Move::Spell { index: 0 });
        let uses = teams[0].active().spells[0].data.uses;
        teams[0].active_mut().spells[0].used = uses;
        let hp_before = teams[1].active().current_hp;
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert!(teams[0].spell_fizzled);
        assert_eq!(teams[1].active().current_hp, hp_before);
        assert_eq!(log.events(), &[EventToken::SpellFailed { team: 0 }]);
    }

    #[test]
    fn shield_blocks_plain_attack() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["emberwitch"], &["covenelder"]);
        teams[0].pending = Some(Move::Spell { index: 0 });
        teams[1].shield_up = true;
        let hp_before = teams[1].active().current_hp;
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert_eq!(teams[1].active().current_hp, hp_before);
        assert_eq!(log.events(), &[EventToken::ShieldBlocked { team: 1 }]);
    }

    #[test]
    fn piercing_attack_doubles_through_shield() {
        // covenelder's veilpiercer is spell index 2: power 50, attack 60
        // against emberwitch's modified defense 45 gives 10.67 raw.
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["covenelder"], &["emberwitch"]);
        // Pin precision to zero so no crit muddies the comparison.
        teams[0].active_mut().base.precision = 0;

        let mut blocked = teams.clone();
        teams[0].pending = Some(Move::Spell { index: 2 });
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        let plain_damage = blocked[1].active().current_hp - teams[1].active().current_hp;
        assert_eq!(plain_damage, 11);

        blocked[0].pending = Some(Move::Spell { index: 2 });
        blocked[1].shield_up = true;
        let mut weather2 = None;
        let mut log2 = BattleLog::new();
        let hp_before = blocked[1].active().current_hp;
        run(&mut blocked, &mut weather2, &config, &mut log2, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        let pierced_damage = hp_before - blocked[1].active().current_hp;

        assert_eq!(pierced_damage, 21);
        assert!(log2.events().contains(&EventToken::ShieldPierced { team: 1 }));
    }

    #[test]
    fn same_weather_fails_and_keeps_duration() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["emberwitch"], &["covenelder"]);
        // emberwitch's scorchsky is spell index 2.
        teams[0].pending = Some(Move::Spell { index: 2 });
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        let set = weather.expect("weather set");
        assert_eq!(set.kind, crate::data::elements::WeatherKind::Scorch);

        let mut shortened = Some(Weather {
            kind: set.kind,
            turns_left: 2,
        });
        let mut log2 = BattleLog::new();
        run(&mut teams, &mut shortened, &config, &mut log2, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert_eq!(shortened.expect("still active").turns_left, 2);
        assert_eq!(log2.events(), &[EventToken::WeatherFailed]);
    }

    #[test]
    fn storm_glass_extends_weather_duration() {
        // lumenwitch holds a StormGlass; its spells have no weather, so give
        // the check the ember team's scorchsky with a swapped artifact.
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["emberwitch"], &["covenelder"]);
        teams[0].active_mut().override_artifact(Some(Artifact::StormGlass));
        teams[0].pending = Some(Move::Spell { index: 2 });
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert_eq!(weather.expect("weather set").turns_left, config.extended_weather_turns);
    }

    #[test]
    fn hex_tick_damages_and_heals_by_percent_of_max() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["covenelder"], &["emberwitch"]);
        let mut rng = SmallRng::seed_from_u64(0);
        let max = teams[0].active().max_health();
        assert!(teams[0]
            .active_mut()
            .apply_hex(Hex::from_key("blight").unwrap(), false, 2, &mut rng));
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::HexTick { team: 0 }, 1);
        let expected = (max as u32 * 12 / 100) as u16;
        assert_eq!(teams[0].active().current_hp, max - expected);

        teams[0].active_mut().clear_hexes();
        assert!(teams[0]
            .active_mut()
            .apply_hex(Hex::from_key("regrowth").unwrap(), false, 2, &mut rng));
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::HexTick { team: 0 }, 2);
        let healed = (max as u32 * 8 / 100) as u16;
        assert_eq!(teams[0].active().current_hp, max - expected + healed);
    }

    #[test]
    fn regen_proc_heals_a_sixteenth() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["bramblewitch"], &["emberwitch"]);
        let max = teams[0].active().max_health();
        teams[0].active_mut().current_hp = max / 2;
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::RegenProc { team: 0 }, 1);
        assert_eq!(teams[0].active().current_hp, max / 2 + max / 16);
    }

    #[test]
    fn faint_acknowledgement_sets_must_swap_once() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["emberwitch"], &["covenelder"]);
        teams[0].active_mut().current_hp = 0;
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::Faint { team: 0 }, 1);
        assert!(teams[0].must_swap);
        assert_eq!(log.events(), &[EventToken::Fainted { team: 0 }]);
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::Faint { team: 0 }, 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn posthumous_curse_hexes_the_opposing_active() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["umbralwitch"], &["covenelder"]);
        teams[0].active_mut().current_hp = 0;
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::Faint { team: 0 }, 3);
        assert!(teams[0].must_swap);
        assert!(teams[1].active().has_hex("blight"));
    }

    #[test]
    fn heal_blocked_by_sear() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["tidewitch"], &["emberwitch"]);
        let mut rng = SmallRng::seed_from_u64(0);
        let max = teams[0].active().max_health();
        teams[0].active_mut().current_hp = max / 2;
        assert!(teams[0]
            .active_mut()
            .apply_hex(Hex::from_key("sear").unwrap(), false, 2, &mut rng));
        // tidewitch's mendwounds is spell index 3.
        teams[0].pending = Some(Move::Spell { index: 3 });
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert_eq!(teams[0].active().current_hp, max / 2);
        assert!(log.events().contains(&EventToken::HealBlocked { team: 0 }));
    }

    #[test]
    fn heal_restores_half_of_missing_health() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["tidewitch"], &["emberwitch"]);
        let max = teams[0].active().max_health();
        teams[0].active_mut().current_hp = max - 40;
        teams[0].pending = Some(Move::Spell { index: 3 });
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert_eq!(teams[0].active().current_hp, max - 20);
    }

    #[test]
    fn swap_to_fainted_slot_fails() {
        let (mut teams, mut weather, config, mut log) =
            ctx_fixture(&["emberwitch", "tidewitch"], &["covenelder"]);
        teams[0].roster[1].current_hp = 0;
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::Swap { team: 0, slot: 1 }, 1);
        assert_eq!(teams[0].active, 0);
        assert_eq!(log.events(), &[EventToken::SwapFailed { team: 0 }]);
    }

    #[test]
    fn swap_clears_must_swap_and_triggers_vanguard() {
        let (mut teams, mut weather, config, mut log) =
            ctx_fixture(&["emberwitch", "covenelder"], &["tidewitch"]);
        teams[0].must_swap = true;
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::Swap { team: 0, slot: 1 }, 1);
        assert_eq!(teams[0].active, 1);
        assert!(!teams[0].must_swap);
        // covenelder holds a Vanguard.
        assert!(teams[0].active().has_hex("empower"));
    }

    #[test]
    fn sacrifice_enables_full_health_swap_in() {
        let (mut teams, mut weather, config, mut log) =
            ctx_fixture(&["lumenwitch", "emberwitch"], &["covenelder"]);
        teams[0].roster[1].current_hp = 10;
        // lumenwitch has no martyrrite; force the kind through a fixture.
        teams[0].pending = Some(Move::Spell { index: 0 });
        teams[0].active_mut().spells[0] =
            crate::sim::spells::Spell::new(crate::data::spells::get_spell("martyrrite").unwrap());
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert!(teams[0].active().is_fainted());
        assert!(teams[0].full_heal_next_swap);
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::Faint { team: 0 }, 1);
        assert!(teams[0].must_swap);
        // The mandatory replacement arrives at full health.
        let mut rng = SmallRng::seed_from_u64(1);
        let mut ctx = RoundCtx {
            teams: &mut teams,
            weather: &mut weather,
            config: &config,
            log: &mut log,
        };
        perform_swap(&mut ctx, 0, 1, &mut rng);
        assert_eq!(teams[0].active, 1);
        assert_eq!(teams[0].active().current_hp, teams[0].active().max_health());
        assert!(!teams[0].full_heal_next_swap);
    }

    #[test]
    fn invert_hexes_flips_to_opposites() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["covenelder"], &["emberwitch"]);
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(teams[1]
            .active_mut()
            .apply_hex(Hex::from_key("empower").unwrap(), false, 2, &mut rng));
        assert!(teams[1]
            .active_mut()
            .apply_hex(Hex::from_key("sear").unwrap(), false, 2, &mut rng));
        // covenelder's hexmirror is spell index 3.
        teams[0].pending = Some(Move::Spell { index: 3 });
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert!(teams[1].active().has_hex("enfeeble"));
        assert!(teams[1].active().has_hex("sear"));
        assert!(!teams[1].active().has_hex("empower"));
    }

    #[test]
    fn steal_artifact_equips_when_empty_handed() {
        let (mut teams, mut weather, config, mut log) = ctx_fixture(&["emberwitch"], &["tidewitch"]);
        teams[0].pending = Some(Move::Spell { index: 0 });
        teams[0].active_mut().spells[0] =
            crate::sim::spells::Spell::new(crate::data::spells::get_spell("filchcharm").unwrap());
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert_eq!(teams[0].active().artifact, Some(Artifact::LastStand));
        assert_eq!(teams[1].active().artifact, None);
    }

    #[test]
    fn ejector_forces_the_holders_side_to_swap() {
        let (mut teams, mut weather, config, mut log) =
            ctx_fixture(&["emberwitch"], &["galewitch", "covenelder"]);
        teams[0].pending = Some(Move::Spell { index: 0 });
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert!(teams[1].must_swap);
        assert!(log.events().contains(&EventToken::ForcedSwap { team: 1 }));
    }

    #[test]
    fn ejector_does_not_fire_without_a_replacement() {
        let (mut teams, mut weather, config, mut log) =
            ctx_fixture(&["emberwitch"], &["galewitch"]);
        teams[0].pending = Some(Move::Spell { index: 0 });
        run(&mut teams, &mut weather, &config, &mut log, TurnStep::SubSpell { team: 0, index: 0 }, 1);
        assert!(!teams[1].active().is_fainted());
        assert!(!teams[1].must_swap);
        assert!(!log.events().contains(&EventToken::ForcedSwap { team: 1 }));
    }
}
