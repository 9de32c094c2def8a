//! The heuristic opponent policy.

use crate::data::elements::advantage;
use crate::data::spells::SpellKind;
use crate::sim::battle::Battle;
use crate::sim::calc::{base_damage, elemental_modifier, weather_modifier, will_guarantee_faint};
use crate::sim::spells::{effective_power, Spell};
use crate::sim::stats::Stat;
use crate::sim::team::{Move, Team};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Chooses a legal move for a non-human side. Implementations own their
/// randomness so the battle's stream stays reproducible.
pub trait OpponentPolicy {
    fn choose(&mut self, battle: &Battle, side: usize) -> Move;
}

/// Rule-ladder policy: forced retreats, certain kills, defensive swaps,
/// healing, weather, shields, hexes, then the hardest hit it has.
pub struct HeuristicPolicy {
    rng: SmallRng,
}

impl HeuristicPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn two_in_three(&mut self) -> bool {
        self.rng.gen_range(0..3u8) < 2
    }
}

impl OpponentPolicy for HeuristicPolicy {
    fn choose(&mut self, battle: &Battle, side: usize) -> Move {
        let team = battle.team(side);
        let foe = battle.team(1 - side);
        let me = team.active();
        let opp = foe.active();
        let swap_blocked = me.has_hex("entangle");

        if team.must_swap {
            if let Some(slot) = choose_swap_target(team, battle, side) {
                return Move::Swap { slot };
            }
        }

        let usable: Vec<(usize, &Spell)> = me
            .spells
            .iter()
            .enumerate()
            .filter(|(_, spell)| !spell.is_exhausted())
            .collect();

        // Out of spells: retreat if at all possible.
        if usable.is_empty() {
            if !swap_blocked {
                if let Some(slot) = choose_swap_target(team, battle, side) {
                    return Move::Swap { slot };
                }
            }
            return Move::Spell { index: 0 };
        }

        // Restricted: commit to the hardest hit; the commit-time override
        // repeats the locked move anyway.
        if me.has_hex("shackle") {
            return best_damaging(battle, side, &usable)
                .unwrap_or(Move::Spell { index: usable[0].0 });
        }

        // A certain kill is never passed up.
        for (index, spell) in &usable {
            if !spell.data.kind.is_damaging() {
                continue;
            }
            let power = spell
                .data
                .sub_spells
                .iter()
                .map(|sub| sub.power)
                .max()
                .unwrap_or(0);
            if will_guarantee_faint(
                me,
                opp,
                spell.data.kind,
                power,
                spell.data.element,
                spell.used,
                battle.weather().map(|w| w.kind),
            ) {
                return Move::Spell { index: *index };
            }
        }

        // Bad matchup: swap out rather than trade into it.
        if advantage(opp.element, me.element) > 1.0 && !swap_blocked {
            if let Some(slot) = choose_swap_target(team, battle, side) {
                return Move::Swap { slot };
            }
        }

        if me.current_hp * 3 < me.max_health() && !me.has_hex("sear") {
            if let Some((index, _)) = usable
                .iter()
                .find(|(_, spell)| spell.data.kind == SpellKind::Heal)
            {
                return Move::Spell { index: *index };
            }
        }

        if self.two_in_three() {
            let current = battle.weather().map(|w| w.kind);
            if let Some((index, _)) = usable.iter().find(|(_, spell)| {
                spell.data.kind == SpellKind::WeatherSet
                    && spell.data.sub_spells.iter().any(|sub| sub.weather != current)
            }) {
                return Move::Spell { index: *index };
            }
        }

        // Stall behind a shield while the opponent is blighted or busy
        // regenerating, but never repeat one back to back.
        if opp.has_hex("blight") || opp.has_hex("regrowth") {
            if let Some((index, _)) = usable
                .iter()
                .find(|(index, spell)| {
                    spell.data.kind == SpellKind::Shield
                        && team.last_move() != Some(Move::Spell { index: *index })
                })
            {
                return Move::Spell { index: *index };
            }
        }

        if self.two_in_three() && me.current_hp * 4 > me.max_health() * 3 {
            if let Some((index, _)) = usable.iter().find(|(_, spell)| {
                spell.data.kind == SpellKind::HexInflict
                    && spell.data.sub_spells.iter().any(|sub| {
                        let target = if sub.range == crate::data::spells::TargetRange::Slf {
                            me
                        } else {
                            opp
                        };
                        match sub.hex {
                            Some(hex) => {
                                !target.has_hex(hex)
                                    && target.hexes.len() < battle.config().hex_cap
                            }
                            None => false,
                        }
                    })
            }) {
                return Move::Spell { index: *index };
            }
        }

        best_damaging(battle, side, &usable).unwrap_or(Move::Spell { index: usable[0].0 })
    }
}

/// Highest-expected-damage usable damaging spell, no crit factored in.
fn best_damaging(battle: &Battle, side: usize, usable: &[(usize, &Spell)]) -> Option<Move> {
    let me = battle.team(side).active();
    let opp = battle.team(1 - side).active();
    let weather = battle.weather().map(|w| w.kind);
    usable
        .iter()
        .filter(|(_, spell)| spell.data.kind.is_damaging())
        .map(|(index, spell)| {
            let elemental = elemental_modifier(me.element, opp.element, spell.data.element);
            let wmod = weather_modifier(weather, spell.data.element);
            let total: f32 = spell
                .data
                .sub_spells
                .iter()
                .map(|sub| {
                    let power = effective_power(spell.data.kind, sub.power, me, spell.used);
                    base_damage(
                        me.modified_stat(Stat::Attack),
                        opp.modified_stat(Stat::Defense),
                        power,
                        elemental,
                        wmod,
                    )
                })
                .sum();
            (*index, total)
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| Move::Spell { index })
}

/// Best replacement slot: a member with the elemental advantage over the
/// opposing active, then one without the disadvantage, then anyone
/// standing.
pub fn choose_swap_target(team: &Team, battle: &Battle, side: usize) -> Option<usize> {
    let opp = battle.team(1 - side).active();
    let candidates: Vec<usize> = team.swap_candidates().collect();
    candidates
        .iter()
        .copied()
        .find(|&slot| advantage(team.roster[slot].element, opp.element) > 1.0)
        .or_else(|| {
            candidates
                .iter()
                .copied()
                .find(|&slot| advantage(opp.element, team.roster[slot].element) <= 1.0)
        })
        .or_else(|| candidates.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::sim::hexes::Hex;

    fn battle(a: &[&str], b: &[&str], seed: u64) -> Battle {
        Battle::from_templates(a, b, BattleConfig::default(), seed).expect("teams build")
    }

    #[test]
    fn certain_kill_is_chosen_over_everything() {
        // covenelder at 10 HP: even cinderbolt's 10 non-crit damage
        // finishes it, and the policy must see that.
        let mut battle = battle(&["covenelder"], &["emberwitch"], 1);
        battle.team_mut(0).active_mut().current_hp = 10;
        battle.team_mut(0).active_mut().artifact = None;
        let mut policy = HeuristicPolicy::new(1);
        let chosen = policy.choose(&battle, 1);
        let Move::Spell { index } = chosen else {
            panic!("expected a spell, got {chosen:?}");
        };
        assert!(battle.team(1).active().spells[index].data.kind.is_damaging());
    }

    #[test]
    fn exhausted_spellbook_forces_a_retreat() {
        let mut battle = battle(&["covenelder"], &["emberwitch", "tidewitch"], 1);
        for index in 0..4 {
            let uses = battle.team(1).active().spells[index].data.uses;
            battle.team_mut(1).active_mut().spells[index].used = uses;
        }
        let mut policy = HeuristicPolicy::new(1);
        assert!(policy.choose(&battle, 1).is_swap());
    }

    #[test]
    fn low_health_reaches_for_a_heal() {
        // tidewitch carries mendwounds at index 3.
        let mut battle = battle(&["covenelder"], &["tidewitch"], 1);
        let max = battle.team(1).active().max_health();
        battle.team_mut(1).active_mut().current_hp = max / 4;
        let mut policy = HeuristicPolicy::new(1);
        assert_eq!(policy.choose(&battle, 1), Move::Spell { index: 3 });
    }

    #[test]
    fn sear_keeps_the_policy_from_wasting_a_heal() {
        let mut battle = battle(&["covenelder"], &["tidewitch"], 1);
        let max = battle.team(1).active().max_health();
        battle.team_mut(1).active_mut().current_hp = max / 4;
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(battle
            .team_mut(1)
            .active_mut()
            .apply_hex(Hex::from_key("sear").unwrap(), false, 2, &mut rng));
        let mut policy = HeuristicPolicy::new(1);
        assert_ne!(policy.choose(&battle, 1), Move::Spell { index: 3 });
    }

    #[test]
    fn elemental_disadvantage_prompts_a_swap() {
        // bramblewitch is weak to ember; tidewitch resists it.
        let battle = battle(&["emberwitch"], &["bramblewitch", "tidewitch"], 1);
        let mut policy = HeuristicPolicy::new(1);
        assert_eq!(policy.choose(&battle, 1), Move::Swap { slot: 1 });
    }

    #[test]
    fn entangle_blocks_the_defensive_swap() {
        let mut battle = battle(&["emberwitch"], &["bramblewitch", "tidewitch"], 1);
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(battle
            .team_mut(1)
            .active_mut()
            .apply_hex(Hex::from_key("entangle").unwrap(), false, 2, &mut rng));
        let mut policy = HeuristicPolicy::new(1);
        assert!(!policy.choose(&battle, 1).is_swap());
    }

    #[test]
    fn swap_target_prefers_the_advantaged_member() {
        // Against an emberwitch: tidewitch (advantage) over covenelder
        // (merely neutral).
        let battle = battle(&["emberwitch"], &["bramblewitch", "covenelder", "tidewitch"], 1);
        let slot = choose_swap_target(battle.team(1), &battle, 1).expect("candidates exist");
        assert_eq!(slot, 2);
    }

    #[test]
    fn swap_target_settles_for_neutral_when_no_advantage_exists() {
        let battle = battle(&["emberwitch"], &["galewitch", "bramblewitch", "covenelder"], 1);
        let slot = choose_swap_target(battle.team(1), &battle, 1).expect("candidates exist");
        // bramblewitch is disadvantaged; covenelder is the neutral pick.
        assert_eq!(slot, 2);
    }

    #[test]
    fn regenerating_opponent_prompts_a_shield() {
        // galewitch carries wardingcircle at index 3 and has no weather
        // spell, so no probabilistic branch can fire first.
        let mut battle = battle(&["covenelder"], &["galewitch"], 1);
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(battle
            .team_mut(0)
            .active_mut()
            .apply_hex(Hex::from_key("regrowth").unwrap(), false, 2, &mut rng));
        let mut policy = HeuristicPolicy::new(1);
        assert_eq!(policy.choose(&battle, 1), Move::Spell { index: 3 });
    }

    #[test]
    fn must_swap_always_yields_a_swap() {
        let mut battle = battle(&["emberwitch"], &["galewitch", "covenelder"], 1);
        battle.team_mut(1).active_mut().current_hp = 0;
        battle.team_mut(1).must_swap = true;
        let mut policy = HeuristicPolicy::new(1);
        assert_eq!(policy.choose(&battle, 1), Move::Swap { slot: 1 });
    }

    #[test]
    fn fallback_is_the_hardest_hitting_spell() {
        // emberwitch against bramblewitch: emberstorm (power 80, doubly
        // boosted by the matchup) beats cinderbolt. The weather and hex
        // spells are exhausted so no probabilistic branch can fire.
        let mut battle = battle(&["bramblewitch"], &["emberwitch"], 1);
        for index in [2, 3] {
            let uses = battle.team(1).active().spells[index].data.uses;
            battle.team_mut(1).active_mut().spells[index].used = uses;
        }
        let mut policy = HeuristicPolicy::new(3);
        assert_eq!(policy.choose(&battle, 1), Move::Spell { index: 1 });
    }
}
