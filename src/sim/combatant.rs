use crate::data::abilities::{parse_ability, Ability};
use crate::data::artifacts::{parse_artifact, Artifact};
use crate::data::elements::Element;
use crate::data::spells::get_spell;
use crate::data::templates::get_template;
use crate::sim::hexes::Hex;
use crate::sim::spells::Spell;
use crate::sim::stats::{parse_nature, stat_modifier, Nature, Stat, StatBlock};
use anyhow::{anyhow, Result};
use rand::Rng;

/// One fighting unit. Owned by its Team's roster for the whole battle;
/// fainted combatants persist with `current_hp == 0`.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub name: String,
    pub element: Element,
    pub base: StatBlock,
    pub nature: Nature,
    pub ability: Ability,
    pub artifact: Option<Artifact>,
    pub current_hp: u16,
    pub hexes: Vec<Hex>,
    pub spells: Vec<Spell>,
}

impl Combatant {
    pub fn from_template(key: &str) -> Result<Self> {
        let template = get_template(key).ok_or_else(|| anyhow!("template '{}' not found", key))?;
        let spells = template
            .spells
            .iter()
            .filter_map(|name| get_spell(name).map(Spell::new))
            .collect();
        let mut combatant = Self {
            name: template.name.to_string(),
            element: template.element,
            base: StatBlock::from_array(template.base),
            nature: parse_nature(template.nature),
            ability: parse_ability(template.ability),
            artifact: template.artifact.and_then(parse_artifact),
            current_hp: 0,
            hexes: Vec::new(),
            spells,
        };
        combatant.current_hp = combatant.max_health();
        Ok(combatant)
    }

    /// Assemble a combatant directly, for teams not built from templates.
    pub fn new(
        name: impl Into<String>,
        element: Element,
        base: StatBlock,
        nature: Nature,
        ability: Ability,
        artifact: Option<Artifact>,
        spell_keys: &[&str],
    ) -> Self {
        let spells = spell_keys
            .iter()
            .filter_map(|key| get_spell(key).map(Spell::new))
            .collect();
        let mut combatant = Self {
            name: name.into(),
            element,
            base,
            nature,
            ability,
            artifact,
            current_hp: 0,
            hexes: Vec::new(),
            spells,
        };
        combatant.current_hp = combatant.max_health();
        combatant
    }

    /// Base stat with nature, ability and hex multipliers applied.
    /// Floored, never below 1.
    pub fn modified_stat(&self, stat: Stat) -> u16 {
        let mut value = self.base.get(stat) as f32;
        value *= stat_modifier(self.nature, stat);
        value *= self.ability.stat_multiplier(stat.id());
        for hex in &self.hexes {
            value *= hex.stat_multiplier(stat);
        }
        value.floor().max(1.0) as u16
    }

    pub fn max_health(&self) -> u16 {
        self.modified_stat(Stat::Health)
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_hex(&self, key: &str) -> bool {
        self.hexes.iter().any(|hex| hex.name() == key)
    }

    pub fn hex_turns(&self, key: &str) -> Option<i8> {
        self.hexes
            .iter()
            .find(|hex| hex.name() == key)
            .map(|hex| hex.turns_left)
    }

    /// Insert a hex, subject to the concurrency cap, duplicates, and an
    /// ability resist roll when the hex is resistible.
    pub fn apply_hex(&mut self, hex: Hex, resistible: bool, cap: usize, rng: &mut impl Rng) -> bool {
        if self.is_fainted() {
            return false;
        }
        if self.has_hex(hex.name()) {
            return false;
        }
        if self.hexes.len() >= cap {
            return false;
        }
        if resistible && hex.is_harmful() {
            if let Some(chance) = self.ability.resist_chance() {
                if rng.gen_range(0..100u8) < chance {
                    return false;
                }
            }
        }
        self.hexes.push(hex);
        true
    }

    pub fn remove_hex(&mut self, key: &str) -> bool {
        let before = self.hexes.len();
        self.hexes.retain(|hex| hex.name() != key);
        self.hexes.len() != before
    }

    pub fn clear_hexes(&mut self) {
        self.hexes.clear();
    }

    /// End-of-round duration decrement. Returns the keys of expired hexes.
    pub fn decay_hexes(&mut self) -> Vec<&'static str> {
        let mut expired = Vec::new();
        for hex in &mut self.hexes {
            if hex.turns_left > 0 {
                hex.turns_left -= 1;
                if hex.turns_left == 0 {
                    expired.push(hex.name());
                }
            }
        }
        self.hexes.retain(|hex| hex.turns_left != 0);
        expired
    }

    pub fn take_damage(&mut self, damage: u16) {
        self.current_hp = self.current_hp.saturating_sub(damage);
    }

    /// Heal, clamped to modified max health.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let max = self.max_health();
        let healed = amount.min(max.saturating_sub(self.current_hp));
        self.current_hp += healed;
        healed
    }

    pub fn override_element(&mut self, element: Element) {
        self.element = element;
    }

    pub fn override_artifact(&mut self, artifact: Option<Artifact>) {
        self.artifact = artifact;
    }
}
