use crate::data::elements::{Element, WeatherKind};
use once_cell::sync::Lazy;
use phf::phf_map;

/// Behavior category of a spell. Damaging variants differ only in how the
/// effective power is derived from battle state; the one-off categories are
/// a closed enumeration, not open-ended scripting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpellKind {
    /// Plain damaging spell.
    Damage,
    /// Power grows with the number of prior uses.
    RampingDamage,
    /// Power grows with the user's missing health.
    DesperationDamage,
    /// Power scales down with the user's missing health.
    SurgeDamage,
    /// Power grows with the user's active hex count.
    HexFeedDamage,
    /// Damaging; ignores a standing shield, which instead doubles the damage.
    PiercingDamage,
    /// Restores a percentage of the target's missing health.
    Heal,
    /// Applies a hex with some chance.
    HexInflict,
    /// Sets the global weather.
    WeatherSet,
    /// Blocks enemy spells this round; cannot be repeated consecutively.
    Shield,
    /// Forces the opposing side onto a random standing roster member.
    ForceSwap,
    /// Strips the target's element down to Arcane.
    StripElement,
    /// Swaps all hexes between the two active combatants.
    SwapHexes,
    /// Takes the target's artifact (equips it if the user holds none).
    StealArtifact,
    /// Copies the target's element onto the user.
    CopyElement,
    /// Guarantees survival of the next hit (aegis hex on self).
    GuardNextHit,
    /// Clears all hexes on both actives and the weather.
    Cleanse,
    /// The user faints; the next swap-in on its side arrives at full health.
    Sacrifice,
    /// Replaces each of the target's hexes with its declared opposite.
    InvertHexes,
}

impl SpellKind {
    pub fn is_damaging(self) -> bool {
        matches!(
            self,
            SpellKind::Damage
                | SpellKind::RampingDamage
                | SpellKind::DesperationDamage
                | SpellKind::SurgeDamage
                | SpellKind::HexFeedDamage
                | SpellKind::PiercingDamage
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TargetRange {
    Slf,
    Ally,
    Enemy,
}

/// One concrete effect within a spell.
#[derive(Clone, Copy, Debug)]
pub struct SubSpellData {
    pub power: u16,
    pub range: TargetRange,
    pub hex: Option<&'static str>,
    /// Base percent chance for `hex`.
    pub hex_chance: u8,
    /// Percent of missing health restored (Heal spells).
    pub heal_percent: u8,
    pub weather: Option<WeatherKind>,
}

#[derive(Clone, Copy, Debug)]
pub struct SpellData {
    pub name: &'static str,
    pub element: Element,
    pub kind: SpellKind,
    /// Usage limit for the whole battle.
    pub uses: u8,
    pub sub_spells: &'static [SubSpellData],
}

const fn strike(power: u16) -> SubSpellData {
    SubSpellData {
        power,
        range: TargetRange::Enemy,
        hex: None,
        hex_chance: 0,
        heal_percent: 0,
        weather: None,
    }
}

const fn afflict(hex: &'static str, chance: u8, range: TargetRange) -> SubSpellData {
    SubSpellData {
        power: 0,
        range,
        hex: Some(hex),
        hex_chance: chance,
        heal_percent: 0,
        weather: None,
    }
}

const fn mend(heal_percent: u8) -> SubSpellData {
    SubSpellData {
        power: 0,
        range: TargetRange::Slf,
        hex: None,
        hex_chance: 0,
        heal_percent,
        weather: None,
    }
}

// Weather is global, so the sub-spell targets nobody in particular.
const fn sky(weather: WeatherKind) -> SubSpellData {
    SubSpellData {
        power: 0,
        range: TargetRange::Slf,
        hex: None,
        hex_chance: 0,
        heal_percent: 0,
        weather: Some(weather),
    }
}

const fn rite(range: TargetRange) -> SubSpellData {
    SubSpellData {
        power: 0,
        range,
        hex: None,
        hex_chance: 0,
        heal_percent: 0,
        weather: None,
    }
}

pub static SPELLS: phf::Map<&'static str, SpellData> = phf_map! {
    // Plain elemental strikes.
    "cinderbolt" => SpellData { name: "cinderbolt", element: Element::Ember, kind: SpellKind::Damage, uses: 15, sub_spells: &[strike(40)] },
    "tidalrush" => SpellData { name: "tidalrush", element: Element::Tide, kind: SpellKind::Damage, uses: 15, sub_spells: &[strike(40)] },
    "thornlash" => SpellData { name: "thornlash", element: Element::Bramble, kind: SpellKind::Damage, uses: 12, sub_spells: &[strike(45)] },
    "galecut" => SpellData { name: "galecut", element: Element::Gale, kind: SpellKind::Damage, uses: 15, sub_spells: &[strike(40)] },
    "lumenray" => SpellData { name: "lumenray", element: Element::Lumen, kind: SpellKind::Damage, uses: 12, sub_spells: &[strike(45)] },
    "gloomfang" => SpellData { name: "gloomfang", element: Element::Umbral, kind: SpellKind::Damage, uses: 12, sub_spells: &[strike(45)] },
    "arcanebolt" => SpellData { name: "arcanebolt", element: Element::Arcane, kind: SpellKind::Damage, uses: 20, sub_spells: &[strike(40)] },
    "emberstorm" => SpellData { name: "emberstorm", element: Element::Ember, kind: SpellKind::Damage, uses: 5, sub_spells: &[strike(80)] },
    // Two hits of 30 in one casting.
    "twinflare" => SpellData { name: "twinflare", element: Element::Ember, kind: SpellKind::Damage, uses: 10, sub_spells: &[strike(30), strike(30)] },
    // Strike with a chance of blight.
    "venomthorn" => SpellData {
        name: "venomthorn",
        element: Element::Bramble,
        kind: SpellKind::Damage,
        uses: 10,
        sub_spells: &[SubSpellData {
            power: 30,
            range: TargetRange::Enemy,
            hex: Some("blight"),
            hex_chance: 30,
            heal_percent: 0,
            weather: None,
        }],
    },
    // State-scaled damage.
    "crescendo" => SpellData { name: "crescendo", element: Element::Arcane, kind: SpellKind::RampingDamage, uses: 10, sub_spells: &[strike(20)] },
    "lastgasp" => SpellData { name: "lastgasp", element: Element::Ember, kind: SpellKind::DesperationDamage, uses: 8, sub_spells: &[strike(40)] },
    "surgewave" => SpellData { name: "surgewave", element: Element::Tide, kind: SpellKind::SurgeDamage, uses: 8, sub_spells: &[strike(60)] },
    "hexfeast" => SpellData { name: "hexfeast", element: Element::Umbral, kind: SpellKind::HexFeedDamage, uses: 10, sub_spells: &[strike(30)] },
    "veilpiercer" => SpellData { name: "veilpiercer", element: Element::Arcane, kind: SpellKind::PiercingDamage, uses: 8, sub_spells: &[strike(50)] },
    // Healing.
    "mendwounds" => SpellData { name: "mendwounds", element: Element::Lumen, kind: SpellKind::Heal, uses: 8, sub_spells: &[mend(50)] },
    // Hex infliction.
    "blightcurse" => SpellData { name: "blightcurse", element: Element::Umbral, kind: SpellKind::HexInflict, uses: 10, sub_spells: &[afflict("blight", 80, TargetRange::Enemy)] },
    "enfeeblehex" => SpellData { name: "enfeeblehex", element: Element::Umbral, kind: SpellKind::HexInflict, uses: 10, sub_spells: &[afflict("enfeeble", 90, TargetRange::Enemy)] },
    "sunderhex" => SpellData { name: "sunderhex", element: Element::Umbral, kind: SpellKind::HexInflict, uses: 10, sub_spells: &[afflict("sunder", 90, TargetRange::Enemy)] },
    "empowerchant" => SpellData { name: "empowerchant", element: Element::Arcane, kind: SpellKind::HexInflict, uses: 10, sub_spells: &[afflict("empower", 100, TargetRange::Slf)] },
    "stonehidechant" => SpellData { name: "stonehidechant", element: Element::Arcane, kind: SpellKind::HexInflict, uses: 10, sub_spells: &[afflict("stonehide", 100, TargetRange::Slf)] },
    "searbrand" => SpellData { name: "searbrand", element: Element::Ember, kind: SpellKind::HexInflict, uses: 8, sub_spells: &[afflict("sear", 70, TargetRange::Enemy)] },
    "entanglevines" => SpellData { name: "entanglevines", element: Element::Bramble, kind: SpellKind::HexInflict, uses: 8, sub_spells: &[afflict("entangle", 75, TargetRange::Enemy)] },
    "befuddlemist" => SpellData { name: "befuddlemist", element: Element::Gale, kind: SpellKind::HexInflict, uses: 8, sub_spells: &[afflict("befuddle", 70, TargetRange::Enemy)] },
    "shacklebind" => SpellData { name: "shacklebind", element: Element::Umbral, kind: SpellKind::HexInflict, uses: 8, sub_spells: &[afflict("shackle", 70, TargetRange::Enemy)] },
    // Weather.
    "scorchsky" => SpellData { name: "scorchsky", element: Element::Ember, kind: SpellKind::WeatherSet, uses: 5, sub_spells: &[sky(WeatherKind::Scorch)] },
    "downpourcall" => SpellData { name: "downpourcall", element: Element::Tide, kind: SpellKind::WeatherSet, uses: 5, sub_spells: &[sky(WeatherKind::Downpour)] },
    "overgrowthcall" => SpellData { name: "overgrowthcall", element: Element::Bramble, kind: SpellKind::WeatherSet, uses: 5, sub_spells: &[sky(WeatherKind::Overgrowth)] },
    "eclipseveil" => SpellData { name: "eclipseveil", element: Element::Umbral, kind: SpellKind::WeatherSet, uses: 5, sub_spells: &[sky(WeatherKind::Eclipse)] },
    // Shields and the one-off rites.
    "wardingcircle" => SpellData { name: "wardingcircle", element: Element::Arcane, kind: SpellKind::Shield, uses: 8, sub_spells: &[rite(TargetRange::Slf)] },
    "banishgust" => SpellData { name: "banishgust", element: Element::Gale, kind: SpellKind::ForceSwap, uses: 6, sub_spells: &[rite(TargetRange::Enemy)] },
    "nullbrand" => SpellData { name: "nullbrand", element: Element::Arcane, kind: SpellKind::StripElement, uses: 4, sub_spells: &[rite(TargetRange::Enemy)] },
    "hexexchange" => SpellData { name: "hexexchange", element: Element::Umbral, kind: SpellKind::SwapHexes, uses: 4, sub_spells: &[rite(TargetRange::Enemy)] },
    "filchcharm" => SpellData { name: "filchcharm", element: Element::Umbral, kind: SpellKind::StealArtifact, uses: 4, sub_spells: &[rite(TargetRange::Enemy)] },
    "mirrorelement" => SpellData { name: "mirrorelement", element: Element::Arcane, kind: SpellKind::CopyElement, uses: 4, sub_spells: &[rite(TargetRange::Slf)] },
    "aegischant" => SpellData { name: "aegischant", element: Element::Lumen, kind: SpellKind::GuardNextHit, uses: 4, sub_spells: &[rite(TargetRange::Slf)] },
    "purgerite" => SpellData { name: "purgerite", element: Element::Lumen, kind: SpellKind::Cleanse, uses: 4, sub_spells: &[rite(TargetRange::Slf)] },
    "martyrrite" => SpellData { name: "martyrrite", element: Element::Lumen, kind: SpellKind::Sacrifice, uses: 1, sub_spells: &[rite(TargetRange::Ally)] },
    "hexmirror" => SpellData { name: "hexmirror", element: Element::Arcane, kind: SpellKind::InvertHexes, uses: 4, sub_spells: &[rite(TargetRange::Enemy)] },
};

pub fn get_spell(name: &str) -> Option<&'static SpellData> {
    let key = super::normalize_key(name);
    SPELLS.get(key.as_str())
}

/// Sorted spell keys, for enumeration and deterministic iteration in tests.
pub static SPELL_KEYS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut keys: Vec<&'static str> = SPELLS.keys().copied().collect();
    keys.sort_unstable();
    keys
});
