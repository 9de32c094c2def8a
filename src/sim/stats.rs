use serde::Deserialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Stat {
    Health,
    Attack,
    Defense,
    Agility,
    Precision,
    Resistance,
}

impl Stat {
    /// Catalog id used by hex and ability definitions.
    pub fn id(self) -> &'static str {
        match self {
            Stat::Health => "health",
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::Agility => "agility",
            Stat::Precision => "precision",
            Stat::Resistance => "resistance",
        }
    }
}

pub fn parse_stat(id: &str) -> Option<Stat> {
    match id {
        "health" => Some(Stat::Health),
        "attack" => Some(Stat::Attack),
        "defense" => Some(Stat::Defense),
        "agility" => Some(Stat::Agility),
        "precision" => Some(Stat::Precision),
        "resistance" => Some(Stat::Resistance),
        _ => None,
    }
}

/// Nature skews one stat up 10% and another down 10%.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    #[default]
    Even,
    Fierce,
    Stalwart,
    Swift,
    Keen,
    Warded,
    Hearty,
}

pub fn stat_modifier(nature: Nature, stat: Stat) -> f32 {
    match nature {
        Nature::Even => 1.0,
        Nature::Fierce => bonus(stat, Stat::Attack, Stat::Defense),
        Nature::Stalwart => bonus(stat, Stat::Defense, Stat::Agility),
        Nature::Swift => bonus(stat, Stat::Agility, Stat::Resistance),
        Nature::Keen => bonus(stat, Stat::Precision, Stat::Attack),
        Nature::Warded => bonus(stat, Stat::Resistance, Stat::Agility),
        Nature::Hearty => bonus(stat, Stat::Health, Stat::Precision),
    }
}

fn bonus(stat: Stat, boosted: Stat, lowered: Stat) -> f32 {
    if stat == boosted {
        1.1
    } else if stat == lowered {
        0.9
    } else {
        1.0
    }
}

/// `Nature::Even` on unknown keys.
pub fn parse_nature(name: &str) -> Nature {
    match crate::data::normalize_key(name).as_str() {
        "fierce" => Nature::Fierce,
        "stalwart" => Nature::Stalwart,
        "swift" => Nature::Swift,
        "keen" => Nature::Keen,
        "warded" => Nature::Warded,
        "hearty" => Nature::Hearty,
        _ => Nature::Even,
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatBlock {
    pub health: u16,
    pub attack: u16,
    pub defense: u16,
    pub agility: u16,
    pub precision: u16,
    pub resistance: u16,
}

impl StatBlock {
    /// Template order: [health, attack, defense, agility, precision, resistance].
    pub fn from_array(base: [u16; 6]) -> Self {
        Self {
            health: base[0],
            attack: base[1],
            defense: base[2],
            agility: base[3],
            precision: base[4],
            resistance: base[5],
        }
    }

    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Health => self.health,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Agility => self.agility,
            Stat::Precision => self.precision,
            Stat::Resistance => self.resistance,
        }
    }
}
