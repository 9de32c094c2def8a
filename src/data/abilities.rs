/// Passive ability carried by a combatant. Abilities either skew one
/// modified stat or interfere with incoming hexes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Ability {
    #[default]
    None,
    /// Attack x1.25.
    Ferocity,
    /// Defense x1.25.
    Ironclad,
    /// Agility x1.25.
    Fleetfoot,
    /// Precision x1.25.
    Hawkeye,
    /// 50% chance to shrug off a resistible hex.
    Hexward,
    /// Incoming harmful hexes are replaced by their declared opposite.
    Mirrorveil,
}

impl Ability {
    /// Flat multiplier applied on top of the nature modifier.
    /// `stat` is the catalog stat id ("attack", "defense", ...).
    pub fn stat_multiplier(self, stat: &str) -> f32 {
        match (self, stat) {
            (Ability::Ferocity, "attack") => 1.25,
            (Ability::Ironclad, "defense") => 1.25,
            (Ability::Fleetfoot, "agility") => 1.25,
            (Ability::Hawkeye, "precision") => 1.25,
            _ => 1.0,
        }
    }

    /// Percent chance to resist a resistible hex, if any.
    pub fn resist_chance(self) -> Option<u8> {
        match self {
            Ability::Hexward => Some(50),
            _ => None,
        }
    }

    /// Whether incoming hexes are redirected to their opposite.
    pub fn redirects_hexes(self) -> bool {
        matches!(self, Ability::Mirrorveil)
    }
}

/// Neutral `Ability::None` on unknown keys.
pub fn parse_ability(name: &str) -> Ability {
    match super::normalize_key(name).as_str() {
        "ferocity" => Ability::Ferocity,
        "ironclad" => Ability::Ironclad,
        "fleetfoot" => Ability::Fleetfoot,
        "hawkeye" => Ability::Hawkeye,
        "hexward" => Ability::Hexward,
        "mirrorveil" => Ability::Mirrorveil,
        _ => Ability::None,
    }
}
