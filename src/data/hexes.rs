use phf::phf_map;

/// Static definition of a hex (status effect). A weather condition shares
/// this shape but lives globally; see [`crate::data::elements::WeatherKind`].
#[derive(Clone, Copy, Debug)]
pub struct HexData {
    pub name: &'static str,
    /// Duration in rounds; -1 means "until removed".
    pub turns: i8,
    pub harmful: bool,
    /// Percent of max health applied at end of round. Negative damages,
    /// positive heals, zero for non-ticking hexes.
    pub tick_percent: i8,
    /// Stat id and multiplier while the hex is active.
    pub stat: Option<(&'static str, f32)>,
    /// Key of the opposite hex, for reflect/invert mechanics.
    pub opposite: Option<&'static str>,
}

pub static HEXES: phf::Map<&'static str, HexData> = phf_map! {
    "blight" => HexData {
        name: "blight",
        turns: 3,
        harmful: true,
        tick_percent: -12,
        stat: None,
        opposite: Some("regrowth"),
    },
    "regrowth" => HexData {
        name: "regrowth",
        turns: 3,
        harmful: false,
        tick_percent: 8,
        stat: None,
        opposite: Some("blight"),
    },
    "empower" => HexData {
        name: "empower",
        turns: 3,
        harmful: false,
        tick_percent: 0,
        stat: Some(("attack", 1.5)),
        opposite: Some("enfeeble"),
    },
    "enfeeble" => HexData {
        name: "enfeeble",
        turns: 3,
        harmful: true,
        tick_percent: 0,
        stat: Some(("attack", 0.67)),
        opposite: Some("empower"),
    },
    "stonehide" => HexData {
        name: "stonehide",
        turns: 3,
        harmful: false,
        tick_percent: 0,
        stat: Some(("defense", 1.5)),
        opposite: Some("sunder"),
    },
    "sunder" => HexData {
        name: "sunder",
        turns: 3,
        harmful: true,
        tick_percent: 0,
        stat: Some(("defense", 0.67)),
        opposite: Some("stonehide"),
    },
    "quicken" => HexData {
        name: "quicken",
        turns: 3,
        harmful: false,
        tick_percent: 0,
        stat: Some(("agility", 1.5)),
        opposite: Some("slow"),
    },
    "slow" => HexData {
        name: "slow",
        turns: 3,
        harmful: true,
        tick_percent: 0,
        stat: Some(("agility", 0.67)),
        opposite: Some("quicken"),
    },
    // Confusion: the committed spell may be swapped for a random usable one.
    "befuddle" => HexData {
        name: "befuddle",
        turns: 2,
        harmful: true,
        tick_percent: 0,
        stat: None,
        opposite: None,
    },
    // Restriction: repeats the last non-swap move when possible.
    "shackle" => HexData {
        name: "shackle",
        turns: 2,
        harmful: true,
        tick_percent: 0,
        stat: None,
        opposite: None,
    },
    // Healing blocked while active.
    "sear" => HexData {
        name: "sear",
        turns: 3,
        harmful: true,
        tick_percent: 0,
        stat: None,
        opposite: None,
    },
    // Swapping blocked while active.
    "entangle" => HexData {
        name: "entangle",
        turns: 2,
        harmful: true,
        tick_percent: 0,
        stat: None,
        opposite: None,
    },
    // Guaranteed survival of the next hit; consumed when it triggers.
    "aegis" => HexData {
        name: "aegis",
        turns: -1,
        harmful: false,
        tick_percent: 0,
        stat: None,
        opposite: None,
    },
};

pub fn get_hex(name: &str) -> Option<&'static HexData> {
    let key = super::normalize_key(name);
    HEXES.get(key.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites_are_symmetric() {
        for (key, hex) in HEXES.entries() {
            if let Some(opp) = hex.opposite {
                let other = HEXES.get(opp).expect("opposite exists in catalog");
                assert_eq!(other.opposite, Some(*key));
                assert_ne!(other.harmful, hex.harmful);
            }
        }
    }

    #[test]
    fn lookup_normalizes_and_misses_gracefully() {
        assert!(get_hex("Blight").is_some());
        assert!(get_hex("  sear ").is_some());
        assert!(get_hex("frostbite").is_none());
    }

    #[test]
    fn ticking_hexes_have_signed_magnitudes() {
        assert!(get_hex("blight").unwrap().tick_percent < 0);
        assert!(get_hex("regrowth").unwrap().tick_percent > 0);
    }
}
