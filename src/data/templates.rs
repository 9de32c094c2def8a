use crate::data::elements::Element;
use phf::phf_map;

/// Immutable combatant template. Stats are ordered
/// [health, attack, defense, agility, precision, resistance].
#[derive(Clone, Copy, Debug)]
pub struct TemplateData {
    pub name: &'static str,
    pub element: Element,
    pub base: [u16; 6],
    pub nature: &'static str,
    pub ability: &'static str,
    pub artifact: Option<&'static str>,
    pub spells: &'static [&'static str],
}

pub static TEMPLATES: phf::Map<&'static str, TemplateData> = phf_map! {
    "emberwitch" => TemplateData {
        name: "emberwitch",
        element: Element::Ember,
        base: [100, 70, 50, 65, 60, 45],
        nature: "fierce",
        ability: "ferocity",
        artifact: None,
        spells: &["cinderbolt", "emberstorm", "scorchsky", "searbrand"],
    },
    "tidewitch" => TemplateData {
        name: "tidewitch",
        element: Element::Tide,
        base: [110, 55, 60, 55, 55, 55],
        nature: "stalwart",
        ability: "ironclad",
        artifact: Some("laststand"),
        spells: &["tidalrush", "surgewave", "downpourcall", "mendwounds"],
    },
    "bramblewitch" => TemplateData {
        name: "bramblewitch",
        element: Element::Bramble,
        base: [105, 60, 65, 45, 50, 60],
        nature: "warded",
        ability: "hexward",
        artifact: Some("regenerator"),
        spells: &["thornlash", "venomthorn", "entanglevines", "overgrowthcall"],
    },
    "galewitch" => TemplateData {
        name: "galewitch",
        element: Element::Gale,
        base: [90, 60, 45, 85, 65, 40],
        nature: "swift",
        ability: "fleetfoot",
        artifact: Some("ejector"),
        spells: &["galecut", "banishgust", "befuddlemist", "wardingcircle"],
    },
    "lumenwitch" => TemplateData {
        name: "lumenwitch",
        element: Element::Lumen,
        base: [95, 55, 55, 60, 75, 55],
        nature: "keen",
        ability: "hawkeye",
        artifact: Some("stormglass"),
        spells: &["lumenray", "mendwounds", "aegischant", "purgerite"],
    },
    "umbralwitch" => TemplateData {
        name: "umbralwitch",
        element: Element::Umbral,
        base: [95, 65, 50, 60, 55, 60],
        nature: "fierce",
        ability: "mirrorveil",
        artifact: Some("posthumouscurse"),
        spells: &["gloomfang", "blightcurse", "hexfeast", "shacklebind"],
    },
    "covenelder" => TemplateData {
        name: "covenelder",
        element: Element::Arcane,
        base: [100, 60, 60, 60, 60, 60],
        nature: "even",
        ability: "none",
        artifact: Some("vanguard"),
        spells: &["arcanebolt", "crescendo", "veilpiercer", "hexmirror"],
    },
};

pub fn get_template(name: &str) -> Option<&'static TemplateData> {
    let key = super::normalize_key(name);
    TEMPLATES.get(key.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::abilities::parse_ability;
    use crate::data::spells::get_spell;

    #[test]
    fn template_spells_exist_in_the_catalog() {
        for (_, template) in TEMPLATES.entries() {
            for spell in template.spells {
                assert!(get_spell(spell).is_some(), "{} lists unknown spell {spell}", template.name);
            }
        }
    }

    #[test]
    fn template_abilities_parse() {
        // parse_ability is total, so this just pins the catalog spellings.
        for (_, template) in TEMPLATES.entries() {
            let _ = parse_ability(template.ability);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(get_template("EmberWitch").is_some());
        assert!(get_template("unknownwitch").is_none());
    }
}
