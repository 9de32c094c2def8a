use serde::{Deserialize, Serialize};

/// Elemental typing shared by combatants and spells.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Ember,
    Tide,
    Bramble,
    Gale,
    Lumen,
    Umbral,
    Arcane,
}

pub const ALL_ELEMENTS: [Element; 7] = [
    Element::Ember,
    Element::Tide,
    Element::Bramble,
    Element::Gale,
    Element::Lumen,
    Element::Umbral,
    Element::Arcane,
];

/// True when `attacker` holds the advantage over `defender` in the cycle.
fn beats(attacker: Element, defender: Element) -> bool {
    use Element::*;
    matches!(
        (attacker, defender),
        (Ember, Bramble) | (Bramble, Tide) | (Tide, Ember) | (Gale, Bramble) | (Lumen, Umbral) | (Umbral, Lumen)
    )
}

/// One contribution of the elemental modifier: x2 with the advantage,
/// x0.5 against it, x1 otherwise. Arcane is neutral both ways.
pub fn advantage(attacker: Element, defender: Element) -> f32 {
    if beats(attacker, defender) {
        2.0
    } else if beats(defender, attacker) {
        0.5
    } else {
        1.0
    }
}

pub fn parse_element(name: &str) -> Option<Element> {
    match super::normalize_key(name).as_str() {
        "ember" => Some(Element::Ember),
        "tide" => Some(Element::Tide),
        "bramble" => Some(Element::Bramble),
        "gale" => Some(Element::Gale),
        "lumen" => Some(Element::Lumen),
        "umbral" => Some(Element::Umbral),
        "arcane" => Some(Element::Arcane),
        _ => None,
    }
}

/// Global weather condition kinds. Each boosts a fixed set of spell elements.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    Scorch,
    Downpour,
    Overgrowth,
    Eclipse,
}

impl WeatherKind {
    pub fn boosted_elements(self) -> &'static [Element] {
        match self {
            WeatherKind::Scorch => &[Element::Ember],
            WeatherKind::Downpour => &[Element::Tide],
            WeatherKind::Overgrowth => &[Element::Bramble, Element::Gale],
            WeatherKind::Eclipse => &[Element::Lumen, Element::Umbral],
        }
    }

    pub fn boosts(self, element: Element) -> bool {
        self.boosted_elements().contains(&element)
    }
}
