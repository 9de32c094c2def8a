use serde::Serialize;

/// Equipped artifact altering in-battle behavior.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    /// The first otherwise-lethal hit leaves the holder at 1 HP. Consumed.
    LastStand,
    /// On fainting, tries to lay a blight on the opposing active combatant.
    PosthumousCurse,
    /// Restores max_health/16 at the end of every round.
    Regenerator,
    /// Weather set by the holder lasts longer.
    StormGlass,
    /// The holder gains an empower hex when swapped in.
    Vanguard,
    /// Being struck by a damaging sub-spell forces the holder's side to swap.
    Ejector,
}

pub fn parse_artifact(name: &str) -> Option<Artifact> {
    match super::normalize_key(name).as_str() {
        "laststand" => Some(Artifact::LastStand),
        "posthumouscurse" => Some(Artifact::PosthumousCurse),
        "regenerator" => Some(Artifact::Regenerator),
        "stormglass" => Some(Artifact::StormGlass),
        "vanguard" => Some(Artifact::Vanguard),
        "ejector" => Some(Artifact::Ejector),
        _ => None,
    }
}
