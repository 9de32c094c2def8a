use serde::Deserialize;

/// Engine tuning knobs. The pacing delay exists for presentation only and
/// is never consulted during resolution.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Suggested delay between drained turn steps, in milliseconds.
    pub step_delay_ms: u64,
    /// Maximum concurrent hexes per combatant.
    pub hex_cap: usize,
    /// Rounds a freshly set weather lasts.
    pub weather_turns: u8,
    /// Rounds when the setter holds a StormGlass.
    pub extended_weather_turns: u8,
    /// Committed moves kept per team for repeat-move checks.
    pub history_len: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 600,
            hex_cap: 2,
            weather_turns: 5,
            extended_weather_turns: 8,
            history_len: 4,
        }
    }
}
