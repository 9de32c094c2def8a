//! Outcome tokens emitted during round resolution.
//!
//! The engine appends tokens, never prose; rendering, localization and
//! audio cues are driven off these by external code.

use crate::data::artifacts::Artifact;
use crate::data::elements::WeatherKind;
use serde::Serialize;
use serde_json::json;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventToken {
    RoundStart { round: u32 },
    SpellUsed { team: usize, spell: String },
    SpellFailed { team: usize },
    DamageDealt { team: usize, amount: u16, critical: bool },
    LastStandHeld { team: usize },
    GuardHeld { team: usize },
    Fainted { team: usize },
    HexApplied { team: usize, hex: String },
    HexFailed { team: usize },
    StatIncreased { team: usize, stat: String },
    StatDecreased { team: usize, stat: String },
    HexTick { team: usize, hex: String, amount: u16, healing: bool },
    HexExpired { team: usize, hex: String },
    Healed { team: usize, amount: u16 },
    HealBlocked { team: usize },
    WeatherChanged { weather: WeatherKind },
    WeatherFailed,
    WeatherEnded,
    Swapped { team: usize, slot: usize },
    SwapFailed { team: usize },
    ForcedSwap { team: usize },
    ShieldRaised { team: usize },
    ShieldBlocked { team: usize },
    ShieldPierced { team: usize },
    ElementStripped { team: usize },
    ElementCopied { team: usize },
    HexesSwapped,
    HexesInverted { team: usize },
    ArtifactTaken { team: usize, artifact: Artifact },
    Cleansed,
    Sacrificed { team: usize },
    RegenProc { team: usize, amount: u16 },
    Forfeited { team: usize },
    BattleWon { team: usize },
    BattleDrawn,
}

/// Accumulating battle log. One instance per battle; the caller reads the
/// token stream at its own pace.
#[derive(Clone, Debug, Default)]
pub struct BattleLog {
    events: Vec<EventToken>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: EventToken) {
        self.events.push(token);
    }

    pub fn events(&self) -> &[EventToken] {
        &self.events
    }

    /// Tokens appended since `mark`. Callers snapshot `len()` before a step
    /// to observe only that step's output.
    pub fn since(&self, mark: usize) -> &[EventToken] {
        &self.events[mark.min(self.events.len())..]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({ "events": self.events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_returns_only_new_tokens() {
        let mut log = BattleLog::new();
        log.push(EventToken::RoundStart { round: 1 });
        let mark = log.len();
        log.push(EventToken::Fainted { team: 0 });
        assert_eq!(log.since(mark), &[EventToken::Fainted { team: 0 }]);
    }

    #[test]
    fn tokens_serialize_with_event_tag() {
        let mut log = BattleLog::new();
        log.push(EventToken::WeatherFailed);
        let value = log.to_json();
        assert_eq!(value["events"][0]["event"], "weather_failed");
    }
}
