//! Turn-based combat resolution engine: two teams of witches trade
//! committed moves in discrete rounds, and the engine orders, resolves
//! and reports every step as outcome tokens.
//!
//! The crate has no I/O of its own. Callers submit moves, drain the turn
//! queue at their own pace, and render the token log however they like.

pub mod config;
pub mod data;
pub mod log;
pub mod sim;

pub mod prelude {
    pub use crate::config::BattleConfig;
    pub use crate::data::abilities::Ability;
    pub use crate::data::artifacts::Artifact;
    pub use crate::data::elements::{Element, WeatherKind};
    pub use crate::log::{BattleLog, EventToken};
    pub use crate::sim::ai::{choose_swap_target, HeuristicPolicy, OpponentPolicy};
    pub use crate::sim::battle::{Battle, Outcome, Phase, SubmitError};
    pub use crate::sim::combatant::Combatant;
    pub use crate::sim::hexes::Weather;
    pub use crate::sim::stats::{Nature, Stat, StatBlock};
    pub use crate::sim::team::{Move, Team};
    pub use crate::sim::turn::TurnStep;
}
