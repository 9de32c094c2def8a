pub mod ai;
pub mod battle;
pub mod calc;
pub mod combatant;
pub mod hexes;
pub mod spells;
pub mod stats;
pub mod team;
pub mod turn;
