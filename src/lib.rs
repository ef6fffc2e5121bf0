//! Guild Hall - adventurer guild simulation core
//!
//! Procedural equipment, adventurers and the parties they form, with
//! synergy evaluation and mission feedback on cohesion and morale.

pub mod adventurer;
pub mod city;
pub mod core;
pub mod equipment;
pub mod guild;
pub mod party;
