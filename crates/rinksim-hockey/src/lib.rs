// Hockey season engine: domain model, per-game simulation, season loop,
// standings, leaderboards and input loaders.

pub mod accumulator;
pub mod assists;
pub mod data;
pub mod error;
pub mod game;
pub mod goalie;
pub mod injury;
pub mod leaders;
pub mod league;
pub mod model;
pub mod season;
pub mod skater;
pub mod standings;
pub mod team;
pub mod timing;
