// Shared foundation for the rinksim workspace: configuration loading,
// seeded randomness and the weighted-choice primitive the simulator draws
// goalies, assisters and goal minutes with.

pub mod config;
pub mod rng;
pub mod weighted;
