// Balancing core: pair counts, cost, exact and random search, change detection
pub mod balancing;

// Domain-specific error types
pub mod errors;

// Match history
pub mod history;

// Participants, streaks and match results
pub mod participant;

// Rank table and streak adjustment
pub mod rating;

// Registered players
pub mod roster;
