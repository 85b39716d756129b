// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (JWT auth, identity passed to every handler)
pub mod protected;
pub mod public;
