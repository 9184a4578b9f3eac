// Gateway module for gate - the password-entry lifecycle on the profile view
// Callers go through these re-exports, never the private submodules

mod controller;
mod token;

pub use controller::{GateController, GateEffect, GatePhase, GateTimings, WORKING_LABEL};
pub use token::MountToken;
