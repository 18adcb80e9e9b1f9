//! Local search operators for improving CARP solutions.
//!
//! - [`two_opt`] — Intra-route reversal of served-edge blocks
//! - [`relocate`] — Inter-route relocation of a served edge
//! - [`random_relocation`] — Random single-edge relocation (perturbation)
//! - [`ejection_chain`] — Rounds of local search linked by perturbations
//!
//! All operators take the source solution by reference and return a
//! candidate; the source is never modified.

mod ejection_chain;
mod perturb;
mod relocate;
mod two_opt;

pub use ejection_chain::ejection_chain;
pub use perturb::random_relocation;
pub use relocate::relocate;
pub use two_opt::{two_opt, two_opt_route};

/// Minimum cost decrease that counts as an improvement.
pub(crate) const EPS: f64 = 1e-9;
