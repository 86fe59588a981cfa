//! Minimal-but-real collaborator services the integrator treats as a black
//! box (`spec.md` §1, §6: "Factorization, polynomial division, partial
//! fraction decomposition, ... simplification — consumed as black-box
//! services"). These are deliberately modest, not a full CAS — just enough
//! for the calculus rules that dispatch on their results to be exercisable.

pub mod factor;
pub mod partfrac;
pub mod simplify;

pub use factor::{coeff_factor, factor_inner};
pub use partfrac::partfrac;
pub use simplify::simplify;
