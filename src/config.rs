//! Process-wide, read-only configuration consulted by calculus strategies.
//!
//! Grounded on `mathhook-core/src/parser/constants.rs`'s `Lazy`-backed
//! constant-table idiom: canonical function names are compile-time string
//! constants, not a runtime registry, since they never change within a
//! process.

/// Recursion/iteration caps and canonical names for a single computation.
///
/// `spec.md` §3.5 describes these as process-wide settings "initialized
/// once and treated as read-only for the duration of a computation" — in
/// this crate they're a plain `Copy` struct threaded through call sites
/// (explicitly, not via a global), which sidesteps global mutable state
/// entirely while keeping the same semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on recursive `integrate` invocations (`spec.md` §3.5).
    pub integration_depth: u32,
    /// Upper bound on recursive `limit`/`divide` invocations (`spec.md` §3.5).
    pub max_lim_depth: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            integration_depth: 10,
            max_lim_depth: 10,
        }
    }
}

/// Canonical function names consulted by strategies (`spec.md` §3.5).
pub mod function_names {
    pub const LOG: &str = "log";
    pub const LOG10: &str = "log10";
    pub const PARENTHESIS: &str = "parens";
    pub const FACTORIAL: &str = "factorial";

    pub const SIN: &str = "sin";
    pub const COS: &str = "cos";
    pub const TAN: &str = "tan";
    pub const SEC: &str = "sec";
    pub const CSC: &str = "csc";
    pub const COT: &str = "cot";

    pub const ASIN: &str = "asin";
    pub const ACOS: &str = "acos";
    pub const ATAN: &str = "atan";
    pub const ASEC: &str = "asec";
    pub const ACSC: &str = "acsc";
    pub const ACOT: &str = "acot";

    pub const SINH: &str = "sinh";
    pub const COSH: &str = "cosh";
    pub const TANH: &str = "tanh";
    pub const SECH: &str = "sech";
    pub const CSCH: &str = "csch";
    pub const COTH: &str = "coth";

    pub const ASINH: &str = "asinh";
    pub const ACOSH: &str = "acosh";
    pub const ATANH: &str = "atanh";
    pub const ASECH: &str = "asech";
    pub const ACSCH: &str = "acsch";
    pub const ACOTH: &str = "acoth";

    pub const ABS: &str = "abs";
    pub const SIGN: &str = "sign";
    pub const SQRT: &str = "sqrt";
    pub const EXP: &str = "exp";
    pub const SINC: &str = "sinc";
    pub const ATAN2: &str = "atan2";

    pub const FRESNEL_S: &str = "S";
    pub const FRESNEL_C: &str = "C";
    pub const SI: &str = "Si";
    pub const SHI: &str = "Shi";
    pub const CI: &str = "Ci";
    pub const CHI: &str = "Chi";
    pub const EI: &str = "Ei";
    pub const LI: &str = "Li";
    pub const ERF: &str = "erf";

    /// Symbolic placeholder wrapper for an unresolved definite integral.
    pub const DEFINT: &str = "defint";
    /// Symbolic placeholder wrapper for an unresolved indefinite integral.
    pub const INTEGRATE: &str = "integrate";
    /// Symbolic placeholder wrapper for an unresolved limit.
    pub const LIMIT: &str = "limit";
    /// Symbolic placeholder wrapper for an unresolved finite sum.
    pub const SUM: &str = "sum";
    /// Symbolic placeholder wrapper for an unresolved finite product.
    pub const PRODUCT: &str = "product";
}

/// `spec.md` §4.G: beyond this many terms, sum/product switch to numeric
/// (`f64`) accumulation instead of exact-rational accumulation.
pub const NUMERIC_EXPANSION_THRESHOLD: i64 = 200;
