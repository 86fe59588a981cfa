//! Universal law coverage (spec.md §8.1): properties that must hold across
//! many inputs rather than a single worked example.

#[path = "properties_tests/derivative_laws.rs"]
mod derivative_laws;
#[path = "properties_tests/integral_laws.rs"]
mod integral_laws;
#[path = "properties_tests/limit_laws.rs"]
mod limit_laws;
#[path = "properties_tests/sum_product_laws.rs"]
mod sum_product_laws;
