//! `Vector<Term>` / `Matrix<Term>` / `Equation` — thin containers
//! (`spec.md` §3.4, §6: "only their map/each traversal is relied upon").
//!
//! These are not a linear-algebra library; `crate::calculus` consumes them
//! purely through [`MapEach::map_each`], mirroring how the calculus layer
//! in the source treats matrix mechanics as an external service.

use crate::core::term::Term;

/// A homogeneous row of terms.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector<T> {
    pub items: Vec<T>,
}

impl<T> Vector<T> {
    pub fn new(items: Vec<T>) -> Self {
        Vector { items }
    }
}

/// A row-major grid of terms.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    pub rows: Vec<Vec<T>>,
}

impl<T> Matrix<T> {
    pub fn new(rows: Vec<Vec<T>>) -> Self {
        Matrix { rows }
    }
}

/// `lhs = rhs` (`spec.md` §3.4): differentiation/integration distribute
/// over both sides independently.
#[derive(Clone, Debug, PartialEq)]
pub struct Equation {
    pub lhs: Term,
    pub rhs: Term,
}

impl Equation {
    pub fn new(lhs: Term, rhs: Term) -> Self {
        Equation { lhs, rhs }
    }
}

/// Shared traversal seam the calculus layer relies on instead of depending
/// on `Vector`/`Matrix`/`Equation` concretely.
pub trait MapEach<T> {
    fn map_each<F: FnMut(&T) -> T>(&self, f: F) -> Self;
}

impl MapEach<Term> for Vector<Term> {
    fn map_each<F: FnMut(&Term) -> Term>(&self, mut f: F) -> Self {
        Vector::new(self.items.iter().map(|t| f(t)).collect())
    }
}

impl MapEach<Term> for Matrix<Term> {
    fn map_each<F: FnMut(&Term) -> Term>(&self, mut f: F) -> Self {
        Matrix::new(
            self.rows
                .iter()
                .map(|row| row.iter().map(|t| f(t)).collect())
                .collect(),
        )
    }
}

impl MapEach<Term> for Equation {
    fn map_each<F: FnMut(&Term) -> Term>(&self, mut f: F) -> Self {
        Equation::new(f(&self.lhs), f(&self.rhs))
    }
}
