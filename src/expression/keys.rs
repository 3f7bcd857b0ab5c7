//! The two equivalence keys over expressions.
//!
//! Structural identity and numeric identity are deliberately separate
//! wrapper types rather than one overloaded `Eq` impl on `Expr`, so a
//! hash set of one can never be fed keys of the other by accident.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::expression::ast::{Expr, Op};

/// Equivalence by exact tree identity: same operator shape and the same
/// physical input occurrences (leaf indices). Two structurally equal
/// expressions would print identically, tick marks included.
#[derive(Debug, Clone)]
pub struct Structural(pub Rc<Expr>);

/// Equivalence by operator shape and leaf values, ignoring which physical
/// occurrence of a duplicate-valued input was used. Used only to avoid
/// reporting duplicate-looking solutions.
#[derive(Debug, Clone)]
pub struct Numeric(pub Rc<Expr>);

impl PartialEq for Structural {
    fn eq(&self, other: &Self) -> bool {
        structural_eq(&self.0, &other.0)
    }
}

impl Eq for Structural {}

impl Hash for Structural {
    fn hash<H: Hasher>(&self, state: &mut H) {
        structural_hash(&self.0, state);
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        numeric_eq(&self.0, &other.0)
    }
}

impl Eq for Numeric {}

impl Hash for Numeric {
    fn hash<H: Hasher>(&self, state: &mut H) {
        numeric_hash(&self.0, state);
    }
}

fn class_tag(expr: &Expr) -> u8 {
    match expr.op() {
        Op::Val(_) => 0,
        Op::Add(..) => 1,
        Op::Sub(..) => 2,
        Op::Mul(..) => 3,
        Op::Div(..) => 4,
    }
}

fn structural_eq(a: &Rc<Expr>, b: &Rc<Expr>) -> bool {
    // Sub-expressions are shared, so pointer identity is common.
    if Rc::ptr_eq(a, b) {
        return true;
    }
    match (a.op(), b.op()) {
        (Op::Val(i), Op::Val(j)) => i == j,
        (Op::Add(al, ar), Op::Add(bl, br))
        | (Op::Sub(al, ar), Op::Sub(bl, br))
        | (Op::Mul(al, ar), Op::Mul(bl, br))
        | (Op::Div(al, ar), Op::Div(bl, br)) => {
            structural_eq(al, bl) && structural_eq(ar, br)
        }
        _ => false,
    }
}

fn numeric_eq(a: &Rc<Expr>, b: &Rc<Expr>) -> bool {
    if Rc::ptr_eq(a, b) {
        return true;
    }
    if a.value() != b.value() {
        return false;
    }
    match (a.op(), b.op()) {
        (Op::Val(_), Op::Val(_)) => true,
        (Op::Add(al, ar), Op::Add(bl, br))
        | (Op::Sub(al, ar), Op::Sub(bl, br))
        | (Op::Mul(al, ar), Op::Mul(bl, br))
        | (Op::Div(al, ar), Op::Div(bl, br)) => numeric_eq(al, bl) && numeric_eq(ar, br),
        _ => false,
    }
}

fn structural_hash<H: Hasher>(expr: &Expr, state: &mut H) {
    state.write_u8(class_tag(expr));
    match expr.op() {
        Op::Val(index) => state.write_usize(*index),
        Op::Add(l, r) | Op::Sub(l, r) | Op::Mul(l, r) | Op::Div(l, r) => {
            structural_hash(l, state);
            structural_hash(r, state);
        }
    }
}

fn numeric_hash<H: Hasher>(expr: &Expr, state: &mut H) {
    state.write_u8(class_tag(expr));
    match expr.op() {
        Op::Val(_) => state.write_u64(expr.value()),
        Op::Add(l, r) | Op::Sub(l, r) | Op::Mul(l, r) | Op::Div(l, r) => {
            numeric_hash(l, state);
            numeric_hash(r, state);
        }
    }
}
