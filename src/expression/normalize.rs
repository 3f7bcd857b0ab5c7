//! Canonical constructors for binary expressions.
//!
//! Semantically identical results (`a + (b + c)` vs `(a + b) + c`,
//! `a * b` vs `b * a`) must end up as the same structural value so the
//! structural dedup catches them. Each operator family (Add/Sub and
//! Mul/Div) is kept as a left-leaning chain: all positive contributions
//! folded first in ascending value order, then all negative ones on top.
//! A join whose immediate shape is already canonical is built directly
//! from its children without flattening.

use std::rc::Rc;

use crate::expression::ast::{Expr, Op};

impl Expr {
    /// Canonical addition of two disjoint-usage operands.
    pub fn add(left: &Rc<Expr>, right: &Rc<Expr>) -> Rc<Expr> {
        if add_canonical(left, right) {
            return Expr::raw_add(Rc::clone(left), Rc::clone(right));
        }
        normalized_additive(left, right, false)
    }

    /// Canonical subtraction; `left.value() >= right.value()` is an
    /// engine invariant upheld by the operator generator.
    pub fn sub(left: &Rc<Expr>, right: &Rc<Expr>) -> Rc<Expr> {
        if sub_canonical(left, right) {
            return Expr::raw_sub(Rc::clone(left), Rc::clone(right));
        }
        normalized_additive(left, right, true)
    }

    /// Canonical multiplication of two disjoint-usage operands.
    pub fn mul(left: &Rc<Expr>, right: &Rc<Expr>) -> Rc<Expr> {
        if mul_canonical(left, right) {
            return Expr::raw_mul(Rc::clone(left), Rc::clone(right));
        }
        normalized_multiplicative(left, right, false)
    }

    /// Canonical division; the quotient must be exact, which the operator
    /// generator checks before calling.
    pub fn div(left: &Rc<Expr>, right: &Rc<Expr>) -> Rc<Expr> {
        if div_canonical(left, right) {
            return Expr::raw_div(Rc::clone(left), Rc::clone(right));
        }
        normalized_multiplicative(left, right, true)
    }
}

fn is_additive(expr: &Expr) -> bool {
    matches!(expr.op(), Op::Add(..) | Op::Sub(..))
}

fn is_multiplicative(expr: &Expr) -> bool {
    matches!(expr.op(), Op::Mul(..) | Op::Div(..))
}

/// An Add join is canonical when the right operand is not part of the
/// additive family and the left spine's top operand does not exceed it.
/// A Sub under an Add is never canonical: subtractions sit above all
/// additions in the chain.
fn add_canonical(left: &Expr, right: &Expr) -> bool {
    if is_additive(right) {
        return false;
    }
    match left.op() {
        Op::Add(_, top) => top.value() <= right.value(),
        Op::Sub(..) => false,
        _ => left.value() <= right.value(),
    }
}

fn sub_canonical(left: &Expr, right: &Expr) -> bool {
    if is_additive(right) {
        return false;
    }
    match left.op() {
        Op::Sub(_, top) => top.value() <= right.value(),
        _ => true,
    }
}

fn mul_canonical(left: &Expr, right: &Expr) -> bool {
    if is_multiplicative(right) {
        return false;
    }
    match left.op() {
        Op::Mul(_, top) => top.value() <= right.value(),
        Op::Div(..) => false,
        _ => left.value() <= right.value(),
    }
}

fn div_canonical(left: &Expr, right: &Expr) -> bool {
    if is_multiplicative(right) {
        return false;
    }
    match left.op() {
        Op::Div(_, top) => top.value() <= right.value(),
        _ => true,
    }
}

/// Collect the additive spine of `expr` into positive and negative
/// contribution lists. `positive` flips when descending into the right
/// child of a Sub. Canonical spines yield both lists in ascending order.
fn split_additive(
    expr: &Rc<Expr>,
    positive: bool,
    adds: &mut Vec<Rc<Expr>>,
    subs: &mut Vec<Rc<Expr>>,
) {
    match expr.op() {
        Op::Add(l, r) => {
            split_additive(l, positive, adds, subs);
            split_additive(r, positive, adds, subs);
        }
        Op::Sub(l, r) => {
            split_additive(l, positive, adds, subs);
            split_additive(r, !positive, adds, subs);
        }
        _ => {
            if positive {
                adds.push(Rc::clone(expr));
            } else {
                subs.push(Rc::clone(expr));
            }
        }
    }
}

fn split_multiplicative(
    expr: &Rc<Expr>,
    positive: bool,
    muls: &mut Vec<Rc<Expr>>,
    divs: &mut Vec<Rc<Expr>>,
) {
    match expr.op() {
        Op::Mul(l, r) => {
            split_multiplicative(l, positive, muls, divs);
            split_multiplicative(r, positive, muls, divs);
        }
        Op::Div(l, r) => {
            split_multiplicative(l, positive, muls, divs);
            split_multiplicative(r, !positive, muls, divs);
        }
        _ => {
            if positive {
                muls.push(Rc::clone(expr));
            } else {
                divs.push(Rc::clone(expr));
            }
        }
    }
}

/// Stable merge of two value-ascending operand lists; ties keep the
/// left-hand list's elements first.
fn merge_by_value(left: Vec<Rc<Expr>>, right: Vec<Rc<Expr>>) -> Vec<Rc<Expr>> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.value() <= r.value(),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        if let Some(expr) = next {
            merged.push(expr);
        }
    }
    merged
}

fn normalized_additive(left: &Rc<Expr>, right: &Rc<Expr>, subtract: bool) -> Rc<Expr> {
    let (mut left_adds, mut left_subs) = (Vec::new(), Vec::new());
    let (mut right_adds, mut right_subs) = (Vec::new(), Vec::new());
    split_additive(left, true, &mut left_adds, &mut left_subs);
    split_additive(right, !subtract, &mut right_adds, &mut right_subs);

    let adds = merge_by_value(left_adds, right_adds);
    let subs = merge_by_value(left_subs, right_subs);

    // Folding every positive term before any negative one keeps each
    // intermediate value at or above the final (non-negative) result.
    let mut terms = adds.into_iter();
    let Some(mut acc) = terms.next() else {
        unreachable!("an additive spine always has at least one positive term");
    };
    for term in terms {
        if acc.value().checked_add(term.value()).is_none() {
            // The positive terms alone can pass u64 range even when the
            // joined value fits; keep the operands' own shape then.
            return if subtract {
                Expr::raw_sub(Rc::clone(left), Rc::clone(right))
            } else {
                Expr::raw_add(Rc::clone(left), Rc::clone(right))
            };
        }
        acc = Expr::raw_add(acc, term);
    }
    for term in subs {
        acc = Expr::raw_sub(acc, term);
    }
    acc
}

fn normalized_multiplicative(left: &Rc<Expr>, right: &Rc<Expr>, divide: bool) -> Rc<Expr> {
    let (mut left_muls, mut left_divs) = (Vec::new(), Vec::new());
    let (mut right_muls, mut right_divs) = (Vec::new(), Vec::new());
    split_multiplicative(left, true, &mut left_muls, &mut left_divs);
    split_multiplicative(right, !divide, &mut right_muls, &mut right_divs);

    let muls = merge_by_value(left_muls, right_muls);
    let divs = merge_by_value(left_divs, right_divs);

    // The full product is divisible by the product of all divisors, so
    // every prefix quotient along the rebuilt chain stays exact.
    let mut factors = muls.into_iter();
    let Some(mut acc) = factors.next() else {
        unreachable!("a multiplicative spine always has at least one factor");
    };
    for factor in factors {
        if acc.value().checked_mul(factor.value()).is_none() {
            // Same escape as the additive rebuild: the undivided product
            // can pass u64 range even when the joined value fits.
            return if divide {
                Expr::raw_div(Rc::clone(left), Rc::clone(right))
            } else {
                Expr::raw_mul(Rc::clone(left), Rc::clone(right))
            };
        }
        acc = Expr::raw_mul(acc, factor);
    }
    for factor in divs {
        acc = Expr::raw_div(acc, factor);
    }
    acc
}
