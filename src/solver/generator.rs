use std::rc::Rc;

use crate::expression::Expr;

/// Full combination rule: every legal, non-redundant canonical result of
/// joining two disjoint-usage operands from different waves.
pub(crate) fn make(a: &Rc<Expr>, b: &Rc<Expr>) -> Vec<Rc<Expr>> {
    combine(a, b, false)
}

/// Same-wave combination rule. On top of `make`, skips a difference equal
/// to the smaller operand and a quotient equal to the divisor; those
/// values are reachable more directly, but only once both operands' wave
/// has fully populated the pool, so the prunes are unsound across waves.
pub(crate) fn make_half(a: &Rc<Expr>, b: &Rc<Expr>) -> Vec<Rc<Expr>> {
    combine(a, b, true)
}

fn combine(a: &Rc<Expr>, b: &Rc<Expr>, half: bool) -> Vec<Rc<Expr>> {
    debug_assert_eq!(a.usage() & b.usage(), 0);

    let (small, large) = if (a.value(), a.order()) <= (b.value(), b.order()) {
        (a, b)
    } else {
        (b, a)
    };
    let mut out = Vec::with_capacity(4);

    // Commutative ops are emitted once, smaller operand first; results
    // that overflow u64 are unreachable targets and skipped outright.
    if small.value().checked_add(large.value()).is_some() {
        out.push(Expr::add(small, large));
    }

    if small.value() != 1
        && large.value() != 1
        && small.value().checked_mul(large.value()).is_some()
    {
        out.push(Expr::mul(small, large));
    }

    // Only larger - smaller is ever formed. Equal operands give a zero
    // difference, which can itself be the target; the scheduler keeps
    // zero-valued results out of the pool.
    let diff = large.value() - small.value();
    if !(half && diff == small.value()) {
        out.push(Expr::sub(large, small));
    }

    if small.value() > 1 && large.value() % small.value() == 0 {
        let quotient = large.value() / small.value();
        if !(half && quotient == small.value()) {
            out.push(Expr::div(large, small));
        }
    }

    out
}
