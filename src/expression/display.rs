use std::fmt;

use crate::expression::ast::{Expr, Op};

/// Display adaptor that prints each leaf with trailing tick marks, so
/// repeated occurrences of the same input value stay distinguishable
/// (`5` vs `5'`). The marks table maps leaf index to ordinal and is
/// supplied by the caller; the engine never computes it.
pub struct Annotated<'a> {
    expr: &'a Expr,
    marks: &'a [usize],
}

impl Expr {
    pub fn annotated<'a>(&'a self, marks: &'a [usize]) -> Annotated<'a> {
        Annotated { expr: self, marks }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_expr(f, self, None)
    }
}

impl fmt::Display for Annotated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_expr(f, self.expr, Some(self.marks))
    }
}

/// Display-only precedence; additive < Div < Mul < leaf. Canonical chains
/// never place an additive node on the right of Sub, so left-associative
/// printing without extra parentheses reads back to the same value.
fn precedence(expr: &Expr) -> u8 {
    match expr.op() {
        Op::Add(..) | Op::Sub(..) => 0,
        Op::Div(..) => 1,
        Op::Mul(..) => 2,
        Op::Val(_) => 3,
    }
}

fn fmt_expr(f: &mut fmt::Formatter, expr: &Expr, marks: Option<&[usize]>) -> fmt::Result {
    let prec = precedence(expr);
    match expr.op() {
        Op::Val(index) => {
            write!(f, "{}", expr.value())?;
            if let Some(marks) = marks {
                let ticks = marks.get(*index).copied().unwrap_or(0);
                for _ in 0..ticks {
                    write!(f, "'")?;
                }
            }
            Ok(())
        }
        Op::Add(l, r) => fmt_binary(f, l, r, " + ", prec, marks),
        Op::Sub(l, r) => fmt_binary(f, l, r, " - ", prec, marks),
        Op::Mul(l, r) => fmt_binary(f, l, r, " * ", prec, marks),
        Op::Div(l, r) => fmt_binary(f, l, r, " / ", prec, marks),
    }
}

fn fmt_binary(
    f: &mut fmt::Formatter,
    left: &Expr,
    right: &Expr,
    op: &str,
    prec: u8,
    marks: Option<&[usize]>,
) -> fmt::Result {
    fmt_child(f, left, prec, marks)?;
    f.write_str(op)?;
    fmt_child(f, right, prec, marks)
}

fn fmt_child(
    f: &mut fmt::Formatter,
    child: &Expr,
    parent_prec: u8,
    marks: Option<&[usize]>,
) -> fmt::Result {
    if precedence(child) < parent_prec {
        write!(f, "(")?;
        fmt_expr(f, child, marks)?;
        write!(f, ")")
    } else {
        fmt_expr(f, child, marks)
    }
}
