use std::rc::Rc;

/// Operator (or leaf) variant of an expression node.
///
/// The four binary operators and the leaf form a closed set; children are
/// shared immutable nodes, so the same sub-expression may sit under many
/// parents.
#[derive(Debug)]
pub enum Op {
    /// A single input number, identified by its position in the input slice.
    Val(usize),
    Add(Rc<Expr>, Rc<Expr>),
    Sub(Rc<Expr>, Rc<Expr>),
    Mul(Rc<Expr>, Rc<Expr>),
    Div(Rc<Expr>, Rc<Expr>),
}

/// An immutable arithmetic expression over indexed input numbers.
///
/// `value` and `usage` are computed once at construction. `usage` has one
/// bit per input index; a node's mask is the union of its leaves' masks,
/// and the two children of a binary node never share a bit.
#[derive(Debug)]
pub struct Expr {
    op: Op,
    value: u64,
    usage: u64,
}

impl Expr {
    /// Construct a leaf for input number `value` at position `index`.
    ///
    /// Positivity of `value` and `index < 64` are validated once by the
    /// solver before any leaf is built.
    pub fn leaf(value: u64, index: usize) -> Rc<Expr> {
        Rc::new(Expr {
            op: Op::Val(index),
            value,
            usage: 1 << index,
        })
    }

    pub fn op(&self) -> &Op {
        &self.op
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn usage(&self) -> u64 {
        self.usage
    }

    /// Total order used to break ties between equal-valued operands, so
    /// that exactly one ordering of a commutative combination is emitted.
    /// Leaves order by index, composites by class then value.
    pub(crate) fn order(&self) -> (u8, u64) {
        match &self.op {
            Op::Val(index) => (0, *index as u64),
            Op::Add(..) => (1, self.value),
            Op::Sub(..) => (2, self.value),
            Op::Mul(..) => (3, self.value),
            Op::Div(..) => (4, self.value),
        }
    }

    pub(crate) fn raw_add(left: Rc<Expr>, right: Rc<Expr>) -> Rc<Expr> {
        debug_assert_eq!(left.usage & right.usage, 0);
        Rc::new(Expr {
            value: left.value + right.value,
            usage: left.usage | right.usage,
            op: Op::Add(left, right),
        })
    }

    pub(crate) fn raw_sub(left: Rc<Expr>, right: Rc<Expr>) -> Rc<Expr> {
        debug_assert_eq!(left.usage & right.usage, 0);
        debug_assert!(left.value >= right.value);
        Rc::new(Expr {
            value: left.value - right.value,
            usage: left.usage | right.usage,
            op: Op::Sub(left, right),
        })
    }

    pub(crate) fn raw_mul(left: Rc<Expr>, right: Rc<Expr>) -> Rc<Expr> {
        debug_assert_eq!(left.usage & right.usage, 0);
        Rc::new(Expr {
            value: left.value * right.value,
            usage: left.usage | right.usage,
            op: Op::Mul(left, right),
        })
    }

    pub(crate) fn raw_div(left: Rc<Expr>, right: Rc<Expr>) -> Rc<Expr> {
        debug_assert_eq!(left.usage & right.usage, 0);
        debug_assert!(right.value != 0 && left.value % right.value == 0);
        Rc::new(Expr {
            value: left.value / right.value,
            usage: left.usage | right.usage,
            op: Op::Div(left, right),
        })
    }
}
