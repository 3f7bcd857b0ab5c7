use std::collections::HashSet;
use std::rc::Rc;

use crate::expression::ast::{Expr, Op};
use crate::expression::keys::{Numeric, Structural};

#[test]
fn test_leaf_value_usage_and_display() {
    let leaf = Expr::leaf(5, 2);
    assert_eq!(leaf.value(), 5);
    assert_eq!(leaf.usage(), 0b100);
    assert_eq!(leaf.to_string(), "5");
}

#[test]
fn test_add_orders_commutative_operands() {
    let five = Expr::leaf(5, 0);
    let three = Expr::leaf(3, 1);
    let sum = Expr::add(&five, &three);
    assert_eq!(sum.value(), 8);
    assert_eq!(sum.usage(), 0b11);
    assert_eq!(sum.to_string(), "3 + 5");
}

#[test]
fn test_add_flattens_associative_chains() {
    let one = Expr::leaf(1, 0);
    let two = Expr::leaf(2, 1);
    let four = Expr::leaf(4, 2);

    let left_leaning = Expr::add(&Expr::add(&one, &two), &four);
    let right_leaning = Expr::add(&one, &Expr::add(&two, &four));
    assert_eq!(left_leaning.to_string(), "1 + 2 + 4");
    assert_eq!(right_leaning.to_string(), "1 + 2 + 4");
    assert_eq!(
        Structural(Rc::clone(&left_leaning)),
        Structural(right_leaning)
    );
}

#[test]
fn test_sub_chain_orders_subtrahends_ascending() {
    let ten = Expr::leaf(10, 0);
    let five = Expr::leaf(5, 1);
    let three = Expr::leaf(3, 2);

    let chain = Expr::sub(&Expr::sub(&ten, &five), &three);
    assert_eq!(chain.value(), 2);
    assert_eq!(chain.to_string(), "10 - 3 - 5");

    let other = Expr::sub(&Expr::sub(&ten, &three), &five);
    assert_eq!(Structural(Rc::clone(&chain)), Structural(other));
}

#[test]
fn test_composite_operands_order_by_value() {
    let two = Expr::leaf(2, 0);
    let three = Expr::leaf(3, 1);
    let four = Expr::leaf(4, 2);

    // 2 * 3 = 6 sorts after the plain 4.
    let product = Expr::mul(&two, &three);
    let sum = Expr::add(&product, &four);
    assert_eq!(sum.to_string(), "4 + 2 * 3");
    assert_eq!(sum.value(), 10);
}

#[test]
fn test_canonical_join_reuses_children() {
    let two = Expr::leaf(2, 0);
    let three = Expr::leaf(3, 1);
    let sum = Expr::add(&two, &three);

    // An already-ordered join must not rebuild its operands.
    match sum.op() {
        Op::Add(l, r) => {
            assert!(Rc::ptr_eq(l, &two));
            assert!(Rc::ptr_eq(r, &three));
        }
        other => panic!("expected Add, got {:?}", other),
    }
}

#[test]
fn test_multiplicative_chain_flattens_and_orders() {
    let two = Expr::leaf(2, 0);
    let six = Expr::leaf(6, 1);
    let four = Expr::leaf(4, 2);
    let five = Expr::leaf(5, 3);

    let quotient = Expr::div(&Expr::mul(&two, &six), &four);
    assert_eq!(quotient.value(), 3);
    assert_eq!(quotient.to_string(), "2 * 6 / 4");

    // Joining below an existing Div re-merges the factor lists.
    let widened = Expr::mul(&quotient, &five);
    assert_eq!(widened.value(), 15);
    assert_eq!(widened.to_string(), "2 * 5 * 6 / 4");
}

#[test]
fn test_display_parenthesizes_lower_precedence_children() {
    let one = Expr::leaf(1, 0);
    let two = Expr::leaf(2, 1);
    let four = Expr::leaf(4, 2);
    let six = Expr::leaf(6, 3);

    let sum = Expr::add(&one, &two);
    assert_eq!(Expr::mul(&sum, &four).to_string(), "(1 + 2) * 4");
    assert_eq!(Expr::div(&six, &sum).to_string(), "6 / (1 + 2)");
}

#[test]
fn test_structural_and_numeric_keys_differ_on_duplicates() {
    let first = Expr::leaf(5, 0);
    let second = Expr::leaf(5, 1);

    assert_ne!(
        Structural(Rc::clone(&first)),
        Structural(Rc::clone(&second))
    );
    assert_eq!(Numeric(Rc::clone(&first)), Numeric(Rc::clone(&second)));

    let structural: HashSet<_> = [
        Structural(Rc::clone(&first)),
        Structural(Rc::clone(&second)),
    ]
    .into_iter()
    .collect();
    let numeric: HashSet<_> = [Numeric(first), Numeric(second)].into_iter().collect();
    assert_eq!(structural.len(), 2);
    assert_eq!(numeric.len(), 1);
}

#[test]
fn test_numeric_key_distinguishes_operator_shape() {
    let two = Expr::leaf(2, 0);
    let other_two = Expr::leaf(2, 1);
    let sum = Expr::add(&two, &other_two);
    let product = Expr::mul(&two, &other_two);

    // Same value (4), different shape.
    assert_eq!(sum.value(), product.value());
    assert_ne!(Numeric(sum), Numeric(product));
}

#[test]
fn test_annotated_display_ticks_duplicate_leaves() {
    let first = Expr::leaf(5, 0);
    let second = Expr::leaf(5, 1);
    let marks = vec![0, 1];

    let quotient = Expr::div(&second, &first);
    assert_eq!(quotient.to_string(), "5 / 5");
    assert_eq!(quotient.annotated(&marks).to_string(), "5' / 5");
}

#[test]
fn test_zero_difference_is_representable() {
    let a = Expr::leaf(4, 0);
    let b = Expr::leaf(4, 1);
    let zero = Expr::sub(&a, &b);
    assert_eq!(zero.value(), 0);
    assert_eq!(zero.to_string(), "4 - 4");
}

#[test]
fn test_rebuild_with_oversized_positive_sum_keeps_value() {
    // (a - 20) + 10 fits in u64 while a + 10 does not; the join must
    // not panic and must carry the exact value.
    let a = Expr::leaf(u64::MAX - 5, 0);
    let b = Expr::leaf(20, 1);
    let c = Expr::leaf(10, 2);

    let sum = Expr::add(&Expr::sub(&a, &b), &c);
    assert_eq!(sum.value(), u64::MAX - 15);
    assert!(matches!(sum.op(), Op::Add(..)));
}

#[test]
fn test_rebuild_with_oversized_factor_product_keeps_value() {
    // (a / b) * c fits in u64 while a * c does not.
    let a = Expr::leaf(1 << 62, 0);
    let b = Expr::leaf(1 << 10, 1);
    let c = Expr::leaf(1 << 3, 2);

    let product = Expr::mul(&Expr::div(&a, &b), &c);
    assert_eq!(product.value(), 1u64 << 55);
    assert!(matches!(product.op(), Op::Mul(..)));
}
