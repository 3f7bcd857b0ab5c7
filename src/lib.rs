//! Countdown - enumerate arithmetic expressions that hit a target value
//!
//! Given a multiset of positive integers, this library enumerates every
//! distinct expression that combines each input at most once with
//! addition, subtraction, multiplication and exact integer division and
//! evaluates to a target value. Expressions are kept in a canonical form
//! so that commutative and associative rearrangements are never reported
//! twice, and solutions differing only in which duplicate input they use
//! are collapsed.

pub mod expression;
pub mod solver;

// Re-export the main public API
pub use expression::{Annotated, Expr, Numeric, Op, Structural};
pub use solver::{Solutions, SolverError};

use std::rc::Rc;

/// Enumerate all solutions for `target` over `numbers`.
///
/// The returned iterator is lazy: each call to `next` resumes the search
/// where it left off, and the sequence ends once no further derivable
/// expression remains. Dropping it abandons the search cleanly.
///
/// # Errors
///
/// This function will return an error if:
/// * The target is negative
/// * Any input number is zero or negative
/// * More than 64 numbers are given
///
/// # Examples
///
/// ```
/// use countdown::solve;
///
/// match solve(5, &[2, 3]) {
///     Ok(solutions) => {
///         for (i, expr) in solutions.enumerate() {
///             println!("{}: {}", i + 1, expr);
///         }
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub fn solve(target: i64, numbers: &[i64]) -> Result<Solutions, SolverError> {
    Solutions::new(target, numbers)
}

/// Find the first solution for `target` over `numbers`, if any.
///
/// # Errors
///
/// Fails under the same input conditions as [`solve`].
pub fn first_solution(target: i64, numbers: &[i64]) -> Result<Option<Rc<Expr>>, SolverError> {
    Ok(solve(target, numbers)?.next())
}
