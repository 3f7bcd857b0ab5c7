use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use log::{debug, info};

use crate::expression::{Expr, Numeric, Structural};
use crate::solver::errors::SolverError;
use crate::solver::generator::{make, make_half};
use crate::solver::pool::{ExprPool, submasks};

/// Lazy, finite sequence of every value-distinct, structurally-distinct
/// expression over the input numbers that evaluates to the target.
///
/// The search runs in waves: each new expression is combined against all
/// pool segments disjoint from its usage, same-wave pairs once via the
/// half rule and older operands via the full rule. Each `next()` call
/// resumes the walk where it left off; dropping the iterator abandons the
/// search cleanly.
pub struct Solutions {
    target: u64,
    full_mask: u64,
    /// Every pooled expression in creation order; `[lower, upper)` is the
    /// window of the wave currently being combined, entries past `upper`
    /// are staged for the next wave.
    created: Vec<Rc<Expr>>,
    pool: ExprPool,
    seen: HashSet<Structural>,
    emitted: HashSet<Numeric>,
    lower: usize,
    upper: usize,
    cursor: usize,
    wave: usize,
    pending: VecDeque<Rc<Expr>>,
}

impl Solutions {
    /// Validate the inputs and set up generation 0.
    ///
    /// # Errors
    ///
    /// Fails if the target is negative, any number is not positive, or
    /// more numbers are given than usage-mask bits (64).
    pub fn new(target: i64, numbers: &[i64]) -> Result<Self, SolverError> {
        if target < 0 {
            return Err(SolverError::NegativeTarget(target));
        }
        if numbers.len() > 64 {
            return Err(SolverError::TooManyNumbers(numbers.len()));
        }
        if let Some(&bad) = numbers.iter().find(|&&n| n <= 0) {
            return Err(SolverError::NonPositiveNumber(bad));
        }

        let target = target as u64;
        let full_mask = if numbers.len() == 64 {
            u64::MAX
        } else {
            (1u64 << numbers.len()) - 1
        };

        let mut state = Solutions {
            target,
            full_mask,
            created: Vec::new(),
            pool: ExprPool::default(),
            seen: HashSet::new(),
            emitted: HashSet::new(),
            lower: 0,
            upper: 0,
            cursor: 0,
            wave: 0,
            pending: VecDeque::new(),
        };

        for (index, &number) in numbers.iter().enumerate() {
            let leaf = Expr::leaf(number as u64, index);
            state.seen.insert(Structural(Rc::clone(&leaf)));
            if leaf.value() == target
                && state.emitted.insert(Numeric(Rc::clone(&leaf)))
            {
                // First occurrence wins; numeric dedup drops later ties.
                state.pending.push_back(Rc::clone(&leaf));
            }
            // Every leaf is pooled, target hits included: a target-valued
            // number is still a legal operand for larger expressions.
            let seq = state.created.len();
            state.created.push(Rc::clone(&leaf));
            state.pool.insert(seq, leaf);
        }
        state.upper = state.created.len();

        info!("searching for {} over {} numbers", target, numbers.len());
        Ok(state)
    }

    /// Combine one driver expression against the pool, or cross a wave
    /// boundary. Returns false once the search space is exhausted.
    fn step(&mut self) -> bool {
        if self.cursor == self.upper {
            // Wave complete: publish its staged products, then open the
            // next window. Segments stay read-only within a wave.
            for seq in self.upper..self.created.len() {
                self.pool.insert(seq, Rc::clone(&self.created[seq]));
            }
            self.lower = self.upper;
            self.upper = self.created.len();
            self.cursor = self.lower;
            self.wave += 1;
            debug!(
                "wave {}: {} new expressions to combine",
                self.wave,
                self.upper - self.lower
            );
            return self.lower < self.upper;
        }

        let seq_b = self.cursor;
        self.cursor += 1;
        let b = Rc::clone(&self.created[seq_b]);
        let rest = self.full_mask & !b.usage();

        for mask in submasks(rest) {
            for entry in self.pool.segment(mask) {
                let results = if entry.seq >= self.lower {
                    // Same wave as the driver: combine each pair once.
                    if entry.seq >= seq_b {
                        continue;
                    }
                    make_half(&entry.expr, &b)
                } else {
                    make(&entry.expr, &b)
                };

                for expr in results {
                    if !self.seen.insert(Structural(Rc::clone(&expr))) {
                        continue;
                    }
                    if expr.value() == self.target {
                        if self.emitted.insert(Numeric(Rc::clone(&expr))) {
                            self.pending.push_back(expr);
                        }
                    } else if expr.usage() != self.full_mask && expr.value() != 0 {
                        // Room left to combine further; zero never makes
                        // a legal operand (x*0, x/0) and stays out.
                        self.created.push(expr);
                    }
                }
            }
        }
        true
    }
}

impl Iterator for Solutions {
    type Item = Rc<Expr>;

    fn next(&mut self) -> Option<Rc<Expr>> {
        loop {
            if let Some(solution) = self.pending.pop_front() {
                return Some(solution);
            }
            if !self.step() {
                return None;
            }
        }
    }
}
