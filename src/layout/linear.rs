use std::ops::Index;

/// Handle to an unknown in a [`LinearSystem`]. Plain index into the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var(pub u32);

impl Var {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct Equation {
    terms: Vec<(Var, f64)>,
    rhs: f64,
}

/// A square system of linear equations built up one unknown at a time.
#[derive(Debug, Clone, Default)]
pub struct LinearSystem {
    unknowns: u32,
    equations: Vec<Equation>,
}

/// Solved values, indexed by [`Var`].
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    values: Vec<f64>,
}

impl Solution {
    pub fn get(&self, var: Var) -> f64 {
        self.values[var.index()]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Index<Var> for Solution {
    type Output = f64;

    fn index(&self, var: Var) -> &f64 {
        &self.values[var.index()]
    }
}

impl LinearSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh unknown.
    pub fn var(&mut self) -> Var {
        let var = Var(self.unknowns);
        self.unknowns += 1;
        var
    }

    /// Add `Σ coefficient * var = rhs`. Repeated vars accumulate.
    pub fn equation(&mut self, terms: impl IntoIterator<Item = (Var, f64)>, rhs: f64) {
        self.equations.push(Equation {
            terms: terms.into_iter().collect(),
            rhs,
        });
    }

    pub fn unknowns(&self) -> usize {
        self.unknowns as usize
    }

    pub fn equations(&self) -> usize {
        self.equations.len()
    }

    /// Gauss-Jordan elimination with partial pivoting.
    ///
    /// Returns `None` if the system is not square, hits a column with no
    /// non-zero pivot, or produces a non-finite value.
    pub fn solve(&self) -> Option<Solution> {
        let n = self.unknowns();
        if self.equations.len() != n {
            tracing::error!(
                "Linear system has {} unknowns but {} equations",
                n,
                self.equations.len()
            );
            return None;
        }

        // Augmented matrix, row-major, n x (n + 1)
        let stride = n + 1;
        let mut m = vec![0.0f64; n * stride];
        for (row, eq) in self.equations.iter().enumerate() {
            for &(var, coefficient) in &eq.terms {
                m[row * stride + var.index()] += coefficient;
            }
            m[row * stride + n] = eq.rhs;
        }

        for col in 0..n {
            let mut pivot_row = col;
            let mut pivot_abs = m[col * stride + col].abs();
            for row in (col + 1)..n {
                let v = m[row * stride + col].abs();
                if v > pivot_abs {
                    pivot_abs = v;
                    pivot_row = row;
                }
            }

            // Only an exact zero is singular; tiny coefficients are legitimate
            if pivot_abs == 0.0 {
                tracing::error!("Linear system is singular at column {} of {}", col, n);
                return None;
            }

            if pivot_row != col {
                for j in 0..stride {
                    m.swap(col * stride + j, pivot_row * stride + j);
                }
            }

            let pivot = m[col * stride + col];
            for j in col..stride {
                m[col * stride + j] /= pivot;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = m[row * stride + col];
                if factor == 0.0 {
                    continue;
                }
                for j in col..stride {
                    let delta = factor * m[col * stride + j];
                    m[row * stride + j] -= delta;
                }
            }
        }

        let values: Vec<f64> = (0..n).map(|row| m[row * stride + n]).collect();
        if let Some(bad) = values.iter().position(|v| !v.is_finite()) {
            tracing::error!("Linear system produced non-finite value for unknown {}", bad);
            return None;
        }
        Some(Solution { values })
    }
}
