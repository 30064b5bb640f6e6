//! Linear-arithmetic and boolean-logic helpers built strictly on top of the
//! primitives demonstrated for this solver crate: `Model::int`, `Model::sum`,
//! and `Model::c(..).eq/le/ge(..)`. There is no confirmed subtraction,
//! scalar-multiplication, or reified-boolean operator on `Model`, so every
//! helper below is assembled from repeated terms and non-negative
//! comparisons only (see SPEC_FULL.md §9, "Solver capability assumption").

use selen::prelude::*;

/// A fixed value expressed as a zero-width domain variable, for use wherever
/// the API expects a `VarId` rather than a literal (e.g. on the left side of
/// a sum alongside other variables).
pub fn const_var(m: &mut Model, value: i32) -> VarId {
    m.int(value, value)
}

/// `k * var`, built as a sum of `k` copies of `var` since no scalar-multiply
/// is confirmed to exist. `k` must be non-negative; `k == 0` yields a
/// constant zero variable.
pub fn scaled(m: &mut Model, var: VarId, k: i32) -> VarId {
    assert!(k >= 0, "scaled() does not support negative coefficients");
    if k == 0 {
        return const_var(m, 0);
    }
    m.sum(&vec![var; k as usize])
}

/// `sum(coeffs[i] * vars[i])`, all coefficients non-negative. Used for every
/// weighted constraint and penalty term so that negative coefficients never
/// need to reach the solver directly.
pub fn weighted_sum(m: &mut Model, terms: &[(VarId, i32)]) -> VarId {
    let mut parts = Vec::new();
    for &(var, coeff) in terms {
        if coeff == 0 {
            continue;
        }
        parts.push(scaled(m, var, coeff));
    }
    if parts.is_empty() {
        return const_var(m, 0);
    }
    m.sum(&parts)
}

/// A boolean variable in `{0, 1}`.
pub fn bool_var(m: &mut Model) -> VarId {
    m.int(0, 1)
}

/// `not_x` such that `not_x == 1 - x`, encoded as `x + not_x == 1` to avoid
/// subtraction.
pub fn bool_not(m: &mut Model, x: VarId) -> VarId {
    let not_x = bool_var(m);
    let total = m.sum(&[x, not_x]);
    m.c(total).eq(int(1));
    not_x
}

/// `and_var == 1` iff every term in `terms` is `1`.
///
/// Encoding: `and_var <= term_i` for every term (and_var can't be 1 unless
/// all terms are), and `sum(terms) <= and_var + (len - 1)` (and_var must be
/// 1 once every term is, since the slack runs out).
pub fn bool_and(m: &mut Model, terms: &[VarId]) -> VarId {
    assert!(!terms.is_empty(), "bool_and() requires at least one term");
    let and_var = bool_var(m);
    for &t in terms {
        m.c(and_var).le(t);
    }
    let sum_terms = m.sum(terms);
    let slack = const_var(m, terms.len() as i32 - 1);
    let bound = m.sum(&[and_var, slack]);
    m.c(sum_terms).le(bound);
    and_var
}

/// `or_var == 1` iff at least one term in `terms` is `1`.
///
/// Encoding: `or_var >= term_i` for every term (or_var must be 1 if any
/// term is), and `len * or_var >= sum(terms)` (or_var can't be 1 unless at
/// least one term is).
pub fn bool_or(m: &mut Model, terms: &[VarId]) -> VarId {
    assert!(!terms.is_empty(), "bool_or() requires at least one term");
    let or_var = bool_var(m);
    for &t in terms {
        m.c(or_var).ge(t);
    }
    let sum_terms = m.sum(terms);
    let scaled_or = scaled(m, or_var, terms.len() as i32);
    m.c(scaled_or).ge(sum_terms);
    or_var
}

/// `ind == 1` iff `var >= threshold`, given `var`'s domain is `[0, domain_max]`.
///
/// Encoding: `var >= threshold * ind` forces `var >= threshold` once `ind`
/// is 1; `var <= (threshold - 1) + ind * (domain_max - threshold + 1)` forces
/// `ind` to 1 whenever `var >= threshold` (the `ind == 0` branch caps `var`
/// at `threshold - 1`, which would contradict `var >= threshold`).
pub fn ge_indicator(m: &mut Model, var: VarId, threshold: i32, domain_max: i32) -> VarId {
    assert!(threshold <= domain_max, "threshold must be reachable");
    let ind = bool_var(m);
    let lower_bound = scaled(m, ind, threshold);
    m.c(var).ge(lower_bound);
    let cap = const_var(m, threshold - 1);
    let headroom_scaled = scaled(m, ind, domain_max - threshold + 1);
    let rhs = m.sum(&[cap, headroom_scaled]);
    m.c(var).le(rhs);
    ind
}

/// `shortfall == max(0, target - value)`, `value`'s domain being `[0, ..]`.
/// Valid only when every use of `shortfall` in the objective carries a
/// strictly positive weight, so minimization pulls it down to the true
/// maximum rather than leaving it slack.
pub fn shortfall(m: &mut Model, value: VarId, target: i32) -> VarId {
    let shortfall_var = m.int(0, target.max(0));
    // shortfall_var + value >= target, i.e. shortfall_var >= target - value.
    let lhs = m.sum(&[shortfall_var, value]);
    m.c(lhs).ge(int(target));
    shortfall_var
}

/// `gap == max_i(values[i]) - min_i(values[i])`, a non-negative imbalance
/// measure built via the epigraph trick: `max_var`/`min_var` bracket every
/// value, and `gap` is pulled down to exactly `max_var - min_var` by
/// minimization (see the type's call sites in `domain::penalties`).
pub fn range_imbalance(m: &mut Model, values: &[VarId], domain_max: i32) -> VarId {
    assert!(!values.is_empty(), "range_imbalance() requires at least one value");
    let max_var = m.int(0, domain_max);
    let min_var = m.int(0, domain_max);
    for &v in values {
        m.c(v).le(max_var);
        m.c(min_var).le(v);
    }
    let gap = m.int(0, domain_max);
    let rhs = m.sum(&[gap, min_var]);
    m.c(rhs).ge(max_var);
    gap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_var_is_fixed() {
        let mut m = Model::default();
        let v = const_var(&mut m, 3);
        let solution = m.solve().expect("model should be feasible");
        assert_eq!(solution.get::<i32>(v), 3);
    }

    #[test]
    fn scaled_tracks_multiple() {
        let mut m = Model::default();
        let x = m.int(0, 5);
        m.c(x).eq(int(2));
        let doubled = scaled(&mut m, x, 3);
        let solution = m.solve().expect("model should be feasible");
        assert_eq!(solution.get::<i32>(doubled), 6);
    }

    #[test]
    fn bool_not_flips() {
        let mut m = Model::default();
        let x = m.int(0, 1);
        m.c(x).eq(int(1));
        let not_x = bool_not(&mut m, x);
        let solution = m.solve().expect("model should be feasible");
        assert_eq!(solution.get::<i32>(not_x), 0);
    }

    #[test]
    fn bool_and_requires_all_terms() {
        let mut m = Model::default();
        let a = m.int(0, 1);
        let b = m.int(0, 1);
        m.c(a).eq(int(1));
        m.c(b).eq(int(0));
        let and_var = bool_and(&mut m, &[a, b]);
        let solution = m.solve().expect("model should be feasible");
        assert_eq!(solution.get::<i32>(and_var), 0);
    }

    #[test]
    fn bool_or_needs_one_term() {
        let mut m = Model::default();
        let a = m.int(0, 1);
        let b = m.int(0, 1);
        m.c(a).eq(int(0));
        m.c(b).eq(int(1));
        let or_var = bool_or(&mut m, &[a, b]);
        let solution = m.solve().expect("model should be feasible");
        assert_eq!(solution.get::<i32>(or_var), 1);
    }

    #[test]
    fn ge_indicator_reports_at_threshold() {
        let mut m = Model::default();
        let v = m.int(0, 6);
        m.c(v).eq(int(6));
        let ind = ge_indicator(&mut m, v, 6, 6);
        let solution = m.solve().expect("model should be feasible");
        assert_eq!(solution.get::<i32>(ind), 1);
    }

    #[test]
    fn ge_indicator_reports_below_threshold() {
        let mut m = Model::default();
        let v = m.int(0, 6);
        m.c(v).eq(int(3));
        let ind = ge_indicator(&mut m, v, 6, 6);
        let solution = m.solve().expect("model should be feasible");
        assert_eq!(solution.get::<i32>(ind), 0);
    }

    // `shortfall`/`range_imbalance` only equal their intended value under
    // minimization (see SPEC_FULL.md §9 / the solver driver's tightening
    // loop); a bare `solve()` may return any feasible slack. These tests
    // instead check the lower bound is both reachable and tight, which is
    // the property minimization relies on.

    #[test]
    fn shortfall_lower_bound_is_reachable_and_tight() {
        let mut m = Model::default();
        let v = m.int(0, 10);
        m.c(v).eq(int(3));
        let gap = shortfall(&mut m, v, 8);
        m.c(gap).le(int(5));
        assert!(m.solve().is_ok());

        let mut m2 = Model::default();
        let v2 = m2.int(0, 10);
        m2.c(v2).eq(int(3));
        let gap2 = shortfall(&mut m2, v2, 8);
        m2.c(gap2).le(int(4));
        assert!(m2.solve().is_err());
    }

    #[test]
    fn range_imbalance_lower_bound_is_reachable_and_tight() {
        let mut m = Model::default();
        let a = m.int(0, 10);
        let b = m.int(0, 10);
        let c = m.int(0, 10);
        m.c(a).eq(int(2));
        m.c(b).eq(int(7));
        m.c(c).eq(int(5));
        let gap = range_imbalance(&mut m, &[a, b, c], 10);
        m.c(gap).le(int(5));
        assert!(m.solve().is_ok());

        let mut m2 = Model::default();
        let a2 = m2.int(0, 10);
        let b2 = m2.int(0, 10);
        let c2 = m2.int(0, 10);
        m2.c(a2).eq(int(2));
        m2.c(b2).eq(int(7));
        m2.c(c2).eq(int(5));
        let gap2 = range_imbalance(&mut m2, &[a2, b2, c2], 10);
        m2.c(gap2).le(int(4));
        assert!(m2.solve().is_err());
    }
}
