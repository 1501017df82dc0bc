//! Modular interval arithmetic over the identifier ring.
//!
//! Every ring-relative comparison in this crate goes through
//! [`modular_in`]. Raw `<`/`>` on identifiers is wrong whenever an interval
//! wraps past the top of the ring, so no other module compares identifiers
//! directly.

/// Normalize `x` into `[0, modulus)`, correct for negative `x`.
///
/// Finger arithmetic subtracts powers of two from identifiers, so
/// intermediate values can go negative.
pub fn pos_mod(x: i64, modulus: u64) -> u64 {
    let m = modulus as i64;
    (((x % m) + m) % m) as u64
}

/// True iff `x` lies in the closed interval `[lb, ub]` on a ring of
/// `modulus` identifiers.
///
/// When `ub < lb` the interval wraps: `[lb, modulus) ∪ [0, ub]`. When
/// `ub == lb` the interval is the full ring. Half-open variants are
/// expressed by the caller shifting a bound by one with [`pos_mod`].
pub fn modular_in(x: u64, lb: u64, ub: u64, modulus: u64) -> bool {
    if ub <= lb {
        (lb <= x && x < modulus) || x <= ub
    } else {
        lb <= x && x <= ub
    }
}

/// True iff `x` lies in the half-open ring interval `(lb, ub]`.
///
/// `(lb, lb]` is the full ring. When `ub` is `lb`'s direct clockwise
/// neighbor the interval is the singleton `{ub}`; shifting the bound into
/// [`modular_in`] alone would read those equal bounds as the full ring and
/// misroute between adjacent nodes.
pub fn in_interval_oc(x: u64, lb: u64, ub: u64, modulus: u64) -> bool {
    let after_lb = pos_mod(lb as i64 + 1, modulus);
    if ub == after_lb {
        x == ub
    } else {
        modular_in(x, after_lb, ub, modulus)
    }
}

/// True iff `x` lies in the open ring interval `(lb, ub)`.
///
/// `(lb, lb)` is the full ring minus `lb`; `(lb, lb + 1)` is empty; and
/// `(lb, lb + 2)` is the singleton between the bounds — shifting both
/// bounds inward would make them equal, which [`modular_in`] reads as the
/// full ring.
pub fn in_interval_oo(x: u64, lb: u64, ub: u64, modulus: u64) -> bool {
    let after_lb = pos_mod(lb as i64 + 1, modulus);
    if ub == after_lb {
        return false;
    }
    let before_ub = pos_mod(ub as i64 - 1, modulus);
    if before_ub == after_lb {
        return x == after_lb;
    }
    modular_in(x, after_lb, before_ub, modulus)
}

/// True iff `x` lies in the half-open ring interval `[lb, ub)`.
///
/// `[lb, lb)` is the full ring; `[lb, lb + 1)` is the singleton `{lb}`.
pub fn in_interval_co(x: u64, lb: u64, ub: u64, modulus: u64) -> bool {
    let before_ub = pos_mod(ub as i64 - 1, modulus);
    if before_ub == lb {
        x == lb
    } else {
        modular_in(x, lb, before_ub, modulus)
    }
}
