//! Property tests for error-tracked arithmetic.

use pb_core::{BoundedF64, SMALLEST_SUBNORMAL, UNIT_ROUNDOFF, rounding_increment};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    AddF64(f64),
    SubF64(f64),
    MulF64(f64),
    AddBounded(f64, f64),
    SubBounded(f64, f64),
    MulBounded(f64, f64),
}

fn operand() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1e3f64..1e3,
        (-64i32..64).prop_map(|k| k as f64 * 0.25),
        Just(0.0),
        Just(1.0),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        operand().prop_map(Op::AddF64),
        operand().prop_map(Op::SubF64),
        operand().prop_map(Op::MulF64),
        (operand(), operand()).prop_map(|(a, b)| Op::AddBounded(a, b)),
        (operand(), operand()).prop_map(|(a, b)| Op::SubBounded(a, b)),
        (operand(), operand()).prop_map(|(a, b)| Op::MulBounded(a, b)),
    ]
}

// The tracked operand for the *_bounded ops carries some error of its own.
fn tracked(a: f64, b: f64) -> BoundedF64 {
    BoundedF64::new(a).add_f64(b)
}

fn apply(s: BoundedF64, op: &Op) -> BoundedF64 {
    match *op {
        Op::AddF64(f) => s.add_f64(f),
        Op::SubF64(f) => s.sub_f64(f),
        Op::MulF64(f) => s.mul_f64(f),
        Op::AddBounded(a, b) => s.add_bounded(tracked(a, b)),
        Op::SubBounded(a, b) => s.sub_bounded(tracked(a, b)),
        Op::MulBounded(a, b) => s.mul_bounded(tracked(a, b)),
    }
}

// Exact rounding error of a + b (Knuth two-sum).
fn two_sum_tail(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

// Exact rounding error of a * b via fused multiply-add.
fn two_prod_tail(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

fn normal_magnitude() -> impl Strategy<Value = f64> {
    (any::<bool>(), 1.0f64..2.0, -150i32..150).prop_map(|(neg, m, e)| {
        let v = m * 2f64.powi(e);
        if neg { -v } else { v }
    })
}

proptest! {
    #[test]
    fn construct_reads_back_exact(n in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        prop_assert_eq!(BoundedF64::new(n).parts(), (n, 0.0));
    }

    #[test]
    fn bound_is_non_negative_and_monotone(
        start in operand(),
        ops in prop::collection::vec(op_strategy(), 1..24),
    ) {
        let mut s = BoundedF64::new(start);
        for op in &ops {
            let next = apply(s, op);
            prop_assert!(next.error_bound() >= 0.0);
            prop_assert!(
                next.error_bound() >= s.error_bound(),
                "bound shrank on {:?}: {} -> {}", op, s.error_bound(), next.error_bound()
            );
            s = next;
        }
    }

    #[test]
    fn add_f64_from_zero_matches_formula(f in normal_magnitude()) {
        let p = BoundedF64::new(0.0).add_f64(f);
        prop_assert_eq!(p.value(), f);
        prop_assert_eq!(p.error_bound(), UNIT_ROUNDOFF * f.abs() / (1.0 - UNIT_ROUNDOFF));
    }

    #[test]
    fn self_cancellation_gives_subnormal_increment(n in normal_magnitude()) {
        let z = BoundedF64::new(n).sub_f64(n);
        prop_assert_eq!(z.value(), 0.0);
        prop_assert_eq!(z.error_bound(), SMALLEST_SUBNORMAL);
    }

    #[test]
    fn sum_bound_covers_true_error(a in normal_magnitude(), b in normal_magnitude()) {
        let (s, tail) = two_sum_tail(a, b);
        let r = BoundedF64::new(a).add_f64(b);
        prop_assert_eq!(r.value(), s);
        prop_assert!(tail.abs() <= r.error_bound());

        let (d, tail) = two_sum_tail(a, -b);
        let r = BoundedF64::new(a).sub_f64(b);
        prop_assert_eq!(r.value(), d);
        prop_assert!(tail.abs() <= r.error_bound());
    }

    #[test]
    fn product_bound_covers_true_error(a in normal_magnitude(), b in normal_magnitude()) {
        let (p, tail) = two_prod_tail(a, b);
        let r = BoundedF64::new(a).mul_f64(b);
        prop_assert_eq!(r.value(), p);
        prop_assert!(tail.abs() <= r.error_bound());

        let r = BoundedF64::new(a).mul_bounded(BoundedF64::new(b));
        prop_assert!(tail.abs() <= r.error_bound());
    }

    #[test]
    fn cross_term_scales_by_other_operand(
        a in normal_magnitude(),
        b in prop_oneof![1.0f64..1e6, -1e6f64..-1.0],
    ) {
        let x = BoundedF64::new(0.0).add_f64(a);
        let y = BoundedF64::new(b);
        let p = x.mul_bounded(y);
        prop_assert_eq!(p.value(), a * b);
        prop_assert_eq!(
            p.error_bound(),
            x.error_bound() * b.abs() + rounding_increment(a * b)
        );
    }

    #[test]
    fn chained_mul_bound_not_below_single_step(
        n in normal_magnitude(),
        a in normal_magnitude(),
        b in normal_magnitude(),
    ) {
        let x = BoundedF64::new(n);
        let chained = x.mul_f64(a).mul_f64(b);
        let single = x.mul_f64(a * b);
        prop_assert!(chained.error_bound() >= single.error_bound());
    }

    #[test]
    fn neg_preserves_bound(start in operand(), ops in prop::collection::vec(op_strategy(), 0..8)) {
        let s = ops.iter().fold(BoundedF64::new(start), apply);
        let n = -s;
        prop_assert_eq!(n.error_bound(), s.error_bound());
        prop_assert_eq!(n.value(), -s.value());
    }
}
