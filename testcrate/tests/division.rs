use std::cmp::Ordering;

use exfp::UBig;
use testcrate::{rand_ubig, rng};

/// The two division algorithms agree bitwise and both satisfy the division
/// law across a sweep of shapes, including ones crossing the
/// Burnikel-Ziegler applicability boundary
#[test]
fn division_agreement() {
    let mut rng = rng(10);
    for _ in 0..40 {
        let duo = rand_ubig(&mut rng, 16 * 1024);
        let div = rand_ubig(&mut rng, 6 * 1024);
        if div.is_zero() {
            continue
        }
        let (q0, r0) = duo.divide_and_remainder_knuth(&div).unwrap();
        let (q1, r1) = duo.divide_and_remainder_burnikel_ziegler(&div).unwrap();
        let (q2, r2) = duo.divide_and_remainder(&div).unwrap();
        assert_eq!(q0, q1);
        assert_eq!(r0, r1);
        assert_eq!(q0, q2);
        assert_eq!(r0, r2);
        assert!(r0.cmp(&div) == Ordering::Less);
        assert_eq!(
            q0.checked_mul(&div).unwrap().checked_add(&r0).unwrap(),
            duo
        );
    }
}

/// Multiplying and then dividing round-trips at sizes where all three
/// multiplication regimes run
#[test]
fn multiply_divide_round_trip() {
    let mut rng = rng(11);
    for &bits in &[1000usize, 3000, 8000, 12 * 1024] {
        let u = rand_ubig(&mut rng, bits);
        if u.is_zero() {
            continue
        }
        let v = rand_ubig(&mut rng, bits);
        let p = v.checked_mul(&u).unwrap();
        let (q, r) = p.divide_and_remainder(&u).unwrap();
        assert_eq!(q, v);
        assert!(r.is_zero());
    }
}

/// Big-endian byte round trips plus the multiply/divide identity for
/// values up to 2^2048
#[test]
fn ubig_round_trip() {
    let mut rng = rng(12);
    for _ in 0..100 {
        let u = rand_ubig(&mut rng, 2048);
        assert_eq!(UBig::from_be_bytes(&u.to_be_bytes()).unwrap(), u);
        if u.is_zero() {
            continue
        }
        let v = rand_ubig(&mut rng, 2048);
        let (q, r) = v.checked_mul(&u).unwrap().divide_and_remainder(&u).unwrap();
        assert_eq!(q, v);
        assert!(r.is_zero());
    }
}
