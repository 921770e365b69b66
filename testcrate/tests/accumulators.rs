use exfp::{
    acc::{Accumulator, BigFloatAccumulator, KahanAccumulator, RationalAccumulator},
    BFlt, Error,
};
use testcrate::{rand_f64_array, rng, shuffle};

/// Runs one reduction body on both exact backends and asserts bit-identical
/// results. A macro because the `&mut Self` chaining return makes the trait
/// non-object-safe.
macro_rules! both {
    (|$a:ident| $body:block) => {{
        let mut bf = BigFloatAccumulator::new();
        let $a = &mut bf;
        let x = (|| -> Result<f64, Error> { $body })().unwrap();
        let mut br = RationalAccumulator::new();
        let $a = &mut br;
        let y = (|| -> Result<f64, Error> { $body })().unwrap();
        assert_eq!(x.to_bits(), y.to_bits(), "backends disagree: {x:e} vs {y:e}");
        x
    }};
}

#[test]
fn signed_zero_sum() {
    let r = both!(|a| {
        a.add_all(&[1.0, -1.0])?;
        a.to_f64()
    });
    assert_eq!(r.to_bits(), 0u64);
}

#[test]
fn catastrophic_cancellation() {
    let r = both!(|a| {
        a.add_all(&[1.0e20, 1.0, -1.0e20])?;
        a.to_f64()
    });
    assert_eq!(r, 1.0);
}

#[test]
fn subnormal_sum() {
    let tiny = f64::from_bits(1);
    let r = both!(|a| {
        a.add_all(&[tiny, tiny])?;
        a.to_f64()
    });
    assert_eq!(r.to_bits(), 2u64);
}

#[test]
fn sum_of_squares_overflow_safety() {
    let mut acc = BigFloatAccumulator::new();
    acc.add_sq_all(&[1.0e200, 1.0e200]).unwrap();
    // the accumulated state is exact, 2e400 never saturated internally
    let q = BFlt::from_f64(1.0e200).unwrap();
    let sq = q.checked_mul(&q).unwrap();
    let expect = sq.checked_add(&sq).unwrap();
    assert_eq!(*acc.value(), expect);
    // only the final rounding overflows
    assert_eq!(acc.to_f64().unwrap(), f64::INFINITY);
    let mut oracle = RationalAccumulator::new();
    oracle.add_sq_all(&[1.0e200, 1.0e200]).unwrap();
    assert_eq!(oracle.to_f64().unwrap(), f64::INFINITY);
}

#[test]
fn l2_distance_of_equal_vectors() {
    let mut rng = rng(30);
    let v = rand_f64_array(&mut rng, 64);
    let r = both!(|a| {
        a.add_l2_distance(&v, &v)?;
        a.to_f64()
    });
    assert_eq!(r.to_bits(), 0u64);
}

#[test]
fn empty_and_singleton() {
    let r = both!(|a| { a.to_f64() });
    assert_eq!(r.to_bits(), 0u64);
    let r = both!(|a| {
        a.add_all(&[])?;
        a.to_f64()
    });
    assert_eq!(r.to_bits(), 0u64);
    let mut rng = rng(31);
    for _ in 0..50 {
        let x = testcrate::rand_f64(&mut rng);
        let expect = if x == 0.0 { 0.0 } else { x };
        let r = both!(|a| {
            a.add(x)?;
            a.to_f64()
        });
        assert_eq!(r.to_bits(), expect.to_bits());
    }
}

/// Exact addition is associative, so any input order rounds to the same
/// bits
#[test]
fn order_independence() {
    let mut rng = rng(32);
    // a cancellation-heavy sample: x concatenated with -x, shuffled
    let mut x = rand_f64_array(&mut rng, 100);
    let negated: Vec<f64> = x.iter().map(|v| -v).collect();
    x.extend_from_slice(&negated);
    shuffle(&mut rng, &mut x);
    let r = both!(|a| {
        a.add_all(&x)?;
        a.to_f64()
    });
    assert_eq!(r.to_bits(), 0u64);

    let base = rand_f64_array(&mut rng, 100);
    let expect = both!(|a| {
        a.add_all(&base)?;
        a.to_f64()
    });
    for _ in 0..6 {
        let mut perm = base.clone();
        shuffle(&mut rng, &mut perm);
        let r = both!(|a| {
            a.add_all(&perm)?;
            a.to_f64()
        });
        assert_eq!(r.to_bits(), expect.to_bits());
    }
}

/// Bit-for-bit backend agreement on every reduction in the interface
#[test]
fn backend_agreement() {
    let mut rng = rng(33);
    for _ in 0..10 {
        let x0 = rand_f64_array(&mut rng, 40);
        let x1 = rand_f64_array(&mut rng, 40);
        both!(|a| {
            a.add_all(&x0)?;
            a.to_f64()
        });
        both!(|a| {
            a.add_abs_all(&x0)?;
            a.to_f64()
        });
        both!(|a| {
            a.add_sq_all(&x0)?;
            a.to_f64()
        });
        both!(|a| {
            a.add_prods(&x0, &x1)?;
            a.to_f64()
        });
        both!(|a| {
            a.add_l1_distance(&x0, &x1)?;
            a.to_f64()
        });
        both!(|a| {
            a.add_l2_distance(&x0, &x1)?;
            a.to_f64()
        });
        // mixed reductions through one accumulator
        both!(|a| {
            a.add_all(&x0)?
                .add_sq(x1[0])?
                .add_prod(x0[1], x1[1])?
                .add_l1(x0[2], x1[2])?
                .add_l2(x0[3], x1[3])?;
            a.to_f64()
        });
    }

    // partial sums agree element by element
    let x = rand_f64_array(&mut rng, 60);
    let mut bf = BigFloatAccumulator::new();
    let mut br = RationalAccumulator::new();
    let pf = bf.partial_sums(&x).unwrap();
    let pr = br.partial_sums(&x).unwrap();
    for (a, b) in pf.iter().zip(pr.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn fluent_chaining() {
    let mut acc = BigFloatAccumulator::new();
    let r = acc.add(2.5).unwrap().add_sq(3.0).unwrap().to_f64().unwrap();
    assert_eq!(r, 11.5);
    assert_eq!(acc.clear().to_f64().unwrap(), 0.0);
}

#[test]
fn non_finite_poisons() {
    let mut acc = BigFloatAccumulator::new();
    acc.add(1.5).unwrap();
    assert!(matches!(acc.add(f64::NAN), Err(Error::Domain { .. })));
    // poisoned: the result cannot be read...
    assert!(matches!(acc.to_f64(), Err(Error::Domain { .. })));
    // ...but further calls are permitted, and clear recovers
    let _ = acc.add(1.0);
    assert!(acc.to_f64().is_err());
    acc.clear();
    assert_eq!(acc.add(2.0).unwrap().to_f64().unwrap(), 2.0);

    let mut acc = RationalAccumulator::new();
    assert!(matches!(
        acc.add_prod(1.0, f64::INFINITY),
        Err(Error::Domain { .. })
    ));
    assert!(acc.to_f64().is_err());
    acc.clear();
    assert_eq!(acc.to_f64().unwrap(), 0.0);
}

#[test]
fn length_mismatch_is_a_domain_error() {
    let mut acc = BigFloatAccumulator::new();
    assert!(matches!(
        acc.add_prods(&[1.0, 2.0], &[1.0]),
        Err(Error::Domain { .. })
    ));
    assert!(matches!(
        acc.add_l1_distance(&[], &[1.0]),
        Err(Error::Domain { .. })
    ));
    assert!(matches!(
        acc.add_l2_distance(&[0.0; 3], &[0.0; 4]),
        Err(Error::Domain { .. })
    ));
}

#[test]
fn exactness_declarations() {
    assert!(BigFloatAccumulator::new().is_exact());
    assert!(BigFloatAccumulator::new().no_overflow());
    assert!(RationalAccumulator::new().is_exact());
    assert!(RationalAccumulator::new().no_overflow());
    assert!(!KahanAccumulator::new().is_exact());
    assert!(!KahanAccumulator::new().no_overflow());
}

/// The compensated accumulator: right answers on benign data, `Unsupported`
/// on the distance operations it does not implement
#[test]
fn kahan_contrast() {
    let mut acc = KahanAccumulator::new();
    acc.add_all(&[1.0, 2.0, 3.5]).unwrap();
    assert_eq!(acc.to_f64().unwrap(), 6.5);
    // the canonical hostile sample: compensation alone loses both 1.0s
    // here, the exact backends do not
    let x = [1.0, 1.0e100, 1.0, -1.0e100];
    let exact = both!(|a| {
        a.add_all(&x)?;
        a.to_f64()
    });
    assert_eq!(exact, 2.0);
    let mut k = KahanAccumulator::new();
    k.add_all(&x).unwrap();
    assert_ne!(k.to_f64().unwrap(), exact);

    assert!(matches!(
        KahanAccumulator::new().add_l1(1.0, 2.0),
        Err(Error::Unsupported { .. })
    ));
    assert!(matches!(
        KahanAccumulator::new().add_l2(1.0, 2.0),
        Err(Error::Unsupported { .. })
    ));
    assert!(matches!(
        KahanAccumulator::new().add_l2_distance(&[1.0], &[2.0]),
        Err(Error::Unsupported { .. })
    ));

    let mut k = KahanAccumulator::new();
    assert!(matches!(k.add(f64::NAN), Err(Error::Domain { .. })));
    assert!(k.to_f64().is_err());
    k.clear();
    assert_eq!(k.to_f64().unwrap(), 0.0);
}
