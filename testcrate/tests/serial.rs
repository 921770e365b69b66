use exfp::{Error, SBig, UBig};
use testcrate::{rand_ubig, rng};
use zeroize::Zeroize;

#[test]
fn hex_strings() {
    assert_eq!(UBig::zero().to_hex_string(), "0");
    assert_eq!(UBig::one().to_hex_string(), "1");
    assert_eq!(UBig::from_u64(0xff).to_hex_string(), "ff");
    // the top word prints bare, lower words zero-padded to 8 digits
    assert_eq!(UBig::from_u64(0x1_0000_0002).to_hex_string(), "100000002");
    assert_eq!(
        UBig::from_u64(0xfedc_ba98_7654_3210).to_hex_string(),
        "fedcba9876543210"
    );
    assert_eq!(format!("{}", UBig::from_u64(0xabc)), "abc");
    assert_eq!(format!("{:x}", UBig::from_u64(0xabc)), "abc");
    assert_eq!(format!("{}", SBig::from_i64(-0xabc)), "-abc");
    assert_eq!(
        UBig::from_hex_str("fedcba9876543210")
            .unwrap()
            .try_to_u64()
            .unwrap(),
        0xfedc_ba98_7654_3210
    );
}

#[test]
fn radix_strings() {
    let x = UBig::from_str_radix("123456789012345678901234567890", 10).unwrap();
    assert_eq!(x.to_str_radix(10).unwrap(), "123456789012345678901234567890");
    // separators are allowed, signs are not, even for non-negative input
    assert_eq!(
        UBig::from_str_radix("1_000_000", 10).unwrap(),
        UBig::from_u64(1_000_000)
    );
    assert!(matches!(
        UBig::from_str_radix("+1", 10),
        Err(Error::Domain { .. })
    ));
    assert!(matches!(
        UBig::from_str_radix("-1", 10),
        Err(Error::Domain { .. })
    ));
    assert!(matches!(
        UBig::from_str_radix("", 16),
        Err(Error::Domain { .. })
    ));
    assert!(matches!(
        UBig::from_str_radix("___", 16),
        Err(Error::Domain { .. })
    ));
    assert!(matches!(
        UBig::from_str_radix("12x", 10),
        Err(Error::Domain { .. })
    ));
    assert!(matches!(
        UBig::from_str_radix("19", 9),
        Err(Error::Domain { .. })
    ));
    assert!(matches!(
        UBig::from_str_radix("0", 1),
        Err(Error::Domain { .. })
    ));
    assert!(matches!(
        UBig::from_str_radix("0", 37),
        Err(Error::Domain { .. })
    ));
    assert_eq!(
        UBig::from_str_radix("zz", 36).unwrap(),
        UBig::from_u64(35 * 36 + 35)
    );
    assert_eq!(UBig::from_str_radix("FF", 16).unwrap(), UBig::from_u64(255));
}

#[test]
fn big_endian_bytes() {
    // the extra zero byte keeps the two's-complement reading non-negative
    assert_eq!(UBig::from_u64(0xff).to_be_bytes(), vec![0x00, 0xff]);
    assert_eq!(UBig::from_u64(0x7f).to_be_bytes(), vec![0x7f]);
    assert_eq!(UBig::zero().to_be_bytes(), vec![0x00]);
    assert_eq!(UBig::from_be_bytes(&[]).unwrap(), UBig::zero());
    assert_eq!(UBig::from_be_bytes(&[0x00]).unwrap(), UBig::zero());
    assert_eq!(
        UBig::from_be_bytes(&[0x00, 0x80]).unwrap(),
        UBig::from_u64(128)
    );
    assert_eq!(
        UBig::from_be_bytes(&[0x01, 0x02, 0x03, 0x04, 0x05]).unwrap(),
        UBig::from_u64(0x0102030405)
    );
    // a set top bit would read as negative
    assert!(matches!(
        UBig::from_be_bytes(&[0x80]),
        Err(Error::Domain { .. })
    ));
}

#[test]
fn primitive_exports() {
    assert_eq!(UBig::from_u64(u64::MAX).try_to_u64().unwrap(), u64::MAX);
    assert_eq!(UBig::from_u64(7).try_to_u32().unwrap(), 7);
    assert!(matches!(
        UBig::from_u64(1 << 40).try_to_u32(),
        Err(Error::Domain { .. })
    ));
    assert!(matches!(
        UBig::from_u64_shifted(1, 64).unwrap().try_to_u64(),
        Err(Error::Domain { .. })
    ));
    assert_eq!(SBig::from_i64(i64::MIN).try_to_i64().unwrap(), i64::MIN);
    assert_eq!(SBig::from_i64(-42).try_to_i64().unwrap(), -42);
    assert!(SBig::from_i64(i64::MAX)
        .checked_add(&SBig::from_i64(1))
        .unwrap()
        .try_to_i64()
        .is_err());
}

#[test]
fn serde() {
    let x = UBig::from_u64(0xfedc_ba98_7654_3210);
    let s = "\"fedcba9876543210\"";
    assert_eq!(ron::to_string(&x).unwrap(), s);
    let y: UBig = ron::from_str(s).unwrap();
    assert_eq!(x, y);

    let x = SBig::from_i64(-0x123);
    let s = "(sign:-1,mag:\"123\")";
    assert_eq!(ron::to_string(&x).unwrap(), s);
    let y: SBig = ron::from_str(s).unwrap();
    assert_eq!(x, y);

    // malformed sign combinations are rejected
    assert!(ron::from_str::<SBig>("(sign:0,mag:\"1\")").is_err());
    assert!(ron::from_str::<SBig>("(sign:2,mag:\"1\")").is_err());
    assert!(ron::from_str::<SBig>("(sign:1,mag:\"0\")").is_err());
    assert!(ron::from_str::<UBig>("\"xyz\"").is_err());

    let mut rng = rng(40);
    for _ in 0..50 {
        let a = rand_ubig(&mut rng, 600);
        let s = ron::to_string(&a).unwrap();
        assert_eq!(ron::from_str::<UBig>(&s).unwrap(), a);
    }
}

#[test]
fn zeroize_support() {
    let mut x = UBig::from_u64(0xdead_beef);
    x.zeroize();
    assert!(x.is_zero());
    let mut s = SBig::from_i64(-5);
    s.zeroize();
    assert!(s.is_zero());
}

#[test]
fn rand_support() {
    let mut a = rng(41);
    let mut b = rng(41);
    let x = UBig::rand_using(&mut a, 333).unwrap();
    let y = UBig::rand_using(&mut b, 333).unwrap();
    assert_eq!(x, y);
    assert!(x.hi_bit() <= 333);
    assert!(UBig::rand_using(&mut a, 0).unwrap().is_zero());
}

#[test]
fn error_display() {
    let e = UBig::one().divide(&UBig::zero()).unwrap_err();
    assert_eq!(
        format!("{e}"),
        "UBig::divide_and_remainder: division by zero"
    );
    let e = UBig::from_u64(3)
        .checked_sub(&UBig::from_u64(4))
        .unwrap_err();
    assert_eq!(format!("{e}"), "UBig::checked_sub: subtrahend exceeds self");
    let e = UBig::one().shift_up(exfp::MAX_BITS).unwrap_err();
    assert!(format!("{e}").contains("exceeds the word budget"));
}
