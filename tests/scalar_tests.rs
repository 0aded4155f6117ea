//! Fixed-width scalar encodings.

use convertible::{Convertible, DecodeError};
use pretty_assertions::assert_eq;

#[test]
fn test_i64_fixtures() {
    let cases: [(i64, [u8; 8]); 5] = [
        (0, [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
        (42, [0x2a, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
        (-42, [0xd6, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]),
        (i64::MAX, [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]),
        (i64::MIN, [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80]),
    ];
    for (value, expected) in cases {
        assert_eq!(value.to_bytes(), expected, "encoding {}", value);
        assert_eq!(i64::from_bytes(&expected).unwrap(), value);
        // Pointer-width integers share the 64-bit layout.
        if let Ok(narrow) = isize::try_from(value) {
            assert_eq!(narrow.to_bytes(), expected);
        }
    }
}

#[test]
fn test_f64_fixtures() {
    let cases: [(f64, [u8; 8]); 5] = [
        (0.0, [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
        (42.0, [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x45, 0x40]),
        (-42.0, [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x45, 0xc0]),
        (i64::MAX as f64 * 2.0, [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x43]),
        (i64::MIN as f64 * 2.0, [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0xc3]),
    ];
    for (value, expected) in cases {
        assert_eq!(value.to_bytes(), expected, "encoding {}", value);
        assert_eq!(f64::from_bytes(&expected).unwrap().to_bits(), value.to_bits());
    }
}

#[test]
fn test_f32_fixtures() {
    let cases: [(f32, [u8; 4]); 5] = [
        (0.0, [0x00, 0x00, 0x00, 0x00]),
        (42.0, [0x00, 0x00, 0x28, 0x42]),
        (-42.0, [0x00, 0x00, 0x28, 0xc2]),
        (i64::MAX as f32 * 2.0, [0x00, 0x00, 0x80, 0x5f]),
        (i64::MIN as f32 * 2.0, [0x00, 0x00, 0x80, 0xdf]),
    ];
    for (value, expected) in cases {
        assert_eq!(value.to_bytes(), expected, "encoding {}", value);
        assert_eq!(f32::from_bytes(&expected).unwrap().to_bits(), value.to_bits());
    }
}

#[test]
fn test_integer_extremes_roundtrip() {
    assert_eq!(i8::from_bytes(&i8::MIN.to_bytes()).unwrap(), i8::MIN);
    assert_eq!(i16::from_bytes(&i16::MIN.to_bytes()).unwrap(), i16::MIN);
    assert_eq!(i32::from_bytes(&i32::MIN.to_bytes()).unwrap(), i32::MIN);
    assert_eq!(u8::from_bytes(&u8::MAX.to_bytes()).unwrap(), u8::MAX);
    assert_eq!(u16::from_bytes(&u16::MAX.to_bytes()).unwrap(), u16::MAX);
    assert_eq!(u32::from_bytes(&u32::MAX.to_bytes()).unwrap(), u32::MAX);
    assert_eq!(u64::from_bytes(&u64::MAX.to_bytes()).unwrap(), u64::MAX);
    assert_eq!(usize::from_bytes(&usize::MAX.to_bytes()).unwrap(), usize::MAX);
    assert_eq!(isize::from_bytes(&isize::MIN.to_bytes()).unwrap(), isize::MIN);
}

#[test]
fn test_signed_zero_is_preserved() {
    assert_eq!((-0.0f64).to_bytes(), [0, 0, 0, 0, 0, 0, 0, 0x80]);
    let back = f64::from_bytes(&(-0.0f64).to_bytes()).unwrap();
    assert!(back.is_sign_negative());
    let back = f32::from_bytes(&(-0.0f32).to_bytes()).unwrap();
    assert_eq!(back.to_bits(), 0x8000_0000);
}

#[test]
fn test_wrong_width_is_size_mismatch() {
    assert_eq!(
        i64::from_bytes(&[1, 2, 3, 4]),
        Err(DecodeError::SizeMismatch {
            expected: 8,
            actual: 4
        })
    );
    assert_eq!(
        f32::from_bytes(&[0; 8]),
        Err(DecodeError::SizeMismatch {
            expected: 4,
            actual: 8
        })
    );
    assert_eq!(
        bool::from_bytes(&[]),
        Err(DecodeError::SizeMismatch {
            expected: 1,
            actual: 0
        })
    );
    assert!(matches!(
        u8::from_bytes(&[1, 2]),
        Err(DecodeError::SizeMismatch { .. })
    ));
}

#[cfg(target_pointer_width = "32")]
#[test]
fn test_pointer_width_out_of_range() {
    assert_eq!(
        usize::from_bytes(&u64::MAX.to_bytes()),
        Err(DecodeError::OutOfRange { type_name: "usize" })
    );
}
