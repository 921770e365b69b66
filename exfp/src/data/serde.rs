use core::fmt;

use serde::{
    de,
    de::{MapAccess, SeqAccess, Visitor},
    ser::{SerializeStruct, SerializeTuple},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{SBig, Sign, UBig};

/// A `serde_support` impl
impl Serialize for UBig {
    /// Serializes `self` in a platform independent way, as the unsigned
    /// hexadecimal string of [UBig::to_hex_string].
    ///
    /// ```
    /// // Example using the `ron` crate.
    /// use exfp::UBig;
    ///
    /// let x = UBig::from_u64(0xfedc_ba98_7654_3210);
    /// assert_eq!(ron::to_string(&x).unwrap(), "\"fedcba9876543210\"");
    /// ```
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex_string())
    }
}

struct UBigVisitor;

impl<'de> Visitor<'de> for UBigVisitor {
    type Value = UBig;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an unsigned hexadecimal string")
    }

    fn visit_str<E>(self, s: &str) -> Result<UBig, E>
    where
        E: de::Error,
    {
        UBig::from_hex_str(s).map_err(de::Error::custom)
    }
}

/// A `serde_support` impl
impl<'de> Deserialize<'de> for UBig {
    /// Deserializes the hexadecimal string form produced by the
    /// [Serialize] impl
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(UBigVisitor)
    }
}

const FIELDS: &[&str] = &["sign", "mag"];

/// Helper for the deserialization impl
enum Field {
    Sign,
    Mag,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Field, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("`sign` or `mag`")
            }

            fn visit_str<E>(self, value: &str) -> Result<Field, E>
            where
                E: de::Error,
            {
                match value {
                    "sign" => Ok(Field::Sign),
                    "mag" => Ok(Field::Mag),
                    _ => Err(de::Error::unknown_field(value, FIELDS)),
                }
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

fn sbig_from_parts<E: de::Error>(sign: i32, mag: UBig) -> Result<SBig, E> {
    let sign = match sign {
        -1 => Sign::Neg,
        0 => Sign::Zero,
        1 => Sign::Pos,
        _ => return Err(de::Error::custom("`sign` field should be -1, 0, or 1")),
    };
    if (sign == Sign::Zero) != mag.is_zero() {
        return Err(de::Error::custom(
            "`sign` field should be 0 exactly for a zero `mag`",
        ))
    }
    Ok(SBig::new(sign, mag))
}

/// A `serde_support` impl
impl Serialize for SBig {
    /// Serializes `self` as a struct named "SBig" with a "sign" field in
    /// {-1, 0, 1} and a "mag" field holding the hexadecimal magnitude (a
    /// two-element tuple in compact form).
    ///
    /// ```
    /// // Example using the `ron` crate. Note that it
    /// // omits the struct name which would be "SBig".
    /// use exfp::SBig;
    ///
    /// let x = SBig::from_i64(-0x123);
    /// assert_eq!(ron::to_string(&x).unwrap(), "(sign:-1,mag:\"123\")");
    /// ```
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            let mut s = serializer.serialize_struct("SBig", 2)?;
            s.serialize_field("sign", &self.sign().to_i32())?;
            s.serialize_field("mag", self.magnitude())?;
            s.end()
        } else {
            let mut s = serializer.serialize_tuple(2)?;
            s.serialize_element(&self.sign().to_i32())?;
            s.serialize_element(self.magnitude())?;
            s.end()
        }
    }
}

struct SBigVisitor;

impl<'de> Visitor<'de> for SBigVisitor {
    type Value = SBig;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(
            "struct SBig consisting of a `sign` in {-1, 0, 1} and a hexadecimal magnitude `mag`",
        )
    }

    fn visit_map<V>(self, mut map: V) -> Result<SBig, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut sign: Option<i32> = None;
        let mut mag: Option<UBig> = None;
        while let Some(key) = map.next_key()? {
            match key {
                Field::Sign => {
                    if sign.is_some() {
                        return Err(de::Error::duplicate_field("sign"))
                    }
                    sign = Some(map.next_value()?);
                }
                Field::Mag => {
                    if mag.is_some() {
                        return Err(de::Error::duplicate_field("mag"))
                    }
                    mag = Some(map.next_value()?);
                }
            }
        }
        let sign = sign.ok_or_else(|| de::Error::missing_field("sign"))?;
        let mag = mag.ok_or_else(|| de::Error::missing_field("mag"))?;
        sbig_from_parts(sign, mag)
    }

    fn visit_seq<V>(self, mut seq: V) -> Result<SBig, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let sign: i32 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let mag: UBig = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        sbig_from_parts(sign, mag)
    }
}

/// A `serde_support` impl
impl<'de> Deserialize<'de> for SBig {
    /// Deserializes the form produced by the [Serialize] impl
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("SBig", FIELDS, SBigVisitor)
    }
}
