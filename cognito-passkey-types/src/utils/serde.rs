//! Utilities to be used in serde derives for more robust (de)serializations.

use std::fmt;

use serde::{
    de::{IgnoredAny, Visitor},
    Deserialize, Deserializer,
};

/// Many fields in the webauthn spec have the following wording.
///
/// > The values SHOULD be members of `T` but client platforms MUST ignore unknown values.
///
/// This method is a simple way of ignoring unknown values without failing deserialization.
pub fn ignore_unknown<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match T::deserialize(de) {
        Ok(val) => val,
        Err(_) => T::default(),
    })
}

/// Deserialize an optional list, silently dropping elements that do not
/// parse as a known `T` instead of failing the whole document.
pub fn ignore_unknown_opt_vec<'de, D, T>(de: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeKnown<T> {
        Known(T),
        Unknown(IgnoredAny),
    }

    let items: Option<Vec<MaybeKnown<T>>> = Deserialize::deserialize(de)?;
    Ok(items.map(|list| {
        list.into_iter()
            .filter_map(|item| match item {
                MaybeKnown::Known(value) => Some(value),
                MaybeKnown::Unknown(_) => None,
            })
            .collect()
    }))
}

/// Deserialize a numeric field that some servers emit as a JSON number and
/// others as a stringified number, the `timeout` hint being the usual case.
pub fn maybe_stringified<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionalNumberVisitor;

    impl<'de> Visitor<'de> for OptionalNumberVisitor {
        type Value = Option<u32>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a number or a string containing a number")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D2>(self, de: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            struct NumberVisitor;

            impl Visitor<'_> for NumberVisitor {
                type Value = u32;

                fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    write!(f, "a number or a string containing a number")
                }

                fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    u32::try_from(v).map_err(E::custom)
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    v.parse().map_err(E::custom)
                }
            }

            de.deserialize_any(NumberVisitor).map(Some)
        }
    }

    de.deserialize_option(OptionalNumberVisitor)
}
