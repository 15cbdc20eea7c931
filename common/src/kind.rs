//! Macros for defining kind enums.

use derive_more::{Display, Error};

/// Macro for defining a kind enum represented by a small integer on the wire.
///
/// Requires the `serde` feature of this crate.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Door state."]
///     enum Door {
///         #[doc = "Door is closed."]
///         Closed = 0,
///
///         #[doc = "Door is open."]
///         Open = 1,
///     }
/// }
///
/// assert_eq!(Door::try_from(1_i64), Ok(Door::Open));
/// assert_eq!(Door::Closed.to_string(), "closed");
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "snake_case")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }

        impl ::core::convert::TryFrom<i64> for $name {
            type Error = $crate::UnknownKind;

            fn try_from(
                value: i64,
            ) -> ::core::result::Result<Self, Self::Error> {
                match value {
                    $(
                        v if v == i64::from(Self::$variant.u8()) => {
                            Ok(Self::$variant)
                        }
                    )*
                    v => Err($crate::UnknownKind {
                        kind: ::core::stringify!($name),
                        value: v,
                    }),
                }
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::UnknownKind;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| $crate::UnknownKind {
                        kind: ::core::stringify!($name),
                        value: -1,
                    })
                    .and_then(Self::try_from)
            }
        }

        impl $crate::private::serde::Serialize for $name {
            fn serialize<S>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::private::serde::Serializer,
            {
                serializer.serialize_u8(self.u8())
            }
        }

        impl<'de> $crate::private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::private::serde::Deserializer<'de>,
            {
                use $crate::private::serde::de::Error as _;

                let value = <i64 as $crate::private::serde::Deserialize>
                    ::deserialize(deserializer)?;
                Self::try_from(value).map_err(D::Error::custom)
            }
        }
    };
}

/// Error of converting an integer into a kind enum.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("unknown `{kind}` value: {value}")]
pub struct UnknownKind {
    /// Name of the kind enum.
    pub kind: &'static str,

    /// Rejected value.
    pub value: i64,
}
