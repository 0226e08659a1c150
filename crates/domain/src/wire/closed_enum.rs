//! Closed wire enumerations.

/// A closed set of string literals used on the wire.
///
/// Implemented by every enum declared with [`closed_enum!`](crate::closed_enum).
pub trait ClosedEnum: Sized + Copy + 'static {
    /// Every wire literal, in declaration order.
    const WIRE_NAMES: &'static [&'static str];

    /// Parse a wire literal. Matching is exact and case-sensitive.
    fn from_wire(value: &str) -> Option<Self>;

    /// The wire literal of this member.
    fn as_str(self) -> &'static str;
}

/// Declare a closed enumeration together with its wire literals.
///
/// The generated type derives `serde` support using the literals, implements
/// [`Display`](std::fmt::Display), [`FromStr`](std::str::FromStr) and
/// [`ClosedEnum`], and exposes `ALL` in declaration order.
#[macro_export]
macro_rules! closed_enum {
    (
        $(#[doc = $doc:expr])*
        $name:ident {
            $( $(#[doc = $vdoc:expr])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[doc = $vdoc])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire literal of this member.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Parse a wire literal. Matching is exact and case-sensitive.
            #[must_use]
            pub fn from_wire(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl $crate::wire::ClosedEnum for $name {
            const WIRE_NAMES: &'static [&'static str] = &[$($wire),+];

            fn from_wire(value: &str) -> Option<Self> {
                Self::from_wire(value)
            }

            fn as_str(self) -> &'static str {
                Self::as_str(self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::UnknownLiteral;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_wire(s).ok_or_else(|| $crate::error::UnknownLiteral {
                    value: s.to_string(),
                    allowed: <Self as $crate::wire::ClosedEnum>::WIRE_NAMES,
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::ClosedEnum;

    crate::closed_enum!(
        /// Test-only palette.
        Colour {
            Red => "RED",
            Green => "green",
        }
    );

    #[test]
    fn should_parse_declared_literals_exactly() {
        assert_eq!(Colour::from_wire("RED"), Some(Colour::Red));
        assert_eq!(Colour::from_wire("green"), Some(Colour::Green));
        assert_eq!(Colour::from_wire("red"), None);
        assert_eq!(Colour::from_wire("GREEN"), None);
    }

    #[test]
    fn should_list_members_in_declaration_order() {
        assert_eq!(Colour::ALL, &[Colour::Red, Colour::Green]);
        assert_eq!(<Colour as ClosedEnum>::WIRE_NAMES, &["RED", "green"]);
    }

    #[test]
    fn should_display_wire_literal() {
        assert_eq!(Colour::Green.to_string(), "green");
    }

    #[test]
    fn should_report_allowed_values_when_from_str_fails() {
        let err = "blue".parse::<Colour>().unwrap_err();
        assert_eq!(err.value, "blue");
        assert_eq!(err.allowed, &["RED", "green"]);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let json = serde_json::to_string(&Colour::Red).unwrap();
        assert_eq!(json, "\"RED\"");
        let parsed: Colour = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Colour::Red);
    }
}
