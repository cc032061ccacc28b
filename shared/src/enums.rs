/// Error returned when a select value or query parameter does not name a
/// known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// A closed enum offered as a list of options.
pub trait Choice: Copy + PartialEq + 'static {
    fn all() -> &'static [Self];
    fn wire(&self) -> &'static str;
    fn text(&self) -> &'static str;
}

/// Declares a closed wire enum.
///
/// Each variant carries its wire spelling and a display label. Extra serde
/// aliases can be attached per variant; anything else fails to deserialize.
macro_rules! closed_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($wire:literal, $label:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Spelling used on the wire and in query strings.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl $crate::enums::Choice for $name {
            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn wire(&self) -> &'static str {
                self.as_str()
            }

            fn text(&self) -> &'static str {
                self.label()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::enums::UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::enums::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}
