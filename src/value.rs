//! Field decoding from the textual wire representation.
//!
//! The daemon delivers every value as text; decoding into a scalar follows
//! one contract for all types: NULL or unparsable input yields the supplied
//! default, anything else the parsed value. Callers who must tell NULL apart
//! from malformed data check [`crate::Row::raw`] first.

/// Trait for decoding a raw field value into a Rust scalar.
pub trait FromField: Sized {
    /// Parse from the textual wire form. `None` if the text does not parse.
    fn from_text(text: &str) -> Option<Self>;

    /// Decode a possibly-NULL raw value, falling back to `default` for NULL
    /// and for text that does not parse.
    fn decode(raw: Option<&str>, default: Self) -> Self {
        raw.and_then(Self::from_text).unwrap_or(default)
    }
}

macro_rules! impl_from_field_for_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromField for $ty {
                fn from_text(text: &str) -> Option<Self> {
                    text.parse().ok()
                }
            }
        )*
    };
}

impl_from_field_for_number!(u32, u64, i32, i64, f32, f64);

impl FromField for String {
    /// Strings are a direct copy of the wire text.
    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_owned())
    }
}
