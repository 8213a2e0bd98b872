//! Route display colors.

use std::fmt;

/// Error returned when parsing an invalid color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {reason}")]
pub struct InvalidColor {
    reason: &'static str,
}

/// A 6-digit hexadecimal RGB color, as used by GTFS `route_color`.
///
/// Stored normalized to uppercase, without a leading `#`.
///
/// # Examples
///
/// ```
/// use trip_sequencer::domain::Color;
///
/// let green = Color::parse("34b233").unwrap();
/// assert_eq!(green.as_str(), "34B233");
///
/// // No leading '#', exactly six hex digits
/// assert!(Color::parse("#34B233").is_err());
/// assert!(Color::parse("34B23").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color([u8; 6]);

impl Color {
    /// Parse a color from six hex digits, either case.
    pub fn parse(s: &str) -> Result<Self, InvalidColor> {
        let bytes = s.as_bytes();

        if bytes.len() != 6 {
            return Err(InvalidColor {
                reason: "must be exactly 6 hex digits",
            });
        }

        let mut digits = [0u8; 6];
        for (digit, &b) in digits.iter_mut().zip(bytes) {
            if !b.is_ascii_hexdigit() {
                return Err(InvalidColor {
                    reason: "must be hex digits 0-9 or A-F",
                });
            }
            *digit = b.to_ascii_uppercase();
        }

        Ok(Color(digits))
    }

    /// Returns the color as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store uppercase ASCII hex digits
        std::str::from_utf8(&self.0).unwrap()
    }

    /// Returns the red, green and blue components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| {
            // Digits are validated hex, so this cannot fail
            u8::from_str_radix(&self.as_str()[i..i + 2], 16).unwrap_or(0)
        };
        (channel(0), channel(2), channel(4))
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.as_str())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 6 hex digits parse, and come back uppercased
        #[test]
        fn roundtrip(s in "[0-9A-Fa-f]{6}") {
            let color = Color::parse(&s).unwrap();
            prop_assert_eq!(color.as_str(), s.to_ascii_uppercase());
        }

        /// Wrong-length strings are always rejected
        #[test]
        fn wrong_length_rejected(s in "[0-9A-F]{0,5}|[0-9A-F]{7,10}") {
            prop_assert!(Color::parse(&s).is_err());
        }
    }
}
