//! 24-bit RGB colors and the brighten/alpha transforms used for highlighting.

use std::fmt;

use super::error::{ColorError, ModelResult};

/// An opaque sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
}

impl Rgb {
	/// Build a color from its channels.
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Parse a `#rrggbb` string.
	pub fn parse(hex: &str) -> ModelResult<Self, ColorError> {
		let digits = hex
			.strip_prefix('#')
			.filter(|d| d.len() == 6 && d.is_ascii())
			.ok_or_else(|| ColorError::Malformed(hex.to_owned()))?;
		let channel = |range: std::ops::Range<usize>| {
			digits
				.get(range)
				.and_then(|s| u8::from_str_radix(s, 16).ok())
				.ok_or_else(|| ColorError::InvalidHex(hex.to_owned()))
		};
		Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
	}

	/// Scale every channel up by `percent`, saturating at 255.
	pub fn brighten(self, percent: f64) -> Self {
		let factor = 1.0 + percent / 100.0;
		let scale = |c: u8| (c as f64 * factor).floor().clamp(0.0, 255.0) as u8;
		Self::new(scale(self.r), scale(self.g), scale(self.b))
	}

	/// Lowercase `#rrggbb` form.
	pub fn to_hex(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// CSS `rgba(...)` string with the given alpha.
	pub fn rgba(self, alpha: f64) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex() {
		assert_eq!(Rgb::parse("#4dabf7"), Ok(Rgb::new(0x4d, 0xab, 0xf7)));
		assert_eq!(Rgb::parse("#FF6B6B"), Ok(Rgb::new(0xff, 0x6b, 0x6b)));
	}

	#[test]
	fn rejects_malformed() {
		assert!(matches!(Rgb::parse("4dabf7"), Err(ColorError::Malformed(_))));
		assert!(matches!(Rgb::parse("#4dab"), Err(ColorError::Malformed(_))));
		assert!(matches!(Rgb::parse("#zzabf7"), Err(ColorError::InvalidHex(_))));
	}

	#[test]
	fn brighten_floors_and_saturates() {
		// 0x69 = 105 -> floor(136.5) = 136; 0xdb = 219 -> 284 -> 255
		let c = Rgb::parse("#69db7c").unwrap().brighten(30.0);
		assert_eq!(c, Rgb::new(136, 255, 161));
		assert_eq!(c.to_hex(), "#88ffa1");
	}

	#[test]
	fn rgba_format() {
		assert_eq!(Rgb::new(50, 50, 50).rgba(0.1), "rgba(50, 50, 50, 0.1)");
		assert_eq!(Rgb::new(1, 2, 3).rgba(1.0), "rgba(1, 2, 3, 1)");
	}
}
