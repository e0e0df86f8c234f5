//! Size-class handling for generation requests.
//!
//! Clients send an aspect ratio as a free-form string; anything outside
//! the known set falls back to [`SizeClass::Square`] rather than being
//! rejected, matching the inbound contract.

/// Target output shape for a generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Square,
    Landscape,
    Portrait,
}

impl SizeClass {
    /// Parse a wire-format aspect-ratio string.
    ///
    /// Unrecognized values map to `Square` (1024x1024), never an error.
    pub fn parse(s: &str) -> Self {
        match s {
            "landscape" => SizeClass::Landscape,
            "portrait" => SizeClass::Portrait,
            _ => SizeClass::Square,
        }
    }

    /// Concrete output dimensions as `(width, height)` pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            SizeClass::Square => (1024, 1024),
            SizeClass::Landscape => (1536, 1024),
            SizeClass::Portrait => (1024, 1536),
        }
    }

    /// Canonical wire-format name.
    pub fn as_str(self) -> &'static str {
        match self {
            SizeClass::Square => "square",
            SizeClass::Landscape => "landscape",
            SizeClass::Portrait => "portrait",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_maps_to_wide_dimensions() {
        assert_eq!(SizeClass::parse("landscape").dimensions(), (1536, 1024));
    }

    #[test]
    fn portrait_maps_to_tall_dimensions() {
        assert_eq!(SizeClass::parse("portrait").dimensions(), (1024, 1536));
    }

    #[test]
    fn square_maps_to_square_dimensions() {
        assert_eq!(SizeClass::parse("square").dimensions(), (1024, 1024));
    }

    #[test]
    fn unrecognized_falls_back_to_square() {
        assert_eq!(SizeClass::parse("panorama"), SizeClass::Square);
        assert_eq!(SizeClass::parse(""), SizeClass::Square);
        assert_eq!(SizeClass::parse("SQUARE"), SizeClass::Square);
    }

    #[test]
    fn wire_names_round_trip() {
        for class in [SizeClass::Square, SizeClass::Landscape, SizeClass::Portrait] {
            assert_eq!(SizeClass::parse(class.as_str()), class);
        }
    }
}
