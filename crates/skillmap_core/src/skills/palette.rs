//! Specialty → color table.
//!
//! The only place that maps specialties to colors. Badges, group headers
//! and chart series all resolve through [`palette_for`], so labeling and
//! catalog alignment cannot drift apart.

use serde::Serialize;

/// Colors used to render one specialty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialtyPalette {
    /// Badge classes for the directory card.
    pub badge: &'static str,
    /// Series line and present-point color.
    pub border: &'static str,
    /// Translucent series fill.
    pub fill: &'static str,
}

/// Palette of the `"Other"` bucket and of any unknown specialty.
pub const OTHER_PALETTE: SpecialtyPalette = SpecialtyPalette {
    badge: "bg-gray-100 text-gray-800",
    border: "rgba(107, 114, 128, 1)",
    fill: "rgba(107, 114, 128, 0.2)",
};

/// Palette of the combined proficiency series.
pub const COMBINED_PALETTE: SpecialtyPalette = SpecialtyPalette {
    badge: "bg-indigo-100 text-indigo-800",
    border: "rgba(99, 102, 241, 1)",
    fill: "rgba(99, 102, 241, 0.2)",
};

/// Point color used for catalog entries the person has no skill in.
pub const ABSENT_POINT_COLOR: &str = "rgba(209, 213, 219, 1)";

// Keys are specialty keys (lower-case folds).
const SPECIALTY_PALETTES: &[(&str, SpecialtyPalette)] = &[
    (
        "frontend",
        SpecialtyPalette {
            badge: "bg-blue-100 text-blue-800",
            border: "rgba(59, 130, 246, 1)",
            fill: "rgba(59, 130, 246, 0.2)",
        },
    ),
    (
        "backend",
        SpecialtyPalette {
            badge: "bg-green-100 text-green-800",
            border: "rgba(34, 197, 94, 1)",
            fill: "rgba(34, 197, 94, 0.2)",
        },
    ),
    (
        "design",
        SpecialtyPalette {
            badge: "bg-purple-100 text-purple-800",
            border: "rgba(168, 85, 247, 1)",
            fill: "rgba(168, 85, 247, 0.2)",
        },
    ),
    (
        "devops",
        SpecialtyPalette {
            badge: "bg-orange-100 text-orange-800",
            border: "rgba(249, 115, 22, 1)",
            fill: "rgba(249, 115, 22, 0.2)",
        },
    ),
    (
        "mobile",
        SpecialtyPalette {
            badge: "bg-pink-100 text-pink-800",
            border: "rgba(236, 72, 153, 1)",
            fill: "rgba(236, 72, 153, 0.2)",
        },
    ),
    (
        "ai/ml",
        SpecialtyPalette {
            badge: "bg-teal-100 text-teal-800",
            border: "rgba(20, 184, 166, 1)",
            fill: "rgba(20, 184, 166, 0.2)",
        },
    ),
];

/// Resolves the palette for a specialty key, falling back to the `"Other"`
/// palette for unknown specialties.
pub fn palette_for(specialty_key: &str) -> &'static SpecialtyPalette {
    SPECIALTY_PALETTES
        .iter()
        .find(|(key, _)| *key == specialty_key)
        .map(|(_, palette)| palette)
        .unwrap_or(&OTHER_PALETTE)
}

/// Specialty keys that have a dedicated palette, in table order.
pub fn known_specialties() -> impl Iterator<Item = &'static str> {
    SPECIALTY_PALETTES.iter().map(|(key, _)| *key)
}
