//! Hierarchical geometry identifier packed into a single `u64`.
//!
//! # Bit layout (most significant first)
//! | level     | width | mask                 |
//! |-----------|-------|----------------------|
//! | volume    | 8     | `0xff00000000000000` |
//! | boundary  | 8     | `0x00ff000000000000` |
//! | layer     | 12    | `0x0000fff000000000` |
//! | approach  | 8     | `0x0000000ff0000000` |
//! | sensitive | 28    | `0x000000000fffffff` |
//!
//! Ordering is the ordering of the raw integer, which is lexicographic over
//! the hierarchy because the volume occupies the highest bits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

/// One level of the geometry hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeometryLevel {
    /// Tracking volume
    Volume,
    /// Boundary surface of a volume
    Boundary,
    /// Layer confined in a volume
    Layer,
    /// Approach surface of a layer
    Approach,
    /// Sensitive surface of a layer
    Sensitive,
}

impl GeometryLevel {
    /// All levels in hierarchy order (volume first).
    pub const ALL: [GeometryLevel; 5] = [
        GeometryLevel::Volume,
        GeometryLevel::Boundary,
        GeometryLevel::Layer,
        GeometryLevel::Approach,
        GeometryLevel::Sensitive,
    ];

    /// Bits owned by this level. The five masks partition the full `u64`.
    pub const fn mask(self) -> u64 {
        match self {
            GeometryLevel::Volume => 0xff00_0000_0000_0000,    // 255 volumes
            GeometryLevel::Boundary => 0x00ff_0000_0000_0000,  // 255 boundaries
            GeometryLevel::Layer => 0x0000_fff0_0000_0000,     // 4095 layers
            GeometryLevel::Approach => 0x0000_000f_f000_0000,  // 255 approach surfaces
            GeometryLevel::Sensitive => 0x0000_0000_0fff_ffff, // 2^28 - 1 sensitive surfaces
        }
    }

    /// Position of the lowest bit of this level.
    pub const fn shift(self) -> u32 {
        self.mask().trailing_zeros()
    }

    /// Number of bits reserved for this level.
    pub const fn width(self) -> u32 {
        self.mask().count_ones()
    }

    /// Largest value representable at this level.
    pub const fn max_value(self) -> u64 {
        self.mask() >> self.shift()
    }

    /// Column width used by the bracketed rendering.
    const fn render_width(self) -> usize {
        match self {
            GeometryLevel::Sensitive => 4,
            _ => 3,
        }
    }
}

impl fmt::Display for GeometryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryLevel::Volume => "volume",
            GeometryLevel::Boundary => "boundary",
            GeometryLevel::Layer => "layer",
            GeometryLevel::Approach => "approach",
            GeometryLevel::Sensitive => "sensitive",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// Identifier for geometry nodes.
///
/// The default identifier is all zeros, meaning "no level assigned".
/// Setters mask the submitted value to the field width: bits that do not
/// fit are dropped, they never leak into a neighbouring level. Debug builds
/// log a warning when that happens; the stored value is the same in every
/// build profile.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GeometryId {
    value: u64,
}

impl GeometryId {
    /// Construct from an already encoded value.
    pub const fn new(encoded: u64) -> Self {
        Self { value: encoded }
    }

    /// Return the encoded value.
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Extract the right-justified value of one level.
    pub const fn level(&self, level: GeometryLevel) -> u64 {
        (self.value & level.mask()) >> level.shift()
    }

    pub const fn volume(&self) -> u64 {
        self.level(GeometryLevel::Volume)
    }

    pub const fn boundary(&self) -> u64 {
        self.level(GeometryLevel::Boundary)
    }

    pub const fn layer(&self) -> u64 {
        self.level(GeometryLevel::Layer)
    }

    pub const fn approach(&self) -> u64 {
        self.level(GeometryLevel::Approach)
    }

    pub const fn sensitive(&self) -> u64 {
        self.level(GeometryLevel::Sensitive)
    }

    /// Overwrite one level, leaving all others untouched. Chainable.
    pub fn set_level(&mut self, level: GeometryLevel, id: u64) -> &mut Self {
        if cfg!(debug_assertions) && id > level.max_value() {
            tracing::warn!(
                %level,
                id,
                max = level.max_value(),
                "geometry id value exceeds field width, high bits dropped"
            );
        }
        let mask = level.mask();
        // Bits shifted past bit 63 are lost along with the ones the mask removes.
        self.value = (self.value & !mask) | ((id << level.shift()) & mask);
        self
    }

    pub fn set_volume(&mut self, volume: u64) -> &mut Self {
        self.set_level(GeometryLevel::Volume, volume)
    }

    pub fn set_boundary(&mut self, boundary: u64) -> &mut Self {
        self.set_level(GeometryLevel::Boundary, boundary)
    }

    pub fn set_layer(&mut self, layer: u64) -> &mut Self {
        self.set_level(GeometryLevel::Layer, layer)
    }

    pub fn set_approach(&mut self, approach: u64) -> &mut Self {
        self.set_level(GeometryLevel::Approach, approach)
    }

    pub fn set_sensitive(&mut self, sensitive: u64) -> &mut Self {
        self.set_level(GeometryLevel::Sensitive, sensitive)
    }

    /// By-value counterpart of [`GeometryId::set_level`].
    pub fn with_level(mut self, level: GeometryLevel, id: u64) -> Self {
        self.set_level(level, id);
        self
    }

    pub fn with_volume(self, volume: u64) -> Self {
        self.with_level(GeometryLevel::Volume, volume)
    }

    pub fn with_boundary(self, boundary: u64) -> Self {
        self.with_level(GeometryLevel::Boundary, boundary)
    }

    pub fn with_layer(self, layer: u64) -> Self {
        self.with_level(GeometryLevel::Layer, layer)
    }

    pub fn with_approach(self, approach: u64) -> Self {
        self.with_level(GeometryLevel::Approach, approach)
    }

    pub fn with_sensitive(self, sensitive: u64) -> Self {
        self.with_level(GeometryLevel::Sensitive, sensitive)
    }
}

impl From<u64> for GeometryId {
    fn from(encoded: u64) -> Self {
        Self::new(encoded)
    }
}

impl From<GeometryId> for u64 {
    fn from(id: GeometryId) -> Self {
        id.value
    }
}

/// Renders `[ vvv | bbb | lll | aaa | ssss ]`.
///
/// Other tooling compares against this layout; keep field order, widths
/// and separators stable.
impl fmt::Display for GeometryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, level) in GeometryLevel::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(" |")?;
            }
            write!(f, " {:>width$}", self.level(*level), width = level.render_width())?;
        }
        f.write_str(" ]")
    }
}

impl fmt::Debug for GeometryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeometryId({self})")
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Errors produced when parsing the bracketed rendering back into an id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryIdError {
    #[error("geometry id must be enclosed in brackets: {input:?}")]
    MissingBrackets { input: String },

    #[error("geometry id must have 5 fields, found {found}")]
    FieldCount { found: usize },

    #[error("invalid {level} field {text:?}: {source}")]
    InvalidField {
        level: GeometryLevel,
        text: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("{level} value {value} exceeds maximum {max}")]
    OutOfRange {
        level: GeometryLevel,
        value: u64,
        max: u64,
    },
}

/// Parses the bracketed rendering; spacing around fields is free.
/// Unlike the setters, values that do not fit their level are rejected.
impl FromStr for GeometryId {
    type Err = GeometryIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| GeometryIdError::MissingBrackets {
                input: s.to_string(),
            })?;

        let fields: Vec<&str> = inner.split('|').map(str::trim).collect();
        if fields.len() != GeometryLevel::ALL.len() {
            return Err(GeometryIdError::FieldCount {
                found: fields.len(),
            });
        }

        let mut id = GeometryId::default();
        for (level, text) in GeometryLevel::ALL.into_iter().zip(fields) {
            let value: u64 = text.parse().map_err(|source| GeometryIdError::InvalidField {
                level,
                text: text.to_string(),
                source,
            })?;
            if value > level.max_value() {
                return Err(GeometryIdError::OutOfRange {
                    level,
                    value,
                    max: level.max_value(),
                });
            }
            id.set_level(level, value);
        }
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
