use crate::layout::Insets;
use crate::metaball::{
    BandTuning, DEFAULT_BAND_THICKNESS, DEFAULT_BAND_THINNING, DEFAULT_SCALE_RATE,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DOT_COUNT: i32 = 3;
pub const DEFAULT_DOT_RADIUS: f32 = 8.0;

/// User-facing tunables of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub dot_count: i32,
    pub dot_radius: f32,
    pub scale_rate: f32,
    pub band_thickness: f32,
    pub band_thinning: f32,
    pub padding: Insets,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            dot_count: DEFAULT_DOT_COUNT,
            dot_radius: DEFAULT_DOT_RADIUS,
            scale_rate: DEFAULT_SCALE_RATE,
            band_thickness: DEFAULT_BAND_THICKNESS,
            band_thinning: DEFAULT_BAND_THINNING,
            padding: Insets::default(),
        }
    }
}

impl IndicatorSettings {
    /// Clamps every value into its documented range.
    pub fn sanitized(self) -> Self {
        Self {
            dot_count: clamp_logged("dot_count", self.dot_count, 0, i32::MAX),
            dot_radius: clamp_logged("dot_radius", self.dot_radius, 0.0, f32::MAX),
            scale_rate: clamp_logged("scale_rate", self.scale_rate, 0.0, f32::MAX),
            band_thickness: clamp_logged("band_thickness", self.band_thickness, 0.0, 1.0),
            band_thinning: clamp_logged("band_thinning", self.band_thinning, 0.0, f32::MAX),
            padding: self.padding,
        }
    }

    pub fn dot_count(&self) -> usize {
        usize::try_from(self.dot_count).unwrap_or(0)
    }

    pub fn tuning(&self) -> BandTuning {
        BandTuning {
            scale_rate: self.scale_rate,
            thickness: self.band_thickness,
            thinning: self.band_thinning,
        }
    }
}

fn clamp_logged<T>(name: &str, value: T, min: T, max: T) -> T
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    let clamped = if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    };
    if clamped != value {
        log::warn!("{} = {} out of range, using {}", name, value, clamped);
    }
    clamped
}
