//! Two-circle blending.
//!
//! A moving circle (the cursor) and a fixed circle are drawn as one blob when
//! they are within `max_length` of each other: the fixed circle swells as the
//! cursor approaches, and an elastic band made of two cubic curves joins their
//! outer tangents. Past `max_length` the band snaps and the circles are drawn
//! independently.

use crate::circle::{Circle, Point};
use crate::plan::{Ink, PathCommand, RenderPlan};
use std::f32::consts::{FRAC_PI_2, PI};

pub const DEFAULT_SCALE_RATE: f32 = 0.3;
pub const DEFAULT_BAND_THICKNESS: f32 = 0.5;
pub const DEFAULT_BAND_THINNING: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTuning {
    /// Growth of the fixed circle as the cursor closes in. 0.3 = up to 30% larger.
    pub scale_rate: f32,
    /// Thickness of the band relative to the circle radii, in [0, 1].
    pub thickness: f32,
    /// How much the middle of the band thins as it stretches. 0 = no thinning.
    pub thinning: f32,
}

impl Default for BandTuning {
    fn default() -> Self {
        Self {
            scale_rate: DEFAULT_SCALE_RATE,
            thickness: DEFAULT_BAND_THICKNESS,
            thinning: DEFAULT_BAND_THINNING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metaball {
    pub tuning: BandTuning,
    /// Distance at which the band snaps.
    pub max_length: f32,
}

impl Metaball {
    pub fn new(tuning: BandTuning, max_length: f32) -> Self {
        Self { tuning, max_length }
    }

    /// Scale applied to the fixed circle's radius at center distance `d`.
    pub fn proximity_scale(&self, d: f32) -> f32 {
        if self.max_length > 0.0 && d <= self.max_length {
            1.0 + self.tuning.scale_rate * (1.0 - d / self.max_length)
        } else {
            1.0
        }
    }

    /// Plans the blob formed by `moving` and `fixed`.
    ///
    /// The moving circle is always first, the swollen fixed circle second and
    /// the band, if any, last. A fixed circle swallowed by the cursor (or the
    /// other way around) is dropped along with the band.
    pub fn blend(&self, moving: &Circle, fixed: &Circle) -> RenderPlan {
        let mut plan = RenderPlan::new();
        if !moving.is_visible() || !fixed.is_visible() {
            return plan;
        }

        let d = moving.distance_to(fixed);
        let r2 = fixed.radius * self.proximity_scale(d);

        plan.fill_circle(*moving, Ink::Selected);

        if d <= (moving.radius - r2).abs() {
            return plan;
        }

        let fixed = Circle::new(fixed.x, fixed.y, r2);
        plan.fill_circle(fixed, Ink::Selected);

        if !d.is_finite() || d > self.max_length {
            return plan;
        }

        plan.fill_contour(self.band(moving, &fixed, d), Ink::Selected);
        plan
    }

    /// Closed outline of the band between `moving` and the already scaled
    /// `fixed` circle. Requires `d > |r1 - r2|`, so `d` is never zero here.
    fn band(&self, moving: &Circle, fixed: &Circle, d: f32) -> Vec<PathCommand> {
        let (r1, r2) = (moving.radius, fixed.radius);
        let t = self.tuning.thickness;

        // half-angles of the lens where the circles intersect
        let (u1, u2) = if d < r1 + r2 {
            (law_of_cosines(r1, d, r2), law_of_cosines(r2, d, r1))
        } else {
            (0.0, 0.0)
        };

        let delta = moving.center().delta_to(fixed.center());
        let angle1 = delta.y.atan2(delta.x);
        let angle2 = clamped_acos((r1 - r2) / d);

        let angle1a = angle1 + u1 + (angle2 - u1) * t;
        let angle1b = angle1 - u1 - (angle2 - u1) * t;
        let angle2a = angle1 + PI - u2 - (PI - u2 - angle2) * t;
        let angle2b = angle1 - PI + u2 + (PI - u2 - angle2) * t;

        let p1a = moving.point_at(angle1a, r1);
        let p1b = moving.point_at(angle1b, r1);
        let p2a = fixed.point_at(angle2a, r2);
        let p2b = fixed.point_at(angle2b, r2);

        let total_radius = r1 + r2;
        let waist = (t * self.tuning.thinning).min(p1a.delta_to(p2a).length() / total_radius)
            * (d * 2.0 / total_radius).min(1.0);
        let (m1, m2) = (r1 * waist, r2 * waist);

        let h1a = p1a.offset(Point::polar(angle1a - FRAC_PI_2, m1));
        let h2a = p2a.offset(Point::polar(angle2a + FRAC_PI_2, m2));
        let h2b = p2b.offset(Point::polar(angle2b - FRAC_PI_2, m2));
        let h1b = p1b.offset(Point::polar(angle1b + FRAC_PI_2, m1));

        vec![
            PathCommand::MoveTo(p1a),
            PathCommand::CubicTo {
                c1: h1a,
                c2: h2a,
                to: p2a,
            },
            PathCommand::LineTo(p2b),
            PathCommand::CubicTo {
                c1: h2b,
                c2: h1b,
                to: p1b,
            },
            PathCommand::LineTo(p1a),
            PathCommand::Close,
        ]
    }
}

/// Angle between sides `a` and `b` of a triangle whose third side is `c`.
fn law_of_cosines(a: f32, b: f32, c: f32) -> f32 {
    clamped_acos((a * a + b * b - c * c) / (2.0 * a * b))
}

fn clamped_acos(cos: f32) -> f32 {
    cos.clamp(-1.0, 1.0).acos()
}
