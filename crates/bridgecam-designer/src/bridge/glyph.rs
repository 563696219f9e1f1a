//! Drawing parameters for the hourglass bridge glyph.
//!
//! The glyph is a filled body circle plus two semicircular "ears" marking
//! where the tab cuts the toolpath. Everything here is expressed in the
//! marker's local frame; [`outline_path`] maps it into scene space.

use bridgecam_core::{Color, SideOfMilling};
use lyon::math::{point, Angle, Transform};
use lyon::path::{Path as LyonPath, Winding};
use serde::{Deserialize, Serialize};

use crate::geometry::{polar, LineF, Point};

/// Line segments used to flatten one ear arc.
const ARC_SEGMENTS: usize = 16;

/// Colors and scale used when drawing markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub valid_color: Color,
    pub invalid_color: Color,
    pub outline_color: Color,
    /// Current view scale factor; outlines are `2 * view_scale` wide.
    pub view_scale: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            valid_color: Color::GREEN,
            invalid_color: Color::RED,
            outline_color: Color::WHITE,
            view_scale: 1.0,
        }
    }
}

/// Circular arc in the marker's local frame. Angles are in degrees,
/// counter-clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarArc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub span_angle: f64,
}

impl EarArc {
    pub fn point_at(&self, angle: f64) -> Point {
        self.center + polar(self.radius, angle)
    }

    /// Flattened arc, first point at `start_angle`.
    pub fn points(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| {
                let t = i as f64 / segments as f64;
                self.point_at(self.start_angle + self.span_angle * t)
            })
            .collect()
    }
}

/// Everything a renderer needs to draw one marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridgeGlyph {
    pub fill: Color,
    /// Rotation applied to the local frame, degrees.
    pub rotation: f64,
    pub body_diameter: f64,
    pub outline_color: Color,
    pub outline_width: f64,
    pub ears: [EarArc; 2],
}

/// Derives the glyph for a marker with the given geometry and state.
pub fn build_glyph(
    capture_diameter: f64,
    tab_width: f64,
    side: SideOfMilling,
    ok: bool,
    angle: f64,
    style: &RenderStyle,
) -> BridgeGlyph {
    let half_tab = tab_width / 2.0;
    let baseline = LineF::new(
        Point::default(),
        Point::new(capture_diameter / 2.0 + half_tab, 0.0),
    );
    let shift = match side {
        SideOfMilling::On => 0.0,
        SideOfMilling::Outer => half_tab,
        SideOfMilling::Inner => -half_tab,
    };
    let baseline = baseline.translated(Point::new(shift, 0.0));

    let ear = |direction: f64, start_angle: f64| EarArc {
        center: baseline.with_angle(direction).p2,
        radius: half_tab,
        start_angle,
        span_angle: 180.0,
    };

    BridgeGlyph {
        fill: if ok {
            style.valid_color
        } else {
            style.invalid_color
        },
        rotation: -(angle - 360.0),
        body_diameter: capture_diameter,
        outline_color: style.outline_color,
        outline_width: 2.0 * style.view_scale,
        ears: [ear(90.0, 180.0), ear(-90.0, 0.0)],
    }
}

/// Body circle centered on the local origin.
pub fn body_path(capture_diameter: f64) -> LyonPath {
    let mut builder = LyonPath::builder();
    builder.add_circle(
        point(0.0, 0.0),
        (capture_diameter / 2.0) as f32,
        Winding::Positive,
    );
    builder.build()
}

/// Body and ears rotated by the glyph rotation and moved to `pos`.
pub fn outline_path(glyph: &BridgeGlyph, pos: Point) -> LyonPath {
    let mut builder = LyonPath::builder();
    builder.add_circle(
        point(0.0, 0.0),
        (glyph.body_diameter / 2.0) as f32,
        Winding::Positive,
    );
    for ear in &glyph.ears {
        let mut points = ear.points(ARC_SEGMENTS).into_iter();
        if let Some(first) = points.next() {
            builder.begin(point(first.x as f32, first.y as f32));
            for p in points {
                builder.line_to(point(p.x as f32, p.y as f32));
            }
            builder.end(false);
        }
    }
    let path = builder.build();

    let transform = Transform::rotation(Angle::degrees(glyph.rotation as f32))
        .then_translate(lyon::math::vector(pos.x as f32, pos.y as f32));
    path.transformed(&transform)
}
