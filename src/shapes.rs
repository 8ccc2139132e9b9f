// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::Write;

use svgtypes::Length;
use tiny_skia_path::{PathBuilder, PathSegment};

use crate::converter;
use crate::svgtree::{AId, EId, SvgNode};
use crate::units;

/// A drawable element with only the fields its geometry needs.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum DrawableKind<'a> {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rx: f32,
        ry: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
    },
    Ellipse {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Path {
        data: &'a str,
    },
    Polygon {
        points: Vec<(f32, f32)>,
    },
    Polyline {
        points: Vec<(f32, f32)>,
    },
}

impl<'a> DrawableKind<'a> {
    /// Collects the geometry of a drawable element.
    ///
    /// Returns `None` for non-drawable elements and for `polyline` and `polygon`
    /// elements with less than 2 points.
    pub(crate) fn from_node(node: SvgNode<'a, '_>, state: &converter::State) -> Option<Self> {
        let len = |aid| units::convert_attribute(node, aid, state, 0.0);

        let kind = match node.tag_name()? {
            EId::Rect => {
                let width = len(AId::Width);
                let height = len(AId::Height);
                let (rx, ry) = resolve_rx_ry(node, state);
                DrawableKind::Rect {
                    x: len(AId::X),
                    y: len(AId::Y),
                    width,
                    height,
                    // Clamp rx/ry to the half of the width/height.
                    rx: rx.min(width / 2.0).max(0.0),
                    ry: ry.min(height / 2.0).max(0.0),
                }
            }
            EId::Circle => DrawableKind::Circle {
                cx: len(AId::Cx),
                cy: len(AId::Cy),
                r: len(AId::R),
            },
            EId::Ellipse => {
                let (rx, ry) = resolve_rx_ry(node, state);
                DrawableKind::Ellipse {
                    cx: len(AId::Cx),
                    cy: len(AId::Cy),
                    rx,
                    ry,
                }
            }
            EId::Line => DrawableKind::Line {
                x1: len(AId::X1),
                y1: len(AId::Y1),
                x2: len(AId::X2),
                y2: len(AId::Y2),
            },
            EId::Path => DrawableKind::Path {
                data: node.attribute(AId::D).unwrap_or(""),
            },
            EId::Polygon => DrawableKind::Polygon {
                points: parse_points(node, "Polygon")?,
            },
            EId::Polyline => DrawableKind::Polyline {
                points: parse_points(node, "Polyline")?,
            },
            _ => return None,
        };

        Some(kind)
    }

    /// Checks that the shape has a zero or negative size.
    ///
    /// Such shapes must not be stroked.
    pub fn is_degenerate(&self) -> bool {
        match *self {
            DrawableKind::Rect { width, height, .. } => width <= 0.0 || height <= 0.0,
            DrawableKind::Circle { r, .. } => r <= 0.0,
            DrawableKind::Ellipse { rx, ry, .. } => rx <= 0.0 || ry <= 0.0,
            _ => false,
        }
    }

    /// Converts the shape into path data.
    ///
    /// Rounded corners and ellipses are approximated with cubic curves.
    pub fn to_path_data(&self) -> String {
        let mut builder = PathBuilder::new();
        match *self {
            DrawableKind::Path { data } => return data.to_string(),
            DrawableKind::Rect {
                x,
                y,
                width,
                height,
                rx,
                ry,
            } => {
                // Conversion according to https://www.w3.org/TR/SVG11/shapes.html#RectElement
                if rx > 0.0 && ry > 0.0 {
                    builder.move_to(x + rx, y);

                    builder.line_to(x + width - rx, y);
                    builder.arc_to(rx, ry, x + width, y + ry);

                    builder.line_to(x + width, y + height - ry);
                    builder.arc_to(rx, ry, x + width - rx, y + height);

                    builder.line_to(x + rx, y + height);
                    builder.arc_to(rx, ry, x, y + height - ry);

                    builder.line_to(x, y + ry);
                    builder.arc_to(rx, ry, x + rx, y);
                } else {
                    builder.move_to(x, y);
                    builder.line_to(x + width, y);
                    builder.line_to(x + width, y + height);
                    builder.line_to(x, y + height);
                }
                builder.close();
            }
            DrawableKind::Circle { cx, cy, r } => ellipse_to_path(&mut builder, cx, cy, r, r),
            DrawableKind::Ellipse { cx, cy, rx, ry } => {
                ellipse_to_path(&mut builder, cx, cy, rx, ry)
            }
            DrawableKind::Line { x1, y1, x2, y2 } => {
                builder.move_to(x1, y1);
                builder.line_to(x2, y2);
            }
            DrawableKind::Polygon { ref points } => {
                points_to_path(&mut builder, points);
                builder.close();
            }
            DrawableKind::Polyline { ref points } => points_to_path(&mut builder, points),
        }

        match builder.finish() {
            Some(path) => write_segments(path.segments()),
            None => String::new(),
        }
    }
}

fn resolve_rx_ry(node: SvgNode, state: &converter::State) -> (f32, f32) {
    let mut rx_opt = node.attribute::<Length>(AId::Rx);
    let mut ry_opt = node.attribute::<Length>(AId::Ry);

    // Remove negative values first.
    if let Some(v) = rx_opt {
        if v.number.is_sign_negative() {
            rx_opt = None;
        }
    }
    if let Some(v) = ry_opt {
        if v.number.is_sign_negative() {
            ry_opt = None;
        }
    }

    // A missing radius is the same as the other one.
    match (rx_opt, ry_opt) {
        (None, None) => (0.0, 0.0),
        (Some(rx), None) => {
            let rx = units::convert_user_length(rx, AId::Rx, state);
            (rx, rx)
        }
        (None, Some(ry)) => {
            let ry = units::convert_user_length(ry, AId::Ry, state);
            (ry, ry)
        }
        (Some(rx), Some(ry)) => {
            let rx = units::convert_user_length(rx, AId::Rx, state);
            let ry = units::convert_user_length(ry, AId::Ry, state);
            (rx, ry)
        }
    }
}

fn parse_points(node: SvgNode, eid: &str) -> Option<Vec<(f32, f32)>> {
    let text: &str = try_opt_warn_or!(
        node.attribute(AId::Points),
        None,
        "{} '{}' has no 'points' attribute. Skipped.",
        eid,
        node.element_id()
    );

    let points: Vec<_> = svgtypes::PointsParser::from(text)
        .map(|(x, y)| (x as f32, y as f32))
        .collect();

    // 'polyline' and 'polygon' elements must contain at least 2 points.
    if points.len() < 2 {
        log::warn!(
            "{} '{}' has less than 2 points. Skipped.",
            eid,
            node.element_id()
        );
        return None;
    }

    Some(points)
}

fn points_to_path(builder: &mut PathBuilder, points: &[(f32, f32)]) {
    for &(x, y) in points {
        if builder.is_empty() {
            builder.move_to(x, y);
        } else {
            builder.line_to(x, y);
        }
    }
}

fn ellipse_to_path(builder: &mut PathBuilder, cx: f32, cy: f32, rx: f32, ry: f32) {
    builder.move_to(cx + rx, cy);
    builder.arc_to(rx, ry, cx, cy + ry);
    builder.arc_to(rx, ry, cx - rx, cy);
    builder.arc_to(rx, ry, cx, cy - ry);
    builder.arc_to(rx, ry, cx + rx, cy);
    builder.close();
}

fn write_segments(segments: impl Iterator<Item = PathSegment>) -> String {
    let mut s = String::new();
    for seg in segments {
        if !s.is_empty() {
            s.push(' ');
        }

        // Writing to a String cannot fail.
        let _ = match seg {
            PathSegment::MoveTo(p) => write!(s, "M {} {}", p.x, p.y),
            PathSegment::LineTo(p) => write!(s, "L {} {}", p.x, p.y),
            PathSegment::QuadTo(p1, p) => write!(s, "Q {} {} {} {}", p1.x, p1.y, p.x, p.y),
            PathSegment::CubicTo(p1, p2, p) => write!(
                s,
                "C {} {} {} {} {} {}",
                p1.x, p1.y, p2.x, p2.y, p.x, p.y
            ),
            PathSegment::Close => write!(s, "Z"),
        };
    }

    s
}

trait PathBuilderExt {
    fn arc_to(&mut self, rx: f32, ry: f32, x: f32, y: f32);
}

impl PathBuilderExt for PathBuilder {
    // A clockwise, small arc without rotation. The only kind shapes need.
    fn arc_to(&mut self, rx: f32, ry: f32, x: f32, y: f32) {
        let prev = match self.last_point() {
            Some(v) => v,
            None => return,
        };

        let svg_arc = kurbo::SvgArc {
            from: kurbo::Point::new(prev.x as f64, prev.y as f64),
            to: kurbo::Point::new(x as f64, y as f64),
            radii: kurbo::Vec2::new(rx as f64, ry as f64),
            x_rotation: 0.0,
            large_arc: false,
            sweep: true,
        };

        match kurbo::Arc::from_svg_arc(&svg_arc) {
            Some(arc) => {
                arc.to_cubic_beziers(0.1, |p1, p2, p| {
                    self.cubic_to(
                        p1.x as f32,
                        p1.y as f32,
                        p2.x as f32,
                        p2.y as f32,
                        p.x as f32,
                        p.y as f32,
                    );
                });
            }
            None => {
                self.line_to(x, y);
            }
        }
    }
}
