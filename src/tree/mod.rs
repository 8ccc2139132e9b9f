// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The compiled image representation.

use tiny_skia_path::{Size, Transform};

use crate::emit::{DrawRecord, Gradient};
use crate::paint_server::PaintObject;
use crate::path::{BBox, NormalizedPath, PathCommand};
use crate::stroke::StrokeParams;
use crate::style::FillRule;
use crate::svgtree::EId;
use crate::{Color, DataType};

/// A compiled drawable element.
#[derive(Clone, Debug)]
pub struct PathRecord {
    /// Element's ID.
    ///
    /// Taken from the SVG itself. Can be empty.
    pub id: String,

    /// The source element.
    pub kind: EId,

    /// Normalized geometry.
    pub path: NormalizedPath,

    /// Bounding box of `path` in user space.
    pub bbox: BBox,

    /// Set when the geometry has no close path command.
    pub end_path: bool,

    /// Fill paint. `Unresolved` when there is no fill.
    pub fill: PaintObject,

    /// Stroke paint. `Unresolved` when there is no stroke.
    pub stroke: PaintObject,

    /// A composed transform of the element and all its ancestors.
    ///
    /// `None` when neither has a `transform` attribute.
    pub transform: Option<Transform>,

    /// Fill rule.
    pub fill_rule: FillRule,

    /// The solid fill color. Black for gradients and missing fills.
    pub fill_color: Color,
}

impl PathRecord {
    /// Returns the transform as a row-major 3x3 matrix.
    ///
    /// Identity when not set.
    pub fn transform_matrix(&self) -> [f32; 9] {
        let ts = self.transform.unwrap_or_default();
        [ts.sx, ts.kx, ts.tx, ts.ky, ts.sy, ts.ty, 0.0, 0.0, 1.0]
    }
}

/// Per-command statistics of an image.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Stats {
    pub paths: usize,
    pub move_to: usize,
    pub line_to: usize,
    pub quad_to: usize,
    pub cubic_to: usize,
}

/// A compiled SVG image.
///
/// All per-path tables are indexed the same way as `paths`.
#[derive(Clone, Debug)]
pub struct Image {
    /// The image name. Used as an identifier prefix by the writer.
    pub name: String,

    /// Image size in pixels.
    pub size: Size,

    /// Storage type of the path data.
    pub data_type: DataType,

    /// Compiled elements in document order.
    pub paths: Vec<PathRecord>,

    /// Fill/stroke record pairs.
    pub draw_records: Vec<[DrawRecord; 2]>,

    /// Indices into `gradients` of linear gradient paints.
    pub linear_refs: Vec<Option<usize>>,

    /// Indices into `gradients` of radial gradient paints.
    pub radial_refs: Vec<Option<usize>>,

    /// Stroke parameters. `None` for unstroked paths.
    pub strokes: Vec<Option<StrokeParams>>,

    /// Gradient definitions in the order of their first use.
    pub gradients: Vec<Gradient>,
}

impl Image {
    /// Counts path commands by kind.
    ///
    /// Smooth curves are counted as curves and horizontal and vertical lines as lines.
    pub fn stats(&self) -> Stats {
        let mut stats = Stats {
            paths: self.paths.len(),
            ..Stats::default()
        };

        for record in &self.paths {
            for cmd in &record.path.commands {
                match cmd {
                    PathCommand::MoveTo(_) => stats.move_to += 1,
                    PathCommand::LineTo(_)
                    | PathCommand::HorizontalLineTo(_)
                    | PathCommand::VerticalLineTo(_) => stats.line_to += 1,
                    PathCommand::QuadCurveTo(_) | PathCommand::SmoothQuadTo(_) => {
                        stats.quad_to += 1
                    }
                    PathCommand::CubicCurveTo(_) | PathCommand::SmoothCubicTo(_) => {
                        stats.cubic_to += 1
                    }
                    PathCommand::ClosePath => {}
                }
            }
        }

        stats
    }

    /// Checks that any path is stroked.
    pub fn has_strokes(&self) -> bool {
        self.strokes.iter().any(Option::is_some)
    }
}
