// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Draw records and cross-reference tables.

use std::collections::HashMap;

use crate::paint_server::{LinearGradient, PaintObject, RadialGradient};
use crate::stroke::StrokeParams;

/// A paint mode of a draw record.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FillType {
    NoFill,
    SolidFill,
    LinearGradientFill,
    RadialGradientFill,
    Stroke,
}

/// A drawing operation of a draw record.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PathType {
    Zero,
    FillPath,
    StrokePath,
}

/// A single fill or stroke instruction.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DrawRecord {
    pub fill_type: FillType,
    pub path_type: PathType,
}

impl DrawRecord {
    /// A record that draws nothing.
    pub const EMPTY: DrawRecord = DrawRecord {
        fill_type: FillType::NoFill,
        path_type: PathType::Zero,
    };

    #[inline]
    fn new(fill_type: FillType, path_type: PathType) -> Self {
        DrawRecord {
            fill_type,
            path_type,
        }
    }
}

/// A gradient definition.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum Gradient {
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Gradient {
    /// Returns the gradient element `id`.
    pub fn id(&self) -> &str {
        match self {
            Gradient::Linear(lg) => &lg.id,
            Gradient::Radial(rg) => &rg.id,
        }
    }
}

/// Cross-reference tables of a compiled document.
///
/// All per-path tables have the same length as the number of paths.
#[derive(Clone, Debug)]
pub struct Tables {
    /// A fill/stroke record pair per path.
    pub draw_records: Vec<[DrawRecord; 2]>,
    /// An index in `gradients` per path, when the path draws a linear gradient.
    pub linear_refs: Vec<Option<usize>>,
    /// An index in `gradients` per path, when the path draws a radial gradient.
    pub radial_refs: Vec<Option<usize>>,
    /// Stroke parameters per path, `None` when unstroked.
    pub strokes: Vec<Option<StrokeParams>>,
    /// Gradient definitions in the order they were first used.
    pub gradients: Vec<Gradient>,
}

/// Accumulates draw records and tables in document order.
#[derive(Default, Debug)]
pub(crate) struct Planner {
    gradient_ids: HashMap<String, Vec<usize>>,
    gradients: Vec<Gradient>,
    draw_records: Vec<[DrawRecord; 2]>,
    linear_refs: Vec<Option<usize>>,
    radial_refs: Vec<Option<usize>>,
    strokes: Vec<Option<StrokeParams>>,
}

impl Planner {
    pub fn new() -> Self {
        Planner::default()
    }

    /// Adds a path and returns its index.
    pub fn push(
        &mut self,
        fill: &PaintObject,
        stroke: &PaintObject,
        stroke_params: Option<StrokeParams>,
    ) -> usize {
        let idx = self.draw_records.len();
        self.draw_records.push(draw_records(fill, stroke));

        // A path draws at most one gradient. The fill wins.
        let gradient = if fill.is_gradient() {
            Some(fill)
        } else if stroke.is_gradient() {
            Some(stroke)
        } else {
            None
        };

        let (linear, radial) = match gradient {
            Some(PaintObject::LinearGradient(lg)) => {
                let gidx = self.gradient_index(Gradient::Linear(lg.clone()));
                (Some(gidx), None)
            }
            Some(PaintObject::RadialGradient(rg)) => {
                let gidx = self.gradient_index(Gradient::Radial(rg.clone()));
                (None, Some(gidx))
            }
            _ => (None, None),
        };

        self.linear_refs.push(linear);
        self.radial_refs.push(radial);
        self.strokes.push(stroke_params);

        idx
    }

    /// Returns the index of an equal gradient definition, adding one when missing.
    ///
    /// Bounding box units resolve the same element differently per path,
    /// so the id alone doesn't identify a table entry.
    fn gradient_index(&mut self, gradient: Gradient) -> usize {
        let ids = self.gradient_ids.entry(gradient.id().to_string()).or_default();
        if let Some(idx) = ids.iter().find(|idx| self.gradients[**idx] == gradient) {
            return *idx;
        }

        let idx = self.gradients.len();
        ids.push(idx);
        self.gradients.push(gradient);
        idx
    }

    pub fn finish(self) -> Tables {
        Tables {
            draw_records: self.draw_records,
            linear_refs: self.linear_refs,
            radial_refs: self.radial_refs,
            strokes: self.strokes,
            gradients: self.gradients,
        }
    }
}

fn paint_type(paint: &PaintObject, is_stroke: bool) -> FillType {
    match paint {
        PaintObject::SolidColor(_) if is_stroke => FillType::Stroke,
        PaintObject::SolidColor(_) => FillType::SolidFill,
        PaintObject::LinearGradient(_) => FillType::LinearGradientFill,
        PaintObject::RadialGradient(_) => FillType::RadialGradientFill,
        PaintObject::Unresolved => FillType::NoFill,
    }
}

/// Decides the fill/stroke record pair of a path.
pub fn draw_records(fill: &PaintObject, stroke: &PaintObject) -> [DrawRecord; 2] {
    use self::FillType as F;
    use self::PathType as P;

    match (fill.is_present(), stroke.is_present()) {
        (false, false) => [DrawRecord::EMPTY, DrawRecord::EMPTY],
        (false, true) => [
            DrawRecord::new(paint_type(stroke, true), P::StrokePath),
            DrawRecord::EMPTY,
        ],
        (true, false) => [
            DrawRecord::new(paint_type(fill, false), P::FillPath),
            DrawRecord::EMPTY,
        ],
        (true, true) => {
            if fill.is_gradient() {
                [
                    DrawRecord::new(paint_type(fill, false), P::FillPath),
                    DrawRecord::new(F::Stroke, P::StrokePath),
                ]
            } else if stroke.is_gradient() {
                [
                    DrawRecord::new(paint_type(stroke, true), P::StrokePath),
                    DrawRecord::new(F::SolidFill, P::FillPath),
                ]
            } else {
                [
                    DrawRecord::new(F::SolidFill, P::FillPath),
                    DrawRecord::new(F::Stroke, P::StrokePath),
                ]
            }
        }
    }
}
