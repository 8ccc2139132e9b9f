// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtypes::{Length, LengthUnit as Unit};

use crate::converter;
use crate::paint_server::Units;
use crate::svgtree::{AId, SvgNode};

// Text is not supported, so there is no `font-size` to resolve.
const FONT_SIZE: f32 = 12.0;

/// Converts a length into user units.
///
/// In the `ObjectBoundingBox` space a percentage becomes a fraction
/// and all other values are kept as is.
#[inline(never)]
pub(crate) fn convert_length(
    length: Length,
    aid: AId,
    object_units: Units,
    state: &converter::State,
) -> f32 {
    let dpi = state.opt.dpi;
    let n = length.number as f32;
    match length.unit {
        Unit::None | Unit::Px => n,
        Unit::Em => n * FONT_SIZE,
        Unit::Ex => n * FONT_SIZE / 2.0,
        Unit::In => n * dpi,
        Unit::Cm => n * dpi / 2.54,
        Unit::Mm => n * dpi / 25.4,
        Unit::Pt => n * dpi / 72.0,
        Unit::Pc => n * dpi / 6.0,
        Unit::Percent => {
            if object_units == Units::ObjectBoundingBox {
                n / 100.0
            } else {
                let view_box = state.view_box;

                match aid {
                    AId::Cx | AId::Fx | AId::Rx | AId::Width | AId::X | AId::X1 | AId::X2 => {
                        convert_percent(length, view_box.width())
                    }
                    AId::Cy | AId::Fy | AId::Ry | AId::Height | AId::Y | AId::Y1 | AId::Y2 => {
                        convert_percent(length, view_box.height())
                    }
                    _ => {
                        let mut vb_len = view_box.width().powi(2) + view_box.height().powi(2);
                        vb_len = (vb_len / 2.0).sqrt();
                        convert_percent(length, vb_len)
                    }
                }
            }
        }
    }
}

#[inline]
pub(crate) fn convert_user_length(length: Length, aid: AId, state: &converter::State) -> f32 {
    convert_length(length, aid, Units::UserSpaceOnUse, state)
}

/// Parses and converts a length attribute, falling back to `def` when it is missing or invalid.
pub(crate) fn convert_attribute(node: SvgNode, aid: AId, state: &converter::State, def: f32) -> f32 {
    match node.attribute::<Length>(aid) {
        Some(length) => convert_user_length(length, aid, state),
        None => def,
    }
}

fn convert_percent(length: Length, base: f32) -> f32 {
    base * (length.number as f32) / 100.0
}
