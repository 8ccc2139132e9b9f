// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use svgtypes::Length;

use crate::converter;
use crate::paint_server::PaintObject;
use crate::style::{AttributeSet, LineCap, LineJoin};
use crate::svgtree::{AId, EnumFromStr};
use crate::{units, Color};

/// Resolved stroke parameters.
#[derive(Clone, PartialEq, Debug)]
pub struct StrokeParams {
    /// Always has an even number of positive values.
    pub dasharray: Option<Vec<f32>>,
    /// Default: 0
    pub dashoffset: f32,
    /// Always positive. Default: 1
    pub width: f32,
    /// Always >= 1. Default: 4
    pub miterlimit: f32,
    /// Default: butt
    pub linecap: LineCap,
    /// Default: miter
    pub linejoin: LineJoin,
    /// A solid stroke color. Black for gradient strokes.
    pub color: Color,
}

/// Resolves stroke parameters of a stroked element.
///
/// Returns `None` when the stroke cannot be drawn, i.e. when `paint` is unresolved
/// or the stroke width is not positive.
pub(crate) fn resolve_stroke(
    attrs: &AttributeSet,
    paint: &PaintObject,
    element_id: &str,
    state: &converter::State,
) -> Option<StrokeParams> {
    let color = match *paint {
        PaintObject::SolidColor(c) => c,
        PaintObject::LinearGradient(_) | PaintObject::RadialGradient(_) => Color::black(),
        PaintObject::Unresolved => return None,
    };

    let width = match attrs.stroke_width {
        Some(text) => match Length::from_str(text) {
            Ok(length) => units::convert_user_length(length, AId::StrokeWidth, state),
            Err(_) => {
                log::warn!(
                    "Element '{}' has an invalid 'stroke-width' value: '{}'. Fallback to 1.",
                    element_id,
                    text
                );
                1.0
            }
        },
        None => 1.0,
    };

    if !(width > 0.0 && width.is_finite()) {
        log::warn!(
            "Element '{}' has a non-positive 'stroke-width'. Stroke is disabled.",
            element_id
        );
        return None;
    }

    // Must be bigger than 1.
    let miterlimit = attrs
        .stroke_miterlimit
        .and_then(|text| svgtypes::Number::from_str(text).ok())
        .map(|n| n.0 as f32)
        .unwrap_or(4.0);
    let miterlimit = if miterlimit < 1.0 { 1.0 } else { miterlimit };

    let dashoffset = attrs
        .stroke_dashoffset
        .and_then(|text| Length::from_str(text).ok())
        .map(|length| units::convert_user_length(length, AId::StrokeDashoffset, state))
        .unwrap_or(0.0);

    Some(StrokeParams {
        dasharray: conv_dasharray(attrs.stroke_dasharray, state),
        dashoffset,
        width,
        miterlimit,
        linecap: parse_keyword(attrs.stroke_linecap, AId::StrokeLinecap, element_id),
        linejoin: parse_keyword(attrs.stroke_linejoin, AId::StrokeLinejoin, element_id),
        color,
    })
}

fn parse_keyword<T: EnumFromStr + Default>(value: Option<&str>, aid: AId, element_id: &str) -> T {
    let text = match value {
        Some(v) => v,
        None => return T::default(),
    };

    match T::enum_from_str(text) {
        Some(v) => v,
        None => {
            log::warn!(
                "Element '{}' has an invalid '{}' value: '{}'. Fallback to default.",
                element_id,
                aid,
                text
            );
            T::default()
        }
    }
}

fn conv_dasharray(value: Option<&str>, state: &converter::State) -> Option<Vec<f32>> {
    let text = value?;
    if text == "none" {
        return None;
    }

    let mut list = Vec::new();
    for length in svgtypes::LengthListParser::from(text) {
        match length {
            Ok(length) => list.push(units::convert_user_length(
                length,
                AId::StrokeDasharray,
                state,
            )),
            Err(_) => return None,
        }
    }

    // `A negative value is an error`
    if list.iter().any(|n| n.is_sign_negative()) {
        return None;
    }

    // `If the sum of the values is zero, then the stroke is rendered
    // as if a value of none were specified.`
    let sum: f32 = list.iter().sum();
    if sum == 0.0 {
        return None;
    }

    // `If an odd number of values is provided, then the list of values
    // is repeated to yield an even number of values.`
    if list.len() % 2 != 0 {
        let mut tmp_list = list.clone();
        tmp_list.extend_from_slice(&list);
        return Some(tmp_list);
    }

    Some(list)
}
