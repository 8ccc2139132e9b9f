// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use svgtypes::{Length, LengthUnit as Unit};
use tiny_skia_path::{NonZeroRect, Size, Transform};

use crate::emit::Planner;
use crate::paint_server::{PaintObject, PaintServers};
use crate::shapes::DrawableKind;
use crate::style::{AttributeSet, FillRule, StyleNode};
use crate::svgtree::{self, AId, EId, SvgNode};
use crate::tree::{Image, PathRecord};
use crate::{path, stroke, units, Color, Error, Options};

const SUPPORTED_VERSION: &str = "1.2";
const SUPPORTED_BASE_PROFILE: &str = "tiny";

#[derive(Clone)]
pub struct State<'a> {
    /// A viewBox of the root SVG element.
    pub(crate) view_box: NonZeroRect,
    pub(crate) opt: &'a Options,
}

impl<'a> State<'a> {
    /// Creates a state with a viewBox of `Options::default_size`.
    pub(crate) fn new(opt: &'a Options) -> Self {
        State {
            view_box: opt.default_size.to_non_zero_rect(0.0, 0.0),
            opt,
        }
    }
}

struct Converter<'a, 'b> {
    state: &'b State<'a>,
    servers: PaintServers,
    planner: Planner,
    paths: Vec<PathRecord>,
}

pub(crate) fn convert_doc(svg_doc: &svgtree::Document, opt: &Options) -> Result<Image, Error> {
    let svg = match svg_doc.root_element() {
        Some(v) if v.tag_name() == Some(EId::Svg) => v,
        _ => {
            return Err(Error::UnsupportedProfile {
                version: None,
                base_profile: None,
            })
        }
    };

    check_profile(svg)?;

    let size = resolve_svg_size(svg, opt)?;
    let state = State {
        view_box: svg
            .parse_viewbox()
            .unwrap_or_else(|| size.to_non_zero_rect(0.0, 0.0)),
        opt,
    };

    let mut conv = Converter {
        state: &state,
        servers: PaintServers::collect(svg_doc, &state),
        planner: Planner::new(),
        paths: Vec::new(),
    };

    if is_visible_element(svg) {
        convert_children(svg, &mut conv)?;
    }

    let tables = conv.planner.finish();
    Ok(Image {
        name: opt.image_name.clone(),
        size,
        data_type: opt.data_type,
        paths: conv.paths,
        draw_records: tables.draw_records,
        linear_refs: tables.linear_refs,
        radial_refs: tables.radial_refs,
        strokes: tables.strokes,
        gradients: tables.gradients,
    })
}

fn check_profile(svg: SvgNode) -> Result<(), Error> {
    let version: Option<&str> = svg.attribute(AId::Version);
    let base_profile: Option<&str> = svg.attribute(AId::BaseProfile);

    if version.map(str::trim) == Some(SUPPORTED_VERSION)
        && base_profile.map(str::trim) == Some(SUPPORTED_BASE_PROFILE)
    {
        return Ok(());
    }

    Err(Error::UnsupportedProfile {
        version: version.map(ToString::to_string),
        base_profile: base_profile.map(ToString::to_string),
    })
}

fn resolve_svg_size(svg: SvgNode, opt: &Options) -> Result<Size, Error> {
    let mut state = State::new(opt);

    let def = Length::new(100.0, Unit::Percent);
    let mut width: Length = svg.attribute(AId::Width).unwrap_or(def);
    let mut height: Length = svg.attribute(AId::Height).unwrap_or(def);

    let view_box = svg.parse_viewbox();

    if view_box.is_none() {
        // Apply the percentages to the fallback size.
        if width.unit == Unit::Percent {
            width = Length::new(
                (width.number / 100.0) * opt.default_size.width() as f64,
                Unit::None,
            );
        }

        if height.unit == Unit::Percent {
            height = Length::new(
                (height.number / 100.0) * opt.default_size.height() as f64,
                Unit::None,
            );
        }
    }

    // A percentage means the viewBox size.
    let size = if let Some(vbox) = view_box {
        state.view_box = vbox;

        let w = if width.unit == Unit::Percent {
            vbox.width()
        } else {
            units::convert_user_length(width, AId::Width, &state)
        };

        let h = if height.unit == Unit::Percent {
            vbox.height()
        } else {
            units::convert_user_length(height, AId::Height, &state)
        };

        Size::from_wh(w, h)
    } else {
        Size::from_wh(
            units::convert_user_length(width, AId::Width, &state),
            units::convert_user_length(height, AId::Height, &state),
        )
    };

    size.ok_or(Error::InvalidSize)
}

impl SvgNode<'_, '_> {
    pub(crate) fn parse_viewbox(&self) -> Option<NonZeroRect> {
        let vb: svgtypes::ViewBox = self.attribute(AId::ViewBox)?;
        NonZeroRect::from_xywh(vb.x as f32, vb.y as f32, vb.w as f32, vb.h as f32)
    }
}

fn is_visible_element(node: SvgNode) -> bool {
    node.own_value(AId::Display) != Some("none")
}

fn convert_children(parent: SvgNode, conv: &mut Converter) -> Result<(), Error> {
    for node in parent.children() {
        convert_element(node, conv)?;
    }

    Ok(())
}

fn convert_element(node: SvgNode, conv: &mut Converter) -> Result<(), Error> {
    let tag_name = match node.tag_name() {
        Some(v) => v,
        None => return Ok(()),
    };

    if !tag_name.is_graphic() && !matches!(tag_name, EId::G | EId::A | EId::Svg) {
        return Ok(());
    }

    if !is_visible_element(node) {
        return Ok(());
    }

    match tag_name {
        EId::G | EId::A | EId::Svg => convert_children(node, conv),
        _ => convert_path(node, tag_name, conv),
    }
}

fn convert_path(node: SvgNode, tag_name: EId, conv: &mut Converter) -> Result<(), Error> {
    let state = conv.state;
    let kind = match DrawableKind::from_node(node, state) {
        Some(v) => v,
        None => return Ok(()),
    };

    let mut attrs = AttributeSet::resolve(node);
    if kind.is_degenerate() {
        attrs.stroke = None;
    }

    let element_id = node.element_id();
    let path = path::parse(&kind.to_path_data()).map_err(|error| Error::MalformedPathData {
        element_id: element_id.to_string(),
        error,
    })?;

    let bbox = match path.bbox() {
        Some(v) => v,
        None => {
            log::warn!("Element '{}' has no path data. Skipped.", tag_name);
            return Ok(());
        }
    };

    let fill = conv.servers.resolve_paint(Some(attrs.fill), &bbox, element_id);
    let stroke = conv.servers.resolve_paint(attrs.stroke, &bbox, element_id);
    let stroke_params = stroke::resolve_stroke(&attrs, &stroke, element_id, state);
    let stroke = if stroke_params.is_some() {
        stroke
    } else {
        PaintObject::Unresolved
    };

    if state.opt.remove_unpainted && !fill.is_present() && !stroke.is_present() {
        log::warn!(
            "Element '{}' has neither fill nor stroke. Skipped.",
            element_id
        );
        return Ok(());
    }

    let fill_color = match &fill {
        PaintObject::SolidColor(c) => *c,
        _ => Color::black(),
    };

    conv.planner.push(&fill, &stroke, stroke_params);
    conv.paths.push(PathRecord {
        id: element_id.to_string(),
        kind: tag_name,
        end_path: !path.closed,
        bbox,
        fill,
        stroke,
        transform: resolve_transform(&attrs.transform, element_id, state),
        fill_rule: FillRule::from_value(attrs.fill_rule),
        fill_color,
        path,
    });

    Ok(())
}

/// Composes all transform lists, outer to inner.
///
/// Returns `None` when there are no transforms.
fn resolve_transform(list: &[&str], element_id: &str, state: &State) -> Option<Transform> {
    if list.is_empty() {
        return None;
    }

    let mut ts = Transform::default();
    for text in list {
        match svgtypes::Transform::from_str(text) {
            Ok(v) => {
                let v = Transform::from_row(
                    v.a as f32, v.b as f32, v.c as f32, v.d as f32, v.e as f32, v.f as f32,
                );
                ts = ts.pre_concat(v);
            }
            Err(_) => {
                log::warn!(
                    "Element '{}' has an invalid transform: '{}'. Ignored.",
                    element_id,
                    text
                );
            }
        }
    }

    // Content is drawn relative to the viewBox origin.
    ts.tx -= state.view_box.x();
    ts.ty -= state.view_box.y();

    Some(ts)
}
