// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use svgtypes::{Length, LengthUnit as Unit};

use crate::converter;
use crate::path::BBox;
use crate::style;
use crate::svgtree::{AId, Document, EId, SvgNode};
use crate::units::convert_length;
use crate::{color, Color, OptionLog};

/// A gradient coordinate system.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Units {
    UserSpaceOnUse,
    ObjectBoundingBox,
}

impl_enum_default!(Units, ObjectBoundingBox);

impl_enum_from_str!(Units,
    "userSpaceOnUse" => Units::UserSpaceOnUse,
    "objectBoundingBox" => Units::ObjectBoundingBox
);

/// A gradient stop.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Stop {
    /// Gradient stop offset.
    ///
    /// `offset` in SVG. Clamped to 0..1 range, order is kept as authored.
    pub offset: f32,

    /// Gradient stop color.
    ///
    /// `stop-color` in SVG.
    pub color: Color,
}

/// A linear gradient resolved for a specific path.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct LinearGradient {
    /// `id` of the gradient element.
    pub id: String,
    /// The authored coordinate system. Coordinates below are always in user space.
    pub units: Units,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    /// Never empty.
    pub stops: Vec<Stop>,
}

/// A radial gradient resolved for a specific path.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct RadialGradient {
    /// `id` of the gradient element.
    pub id: String,
    /// The authored coordinate system. Coordinates below are always in user space.
    pub units: Units,
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    pub fx: f32,
    pub fy: f32,
    /// Never empty.
    pub stops: Vec<Stop>,
}

/// A resolved fill or stroke paint.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum PaintObject {
    SolidColor(Color),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
    /// No paint.
    Unresolved,
}

impl PaintObject {
    /// Checks that there is a paint.
    #[inline]
    pub fn is_present(&self) -> bool {
        !matches!(self, PaintObject::Unresolved)
    }

    /// Checks that this is a linear or a radial gradient.
    #[inline]
    pub fn is_gradient(&self) -> bool {
        matches!(
            self,
            PaintObject::LinearGradient(_) | PaintObject::RadialGradient(_)
        )
    }
}

// Coordinates are fractions in the `ObjectBoundingBox` space
// and user space values otherwise.
struct LinearServer {
    units: Units,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    stops: Vec<Stop>,
}

struct RadialServer {
    units: Units,
    cx: f32,
    cy: f32,
    r: f32,
    fx: Option<f32>,
    fy: Option<f32>,
    stops: Vec<Stop>,
}

/// Paint servers of a document.
pub(crate) struct PaintServers {
    linear: HashMap<String, LinearServer>,
    radial: HashMap<String, RadialServer>,
    solid: HashMap<String, Color>,
}

impl PaintServers {
    /// Collects all gradients and solid colors with an `id`.
    ///
    /// The first element wins on duplicated IDs.
    pub fn collect(doc: &Document, state: &converter::State) -> Self {
        let mut servers = PaintServers {
            linear: HashMap::new(),
            radial: HashMap::new(),
            solid: HashMap::new(),
        };

        for node in doc.descendants() {
            let id = node.element_id();
            if id.is_empty() {
                continue;
            }

            match node.tag_name() {
                Some(EId::LinearGradient) => {
                    if !servers.linear.contains_key(id) {
                        servers
                            .linear
                            .insert(id.to_string(), convert_linear(node, state));
                    }
                }
                Some(EId::RadialGradient) => {
                    if !servers.radial.contains_key(id) {
                        servers
                            .radial
                            .insert(id.to_string(), convert_radial(node, state));
                    }
                }
                Some(EId::SolidColor) => {
                    if !servers.solid.contains_key(id) {
                        servers.solid.insert(id.to_string(), convert_solid(node));
                    }
                }
                _ => {}
            }
        }

        servers
    }

    /// Resolves a `fill` or `stroke` value.
    ///
    /// Never fails. Anything that cannot be used as a paint is [`PaintObject::Unresolved`].
    pub fn resolve_paint(&self, value: Option<&str>, bbox: &BBox, element_id: &str) -> PaintObject {
        let value = match value {
            Some(v) => v.trim(),
            None => return PaintObject::Unresolved,
        };

        if value == "none" {
            return PaintObject::Unresolved;
        }

        if value.starts_with("url(") {
            let id = match svgtypes::FuncIRI::from_str(value) {
                Ok(v) => v.0,
                Err(_) => {
                    log::warn!(
                        "Element '{}' has an invalid paint reference: '{}'.",
                        element_id,
                        value
                    );
                    return PaintObject::Unresolved;
                }
            };

            return self.resolve_link(id, bbox, element_id);
        }

        match color::parse_color(value) {
            Some(c) => PaintObject::SolidColor(c),
            None => {
                log::warn!(
                    "Element '{}' has an unsupported paint: '{}'. Fallback to none.",
                    element_id,
                    value
                );
                PaintObject::Unresolved
            }
        }
    }

    fn resolve_link(&self, id: &str, bbox: &BBox, element_id: &str) -> PaintObject {
        if let Some(lg) = self.linear.get(id) {
            if lg.stops.is_empty() {
                warn_empty_gradient(id, element_id);
                return PaintObject::Unresolved;
            }

            let (x1, y1) = map_point(lg.units, bbox, lg.x1, lg.y1);
            let (x2, y2) = map_point(lg.units, bbox, lg.x2, lg.y2);
            return PaintObject::LinearGradient(LinearGradient {
                id: id.to_string(),
                units: lg.units,
                x1,
                y1,
                x2,
                y2,
                stops: lg.stops.clone(),
            });
        }

        if let Some(rg) = self.radial.get(id) {
            if rg.stops.is_empty() {
                warn_empty_gradient(id, element_id);
                return PaintObject::Unresolved;
            }

            let (cx, cy) = map_point(rg.units, bbox, rg.cx, rg.cy);
            // The focal point defaults to the center.
            let (fx, fy) = map_point(
                rg.units,
                bbox,
                rg.fx.unwrap_or(rg.cx),
                rg.fy.unwrap_or(rg.cy),
            );

            // Use the smaller radius to keep the gradient circular.
            let r = match rg.units {
                Units::ObjectBoundingBox => (bbox.width() * rg.r).min(bbox.height() * rg.r),
                Units::UserSpaceOnUse => rg.r,
            };

            return PaintObject::RadialGradient(RadialGradient {
                id: id.to_string(),
                units: rg.units,
                cx,
                cy,
                r,
                fx,
                fy,
                stops: rg.stops.clone(),
            });
        }

        if let Some(c) = self.solid.get(id) {
            return PaintObject::SolidColor(*c);
        }

        log::warn!(
            "Element '{}' references an unknown paint server '#{}'. Fallback to none.",
            element_id,
            id
        );
        PaintObject::Unresolved
    }
}

fn warn_empty_gradient(id: &str, element_id: &str) {
    log::warn!(
        "Gradient '{}' used by '{}' has no stops. Fallback to none.",
        id,
        element_id
    );
}

fn map_point(units: Units, bbox: &BBox, x: f32, y: f32) -> (f32, f32) {
    match units {
        Units::ObjectBoundingBox => (
            bbox.min_x + bbox.width() * x,
            bbox.min_y + bbox.height() * y,
        ),
        Units::UserSpaceOnUse => (x, y),
    }
}

fn convert_linear(node: SvgNode, state: &converter::State) -> LinearServer {
    let units = convert_units(node);
    warn_transform(node);

    let len = |aid: AId, def: Length| {
        let length = resolve_lg_attr(node, aid).attribute(aid).unwrap_or(def);
        convert_length(length, aid, units, state)
    };

    LinearServer {
        units,
        x1: len(AId::X1, Length::zero()),
        y1: len(AId::Y1, Length::zero()),
        x2: len(AId::X2, Length::new(100.0, Unit::Percent)),
        y2: len(AId::Y2, Length::zero()),
        stops: find_stops(node),
    }
}

fn convert_radial(node: SvgNode, state: &converter::State) -> RadialServer {
    let units = convert_units(node);
    warn_transform(node);

    let len = |aid: AId| -> Option<f32> {
        let length = resolve_rg_attr(node, aid).attribute(aid)?;
        Some(convert_length(length, aid, units, state))
    };

    let half = Length::new(50.0, Unit::Percent);
    let def = |aid: AId| convert_length(half, aid, units, state);

    RadialServer {
        units,
        cx: len(AId::Cx).unwrap_or_else(|| def(AId::Cx)),
        cy: len(AId::Cy).unwrap_or_else(|| def(AId::Cy)),
        r: len(AId::R).unwrap_or_else(|| def(AId::R)),
        fx: len(AId::Fx),
        fy: len(AId::Fy),
        stops: find_stops(node),
    }
}

fn convert_solid(node: SvgNode) -> Color {
    let value = style::resolve_own_color(node, AId::SolidColor);
    color::parse_color(value)
        .log_none(|| {
            log::warn!(
                "Failed to parse solid-color value: '{}'. Fallback to black.",
                value
            )
        })
        .unwrap_or_else(Color::black)
}

fn convert_units(node: SvgNode) -> Units {
    resolve_attr(node, AId::GradientUnits)
        .attribute(AId::GradientUnits)
        .unwrap_or_default()
}

fn warn_transform(node: SvgNode) {
    if resolve_attr(node, AId::GradientTransform).has_attribute(AId::GradientTransform) {
        log::warn!(
            "Gradient '{}' has a 'gradientTransform', which is not supported. Ignored.",
            node.element_id()
        );
    }
}

fn find_stops(node: SvgNode) -> Vec<Stop> {
    match find_gradient_with_stops(node) {
        Some(link) => convert_stops(link),
        None => Vec::new(),
    }
}

fn find_gradient_with_stops<'a, 'input: 'a>(
    node: SvgNode<'a, 'input>,
) -> Option<SvgNode<'a, 'input>> {
    for link in node.href_iter() {
        let tag_name = link.tag_name()?;
        if !tag_name.is_gradient() {
            log::warn!(
                "Gradient '{}' cannot reference '{}' via 'xlink:href'.",
                node.element_id(),
                tag_name
            );
            return None;
        }

        if link.children().any(|n| n.tag_name() == Some(EId::Stop)) {
            return Some(link);
        }
    }

    None
}

fn convert_stops(grad: SvgNode) -> Vec<Stop> {
    let mut stops = Vec::new();
    for stop in grad.children() {
        if stop.tag_name() != Some(EId::Stop) {
            continue;
        }

        // `number` can be either a number or a percentage.
        let offset = match stop.attribute::<Length>(AId::Offset) {
            Some(Length {
                number,
                unit: Unit::None,
            }) => number,
            Some(Length {
                number,
                unit: Unit::Percent,
            }) => number / 100.0,
            Some(_) => {
                log::warn!(
                    "Stop in '{}' has an invalid 'offset' unit. Fallback to 0.",
                    grad.element_id()
                );
                0.0
            }
            None => 0.0,
        };

        let value = style::resolve_own_color(stop, AId::StopColor);
        let color = color::parse_color(value)
            .log_none(|| log::warn!("Failed to parse stop-color value: '{}'.", value))
            .unwrap_or_else(Color::black);

        stops.push(Stop {
            // Clamp before narrowing, huge values would become infinite.
            offset: offset.clamp(0.0, 1.0) as f32,
            color,
        });
    }

    stops
}

fn resolve_attr<'a, 'input: 'a>(node: SvgNode<'a, 'input>, name: AId) -> SvgNode<'a, 'input> {
    if node.has_attribute(name) {
        return node;
    }

    match node.tag_name() {
        Some(EId::LinearGradient) => resolve_lg_attr(node, name),
        Some(EId::RadialGradient) => resolve_rg_attr(node, name),
        _ => node,
    }
}

#[rustfmt::skip]
fn resolve_lg_attr<'a, 'input: 'a>(node: SvgNode<'a, 'input>, name: AId) -> SvgNode<'a, 'input> {
    for link in node.href_iter() {
        let tag_name = match link.tag_name() {
            Some(v) => v,
            None => return node,
        };

        match (name, tag_name) {
            // Coordinates can be resolved only from
            // ref element with the same type.
              (AId::X1, EId::LinearGradient)
            | (AId::Y1, EId::LinearGradient)
            | (AId::X2, EId::LinearGradient)
            | (AId::Y2, EId::LinearGradient)
            // Other attributes can be resolved
            // from any kind of gradient.
            | (AId::GradientUnits, EId::LinearGradient)
            | (AId::GradientUnits, EId::RadialGradient)
            | (AId::GradientTransform, EId::LinearGradient)
            | (AId::GradientTransform, EId::RadialGradient) => {
                if link.has_attribute(name) {
                    return link;
                }
            }
            _ => break,
        }
    }

    node
}

#[rustfmt::skip]
fn resolve_rg_attr<'a, 'input: 'a>(node: SvgNode<'a, 'input>, name: AId) -> SvgNode<'a, 'input> {
    for link in node.href_iter() {
        let tag_name = match link.tag_name() {
            Some(v) => v,
            None => return node,
        };

        match (name, tag_name) {
            // Coordinates can be resolved only from
            // ref element with the same type.
              (AId::Cx, EId::RadialGradient)
            | (AId::Cy, EId::RadialGradient)
            | (AId::R,  EId::RadialGradient)
            | (AId::Fx, EId::RadialGradient)
            | (AId::Fy, EId::RadialGradient)
            // Other attributes can be resolved
            // from any kind of gradient.
            | (AId::GradientUnits, EId::LinearGradient)
            | (AId::GradientUnits, EId::RadialGradient)
            | (AId::GradientTransform, EId::LinearGradient)
            | (AId::GradientTransform, EId::RadialGradient) => {
                if link.has_attribute(name) {
                    return link;
                }
            }
            _ => break,
        }
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svgtree::Document;
    use crate::Options;

    fn bbox() -> BBox {
        BBox {
            min_x: 0.0,
            max_x: 100.0,
            min_y: 0.0,
            max_y: 50.0,
        }
    }

    fn resolve(svg: &str, value: &str) -> PaintObject {
        let xml = roxmltree::Document::parse(svg).unwrap();
        let doc = Document::parse_tree(&xml).unwrap();
        let opt = Options::default();
        let state = converter::State::new(&opt);
        let servers = PaintServers::collect(&doc, &state);
        servers.resolve_paint(Some(value), &bbox(), "test")
    }

    #[test]
    fn solid_color() {
        let svg = "<svg xmlns='http://www.w3.org/2000/svg'/>";
        assert_eq!(
            resolve(svg, "#f00"),
            PaintObject::SolidColor(Color::new_rgb(255, 0, 0))
        );
        assert_eq!(resolve(svg, "none"), PaintObject::Unresolved);
        assert_eq!(resolve(svg, "nonsense"), PaintObject::Unresolved);
    }

    #[test]
    fn missing_reference() {
        let svg = "<svg xmlns='http://www.w3.org/2000/svg'/>";
        assert_eq!(resolve(svg, "url(#missing)"), PaintObject::Unresolved);
    }

    #[test]
    fn linear_bbox_units() {
        let svg = "
        <svg xmlns='http://www.w3.org/2000/svg'>
            <linearGradient id='lg1' x1='0' y1='0' x2='1' y2='0'>
                <stop offset='0' stop-color='red'/>
                <stop offset='1' stop-color='blue'/>
            </linearGradient>
        </svg>";

        match resolve(svg, "url(#lg1)") {
            PaintObject::LinearGradient(lg) => {
                assert_eq!((lg.x1, lg.y1, lg.x2, lg.y2), (0.0, 0.0, 100.0, 0.0));
                assert_eq!(lg.units, Units::ObjectBoundingBox);
                assert_eq!(lg.stops.len(), 2);
                assert_eq!(lg.stops[0].color, Color::new_rgb(255, 0, 0));
                assert_eq!(lg.stops[1].color, Color::new_rgb(0, 0, 255));
            }
            v => panic!("unexpected paint: {:?}", v),
        }
    }

    #[test]
    fn linear_default_coordinates() {
        let svg = "
        <svg xmlns='http://www.w3.org/2000/svg'>
            <linearGradient id='lg1'>
                <stop offset='0.5' stop-color='red'/>
            </linearGradient>
        </svg>";

        match resolve(svg, "url(#lg1)") {
            PaintObject::LinearGradient(lg) => {
                assert_eq!((lg.x1, lg.y1, lg.x2, lg.y2), (0.0, 0.0, 100.0, 0.0));
            }
            v => panic!("unexpected paint: {:?}", v),
        }
    }

    #[test]
    fn linear_user_space() {
        let svg = "
        <svg xmlns='http://www.w3.org/2000/svg'>
            <linearGradient id='lg1' gradientUnits='userSpaceOnUse' x1='5' y1='6' x2='7' y2='8'>
                <stop offset='0' stop-color='red'/>
            </linearGradient>
        </svg>";

        match resolve(svg, "url(#lg1)") {
            PaintObject::LinearGradient(lg) => {
                assert_eq!((lg.x1, lg.y1, lg.x2, lg.y2), (5.0, 6.0, 7.0, 8.0));
                assert_eq!(lg.units, Units::UserSpaceOnUse);
            }
            v => panic!("unexpected paint: {:?}", v),
        }
    }

    #[test]
    fn radial_defaults() {
        let svg = "
        <svg xmlns='http://www.w3.org/2000/svg'>
            <radialGradient id='rg1'>
                <stop offset='0' stop-color='red'/>
            </radialGradient>
        </svg>";

        match resolve(svg, "url(#rg1)") {
            PaintObject::RadialGradient(rg) => {
                assert_eq!((rg.cx, rg.cy), (50.0, 25.0));
                assert_eq!((rg.fx, rg.fy), (50.0, 25.0));
                assert_eq!(rg.r, 25.0);
            }
            v => panic!("unexpected paint: {:?}", v),
        }
    }

    #[test]
    fn radial_focal_point() {
        let svg = "
        <svg xmlns='http://www.w3.org/2000/svg'>
            <radialGradient id='rg1' gradientUnits='userSpaceOnUse' cx='10' cy='20' r='5' fx='12'>
                <stop offset='0' stop-color='red'/>
            </radialGradient>
        </svg>";

        match resolve(svg, "url(#rg1)") {
            PaintObject::RadialGradient(rg) => {
                assert_eq!((rg.cx, rg.cy, rg.r), (10.0, 20.0, 5.0));
                assert_eq!((rg.fx, rg.fy), (12.0, 20.0));
            }
            v => panic!("unexpected paint: {:?}", v),
        }
    }

    #[test]
    fn gradient_without_stops() {
        let svg = "
        <svg xmlns='http://www.w3.org/2000/svg'>
            <linearGradient id='lg1'/>
        </svg>";
        assert_eq!(resolve(svg, "url(#lg1)"), PaintObject::Unresolved);
    }

    #[test]
    fn stops_from_reference() {
        let svg = "
        <svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
            <linearGradient id='lg1'>
                <stop offset='20%' stop-color='#00ff00'/>
                <stop offset='2' stop-color='red'/>
            </linearGradient>
            <linearGradient id='lg2' xlink:href='#lg1' gradientUnits='userSpaceOnUse' x2='10'/>
        </svg>";

        match resolve(svg, "url(#lg2)") {
            PaintObject::LinearGradient(lg) => {
                assert_eq!(lg.x2, 10.0);
                assert_eq!(lg.stops[0].offset, 0.2);
                assert_eq!(lg.stops[0].color, Color::new_rgb(0, 255, 0));
                assert_eq!(lg.stops[1].offset, 1.0);
            }
            v => panic!("unexpected paint: {:?}", v),
        }
    }

    #[test]
    fn huge_stop_offsets_are_clamped() {
        let svg = "
        <svg xmlns='http://www.w3.org/2000/svg'>
            <linearGradient id='lg1'>
                <stop offset='-1e39' stop-color='red'/>
                <stop offset='1e39' stop-color='red'/>
                <stop offset='1e39%' stop-color='red'/>
            </linearGradient>
        </svg>";

        match resolve(svg, "url(#lg1)") {
            PaintObject::LinearGradient(lg) => {
                let offsets: Vec<f32> = lg.stops.iter().map(|s| s.offset).collect();
                assert_eq!(offsets, vec![0.0, 1.0, 1.0]);
            }
            v => panic!("unexpected paint: {:?}", v),
        }
    }

    #[test]
    fn solid_color_element() {
        let svg = "
        <svg xmlns='http://www.w3.org/2000/svg'>
            <solidColor id='sc1' solid-color='#0000ff'/>
        </svg>";
        assert_eq!(
            resolve(svg, "url(#sc1)"),
            PaintObject::SolidColor(Color::new_rgb(0, 0, 255))
        );
    }
}
