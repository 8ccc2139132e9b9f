// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// An SVG Tiny element ID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EId {
    A,
    Circle,
    Defs,
    Ellipse,
    G,
    Image,
    Line,
    LinearGradient,
    Path,
    Polygon,
    Polyline,
    RadialGradient,
    Rect,
    SolidColor,
    Stop,
    Svg,
    Text,
}

impl EId {
    pub fn from_str(text: &str) -> Option<EId> {
        Some(match text {
            "a" => EId::A,
            "circle" => EId::Circle,
            "defs" => EId::Defs,
            "ellipse" => EId::Ellipse,
            "g" => EId::G,
            "image" => EId::Image,
            "line" => EId::Line,
            "linearGradient" => EId::LinearGradient,
            "path" => EId::Path,
            "polygon" => EId::Polygon,
            "polyline" => EId::Polyline,
            "radialGradient" => EId::RadialGradient,
            "rect" => EId::Rect,
            "solidColor" => EId::SolidColor,
            "stop" => EId::Stop,
            "svg" => EId::Svg,
            "text" => EId::Text,
            _ => return None,
        })
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            EId::A => "a",
            EId::Circle => "circle",
            EId::Defs => "defs",
            EId::Ellipse => "ellipse",
            EId::G => "g",
            EId::Image => "image",
            EId::Line => "line",
            EId::LinearGradient => "linearGradient",
            EId::Path => "path",
            EId::Polygon => "polygon",
            EId::Polyline => "polyline",
            EId::RadialGradient => "radialGradient",
            EId::Rect => "rect",
            EId::SolidColor => "solidColor",
            EId::Stop => "stop",
            EId::Svg => "svg",
            EId::Text => "text",
        }
    }
}

impl std::fmt::Display for EId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// An SVG Tiny attribute ID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AId {
    BaseProfile,
    Color,
    Cx,
    Cy,
    D,
    Display,
    Fill,
    FillRule,
    Fx,
    Fy,
    GradientTransform,
    GradientUnits,
    Height,
    Href,
    Id,
    Offset,
    Points,
    R,
    Rx,
    Ry,
    SolidColor,
    StopColor,
    Stroke,
    StrokeDasharray,
    StrokeDashoffset,
    StrokeLinecap,
    StrokeLinejoin,
    StrokeMiterlimit,
    StrokeWidth,
    Style,
    Transform,
    Version,
    ViewBox,
    Width,
    X,
    X1,
    X2,
    Y,
    Y1,
    Y2,
}

impl AId {
    pub fn from_str(text: &str) -> Option<AId> {
        Some(match text {
            "baseProfile" => AId::BaseProfile,
            "color" => AId::Color,
            "cx" => AId::Cx,
            "cy" => AId::Cy,
            "d" => AId::D,
            "display" => AId::Display,
            "fill" => AId::Fill,
            "fill-rule" => AId::FillRule,
            "fx" => AId::Fx,
            "fy" => AId::Fy,
            "gradientTransform" => AId::GradientTransform,
            "gradientUnits" => AId::GradientUnits,
            "height" => AId::Height,
            "href" => AId::Href,
            "id" => AId::Id,
            "offset" => AId::Offset,
            "points" => AId::Points,
            "r" => AId::R,
            "rx" => AId::Rx,
            "ry" => AId::Ry,
            "solid-color" => AId::SolidColor,
            "stop-color" => AId::StopColor,
            "stroke" => AId::Stroke,
            "stroke-dasharray" => AId::StrokeDasharray,
            "stroke-dashoffset" => AId::StrokeDashoffset,
            "stroke-linecap" => AId::StrokeLinecap,
            "stroke-linejoin" => AId::StrokeLinejoin,
            "stroke-miterlimit" => AId::StrokeMiterlimit,
            "stroke-width" => AId::StrokeWidth,
            "style" => AId::Style,
            "transform" => AId::Transform,
            "version" => AId::Version,
            "viewBox" => AId::ViewBox,
            "width" => AId::Width,
            "x" => AId::X,
            "x1" => AId::X1,
            "x2" => AId::X2,
            "y" => AId::Y,
            "y1" => AId::Y1,
            "y2" => AId::Y2,
            _ => return None,
        })
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            AId::BaseProfile => "baseProfile",
            AId::Color => "color",
            AId::Cx => "cx",
            AId::Cy => "cy",
            AId::D => "d",
            AId::Display => "display",
            AId::Fill => "fill",
            AId::FillRule => "fill-rule",
            AId::Fx => "fx",
            AId::Fy => "fy",
            AId::GradientTransform => "gradientTransform",
            AId::GradientUnits => "gradientUnits",
            AId::Height => "height",
            AId::Href => "href",
            AId::Id => "id",
            AId::Offset => "offset",
            AId::Points => "points",
            AId::R => "r",
            AId::Rx => "rx",
            AId::Ry => "ry",
            AId::SolidColor => "solid-color",
            AId::StopColor => "stop-color",
            AId::Stroke => "stroke",
            AId::StrokeDasharray => "stroke-dasharray",
            AId::StrokeDashoffset => "stroke-dashoffset",
            AId::StrokeLinecap => "stroke-linecap",
            AId::StrokeLinejoin => "stroke-linejoin",
            AId::StrokeMiterlimit => "stroke-miterlimit",
            AId::StrokeWidth => "stroke-width",
            AId::Style => "style",
            AId::Transform => "transform",
            AId::Version => "version",
            AId::ViewBox => "viewBox",
            AId::Width => "width",
            AId::X => "x",
            AId::X1 => "x1",
            AId::X2 => "x2",
            AId::Y => "y",
            AId::Y1 => "y1",
            AId::Y2 => "y2",
        }
    }
}

impl std::fmt::Display for AId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
