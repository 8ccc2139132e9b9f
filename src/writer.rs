// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! C header generation for the VGLite driver.

use std::fmt::{self, Write};

use tiny_skia_path::PathSegment;

use crate::emit::{DrawRecord, FillType, Gradient, PathType};
use crate::paint_server::Stop;
use crate::stroke::StrokeParams;
use crate::style::{FillRule, LineCap, LineJoin};
use crate::tree::Image;
use crate::DataType;

/// Converts a name into a valid C identifier part.
///
/// ASCII punctuation becomes `_` and spaces are removed.
pub fn c_identifier(name: &str) -> String {
    name.chars()
        .filter(|c| *c != ' ')
        .map(|c| if c.is_ascii_punctuation() { '_' } else { c })
        .collect()
}

/// Writes an image as a C header.
pub fn write_header(image: &Image) -> String {
    let mut s = String::new();
    // Writing to a String cannot fail.
    let _ = write_image(image, &mut s);
    s
}

fn write_image(image: &Image, s: &mut String) -> fmt::Result {
    let name = c_identifier(&image.name);

    write_typedefs(image.data_type, s)?;

    let path_names = write_paths(image, &name, s)?;
    write_gradients(image, &name, s)?;

    let has_strokes = image.has_strokes();
    if has_strokes {
        write_strokes(image, &name, s)?;
    }

    write_draw_records(&image.draw_records, &name, s)?;

    let has_gradients = !image.gradients.is_empty();
    if has_gradients {
        write_gradient_refs(image, &name, s)?;
    }

    write_fill_rules(image, &name, s)?;

    writeln!(s, "static gradient_mode_t {}_gradient_info = {{", name)?;
    if has_gradients {
        writeln!(s, "    .linearGrads = {}_lingrad_to_path,", name)?;
        writeln!(s, "    .radialGrads = {}_radgrad_to_path,", name)?;
    } else {
        writeln!(s, "    .linearGrads = NULL,")?;
        writeln!(s, "    .radialGrads = NULL,")?;
    }
    writeln!(s, "    .hybridPath = {}_hybrid_path,", name)?;
    writeln!(s, "    .fillRule = {}_fill_rule", name)?;
    writeln!(s, "}};")?;
    writeln!(s)?;

    write_transforms(image, &name, s)?;

    writeln!(s, "static image_info_t {} = {{", name)?;
    writeln!(s, "    .image_name =\"{}\",", image.name)?;
    writeln!(
        s,
        "    .image_size = {{{}, {}}},",
        image.size.width() as i32,
        image.size.height() as i32
    )?;
    writeln!(s, "    .data_format = {},", image.data_type.vg_format())?;
    writeln!(s, "    .transform = {}_transform_matrix,", name)?;
    writeln!(s, "    .path_count = {},", image.paths.len())?;
    if has_strokes {
        writeln!(s, "    .stroke_info = {}_stroke_info_data,", name)?;
    } else {
        writeln!(s, "    .stroke_info = NULL,")?;
    }
    writeln!(s, "    .paths_info = {{")?;
    let c_type = image.data_type.c_type();
    for (i, (record, path_name)) in image.paths.iter().zip(&path_names).enumerate() {
        let sep = if i + 1 == image.paths.len() { "" } else { "," };
        writeln!(
            s,
            "        {{.path_length = sizeof({n}), .path_data=({t}*){n}, .end_path_flag={f}, \
             .bounding_box = {{{:.2}, {:.2}, {:.2}, {:.2}}} }}{}",
            record.bbox.min_x,
            record.bbox.min_y,
            record.bbox.max_x,
            record.bbox.max_y,
            sep,
            n = path_name,
            t = c_type,
            f = record.end_path as u8,
        )?;
    }
    writeln!(s, "    }},")?;
    writeln!(s, "}};")?;
    writeln!(s)?;

    writeln!(s, "uint32_t {}_color_data[] = {{", name)?;
    for chunk in image.paths.chunks(4) {
        let colors: Vec<String> = chunk
            .iter()
            .map(|p| format!("0x{:08x}", p.fill_color.to_argb()))
            .collect();
        writeln!(s, "    {},", colors.join(", "))?;
    }
    writeln!(s, "}};")?;

    Ok(())
}

fn write_typedefs(data_type: DataType, s: &mut String) -> fmt::Result {
    let t = data_type.c_type();
    let cmd_type = if data_type == DataType::Float {
        "uint32_t"
    } else {
        t
    };

    s.push_str("#ifndef STATIC_PATH_DEFINES_H\n");
    s.push_str("#define STATIC_PATH_DEFINES_H\n\n");
    s.push_str("#include \"vg_lite.h\"\n\n");

    writeln!(s, "typedef union data_mnemonic {{")?;
    writeln!(s, "    {} cmd;", cmd_type)?;
    writeln!(s, "    {} data;", t)?;
    writeln!(s, "}} data_mnemonic_t;")?;
    writeln!(s)?;
    writeln!(s, "typedef struct path_info {{")?;
    writeln!(s, "    uint32_t  path_length;")?;
    writeln!(s, "    {}  *path_data;", t)?;
    writeln!(s, "    float bounding_box[4];")?;
    writeln!(s, "    uint8_t end_path_flag;")?;
    writeln!(s, "}} path_info_t;")?;
    writeln!(s)?;

    s.push_str(
        "\
typedef struct stroke_info {
    uint32_t dashPatternCnt;
    float dashPhase;
    float *dashPattern;
    float strokeWidth;
    float miterlimit;
    uint32_t strokeColor;
    vg_lite_cap_style_t linecap;
    vg_lite_join_style_t linejoin;
} stroke_info_t;

typedef struct image_info {
    char *image_name;
    int  image_size[2];
    vg_lite_format_t data_format;
    float *transform;
    int path_count;
    stroke_info_t *stroke_info;
    path_info_t paths_info[];
} image_info_t;

typedef struct stopValue {
    float offset;
    uint32_t stop_color;
} stopValue_t;

typedef struct linearGradient {
    uint32_t num_stop_points;
    vg_lite_linear_gradient_parameter_t linear_gradient;
    stopValue_t *stops;
} linearGradient_t;

typedef struct radialGradient {
    uint32_t num_stop_points;
    vg_lite_radial_gradient_parameter_t radial_gradient;
    stopValue_t *stops;
} radialGradient_t;

typedef struct hybridPath {
    fill_mode_t fillType;
    vg_lite_draw_path_type_t pathType;
} hybridPath_t;

typedef struct gradient_mode {
    linearGradient_t **linearGrads;
    radialGradient_t **radialGrads;
    hybridPath_t *hybridPath;
    vg_lite_fill_t *fillRule;
} gradient_mode_t;

#endif

",
    );

    Ok(())
}

/// Writes opcode arrays and returns their names.
fn write_paths(image: &Image, name: &str, s: &mut String) -> Result<Vec<String>, fmt::Error> {
    let c_type = image.data_type.c_type();
    let mut names = Vec::with_capacity(image.paths.len());

    for (i, record) in image.paths.iter().enumerate() {
        if !record.id.is_empty() {
            writeln!(s, "/*path id={}*/", record.id)?;
        }

        let path_name = format!("{}_{}_{}_data", name, record.kind, i + 1);
        writeln!(s, "static data_mnemonic_t {}[] = {{", path_name)?;

        for segment in record.path.segments() {
            let (op, points) = match segment {
                PathSegment::MoveTo(p) => ("VLC_OP_MOVE", vec![p]),
                PathSegment::LineTo(p) => ("VLC_OP_LINE", vec![p]),
                PathSegment::QuadTo(p1, p) => ("VLC_OP_QUAD", vec![p1, p]),
                PathSegment::CubicTo(p1, p2, p) => ("VLC_OP_CUBIC", vec![p1, p2, p]),
                // Closing is controlled by the end path flag.
                PathSegment::Close => continue,
            };

            write!(s, "    {{.cmd={}}}, ", op)?;
            for p in points {
                write!(s, "{{.data=({}) {:.2}}},", c_type, p.x)?;
                write!(s, "{{.data=({}) {:.2}}},", c_type, p.y)?;
            }
            writeln!(s)?;
        }

        writeln!(s, "    {{.cmd=VLC_OP_END}}")?;
        writeln!(s, "}};")?;
        writeln!(s)?;

        names.push(path_name);
    }

    Ok(names)
}

fn write_stops(prefix: &str, stops: &[Stop], s: &mut String) -> fmt::Result {
    writeln!(s, "static stopValue_t {}[] = {{", prefix)?;
    let lines: Vec<String> = stops
        .iter()
        .map(|stop| {
            format!(
                "    {{ .offset = {:?}, .stop_color = 0x{:08x} }}",
                stop.offset,
                stop.color.to_argb()
            )
        })
        .collect();
    writeln!(s, "{}", lines.join(",\n"))?;
    writeln!(s, "}};")?;
    writeln!(s)
}

fn write_gradients(image: &Image, name: &str, s: &mut String) -> fmt::Result {
    for (idx, gradient) in image.gradients.iter().enumerate() {
        match gradient {
            Gradient::Linear(lg) => {
                let prefix = format!("linearGrad_{}_{}", name, idx);
                write_stops(&prefix, &lg.stops, s)?;
                writeln!(s, "static linearGradient_t {}_linear_gradients_{}[] = {{", name, idx)?;
                writeln!(s, "    {{")?;
                writeln!(s, "        /*grad id={}*/", lg.id)?;
                writeln!(s, "        .num_stop_points = {},", lg.stops.len())?;
                writeln!(
                    s,
                    "        .linear_gradient = {{{:?}f, {:?}f, {:?}f, {:?}f}},",
                    lg.x1, lg.y1, lg.x2, lg.y2
                )?;
                writeln!(s, "        .stops = {}", prefix)?;
            }
            Gradient::Radial(rg) => {
                let prefix = format!("radialGrad_{}_{}", name, idx);
                write_stops(&prefix, &rg.stops, s)?;
                writeln!(s, "static radialGradient_t {}_radial_gradients_{}[] = {{", name, idx)?;
                writeln!(s, "    {{")?;
                writeln!(s, "        /*grad id={}*/", rg.id)?;
                writeln!(s, "        .num_stop_points = {},", rg.stops.len())?;
                writeln!(
                    s,
                    "        .radial_gradient = {{{:?}f, {:?}f, {:?}f, {:?}f, {:?}f}},",
                    rg.cx, rg.cy, rg.r, rg.fx, rg.fy
                )?;
                writeln!(s, "        .stops = {}", prefix)?;
            }
        }
        writeln!(s, "    }}")?;
        writeln!(s, "}};")?;
        writeln!(s)?;
    }

    Ok(())
}

fn linecap_name(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "VG_LITE_CAP_BUTT",
        LineCap::Round => "VG_LITE_CAP_ROUND",
        LineCap::Square => "VG_LITE_CAP_SQUARE",
    }
}

fn linejoin_name(join: LineJoin) -> &'static str {
    match join {
        LineJoin::Miter => "VG_LITE_JOIN_MITER",
        LineJoin::Round => "VG_LITE_JOIN_ROUND",
        LineJoin::Bevel => "VG_LITE_JOIN_BEVEL",
    }
}

fn write_strokes(image: &Image, name: &str, s: &mut String) -> fmt::Result {
    for (i, stroke) in image.strokes.iter().enumerate() {
        if let Some(list) = stroke.as_ref().and_then(|v| v.dasharray.as_ref()) {
            let values: Vec<String> = list.iter().map(|n| format!("{:?}", n)).collect();
            writeln!(s, "static float {}_dash_pattern_path{}[] = {{", name, i + 1)?;
            writeln!(s, "    {}", values.join(", "))?;
            writeln!(s, "}};")?;
            writeln!(s)?;
        }
    }

    writeln!(s, "static stroke_info_t {}_stroke_info_data[] = {{", name)?;
    for (i, (stroke, record)) in image.strokes.iter().zip(&image.paths).enumerate() {
        writeln!(s, "    {{")?;
        if !record.id.is_empty() {
            writeln!(s, "        /*{} id={}*/", record.kind, record.id)?;
        }
        match stroke {
            Some(params) => write_stroke(params, name, i, s)?,
            None => writeln!(s, "        0")?,
        }
        writeln!(s, "    }},")?;
    }
    writeln!(s, "}};")?;
    writeln!(s)
}

fn write_stroke(params: &StrokeParams, name: &str, idx: usize, s: &mut String) -> fmt::Result {
    match params.dasharray {
        Some(ref list) => {
            writeln!(s, "        .dashPatternCnt = {},", list.len())?;
            writeln!(
                s,
                "        .dashPattern = (float*){}_dash_pattern_path{},",
                name,
                idx + 1
            )?;
        }
        None => {
            writeln!(s, "        .dashPatternCnt = 0,")?;
            writeln!(s, "        .dashPattern = NULL,")?;
        }
    }

    writeln!(s, "        .dashPhase = {:?},", params.dashoffset)?;
    writeln!(s, "        .strokeWidth = {:?},", params.width)?;
    writeln!(s, "        .miterlimit = {:?},", params.miterlimit)?;
    writeln!(s, "        .strokeColor = 0x{:08x},", params.color.to_argb())?;
    writeln!(s, "        .linecap = {},", linecap_name(params.linecap))?;
    writeln!(s, "        .linejoin = {}", linejoin_name(params.linejoin))
}

fn fill_type_name(fill_type: FillType) -> &'static str {
    match fill_type {
        FillType::NoFill => "NO_FILL_MODE",
        FillType::SolidFill => "FILL_CONSTANT",
        FillType::LinearGradientFill => "FILL_LINEAR_GRAD",
        FillType::RadialGradientFill => "FILL_RADIAL_GRAD",
        FillType::Stroke => "STROKE",
    }
}

fn path_type_name(path_type: PathType) -> &'static str {
    match path_type {
        PathType::Zero => "VG_LITE_DRAW_ZERO",
        PathType::FillPath => "VG_LITE_DRAW_FILL_PATH",
        PathType::StrokePath => "VG_LITE_DRAW_STROKE_PATH",
    }
}

fn write_draw_records(records: &[[DrawRecord; 2]], name: &str, s: &mut String) -> fmt::Result {
    writeln!(s, "hybridPath_t {}_hybrid_path[] = {{", name)?;
    for record in records.iter().flatten() {
        writeln!(
            s,
            "    {{ .fillType = {}, .pathType = {} }},",
            fill_type_name(record.fill_type),
            path_type_name(record.path_type)
        )?;
    }
    writeln!(s, "}};")?;
    writeln!(s)
}

fn write_gradient_refs(image: &Image, name: &str, s: &mut String) -> fmt::Result {
    let format_ref = |idx: &Option<usize>, kind: &str| match idx {
        Some(idx) => format!("    &{}_{}_gradients_{}", name, kind, idx),
        None => "    NULL".to_string(),
    };

    let linear: Vec<String> = image
        .linear_refs
        .iter()
        .map(|idx| format_ref(idx, "linear"))
        .collect();
    writeln!(s, "static linearGradient_t *{}_lingrad_to_path[] = {{", name)?;
    writeln!(s, "{}", linear.join(",\n"))?;
    writeln!(s, "}};")?;
    writeln!(s)?;

    let radial: Vec<String> = image
        .radial_refs
        .iter()
        .map(|idx| format_ref(idx, "radial"))
        .collect();
    writeln!(s, "static radialGradient_t *{}_radgrad_to_path[] = {{", name)?;
    writeln!(s, "{}", radial.join(",\n"))?;
    writeln!(s, "}};")?;
    writeln!(s)
}

fn write_fill_rules(image: &Image, name: &str, s: &mut String) -> fmt::Result {
    let rules: Vec<&str> = image
        .paths
        .iter()
        .map(|p| match p.fill_rule {
            FillRule::EvenOdd => "VG_LITE_FILL_EVEN_ODD",
            FillRule::NonZero => "VG_LITE_FILL_NON_ZERO",
        })
        .collect();

    writeln!(s, "static vg_lite_fill_t {}_fill_rule[] = {{", name)?;
    writeln!(s, "{}", rules.join(",\n"))?;
    writeln!(s, "}};")?;
    writeln!(s)
}

fn write_transforms(image: &Image, name: &str, s: &mut String) -> fmt::Result {
    let rows: Vec<String> = image
        .paths
        .iter()
        .map(|p| {
            let values: Vec<String> = p
                .transform_matrix()
                .iter()
                .map(|n| format!("{:?}f", n))
                .collect();
            values.join(", ")
        })
        .collect();

    writeln!(s, "static float {}_transform_matrix[] = {{", name)?;
    writeln!(s, "{}", rows.join(",\n"))?;
    writeln!(s, "}};")?;
    writeln!(s)
}
