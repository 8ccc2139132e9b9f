use svg2vg::{
    Color, DrawRecord, Error, FillType, Gradient, Image, Options, PaintObject, PathError,
    PathType, Size,
};

fn compile(body: &str) -> Image {
    compile_with(body, &Options::default()).unwrap()
}

fn compile_with(body: &str, opt: &Options) -> Result<Image, Error> {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink' \
              version='1.2' baseProfile='tiny' width='200' height='200'>{}</svg>",
        body
    );
    Image::from_str(&svg, opt)
}

fn red() -> Color {
    Color::new_rgb(255, 0, 0)
}

#[test]
fn single_rect() {
    let image = compile("<rect width='10' height='10' fill='#ff0000'/>");
    assert_eq!(image.paths.len(), 1);
    assert_eq!(
        image.draw_records[0],
        [
            DrawRecord {
                fill_type: FillType::SolidFill,
                path_type: PathType::FillPath
            },
            DrawRecord::EMPTY
        ]
    );

    let path = &image.paths[0];
    assert_eq!(path.fill, PaintObject::SolidColor(red()));
    assert_eq!(path.stroke, PaintObject::Unresolved);
    assert_eq!(path.end_path, false);
    assert_eq!((path.bbox.min_x, path.bbox.min_y), (0.0, 0.0));
    assert_eq!((path.bbox.max_x, path.bbox.max_y), (10.0, 10.0));
    assert_eq!(image.strokes, vec![None]);
    assert_eq!(image.linear_refs, vec![None]);
    assert_eq!(image.radial_refs, vec![None]);
}

#[test]
fn missing_paint_reference_is_none() {
    let missing = compile("<path d='M 0 0 L 10 10' fill='url(#missingId)' stroke='red'/>");
    let none = compile("<path d='M 0 0 L 10 10' fill='none' stroke='red'/>");
    assert_eq!(missing.draw_records, none.draw_records);
    assert_eq!(missing.paths[0].fill, PaintObject::Unresolved);
}

#[test]
fn default_fill_is_black() {
    let image = compile("<path d='M 0 0 L 10 10'/>");
    assert_eq!(image.paths[0].fill, PaintObject::SolidColor(Color::black()));
    assert_eq!(image.paths[0].end_path, true);
}

#[test]
fn inherited_fill() {
    let image = compile("<g fill='red'><g><path d='M 0 0 L 10 10'/></g></g>");
    assert_eq!(image.paths[0].fill, PaintObject::SolidColor(red()));
}

#[test]
fn inherit_keyword() {
    let image = compile(
        "<g fill='blue'><g fill='inherit'><path d='M 0 0 L 10 10'/></g></g>",
    );
    assert_eq!(
        image.paths[0].fill,
        PaintObject::SolidColor(Color::new_rgb(0, 0, 255))
    );
}

#[test]
fn style_wins_over_attribute() {
    let image = compile("<rect width='10' height='10' fill='red' style='fill:#0000ff'/>");
    assert_eq!(
        image.paths[0].fill,
        PaintObject::SolidColor(Color::new_rgb(0, 0, 255))
    );
}

#[test]
fn current_color() {
    let image = compile("<g color='green'><rect width='10' height='10' fill='currentColor'/></g>");
    assert_eq!(
        image.paths[0].fill,
        PaintObject::SolidColor(Color::new_rgb(0, 128, 0))
    );
}

#[test]
fn hidden_and_non_drawable_elements_are_skipped() {
    let image = compile(
        "<defs><rect id='r1' width='10' height='10'/></defs>
         <g display='none'><rect width='10' height='10'/></g>
         <text>Text</text>
         <rect id='r2' width='10' height='10'/>",
    );
    assert_eq!(image.paths.len(), 1);
    assert_eq!(image.paths[0].id, "r2");
}

#[test]
fn document_order() {
    let image = compile(
        "<rect id='a' width='10' height='10'/>
         <g><circle id='b' r='5'/><a><line id='c' x2='10'/></a></g>
         <polygon id='d' points='0 0 10 0 10 10'/>",
    );
    let ids: Vec<&str> = image.paths.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
    assert_eq!(image.draw_records.len(), 4);
    assert_eq!(image.strokes.len(), 4);
}

#[test]
fn linear_gradient_in_bbox_units() {
    let image = compile(
        "<linearGradient id='lg1' x1='0' y1='0' x2='1' y2='0'>
             <stop offset='0' stop-color='red'/>
             <stop offset='1' stop-color='blue'/>
         </linearGradient>
         <path d='M 0 0 L 100 50' fill='url(#lg1)'/>",
    );

    match image.paths[0].fill {
        PaintObject::LinearGradient(ref lg) => {
            assert_eq!((lg.x1, lg.y1, lg.x2, lg.y2), (0.0, 0.0, 100.0, 0.0));
        }
        ref v => panic!("unexpected paint: {:?}", v),
    }

    assert_eq!(image.gradients.len(), 1);
    assert_eq!(image.linear_refs, vec![Some(0)]);
    assert_eq!(image.radial_refs, vec![None]);
    assert_eq!(
        image.draw_records[0][0],
        DrawRecord {
            fill_type: FillType::LinearGradientFill,
            path_type: PathType::FillPath
        }
    );
}

#[test]
fn gradient_index_reuse() {
    let image = compile(
        "<linearGradient id='lg1'><stop offset='0' stop-color='red'/></linearGradient>
         <radialGradient id='rg1'><stop offset='0' stop-color='red'/></radialGradient>
         <rect width='10' height='10' fill='url(#lg1)'/>
         <rect width='10' height='10' fill='url(#rg1)'/>
         <rect width='10' height='10' fill='url(#lg1)'/>",
    );

    assert_eq!(image.gradients.len(), 2);
    assert_eq!(image.linear_refs, vec![Some(0), None, Some(0)]);
    assert_eq!(image.radial_refs, vec![None, Some(1), None]);
}

#[test]
fn gradient_in_bbox_units_per_path() {
    let image = compile(
        "<linearGradient id='lg1'><stop offset='0' stop-color='red'/></linearGradient>
         <rect width='10' height='10' fill='url(#lg1)'/>
         <rect x='100' width='50' height='10' fill='url(#lg1)'/>",
    );

    assert_eq!(image.gradients.len(), 2);
    assert_eq!(image.linear_refs, vec![Some(0), Some(1)]);

    match (&image.gradients[0], &image.gradients[1]) {
        (Gradient::Linear(a), Gradient::Linear(b)) => {
            assert_eq!((a.x1, a.x2), (0.0, 10.0));
            assert_eq!((b.x1, b.x2), (100.0, 150.0));
        }
        v => panic!("unexpected gradients: {:?}", v),
    }

    let header = svg2vg::writer::write_header(&image);
    assert!(header.contains("{100.0f, 0.0f, 150.0f, 0.0f}"));
}

#[test]
fn gradient_in_user_space_is_shared() {
    let image = compile(
        "<linearGradient id='lg1' gradientUnits='userSpaceOnUse' x2='200'>
             <stop offset='0' stop-color='red'/>
         </linearGradient>
         <rect width='10' height='10' fill='url(#lg1)'/>
         <rect x='100' width='50' height='10' fill='url(#lg1)'/>",
    );

    assert_eq!(image.gradients.len(), 1);
    assert_eq!(image.linear_refs, vec![Some(0), Some(0)]);
}

#[test]
fn empty_gradient_is_none() {
    let image = compile(
        "<linearGradient id='lg1'/>
         <rect width='10' height='10' fill='url(#lg1)'/>",
    );
    assert_eq!(image.paths[0].fill, PaintObject::Unresolved);
    assert_eq!(
        image.draw_records[0],
        [DrawRecord::EMPTY, DrawRecord::EMPTY]
    );
    assert!(image.gradients.is_empty());
}

#[test]
fn gradient_stroke_with_solid_fill() {
    let image = compile(
        "<radialGradient id='rg1'><stop offset='0' stop-color='red'/></radialGradient>
         <rect width='10' height='10' fill='red' stroke='url(#rg1)'/>",
    );
    assert_eq!(
        image.draw_records[0],
        [
            DrawRecord {
                fill_type: FillType::RadialGradientFill,
                path_type: PathType::StrokePath
            },
            DrawRecord {
                fill_type: FillType::SolidFill,
                path_type: PathType::FillPath
            }
        ]
    );
    assert_eq!(image.radial_refs, vec![Some(0)]);
    assert_eq!(image.strokes[0].as_ref().map(|s| s.color), Some(Color::black()));
}

#[test]
fn solid_color_reference() {
    let image = compile(
        "<solidColor id='sc1' solid-color='#00ff00'/>
         <rect width='10' height='10' fill='url(#sc1)'/>",
    );
    assert_eq!(
        image.paths[0].fill,
        PaintObject::SolidColor(Color::new_rgb(0, 255, 0))
    );
}

#[test]
fn stroke_parameters() {
    let image = compile(
        "<path d='M 0 0 L 10 10' fill='none' stroke='red' stroke-width='2'
               stroke-dasharray='1 2 3' stroke-linecap='round'/>",
    );

    let stroke = image.strokes[0].as_ref().unwrap();
    assert_eq!(stroke.width, 2.0);
    assert_eq!(stroke.color, red());
    assert_eq!(stroke.dasharray, Some(vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0]));
    assert_eq!(stroke.linecap, svg2vg::style::LineCap::Round);
    assert_eq!(
        image.draw_records[0],
        [
            DrawRecord {
                fill_type: FillType::Stroke,
                path_type: PathType::StrokePath
            },
            DrawRecord::EMPTY
        ]
    );
}

#[test]
fn degenerate_shape_is_not_stroked() {
    let image = compile("<rect width='0' height='10' stroke='red'/>");
    assert_eq!(image.paths[0].stroke, PaintObject::Unresolved);
    assert_eq!(image.strokes, vec![None]);
}

#[test]
fn unpainted_elements() {
    let body = "<rect width='10' height='10' fill='none'/><rect width='10' height='10'/>";

    let image = compile(body);
    assert_eq!(image.paths.len(), 2);
    assert_eq!(
        image.draw_records[0],
        [DrawRecord::EMPTY, DrawRecord::EMPTY]
    );

    let opt = Options {
        remove_unpainted: true,
        ..Options::default()
    };
    let image = compile_with(body, &opt).unwrap();
    assert_eq!(image.paths.len(), 1);
}

#[test]
fn nested_transforms() {
    let image = compile(
        "<g transform='translate(10 20)'><rect width='10' height='10' transform='scale(2)'/></g>
         <rect width='10' height='10'/>",
    );
    assert_eq!(
        image.paths[0].transform_matrix(),
        [2.0, 0.0, 10.0, 0.0, 2.0, 20.0, 0.0, 0.0, 1.0]
    );
    assert_eq!(image.paths[1].transform, None);
    assert_eq!(
        image.paths[1].transform_matrix(),
        [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
    );
}

#[test]
fn transform_is_relative_to_view_box() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' version='1.2' baseProfile='tiny' viewBox='5 5 100 100'>
        <rect width='10' height='10' transform='translate(10 0)'/>
    </svg>";
    let image = Image::from_str(svg, &Options::default()).unwrap();
    let ts = image.paths[0].transform.unwrap();
    assert_eq!((ts.tx, ts.ty), (5.0, -5.0));
}

#[test]
fn fill_rule() {
    let image = compile(
        "<g fill-rule='nonzero'><rect width='10' height='10'/></g>
         <rect width='10' height='10'/>",
    );
    assert_eq!(image.paths[0].fill_rule, svg2vg::style::FillRule::NonZero);
    assert_eq!(image.paths[1].fill_rule, svg2vg::style::FillRule::EvenOdd);
}

#[test]
fn arcs_are_rejected() {
    let result = compile_with("<path id='p1' d='M 0 0 A 5 5 0 0 1 10 10'/>", &Options::default());
    match result {
        Err(Error::MalformedPathData {
            ref element_id,
            error: PathError::UnsupportedCommand { command, .. },
        }) => {
            assert_eq!(element_id, "p1");
            assert_eq!(command, 'A');
        }
        v => panic!("unexpected result: {:?}", v.map(|_| ())),
    }
}

#[test]
fn truncated_path_is_an_error() {
    let result = compile_with("<path d='M 0 0 L 10'/>", &Options::default());
    assert!(matches!(result, Err(Error::MalformedPathData { .. })));
}

#[test]
fn unsupported_profile() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' version='1.1' baseProfile='tiny'/>";
    match Image::from_str(svg, &Options::default()) {
        Err(Error::UnsupportedProfile {
            version,
            base_profile,
        }) => {
            assert_eq!(version.as_deref(), Some("1.1"));
            assert_eq!(base_profile.as_deref(), Some("tiny"));
        }
        v => panic!("unexpected result: {:?}", v.map(|_| ())),
    }

    let svg = "<svg xmlns='http://www.w3.org/2000/svg'/>";
    assert!(matches!(
        Image::from_str(svg, &Options::default()),
        Err(Error::UnsupportedProfile { .. })
    ));
}

#[test]
fn root_element_must_be_svg() {
    let svg = "<g xmlns='http://www.w3.org/2000/svg' version='1.2' baseProfile='tiny'/>";
    match Image::from_str(svg, &Options::default()) {
        Err(Error::UnsupportedProfile {
            version: None,
            base_profile: None,
        }) => {}
        v => panic!("unexpected result: {:?}", v.map(|_| ())),
    }
}

#[test]
fn size_detection() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' version='1.2' baseProfile='tiny' \
               viewBox='0 0 10 20'/>";
    let image = Image::from_str(svg, &Options::default()).unwrap();
    assert_eq!(image.size, Size::from_wh(10.0, 20.0).unwrap());

    let svg = "<svg xmlns='http://www.w3.org/2000/svg' version='1.2' baseProfile='tiny' \
               width='30' height='40' viewBox='0 0 10 20'/>";
    let image = Image::from_str(svg, &Options::default()).unwrap();
    assert_eq!(image.size, Size::from_wh(30.0, 40.0).unwrap());

    let svg = "<svg xmlns='http://www.w3.org/2000/svg' version='1.2' baseProfile='tiny'/>";
    let image = Image::from_str(svg, &Options::default()).unwrap();
    assert_eq!(image.size, Size::from_wh(100.0, 100.0).unwrap());
}

#[test]
fn invalid_size() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' version='1.2' baseProfile='tiny' \
               width='0' height='10'/>";
    assert!(matches!(
        Image::from_str(svg, &Options::default()),
        Err(Error::InvalidSize)
    ));
}

#[test]
fn svgz() {
    use std::io::Write;

    let svg = "<svg xmlns='http://www.w3.org/2000/svg' version='1.2' baseProfile='tiny'>
                   <rect width='10' height='10'/>
               </svg>";
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(svg.as_bytes()).unwrap();
    let data = encoder.finish().unwrap();

    let image = Image::from_data(&data, &Options::default()).unwrap();
    assert_eq!(image.paths.len(), 1);
}

#[test]
fn statistics() {
    let image = compile(
        "<path d='M 0 0 L 10 0 H 20 Q 0 0 5 5 T 10 10 C 0 0 1 1 2 2 Z'/>
         <path d='M 0 0 L 5 5'/>",
    );
    let stats = image.stats();
    assert_eq!(stats.paths, 2);
    assert_eq!(stats.move_to, 2);
    assert_eq!(stats.line_to, 3);
    assert_eq!(stats.quad_to, 2);
    assert_eq!(stats.cubic_to, 1);
}

#[test]
fn header() {
    let image = compile("<rect id='r1' width='10' height='10' fill='#ff0000' stroke='blue'/>");
    let header = svg2vg::writer::write_header(&image);

    assert!(header.starts_with("#ifndef STATIC_PATH_DEFINES_H"));
    assert!(header.contains("    int32_t cmd;"));
    assert!(header.contains("/*path id=r1*/"));
    assert!(header.contains("static data_mnemonic_t image_rect_1_data[] = {"));
    assert!(header.contains(
        "    {.cmd=VLC_OP_MOVE}, {.data=(int32_t) 0.00},{.data=(int32_t) 0.00},"
    ));
    assert!(header.contains("    {.cmd=VLC_OP_END}"));
    assert!(!header.contains("VLC_OP_CLOSE"));
    assert!(header.contains("static stroke_info_t image_stroke_info_data[] = {"));
    assert!(header.contains("        .strokeColor = 0xff0000ff,"));
    assert!(header.contains("    { .fillType = FILL_CONSTANT, .pathType = VG_LITE_DRAW_FILL_PATH },"));
    assert!(header.contains("    { .fillType = STROKE, .pathType = VG_LITE_DRAW_STROKE_PATH },"));
    assert!(header.contains("    .linearGrads = NULL,"));
    assert!(!header.contains("_lingrad_to_path[]"));
    assert!(header.contains("VG_LITE_FILL_EVEN_ODD"));
    assert!(header.contains("    .data_format = VG_LITE_S32,"));
    assert!(header.contains("    .image_size = {200, 200},"));
    assert!(header.contains(".end_path_flag=0, .bounding_box = {0.00, 0.00, 10.00, 10.00}"));
    assert!(header.contains("uint32_t image_color_data[] = {\n    0xffff0000,\n};"));
}

#[test]
fn header_with_gradients() {
    let opt = Options {
        image_name: "my-icon".to_string(),
        data_type: svg2vg::DataType::Float,
        ..Options::default()
    };
    let image = compile_with(
        "<linearGradient id='lg1'><stop offset='0.5' stop-color='red'/></linearGradient>
         <rect width='10' height='10' fill='url(#lg1)'/>
         <rect width='10' height='10'/>",
        &opt,
    )
    .unwrap();
    let header = svg2vg::writer::write_header(&image);

    assert!(header.contains("    uint32_t cmd;"));
    assert!(header.contains("    float data;"));
    assert!(header.contains("static stopValue_t linearGrad_my_icon_0[] = {"));
    assert!(header.contains("    { .offset = 0.5, .stop_color = 0xffff0000 }"));
    assert!(header.contains("static linearGradient_t my_icon_linear_gradients_0[] = {"));
    assert!(header.contains("        .linear_gradient = {0.0f, 0.0f, 10.0f, 0.0f},"));
    assert!(header.contains(
        "static linearGradient_t *my_icon_lingrad_to_path[] = {\n    &my_icon_linear_gradients_0,\n    NULL\n};"
    ));
    assert!(header.contains("    .linearGrads = my_icon_lingrad_to_path,"));
    assert!(header.contains("    .image_name =\"my-icon\","));
    assert!(header.contains("    .stroke_info = NULL,"));
}
