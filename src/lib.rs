// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svg2vg` compiles SVG Tiny 1.2 documents into static path data for the VGLite
vector graphics driver.

A document is reduced to a list of normalized paths with resolved paints,
stroke parameters and transforms, plus the draw record and gradient tables
the driver expects. [`writer::write_header`] turns the result into a C header.

```no_run
let opt = svg2vg::Options::default();
let data = std::fs::read("image.svg").unwrap();
let image = svg2vg::Image::from_data(&data, &opt).unwrap();
println!("{}", svg2vg::writer::write_header(&image));
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::uninlined_format_args)]

#[macro_use]
mod macros;
mod color;
mod converter;
mod emit;
mod error;
mod options;
mod paint_server;
pub mod path;
mod shapes;
mod stroke;
pub mod style;
mod svgtree;
mod tree;
mod units;
pub mod writer;

pub use color::{named_color, parse_color, Color};
pub use emit::{draw_records, DrawRecord, FillType, Gradient, PathType};
pub use error::{Error, PathError};
pub use options::{DataType, Options};
pub use paint_server::{LinearGradient, PaintObject, RadialGradient, Stop, Units};
pub use stroke::StrokeParams;
pub use svgtree::{AId, EId};
pub use tree::{Image, PathRecord, Stats};

pub use roxmltree;
pub use tiny_skia_path::{Size, Transform};

pub(crate) use error::OptionLog;

impl Image {
    /// Parses an `Image` from SVG data.
    ///
    /// Can contain an SVG string or a gzip compressed data.
    pub fn from_data(data: &[u8], opt: &Options) -> Result<Self, Error> {
        if data.starts_with(&[0x1f, 0x8b]) {
            let data = decompress_svgz(data)?;
            let text = std::str::from_utf8(&data).map_err(|_| Error::NotAnUtf8Str)?;
            Self::from_str(text, opt)
        } else {
            let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
            Self::from_str(text, opt)
        }
    }

    /// Parses an `Image` from an SVG string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str, opt: &Options) -> Result<Self, Error> {
        let xml_opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };

        let doc = roxmltree::Document::parse_with_options(text, xml_opt)?;

        Self::from_xmltree(&doc, opt)
    }

    /// Parses an `Image` from a `roxmltree::Document`.
    pub fn from_xmltree(doc: &roxmltree::Document, opt: &Options) -> Result<Self, Error> {
        let doc = svgtree::Document::parse_tree(doc)?;
        converter::convert_doc(&doc, opt)
    }
}

/// Decompresses an SVGZ file.
pub fn decompress_svgz(data: &[u8]) -> Result<Vec<u8>, Error> {
    use std::io::Read;

    let mut decoder = flate2::read::GzDecoder::new(data);
    let mut decoded = Vec::with_capacity(data.len() * 2);
    decoder
        .read_to_end(&mut decoded)
        .map_err(|_| Error::MalformedGZip)?;
    Ok(decoded)
}
