// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tiny_skia_path::Size;

/// Storage type of the emitted path coordinates.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DataType {
    Int8,
    Int16,
    Int32,
    Float,
}

impl_enum_default!(DataType, Int32);

impl DataType {
    /// Returns the C type name.
    pub fn c_type(&self) -> &'static str {
        match self {
            DataType::Int8 => "int8_t",
            DataType::Int16 => "int16_t",
            DataType::Int32 => "int32_t",
            DataType::Float => "float",
        }
    }

    /// Returns the matching `vg_lite_format_t` constant.
    pub fn vg_format(&self) -> &'static str {
        match self {
            DataType::Int8 => "VG_LITE_S8",
            DataType::Int16 => "VG_LITE_S16",
            DataType::Int32 => "VG_LITE_S32",
            DataType::Float => "VG_LITE_FP32",
        }
    }
}

impl std::str::FromStr for DataType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int8_t" | "int8" => Ok(DataType::Int8),
            "int16_t" | "int16" => Ok(DataType::Int16),
            "int32_t" | "int32" => Ok(DataType::Int32),
            "float" => Ok(DataType::Float),
            _ => Err("invalid data type"),
        }
    }
}

/// Processing options.
#[derive(Clone, Debug)]
pub struct Options {
    /// The image name.
    ///
    /// Used as a prefix for all emitted identifiers.
    /// Punctuation is replaced with `_` and spaces are removed.
    ///
    /// Default: `image`
    pub image_name: String,

    /// Storage type of the emitted path coordinates.
    ///
    /// Default: `int32_t`
    pub data_type: DataType,

    /// Target DPI.
    ///
    /// Impacts units conversion.
    ///
    /// Default: 96.0
    pub dpi: f32,

    /// Default viewport size to assume if there is no `viewBox` attribute and
    /// the `width` or `height` attributes are relative.
    ///
    /// Default: `(100, 100)`
    pub default_size: Size,

    /// Drops elements that have neither a fill nor a stroke.
    ///
    /// Such elements produce two empty draw records otherwise.
    ///
    /// Default: false
    pub remove_unpainted: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            image_name: "image".to_string(),
            data_type: DataType::default(),
            dpi: 96.0,
            default_size: Size::from_wh(100.0, 100.0).unwrap(),
            remove_unpainted: false,
        }
    }
}
