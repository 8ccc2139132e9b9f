// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Path data grammar.
//!
//! Path data is processed in two passes: [`tokenize`] splits the text into
//! command letters and numbers, [`normalize`] expands implicit repetitions
//! and converts everything into absolute coordinates.

use std::fmt::Write;

use tiny_skia_path::{PathSegment, Point};

use crate::PathError;

/// A path data token.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Token {
    /// A single letter. Not necessarily a valid command.
    Command(char),
    /// A number.
    Number(f32),
}

/// An absolute path command.
///
/// Each command stores exactly as many coordinates as its arity.
/// Even indices are always X coordinates and odd indices are always Y coordinates.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathCommand {
    MoveTo([f32; 2]),
    LineTo([f32; 2]),
    /// `x1 y1 x2 y2 x y`
    CubicCurveTo([f32; 6]),
    /// `x1 y1 x y`
    QuadCurveTo([f32; 4]),
    /// `x2 y2 x y`
    SmoothCubicTo([f32; 4]),
    SmoothQuadTo([f32; 2]),
    /// `x y`, where `y` is the current point's Y.
    HorizontalLineTo([f32; 2]),
    /// `x y`, where `x` is the current point's X.
    VerticalLineTo([f32; 2]),
    ClosePath,
}

impl PathCommand {
    /// Returns command's coordinates.
    pub fn coords(&self) -> &[f32] {
        match self {
            PathCommand::MoveTo(c) => c,
            PathCommand::LineTo(c) => c,
            PathCommand::CubicCurveTo(c) => c,
            PathCommand::QuadCurveTo(c) => c,
            PathCommand::SmoothCubicTo(c) => c,
            PathCommand::SmoothQuadTo(c) => c,
            PathCommand::HorizontalLineTo(c) => c,
            PathCommand::VerticalLineTo(c) => c,
            PathCommand::ClosePath => &[],
        }
    }

    /// Returns the absolute command letter.
    pub fn letter(&self) -> char {
        match self {
            PathCommand::MoveTo(_) => 'M',
            PathCommand::LineTo(_) => 'L',
            PathCommand::CubicCurveTo(_) => 'C',
            PathCommand::QuadCurveTo(_) => 'Q',
            PathCommand::SmoothCubicTo(_) => 'S',
            PathCommand::SmoothQuadTo(_) => 'T',
            PathCommand::HorizontalLineTo(_) => 'H',
            PathCommand::VerticalLineTo(_) => 'V',
            PathCommand::ClosePath => 'Z',
        }
    }

    /// Returns the number of stored coordinates.
    #[inline]
    pub fn arity(&self) -> usize {
        self.coords().len()
    }

    /// Returns the end point of the command, if any.
    fn end_point(&self) -> Option<(f32, f32)> {
        let c = self.coords();
        if c.len() >= 2 {
            Some((c[c.len() - 2], c[c.len() - 1]))
        } else {
            None
        }
    }
}

/// Returns the number of arguments a command letter consumes in path data.
fn grammar_arity(cmd: char) -> Option<usize> {
    match cmd.to_ascii_lowercase() {
        'm' | 'l' | 't' => Some(2),
        'h' | 'v' => Some(1),
        'c' => Some(6),
        's' | 'q' => Some(4),
        'z' => Some(0),
        _ => None,
    }
}

/// An axis-aligned bounding box.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BBox {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl BBox {
    /// Returns the box width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the box height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// A path in absolute coordinates with all implicit commands expanded.
#[derive(Clone, PartialEq, Debug)]
pub struct NormalizedPath {
    /// The list of commands.
    pub commands: Vec<PathCommand>,
    /// Whether the path data contained a close path command.
    pub closed: bool,
}

impl NormalizedPath {
    /// Calculates the bounding box of all stored coordinates.
    ///
    /// Control points are included.
    /// Returns `None` when the path has no coordinates.
    pub fn bbox(&self) -> Option<BBox> {
        let mut bbox: Option<BBox> = None;
        for cmd in &self.commands {
            for pair in cmd.coords().chunks(2) {
                let (x, y) = (pair[0], pair[1]);
                bbox = Some(match bbox {
                    Some(b) => BBox {
                        min_x: b.min_x.min(x),
                        max_x: b.max_x.max(x),
                        min_y: b.min_y.min(y),
                        max_y: b.max_y.max(y),
                    },
                    None => BBox {
                        min_x: x,
                        max_x: x,
                        min_y: y,
                        max_y: y,
                    },
                });
            }
        }

        bbox
    }

    /// Writes the path back to path data.
    ///
    /// Parsing the result produces the same path.
    pub fn to_path_data(&self) -> String {
        let mut s = String::new();
        for cmd in &self.commands {
            if !s.is_empty() {
                s.push(' ');
            }

            s.push(cmd.letter());

            let coords = match cmd {
                PathCommand::HorizontalLineTo(c) => &c[..1],
                PathCommand::VerticalLineTo(c) => &c[1..],
                _ => cmd.coords(),
            };

            for n in coords {
                // Writing to a String cannot fail.
                let _ = write!(s, " {}", n);
            }
        }

        s
    }

    /// Lowers the path into move, line, quad, cubic and close segments.
    ///
    /// Horizontal and vertical lines become lines.
    /// Smooth curves get their first control point reflected.
    pub fn segments(&self) -> Vec<PathSegment> {
        let mut segments = Vec::with_capacity(self.commands.len());

        let mut curr = Point::zero();
        let mut last_cubic_ctrl: Option<Point> = None;
        let mut last_quad_ctrl: Option<Point> = None;

        for cmd in &self.commands {
            let c = cmd.coords();
            let mut cubic_ctrl = None;
            let mut quad_ctrl = None;

            match cmd {
                PathCommand::MoveTo(_) => {
                    segments.push(PathSegment::MoveTo(Point::from_xy(c[0], c[1])));
                }
                PathCommand::LineTo(_)
                | PathCommand::HorizontalLineTo(_)
                | PathCommand::VerticalLineTo(_) => {
                    segments.push(PathSegment::LineTo(Point::from_xy(c[0], c[1])));
                }
                PathCommand::CubicCurveTo(_) => {
                    let p2 = Point::from_xy(c[2], c[3]);
                    segments.push(PathSegment::CubicTo(
                        Point::from_xy(c[0], c[1]),
                        p2,
                        Point::from_xy(c[4], c[5]),
                    ));
                    cubic_ctrl = Some(p2);
                }
                PathCommand::SmoothCubicTo(_) => {
                    let p1 = reflect(last_cubic_ctrl, curr);
                    let p2 = Point::from_xy(c[0], c[1]);
                    segments.push(PathSegment::CubicTo(p1, p2, Point::from_xy(c[2], c[3])));
                    cubic_ctrl = Some(p2);
                }
                PathCommand::QuadCurveTo(_) => {
                    let p1 = Point::from_xy(c[0], c[1]);
                    segments.push(PathSegment::QuadTo(p1, Point::from_xy(c[2], c[3])));
                    quad_ctrl = Some(p1);
                }
                PathCommand::SmoothQuadTo(_) => {
                    let p1 = reflect(last_quad_ctrl, curr);
                    segments.push(PathSegment::QuadTo(p1, Point::from_xy(c[0], c[1])));
                    quad_ctrl = Some(p1);
                }
                PathCommand::ClosePath => {
                    segments.push(PathSegment::Close);
                }
            }

            curr = match cmd.end_point() {
                Some((x, y)) => Point::from_xy(x, y),
                None => subpath_start(&segments).unwrap_or(curr),
            };
            last_cubic_ctrl = cubic_ctrl;
            last_quad_ctrl = quad_ctrl;
        }

        segments
    }
}

fn reflect(ctrl: Option<Point>, curr: Point) -> Point {
    match ctrl {
        Some(p) => Point::from_xy(curr.x * 2.0 - p.x, curr.y * 2.0 - p.y),
        None => curr,
    }
}

fn subpath_start(segments: &[PathSegment]) -> Option<Point> {
    segments.iter().rev().find_map(|seg| match seg {
        PathSegment::MoveTo(p) => Some(*p),
        _ => None,
    })
}

/// Parses path data into a [`NormalizedPath`].
pub fn parse(text: &str) -> Result<NormalizedPath, PathError> {
    let tokens = tokenize(text)?;
    normalize(&tokens)
}

/// Splits path data into tokens.
///
/// Commas and whitespaces are separators. Numbers can also be separated
/// by a sign or by a second decimal point, like in `10-5` or `1.5.5`.
pub fn tokenize(text: &str) -> Result<Vec<Token>, PathError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        if c.is_ascii_whitespace() || c == b',' {
            pos += 1;
        } else if c.is_ascii_alphabetic() {
            tokens.push(Token::Command(c as char));
            pos += 1;
        } else if matches!(c, b'0'..=b'9' | b'.' | b'-' | b'+') {
            let index = tokens.len();
            let end = scan_number(bytes, pos).ok_or(PathError::InvalidNumber { index })?;
            let n: f32 = text[pos..end]
                .parse()
                .map_err(|_| PathError::InvalidNumber { index })?;
            if !n.is_finite() {
                return Err(PathError::InvalidNumber { index });
            }

            tokens.push(Token::Number(n));
            pos = end;
        } else {
            return Err(PathError::InvalidNumber {
                index: tokens.len(),
            });
        }
    }

    Ok(tokens)
}

// Returns the end position of a number that starts at `start`.
fn scan_number(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;

    if matches!(bytes.get(pos), Some(b'-') | Some(b'+')) {
        pos += 1;
    }

    let mut digits = 0;
    while let Some(b'0'..=b'9') = bytes.get(pos) {
        pos += 1;
        digits += 1;
    }

    if let Some(b'.') = bytes.get(pos) {
        pos += 1;
        while let Some(b'0'..=b'9') = bytes.get(pos) {
            pos += 1;
            digits += 1;
        }
    }

    if digits == 0 {
        return None;
    }

    // An exponent is consumed only when it is followed by digits.
    if let Some(b'e') | Some(b'E') = bytes.get(pos) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'-') | Some(b'+')) {
            exp += 1;
        }

        if let Some(b'0'..=b'9') = bytes.get(exp) {
            pos = exp;
            while let Some(b'0'..=b'9') = bytes.get(pos) {
                pos += 1;
            }
        }
    }

    Some(pos)
}

/// Converts tokens into a list of absolute commands.
pub fn normalize(tokens: &[Token]) -> Result<NormalizedPath, PathError> {
    let mut commands = Vec::new();
    let mut closed = false;

    // The command that will consume the next group of numbers.
    let mut curr_cmd: Option<char> = None;
    let mut curr = (0.0f32, 0.0f32);
    let mut start = (0.0f32, 0.0f32);

    let mut idx = 0;
    while idx < tokens.len() {
        let cmd = match tokens[idx] {
            Token::Command(c) => {
                if c == 'A' || c == 'a' {
                    return Err(PathError::UnsupportedCommand {
                        command: c,
                        index: idx,
                    });
                }

                if grammar_arity(c).is_none() {
                    return Err(PathError::UnknownCommand {
                        command: c,
                        index: idx,
                    });
                }

                idx += 1;
                c
            }
            Token::Number(_) => match curr_cmd {
                Some(c) if c != 'Z' && c != 'z' => c,
                _ => return Err(PathError::UnexpectedNumber { index: idx }),
            },
        };

        if cmd == 'Z' || cmd == 'z' {
            commands.push(PathCommand::ClosePath);
            closed = true;
            curr = start;
            curr_cmd = Some(cmd);
            continue;
        }

        let arity = grammar_arity(cmd).unwrap_or(0);
        let mut args = [0.0f32; 6];
        for (i, arg) in args.iter_mut().take(arity).enumerate() {
            match tokens.get(idx + i) {
                Some(Token::Number(n)) => *arg = *n,
                _ => {
                    return Err(PathError::MissingArguments {
                        command: cmd,
                        index: idx + i,
                    })
                }
            }
        }
        idx += arity;

        let (dx, dy) = if cmd.is_ascii_lowercase() {
            curr
        } else {
            (0.0, 0.0)
        };
        let a = args;

        let command = match cmd.to_ascii_uppercase() {
            'M' => PathCommand::MoveTo([a[0] + dx, a[1] + dy]),
            'L' => PathCommand::LineTo([a[0] + dx, a[1] + dy]),
            'T' => PathCommand::SmoothQuadTo([a[0] + dx, a[1] + dy]),
            'H' => PathCommand::HorizontalLineTo([a[0] + dx, curr.1]),
            'V' => PathCommand::VerticalLineTo([curr.0, a[0] + dy]),
            'C' => PathCommand::CubicCurveTo([
                a[0] + dx,
                a[1] + dy,
                a[2] + dx,
                a[3] + dy,
                a[4] + dx,
                a[5] + dy,
            ]),
            'S' => PathCommand::SmoothCubicTo([a[0] + dx, a[1] + dy, a[2] + dx, a[3] + dy]),
            'Q' => PathCommand::QuadCurveTo([a[0] + dx, a[1] + dy, a[2] + dx, a[3] + dy]),
            _ => unreachable!(),
        };

        if let Some(p) = command.end_point() {
            curr = p;
        }

        curr_cmd = Some(match cmd {
            'M' => {
                start = curr;
                'L'
            }
            'm' => {
                start = curr;
                'l'
            }
            c => c,
        });

        commands.push(command);
    }

    Ok(NormalizedPath { commands, closed })
}
