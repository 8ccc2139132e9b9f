// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// Only UTF-8 content are supported.
    NotAnUtf8Str,

    /// Compressed SVG must use the GZip algorithm.
    MalformedGZip,

    /// We do not allow SVG with more than 1_000_000 elements for security reasons.
    ElementsLimitReached,

    /// SVG doesn't have a valid size.
    ///
    /// Occurs when width and/or height are <= 0.
    InvalidSize,

    /// Failed to parse an SVG data.
    ParsingFailed(roxmltree::Error),

    /// The root element must declare `version="1.2"` and `baseProfile="tiny"`.
    UnsupportedProfile {
        /// The declared `version`, if any.
        version: Option<String>,
        /// The declared `baseProfile`, if any.
        base_profile: Option<String>,
    },

    /// An element has invalid geometry data.
    MalformedPathData {
        /// The `id` of the offending element. Can be empty.
        element_id: String,
        /// The underlying grammar error.
        error: PathError,
    },
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        match e {
            roxmltree::Error::NodesLimitReached => Error::ElementsLimitReached,
            e => Error::ParsingFailed(e),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::MalformedGZip => {
                write!(f, "provided data has a malformed GZip content")
            }
            Error::ElementsLimitReached => {
                write!(f, "the maximum number of SVG elements has been reached")
            }
            Error::InvalidSize => {
                write!(f, "SVG has an invalid size")
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "SVG data parsing failed cause {}", e)
            }
            Error::UnsupportedProfile {
                ref version,
                ref base_profile,
            } => {
                write!(
                    f,
                    "SVG version must be 1.2 and baseProfile must be tiny, got '{}' and '{}'",
                    version.as_deref().unwrap_or("none"),
                    base_profile.as_deref().unwrap_or("none")
                )
            }
            Error::MalformedPathData {
                ref element_id,
                ref error,
            } => {
                write!(f, "element '{}' has malformed path data: {}", element_id, error)
            }
        }
    }
}

impl std::error::Error for Error {}

/// A path data grammar error.
///
/// Each variant carries the index of the offending token.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathError {
    /// A valid SVG command that cannot be compiled, i.e. an elliptical arc.
    UnsupportedCommand {
        /// Command letter.
        command: char,
        /// Token index.
        index: usize,
    },

    /// A letter that is not a path command.
    UnknownCommand {
        /// Command letter.
        command: char,
        /// Token index.
        index: usize,
    },

    /// A character sequence that is not a valid number.
    InvalidNumber {
        /// Token index.
        index: usize,
    },

    /// A number without a command that can consume it.
    ///
    /// Occurs for leading numbers and numbers after a close path.
    UnexpectedNumber {
        /// Token index.
        index: usize,
    },

    /// A command without enough arguments.
    MissingArguments {
        /// Command letter.
        command: char,
        /// Index of the token where an argument was expected.
        index: usize,
    },
}

impl PathError {
    /// Returns the index of the offending token.
    pub fn index(&self) -> usize {
        match *self {
            PathError::UnsupportedCommand { index, .. } => index,
            PathError::UnknownCommand { index, .. } => index,
            PathError::InvalidNumber { index } => index,
            PathError::UnexpectedNumber { index } => index,
            PathError::MissingArguments { index, .. } => index,
        }
    }
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            PathError::UnsupportedCommand { command, index } => {
                write!(f, "unsupported command '{}' at token {}", command, index)
            }
            PathError::UnknownCommand { command, index } => {
                write!(f, "unknown command '{}' at token {}", command, index)
            }
            PathError::InvalidNumber { index } => {
                write!(f, "invalid number at token {}", index)
            }
            PathError::UnexpectedNumber { index } => {
                write!(f, "unexpected number at token {}", index)
            }
            PathError::MissingArguments { command, index } => {
                write!(
                    f,
                    "command '{}' has not enough arguments, expected a number at token {}",
                    command, index
                )
            }
        }
    }
}

impl std::error::Error for PathError {}

pub(crate) trait OptionLog {
    fn log_none<F: FnOnce()>(self, f: F) -> Self;
}

impl<T> OptionLog for Option<T> {
    #[inline]
    fn log_none<F: FnOnce()>(self, f: F) -> Self {
        self.or_else(|| {
            f();
            None
        })
    }
}
