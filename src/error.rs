use thiserror::Error;

/// Errors raised while picking a detection
#[derive(Debug, Error, PartialEq)]
pub enum SelectError {
    /// A boundary with fewer than three vertices reached the selector
    #[error("detection {index} has a malformed polygon with {vertices} vertices (need at least 3)")]
    MalformedPolygon {
        /// Position of the offending detection in the input
        index: usize,
        /// Vertex count it carried
        vertices: usize,
    },

    /// A boundary encloses a NaN or infinite area
    #[error("detection {index} has a non-finite area")]
    NonFiniteArea {
        /// Position of the offending detection in the input
        index: usize,
    },

    /// The winning payload is not valid UTF-8
    #[error("payload of detection {index} is not valid UTF-8: {source}")]
    Decode {
        /// Position of the winning detection in the input
        index: usize,
        /// Underlying decode failure
        #[source]
        source: std::str::Utf8Error,
    },
}
