//! Parsing of vision-model replies
//!
//! The model is asked to answer with the requested label field verbatim, or
//! with one of a few fixed sentinel codes when it cannot.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Outcome code carried by a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResponseCode {
    /// No shipping label visible in the image
    NoLabel,
    /// A label was found but without the requested field
    NoField,
    /// The reply carries the field value
    FieldFound,
}

impl ResponseCode {
    /// Every code, in declaration order
    pub const ALL: [ResponseCode; 3] = [Self::NoLabel, Self::NoField, Self::FieldFound];

    /// Literal sentinel text for this code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoLabel => "ERROR:NO-LABEL-FOUND",
            Self::NoField => "ERROR:NO-FIELD-FOUND",
            Self::FieldFound => "ACK:FIELD-FOUND",
        }
    }

    /// Code whose sentinel is exactly `text`
    pub fn from_sentinel(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == text)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed reply: the outcome code and, for [`ResponseCode::FieldFound`], the value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReply {
    /// Outcome
    pub code: ResponseCode,
    /// Field value; empty unless a value was returned
    pub value: String,
}

impl FieldReply {
    /// Field value when one was returned
    pub fn value(&self) -> Option<&str> {
        match self.code {
            ResponseCode::FieldFound if !self.value.is_empty() => Some(&self.value),
            _ => None,
        }
    }
}

/// Replies that fit neither a sentinel nor a plain value
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplyError {
    /// Nothing but whitespace came back
    #[error("empty reply")]
    Empty,
    /// Sentinel-looking text that matches no known code
    #[error("reply looks like a status code but matches none: {0:?}")]
    UnexpectedSentinel(String),
}

/// Parse a raw model reply.
///
/// An exact sentinel maps to its code. Any other text is taken as the field
/// value unless it mentions `ERROR` or `ACK`, which means the model garbled a
/// sentinel.
pub fn parse_reply(text: &str) -> Result<FieldReply, ReplyError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ReplyError::Empty);
    }

    if let Some(code) = ResponseCode::from_sentinel(text) {
        return Ok(FieldReply {
            code,
            value: String::new(),
        });
    }

    if text.contains("ERROR") || text.contains("ACK") {
        return Err(ReplyError::UnexpectedSentinel(text.to_owned()));
    }

    Ok(FieldReply {
        code: ResponseCode::FieldFound,
        value: text.to_owned(),
    })
}
