//! Request/response body encoding negotiation.

use std::fmt;

/// Body encoding selector.
///
/// On the request side, `Json` serializes the body and sets the
/// `content-type` header; everything else passes the body through
/// unchanged. On the response side the selector picks the decode step:
/// `Text` and `Json` buffer and parse, `Binary` buffers raw bytes, and
/// `Raw` hands back the live, unbuffered transport response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8 text (the default on both sides).
    #[default]
    Text,
    /// JSON-serialized body / JSON-parsed response.
    Json,
    /// The live transport response, unbuffered.
    Raw,
    /// Buffered raw bytes.
    Binary,
}

impl Encoding {
    /// Resolve a selector by name. Unrecognized names fall back to
    /// [`Encoding::Binary`], the buffered-bytes default.
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => Encoding::Text,
            "json" => Encoding::Json,
            "raw" => Encoding::Raw,
            _ => Encoding::Binary,
        }
    }

    /// The canonical selector name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Text => "text",
            Encoding::Json => "json",
            Encoding::Raw => "raw",
            Encoding::Binary => "binary",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent request/response encoding selectors.
///
/// A bare [`Encoding`] converts into a spec that applies it to both
/// sides; a `(req, res)` pair sets them independently. Unset sides
/// default to [`Encoding::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodingSpec {
    /// Encoding applied to the outgoing body.
    pub req: Encoding,
    /// Encoding applied to the incoming body.
    pub res: Encoding,
}

impl EncodingSpec {
    /// Build a spec with independent request and response selectors.
    pub fn new(req: Encoding, res: Encoding) -> Self {
        Self { req, res }
    }
}

impl From<Encoding> for EncodingSpec {
    fn from(encoding: Encoding) -> Self {
        Self {
            req: encoding,
            res: encoding,
        }
    }
}

impl From<(Encoding, Encoding)> for EncodingSpec {
    fn from((req, res): (Encoding, Encoding)) -> Self {
        Self { req, res }
    }
}
