//! Content stream operators and the PDF backend that produces them.
//!
//! The reconstructor never touches `lopdf` types directly. Pages are read
//! through [`ContentSource`], and operators arrive as [`Operation`] values
//! with operands already narrowed to the handful of shapes text placement
//! cares about.

use crate::error::Result;
use lopdf::content::Content;
use lopdf::{Document, Object};
use std::fmt;

/// A single operand of a content stream operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Literal or hex string, raw bytes
    String(Vec<u8>),
    Integer(i64),
    Real(f64),
    Array(Vec<Operand>),
    Name(Vec<u8>),
    /// Any other object kind; only its type name is kept.
    Other(&'static str),
}

impl Operand {
    /// Numeric value of an integer or real operand.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Operand::Integer(i) => Some(i as f64),
            Operand::Real(f) => Some(f),
            _ => None,
        }
    }

    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::String(_) => "string",
            Operand::Integer(_) => "integer",
            Operand::Real(_) => "real",
            Operand::Array(_) => "array",
            Operand::Name(_) => "name",
            Operand::Other(kind) => *kind,
        }
    }
}

impl From<&Object> for Operand {
    fn from(object: &Object) -> Self {
        match object {
            Object::String(bytes, _) => Operand::String(bytes.clone()),
            Object::Integer(i) => Operand::Integer(*i),
            Object::Real(f) => Operand::Real(f64::from(*f)),
            Object::Array(items) => Operand::Array(items.iter().map(Operand::from).collect()),
            Object::Name(name) => Operand::Name(name.clone()),
            Object::Null => Operand::Other("null"),
            Object::Boolean(_) => Operand::Other("boolean"),
            Object::Dictionary(_) => Operand::Other("dictionary"),
            Object::Stream(_) => Operand::Other("stream"),
            Object::Reference(_) => Operand::Other("reference"),
        }
    }
}

/// One decoded content stream instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Operator name, e.g. `Tm` or `TJ`
    pub name: String,

    /// Operands in stream order
    pub operands: Vec<Operand>,
}

impl Operation {
    pub fn new(name: impl Into<String>, operands: Vec<Operand>) -> Self {
        Operation {
            name: name.into(),
            operands,
        }
    }
}

impl From<&lopdf::content::Operation> for Operation {
    fn from(op: &lopdf::content::Operation) -> Self {
        Operation {
            name: op.operator.clone(),
            operands: op.operands.iter().map(Operand::from).collect(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<&str> = self.operands.iter().map(Operand::type_name).collect();
        write!(f, "{} [{}]", self.name, kinds.join(", "))
    }
}

/// Page-level access to a PDF's content streams.
///
/// Pages are numbered from 1.
pub trait ContentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> Result<u32>;

    /// Decoded (decompressed) content streams of a page, in order.
    fn content_streams(&self, page: u32) -> Result<Vec<Vec<u8>>>;

    /// Tokenizes content stream bytes into operators.
    fn parse_operations(&self, bytes: &[u8]) -> Result<Vec<Operation>>;
}

/// [`ContentSource`] backed by a loaded `lopdf` document.
pub struct LopdfSource {
    document: Document,
}

impl LopdfSource {
    /// Loads a PDF from an in-memory buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let document = Document::load_mem(bytes)?;
        Ok(LopdfSource { document })
    }

    pub fn new(document: Document) -> Self {
        LopdfSource { document }
    }
}

impl ContentSource for LopdfSource {
    fn page_count(&self) -> Result<u32> {
        Ok(self.document.get_pages().len() as u32)
    }

    fn content_streams(&self, page: u32) -> Result<Vec<Vec<u8>>> {
        let page_id = *self
            .document
            .get_pages()
            .get(&page)
            .ok_or(lopdf::Error::PageNumberNotFound(page))?;

        let mut streams = Vec::new();
        for stream_id in self.document.get_page_contents(page_id) {
            let stream = self.document.get_object(stream_id)?.as_stream()?;
            let bytes = if stream.dict.get(b"Filter").is_ok() {
                stream.decompressed_content()?
            } else {
                stream.content.clone()
            };
            streams.push(bytes);
        }
        Ok(streams)
    }

    fn parse_operations(&self, bytes: &[u8]) -> Result<Vec<Operation>> {
        let content = Content::decode(bytes)?;
        Ok(content.operations.iter().map(Operation::from).collect())
    }
}
