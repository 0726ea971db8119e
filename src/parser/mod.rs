// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use crate::ast::Node;
use crate::lexer::{classify, Line, LineReader, Payload};
use crate::options::ParseOptions;
use crate::ModeError;

mod document;
mod frame;
pub(crate) mod source;

/// Turns indented text into a [`Node`] tree.
///
/// The top-level node is always a `Map` or a `Sequence`; an empty document
/// yields an empty map.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Parser { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn parse(&self, text: &str) -> Result<Node, ModeError> {
        let reader = LineReader::with_options(text, &self.options);
        let mut builder = document::TreeBuilder::new(&self.options);

        for line in reader.lines() {
            builder.feed(&line?)?;
        }

        let root = builder.finish();
        tracing::debug!(entries = root.len(), "parsed document");
        Ok(root)
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Node, ModeError> {
        let content = source::read_source(path.as_ref())?;
        self.parse(&content)
    }
}

/// Parses `text` with the default, strict options.
pub fn parse(text: &str) -> Result<Node, ModeError> {
    Parser::new().parse(text)
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Node, ModeError> {
    Parser::new().parse_file(path)
}
