pub mod ast;
pub mod config;
pub mod error;
pub mod export;
pub mod lexer;
pub mod options;
pub mod parser;

pub use ast::{Mapping, Node};
pub use config::{load, ModeConfig, ModeGroupRecord, PluginRecord};
pub use error::{ErrorCategory, ModeError};
pub use options::{OverlongLinePolicy, ParseOptions};
pub use parser::{parse, parse_file, Parser};
