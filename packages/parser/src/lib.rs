pub mod tokenizer;
pub mod parser;
pub mod program;
pub mod error;
pub mod serializer;

pub use tokenizer::{CommandTokens, Line, Token, classify_line, tokenize_command};
pub use parser::{Parser, Section, parse, parse_file, section_size};
pub use program::{
    Command, Implementation, ImplementationSet, Operation, Program, StructureKind, Value,
    ValueType,
};
pub use serializer::{Serializer, serialize};
pub use error::{ParseError, ParseResult};
