use crate::error::{ParseError, ParseResult};
use crate::program::{
    Command, Implementation, Operation, Program, StructureKind, Value, ValueType,
};
use crate::tokenizer::{classify_line, tokenize_command, Line};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// A named block of the input file, from its `[header]` to the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Struct,
    Implem,
    Type,
    Init,
    Bench,
}

impl Section {
    /// Match a header name against the fixed vocabulary, case-sensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "struct" => Some(Section::Struct),
            "implem" => Some(Section::Implem),
            "type" => Some(Section::Type),
            "init" => Some(Section::Init),
            "bench" => Some(Section::Bench),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Struct => "struct",
            Section::Implem => "implem",
            Section::Type => "type",
            Section::Init => "init",
            Section::Bench => "bench",
        }
    }
}

/// Count the content lines inside the first `[section]` block of `source`.
///
/// The scan stops at the header that follows the counted block, so a
/// repeated header later in the file contributes nothing. It shares
/// `classify_line` with the parsing pass, which keeps the two passes in
/// agreement about what counts as content.
pub fn section_size(source: &str, section: Section) -> usize {
    let mut inside = false;
    let mut size = 0;

    for raw in source.lines() {
        match classify_line(raw) {
            Line::Blank | Line::Comment => {}
            Line::Section(name) => {
                if inside {
                    break;
                }
                inside = Section::from_name(name) == Some(section);
            }
            Line::Content(_) => {
                if inside {
                    size += 1;
                }
            }
        }
    }

    size
}

/// Parser for benchmark description files
pub struct Parser<'src> {
    source: &'src str,
    section: Option<Section>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            section: None,
        }
    }

    /// Run the full pass over the source and assemble the program.
    ///
    /// Each run is independent: it starts outside any section, so the
    /// parser can be reused for repeated parses of its source.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        self.section = None;

        let init_size = section_size(self.source, Section::Init);
        let bench_size = section_size(self.source, Section::Bench);
        debug!(init = init_size, bench = bench_size, "Pre-sized command sections");

        let mut program = Program::with_capacity(init_size, bench_size);

        for (index, raw) in self.source.lines().enumerate() {
            let line = index + 1;
            match classify_line(raw) {
                Line::Blank | Line::Comment => {}
                Line::Section(name) => {
                    self.section = Section::from_name(name);
                    trace!(line, name, section = ?self.section, "Entered section");
                }
                Line::Content(text) => self.content_line(&mut program, text, line)?,
            }
        }

        debug!(
            init = program.init_commands.len(),
            bench = program.bench_commands.len(),
            "Parsed program"
        );
        Ok(program)
    }

    fn content_line(&self, program: &mut Program, text: &str, line: usize) -> ParseResult<()> {
        match self.section {
            // Content before the first recognized header is ignored, as
            // is anything under an unrecognized one
            None => {}
            Some(Section::Struct) => program.structure = Some(structure_kind(text)),
            Some(Section::Implem) => program.implementations.insert(implementation_flag(text)),
            Some(Section::Type) => {
                // First line declares the element type, any later line
                // overwrites the key type
                if program.element_type.is_none() {
                    program.element_type = Some(value_type(text));
                } else {
                    program.key_type = Some(value_type(text));
                }
            }
            Some(Section::Init) => {
                let command = build_command(text, line, program.element_type)?;
                program.init_commands.push(command);
            }
            Some(Section::Bench) => {
                let command = build_command(text, line, program.element_type)?;
                program.bench_commands.push(command);
            }
        }
        Ok(())
    }
}

// First-letter rules, as the file format has always defined them

fn structure_kind(text: &str) -> StructureKind {
    if text.starts_with('v') {
        StructureKind::Vector
    } else {
        StructureKind::Map
    }
}

fn implementation_flag(text: &str) -> Implementation {
    if text.starts_with('A') {
        Implementation::Avl
    } else if text.starts_with('R') {
        Implementation::Rrb
    } else {
        Implementation::Finger
    }
}

fn value_type(text: &str) -> ValueType {
    if text.starts_with('i') {
        ValueType::Int
    } else {
        ValueType::Text
    }
}

/// Left-to-right argument consumption for one command, with enough
/// context to say which token was missing
struct Arguments<'src> {
    words: std::vec::IntoIter<&'src str>,
    command: &'src str,
    line: usize,
}

impl<'src> Arguments<'src> {
    fn expect(&mut self, expected: &'static str) -> ParseResult<&'src str> {
        self.words
            .next()
            .ok_or_else(|| ParseError::missing_argument(self.line, self.command, expected))
    }

    fn expect_handle(&mut self, expected: &'static str) -> ParseResult<String> {
        self.expect(expected).map(str::to_string)
    }

    fn expect_index(&mut self) -> ParseResult<i64> {
        let token = self.expect("an index")?;
        token
            .parse()
            .map_err(|_| ParseError::malformed_number(self.line, token))
    }

    fn expect_value(&mut self, element_type: Option<ValueType>) -> ParseResult<Value> {
        let token = self.expect("a value")?;
        match element_type {
            Some(ValueType::Int) => token
                .parse()
                .map(Value::Int)
                .map_err(|_| ParseError::malformed_number(self.line, token)),
            // Without an integer declaration in effect, literals stay text
            _ => Ok(Value::Text(token.to_string())),
        }
    }
}

/// Build one typed command from a content line of `[init]` or `[bench]`.
///
/// Tokens past a command's arity are ignored, which is what lets inline
/// annotations ride at the end of command lines.
fn build_command(text: &str, line: usize, element_type: Option<ValueType>) -> ParseResult<Command> {
    let tokens = tokenize_command(text);
    let mut words = tokens.words.into_iter();

    let Some(name) = words.next() else {
        return Err(ParseError::missing_argument(line, text, "a function name"));
    };
    if tokens.is_assign && tokens.binding.is_none() {
        return Err(ParseError::missing_argument(line, name, "an output name"));
    }

    let mut args = Arguments {
        words,
        command: name,
        line,
    };

    let operation = match name {
        "create" => Operation::Create,
        "update" => Operation::Update {
            handle: args.expect_handle("an object name")?,
            index: args.expect_index()?,
            value: args.expect_value(element_type)?,
        },
        "merge" => Operation::Merge {
            left: args.expect_handle("an object name")?,
            right: args.expect_handle("a second object name")?,
        },
        "push" => Operation::Push {
            handle: args.expect_handle("an object name")?,
            value: args.expect_value(element_type)?,
        },
        "pop" => Operation::Pop {
            handle: args.expect_handle("an object name")?,
        },
        "unref" => Operation::Unref {
            handle: args.expect_handle("an object name")?,
        },
        "lookup" => Operation::Lookup {
            handle: args.expect_handle("an object name")?,
            index: args.expect_index()?,
        },
        "size" => Operation::Size {
            handle: args.expect_handle("an object name")?,
        },
        "dump" => Operation::Dump {
            handle: args.expect_handle("an object name")?,
        },
        "split" => Operation::Split {
            handle: args.expect_handle("an object name")?,
            index: args.expect_index()?,
            first_out: args.expect_handle("an output name")?,
            second_out: args.expect_handle("a second output name")?,
        },
        _ => return Err(ParseError::unknown_operation(line, text)),
    };

    Ok(Command {
        output: tokens.binding.map(str::to_string),
        operation,
    })
}

/// Parse a complete benchmark description from source text
pub fn parse(source: &str) -> ParseResult<Program> {
    Parser::new(source).parse_program()
}

/// Read and parse a benchmark description file
pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<Program> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ParseError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = source.len(), "Read benchmark description");
    parse(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_from_name_is_case_sensitive() {
        assert_eq!(Section::from_name("init"), Some(Section::Init));
        assert_eq!(Section::from_name("INIT"), None);
        assert_eq!(Section::from_name("initial"), None);
        assert_eq!(Section::from_name(""), None);
    }

    #[test]
    fn test_reused_parser_ignores_content_before_first_header() {
        let source = "stray = push(a, 5)\n[bench]\nsize(a)\n";
        let mut parser = Parser::new(source);

        let first = parser.parse_program().unwrap();
        assert_eq!(first.bench_commands.len(), 1);
        assert_eq!(
            first.bench_commands[0].operation,
            Operation::Size {
                handle: "a".to_string()
            }
        );

        let second = parser.parse_program().unwrap();
        assert_eq!(second, first);
    }

    #[test]
    fn test_section_names_round_trip() {
        let sections = [
            Section::Struct,
            Section::Implem,
            Section::Type,
            Section::Init,
            Section::Bench,
        ];
        for section in sections {
            assert_eq!(Section::from_name(section.name()), Some(section));
        }
    }

    #[test]
    fn test_section_size_counts_only_first_block() {
        let source = "[init]\na = create()\nb = create()\n[bench]\npop(a)\n[init]\npop(b)\n";
        assert_eq!(section_size(source, Section::Init), 2);
        assert_eq!(section_size(source, Section::Bench), 1);
    }

    #[test]
    fn test_section_size_skips_blanks_and_comments() {
        let source = "[bench]\n\n# comment\nsize(a)\n   \nsize(b)\n";
        assert_eq!(section_size(source, Section::Bench), 2);
        assert_eq!(section_size(source, Section::Init), 0);
    }

    #[test]
    fn test_first_letter_rules() {
        assert_eq!(structure_kind("vector"), StructureKind::Vector);
        assert_eq!(structure_kind("vec"), StructureKind::Vector);
        assert_eq!(structure_kind("map"), StructureKind::Map);
        assert_eq!(structure_kind("anything"), StructureKind::Map);

        assert_eq!(implementation_flag("AVL"), Implementation::Avl);
        assert_eq!(implementation_flag("RRB"), Implementation::Rrb);
        assert_eq!(implementation_flag("FINGER"), Implementation::Finger);
        assert_eq!(implementation_flag("other"), Implementation::Finger);

        assert_eq!(value_type("int"), ValueType::Int);
        assert_eq!(value_type("string"), ValueType::Text);
        assert_eq!(value_type("str"), ValueType::Text);
    }

    #[test]
    fn test_build_command_ignores_extra_tokens() {
        let command = build_command("pop(b) trailing words", 1, None).unwrap();
        assert_eq!(command.output, None);
        assert_eq!(
            command.operation,
            Operation::Pop {
                handle: "b".to_string()
            }
        );
    }

    #[test]
    fn test_build_command_unknown_operation_keeps_whole_line() {
        let error = build_command("frobnicate(a, 1)", 9, None).unwrap_err();
        match error {
            ParseError::UnknownOperation { line, text } => {
                assert_eq!(line, 9);
                assert_eq!(text, "frobnicate(a, 1)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_command_missing_value() {
        let error = build_command("push(a)", 4, Some(ValueType::Int)).unwrap_err();
        match error {
            ParseError::MissingArgument { line, command, expected } => {
                assert_eq!(line, 4);
                assert_eq!(command, "push");
                assert_eq!(expected, "a value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_command_malformed_index() {
        let error = build_command("lookup(a, ten)", 2, None).unwrap_err();
        match error {
            ParseError::MalformedNumber { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "ten");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_command_value_follows_declared_type() {
        let int_push = build_command("push(a, 5)", 1, Some(ValueType::Int)).unwrap();
        assert_eq!(
            int_push.operation,
            Operation::Push {
                handle: "a".to_string(),
                value: Value::Int(5),
            }
        );

        let text_push = build_command("push(a, 5)", 1, None).unwrap();
        assert_eq!(
            text_push.operation,
            Operation::Push {
                handle: "a".to_string(),
                value: Value::Text("5".to_string()),
            }
        );
    }

    #[test]
    fn test_build_command_negative_numbers() {
        let command = build_command("update(a, -1, -42)", 1, Some(ValueType::Int)).unwrap();
        assert_eq!(
            command.operation,
            Operation::Update {
                handle: "a".to_string(),
                index: -1,
                value: Value::Int(-42),
            }
        );
    }
}
