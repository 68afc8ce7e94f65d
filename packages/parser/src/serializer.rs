use crate::program::{Command, Program};

/// Serializer converts a parsed program back to source text.
///
/// The output is canonical: sections appear in a fixed order with one
/// entry per line, unset globals and empty command lists are omitted,
/// and comments from the original file are not preserved. Feeding the
/// output back through the parser yields an equal program.
pub struct Serializer;

impl Serializer {
    pub fn new() -> Self {
        Serializer
    }

    /// Serialize a program to source text
    pub fn serialize(&mut self, program: &Program) -> String {
        let mut output = String::new();

        if let Some(structure) = program.structure {
            open_section(&mut output, "struct");
            output.push_str(&structure.to_string());
            output.push('\n');
        }

        if !program.implementations.is_empty() {
            open_section(&mut output, "implem");
            for implementation in program.implementations.iter() {
                output.push_str(&implementation.to_string());
                output.push('\n');
            }
        }

        // A key type alone is unreachable from a parse, so the whole
        // section hangs off the element type
        if let Some(element_type) = program.element_type {
            open_section(&mut output, "type");
            output.push_str(&element_type.to_string());
            output.push('\n');
            if let Some(key_type) = program.key_type {
                output.push_str(&key_type.to_string());
                output.push('\n');
            }
        }

        self.serialize_commands(&mut output, "init", &program.init_commands);
        self.serialize_commands(&mut output, "bench", &program.bench_commands);

        output
    }

    fn serialize_commands(&self, output: &mut String, name: &str, commands: &[Command]) {
        if commands.is_empty() {
            return;
        }
        open_section(output, name);
        for command in commands {
            output.push_str(&command.to_string());
            output.push('\n');
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

fn open_section(output: &mut String, name: &str) {
    if !output.is_empty() {
        output.push('\n');
    }
    output.push('[');
    output.push_str(name);
    output.push_str("]\n");
}

/// Serialize a program to canonical source text
pub fn serialize(program: &Program) -> String {
    Serializer::new().serialize(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_serialize_empty_program() {
        assert_eq!(serialize(&Program::new()), "");
    }

    #[test]
    fn test_default_serializer_matches_new() {
        let program = parse("[struct]\nmap\n[bench]\npop(a)\n").unwrap();
        let mut serializer = Serializer::default();
        assert_eq!(serializer.serialize(&program), serialize(&program));
    }

    #[test]
    fn test_serialize_full_program() {
        let source = "\
[struct]
vector

[implem]
AVL
FINGER

[type]
int
string

[init]
a = create()
b = push(a, 5)

[bench]
lookup(b, 0)
d = split(b, 1, d, e)
";
        let program = parse(source).unwrap();
        assert_eq!(serialize(&program), source);
    }

    #[test]
    fn test_serialize_omits_unset_sections() {
        let program = parse("[bench]\nsize(a)\n").unwrap();
        assert_eq!(serialize(&program), "[bench]\nsize(a)\n");
    }

    #[test]
    fn test_serialize_then_reparse_is_identity() {
        let source = "\
# vectors under test
[struct]
vector
[implem]
RRB
[type]
int
[init]
a = create()
[bench]
b = push(a, 1)
pop(b)
";
        let program = parse(source).unwrap();
        let reparsed = parse(&serialize(&program)).unwrap();
        assert_eq!(program, reparsed);
    }
}
