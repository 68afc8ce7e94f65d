use logos::Logos;

/// Lexical pieces of a command line. The delimiter set is fixed: spaces,
/// commas, `=`, `(` and `)`. Spaces and commas carry no meaning and are
/// skipped outright; a tab inside a line is an ordinary token character,
/// only the line classifier strips leading ones.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ ,]+")]
pub enum Token<'src> {
    #[token("=")]
    Equals,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    // Function names, object names and literals alike
    #[regex(r"[^ ,=()]+", |lex| lex.slice())]
    Word(&'src str),
}

/// One input line after classification
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'src> {
    Blank,
    Comment,
    /// Section header, carrying the name between `[` and `]`
    Section(&'src str),
    /// Anything else, from the first non-blank character onward
    Content(&'src str),
}

/// Classify a raw input line.
///
/// Leading spaces and tabs are skipped before the first character is
/// inspected: `#` opens a comment, `[` a section header, an empty rest
/// is blank, and everything else is content for the current section.
pub fn classify_line(raw: &str) -> Line<'_> {
    let text = raw.trim_start_matches([' ', '\t']);

    if text.is_empty() {
        Line::Blank
    } else if text.starts_with('#') {
        Line::Comment
    } else if let Some(rest) = text.strip_prefix('[') {
        // An unterminated header keeps the rest of the line as its name
        let name = match rest.find(']') {
            Some(end) => &rest[..end],
            None => rest,
        };
        Line::Section(name)
    } else {
        Line::Content(text)
    }
}

/// A command line split on the fixed delimiter set.
///
/// `words` holds the function name followed by its arguments in source
/// order. When the line is a `name = call(...)` assignment, `is_assign`
/// is set and `binding` names the output; words in front of the `=` are
/// not arguments and never reach `words`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandTokens<'src> {
    pub is_assign: bool,
    pub binding: Option<&'src str>,
    pub words: Vec<&'src str>,
}

/// Tokenize one content line from a command section.
///
/// A `=` only introduces an assignment while no `(` has been seen, so
/// `=` inside an argument list is inert. Runs of delimiters never
/// produce empty words.
pub fn tokenize_command(text: &str) -> CommandTokens<'_> {
    let mut words = Vec::new();
    let mut binding = None;
    let mut is_assign = false;
    let mut in_call = false;

    for token in Token::lexer(text).flatten() {
        match token {
            Token::Word(word) => words.push(word),
            Token::Equals if !in_call && !is_assign => {
                is_assign = true;
                binding = words.first().copied();
                words.clear();
            }
            Token::LParen => in_call = true,
            Token::Equals | Token::RParen => {}
        }
    }

    CommandTokens {
        is_assign,
        binding,
        words,
    }
}
