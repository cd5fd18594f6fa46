#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    compiler::compiler::{Compiler, Program},
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    symbols::memory::MemoryLayout,
};

pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod symbols;
pub mod type_checker;

extern crate regex;

/// A byte offset into a named source.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Settings of one compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub layout: MemoryLayout,
    /// Name reported in diagnostics
    pub file_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            layout: MemoryLayout::default(),
            file_name: String::from("main.ez"),
        }
    }
}

/// Compiles one page from source to quadruples.
pub fn compile_source(source: &str, options: CompileOptions) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some(options.file_name.clone()))?;
    let compiler = Compiler::with_layout(options.layout);

    parse(tokens, Rc::new(options.file_name), compiler)
}

/// Finds the line containing byte `position`.
///
/// Returns the 1-based line number, the line's text and the offset of
/// `position` within it. A position just past the end maps to the end of
/// the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    let mut start = 0;
    let mut last = None;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        last = Some((index + 1, line.to_string(), line.len()));
        start = end;
    }

    if pos == source.len() {
        last
    } else {
        None
    }
}

/// Formats `error` against the source it was raised for:
///
/// ```text
/// Error: TypeMismatch (...)
/// -> main.ez
///    |
///  4 | total = "text";
///    | --------^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut output = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };
    output.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

pub fn display_error(error: &Error, source: &str) {
    print!("{}", format_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();
    (String::from(&string[start..]), start)
}
