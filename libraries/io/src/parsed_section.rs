use std::collections::HashMap;
use std::io::Read;
use std::io::Write;

use log::trace;
use regex::Regex;
use streaming_iterator::StreamingIterator;

use crate::line_iterator::LineIterator;
use crate::SectionError;

/// A parsed automaton section: a type tag, a string-keyed dictionary of
/// string lists, and a body of token lines.
///
/// The textual encoding read by [read_section] consists of a `@TYPE` header
/// line, `%Key value…` dictionary lines, and whitespace-separated token
/// lines for the body:
///
/// ```text
/// @AFA
/// %Initial q0
/// %Final q2
/// q0 a q1 q2 | q2
/// ```
///
/// Empty lines and lines starting with `#` are skipped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedSection {
    pub section_type: String,
    pub dict: HashMap<String, Vec<String>>,
    pub body: Vec<Vec<String>>,
}

/// Reads a single section from the given reader.
pub fn read_section(reader: impl Read) -> Result<ParsedSection, SectionError> {
    let header_regex =
        Regex::new(r"^\s*@([A-Za-z0-9_-]+)\s*$").expect("Regex compilation should not fail");

    let mut lines = LineIterator::new(reader);
    let mut section = ParsedSection::default();

    // The header is the first line that is not empty or a comment.
    loop {
        lines.advance();
        let line = lines
            .get()
            .ok_or(SectionError::InvalidHeader("missing @TYPE header line"))?;

        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let captures = header_regex
            .captures(line)
            .ok_or(SectionError::InvalidHeader("expected @TYPE"))?;
        section.section_type = captures[1].to_string();
        break;
    }

    while let Some(line) = lines.next() {
        trace!("{}", line);

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('%') {
            let mut tokens = rest.split_whitespace();
            let key = tokens
                .next()
                .ok_or(SectionError::InvalidHeader("empty dictionary key"))?;

            section
                .dict
                .entry(key.to_string())
                .or_default()
                .extend(tokens.map(str::to_string));
        } else {
            section
                .body
                .push(trimmed.split_whitespace().map(str::to_string).collect());
        }
    }

    Ok(section)
}

/// Writes the section in the encoding accepted by [read_section]. The
/// dictionary is emitted in key order to keep the output stable.
pub fn write_section(section: &ParsedSection, mut writer: impl Write) -> std::io::Result<()> {
    writeln!(writer, "@{}", section.section_type)?;

    let mut keys: Vec<&String> = section.dict.keys().collect();
    keys.sort();
    for key in keys {
        write!(writer, "%{}", key)?;
        for value in &section.dict[key] {
            write!(writer, " {}", value)?;
        }
        writeln!(writer)?;
    }

    for line in &section.body {
        writeln!(writer, "{}", line.join(" "))?;
    }

    Ok(())
}
