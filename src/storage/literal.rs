//! Text codec for the baseline file.
//!
//! The file holds two list assignments written with Python literal syntax:
//!
//! ```text
//! prev_headings = ['Form fill-up notice', "Teachers' training"]
//!
//! prev_links = ['https://www.nu.ac.bd/uploads/a.pdf', 'https://www.nu.ac.bd/uploads/b.pdf']
//! ```
//!
//! Rendering follows Python's `repr` for strings so the file stays
//! importable by Python tooling. Code points unassigned in Unicode are the
//! exception and are written verbatim. The parser accepts hand edits
//! (either quote style, line breaks, comments, trailing commas).

use crate::error::{AppError, Result};
use crate::models::PreviousState;

pub const HEADINGS_NAME: &str = "prev_headings";
pub const LINKS_NAME: &str = "prev_links";

/// Render a baseline as file contents.
pub fn render(state: &PreviousState) -> String {
    format!(
        "{HEADINGS_NAME} = {}\n\n{LINKS_NAME} = {}",
        render_list(&state.headings),
        render_list(&state.links)
    )
}

/// Render a list of strings, e.g. `['a', 'b']`.
pub fn render_list(items: &[String]) -> String {
    let rendered: Vec<String> = items.iter().map(|s| render_str(s)).collect();
    format!("[{}]", rendered.join(", "))
}

/// Render one quoted string literal.
pub fn render_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_unprintable(c) => {
                let code = c as u32;
                if code < 0x100 {
                    out.push_str(&format!("\\x{code:02x}"));
                } else if code < 0x10000 {
                    out.push_str(&format!("\\u{code:04x}"));
                } else {
                    out.push_str(&format!("\\U{code:08x}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

// Characters `repr` escapes: controls, separators other than the ASCII
// space, format characters and private-use code points. Unassigned code
// points are not tabulated and pass through verbatim.
fn is_unprintable(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{a0}'
                | '\u{ad}'
                | '\u{600}'..='\u{605}'
                | '\u{61c}'
                | '\u{6dd}'
                | '\u{70f}'
                | '\u{890}'..='\u{891}'
                | '\u{8e2}'
                | '\u{1680}'
                | '\u{180e}'
                | '\u{2000}'..='\u{200f}'
                | '\u{2028}'..='\u{202f}'
                | '\u{205f}'..='\u{206f}'
                | '\u{3000}'
                | '\u{e000}'..='\u{f8ff}'
                | '\u{fdd0}'..='\u{fdef}'
                | '\u{feff}'
                | '\u{fff9}'..='\u{fffb}'
                | '\u{fffe}'..='\u{ffff}'
                | '\u{110bd}'
                | '\u{110cd}'
                | '\u{13430}'..='\u{1343f}'
                | '\u{1bca0}'..='\u{1bca3}'
                | '\u{1d173}'..='\u{1d17a}'
                | '\u{e0001}'
                | '\u{e0020}'..='\u{e007f}'
                | '\u{f0000}'..='\u{10ffff}'
        )
}

/// Parse file contents back into a baseline.
///
/// Unknown assignments are skipped; a missing list reads as empty.
pub fn parse(text: &str) -> Result<PreviousState> {
    let mut parser = Parser::new(text);
    let mut state = PreviousState::default();

    loop {
        parser.skip_trivia();
        if parser.at_end() {
            break;
        }

        let name = parser.ident()?;
        parser.skip_trivia();
        parser.expect('=')?;
        parser.skip_trivia();
        let items = parser.list()?;

        match name {
            HEADINGS_NAME => state.headings = items,
            LINKS_NAME => state.links = items,
            other => log::debug!("Ignoring assignment to {other} in baseline file"),
        }
    }

    Ok(state)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, message: impl std::fmt::Display) -> AppError {
        AppError::state(self.pos, message)
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of file"))),
        }
    }

    fn ident(&mut self) -> Result<&'a str> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        if start == self.pos {
            return Err(self.error("expected a variable name"));
        }
        Ok(&self.src[start..self.pos])
    }

    fn list(&mut self) -> Result<Vec<String>> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_trivia();
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(items);
                }
                Some('\'' | '"') => {
                    items.push(self.string()?);
                    self.skip_trivia();
                    match self.peek() {
                        Some(',') => {
                            self.bump();
                        }
                        Some(']') => {}
                        _ => return Err(self.error("expected ',' or ']'")),
                    }
                }
                _ => return Err(self.error("expected a string or ']'")),
            }
        }
    }

    fn string(&mut self) -> Result<String> {
        let quote = self.bump().ok_or_else(|| self.error("expected a string"))?;
        let mut out = String::new();

        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<()> {
        match self.bump() {
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\n') => {}
            Some('x') => out.push(self.hex_char(2)?),
            Some('u') => out.push(self.hex_char(4)?),
            Some('U') => out.push(self.hex_char(8)?),
            Some(c) => {
                out.push('\\');
                out.push(c);
            }
            None => return Err(self.error("unterminated escape")),
        }
        Ok(())
    }

    fn hex_char(&mut self, digits: usize) -> Result<char> {
        let digits_str = self
            .src
            .get(self.pos..self.pos + digits)
            .filter(|s| s.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.error(format!("expected {digits} hex digits")))?;

        let code = u32::from_str_radix(digits_str, 16).map_err(|e| self.error(e))?;
        let ch = char::from_u32(code)
            .ok_or_else(|| self.error(format!("invalid code point {code:#x}")))?;
        self.pos += digits;
        Ok(ch)
    }
}
