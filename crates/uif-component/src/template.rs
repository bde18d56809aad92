//! Template tokenizer and substitution engine
//!
//! Markup is split once into literal spans and placeholder tokens:
//!
//! - `{key}` / `{key(args)}` anywhere, including inside attribute values
//! - bare `key` / `key(args)` words in start-tag attribute position
//! - the `<innerhtml>` prior-content slot
//!
//! Rendering rebuilds the text from the tokens. Replacement output is
//! never scanned again, so substitutions cannot feed into each other.

use serde_json::Value;
use uif_dom::SURROUND_TAG;

use crate::{
    Controller, EventBinding, Invocation, Pattern, Substitution, SubstitutionKind, attrs,
    camel_to_kebab, parse_literal_list, to_text,
};

/// A placeholder occurrence in markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Exact source text, emitted when the placeholder is left alone
    pub raw: &'a str,
    pub name: &'a str,
    /// Text between the parentheses, if any
    pub args: Option<&'a str>,
    /// Written as `{...}`
    pub braced: bool,
    /// Found in attribute position of a start tag
    pub in_tag: bool,
}

impl Placeholder<'_> {
    /// Check whether a substitution pattern applies here
    pub fn matches(&self, pattern: &Pattern) -> bool {
        match pattern {
            Pattern::Placeholder(key) => self.braced && self.args.is_none() && self.name == key,
            Pattern::Call(key) => self.braced && !self.in_tag && self.name == key,
            Pattern::Attribute(key) => self.in_tag && self.name == key,
            Pattern::Word(key) => {
                self.in_tag && !self.braced && self.args.is_none() && self.name.eq_ignore_ascii_case(key)
            }
        }
    }
}

/// Markup token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Placeholder(Placeholder<'a>),
    /// The prior-content slot, with its source text
    PriorContent(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Content,
    Tag,
    Quoted(u8),
}

/// Split markup into tokens
pub fn tokenize(markup: &str) -> Vec<Token<'_>> {
    Tokenizer::new(markup).run()
}

struct Tokenizer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    text_start: usize,
    mode: Mode,
    tokens: Vec<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            text_start: 0,
            mode: Mode::Content,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token<'a>> {
        while self.pos < self.bytes.len() {
            match self.mode {
                Mode::Content => self.step_content(),
                Mode::Tag => self.step_tag(),
                Mode::Quoted(quote) => self.step_quoted(quote),
            }
        }
        self.flush_text(self.bytes.len());
        self.tokens
    }

    fn flush_text(&mut self, end: usize) {
        if end > self.text_start {
            self.tokens.push(Token::Text(&self.src[self.text_start..end]));
        }
        self.text_start = end;
    }

    fn emit(&mut self, start: usize, end: usize, token: Token<'a>) {
        self.flush_text(start);
        self.tokens.push(token);
        self.pos = end;
        self.text_start = end;
    }

    fn step_content(&mut self) {
        let start = self.pos;
        match self.bytes[start] {
            b'{' => self.try_braced(false),
            b'<' => {
                if let Some(end) = self.slot_end(start) {
                    self.emit(start, end, Token::PriorContent(&self.src[start..end]));
                } else if self.src[start..].starts_with("<!--") {
                    self.pos = self.src[start + 4..]
                        .find("-->")
                        .map(|i| start + 4 + i + 3)
                        .unwrap_or(self.bytes.len());
                } else if self.bytes.get(start + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
                    let mut end = start + 1;
                    while end < self.bytes.len() && is_tag_name_byte(self.bytes[end]) {
                        end += 1;
                    }
                    self.pos = end;
                    self.mode = Mode::Tag;
                } else {
                    self.pos += 1;
                }
            }
            _ => self.pos += 1,
        }
    }

    fn step_tag(&mut self) {
        let start = self.pos;
        match self.bytes[start] {
            b'>' => {
                self.pos += 1;
                self.mode = Mode::Content;
            }
            b'"' | b'\'' => {
                self.pos += 1;
                self.mode = Mode::Quoted(self.bytes[start]);
            }
            b'=' => {
                self.pos += 1;
                self.skip_whitespace();
                match self.bytes.get(self.pos) {
                    Some(&q @ (b'"' | b'\'')) => {
                        self.pos += 1;
                        self.mode = Mode::Quoted(q);
                    }
                    Some(_) => {
                        while self.pos < self.bytes.len()
                            && !self.bytes[self.pos].is_ascii_whitespace()
                            && self.bytes[self.pos] != b'>'
                        {
                            self.pos += 1;
                        }
                    }
                    None => {}
                }
            }
            b'{' => self.try_braced(true),
            b if b.is_ascii_whitespace() || b == b'/' => self.pos += 1,
            _ => self.attribute_word(),
        }
    }

    fn step_quoted(&mut self, quote: u8) {
        match self.bytes[self.pos] {
            b if b == quote => {
                self.pos += 1;
                self.mode = Mode::Tag;
            }
            b'{' => self.try_braced(false),
            _ => self.pos += 1,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.bytes.get(self.pos).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// `{name}` or `{name(args)}` at `pos`
    fn try_braced(&mut self, in_tag: bool) {
        let start = self.pos;
        let name_end = ident_end(self.bytes, start + 1);
        if name_end == start + 1 {
            self.pos += 1;
            return;
        }
        let name = &self.src[start + 1..name_end];
        let (args, end) = match self.bytes.get(name_end) {
            Some(b'}') => (None, name_end + 1),
            Some(b'(') => match close_paren(self.bytes, name_end) {
                Some(close) if self.bytes.get(close + 1) == Some(&b'}') => {
                    (Some(&self.src[name_end + 1..close]), close + 2)
                }
                _ => {
                    self.pos += 1;
                    return;
                }
            },
            _ => {
                self.pos += 1;
                return;
            }
        };
        let placeholder = Placeholder {
            raw: &self.src[start..end],
            name,
            args,
            braced: true,
            in_tag,
        };
        self.emit(start, end, Token::Placeholder(placeholder));
    }

    /// A bare word in attribute position
    fn attribute_word(&mut self) {
        let start = self.pos;
        let mut end = start;
        while end < self.bytes.len() && !is_word_break(self.bytes[end]) {
            end += 1;
        }
        if end == start {
            self.pos += 1;
            return;
        }
        let word = &self.src[start..end];
        if !is_ident(word) {
            self.pos = end;
            return;
        }

        let (args, token_end) = if self.bytes.get(end) == Some(&b'(') {
            match close_paren(self.bytes, end) {
                Some(close) => (Some(&self.src[end + 1..close]), close + 1),
                None => {
                    self.pos = end;
                    return;
                }
            }
        } else {
            (None, end)
        };

        let bounded = self
            .bytes
            .get(token_end)
            .is_none_or(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/');
        let mut next = token_end;
        while self.bytes.get(next).is_some_and(|b| b.is_ascii_whitespace()) {
            next += 1;
        }
        let has_value = self.bytes.get(next) == Some(&b'=');
        if !bounded || (has_value && args.is_none()) {
            self.pos = token_end.max(start + 1);
            return;
        }

        let placeholder = Placeholder {
            raw: &self.src[start..token_end],
            name: word,
            args,
            braced: false,
            in_tag: true,
        };
        self.emit(start, token_end, Token::Placeholder(placeholder));
    }

    /// End of a `<innerhtml>` slot starting at `start`, including an
    /// immediately following `</innerhtml>`
    fn slot_end(&self, start: usize) -> Option<usize> {
        let mut pos = start + 1;
        if !starts_with_ignore_case(self.bytes, pos, SURROUND_TAG) {
            return None;
        }
        pos += SURROUND_TAG.len();
        while self.bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
            pos += 1;
        }
        if self.bytes.get(pos) == Some(&b'/') {
            pos += 1;
        }
        if self.bytes.get(pos) != Some(&b'>') {
            return None;
        }
        pos += 1;

        let mut close = pos;
        if self.bytes.get(close) == Some(&b'<') && self.bytes.get(close + 1) == Some(&b'/') {
            close += 2;
            if starts_with_ignore_case(self.bytes, close, SURROUND_TAG) {
                close += SURROUND_TAG.len();
                while self.bytes.get(close).is_some_and(|b| b.is_ascii_whitespace()) {
                    close += 1;
                }
                if self.bytes.get(close) == Some(&b'>') {
                    return Some(close + 1);
                }
            }
        }
        Some(pos)
    }
}

fn starts_with_ignore_case(bytes: &[u8], at: usize, needle: &str) -> bool {
    bytes
        .get(at..at + needle.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

fn is_word_break(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'=' | b'>' | b'/' | b'"' | b'\'' | b'(' | b'{' | b'<')
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_ident(word: &str) -> bool {
    let bytes = word.as_bytes();
    !bytes.is_empty() && ident_end(bytes, 0) == bytes.len()
}

fn ident_end(bytes: &[u8], start: usize) -> usize {
    if !bytes.get(start).is_some_and(|&b| is_ident_start(b)) {
        return start;
    }
    let mut end = start + 1;
    while end < bytes.len() && is_ident_continue(bytes[end]) {
        end += 1;
    }
    end
}

/// Index of the `)` closing the `(` at `open`, skipping quoted strings
fn close_paren(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            q @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != q {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Render markup for one component instance
///
/// Without a controller only the prior-content slot is resolved. With one,
/// the first substitution (in classification order) matching a placeholder
/// replaces it; unmatched or unresolvable placeholders stay literal text.
pub fn render(
    markup: &str,
    substitutions: &[Substitution],
    mut controller: Option<&mut dyn Controller>,
    prior_content: Option<&str>,
) -> String {
    let mut out = String::with_capacity(markup.len());
    for token in tokenize(markup) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::PriorContent(_) => out.push_str(prior_content.unwrap_or("")),
            Token::Placeholder(placeholder) => {
                let replacement = controller.as_deref_mut().and_then(|controller| {
                    substitutions
                        .iter()
                        .find(|s| placeholder.matches(&s.pattern()))
                        .and_then(|s| substitute(s, &placeholder, controller))
                });
                out.push_str(replacement.as_deref().unwrap_or(placeholder.raw));
            }
        }
    }
    out
}

fn substitute(substitution: &Substitution, placeholder: &Placeholder<'_>, controller: &mut dyn Controller) -> Option<String> {
    let key = substitution.key.as_str();
    match substitution.kind {
        SubstitutionKind::Property => match controller.property(key) {
            Some(value) => Some(to_text(&value)),
            None => {
                tracing::warn!("Property `{}` has no value, leaving {} in place", key, placeholder.raw);
                None
            }
        },
        SubstitutionKind::MethodInvocation => {
            let args = literal_args(placeholder)?;
            match controller.invoke(key, Invocation::with_args(args)) {
                Ok(value) => Some(to_text(&value)),
                Err(e) => {
                    tracing::warn!("`{}` failed while rendering: {}", placeholder.raw, e);
                    None
                }
            }
        }
        SubstitutionKind::EventHandler => {
            let args = literal_args(placeholder)?;
            let event_type = substitution.event_type?;
            Some(EventBinding::new(event_type, key, args).to_attribute())
        }
        SubstitutionKind::Validator => Some(format!(
            "{} {}{}",
            attrs::VALIDATE,
            attrs::CHECK_PREFIX,
            camel_to_kebab(key)
        )),
    }
}

fn literal_args(placeholder: &Placeholder<'_>) -> Option<Vec<Value>> {
    let Some(text) = placeholder.args else {
        return Some(Vec::new());
    };
    match parse_literal_list(text) {
        Ok(args) => Some(args),
        Err(e) => {
            tracing::warn!("Arguments of `{}` are not literals ({}), leaving it in place", placeholder.raw, e);
            None
        }
    }
}
