use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare text; `[...]` predicates and `{...}` key groups stay inside it
    Word,
    /// `'...'` or `"..."`, quotes included in the span
    Quoted,
    LParen,
    RParen,
    Comma,
    Equals,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range in the source label
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }

    /// Text with surrounding quotes removed for [`TokenKind::Quoted`].
    pub fn value<'a>(&self, source: &'a str) -> &'a str {
        match self.kind {
            TokenKind::Quoted => &source[self.span.start + 1..self.span.end - 1],
            _ => self.text(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated {what} starting at byte {at}")]
    Unterminated { what: &'static str, at: usize },

    #[error("unbalanced '{found}' at byte {at}")]
    Unbalanced { found: char, at: usize },
}

/// Split an edge label into tokens.
///
/// ```text
/// click_element(btn_ok, location='10,20')
/// Word LParen Word Comma Word Equals Quoted RParen
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let kind = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Equals,
            '\'' | '"' => {
                let end = lex_quoted(&mut chars, start, c)?;
                tokens.push(Token {
                    kind: TokenKind::Quoted,
                    span: start..end,
                });
                continue;
            }
            _ => {
                let end = lex_word(&mut chars, start)?;
                tokens.push(Token {
                    kind: TokenKind::Word,
                    span: start..end,
                });
                continue;
            }
        };
        chars.next();
        tokens.push(Token {
            kind,
            span: start..start + 1,
        });
    }

    Ok(tokens)
}

fn lex_quoted(
    chars: &mut Peekable<CharIndices<'_>>,
    start: usize,
    quote: char,
) -> Result<usize, LexError> {
    chars.next();
    for (i, c) in chars.by_ref() {
        if c == quote {
            return Ok(i + c.len_utf8());
        }
    }
    Err(LexError::Unterminated {
        what: "quote",
        at: start,
    })
}

fn lex_word(chars: &mut Peekable<CharIndices<'_>>, start: usize) -> Result<usize, LexError> {
    // Closing char and start offset of every open group.
    let mut open: Vec<(char, usize)> = Vec::new();
    // `{{}` and `{}}` name the brace keys themselves.
    let mut literal_next = false;
    let mut end = start;

    while let Some(&(i, c)) = chars.peek() {
        if open.is_empty()
            && (c.is_whitespace() || matches!(c, '(' | ')' | ',' | '=' | '\'' | '"'))
        {
            break;
        }

        if literal_next {
            literal_next = false;
        } else {
            match c {
                '[' if !in_key_group(&open) => open.push((']', i)),
                '{' if !in_key_group(&open) => {
                    open.push(('}', i));
                    literal_next = true;
                }
                ']' | '}' => match open.last() {
                    Some(&(expected, _)) if expected == c => {
                        open.pop();
                    }
                    Some(_) if in_key_group(&open) => {}
                    _ => return Err(LexError::Unbalanced { found: c, at: i }),
                },
                _ => {}
            }
        }

        end = i + c.len_utf8();
        chars.next();
    }

    match open.last() {
        Some(&(close, at)) => Err(LexError::Unterminated {
            what: if close == ']' { "predicate" } else { "key group" },
            at,
        }),
        None => Ok(end),
    }
}

fn in_key_group(open: &[(char, usize)]) -> bool {
    matches!(open.last(), Some(('}', _)))
}
