use serde::Serialize;

use crate::action::lexer::{Token, TokenKind, tokenize};
use crate::driver::protocol::Location;
use crate::error::{NavigatorError, Result};
use crate::repository::store::Repository;

/// Extra argument carried by an edge label after the locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SecondaryArg {
    /// Key-press syntax such as `{Ctrl down}a{Ctrl up}`
    KeySequence(String),
    /// Click offset from `location='x,y'`
    Location(Location),
}

/// A transition label resolved into something executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub command: String,
    /// Repository locator for the label's symbolic key
    pub locator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<SecondaryArg>,
}

/// One comma-separated argument of a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelArg<'a> {
    /// `location` in `location='10,20'`
    pub name: Option<&'a str>,
    /// Argument exactly as written
    pub raw: &'a str,
    /// Value with the name and surrounding quotes removed
    pub value: &'a str,
}

/// Structure of `command(arg, ..., name=value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSyntax<'a> {
    pub command: &'a str,
    pub args: Vec<LabelArg<'a>>,
    /// Everything between the parentheses
    pub arg_text: &'a str,
    /// Everything between the first top-level comma and the closing parenthesis
    pub after_first_comma: Option<&'a str>,
}

pub fn parse_label(label: &str) -> Result<LabelSyntax<'_>> {
    let tokens = tokenize(label).map_err(|e| malformed(label, e.to_string()))?;

    let (command, open, inner, close) = match tokens.as_slice() {
        [command, open, inner @ .., close]
            if command.kind == TokenKind::Word
                && open.kind == TokenKind::LParen
                && close.kind == TokenKind::RParen =>
        {
            (command, open, inner, close)
        }
        _ => return Err(malformed(label, "expected command(arguments)")),
    };

    if inner
        .iter()
        .any(|t| matches!(t.kind, TokenKind::LParen | TokenKind::RParen))
    {
        return Err(malformed(label, "nested parentheses"));
    }

    let args = if inner.is_empty() {
        Vec::new()
    } else {
        inner
            .split(|t| t.kind == TokenKind::Comma)
            .map(|group| label_arg(label, group))
            .collect()
    };

    let after_first_comma = inner
        .iter()
        .find(|t| t.kind == TokenKind::Comma)
        .map(|comma| label[comma.span.end..close.span.start].trim());

    Ok(LabelSyntax {
        command: command.text(label),
        args,
        arg_text: label[open.span.end..close.span.start].trim(),
        after_first_comma,
    })
}

fn label_arg<'a>(label: &'a str, group: &[Token]) -> LabelArg<'a> {
    let raw = span_text(label, group);
    match group {
        [name, equals, value @ ..]
            if name.kind == TokenKind::Word
                && equals.kind == TokenKind::Equals
                && !value.is_empty() =>
        {
            let value = match value {
                [single] => single.value(label),
                _ => span_text(label, value),
            };
            LabelArg {
                name: Some(name.text(label)),
                raw,
                value,
            }
        }
        _ => LabelArg {
            name: None,
            raw,
            value: raw,
        },
    }
}

fn span_text<'a>(label: &'a str, tokens: &[Token]) -> &'a str {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => &label[first.span.start..last.span.end],
        _ => "",
    }
}

/// Turn an edge label into an [`ActionDescriptor`].
///
/// Rules, first match wins:
/// 1. command contains `send_key`: locator is the text before the first
///    comma, the rest is a key sequence;
/// 2. label contains `location`: locator is the text before the first
///    comma, the `location='x,y'` argument is a click offset;
/// 3. otherwise the whole argument text is the locator.
///
/// The locator text is a symbolic key looked up in `repository`.
pub fn parse_action(label: &str, repository: &Repository) -> Result<ActionDescriptor> {
    let syntax = parse_label(label)?;
    let first = syntax.args.first();
    let leading = first.map(|arg| arg.raw).unwrap_or("");

    let (key, secondary) = if syntax.command.contains("send_key") {
        match syntax.after_first_comma {
            Some(keys) => (leading, Some(SecondaryArg::KeySequence(keys.to_string()))),
            None => (syntax.arg_text, None),
        }
    } else if label.contains("location") {
        if first.is_some_and(|arg| arg.name.is_some()) {
            return Err(malformed(label, "first argument must be a locator"));
        }
        let location = syntax
            .args
            .iter()
            .find(|arg| arg.name == Some("location"))
            .map(|arg| arg.value.parse::<Location>())
            .transpose()
            .map_err(|reason| malformed(label, reason))?;
        (leading, location.map(SecondaryArg::Location))
    } else {
        (syntax.arg_text, None)
    };

    if key.is_empty() {
        return Err(malformed(label, "missing locator"));
    }

    Ok(ActionDescriptor {
        command: syntax.command.to_string(),
        locator: repository.lookup(key).to_string(),
        secondary,
    })
}

fn malformed(label: &str, reason: impl Into<String>) -> NavigatorError {
    NavigatorError::MalformedLabel {
        label: label.to_string(),
        reason: reason.into(),
    }
}
