//! Parameter list tokenizer
//!
//! Splits a raw parameter list into (annotations, modifiers, type, name)
//! parts with a small bracket-aware scanner instead of whitespace splitting,
//! so annotations and parameter names are never mistaken for types.

use serde::Serialize;
use thiserror::Error;

/// Errors raised while splitting a parameter list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("unbalanced `{0}` in parameter list")]
    Unbalanced(char),
    #[error("parameter `{0}` has no type")]
    MissingType(String),
    #[error("`{0}` is not a valid parameter name")]
    InvalidName(String),
}

/// One formal parameter as written in source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawParameter {
    pub annotations: Vec<String>,
    pub is_final: bool,
    /// Type text with generic arguments and array or varargs suffixes
    pub type_text: String,
    pub name: String,
}

/// Split and tokenize the text between a header's parentheses
pub fn parse_parameters(text: &str) -> Result<Vec<RawParameter>, ParameterError> {
    split_parameters(text)?
        .into_iter()
        .map(parse_parameter)
        .collect()
}

/// Split on commas that are not nested inside `<>`, `()` or `[]`
fn split_parameters(text: &str) -> Result<Vec<&str>, ParameterError> {
    let mut parts = Vec::new();
    let mut stack: Vec<char> = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' => stack.push(c),
            '>' | ')' | ']' => {
                let open = match c {
                    '>' => '<',
                    ')' => '(',
                    _ => '[',
                };
                if stack.pop() != Some(open) {
                    return Err(ParameterError::Unbalanced(c));
                }
            }
            ',' if stack.is_empty() => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParameterError::Unbalanced(open));
    }

    parts.push(&text[start..]);
    let parts: Vec<&str> = parts.into_iter().map(str::trim).collect();

    if parts.len() == 1 && parts[0].is_empty() {
        return Ok(Vec::new());
    }
    Ok(parts)
}

fn parse_parameter(text: &str) -> Result<RawParameter, ParameterError> {
    let (annotations, rest) = take_annotations(text)?;

    let mut is_final = false;
    let words: Vec<String> = merge_suffixes(words(&rest)?)
        .into_iter()
        .filter(|w| {
            if w == "final" {
                is_final = true;
                false
            } else {
                true
            }
        })
        .collect();

    let (name_word, type_words) = match words.split_last() {
        Some((name, types)) if !types.is_empty() => (name, types),
        _ => return Err(ParameterError::MissingType(text.trim().to_string())),
    };

    // C-style `int values[]` moves the brackets onto the type
    let bracket = name_word.find('[').unwrap_or(name_word.len());
    let (name, dims) = name_word.split_at(bracket);

    if !is_identifier(name) {
        return Err(ParameterError::InvalidName(name_word.clone()));
    }

    let mut type_text = type_words.concat();
    type_text.push_str(&dims.split_whitespace().collect::<String>());

    Ok(RawParameter {
        annotations,
        is_final,
        type_text,
        name: name.to_string(),
    })
}

/// Remove `@Name` and `@Name(...)` annotations, returning them and the rest
fn take_annotations(text: &str) -> Result<(Vec<String>, String), ParameterError> {
    let chars: Vec<char> = text.chars().collect();
    let mut annotations = Vec::new();
    let mut rest = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '@' {
            rest.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        i += 1;
        while i < chars.len() && (chars[i].is_alphanumeric() || matches!(chars[i], '_' | '$' | '.')) {
            i += 1;
        }

        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        if j < chars.len() && chars[j] == '(' {
            let mut depth = 0;
            while j < chars.len() {
                match chars[j] {
                    '(' => depth += 1,
                    ')' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                j += 1;
            }
            if depth != 0 {
                return Err(ParameterError::Unbalanced('('));
            }
            i = j + 1;
        }

        annotations.push(chars[start..i].iter().collect::<String>().trim().to_string());
        rest.push(' ');
    }

    Ok((annotations, rest))
}

/// Whitespace-separated words, keeping bracketed runs together
fn words(text: &str) -> Result<Vec<String>, ParameterError> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut angle = 0i32;
    let mut square = 0i32;

    for c in text.chars() {
        match c {
            '<' => angle += 1,
            '>' => angle -= 1,
            '[' => square += 1,
            ']' => square -= 1,
            _ => {}
        }
        if angle < 0 {
            return Err(ParameterError::Unbalanced('>'));
        }
        if square < 0 {
            return Err(ParameterError::Unbalanced(']'));
        }

        if c.is_whitespace() {
            if angle == 0 && square == 0 {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            continue;
        }
        current.push(c);
    }

    if angle != 0 {
        return Err(ParameterError::Unbalanced('<'));
    }
    if square != 0 {
        return Err(ParameterError::Unbalanced('['));
    }
    if !current.is_empty() {
        out.push(current);
    }
    Ok(out)
}

/// Glue `<...>`, `[]` and `...` written after a space back onto the previous word
fn merge_suffixes(words: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        let attaches = word.starts_with('<') || word.starts_with('[') || word.starts_with("...");
        match merged.last_mut() {
            Some(prev) if attaches => {
                // `String ...args` splits into `String` + `...args`
                if let Some(name) = word.strip_prefix("...").filter(|n| !n.is_empty()) {
                    prev.push_str("...");
                    merged.push(name.to_string());
                } else {
                    prev.push_str(&word);
                }
            }
            _ => {
                // `String...args` with no space at all
                match word.find("...") {
                    Some(pos) if pos > 0 && pos + 3 < word.len() => {
                        merged.push(word[..pos + 3].to_string());
                        merged.push(word[pos + 3..].to_string());
                    }
                    _ => merged.push(word),
                }
            }
        }
    }
    merged
}

pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
