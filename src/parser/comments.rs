//! Comment stripping for Java source text
//!
//! Comments are blanked out rather than removed: every byte inside a comment
//! except `\n` becomes a space. The cleaned text therefore has the same byte
//! length and the same newline positions as the original, so offsets found in
//! the cleaned text can be used directly against the original.
//!
//! [`mask_literals`] goes one step further and also blanks the contents of
//! string, char and text-block literals, keeping their quotes.

/// Lexer state while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    StringLiteral,
    CharLiteral,
    TextBlock,
}

/// Blank out `//` and `/* ... */` comments, keeping literals intact.
///
/// Block comments do not nest; the first `*/` closes them. An unterminated
/// block comment runs to the end of the input.
pub fn strip_comments(source: &str) -> String {
    scan(source, false)
}

/// Blank out comments and literal contents, for structural matching only
pub fn mask_literals(source: &str) -> String {
    scan(source, true)
}

fn scan(source: &str, blank_literals: bool) -> String {
    // Literal content byte, blanked when masking
    let literal = |b: u8| if blank_literals && b != b'\n' { b' ' } else { b };

    let bytes = source.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut state = State::Code;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        match state {
            State::Code => match (b, next) {
                (b'/', Some(b'/')) => {
                    out.extend_from_slice(b"  ");
                    state = State::LineComment;
                    i += 2;
                    continue;
                }
                (b'/', Some(b'*')) => {
                    out.extend_from_slice(b"  ");
                    state = State::BlockComment;
                    i += 2;
                    continue;
                }
                (b'"', _) if bytes[i..].starts_with(b"\"\"\"") => {
                    out.extend_from_slice(b"\"\"\"");
                    state = State::TextBlock;
                    i += 3;
                    continue;
                }
                (b'"', _) => {
                    out.push(b);
                    state = State::StringLiteral;
                }
                (b'\'', _) => {
                    out.push(b);
                    state = State::CharLiteral;
                }
                _ => out.push(b),
            },
            State::LineComment => {
                if b == b'\n' {
                    out.push(b);
                    state = State::Code;
                } else {
                    out.push(b' ');
                }
            }
            State::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    out.extend_from_slice(b"  ");
                    state = State::Code;
                    i += 2;
                    continue;
                }
                out.push(if b == b'\n' { b'\n' } else { b' ' });
            }
            State::StringLiteral | State::CharLiteral => {
                let quote = if state == State::StringLiteral { b'"' } else { b'\'' };
                if b == b'\\' {
                    out.push(literal(b));
                    if let Some(escaped) = next {
                        if escaped != b'\n' {
                            out.push(literal(escaped));
                            i += 2;
                            continue;
                        }
                    }
                } else if b == quote || b == b'\n' {
                    // A literal cannot span lines; treat the newline as closing it
                    out.push(b);
                    state = State::Code;
                } else {
                    out.push(literal(b));
                }
            }
            State::TextBlock => {
                if b == b'\\' {
                    out.push(literal(b));
                    if let Some(escaped) = next {
                        out.push(literal(escaped));
                        i += 2;
                        continue;
                    }
                } else if bytes[i..].starts_with(b"\"\"\"") {
                    out.extend_from_slice(b"\"\"\"");
                    state = State::Code;
                    i += 3;
                    continue;
                } else {
                    out.push(literal(b));
                }
            }
        }

        i += 1;
    }

    // Only ASCII bytes are ever substituted, and always for whole comment or
    // literal contents, so multi-byte sequences are either untouched or fully
    // replaced by spaces.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
