//! Value computation for string and block string literals.

/// Computes the value of a `"`-delimited string literal.
///
/// `raw` includes the surrounding quotes. Escapes were validated by the lexer;
/// an invalid `\u` code point decodes to U+FFFD.
#[must_use]
pub fn string_value(raw: &str) -> String {
    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw);

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => value.push('\u{8}'),
            Some('f') => value.push('\u{c}'),
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                value.push(decoded);
            }
            Some(other) => value.push(other),
            None => value.push('\\'),
        }
    }
    value
}

/// Computes the value of a `"""`-delimited block string literal.
///
/// `raw` includes the surrounding triple quotes. Escaped `\"""` sequences are
/// unescaped, common indentation is removed and leading/trailing blank lines
/// are dropped.
#[must_use]
pub fn block_string_value(raw: &str) -> String {
    let inner = raw
        .strip_prefix("\"\"\"")
        .and_then(|s| s.strip_suffix("\"\"\""))
        .unwrap_or(raw);
    dedent_block_string_value(&inner.replace("\\\"\"\"", "\"\"\""))
}

/// Removes common indentation and surrounding blank lines from a raw block.
///
/// The first line never contributes to the common indentation and is never
/// dedented, matching how block strings start right after the opening quotes.
#[must_use]
pub fn dedent_block_string_value(raw: &str) -> String {
    let lines = split_lines(raw);

    let mut common_indent = usize::MAX;
    let mut first_non_empty = None;
    let mut last_non_empty = None;

    for (i, line) in lines.iter().enumerate() {
        let indent = leading_whitespace(line);
        if indent == line.len() {
            continue;
        }
        first_non_empty.get_or_insert(i);
        last_non_empty = Some(i);
        if i != 0 && indent < common_indent {
            common_indent = indent;
        }
    }

    let (Some(first), Some(last)) = (first_non_empty, last_non_empty) else {
        return String::new();
    };

    lines
        .iter()
        .enumerate()
        .take(last + 1)
        .skip(first)
        .map(|(i, line)| {
            if i == 0 || common_indent == usize::MAX {
                *line
            } else {
                line.get(common_indent..).unwrap_or("")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn split_lines(raw: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = raw.as_bytes();
    let mut line_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&raw[line_start..i]);
                line_start = i + 1;
            }
            b'\r' => {
                lines.push(&raw[line_start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                line_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&raw[line_start..]);
    lines
}

fn leading_whitespace(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}
