// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Minified-size estimation for CSS and JavaScript bodies.
//!
//! These estimators only strip comments and redundant whitespace; they never
//! rename or restructure code. `None` means the body could not be processed
//! (not UTF-8, unterminated comment or string) and callers should fall back
//! to the raw length.

/// Estimated size of `body` after CSS minification.
pub fn minified_size_css(body: &[u8]) -> Option<usize> {
    let src = std::str::from_utf8(body).ok()?;
    minify_css(src).map(|s| s.len())
}

/// Estimated size of `body` after JavaScript minification.
pub fn minified_size_js(body: &[u8]) -> Option<usize> {
    let src = std::str::from_utf8(body).ok()?;
    minify_js(src).map(|s| s.len())
}

fn is_css_punct(c: char) -> bool {
    matches!(c, '{' | '}' | ';' | ':' | ',' | '>' | '(' | ')')
}

fn minify_css(src: &str) -> Option<String> {
    let chars: Vec<char> = src.chars().collect();
    let mut out = String::with_capacity(src.len());
    let mut pending_space = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '/' && chars.get(i + 1) == Some(&'*') {
            let end = find_seq(&chars, i + 2, &['*', '/'])?;
            i = end + 2;
            pending_space = true;
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            i += 1;
            continue;
        }
        if c == '"' || c == '\'' {
            let end = skip_quoted(&chars, i)?;
            flush_space(&mut out, &mut pending_space, c, is_css_punct);
            out.extend(&chars[i..end]);
            i = end;
            continue;
        }
        if c == '}' && out.ends_with(';') {
            out.pop();
        }
        flush_space(&mut out, &mut pending_space, c, is_css_punct);
        out.push(c);
        i += 1;
    }
    Some(out)
}

fn is_js_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || !c.is_ascii()
}

fn minify_js(src: &str) -> Option<String> {
    let chars: Vec<char> = src.chars().collect();
    let mut out = String::with_capacity(src.len());
    // None: no whitespace pending; Some(true): pending run contained a newline
    let mut pending: Option<bool> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c == '/' && next == Some('/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && next == Some('*') {
            let end = find_seq(&chars, i + 2, &['*', '/'])?;
            let had_newline = chars[i..end].contains(&'\n');
            pending = Some(pending.unwrap_or(false) || had_newline);
            i = end + 2;
            continue;
        }
        if c.is_whitespace() {
            pending = Some(pending.unwrap_or(false) || c == '\n' || c == '\r');
            i += 1;
            continue;
        }

        if let Some(newline) = pending.take() {
            let prev = out.chars().last();
            match prev {
                Some(p) if newline && !matches!(p, '{' | ';' | ',' | '(' | '[') => out.push('\n'),
                Some(p) if is_js_word(p) && is_js_word(c) => out.push(' '),
                // keep `a + +b` and `a - -b` apart
                Some(p) if (p == '+' || p == '-') && p == c => out.push(' '),
                _ => {}
            }
        }

        let end = if c == '"' || c == '\'' || c == '`' {
            skip_quoted(&chars, i)?
        } else if c == '/' && regex_allowed(&out) {
            skip_regex(&chars, i)?
        } else {
            i + 1
        };
        out.extend(&chars[i..end]);
        i = end;
    }
    Some(out.trim_end().to_string())
}

fn flush_space(out: &mut String, pending: &mut bool, next: char, punct: fn(char) -> bool) {
    if *pending {
        if let Some(prev) = out.chars().last() {
            if !punct(prev) && !punct(next) {
                out.push(' ');
            }
        }
        *pending = false;
    }
}

fn find_seq(chars: &[char], from: usize, seq: &[char]) -> Option<usize> {
    (from..chars.len().saturating_sub(seq.len() - 1)).find(|&j| chars[j..].starts_with(seq))
}

/// Index just past the closing quote of the string starting at `start`.
fn skip_quoted(chars: &[char], start: usize) -> Option<usize> {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return Some(i + 1),
            '\n' if quote != '`' => return None,
            _ => i += 1,
        }
    }
    None
}

fn regex_allowed(out: &str) -> bool {
    match out.chars().last() {
        None => true,
        Some(p) => matches!(
            p,
            '(' | ',' | '=' | ':' | '[' | '!' | '&' | '|' | '?' | '{' | '}' | ';' | '\n'
        ),
    }
}

fn skip_regex(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    let mut in_class = false;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '[' => {
                in_class = true;
                i += 1;
            }
            ']' => {
                in_class = false;
                i += 1;
            }
            '/' if !in_class => return Some(i + 1),
            '\n' => return None,
            _ => i += 1,
        }
    }
    None
}
