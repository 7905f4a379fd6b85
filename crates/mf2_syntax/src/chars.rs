//! Character classes from the MF2 ABNF.
//!
//! Each predicate mirrors one grammar rule. Surrogates cannot occur in a Rust
//! `char`, so the ranges that omit them need no special handling.

/// `ws = SP / HTAB / CR / LF / %x3000`
#[must_use]
pub const fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{3000}')
}

/// `bidi = %x061C / %x200E / %x200F / %x2066-2069`
#[must_use]
pub const fn is_bidi(c: char) -> bool {
    matches!(c, '\u{061C}' | '\u{200E}' | '\u{200F}' | '\u{2066}'..='\u{2069}')
}

/// Optional whitespace: any mix of `ws` and `bidi`.
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    is_ws(c) || is_bidi(c)
}

/// `content-char`: every character except NUL, whitespace, `.`, `@`, `\`,
/// `{`, `|`, `}` and U+3000.
#[must_use]
pub const fn is_content_char(c: char) -> bool {
    matches!(c,
        '\u{01}'..='\u{08}'
        | '\u{0B}'..='\u{0C}'
        | '\u{0E}'..='\u{1F}'
        | '\u{21}'..='\u{2D}'
        | '\u{2F}'..='\u{3F}'
        | '\u{41}'..='\u{5B}'
        | '\u{5D}'..='\u{7A}'
        | '\u{7E}'..='\u{2FFF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{E000}'..='\u{10FFFF}')
}

/// `text-char = content-char / ws / "." / "@" / "|"`
#[must_use]
pub const fn is_text_char(c: char) -> bool {
    is_content_char(c) || is_ws(c) || matches!(c, '.' | '@' | '|')
}

/// `quoted-char = content-char / ws / "." / "@" / "{" / "}"`
#[must_use]
pub const fn is_quoted_char(c: char) -> bool {
    is_content_char(c) || is_ws(c) || matches!(c, '.' | '@' | '{' | '}')
}

/// `reserved-char = content-char / "."`
#[must_use]
pub const fn is_reserved_char(c: char) -> bool {
    is_content_char(c) || c == '.'
}

/// `escaped-char = backslash ( backslash / "{" / "|" / "}" )`, the part after
/// the backslash.
#[must_use]
pub const fn is_escapable(c: char) -> bool {
    matches!(c, '\\' | '{' | '|' | '}')
}

/// `name-start`
#[must_use]
pub const fn is_name_start(c: char) -> bool {
    matches!(c,
        'a'..='z'
        | 'A'..='Z'
        | '_'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{61B}'
        | '\u{61D}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFC}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// `name-char = name-start / DIGIT / "-" / "." / %xB7 / %x300-36F / %x203F-2040`
#[must_use]
pub const fn is_name_char(c: char) -> bool {
    is_name_start(c)
        || matches!(c,
            '0'..='9'
            | '-'
            | '.'
            | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// `reserved-annotation-start = "!" / "%" / "*" / "+" / "<" / ">" / "?" / "~"`
#[must_use]
pub const fn is_reserved_start(c: char) -> bool {
    matches!(c, '!' | '%' | '*' | '+' | '<' | '>' | '?' | '~')
}

/// `private-start = "^" / "&"`
#[must_use]
pub const fn is_private_start(c: char) -> bool {
    matches!(c, '^' | '&')
}

/// Returns true if `s` is a valid `name`.
#[must_use]
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(is_name_start) && chars.all(is_name_char)
}

/// Returns true if `s` matches `number-literal`:
/// `["-"] (%x30 / (%x31-39 *DIGIT)) ["." 1*DIGIT] [%i"e" ["-" / "+"] 1*DIGIT]`.
#[must_use]
pub fn is_number_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            digits(&mut i);
        }
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if digits(&mut i) == 0 {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'-' | b'+')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}
