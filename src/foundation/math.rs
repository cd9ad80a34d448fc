/// Parse a leading floating-point number from `input`, returning the value
/// and the unconsumed remainder.
///
/// Accepts an optional sign, decimal digits with an optional fraction, and an
/// optional exponent. Leading ASCII whitespace is skipped. Returns `None`
/// when no digits are present; callers supply their own defaulting policy.
pub(crate) fn parse_f64_prefix(input: &str) -> Option<(f64, &str)> {
    let s = input.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
    }
    if !s[digits_start..end].bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    // Consume an exponent only when it is complete.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        if bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
                exp_end += 1;
            }
            end = exp_end;
        }
    }

    s[..end].parse().ok().map(|value| (value, &s[end..]))
}

/// Parse a leading integer from `input`, returning the value and the
/// unconsumed remainder. Same permissive policy as [`parse_f64_prefix`].
pub(crate) fn parse_i64_prefix(input: &str) -> Option<(i64, &str)> {
    let s = input.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    s[..end].parse().ok().map(|value| (value, &s[end..]))
}
