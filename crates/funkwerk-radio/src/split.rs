// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transport-sized message splitting for the loopback radio.
//
// The modern command set splits the way real basebands do (3GPP TS 23.038):
// text that fits the GSM 7-bit default alphabet gets 160 septets in a single
// frame or 153 per concatenated part (the concatenation header eats the
// rest); anything else is sent as UCS-2 with 70 / 67 UTF-16 code units.
// Extension-table characters cost two septets and never straddle a part
// boundary; neither do surrogate pairs in UCS-2.
//
// The legacy command set predates encoding-aware sizing and cuts on plain
// character counts.

/// Septet budget of an unconcatenated 7-bit frame.
pub const GSM_SINGLE_SEPTETS: usize = 160;
/// Septet budget per part once a concatenation header is present.
pub const GSM_CONCAT_SEPTETS: usize = 153;
/// UTF-16 unit budget of an unconcatenated UCS-2 frame.
pub const UCS2_SINGLE_UNITS: usize = 70;
/// UTF-16 unit budget per concatenated UCS-2 part.
pub const UCS2_CONCAT_UNITS: usize = 67;

/// Encoding-aware split used by the modern command set.
///
/// Deterministic; empty text yields no parts.
pub fn divide(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    match total_septets(text) {
        Some(n) if n <= GSM_SINGLE_SEPTETS => vec![text.to_string()],
        Some(_) => split_by_cost(text, GSM_CONCAT_SEPTETS, septet_cost_lossy),
        None => split_ucs2(text),
    }
}

/// Fixed-length split used by the legacy command set: plain character
/// counts, no encoding awareness. Empty text yields a single empty part.
pub fn divide_fixed(text: &str) -> Vec<String> {
    if text.chars().count() <= GSM_SINGLE_SEPTETS {
        return vec![text.to_string()];
    }
    split_by_cost(text, GSM_CONCAT_SEPTETS, |_| 1)
}

/// Total septet cost of `text`, or `None` if any character falls outside
/// the GSM 7-bit default alphabet (forcing UCS-2).
fn total_septets(text: &str) -> Option<usize> {
    text.chars()
        .try_fold(0usize, |acc, c| Some(acc + septet_cost(c)?))
}

fn split_ucs2(text: &str) -> Vec<String> {
    let total: usize = text.chars().map(char::len_utf16).sum();
    if total <= UCS2_SINGLE_UNITS {
        return vec![text.to_string()];
    }
    split_by_cost(text, UCS2_CONCAT_UNITS, char::len_utf16)
}

/// Greedy accumulation: cut before any character whose cost would overflow
/// the per-part budget, so multi-unit characters stay whole.
fn split_by_cost(text: &str, budget: usize, cost: impl Fn(char) -> usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut part = String::new();
    let mut used = 0usize;

    for c in text.chars() {
        let c_cost = cost(c);
        if used + c_cost > budget {
            parts.push(std::mem::take(&mut part));
            used = 0;
        }
        part.push(c);
        used += c_cost;
    }
    if !part.is_empty() {
        parts.push(part);
    }
    parts
}

/// Septet cost of one character, or `None` when it is not in the default
/// alphabet.
fn septet_cost(c: char) -> Option<usize> {
    if is_gsm_extension(c) {
        Some(2)
    } else if is_gsm_basic(c) {
        Some(1)
    } else {
        None
    }
}

/// Cost function for text already known to be 7-bit encodable.
fn septet_cost_lossy(c: char) -> usize {
    septet_cost(c).unwrap_or(1)
}

/// Extension-table characters: escaped on the wire, two septets each.
fn is_gsm_extension(c: char) -> bool {
    matches!(c, '^' | '{' | '}' | '\\' | '[' | ']' | '~' | '|' | '€')
}

/// Membership in the GSM 7-bit default alphabet (TS 23.038 §6.2.1).
/// Notably absent from the ASCII overlap: backtick.
fn is_gsm_basic(c: char) -> bool {
    match c {
        'A'..='Z' | 'a'..='z' | '0'..='9' => true,
        ' ' | '!' | '"' | '#' | '$' | '%' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | '-'
        | '.' | '/' | ':' | ';' | '<' | '=' | '>' | '?' | '@' | '_' => true,
        '\n' | '\r' => true,
        '£' | '¥' | '¤' | '§' | '¿' | '¡' => true,
        'è' | 'é' | 'ù' | 'ì' | 'ò' | 'Ç' | 'Ø' | 'ø' | 'Å' | 'å' | 'Æ' | 'æ' | 'ß' | 'É'
        | 'Ä' | 'Ö' | 'Ñ' | 'Ü' | 'ä' | 'ö' | 'ñ' | 'ü' | 'à' => true,
        'Δ' | 'Φ' | 'Γ' | 'Λ' | 'Ω' | 'Π' | 'Ψ' | 'Σ' | 'Θ' | 'Ξ' => true,
        _ => false,
    }
}
