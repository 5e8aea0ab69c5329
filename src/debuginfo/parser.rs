//! # Debug-Info Record Parser
//!
//! A cc65 `.dbg` file is line-oriented: each record is
//! `<kind> key=value[,key=value]*`. Values are bare numbers (decimal or
//! `0x`-prefixed hex), bare identifiers, double-quoted strings (commas
//! inside quotes belong to the value), or `+`-joined id lists
//! (`span=1+2+3`).
//!
//! Parsing a line never fails hard: a malformed record yields `None` and
//! the caller skips it with a warning; unknown record kinds are skipped
//! silently.

use std::collections::HashMap;

/// One raw record: the kind keyword plus its key/value properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Record {
    /// Record kind keyword (`file`, `seg`, `span`, ...).
    pub kind: String,
    /// Property map; values are kept raw and converted on access.
    pub props: HashMap<String, String>,
}

impl Record {
    /// Raw property value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    /// Property as an unsigned number (decimal or `0x` hex).
    pub fn num(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(parse_number)
    }

    /// Property as a 64-bit unsigned number.
    pub fn num64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(parse_number64)
    }

    /// Property as a signed number.
    pub fn signed(&self, key: &str) -> Option<i32> {
        let raw = self.get(key)?;
        if let Some(rest) = raw.strip_prefix('-') {
            parse_number(rest).map(|v| -(v as i32))
        } else {
            parse_number(raw).map(|v| v as i32)
        }
    }

    /// Property as a `+`-joined id list.
    pub fn id_list(&self, key: &str) -> Option<Vec<u32>> {
        let raw = self.get(key)?;
        raw.split('+').map(parse_number).collect()
    }

    /// Property as an owned string.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_owned)
    }
}

/// Parses a number in decimal or `0x` hex form.
pub(crate) fn parse_number(raw: &str) -> Option<u32> {
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        raw.parse().ok()
    }
}

fn parse_number64(raw: &str) -> Option<u64> {
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        raw.parse().ok()
    }
}

/// Parses one record line. Returns `None` for blank lines and for lines
/// that do not scan as `kind key=value[,key=value]*`.
pub(crate) fn parse_line(line: &str) -> Option<Record> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (kind, rest) = line.split_once(char::is_whitespace)?;
    if kind.is_empty() || !kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    let mut props = HashMap::new();
    let mut chars = rest.trim_start().char_indices().peekable();
    let rest = rest.trim_start();

    while let Some(&(start, _)) = chars.peek() {
        // key
        let mut key_end = start;
        for (i, c) in chars.by_ref() {
            if c == '=' {
                key_end = i;
                break;
            }
            key_end = i + c.len_utf8();
        }
        let key = &rest[start..key_end];
        if key.is_empty() || key_end >= rest.len() {
            return None;
        }

        // value: quoted (commas inside belong to the value) or bare
        let value;
        match chars.peek() {
            Some(&(vstart, '"')) => {
                chars.next();
                let content_start = vstart + 1;
                let mut content_end = None;
                for (i, c) in chars.by_ref() {
                    if c == '"' {
                        content_end = Some(i);
                        break;
                    }
                }
                let content_end = content_end?; // unterminated quote
                value = &rest[content_start..content_end];
                // consume the separating comma, if any
                match chars.next() {
                    None => {}
                    Some((_, ',')) => {}
                    Some(_) => return None,
                }
            }
            Some(&(vstart, _)) => {
                let mut vend = rest.len();
                for (i, c) in chars.by_ref() {
                    if c == ',' {
                        vend = i;
                        break;
                    }
                }
                value = &rest[vstart..vend];
            }
            None => {
                value = "";
            }
        }
        props.insert(key.to_string(), value.to_string());
    }

    Some(Record {
        kind: kind.to_string(),
        props,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_record() {
        let rec = parse_line("span id=1,seg=2,start=0x10,size=100").unwrap();
        assert_eq!(rec.kind, "span");
        assert_eq!(rec.num("id"), Some(1));
        assert_eq!(rec.num("seg"), Some(2));
        assert_eq!(rec.num("start"), Some(0x10));
        assert_eq!(rec.num("size"), Some(100));
    }

    #[test]
    fn test_parse_quoted_value_with_comma() {
        let rec = parse_line(r#"file id=0,name="dir,with,commas/x.c",size=5"#).unwrap();
        assert_eq!(rec.get("name"), Some("dir,with,commas/x.c"));
        assert_eq!(rec.num("size"), Some(5));
    }

    #[test]
    fn test_parse_id_list() {
        let rec = parse_line("line file=1,line=10,span=1+2+3").unwrap();
        assert_eq!(rec.id_list("span"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_parse_signed_offset() {
        let rec = parse_line("csym id=4,name=\"i\",scope=2,sc=auto,offs=-2").unwrap();
        assert_eq!(rec.signed("offs"), Some(-2));
    }

    #[test]
    fn test_blank_and_malformed_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("justakeyword").is_none());
        assert!(parse_line("file id=0,name=\"unterminated").is_none());
    }

    #[test]
    fn test_number_formats() {
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number("0x2A"), Some(42));
        assert_eq!(parse_number("0X2a"), Some(42));
        assert_eq!(parse_number("nope"), None);
    }
}
