use crate::error::Error;
use std::path::{Path, PathBuf};

pub const DEFAULT_ORIGIN: u16 = 0x0600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Lowest address the output image can represent.
    pub origin: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            origin: DEFAULT_ORIGIN,
        }
    }
}

impl Config {
    pub fn with_origin(origin: u16) -> Self {
        Config { origin }
    }
}

/// Parse a numeric literal in assembler syntax: `$FF`, `%1010`, `017`, `123`.
pub fn parse_literal(s: &str) -> Option<u32> {
    let (digits, radix) = if let Some(hex) = s.strip_prefix('$') {
        (hex, 16)
    } else if let Some(bin) = s.strip_prefix('%') {
        (bin, 2)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

/// Value parser for `--origin`.
pub fn parse_origin(s: &str) -> Result<u16, Error> {
    parse_literal(s)
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| Error::InvalidOrigin(s.to_string()))
}

#[test]
fn test() {
    assert_eq!(Config::default().origin, 0x0600);
    assert_eq!(parse_literal("$10"), Some(16));
    assert_eq!(parse_literal("%00010000"), Some(16));
    assert_eq!(parse_literal("020"), Some(16));
    assert_eq!(parse_literal("16"), Some(16));
    assert_eq!(parse_literal("0"), Some(0));
    assert_eq!(parse_literal("$"), None);
    assert_eq!(parse_literal("09"), None);
    assert_eq!(parse_origin("$0800").ok(), Some(0x0800));
    assert!(parse_origin("$10000").is_err());
    assert!(parse_origin("hoge").is_err());
    assert!(parse_origin("+5").is_err());
    assert!(parse_origin("$+600").is_err());
    assert!(parse_origin("-1").is_err());
}

/// `prog.asm` -> `prog.bin`. The input must carry the `.asm` extension.
pub fn output_path(input: &str) -> Result<PathBuf, Error> {
    let path = Path::new(input);
    match (path.file_stem(), path.extension()) {
        (Some(_), Some(ext)) if ext == "asm" => Ok(path.with_extension("bin")),
        _ => Err(Error::WrongExtension(input.to_string())),
    }
}

#[test]
fn test_output_path() {
    assert_eq!(output_path("dir/prog.asm").ok(), Some(PathBuf::from("dir/prog.bin")));
    assert!(output_path("prog.s").is_err());
    assert!(output_path("prog").is_err());
    assert!(output_path(".asm").is_err());
}
