//! Output filename templates in yt-dlp's `%(field)s` syntax.
//!
//! The template string itself is passed to yt-dlp unchanged; rendering here is
//! only used to predict where a file will land (dry runs, `info`).

use crate::url_model::sanitize_filename_for_linux;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Value rendered for fields that are missing from the metadata.
const MISSING_FIELD: &str = "NA";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    /// `%(name)<flags><conversion>`, e.g. `%(playlist_index)03d`.
    Field {
        name: String,
        flags: String,
        conversion: char,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateErrorKind {
    /// `%(` without a closing `)`.
    Unterminated,
    /// `)` not followed by a printf-style conversion such as `s` or `03d`.
    UnsupportedConversion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateError {
    pub kind: TemplateErrorKind,
    pub template: String,
    pub position: usize,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            TemplateErrorKind::Unterminated => "unterminated placeholder",
            TemplateErrorKind::UnsupportedConversion => "unsupported conversion in placeholder",
        };
        write!(
            f,
            "{} at byte {} in output template {:?}",
            what, self.position, self.template
        )
    }
}

impl std::error::Error for TemplateError {}

/// A parsed output template such as `%(title)s.%(ext)s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    raw: String,
    pieces: Vec<Piece>,
}

fn is_conversion_flag(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '#' | '0' | '-' | '+' | ' ' | '.')
}

impl OutputTemplate {
    /// Parses `%(name)<conversion>` placeholders (`s`, `d`, `03d`, ...);
    /// `%%` is a literal percent sign. Any other `%` is kept literally, as yt-dlp does.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut rest = raw;
        let mut offset = 0;

        while let Some(idx) = rest.find('%') {
            literal.push_str(&rest[..idx]);
            let after = &rest[idx + 1..];
            if let Some(tail) = after.strip_prefix('%') {
                literal.push('%');
                offset += idx + 2;
                rest = tail;
            } else if let Some(inner) = after.strip_prefix('(') {
                let error = |kind| TemplateError {
                    kind,
                    template: raw.to_string(),
                    position: offset + idx,
                };
                let close = inner
                    .find(')')
                    .ok_or_else(|| error(TemplateErrorKind::Unterminated))?;
                let spec = &inner[close + 1..];
                let flags_len = spec
                    .find(|c: char| !is_conversion_flag(c))
                    .ok_or_else(|| error(TemplateErrorKind::UnsupportedConversion))?;
                let conversion = spec[flags_len..]
                    .chars()
                    .next()
                    .filter(char::is_ascii_alphabetic)
                    .ok_or_else(|| error(TemplateErrorKind::UnsupportedConversion))?;

                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Field {
                    name: inner[..close].to_string(),
                    flags: spec[..flags_len].to_string(),
                    conversion,
                });
                let consumed = idx + 2 + close + 1 + flags_len + conversion.len_utf8();
                offset += consumed;
                rest = &rest[consumed..];
            } else {
                literal.push('%');
                offset += idx + 1;
                rest = after;
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self {
            raw: raw.to_string(),
            pieces,
        })
    }

    /// The template text exactly as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Field names referenced by the template, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Field { name, .. } => Some(name.as_str()),
            Piece::Literal(_) => None,
        })
    }

    /// Substitutes metadata values. A field written as `a,b` takes the first
    /// alternative present; absent fields render as `NA`. Integer conversions
    /// (`d`, `i`) honour width and zero padding.
    pub fn render(&self, values: &HashMap<String, String>) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(s) => out.push_str(s),
                Piece::Field {
                    name,
                    flags,
                    conversion,
                } => {
                    let value = name
                        .split(',')
                        .map(str::trim)
                        .find_map(|alt| values.get(alt).filter(|v| !v.is_empty()));
                    match value {
                        Some(v) => {
                            let formatted = format_value(v, flags, *conversion);
                            out.push_str(&sanitize_filename_for_linux(&formatted));
                        }
                        None => out.push_str(MISSING_FIELD),
                    }
                }
            }
        }
        out
    }

    /// Renders the template and joins it under `dir`.
    pub fn render_path(&self, dir: &Path, values: &HashMap<String, String>) -> PathBuf {
        dir.join(self.render(values))
    }

    /// The `-o` argument for yt-dlp: the template placed inside `dir`.
    pub fn in_dir(&self, dir: &Path) -> String {
        dir.join(&self.raw).to_string_lossy().into_owned()
    }
}

fn format_value(value: &str, flags: &str, conversion: char) -> String {
    if !matches!(conversion, 'd' | 'i') {
        return value.to_string();
    }
    let number = value
        .parse::<i64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().map(|f| f.trunc() as i64));
    let Some(n) = number else {
        return value.to_string();
    };
    let width: usize = flags
        .trim_start_matches(|c| matches!(c, '#' | '0' | '-' | '+' | ' '))
        .split('.')
        .next()
        .and_then(|w| w.parse().ok())
        .unwrap_or(0);
    if flags.starts_with('0') {
        format!("{:0width$}", n)
    } else if flags.contains('-') {
        format!("{:<width$}", n)
    } else {
        format!("{:>width$}", n)
    }
}
