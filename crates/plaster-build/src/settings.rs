//! Process-wide build settings.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

/// Configuration for a [`Build`](crate::Build).
///
/// Settings are fixed once the build is constructed. Every relative path handed
/// to a template operation is resolved against `source_root` or `dist_root`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Directory template sources are read from
    #[serde(rename = "src")]
    pub source_root: PathBuf,

    /// Directory rendered output is written to
    #[serde(rename = "dist")]
    pub dist_root: PathBuf,

    /// Encoding used for every text file the pipeline reads or writes
    #[serde(rename = "file_encoding")]
    pub encoding: TextEncoding,

    /// Directory holding third-party packages (Bootstrap sources)
    #[serde(rename = "dependencies")]
    pub dependency_root: PathBuf,

    /// How an already-rooted path is recognized
    pub containment: Containment,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("./src"),
            dist_root: PathBuf::from("./dist"),
            encoding: TextEncoding::Utf8,
            dependency_root: PathBuf::from("./node_modules"),
            containment: Containment::Segments,
        }
    }
}

/// Text encoding for source and output files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Latin1,
}

impl TextEncoding {
    /// Decode raw file bytes into text.
    pub fn decode(self, bytes: Vec<u8>) -> Result<String, String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes).map_err(|e| e.to_string()),
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }

    /// Encode text into bytes for writing.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, String> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c))
                        .map_err(|_| format!("character {:?} is not representable in latin1", c))
                })
                .collect(),
        }
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            other => Err(format!("unsupported file encoding: {}", other)),
        }
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => f.write_str("utf-8"),
            Self::Latin1 => f.write_str("latin1"),
        }
    }
}

/// Test used to decide whether a path already lives under a root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Containment {
    /// Compare whole path components: `/src-other` is not under `/src`.
    #[default]
    Segments,

    /// Legacy plain string prefix: `/src-other` counts as under `/src`.
    StringPrefix,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = BuildSettings::default();

        assert_eq!(settings.source_root, PathBuf::from("./src"));
        assert_eq!(settings.dist_root, PathBuf::from("./dist"));
        assert_eq!(settings.encoding, TextEncoding::Utf8);
        assert_eq!(settings.containment, Containment::Segments);
    }

    #[test]
    fn parses_encoding_names() {
        assert_eq!("UTF-8".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
        assert_eq!("iso-8859-1".parse::<TextEncoding>(), Ok(TextEncoding::Latin1));
        assert!("shift_jis".parse::<TextEncoding>().is_err());
    }

    #[test]
    fn latin1_round_trips_high_bytes() {
        let text = TextEncoding::Latin1.decode(vec![0x63, 0x61, 0x66, 0xe9]).unwrap();
        assert_eq!(text, "café");
        assert_eq!(
            TextEncoding::Latin1.encode(&text).unwrap(),
            vec![0x63, 0x61, 0x66, 0xe9]
        );
    }

    #[test]
    fn latin1_rejects_wide_characters() {
        assert!(TextEncoding::Latin1.encode("→").is_err());
    }

    #[test]
    fn utf8_rejects_invalid_bytes() {
        assert!(TextEncoding::Utf8.decode(vec![0xff, 0xfe]).is_err());
    }
}
