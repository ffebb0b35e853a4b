//! Settings document: the in-memory form of one INI file.
//!
//! A [`Document`] is an ordered list of [`Section`]s, and each section is an
//! ordered list of `key=value` entries.  Order is preserved exactly as read
//! (and as inserted), so saving a document that was loaded and then augmented
//! produces a stable file: existing lines keep their position and new keys
//! are appended to the end of their section.
//!
//! # File format (for beginners)
//!
//! The patch settings use the classic Westwood-style INI layout:
//!
//! ```text
//! ; comments start with a semicolon
//! [FEATURES]
//! RALLY_POINTS=1
//! ASTAR_PATHING=0
//!
//! [SETTINGS]
//! WALL_BUILD_LENGTH=5
//! ```
//!
//! Parsing is deliberately forgiving.  A user who hand-edits the file and
//! leaves a stray line behind still gets every well-formed entry back:
//!
//! - Blank lines and `;` comments (whole-line or trailing) are ignored.
//! - Lines before the first `[SECTION]` header are ignored.
//! - Lines without an `=` are ignored.
//! - Repeated keys within a section keep the first occurrence.
//! - A repeated section header continues the earlier section.
//!
//! Section and key lookups are ASCII case-insensitive, but the spelling found
//! in the file is what gets written back out.
//!
//! Files are read as UTF-8 when they decode as such and as Latin-1 (ANSI)
//! otherwise.  [`Document::to_bytes`] writes a document back in the encoding
//! it was read with, so rewriting an ANSI file leaves the bytes of existing
//! values unchanged.

use std::fmt;

/// Line terminator used when the document is written back to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Detects the terminator of the first line break in `text`.
    fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(pos) if pos > 0 && text.as_bytes()[pos - 1] == b'\r' => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }
}

/// Byte encoding a document is written back with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TextEncoding {
    #[default]
    Utf8,
    /// One byte per character, code points `U+0000..=U+00FF`.
    Latin1,
}

/// A named, ordered group of `key=value` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Section name as spelled in the source text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterates `(key, value)` pairs in stored order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    /// Inserts `key`, or replaces its value in place if already present.
    fn put(&mut self, key: &str, value: &str) {
        match self.position(key) {
            Some(i) => self.entries[i].1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }
}

/// An ordered settings document.
///
/// Invariants: section names are unique within the document and keys are
/// unique within a section (both compared ASCII case-insensitively).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
    line_ending: LineEnding,
    encoding: TextEncoding,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses INI text into a document.
    ///
    /// Parsing never fails: malformed lines are skipped and everything that
    /// can be understood is kept.  See the module docs for the exact rules.
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut doc = Document {
            sections: Vec::new(),
            line_ending: LineEnding::detect(text),
            encoding: TextEncoding::Utf8,
        };

        let mut current: Option<usize> = None;
        for raw in text.lines() {
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                current = rest
                    .find(']')
                    .map(|end| rest[..end].trim())
                    .filter(|name| !name.is_empty())
                    .map(|name| doc.section_index_or_insert(name));
                continue;
            }

            let Some(index) = current else {
                continue;
            };
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            let section = &mut doc.sections[index];
            if !section.contains_key(key) {
                section.entries.push((key.to_string(), value.trim().to_string()));
            }
        }

        doc
    }

    /// Parses raw file bytes.
    ///
    /// UTF-8 is tried first; anything else is treated as Latin-1 (ANSI), where
    /// each byte maps to the code point of the same value.  The encoding used
    /// is remembered for [`Document::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::parse(text),
            Err(_) => {
                let text: String = bytes.iter().map(|&b| char::from(b)).collect();
                Self {
                    encoding: TextEncoding::Latin1,
                    ..Self::parse(&text)
                }
            }
        }
    }

    /// Serializes the document back to INI text.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Serializes the document to file bytes in the encoding it was read with.
    ///
    /// In a Latin-1 document, characters above `U+00FF` (which can only come
    /// from values merged in from a UTF-8 file) are written as `?`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let text = self.to_text();
        match self.encoding {
            TextEncoding::Utf8 => text.into_bytes(),
            TextEncoding::Latin1 => text.chars().map(|c| u8::try_from(c).unwrap_or(b'?')).collect(),
        }
    }

    /// Removes every section.  The line ending and encoding are kept.
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Iterates sections in stored order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.sections.iter()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.section_index(name).map(|i| &self.sections[i])
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section_index(name).is_some()
    }

    /// Returns `true` if `key` exists under `section`, whatever its value.
    pub fn has_key(&self, section: &str, key: &str) -> bool {
        self.section(section).is_some_and(|s| s.contains_key(key))
    }

    pub fn get_string(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Reads an integer setting.
    ///
    /// Returns `None` when the key is absent or its value is not a decimal
    /// integer that fits in an `i32`.
    pub fn get_int(&self, section: &str, key: &str) -> Option<i32> {
        self.get_string(section, key).and_then(|v| v.trim().parse::<i32>().ok())
    }

    /// Reads an integer setting, returning `fallback` verbatim when the key is
    /// absent or non-numeric.
    pub fn get_int_or(&self, section: &str, key: &str, fallback: i32) -> i32 {
        self.get_int(section, key).unwrap_or(fallback)
    }

    /// Reads a 0/1 style toggle.  Any non-zero integer is `true`.
    pub fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        self.get_int(section, key).map(|v| v != 0)
    }

    /// Stores `value` under `section`/`key`.
    ///
    /// A missing section is appended after the existing ones; a missing key is
    /// appended to the end of its section; an existing key keeps its position
    /// and has its value replaced.
    pub fn put_string(&mut self, section: &str, key: &str, value: &str) {
        let index = self.section_index_or_insert(section);
        self.sections[index].put(key, value);
    }

    fn section_index(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name.eq_ignore_ascii_case(name))
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.section_index(name) {
            Some(i) => i,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }
}

impl fmt::Display for Document {
    /// Writes `[SECTION]` blocks separated by a blank line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let eol = self.line_ending.as_str();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                f.write_str(eol)?;
            }
            write!(f, "[{}]{eol}", section.name)?;
            for (key, value) in section.entries() {
                write!(f, "{key}={value}{eol}")?;
            }
        }
        Ok(())
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
