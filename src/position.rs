//! Pile-number to image mapping read from the survey's file index.
//!
//! Each line of the index looks like `12+345.000m->img001.jpg->...` and has
//! exactly three `->` separated fields. The first field is a chainage token,
//! the second the image file name.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Field separator used by index lines.
pub const FIELD_DELIMITER: &str = "->";

/// Number of fields on a well-formed index line.
pub const FIELDS_PER_LINE: usize = 3;

/// A normalized pile number, e.g. `12345` for chainage `12+345.000m`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PileKey(String);

impl PileKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Move the pile back by `meters`.
    ///
    /// Works on the trailing run of digits, so a prefix such as `K` survives.
    /// A zero-padded run keeps its width. Saturates at zero.
    ///
    /// # Example
    ///
    /// ```
    /// use pavement_report::position::PileKey;
    ///
    /// assert_eq!(PileKey::new("12345").offset_back(2).unwrap().as_str(), "12343");
    /// assert_eq!(PileKey::new("K0010").offset_back(2).unwrap().as_str(), "K0008");
    /// ```
    pub fn offset_back(&self, meters: u64) -> Result<PileKey> {
        let digits_start = self
            .0
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)
            .ok_or_else(|| {
                ReportError::InvalidPile(format!("pile {:?} does not end in digits", self.0))
            })?;

        let (prefix, digits) = self.0.split_at(digits_start);
        let value: u64 = digits.parse().map_err(|_| {
            ReportError::InvalidPile(format!("pile {:?} is out of range", self.0))
        })?;
        let shifted = value.saturating_sub(meters);
        let width = if digits.len() > 1 && digits.starts_with('0') {
            digits.len()
        } else {
            0
        };

        Ok(PileKey(format!(
            "{}{:0width$}",
            prefix,
            shifted,
            width = width
        )))
    }
}

impl fmt::Display for PileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How chainage tokens are reduced to pile keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileKeyFormat {
    /// Characters dropped from the end of the key after `+` is stripped.
    pub suffix_width: usize,
}

impl PileKeyFormat {
    pub fn new(suffix_width: usize) -> Self {
        Self { suffix_width }
    }

    /// Derive a pile key from a raw chainage token.
    ///
    /// Keeps the text before the first `.`, removes every `+`, then drops
    /// `suffix_width` trailing characters.
    ///
    /// # Example
    ///
    /// ```
    /// use pavement_report::position::PileKeyFormat;
    ///
    /// let key = PileKeyFormat::default().pile_key("12+345.000m");
    /// assert_eq!(key.as_str(), "12345");
    /// ```
    pub fn pile_key(&self, token: &str) -> PileKey {
        let token = token.trim();
        let integral = token.split('.').next().unwrap_or(token);
        let stripped: String = integral.chars().filter(|&c| c != '+').collect();

        let keep = stripped.chars().count().saturating_sub(self.suffix_width);
        PileKey(stripped.chars().take(keep).collect())
    }
}

/// One position of the survey: a pile and the image taken there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionEntry {
    pub pile: PileKey,
    pub image_filename: String,
}

/// Ordered pile to image mapping.
///
/// Iteration follows the order in which piles first appear in the index file;
/// segment boundaries are computed from this order, not from pile values.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    entries: Vec<PositionEntry>,
    by_pile: HashMap<PileKey, usize>,
    /// Non-blank lines skipped because they did not have exactly three fields.
    malformed_lines: usize,
}

impl PositionIndex {
    /// Read a position index file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Parse`] if the file cannot be read.
    pub fn load<P: AsRef<Path>>(path: P, format: &PileKeyFormat) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ReportError::parse(path, format!("cannot read position index: {}", e)))?;
        Ok(Self::parse(&text, format))
    }

    /// Parse position index text.
    ///
    /// Lines without exactly three fields are skipped. A repeated pile keeps
    /// its first position and takes the later image name.
    pub fn parse(text: &str, format: &PileKeyFormat) -> Self {
        let mut index = PositionIndex::default();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
            if fields.len() != FIELDS_PER_LINE {
                debug!(line = line_no + 1, "skipping malformed index line");
                index.malformed_lines += 1;
                continue;
            }

            let pile = format.pile_key(fields[0]);
            index.insert(pile, fields[1].trim().to_string());
        }

        index
    }

    /// Insert or overwrite a pile.
    pub fn insert(&mut self, pile: PileKey, image_filename: String) {
        match self.by_pile.get(&pile) {
            Some(&i) => {
                warn!(
                    pile = %pile,
                    previous = %self.entries[i].image_filename,
                    replacement = %image_filename,
                    "duplicate pile in position index, keeping the later image"
                );
                self.entries[i].image_filename = image_filename;
            }
            None => {
                self.by_pile.insert(pile.clone(), self.entries.len());
                self.entries.push(PositionEntry {
                    pile,
                    image_filename,
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PositionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionEntry> {
        self.entries.iter()
    }

    pub fn malformed_lines(&self) -> usize {
        self.malformed_lines
    }

    /// Image recorded for a pile.
    pub fn image_for(&self, pile: &PileKey) -> Option<&str> {
        self.by_pile
            .get(pile)
            .map(|&i| self.entries[i].image_filename.as_str())
    }

    /// Index of the first position whose image name equals `image_filename`.
    pub fn position_of(&self, image_filename: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.image_filename == image_filename)
    }

    /// Map from image file name to position, first match winning.
    pub fn image_lookup(&self) -> HashMap<&str, usize> {
        let mut lookup = HashMap::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            lookup.entry(entry.image_filename.as_str()).or_insert(i);
        }
        lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pile_key_literals() {
        let format = PileKeyFormat::default();
        assert_eq!(format.pile_key("12+345.000m").as_str(), "12345");
        assert_eq!(format.pile_key("K0+020.500").as_str(), "K0020");
        assert_eq!(format.pile_key("12345").as_str(), "12345");
        assert_eq!(format.pile_key(" 1+2+3.4.5 ").as_str(), "123");
    }

    #[test]
    fn test_pile_key_suffix_width() {
        assert_eq!(PileKeyFormat::new(1).pile_key("12+345.000m").as_str(), "1234");
        assert_eq!(PileKeyFormat::new(3).pile_key("12+345.000m").as_str(), "12");
        assert_eq!(PileKeyFormat::new(9).pile_key("12+345.000m").as_str(), "");
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let text = "1+000.0->a.jpg->x\nbroken line\n1+002.0->b.jpg\n1+004.0->c.jpg->y->z\n\n1+006.0->d.jpg->w\n";
        let index = PositionIndex::parse(text, &PileKeyFormat::default());

        assert_eq!(index.len(), 2);
        assert_eq!(index.malformed_lines(), 3);
        assert_eq!(index.entries()[0].pile.as_str(), "1000");
        assert_eq!(index.entries()[1].image_filename, "d.jpg");
    }

    #[test]
    fn test_duplicate_pile_keeps_position_and_takes_later_image() {
        let text = "1+000.0->a.jpg->x\n1+002.0->b.jpg->x\n1+000.9->c.jpg->x\n";
        let index = PositionIndex::parse(text, &PileKeyFormat::default());

        assert_eq!(index.len(), 2);
        assert_eq!(index.entries()[0].pile.as_str(), "1000");
        assert_eq!(index.entries()[0].image_filename, "c.jpg");
        assert_eq!(index.image_for(&PileKey::new("1000")), Some("c.jpg"));
        assert_eq!(index.position_of("a.jpg"), None);
    }

    #[test]
    fn test_first_matching_image_wins() {
        let text = "1+000.0->same.jpg->x\n1+002.0->same.jpg->x\n";
        let index = PositionIndex::parse(text, &PileKeyFormat::default());

        assert_eq!(index.position_of("same.jpg"), Some(0));
        assert_eq!(index.image_lookup().get("same.jpg"), Some(&0));
    }

    #[test]
    fn test_offset_back() {
        assert_eq!(PileKey::new("12345").offset_back(2).unwrap().as_str(), "12343");
        assert_eq!(PileKey::new("0001").offset_back(2).unwrap().as_str(), "0000");
        assert_eq!(PileKey::new("1000").offset_back(2).unwrap().as_str(), "998");
        assert_eq!(PileKey::new("K0+020").offset_back(2).unwrap().as_str(), "K0+018");
        assert_eq!(PileKey::new("K1").offset_back(0).unwrap().as_str(), "K1");
        assert!(matches!(
            PileKey::new("K").offset_back(2),
            Err(ReportError::InvalidPile(_))
        ));
        assert!(PileKey::new("").offset_back(2).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = PositionIndex::load("/path/that/does/not/exist.txt", &PileKeyFormat::default());
        assert!(matches!(result, Err(ReportError::Parse { .. })));
    }
}
