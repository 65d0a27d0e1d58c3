//! Perspective strings
//!
//! A perspective is a one-line snapshot of every pane's layout state plus
//! the sizes of the docks, used to save and restore arrangements:
//!
//! ```text
//! layout2|name=explorer;caption=Explorer;state=1980;dir=4;layer=0;row=0;pos=0;prop=100000;bestw=200;besth=100;minw=-1;minh=-1;maxw=-1;maxh=-1;floatx=-1;floaty=-1;floatw=-1;floath=-1|dock_size(4,0,0)=200|
//! ```
//!
//! Records are separated by `|`, fields by `;`, keys from values by `=`.
//! Inside text fields those three characters are escaped with `\`. A
//! backslash is doubled when it precedes one of them (or another backslash)
//! or ends the field; any other backslash is kept as is.
//!
//! Loading is a best-effort merge into an existing pane set. Records that
//! cannot be parsed are skipped one by one; only a missing or foreign header
//! fails the whole string.

use std::fmt::Write as _;

use thiserror::Error;

use crate::geometry::Size;
use crate::panel::{DockDirection, DockInfo, DockKey, PaneFlags, PaneInfo, PaneSet};

/// Version tag every perspective string starts with
pub const LAYOUT_VERSION: &str = "layout2";

const SPECIAL: [char; 4] = [';', '|', '=', '\\'];

/// Failure of a whole perspective load
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PerspectiveError {
    #[error("perspective string is empty")]
    Empty,
    #[error("unsupported perspective version {0:?}, expected \"layout2\"")]
    UnsupportedVersion(String),
}

/// Why one record was skipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing required key {0:?}")]
    MissingKey(&'static str),
    #[error("invalid number {value:?} for key {key:?}")]
    InvalidNumber { key: String, value: String },
    #[error("unknown dock direction {0}")]
    InvalidDirection(i32),
    #[error("field {0:?} is not a key=value pair")]
    MalformedField(String),
    #[error("malformed dock size record {0:?}")]
    MalformedDockSize(String),
}

/// Outcome of a load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records applied to a live pane
    pub applied: usize,
    /// Well-formed records whose name matched no live pane
    pub unmatched: usize,
    /// Malformed pane or dock records
    pub skipped: usize,
    /// Dock sizes to restore
    pub dock_sizes: Vec<(DockKey, i32)>,
}

// ============================================================================
// Escaping
// ============================================================================

/// Escape a text field for embedding in a perspective
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ';' | '|' | '=' => {
                out.push('\\');
                out.push(c);
            }
            '\\' => {
                let doubled = match chars.peek() {
                    None => true,
                    Some(next) => SPECIAL.contains(next),
                };
                out.push('\\');
                if doubled {
                    out.push('\\');
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Reverse of [`escape`]
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if SPECIAL.contains(&next) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Split on `separator`, leaving escaped separators inside the pieces
fn split_unescaped(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();
    while let Some((index, c)) = iter.next() {
        if c == '\\' {
            if let Some(&(_, next)) = iter.peek() {
                if SPECIAL.contains(&next) {
                    iter.next();
                }
            }
        } else if c == separator {
            pieces.push(&text[start..index]);
            start = index + c.len_utf8();
        }
    }
    pieces.push(&text[start..]);
    pieces
}

// ============================================================================
// Save
// ============================================================================

/// Serialize one pane record (without the record separator)
pub fn save_pane(pane: &PaneInfo) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "name={};caption={};state={};dir={};layer={};row={};pos={};prop={};\
         bestw={};besth={};minw={};minh={};maxw={};maxh={};\
         floatx={};floaty={};floatw={};floath={}",
        escape(&pane.name),
        escape(&pane.caption),
        pane.flags.bits(),
        pane.direction.code(),
        pane.layer,
        pane.row,
        pane.position,
        pane.proportion,
        pane.best_size.width,
        pane.best_size.height,
        pane.min_size.width,
        pane.min_size.height,
        pane.max_size.width,
        pane.max_size.height,
        pane.floating_pos.x,
        pane.floating_pos.y,
        pane.floating_size.width,
        pane.floating_size.height,
    );
    out
}

/// Serialize every pane (in set order) and every dock size
pub fn save(panes: &PaneSet, docks: &[DockInfo]) -> String {
    let mut out = String::from(LAYOUT_VERSION);
    out.push('|');

    for (_, pane) in panes.iter() {
        out.push_str(&save_pane(pane));
        out.push('|');
    }

    for dock in docks {
        let _ = write!(
            out,
            "dock_size({},{},{})={}|",
            dock.direction().code(),
            dock.layer(),
            dock.row(),
            dock.size
        );
    }

    tracing::debug!(panes = panes.len(), docks = docks.len(), "Saved perspective");
    out
}

// ============================================================================
// Load
// ============================================================================

/// Parsed pane record. Optional fields keep the live pane's value when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneRecord {
    pub name: String,
    pub caption: Option<String>,
    pub state: u32,
    pub direction: i32,
    pub layer: i32,
    pub row: i32,
    pub position: i32,
    pub proportion: Option<i32>,
    pub best_width: Option<i32>,
    pub best_height: Option<i32>,
    pub min_width: Option<i32>,
    pub min_height: Option<i32>,
    pub max_width: Option<i32>,
    pub max_height: Option<i32>,
    pub float_x: Option<i32>,
    pub float_y: Option<i32>,
    pub float_width: Option<i32>,
    pub float_height: Option<i32>,
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, RecordError> {
    value.trim().parse().map_err(|_| RecordError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parse one pane record
pub fn parse_pane(record: &str) -> Result<PaneRecord, RecordError> {
    let mut parsed = PaneRecord::default();
    let mut name = None;
    let mut state = None;
    let mut direction = None;
    let mut layer = None;
    let mut row = None;
    let mut position = None;

    for field in split_unescaped(record, ';') {
        if field.is_empty() {
            continue;
        }
        let pieces = split_unescaped(field, '=');
        let [key, rest @ ..] = pieces.as_slice() else {
            return Err(RecordError::MalformedField(field.to_string()));
        };
        if rest.is_empty() {
            return Err(RecordError::MalformedField(field.to_string()));
        }
        // Older writers did not escape '=' inside values
        let joined = rest.join("=");
        let value = joined.as_str();
        let key = key.trim();

        match key {
            "name" => name = Some(unescape(value)),
            "caption" => parsed.caption = Some(unescape(value)),
            "state" => state = Some(parse_number::<u32>(key, value)?),
            "dir" => direction = Some(parse_number::<i32>(key, value)?),
            "layer" => layer = Some(parse_number(key, value)?),
            "row" => row = Some(parse_number(key, value)?),
            "pos" => position = Some(parse_number(key, value)?),
            "prop" => parsed.proportion = Some(parse_number(key, value)?),
            "bestw" => parsed.best_width = Some(parse_number(key, value)?),
            "besth" => parsed.best_height = Some(parse_number(key, value)?),
            "minw" => parsed.min_width = Some(parse_number(key, value)?),
            "minh" => parsed.min_height = Some(parse_number(key, value)?),
            "maxw" => parsed.max_width = Some(parse_number(key, value)?),
            "maxh" => parsed.max_height = Some(parse_number(key, value)?),
            "floatx" => parsed.float_x = Some(parse_number(key, value)?),
            "floaty" => parsed.float_y = Some(parse_number(key, value)?),
            "floatw" => parsed.float_width = Some(parse_number(key, value)?),
            "floath" => parsed.float_height = Some(parse_number(key, value)?),
            other => tracing::trace!(key = other, "Ignoring unknown perspective key"),
        }
    }

    parsed.name = name.ok_or(RecordError::MissingKey("name"))?;
    parsed.state = state.ok_or(RecordError::MissingKey("state"))?;
    parsed.direction = direction.ok_or(RecordError::MissingKey("dir"))?;
    parsed.layer = layer.ok_or(RecordError::MissingKey("layer"))?;
    parsed.row = row.ok_or(RecordError::MissingKey("row"))?;
    parsed.position = position.ok_or(RecordError::MissingKey("pos"))?;

    if DockDirection::from_code(parsed.direction).is_none() {
        return Err(RecordError::InvalidDirection(parsed.direction));
    }

    Ok(parsed)
}

impl PaneRecord {
    /// Layout descriptor for this record, starting from the live pane's state
    pub fn merged_into(&self, live: &PaneInfo) -> PaneInfo {
        let mut pane = live.clone();
        pane.name = self.name.clone();
        if let Some(caption) = &self.caption {
            pane.caption = caption.clone();
        }
        pane.flags = PaneFlags::from_bits_retain(self.state);
        pane.direction = DockDirection::from_code(self.direction).unwrap_or(live.direction);
        pane.layer = self.layer;
        pane.row = self.row;
        pane.position = self.position;

        let keep = |value: Option<i32>, current: i32| value.unwrap_or(current);
        pane.proportion = keep(self.proportion, live.proportion);
        pane.best_size = Size::new(
            keep(self.best_width, live.best_size.width),
            keep(self.best_height, live.best_size.height),
        );
        pane.min_size = Size::new(
            keep(self.min_width, live.min_size.width),
            keep(self.min_height, live.min_size.height),
        );
        pane.max_size = Size::new(
            keep(self.max_width, live.max_size.width),
            keep(self.max_height, live.max_size.height),
        );
        pane.floating_pos.x = keep(self.float_x, live.floating_pos.x);
        pane.floating_pos.y = keep(self.float_y, live.floating_pos.y);
        pane.floating_size = Size::new(
            keep(self.float_width, live.floating_size.width),
            keep(self.float_height, live.floating_size.height),
        );
        pane
    }
}

/// Parse `dock_size(dir,layer,row)=size`
pub fn parse_dock_size(record: &str) -> Result<(DockKey, i32), RecordError> {
    let malformed = || RecordError::MalformedDockSize(record.to_string());

    let rest = record.strip_prefix("dock_size(").ok_or_else(malformed)?;
    let (args, size) = rest.split_once(")=").ok_or_else(malformed)?;
    let numbers: Vec<i32> = args
        .split(',')
        .map(|part| part.trim().parse().map_err(|_| malformed()))
        .collect::<Result<_, _>>()?;
    let [direction, layer, row] = numbers[..] else {
        return Err(malformed());
    };
    let direction = DockDirection::from_code(direction).ok_or(RecordError::InvalidDirection(direction))?;
    let size = size.trim().parse().map_err(|_| malformed())?;

    Ok((DockKey::new(direction, layer, row), size))
}

/// Non-empty records after a valid header
fn records(input: &str) -> Result<Vec<&str>, PerspectiveError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PerspectiveError::Empty);
    }

    let mut records = split_unescaped(input, '|').into_iter();
    let header = records.next().unwrap_or_default();
    if header != LAYOUT_VERSION {
        return Err(PerspectiveError::UnsupportedVersion(header.to_string()));
    }
    Ok(records.filter(|record| !record.trim().is_empty()).collect())
}

/// Names of the well-formed pane records, in order
pub fn pane_names(input: &str) -> Result<Vec<String>, PerspectiveError> {
    Ok(records(input)?
        .into_iter()
        .filter(|record| !record.starts_with("dock_size("))
        .filter_map(|record| parse_pane(record).ok())
        .map(|parsed| parsed.name)
        .collect())
}

/// Merge a perspective into `panes`.
///
/// Matching panes take the saved layout fields through `safe_set`, so their
/// windows are never touched. Records for unknown names are ignored and
/// live panes without a record keep their state.
pub fn load(input: &str, panes: &mut PaneSet) -> Result<LoadReport, PerspectiveError> {
    let mut report = LoadReport::default();
    for record in records(input)? {
        if record.starts_with("dock_size(") {
            match parse_dock_size(record) {
                Ok(entry) => report.dock_sizes.push(entry),
                Err(err) => {
                    tracing::warn!(%err, "Skipping dock size record");
                    report.skipped += 1;
                }
            }
            continue;
        }

        let parsed = match parse_pane(record) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(%err, "Skipping pane record");
                report.skipped += 1;
                continue;
            }
        };

        match panes.by_name_mut(&parsed.name) {
            Some(live) => {
                let merged = parsed.merged_into(live);
                live.safe_set(&merged);
                report.applied += 1;
            }
            None => {
                tracing::debug!(name = %parsed.name, "No live pane for perspective record");
                report.unmatched += 1;
            }
        }
    }

    tracing::debug!(
        applied = report.applied,
        unmatched = report.unmatched,
        skipped = report.skipped,
        "Loaded perspective"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("a;b|c=d"), r"a\;b\|c\=d");
        assert_eq!(escape(r"C:\dir"), r"C:\dir");
        assert_eq!(escape(r"trailing\"), r"trailing\\");
        assert_eq!(escape(r"x\;"), r"x\\\;");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        for text in [r"plain", r"a;b", r"a\b", r"end\", r"\\;|=", r"\\"] {
            assert_eq!(unescape(&escape(text)), text, "text {:?}", text);
        }
    }

    #[test]
    fn test_split_respects_escapes() {
        assert_eq!(split_unescaped(r"a\;b;c", ';'), vec![r"a\;b", "c"]);
        assert_eq!(split_unescaped(r"a\\;b", ';'), vec![r"a\\", "b"]);
    }

    #[test]
    fn test_parse_pane_requires_keys() {
        assert_eq!(
            parse_pane("name=a;state=0;dir=4;layer=0;row=0"),
            Err(RecordError::MissingKey("pos"))
        );
    }

    #[test]
    fn test_parse_pane_rejects_bad_numbers() {
        assert!(matches!(
            parse_pane("name=a;state=x;dir=4;layer=0;row=0;pos=0"),
            Err(RecordError::InvalidNumber { .. })
        ));
        assert_eq!(
            parse_pane("name=a;state=0;dir=9;layer=0;row=0;pos=0"),
            Err(RecordError::InvalidDirection(9))
        );
    }

    #[test]
    fn test_parse_dock_size() {
        assert_eq!(
            parse_dock_size("dock_size(4,1,2)=250"),
            Ok((DockKey::new(DockDirection::Left, 1, 2), 250))
        );
        assert!(parse_dock_size("dock_size(4,1)=250").is_err());
        assert!(parse_dock_size("dock_size(4,1,2)=big").is_err());
    }

    #[test]
    fn test_header_is_required() {
        let mut set = PaneSet::new();
        assert_eq!(load("", &mut set), Err(PerspectiveError::Empty));
        assert!(matches!(
            load("layout1|name=a|", &mut set),
            Err(PerspectiveError::UnsupportedVersion(_))
        ));
    }
}
