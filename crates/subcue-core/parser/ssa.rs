//! SubStation Alpha (`.ssa` / `.ass`) parser
//!
//! Only `Dialogue:` records produce intervals. Every other record, section
//! header and comment is skipped. Fields are comma separated and the text
//! field is the rest of the line, so it may itself contain commas.
//!
//! In the text, `\N` and `\n` become line breaks. Any other backslash
//! sequence is kept as literal text, override blocks included.

use super::session::Session;
use crate::{
    encoding::strip_utf8_bom,
    errors::TimecodeError,
    interval::Interval,
    options::{ParseOptions, SsaLayout},
    report::ParseReport,
    timecode::parse_ssa_timestamp,
};
use std::io::BufRead;

/// Positions of the fields a cue needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldLayout {
    start: usize,
    end: usize,
    style: Option<usize>,
    /// Number of comma-terminated fields before the text
    text: usize,
}

impl FieldLayout {
    /// `Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text`
    const FIXED: Self = Self {
        start: 1,
        end: 2,
        style: Some(3),
        text: 9,
    };

    /// Build a layout from the value of an `[Events]` `Format:` line
    fn from_format(value: &[u8]) -> Option<Self> {
        let names: Vec<&[u8]> = value.split(|&b| b == b',').map(trim).collect();
        let find = |name: &str| {
            names
                .iter()
                .position(|field| field.eq_ignore_ascii_case(name.as_bytes()))
        };

        Some(Self {
            start: find("Start")?,
            end: find("End")?,
            style: find("Style"),
            text: find("Text")?,
        })
        .filter(|layout| layout.start < layout.text && layout.end < layout.text)
    }
}

fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |p| p + 1);
    &bytes[start..end]
}

/// Split a record into its key (before the first `:`) and value
fn split_record(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let colon = line.iter().position(|&b| b == b':')?;
    Some((&line[..colon], &line[colon + 1..]))
}

/// Pops comma-delimited fields off the front of a record value
///
/// Once the value is exhausted every further field is missing.
struct Fields<'a> {
    rest: &'a [u8],
}

impl<'a> Fields<'a> {
    fn next_field(&mut self) -> Option<&'a [u8]> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.iter().position(|&b| b == b',') {
            Some(comma) => {
                let field = &self.rest[..comma];
                self.rest = &self.rest[comma + 1..];
                Some(field)
            }
            None => {
                let field = self.rest;
                self.rest = &[];
                Some(field)
            }
        }
    }
}

/// Convert `\N` / `\n` escapes into line breaks
///
/// Other escapes keep their backslash. A lone backslash at the very end of
/// the text is dropped.
fn unescape_text(raw: &[u8]) -> Vec<u8> {
    let raw = raw.strip_suffix(b"\\").unwrap_or(raw);
    let mut segments = raw.split(|&b| b == b'\\');
    let mut text = Vec::with_capacity(raw.len() + 1);
    if let Some(first) = segments.next() {
        text.extend_from_slice(first);
    }
    for segment in segments {
        match segment.split_first() {
            Some((b'N' | b'n', rest)) => {
                text.push(b'\n');
                text.extend_from_slice(rest);
            }
            _ => {
                text.push(b'\\');
                text.extend_from_slice(segment);
            }
        }
    }
    text
}

/// Tracks `[Events]` `Format:` lines when the declared layout is requested
struct LayoutTracker {
    declared: bool,
    in_events: bool,
    current: FieldLayout,
}

impl LayoutTracker {
    const fn new(mode: SsaLayout) -> Self {
        Self {
            declared: matches!(mode, SsaLayout::Declared),
            in_events: false,
            current: FieldLayout::FIXED,
        }
    }

    fn observe(&mut self, line: &[u8], line_number: usize) {
        if !self.declared {
            return;
        }

        let line = trim(strip_utf8_bom(line));
        if line.first() == Some(&b'[') {
            self.in_events = line.eq_ignore_ascii_case(b"[Events]");
            return;
        }

        if !self.in_events {
            return;
        }
        if let Some((key, value)) = split_record(line) {
            if key == b"Format" {
                match FieldLayout::from_format(value) {
                    Some(layout) => {
                        log::debug!("line {line_number}: using declared layout {layout:?}");
                        self.current = layout;
                    }
                    None => log::warn!(
                        "line {line_number}: unusable Format line, keeping {:?}",
                        self.current
                    ),
                }
            }
        }
    }
}

/// Outcome of reading one `Dialogue` record
enum Cue {
    Emit { start: f64, end: f64, raw: Vec<u8> },
    Skip(&'static str),
}

/// Parse a SubStation Alpha or Advanced SubStation Alpha stream
///
/// A `Dialogue` line whose start or end timestamp cannot be read ends the
/// parse; cues delivered before it stand and the parse still succeeds.
///
/// # Examples
///
/// ```rust
/// use subcue_core::{parser::parse_ssa, ParseOptions};
///
/// let ass = "[Events]\n\
///     Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
///     Dialogue: 0,0:00:01.00,0:00:03.50,Default,,0,0,0,,Hello, world\\Nagain\n";
/// let mut cues = Vec::new();
/// let report = parse_ssa(ass.as_bytes(), &ParseOptions::default(), |cue| cues.push(cue));
///
/// assert_eq!(report.emitted, 1);
/// assert_eq!(cues[0].text(), "Hello, world\nagain\n");
/// assert_eq!(cues[0].start, 1.0);
/// ```
pub fn parse_ssa<R, F>(reader: R, options: &ParseOptions, mut sink: F) -> ParseReport
where
    R: BufRead,
    F: FnMut(Interval),
{
    let mut session = Session::new(reader);
    let mut tracker = LayoutTracker::new(options.ssa_layout);

    loop {
        let line_number = session.line_number() + 1;
        let Some(line) = session.next_line() else {
            break;
        };
        tracker.observe(line, line_number);

        let cue = match split_record(line) {
            Some((b"Dialogue", value)) => read_dialogue(value, tracker.current, options),
            _ => continue,
        };

        match cue {
            Ok(Cue::Emit { start, end, raw }) => {
                let mut text = unescape_text(&raw);
                session.observe_payload(&text);
                if !text.is_empty() {
                    text.push(b'\n');
                }
                session.deliver(&mut sink, start, end, text);
            }
            Ok(Cue::Skip(why)) => session.skip(why),
            Err(err) => {
                session.halt(&err);
                break;
            }
        }
    }

    let report = session.finish();
    log::debug!(
        "SubStation Alpha parse done: {} cues, utf8={}",
        report.emitted,
        report.detected_utf8
    );
    report
}

/// Read the fields of a `Dialogue` value in order
fn read_dialogue(
    value: &[u8],
    layout: FieldLayout,
    options: &ParseOptions,
) -> Result<Cue, TimecodeError> {
    let mut fields = Fields { rest: value };
    let mut start = 0.0;
    let mut end = 0.0;

    for index in 0..layout.text {
        let field = fields.next_field();
        if index == layout.start || index == layout.end {
            let seconds = parse_ssa_timestamp(field.unwrap_or_default())?;
            if index == layout.start {
                start = seconds;
            } else {
                end = seconds;
            }
        } else if Some(index) == layout.style
            && field.is_some_and(|style| options.skips_style(style))
        {
            return Ok(Cue::Skip("skipped style"));
        }
    }

    if fields.rest.is_empty() {
        return Ok(Cue::Skip("no text field"));
    }
    Ok(Cue::Emit {
        start,
        end,
        raw: fields.rest.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encoding::Utf8Evidence, interval::Interval, report::StopReason};

    const HEADER: &str = "[Script Info]\nTitle: Test\nScriptType: v4.00+\n\n[V4+ Styles]\nFormat: Name, Fontname, Fontsize\nStyle: Default,Arial,20\n\n[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n";

    fn parse_with(input: &[u8], options: &ParseOptions) -> (Vec<Interval>, ParseReport) {
        let mut cues = Vec::new();
        let report = parse_ssa(input, options, |cue| cues.push(cue));
        (cues, report)
    }

    fn parse(input: &[u8]) -> (Vec<Interval>, ParseReport) {
        parse_with(input, &ParseOptions::default())
    }

    fn script(events: &str) -> Vec<u8> {
        format!("{HEADER}{events}").into_bytes()
    }

    #[test]
    fn dialogue_becomes_interval() {
        let (cues, report) =
            parse(&script("Dialogue: 0,0:00:01.00,0:00:05.50,Default,,0,0,0,,Hello World!\n"));
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, b"Hello World!\n");
        assert!((cues[0].start - 1.0).abs() < f64::EPSILON);
        assert!((cues[0].end - 5.5).abs() < f64::EPSILON);
        assert!(report.is_complete());
    }

    #[test]
    fn text_keeps_commas() {
        let (cues, _) =
            parse(&script("Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,One, two, three\n"));
        assert_eq!(cues[0].text, b"One, two, three\n");
    }

    #[test]
    fn line_break_escapes() {
        let (cues, _) = parse(&script(
            "Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Top\\Nmiddle\\nbottom\n",
        ));
        assert_eq!(cues[0].text, b"Top\nmiddle\nbottom\n");
    }

    #[test]
    fn other_escapes_are_literal() {
        let (cues, _) = parse(&script(
            "Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,{\\i1}soft\\hspace\n",
        ));
        assert_eq!(cues[0].text, b"{\\i1}soft\\hspace\n");
    }

    #[test]
    fn karaoke_style_is_skipped() {
        let (cues, report) = parse(&script(
            "Dialogue: 0,0:00:01.00,0:00:02.00,OP_kar,,0,0,0,,la la la\nDialogue: 0,0:00:03.00,0:00:04.00,Default,,0,0,0,,Sung\n",
        ));
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, b"Sung\n");
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn non_dialogue_records_are_ignored() {
        let (cues, _) = parse(&script(
            "Comment: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,note\n; a comment\nDialogue: 0,0:00:03.00,0:00:04.00,Default,,0,0,0,,Shown\n",
        ));
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, b"Shown\n");
    }

    #[test]
    fn bad_timestamp_aborts_successfully() {
        let (cues, report) = parse(&script(
            "Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,first\nDialogue: 0,soon,0:00:04.00,Default,,0,0,0,,second\nDialogue: 0,0:00:05.00,0:00:06.00,Default,,0,0,0,,third\n",
        ));
        assert_eq!(cues.len(), 1);
        let stop = report.stop.unwrap();
        assert_eq!(stop.line, 12);
        assert!(matches!(stop.reason, StopReason::MalformedTimecode(_)));
    }

    #[test]
    fn junk_after_fraction_digits_keeps_parsing() {
        let (cues, report) = parse(&script(
            "Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,first\nDialogue: 0,0:00:03.5x,0:00:04.00,Default,,0,0,0,,second\nDialogue: 0,0:00:05.00,0:00:06.00,Default,,0,0,0,,third\n",
        ));
        assert_eq!(cues.len(), 3);
        assert!((cues[1].start - 3.05).abs() < 1e-9);
        assert_eq!(cues[2].text, b"third\n");
        assert!(report.is_complete());
    }

    #[test]
    fn missing_text_field_is_skipped() {
        let (cues, report) = parse(&script(
            "Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,\nDialogue: 0,0:00:01.00,0:00:02.00,Default\nDialogue: 0,0:00:03.00,0:00:04.00,Default,,0,0,0,,ok\n",
        ));
        assert_eq!(cues.len(), 1);
        assert_eq!(report.skipped, 2);
        assert!(report.is_complete());
    }

    #[test]
    fn trailing_backslash_is_dropped() {
        assert_eq!(unescape_text(b"abc\\"), b"abc");
        assert_eq!(unescape_text(b"a\\\\b"), b"a\\\\b");
        assert_eq!(unescape_text(b"\\Nfoo"), b"\nfoo");
        assert_eq!(unescape_text(b"\\"), b"");
    }

    #[test]
    fn bom_prefixed_dialogue_on_first_line_is_not_a_record() {
        let (cues, report) =
            parse(b"\xEF\xBB\xBFDialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,x\n");
        assert!(cues.is_empty());
        assert_eq!(report.evidence, Utf8Evidence::Bom);
    }

    #[test]
    fn cp1251_dialogue_is_not_utf8() {
        let mut input = script("Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,");
        input.extend_from_slice(&[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2, b'\n']);
        let (cues, report) = parse(&input);
        assert_eq!(cues.len(), 1);
        assert_eq!(report.evidence, Utf8Evidence::NotUtf8);
    }

    #[test]
    fn fixed_layout_ignores_declared_format() {
        let input = "[Events]\nFormat: Start, End, Style, Text\nDialogue: 0:00:01.00,0:00:02.00,Default,Hi\n";
        let (cues, report) = parse(input.as_bytes());
        assert!(cues.is_empty());
        assert!(report.stop.is_some());
    }

    #[test]
    fn declared_layout_follows_format_line() {
        let input = "[V4+ Styles]\nFormat: Name, Start\n[Events]\nFormat: Start, End, Style, Text\nDialogue: 0:00:01.00,0:00:02.00,Default,Hi, there\nDialogue: 0:00:03.00,0:00:04.00,OP_kar,la\n";
        let options = ParseOptions::default().with_ssa_layout(SsaLayout::Declared);
        let (cues, report) = parse_with(input.as_bytes(), &options);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, b"Hi, there\n");
        assert!((cues[0].start - 1.0).abs() < f64::EPSILON);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn declared_layout_defaults_to_fixed_before_format() {
        let input = "Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,early\n";
        let options = ParseOptions::default().with_ssa_layout(SsaLayout::Declared);
        let (cues, _) = parse_with(input.as_bytes(), &options);
        assert_eq!(cues.len(), 1);
    }

    #[test]
    fn format_without_timing_is_rejected() {
        assert_eq!(FieldLayout::from_format(b" Layer, Style, Text"), None);
        assert_eq!(
            FieldLayout::from_format(b" Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text"),
            Some(FieldLayout::FIXED)
        );
    }
}
