//! SubRip (`.srt`) parser
//!
//! Cue blocks are an index line, a timing line and one or more text lines,
//! separated by blank lines. The index is never checked. A timing line that
//! does not parse ends the file: cues already delivered stand and the parse
//! still succeeds.

use super::session::Session;
use crate::{interval::Interval, report::ParseReport, timecode::parse_srt_timecode_line};
use std::io::BufRead;

/// `isspace` in the C locale, which includes vertical tab and form feed
const fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().copied().all(is_c_space)
}

/// Parse a SubRip stream, delivering each cue to `sink` in file order
///
/// Cue text keeps its line structure, joined by `\n`, with one trailing
/// `\n`. Cues whose text block is empty are dropped.
///
/// # Examples
///
/// ```rust
/// use subcue_core::parser::parse_srt;
///
/// let srt = "1\n00:00:01,000 --> 00:00:02,500\nHello\nworld\n\n";
/// let mut cues = Vec::new();
/// let report = parse_srt(srt.as_bytes(), |cue| cues.push(cue));
///
/// assert_eq!(report.emitted, 1);
/// assert_eq!(cues[0].text(), "Hello\nworld\n");
/// assert_eq!(cues[0].end, 2.5);
/// ```
pub fn parse_srt<R, F>(reader: R, mut sink: F) -> ParseReport
where
    R: BufRead,
    F: FnMut(Interval),
{
    let mut session = Session::new(reader);

    while let Some(line) = session.next_line() {
        if is_blank(line) {
            continue;
        }

        let Some(timing) = session.next_line() else {
            break;
        };
        let (start, end) = match parse_srt_timecode_line(timing) {
            Ok(times) => times,
            Err(err) => {
                session.halt(&err);
                break;
            }
        };

        let mut text = Vec::new();
        while let Some(line) = session.next_line() {
            if line.is_empty() {
                break;
            }
            text.extend_from_slice(line);
            text.push(b'\n');
        }

        session.observe_payload(&text);
        session.deliver(&mut sink, start, end, text);
    }

    let report = session.finish();
    log::debug!(
        "SubRip parse done: {} cues, utf8={}",
        report.emitted,
        report.detected_utf8
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encoding::Utf8Evidence, interval::Interval, report::StopReason};

    fn parse(input: &[u8]) -> (Vec<Interval>, ParseReport) {
        let mut cues = Vec::new();
        let report = parse_srt(input, |cue| cues.push(cue));
        (cues, report)
    }

    #[test]
    fn single_cue() {
        let (cues, report) = parse(b"1\n00:00:01,000 --> 00:00:04,000\nHello\n");
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, b"Hello\n");
        assert!((cues[0].start - 1.0).abs() < f64::EPSILON);
        assert!((cues[0].end - 4.0).abs() < f64::EPSILON);
        assert!(report.is_complete());
        assert_eq!(report.lines, 3);
    }

    #[test]
    fn multiline_text_gets_one_trailing_newline() {
        let (cues, _) = parse(b"1\n00:00:01,000 --> 00:00:02,000\nline one\nline two\n\n");
        assert_eq!(cues[0].text, b"line one\nline two\n");
    }

    #[test]
    fn extra_blank_lines_between_cues() {
        let input = b"\n\n1\n00:00:01,000 --> 00:00:02,000\nA\n\n \t\n\n2\n00:00:03,000 --> 00:00:04,000\nB\n";
        let (cues, report) = parse(input);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[1].text, b"B\n");
        assert_eq!(report.emitted, 2);
    }

    #[test]
    fn crlf_input() {
        let input = b"1\r\n00:00:01,000 --> 00:00:02,000\r\nA\r\nB\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nC\r\n";
        let (cues, _) = parse(input);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, b"A\nB\n");
    }

    #[test]
    fn garbage_timecode_stops_but_succeeds() {
        let input = b"1\n00:00:01,000 --> 00:00:02,000\nfirst\n\n2\nnot a timecode\nsecond\n\n3\n00:00:05,000 --> 00:00:06,000\nthird\n";
        let (cues, report) = parse(input);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, b"first\n");
        let stop = report.stop.expect("parse should stop early");
        assert_eq!(stop.line, 6);
        assert!(matches!(stop.reason, StopReason::MalformedTimecode(_)));
    }

    #[test]
    fn empty_cue_body_is_dropped() {
        let input = b"1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nB\n";
        let (cues, report) = parse(input);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, b"B\n");
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn index_line_at_end_of_file() {
        let (cues, report) = parse(b"1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n");
        assert_eq!(cues.len(), 1);
        assert!(report.is_complete());
    }

    #[test]
    fn index_is_not_validated() {
        let (cues, _) = parse(b"whatever\n00:00:01,000 --> 00:00:02,000\nA\n");
        assert_eq!(cues.len(), 1);
    }

    #[test]
    fn bom_marks_utf8_even_with_latin1_text() {
        let (cues, report) = parse(b"\xEF\xBB\xBF1\n00:00:01,000 --> 00:00:02,000\ncaf\xE9\n");
        assert_eq!(cues.len(), 1);
        assert_eq!(report.evidence, Utf8Evidence::Bom);
        assert!(report.detected_utf8);
    }

    #[test]
    fn latin1_text_without_bom() {
        let input = b"1\n00:00:01,000 --> 00:00:02,000\nplain\n\n2\n00:00:03,000 --> 00:00:04,000\ncaf\xE9\n";
        let (cues, report) = parse(input);
        assert_eq!(cues.len(), 2);
        assert_eq!(report.evidence, Utf8Evidence::NotUtf8);
        assert!(!report.detected_utf8);
    }

    #[test]
    fn utf8_text_without_bom() {
        let (_, report) = parse("1\n00:00:01,000 --> 00:00:02,000\nПривет\n".as_bytes());
        assert_eq!(report.evidence, Utf8Evidence::Heuristic);
        assert!(report.detected_utf8);
    }

    #[test]
    fn empty_input() {
        let (cues, report) = parse(b"");
        assert!(cues.is_empty());
        assert!(report.detected_utf8);
        assert_eq!(report.lines, 0);
    }
}
