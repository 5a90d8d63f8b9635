//! Transient state of one parse: line reader, encoding evidence, counters

use crate::{
    encoding::EncodingDetector,
    errors::TimecodeError,
    interval::Interval,
    report::{EarlyStop, ParseReport, StopReason},
};
use std::io::BufRead;

/// Line-oriented view of a stream plus the bookkeeping both parsers share
///
/// The first line read is handed to the encoding detector for BOM
/// detection. Lines are returned without their `\n` or `\r\n` ending.
pub(crate) struct Session<R> {
    reader: R,
    buffer: Vec<u8>,
    line: usize,
    detector: EncodingDetector,
    emitted: usize,
    skipped: usize,
    stop: Option<EarlyStop>,
}

impl<R: BufRead> Session<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(256),
            line: 0,
            detector: EncodingDetector::new(),
            emitted: 0,
            skipped: 0,
            stop: None,
        }
    }

    /// Read the next line, `None` at end of stream or on a read error
    pub(crate) fn next_line(&mut self) -> Option<&[u8]> {
        if self.stop.is_some() {
            return None;
        }

        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                if self.buffer.last() == Some(&b'\n') {
                    self.buffer.pop();
                }
                if self.buffer.last() == Some(&b'\r') {
                    self.buffer.pop();
                }
                if self.line == 1 {
                    self.detector.observe_first_line(&self.buffer);
                }
                Some(self.buffer.as_slice())
            }
            Err(err) => {
                log::warn!("read failed after line {}: {err}", self.line);
                self.stop = Some(EarlyStop {
                    line: self.line + 1,
                    reason: StopReason::ReadError(err.to_string()),
                });
                None
            }
        }
    }

    /// 1-based number of the line most recently returned
    pub(crate) const fn line_number(&self) -> usize {
        self.line
    }

    /// End the parse at the current line because a timestamp was unreadable
    pub(crate) fn halt(&mut self, err: &TimecodeError) {
        log::warn!("stopping at line {}: {err}", self.line);
        self.stop = Some(EarlyStop {
            line: self.line,
            reason: StopReason::MalformedTimecode(err.to_string()),
        });
    }

    /// Feed cue text to the encoding heuristic
    pub(crate) fn observe_payload(&mut self, text: &[u8]) {
        self.detector.observe_payload(text);
    }

    /// Count a cue that was read but not emitted
    pub(crate) fn skip(&mut self, why: &str) {
        log::trace!("skipping cue at line {}: {why}", self.line);
        self.skipped += 1;
    }

    /// Hand an interval to the sink, dropping empty text
    pub(crate) fn deliver<F: FnMut(Interval)>(
        &mut self,
        sink: &mut F,
        start: f64,
        end: f64,
        text: Vec<u8>,
    ) {
        if text.is_empty() {
            self.skip("empty text");
            return;
        }
        self.emitted += 1;
        sink(Interval::new(start, end, text));
    }

    pub(crate) fn finish(self) -> ParseReport {
        let evidence = self.detector.evidence();
        ParseReport {
            detected_utf8: evidence.is_utf8(),
            evidence,
            emitted: self.emitted,
            skipped: self.skipped,
            lines: self.line,
            stop: self.stop,
        }
    }
}
