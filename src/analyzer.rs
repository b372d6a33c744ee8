use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;
use std::str;

use crate::aggregator::DailyAggregator;
use crate::classifier::{classify_path, request_path};
use crate::date;
use crate::parser::parse_line;
use crate::profile::PatternProfile;
use crate::reader::next_line;
use crate::report::Report;
use crate::sink::RejectSink;

/// What happened to a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Counted into its day.
    Absorbed,
    /// Not valid UTF-8. Rejected like an unmatched line.
    Undecodable,
    /// Line pattern did not match.
    NoMatch,
    /// Pattern matched but there is no request field.
    MissingRequest,
    /// Status other than 200, including values too large to be a status code.
    WrongStatus,
    /// Timestamp unparseable or outside the target month.
    OutOfMonth,
    /// Request field without a path, e.g. a stray TLS handshake byte. Dropped without a
    /// diagnostic; whether these belong in the diagnostics file is still undecided.
    MalformedRequest,
}

/// Per-run line counts by outcome.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineTally {
    pub absorbed: u64,
    pub undecodable: u64,
    pub no_match: u64,
    pub missing_request: u64,
    pub wrong_status: u64,
    pub out_of_month: u64,
    pub malformed_request: u64,
}

impl LineTally {
    fn record(&mut self, outcome: LineOutcome) {
        let slot = match outcome {
            LineOutcome::Absorbed => &mut self.absorbed,
            LineOutcome::Undecodable => &mut self.undecodable,
            LineOutcome::NoMatch => &mut self.no_match,
            LineOutcome::MissingRequest => &mut self.missing_request,
            LineOutcome::WrongStatus => &mut self.wrong_status,
            LineOutcome::OutOfMonth => &mut self.out_of_month,
            LineOutcome::MalformedRequest => &mut self.malformed_request,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u64 {
        self.absorbed
            + self.undecodable
            + self.no_match
            + self.missing_request
            + self.wrong_status
            + self.out_of_month
            + self.malformed_request
    }

    /// Lines written to the diagnostics sink.
    pub fn rejected(&self) -> u64 {
        self.undecodable + self.no_match + self.missing_request
    }
}

impl fmt::Display for LineTally {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} lines: {} absorbed, {} rejected ({} undecodable, {} unmatched, {} without request), \
             {} non-200, {} outside month, {} malformed request",
            self.total(),
            self.absorbed,
            self.rejected(),
            self.undecodable,
            self.no_match,
            self.missing_request,
            self.wrong_status,
            self.out_of_month,
            self.malformed_request
        )
    }
}

/// Turns log lines of one profile and month into daily totals.
pub struct Analyzer {
    profile: &'static PatternProfile,
    month: u32,
    aggregator: DailyAggregator,
    tally: LineTally,
}

impl Analyzer {
    pub fn new(profile: &'static PatternProfile, month: u32) -> Analyzer {
        Analyzer {
            profile,
            month,
            aggregator: DailyAggregator::new(),
            tally: LineTally::default(),
        }
    }

    pub fn tally(&self) -> &LineTally {
        &self.tally
    }

    pub fn aggregator(&self) -> &DailyAggregator {
        &self.aggregator
    }

    /// Triages one raw line. Lines that cannot be decoded or do not match the profile go
    /// to `diagnostics`, and also to `invalid` when one is given. Only sink I/O errors are
    /// returned.
    pub fn process_line(
        &mut self,
        file: &Path,
        raw: &[u8],
        diagnostics: &mut dyn RejectSink,
        invalid: Option<&mut dyn RejectSink>,
    ) -> io::Result<LineOutcome> {
        let outcome = self.triage(file, raw, diagnostics, invalid)?;
        self.tally.record(outcome);
        Ok(outcome)
    }

    fn triage(
        &mut self,
        file: &Path,
        raw: &[u8],
        diagnostics: &mut dyn RejectSink,
        invalid: Option<&mut dyn RejectSink>,
    ) -> io::Result<LineOutcome> {
        let line = match str::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                debug!("{}: undecodable line ({})", file.display(), e);
                let lossy = String::from_utf8_lossy(raw);
                diagnostics.reject(file, &lossy)?;
                if let Some(invalid) = invalid {
                    invalid.reject(file, &lossy)?;
                }
                return Ok(LineOutcome::Undecodable);
            }
        };

        let parsed = match parse_line(line, self.profile) {
            Some(parsed) => parsed,
            None => {
                debug!("{}: line does not match profile", file.display());
                diagnostics.reject(file, line)?;
                if let Some(invalid) = invalid {
                    invalid.reject(file, line)?;
                }
                return Ok(LineOutcome::NoMatch);
            }
        };

        if parsed.status_code() != Some(200) {
            return Ok(LineOutcome::WrongStatus);
        }

        let day = match date::accept(&parsed, self.month) {
            Some(day) => day,
            None => return Ok(LineOutcome::OutOfMonth),
        };

        let request = match parsed.request {
            Some(request) => request,
            None => {
                debug!("{}: matched line without request", file.display());
                diagnostics.reject(file, line)?;
                return Ok(LineOutcome::MissingRequest);
            }
        };

        let path = match request_path(request) {
            Some(path) => path,
            None => return Ok(LineOutcome::MalformedRequest),
        };

        self.aggregator
            .absorb(&day, classify_path(path, self.profile));
        Ok(LineOutcome::Absorbed)
    }

    /// Processes every line of `reader`, attributing rejections to `file`. A read error
    /// ends this file with a warning; the lines before it stay counted. Sink errors are
    /// returned.
    pub fn process_reader<R: BufRead + ?Sized>(
        &mut self,
        file: &Path,
        reader: &mut R,
        diagnostics: &mut dyn RejectSink,
        mut invalid: Option<&mut dyn RejectSink>,
    ) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            match next_line(reader, &mut buf) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!("Stopped reading {}: {}", file.display(), e);
                    break;
                }
            }
            let invalid = invalid
                .as_mut()
                .map(|sink| &mut **sink as &mut dyn RejectSink);
            self.process_line(file, &buf, diagnostics, invalid)?;
        }
        Ok(())
    }

    /// Folds another analyzer's days and tally into this one.
    pub fn merge(&mut self, other: Analyzer) {
        self.aggregator.merge(other.aggregator);
        self.tally.absorbed += other.tally.absorbed;
        self.tally.undecodable += other.tally.undecodable;
        self.tally.no_match += other.tally.no_match;
        self.tally.missing_request += other.tally.missing_request;
        self.tally.wrong_status += other.tally.wrong_status;
        self.tally.out_of_month += other.tally.out_of_month;
        self.tally.malformed_request += other.tally.malformed_request;
    }

    pub fn finish(self) -> Report {
        Report::build(self.aggregator.into_buckets())
    }
}
