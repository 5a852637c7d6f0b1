// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reader for the published VSOP87D text files (`VSOP87D.mer` …
//! `VSOP87D.nep`).
//!
//! Each block opens with a header such as
//!
//! ```text
//!  VSOP87 VERSION D4    SATURN    VARIABLE 1 (LBR)       *T**0    440 TERMS    HELIOCENTRIC ...
//! ```
//!
//! followed by that many fixed-width term records whose last three fields
//! are the amplitude, phase and frequency.

use super::{PeriodicTerm, SeriesCoefficientSet, SeriesVariable, MAX_EXPONENT};
use crate::errors::{EphemerisError, EphemerisResult};

struct BlockHeader {
    variable: SeriesVariable,
    exponent: usize,
    declared: usize,
}

fn malformed(line: usize, message: impl std::fmt::Display) -> EphemerisError {
    EphemerisError::invalid_argument("vsop87", format!("line {line}: {message}"))
}

fn parse_header(line_no: usize, line: &str) -> EphemerisResult<BlockHeader> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let after = |key: &str| {
        tokens
            .iter()
            .position(|t| *t == key)
            .and_then(|i| tokens.get(i + 1).copied())
    };

    match after("VERSION") {
        Some(version) if version.starts_with('D') => {}
        other => {
            return Err(malformed(
                line_no,
                format!("expected a version D header, found {other:?}"),
            ))
        }
    }

    let variable = match after("VARIABLE") {
        Some("1") => SeriesVariable::Longitude,
        Some("2") => SeriesVariable::Latitude,
        Some("3") => SeriesVariable::Radius,
        other => return Err(malformed(line_no, format!("bad variable {other:?}"))),
    };

    let exponent = tokens
        .iter()
        .find_map(|t| t.strip_prefix("*T**"))
        .and_then(|p| p.parse::<usize>().ok())
        .filter(|&p| p <= MAX_EXPONENT)
        .ok_or_else(|| malformed(line_no, "missing or invalid *T** power"))?;

    let declared = tokens
        .iter()
        .position(|t| *t == "TERMS")
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| tokens[i].parse::<usize>().ok())
        .ok_or_else(|| malformed(line_no, "missing term count"))?;

    Ok(BlockHeader {
        variable,
        exponent,
        declared,
    })
}

fn parse_term(line_no: usize, line: &str) -> EphemerisResult<PeriodicTerm> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [.., amplitude, phase, frequency] = fields.as_slice() else {
        return Err(malformed(line_no, "term record has fewer than three fields"));
    };
    let number = |s: &str| {
        s.parse::<f64>()
            .map_err(|e| malformed(line_no, format!("{s:?}: {e}")))
    };
    Ok(PeriodicTerm::new(
        number(*amplitude)?,
        number(*phase)?,
        number(*frequency)?,
    ))
}

fn close_block(
    set: &mut SeriesCoefficientSet,
    header: BlockHeader,
    terms: Vec<PeriodicTerm>,
    line_no: usize,
) -> EphemerisResult<()> {
    if terms.len() != header.declared {
        return Err(malformed(
            line_no,
            format!(
                "{}{} block declares {} terms but holds {}",
                header.variable,
                header.exponent,
                header.declared,
                terms.len()
            ),
        ));
    }
    set.set_terms(header.variable, header.exponent, terms)
}

impl SeriesCoefficientSet {
    /// Builds a set from the contents of one VSOP87D body file.
    ///
    /// Fails with [`InvalidArgument`](EphemerisError::InvalidArgument) on a
    /// header that is not version D, a record that does not parse, or a
    /// block whose record count disagrees with its header.
    pub fn from_vsop87d_text(text: &str) -> EphemerisResult<Self> {
        let mut set = Self::new();
        let mut open: Option<(BlockHeader, Vec<PeriodicTerm>)> = None;

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }
            if line.contains("VSOP87") {
                if let Some((header, terms)) = open.take() {
                    close_block(&mut set, header, terms, line_no)?;
                }
                let header = parse_header(line_no, line)?;
                let terms = Vec::with_capacity(header.declared);
                open = Some((header, terms));
                continue;
            }
            let Some((_, terms)) = open.as_mut() else {
                return Err(malformed(line_no, "term record before any header"));
            };
            terms.push(parse_term(line_no, line)?);
        }

        if let Some((header, terms)) = open {
            close_block(&mut set, header, terms, text.lines().count())?;
        }
        if set.is_empty() {
            return Err(EphemerisError::data_not_found("VSOP87D terms in text"));
        }
        Ok(set)
    }
}
