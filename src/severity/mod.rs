//! Severity flags: the bit vocabulary shared by messages and backend masks.
//!
//! The numeric values are a stable contract between callers and backends and
//! must not change. A message normally carries one bit, but any combination is
//! a valid flag; a backend admits a message only when every bit of the flag is
//! present in its mask.

use serde::Deserialize;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

/// A set of severity bits. Used both as a message flag and as a backend mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "SeverityRepr")]
pub struct Severity(u64);

impl Severity {
    /// Excessive information.
    pub const DEBUG: Self = Self(1);
    /// Information that should only go into the print file.
    pub const NOTE: Self = Self(2);
    /// Normal status information.
    pub const INFO: Self = Self(4);
    /// Input anomaly, possibly an error.
    pub const WARNING: Self = Self(8);
    /// Error in the input data.
    pub const ERROR: Self = Self(16);
    /// Calculation problem, e.g. a convergence failure.
    pub const PROBLEM: Self = Self(32);
    /// An inconsistent internal state was encountered.
    pub const BUG: Self = Self(64);

    /// No class. A message with this flag is never admitted.
    pub const NONE: Self = Self(0);
    /// Every defined class. Default mask for backends that accept everything.
    pub const ALL: Self = Self(127);

    const CLASSES: [(Self, &'static str); 7] = [
        (Self::DEBUG, "Debug"),
        (Self::NOTE, "Note"),
        (Self::INFO, "Info"),
        (Self::WARNING, "Warning"),
        (Self::ERROR, "Error"),
        (Self::PROBLEM, "Problem"),
        (Self::BUG, "Bug"),
    ];

    /// Wraps raw bits. Undefined bits are kept so they still fail admission
    /// against masks that lack them.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when exactly one bit is set.
    #[must_use]
    pub const fn is_single(self) -> bool {
        self.0.is_power_of_two()
    }

    /// True if every bit of `other` is also set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// The admission test: every bit of `self` is present in `mask`.
    ///
    /// This is a subset test, not an overlap test: `WARNING | BUG` is not a
    /// subset of `WARNING | ERROR` even though the warning bit matches.
    #[must_use]
    pub const fn is_subset_of(self, mask: Self) -> bool {
        mask.contains(self)
    }

    /// The seven single-bit classes in numeric order.
    pub fn all_classes() -> impl Iterator<Item = Self> {
        Self::CLASSES.into_iter().map(|(class, _)| class)
    }

    /// Class name for a single defined bit, `None` for combinations.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        Self::CLASSES
            .iter()
            .find(|(class, _)| *class == self)
            .map(|(_, name)| *name)
    }

    /// Prefix the simple formatter puts in front of a message of this class.
    /// Combinations and undefined bits get no prefix.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self.0 {
            1 => "Debug: ",
            2 => "Note: ",
            4 => "Info: ",
            8 => "Warning: ",
            16 => "Error: ",
            32 => "Problem: ",
            64 => "Bug: ",
            _ => "",
        }
    }
}

impl BitOr for Severity {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Severity {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Severity {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }

        let mut rest = self.0;
        let mut first = true;
        for (class, name) in Self::CLASSES {
            if self.contains(class) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                rest &= !class.0;
                first = false;
            }
        }
        if rest != 0 {
            if !first {
                f.write_str("|")?;
            }
            write!(f, "{rest}")?;
        }
        Ok(())
    }
}

/// Returned by `FromStr` so callers can tell a bad severity from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError(String);

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity: '{}'", self.0)
    }
}

impl std::error::Error for ParseSeverityError {}

fn parse_one(token: &str) -> Result<Severity, ParseSeverityError> {
    if let Ok(bits) = token.parse::<u64>() {
        return Ok(Severity(bits));
    }
    match token.to_lowercase().as_str() {
        "debug" => Ok(Severity::DEBUG),
        "note" => Ok(Severity::NOTE),
        "info" => Ok(Severity::INFO),
        "warning" | "warn" => Ok(Severity::WARNING),
        "error" | "err" => Ok(Severity::ERROR),
        "problem" => Ok(Severity::PROBLEM),
        "bug" => Ok(Severity::BUG),
        "all" => Ok(Severity::ALL),
        "none" => Ok(Severity::NONE),
        _ => Err(ParseSeverityError(token.to_string())),
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Accepts a class name, `all`, a decimal bit value, or any of these
    /// joined with `|` or `,` (e.g. `"warning|error"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseSeverityError(s.to_string()));
        }
        s.split(['|', ','])
            .map(str::trim)
            .try_fold(Self::NONE, |acc, token| Ok(acc | parse_one(token)?))
    }
}

/// Config files may spell a mask as a number, a string, or a list of names.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Bits(u64),
    Text(String),
    List(Vec<String>),
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = ParseSeverityError;

    fn try_from(repr: SeverityRepr) -> Result<Self, Self::Error> {
        match repr {
            SeverityRepr::Bits(bits) => Ok(Self(bits)),
            SeverityRepr::Text(s) => s.parse(),
            SeverityRepr::List(names) => names
                .iter()
                .try_fold(Self::NONE, |acc, name| Ok(acc | name.parse::<Self>()?)),
        }
    }
}
