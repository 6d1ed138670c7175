//! Physical-token claim flow bridging a cell activity to an external service.
//!
//! The claim service itself is an excluded collaborator: the session only
//! needs success text or a user-facing failure, never protocol detail, so the
//! boundary is a small trait the transport layer implements over its HTTP
//! client. Gateway errors are converted into activity failures here and never
//! escape as faults.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use maze_explorer_world::{Activity, ActivityFailure};
use thiserror::Error;

/// Message produced once every claim code has been handed out.
pub const CODES_EXHAUSTED: &str = "Every token here has already been claimed.";

/// Errors reported by the external claim service.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// The service processed the request and refused the code.
    #[error("the claim service rejected the token code")]
    Rejected,
    /// The service could not be reached; the code was not consumed.
    #[error("the claim service is unreachable: {reason}")]
    Unreachable {
        /// Short transport-provided explanation.
        reason: String,
    },
}

/// Boundary to the external claim service.
pub trait ClaimGateway: Send {
    /// Redeems one claim code, returning confirmation text for the player.
    fn redeem(&mut self, code: &str) -> Result<String, ClaimError>;
}

/// Ordered list of one-time claim codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimCodes {
    codes: Vec<String>,
}

impl ClaimCodes {
    /// Builds a code list from explicit codes.
    #[must_use]
    pub fn new(codes: Vec<String>) -> Self {
        Self { codes }
    }

    /// Parses a code list: one claim URL per line, keeping only the trailing
    /// path segment. Blank lines are skipped.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut codes = Vec::new();
        for line in BufReader::new(reader).lines() {
            let line = line.context("failed to read claim code line")?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let code = trimmed.rsplit('/').next().unwrap_or(trimmed);
            codes.push(code.to_owned());
        }
        Ok(Self { codes })
    }

    /// Loads a code list from a file of claim URLs.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open claim code file {}", path.display()))?;
        Self::from_reader(file)
    }

    /// Number of unclaimed codes left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Reports whether every code has been handed out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Builds an activity that redeems one claim code per interaction.
///
/// Codes are consumed front to back. A rejected code is spent (the service
/// refused it and will keep refusing it); an unreachable service leaves the
/// code in place for the next attempt. Once the list runs dry the activity
/// keeps reporting exhaustion, which is how single-use semantics stay a
/// property of the effect rather than of the controller.
#[must_use]
pub fn claim_activity(
    description: impl Into<String>,
    codes: ClaimCodes,
    mut gateway: impl ClaimGateway + 'static,
) -> Activity {
    let mut codes = codes.codes;
    Activity::new(
        description,
        Box::new(move || {
            if codes.is_empty() {
                return Err(ActivityFailure::new(CODES_EXHAUSTED));
            }
            let code = codes.remove(0);
            match gateway.redeem(&code) {
                Ok(confirmation) => Ok(confirmation),
                Err(error) => {
                    log::warn!("claim of code `{code}` failed: {error}");
                    if let ClaimError::Unreachable { .. } = error {
                        codes.insert(0, code);
                    }
                    Err(ActivityFailure::new(error.to_string()))
                }
            }
        }),
    )
}
