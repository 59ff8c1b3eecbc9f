// trail.rs — Append-only JSONL decision trail.
//
// One JSON object per line, append-friendly, greppable. Each event's
// `previous_hash` is the SHA-256 of the preceding raw line, so inserting,
// deleting, or editing any line breaks the chain and `verify_chain`
// reports the first broken link.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TrailError;
use crate::event::TrailEvent;
use crate::hash;

/// An append-only decision trail backed by a JSONL file.
pub struct DecisionTrail {
    writer: BufWriter<File>,
    path: PathBuf,
    /// Hash of the last line written, used to link the next event.
    last_hash: Option<String>,
}

impl DecisionTrail {
    /// Open (or create) a trail at the given path.
    ///
    /// Existing content is never rewritten; the last line's hash is
    /// recovered so new events continue the chain.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TrailError> {
        let path = path.as_ref().to_path_buf();

        let last_hash = if path.exists() {
            Self::read_last_hash(&path)?
        } else {
            None
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| TrailError::OpenFailed {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            last_hash,
        })
    }

    /// Append an event, linking it to the previous one and flushing.
    pub fn append(&mut self, event: &mut TrailEvent) -> Result<(), TrailError> {
        event.previous_hash = self.last_hash.clone();

        let json = serde_json::to_string(event)?;
        self.last_hash = Some(hash::hash_str(&json));

        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;

        debug!(scope_id = %event.scope_id, kind = ?event.kind, "trail event appended");
        Ok(())
    }

    /// Read all events from a trail file, oldest first. Blank lines are
    /// skipped.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<TrailEvent>, TrailError> {
        let file = File::open(path.as_ref()).map_err(|source| TrailError::OpenFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut events = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            events.push(serde_json::from_str(&line)?);
        }

        Ok(events)
    }

    /// Verify a trail file's hash chain.
    ///
    /// Returns `Ok(true)` when every event's `previous_hash` matches the
    /// hash of the preceding raw line, or `IntegrityViolation` at the
    /// first broken link.
    pub fn verify_chain(path: impl AsRef<Path>) -> Result<bool, TrailError> {
        let file = File::open(path.as_ref()).map_err(|source| TrailError::OpenFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut previous_hash: Option<String> = None;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let event: TrailEvent = serde_json::from_str(&line)?;
            if event.previous_hash != previous_hash {
                return Err(TrailError::IntegrityViolation {
                    line: line_num + 1,
                    expected: previous_hash.unwrap_or_else(|| "None".to_string()),
                    actual: event.previous_hash.unwrap_or_else(|| "None".to_string()),
                });
            }

            // Hash the raw line, not a re-serialization — field order must
            // not matter for verification.
            previous_hash = Some(hash::hash_str(&line));
        }

        Ok(true)
    }

    /// The path to the trail file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_last_hash(path: &Path) -> Result<Option<String>, TrailError> {
        let file = File::open(path).map_err(|source| TrailError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut last_line: Option<String> = None;

        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                last_line = Some(line);
            }
        }

        Ok(last_line.map(|line| hash::hash_str(&line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TrailKind;
    use tempfile::tempdir;

    #[test]
    fn append_and_read_round_trip() {
        let dir = tempdir().unwrap();
        let trail_path = dir.path().join("trail.jsonl");

        {
            let mut trail = DecisionTrail::open(&trail_path).unwrap();
            let mut e1 = TrailEvent::new("scope-us", TrailKind::DecisionRecorded)
                .with_policy("eps-1.3");
            let mut e2 = TrailEvent::new("scope-us", TrailKind::ConflictDetected);
            trail.append(&mut e1).unwrap();
            trail.append(&mut e2).unwrap();
        }

        let events = DecisionTrail::read_all(&trail_path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, TrailKind::DecisionRecorded);
        assert_eq!(events[1].kind, TrailKind::ConflictDetected);
    }

    #[test]
    fn first_event_has_no_previous_hash() {
        let dir = tempdir().unwrap();
        let trail_path = dir.path().join("trail.jsonl");

        {
            let mut trail = DecisionTrail::open(&trail_path).unwrap();
            let mut event = TrailEvent::new("scope-us", TrailKind::DecisionRecorded);
            trail.append(&mut event).unwrap();
        }

        let events = DecisionTrail::read_all(&trail_path).unwrap();
        assert!(events[0].previous_hash.is_none());
    }

    #[test]
    fn chain_verifies_after_many_appends() {
        let dir = tempdir().unwrap();
        let trail_path = dir.path().join("trail.jsonl");

        {
            let mut trail = DecisionTrail::open(&trail_path).unwrap();
            for i in 0..5 {
                let mut event =
                    TrailEvent::new(format!("scope-{}", i), TrailKind::DecisionRecorded);
                trail.append(&mut event).unwrap();
            }
        }

        assert!(DecisionTrail::verify_chain(&trail_path).unwrap());
    }

    #[test]
    fn reopen_continues_chain() {
        let dir = tempdir().unwrap();
        let trail_path = dir.path().join("trail.jsonl");

        {
            let mut trail = DecisionTrail::open(&trail_path).unwrap();
            let mut event = TrailEvent::new("scope-us", TrailKind::ConflictDetected);
            trail.append(&mut event).unwrap();
        }
        {
            let mut trail = DecisionTrail::open(&trail_path).unwrap();
            let mut event = TrailEvent::new("scope-us", TrailKind::ConflictResolved);
            trail.append(&mut event).unwrap();
        }

        assert!(DecisionTrail::verify_chain(&trail_path).unwrap());
        assert_eq!(DecisionTrail::read_all(&trail_path).unwrap().len(), 2);
    }

    #[test]
    fn tampered_line_breaks_chain() {
        let dir = tempdir().unwrap();
        let trail_path = dir.path().join("trail.jsonl");

        {
            let mut trail = DecisionTrail::open(&trail_path).unwrap();
            let mut e1 = TrailEvent::new("scope-us", TrailKind::DecisionRecorded);
            let mut e2 = TrailEvent::new("scope-us", TrailKind::ConflictResolved);
            trail.append(&mut e1).unwrap();
            trail.append(&mut e2).unwrap();
        }

        // Edit the first line's scope id in place.
        let content = std::fs::read_to_string(&trail_path).unwrap();
        let tampered = content.replacen("scope-us", "scope-eu", 1);
        std::fs::write(&trail_path, tampered).unwrap();

        match DecisionTrail::verify_chain(&trail_path) {
            Err(TrailError::IntegrityViolation { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected IntegrityViolation, got {:?}", other.map(|_| ())),
        }
    }
}
