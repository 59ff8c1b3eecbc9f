// event.rs — Decision trail event model.
//
// Governance outcomes worth auditing land here: a decision was recorded
// against a scope, a conflict was detected between a child and parent
// policy, or a detected conflict was resolved. Each event links to the
// prior one via `previous_hash`, so the trail is tamper-evident.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of governance outcome this event records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrailKind {
    /// A decision (allow/deny/escalate/conditional) was recorded, with
    /// its rationale in the payload.
    DecisionRecorded,
    /// A child policy was found to contradict its effective parent.
    ConflictDetected,
    /// A previously detected conflict was resolved.
    ConflictResolved,
}

/// A single trail event — one line in the JSONL trail file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailEvent {
    /// Unique identifier for this event.
    pub event_id: Uuid,

    /// When this event was recorded (UTC).
    pub timestamp: DateTime<Utc>,

    /// The scope the outcome applies to.
    pub scope_id: String,

    /// What kind of outcome was recorded.
    pub kind: TrailKind,

    /// The policy involved, when the outcome names one.
    pub policy_id: Option<String>,

    /// Who or what produced the outcome ("auto-check", "reviewer=J.Doe").
    pub actor: Option<String>,

    /// Hash of the previous event in the trail. None on the first event.
    pub previous_hash: Option<String>,

    /// Outcome-specific detail: the rationale record for decisions, the
    /// conflict description for conflicts.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl TrailEvent {
    /// Create an event with the current timestamp and a fresh UUID.
    pub fn new(scope_id: impl Into<String>, kind: TrailKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            scope_id: scope_id.into(),
            kind,
            policy_id: None,
            actor: None,
            previous_hash: None,
            payload: serde_json::Value::Null,
        }
    }

    /// Set the policy id and return self (builder pattern).
    pub fn with_policy(mut self, policy_id: impl Into<String>) -> Self {
        self.policy_id = Some(policy_id.into());
        self
    }

    /// Set the actor annotation and return self.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Attach a serializable payload and return self.
    pub fn with_payload<T: Serialize>(mut self, payload: &T) -> Result<Self, serde_json::Error> {
        self.payload = serde_json::to_value(payload)?;
        Ok(self)
    }
}
