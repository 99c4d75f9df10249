//! Analytics events emitted by the defect module

use bridge_traits::analytics::AnalyticsEvent;

use crate::error::DefectError;

/// Outcome of a report submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefectEvent {
    /// The server accepted a report
    Submitted { object_id: String },
    /// A submission failed; `error` is the [`DefectError::kind`]
    Failed { error: &'static str },
}

impl DefectEvent {
    pub fn failed(error: &DefectError) -> Self {
        DefectEvent::Failed {
            error: error.kind(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DefectEvent::Submitted { .. } => "defect_submitted",
            DefectEvent::Failed { .. } => "defect_failed",
        }
    }

    pub fn to_analytics_event(&self) -> AnalyticsEvent {
        let event = AnalyticsEvent::new(self.name());
        match self {
            DefectEvent::Submitted { object_id } => event.with_property("object_id", object_id),
            DefectEvent::Failed { error } => event.with_property("error", *error),
        }
    }
}
