// SPDX-License-Identifier: MIT

//! Notification payload construction from a finished run.
//!
//! [`classify`] is pure: the same run always yields the same payload, and the
//! subject line is a function of the aggregate status alone.

use serde::{Deserialize, Serialize};

use crate::outcome::{RunStatus, UpdateRun};

/// Subject and plain-text body of the single notification for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub subject: String,
    pub body: String,
}

impl NotificationPayload {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Build the one notification describing a finished run.
///
/// Successes are reported before failures, each in execution order. A pending
/// restart appends a warning block to the body but never changes the subject.
pub fn classify(run: &UpdateRun) -> NotificationPayload {
    let subject = match run.status() {
        RunStatus::Success => "Update Completed Successfully",
        RunStatus::Partial => "Update Completed with Errors",
        RunStatus::Failed => "Update Failed",
        RunStatus::NoChanges => "Update — No Changes",
    };

    let mut sections = Vec::new();
    if run.any_succeeded() {
        sections.push(format!(
            "The following updates were performed:\n\n{}",
            run.successful_lines().join("\n")
        ));
    }
    if run.any_failed() {
        sections.push(format!(
            "The following commands failed:\n\n{}",
            run.failure_lines().join("\n")
        ));
    }
    if sections.is_empty() {
        sections.push("No updates were performed and no errors occurred.".to_string());
    }

    let mut body = sections.join("\n\n");
    if run.reboot.required {
        body.push_str(&format!(
            "\n\nA reboot is required to finish applying these updates.\nRequested by: {}",
            run.reboot.reason()
        ));
    }

    NotificationPayload::new(subject, body)
}

/// Notification for a run that aborted before any outcome was classified.
pub fn fatal_payload(error: &str) -> NotificationPayload {
    NotificationPayload::new(
        "Update Error",
        format!("An error occurred during the update process:\n\n{error}"),
    )
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "report_property_tests.rs"]
mod property_tests;
