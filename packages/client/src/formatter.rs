//! Message formatting utilities for client display.

use chrono::{DateTime, Utc};
use hiroba_shared::protocol::ParticipantDto;

use crate::reconciler::LogEntry;

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the roster received in a `user list` event
    ///
    /// # Arguments
    ///
    /// * `participants` - Participants in connection order
    ///
    /// # Returns
    ///
    /// A formatted string with participant list
    pub fn format_roster(participants: &[ParticipantDto]) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!("Participants ({}):\n", participants.len()));

        if participants.is_empty() {
            output.push_str("(No participants)\n");
        } else {
            for participant in participants {
                output.push_str(&format!(
                    "{} - entered at {}\n",
                    participant.name,
                    Self::format_time(&participant.connected_at)
                ));
            }
        }

        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format one log entry, either a chat message or a system notice
    pub fn format_entry(entry: &LogEntry) -> String {
        if entry.is_system() {
            return format!("\n* {}\n", entry.message);
        }
        format!(
            "\n\n{}\n@{}: {}\nsent at {}\n{}\n",
            THIN_RULE,
            entry.name,
            entry.message,
            Self::format_time(&entry.timestamp),
            THIN_RULE
        )
    }

    /// Render an ISO 8601 timestamp for display; unparsable input is shown as is
    pub fn format_time(timestamp: &str) -> String {
        DateTime::parse_from_rfc3339(timestamp)
            .map(|t| {
                t.with_timezone(&Utc)
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
            })
            .unwrap_or_else(|_| timestamp.to_string())
    }
}
