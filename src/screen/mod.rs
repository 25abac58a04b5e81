//! The lookup screen: a small state machine owning everything the user sees.
//!
//! Transitions are plain methods on [`LookupScreen`] and never touch the
//! terminal. [`LookupScreen::submit`] validates and hands out a
//! [`LookupTicket`], the caller performs the request and feeds the reply back
//! through [`LookupScreen::resolve`]. [`LookupScreen::submit_lookup`] wires the
//! two together for callers that simply await the service.
//!
//! Every submission advances a sequence number, and a reply is only accepted
//! for the most recent ticket, so a slow earlier request can never overwrite
//! the outcome of a later one.

use log::{error, info, warn};
use crate::postal::LookupService;
use crate::postal::model::{Pincode, PostOfficeRecord, ServiceReply};
use crate::error::LookupError;

pub mod card;
pub mod spinner;
pub mod view;

pub use view::View;

/// shown when the service reports an error without a message
pub const NO_DATA_MESSAGE: &str = "No data found for this pincode";

/// Result state of the latest lookup attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Idle,
    Loading,
    Success {
        pincode: Pincode,
        records: Vec<PostOfficeRecord>,
        message: String,
    },
    Failure {
        message: String,
    },
}

/// Where a notification is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// rendered as part of the screen
    Inline,
    /// blocking, must be dismissed by the user
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub channel: Channel,
    pub message: String,
}

/// Handle of one dispatched lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    seq: u64,
    pincode: Pincode,
}

impl LookupTicket {
    pub fn pincode(&self) -> &Pincode {
        &self.pincode
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// the input was not a pincode, no request must be made
    Rejected,
    Dispatch(LookupTicket),
}

#[derive(Debug, Default)]
pub struct LookupScreen {
    outcome: Outcome,
    filter: String,
    notifications: Vec<Notification>,
    seq: u64,
}

impl LookupScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new attempt with the input exactly as typed.
    ///
    /// Clears the filter, previous results, errors and notifications first.
    pub fn submit(&mut self, raw: &str) -> Submission {
        self.seq += 1;
        self.filter.clear();
        self.notifications.clear();

        match Pincode::parse(raw) {
            Ok(pincode) => {
                info!("looking up pincode [{}]", pincode);
                self.outcome = Outcome::Loading;
                Submission::Dispatch(LookupTicket { seq: self.seq, pincode })
            }
            Err(err) => {
                let message = err.to_string();
                self.notifications = [Channel::Inline, Channel::Alert]
                    .into_iter()
                    .map(|channel| Notification { channel, message: message.clone() })
                    .collect();
                self.outcome = Outcome::Failure { message };
                Submission::Rejected
            }
        }
    }

    /// Apply the reply of a dispatched lookup.
    ///
    /// Returns `false`, leaving the screen untouched, when `ticket` is not the
    /// latest one.
    pub fn resolve(&mut self, ticket: LookupTicket, result: Result<ServiceReply, LookupError>) -> bool {
        if ticket.seq != self.seq || self.outcome != Outcome::Loading {
            warn!("discarding stale reply for [{}] (ticket {}, current {})", ticket.pincode, ticket.seq, self.seq);
            return false;
        }

        self.outcome = match result {
            Ok(ServiceReply::Found { message, offices }) => {
                info!("[{}] resolved to [{}] post offices", ticket.pincode, offices.len());
                Outcome::Success { pincode: ticket.pincode, records: offices, message }
            }
            Ok(ServiceReply::NotFound { message }) => Outcome::Failure {
                message: message.unwrap_or_else(|| NO_DATA_MESSAGE.to_string()),
            },
            Err(err) => {
                if err.is_transport() {
                    error!("API error while looking up [{}]: {:?}", ticket.pincode, err);
                } else {
                    warn!("unexpected reply for [{}]: {:?}", ticket.pincode, err);
                }
                Outcome::Failure { message: err.to_string() }
            }
        };
        true
    }

    /// Validate, query `service` and record the outcome.
    pub async fn submit_lookup<S: LookupService>(&mut self, service: &S, raw: &str) -> &Outcome {
        if let Submission::Dispatch(ticket) = self.submit(raw) {
            let result = service.lookup(ticket.pincode()).await;
            self.resolve(ticket, result);
        }
        &self.outcome
    }

    /// Set the name filter and return the records it lets through.
    pub fn update_filter(&mut self, text: &str) -> Vec<&PostOfficeRecord> {
        self.filter = text.to_owned();
        self.filtered_records()
    }

    /// records of the current success narrowed by the filter, empty otherwise
    pub fn filtered_records(&self) -> Vec<&PostOfficeRecord> {
        match &self.outcome {
            Outcome::Success { records, .. } => filter_by_name(records, &self.filter),
            _ => Vec::new(),
        }
    }

    pub fn view(&self) -> View<'_> {
        match &self.outcome {
            Outcome::Idle => View::NotSearched,
            Outcome::Loading => View::Loading,
            Outcome::Failure { message } => View::Error(message),
            Outcome::Success { pincode, message, .. } => View::Results {
                pincode,
                message,
                filter: &self.filter,
                records: self.filtered_records(),
            },
        }
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.outcome == Outcome::Loading
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// hand the pending notifications to the caller, so each fires once
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

/// Case-insensitive substring match on the office name, order preserved.
pub fn filter_by_name<'a>(records: &'a [PostOfficeRecord], text: &str) -> Vec<&'a PostOfficeRecord> {
    let needle = text.to_lowercase();
    records.iter()
        .filter(|record| record.name.to_lowercase().contains(&needle))
        .collect()
}
