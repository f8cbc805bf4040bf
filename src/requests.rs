//! Demandes en attente (congés, échanges de shift).
//!
//! Cycle de vie : créée `pending`, puis une unique transition terminale
//! `approved` ou `denied` par un gestionnaire. Les horodatages sont fournis
//! par l'appelant pour garder le type pur.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::WorkerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestKind {
    /// Congé sur un intervalle de dates inclus.
    TimeOff { start: NaiveDate, end: NaiveDate },
    /// Échange d'un shift précis, éventuellement avec un travailleur ciblé.
    ShiftSwap {
        date: NaiveDate,
        shift_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<WorkerId>,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("time off end date must not be before start date")]
    InvalidDateRange,
    #[error("request has already been resolved")]
    AlreadyResolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRequest {
    pub id: String,
    pub worker_id: WorkerId,
    pub kind: RequestKind,
    #[serde(default)]
    pub reason: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PendingRequest {
    /// Demande de congé, validée (`end >= start`).
    pub fn time_off<R: Into<String>>(
        worker_id: WorkerId,
        start: NaiveDate,
        end: NaiveDate,
        reason: R,
        now: DateTime<Utc>,
    ) -> Result<Self, RequestError> {
        if end < start {
            return Err(RequestError::InvalidDateRange);
        }
        Ok(Self::new(
            worker_id,
            RequestKind::TimeOff { start, end },
            reason.into(),
            now,
        ))
    }

    pub fn shift_swap(
        worker_id: WorkerId,
        date: NaiveDate,
        shift_id: String,
        target: Option<WorkerId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(
            worker_id,
            RequestKind::ShiftSwap {
                date,
                shift_id,
                target,
            },
            String::new(),
            now,
        )
    }

    fn new(worker_id: WorkerId, kind: RequestKind, reason: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            worker_id,
            kind,
            reason,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn approve(&mut self, now: DateTime<Utc>) -> Result<(), RequestError> {
        self.resolve(RequestStatus::Approved, now)
    }

    pub fn deny(&mut self, now: DateTime<Utc>) -> Result<(), RequestError> {
        self.resolve(RequestStatus::Denied, now)
    }

    fn resolve(&mut self, status: RequestStatus, now: DateTime<Utc>) -> Result<(), RequestError> {
        if !self.is_pending() {
            return Err(RequestError::AlreadyResolved);
        }
        self.status = status;
        self.updated_at = now;
        Ok(())
    }
}
