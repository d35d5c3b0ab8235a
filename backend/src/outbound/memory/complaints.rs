//! In-memory `ComplaintRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError};
use crate::domain::{Complaint, ComplaintId, UserId};

/// Complaint storage backed by a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryComplaintRepository {
    complaints: Mutex<HashMap<ComplaintId, Complaint>>,
}

impl InMemoryComplaintRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ComplaintId, Complaint>> {
        self.complaints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn newest_first<'a>(items: impl Iterator<Item = &'a Complaint>) -> Vec<Complaint> {
        let mut listed: Vec<Complaint> = items.cloned().collect();
        listed.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_uuid().cmp(a.id().as_uuid()))
        });
        listed
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut complaints = self.lock();
        if complaints.contains_key(&complaint.id()) {
            return Err(ComplaintRepositoryError::query(format!(
                "complaint {} already exists",
                complaint.id()
            )));
        }
        complaints.insert(complaint.id(), complaint.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        Ok(self.lock().get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        Ok(Self::newest_first(self.lock().values()))
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let complaints = self.lock();
        Ok(Self::newest_first(
            complaints.values().filter(|complaint| complaint.is_owned_by(*owner)),
        ))
    }

    async fn update(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        match self.lock().get_mut(&complaint.id()) {
            Some(stored) => {
                *stored = complaint.clone();
                Ok(())
            }
            None => {
                warn!(complaint_id = %complaint.id(), "update for unknown complaint");
                Err(ComplaintRepositoryError::query(format!(
                    "complaint {} does not exist",
                    complaint.id()
                )))
            }
        }
    }
}
