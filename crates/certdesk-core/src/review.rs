//! Admin review queue: student certificate requests waiting for approval.

use crate::error::{CoreError, Result};
use crate::knowledge::CertificateKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub id: u32,
    pub student_name: String,
    pub student_id: String,
    pub kind: CertificateKind,
    pub submitted: NaiveDate,
    pub status: ReviewStatus,
    /// Uploaded file names, in upload order.
    #[serde(default)]
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewQueue {
    requests: Vec<ReviewRequest>,
}

impl ReviewQueue {
    pub fn new(requests: Vec<ReviewRequest>) -> Self {
        Self { requests }
    }

    /// Three sample requests, one already approved.
    pub fn seeded() -> Self {
        let request = |id,
                       name: &str,
                       student_id: &str,
                       kind,
                       submitted,
                       status,
                       documents: &[&str]| {
            Some(ReviewRequest {
                id,
                student_name: name.to_string(),
                student_id: student_id.to_string(),
                kind,
                submitted: NaiveDate::from_ymd_opt(2025, 1, submitted)?,
                status,
                documents: documents.iter().map(|d| d.to_string()).collect(),
            })
        };
        let requests = [
            request(
                1,
                "John Doe",
                "ST001",
                CertificateKind::Bonafide,
                5,
                ReviewStatus::Pending,
                &["transcript.pdf", "id_card.jpg"],
            ),
            request(
                2,
                "Jane Smith",
                "ST002",
                CertificateKind::CourseCompletion,
                6,
                ReviewStatus::Pending,
                &["course_record.pdf"],
            ),
            request(
                3,
                "Mike Johnson",
                "ST003",
                CertificateKind::NoDues,
                4,
                ReviewStatus::Approved,
                &["dues_clearance.pdf"],
            ),
        ];
        Self::new(requests.into_iter().flatten().collect())
    }

    pub fn requests(&self) -> &[ReviewRequest] {
        &self.requests
    }

    pub fn get(&self, id: u32) -> Option<&ReviewRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn counts(&self) -> ReviewCounts {
        self.requests
            .iter()
            .fold(ReviewCounts::default(), |mut counts, r| {
                match r.status {
                    ReviewStatus::Pending => counts.pending += 1,
                    ReviewStatus::Approved => counts.approved += 1,
                    ReviewStatus::Rejected => counts.rejected += 1,
                }
                counts
            })
    }

    pub fn approve(&mut self, id: u32) -> Result<&ReviewRequest> {
        self.decide(id, ReviewStatus::Approved)
    }

    pub fn reject(&mut self, id: u32) -> Result<&ReviewRequest> {
        self.decide(id, ReviewStatus::Rejected)
    }

    /// Only pending requests can be decided; a decision is final.
    fn decide(&mut self, id: u32, status: ReviewStatus) -> Result<&ReviewRequest> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CoreError::UnknownReview(id))?;
        if request.status != ReviewStatus::Pending {
            return Err(CoreError::AlreadyReviewed(id));
        }
        request.status = status;
        tracing::info!(
            target: "certdesk::review",
            id,
            student = %request.student_id,
            certificate = request.kind.display_name(),
            status = ?status,
            "review request decided"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_counts() {
        let queue = ReviewQueue::seeded();
        assert_eq!(queue.requests().len(), 3);
        assert_eq!(
            queue.counts(),
            ReviewCounts {
                pending: 2,
                approved: 1,
                rejected: 0,
            }
        );
        assert_eq!(queue.get(2).unwrap().kind, CertificateKind::CourseCompletion);
    }

    #[test]
    fn approve_and_reject_move_pending_requests() {
        let mut queue = ReviewQueue::seeded();
        assert_eq!(queue.approve(1).unwrap().status, ReviewStatus::Approved);
        assert_eq!(queue.reject(2).unwrap().status, ReviewStatus::Rejected);
        assert_eq!(
            queue.counts(),
            ReviewCounts {
                pending: 0,
                approved: 2,
                rejected: 1,
            }
        );
    }

    #[test]
    fn decided_requests_cannot_change() {
        let mut queue = ReviewQueue::seeded();
        assert!(matches!(queue.reject(3), Err(CoreError::AlreadyReviewed(3))));
        queue.reject(1).unwrap();
        assert!(matches!(queue.approve(1), Err(CoreError::AlreadyReviewed(1))));
        assert_eq!(queue.get(1).unwrap().status, ReviewStatus::Rejected);
    }

    #[test]
    fn unknown_request_is_an_error() {
        let mut queue = ReviewQueue::seeded();
        assert!(matches!(queue.approve(9), Err(CoreError::UnknownReview(9))));
    }
}
