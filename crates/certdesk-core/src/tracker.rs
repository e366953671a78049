//! Student certificate dashboard: completion status per certificate and admin status changes.

use crate::error::{CoreError, Result};
use crate::knowledge::CertificateKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Office recorded on submissions created through a status change.
pub const ADMIN_OFFICE: &str = "Admin Panel";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    Completed,
    Pending,
    InProgress,
    NotStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Approved,
    UnderReview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub date: NaiveDate,
    pub office: String,
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub id: u32,
    pub kind: CertificateKind,
    pub status: CertificateStatus,
    /// `None` once the certificate has been submitted and no longer has a due date.
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub description: String,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl CertificateRecord {
    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }
}

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerView {
    #[default]
    All,
    /// Everything not yet completed.
    Pending,
    Completed,
    /// Not completed, earliest due date first, undated last.
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Pending plus not started.
    pub outstanding: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CertificateTracker {
    records: Vec<CertificateRecord>,
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

impl CertificateTracker {
    pub fn new(records: Vec<CertificateRecord>) -> Self {
        Self { records }
    }

    /// The six certificates a final-year student is asked for.
    pub fn seeded() -> Self {
        use CertificateKind as C;
        use CertificateStatus as S;

        let record = |id, kind, status, due_date, priority, description: &str| CertificateRecord {
            id,
            kind,
            status,
            due_date,
            priority,
            description: description.to_string(),
            submissions: Vec::new(),
        };

        let mut records = vec![
            record(
                1,
                C::Bonafide,
                S::Completed,
                None,
                Priority::Low,
                "A certificate that confirms your status as a bonafide student of the university.",
            ),
            record(
                2,
                C::ExaminationFeeReceipt,
                S::Pending,
                date(2025, 4, 30),
                Priority::High,
                "Proof of payment for examination fees for the current semester.",
            ),
            record(
                3,
                C::CourseCompletion,
                S::InProgress,
                date(2025, 5, 15),
                Priority::Medium,
                "Certifies that you have completed all required courses for your degree program.",
            ),
            record(
                4,
                C::AcademicTranscript,
                S::NotStarted,
                date(2025, 6, 10),
                Priority::Medium,
                "Official record of your academic performance including grades and credits earned.",
            ),
            record(
                5,
                C::NoDues,
                S::NotStarted,
                date(2025, 6, 15),
                Priority::Low,
                "Certifies that you have no outstanding dues with the university.",
            ),
            record(
                6,
                C::Character,
                S::NotStarted,
                date(2025, 6, 20),
                Priority::Low,
                "Attests to your character and conduct during your time at the university.",
            ),
        ];

        if let Some(submitted) = date(2025, 4, 10) {
            records[0].submissions.push(Submission {
                date: submitted,
                office: "Academic Section".to_string(),
                status: SubmissionStatus::Approved,
            });
        }
        if let Some(submitted) = date(2025, 4, 15) {
            records[2].submissions.push(Submission {
                date: submitted,
                office: "Examination Branch".to_string(),
                status: SubmissionStatus::UnderReview,
            });
        }
        Self::new(records)
    }

    pub fn records(&self) -> &[CertificateRecord] {
        &self.records
    }

    pub fn get(&self, id: u32) -> Option<&CertificateRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records for a dashboard tab, optionally narrowed by a case-insensitive name search.
    pub fn view(&self, view: TrackerView, search: Option<&str>) -> Vec<&CertificateRecord> {
        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let mut out: Vec<&CertificateRecord> = self
            .records
            .iter()
            .filter(|r| match view {
                TrackerView::All => true,
                TrackerView::Completed => r.status == CertificateStatus::Completed,
                TrackerView::Pending | TrackerView::Upcoming => {
                    r.status != CertificateStatus::Completed
                }
            })
            .filter(|r| {
                needle
                    .as_deref()
                    .map_or(true, |n| r.name().to_lowercase().contains(n))
            })
            .collect();
        if view == TrackerView::Upcoming {
            // undated records sort last
            out.sort_by_key(|r| (r.due_date.is_none(), r.due_date));
        }
        out
    }

    pub fn summary(&self) -> ProgressSummary {
        let count = |pred: fn(CertificateStatus) -> bool| {
            self.records.iter().filter(|r| pred(r.status)).count()
        };
        let total = self.records.len();
        let completed = count(|s| s == CertificateStatus::Completed);
        let percent = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        ProgressSummary {
            total,
            completed,
            in_progress: count(|s| s == CertificateStatus::InProgress),
            outstanding: count(|s| {
                matches!(s, CertificateStatus::Pending | CertificateStatus::NotStarted)
            }),
            percent,
        }
    }

    /// Sets a record's status. Moving to `Completed` or `InProgress` also appends a
    /// submission from [`ADMIN_OFFICE`] dated `on`.
    pub fn update_status(
        &mut self,
        id: u32,
        status: CertificateStatus,
        on: NaiveDate,
    ) -> Result<&CertificateRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CoreError::UnknownCertificate(id))?;
        record.status = status;
        let submission_status = match status {
            CertificateStatus::Completed => Some(SubmissionStatus::Approved),
            CertificateStatus::InProgress => Some(SubmissionStatus::UnderReview),
            CertificateStatus::Pending | CertificateStatus::NotStarted => None,
        };
        if let Some(submission_status) = submission_status {
            record.submissions.push(Submission {
                date: on,
                office: ADMIN_OFFICE.to_string(),
                status: submission_status,
            });
        }
        tracing::info!(
            target: "certdesk::tracker",
            id,
            certificate = record.kind.display_name(),
            status = ?status,
            "certificate status updated"
        );
        Ok(record)
    }
}
