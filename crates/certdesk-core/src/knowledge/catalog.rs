//! Certificate catalog: the closed set of certificate types the desk knows about.
//!
//! Display names and trigger phrases are attributes of the variant, so a renamed
//! certificate cannot silently break a metadata lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier for a certificate type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateKind {
    Bonafide,
    Character,
    CourseCompletion,
    Provisional,
    Degree,
    AcademicTranscript,
    Migration,
    NoDues,
    Conduct,
    ConsolidatedMarksMemo,
    RevaluationResults,
    DuplicateCertificates,
    AntiRagging,
    UniversityAuthentication,
    OfficialTranscripts,
    VerificationLetters,
    FeePaymentReceipts,
    ScholarshipCertificates,
    FinancialClearance,
    ExaminationFeeReceipt,
}

impl CertificateKind {
    /// Returns all kinds in declaration order.
    pub fn all() -> [Self; 20] {
        [
            Self::Bonafide,
            Self::Character,
            Self::CourseCompletion,
            Self::Provisional,
            Self::Degree,
            Self::AcademicTranscript,
            Self::Migration,
            Self::NoDues,
            Self::Conduct,
            Self::ConsolidatedMarksMemo,
            Self::RevaluationResults,
            Self::DuplicateCertificates,
            Self::AntiRagging,
            Self::UniversityAuthentication,
            Self::OfficialTranscripts,
            Self::VerificationLetters,
            Self::FeePaymentReceipts,
            Self::ScholarshipCertificates,
            Self::FinancialClearance,
            Self::ExaminationFeeReceipt,
        ]
    }

    /// Wire name, identical to the serde representation (`no_dues`).
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Bonafide => "bonafide",
            Self::Character => "character",
            Self::CourseCompletion => "course_completion",
            Self::Provisional => "provisional",
            Self::Degree => "degree",
            Self::AcademicTranscript => "academic_transcript",
            Self::Migration => "migration",
            Self::NoDues => "no_dues",
            Self::Conduct => "conduct",
            Self::ConsolidatedMarksMemo => "consolidated_marks_memo",
            Self::RevaluationResults => "revaluation_results",
            Self::DuplicateCertificates => "duplicate_certificates",
            Self::AntiRagging => "anti_ragging",
            Self::UniversityAuthentication => "university_authentication",
            Self::OfficialTranscripts => "official_transcripts",
            Self::VerificationLetters => "verification_letters",
            Self::FeePaymentReceipts => "fee_payment_receipts",
            Self::ScholarshipCertificates => "scholarship_certificates",
            Self::FinancialClearance => "financial_clearance",
            Self::ExaminationFeeReceipt => "examination_fee_receipt",
        }
    }

    /// Human-readable name, as printed on the certificate.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Bonafide => "Bonafide Certificate",
            Self::Character => "Character Certificate",
            Self::CourseCompletion => "Course Completion Certificate",
            Self::Provisional => "Provisional Certificate",
            Self::Degree => "Degree Certificate",
            Self::AcademicTranscript => "Academic Transcript",
            Self::Migration => "Migration Certificate",
            Self::NoDues => "No Dues Certificate",
            Self::Conduct => "Conduct Certificate",
            Self::ConsolidatedMarksMemo => "Consolidated Marks Memo",
            Self::RevaluationResults => "Revaluation Results",
            Self::DuplicateCertificates => "Duplicate Certificates",
            Self::AntiRagging => "Anti-Ragging Certificate",
            Self::UniversityAuthentication => "University Authentication",
            Self::OfficialTranscripts => "Official Transcripts",
            Self::VerificationLetters => "Verification Letters",
            Self::FeePaymentReceipts => "Fee Payment Receipts",
            Self::ScholarshipCertificates => "Scholarship Certificates",
            Self::FinancialClearance => "Financial Clearance",
            Self::ExaminationFeeReceipt => "Examination Fee Receipt",
        }
    }

    /// Lower-case phrases that identify this certificate inside a normalized query.
    pub fn triggers(&self) -> &'static [&'static str] {
        match self {
            Self::Bonafide => &["bonafide", "bona fide", "bona-fide"],
            Self::Character => &["character"],
            Self::CourseCompletion => &["course completion", "completion certificate"],
            Self::Provisional => &["provisional"],
            Self::Degree => &["degree"],
            Self::AcademicTranscript => &["transcript"],
            Self::Migration => &["migration"],
            Self::NoDues => &["no dues", "no-dues", "nodues"],
            Self::Conduct => &["conduct"],
            Self::ConsolidatedMarksMemo => &["marks memo", "consolidated"],
            Self::RevaluationResults => &["revaluation"],
            Self::DuplicateCertificates => &["duplicate"],
            Self::AntiRagging => &["ragging"],
            Self::UniversityAuthentication => &["authentication"],
            Self::OfficialTranscripts => &["official transcript"],
            Self::VerificationLetters => &["verification letter"],
            Self::FeePaymentReceipts => &["fee payment receipt", "fee receipt"],
            Self::ScholarshipCertificates => &["scholarship"],
            Self::FinancialClearance => &["financial clearance"],
            Self::ExaminationFeeReceipt => &["examination fee receipt", "exam fee receipt"],
        }
    }

    /// Finds the certificate named in an already lower-cased query.
    ///
    /// When several kinds match, the one with the longest matching trigger wins
    /// ("official transcript" beats "transcript"); ties go to declaration order.
    pub fn detect(normalized: &str) -> Option<Self> {
        let mut best: Option<(Self, usize)> = None;
        for kind in Self::all() {
            let longest = kind
                .triggers()
                .iter()
                .filter(|t| normalized.contains(*t))
                .map(|t| t.len())
                .max();
            if let Some(len) = longest {
                if best.map_or(true, |(_, best_len)| len > best_len) {
                    best = Some((kind, len));
                }
            }
        }
        best.map(|(kind, _)| kind)
    }
}

impl fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CertificateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|k| k.slug() == s)
            .ok_or_else(|| format!("unknown certificate kind '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_finds_named_certificate() {
        assert_eq!(
            CertificateKind::detect("where do i submit my bonafide certificate?"),
            Some(CertificateKind::Bonafide)
        );
        assert_eq!(
            CertificateKind::detect("how long does a degree certificate take?"),
            Some(CertificateKind::Degree)
        );
        assert_eq!(CertificateKind::detect("what are the office hours?"), None);
    }

    #[test]
    fn detect_prefers_longest_trigger() {
        assert_eq!(
            CertificateKind::detect("i need official transcripts"),
            Some(CertificateKind::OfficialTranscripts)
        );
        assert_eq!(
            CertificateKind::detect("i need an academic transcript"),
            Some(CertificateKind::AcademicTranscript)
        );
        assert_eq!(
            CertificateKind::detect("submit the examination fee receipt"),
            Some(CertificateKind::ExaminationFeeReceipt)
        );
    }

    #[test]
    fn triggers_are_lower_case() {
        for kind in CertificateKind::all() {
            assert!(!kind.triggers().is_empty(), "{kind:?} has no triggers");
            for t in kind.triggers() {
                assert_eq!(*t, t.to_lowercase());
            }
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&CertificateKind::NoDues).unwrap();
        assert_eq!(json, "\"no_dues\"");
        let back: CertificateKind = serde_json::from_str("\"course_completion\"").unwrap();
        assert_eq!(back, CertificateKind::CourseCompletion);
    }

    #[test]
    fn slug_matches_serde_name_and_parses_back() {
        for kind in CertificateKind::all() {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.slug()));
            assert_eq!(kind.slug().parse::<CertificateKind>(), Ok(kind));
        }
        assert!("not_a_kind".parse::<CertificateKind>().is_err());
        assert!("Degree".parse::<CertificateKind>().is_err());
    }
}
