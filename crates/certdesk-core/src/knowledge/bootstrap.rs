//! Built-in knowledge: the university's submission offices and certificate metadata
//! as published on the portal.

use super::{CertificateKind, CertificateMeta, Coordinates, Helpdesk, KnowledgeBase, Office};
use std::collections::BTreeMap;

use CertificateKind as C;

#[allow(clippy::too_many_arguments)]
fn office(
    id: u32,
    name: &str,
    building: &str,
    floor: &str,
    room: &str,
    hours: &str,
    days: &str,
    (lat, lng): (f64, f64),
    certificates: &[CertificateKind],
    contact: &str,
    description: &str,
) -> Office {
    Office {
        id,
        name: name.to_string(),
        building: building.to_string(),
        floor: floor.to_string(),
        room: room.to_string(),
        hours: hours.to_string(),
        days: days.to_string(),
        coordinates: Coordinates { lat, lng },
        certificates: certificates.to_vec(),
        contact: contact.to_string(),
        image: None,
        description: Some(description.to_string()),
    }
}

pub(super) fn builtin_offices() -> Vec<Office> {
    vec![
        office(
            1,
            "Academic Section",
            "Administrative Block",
            "1st Floor",
            "A-105",
            "9:00 AM - 5:00 PM",
            "Monday - Friday",
            (17.4932, 78.3931),
            &[C::Bonafide, C::Character, C::CourseCompletion],
            "+91 40 2304 2000",
            "Main academic office for student certificates and academic records",
        ),
        office(
            2,
            "Examination Branch",
            "Examination Block",
            "Ground Floor",
            "E-12",
            "10:00 AM - 4:00 PM",
            "Monday - Saturday",
            (17.4935, 78.3938),
            &[C::Provisional, C::Degree, C::AcademicTranscript, C::Migration],
            "+91 40 2304 2100",
            "Official examination records and degree certificates",
        ),
        office(
            3,
            "Controller of Examinations Office",
            "Administrative Block",
            "2nd Floor",
            "A-201",
            "9:30 AM - 4:30 PM",
            "Monday - Friday",
            (17.4930, 78.3940),
            &[C::ConsolidatedMarksMemo, C::RevaluationResults, C::DuplicateCertificates],
            "+91 40 2304 2150",
            "Official examination results and revaluation services",
        ),
        office(
            4,
            "Student Affairs Office",
            "Student Activity Center",
            "1st Floor",
            "S-101",
            "10:00 AM - 3:00 PM",
            "Monday - Friday",
            (17.4928, 78.3925),
            &[C::NoDues, C::Conduct, C::AntiRagging],
            "+91 40 2304 2200",
            "Student welfare and conduct related certificates",
        ),
        office(
            5,
            "Registrar Office",
            "Administrative Block",
            "3rd Floor",
            "A-301",
            "9:00 AM - 5:00 PM",
            "Monday - Friday",
            (17.4933, 78.3950),
            &[C::UniversityAuthentication, C::OfficialTranscripts, C::VerificationLetters],
            "+91 40 2304 2050",
            "High-level university documentation and official verifications",
        ),
        office(
            6,
            "Finance Section",
            "Administrative Block",
            "Ground Floor",
            "A-005",
            "9:00 AM - 4:00 PM",
            "Monday - Saturday",
            (17.4931, 78.3935),
            &[C::FeePaymentReceipts, C::ScholarshipCertificates, C::FinancialClearance],
            "+91 40 2304 2300",
            "All fee-related documentation and financial clearances",
        ),
    ]
}

fn text_map(entries: &[(CertificateKind, &str)]) -> BTreeMap<CertificateKind, String> {
    entries.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

pub(super) fn builtin_meta() -> CertificateMeta {
    let deadlines = text_map(&[
        (C::Bonafide, "No specific deadline - available year-round"),
        (C::Character, "Apply 15 days before requirement date"),
        (C::CourseCompletion, "Within 6 months of course completion"),
        (C::Provisional, "Apply after final semester results"),
        (C::Degree, "Apply 3 months after provisional certificate"),
        (C::AcademicTranscript, "No deadline - available on request"),
        (C::Migration, "Apply within 2 years of graduation"),
        (C::NoDues, "Apply during final semester"),
        (C::Conduct, "Apply 10 days before requirement"),
    ]);

    let requirements: BTreeMap<CertificateKind, Vec<String>> = [
        (C::Bonafide, vec!["Application form", "Student ID", "Fee payment receipt (₹50)"]),
        (
            C::Character,
            vec!["Application form", "Student ID", "Fee payment receipt (₹100)", "Conduct clearance"],
        ),
        (
            C::CourseCompletion,
            vec!["Application form", "All semester mark sheets", "Fee payment receipt (₹200)"],
        ),
        (
            C::Provisional,
            vec![
                "Application form",
                "Final semester results",
                "Fee payment receipt (₹500)",
                "No dues certificate",
            ],
        ),
        (
            C::Degree,
            vec![
                "Provisional certificate",
                "Original mark sheets",
                "Fee payment receipt (₹1000)",
                "Convocation fee",
            ],
        ),
        (
            C::AcademicTranscript,
            vec!["Application form", "Previous transcripts (if any)", "Fee payment receipt (₹300)"],
        ),
        (
            C::Migration,
            vec![
                "Application form",
                "Original certificates",
                "Fee payment receipt (₹1000)",
                "NOC from current institution",
            ],
        ),
        (
            C::NoDues,
            vec!["Clearance from all departments", "Library clearance", "Hostel clearance (if applicable)"],
        ),
        (
            C::Conduct,
            vec!["Application form", "Disciplinary clearance", "Fee payment receipt (₹100)"],
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k, v.into_iter().map(String::from).collect()))
    .collect();

    let processing_time = text_map(&[
        (C::Bonafide, "1-2 working days"),
        (C::Character, "3-5 working days"),
        (C::CourseCompletion, "7-10 working days"),
        (C::Provisional, "15-20 working days"),
        (C::Degree, "30-45 working days"),
        (C::AcademicTranscript, "5-7 working days"),
        (C::Migration, "20-30 working days"),
        (C::NoDues, "2-3 working days"),
        (C::Conduct, "5-7 working days"),
    ]);

    let fees = text_map(&[
        (C::Bonafide, "₹50"),
        (C::Character, "₹100"),
        (C::CourseCompletion, "₹200"),
        (C::Provisional, "₹500"),
        (C::Degree, "₹1000 + convocation fee"),
        (C::AcademicTranscript, "₹300"),
        (C::Migration, "₹1000"),
        (C::NoDues, "Free"),
        (C::Conduct, "₹100"),
    ]);

    CertificateMeta {
        deadlines,
        requirements,
        processing_time,
        fees,
    }
}

pub(super) fn builtin_helpdesk() -> Helpdesk {
    Helpdesk {
        email: "certificates@jntuh.ac.in".to_string(),
        phone: "+91 40 2304 2000".to_string(),
        address: "JNTUH, Kukatpally, Hyderabad - 500085".to_string(),
    }
}

pub(super) fn builtin_payment_methods() -> Vec<String> {
    [
        "Online through the university portal (UPI, net banking, debit/credit card)",
        "Cash or demand draft at the Finance Section counter (Administrative Block, Ground Floor)",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl KnowledgeBase {
    /// The portal's seeded data: six offices and nine certificates with full metadata.
    pub fn builtin() -> Self {
        Self {
            offices: builtin_offices(),
            meta: builtin_meta(),
            payment_methods: builtin_payment_methods(),
            helpdesk: builtin_helpdesk(),
        }
    }
}
