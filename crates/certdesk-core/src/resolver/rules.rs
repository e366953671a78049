//! The desk's response categories, highest precedence first.

use super::format::{bullet, field, header, office_lines, NOT_AVAILABLE};
use super::{PhraseRule, Query};
use crate::knowledge::{CertificateKind, KnowledgeBase};

pub const DEFAULT_RESPONSE: &str = "I'm not sure about that specific query. I can help you with:\n\n\
• **Locations** - where to submit or collect a certificate\n\
• **Certificates** - details for a specific certificate (e.g. \"bonafide certificate\")\n\
• **Fees** - certificate fees and payment methods\n\
• **Processing time** - how long each certificate takes\n\
• **Deadlines** - when to apply\n\
• **Contacts** - office phone numbers\n\
• **Office hours** - when each office is open\n\
• **Online applications** - applying through the portal\n\
• **Documents** - what to bring\n\n\
Try asking, for example: \"Where do I get a bonafide certificate?\"";

const ONLINE_RESPONSE: &str = "**Online Application:**\n\n\
1. Log in to the student portal with your roll number\n\
2. Open **Certificates** and choose the certificate you need\n\
3. Fill in the application form and upload scanned copies of the required documents\n\
4. Pay the fee online (UPI, net banking, debit/credit card)\n\
5. Note the application number shown on the confirmation page\n\
6. Track the status from your dashboard and collect the certificate from the issuing office\n\n\
Carry your student ID and the payment receipt when collecting.";

const DOCUMENTS_RESPONSE: &str = "**General Document Checklist:**\n\n\
• Completed application form\n\
• Student ID card (original and a photocopy)\n\
• Fee payment receipt\n\
• Recent passport-size photographs (2)\n\
• Previous certificates or mark sheets, where applicable\n\
• No dues / clearance certificate for final-year requests\n\n\
Ask about a specific certificate (e.g. \"requirements for migration certificate\") for its exact list.";

const PROCEDURE_RESPONSE: &str = "**How to Submit a Certificate:**\n\n\
1. Check the specific requirements for the certificate in your dashboard\n\
2. Obtain the certificate from the relevant department\n\
3. Visit the submission office before the deadline\n\
4. Keep the acknowledgment slip safe\n\
5. Track the status in your dashboard";

const LOCATION_TRIGGERS: &[&str] = &["where", "location", "office", "located", "directions"];
const FEE_TRIGGERS: &[&str] = &["fee", "cost", "price", "charge", "pay"];
const PROCESSING_TRIGGERS: &[&str] = &["how long", "processing", "duration", "turnaround", "time taken"];
const DEADLINE_TRIGGERS: &[&str] = &["deadline", "due date", "last date"];
const CONTACT_TRIGGERS: &[&str] = &["contact", "phone", "call", "email", "reach"];
const HOURS_TRIGGERS: &[&str] = &["hours", "timing", "open", "close"];
const ONLINE_TRIGGERS: &[&str] = &["online", "portal", "website"];
const REQUIREMENT_TRIGGERS: &[&str] = &["requirement", "document", "need", "bring", "checklist"];
const HELP_TRIGGERS: &[&str] = &["help", "procedure", "how to", "how do", "steps", "process"];

pub(super) fn standard_rules() -> Vec<PhraseRule> {
    vec![
        PhraseRule::new("location", LOCATION_TRIGGERS, location),
        PhraseRule::new("certificate", &[], certificate).requiring_certificate(),
        PhraseRule::new("fees", FEE_TRIGGERS, fees),
        PhraseRule::new("processing_time", PROCESSING_TRIGGERS, processing_times),
        PhraseRule::new("deadlines", DEADLINE_TRIGGERS, deadlines),
        PhraseRule::new("contact", CONTACT_TRIGGERS, contacts),
        PhraseRule::new("hours", HOURS_TRIGGERS, hours),
        PhraseRule::new("online", ONLINE_TRIGGERS, |_, _| ONLINE_RESPONSE.to_string()),
        PhraseRule::new("requirements", REQUIREMENT_TRIGGERS, |_, _| DOCUMENTS_RESPONSE.to_string()),
        PhraseRule::new("help", HELP_TRIGGERS, |_, _| PROCEDURE_RESPONSE.to_string()),
    ]
}

fn location(query: &Query, kb: &KnowledgeBase) -> String {
    match query.certificate() {
        Some(kind) => office_for(kind, kb),
        None => all_offices(kb),
    }
}

fn office_for(kind: CertificateKind, kb: &KnowledgeBase) -> String {
    let offices = kb.offices_for(kind);
    if offices.is_empty() {
        let desk = kb.helpdesk();
        return format!(
            "No submission office is listed for the {}.\n\nPlease contact the student helpdesk at {} or {}.",
            kind, desk.phone, desk.email
        );
    }
    let mut lines = vec![header(&format!("Where to get your {}", kind)), String::new()];
    for office in offices {
        lines.push(format!("**{}**", office.name));
        lines.extend(office_lines(office));
        lines.push(String::new());
    }
    lines.push("You can view exact locations and get directions in the Locations tab.".to_string());
    lines.join("\n")
}

fn all_offices(kb: &KnowledgeBase) -> String {
    let mut lines = vec![header("Certificate Submission Offices"), String::new()];
    for (n, office) in kb.offices().iter().enumerate() {
        lines.push(format!("**{}. {}**", n + 1, office.name));
        lines.extend(office_lines(office));
        let handled: Vec<&str> = office.certificates.iter().map(|k| k.display_name()).collect();
        if !handled.is_empty() {
            lines.push(bullet(&format!("Certificates: {}", handled.join(", "))));
        }
        lines.push(String::new());
    }
    lines.push("You can view exact locations and get directions in the Locations tab.".to_string());
    lines.join("\n")
}

fn certificate(query: &Query, kb: &KnowledgeBase) -> String {
    let Some(kind) = query.certificate() else {
        return DEFAULT_RESPONSE.to_string();
    };
    let mut lines = vec![
        format!("**{}**", kind),
        String::new(),
        field("Deadline", kb.deadline(kind)),
        field("Processing Time", kb.processing_time(kind)),
        field("Fee", kb.fee(kind)),
        String::new(),
        header("Requirements"),
    ];
    match kb.requirements(kind) {
        Some(items) if !items.is_empty() => lines.extend(items.iter().map(|r| bullet(r))),
        _ => lines.push(bullet(NOT_AVAILABLE)),
    }
    lines.push(String::new());

    let offices = kb.offices_for(kind);
    if offices.is_empty() {
        lines.push(field("Office", None));
        lines.push(field("Contact", Some(kb.helpdesk().phone.as_str())));
    } else {
        for office in offices {
            lines.push(format!("**Office:** {} ({})", office.name, office.address()));
            lines.push(format!("**Hours:** {} ({})", office.hours, office.days));
            lines.push(format!("**Contact:** {}", office.contact));
        }
    }
    lines.join("\n")
}

fn table(
    title: &str,
    kb: &KnowledgeBase,
    value: impl Fn(CertificateKind) -> Option<String>,
) -> Vec<String> {
    let mut lines = vec![header(title), String::new()];
    for kind in kb.known_certificates() {
        let v = value(kind).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        lines.push(bullet(&format!("{}: {}", kind, v)));
    }
    lines
}

fn fees(_query: &Query, kb: &KnowledgeBase) -> String {
    let mut lines = table("Certificate Fees", kb, |k| kb.fee(k).map(String::from));
    if !kb.payment_methods().is_empty() {
        lines.push(String::new());
        lines.push(header("Payment Methods"));
        lines.extend(kb.payment_methods().iter().map(|m| bullet(m)));
    }
    lines.join("\n")
}

fn processing_times(_query: &Query, kb: &KnowledgeBase) -> String {
    let mut lines = table("Processing Times", kb, |k| kb.processing_time(k).map(String::from));
    lines.push(String::new());
    lines.push("Times are counted in working days from the date of a complete application.".to_string());
    lines.join("\n")
}

fn deadlines(_query: &Query, kb: &KnowledgeBase) -> String {
    table("Application Deadlines", kb, |k| kb.deadline(k).map(String::from)).join("\n")
}

fn contacts(_query: &Query, kb: &KnowledgeBase) -> String {
    let mut lines = vec![header("Contact Directory"), String::new()];
    for office in kb.offices() {
        lines.push(bullet(&format!("{}: {} ({})", office.name, office.contact, office.address())));
    }
    let desk = kb.helpdesk();
    lines.push(String::new());
    lines.push(header("Student Helpdesk"));
    lines.push(bullet(&format!("Phone: {}", desk.phone)));
    lines.push(bullet(&format!("Email: {}", desk.email)));
    lines.push(bullet(&format!("Address: {}", desk.address)));
    lines.join("\n")
}

fn hours(_query: &Query, kb: &KnowledgeBase) -> String {
    let mut lines = vec![header("Office Hours"), String::new()];
    for office in kb.offices() {
        lines.push(bullet(&format!("{}: {} ({})", office.name, office.hours, office.days)));
    }
    lines.push(String::new());
    lines.push("All offices are closed on Sundays and public holidays.".to_string());
    lines.join("\n")
}
