//! certdesk-core: certificate desk library (knowledge base, rule-based query resolver,
//! conversation log, certificate tracker, admin review queue).
//!
//! Re-exports the public types so the gateway keeps a consistent API.

mod conversation;
mod error;
mod knowledge;
mod resolver;
mod review;
mod shared;
mod tracker;

pub use error::{CoreError, Result};
pub use shared::{CoreConfig, ENV_CONFIG_PATH};

pub use knowledge::{
    CertificateKind, CertificateMeta, Coordinates, Helpdesk, KnowledgeBase, MetaField, Office,
};

pub use resolver::{
    PhraseRule, Query, QueryResolver, Resolution, ResponseRule, RuleHandler, RuleRegistry,
    DEFAULT_RESPONSE, DEFAULT_RULE, NOT_AVAILABLE,
};

pub use conversation::{ConversationLog, ConversationMessage, Originator, GREETING};

pub use tracker::{
    CertificateRecord, CertificateStatus, CertificateTracker, Priority, ProgressSummary,
    Submission, SubmissionStatus, TrackerView, ADMIN_OFFICE,
};

pub use review::{ReviewCounts, ReviewQueue, ReviewRequest, ReviewStatus};
