//! Immutable knowledge base the resolver answers from.

use super::{CertificateKind, Office};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Per-certificate metadata. Each map is independent; a kind may be missing from any of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateMeta {
    #[serde(default)]
    pub deadlines: BTreeMap<CertificateKind, String>,
    #[serde(default)]
    pub requirements: BTreeMap<CertificateKind, Vec<String>>,
    #[serde(default, alias = "processingTime")]
    pub processing_time: BTreeMap<CertificateKind, String>,
    #[serde(default)]
    pub fees: BTreeMap<CertificateKind, String>,
}

/// Metadata field names reported by [`KnowledgeBase::missing_metadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaField {
    Deadline,
    Requirements,
    ProcessingTime,
    Fee,
}

impl MetaField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deadline => "deadline",
            Self::Requirements => "requirements",
            Self::ProcessingTime => "processing time",
            Self::Fee => "fee",
        }
    }
}

/// General student support contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Helpdesk {
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Offices plus certificate metadata. Built once and shared read-only (`Arc<KnowledgeBase>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub(super) offices: Vec<Office>,
    #[serde(default)]
    pub(super) meta: CertificateMeta,
    #[serde(default)]
    pub(super) payment_methods: Vec<String>,
    pub(super) helpdesk: Helpdesk,
}

impl KnowledgeBase {
    /// Builds and validates a knowledge base from parts.
    pub fn new(
        offices: Vec<Office>,
        meta: CertificateMeta,
        payment_methods: Vec<String>,
        helpdesk: Helpdesk,
    ) -> Result<Self> {
        let kb = Self {
            offices,
            meta,
            payment_methods,
            helpdesk,
        };
        kb.validate()?;
        Ok(kb)
    }

    /// Parses a JSON document (same shape as the serialized form) and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let kb: Self = serde_json::from_str(json)?;
        kb.validate()?;
        Ok(kb)
    }

    /// Reads a JSON knowledge file.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let kb = Self::from_json_str(&raw)?;
        tracing::info!(
            target: "certdesk::knowledge",
            path = %path.display(),
            offices = kb.offices.len(),
            "loaded knowledge file"
        );
        Ok(kb)
    }

    /// Structural checks. Missing metadata is tolerated and reported by [`Self::missing_metadata`].
    pub fn validate(&self) -> Result<()> {
        if self.offices.is_empty() {
            return Err(CoreError::InvalidKnowledge("no offices defined".into()));
        }
        let mut seen = HashSet::new();
        for office in &self.offices {
            if !seen.insert(office.id) {
                return Err(CoreError::InvalidKnowledge(format!(
                    "duplicate office id {}",
                    office.id
                )));
            }
            if office.name.trim().is_empty() {
                return Err(CoreError::InvalidKnowledge(format!(
                    "office {} has a blank name",
                    office.id
                )));
            }
            if !office.coordinates.is_valid() {
                return Err(CoreError::InvalidKnowledge(format!(
                    "office {} has out-of-range coordinates ({}, {})",
                    office.name, office.coordinates.lat, office.coordinates.lng
                )));
            }
        }
        Ok(())
    }

    pub fn offices(&self) -> &[Office] {
        &self.offices
    }

    pub fn office(&self, id: u32) -> Option<&Office> {
        self.offices.iter().find(|o| o.id == id)
    }

    /// Offices that handle `kind`, in directory order.
    pub fn offices_for(&self, kind: CertificateKind) -> Vec<&Office> {
        self.offices.iter().filter(|o| o.handles(kind)).collect()
    }

    pub fn deadline(&self, kind: CertificateKind) -> Option<&str> {
        self.meta.deadlines.get(&kind).map(String::as_str)
    }

    pub fn requirements(&self, kind: CertificateKind) -> Option<&[String]> {
        self.meta.requirements.get(&kind).map(Vec::as_slice)
    }

    pub fn processing_time(&self, kind: CertificateKind) -> Option<&str> {
        self.meta.processing_time.get(&kind).map(String::as_str)
    }

    pub fn fee(&self, kind: CertificateKind) -> Option<&str> {
        self.meta.fees.get(&kind).map(String::as_str)
    }

    pub fn payment_methods(&self) -> &[String] {
        &self.payment_methods
    }

    pub fn helpdesk(&self) -> &Helpdesk {
        &self.helpdesk
    }

    /// Kinds that appear in at least one metadata map, in declaration order.
    pub fn known_certificates(&self) -> Vec<CertificateKind> {
        CertificateKind::all()
            .into_iter()
            .filter(|k| {
                self.meta.deadlines.contains_key(k)
                    || self.meta.requirements.contains_key(k)
                    || self.meta.processing_time.contains_key(k)
                    || self.meta.fees.contains_key(k)
            })
            .collect()
    }

    /// Metadata gaps for every kind some office handles.
    pub fn missing_metadata(&self) -> Vec<(CertificateKind, MetaField)> {
        let referenced: Vec<CertificateKind> = CertificateKind::all()
            .into_iter()
            .filter(|k| self.offices.iter().any(|o| o.handles(*k)))
            .collect();
        let mut gaps = Vec::new();
        for kind in referenced {
            if self.deadline(kind).is_none() {
                gaps.push((kind, MetaField::Deadline));
            }
            if self.requirements(kind).is_none() {
                gaps.push((kind, MetaField::Requirements));
            }
            if self.processing_time(kind).is_none() {
                gaps.push((kind, MetaField::ProcessingTime));
            }
            if self.fee(kind).is_none() {
                gaps.push((kind, MetaField::Fee));
            }
        }
        gaps
    }
}
