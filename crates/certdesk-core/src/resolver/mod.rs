//! Rule-based query resolver: free text in, one formatted answer out.
//!
//! Rules are evaluated in registration order and the first match answers. Nothing here
//! fails; a query no rule claims gets [`DEFAULT_RESPONSE`].

mod format;
mod rules;

pub use format::NOT_AVAILABLE;
pub use rules::DEFAULT_RESPONSE;

use crate::knowledge::{CertificateKind, KnowledgeBase};
use serde::Serialize;
use std::sync::Arc;

/// Rule name reported when nothing matched.
pub const DEFAULT_RULE: &str = "default";

/// A query after normalization: lower-cased text and the certificate it names, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    certificate: Option<CertificateKind>,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let text = raw.to_lowercase();
        let certificate = CertificateKind::detect(&text);
        Self { text, certificate }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn certificate(&self) -> Option<CertificateKind> {
        self.certificate
    }

    /// Plain substring containment; no tokenization.
    pub fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.text.contains(p))
    }
}

/// One response category: a predicate over the query and a handler producing the answer.
pub trait ResponseRule: Send + Sync {
    /// Unique category name, reported with each answer.
    fn name(&self) -> &str;

    fn matches(&self, query: &Query) -> bool;

    fn respond(&self, query: &Query, knowledge: &KnowledgeBase) -> String;
}

/// Handler signature used by [`PhraseRule`].
pub type RuleHandler = fn(&Query, &KnowledgeBase) -> String;

/// A rule triggered by phrase containment, optionally gated on a detected certificate.
///
/// An empty trigger list means the phrase check always passes.
pub struct PhraseRule {
    name: &'static str,
    triggers: &'static [&'static str],
    requires_certificate: bool,
    handler: RuleHandler,
}

impl PhraseRule {
    pub fn new(
        name: &'static str,
        triggers: &'static [&'static str],
        handler: RuleHandler,
    ) -> Self {
        Self {
            name,
            triggers,
            requires_certificate: false,
            handler,
        }
    }

    pub fn requiring_certificate(mut self) -> Self {
        self.requires_certificate = true;
        self
    }
}

impl ResponseRule for PhraseRule {
    fn name(&self) -> &str {
        self.name
    }

    fn matches(&self, query: &Query) -> bool {
        let phrase_hit = self.triggers.is_empty() || query.contains_any(self.triggers);
        phrase_hit && (!self.requires_certificate || query.certificate().is_some())
    }

    fn respond(&self, query: &Query, knowledge: &KnowledgeBase) -> String {
        (self.handler)(query, knowledge)
    }
}

/// Ordered list of rules. Earlier registrations take precedence.
pub struct RuleRegistry {
    rules: Vec<Arc<dyn ResponseRule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The desk's categories in precedence order.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for rule in rules::standard_rules() {
            registry.register(Arc::new(rule));
        }
        registry
    }

    pub fn register(&mut self, rule: Arc<dyn ResponseRule>) {
        self.rules.push(rule);
    }

    pub fn first_match(&self, query: &Query) -> Option<&dyn ResponseRule> {
        self.rules
            .iter()
            .find(|r| r.matches(query))
            .map(|r| r.as_ref())
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.name().to_string()).collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// An answer together with the category that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub rule: String,
    pub text: String,
}

/// Resolves queries against an injected knowledge base.
#[derive(Clone)]
pub struct QueryResolver {
    knowledge: Arc<KnowledgeBase>,
    rules: Arc<RuleRegistry>,
}

impl QueryResolver {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self::with_rules(knowledge, Arc::new(RuleRegistry::standard()))
    }

    pub fn with_rules(knowledge: Arc<KnowledgeBase>, rules: Arc<RuleRegistry>) -> Self {
        Self { knowledge, rules }
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn resolve(&self, input: &str) -> String {
        self.resolve_detailed(input).text
    }

    pub fn resolve_detailed(&self, input: &str) -> Resolution {
        let query = Query::new(input);
        let resolution = match self.rules.first_match(&query) {
            Some(rule) => Resolution {
                rule: rule.name().to_string(),
                text: rule.respond(&query, &self.knowledge),
            },
            None => Resolution {
                rule: DEFAULT_RULE.to_string(),
                text: DEFAULT_RESPONSE.to_string(),
            },
        };
        tracing::debug!(
            target: "certdesk::resolver",
            rule = %resolution.rule,
            certificate = ?query.certificate(),
            "resolved query"
        );
        resolution
    }
}
