//! Per-sector domain profiles
//!
//! A profile bundles the strategies a sector page injects into the shared
//! controller: its stats policy, its related-data loader, and its accent.
//! Most sectors run entirely on defaults; a few override one headline
//! metric.

use crate::briefs::stats::{DefaultStatsPolicy, StatsOverride, StatsPolicy};
use crate::briefs::types::{decode_collection, Brief, RelatedData};
use crate::briefs::{entity_types, ConfidenceThreshold};
use crate::entity::{EntityService, Predicate, SortSpec};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Loader for the three related analytical collections
///
/// Pages may substitute their own loader; the default fetches the three
/// collections for the domain, capped and sorted newest-first.
#[async_trait]
pub trait RelatedDataLoader: Send + Sync {
    async fn load(
        &self,
        service: &dyn EntityService,
        domain: &str,
        limit: usize,
    ) -> Result<RelatedData>;
}

/// Default related-data loader: predictions, signals, and trends scoped to
/// the domain, fetched concurrently
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRelatedLoader;

#[async_trait]
impl RelatedDataLoader for DefaultRelatedLoader {
    async fn load(
        &self,
        service: &dyn EntityService,
        domain: &str,
        limit: usize,
    ) -> Result<RelatedData> {
        let predicate = Predicate::new().eq("domain", domain);
        let sort = SortSpec::desc("created_date");

        let (predictions, signals, trends) = tokio::join!(
            service.filter(entity_types::PREDICTION, &predicate, Some(&sort), Some(limit)),
            service.filter(entity_types::SIGNAL, &predicate, Some(&sort), Some(limit)),
            service.filter(entity_types::TREND, &predicate, Some(&sort), Some(limit)),
        );

        Ok(RelatedData {
            predictions: decode_collection(predictions?, "prediction"),
            signals: decode_collection(signals?, "signal"),
            trends: decode_collection(trends?, "trend"),
        })
    }
}

/// Strategy bundle for one sector vertical
#[derive(Clone)]
pub struct DomainProfile {
    /// Domain key used in entity queries
    pub domain: String,

    /// Human-readable page title
    pub display_name: String,

    pub stats_policy: Arc<dyn StatsPolicy>,
    pub related_loader: Arc<dyn RelatedDataLoader>,
}

impl DomainProfile {
    /// Profile running entirely on defaults
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            display_name: format!("Centre {}", domain),
            domain,
            stats_policy: Arc::new(DefaultStatsPolicy),
            related_loader: Arc::new(DefaultRelatedLoader),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_stats_policy(mut self, policy: Arc<dyn StatsPolicy>) -> Self {
        self.stats_policy = policy;
        self
    }

    pub fn with_related_loader(mut self, loader: Arc<dyn RelatedDataLoader>) -> Self {
        self.related_loader = loader;
        self
    }
}

/// Adds a `flashBriefs` headline metric
struct FlashCountPolicy;

impl StatsPolicy for FlashCountPolicy {
    fn compute(&self, briefs: &[Brief], _related: &RelatedData) -> StatsOverride {
        let flash = briefs
            .iter()
            .filter(|brief| brief.priority_level == crate::briefs::PriorityLevel::Flash)
            .count() as u64;
        StatsOverride::default().with_extra("flashBriefs", flash)
    }
}

/// Adds a `highConfidenceBriefs` headline metric (score >= 90)
struct HighConfidencePolicy;

impl StatsPolicy for HighConfidencePolicy {
    fn compute(&self, briefs: &[Brief], _related: &RelatedData) -> StatsOverride {
        let floor = ConfidenceThreshold::Ninety.min_score();
        let high = briefs
            .iter()
            .filter(|brief| brief.confidence_score.map(|s| s >= floor).unwrap_or(false))
            .count() as u64;
        StatsOverride::default().with_extra("highConfidenceBriefs", high)
    }
}

/// Built-in sector profiles
///
/// One entry per professional-center vertical. Most use the defaults; the
/// exceptions demonstrate the policy extension point.
pub fn builtin_profiles() -> Vec<DomainProfile> {
    let mut profiles: Vec<DomainProfile> = [
        "Aéronautique",
        "Agroalimentaire",
        "Assurance",
        "Automobile",
        "Climat",
        "Cybersécurité",
        "Diplomatie",
        "Défense",
        "Éducation",
        "Énergie",
        "Espace",
        "Immobilier",
        "Industrie",
        "Justice",
        "Luxe",
        "Maritime",
        "Matières premières",
        "Médias",
        "Pharmaceutique",
        "Retail",
        "Santé",
        "Télécoms",
        "Tourisme",
        "Transport",
    ]
    .into_iter()
    .map(DomainProfile::new)
    .collect();

    profiles.push(
        DomainProfile::new("Militaire")
            .with_display_name("Centre Militaire")
            .with_stats_policy(Arc::new(FlashCountPolicy)),
    );
    profiles.push(
        DomainProfile::new("Finance")
            .with_display_name("Centre Finance")
            .with_stats_policy(Arc::new(HighConfidencePolicy)),
    );
    profiles.sort_by(|a, b| a.domain.cmp(&b.domain));
    profiles
}

/// Look up a built-in profile, falling back to a default bundle for unknown
/// domains
pub fn profile_for(domain: &str) -> DomainProfile {
    builtin_profiles()
        .into_iter()
        .find(|profile| profile.domain == domain)
        .unwrap_or_else(|| DomainProfile::new(domain))
}
