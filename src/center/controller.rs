//! Professional-center page controller
//!
//! One controller instance backs one open center page. It owns its own
//! copies of briefs, filters, and derived stats; nothing is shared between
//! concurrent page instances. The entity service is the sole source of
//! truth and is read-after-write eventually consistent, so a reload after a
//! create is expected, but not guaranteed, to show the new record.

use super::domain::DomainProfile;
use crate::briefs::entity_types;
use crate::briefs::filter::{
    apply_filters, ConfidenceFilter, FilterState, PeriodFilter, PriorityFilter,
};
use crate::briefs::stats::{compute_default_stats, CenterStats};
use crate::briefs::types::{decode_collection, Brief, CreateBriefRequest, RelatedData};
use crate::entity::{EntityService, Predicate, SortSpec, User};
use crate::error::Result;
use crate::session::SessionContext;
use chrono::Utc;
use std::sync::Arc;

/// Page-load lifecycle state
///
/// There is no distinct error state: a failed core fetch still lands in
/// `ReadyEmpty` with the list rendered empty and a notice recorded. No
/// automatic retry; the user triggers a manual refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No load attempted yet
    Idle,
    Loading,
    /// All three fetches landed
    Ready,
    /// Related-data loader failed; briefs intact, related stats read zero
    ReadyDegraded,
    /// The core brief fetch failed; list renders empty
    ReadyEmpty,
}

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Library-level stand-in for a UI toast
#[derive(Debug, Clone)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// Controller for one professional-center page instance
pub struct CenterController {
    service: Arc<dyn EntityService>,
    profile: DomainProfile,
    session: SessionContext,
    brief_limit: usize,
    related_limit: usize,

    briefs: Vec<Brief>,
    related: RelatedData,
    current_user: Option<User>,
    search_term: String,
    filters: FilterState,
    load_state: LoadState,
    notices: Vec<Notice>,
}

impl CenterController {
    pub fn new(
        service: Arc<dyn EntityService>,
        profile: DomainProfile,
        session: SessionContext,
        config: &crate::config::CenterConfig,
    ) -> Self {
        Self {
            service,
            profile,
            session,
            brief_limit: config.brief_limit,
            related_limit: config.related_limit,
            briefs: Vec::new(),
            related: RelatedData::default(),
            current_user: None,
            search_term: String::new(),
            filters: FilterState::default(),
            load_state: LoadState::Idle,
            notices: Vec::new(),
        }
    }

    /// Load (or reload) the page's data
    ///
    /// Idempotent and re-invocable for manual refresh. The brief list, the
    /// current-user lookup, and the domain's related-data loader run
    /// concurrently and are joined before the state settles. Single attempt
    /// per call; every failure degrades instead of propagating.
    pub async fn load_data(&mut self) {
        self.load_state = LoadState::Loading;

        let predicate = Predicate::new().eq("domain", self.profile.domain.clone());
        let sort = SortSpec::desc("created_date");
        let service = Arc::clone(&self.service);
        let loader = Arc::clone(&self.profile.related_loader);
        let domain = self.profile.domain.clone();
        let related_limit = self.related_limit;

        let (briefs_result, user_result, related_result) = tokio::join!(
            service.filter(
                entity_types::BRIEF,
                &predicate,
                Some(&sort),
                Some(self.brief_limit),
            ),
            service.current_user(),
            loader.load(service.as_ref(), &domain, related_limit),
        );

        let core_ok = match briefs_result {
            Ok(records) => {
                self.briefs = decode_collection(records, "brief");
                true
            }
            Err(e) => {
                tracing::warn!("brief fetch failed for domain {}: {}", domain, e);
                self.push_notice(Severity::Warning, format!("Chargement des briefs impossible: {}", e));
                self.briefs = Vec::new();
                false
            }
        };

        self.current_user = match user_result {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!("current-user lookup failed: {}", e);
                None
            }
        };

        let related_ok = match related_result {
            Ok(related) => {
                self.related = related;
                true
            }
            Err(e) => {
                tracing::warn!("related-data load failed for domain {}: {}", domain, e);
                self.push_notice(
                    Severity::Warning,
                    format!("Données associées indisponibles: {}", e),
                );
                self.related = RelatedData::default();
                false
            }
        };

        self.load_state = if !core_ok {
            LoadState::ReadyEmpty
        } else if !related_ok {
            LoadState::ReadyDegraded
        } else {
            LoadState::Ready
        };
    }

    /// Create a brief in this controller's domain, then reload
    ///
    /// Validation runs client-side first; a failing request is surfaced as a
    /// blocking notice and nothing is written.
    pub async fn create_brief(&mut self, request: CreateBriefRequest) -> Result<Brief> {
        if let Err(e) = request.validate() {
            self.push_notice(Severity::Error, e.to_string());
            return Err(e);
        }

        let mut fields = serde_json::to_value(&request)?;
        if let Some(object) = fields.as_object_mut() {
            object.insert(
                "domain".to_string(),
                serde_json::Value::String(self.profile.domain.clone()),
            );
        }

        let created = match self.service.create(entity_types::BRIEF, fields).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("brief creation failed: {}", e);
                self.push_notice(Severity::Error, format!("Création du brief impossible: {}", e));
                return Err(e);
            }
        };
        let brief = Brief::from_record(created)?;

        self.load_data().await;
        Ok(brief)
    }

    /// Filtered view of the brief list, recomputed from current state
    pub fn filtered_briefs(&self) -> Vec<Brief> {
        apply_filters(&self.briefs, &self.search_term, &self.filters, Utc::now())
    }

    /// Headline stats: defaults from the unfiltered collections, merged with
    /// the domain's policy override
    pub fn stats(&self) -> CenterStats {
        let defaults = compute_default_stats(&self.briefs, &self.related);
        defaults.merged(self.profile.stats_policy.compute(&self.briefs, &self.related))
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_priority(&mut self, priority: PriorityFilter) {
        self.filters.priority = priority;
    }

    pub fn set_period(&mut self, period: PeriodFilter) {
        self.filters.period = period;
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.filters.region = region.into();
    }

    pub fn set_confidence(&mut self, confidence: ConfidenceFilter) {
        self.filters.confidence = confidence;
    }

    /// Restore every filter dimension to its default and clear the search
    /// term
    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
        self.search_term.clear();
    }

    fn push_notice(&mut self, severity: Severity, message: String) {
        self.notices.push(Notice { severity, message });
    }

    pub fn briefs(&self) -> &[Brief] {
        &self.briefs
    }

    pub fn related(&self) -> &RelatedData {
        &self.related
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn profile(&self) -> &DomainProfile {
        &self.profile
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand pending notices to the page shell
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::briefs::types::PriorityLevel;
    use crate::center::domain::profile_for;
    use crate::config::CenterConfig;
    use crate::entity::StubEntityService;
    use crate::session::Role;
    use serde_json::json;

    fn session() -> SessionContext {
        SessionContext::new(Role::Analyst)
    }

    async fn seeded_service() -> Arc<StubEntityService> {
        let service = Arc::new(StubEntityService::new());
        service
            .seed(
                entity_types::BRIEF,
                vec![
                    json!({
                        "id": "b1",
                        "domain": "Militaire",
                        "brief_title": "Mouvements navals",
                        "executive_summary": "Activité inhabituelle en Méditerranée",
                        "priority_level": "Flash",
                        "confidence_score": 92,
                        "geographic_focus": {"regions": ["Méditerranée"]},
                        "created_date": "2026-08-23T08:00:00Z",
                    }),
                    json!({
                        "id": "b2",
                        "domain": "Militaire",
                        "brief_title": "Exercices frontaliers",
                        "priority_level": "Routine",
                        "created_date": "2026-08-01T08:00:00Z",
                    }),
                    json!({
                        "id": "b3",
                        "domain": "Finance",
                        "brief_title": "Hors domaine",
                        "priority_level": "Urgent",
                        "created_date": "2026-08-22T08:00:00Z",
                    }),
                ],
            )
            .await;
        service
            .seed(
                entity_types::PREDICTION,
                vec![json!({
                    "id": "p1",
                    "title": "Escalade probable",
                    "domain": "Militaire",
                    "probability_score": 85,
                    "created_date": "2026-08-20T00:00:00Z",
                })],
            )
            .await;
        service
            .set_user(User {
                id: "u1".to_string(),
                email: "a@sentinelle.app".to_string(),
                full_name: "Ana Lyste".to_string(),
                role: Some("analyst".to_string()),
            })
            .await;
        service
    }

    fn controller(service: Arc<StubEntityService>) -> CenterController {
        CenterController::new(
            service,
            profile_for("Militaire"),
            session(),
            &CenterConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_happy_path_load() {
        let service = seeded_service().await;
        let mut center = controller(service);
        assert_eq!(center.load_state(), LoadState::Idle);

        center.load_data().await;

        assert_eq!(center.load_state(), LoadState::Ready);
        // Domain-scoped, newest first
        assert_eq!(center.briefs().len(), 2);
        assert_eq!(center.briefs()[0].id, "b1");
        assert_eq!(center.related().predictions.len(), 1);
        assert!(center.current_user().is_some());
        assert!(center.notices().is_empty());
    }

    #[tokio::test]
    async fn test_related_failure_degrades() {
        let service = seeded_service().await;
        service.fail_reads(entity_types::PREDICTION).await;
        let mut center = controller(service);

        center.load_data().await;

        assert_eq!(center.load_state(), LoadState::ReadyDegraded);
        // Briefs intact, related stats read zero
        assert_eq!(center.briefs().len(), 2);
        let stats = center.stats();
        assert_eq!(stats.total_briefs, 2);
        assert_eq!(stats.linked_predictions, 0);
        assert!(center
            .notices()
            .iter()
            .any(|n| n.severity == Severity::Warning));
    }

    #[tokio::test]
    async fn test_core_failure_renders_empty() {
        let service = seeded_service().await;
        service.fail_reads(entity_types::BRIEF).await;
        let mut center = controller(service);

        center.load_data().await;

        assert_eq!(center.load_state(), LoadState::ReadyEmpty);
        assert!(center.briefs().is_empty());
        assert_eq!(center.stats().total_briefs, 0);
        assert!(!center.notices().is_empty());
    }

    #[tokio::test]
    async fn test_missing_user_is_tolerated() {
        let service = Arc::new(StubEntityService::new());
        let mut center = controller(service);

        center.load_data().await;

        assert_eq!(center.load_state(), LoadState::Ready);
        assert!(center.current_user().is_none());
    }

    #[tokio::test]
    async fn test_manual_refresh_is_idempotent() {
        let service = seeded_service().await;
        let mut center = controller(Arc::clone(&service));

        center.load_data().await;
        let first = center.briefs().to_vec();
        center.load_data().await;
        assert_eq!(center.briefs(), first.as_slice());
        assert_eq!(center.load_state(), LoadState::Ready);
    }

    #[tokio::test]
    async fn test_filters_drive_visible_list_not_stats() {
        let service = seeded_service().await;
        let mut center = controller(service);
        center.load_data().await;

        center.set_priority(PriorityFilter::Exact(PriorityLevel::Flash));
        assert_eq!(center.filtered_briefs().len(), 1);
        // Headline counts stay on the unfiltered collection
        assert_eq!(center.stats().total_briefs, 2);
    }

    #[tokio::test]
    async fn test_domain_policy_extra_metric() {
        let service = seeded_service().await;
        let mut center = controller(service);
        center.load_data().await;

        let stats = center.stats();
        assert_eq!(stats.extra.get("flashBriefs"), Some(&1));
        assert_eq!(stats.critical_briefs, 1);
        assert_eq!(stats.high_prob_predictions, 1);
    }

    #[tokio::test]
    async fn test_reset_filters() {
        let service = seeded_service().await;
        let mut center = controller(service);
        center.load_data().await;

        center.set_search_term("navals");
        center.set_region("Méditerranée");
        center.set_priority(PriorityFilter::Exact(PriorityLevel::Flash));
        center.reset_filters();

        assert_eq!(center.search_term(), "");
        assert_eq!(center.filters(), &FilterState::default());
        assert_eq!(center.filtered_briefs().len(), center.briefs().len());
    }

    #[tokio::test]
    async fn test_create_brief_validation_blocks_submission() {
        let service = Arc::new(StubEntityService::new());
        let mut center = controller(Arc::clone(&service));
        center.load_data().await;

        let request = CreateBriefRequest {
            brief_title: "  ".to_string(),
            executive_summary: String::new(),
            priority_level: PriorityLevel::Routine,
            classification: String::new(),
            confidence_score: None,
            geographic_focus: None,
        };
        let result = center.create_brief(request).await;
        assert!(result.is_err());
        // Nothing was written
        let records = service.list(entity_types::BRIEF, None, None).await.unwrap();
        assert!(records.is_empty());
        assert!(center
            .notices()
            .iter()
            .any(|n| n.severity == Severity::Error));
    }

    #[tokio::test]
    async fn test_create_brief_then_reload_sees_it() {
        let service = seeded_service().await;
        let mut center = controller(Arc::clone(&service));
        center.load_data().await;
        center.drain_notices();

        let request = CreateBriefRequest {
            brief_title: "Nouvelle alerte".to_string(),
            executive_summary: "Résumé".to_string(),
            priority_level: PriorityLevel::Urgent,
            classification: "Confidentiel".to_string(),
            confidence_score: Some(60),
            geographic_focus: None,
        };
        let created = center.create_brief(request).await.unwrap();
        assert_eq!(created.domain, "Militaire");

        assert!(center.briefs().iter().any(|b| b.id == created.id));
        assert_eq!(center.stats().total_briefs, 3);
    }
}
