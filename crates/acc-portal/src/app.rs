//! Wiring: repositories, services and the combined HTTP router.

use std::sync::Arc;

use axum::{Extension, Router};

use crate::accounts::password::PasswordHasher;
use crate::accounts::{
    account_admin_router, auth_router, AccountService, SessionAuthority, TokenAuthority,
};
use crate::config::AppConfig;
use crate::content::{
    content_admin_router, content_public_router, CaseService, NewsService, ResourceService,
};
use crate::memory::{
    MemoryContentRepository, MemoryInterestRepository, MemoryPropertyRepository,
    MemoryReportRepository, MemorySettingsRepository, MemoryStatisticsRepository,
    MemorySubscriptionRepository, MemoryUserRepository,
};
use crate::overview::{overview_router, OverviewService};
use crate::properties::{property_admin_router, property_public_router, PropertyService};
use crate::rate_limit::FixedWindowLimiter;
use crate::reports::{report_admin_router, report_public_router, ReportService};
use crate::settings::{settings_admin_router, settings_public_router, SettingsService};
use crate::statistics::{statistics_admin_router, statistics_public_router, StatisticsService};
use crate::subscriptions::{
    subscription_admin_router, subscription_public_router, SubscriptionService,
};
use crate::uploads::{upload_router, UploadStore};

/// Every service the HTTP surface needs, sharing one set of repositories.
#[derive(Clone)]
pub struct Portal {
    pub accounts: Arc<AccountService>,
    pub settings: Arc<SettingsService>,
    pub properties: Arc<PropertyService>,
    pub reports: Arc<ReportService>,
    pub cases: Arc<CaseService>,
    pub news: Arc<NewsService>,
    pub resources: Arc<ResourceService>,
    pub statistics: Arc<StatisticsService>,
    pub subscriptions: Arc<SubscriptionService>,
    pub overview: Arc<OverviewService>,
    pub uploads: Arc<UploadStore>,
    pub limiter: Arc<FixedWindowLimiter>,
}

impl Portal {
    /// Assemble the portal over process-local storage.
    pub fn in_memory(config: &AppConfig) -> Self {
        let users = Arc::new(MemoryUserRepository::default());
        let settings = Arc::new(SettingsService::new(Arc::new(
            MemorySettingsRepository::default(),
        )));

        let accounts = Arc::new(AccountService::new(
            users.clone(),
            TokenAuthority::new(&config.auth.secret, config.auth.token_ttl_minutes),
            PasswordHasher::new(config.auth.password_cost),
        ));
        let properties = Arc::new(PropertyService::new(
            Arc::new(MemoryPropertyRepository::default()),
            Arc::new(MemoryInterestRepository::default()),
            settings.clone(),
        ));
        let reports = Arc::new(ReportService::new(
            Arc::new(MemoryReportRepository::default()),
            users,
            settings.clone(),
        ));
        let cases = Arc::new(CaseService::new(Arc::new(MemoryContentRepository::default())));
        let news = Arc::new(NewsService::new(Arc::new(MemoryContentRepository::default())));
        let resources = Arc::new(ResourceService::new(Arc::new(
            MemoryContentRepository::default(),
        )));
        let statistics = Arc::new(StatisticsService::new(Arc::new(
            MemoryStatisticsRepository::default(),
        )));
        let subscriptions = Arc::new(SubscriptionService::new(Arc::new(
            MemorySubscriptionRepository::default(),
        )));
        let overview = Arc::new(OverviewService::new(
            properties.clone(),
            reports.clone(),
            cases.clone(),
            news.clone(),
            statistics.clone(),
            accounts.clone(),
        ));

        Self {
            accounts,
            settings,
            properties,
            reports,
            cases,
            news,
            resources,
            statistics,
            subscriptions,
            overview,
            uploads: Arc::new(UploadStore::from_config(&config.uploads)),
            limiter: Arc::new(FixedWindowLimiter::from_config(&config.rate_limit)),
        }
    }

    /// Public and staff routes with bearer-token sessions resolved by the account service.
    pub fn router(&self) -> Router {
        let authority: Arc<dyn SessionAuthority> = self.accounts.clone();

        Router::new()
            .merge(auth_router(self.accounts.clone(), self.limiter.clone()))
            .merge(property_public_router(
                self.properties.clone(),
                self.limiter.clone(),
            ))
            .merge(report_public_router(self.reports.clone(), self.limiter.clone()))
            .merge(content_public_router(self.cases.clone(), "/api/cases"))
            .merge(content_public_router(self.news.clone(), "/api/news"))
            .merge(content_public_router(self.resources.clone(), "/api/resources"))
            .merge(statistics_public_router(self.statistics.clone()))
            .merge(settings_public_router(self.settings.clone()))
            .merge(subscription_public_router(
                self.subscriptions.clone(),
                self.limiter.clone(),
            ))
            .merge(overview_router(self.overview.clone()))
            .merge(account_admin_router(self.accounts.clone()))
            .merge(property_admin_router(self.properties.clone()))
            .merge(report_admin_router(self.reports.clone()))
            .merge(content_admin_router(self.cases.clone(), "/api/admin/cases"))
            .merge(content_admin_router(self.news.clone(), "/api/admin/news"))
            .merge(content_admin_router(
                self.resources.clone(),
                "/api/admin/resources",
            ))
            .merge(statistics_admin_router(self.statistics.clone()))
            .merge(settings_admin_router(self.settings.clone()))
            .merge(subscription_admin_router(self.subscriptions.clone()))
            .merge(upload_router(self.uploads.clone()))
            .layer(Extension(authority))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{json_request, read_json, test_config};
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn admin_routes_require_a_bearer_token() {
        let portal = Portal::in_memory(&test_config());
        let response = portal
            .router()
            .oneshot(json_request("GET", "/api/admin/overview", None, None))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn issued_token_opens_the_admin_overview() {
        let config = test_config();
        let portal = Portal::in_memory(&config);
        portal
            .accounts
            .ensure_admin(&config.auth.admin_email, &config.auth.admin_password)
            .expect("admin created");

        let login = portal
            .router()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({
                    "email": config.auth.admin_email,
                    "password": config.auth.admin_password,
                })),
            ))
            .await
            .expect("router responds");
        assert_eq!(login.status(), StatusCode::OK);
        let body = read_json(login).await;
        let token = body["data"]["token"].as_str().expect("token issued").to_string();

        let overview = portal
            .router()
            .oneshot(json_request("GET", "/api/admin/overview", Some(&token), None))
            .await
            .expect("router responds");
        assert_eq!(overview.status(), StatusCode::OK);
        let body = read_json(overview).await;
        assert_eq!(body["data"]["counts"]["active_users"], 1);
    }
}
