//! Roster resolver: end-to-end discovery for one school, sport and gender.
//!
//! The resolver opens one browser session per call, loads the home page,
//! probes the candidate roster paths in priority order, then falls back to
//! scanning the home page for a roster link. The session is closed before
//! the call returns, whatever the outcome.

use crate::cascade::{first_hit, non_empty};
use crate::discovery::discover_roster_link;
use crate::error::{Result, ScanError};
use crate::extractor::SelectorCascade;
use crate::page::PageController;
use crate::paths::candidate_paths_for;
use crate::session::{guarded, release};
use roster_browser::{BrowserActions, BrowserLauncher};
use roster_core::{AppConfig, AthleteEntry, RosterReport, RosterRequest, RosterResult};

/// Resolves team rosters using sessions from a browser launcher.
pub struct RosterResolver<L: BrowserLauncher> {
    launcher: L,
    config: AppConfig,
    cascade: SelectorCascade,
}

impl<L: BrowserLauncher> RosterResolver<L> {
    /// Create a resolver with default settings.
    #[must_use]
    pub fn new(launcher: L) -> Self {
        Self::with_config(launcher, AppConfig::default())
    }

    /// Create a resolver with explicit settings.
    #[must_use]
    pub fn with_config(launcher: L, config: AppConfig) -> Self {
        Self {
            launcher,
            config,
            cascade: SelectorCascade::default(),
        }
    }

    /// Replace the selector cascade.
    #[must_use]
    pub fn with_selectors(mut self, cascade: SelectorCascade) -> Self {
        self.cascade = cascade;
        self
    }

    /// Active settings.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolve a roster, reporting every failure as a failure descriptor.
    pub async fn resolve(&self, request: &RosterRequest) -> RosterResult {
        match self.try_resolve(request).await {
            Ok(athletes) => RosterResult::Roster(athletes),
            Err(e) => {
                tracing::warn!("Roster lookup failed: {}", e);
                RosterResult::failure(e.failure_message())
            }
        }
    }

    /// Validate raw caller input, then resolve.
    ///
    /// Invalid input yields a failure descriptor without launching a browser.
    pub async fn resolve_input(&self, base_url: &str, sport: &str, gender: &str) -> RosterResult {
        match RosterRequest::new(base_url, sport, gender) {
            Ok(request) => self.resolve(&request).await,
            Err(e) => {
                let err = ScanError::from(e);
                tracing::warn!("Rejected roster request: {}", err);
                RosterResult::failure(err.failure_message())
            }
        }
    }

    /// Resolve and wrap the outcome with the caller's input.
    pub async fn report(&self, base_url: &str, sport: &str, gender: &str) -> RosterReport {
        RosterReport {
            school: base_url.to_string(),
            sport: sport.to_string(),
            gender: gender.to_string(),
            roster: self.resolve_input(base_url, sport, gender).await,
        }
    }

    /// Resolve a roster, surfacing the reason for failure.
    pub async fn try_resolve(&self, request: &RosterRequest) -> Result<Vec<AthleteEntry>> {
        tracing::info!(
            "Resolving {} {} roster at {}",
            request.gender(),
            request.sport(),
            request.base_str()
        );

        let session = self.launcher.launch().await?;
        let outcome = guarded(self.discover(&session, request)).await;
        release(session).await;

        outcome.unwrap_or(Err(ScanError::SessionFault))
    }

    async fn discover<P: BrowserActions>(
        &self,
        page: &P,
        request: &RosterRequest,
    ) -> Result<Vec<AthleteEntry>> {
        let controller = PageController::new(
            page,
            self.config.browser.navigation_timeout(),
            &self.config.scanning,
        );
        let base = request.base_str();

        controller
            .navigate(base)
            .await
            .map_err(|source| ScanError::HomepageUnavailable {
                url: base.to_string(),
                source,
            })?;
        controller.dismiss_interstitials().await;

        let candidates = candidate_paths_for(request, &self.config.scanning);
        let probed = first_hit(&candidates, |path| {
            self.probe_candidate(&controller, base, path)
        })
        .await;
        if let Some(athletes) = probed {
            return Ok(athletes);
        }

        if let Some(athletes) = self.fallback(&controller, request).await {
            return Ok(athletes);
        }

        Err(ScanError::NoRosterFound {
            base_url: base.to_string(),
            sport: request.sport().to_string(),
            gender: request.gender().to_string(),
        })
    }

    async fn probe_candidate<P: BrowserActions>(
        &self,
        controller: &PageController<'_, P>,
        base: &str,
        path: &str,
    ) -> Option<Vec<AthleteEntry>> {
        let url = format!("{base}{path}");

        if let Err(e) = controller.navigate(&url).await {
            tracing::debug!("Skipping {}: {}", url, e);
            return None;
        }
        controller.dismiss_interstitials().await;
        controller.trigger_lazy_load().await;

        if controller.is_not_found().await {
            tracing::debug!("Skipping {}: page not found", url);
            return None;
        }

        let athletes = non_empty(self.cascade.extract(controller.page(), base).await)?;
        tracing::info!("Found {} athletes at {}", athletes.len(), url);
        Some(athletes)
    }

    async fn fallback<P: BrowserActions>(
        &self,
        controller: &PageController<'_, P>,
        request: &RosterRequest,
    ) -> Option<Vec<AthleteEntry>> {
        let base = request.base_str();
        tracing::info!("No candidate path matched, scanning {} for roster links", base);

        if let Err(e) = controller.navigate(base).await {
            tracing::warn!("Could not reload home page: {}", e);
            return None;
        }
        controller.dismiss_interstitials().await;

        let link = discover_roster_link(controller.page(), request.sport(), base).await?;

        if let Err(e) = controller.navigate(&link).await {
            tracing::warn!("Could not load discovered roster link {}: {}", link, e);
            return None;
        }
        controller.dismiss_interstitials().await;
        controller.trigger_lazy_load().await;

        let athletes = non_empty(self.cascade.extract(controller.page(), base).await)?;
        tracing::info!("Found {} athletes at {}", athletes.len(), link);
        Some(athletes)
    }
}
