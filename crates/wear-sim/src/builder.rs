//! Fluent builder for constructing a [`WearEngine`].

use tracing::info;

use wear_action::{ActionTracker, DurationEstimator};
use wear_core::WearRng;
use wear_durability::DurabilityService;

use crate::{EngineResult, SignalInbox, TickScheduler, WearConfig, WearEngine};

/// Fluent builder for [`WearEngine`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                              |
/// |-------------------|------------------------------------------------------|
/// | `.estimator(e)`   | `config.estimator()`: built-in chain, CSV table if set |
/// | `.inbox(i)`       | A fresh `SignalInbox`                                |
///
/// # Example
///
/// ```rust,ignore
/// let config = WearConfig::load(Path::new("wear.yaml"))?;
/// let mut engine = EngineBuilder::new(config).build()?;
/// let inbox = engine.inbox();
/// engine.tick_pulse(&host, &mut NoopObserver);
/// ```
pub struct EngineBuilder {
    config:    WearConfig,
    estimator: Option<DurationEstimator>,
    inbox:     Option<SignalInbox>,
}

impl EngineBuilder {
    pub fn new(config: WearConfig) -> Self {
        Self { config, estimator: None, inbox: None }
    }

    /// Use a custom duration strategy chain instead of the configured one.
    /// The chain is kept across [`WearEngine::reload`].
    pub fn estimator(mut self, estimator: DurationEstimator) -> Self {
        self.estimator = Some(estimator);
        self
    }

    /// Share an inbox created before the engine (e.g. already handed to
    /// event handlers).
    pub fn inbox(mut self, inbox: SignalInbox) -> Self {
        self.inbox = Some(inbox);
        self
    }

    /// Validate the configuration, assemble every component and return a
    /// ready engine at tick 0.
    pub fn build(self) -> EngineResult<WearEngine> {
        let config = self.config;
        config.validate()?;

        let custom_estimator = self.estimator.is_some();
        let estimator = match self.estimator {
            Some(e) => e,
            None => config.estimator()?,
        };
        let tracker = ActionTracker::new(estimator, config.scheduler.interval_ticks, config.timeout_ticks());
        let durability = DurabilityService::new(config.resolver(), config.policy()).with_salvage(config.salvage_policy());

        info!(
            seed = config.seed,
            interval = config.scheduler.interval_ticks,
            timeout_ticks = tracker.timeout_ticks(),
            mode = ?config.mining.mode,
            "wear engine built"
        );

        Ok(WearEngine {
            scheduler:  TickScheduler::new(tracker),
            durability,
            curves:     config.degradation(),
            mending:    config.mending_policy(),
            weather:    config.weather_wear(),
            rng:        WearRng::new(config.seed),
            inbox:      self.inbox.unwrap_or_default(),
            custom_estimator,
            config,
        })
    }
}
