//! SignpostEngine - Recomputes off-screen counts on every viewport change
//!
//! The engine owns the point source and the dataset extent computed from it. Each
//! viewport change rebuilds the eight regions from scratch, recounts the points and
//! pushes one [`Indicator`] per sector to an [`IndicatorSink`].

use crate::counter::{BoundaryRule, Indicator, count_by_sector_with, indicators};
use crate::{
    CancelToken, Extent, Region, Result, Sector, SectorMap, SignpostError, ViewportNotifier,
    build_regions,
};
use geo::Point;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for the engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Degrees added on every side of the point bounds to form the dataset extent,
    /// so the outermost points lie strictly inside it. Default: 1.0
    pub margin: f64,
    /// Classification of points lying exactly on a region boundary
    pub boundary_rule: BoundaryRule,
    /// Point count from which counting is spread over the rayon thread pool.
    /// Default: 50 000
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            margin: 1.0,
            boundary_rule: BoundaryRule::default(),
            parallel_threshold: 50_000,
        }
    }
}

impl Config {
    /// Reject a margin that is not finite and strictly positive
    ///
    /// With a zero margin the outermost points sit on the dataset extent edge and
    /// fall outside every region.
    pub fn validate(&self) -> Result<()> {
        if !self.margin.is_finite() || self.margin <= 0.0 {
            return Err(SignpostError::InvalidConfig(format!(
                "margin must be a finite, positive number of degrees (got {})",
                self.margin
            )));
        }
        Ok(())
    }
}

/// Provider of the points to count
///
/// The points are read on every recompute and never modified by the engine.
pub trait PointSource {
    /// All points, `x` = longitude and `y` = latitude
    fn points(&self) -> &[Point<f64>];

    /// Tight bounds of all points, `None` when there are none
    fn bounds(&self) -> Option<Extent> {
        Extent::from_points(self.points())
    }
}

impl PointSource for Vec<Point<f64>> {
    fn points(&self) -> &[Point<f64>] {
        self
    }
}

impl<T: PointSource + ?Sized> PointSource for &T {
    fn points(&self) -> &[Point<f64>] {
        (**self).points()
    }

    fn bounds(&self) -> Option<Extent> {
        (**self).bounds()
    }
}

impl<T: PointSource + ?Sized> PointSource for Arc<T> {
    fn points(&self) -> &[Point<f64>] {
        (**self).points()
    }

    fn bounds(&self) -> Option<Extent> {
        (**self).bounds()
    }
}

/// Receiver of the per-sector results, typically the indicator widgets
pub trait IndicatorSink {
    fn update(&mut self, sector: Sector, indicator: Indicator);
}

impl<F: FnMut(Sector, Indicator)> IndicatorSink for F {
    fn update(&mut self, sector: Sector, indicator: Indicator) {
        self(sector, indicator)
    }
}

/// Recompute cycle state
///
/// `Recomputing` only lasts for the duration of a `&mut self` call, so
/// [`SignpostEngine::state`] always reads `Idle` from the outside. The transition is
/// traced at trace level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Recomputing,
}

/// Top-level orchestrator turning viewport changes into per-sector indicators
pub struct SignpostEngine<S> {
    /// Where the points come from
    source: S,
    /// Configuration settings
    config: Config,
    /// Point bounds grown by the margin (None if the dataset is empty)
    dataset_extent: Option<Extent>,
    state: EngineState,
    /// Regions of the last successful recompute
    regions: Option<SectorMap<Region>>,
    /// Indicators of the last successful recompute
    indicators: SectorMap<Indicator>,
    /// Pending viewport changes
    notifier: ViewportNotifier,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<S: PointSource> SignpostEngine<S> {
    /// Create an engine, computing the dataset extent once from the source
    pub fn new(source: S, config: Config) -> Result<Self> {
        config.validate()?;

        let mut engine = Self {
            source,
            config,
            dataset_extent: None,
            state: EngineState::Idle,
            regions: None,
            indicators: SectorMap::default(),
            notifier: ViewportNotifier::new(),
        };
        engine.refresh_dataset_extent();
        Ok(engine)
    }

    /// Recompute the dataset extent from the current points
    ///
    /// The extent is otherwise computed once; points added later outside of it are
    /// not counted until this is called.
    pub fn refresh_dataset_extent(&mut self) -> Option<Extent> {
        self.dataset_extent = self
            .source
            .bounds()
            .map(|bounds| bounds.expand(self.config.margin));

        match self.dataset_extent {
            Some(extent) => tracing::debug!(?extent, "Dataset extent computed"),
            None => tracing::warn!("Point source is empty, every sector will report zero"),
        }
        self.dataset_extent
    }

    /// Rebuild regions and recount for `viewport`, synchronously
    ///
    /// Fails with [`SignpostError::MalformedExtent`] when the viewport (or the dataset
    /// extent) has inverted or non-finite bounds, and with
    /// [`SignpostError::Superseded`] when a newer viewport was submitted to the
    /// [`ViewportNotifier`] while counting.
    pub fn recompute(&mut self, viewport: Extent) -> Result<SectorMap<Indicator>> {
        let cancel = self.notifier.token();
        self.recompute_with(viewport, &cancel)
    }

    /// Handle the initial load: compute and push indicators for the first viewport
    pub fn initial_load(
        &mut self,
        viewport: Extent,
        sink: &mut impl IndicatorSink,
    ) -> Result<SectorMap<Indicator>> {
        tracing::info!(?viewport, points = self.source.points().len(), "Initial load");
        let indicators = self.recompute(viewport)?;
        Self::emit(&indicators, sink);
        Ok(indicators)
    }

    /// Handle a pan or zoom: recompute for `viewport` and push the indicators
    ///
    /// Goes through the notifier, so viewports submitted concurrently from other
    /// handles are coalesced and only the latest one is pushed.
    pub fn on_viewport_change(
        &mut self,
        viewport: Extent,
        sink: &mut impl IndicatorSink,
    ) -> Result<SectorMap<Indicator>> {
        self.notifier.submit(viewport);
        Ok(self.process_pending(sink)?.unwrap_or(self.indicators))
    }

    /// Process the latest viewport waiting in the notifier, if any
    ///
    /// Intermediate viewports are discarded, and a computation overtaken by a newer
    /// viewport is dropped in favor of it. The sink receives only the final result.
    pub fn process_pending(
        &mut self,
        sink: &mut impl IndicatorSink,
    ) -> Result<Option<SectorMap<Indicator>>> {
        let mut latest = None;

        while let Some((viewport, cancel)) = self.notifier.take() {
            match self.recompute_with(viewport, &cancel) {
                Ok(indicators) => latest = Some(indicators),
                Err(SignpostError::Superseded { generation }) => {
                    tracing::trace!(generation, "Dropping superseded recompute");
                }
                Err(err) => return Err(err),
            }
        }

        if let Some(indicators) = &latest {
            Self::emit(indicators, sink);
        }
        Ok(latest)
    }

    fn recompute_with(
        &mut self,
        viewport: Extent,
        cancel: &CancelToken,
    ) -> Result<SectorMap<Indicator>> {
        #[cfg(feature = "profiling")]
        profiling::scope!("engine::recompute");

        if let Err(err) = viewport.validate() {
            tracing::warn!(%err, "Rejecting viewport");
            return Err(err);
        }

        let Some(dataset) = self.dataset_extent else {
            tracing::debug!("Empty dataset, skipping region build");
            self.regions = None;
            self.indicators = SectorMap::default();
            return Ok(self.indicators);
        };
        dataset.validate()?;

        self.state = EngineState::Recomputing;
        tracing::trace!(state = ?self.state, "Engine state changed");
        let regions = build_regions(dataset, viewport);
        let counted = count_by_sector_with(&regions, self.source.points(), &self.config, cancel);
        self.state = EngineState::Idle;
        tracing::trace!(state = ?self.state, "Engine state changed");

        let counts = counted?;
        tracing::debug!(
            ?viewport,
            off_screen = counts.total(),
            "Recomputed off-screen counts"
        );

        self.indicators = indicators(&counts);
        self.regions = Some(regions);
        Ok(self.indicators)
    }

    fn emit(indicators: &SectorMap<Indicator>, sink: &mut impl IndicatorSink) {
        for (sector, indicator) in indicators.iter() {
            sink.update(sector, *indicator);
        }
    }

    /// Handle for submitting viewport changes, possibly from another thread
    #[inline]
    pub fn notifier(&self) -> ViewportNotifier {
        self.notifier.clone()
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Dataset extent (point bounds plus margin), `None` for an empty dataset
    #[inline]
    pub fn dataset_extent(&self) -> Option<Extent> {
        self.dataset_extent
    }

    /// Regions of the last successful recompute
    #[inline]
    pub fn regions(&self) -> Option<&SectorMap<Region>> {
        self.regions.as_ref()
    }

    /// Indicators of the last successful recompute (all zero before the first one)
    #[inline]
    pub fn indicators(&self) -> &SectorMap<Indicator> {
        &self.indicators
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source; call [`Self::refresh_dataset_extent`] afterwards
    /// if points may now lie outside the dataset extent
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
