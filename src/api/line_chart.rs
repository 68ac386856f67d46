use std::sync::mpsc::Receiver;

use tracing::{debug, trace, warn};

use crate::core::{
    AxisMapping, ChartGeometry, DataSetEvent, DataSource, DecimalValueFormatter, DrawingArea,
    EstimatedTextMeasurer, TextMeasurer, ValueFormatter,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    LongPressTimer, PointerEvent, ScrubEvent, ScrubGestureDetector, TouchResponse,
};
use crate::render::Renderer;

use super::recompute::recompute;
use super::render_frame_builder::build_render_frame;
use super::scrub_controller::ScrubController;
use super::validation::validate_chart_config;
use super::{ChartConfig, ConfigChange, ScrubCursor, ScrubListener};

/// Line chart facade consumed by host applications.
///
/// `LineChart` owns its data source and renderer, keeps the current geometry
/// in sync with data, size and configuration, and turns pointer input into
/// scrub notifications.
pub struct LineChart<S: DataSource, R: Renderer> {
    source: S,
    renderer: R,
    data_events: Receiver<DataSetEvent>,
    config: ChartConfig,
    area: DrawingArea,
    geometry: ChartGeometry,
    gestures: ScrubGestureDetector,
    scrub: ScrubController,
    formatter: Box<dyn ValueFormatter>,
    measurer: Box<dyn TextMeasurer>,
    listener: Option<Box<dyn ScrubListener<S::Item>>>,
}

impl<S: DataSource, R: Renderer> LineChart<S, R> {
    /// Creates an unsized chart. Geometry is built on the first sized
    /// [`LineChart::resize`].
    pub fn new(mut source: S, renderer: R, config: ChartConfig) -> ChartResult<Self> {
        let config = validate_chart_config(config)?;
        let data_events = source.subscribe();
        let mut gestures = ScrubGestureDetector::new(config.gesture_config());
        let _ = gestures.set_enabled(config.scrub_enabled);

        Ok(Self {
            source,
            renderer,
            data_events,
            config,
            area: DrawingArea::new(0.0, 0.0, 0.0, 0.0),
            geometry: ChartGeometry::empty(),
            gestures,
            scrub: ScrubController::default(),
            formatter: Box::new(DecimalValueFormatter::default()),
            measurer: Box::new(EstimatedTextMeasurer),
            listener: None,
        })
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the data source. Changes take effect on the next
    /// [`LineChart::process_data_events`].
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn config(&self) -> ChartConfig {
        self.config
    }

    #[must_use]
    pub fn area(&self) -> DrawingArea {
        self.area
    }

    #[must_use]
    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn axis_mapping(&self) -> Option<AxisMapping> {
        self.geometry.mapping
    }

    #[must_use]
    pub fn scaled_x_points(&self) -> Vec<f64> {
        self.geometry.scaled_x.clone()
    }

    #[must_use]
    pub fn scaled_y_points(&self) -> Vec<f64> {
        self.geometry.scaled_y.clone()
    }

    #[must_use]
    pub fn scrub_cursor(&self) -> Option<ScrubCursor> {
        self.scrub.cursor()
    }

    #[must_use]
    pub fn labels_dimmed(&self) -> bool {
        self.scrub.labels_dimmed()
    }

    #[must_use]
    pub fn pending_long_press(&self) -> Option<LongPressTimer> {
        self.gestures.pending_long_press()
    }

    /// Applies a new drawing area. A zero-sized area clears the geometry
    /// until the host lays the chart out.
    pub fn resize(&mut self, area: DrawingArea) -> ChartResult<()> {
        if !area.is_unsized() && !area.is_valid() {
            return Err(ChartError::InvalidDrawingArea {
                width: area.width(),
                height: area.height(),
            });
        }
        if area == self.area {
            return Ok(());
        }
        debug!(width = area.width(), height = area.height(), "resize line chart");
        self.area = area;
        self.recompute()
    }

    /// Replaces the configuration and reports what the change required.
    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<ConfigChange> {
        let config = validate_chart_config(config)?;
        let change = self.config.diff(&config);
        let previous = std::mem::replace(&mut self.config, config);

        if previous.gesture_config() != config.gesture_config() {
            self.gestures = ScrubGestureDetector::new(config.gesture_config());
            self.cancel_scrub();
        }
        if let Some(ScrubEvent::End) = self.gestures.set_enabled(config.scrub_enabled) {
            self.cancel_scrub();
        }

        debug!(?change, "set line chart config");
        if change == ConfigChange::Recompute {
            self.recompute()?;
        }
        Ok(change)
    }

    pub fn set_value_formatter<F>(&mut self, formatter: F) -> ChartResult<()>
    where
        F: ValueFormatter + 'static,
    {
        self.formatter = Box::new(formatter);
        self.recompute()
    }

    pub fn set_text_measurer<M>(&mut self, measurer: M) -> ChartResult<()>
    where
        M: TextMeasurer + 'static,
    {
        self.measurer = Box::new(measurer);
        self.recompute()
    }

    pub fn set_scrub_listener<L>(&mut self, listener: L)
    where
        L: ScrubListener<S::Item> + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_scrub_listener(&mut self) {
        self.listener = None;
    }

    /// Rebuilds the geometry from the current data, area and configuration.
    ///
    /// On failure the geometry is cleared and the error returned.
    pub fn recompute(&mut self) -> ChartResult<()> {
        match recompute(
            &self.config,
            &self.source,
            self.area,
            self.formatter.as_ref(),
            self.measurer.as_ref(),
        ) {
            Ok(geometry) => {
                debug!(
                    count = self.source.count(),
                    points = geometry.len(),
                    empty = geometry.is_empty(),
                    "recomputed line chart geometry"
                );
                self.geometry = geometry;
                self.resnap_cursor();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "line chart recompute skipped");
                self.clear_geometry();
                Err(err)
            }
        }
    }

    /// Drains pending data-set notifications. The latest notification wins:
    /// `Changed` recomputes, `Invalidated` clears the geometry.
    ///
    /// Returns the number of notifications drained.
    pub fn process_data_events(&mut self) -> ChartResult<usize> {
        let mut drained = 0_usize;
        let mut last = None;
        for event in self.data_events.try_iter() {
            drained += 1;
            last = Some(event);
        }
        if drained > 0 {
            debug!(drained, ?last, "process data set events");
        }
        match last {
            Some(DataSetEvent::Changed) => self.recompute()?,
            Some(DataSetEvent::Invalidated) => self.clear_geometry(),
            None => {}
        }
        Ok(drained)
    }

    /// Feeds one pointer event to the scrub gesture detector.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> TouchResponse {
        let outcome = self.gestures.handle(event);
        if let Some(scrub) = outcome.scrub {
            self.apply_scrub(scrub);
        }
        outcome.response
    }

    /// Fires the long-press timer `id`. Returns whether a scrub began.
    pub fn fire_long_press(&mut self, id: u64) -> bool {
        match self.gestures.on_long_press_timeout(id) {
            Some(scrub) => {
                self.apply_scrub(scrub);
                true
            }
            None => false,
        }
    }

    /// Fires the pending long-press timer if `now_ms` reached its deadline.
    pub fn poll_long_press(&mut self, now_ms: u64) -> bool {
        match self.gestures.poll(now_ms) {
            Some(scrub) => {
                self.apply_scrub(scrub);
                true
            }
            None => false,
        }
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = build_render_frame(
            self.area,
            &self.geometry,
            &self.config.style,
            self.config.label_layout.text_size_px,
            self.scrub.cursor(),
            self.scrub.labels_dimmed(),
        );
        self.renderer.render(&frame)
    }

    fn apply_scrub(&mut self, scrub: ScrubEvent) {
        match scrub {
            ScrubEvent::Begin { x, .. } | ScrubEvent::Move { x, .. } => self.scrub_to(x),
            ScrubEvent::End => self.end_scrub(),
        }
    }

    fn scrub_to(&mut self, x: f64) {
        if self.source.count() == 0 || self.geometry.is_empty() {
            return;
        }
        let Some(cursor) = self.scrub.scrub_to(
            x,
            &self.geometry,
            self.area,
            self.config.style.scrub_line_width,
        ) else {
            return;
        };
        trace!(x, index = cursor.index, "scrub");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_scrubbed(self.source.item(cursor.index));
        }
    }

    fn end_scrub(&mut self) {
        self.scrub.end();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_scrubbed(None);
        }
    }

    /// Ends an active scrub without a gesture release.
    fn cancel_scrub(&mut self) {
        if self.scrub.end() {
            if let Some(listener) = self.listener.as_mut() {
                listener.on_scrubbed(None);
            }
        }
    }

    /// Keeps an active cursor on the sample nearest its column after the
    /// geometry changed. The listener hears about a new index, or `None`
    /// when no sample is left to snap to.
    fn resnap_cursor(&mut self) {
        let Some(previous) = self.scrub.cursor() else {
            return;
        };
        if self.source.count() == 0 || self.geometry.is_empty() {
            self.cancel_scrub();
            return;
        }
        let Some(cursor) = self.scrub.scrub_to(
            previous.x,
            &self.geometry,
            self.area,
            self.config.style.scrub_line_width,
        ) else {
            self.cancel_scrub();
            return;
        };
        if cursor.index != previous.index {
            trace!(from = previous.index, to = cursor.index, "scrub cursor resnapped");
            if let Some(listener) = self.listener.as_mut() {
                listener.on_scrubbed(self.source.item(cursor.index));
            }
        }
    }

    fn clear_geometry(&mut self) {
        self.geometry = ChartGeometry::empty();
        self.cancel_scrub();
    }
}
