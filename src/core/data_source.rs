use std::cell::OnceCell;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::types::{DataBounds, Sample};

/// Change notification emitted by a data source to its single subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSetEvent {
    /// Data changed; dependent geometry must be recomputed.
    Changed,
    /// Data is no longer valid; dependent geometry must be cleared.
    Invalidated,
}

/// Ordered sequence of samples consumed by the scale and geometry pipeline.
///
/// `x(i)` defaults to the sample position, which keeps x non-decreasing.
pub trait DataSource {
    type Item;

    fn count(&self) -> usize;

    /// Underlying data item reported to scrub listeners.
    fn item(&self, index: usize) -> Option<&Self::Item>;

    fn x(&self, index: usize) -> f64 {
        index as f64
    }

    fn y(&self, index: usize) -> f64;

    /// Optional horizontal reference ("base") line in raw y units.
    fn reference_line(&self) -> Option<f64> {
        None
    }

    /// Bounding box of the data, widened to include the reference line.
    fn bounds(&self) -> DataBounds {
        DataBounds::from_points(
            (0..self.count()).map(|index| (self.x(index), self.y(index))),
            self.reference_line(),
        )
    }

    /// Registers the single change subscriber, replacing any previous one.
    fn subscribe(&mut self) -> Receiver<DataSetEvent>;
}

/// Single-subscriber notification channel embedded in data sources.
#[derive(Debug, Default)]
pub struct DataSetNotifier {
    sender: Option<Sender<DataSetEvent>>,
}

impl DataSetNotifier {
    pub fn subscribe(&mut self) -> Receiver<DataSetEvent> {
        let (sender, receiver) = mpsc::channel();
        self.sender = Some(sender);
        receiver
    }

    pub fn notify(&mut self, event: DataSetEvent) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(event).is_err() {
            trace!(?event, "data set subscriber dropped");
            self.sender = None;
        }
    }

    #[must_use]
    pub fn has_subscriber(&self) -> bool {
        self.sender.is_some()
    }
}

/// Vector-backed data source with cached bounds.
pub struct SeriesData<T> {
    items: Vec<T>,
    y_of: fn(&T) -> f64,
    x_of: Option<fn(&T) -> f64>,
    reference_line: Option<f64>,
    bounds: OnceCell<DataBounds>,
    notifier: DataSetNotifier,
}

impl<T> SeriesData<T> {
    /// Series whose x values are the item positions.
    #[must_use]
    pub fn new(items: Vec<T>, y_of: fn(&T) -> f64) -> Self {
        Self {
            items,
            y_of,
            x_of: None,
            reference_line: None,
            bounds: OnceCell::new(),
            notifier: DataSetNotifier::default(),
        }
    }

    /// Series with an explicit x extractor. Extracted x values must be
    /// non-decreasing.
    #[must_use]
    pub fn with_x(mut self, x_of: fn(&T) -> f64) -> Self {
        self.x_of = Some(x_of);
        self.bounds = OnceCell::new();
        self
    }

    #[must_use]
    pub fn with_reference_line(mut self, value: Option<f64>) -> Self {
        self.reference_line = value;
        self.bounds = OnceCell::new();
        self
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        debug!(
            previous_count = self.items.len(),
            count = items.len(),
            "set series items"
        );
        self.items = items;
        self.notify_data_set_changed();
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        trace!(count = self.items.len(), "append series item");
        self.notify_data_set_changed();
    }

    pub fn set_reference_line(&mut self, value: Option<f64>) {
        self.reference_line = value;
        self.notify_data_set_changed();
    }

    /// Drops cached bounds and tells the subscriber to recompute.
    pub fn notify_data_set_changed(&mut self) {
        self.bounds = OnceCell::new();
        self.notifier.notify(DataSetEvent::Changed);
    }

    /// Drops cached bounds and tells the subscriber to clear its geometry.
    pub fn notify_data_set_invalidated(&mut self) {
        self.bounds = OnceCell::new();
        self.notifier.notify(DataSetEvent::Invalidated);
    }

    #[must_use]
    pub fn has_subscriber(&self) -> bool {
        self.notifier.has_subscriber()
    }
}

impl SeriesData<f64> {
    #[must_use]
    pub fn from_values(values: Vec<f64>) -> Self {
        Self::new(values, |value| *value)
    }
}

impl SeriesData<Sample> {
    #[must_use]
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self::new(samples, |sample| sample.y).with_x(|sample| sample.x)
    }
}

impl<T> DataSource for SeriesData<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.items.len()
    }

    fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    fn x(&self, index: usize) -> f64 {
        match (self.x_of, self.items.get(index)) {
            (Some(x_of), Some(item)) => x_of(item),
            _ => index as f64,
        }
    }

    fn y(&self, index: usize) -> f64 {
        self.items.get(index).map_or(f64::NAN, self.y_of)
    }

    fn reference_line(&self) -> Option<f64> {
        self.reference_line
    }

    fn bounds(&self) -> DataBounds {
        *self.bounds.get_or_init(|| {
            DataBounds::from_points(
                (0..self.items.len()).map(|index| (self.x(index), self.y(index))),
                self.reference_line,
            )
        })
    }

    fn subscribe(&mut self) -> Receiver<DataSetEvent> {
        self.notifier.subscribe()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SeriesData<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesData")
            .field("items", &self.items)
            .field("reference_line", &self.reference_line)
            .field("bounds", &self.bounds.get())
            .field("subscribed", &self.notifier.has_subscriber())
            .finish()
    }
}
