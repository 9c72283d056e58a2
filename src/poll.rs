//! The single event loop that drives every source.
//!
//! All shared state (the [`SourceRegistry`] and every [`ConsumerView`]) is
//! owned by one [`Hub`] and mutated only from one task.  Network fetches and
//! timers run as separate tasks that post [`LoopEvent`]s back over a
//! channel, so a slow feed never blocks other sources or new registrations.
//!
//! ```text
//!  register() ─┐
//!  fetch task ─┼─ LoopEvent ─► Hub ─ ConsumerEvent ─► display
//!  timer task ─┘   (channel)          (channel)
//! ```
//!
//! ## For contributors
//!
//! [`Hub::handle`] is synchronous and takes the [`Scheduler`] as a
//! parameter, so the whole registration → fetch → aggregate flow can be
//! tested without a runtime.  Only [`spawn`] and [`TokioScheduler`] touch
//! tokio.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;
use tracing::{debug, error, info};

use crate::aggregate::ConsumerView;
use crate::config::ConsumerConfig;
use crate::error::{FeedError, TransportError};
use crate::fetcher::{Scheduler, TimerId};
use crate::item::Item;
use crate::registry::SourceRegistry;
use crate::source::{FetchRequest, RecordParser, Transport};

/// Everything the loop reacts to.
#[derive(Debug)]
pub enum LoopEvent {
    /// A consumer registers its source configuration.
    Register(ConsumerConfig),
    /// A spawned fetch finished.
    FetchCompleted {
        source: String,
        outcome: Result<Vec<u8>, TransportError>,
    },
    /// A reschedule timer expired.
    TimerFired { source: String, timer: TimerId },
    /// A fetcher broadcast its known items.
    ItemsAvailable { source: String },
    /// A fetcher's cycle failed.
    FetchFailed { source: String, error: FeedError },
}

/// Messages for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumerEvent {
    /// The consumer's full visible list after an aggregation pass.
    ItemsUpdated { consumer: String, items: Vec<Item> },
    /// Items the consumer has not been shown before.
    UpdateDelta { consumer: String, items: Vec<Item> },
    /// A registration or fetch for one of the consumer's sources failed.
    Error {
        consumer: String,
        error_type: &'static str,
        error: FeedError,
    },
}

/// Owner of the registry and all consumer views.
pub struct Hub {
    registry: SourceRegistry,
    consumers: Vec<ConsumerView>,
    parser: Box<dyn RecordParser>,
    updates: UnboundedSender<ConsumerEvent>,
}

impl Hub {
    /// Create a hub whose fetchers report back over `loop_tx`.
    pub fn new(
        loop_tx: UnboundedSender<LoopEvent>,
        updates: UnboundedSender<ConsumerEvent>,
        parser: Box<dyn RecordParser>,
    ) -> Self {
        let registry = SourceRegistry::new(move |fetcher| {
            let tx = loop_tx.clone();
            fetcher.on_items_available(move |source, _| {
                let _ = tx.send(LoopEvent::ItemsAvailable {
                    source: source.to_string(),
                });
            });
            let tx = loop_tx.clone();
            fetcher.on_fetch_error(move |source, error| {
                let _ = tx.send(LoopEvent::FetchFailed {
                    source: source.to_string(),
                    error: error.clone(),
                });
            });
        });

        Self {
            registry,
            consumers: Vec::new(),
            parser,
            updates,
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn consumers(&self) -> &[ConsumerView] {
        &self.consumers
    }

    /// Whether the presentation side has gone away.
    pub fn is_closed(&self) -> bool {
        self.updates.is_closed()
    }

    /// Apply one event.  Returns a fetch the caller must dispatch, if any.
    pub fn handle(
        &mut self,
        event: LoopEvent,
        scheduler: &mut dyn Scheduler,
        now: DateTime<Utc>,
    ) -> Option<(String, FetchRequest)> {
        match event {
            LoopEvent::Register(config) => self.register(config, scheduler),
            LoopEvent::FetchCompleted { source, outcome } => {
                match self.registry.get_mut(&source) {
                    Some(fetcher) => fetcher.complete_fetch(outcome, self.parser.as_ref(), scheduler),
                    None => debug!(source = %source, "fetch result for unknown source"),
                }
                None
            }
            LoopEvent::TimerFired { source, timer } => {
                let request = self.registry.get_mut(&source)?.timer_fired(timer, scheduler)?;
                Some((source, request))
            }
            LoopEvent::ItemsAvailable { source } => {
                self.publish(&source, now);
                None
            }
            LoopEvent::FetchFailed { source, error } => {
                for view in self.consumers.iter().filter(|v| v.watches(&source)) {
                    self.emit(ConsumerEvent::Error {
                        consumer: view.name().to_string(),
                        error_type: error.error_type(),
                        error: error.clone(),
                    });
                }
                None
            }
        }
    }

    fn register(
        &mut self,
        config: ConsumerConfig,
        scheduler: &mut dyn Scheduler,
    ) -> Option<(String, FetchRequest)> {
        let name = config
            .name
            .clone()
            .unwrap_or_else(|| format!("consumer-{}", self.consumers.len() + 1));

        match self.registry.get_or_create(config.source_request(), scheduler) {
            Ok(registration) => {
                let mut view = ConsumerView::new(name, config.filter_policy());
                view.watch(registration.source_id.clone());
                self.consumers.push(view);
                registration.request.map(|r| (registration.source_id, r))
            }
            Err(error) => {
                error!(consumer = %name, error = %error, "registration failed");
                self.emit(ConsumerEvent::Error {
                    consumer: name,
                    error_type: error.error_type(),
                    error,
                });
                None
            }
        }
    }

    /// Re-aggregate every consumer watching `source`.
    fn publish(&mut self, source: &str, now: DateTime<Utc>) {
        for view in self.consumers.iter_mut().filter(|v| v.watches(source)) {
            let batches = self.registry.batches(view.sources());
            let pass = view.aggregate(batches, now);
            let notify = pass.should_notify(view.policy());

            info!(
                consumer = %view.name(),
                visible = pass.visible.len(),
                new = pass.delta.len(),
                "aggregated"
            );
            let _ = self.updates.send(ConsumerEvent::ItemsUpdated {
                consumer: view.name().to_string(),
                items: pass.visible,
            });
            if notify {
                let _ = self.updates.send(ConsumerEvent::UpdateDelta {
                    consumer: view.name().to_string(),
                    items: pass.delta,
                });
            }
        }
    }

    fn emit(&self, event: ConsumerEvent) {
        let _ = self.updates.send(event);
    }
}

/// [`Scheduler`] backed by tokio sleep tasks.
///
/// Each armed timer is a task that posts [`LoopEvent::TimerFired`] on expiry.
pub struct TokioScheduler {
    loop_tx: UnboundedSender<LoopEvent>,
    next_id: u64,
    tasks: HashMap<TimerId, AbortHandle>,
}

impl TokioScheduler {
    pub fn new(loop_tx: UnboundedSender<LoopEvent>) -> Self {
        Self {
            loop_tx,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Drop bookkeeping for a timer that has already fired.
    pub fn forget(&mut self, timer: TimerId) {
        self.tasks.remove(&timer);
    }

    /// Number of timers currently armed.
    pub fn armed(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn arm(&mut self, source: &str, delay: Duration) -> TimerId {
        self.next_id += 1;
        let timer = TimerId(self.next_id);
        let tx = self.loop_tx.clone();
        let source = source.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(LoopEvent::TimerFired { source, timer });
        });
        self.tasks.insert(timer, handle.abort_handle());
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        if let Some(handle) = self.tasks.remove(&timer) {
            handle.abort();
        }
    }
}

/// Handle for registering consumers with a running loop.
#[derive(Debug, Clone)]
pub struct HubHandle {
    tx: UnboundedSender<LoopEvent>,
}

impl HubHandle {
    /// Register a consumer.  Returns `false` if the loop has stopped.
    pub fn register(&self, config: ConsumerConfig) -> bool {
        self.tx.send(LoopEvent::Register(config)).is_ok()
    }
}

/// Spawn the event loop on the current runtime.
///
/// Returns a handle for registrations and the receiver the presentation
/// layer should drain.  The loop runs until that receiver is dropped.
pub fn spawn<T: Transport>(
    transport: T,
    parser: Box<dyn RecordParser>,
) -> (HubHandle, UnboundedReceiver<ConsumerEvent>) {
    let (loop_tx, loop_rx) = mpsc::unbounded_channel();
    let (updates_tx, updates_rx) = mpsc::unbounded_channel();

    let hub = Hub::new(loop_tx.clone(), updates_tx, parser);
    let scheduler = TokioScheduler::new(loop_tx.clone());
    tokio::spawn(run(hub, scheduler, Arc::new(transport), loop_tx.clone(), loop_rx));

    (HubHandle { tx: loop_tx }, updates_rx)
}

async fn run<T: Transport>(
    mut hub: Hub,
    mut scheduler: TokioScheduler,
    transport: Arc<T>,
    loop_tx: UnboundedSender<LoopEvent>,
    mut loop_rx: UnboundedReceiver<LoopEvent>,
) {
    while let Some(event) = loop_rx.recv().await {
        if let LoopEvent::TimerFired { timer, .. } = &event {
            scheduler.forget(*timer);
        }
        if let Some((source, request)) = hub.handle(event, &mut scheduler, Utc::now()) {
            dispatch(Arc::clone(&transport), loop_tx.clone(), source, request);
        }
        if hub.is_closed() {
            info!("consumer channel closed, stopping");
            break;
        }
    }
}

fn dispatch<T: Transport>(
    transport: Arc<T>,
    loop_tx: UnboundedSender<LoopEvent>,
    source: String,
    request: FetchRequest,
) {
    tokio::spawn(async move {
        let outcome = transport.fetch(request).await;
        let _ = loop_tx.send(LoopEvent::FetchCompleted { source, outcome });
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
