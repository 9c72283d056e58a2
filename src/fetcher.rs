//! Per-source fetch/parse/reschedule state machine.
//!
//! A [`SourceFetcher`] never performs I/O itself.  [`start_fetch`] hands back
//! the [`FetchRequest`] for the event loop to perform, and the loop feeds
//! the outcome back through [`complete_fetch`].  Timers go through the
//! [`Scheduler`] seam so tests can drive them with a fake clock.
//!
//! ```text
//!  Idle ──start_fetch──► Fetching ──ok──► Parsing ──► Settled ─┐
//!                           │                 │                 ├─► Scheduled ──timer──► Fetching
//!                           └────err──────────┴──► Failed ──────┘
//! ```
//!
//! [`start_fetch`]: SourceFetcher::start_fetch
//! [`complete_fetch`]: SourceFetcher::complete_fetch

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::error::{FeedError, TransportError};
use crate::item::{self, newest_first, Item, Rejection};
use crate::source::{decode_body, FetchRequest, RecordParser};

/// Shortest reload interval any source may use.
pub const MIN_RELOAD_INTERVAL: Duration = Duration::from_secs(1);

/// Identifies one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// One-shot timers keyed to a source.
///
/// When an armed timer expires the scheduler must report it back to the
/// owning fetcher via [`SourceFetcher::timer_fired`].
pub trait Scheduler {
    fn arm(&mut self, source: &str, delay: Duration) -> TimerId;
    fn cancel(&mut self, timer: TimerId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching,
    Parsing,
    Settled,
    Failed,
    Scheduled,
}

/// Construction parameters for a [`SourceFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub url: String,
    pub reload_interval: Duration,
    pub encoding: String,
    pub log_rejections: bool,
    pub artwork_size: u32,
}

type ItemsObserver = Box<dyn FnMut(&str, &[Item]) + Send>;
type ErrorObserver = Box<dyn FnMut(&str, &FeedError) + Send>;

/// Owns the fetch cycle and the known-item list of one source.
pub struct SourceFetcher {
    settings: SourceSettings,
    state: FetchState,
    timer: Option<TimerId>,
    /// Latest successful batch, de-duplicated and newest-first.
    items: Vec<Item>,
    items_observers: Vec<ItemsObserver>,
    error_observers: Vec<ErrorObserver>,
}

impl fmt::Debug for SourceFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFetcher")
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("timer", &self.timer)
            .field("items", &self.items.len())
            .finish_non_exhaustive()
    }
}

impl SourceFetcher {
    pub fn new(mut settings: SourceSettings) -> Self {
        settings.reload_interval = settings.reload_interval.max(MIN_RELOAD_INTERVAL);
        Self {
            settings,
            state: FetchState::Idle,
            timer: None,
            items: Vec::new(),
            items_observers: Vec::new(),
            error_observers: Vec::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.settings.url
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn reload_interval(&self) -> Duration {
        self.settings.reload_interval
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Register a callback for every non-empty broadcast of the known items.
    pub fn on_items_available(&mut self, observer: impl FnMut(&str, &[Item]) + Send + 'static) {
        self.items_observers.push(Box::new(observer));
    }

    /// Register a callback for every failed cycle.
    pub fn on_fetch_error(&mut self, observer: impl FnMut(&str, &FeedError) + Send + 'static) {
        self.error_observers.push(Box::new(observer));
    }

    /// Shorten the reload interval.  Longer requests are ignored.
    ///
    /// Returns whether the interval changed.  A timer already pending is
    /// re-armed at the new interval; an in-flight cycle picks it up when it
    /// reschedules.
    pub fn set_reload_interval(
        &mut self,
        interval: Duration,
        scheduler: &mut dyn Scheduler,
    ) -> bool {
        let interval = interval.max(MIN_RELOAD_INTERVAL);
        if interval < self.settings.reload_interval {
            info!(
                source = %self.settings.url,
                from_ms = self.settings.reload_interval.as_millis() as u64,
                to_ms = interval.as_millis() as u64,
                "shortening reload interval"
            );
            self.settings.reload_interval = interval;
            if self.state == FetchState::Scheduled && self.timer.is_some() {
                self.schedule(scheduler);
            }
            true
        } else {
            false
        }
    }

    /// Begin a fetch cycle.
    ///
    /// Any pending reschedule timer is cancelled first.  Returns `None`
    /// without side effects if a cycle is already in flight.
    pub fn start_fetch(&mut self, scheduler: &mut dyn Scheduler) -> Option<FetchRequest> {
        if self.state == FetchState::Fetching {
            debug!(source = %self.settings.url, "fetch already in flight");
            return None;
        }
        self.clear_timer(scheduler);
        self.transition(FetchState::Fetching);
        Some(FetchRequest::new(self.settings.url.clone()))
    }

    /// Feed the transport's outcome back into the cycle.
    ///
    /// Always ends in [`FetchState::Scheduled`] with exactly one timer armed.
    pub fn complete_fetch(
        &mut self,
        outcome: Result<Vec<u8>, TransportError>,
        parser: &dyn RecordParser,
        scheduler: &mut dyn Scheduler,
    ) {
        if self.state != FetchState::Fetching {
            warn!(source = %self.settings.url, state = ?self.state, "ignoring stray fetch result");
            return;
        }

        match outcome
            .map_err(FeedError::from)
            .and_then(|body| self.parse(&body, parser))
        {
            Ok(batch) => self.settle(batch),
            Err(err) => self.fail(err),
        }
        self.schedule(scheduler);
    }

    /// Handle expiry of a timer armed by this fetcher.
    ///
    /// Stale timers are ignored; the current one starts a new cycle.
    pub fn timer_fired(
        &mut self,
        timer: TimerId,
        scheduler: &mut dyn Scheduler,
    ) -> Option<FetchRequest> {
        if self.timer != Some(timer) {
            debug!(source = %self.settings.url, ?timer, "ignoring stale timer");
            return None;
        }
        self.timer = None;
        self.start_fetch(scheduler)
    }

    /// Notify items observers with the current known items.
    ///
    /// Does nothing if no items are known yet.
    pub fn broadcast_current_items(&mut self) {
        if self.items.is_empty() {
            info!(source = %self.settings.url, "No items to broadcast yet.");
            return;
        }
        info!(source = %self.settings.url, count = self.items.len(), "broadcasting items");
        for observer in &mut self.items_observers {
            observer(&self.settings.url, &self.items);
        }
    }

    fn parse(&mut self, body: &[u8], parser: &dyn RecordParser) -> Result<Vec<Item>, FeedError> {
        self.transition(FetchState::Parsing);
        let text = decode_body(body, &self.settings.encoding);
        let records = parser.parse(&text)?;

        let mut batch = Vec::with_capacity(records.len());
        let mut rejected = 0usize;
        for record in &records {
            match item::normalize(record, self.settings.artwork_size) {
                Ok(item) => batch.push(item),
                Err(reason) => {
                    rejected += 1;
                    self.log_rejection(record, reason);
                }
            }
        }
        if rejected > 0 && self.settings.log_rejections {
            warn!(source = %self.settings.url, rejected, "records rejected");
        }
        Ok(batch)
    }

    fn log_rejection(&self, record: &crate::source::RawRecord, reason: Rejection) {
        if self.settings.log_rejections {
            warn!(
                source = %self.settings.url,
                %reason,
                title = ?record.title,
                pub_date = ?record.pub_date,
                "Can't parse feed item"
            );
        }
    }

    fn settle(&mut self, batch: Vec<Item>) {
        let mut seen = HashSet::with_capacity(batch.len());
        let mut items: Vec<Item> = batch
            .into_iter()
            .filter(|item| seen.insert(item.clone()))
            .collect();
        items.sort_by(newest_first);

        self.items = items;
        self.transition(FetchState::Settled);
        self.broadcast_current_items();
    }

    fn fail(&mut self, err: FeedError) {
        self.transition(FetchState::Failed);
        error!(source = %self.settings.url, error = %err, "could not fetch feed");
        for observer in &mut self.error_observers {
            observer(&self.settings.url, &err);
        }
    }

    fn schedule(&mut self, scheduler: &mut dyn Scheduler) {
        self.clear_timer(scheduler);
        self.timer = Some(scheduler.arm(&self.settings.url, self.settings.reload_interval));
        self.transition(FetchState::Scheduled);
    }

    fn clear_timer(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
    }

    fn transition(&mut self, next: FetchState) {
        debug!(source = %self.settings.url, from = ?self.state, to = ?next, "state transition");
        self.state = next;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Scheduler that records armed timers instead of running them.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FakeScheduler {
    next: u64,
    pub armed: Vec<(TimerId, String, Duration)>,
    pub cancelled: Vec<TimerId>,
}

#[cfg(test)]
impl FakeScheduler {
    /// The only armed timer for `source`, panicking if there is not exactly one.
    pub fn single_timer(&self, source: &str) -> TimerId {
        let timers: Vec<_> = self.armed.iter().filter(|(_, s, _)| s == source).collect();
        assert_eq!(timers.len(), 1, "expected exactly one timer for {source}");
        timers[0].0
    }

    /// Forget the timer as if it had expired.
    pub fn expire(&mut self, timer: TimerId) {
        self.armed.retain(|(id, _, _)| *id != timer);
    }
}

#[cfg(test)]
impl Scheduler for FakeScheduler {
    fn arm(&mut self, source: &str, delay: Duration) -> TimerId {
        self.next += 1;
        let id = TimerId(self.next);
        self.armed.push((id, source.to_string(), delay));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.armed.retain(|(id, _, _)| *id != timer);
        self.cancelled.push(timer);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::source::RssParser;

    const URL: &str = "https://www.musicbutler.io/users/feeds/token/";

    fn settings(reload_ms: u64) -> SourceSettings {
        SourceSettings {
            url: URL.to_string(),
            reload_interval: Duration::from_millis(reload_ms),
            encoding: "UTF-8".to_string(),
            log_rejections: true,
            artwork_size: 300,
        }
    }

    fn feed(entries: &[(&str, &str)]) -> Vec<u8> {
        let items: String = entries
            .iter()
            .map(|(title, date)| {
                format!(
                    r#"<item><title>{title}</title><pubDate>{date}</pubDate><link>https://example.com/{title}</link><enclosure url="https://img.example.com/300x300bb.jpg" length="0" type="image/jpeg"/></item>"#
                )
            })
            .collect();
        format!(r#"<?xml version="1.0"?><rss version="2.0"><channel><title>t</title>{items}</channel></rss>"#)
            .into_bytes()
    }

    /// Collects observer calls so tests can assert on them.
    #[derive(Default, Clone)]
    struct Recorder {
        batches: Arc<Mutex<Vec<Vec<Item>>>>,
        errors: Arc<Mutex<Vec<FeedError>>>,
    }

    impl Recorder {
        fn attach(&self, fetcher: &mut SourceFetcher) {
            let batches = Arc::clone(&self.batches);
            fetcher.on_items_available(move |_, items| batches.lock().unwrap().push(items.to_vec()));
            let errors = Arc::clone(&self.errors);
            fetcher.on_fetch_error(move |_, err| errors.lock().unwrap().push(err.clone()));
        }
    }

    fn fetcher_with_recorder(reload_ms: u64) -> (SourceFetcher, Recorder) {
        let mut fetcher = SourceFetcher::new(settings(reload_ms));
        let recorder = Recorder::default();
        recorder.attach(&mut fetcher);
        (fetcher, recorder)
    }

    fn successful_cycle(fetcher: &mut SourceFetcher, scheduler: &mut FakeScheduler, body: Vec<u8>) {
        fetcher.start_fetch(scheduler).unwrap();
        fetcher.complete_fetch(Ok(body), &RssParser, scheduler);
    }

    #[test]
    fn reload_interval_is_clamped_to_floor() {
        let fetcher = SourceFetcher::new(settings(10));
        assert_eq!(fetcher.reload_interval(), MIN_RELOAD_INTERVAL);
    }

    #[test]
    fn reload_interval_only_shortens() {
        let mut scheduler = FakeScheduler::default();
        let mut fetcher = SourceFetcher::new(settings(30_000));
        assert!(fetcher.set_reload_interval(Duration::from_millis(5_000), &mut scheduler));
        assert!(!fetcher.set_reload_interval(Duration::from_millis(60_000), &mut scheduler));
        assert_eq!(fetcher.reload_interval(), Duration::from_millis(5_000));

        assert!(fetcher.set_reload_interval(Duration::from_millis(1), &mut scheduler));
        assert_eq!(fetcher.reload_interval(), MIN_RELOAD_INTERVAL);
        assert!(scheduler.armed.is_empty(), "idle fetcher arms nothing");
    }

    #[test]
    fn shortening_rearms_pending_timer() {
        let mut scheduler = FakeScheduler::default();
        let mut fetcher = SourceFetcher::new(settings(3_600_000));

        successful_cycle(
            &mut fetcher,
            &mut scheduler,
            feed(&[("A", "Mon, 01 Jan 2024 00:00:00 +0000")]),
        );
        let old = scheduler.single_timer(URL);

        assert!(fetcher.set_reload_interval(Duration::from_millis(5_000), &mut scheduler));

        let new = scheduler.single_timer(URL);
        assert_ne!(old, new);
        assert_eq!(scheduler.cancelled, vec![old]);
        assert_eq!(scheduler.armed[0].2, Duration::from_millis(5_000));
        assert_eq!(fetcher.pending_timer(), Some(new));
        assert_eq!(fetcher.state(), FetchState::Scheduled);

        assert!(!fetcher.set_reload_interval(Duration::from_millis(60_000), &mut scheduler));
        assert_eq!(scheduler.single_timer(URL), new, "longer request leaves timer alone");
    }

    #[test]
    fn shortening_during_fetch_applies_on_reschedule() {
        let mut scheduler = FakeScheduler::default();
        let mut fetcher = SourceFetcher::new(settings(3_600_000));

        fetcher.start_fetch(&mut scheduler).unwrap();
        assert!(fetcher.set_reload_interval(Duration::from_millis(5_000), &mut scheduler));
        assert!(scheduler.armed.is_empty());

        fetcher.complete_fetch(Err(TransportError::Timeout), &RssParser, &mut scheduler);
        scheduler.single_timer(URL);
        assert_eq!(scheduler.armed[0].2, Duration::from_millis(5_000));
    }

    /// Run one cycle with a rejected record and return what was logged.
    fn logs_for_rejecting_cycle(log_rejections: bool) -> String {
        use std::io;
        use tracing_subscriber::fmt::MakeWriter;

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        impl<'a> MakeWriter<'a> for Captured {
            type Writer = Captured;
            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(captured.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut scheduler = FakeScheduler::default();
            let mut fetcher = SourceFetcher::new(SourceSettings {
                log_rejections,
                ..settings(60_000)
            });
            successful_cycle(
                &mut fetcher,
                &mut scheduler,
                feed(&[
                    ("Good", "Mon, 01 Jan 2024 00:00:00 +0000"),
                    ("NoDate", "whenever"),
                ]),
            );
        });

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn rejections_are_silent_unless_verbose() {
        let quiet = logs_for_rejecting_cycle(false);
        assert!(!quiet.contains("records rejected"));
        assert!(!quiet.contains("Can't parse feed item"));

        let verbose = logs_for_rejecting_cycle(true);
        assert!(verbose.contains("records rejected"));
        assert!(verbose.contains("Can't parse feed item"));
    }

    #[test]
    fn start_fetch_returns_request_once() {
        let mut scheduler = FakeScheduler::default();
        let mut fetcher = SourceFetcher::new(settings(60_000));

        let request = fetcher.start_fetch(&mut scheduler).unwrap();
        assert_eq!(request.url, URL);
        assert_eq!(fetcher.state(), FetchState::Fetching);

        assert!(fetcher.start_fetch(&mut scheduler).is_none(), "no overlapping cycles");
    }

    #[test]
    fn successful_cycle_settles_and_schedules() {
        let mut scheduler = FakeScheduler::default();
        let (mut fetcher, recorder) = fetcher_with_recorder(60_000);

        successful_cycle(
            &mut fetcher,
            &mut scheduler,
            feed(&[
                ("Older", "Mon, 01 Jan 2024 00:00:00 +0000"),
                ("Newer", "Tue, 02 Jan 2024 00:00:00 +0000"),
            ]),
        );

        assert_eq!(fetcher.state(), FetchState::Scheduled);
        let titles: Vec<_> = fetcher.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Newer", "Older"], "newest first");

        assert_eq!(recorder.batches.lock().unwrap().len(), 1);
        assert!(recorder.errors.lock().unwrap().is_empty());

        let timer = scheduler.single_timer(URL);
        assert_eq!(fetcher.pending_timer(), Some(timer));
        assert_eq!(scheduler.armed[0].2, Duration::from_millis(60_000));
    }

    #[test]
    fn settle_drops_structural_duplicates() {
        let mut scheduler = FakeScheduler::default();
        let mut fetcher = SourceFetcher::new(settings(60_000));

        successful_cycle(
            &mut fetcher,
            &mut scheduler,
            feed(&[
                ("Same", "Mon, 01 Jan 2024 00:00:00 +0000"),
                ("Same", "Mon, 01 Jan 2024 00:00:00 +0000"),
            ]),
        );

        assert_eq!(fetcher.items().len(), 1);
    }

    #[test]
    fn rejected_records_do_not_abort_batch() {
        let mut scheduler = FakeScheduler::default();
        let mut fetcher = SourceFetcher::new(settings(60_000));

        successful_cycle(
            &mut fetcher,
            &mut scheduler,
            feed(&[
                ("Good", "Mon, 01 Jan 2024 00:00:00 +0000"),
                ("NoDate", "whenever"),
            ]),
        );

        assert_eq!(fetcher.items().len(), 1);
        assert_eq!(fetcher.items()[0].title, "Good");
    }

    #[test]
    fn transport_failure_keeps_items_and_reports_once() {
        let mut scheduler = FakeScheduler::default();
        let (mut fetcher, recorder) = fetcher_with_recorder(60_000);

        successful_cycle(
            &mut fetcher,
            &mut scheduler,
            feed(&[("Kept", "Mon, 01 Jan 2024 00:00:00 +0000")]),
        );
        let before = fetcher.items().to_vec();

        let timer = scheduler.single_timer(URL);
        scheduler.expire(timer);
        fetcher.timer_fired(timer, &mut scheduler).unwrap();
        fetcher.complete_fetch(Err(TransportError::Timeout), &RssParser, &mut scheduler);

        assert_eq!(fetcher.items(), before.as_slice());
        assert_eq!(
            *recorder.errors.lock().unwrap(),
            vec![FeedError::Transport(TransportError::Timeout)]
        );
        assert_eq!(fetcher.state(), FetchState::Scheduled);
        scheduler.single_timer(URL);
    }

    #[test]
    fn parse_failure_keeps_items() {
        let mut scheduler = FakeScheduler::default();
        let (mut fetcher, recorder) = fetcher_with_recorder(60_000);

        successful_cycle(
            &mut fetcher,
            &mut scheduler,
            feed(&[("Kept", "Mon, 01 Jan 2024 00:00:00 +0000")]),
        );
        successful_cycle(&mut fetcher, &mut scheduler, b"<html>oops</html>".to_vec());

        assert_eq!(fetcher.items().len(), 1);
        let errors = recorder.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], FeedError::Parse(_)));
        scheduler.single_timer(URL);
    }

    #[test]
    fn repeated_failures_never_stack_timers() {
        let mut scheduler = FakeScheduler::default();
        let (mut fetcher, recorder) = fetcher_with_recorder(5_000);

        fetcher.start_fetch(&mut scheduler).unwrap();
        for _ in 0..5 {
            fetcher.complete_fetch(
                Err(TransportError::Unreachable("dns".into())),
                &RssParser,
                &mut scheduler,
            );
            let timer = scheduler.single_timer(URL);
            scheduler.expire(timer);
            fetcher.timer_fired(timer, &mut scheduler).unwrap();
        }
        fetcher.complete_fetch(Err(TransportError::Timeout), &RssParser, &mut scheduler);

        assert_eq!(scheduler.armed.len(), 1);
        assert_eq!(recorder.errors.lock().unwrap().len(), 6);
    }

    #[test]
    fn manual_start_cancels_pending_timer() {
        let mut scheduler = FakeScheduler::default();
        let mut fetcher = SourceFetcher::new(settings(60_000));

        successful_cycle(
            &mut fetcher,
            &mut scheduler,
            feed(&[("A", "Mon, 01 Jan 2024 00:00:00 +0000")]),
        );
        let timer = scheduler.single_timer(URL);

        fetcher.start_fetch(&mut scheduler).unwrap();
        assert!(scheduler.armed.is_empty());
        assert_eq!(scheduler.cancelled, vec![timer]);
        assert_eq!(fetcher.pending_timer(), None);
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut scheduler = FakeScheduler::default();
        let mut fetcher = SourceFetcher::new(settings(60_000));

        successful_cycle(
            &mut fetcher,
            &mut scheduler,
            feed(&[("A", "Mon, 01 Jan 2024 00:00:00 +0000")]),
        );
        assert!(fetcher.timer_fired(TimerId(9_999), &mut scheduler).is_none());
        assert_eq!(fetcher.state(), FetchState::Scheduled);
    }

    #[test]
    fn stray_completion_is_ignored() {
        let mut scheduler = FakeScheduler::default();
        let (mut fetcher, recorder) = fetcher_with_recorder(60_000);

        fetcher.complete_fetch(Err(TransportError::Timeout), &RssParser, &mut scheduler);

        assert_eq!(fetcher.state(), FetchState::Idle);
        assert!(recorder.errors.lock().unwrap().is_empty());
        assert!(scheduler.armed.is_empty());
    }

    #[test]
    fn broadcast_with_no_items_is_silent() {
        let (mut fetcher, recorder) = fetcher_with_recorder(60_000);
        fetcher.broadcast_current_items();
        assert!(recorder.batches.lock().unwrap().is_empty());
    }

    #[test]
    fn broadcast_replays_known_items() {
        let mut scheduler = FakeScheduler::default();
        let (mut fetcher, recorder) = fetcher_with_recorder(60_000);

        successful_cycle(
            &mut fetcher,
            &mut scheduler,
            feed(&[("A", "Mon, 01 Jan 2024 00:00:00 +0000")]),
        );
        fetcher.broadcast_current_items();

        let batches = recorder.batches.lock().unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0], batches[1]);
    }
}
