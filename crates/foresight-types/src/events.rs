//! Event records and the append-only event log.
//!
//! Phases report what happened during a simulated month as [`Event`]
//! values. The kernel aggregates them but never interprets them: the
//! category, severity, and description are content-layer vocabulary.
//! The engine stamps each event with the month it was emitted in and
//! appends it to the run's [`EventLog`], which only ever grows.

use serde::{Deserialize, Serialize};

/// The domain a reported event belongs to.
///
/// Categories exist for downstream filtering and reporting; the kernel
/// treats them as opaque labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// AI capability growth, breakthroughs, and deployment shifts.
    AiCapability,
    /// Alignment and control margin changes.
    Alignment,
    /// Economic output, recessions, and inequality shifts.
    Economy,
    /// Warming, severe weather, and other climate developments.
    Climate,
    /// Births, deaths, and demographic milestones.
    Population,
    /// Interstate or internal conflict developments.
    Conflict,
    /// Treaties, regulation, and institutional changes.
    Governance,
    /// Social cohesion, trust, and wellbeing developments.
    Social,
}

/// How consequential an event is, on a coarse four-step scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Routine bookkeeping; useful for traces, ignorable in summaries.
    Info,
    /// Worth a line in a monthly digest.
    Notable,
    /// Changes the trajectory of at least one sub-state.
    Major,
    /// A development that plausibly decides the run's outcome.
    Critical,
}

/// A single event emitted by a phase during one simulated month.
///
/// Events are application-defined records: the kernel aggregates them in
/// emission order but never inspects or repairs their contents. The
/// `month` field is stamped by the engine when the event is appended to
/// the run log; phases may leave it at its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The simulated month the event occurred in (0-indexed, stamped by
    /// the engine).
    pub month: u64,

    /// The domain the event belongs to.
    pub category: EventCategory,

    /// How consequential the event is.
    pub severity: Severity,

    /// Human-readable description of what happened.
    pub description: String,

    /// Optional magnitude in category-specific units (e.g. output change
    /// in trillions, capability delta). `None` when no single number
    /// summarises the event.
    pub impact: Option<f64>,
}

impl Event {
    /// Create an event with no impact figure. The month is stamped later
    /// by the engine.
    pub fn new(category: EventCategory, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            month: 0,
            category,
            severity,
            description: description.into(),
            impact: None,
        }
    }

    /// Attach an impact magnitude to the event.
    #[must_use]
    pub const fn with_impact(mut self, impact: f64) -> Self {
        self.impact = Some(impact);
        self
    }
}

/// The append-only log of every event emitted during a run.
///
/// The log preserves emission order: within a month, events appear in
/// phase execution order, and each phase's events appear in the order
/// the phase produced them. The log only grows; nothing is ever removed
/// or reordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append a single event to the log.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Append a batch of events, preserving their order.
    pub fn extend(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
    }

    /// All events in emission order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events in the log.
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log contains no events.
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate over the events stamped with the given month, in emission
    /// order.
    pub fn events_for_month(&self, month: u64) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.month == month)
    }

    /// Count the events in the given category across the whole run.
    pub fn count_in_category(&self, category: EventCategory) -> usize {
        self.events.iter().filter(|e| e.category == category).count()
    }

    /// The most recently appended event, if any.
    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_event(description: &str) -> Event {
        Event::new(EventCategory::Economy, Severity::Notable, description)
    }

    #[test]
    fn log_preserves_emission_order() {
        let mut log = EventLog::new();
        log.push(make_event("first"));
        log.extend(vec![make_event("second"), make_event("third")]);

        let descriptions: Vec<&str> = log.events().iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["first", "second", "third"]);
    }

    #[test]
    fn events_for_month_filters_by_stamp() {
        let mut log = EventLog::new();
        let mut a = make_event("month zero");
        a.month = 0;
        let mut b = make_event("month three");
        b.month = 3;
        let mut c = make_event("also month three");
        c.month = 3;
        log.extend(vec![a, b, c]);

        let month_three: Vec<&str> = log
            .events_for_month(3)
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(month_three, vec!["month three", "also month three"]);
        assert_eq!(log.events_for_month(7).count(), 0);
    }

    #[test]
    fn count_in_category() {
        let mut log = EventLog::new();
        log.push(make_event("economy"));
        log.push(Event::new(
            EventCategory::Climate,
            Severity::Major,
            "heat wave",
        ));
        assert_eq!(log.count_in_category(EventCategory::Economy), 1);
        assert_eq!(log.count_in_category(EventCategory::Climate), 1);
        assert_eq!(log.count_in_category(EventCategory::Conflict), 0);
    }

    #[test]
    fn impact_is_optional() {
        let bare = make_event("no figure");
        assert_eq!(bare.impact, None);

        let with = make_event("with figure").with_impact(-2.5);
        assert_eq!(with.impact, Some(-2.5));
    }

    #[test]
    fn event_serializes_to_json() {
        let event = make_event("serialized").with_impact(1.0);
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
