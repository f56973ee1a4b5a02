//! Telemetry events.
//!
//! The engine emits named events with a flat string/number payload map.
//! Delivery is fire-and-forget: sinks must never fail back into the
//! simulation, and no ordering is guaranteed on the far side.

use std::sync::Mutex;

use serde_json::{Map, Value};

/// Events emitted by the game session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// First input arrived; the run timer started.
    SessionStarted,
    /// Player fell to the ground while running; a time penalty was applied.
    /// `time` is the elapsed seconds after the penalty.
    GroundTouchPenalty { time: f64 },
    /// The time limit expired before the goal was reached.
    GameTimeout { time: f64 },
    /// The goal was reached; `time` is the final elapsed seconds.
    RunCompleted { time: f64 },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::SessionStarted => "SessionStarted",
            GameEvent::GroundTouchPenalty { .. } => "GroundTouchPenalty",
            GameEvent::GameTimeout { .. } => "GameTimeout",
            GameEvent::RunCompleted { .. } => "RunCompleted",
        }
    }

    pub fn payload(&self) -> Map<String, Value> {
        let mut map = Map::new();
        match self {
            GameEvent::SessionStarted => {}
            GameEvent::GroundTouchPenalty { time }
            | GameEvent::GameTimeout { time }
            | GameEvent::RunCompleted { time } => {
                map.insert("time".to_string(), (*time).into());
            }
        }
        map
    }
}

/// Destination for telemetry events.
pub trait TelemetrySink: Send + Sync {
    fn track(&self, name: &str, payload: Map<String, Value>);
}

/// Drops every event. Useful for headless runs and benchmarks.
#[derive(Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn track(&self, _name: &str, _payload: Map<String, Value>) {}
}

/// Buffers events in memory; used by tests to assert on emission.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .expect("telemetry buffer poisoned")
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn events(&self) -> Vec<(String, Map<String, Value>)> {
        self.events.lock().expect("telemetry buffer poisoned").clone()
    }
}

impl TelemetrySink for MemorySink {
    fn track(&self, name: &str, payload: Map<String, Value>) {
        self.events
            .lock()
            .expect("telemetry buffer poisoned")
            .push((name.to_string(), payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_payloads_are_flat_number_maps() {
        let event = GameEvent::GroundTouchPenalty { time: 12.5 };
        assert_eq!(event.name(), "GroundTouchPenalty");
        let payload = event.payload();
        assert_eq!(payload.get("time"), Some(&Value::from(12.5)));
    }

    #[test]
    fn memory_sink_buffers_in_order() {
        let sink = MemorySink::new();
        sink.track("A", Map::new());
        sink.track("B", Map::new());
        assert_eq!(sink.names(), vec!["A", "B"]);
    }
}
