//! Event kinds, their payloads, and the envelope stamped on publish.

use chrono::Utc;
use civic_core::types::{new_id, EntityId, Timestamp};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// The routing key of an event.
///
/// Serialized with its wire name, e.g. `"post:published"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "user:created")]
    UserCreated,
    #[serde(rename = "post:published")]
    PostPublished,
    #[serde(rename = "event:created")]
    EventCreated,
    #[serde(rename = "subscriber:added")]
    SubscriberAdded,
    #[serde(rename = "subscriber:removed")]
    SubscriberRemoved,
    #[serde(rename = "city:created")]
    CityCreated,
    #[serde(rename = "user:joined_city")]
    UserJoinedCity,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 7] = [
        EventKind::UserCreated,
        EventKind::PostPublished,
        EventKind::EventCreated,
        EventKind::SubscriberAdded,
        EventKind::SubscriberRemoved,
        EventKind::CityCreated,
        EventKind::UserJoinedCity,
    ];

    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::UserCreated => "user:created",
            EventKind::PostPublished => "post:published",
            EventKind::EventCreated => "event:created",
            EventKind::SubscriberAdded => "subscriber:added",
            EventKind::SubscriberRemoved => "subscriber:removed",
            EventKind::CityCreated => "city:created",
            EventKind::UserJoinedCity => "user:joined_city",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a name outside the known set of kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown event kind '{0}'")]
pub struct UnknownEventKind(pub String);

impl std::str::FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A profile was created after the user's first successful verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreated {
    pub user_id: EntityId,
    pub email: String,
}

/// A blog post transitioned from draft to published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPublished {
    pub post_id: EntityId,
    pub title: String,
    pub city_id: EntityId,
}

/// A community event was created in a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCreated {
    pub event_id: EntityId,
    pub city_id: EntityId,
}

/// An email subscribed to a city's newsletter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberAdded {
    pub email: String,
    pub city_id: EntityId,
}

/// An email unsubscribed from a city's newsletter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberRemoved {
    pub email: String,
    pub city_id: EntityId,
}

/// A new city (tenant) was provisioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCreated {
    pub city_id: EntityId,
    pub slug: String,
}

/// A user became a member of a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserJoinedCity {
    pub user_id: EntityId,
    pub city_id: EntityId,
}

// ---------------------------------------------------------------------------
// DomainEvent
// ---------------------------------------------------------------------------

/// Any event that can travel over the bus.
///
/// Serialized as `{"event": "<wire name>", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum DomainEvent {
    #[serde(rename = "user:created")]
    UserCreated(UserCreated),
    #[serde(rename = "post:published")]
    PostPublished(PostPublished),
    #[serde(rename = "event:created")]
    EventCreated(EventCreated),
    #[serde(rename = "subscriber:added")]
    SubscriberAdded(SubscriberAdded),
    #[serde(rename = "subscriber:removed")]
    SubscriberRemoved(SubscriberRemoved),
    #[serde(rename = "city:created")]
    CityCreated(CityCreated),
    #[serde(rename = "user:joined_city")]
    UserJoinedCity(UserJoinedCity),
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::UserCreated(_) => EventKind::UserCreated,
            DomainEvent::PostPublished(_) => EventKind::PostPublished,
            DomainEvent::EventCreated(_) => EventKind::EventCreated,
            DomainEvent::SubscriberAdded(_) => EventKind::SubscriberAdded,
            DomainEvent::SubscriberRemoved(_) => EventKind::SubscriberRemoved,
            DomainEvent::CityCreated(_) => EventKind::CityCreated,
            DomainEvent::UserJoinedCity(_) => EventKind::UserJoinedCity,
        }
    }
}

// ---------------------------------------------------------------------------
// Event trait
// ---------------------------------------------------------------------------

/// A payload type bound to exactly one [`EventKind`].
///
/// Handlers subscribe by payload type, so a handler can only ever receive
/// the payload shape it was written for.
pub trait Event: Clone + Send + Sync + 'static + Into<DomainEvent> {
    const KIND: EventKind;

    /// Borrow the payload if `event` is of this kind.
    fn from_domain(event: &DomainEvent) -> Option<&Self>;
}

macro_rules! bind_event_kind {
    ($($payload:ident),+ $(,)?) => {
        $(
            impl Event for $payload {
                const KIND: EventKind = EventKind::$payload;

                fn from_domain(event: &DomainEvent) -> Option<&Self> {
                    match event {
                        DomainEvent::$payload(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl From<$payload> for DomainEvent {
                fn from(payload: $payload) -> Self {
                    DomainEvent::$payload(payload)
                }
            }
        )+
    };
}

bind_event_kind!(
    UserCreated,
    PostPublished,
    EventCreated,
    SubscriberAdded,
    SubscriberRemoved,
    CityCreated,
    UserJoinedCity,
);

// ---------------------------------------------------------------------------
// EventEnvelope
// ---------------------------------------------------------------------------

/// A published event stamped with an id and the publish time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: EntityId,
    #[serde(flatten)]
    pub event: DomainEvent,
    pub occurred_at: Timestamp,
}

impl EventEnvelope {
    pub fn new(event: DomainEvent) -> Self {
        Self {
            id: new_id(),
            event,
            occurred_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn kind_names_parse_back() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_matches!(
            "order:created".parse::<EventKind>(),
            Err(UnknownEventKind(name)) if name == "order:created"
        );
    }

    #[test]
    fn domain_event_serializes_with_wire_name() {
        let city_id = new_id();
        let event = DomainEvent::from(SubscriberAdded {
            email: "a@example.org".into(),
            city_id,
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "subscriber:added");
        assert_eq!(json["payload"]["email"], "a@example.org");
        assert_eq!(json["payload"]["city_id"], city_id.to_string());
    }

    #[test]
    fn kind_serializes_as_wire_name() {
        let json = serde_json::to_value(EventKind::UserJoinedCity).unwrap();
        assert_eq!(json, "user:joined_city");
    }

    #[test]
    fn from_domain_matches_only_its_kind() {
        let event: DomainEvent = EventCreated {
            event_id: new_id(),
            city_id: new_id(),
        }
        .into();

        assert!(EventCreated::from_domain(&event).is_some());
        assert!(PostPublished::from_domain(&event).is_none());
        assert_eq!(event.kind(), EventCreated::KIND);
    }

    #[test]
    fn envelope_flattens_event() {
        let envelope = EventEnvelope::new(
            CityCreated {
                city_id: new_id(),
                slug: "lisbon".into(),
            }
            .into(),
        );

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["event"], "city:created");
        assert_eq!(json["payload"]["slug"], "lisbon");
        assert!(json.get("occurred_at").is_some());
        assert_eq!(envelope.kind(), EventKind::CityCreated);
    }
}
