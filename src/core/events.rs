use crate::arena::Surface;
use crate::core::BodyHandle;
use std::collections::VecDeque;

/// A body touched an arena surface during a step
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEvent {
    /// The body in contact
    pub body: BodyHandle,

    /// The surface it touched
    pub surface: Surface,

    /// The number of contact points against that surface
    pub contact_count: usize,

    /// The total normal impulse applied over the step
    pub normal_impulse: f32,
}

/// Types of body events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEventType {
    /// A body has been added to the world
    Added,

    /// A body has been removed from the world
    Removed,

    /// A body has been frozen in place
    Frozen,
}

/// An event related to a single body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyEvent {
    /// The type of body event
    pub event_type: BodyEventType,

    /// The body that the event refers to
    pub body: BodyHandle,
}

/// A queue of physics events
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Contact events
    contact_events: VecDeque<ContactEvent>,

    /// Body events
    body_events: VecDeque<BodyEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a contact event to the queue
    pub fn add_contact_event(&mut self, event: ContactEvent) {
        self.contact_events.push_back(event);
    }

    /// Adds a body event to the queue
    pub fn add_body_event(&mut self, event: BodyEvent) {
        self.body_events.push_back(event);
    }

    /// Gets the next contact event from the queue
    pub fn next_contact_event(&mut self) -> Option<ContactEvent> {
        self.contact_events.pop_front()
    }

    /// Gets the next body event from the queue
    pub fn next_body_event(&mut self) -> Option<BodyEvent> {
        self.body_events.pop_front()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.contact_events.is_empty() && self.body_events.is_empty()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.contact_events.clear();
        self.body_events.clear();
    }

    /// Returns all contact events involving a specific body
    pub fn contact_events_for_body(&self, body: BodyHandle) -> Vec<&ContactEvent> {
        self.contact_events
            .iter()
            .filter(|e| e.body == body)
            .collect()
    }

    /// Returns all body events of a specific type
    pub fn body_events_of_type(&self, event_type: BodyEventType) -> Vec<&BodyEvent> {
        self.body_events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }
}
