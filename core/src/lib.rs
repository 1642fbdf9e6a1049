//! # LiveView Core
//!
//! Core traits and types for server-rendered live components.
//!
//! A live component holds per-connection state on the server, reacts to
//! lifecycle calls from a host and describes its UI as a render tree. The host
//! diffs successive trees and ships only the delta to the client.
//!
//! ## Core Concepts
//!
//! - **State**: Per-connection view state, a projection of domain data
//! - **Event**: Closed set of client-originated events, decoded from name + payload
//! - **Component**: Lifecycle hooks `mount → handle_params → handle_event → render`
//! - **Node**: Structured render tree (elements, attributes, text)
//! - **Patch**: A single change between two render trees
//!
//! ## Example
//!
//! ```ignore
//! use liveview_core::{component::{LiveComponent, Session}, render::{Element, Node}, Params};
//!
//! struct Counter;
//!
//! impl LiveComponent for Counter {
//!     type State = i64;
//!     type Event = CounterEvent;
//!
//!     fn mount(&self, _params: &Params, _session: &Session) -> i64 {
//!         0
//!     }
//!
//!     fn handle_params(&self, _state: &mut i64, _params: &Params) {}
//!
//!     fn handle_event(&self, state: &mut i64, event: CounterEvent) -> bool {
//!         match event {
//!             CounterEvent::Increment => *state += 1,
//!         }
//!         // Only this connection's state changed
//!         false
//!     }
//!
//!     fn render(&self, state: &i64) -> Node {
//!         Element::new("p").text(state.to_string()).into()
//!     }
//! }
//! ```

pub mod diff;
pub mod event;
pub mod params;
pub mod render;

pub use diff::{Patch, apply, diff};
pub use event::{DecodeError, LiveEvent};
pub use params::{Params, Payload, Values};
pub use render::{Element, Node};

/// Component module - lifecycle contract between a component and its host
///
/// The host owns one `State` per connected client and calls the hooks below
/// in response to transport events. Hooks are synchronous and run to
/// completion; the host serialises calls per connection.
pub mod component {
    use super::{LiveEvent, Node, Params};
    use std::fmt;

    /// Identifier of one connected client session.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct SessionId(u64);

    impl SessionId {
        /// Creates a `SessionId` from a raw value
        #[must_use]
        pub const fn new(raw: u64) -> Self {
            Self(raw)
        }

        /// Returns the raw value
        #[must_use]
        pub const fn as_u64(self) -> u64 {
            self.0
        }
    }

    impl fmt::Display for SessionId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    /// Per-connection information handed to `mount`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Session {
        /// Session identifier assigned by the host
        pub id: SessionId,
    }

    impl Session {
        /// Creates a new session descriptor
        #[must_use]
        pub const fn new(id: SessionId) -> Self {
            Self { id }
        }
    }

    /// The `LiveComponent` trait - a lifecycle-driven view controller
    ///
    /// # Type Parameters
    ///
    /// - `State`: Per-connection view state (recomputed, never a source of truth)
    /// - `Event`: Closed set of client events this component understands
    ///
    /// # Lifecycle
    ///
    /// 1. `mount` once per new connection
    /// 2. `handle_params` right after `mount` with the same params, then
    ///    whenever navigation parameters change
    /// 3. `handle_event` for every decoded client event
    /// 4. `handle_refresh` when another session changed shared data
    /// 5. `render` after each of the above
    pub trait LiveComponent: Send + Sync + 'static {
        /// The view state this component maintains per connection
        type State: Send + Sync + 'static;

        /// The events this component handles
        type Event: LiveEvent + fmt::Debug + Send;

        /// Build the initial state for a new connection
        fn mount(&self, params: &Params, session: &Session) -> Self::State;

        /// React to a change of navigation parameters
        fn handle_params(&self, state: &mut Self::State, params: &Params);

        /// React to a client event.
        ///
        /// Returns `true` when the event wrote shared data, so the host
        /// tells every other session to refresh. Events that were no-ops or
        /// only touched this connection's state return `false`.
        fn handle_event(&self, state: &mut Self::State, event: Self::Event) -> bool;

        /// Recompute state after shared data changed elsewhere
        fn handle_refresh(&self, state: &mut Self::State) {
            let _ = state;
        }

        /// Build the render tree for the current state
        fn render(&self, state: &Self::State) -> Node;
    }
}
