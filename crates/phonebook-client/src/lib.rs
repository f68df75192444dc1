// # phonebook-client
//
// Client side of the phonebook directory service.
//
// ## Architecture Overview
//
// - **PersonsService**: Trait for the four calls the client makes to the server
// - **HttpPersonsService**: `reqwest` implementation against a base URL
// - **Controller**: Holds the local entry mirror and transient UI state,
//   issues calls and reconciles local state with the responses
// - **NotificationCenter**: Banner state where only the newest timer may clear
// - **View**: Pure snapshot of what the user sees, rendered as text
//
// ## Flow
//
// ```text
// View <── Controller ──> PersonsService ──> HTTP API
//              │
//              └── NotificationCenter (5s auto-dismiss)
// ```

pub mod controller;
pub mod notification;
pub mod service;
pub mod view;

pub use controller::{Controller, Outcome, PendingAction};
pub use notification::{Notification, NotificationCenter, NotificationKind};
pub use service::{HttpPersonsService, PersonsService};
pub use view::{View, filter_entries};
