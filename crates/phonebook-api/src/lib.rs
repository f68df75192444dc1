//! # phonebook-api
//!
//! HTTP API layer for the phonebook directory service.
//!
//! Translates HTTP verbs and paths into [`DirectoryStore`] calls and maps the
//! outcomes to status codes:
//!
//! | Method | Path | Success | Failure |
//! |--------|------|---------|---------|
//! | GET | /api/persons | 200 + all entries | |
//! | GET | /api/persons/{id} | 200 + entry | 404 |
//! | POST | /api/persons | 200 + created entry | 400 |
//! | PUT | /api/persons/{id} | 200 + updated entry | 400, 404 |
//! | DELETE | /api/persons/{id} | 204 | |
//! | GET | /info | 200 + summary | |
//! | GET | / | 200 + welcome | |
//!
//! [`DirectoryStore`]: phonebook_core::DirectoryStore

pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use logging::RequestLogLayer;
pub use routes::create_router;
pub use state::AppState;
