//! Core types for the dragcal ecosystem.
//!
//! This crate holds the event-state logic behind a drag-and-drop calendar:
//! - `template` for the draggable tokens not yet placed
//! - `event` and `store` for placed events and the drafts that become them
//! - `staging` for the creation form / deletion prompt state machine
//! - `payload` for narrowing widget callbacks at the boundary
//! - `session` for driving all of the above from user interactions

pub mod dragcal_config;
pub mod error;
pub mod event;
pub mod identifier;
pub mod payload;
pub mod session;
pub mod staging;
pub mod store;
pub mod template;
pub mod timestamp;

pub use dragcal_config::DragCalConfig;
pub use error::{DragCalError, DragCalResult};
pub use event::{Draft, DraftStage, ScheduledEvent};
pub use identifier::{IdSource, IdStrategy, Identifier};
pub use session::{Interaction, Session, View};
pub use staging::Staging;
pub use template::{EventTemplate, TemplateRegistry};
pub use timestamp::Timestamp;
