//! Space Express state kernel.
//!
//! A monotonic technology-unlock registry persisted through a key-value
//! substrate, a session-scoped tab router, and the page composition that gates
//! navigation on unlocked technologies.
//!
//! No I/O of its own: durable storage is injected through [`KvStore`].

pub mod constants;
pub mod page;
pub mod persist;
pub mod router;
pub mod tab;
pub mod tech;

pub use constants::{CONSTRUCTION, RESEARCH, TECH_RECORD_KEY, TITLE};
pub use page::{NavButton, Page, Screen};
pub use persist::{KvStore, MemoryStore, PersistError, StorageError, load, save};
pub use router::TabRouter;
pub use tab::{Action, ActionButton, Tab, TabView, UnknownTab};
pub use tech::{TechRegistry, TechnologyState};
