//! Prize wheel core: weighted winner selection, spin animation, and the
//! lead-capture gate that blocks repeat entrants.

pub mod animation;
pub mod config;
pub mod constants;
pub mod duplicate;
pub mod error;
pub mod inventory;
pub mod leads;
pub mod registration;
pub mod selector;
pub mod session;
pub mod validation;
pub mod wheel;

pub use config::{SpinSettings, Tier, WheelConfig};
pub use duplicate::{check_duplicate, DuplicateCheck};
pub use error::{ConfigError, InventoryError, RegistrationError, SelectionError};
pub use inventory::{Inventory, PrizeEditor, PrizeItem};
pub use leads::{History, HistoryEntry, HistoryFilter, LeadData, LeadField};
pub use registration::{RegistrationForm, RegistrationStatus};
pub use selector::{select_winner, Outcome};
pub use session::{Resolution, SpinRequest, SpinSession};
pub use wheel::{Frame, SpinStart, Wheel, WheelState};
