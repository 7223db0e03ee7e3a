pub mod diagnosis;
pub mod disease;
pub mod enums;
pub mod history;
pub mod session;

pub use diagnosis::*;
pub use disease::*;
pub use enums::*;
pub use history::*;
pub use session::*;

/// Identifier of a catalog symptom (SQLite row id).
pub type SymptomId = i64;
