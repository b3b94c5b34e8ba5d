pub mod derive;
pub mod format;
pub mod record;

pub use derive::{Derived, EnrichedRow, Summary, derive};
pub use record::{HeaderScalars, TradeRecord, records_from_table};
