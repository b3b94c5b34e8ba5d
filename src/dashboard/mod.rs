pub mod figures;
pub mod table;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::metrics::{Derived, Summary};

pub use figures::Figures;
pub use table::TradesTable;

/// Display names of the two currencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Units {
    pub native: String,
    pub stable: String,
}

impl Units {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Units {
            native: config.native_unit.clone(),
            stable: config.stable_unit.clone(),
        }
    }
}

/// Everything the page draws for one tick.
///
/// An empty snapshot carries no figures and no table; the page shows a
/// placeholder instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub units: Units,
    pub empty: bool,
    pub summary: Summary,
    pub figures: Option<Figures>,
    pub table: Option<TradesTable>,
}

impl Snapshot {
    pub fn build(derived: &Derived, config: &DashboardConfig) -> Self {
        let units = Units::from_config(config);
        let (figures, table) = if derived.is_empty() {
            (None, None)
        } else {
            (
                Some(Figures::build(derived, &units)),
                Some(TradesTable::build(&derived.rows, &units)),
            )
        };

        Snapshot {
            title: config.title.clone(),
            generated_at: Utc::now(),
            units,
            empty: derived.is_empty(),
            summary: derived.summary.clone(),
            figures,
            table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_derivation_renders_nothing() {
        let config = DashboardConfig::new("missing.xlsx");
        let snap = Snapshot::build(&Derived::empty(), &config);
        assert!(snap.empty);
        assert!(snap.figures.is_none());
        assert!(snap.table.is_none());
        assert_eq!(snap.summary.invested_capital, 0.0);
        assert_eq!(snap.summary.current_capital, 0.0);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["empty"], true);
        assert!(json["figures"].is_null());
    }
}
