use std::collections::BTreeSet;

use crate::dataset::record::ElectionRecord;
use crate::types::StateId;

/// Narrow loaded records down to the rows that count for `year`.
///
/// Summary rows are dropped. In a state that reports all-modes `TOTAL` rows,
/// only those rows are kept so per-mode breakdowns are not counted twice.
/// States without `TOTAL` rows keep every mode; those get summed later.
pub fn filter_year(records: Vec<ElectionRecord>, year: u16) -> Vec<ElectionRecord> {
    let records: Vec<ElectionRecord> = records
        .into_iter()
        .filter(|r| r.year == year && !r.is_summary_row())
        .collect();

    let states_with_total: BTreeSet<StateId> = records
        .iter()
        .filter(|r| r.is_total_mode())
        .map(|r| r.state.clone())
        .collect();

    records
        .into_iter()
        .filter(|r| !states_with_total.contains(&r.state) || r.is_total_mode())
        .collect()
}
