//! Whole-trie operations: need-index aggregation and legend bucketing

mod aggregate;
mod legend;

pub use aggregate::{
    display_data, state_needs, state_totals, weighted_sum, AttributeTotals, StateNeed,
    NEED_WEIGHTS,
};
pub use legend::{bucket_index, Legend};
