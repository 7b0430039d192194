//! School infrastructure indicators.
//!
//! Raw census yes/no columns are normalized to 0/1 flags, averaged into four
//! category scores per school, and those are averaged into a single overall
//! index. The score table can also be reduced to descriptive statistics.

pub mod aggregate;
pub mod groups;
pub mod normalize;
pub mod summary;
pub mod types;
pub mod utility;
