//! Visibility filtering of resolved connection types.

use crate::core::ConnectionType;

/// Keep records whose `visible` flag is absent or `true`, preserving order.
pub fn visible_records<'a, I>(records: I) -> Vec<&'a ConnectionType>
where
    I: IntoIterator<Item = &'a ConnectionType>,
{
    records.into_iter().filter(|record| record.is_visible()).collect()
}
