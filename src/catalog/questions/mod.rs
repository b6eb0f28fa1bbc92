//! Sample questions, grouped by topic.

pub mod calendar;
pub mod dict;
pub mod list;
pub mod math;
pub mod string;

use super::{Catalog, CatalogError, Specification};

/// Every bundled question, in catalog order
pub static ALL: &[&Specification] = &[
    &math::IS_DIVISIBLE_BY,
    &math::IS_EVEN,
    &math::GREATEST_COMMON_DIVISOR,
    &math::LEAST_COMMON_MULTIPLE,
    &list::TRANSPOSE,
    &list::FLATTEN_2D_LIST,
    &list::FLATTEN_2D_LIST_TO_LIST,
    &list::CONTAINS_ALL,
    &list::IS_SUBSET_OF,
    &string::FORMAT_WITHOUT_NONES,
    &dict::SORT_DICT_ITEMS_BY_KEY,
    &dict::SORT_DICT_ITEMS_BY_VALUE,
    &dict::GROUP_BY_PARITY,
    &calendar::DAYS_BETWEEN,
];

pub fn register(catalog: &mut Catalog) -> Result<(), CatalogError> {
    ALL.iter().copied().try_for_each(|spec| catalog.add_question(spec))
}
