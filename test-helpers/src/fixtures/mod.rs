//! Document fixtures.
//!
//! Each constant holds a JSON document in the wire format. Valid fixtures
//! parse; the `INVALID_*` fixtures each violate exactly one structural rule.

mod invalid;
mod tau;
mod test_set;

pub use invalid::{
    INVALID_CATEGORY_COUNT, INVALID_DUPLICATE_KEY, INVALID_EDGE_ORDER, INVALID_EXTRA_FIELD,
    INVALID_FORMULA_NODETYPE, INVALID_MULTIBINNING_COUNT, INVALID_SCHEMA_VERSION,
};
pub use tau::{TAU_ETF, TAU_TES};
pub use test_set::{TEST_1D, TEST_2D, TEST_CATEGORY, TEST_SET};
