use debt_consolidator::DecodedResult;
use proptest::prelude::*;

/// Phones drawn from a small pool so generated records collide often
pub fn phone_strategy() -> impl Strategy<Value = String> {
    (0u8..12).prop_map(|n| format!("+7{n:03}"))
}

pub fn company_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,6}( (Inc|LLC))?"
}

pub fn decoded_result_strategy() -> impl Strategy<Value = DecodedResult> {
    (
        company_strategy(),
        -1_000_000i64..1_000_000,
        prop::collection::vec(phone_strategy(), 0..4),
    )
        .prop_map(|(company, debt, phones)| DecodedResult {
            company,
            debt,
            phones,
        })
}

pub fn decoded_results_strategy() -> impl Strategy<Value = Vec<DecodedResult>> {
    prop::collection::vec(decoded_result_strategy(), 0..40)
}
