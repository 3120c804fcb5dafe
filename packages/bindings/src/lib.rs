use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Lending
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_repayment(input_json: String) -> NapiResult<String> {
    let input: advisor_calc_core::lending::repayment::RepaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = advisor_calc_core::lending::repayment::calculate_repayment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn estimate_borrowing_power(input_json: String) -> NapiResult<String> {
    let input: advisor_calc_core::lending::borrowing_power::BorrowingPowerInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        advisor_calc_core::lending::borrowing_power::estimate_borrowing_power(&input)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_refinance(input_json: String) -> NapiResult<String> {
    let input: advisor_calc_core::lending::refinance::RefinanceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = advisor_calc_core::lending::refinance::compare_refinance(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_interest_only(input_json: String) -> NapiResult<String> {
    let input: advisor_calc_core::lending::interest_only::InterestOnlyInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = advisor_calc_core::lending::interest_only::compare_interest_only(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Savings
// ---------------------------------------------------------------------------

#[napi]
pub fn project_compound_savings(input_json: String) -> NapiResult<String> {
    let input: advisor_calc_core::savings::compound_savings::CompoundSavingsInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        advisor_calc_core::savings::compound_savings::project_compound_savings(&input)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_super_guarantee(input_json: String) -> NapiResult<String> {
    let input: advisor_calc_core::savings::super_guarantee::SuperGuaranteeInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        advisor_calc_core::savings::super_guarantee::calculate_super_guarantee(&input)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Stored defaults
// ---------------------------------------------------------------------------

/// Built-in default parameters for a calculator key, for seeding forms when
/// the settings table has no row.
#[napi]
pub fn builtin_defaults(key: String) -> NapiResult<String> {
    let id: advisor_calc_core::settings::CalculatorId =
        serde_json::from_value(serde_json::Value::String(key)).map_err(to_napi_error)?;
    let defaults = advisor_calc_core::settings::builtin_defaults(id);
    serde_json::to_string(&defaults).map_err(to_napi_error)
}
