use napi::Result as NapiResult;
use napi_derive::napi;

use lease_accounting_core::lease_accounting::{self, LeaseTerms};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse lease terms and apply the input rules before calling the engine.
fn parse_terms(input_json: &str) -> NapiResult<LeaseTerms> {
    let terms: LeaseTerms = serde_json::from_str(input_json).map_err(to_napi_error)?;
    lease_accounting::validate_lease_terms(&terms).map_err(to_napi_error)?;
    Ok(terms)
}

// ---------------------------------------------------------------------------
// Lease Accounting
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_lease(input_json: String) -> NapiResult<bool> {
    parse_terms(&input_json).map(|_| true)
}

#[napi]
pub fn lease_metrics(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = lease_accounting::calculate_lease_metrics(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = lease_accounting::build_amortization_schedule(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn journal_entries(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = lease_accounting::generate_journal_entries(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn lease_analysis(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = lease_accounting::analyze_lease(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
