//! Integration tests for the service-order billing engine.
//!
//! This test suite drives the HTTP API end to end and covers:
//! - Business-day classification (normal and 50% premium time)
//! - Weekends and public holidays (100% premium time)
//! - Midnight crossing and full-day shifts
//! - Break policies
//! - Mileage, transport and pass-through charges
//! - Default rates from the rate table
//! - Persistence records and laboratory services
//! - Error cases

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use billing_engine::api::{create_router, AppState};
use billing_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

const HOUR: i64 = 3600;

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/elite_cnc").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/calculate", body).await
}

/// A one-technician attendance at R$ 90.00/h with no other charges.
fn create_request(date: &str, start_time: &str, end_time: &str) -> Value {
    json!({
        "order": {
            "order_number": "OS-1001",
            "client": "Metalúrgica Paulista",
            "description": "Preventive maintenance",
            "asset_tag": "PAT-0042",
            "machine": "Romi D800",
            "recorded_by": "ana"
        },
        "shift": {
            "service_date": date,
            "start_time": start_time,
            "end_time": end_time,
            "technician_count": 1,
            "hourly_rate": "90.00",
            "rate_per_km": "0"
        }
    })
}

fn assert_billing(result: &Value, field: &str, expected: &str) {
    let actual = result["billing"][field].as_str().unwrap();
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected billing.{} {}, got {}",
        field,
        expected,
        actual
    );
}

fn assert_classified(result: &Value, normal: i64, premium_50: i64, premium_100: i64) {
    let classified = &result["classified"];
    assert_eq!(classified["normal_seconds"], normal, "normal_seconds");
    assert_eq!(classified["premium_50_seconds"], premium_50, "premium_50_seconds");
    assert_eq!(classified["premium_100_seconds"], premium_100, "premium_100_seconds");
}

fn has_warning(result: &Value, code: &str) -> bool {
    result["audit_trace"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .any(|w| w["code"] == code)
}

// =============================================================================
// SECTION 1: Business Days
// =============================================================================

#[tokio::test]
async fn test_business_day_inside_normal_window() {
    // Tuesday 08:00-17:00: 9h normal * R$ 90 = R$ 810
    let request = create_request("2026-01-13", "08:00:00", "17:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 9 * HOUR, 0, 0);
    assert_billing(&result, "normal_hours_value", "810");
    assert_billing(&result, "total_value", "810");
}

#[tokio::test]
async fn test_business_day_with_lunch_break() {
    // Tuesday 08:00-17:00 with 12:00-13:00 lunch: 8h normal = R$ 720
    let mut request = create_request("2026-01-13", "08:00:00", "17:00:00");
    request["shift"]["break_start"] = json!("12:00:00");
    request["shift"]["break_end"] = json!("13:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 8 * HOUR, 0, 0);
    assert_billing(&result, "total_value", "720");
}

#[tokio::test]
async fn test_business_day_early_start_and_late_finish() {
    // Monday 05:30-19:00: 10h normal, 3.5h at 50%
    // 10 * 90 + 3.5 * 90 * 1.5 = 900 + 472.50 = 1372.50
    let request = create_request("2026-01-12", "05:30:00", "19:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 10 * HOUR, 3 * HOUR + 1800, 0);
    assert_billing(&result, "premium_50_value", "472.50");
    assert_billing(&result, "total_value", "1372.50");
}

#[tokio::test]
async fn test_carnival_is_a_business_day() {
    // Carnival Tuesday is not a national holiday
    let request = create_request("2026-02-17", "08:00:00", "12:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 4 * HOUR, 0, 0);
}

// =============================================================================
// SECTION 2: Weekends and Holidays
// =============================================================================

#[tokio::test]
async fn test_saturday_two_technicians() {
    // Saturday 08:00-12:00, 2 technicians at R$ 100: 4 * 100 * 2.0 * 2 = R$ 1600
    let mut request = create_request("2026-01-17", "08:00:00", "12:00:00");
    request["shift"]["technician_count"] = json!(2);
    request["shift"]["hourly_rate"] = json!("100");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 0, 0, 4 * HOUR);
    assert_billing(&result, "premium_100_value", "1600");
    assert_billing(&result, "total_value", "1600");
}

#[tokio::test]
async fn test_sunday_is_all_premium_100() {
    let request = create_request("2026-01-18", "10:00:00", "13:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 0, 0, 3 * HOUR);
    assert_billing(&result, "total_value", "540");
}

#[tokio::test]
async fn test_good_friday_is_a_holiday() {
    // Easter 2026 is April 5
    let request = create_request("2026-04-03", "08:00:00", "12:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 0, 0, 4 * HOUR);
}

#[tokio::test]
async fn test_christmas_is_a_holiday() {
    let request = create_request("2026-12-25", "08:00:00", "17:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 0, 0, 9 * HOUR);
    assert_billing(&result, "premium_100_value", "1620");
}

#[tokio::test]
async fn test_configured_regional_holiday() {
    // July 9 is a São Paulo state holiday listed in calendar.yaml
    let request = create_request("2026-07-09", "08:00:00", "10:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 0, 0, 2 * HOUR);
}

#[tokio::test]
async fn test_holiday_trace_explains_premium() {
    let request = create_request("2026-04-21", "08:00:00", "12:00:00");

    let (_, result) = post_calculate(request).await;

    let step = &result["audit_trace"]["steps"][2];
    assert_eq!(step["rule_id"], "business_day");
    assert_eq!(step["output"]["is_business_day"], false);
}

// =============================================================================
// SECTION 3: Midnight Crossing and Full Days
// =============================================================================

#[tokio::test]
async fn test_overnight_business_day_shift() {
    // Tuesday 22:00 to Wednesday 06:00: 8h at 50% = 8 * 90 * 1.5 = R$ 1080
    let request = create_request("2026-01-13", "22:00:00", "06:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 0, 8 * HOUR, 0);
    assert_billing(&result, "premium_50_value", "1080");
}

#[tokio::test]
async fn test_saturday_night_into_sunday() {
    let request = create_request("2026-01-17", "20:00:00", "02:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 0, 0, 6 * HOUR);
}

#[tokio::test]
async fn test_equal_start_and_end_is_a_full_day() {
    // Tuesday 09:00 to Wednesday 09:00 at R$ 10/h
    // 8h normal (09:00-17:00) + 16h at 50%: 80 + 240 = R$ 320
    let mut request = create_request("2026-01-13", "09:00:00", "09:00:00");
    request["shift"]["hourly_rate"] = json!("10");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 8 * HOUR, 16 * HOUR, 0);
    assert_billing(&result, "total_value", "320");
    assert!(has_warning(&result, "FULL_DAY_SHIFT"));
}

// =============================================================================
// SECTION 4: Break Policies
// =============================================================================

#[tokio::test]
async fn test_automatic_break_applies_on_saturday() {
    let mut request = create_request("2026-01-17", "08:00:00", "17:00:00");
    request["shift"]["break_policy"] =
        json!({"mode": "automatic", "start": "12:00:00", "end": "13:00:00"});

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 0, 0, 8 * HOUR);
}

#[tokio::test]
async fn test_no_deduction_policy_ignores_break() {
    let mut request = create_request("2026-01-13", "08:00:00", "17:00:00");
    request["shift"]["break_start"] = json!("12:00:00");
    request["shift"]["break_end"] = json!("13:00:00");
    request["shift"]["break_policy"] = json!({"mode": "none"});

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 9 * HOUR, 0, 0);
}

#[tokio::test]
async fn test_break_partly_outside_shift_is_clipped() {
    // Shift ends at 12:30, break 12:00-13:00: only 30 minutes deducted
    let mut request = create_request("2026-01-13", "08:00:00", "12:30:00");
    request["shift"]["break_start"] = json!("12:00:00");
    request["shift"]["break_end"] = json!("13:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 4 * HOUR, 0, 0);
}

#[tokio::test]
async fn test_break_outside_shift_is_warned() {
    let mut request = create_request("2026-01-13", "14:00:00", "17:00:00");
    request["shift"]["break_start"] = json!("12:00:00");
    request["shift"]["break_end"] = json!("13:00:00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_classified(&result, 3 * HOUR, 0, 0);
    assert!(has_warning(&result, "BREAK_OUTSIDE_SHIFT"));
}

// =============================================================================
// SECTION 5: Mileage, Transport and Pass-through Charges
// =============================================================================

#[tokio::test]
async fn test_km_only_attendance() {
    // No billable hours; 100 km at R$ 2.30 = R$ 230
    let mut request = create_request("2026-01-13", "08:00:00", "08:00:00");
    request["shift"]["hourly_rate"] = json!("0");
    request["shift"]["distance_km"] = json!("100");
    request["shift"]["rate_per_km"] = json!("2.30");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_billing(&result, "km_value", "230");
    assert_billing(&result, "total_value", "230");
}

#[tokio::test]
async fn test_transport_is_charged_per_technician() {
    let mut request = create_request("2026-01-13", "08:00:00", "12:00:00");
    request["shift"]["technician_count"] = json!(3);
    request["shift"]["transport_value_per_technician"] = json!("40.00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    // 4h * 90 * 3 = 1080, transport 3 * 40 = 120
    assert_billing(&result, "normal_hours_value", "1080");
    assert_billing(&result, "transport_total", "120");
    assert_billing(&result, "total_value", "1200");
}

#[tokio::test]
async fn test_pass_through_charges_are_summed() {
    let mut request = create_request("2026-01-13", "08:00:00", "09:00:00");
    request["shift"]["meal_value"] = json!("45.50");
    request["shift"]["parts_value"] = json!("300.00");
    request["shift"]["toll_value"] = json!("12.80");
    request["shift"]["lab_value"] = json!("80.00");

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    // 90 + 45.50 + 300 + 12.80 + 80 = 528.30
    assert_billing(&result, "meal_value", "45.50");
    assert_billing(&result, "total_value", "528.30");
}

#[tokio::test]
async fn test_missing_rates_come_from_rate_table() {
    let mut request = create_request("2026-01-13", "08:00:00", "10:00:00");
    let shift = request["shift"].as_object_mut().unwrap();
    shift.remove("hourly_rate");
    shift.remove("rate_per_km");
    shift.insert("distance_km".to_string(), json!("50"));

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    // 2h * 90.00 + 50 km * 1.40
    assert_billing(&result, "normal_hours_value", "180");
    assert_billing(&result, "km_value", "70");
    assert_billing(&result, "total_value", "250");
}

// =============================================================================
// SECTION 6: Records and Laboratory Services
// =============================================================================

#[tokio::test]
async fn test_record_is_rounded_to_cents() {
    // 20 minutes at R$ 100: 33.333... before rounding
    let mut request = create_request("2026-01-13", "08:00:00", "08:20:00");
    request["shift"]["hourly_rate"] = json!("100");

    let (_, calculation) = post_calculate(request.clone()).await;
    let exact = calculation["billing"]["normal_hours_value"].as_str().unwrap();
    assert!(exact.starts_with("33.3333"), "got {}", exact);

    let (status, record) =
        post_json(create_router_for_test(), "/calculate/record", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["horas_tecnicas"], "33.33");
    assert_eq!(record["valor_atendimento"], "33.33");
    assert_eq!(record["ordem_servico"], "OS-1001");
    assert_eq!(record["patrimonio"], "PAT-0042");
    assert_eq!(record["hora_inicio"], "08:00:00");
    assert_eq!(record["usuario_lancamento"], "ana");
    assert_eq!(record["status"], "Pendente");
}

#[tokio::test]
async fn test_record_total_adds_up_rounded_columns() {
    // 33.3333 + 0.005 + 0.005 is 33.34 exact, but the columns round to 33.33 + 0.01 + 0.01
    let mut request = create_request("2026-01-13", "08:00:00", "08:20:00");
    request["shift"]["hourly_rate"] = json!("100");
    request["shift"]["distance_km"] = json!("1");
    request["shift"]["rate_per_km"] = json!("0.005");
    request["shift"]["meal_value"] = json!("0.005");

    let (status, record) =
        post_json(create_router_for_test(), "/calculate/record", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["horas_tecnicas"], "33.33");
    assert_eq!(record["km"], "0.01");
    assert_eq!(record["refeicao"], "0.01");
    assert_eq!(record["valor_atendimento"], "33.35");
}

#[tokio::test]
async fn test_record_team_rate_and_hours() {
    let mut request = create_request("2026-01-13", "15:00:00", "19:00:00");
    request["shift"]["technician_count"] = json!(2);

    let (status, record) =
        post_json(create_router_for_test(), "/calculate/record", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["qtd_tecnicos"], 2);
    assert_eq!(
        normalize_decimal(record["valor_hora_tecnica_total"].as_str().unwrap()),
        "180"
    );
    assert_eq!(normalize_decimal(record["horas_normais"].as_str().unwrap()), "2");
    assert_eq!(normalize_decimal(record["horas_extra_50"].as_str().unwrap()), "2");
    // 2h * 90 * 2 + 2h * 135 * 2 = 360 + 540
    assert_eq!(record["valor_atendimento"], "900.00");
}

#[tokio::test]
async fn test_lab_service() {
    let body = json!({
        "order": {"order_number": "OS-2001", "client": "Usinagem Campinas"},
        "service_date": "2026-01-13",
        "lab_value": "350.00",
        "parts_value": "120.00"
    });

    let (status, record) = post_json(create_router_for_test(), "/calculate/lab", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["valor_atendimento"], "470.00");
    assert_eq!(record["valor_laboratorio"], "350.00");
    assert_eq!(record["pecas"], "120.00");
    assert!(record["hora_inicio"].is_null());
}

// =============================================================================
// SECTION 7: Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"shift\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_shift_returns_validation_error() {
    let (status, error) = post_calculate(json!({"order": {}})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_zero_technicians_rejected() {
    let mut request = create_request("2026-01-13", "08:00:00", "17:00:00");
    request["shift"]["technician_count"] = json!(0);

    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_negative_toll_rejected() {
    let mut request = create_request("2026-01-13", "08:00:00", "17:00:00");
    request["shift"]["toll_value"] = json!("-5.00");

    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["details"], "toll_value");
}

#[tokio::test]
async fn test_oversized_hourly_rate_rejected() {
    let mut request = create_request("2026-01-13", "06:00:00", "18:00:00");
    request["shift"]["hourly_rate"] = json!("60000000000000000000000000000");

    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "INVALID_INPUT");
    assert_eq!(error["details"], "hourly_rate");
}

#[tokio::test]
async fn test_oversized_pass_through_values_rejected() {
    let mut request = create_request("2026-01-13", "08:00:00", "17:00:00");
    request["shift"]["meal_value"] = json!("79228162514264337593543950335");
    request["shift"]["parts_value"] = json!("79228162514264337593543950335");

    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "INVALID_INPUT");
    assert_eq!(error["details"], "total_value");
}

#[tokio::test]
async fn test_oversized_lab_service_rejected() {
    let body = json!({
        "order": {"order_number": "OS-2002", "client": "Usinagem Campinas"},
        "service_date": "2026-01-13",
        "lab_value": "79228162514264337593543950335",
        "parts_value": "79228162514264337593543950335"
    });

    let (status, error) = post_json(create_router_for_test(), "/calculate/lab", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["details"], "total_value");
}

#[tokio::test]
async fn test_unsupported_year_returns_503() {
    let request = create_request("1975-03-04", "08:00:00", "17:00:00");

    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error["code"], "CALENDAR_UNAVAILABLE");
}

#[tokio::test]
async fn test_no_rate_table_for_date_returns_400() {
    let mut request = create_request("2024-06-04", "08:00:00", "17:00:00");
    request["shift"].as_object_mut().unwrap().remove("hourly_rate");

    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "RATE_NOT_FOUND");
}
