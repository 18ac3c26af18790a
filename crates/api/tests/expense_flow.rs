//! End-to-end flow through the HTTP surface: create a property,
//! register an installment batch, transition payments, read the
//! dashboard summary, and exercise the delete guard.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{expect_json, get, send_json};

async fn create_property(pool: &PgPool, nome: &str) -> i64 {
    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/v1/immobili",
        json!({ "nome": nome }),
    )
    .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    body["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn property_create_validates_and_conflicts(pool: PgPool) {
    // Blank name is a validation error.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/v1/immobili",
        json!({ "nome": "   " }),
    )
    .await;
    let body = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    create_property(&pool, "Jesolo").await;

    // Duplicate name maps to 409 via the unique constraint.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/v1/immobili",
        json!({ "nome": "Jesolo" }),
    )
    .await;
    let body = expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(body["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_pay_and_summarize(pool: PgPool) {
    let immobile_id = create_property(&pool, "Jesolo").await;

    // Register 3 installments, one with a zero amount.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/v1/spese",
        json!({
            "immobile_id": immobile_id,
            "esercizio": 2026,
            "tipo_spesa": "Ordinario",
            "stato": "Da pagare",
            "note": "gestione ordinaria",
            "rate": [
                { "scadenza": "2026-01-31", "importo": 100.0 },
                { "scadenza": "2026-02-28", "importo": 0.0 },
                { "scadenza": "2026-03-31", "importo": 50.0 }
            ]
        }),
    )
    .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(body["registrate"], 2);
    assert_eq!(body["totale"], 150.0);

    // Listing carries the derived fields.
    let response = get(common::build_test_app(pool.clone()), "/api/v1/spese").await;
    let body = expect_json(response, StatusCode::OK).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["rata"], "1/3");
    assert_eq!(rows[1]["rata"], "3/3");
    // Derived fields present; exact overdue state depends on the clock.
    assert!(rows[0]["classificazione"].is_string());
    assert!(rows[0]["stato_badge"].as_str().unwrap().starts_with("sb-"));
    assert!(rows[0]["stato_label"].as_str().unwrap().starts_with("da pagare"));
    assert_eq!(rows[0]["importo_fmt"], "€ 100.00");

    let first_id = rows[0]["id"].as_i64().unwrap();

    // Pay the first installment with an explicit date and note.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        &format!("/api/v1/spese/{first_id}/pay"),
        json!({ "data_pagamento": "2026-02-10", "nota": "bonifico" }),
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["stato"], "Pagato");
    assert_eq!(body["data_pagamento"], "2026-02-10");
    assert!(body["note"].as_str().unwrap().ends_with("bonifico"));

    // Reopen it; the payment date must clear.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        &format!("/api/v1/spese/{first_id}/unpay"),
        json!({}),
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["stato"], "Da pagare");
    assert!(body["data_pagamento"].is_null());

    // Dashboard summary over everything.
    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/dashboard/summary?periodo=all",
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;
    let data = &body["data"];
    assert_eq!(data["totali"]["pagato"], 0.0);
    assert_eq!(data["totali"]["da_pagare"], 150.0);
    assert_eq!(data["totali"]["totale"], 150.0);
    assert_eq!(data["serie"].as_array().unwrap().len(), 1);
    assert_eq!(data["serie"][0]["esercizio"], 2026);
    assert_eq!(data["righe"].as_array().unwrap().len(), 2);

    // Property cannot be deleted while installments reference it.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "DELETE",
        &format!("/api/v1/immobili/{immobile_id}"),
        json!({}),
    )
    .await;
    let body = expect_json(response, StatusCode::CONFLICT).await;
    assert!(body["error"].as_str().unwrap().contains("2 associated"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn property_update_is_full_replace(pool: PgPool) {
    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/v1/immobili",
        json!({ "nome": "Jesolo", "indirizzo": "Via Roma 1", "iban": "IT00X0000000000000000000000" }),
    )
    .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["indirizzo"], "Via Roma 1");

    // Blanking or omitting a field in the replacement payload clears it.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "PUT",
        &format!("/api/v1/immobili/{id}"),
        json!({ "nome": "Jesolo Mare", "indirizzo": "" }),
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["nome"], "Jesolo Mare");
    assert!(body["indirizzo"].is_null());
    assert!(body["iban"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_window_spans_all_properties(pool: PgPool) {
    let vecchia = create_property(&pool, "Vecchia").await;
    let nuova = create_property(&pool, "Nuova").await;

    for (imm, esercizio, importo) in [
        (vecchia, 2020, 10.0),
        (vecchia, 2021, 20.0),
        (nuova, 2023, 30.0),
        (nuova, 2024, 40.0),
        (nuova, 2025, 50.0),
    ] {
        let response = send_json(
            common::build_test_app(pool.clone()),
            "POST",
            "/api/v1/spese",
            json!({
                "immobile_id": imm,
                "esercizio": esercizio,
                "tipo_spesa": "Ordinario",
                "stato": "Da pagare",
                "rate": [{ "scadenza": format!("{esercizio}-06-30"), "importo": importo }]
            }),
        )
        .await;
        expect_json(response, StatusCode::CREATED).await;
    }

    // The three-year window is resolved over every year present
    // (2023-2025), so a property whose years all predate it sums to
    // zero instead of showing its own most recent years.
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/dashboard/summary?immobile_id={vecchia}"),
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"]["totali"]["totale"], 0.0);
    assert!(body["data"]["righe"].as_array().unwrap().is_empty());
    assert!(body["data"]["serie"].as_array().unwrap().is_empty());

    // Over all periods the same property reports its real totals.
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/dashboard/summary?periodo=all&immobile_id={vecchia}"),
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"]["totali"]["totale"], 30.0);

    // Unfiltered, only the window years contribute.
    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/dashboard/summary",
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"]["totali"]["totale"], 120.0);
    assert_eq!(body["data"]["serie"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn all_zero_registration_rejected(pool: PgPool) {
    let immobile_id = create_property(&pool, "Jesolo").await;

    let response = send_json(
        common::build_test_app(pool.clone()),
        "POST",
        "/api/v1/spese",
        json!({
            "immobile_id": immobile_id,
            "esercizio": 2026,
            "tipo_spesa": "Ordinario",
            "stato": "Da pagare",
            "rate": [
                { "scadenza": "2026-01-31", "importo": 0.0 },
                { "scadenza": "2026-02-28", "importo": 0.0 }
            ]
        }),
    )
    .await;
    let body = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Nothing was written.
    let response = get(common::build_test_app(pool.clone()), "/api/v1/spese").await;
    let body = expect_json(response, StatusCode::OK).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
