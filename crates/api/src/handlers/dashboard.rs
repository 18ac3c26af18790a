//! Dashboard summary: scalar totals, the per-year chart series, and
//! the ordered detail rows, all over one filtered snapshot.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Datelike;
use condospese_core::aggregation::{self, Period, Totals, YearTotal};
use condospese_core::derivation;
use condospese_core::types::{DbId, PaymentStatus};
use condospese_db::models::spesa::{SpesaDettaglio, SpesaFilter};
use condospese_db::repositories::SpesaRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

use super::spesa::SpesaView;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub periodo: Period,
    pub immobile_id: Option<DbId>,
    pub stato: Option<PaymentStatus>,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub totali: Totals,
    /// Formatted metric strings matching the three totals.
    pub totali_fmt: [String; 3],
    /// Ascending per-year sums for the bar chart.
    pub serie: Vec<YearTotal>,
    /// Detail rows in canonical order (due date, property, year, index).
    pub righe: Vec<SpesaView>,
}

/// GET /api/v1/dashboard/summary?periodo=&immobile_id=&stato=
///
/// The period window is resolved against every fiscal year present,
/// BEFORE the property/status restriction. A property whose years all
/// fall outside the global window therefore sums to zero instead of
/// showing its own most recent years.
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let oggi = chrono::Local::now().date_naive();

    let rows = SpesaRepo::list_detail(&state.pool, &SpesaFilter::default()).await?;

    // Sorted, dedup'd, at most three entries.
    let finestra: Option<Vec<i32>> = match query.periodo {
        Period::LastThreeYears => {
            let anni: Vec<i32> = rows.iter().map(|r| r.esercizio).collect();
            Some(aggregation::last_n_years(&anni, 3, oggi.year()))
        }
        Period::All => None,
    };

    // Window first, then property and status; SQL ordering preserved.
    let righe_rows: Vec<SpesaDettaglio> = rows
        .into_iter()
        .filter(|r| {
            finestra
                .as_ref()
                .map_or(true, |f| f.contains(&r.esercizio))
        })
        .filter(|r| query.immobile_id.map_or(true, |id| r.immobile_id == id))
        .filter(|r| query.stato.map_or(true, |s| r.stato == s))
        .collect();

    let snapshot: Vec<_> = righe_rows.iter().map(|r| r.to_expense_row()).collect();
    let totali = aggregation::totals(&snapshot);
    let serie = aggregation::yearly_series(&snapshot);
    let totali_fmt = [
        derivation::euro(Some(totali.pagato)),
        derivation::euro(Some(totali.da_pagare)),
        derivation::euro(Some(totali.totale)),
    ];

    let righe = righe_rows
        .into_iter()
        .map(|r| SpesaView::from_row(r, oggi))
        .collect();

    Ok(Json(DataResponse {
        data: DashboardSummary {
            totali,
            totali_fmt,
            serie,
            righe,
        },
    }))
}
