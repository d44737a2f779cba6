use crate::charts::{ChartDataPresenter, ChartSlot, ChartSpec, EmbeddedPayloads, PageCharts};
use crate::errors::AppError;
use crate::models::StatsResponse;
use crate::records::{paginate, requested_page, select_sessions, RecordFilter};
use crate::report::{build_csv_report, report_filename, ReportFormat};
use crate::state::AppState;
use crate::stats::{build_stats, overall_stats};
use crate::ui::{render_attendance_page, PageView};
use crate::views::{PageUrl, RequestHistory, ViewRegistry, ViewStateController};
use axum::{
    extract::State,
    http::{header, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::Local;
use tracing::debug;

pub async fn index() -> Redirect {
    Redirect::to("/attendance")
}

pub async fn attendance_page(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Html<String>, AppError> {
    let data = state.data.as_ref();
    let location = request_url(&uri, "/attendance");
    let filter = RecordFilter::from_url(&location);
    let page = requested_page(&location);

    let mut views = ViewStateController::new(ViewRegistry::portal()?, RequestHistory::new(location));
    let active = views.initialize();
    debug!("rendering attendance page with view `{active}`");

    let payloads =
        EmbeddedPayloads::from_records(&data.monthly, &data.classes).map_err(AppError::internal)?;
    let chart_specs = page_chart_specs(&payloads);

    let records = paginate(select_sessions(&data.sessions, &filter), page);
    let overall = overall_stats(&data.classes);

    Ok(Html(render_attendance_page(&PageView {
        student: data.student.as_ref(),
        overall: &overall,
        views: &views,
        classes: &data.classes,
        records: &records,
        filter: &filter,
        payloads: &payloads,
        chart_specs: &chart_specs,
    })))
}

pub async fn get_charts(State(state): State<AppState>) -> Result<Json<Vec<ChartSpec>>, AppError> {
    let payloads = EmbeddedPayloads::from_records(&state.data.monthly, &state.data.classes)
        .map_err(AppError::internal)?;
    Ok(Json(page_chart_specs(&payloads)))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(build_stats(&state.data))
}

pub async fn download_report(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, AppError> {
    let data = state.data.as_ref();
    let url = request_url(&uri, "/attendance/download");
    if ReportFormat::from_param(url.param("format")).is_none() {
        return Err(AppError::bad_request("Invalid format specified."));
    }

    let records = select_sessions(&data.sessions, &RecordFilter::from_url(&url));
    let generated = Local::now().naive_local();

    let body = build_csv_report(data.student.as_ref(), &records, generated)
        .map_err(AppError::internal)?;
    let disposition = format!("attachment; filename={}", report_filename(generated));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// Query values are read leniently from the raw URI so a bad parameter
/// never rejects the request.
fn request_url(uri: &Uri, fallback: &str) -> PageUrl {
    PageUrl::parse(uri.path_and_query().map_or(fallback, |pq| pq.as_str()))
}

/// Runs the chart presenter against the canvases the page declares.
fn page_chart_specs(payloads: &EmbeddedPayloads) -> Vec<ChartSpec> {
    let engine = PageCharts::with_surfaces([
        ChartSlot::Monthly.canvas_id(),
        ChartSlot::Class.canvas_id(),
    ]);
    let mut presenter = ChartDataPresenter::new(engine);
    let report = presenter.initialize_charts(payloads);
    debug!(rendered = report.rendered_count(), "charts prepared");
    presenter.into_engine().into_specs()
}
