use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

pub mod cli;
mod error;

pub use error::ApiError;

use crate::core::{
    DEFAULT_TARGET_AGE, DeepFormData, IgniteInsights, IgniteMetrics, IgniteUserData, QUESTIONS,
    Question, QuizAnswers, SalaryProjectionPoint, ScoreResult, Stage1Answers, Stage1Estimates,
    TeaserScore, WealthScoreResult, calculate_financial_health_score, calculate_ignite_metrics,
    calculate_teaser_score, calculate_wealth_score, parse_numeric_or_zero,
    simulate_salary_increments,
};
use crate::leads::{Contact, DeepLead, IgniteLead, Lead, LeadSink, QuizLead, TracingLeadSink};

const MAX_GOALS: usize = 3;
const MAX_AGE: u32 = 100;

#[derive(Clone)]
pub struct AppState {
    leads: Arc<dyn LeadSink>,
}

impl AppState {
    pub fn new(leads: Arc<dyn LeadSink>) -> Self {
        Self { leads }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(TracingLeadSink))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuizPayload {
    pub answers: QuizAnswers,
}

/// Simulator inputs. Fields left out are taken from the Ignite metrics of
/// `ignite` when it is present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySimulationPayload {
    pub current_age: Option<u32>,
    pub current_monthly_salary: Option<f64>,
    pub current_corpus: Option<f64>,
    pub savings_rate: Option<f64>,
    pub annual_increment_rate: f64,
    pub equity_percent: Option<f64>,
    pub target_age: Option<u32>,
    pub ignite: Option<IgniteUserData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySimulationResponse {
    pub target_age: u32,
    pub points: Vec<SalaryProjectionPoint>,
}

#[derive(Debug, Serialize)]
pub struct IgniteReport {
    pub metrics: IgniteMetrics,
    pub insights: IgniteInsights,
}

#[derive(Debug, Deserialize)]
pub struct LeadPayload {
    #[serde(default)]
    pub contact: Contact,
    pub assessment: Assessment,
}

/// The inputs a lead was scored from; the server recomputes the result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assessment {
    Quiz {
        #[serde(default)]
        answers: QuizAnswers,
        #[serde(default)]
        interested: bool,
    },
    Deep(DeepFormData),
    Ignite(IgniteUserData),
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
}

pub fn score_quiz(payload: &QuizPayload) -> ScoreResult {
    calculate_financial_health_score(&payload.answers)
}

pub fn score_deep(form: &DeepFormData) -> Result<WealthScoreResult, ApiError> {
    validate_deep_form(form)?;
    Ok(calculate_wealth_score(form))
}

pub fn ignite_report(data: &IgniteUserData) -> Result<IgniteReport, ApiError> {
    validate_ignite_data(data)?;
    let metrics = calculate_ignite_metrics(data);
    let insights = IgniteInsights::from_metrics(&metrics);
    Ok(IgniteReport { metrics, insights })
}

pub fn teaser(stage1: &Stage1Answers) -> TeaserScore {
    calculate_teaser_score(stage1)
}

pub fn simulate_salary(
    payload: &SalarySimulationPayload,
) -> Result<SalarySimulationResponse, ApiError> {
    let metrics = match &payload.ignite {
        Some(data) => {
            validate_ignite_data(data)?;
            Some(calculate_ignite_metrics(data))
        }
        None => None,
    };
    let metrics = metrics.as_ref();

    let current_age = payload
        .current_age
        .or(metrics.map(|m| m.current_age))
        .ok_or_else(|| missing_field("currentAge"))?;
    let current_monthly_salary = payload
        .current_monthly_salary
        .or(metrics.map(|m| m.total_monthly_income))
        .ok_or_else(|| missing_field("currentMonthlySalary"))?;
    let current_corpus = payload
        .current_corpus
        .or(metrics.map(|m| m.net_worth.max(0.0)))
        .unwrap_or(0.0);
    let savings_rate = payload
        .savings_rate
        .or(metrics.map(|m| m.savings_rate.clamp(0.0, 1.0)))
        .ok_or_else(|| missing_field("savingsRate"))?;
    let equity_percent = payload
        .equity_percent
        .or(metrics.map(|m| m.ideal_equity_percent))
        .ok_or_else(|| missing_field("equityPercent"))?;
    let target_age = payload
        .target_age
        .or(metrics.map(|m| m.retirement_age))
        .unwrap_or(DEFAULT_TARGET_AGE);

    reject_negative(&[
        ("currentMonthlySalary", current_monthly_salary),
        ("currentCorpus", current_corpus),
    ])?;
    reject_beyond_max_age(&[("currentAge", current_age), ("targetAge", target_age)])?;
    if !(0.0..=1.0).contains(&savings_rate) {
        return Err(ApiError::bad_request("savingsRate must be between 0 and 1"));
    }
    if payload.annual_increment_rate <= -1.0 {
        return Err(ApiError::bad_request(
            "annualIncrementRate must be greater than -1",
        ));
    }
    if !(0.0..=100.0).contains(&equity_percent) {
        return Err(ApiError::bad_request(
            "equityPercent must be between 0 and 100",
        ));
    }
    if target_age < current_age {
        return Err(ApiError::bad_request(
            "targetAge must not be below currentAge",
        ));
    }

    Ok(SalarySimulationResponse {
        target_age,
        points: simulate_salary_increments(
            current_age,
            current_monthly_salary,
            current_corpus,
            savings_rate,
            payload.annual_increment_rate,
            equity_percent,
            target_age,
        ),
    })
}

fn reject_negative(fields: &[(&str, f64)]) -> Result<(), ApiError> {
    match fields.iter().find(|(_, value)| *value < 0.0) {
        Some((name, _)) => Err(ApiError::bad_request(format!(
            "{name} must not be negative"
        ))),
        None => Ok(()),
    }
}

fn missing_field(name: &str) -> ApiError {
    ApiError::bad_request(format!("{name} is required when no ignite data is given"))
}

fn reject_beyond_max_age(fields: &[(&str, u32)]) -> Result<(), ApiError> {
    match fields.iter().find(|(_, age)| *age > MAX_AGE) {
        Some((name, _)) => Err(ApiError::bad_request(format!(
            "{name} must not exceed {MAX_AGE}"
        ))),
        None => Ok(()),
    }
}

fn reject_too_many_goals(count: usize) -> Result<(), ApiError> {
    if count > MAX_GOALS {
        return Err(ApiError::bad_request(format!(
            "at most {MAX_GOALS} goals may be selected"
        )));
    }
    Ok(())
}

pub fn validate_deep_form(form: &DeepFormData) -> Result<(), ApiError> {
    let age = parse_numeric_or_zero(&form.age);
    let retirement_age = parse_numeric_or_zero(&form.retirement_age);
    reject_negative(&[
        ("age", age),
        ("monthlyIncome", parse_numeric_or_zero(&form.monthly_income)),
        ("secondaryIncome", parse_numeric_or_zero(&form.secondary_income)),
        ("dependentsCount", parse_numeric_or_zero(&form.dependents_count)),
        ("monthlyExpenses", parse_numeric_or_zero(&form.monthly_expenses)),
        ("emiAmount", parse_numeric_or_zero(&form.emi_amount)),
        ("equityAssets", parse_numeric_or_zero(&form.equity_assets)),
        ("fixedIncome", parse_numeric_or_zero(&form.fixed_income)),
        ("epfPpfNps", parse_numeric_or_zero(&form.epf_ppf_nps)),
        ("goldAssets", parse_numeric_or_zero(&form.gold_assets)),
        ("realEstateTotal", parse_numeric_or_zero(&form.real_estate_total)),
        (
            "primaryResidenceValue",
            parse_numeric_or_zero(&form.primary_residence_value),
        ),
        ("cashAssets", parse_numeric_or_zero(&form.cash_assets)),
        ("lifeCoverageAmount", parse_numeric_or_zero(&form.life_coverage_amount)),
        (
            "healthCoverageAmount",
            parse_numeric_or_zero(&form.health_coverage_amount),
        ),
        (
            "emergencyFundMonths",
            parse_numeric_or_zero(&form.emergency_fund_months),
        ),
        ("retirementAge", retirement_age),
    ])?;
    if age > f64::from(MAX_AGE) || retirement_age > f64::from(MAX_AGE) {
        let name = if age > f64::from(MAX_AGE) { "age" } else { "retirementAge" };
        return Err(ApiError::bad_request(format!(
            "{name} must not exceed {MAX_AGE}"
        )));
    }
    if age > 0.0 && retirement_age > 0.0 && retirement_age < age {
        return Err(ApiError::bad_request("retirementAge must not be below age"));
    }
    reject_too_many_goals(form.goals.len())
}

pub fn validate_ignite_data(data: &IgniteUserData) -> Result<(), ApiError> {
    let s2 = &data.stage2;
    reject_negative(&[
        ("exactMonthlyIncome", s2.exact_monthly_income),
        ("secondaryIncomeAmount", s2.secondary_income_amount),
        ("equityMF", s2.equity_mf),
        ("fixedIncome", s2.fixed_income),
        ("epfPpfNps", s2.epf_ppf_nps),
        ("goldAssets", s2.gold_assets),
        ("realEstate", s2.real_estate),
        ("cashSavings", s2.cash_savings),
        ("rsuValue", s2.rsu_value),
        ("homeLoanOutstanding", s2.home_loan_outstanding),
        ("homeLoanEMI", s2.home_loan_emi),
        ("carLoanOutstanding", s2.car_loan_outstanding),
        ("carLoanEMI", s2.car_loan_emi),
        ("personalLoanOutstanding", s2.personal_loan_outstanding),
        ("personalLoanEMI", s2.personal_loan_emi),
        ("creditCardDebt", s2.credit_card_debt),
        ("otherEMIs", s2.other_emis),
        ("termLifeCover", s2.term_life_cover),
        ("healthCover", s2.health_cover),
    ])?;
    reject_beyond_max_age(&[("retirementAge", s2.retirement_age)])?;
    let current_age = Stage1Estimates::from_answers(&data.stage1).age;
    if s2.retirement_age != 0 && f64::from(s2.retirement_age) < current_age {
        return Err(ApiError::bad_request(
            "retirementAge must not be below the current age",
        ));
    }
    reject_too_many_goals(s2.top_goals.len())
}

pub fn build_lead(payload: LeadPayload) -> Result<Lead, ApiError> {
    let contact = payload
        .contact
        .normalized()
        .map_err(|err| ApiError::bad_request(err.to_string()))?;
    let lead = match payload.assessment {
        Assessment::Quiz {
            answers,
            interested,
        } => Lead::Quiz(QuizLead::new(
            contact,
            &calculate_financial_health_score(&answers),
            interested,
        )),
        Assessment::Deep(form) => Lead::Deep(DeepLead::new(contact, &score_deep(&form)?)),
        Assessment::Ignite(data) => {
            validate_ignite_data(&data)?;
            Lead::Ignite(IgniteLead::new(contact, &calculate_ignite_metrics(&data)))
        }
    };
    Ok(lead)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/quiz/questions", get(questions_handler))
        .route("/api/quiz/score", post(quiz_score_handler))
        .route("/api/deep/score", post(deep_score_handler))
        .route("/api/ignite/metrics", post(ignite_metrics_handler))
        .route("/api/ignite/teaser", post(teaser_handler))
        .route("/api/ignite/salary-simulation", post(salary_simulation_handler))
        .route("/api/leads", post(leads_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_http_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "finhealth HTTP API listening");
    axum::serve(listener, router(state)).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, StatusResponse { status: "ok" })
}

async fn questions_handler() -> Response {
    let questions: &[Question] = &QUESTIONS;
    json_response(StatusCode::OK, questions)
}

async fn quiz_score_handler(
    payload: Result<Json<QuizPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = body(payload)?;
    debug!(?payload, "quiz score request");
    let result = score_quiz(&payload);
    info!(
        score = result.score,
        answered = payload.answers.len(),
        complete = payload.answers.is_complete(QUESTIONS.len() as u8),
        "scored basic quiz"
    );
    Ok(json_response(StatusCode::OK, result))
}

async fn deep_score_handler(
    payload: Result<Json<DeepFormData>, JsonRejection>,
) -> Result<Response, ApiError> {
    let form = body(payload)?;
    debug!(?form, "deep score request");
    let result = score_deep(&form)?;
    info!(score = result.total_score, "scored deep diagnostic");
    Ok(json_response(StatusCode::OK, result))
}

async fn ignite_metrics_handler(
    payload: Result<Json<IgniteUserData>, JsonRejection>,
) -> Result<Response, ApiError> {
    let data = body(payload)?;
    debug!(?data, "ignite metrics request");
    let report = ignite_report(&data)?;
    info!(
        score = report.metrics.wealth_score,
        readiness = report.metrics.retirement_readiness_percent,
        "computed ignite metrics"
    );
    Ok(json_response(StatusCode::OK, report))
}

async fn teaser_handler(
    payload: Result<Json<Stage1Answers>, JsonRejection>,
) -> Result<Response, ApiError> {
    let stage1 = body(payload)?;
    let score = teaser(&stage1);
    info!(score = score.estimated_score, "computed ignite teaser");
    Ok(json_response(StatusCode::OK, score))
}

async fn salary_simulation_handler(
    payload: Result<Json<SalarySimulationPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = body(payload)?;
    debug!(?payload, "salary simulation request");
    let response = simulate_salary(&payload)?;
    info!(
        years = response.points.len(),
        target_age = response.target_age,
        "simulated salary increments"
    );
    Ok(json_response(StatusCode::OK, response))
}

async fn leads_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeadPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let lead = build_lead(body(payload)?)?;
    debug!(collection = lead.collection(), "lead received");
    if let Err(err) = state.leads.submit(&lead) {
        warn!(collection = lead.collection(), error = %err, "lead submission failed");
    }
    Ok(json_response(
        StatusCode::ACCEPTED,
        StatusResponse { status: "accepted" },
    ))
}

async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
