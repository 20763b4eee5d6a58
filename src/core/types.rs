use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reaction to a 20% market fall, as captured by quiz question 7.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum MarketBehavior {
    PanicSell,
    #[default]
    NervousHold,
    BuyingOpportunity,
}

impl MarketBehavior {
    pub fn from_label(label: &str) -> Self {
        if label.contains("Panic") {
            Self::PanicSell
        } else if label.contains("buying opportunity") {
            Self::BuyingOpportunity
        } else {
            Self::NervousHold
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PanicSell => "Panic and sell",
            Self::NervousHold => "Feel nervous but hold",
            Self::BuyingOpportunity => "See it as buying opportunity",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum LoanStatus {
    #[default]
    NoLoans,
    HomeLoanOnly,
    CarOrPersonalLoan,
    MultipleLoans,
}

impl LoanStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Home loan only" => Self::HomeLoanOnly,
            "Car/Personal loan" => Self::CarOrPersonalLoan,
            "Multiple loans" => Self::MultipleLoans,
            _ => Self::NoLoans,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NoLoans => "No loans",
            Self::HomeLoanOnly => "Home loan only",
            Self::CarOrPersonalLoan => "Car/Personal loan",
            Self::MultipleLoans => "Multiple loans",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum InsuranceStatus {
    HealthAndTerm,
    OnlyOne,
    #[default]
    Uninsured,
}

impl InsuranceStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Both health and term" => Self::HealthAndTerm,
            "Only one" => Self::OnlyOne,
            _ => Self::Uninsured,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HealthAndTerm => "Both health and term",
            Self::OnlyOne => "Only one",
            Self::Uninsured => "None",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum JobStability {
    VeryStable,
    Stable,
    #[default]
    Moderate,
    Uncertain,
}

impl JobStability {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Very Stable" => Self::VeryStable,
            "Stable" => Self::Stable,
            "Uncertain" => Self::Uncertain,
            _ => Self::Moderate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryStable => "Very Stable",
            Self::Stable => "Stable",
            Self::Moderate => "Moderate",
            Self::Uncertain => "Uncertain",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum RiskProfile {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskProfile {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Conservative" => Self::Conservative,
            "Aggressive" => Self::Aggressive,
            _ => Self::Moderate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Moderate => "Moderate",
            Self::Aggressive => "Aggressive",
        }
    }
}

macro_rules! label_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<String> for $ty {
                fn from(value: String) -> Self {
                    Self::from_label(&value)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.label().to_string()
                }
            }
        )*
    };
}

label_conversions!(
    MarketBehavior,
    LoanStatus,
    InsuranceStatus,
    JobStability,
    RiskProfile,
    HousingStatus,
);

/// Quiz answers keyed by question id (1-based).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizAnswers(BTreeMap<u8, String>);

impl QuizAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, question: u8, answer: impl Into<String>) -> Self {
        self.insert(question, answer);
        self
    }

    pub fn insert(&mut self, question: u8, answer: impl Into<String>) {
        self.0.insert(question, answer.into());
    }

    pub fn get(&self, question: u8) -> Option<&str> {
        self.0.get(&question).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every question in `1..=question_count` has an answer.
    pub fn is_complete(&self, question_count: u8) -> bool {
        (1..=question_count).all(|q| self.0.contains_key(&q))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct AssetAllocation {
    pub equity: f64,
    pub debt: f64,
    pub gold: f64,
}

impl AssetAllocation {
    pub fn total(self) -> f64 {
        self.equity + self.debt + self.gold
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarBreakdown {
    pub savings_rate: u32,
    pub emergency_fund: u32,
    pub risk_alignment: u32,
    pub debt_health: u32,
    pub insurance: u32,
}

impl PillarBreakdown {
    pub fn total(self) -> u32 {
        self.savings_rate + self.emergency_fund + self.risk_alignment + self.debt_health + self.insurance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: u32,
    #[serde(flatten)]
    pub allocation: AssetAllocation,
    pub emergency_required: f64,
    pub pillar_breakdown: PillarBreakdown,
    pub action_items: Vec<String>,
}

/// Detailed form for the 5-step deep diagnostic. Numeric fields are free text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeepFormData {
    pub age: String,
    pub monthly_income: String,
    pub has_secondary_income: bool,
    pub secondary_income: String,
    pub job_stability: JobStability,
    pub dependents_count: String,

    pub monthly_expenses: String,
    pub emi_amount: String,
    pub housing_status: HousingStatus,

    pub equity_assets: String,
    pub fixed_income: String,
    pub epf_ppf_nps: String,
    pub gold_assets: String,
    pub real_estate_total: String,
    pub primary_residence_value: String,
    pub cash_assets: String,

    pub life_coverage_amount: String,
    pub health_coverage_amount: String,
    pub emergency_fund_months: String,

    pub retirement_age: String,
    pub risk_comfort: RiskProfile,
    pub goals: Vec<String>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum HousingStatus {
    #[default]
    Own,
    Rent,
}

impl HousingStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Rent" => Self::Rent,
            _ => Self::Own,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Own => "Own",
            Self::Rent => "Rent",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthPillarScores {
    pub savings_rate: u32,
    pub emergency_fund: u32,
    pub allocation_suitability: u32,
    pub protection: u32,
    pub diversification: u32,
    pub stability: u32,
}

impl WealthPillarScores {
    pub fn total(self) -> u32 {
        self.savings_rate
            + self.emergency_fund
            + self.allocation_suitability
            + self.protection
            + self.diversification
            + self.stability
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthScoreResult {
    pub total_score: u32,
    pub savings_rate_pct: f64,
    pub net_worth: f64,
    pub current_equity_pct: f64,
    pub ideal_equity_pct: f64,
    /// Positive when over-allocated to equity, negative when under.
    pub allocation_gap: f64,
    pub has_protection_gap: bool,
    pub life_cover_ratio: f64,
    pub pillar_scores: WealthPillarScores,
    pub recommendations: Vec<String>,
}

/// Bucketed answers from the first-stage quiz, as consumed by the Ignite engine.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stage1Answers {
    pub age: String,
    pub monthly_income: String,
    pub monthly_expenses: String,
    pub total_savings: String,
    pub loans: LoanStatus,
    pub insurance: InsuranceStatus,
    pub market_behavior: MarketBehavior,
    pub primary_goal: String,
}

impl Stage1Answers {
    pub fn from_quiz(answers: &QuizAnswers) -> Self {
        let text = |q: u8| answers.get(q).unwrap_or_default().to_string();
        Self {
            age: text(1),
            monthly_income: text(2),
            monthly_expenses: text(3),
            total_savings: text(4),
            loans: answers.get(5).map(LoanStatus::from_label).unwrap_or_default(),
            insurance: answers
                .get(6)
                .map(InsuranceStatus::from_label)
                .unwrap_or_default(),
            market_behavior: answers
                .get(7)
                .map(MarketBehavior::from_label)
                .unwrap_or_default(),
            primary_goal: text(8),
        }
    }
}

/// Exact figures from the Ignite detailed questionnaire. Zero means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stage2Data {
    pub exact_monthly_income: f64,
    pub has_secondary_income: bool,
    pub secondary_income_amount: f64,
    pub job_stability: JobStability,
    pub dependents_count: u32,

    #[serde(rename = "equityMF")]
    pub equity_mf: f64,
    pub fixed_income: f64,
    pub epf_ppf_nps: f64,
    pub gold_assets: f64,
    pub real_estate: f64,
    pub cash_savings: f64,
    #[serde(rename = "hasRSU")]
    pub has_rsu: bool,
    #[serde(rename = "rsuValue")]
    pub rsu_value: f64,

    pub home_loan_outstanding: f64,
    #[serde(rename = "homeLoanEMI")]
    pub home_loan_emi: f64,
    pub car_loan_outstanding: f64,
    #[serde(rename = "carLoanEMI")]
    pub car_loan_emi: f64,
    pub personal_loan_outstanding: f64,
    #[serde(rename = "personalLoanEMI")]
    pub personal_loan_emi: f64,
    pub credit_card_debt: f64,
    #[serde(rename = "otherEMIs")]
    pub other_emis: f64,

    pub term_life_cover: f64,
    pub health_cover: f64,
    pub emergency_fund_months: u32,

    pub retirement_age: u32,
    pub risk_profile: RiskProfile,
    pub top_goals: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IgniteUserData {
    pub stage1: Stage1Answers,
    pub stage2: Stage2Data,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgniteMetrics {
    pub wealth_score: u32,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub liquid_net_worth: f64,
    pub total_monthly_income: f64,
    pub total_monthly_expenses: f64,
    #[serde(rename = "totalEMIs")]
    pub total_emis: f64,
    pub monthly_surplus: f64,
    pub savings_rate: f64,
    pub current_age: u32,
    pub retirement_age: u32,
    pub years_to_retirement: u32,
    pub projected_corpus_at_retirement: f64,
    pub required_corpus_at_retirement: f64,
    pub retirement_gap: f64,
    pub retirement_readiness_percent: f64,
    pub current_equity_percent: f64,
    pub ideal_equity_percent: f64,
    pub equity_alignment_gap: f64,
    pub real_estate_concentration: f64,
    pub ideal_life_cover: f64,
    pub current_life_cover: f64,
    pub life_cover_gap: f64,
    pub ideal_health_cover: f64,
    pub current_health_cover: f64,
    pub health_cover_gap: f64,
    pub emergency_months: u32,
    pub ideal_emergency_months: u32,
    pub risk_profile: RiskProfile,
    pub has_personal_loan: bool,
    #[serde(rename = "hasRSU")]
    pub has_rsu: bool,
    pub high_real_estate_concentration: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeaserScore {
    pub estimated_score: u32,
    pub estimated_net_worth: f64,
    pub savings_rate: f64,
    pub retirement_readiness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryProjectionPoint {
    pub year: u32,
    pub age: u32,
    /// Annualised salary for this year.
    pub salary: f64,
    pub savings: f64,
    /// Corpus at the start of the year, rounded to whole rupees.
    pub corpus: f64,
}
