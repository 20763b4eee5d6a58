mod allocation;
mod deep;
mod format;
mod ignite;
mod insights;
mod parse;
mod projection;
mod quiz;
mod types;

pub use allocation::{calculate_allocation, calculate_equity_percent};
pub use deep::{DeepFinancials, calculate_wealth_score, ideal_equity_percent};
pub use format::{format_inr, format_lakhs_crores, format_percent};
pub use ignite::{
    EffectiveInputs, Stage1Estimates, calculate_ideal_equity_percent, calculate_ignite_metrics,
    calculate_teaser_score,
};
pub use insights::{
    FireProjection, IgniteInsights, Milestone, Priority, QuickWin, fire_projection,
    income_bracket, investable_bracket, liquidity_ratio, quick_wins, wealth_milestones,
};
pub use parse::parse_numeric_or_zero;
pub use projection::{
    DEFAULT_TARGET_AGE, blended_return, calculate_required_corpus, calculate_retirement_corpus,
    simulate_salary_increments,
};
pub use quiz::{QUESTIONS, Question, calculate_financial_health_score};
pub use types::{
    AssetAllocation, DeepFormData, HousingStatus, IgniteMetrics, IgniteUserData, InsuranceStatus,
    JobStability, LoanStatus, MarketBehavior, PillarBreakdown, QuizAnswers, RiskProfile,
    SalaryProjectionPoint, ScoreResult, Stage1Answers, Stage2Data, TeaserScore,
    WealthPillarScores, WealthScoreResult,
};

/// Bucket-to-midpoint tables for the basic quiz.
pub mod quiz_tables {
    pub use super::quiz::{
        AGE_MIDPOINTS, DEFAULT_AGE, DEFAULT_EXPENSES, DEFAULT_INCOME, DEFAULT_SAVINGS,
        EXPENSE_MIDPOINTS, INCOME_MIDPOINTS, SAVINGS_MIDPOINTS,
    };
}

/// Bucket-to-midpoint tables for the Ignite engine.
pub mod ignite_tables {
    pub use super::ignite::{
        AGE_MIDPOINTS, DEFAULT_AGE, DEFAULT_EXPENSES, DEFAULT_INCOME, DEFAULT_SAVINGS,
        EXPENSE_MIDPOINTS, INCOME_MIDPOINTS, SAVINGS_MIDPOINTS,
    };
}
