use super::projection::{calculate_required_corpus, calculate_retirement_corpus};
use super::quiz::bucket_midpoint;
use super::types::{
    IgniteMetrics, IgniteUserData, InsuranceStatus, MarketBehavior, RiskProfile, Stage1Answers,
    TeaserScore,
};

pub const AGE_MIDPOINTS: [(&str, f64); 6] = [
    ("Under 25", 23.0),
    ("25-30", 27.0),
    ("30-35", 32.0),
    ("35-40", 37.0),
    ("40-45", 42.0),
    ("45+", 50.0),
];

pub const INCOME_MIDPOINTS: [(&str, f64); 4] = [
    ("Under ₹50,000", 40_000.0),
    ("₹50,000-1,00,000", 75_000.0),
    ("₹1,00,000-2,00,000", 150_000.0),
    ("Above ₹2,00,000", 300_000.0),
];

pub const EXPENSE_MIDPOINTS: [(&str, f64); 4] = [
    ("Under ₹30,000", 25_000.0),
    ("₹30,000-60,000", 45_000.0),
    ("₹60,000-1,00,000", 80_000.0),
    ("Above ₹1,00,000", 130_000.0),
];

pub const SAVINGS_MIDPOINTS: [(&str, f64); 5] = [
    ("Under ₹5 lakhs", 300_000.0),
    ("₹5-10 lakhs", 750_000.0),
    ("₹10-25 lakhs", 1_750_000.0),
    ("₹25-50 lakhs", 3_750_000.0),
    ("Above ₹50 lakhs", 7_500_000.0),
];

pub const DEFAULT_AGE: f64 = 30.0;
pub const DEFAULT_INCOME: f64 = 75_000.0;
pub const DEFAULT_EXPENSES: f64 = 45_000.0;
pub const DEFAULT_SAVINGS: f64 = 500_000.0;
pub const DEFAULT_RETIREMENT_AGE: u32 = 60;

pub const IDEAL_EQUITY_MIN: f64 = 30.0;
pub const IDEAL_EQUITY_MAX: f64 = 80.0;
pub const LIFE_COVER_INCOME_MULTIPLE: f64 = 12.0;
pub const IDEAL_HEALTH_COVER: f64 = 1_500_000.0;
pub const IDEAL_EMERGENCY_MONTHS: u32 = 6;
const HIGH_REAL_ESTATE_PERCENT: f64 = 50.0;

/// `100 - age` shifted ten points by risk profile, clamped to 30..=80.
pub fn calculate_ideal_equity_percent(age: f64, risk_profile: RiskProfile) -> f64 {
    let adjustment = match risk_profile {
        RiskProfile::Conservative => -10.0,
        RiskProfile::Moderate => 0.0,
        RiskProfile::Aggressive => 10.0,
    };
    (100.0 - age + adjustment).clamp(IDEAL_EQUITY_MIN, IDEAL_EQUITY_MAX)
}

/// Midpoint estimates derived from the bucketed first-stage answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage1Estimates {
    pub age: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub savings: f64,
}

impl Stage1Estimates {
    pub fn from_answers(stage1: &Stage1Answers) -> Self {
        Self {
            age: bucket_midpoint(&AGE_MIDPOINTS, Some(stage1.age.as_str()), DEFAULT_AGE),
            monthly_income: bucket_midpoint(
                &INCOME_MIDPOINTS,
                Some(stage1.monthly_income.as_str()),
                DEFAULT_INCOME,
            ),
            monthly_expenses: bucket_midpoint(
                &EXPENSE_MIDPOINTS,
                Some(stage1.monthly_expenses.as_str()),
                DEFAULT_EXPENSES,
            ),
            savings: bucket_midpoint(
                &SAVINGS_MIDPOINTS,
                Some(stage1.total_savings.as_str()),
                DEFAULT_SAVINGS,
            ),
        }
    }
}

/// The single record every Ignite metric is computed from.
///
/// Detailed second-stage figures take precedence wherever they are present and
/// nonzero; otherwise the first-stage bucket estimates stand in. Assets fall back
/// as a whole: if no asset line was entered, estimated savings replace both the
/// total and the liquid figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub total_emis: f64,
    pub total_assets: f64,
    pub liquid_assets: f64,
    pub equity_assets: f64,
    pub real_estate: f64,
    pub total_liabilities: f64,
    pub life_cover: f64,
    pub health_cover: f64,
    pub emergency_months: u32,
    pub risk_profile: RiskProfile,
    pub has_personal_loan: bool,
    pub has_rsu: bool,
}

impl EffectiveInputs {
    pub fn merge(data: &IgniteUserData) -> Self {
        let estimates = Stage1Estimates::from_answers(&data.stage1);
        let s2 = &data.stage2;

        let primary_income = if s2.exact_monthly_income != 0.0 {
            s2.exact_monthly_income
        } else {
            estimates.monthly_income
        };
        let secondary_income = if s2.has_secondary_income {
            s2.secondary_income_amount
        } else {
            0.0
        };

        let rsu = if s2.has_rsu { s2.rsu_value } else { 0.0 };
        let liquid_entered =
            s2.equity_mf + s2.fixed_income + s2.epf_ppf_nps + s2.gold_assets + s2.cash_savings + rsu;
        let assets_entered = liquid_entered + s2.real_estate;
        let (total_assets, liquid_assets) = if assets_entered > 0.0 {
            (assets_entered, liquid_entered)
        } else {
            (estimates.savings, estimates.savings)
        };

        let total_emis = s2.home_loan_emi + s2.car_loan_emi + s2.personal_loan_emi + s2.other_emis;
        let monthly_expenses = estimates.monthly_expenses + total_emis;

        let emergency_months = if s2.emergency_fund_months != 0 {
            s2.emergency_fund_months
        } else if s2.cash_savings > 0.0 && monthly_expenses > 0.0 {
            (s2.cash_savings / monthly_expenses).floor() as u32
        } else {
            0
        };

        let retirement_age = if s2.retirement_age != 0 {
            s2.retirement_age
        } else {
            DEFAULT_RETIREMENT_AGE
        };

        Self {
            current_age: estimates.age as u32,
            retirement_age,
            monthly_income: primary_income + secondary_income,
            monthly_expenses,
            total_emis,
            total_assets,
            liquid_assets,
            equity_assets: s2.equity_mf + rsu,
            real_estate: s2.real_estate,
            total_liabilities: s2.home_loan_outstanding
                + s2.car_loan_outstanding
                + s2.personal_loan_outstanding
                + s2.credit_card_debt,
            life_cover: s2.term_life_cover,
            health_cover: s2.health_cover,
            emergency_months,
            risk_profile: s2.risk_profile,
            has_personal_loan: s2.personal_loan_outstanding > 0.0,
            has_rsu: s2.has_rsu,
        }
    }
}

pub fn calculate_ignite_metrics(data: &IgniteUserData) -> IgniteMetrics {
    compute_metrics(&EffectiveInputs::merge(data))
}

pub fn compute_metrics(inputs: &EffectiveInputs) -> IgniteMetrics {
    let current_age = f64::from(inputs.current_age);
    let retirement_age = f64::from(inputs.retirement_age);
    let years_to_retirement = inputs.retirement_age.saturating_sub(inputs.current_age);

    let monthly_surplus = inputs.monthly_income - inputs.monthly_expenses;
    let savings_rate = if inputs.monthly_income > 0.0 {
        monthly_surplus / inputs.monthly_income
    } else {
        0.0
    };

    let ideal_equity_percent = calculate_ideal_equity_percent(current_age, inputs.risk_profile);
    let projected = calculate_retirement_corpus(
        inputs.total_assets,
        monthly_surplus.max(0.0),
        f64::from(years_to_retirement),
        ideal_equity_percent,
    );
    let required = calculate_required_corpus(inputs.monthly_expenses, current_age, retirement_age);
    let ratio = projected / required;
    let readiness = if required > 0.0 && ratio.is_finite() {
        (ratio * 100.0).min(100.0)
    } else {
        0.0
    };

    let share_of_assets = |amount: f64| {
        if inputs.total_assets > 0.0 {
            amount / inputs.total_assets * 100.0
        } else {
            0.0
        }
    };
    let current_equity_percent = share_of_assets(inputs.equity_assets);
    let real_estate_concentration = share_of_assets(inputs.real_estate);
    let equity_alignment_gap = current_equity_percent - ideal_equity_percent;

    let ideal_life_cover = inputs.monthly_income * 12.0 * LIFE_COVER_INCOME_MULTIPLE;
    let life_cover_gap = (ideal_life_cover - inputs.life_cover).max(0.0);
    let health_cover_gap = (IDEAL_HEALTH_COVER - inputs.health_cover).max(0.0);

    let wealth_score = [
        score_savings_rate(savings_rate),
        score_emergency_ratio(
            f64::from(inputs.emergency_months) / f64::from(IDEAL_EMERGENCY_MONTHS),
        ),
        score_allocation_gap(equity_alignment_gap.abs()),
        score_life_cover_gap(life_cover_gap),
        score_health_cover_gap(health_cover_gap),
        score_real_estate_concentration(real_estate_concentration),
        score_retirement_readiness(readiness),
    ]
    .iter()
    .sum::<u32>()
    .min(100);

    IgniteMetrics {
        wealth_score,
        total_assets: inputs.total_assets,
        total_liabilities: inputs.total_liabilities,
        net_worth: inputs.total_assets - inputs.total_liabilities,
        liquid_net_worth: inputs.liquid_assets - inputs.total_liabilities,
        total_monthly_income: inputs.monthly_income,
        total_monthly_expenses: inputs.monthly_expenses,
        total_emis: inputs.total_emis,
        monthly_surplus,
        savings_rate,
        current_age: inputs.current_age,
        retirement_age: inputs.retirement_age,
        years_to_retirement,
        projected_corpus_at_retirement: projected,
        required_corpus_at_retirement: required,
        retirement_gap: required - projected,
        retirement_readiness_percent: readiness,
        current_equity_percent,
        ideal_equity_percent,
        equity_alignment_gap,
        real_estate_concentration,
        ideal_life_cover,
        current_life_cover: inputs.life_cover,
        life_cover_gap,
        ideal_health_cover: IDEAL_HEALTH_COVER,
        current_health_cover: inputs.health_cover,
        health_cover_gap,
        emergency_months: inputs.emergency_months,
        ideal_emergency_months: IDEAL_EMERGENCY_MONTHS,
        risk_profile: inputs.risk_profile,
        has_personal_loan: inputs.has_personal_loan,
        has_rsu: inputs.has_rsu,
        high_real_estate_concentration: real_estate_concentration > HIGH_REAL_ESTATE_PERCENT,
    }
}

// Sub-score maxima: 25, 15, 20, 12, 8, 10, 10.

fn score_savings_rate(rate: f64) -> u32 {
    if rate >= 0.4 {
        25
    } else if rate >= 0.3 {
        22
    } else if rate >= 0.2 {
        18
    } else if rate >= 0.1 {
        12
    } else if rate >= 0.05 {
        8
    } else if rate > 0.0 {
        4
    } else {
        0
    }
}

fn score_emergency_ratio(ratio: f64) -> u32 {
    if ratio >= 1.0 {
        15
    } else if ratio >= 0.75 {
        12
    } else if ratio >= 0.5 {
        8
    } else if ratio >= 0.25 {
        4
    } else {
        2
    }
}

fn score_allocation_gap(gap: f64) -> u32 {
    if gap <= 5.0 {
        20
    } else if gap <= 10.0 {
        16
    } else if gap <= 20.0 {
        12
    } else if gap <= 30.0 {
        8
    } else {
        4
    }
}

fn score_life_cover_gap(gap: f64) -> u32 {
    if gap <= 0.0 {
        12
    } else if gap <= 2_000_000.0 {
        9
    } else if gap <= 5_000_000.0 {
        6
    } else {
        2
    }
}

fn score_health_cover_gap(gap: f64) -> u32 {
    if gap <= 0.0 {
        8
    } else if gap <= 500_000.0 {
        6
    } else {
        2
    }
}

fn score_real_estate_concentration(percent: f64) -> u32 {
    if percent <= 30.0 {
        10
    } else if percent <= 50.0 {
        7
    } else if percent <= 70.0 {
        4
    } else {
        2
    }
}

fn score_retirement_readiness(percent: f64) -> u32 {
    if percent >= 100.0 {
        10
    } else if percent >= 80.0 {
        8
    } else if percent >= 60.0 {
        6
    } else if percent >= 40.0 {
        4
    } else {
        2
    }
}

const TEASER_RETIREMENT_AGE: f64 = 60.0;
const TEASER_GROWTH: f64 = 0.10;
const TEASER_CORPUS_MULTIPLE: f64 = 25.0;

/// Coarse preview from first-stage answers alone.
///
/// Uses its own tiers and weights (30/25/20 plus insurance and behaviour
/// bonuses) and a flat 10% growth with a 25x expenses target, so it does not
/// agree with [`calculate_ignite_metrics`] on the same answers.
pub fn calculate_teaser_score(stage1: &Stage1Answers) -> TeaserScore {
    let estimates = Stage1Estimates::from_answers(stage1);
    let income = estimates.monthly_income;
    let expenses = estimates.monthly_expenses;
    let savings = estimates.savings;

    let savings_rate = if income > 0.0 {
        (income - expenses) / income
    } else {
        0.0
    };

    let years = TEASER_RETIREMENT_AGE - estimates.age;
    let projected = savings * (1.0 + TEASER_GROWTH).powf(years);
    let required = expenses * 12.0 * TEASER_CORPUS_MULTIPLE;
    let retirement_readiness = if required > 0.0 {
        (projected / required * 100.0).min(100.0)
    } else {
        0.0
    };

    let rate_points = if savings_rate >= 0.3 {
        30
    } else if savings_rate >= 0.2 {
        22
    } else if savings_rate >= 0.1 {
        14
    } else {
        6
    };
    let savings_points = if savings >= 2_500_000.0 {
        25
    } else if savings >= 1_000_000.0 {
        18
    } else if savings >= 500_000.0 {
        12
    } else {
        6
    };
    let readiness_points = if retirement_readiness >= 60.0 {
        20
    } else if retirement_readiness >= 40.0 {
        14
    } else if retirement_readiness >= 20.0 {
        8
    } else {
        4
    };
    let insurance_points = match stage1.insurance {
        InsuranceStatus::HealthAndTerm => 15,
        InsuranceStatus::OnlyOne => 8,
        InsuranceStatus::Uninsured => 0,
    };
    let behavior_points = match stage1.market_behavior {
        MarketBehavior::BuyingOpportunity => 10,
        MarketBehavior::NervousHold => 6,
        MarketBehavior::PanicSell => 0,
    };

    let score: u32 =
        rate_points + savings_points + readiness_points + insurance_points + behavior_points;

    TeaserScore {
        estimated_score: score.min(100),
        estimated_net_worth: savings,
        savings_rate,
        retirement_readiness,
    }
}
