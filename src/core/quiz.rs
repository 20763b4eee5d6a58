use serde::Serialize;

use super::allocation::calculate_allocation;
use super::format::format_lakhs_crores;
use super::types::{
    InsuranceStatus, LoanStatus, MarketBehavior, PillarBreakdown, QuizAnswers, ScoreResult,
};

#[derive(Debug, Serialize)]
pub struct Question {
    pub id: u8,
    pub text: &'static str,
    pub options: &'static [&'static str],
}

pub const QUESTIONS: [Question; 8] = [
    Question {
        id: 1,
        text: "What is your age?",
        options: &["Under 25", "25-30", "30-35", "35-40", "40-45", "45+"],
    },
    Question {
        id: 2,
        text: "What is your monthly in-hand salary?",
        options: &[
            "Under ₹50,000",
            "₹50,000-1,00,000",
            "₹1,00,000-2,00,000",
            "Above ₹2,00,000",
        ],
    },
    Question {
        id: 3,
        text: "What are your average monthly expenses?",
        options: &[
            "Under ₹30,000",
            "₹30,000-60,000",
            "₹60,000-1,00,000",
            "Above ₹1,00,000",
        ],
    },
    Question {
        id: 4,
        text: "What is your total current savings (all investments + bank)?",
        options: &[
            "Under ₹5 lakhs",
            "₹5-10 lakhs",
            "₹10-25 lakhs",
            "₹25-50 lakhs",
            "Above ₹50 lakhs",
        ],
    },
    Question {
        id: 5,
        text: "Do you currently have any EMIs or loans?",
        options: &[
            "No loans",
            "Home loan only",
            "Car/Personal loan",
            "Multiple loans",
        ],
    },
    Question {
        id: 6,
        text: "Do you have health insurance and/or term life insurance?",
        options: &["Both health and term", "Only one", "None"],
    },
    Question {
        id: 7,
        text: "If markets fall 20%, what would you do?",
        options: &[
            "Panic and sell",
            "Feel nervous but hold",
            "See it as buying opportunity",
        ],
    },
    Question {
        id: 8,
        text: "What is your primary financial goal right now?",
        options: &[
            "Retirement",
            "Buy a home",
            "Kids education",
            "Financial freedom",
            "Just getting started",
        ],
    },
];

pub const AGE_MIDPOINTS: [(&str, f64); 6] = [
    ("Under 25", 22.0),
    ("25-30", 27.0),
    ("30-35", 32.0),
    ("35-40", 37.0),
    ("40-45", 42.0),
    ("45+", 50.0),
];

pub const INCOME_MIDPOINTS: [(&str, f64); 4] = [
    ("Under ₹50,000", 35_000.0),
    ("₹50,000-1,00,000", 75_000.0),
    ("₹1,00,000-2,00,000", 150_000.0),
    ("Above ₹2,00,000", 250_000.0),
];

pub const EXPENSE_MIDPOINTS: [(&str, f64); 4] = [
    ("Under ₹30,000", 20_000.0),
    ("₹30,000-60,000", 45_000.0),
    ("₹60,000-1,00,000", 80_000.0),
    ("Above ₹1,00,000", 125_000.0),
];

pub const SAVINGS_MIDPOINTS: [(&str, f64); 5] = [
    ("Under ₹5 lakhs", 250_000.0),
    ("₹5-10 lakhs", 750_000.0),
    ("₹10-25 lakhs", 1_750_000.0),
    ("₹25-50 lakhs", 3_750_000.0),
    ("Above ₹50 lakhs", 6_000_000.0),
];

pub const DEFAULT_AGE: f64 = 30.0;
pub const DEFAULT_INCOME: f64 = 75_000.0;
pub const DEFAULT_EXPENSES: f64 = 45_000.0;
pub const DEFAULT_SAVINGS: f64 = 250_000.0;

pub const SAVINGS_RATE_MAX: u32 = 25;
pub const EMERGENCY_FUND_MAX: u32 = 25;
pub const RISK_ALIGNMENT_MAX: u32 = 20;
pub const DEBT_HEALTH_MAX: u32 = 15;
pub const INSURANCE_MAX: u32 = 15;

const EMERGENCY_MONTHS_TARGET: f64 = 6.0;

/// Looks a bucket label up in a midpoint table, falling back to `default`.
pub fn bucket_midpoint(table: &[(&str, f64)], label: Option<&str>, default: f64) -> f64 {
    label
        .and_then(|label| table.iter().find(|(key, _)| *key == label))
        .map(|(_, value)| *value)
        .unwrap_or(default)
}

/// Quiz answers resolved to numbers and categories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizProfile {
    pub age: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub savings: f64,
    pub loans: LoanStatus,
    pub insurance: InsuranceStatus,
    pub behavior: MarketBehavior,
}

impl QuizProfile {
    pub fn from_answers(answers: &QuizAnswers) -> Self {
        Self {
            age: bucket_midpoint(&AGE_MIDPOINTS, answers.get(1), DEFAULT_AGE),
            monthly_income: bucket_midpoint(&INCOME_MIDPOINTS, answers.get(2), DEFAULT_INCOME),
            monthly_expenses: bucket_midpoint(
                &EXPENSE_MIDPOINTS,
                answers.get(3),
                DEFAULT_EXPENSES,
            ),
            savings: bucket_midpoint(&SAVINGS_MIDPOINTS, answers.get(4), DEFAULT_SAVINGS),
            loans: answers.get(5).map(LoanStatus::from_label).unwrap_or_default(),
            insurance: answers
                .get(6)
                .map(InsuranceStatus::from_label)
                .unwrap_or_default(),
            behavior: answers
                .get(7)
                .map(MarketBehavior::from_label)
                .unwrap_or_default(),
        }
    }
}

pub fn calculate_financial_health_score(answers: &QuizAnswers) -> ScoreResult {
    score_profile(&QuizProfile::from_answers(answers))
}

pub fn score_profile(profile: &QuizProfile) -> ScoreResult {
    let pillar_breakdown = PillarBreakdown {
        savings_rate: score_savings_rate(profile.monthly_income, profile.monthly_expenses),
        emergency_fund: score_emergency_fund(profile.savings, profile.monthly_expenses),
        risk_alignment: score_risk_alignment(profile.behavior),
        debt_health: score_debt_health(profile.loans),
        insurance: score_insurance(profile.insurance),
    };

    let emergency_required = EMERGENCY_MONTHS_TARGET * profile.monthly_expenses;

    ScoreResult {
        score: pillar_breakdown.total(),
        allocation: calculate_allocation(profile.age, profile.behavior),
        emergency_required,
        pillar_breakdown,
        action_items: action_items(&pillar_breakdown, emergency_required),
    }
}

fn score_savings_rate(income: f64, expenses: f64) -> u32 {
    if income <= 0.0 {
        return 0;
    }
    let rate = (income - expenses) / income;
    if rate >= 0.40 {
        SAVINGS_RATE_MAX
    } else if rate >= 0.25 {
        18
    } else if rate >= 0.10 {
        10
    } else if rate >= 0.0 {
        5
    } else {
        0
    }
}

fn score_emergency_fund(savings: f64, expenses: f64) -> u32 {
    if expenses <= 0.0 {
        return 2;
    }
    if savings >= 6.0 * expenses {
        EMERGENCY_FUND_MAX
    } else if savings >= 3.0 * expenses {
        15
    } else if savings >= expenses {
        8
    } else {
        2
    }
}

fn score_risk_alignment(behavior: MarketBehavior) -> u32 {
    match behavior {
        MarketBehavior::BuyingOpportunity => RISK_ALIGNMENT_MAX,
        MarketBehavior::NervousHold => 12,
        MarketBehavior::PanicSell => 5,
    }
}

fn score_debt_health(loans: LoanStatus) -> u32 {
    match loans {
        LoanStatus::NoLoans => DEBT_HEALTH_MAX,
        LoanStatus::HomeLoanOnly => 12,
        LoanStatus::CarOrPersonalLoan => 8,
        LoanStatus::MultipleLoans => 4,
    }
}

fn score_insurance(insurance: InsuranceStatus) -> u32 {
    match insurance {
        InsuranceStatus::HealthAndTerm => INSURANCE_MAX,
        InsuranceStatus::OnlyOne => 8,
        InsuranceStatus::Uninsured => 0,
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Pillar {
    SavingsRate,
    EmergencyFund,
    RiskAlignment,
    DebtHealth,
    Insurance,
}

const SAVINGS_ACTION: &str =
    "Increase your savings rate by 10% — automate a SIP to eliminate the temptation to spend.";
const RISK_ACTION: &str = "Build investing confidence — start small SIPs so market dips feel like opportunities, not threats.";
const DEBT_ACTION: &str =
    "Clear high-interest debt (personal/car loans) aggressively before increasing investments.";
const INSURANCE_ACTION: &str = "Get term life + health insurance immediately — these are your non-negotiable financial safety net.";

fn emergency_action(emergency_required: f64) -> String {
    format!(
        "Build a {} emergency buffer in a liquid fund or high-yield savings account.",
        format_lakhs_crores(emergency_required)
    )
}

/// The three pillars with the lowest score-to-max ratio, in declaration order on ties.
fn action_items(breakdown: &PillarBreakdown, emergency_required: f64) -> Vec<String> {
    let mut pillars = [
        (Pillar::SavingsRate, breakdown.savings_rate, SAVINGS_RATE_MAX),
        (Pillar::EmergencyFund, breakdown.emergency_fund, EMERGENCY_FUND_MAX),
        (Pillar::RiskAlignment, breakdown.risk_alignment, RISK_ALIGNMENT_MAX),
        (Pillar::DebtHealth, breakdown.debt_health, DEBT_HEALTH_MAX),
        (Pillar::Insurance, breakdown.insurance, INSURANCE_MAX),
    ];
    pillars.sort_by(|a, b| {
        let ratio_a = a.1 as f64 / a.2 as f64;
        let ratio_b = b.1 as f64 / b.2 as f64;
        ratio_a.total_cmp(&ratio_b)
    });

    pillars
        .iter()
        .take(3)
        .map(|(pillar, _, _)| match pillar {
            Pillar::SavingsRate => SAVINGS_ACTION.to_string(),
            Pillar::EmergencyFund => emergency_action(emergency_required),
            Pillar::RiskAlignment => RISK_ACTION.to_string(),
            Pillar::DebtHealth => DEBT_ACTION.to_string(),
            Pillar::Insurance => INSURANCE_ACTION.to_string(),
        })
        .collect()
}
