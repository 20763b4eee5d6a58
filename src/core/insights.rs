use serde::Serialize;

use super::format::format_inr;
use super::types::IgniteMetrics;

const SAVINGS_RATE_TARGET: f64 = 0.25;
const REBALANCE_THRESHOLD: f64 = 15.0;
const ALIGNED_THRESHOLD: f64 = 10.0;
const FIRE_MULTIPLE: f64 = 25.0;
const FIRE_MONTHLY_RETURN: f64 = 0.10 / 12.0;
pub const FIRE_YEARS_UNREACHABLE: u32 = 99;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuickWin {
    pub title: &'static str,
    pub description: String,
    pub impact: &'static str,
    pub priority: Priority,
}

impl QuickWin {
    fn new(
        title: &'static str,
        description: impl Into<String>,
        impact: &'static str,
        priority: Priority,
    ) -> Self {
        Self {
            title,
            description: description.into(),
            impact,
            priority,
        }
    }
}

/// Action cards in display order; never empty.
pub fn quick_wins(metrics: &IgniteMetrics) -> Vec<QuickWin> {
    let mut wins = Vec::new();

    if metrics.savings_rate < SAVINGS_RATE_TARGET {
        wins.push(QuickWin::new(
            "Boost Savings Rate",
            format!(
                "Increase monthly savings by {} (5%)",
                format_inr(metrics.total_monthly_income * 0.05)
            ),
            "+₹12L over 10 years",
            Priority::High,
        ));
    }

    if metrics.emergency_months < metrics.ideal_emergency_months {
        let missing = f64::from(metrics.ideal_emergency_months - metrics.emergency_months);
        wins.push(QuickWin::new(
            "Build Emergency Fund",
            format!(
                "Add {} to liquid savings",
                format_inr(metrics.total_monthly_expenses * missing)
            ),
            "Financial security",
            Priority::High,
        ));
    }

    if metrics.life_cover_gap > 0.0 {
        wins.push(QuickWin::new(
            "Get Term Insurance",
            format!("Cover gap of {}", format_inr(metrics.life_cover_gap)),
            "Family protection",
            Priority::High,
        ));
    }

    if metrics.has_personal_loan {
        wins.push(QuickWin::new(
            "Clear High-Interest Debt",
            "Pay off personal loans before investing",
            "Save 12-18% interest",
            Priority::High,
        ));
    }

    if metrics.equity_alignment_gap.abs() > REBALANCE_THRESHOLD {
        let description = if metrics.equity_alignment_gap > 0.0 {
            "Reduce equity exposure to match risk profile"
        } else {
            "Increase equity allocation for better returns"
        };
        wins.push(QuickWin::new(
            "Rebalance Portfolio",
            description,
            "Risk-adjusted returns",
            Priority::Medium,
        ));
    }

    if wins.is_empty() {
        wins.push(QuickWin::new(
            "Stay the Course",
            "You're doing great! Keep up your current habits.",
            "Compound growth",
            Priority::Low,
        ));
    }

    wins
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireProjection {
    /// 25x annual expenses.
    pub fire_number: f64,
    /// Liquid net worth as a percentage of the FIRE number, capped at 100.
    pub current_progress: f64,
    pub years_to_fire: u32,
}

/// Solves `L(1+r)^n + S((1+r)^n - 1)/r = F` for whole years at 10% a year
/// compounded monthly. Without a positive surplus the target is unreachable.
pub fn fire_projection(metrics: &IgniteMetrics) -> FireProjection {
    let fire_number = metrics.total_monthly_expenses * 12.0 * FIRE_MULTIPLE;
    let current_progress = if fire_number > 0.0 {
        (metrics.liquid_net_worth / fire_number * 100.0).min(100.0)
    } else {
        0.0
    };

    let surplus = metrics.monthly_surplus;
    let r = FIRE_MONTHLY_RETURN;
    let years_to_fire = if metrics.savings_rate > 0.0 && surplus > 0.0 {
        let target = fire_number * r + surplus;
        let start = metrics.liquid_net_worth * r + surplus;
        if start > 0.0 {
            let months = (target / start).ln() / (1.0 + r).ln();
            (months / 12.0).ceil().max(0.0) as u32
        } else {
            FIRE_YEARS_UNREACHABLE
        }
    } else {
        FIRE_YEARS_UNREACHABLE
    };

    FireProjection {
        fire_number,
        current_progress,
        years_to_fire,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Milestone {
    pub title: &'static str,
    pub achieved: bool,
    pub value: String,
}

pub fn wealth_milestones(metrics: &IgniteMetrics) -> Vec<Milestone> {
    let emergency_done = metrics.emergency_months >= metrics.ideal_emergency_months;
    let insured = metrics.life_cover_gap <= 0.0 && metrics.health_cover_gap <= 0.0;
    let aligned = metrics.equity_alignment_gap.abs() <= ALIGNED_THRESHOLD;

    vec![
        Milestone {
            title: "Emergency Fund",
            achieved: emergency_done,
            value: if emergency_done {
                "Complete".to_string()
            } else {
                format!(
                    "{}/{} months",
                    metrics.emergency_months, metrics.ideal_emergency_months
                )
            },
        },
        Milestone {
            title: "Insurance Coverage",
            achieved: insured,
            value: if insured { "Adequate" } else { "Gaps exist" }.to_string(),
        },
        Milestone {
            title: "25% Savings Rate",
            achieved: metrics.savings_rate >= SAVINGS_RATE_TARGET,
            value: format!("{}%", (metrics.savings_rate * 100.0).round()),
        },
        Milestone {
            title: "Portfolio Aligned",
            achieved: aligned,
            value: if aligned { "Balanced" } else { "Needs rebalancing" }.to_string(),
        },
    ]
}

/// Liquid net worth as a whole percentage of net worth; 0 when net worth is not positive.
pub fn liquidity_ratio(metrics: &IgniteMetrics) -> f64 {
    if metrics.net_worth > 0.0 {
        (metrics.liquid_net_worth / metrics.net_worth * 100.0).round()
    } else {
        0.0
    }
}

pub fn income_bracket(monthly_income: f64) -> &'static str {
    if monthly_income < 50_000.0 {
        "Below 50K"
    } else if monthly_income < 100_000.0 {
        "50K-1L"
    } else if monthly_income < 200_000.0 {
        "1L-2L"
    } else if monthly_income < 500_000.0 {
        "2L-5L"
    } else {
        "5L+"
    }
}

pub fn investable_bracket(liquid_net_worth: f64) -> &'static str {
    if liquid_net_worth < 500_000.0 {
        "Below 5L"
    } else if liquid_net_worth < 1_000_000.0 {
        "5L-10L"
    } else if liquid_net_worth < 2_500_000.0 {
        "10L-25L"
    } else if liquid_net_worth < 5_000_000.0 {
        "25L-50L"
    } else if liquid_net_worth < 10_000_000.0 {
        "50L-1Cr"
    } else {
        "1Cr+"
    }
}

/// Everything the dashboard derives from a metrics record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgniteInsights {
    pub quick_wins: Vec<QuickWin>,
    pub fire: FireProjection,
    pub milestones: Vec<Milestone>,
    pub liquidity_ratio: f64,
    pub income_bracket: &'static str,
    pub investable_bracket: &'static str,
}

impl IgniteInsights {
    pub fn from_metrics(metrics: &IgniteMetrics) -> Self {
        Self {
            quick_wins: quick_wins(metrics),
            fire: fire_projection(metrics),
            milestones: wealth_milestones(metrics),
            liquidity_ratio: liquidity_ratio(metrics),
            income_bracket: income_bracket(metrics.total_monthly_income),
            investable_bracket: investable_bracket(metrics.liquid_net_worth),
        }
    }
}
