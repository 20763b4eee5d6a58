use super::parse::parse_numeric_or_zero;
use super::types::{DeepFormData, JobStability, WealthPillarScores, WealthScoreResult};

pub const SAVINGS_RATE_MAX: u32 = 25;
pub const EMERGENCY_FUND_MAX: u32 = 15;
pub const ALLOCATION_SUITABILITY_MAX: u32 = 20;
pub const PROTECTION_MAX: u32 = 15;
pub const DIVERSIFICATION_MAX: u32 = 15;
pub const STABILITY_MAX: u32 = 10;

const IDEAL_EQUITY_CAP: f64 = 75.0;
const MIN_HEALTH_COVER: f64 = 500_000.0;
const LIFE_COVER_TARGET_MULTIPLE: f64 = 10.0;

/// Deep-form figures after permissive numeric parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeepFinancials {
    pub age: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub emi: f64,
    pub dependents: f64,
    pub job_stability: JobStability,

    pub equity: f64,
    pub fixed_income: f64,
    pub retirement_accounts: f64,
    pub gold: f64,
    pub real_estate_total: f64,
    pub primary_residence: f64,
    pub cash: f64,

    pub life_cover: f64,
    pub health_cover: f64,
    pub emergency_months: f64,
}

impl DeepFinancials {
    pub fn from_form(data: &DeepFormData) -> Self {
        let secondary = if data.has_secondary_income {
            parse_numeric_or_zero(&data.secondary_income)
        } else {
            0.0
        };
        Self {
            age: parse_numeric_or_zero(&data.age),
            monthly_income: parse_numeric_or_zero(&data.monthly_income) + secondary,
            monthly_expenses: parse_numeric_or_zero(&data.monthly_expenses),
            emi: parse_numeric_or_zero(&data.emi_amount),
            dependents: parse_numeric_or_zero(&data.dependents_count),
            job_stability: data.job_stability,
            equity: parse_numeric_or_zero(&data.equity_assets),
            fixed_income: parse_numeric_or_zero(&data.fixed_income),
            retirement_accounts: parse_numeric_or_zero(&data.epf_ppf_nps),
            gold: parse_numeric_or_zero(&data.gold_assets),
            real_estate_total: parse_numeric_or_zero(&data.real_estate_total),
            primary_residence: parse_numeric_or_zero(&data.primary_residence_value),
            cash: parse_numeric_or_zero(&data.cash_assets),
            life_cover: parse_numeric_or_zero(&data.life_coverage_amount),
            health_cover: parse_numeric_or_zero(&data.health_coverage_amount),
            emergency_months: parse_numeric_or_zero(&data.emergency_fund_months),
        }
    }

    pub fn annual_income(&self) -> f64 {
        self.monthly_income * 12.0
    }

    pub fn real_estate_non_primary(&self) -> f64 {
        (self.real_estate_total - self.primary_residence).max(0.0)
    }

    /// Every asset class including the primary residence.
    pub fn net_worth(&self) -> f64 {
        self.equity
            + self.fixed_income
            + self.retirement_accounts
            + self.gold
            + self.real_estate_total
            + self.cash
    }

    /// Assets that can be allocated; the primary residence is left out.
    pub fn investable_base(&self) -> f64 {
        self.equity
            + self.fixed_income
            + self.retirement_accounts
            + self.gold
            + self.real_estate_non_primary()
            + self.cash
    }
}

pub fn ideal_equity_percent(age: f64) -> f64 {
    (100.0 - age).min(IDEAL_EQUITY_CAP)
}

pub fn calculate_wealth_score(data: &DeepFormData) -> WealthScoreResult {
    score_financials(&DeepFinancials::from_form(data))
}

pub fn score_financials(f: &DeepFinancials) -> WealthScoreResult {
    let investable_base = f.investable_base();
    let current_equity_pct = if investable_base > 0.0 {
        f.equity / investable_base * 100.0
    } else {
        0.0
    };
    let ideal_equity_pct = ideal_equity_percent(f.age);
    let allocation_gap = current_equity_pct - ideal_equity_pct;

    let savings_rate_pct = if f.monthly_income > 0.0 {
        (f.monthly_income - f.monthly_expenses - f.emi) / f.monthly_income
    } else {
        0.0
    };
    let emi_ratio = if f.monthly_income > 0.0 {
        f.emi / f.monthly_income
    } else {
        0.0
    };

    let annual_income = f.annual_income();
    let life_cover_ratio = if annual_income > 0.0 {
        f.life_cover / annual_income
    } else {
        0.0
    };
    let has_protection_gap =
        life_cover_ratio < LIFE_COVER_TARGET_MULTIPLE || f.health_cover < MIN_HEALTH_COVER;

    let pillar_scores = WealthPillarScores {
        savings_rate: score_savings_rate(f.monthly_income, f.monthly_expenses, f.emi),
        emergency_fund: score_emergency_fund(f.emergency_months),
        allocation_suitability: score_allocation_suitability(f.age, current_equity_pct),
        protection: score_protection(f.life_cover, annual_income, f.health_cover),
        diversification: score_diversification(
            f.real_estate_non_primary(),
            f.gold,
            f.equity,
            investable_base,
            f.age,
        ),
        stability: score_stability(f.job_stability, emi_ratio, f.dependents),
    };

    WealthScoreResult {
        total_score: pillar_scores.total(),
        savings_rate_pct,
        net_worth: f.net_worth(),
        current_equity_pct,
        ideal_equity_pct,
        allocation_gap,
        has_protection_gap,
        life_cover_ratio,
        pillar_scores,
        recommendations: recommendations(f, &pillar_scores, savings_rate_pct, allocation_gap),
    }
}

fn score_savings_rate(income: f64, expenses: f64, emi: f64) -> u32 {
    if income <= 0.0 {
        return 0;
    }
    let rate = (income - expenses - emi) / income;
    if rate >= 0.35 {
        SAVINGS_RATE_MAX
    } else if rate >= 0.20 {
        18
    } else if rate >= 0.10 {
        10
    } else {
        5
    }
}

fn score_emergency_fund(months: f64) -> u32 {
    if months >= 6.0 {
        EMERGENCY_FUND_MAX
    } else if months >= 4.0 {
        12
    } else if months >= 2.0 {
        7
    } else {
        3
    }
}

fn score_allocation_suitability(age: f64, current_equity_pct: f64) -> u32 {
    let gap = (current_equity_pct - ideal_equity_percent(age)).abs();
    if gap <= 10.0 {
        ALLOCATION_SUITABILITY_MAX
    } else if gap <= 20.0 {
        12
    } else {
        5
    }
}

fn score_protection(life_cover: f64, annual_income: f64, health_cover: f64) -> u32 {
    let ratio = if annual_income > 0.0 {
        life_cover / annual_income
    } else {
        0.0
    };
    let base: u32 = if ratio >= 10.0 {
        PROTECTION_MAX
    } else if ratio >= 5.0 {
        10
    } else {
        5
    };
    if health_cover < MIN_HEALTH_COVER {
        base.saturating_sub(5)
    } else {
        base
    }
}

fn score_diversification(
    real_estate_non_primary: f64,
    gold: f64,
    equity: f64,
    investable_base: f64,
    age: f64,
) -> u32 {
    let mut penalty = 0;
    if investable_base > 0.0 {
        if real_estate_non_primary / investable_base > 0.60 {
            penalty += 5;
        }
        if gold / investable_base > 0.20 {
            penalty += 3;
        }
        if age < 40.0 && equity / investable_base < 0.30 {
            penalty += 5;
        }
    }
    DIVERSIFICATION_MAX.saturating_sub(penalty)
}

fn score_stability(job_stability: JobStability, emi_ratio: f64, dependents: f64) -> u32 {
    let job = match job_stability {
        JobStability::VeryStable => 5,
        JobStability::Stable => 4,
        JobStability::Moderate => 2,
        JobStability::Uncertain => 0,
    };
    let debt = if emi_ratio < 0.20 {
        3
    } else if emi_ratio < 0.35 {
        2
    } else if emi_ratio < 0.50 {
        1
    } else {
        0
    };
    let family = if dependents == 0.0 {
        2
    } else if dependents <= 2.0 {
        1
    } else {
        0
    };
    (job + debt + family).min(STABILITY_MAX)
}

const HIGH_EMI_SHARE: f64 = 0.40;

/// One candidate message per pillar, weakest three by raw score.
fn recommendations(
    f: &DeepFinancials,
    scores: &WealthPillarScores,
    savings_rate_pct: f64,
    allocation_gap: f64,
) -> Vec<String> {
    let savings_msg = if savings_rate_pct < 0.15 {
        "Improve savings discipline — automate a SIP to reach a 20%+ savings rate consistently."
    } else {
        "Fine-tune your savings rate — even a 5% increase compounded over 10 years creates significant wealth."
    };

    let emergency_msg = if f.emergency_months < 3.0 {
        "Build an emergency reserve immediately — target 6 months of expenses in a liquid fund."
    } else {
        "Strengthen your emergency buffer to 6 full months before increasing investment exposure."
    };

    let allocation_msg = if allocation_gap < -10.0 {
        "Increase equity exposure gradually — your allocation is below ideal for your age and horizon."
    } else if allocation_gap > 10.0 {
        "Rebalance toward debt or gold — your equity concentration is above your ideal range."
    } else {
        "Maintain annual portfolio rebalancing to stay within your target allocation band."
    };

    let protection_msg = "Close your protection gap — secure term life cover at 10× income and health insurance above ₹10 Lakhs.";

    let high_emi = f.monthly_income > 0.0 && f.emi / f.monthly_income > HIGH_EMI_SHARE;
    let diversification_msg = if high_emi {
        "High EMI burden detected — prioritise prepaying high-interest debt to free up monthly cash flow."
    } else {
        "Reduce asset concentration — spread investments across equity, debt, and gold for resilience."
    };

    let stability_msg = "Build income stability — develop a secondary income stream or upskill to reduce career risk.";

    let mut candidates = [
        (scores.savings_rate, savings_msg),
        (scores.emergency_fund, emergency_msg),
        (scores.allocation_suitability, allocation_msg),
        (scores.protection, protection_msg),
        (scores.diversification, diversification_msg),
        (scores.stability, stability_msg),
    ];
    candidates.sort_by_key(|(score, _)| *score);

    candidates
        .iter()
        .take(3)
        .map(|(_, msg)| msg.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn form(fields: &[(&str, &str)]) -> DeepFormData {
        let mut data = DeepFormData::default();
        for (key, value) in fields {
            let value = value.to_string();
            match *key {
                "age" => data.age = value,
                "monthlyIncome" => data.monthly_income = value,
                "secondaryIncome" => data.secondary_income = value,
                "dependentsCount" => data.dependents_count = value,
                "monthlyExpenses" => data.monthly_expenses = value,
                "emiAmount" => data.emi_amount = value,
                "equityAssets" => data.equity_assets = value,
                "fixedIncome" => data.fixed_income = value,
                "epfPpfNps" => data.epf_ppf_nps = value,
                "goldAssets" => data.gold_assets = value,
                "realEstateTotal" => data.real_estate_total = value,
                "primaryResidenceValue" => data.primary_residence_value = value,
                "cashAssets" => data.cash_assets = value,
                "lifeCoverageAmount" => data.life_coverage_amount = value,
                "healthCoverageAmount" => data.health_coverage_amount = value,
                "emergencyFundMonths" => data.emergency_fund_months = value,
                other => panic!("unknown field {other}"),
            }
        }
        data
    }

    fn healthy_form() -> DeepFormData {
        let mut data = form(&[
            ("age", "32"),
            ("monthlyIncome", "150000"),
            ("dependentsCount", "0"),
            ("monthlyExpenses", "60000"),
            ("emiAmount", "10000"),
            ("equityAssets", "1700000"),
            ("fixedIncome", "500000"),
            ("epfPpfNps", "300000"),
            ("goldAssets", "200000"),
            ("realEstateTotal", "5000000"),
            ("primaryResidenceValue", "5000000"),
            ("cashAssets", "300000"),
            ("lifeCoverageAmount", "20000000"),
            ("healthCoverageAmount", "1000000"),
            ("emergencyFundMonths", "6"),
        ]);
        data.job_stability = JobStability::VeryStable;
        data
    }

    #[test]
    fn empty_form_resolves_through_zero_guards() {
        let result = calculate_wealth_score(&DeepFormData::default());
        assert_eq!(
            result.pillar_scores,
            WealthPillarScores {
                savings_rate: 0,
                emergency_fund: 3,
                allocation_suitability: 5,
                protection: 0,
                diversification: 15,
                stability: 7,
            }
        );
        assert_eq!(result.total_score, 30);
        assert_eq!(result.net_worth, 0.0);
        assert_eq!(result.savings_rate_pct, 0.0);
        assert_eq!(result.ideal_equity_pct, 75.0);
        assert_eq!(result.allocation_gap, -75.0);
        assert!(result.has_protection_gap);
        assert_eq!(
            result.recommendations,
            vec![
                "Improve savings discipline — automate a SIP to reach a 20%+ savings rate consistently.",
                "Close your protection gap — secure term life cover at 10× income and health insurance above ₹10 Lakhs.",
                "Build an emergency reserve immediately — target 6 months of expenses in a liquid fund.",
            ]
        );
    }

    #[test]
    fn healthy_form_scores_full_marks() {
        let result = calculate_wealth_score(&healthy_form());
        // investable base 3,000,000; equity 1.7M -> 56.67% vs ideal 68%
        assert_eq!(result.pillar_scores.savings_rate, 25);
        assert_eq!(result.pillar_scores.emergency_fund, 15);
        assert_eq!(result.pillar_scores.allocation_suitability, 12);
        assert_eq!(result.pillar_scores.protection, 15);
        assert_eq!(result.pillar_scores.diversification, 15);
        assert_eq!(result.pillar_scores.stability, 10);
        assert_eq!(result.total_score, 92);
        assert_eq!(result.net_worth, 8_000_000.0);
        assert!(!result.has_protection_gap);
        assert!((result.life_cover_ratio - 20_000_000.0 / 1_800_000.0).abs() < 1e-9);
    }

    #[test]
    fn primary_residence_counts_toward_net_worth_only() {
        let f = DeepFinancials::from_form(&form(&[
            ("equityAssets", "100"),
            ("realEstateTotal", "1000"),
            ("primaryResidenceValue", "800"),
        ]));
        assert_eq!(f.net_worth(), 1_100.0);
        assert_eq!(f.investable_base(), 300.0);

        let residence_exceeds_total = DeepFinancials::from_form(&form(&[
            ("realEstateTotal", "500"),
            ("primaryResidenceValue", "900"),
        ]));
        assert_eq!(residence_exceeds_total.real_estate_non_primary(), 0.0);
    }

    #[test]
    fn secondary_income_counts_only_when_flagged() {
        let mut data = form(&[("monthlyIncome", "50000"), ("secondaryIncome", "20000")]);
        assert_eq!(DeepFinancials::from_form(&data).monthly_income, 50_000.0);
        data.has_secondary_income = true;
        assert_eq!(DeepFinancials::from_form(&data).monthly_income, 70_000.0);
    }

    #[test]
    fn protection_deducts_for_thin_health_cover_with_floor() {
        assert_eq!(score_protection(1_200_000.0, 100_000.0, 500_000.0), 15);
        assert_eq!(score_protection(1_200_000.0, 100_000.0, 499_999.0), 10);
        assert_eq!(score_protection(600_000.0, 100_000.0, 0.0), 5);
        assert_eq!(score_protection(0.0, 100_000.0, 0.0), 0);
        assert_eq!(score_protection(1_000_000.0, 0.0, 1_000_000.0), 5);
    }

    #[test]
    fn diversification_penalties_stack() {
        // real estate 70%, gold 25%, equity 5% for a 30-year-old
        assert_eq!(score_diversification(70.0, 25.0, 5.0, 100.0, 30.0), 2);
        assert_eq!(score_diversification(70.0, 25.0, 5.0, 100.0, 45.0), 7);
        assert_eq!(score_diversification(0.0, 0.0, 0.0, 0.0, 25.0), 15);
    }

    #[test]
    fn stability_components_and_cap() {
        assert_eq!(score_stability(JobStability::VeryStable, 0.0, 0.0), 10);
        assert_eq!(score_stability(JobStability::Stable, 0.30, 2.0), 7);
        assert_eq!(score_stability(JobStability::Moderate, 0.45, 3.0), 3);
        assert_eq!(score_stability(JobStability::Uncertain, 0.60, 4.0), 0);
    }

    #[test]
    fn allocation_message_follows_gap_direction() {
        let mut data = healthy_form();
        data.equity_assets = "2800000".to_string();
        data.fixed_income = "0".to_string();
        data.epf_ppf_nps = "0".to_string();
        data.gold_assets = "0".to_string();
        data.cash_assets = "200000".to_string();
        let result = calculate_wealth_score(&data);
        // equity 2.8M of 3.0M = 93% vs ideal 68%
        assert!(result.allocation_gap > 10.0);
        assert_eq!(result.pillar_scores.allocation_suitability, 5);
        assert_eq!(
            result.recommendations[0],
            "Rebalance toward debt or gold — your equity concentration is above your ideal range."
        );
    }

    #[test]
    fn high_emi_burden_changes_diversification_message() {
        let mut data = healthy_form();
        data.emi_amount = "70000".to_string();
        data.monthly_expenses = "20000".to_string();
        data.gold_assets = "1000000".to_string();
        let result = calculate_wealth_score(&data);
        // allocation 5, stability 8, diversification 12 are the weakest three
        assert_eq!(result.pillar_scores.diversification, 12);
        assert!(result.recommendations.iter().any(|r| r.starts_with("High EMI burden")));
    }

    #[test]
    fn scoring_is_idempotent() {
        let data = healthy_form();
        assert_eq!(calculate_wealth_score(&data), calculate_wealth_score(&data));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_total_is_bounded_sum_of_capped_pillars(
            age in 0u32..80,
            income in 0u32..400_000,
            expenses in 0u32..400_000,
            emi in 0u32..200_000,
            dependents in 0u32..5,
            equity in 0u32..10_000_000,
            gold in 0u32..3_000_000,
            real_estate in 0u32..20_000_000,
            residence in 0u32..20_000_000,
            cash in 0u32..2_000_000,
            life in 0u32..50_000_000,
            health in 0u32..2_000_000,
            months in 0u32..13
        ) {
            let data = form(&[
                ("age", &age.to_string()),
                ("monthlyIncome", &income.to_string()),
                ("monthlyExpenses", &expenses.to_string()),
                ("emiAmount", &emi.to_string()),
                ("dependentsCount", &dependents.to_string()),
                ("equityAssets", &equity.to_string()),
                ("goldAssets", &gold.to_string()),
                ("realEstateTotal", &real_estate.to_string()),
                ("primaryResidenceValue", &residence.to_string()),
                ("cashAssets", &cash.to_string()),
                ("lifeCoverageAmount", &life.to_string()),
                ("healthCoverageAmount", &health.to_string()),
                ("emergencyFundMonths", &months.to_string()),
            ]);
            let result = calculate_wealth_score(&data);
            let p = result.pillar_scores;
            prop_assert!(result.total_score <= 100);
            prop_assert_eq!(result.total_score, p.total());
            prop_assert!(p.savings_rate <= SAVINGS_RATE_MAX);
            prop_assert!(p.emergency_fund <= EMERGENCY_FUND_MAX);
            prop_assert!(p.allocation_suitability <= ALLOCATION_SUITABILITY_MAX);
            prop_assert!(p.protection <= PROTECTION_MAX);
            prop_assert!(p.diversification <= DIVERSIFICATION_MAX);
            prop_assert!(p.stability <= STABILITY_MAX);
            prop_assert_eq!(result.recommendations.len(), 3);
        }

        #[test]
        fn prop_lower_spending_never_reduces_savings_pillar(
            income in 1u32..400_000,
            expenses in 0u32..400_000,
            emi in 0u32..200_000,
            cut in 0u32..400_000
        ) {
            let base = score_savings_rate(income as f64, expenses as f64, emi as f64);
            let improved = score_savings_rate(
                income as f64,
                expenses.saturating_sub(cut) as f64,
                emi as f64,
            );
            prop_assert!(improved >= base);
        }
    }
}
