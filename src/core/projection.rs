use super::types::SalaryProjectionPoint;

pub const EQUITY_RETURN: f64 = 0.12;
pub const DEBT_RETURN: f64 = 0.07;
pub const INFLATION: f64 = 0.06;
pub const SAFE_WITHDRAWAL_RATE: f64 = 0.04;
pub const DEFAULT_TARGET_AGE: u32 = 60;

/// Annual return of an equity/debt mix, `equity_percent` in 0..=100.
pub fn blended_return(equity_percent: f64) -> f64 {
    let equity_share = equity_percent / 100.0;
    equity_share * EQUITY_RETURN + (1.0 - equity_share) * DEBT_RETURN
}

/// Corpus at retirement: current savings compounded annually plus monthly
/// contributions treated as an annuity due at `annual / 12` per month.
pub fn calculate_retirement_corpus(
    current_savings: f64,
    monthly_surplus: f64,
    years_to_retirement: f64,
    equity_percent: f64,
) -> f64 {
    let annual_rate = blended_return(equity_percent);
    let fv_savings = current_savings * (1.0 + annual_rate).powf(years_to_retirement);

    let monthly_rate = annual_rate / 12.0;
    let months = years_to_retirement * 12.0;
    let fv_contributions = if monthly_rate == 0.0 {
        monthly_surplus * months
    } else {
        monthly_surplus * (((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate)
            * (1.0 + monthly_rate)
    };

    fv_savings + fv_contributions
}

/// Corpus needed to fund today's expenses, inflated to retirement, at the safe
/// withdrawal rate. A retirement age below the current age deflates instead.
pub fn calculate_required_corpus(
    current_monthly_expenses: f64,
    current_age: f64,
    retirement_age: f64,
) -> f64 {
    let years = retirement_age - current_age;
    let annual_expenses_at_retirement =
        current_monthly_expenses * 12.0 * (1.0 + INFLATION).powf(years);
    annual_expenses_at_retirement / SAFE_WITHDRAWAL_RATE
}

/// Year-by-year projection from `current_age` to `target_age` inclusive.
///
/// Each point records the corpus at the start of that year; the year's savings
/// are then added and the total compounds at the blended return before the
/// salary increment applies to the next year.
pub fn simulate_salary_increments(
    current_age: u32,
    current_monthly_salary: f64,
    current_corpus: f64,
    savings_rate: f64,
    annual_increment_rate: f64,
    equity_percent: f64,
    target_age: u32,
) -> Vec<SalaryProjectionPoint> {
    let growth = blended_return(equity_percent);
    let mut salary = current_monthly_salary * 12.0;
    let mut corpus = current_corpus;

    let mut points = Vec::with_capacity(target_age.saturating_sub(current_age) as usize + 1);
    for age in current_age..=target_age {
        let savings = salary * savings_rate;
        points.push(SalaryProjectionPoint {
            year: age - current_age,
            age,
            salary,
            savings,
            corpus: corpus.round(),
        });

        corpus = (corpus + savings) * (1.0 + growth);
        salary *= 1.0 + annual_increment_rate;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_relative(actual: f64, expected: f64, tol: f64) {
        assert!(
            ((actual - expected) / expected).abs() <= tol,
            "expected {expected}, got {actual}, relative tolerance {tol}"
        );
    }

    #[test]
    fn blended_return_interpolates_between_debt_and_equity() {
        assert_approx(blended_return(0.0), 0.07);
        assert_approx(blended_return(100.0), 0.12);
        assert_approx(blended_return(60.0), 0.10);
    }

    #[test]
    fn oracle_corpus_without_contributions_compounds_annually() {
        // 60% equity -> 10%: 100,000 * 1.1^2 = 121,000
        assert_approx(calculate_retirement_corpus(100_000.0, 0.0, 2.0, 60.0), 121_000.0);
    }

    #[test]
    fn oracle_corpus_contributions_are_annuity_due() {
        // 60% equity -> 10% annual, r = 0.1/12 monthly, 12 months of 1,000
        let r: f64 = 0.1 / 12.0;
        let expected = 1_000.0 * ((1.0 + r).powi(12) - 1.0) / r * (1.0 + r);
        assert_approx(calculate_retirement_corpus(0.0, 1_000.0, 1.0, 60.0), expected);
        assert_relative(expected, 12_670.3, 1e-4);
    }

    #[test]
    fn zero_years_returns_current_savings() {
        assert_approx(calculate_retirement_corpus(500_000.0, 20_000.0, 0.0, 50.0), 500_000.0);
    }

    #[test]
    fn oracle_required_corpus_inflates_then_divides_by_withdrawal_rate() {
        // 50,000/month for 10 years at 6%: 600,000 * 1.06^10 / 0.04
        let expected = 600_000.0 * 1.06_f64.powi(10) / 0.04;
        assert_approx(calculate_required_corpus(50_000.0, 30.0, 40.0), expected);
        assert_approx(calculate_required_corpus(50_000.0, 40.0, 40.0), 15_000_000.0);
    }

    #[test]
    fn simulator_records_before_growth() {
        let points = simulate_salary_increments(30, 100_000.0, 1_000_000.0, 0.2, 0.1, 60.0, 32);
        assert_eq!(points.len(), 3);

        assert_eq!(points[0].year, 0);
        assert_eq!(points[0].age, 30);
        assert_approx(points[0].salary, 1_200_000.0);
        assert_approx(points[0].savings, 240_000.0);
        assert_approx(points[0].corpus, 1_000_000.0);

        // (1,000,000 + 240,000) * 1.1 = 1,364,000
        assert_eq!(points[1].age, 31);
        assert_approx(points[1].salary, 1_320_000.0);
        assert_approx(points[1].savings, 264_000.0);
        assert_approx(points[1].corpus, 1_364_000.0);

        // (1,364,000 + 264,000) * 1.1 = 1,790,800
        assert_approx(points[2].corpus, 1_790_800.0);
        assert_approx(points[2].salary, 1_452_000.0);
    }

    #[test]
    fn simulator_covers_thirty_one_years_to_sixty() {
        let points = simulate_salary_increments(
            30,
            80_000.0,
            500_000.0,
            0.3,
            0.08,
            70.0,
            DEFAULT_TARGET_AGE,
        );
        assert_eq!(points.len(), 31);
        assert_eq!(points.first().map(|p| p.age), Some(30));
        assert_eq!(points.last().map(|p| p.age), Some(60));
        assert_eq!(points.last().map(|p| p.year), Some(30));
    }

    #[test]
    fn simulator_is_empty_when_target_is_behind_current_age() {
        assert!(simulate_salary_increments(61, 1.0, 1.0, 0.1, 0.1, 50.0, 60).is_empty());
    }

    #[test]
    fn simulator_is_restartable() {
        let a = simulate_salary_increments(28, 90_000.0, 300_000.0, 0.25, 0.07, 65.0, 55);
        let b = simulate_salary_increments(28, 90_000.0, 300_000.0, 0.25, 0.07, 65.0, 55);
        assert_eq!(a, b);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_simulator_corpus_is_non_decreasing(
            current_age in 18u32..60,
            span in 0u32..40,
            salary in 1u32..1_000_000,
            corpus in 0u32..50_000_000,
            savings_bp in 1u32..8_000,
            increment_bp in 0u32..2_000,
            equity in 0u32..=100
        ) {
            let target_age = current_age + span;
            let points = simulate_salary_increments(
                current_age,
                salary as f64,
                corpus as f64,
                savings_bp as f64 / 10_000.0,
                increment_bp as f64 / 10_000.0,
                equity as f64,
                target_age,
            );
            prop_assert_eq!(points.len() as u32, span + 1);
            for (i, pair) in points.windows(2).enumerate() {
                prop_assert_eq!(pair[0].age + 1, pair[1].age);
                prop_assert_eq!(pair[0].year, i as u32);
                prop_assert!(pair[1].corpus >= pair[0].corpus);
            }
        }

        #[test]
        fn prop_more_surplus_never_shrinks_corpus(
            savings in 0u32..10_000_000,
            surplus in 0u32..200_000,
            extra in 0u32..200_000,
            years in 0u32..40,
            equity in 0u32..=100
        ) {
            let base = calculate_retirement_corpus(savings as f64, surplus as f64, years as f64, equity as f64);
            let more = calculate_retirement_corpus(
                savings as f64,
                (surplus + extra) as f64,
                years as f64,
                equity as f64,
            );
            prop_assert!(more >= base);
        }
    }
}
