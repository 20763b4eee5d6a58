use super::types::{AssetAllocation, MarketBehavior};

pub const EQUITY_MIN: f64 = 35.0;
pub const EQUITY_MAX: f64 = 75.0;
pub const GOLD_FIXED: f64 = 10.0;
const PANIC_ADJUSTMENT: f64 = -15.0;
const OPPORTUNITY_ADJUSTMENT: f64 = 10.0;

/// Equity share for the basic quiz: `100 - age`, shifted by market behaviour,
/// clamped to [`EQUITY_MIN`, `EQUITY_MAX`].
pub fn calculate_equity_percent(age: f64, behavior: MarketBehavior) -> f64 {
    let adjustment = match behavior {
        MarketBehavior::PanicSell => PANIC_ADJUSTMENT,
        MarketBehavior::BuyingOpportunity => OPPORTUNITY_ADJUSTMENT,
        MarketBehavior::NervousHold => 0.0,
    };
    (100.0 - age + adjustment).clamp(EQUITY_MIN, EQUITY_MAX)
}

pub fn calculate_allocation(age: f64, behavior: MarketBehavior) -> AssetAllocation {
    let equity = calculate_equity_percent(age, behavior);
    AssetAllocation {
        equity,
        debt: 100.0 - equity - GOLD_FIXED,
        gold: GOLD_FIXED,
    }
}
