//! Lead capture: snapshots of a scoring result plus contact details, handed to
//! a [`LeadSink`]. Scoring never depends on a sink succeeding.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::{
    IgniteMetrics, RiskProfile, ScoreResult, WealthScoreResult, income_bracket,
    investable_bracket,
};

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("invalid contact: {0}")]
    InvalidContact(String),

    #[error("failed to serialise lead: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("lead sink rejected submission: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Contact {
    /// Trims every field, drops a blank phone and requires a name and a plausible email.
    pub fn normalized(self) -> Result<Self, LeadError> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        if name.is_empty() {
            return Err(LeadError::InvalidContact("name is required".into()));
        }
        if !email.contains('@') {
            return Err(LeadError::InvalidContact(
                "a valid email address is required".into(),
            ));
        }
        let phone = self
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        Ok(Self { name, email, phone })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizLead {
    #[serde(flatten)]
    pub contact: Contact,
    pub score: u32,
    pub equity_percent: f64,
    pub debt_percent: f64,
    pub gold_percent: f64,
    pub emergency_required: f64,
    pub interested: bool,
}

impl QuizLead {
    pub fn new(contact: Contact, result: &ScoreResult, interested: bool) -> Self {
        Self {
            contact,
            score: result.score,
            equity_percent: result.allocation.equity,
            debt_percent: result.allocation.debt,
            gold_percent: result.allocation.gold,
            emergency_required: result.emergency_required,
            interested,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeepLead {
    #[serde(flatten)]
    pub contact: Contact,
    pub wealth_score: u32,
    /// Whole percent.
    pub savings_rate: i64,
    pub net_worth: i64,
    pub allocation_gap: i64,
}

impl DeepLead {
    pub fn new(contact: Contact, result: &WealthScoreResult) -> Self {
        Self {
            contact,
            wealth_score: result.total_score,
            savings_rate: (result.savings_rate_pct * 100.0).round() as i64,
            net_worth: result.net_worth.round() as i64,
            allocation_gap: result.allocation_gap.round() as i64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IgniteLead {
    #[serde(flatten)]
    pub contact: Contact,
    pub wealth_score: u32,
    pub net_worth: i64,
    pub liquid_net_worth: i64,
    pub retirement_gap: i64,
    pub savings_rate: i64,
    pub life_cover_gap: i64,
    pub health_cover_gap: i64,
    pub equity_alignment: i64,
    pub emergency_months: u32,
    pub risk_profile: RiskProfile,
    pub investable_bracket: &'static str,
    pub income_bracket: &'static str,
    pub has_rsu: bool,
    pub has_personal_loan: bool,
    pub real_estate_concentration: i64,
    #[serde(rename = "interested_1to1")]
    pub interested_one_to_one: bool,
}

impl IgniteLead {
    pub fn new(contact: Contact, metrics: &IgniteMetrics) -> Self {
        let whole = |value: f64| value.round() as i64;
        Self {
            contact,
            wealth_score: metrics.wealth_score,
            net_worth: whole(metrics.net_worth),
            liquid_net_worth: whole(metrics.liquid_net_worth),
            retirement_gap: whole(metrics.retirement_gap),
            savings_rate: whole(metrics.savings_rate * 100.0),
            life_cover_gap: whole(metrics.life_cover_gap),
            health_cover_gap: whole(metrics.health_cover_gap),
            equity_alignment: whole(metrics.equity_alignment_gap),
            emergency_months: metrics.emergency_months,
            risk_profile: metrics.risk_profile,
            investable_bracket: investable_bracket(metrics.liquid_net_worth),
            income_bracket: income_bracket(metrics.total_monthly_income),
            has_rsu: metrics.has_rsu,
            has_personal_loan: metrics.has_personal_loan,
            real_estate_concentration: whole(metrics.real_estate_concentration),
            interested_one_to_one: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Lead {
    Quiz(QuizLead),
    Deep(DeepLead),
    Ignite(IgniteLead),
}

impl Lead {
    /// Storage collection the lead belongs in.
    pub fn collection(&self) -> &'static str {
        match self {
            Lead::Quiz(_) => "leads",
            Lead::Deep(_) => "deep_assessment_leads",
            Lead::Ignite(_) => "detailed_leads",
        }
    }

    pub fn contact(&self) -> &Contact {
        match self {
            Lead::Quiz(lead) => &lead.contact,
            Lead::Deep(lead) => &lead.contact,
            Lead::Ignite(lead) => &lead.contact,
        }
    }
}

pub trait LeadSink: Send + Sync {
    fn submit(&self, lead: &Lead) -> Result<(), LeadError>;
}

/// Emits each lead as a structured log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLeadSink;

impl LeadSink for TracingLeadSink {
    fn submit(&self, lead: &Lead) -> Result<(), LeadError> {
        let record = serde_json::to_string(lead)?;
        info!(collection = lead.collection(), %record, "lead captured");
        Ok(())
    }
}

/// Keeps leads in memory.
#[derive(Debug, Default)]
pub struct MemoryLeadSink {
    leads: Mutex<Vec<Lead>>,
}

impl MemoryLeadSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leads(&self) -> Vec<Lead> {
        match self.leads.lock() {
            Ok(leads) => leads.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LeadSink for MemoryLeadSink {
    fn submit(&self, lead: &Lead) -> Result<(), LeadError> {
        let mut leads = self
            .leads
            .lock()
            .map_err(|_| LeadError::Rejected("lead store is poisoned".into()))?;
        leads.push(lead.clone());
        Ok(())
    }
}
