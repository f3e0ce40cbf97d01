use serde::{Deserialize, Serialize};

use billing_core::WireTimestamp;

/// Who is filling in the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub position: String,
}

/// What kind of help the user is looking for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HelpInfo {
    pub product_promotion_and_development: bool,
    pub released_game_promotion: bool,
    pub international_sales: bool,
    pub other: bool,
}

/// Inclusive numeric bracket (income, headcount).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Range {
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Monetization {
    pub paid_subscription: bool,
    pub in_game_advertising: bool,
    pub in_game_purchases: bool,
    pub premium_access: bool,
    pub other: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Platforms {
    pub pc_mac: bool,
    pub game_console: bool,
    pub mobile_device: bool,
    pub web_browser: bool,
    pub other: bool,
}

/// Company the user represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompanyInfo {
    pub company_name: String,
    pub website: String,
    pub annual_income: Option<Range>,
    pub number_of_employees: Option<Range>,
    pub kind_of_activity: String,
    pub monetization: Option<Monetization>,
    pub platforms: Option<Platforms>,
}

/// Wire entity: a user's primary onboarding profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PrimaryOnboarding {
    pub id: String,
    pub user_id: String,
    pub personal: Option<PersonalInfo>,
    pub help: Option<HelpInfo>,
    pub company: Option<CompanyInfo>,
    pub last_step: String,
    pub created_at: Option<WireTimestamp>,
    pub updated_at: Option<WireTimestamp>,
}

impl PrimaryOnboarding {
    /// All three sections have been submitted.
    pub fn is_complete(&self) -> bool {
        self.personal.is_some() && self.help.is_some() && self.company.is_some()
    }
}
