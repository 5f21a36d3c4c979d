use crate::error::AppError;
use config::{Config as Cfg, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Tax applied by the quote aggregator.
#[derive(Debug, Deserialize, Clone)]
pub struct TaxSettings {
    #[serde(default = "default_tax_enabled")]
    pub enabled: bool,

    /// VAT percentage, e.g. 19 for the German regular rate.
    #[serde(default = "default_tax_rate")]
    pub rate_percent: Decimal,
}

impl Default for TaxSettings {
    fn default() -> Self {
        Self {
            enabled: default_tax_enabled(),
            rate_percent: default_tax_rate(),
        }
    }
}

/// Flat fees for the extra services a quote can toggle on.
#[derive(Debug, Deserialize, Clone)]
pub struct SurchargeSettings {
    #[serde(default = "default_certification_fee")]
    pub certification: Decimal,

    #[serde(default = "default_apostille_fee")]
    pub apostille: Decimal,

    #[serde(default = "default_express_fee")]
    pub express: Decimal,

    #[serde(default = "default_classification_fee")]
    pub classification: Decimal,

    /// Per-copy price; the copy surcharge is `copies * copy_price`.
    #[serde(default = "default_copy_price")]
    pub copy_price: Decimal,
}

impl Default for SurchargeSettings {
    fn default() -> Self {
        Self {
            certification: default_certification_fee(),
            apostille: default_apostille_fee(),
            express: default_express_fee(),
            classification: default_classification_fee(),
            copy_price: default_copy_price(),
        }
    }
}

/// Document number prefixes, one per series.
#[derive(Debug, Deserialize, Clone)]
pub struct NumberingSettings {
    #[serde(default = "default_invoice_prefix")]
    pub invoice_prefix: String,

    #[serde(default = "default_credit_note_prefix")]
    pub credit_note_prefix: String,
}

impl Default for NumberingSettings {
    fn default() -> Self {
        Self {
            invoice_prefix: default_invoice_prefix(),
            credit_note_prefix: default_credit_note_prefix(),
        }
    }
}

/// Payment terms applied at issuance.
#[derive(Debug, Deserialize, Clone)]
pub struct PaymentSettings {
    /// Days between issue date and due date.
    #[serde(default = "default_due_days")]
    pub due_days: u32,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            due_days: default_due_days(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub tax: TaxSettings,

    #[serde(default)]
    pub surcharges: SurchargeSettings,

    #[serde(default)]
    pub numbering: NumberingSettings,

    #[serde(default)]
    pub payments: PaymentSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            tax: TaxSettings::default(),
            surcharges: SurchargeSettings::default(),
            numbering: NumberingSettings::default(),
            payments: PaymentSettings::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tax_enabled() -> bool {
    true
}

fn default_tax_rate() -> Decimal {
    Decimal::new(19, 0)
}

fn default_certification_fee() -> Decimal {
    Decimal::new(500, 2)
}

fn default_apostille_fee() -> Decimal {
    Decimal::new(2500, 2)
}

fn default_express_fee() -> Decimal {
    Decimal::new(1500, 2)
}

fn default_classification_fee() -> Decimal {
    Decimal::new(750, 2)
}

fn default_copy_price() -> Decimal {
    Decimal::new(200, 2)
}

fn default_invoice_prefix() -> String {
    "RE".to_string()
}

fn default_credit_note_prefix() -> String {
    "GS".to_string()
}

fn default_due_days() -> u32 {
    14
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
