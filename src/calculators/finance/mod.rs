//! Financial calculators
//!
//! Rates are entered as percentages (4.5 means 4.5 %). Money outputs are
//! tagged [`OutputKind::Currency`](crate::models::OutputKind) and rounded
//! only by the presenter.

mod bond;
mod depreciation;
mod enterprise_value;
mod fra;
mod inflation;
mod npv;
mod price_to_rent;
mod sensitivity;
mod swap_spread;

pub use bond::{bond_metrics, BondDuration, BondMetrics};
pub use depreciation::{
    DecliningBalanceDepreciation, StraightLineDepreciation, SumOfYearsDigitsDepreciation,
};
pub use enterprise_value::EnterpriseValue;
pub use fra::{ForwardRateAgreement, LONG_TO_SHORT, NO_PAYMENT, SHORT_TO_LONG};
pub use inflation::Inflation;
pub use npv::{NetPresentValue, MAX_CASH_FLOWS};
pub use price_to_rent::PriceToRent;
pub use sensitivity::{sweep_steps, SensitivityAnalysis, MAX_STEPS};
pub use swap_spread::{spread_bps, SwapSpread};
