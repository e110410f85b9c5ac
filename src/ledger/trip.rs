use serde::Serialize;

use super::{round_cents, CommissionBase, LedgerSettings};

/// The raw money figures a trip is entered with.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TripFigures {
    pub total_sale: f64,
    pub amount_received: f64,
    pub expenses: f64,
    pub fuel_cost: f64,
    pub other_expenses: f64,
    /// Caller-supplied pending amount; wins over the derived one.
    pub amount_pending: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TripDerived {
    pub amount_pending: f64,
    pub net_base: f64,
    pub driver_commission: f64,
    pub company_profit: f64,
    pub total_income: f64,
}

impl TripDerived {
    /// False when an input was large enough to overflow cent arithmetic.
    pub fn is_finite(&self) -> bool {
        [
            self.amount_pending,
            self.net_base,
            self.driver_commission,
            self.company_profit,
            self.total_income,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

impl TripFigures {
    pub fn combined_expenses(&self) -> f64 {
        self.expenses + self.fuel_cost + self.other_expenses
    }
}

impl LedgerSettings {
    pub fn derive(&self, figures: &TripFigures) -> TripDerived {
        let total_income = figures.amount_received - figures.combined_expenses();

        let net_base = match self.commission_base {
            CommissionBase::Net => total_income.max(0.0),
            CommissionBase::Gross => figures.total_sale,
        };
        let driver_commission = round_cents(net_base * self.commission_rate);
        let company_profit = round_cents(net_base - driver_commission);

        let amount_pending = figures
            .amount_pending
            .unwrap_or(figures.total_sale - figures.amount_received);

        TripDerived {
            amount_pending: round_cents(amount_pending),
            net_base: round_cents(net_base),
            driver_commission,
            company_profit,
            total_income: round_cents(total_income),
        }
    }
}
