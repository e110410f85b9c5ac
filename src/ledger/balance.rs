use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::sum_cents;
use crate::models::payment::{Party, Payment};
use crate::models::trip::Trip;
use crate::repository::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A trip billed to a dealer.
    Bill,
    /// A driver's commission earned on a trip.
    Commission,
    Payment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    /// The trip or payment this row comes from.
    pub reference_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub note: String,
}

/// Running account for one dealer or driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyLedger {
    /// Dealer: sum of trip bills. Driver: sum of commissions.
    pub total_charged: f64,
    pub total_paid: f64,
    /// `total_charged - total_paid`.
    pub balance: f64,
    /// Newest first.
    pub entries: Vec<LedgerEntry>,
}

pub fn dealer_ledger(dealer_id: Uuid, trips: &[Record<Trip>], payments: &[Record<Payment>]) -> PartyLedger {
    let charges = trips
        .iter()
        .filter(|t| t.data.dealer_id == Some(dealer_id))
        .map(|t| LedgerEntry {
            kind: EntryKind::Bill,
            reference_id: t.id,
            date: t.data.date,
            amount: t.data.total_sale,
            note: route_note(&t.data),
        });
    build(charges.collect(), Party::Dealer, dealer_id, payments)
}

pub fn driver_ledger(driver_id: Uuid, trips: &[Record<Trip>], payments: &[Record<Payment>]) -> PartyLedger {
    let charges = trips
        .iter()
        .filter(|t| t.data.driver_id == driver_id)
        .map(|t| LedgerEntry {
            kind: EntryKind::Commission,
            reference_id: t.id,
            date: t.data.date,
            amount: t.data.driver_commission,
            note: route_note(&t.data),
        });
    build(charges.collect(), Party::Driver, driver_id, payments)
}

fn build(mut entries: Vec<LedgerEntry>, party: Party, party_id: Uuid, payments: &[Record<Payment>]) -> PartyLedger {
    let charged_count = entries.len();
    entries.extend(
        payments
            .iter()
            .filter(|p| p.data.party == party && p.data.party_id == party_id)
            .map(|p| LedgerEntry {
                kind: EntryKind::Payment,
                reference_id: p.id,
                date: p.data.date,
                amount: p.data.amount,
                note: p.data.note.clone(),
            }),
    );

    let total_charged = sum_cents(entries[..charged_count].iter().map(|e| e.amount));
    let total_paid = sum_cents(entries[charged_count..].iter().map(|e| e.amount));

    // stable: same-day rows keep charges ahead of payments
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    PartyLedger {
        total_charged,
        total_paid,
        balance: sum_cents([total_charged, -total_paid]),
        entries,
    }
}

fn route_note(trip: &Trip) -> String {
    match (trip.pickup_city.is_empty(), trip.dropoff_city.is_empty()) {
        (true, true) => String::new(),
        _ => format!("{} → {}", trip.pickup_city, trip.dropoff_city),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record<T>(data: T) -> Record<T> {
        let now = Utc::now();
        Record { id: Uuid::new_v4(), data, created_at: now, updated_at: now }
    }

    fn trip(driver: Uuid, dealer: Option<Uuid>, day: &str, sale: f64, commission: f64) -> Record<Trip> {
        record(Trip {
            driver_id: driver,
            truck_id: Uuid::new_v4(),
            dealer_id: dealer,
            date: day.parse().unwrap(),
            pickup_city: "Lahore".into(),
            dropoff_city: "Karachi".into(),
            total_sale: sale,
            amount_received: 0.0,
            expenses: 0.0,
            fuel_cost: 0.0,
            other_expenses: 0.0,
            kilometres: 0.0,
            amount_pending: sale,
            total_income: 0.0,
            driver_commission: commission,
            company_profit: 0.0,
        })
    }

    fn payment(party: Party, party_id: Uuid, day: &str, amount: f64) -> Record<Payment> {
        record(Payment { party, party_id, date: day.parse().unwrap(), amount, note: String::new() })
    }

    #[test]
    fn dealer_balance_is_bill_minus_payments() {
        let dealer = Uuid::new_v4();
        let other = Uuid::new_v4();
        let trips = vec![
            trip(Uuid::new_v4(), Some(dealer), "2025-01-01", 1000.0, 0.0),
            trip(Uuid::new_v4(), Some(dealer), "2025-01-03", 500.5, 0.0),
            trip(Uuid::new_v4(), Some(other), "2025-01-02", 9999.0, 0.0),
        ];
        let payments = vec![
            payment(Party::Dealer, dealer, "2025-01-02", 300.25),
            payment(Party::Dealer, other, "2025-01-02", 50.0),
            payment(Party::Driver, dealer, "2025-01-02", 75.0),
        ];

        let ledger = dealer_ledger(dealer, &trips, &payments);
        assert_eq!(ledger.total_charged, 1500.5);
        assert_eq!(ledger.total_paid, 300.25);
        assert_eq!(ledger.balance, 1200.25);
        assert_eq!(ledger.entries.len(), 3);
        assert_eq!(ledger.entries[0].date.to_string(), "2025-01-03");
        assert_eq!(ledger.entries[1].kind, EntryKind::Payment);
        assert_eq!(ledger.entries[2].note, "Lahore → Karachi");
    }

    #[test]
    fn driver_balance_is_commission_minus_payouts() {
        let driver = Uuid::new_v4();
        let trips = vec![
            trip(driver, None, "2025-02-01", 0.0, 0.1),
            trip(driver, None, "2025-02-01", 0.0, 0.2),
            trip(Uuid::new_v4(), None, "2025-02-01", 0.0, 100.0),
        ];
        let payments = vec![payment(Party::Driver, driver, "2025-02-02", 0.1)];

        let ledger = driver_ledger(driver, &trips, &payments);
        // cent arithmetic: 0.1 + 0.2 is exactly 0.3 here
        assert_eq!(ledger.total_charged, 0.3);
        assert_eq!(ledger.total_paid, 0.1);
        assert_eq!(ledger.balance, 0.2);
        assert_eq!(ledger.entries[0].kind, EntryKind::Payment);
    }

    #[test]
    fn unknown_party_has_empty_ledger() {
        let ledger = driver_ledger(Uuid::new_v4(), &[], &[]);
        assert_eq!(ledger.total_charged, 0.0);
        assert_eq!(ledger.balance, 0.0);
        assert!(ledger.entries.is_empty());
    }
}
