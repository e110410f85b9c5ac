use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::round_cents;
use crate::error::AppError;
use crate::models::trip::Trip;
use crate::repository::Record;

/// Money and distance totals over a set of trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_bill: f64,
    pub amount_received: f64,
    pub amount_pending: f64,
    pub expenses: f64,
    pub fuel_cost: f64,
    pub other_expenses: f64,
    pub total_expenses: f64,
    pub total_income: f64,
    pub driver_commission: f64,
    pub company_profit: f64,
    pub mileage: f64,
    pub trip_count: usize,
}

impl LedgerSummary {
    pub fn add(&mut self, trip: &Trip) {
        self.total_bill += trip.total_sale;
        self.amount_received += trip.amount_received;
        self.amount_pending += trip.amount_pending;
        self.expenses += trip.expenses;
        self.fuel_cost += trip.fuel_cost;
        self.other_expenses += trip.other_expenses;
        self.total_expenses += trip.combined_expenses();
        self.total_income += trip.total_income;
        self.driver_commission += trip.driver_commission;
        self.company_profit += trip.company_profit;
        self.mileage += trip.kilometres;
        self.trip_count += 1;
    }

    pub fn of<'a, I>(trips: I) -> Self
    where
        I: IntoIterator<Item = &'a Trip>,
    {
        let mut summary = trips.into_iter().fold(Self::default(), |mut acc, trip| {
            acc.add(trip);
            acc
        });
        summary.round();
        summary
    }

    fn round(&mut self) {
        for value in [
            &mut self.total_bill,
            &mut self.amount_received,
            &mut self.amount_pending,
            &mut self.expenses,
            &mut self.fuel_cost,
            &mut self.other_expenses,
            &mut self.total_expenses,
            &mut self.total_income,
            &mut self.driver_commission,
            &mut self.company_profit,
            &mut self.mileage,
        ] {
            *value = round_cents(*value);
        }
    }
}

/// Optional narrowing of a trip set. Every bound is inclusive and every unset
/// field matches everything.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TripFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub dealer_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub truck_id: Option<Uuid>,
    /// 1-12.
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl TripFilter {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(AppError::validation("month must be between 1 and 12"));
            }
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(AppError::validation("from must not be after to"));
            }
        }
        Ok(())
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        self.from.map_or(true, |from| trip.date >= from)
            && self.to.map_or(true, |to| trip.date <= to)
            && self.dealer_id.map_or(true, |id| trip.dealer_id == Some(id))
            && self.driver_id.map_or(true, |id| trip.driver_id == id)
            && self.truck_id.map_or(true, |id| trip.truck_id == id)
            && self.month.map_or(true, |m| trip.date.month() == m)
            && self.year.map_or(true, |y| trip.date.year() == y)
    }

    pub fn apply(&self, trips: Vec<Record<Trip>>) -> Vec<Record<Trip>> {
        trips.into_iter().filter(|t| self.matches(&t.data)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub day: NaiveDate,
    pub summary: LedgerSummary,
    pub trips: Vec<Record<Trip>>,
}

/// Partitions trips by calendar date, newest day first. Trips keep their
/// incoming order inside a bucket.
pub fn group_by_day(trips: Vec<Record<Trip>>) -> Vec<DayBucket> {
    let mut days: BTreeMap<NaiveDate, Vec<Record<Trip>>> = BTreeMap::new();
    for trip in trips {
        days.entry(trip.data.date).or_default().push(trip);
    }
    days.into_iter()
        .rev()
        .map(|(day, trips)| DayBucket {
            day,
            summary: LedgerSummary::of(trips.iter().map(|t| &t.data)),
            trips,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: u32,
    pub summary: LedgerSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub months: Vec<MonthSummary>,
    pub total: LedgerSummary,
}

/// Twelve monthly summaries for `year` (empty months included) and the year
/// total. Trips from other years are ignored.
pub fn monthly<'a, I>(trips: I, year: i32) -> YearSummary
where
    I: IntoIterator<Item = &'a Trip>,
{
    let mut buckets: Vec<Vec<&Trip>> = vec![Vec::new(); 12];
    for trip in trips.into_iter().filter(|t| t.date.year() == year) {
        buckets[trip.date.month0() as usize].push(trip);
    }
    let total = LedgerSummary::of(buckets.iter().flatten().copied());
    let months = buckets
        .into_iter()
        .enumerate()
        .map(|(i, trips)| MonthSummary {
            month: i as u32 + 1,
            summary: LedgerSummary::of(trips),
        })
        .collect();
    YearSummary { year, months, total }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Dealer,
    Driver,
    Truck,
}

/// One summary per referenced party. Trips without a dealer are left out of a
/// dealer breakdown.
pub fn breakdown<'a, I>(trips: I, by: GroupBy) -> HashMap<Uuid, LedgerSummary>
where
    I: IntoIterator<Item = &'a Trip>,
{
    let mut groups: HashMap<Uuid, Vec<&Trip>> = HashMap::new();
    for trip in trips {
        let key = match by {
            GroupBy::Dealer => trip.dealer_id,
            GroupBy::Driver => Some(trip.driver_id),
            GroupBy::Truck => Some(trip.truck_id),
        };
        if let Some(key) = key {
            groups.entry(key).or_default().push(trip);
        }
    }
    groups
        .into_iter()
        .map(|(id, trips)| (id, LedgerSummary::of(trips)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPoint {
    pub date: NaiveDate,
    pub count: usize,
}

/// Trip counts for the `days` calendar days ending at `today`, oldest first,
/// with zero-count days included.
pub fn activity<'a, I>(trips: I, today: NaiveDate, days: u32) -> Vec<ActivityPoint>
where
    I: IntoIterator<Item = &'a Trip>,
{
    if days == 0 {
        return Vec::new();
    }
    let start = today - Duration::days(i64::from(days) - 1);
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for trip in trips {
        if trip.date >= start && trip.date <= today {
            *counts.entry(trip.date).or_default() += 1;
        }
    }
    (0..days)
        .map(|offset| {
            let date = start + Duration::days(i64::from(offset));
            ActivityPoint { date, count: counts.get(&date).copied().unwrap_or(0) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn trip(day: &str, sale: f64, received: f64, km: f64) -> Trip {
        Trip {
            driver_id: Uuid::nil(),
            truck_id: Uuid::nil(),
            dealer_id: None,
            date: date(day),
            pickup_city: String::new(),
            dropoff_city: String::new(),
            total_sale: sale,
            amount_received: received,
            expenses: 10.0,
            fuel_cost: 20.0,
            other_expenses: 5.0,
            kilometres: km,
            amount_pending: sale - received,
            total_income: received - 35.0,
            driver_commission: (received - 35.0) * 0.1,
            company_profit: (received - 35.0) * 0.9,
        }
    }

    fn record(data: Trip) -> Record<Trip> {
        let now = Utc::now();
        Record { id: Uuid::new_v4(), data, created_at: now, updated_at: now }
    }

    #[test]
    fn empty_set_is_all_zero() {
        let summary = LedgerSummary::of(std::iter::empty());
        assert_eq!(summary, LedgerSummary::default());
        assert_eq!(summary.trip_count, 0);
    }

    #[test]
    fn sums_every_field() {
        let trips = [trip("2025-03-01", 1000.0, 800.0, 120.0), trip("2025-03-02", 500.0, 500.0, 80.0)];
        let s = LedgerSummary::of(trips.iter());
        assert_eq!(s.total_bill, 1500.0);
        assert_eq!(s.amount_received, 1300.0);
        assert_eq!(s.amount_pending, 200.0);
        assert_eq!(s.expenses, 20.0);
        assert_eq!(s.fuel_cost, 40.0);
        assert_eq!(s.other_expenses, 10.0);
        assert_eq!(s.total_expenses, 70.0);
        assert_eq!(s.total_income, 1230.0);
        assert_eq!(s.driver_commission, 123.0);
        assert_eq!(s.company_profit, 1107.0);
        assert_eq!(s.mileage, 200.0);
        assert_eq!(s.trip_count, 2);
    }

    #[test]
    fn filter_by_month_year_and_party() {
        let driver = Uuid::new_v4();
        let dealer = Uuid::new_v4();
        let mut a = trip("2025-03-10", 100.0, 100.0, 1.0);
        a.driver_id = driver;
        a.dealer_id = Some(dealer);
        let b = trip("2025-04-10", 100.0, 100.0, 1.0);
        let c = trip("2024-03-10", 100.0, 100.0, 1.0);

        let march_2025 = TripFilter { month: Some(3), year: Some(2025), ..Default::default() };
        assert!(march_2025.matches(&a));
        assert!(!march_2025.matches(&b));
        assert!(!march_2025.matches(&c));

        let by_driver = TripFilter { driver_id: Some(driver), ..Default::default() };
        assert!(by_driver.matches(&a) && !by_driver.matches(&b));

        let by_dealer = TripFilter { dealer_id: Some(dealer), ..Default::default() };
        assert!(by_dealer.matches(&a) && !by_dealer.matches(&c));

        let range = TripFilter { from: Some(date("2025-03-10")), to: Some(date("2025-04-01")), ..Default::default() };
        assert!(range.matches(&a) && !range.matches(&b));
    }

    #[test]
    fn filter_validation() {
        assert!(TripFilter { month: Some(13), ..Default::default() }.validate().is_err());
        assert!(TripFilter {
            from: Some(date("2025-02-01")),
            to: Some(date("2025-01-01")),
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(TripFilter::default().validate().is_ok());
    }

    #[test]
    fn days_are_grouped_newest_first() {
        let trips = vec![
            record(trip("2025-03-01", 100.0, 50.0, 1.0)),
            record(trip("2025-03-03", 200.0, 50.0, 1.0)),
            record(trip("2025-03-01", 300.0, 50.0, 1.0)),
        ];
        let days = group_by_day(trips);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, date("2025-03-03"));
        assert_eq!(days[1].trips.len(), 2);
        assert_eq!(days[1].summary.total_bill, 400.0);
        assert_eq!(days[1].trips[0].data.total_sale, 100.0);
    }

    #[test]
    fn monthly_has_twelve_buckets() {
        let trips = [
            trip("2025-01-15", 100.0, 100.0, 10.0),
            trip("2025-01-20", 50.0, 50.0, 5.0),
            trip("2025-12-31", 25.0, 25.0, 1.0),
            trip("2024-06-01", 999.0, 999.0, 1.0),
        ];
        let year = monthly(trips.iter(), 2025);
        assert_eq!(year.months.len(), 12);
        assert_eq!(year.months[0].summary.total_bill, 150.0);
        assert_eq!(year.months[5].summary.trip_count, 0);
        assert_eq!(year.months[11].month, 12);
        assert_eq!(year.total.total_bill, 175.0);
        assert_eq!(year.total.trip_count, 3);
    }

    #[test]
    fn breakdown_by_dealer_skips_unassigned() {
        let dealer = Uuid::new_v4();
        let mut a = trip("2025-01-01", 100.0, 0.0, 0.0);
        a.dealer_id = Some(dealer);
        let mut b = a.clone();
        b.total_sale = 50.0;
        let c = trip("2025-01-01", 70.0, 0.0, 0.0);

        let groups = breakdown([a, b, c].iter(), GroupBy::Dealer);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&dealer].total_bill, 150.0);

        let by_truck = breakdown([trip("2025-01-01", 1.0, 0.0, 0.0)].iter(), GroupBy::Truck);
        assert_eq!(by_truck[&Uuid::nil()].trip_count, 1);
    }

    #[test]
    fn activity_fills_missing_days() {
        let today = date("2025-03-07");
        let trips = [
            trip("2025-03-07", 1.0, 0.0, 0.0),
            trip("2025-03-07", 1.0, 0.0, 0.0),
            trip("2025-03-01", 1.0, 0.0, 0.0),
            trip("2025-02-28", 1.0, 0.0, 0.0),
        ];
        let points = activity(trips.iter(), today, 7);
        assert_eq!(points.len(), 7);
        assert_eq!(points[0], ActivityPoint { date: date("2025-03-01"), count: 1 });
        assert_eq!(points[3].count, 0);
        assert_eq!(points[6], ActivityPoint { date: today, count: 2 });
    }
}
