pub mod dealer;
pub mod driver;
pub mod lenient;
pub mod payment;
pub mod reports;
pub mod trip;
pub mod truck;
pub mod tyre;
