pub mod dealer;
pub mod driver;
pub mod payment;
pub mod trip;
pub mod truck;
pub mod tyre;
