// crates/geobed-core/src/model/mod.rs
pub mod city;
pub mod country;
pub mod states;

pub use city::City;
pub use country::{Country, CountryTable};
pub use states::{us_state_name, US_STATE_CODES};
