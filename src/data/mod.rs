pub mod geoip;
pub mod weather;
