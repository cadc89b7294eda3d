mod forecaster;
mod venue_store;

pub use forecaster::ICongestionForecaster;
pub use venue_store::IVenueStore;
