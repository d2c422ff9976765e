use ausflug_entities::trip::TripId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The trip {0} does not exist")]
    UnknownTrip(TripId),
    #[error("There are no trips at all")]
    NoTrips,
}
