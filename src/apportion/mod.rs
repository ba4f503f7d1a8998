pub mod divisor;
pub mod huntington_hill;
pub mod sainte_lague;

pub use divisor::{apportion, Apportionment, DivisorMethod};
pub use huntington_hill::HuntingtonHill;
pub use sainte_lague::SainteLague;

use crate::types::ApportionError;

/// Convert a signed seat count from an outer boundary into the engine's
/// unsigned form. The CLI's `--electors` flag goes through here via
/// [`ApportionConfig::with_total_electors`](crate::config::ApportionConfig::with_total_electors);
/// library callers holding signed counts should do the same.
pub fn seats_from_signed(seats: i64) -> Result<u32, ApportionError> {
    if seats < 0 {
        return Err(ApportionError::NegativeSeats(seats));
    }
    u32::try_from(seats).map_err(|_| ApportionError::SeatsOutOfRange(seats))
}
