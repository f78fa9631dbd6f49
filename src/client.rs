//! FlexOffers client: construction and the public operations.

mod apply;
mod catalog;
mod core;

pub use self::core::{FlexOffersClient, FlexOffersClientBuilder};
