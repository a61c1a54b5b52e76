pub mod account;
pub mod cart;
pub mod contact;
pub mod menu;
pub mod offer;
pub mod payment;
pub mod property;
pub mod review;

pub use account::{Account, Role};
pub use cart::CartEntry;
pub use contact::ContactMessage;
pub use menu::MenuItem;
pub use offer::{Offer, OfferStatus};
pub use payment::Payment;
pub use property::{Property, PropertyStatus};
pub use review::Review;
