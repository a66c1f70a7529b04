pub mod catalog;
pub mod checkout;
pub mod stripe;

pub use checkout::{CheckoutError, CheckoutService};
pub use stripe::{PaymentGateway, StripeClient};
