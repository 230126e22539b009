//! Page Components

mod buy;
mod home;
mod success;

pub use buy::BuyEditionPage;
pub use home::HomePage;
pub use success::PaymentSuccessPage;
