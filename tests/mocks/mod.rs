pub mod mock_delivery;
pub mod mock_mail_handler;

#[allow(unused_imports)]
pub use mock_delivery::MockDelivery;
#[allow(unused_imports)]
pub use mock_mail_handler::MockMailHandler;
