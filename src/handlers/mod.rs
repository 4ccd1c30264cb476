pub mod health_handlers;
pub mod meetup_handlers;
pub mod photo_handlers;
pub mod social_handlers;
