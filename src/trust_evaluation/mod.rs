/// Trust evaluation domain - dependency trust and deployment approval logic
pub mod domain;
pub mod policies;
pub mod services;
