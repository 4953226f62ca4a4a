pub mod availability;
pub mod film;
pub mod film_actor;
pub mod store;
