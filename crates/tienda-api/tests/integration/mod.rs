mod auth;
mod orders;
mod products;
mod users;
