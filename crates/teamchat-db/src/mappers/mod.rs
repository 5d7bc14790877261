//! Entity <-> model mappers

mod member;
mod message;
mod room;
mod user;
