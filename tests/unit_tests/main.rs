#[path = "../helpers/mod.rs"]
mod helpers;

mod presentation;
