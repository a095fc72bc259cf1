#![allow(dead_code)]

mod fakes;
mod test_postgres;

pub use fakes::{FailingLlmClient, FlakyRepository, RecordingLlmClient};
pub use test_postgres::TestPostgres;
