pub mod commit;
pub mod snapshot;
