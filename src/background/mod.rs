pub mod sync_task;
