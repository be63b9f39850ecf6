pub mod broadcast_task;
