pub mod authorization;
pub mod delivery;
pub mod jwt;
pub mod scheduler;
pub mod task_registry;
