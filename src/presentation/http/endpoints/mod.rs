pub mod broadcasts;
pub mod health;
pub mod jobs;
pub mod root;
