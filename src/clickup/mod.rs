pub mod client;
pub mod oauth;
pub mod tasks;
pub mod team;

pub use client::{ClickUpClient, DEFAULT_BASE_URL};
pub use oauth::ClickUpOAuth;
pub use tasks::{ClickUpTasks, PageProgress};
pub use team::ClickUpTeam;
