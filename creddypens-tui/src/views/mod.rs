pub mod academy;
pub mod analytics;
pub mod chat;
pub mod dashboard;
pub mod help;
pub mod inbox;
pub mod marketplace;
pub mod skills;
pub mod staff;
pub mod workflows;
