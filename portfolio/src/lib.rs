pub mod commands;
mod database;
mod environment;
