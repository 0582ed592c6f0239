pub mod backtest;
pub mod errors;
pub mod models;
pub mod parser;
pub mod session;
pub mod trainer;
