//! Request generator behaviour over hand-built block sequences

mod properties;
mod scenarios;
