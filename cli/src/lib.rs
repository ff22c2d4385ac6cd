pub mod corpus;
pub mod input;
pub mod output;
