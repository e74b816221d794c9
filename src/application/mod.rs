//! Application - use-case handlers wiring domain logic to the ports.

mod answer_query;

pub use answer_query::AnswerQueryHandler;
