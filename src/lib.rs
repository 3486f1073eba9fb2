pub mod corpus;
pub mod io;
pub mod lms;
pub mod tokenize;
