// Console front end for the club power rankings.

pub mod app;
pub mod display;
pub mod prompt;
