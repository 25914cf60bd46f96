pub mod day_7;
